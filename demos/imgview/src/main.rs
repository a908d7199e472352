// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use std::time::Duration;

use anyhow::bail;
use clap::Parser;
use jacui::prelude::*;

/// Show images, one at a time.
#[derive(Debug, Parser)]
struct Args {
    /// Switch to the next image every MS milliseconds
    #[arg(short = 'i', value_name = "MS")]
    interval: Option<u64>,

    /// Open a fullscreen window
    #[arg(short = 'F')]
    fullscreen: bool,

    /// Image files
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

struct Viewer {
    images: Vec<(PathBuf, Image)>,
    current: usize,
    crosshair: bool,
}

impl Viewer {
    fn image(&self) -> &Image {
        &self.images[self.current].1
    }

    /// Where the current image is shown: centered in the window.
    fn placement(&self, window: Size2d) -> Rect2d {
        let size = self.image().size();
        let x = (window.width as i32 - size.width as i32) / 2;
        let y = (window.height as i32 - size.height as i32) / 2;
        Rect2d::new(Point2d::new(x, y), size)
    }

    fn show(&mut self, window: &mut Window, index: usize) -> anyhow::Result<()> {
        self.current = index % self.images.len();
        let title = self.images[self.current].0.display().to_string();
        window.set_title(&title);
        self.draw(window)
    }

    fn draw(&self, window: &mut Window) -> anyhow::Result<()> {
        let rect = self.placement(window.size());
        let view = window.view_mut();
        view.fill(colors::GRAY);
        view.blit_at(self.image(), rect.offset());
        window.update()?;
        Ok(())
    }

    fn track_cursor(&mut self, window: &mut Window, point: Point2d) -> anyhow::Result<()> {
        let over = self.placement(window.size()).includes(point);
        if over != self.crosshair {
            self.crosshair = over;
            window.set_cursor(if over { cursors::crosshair() } else { cursors::arrow() })?;
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut images = Vec::new();
    for path in args.files {
        match Image::open(&path) {
            Ok(image) => images.push((path, image)),
            Err(err) => log::warn!("skipping {}: {}", path.display(), err),
        }
    }
    if images.is_empty() {
        bail!("no image could be loaded");
    }

    let size = images
        .iter()
        .fold(Size2d::default(), |acc, (_, image)| {
            Size2d::new(acc.width.max(image.width()), acc.height.max(image.height()))
        });
    let flags = if args.fullscreen {
        WindowFlags::FULLSCREEN
    } else {
        WindowFlags::empty()
    };

    let mut viewer = Viewer {
        images,
        current: 0,
        crosshair: false,
    };
    let mut window: Window = Window::with_size("imgview", size, flags)?;
    if let Some(ms) = args.interval {
        window.set_interval(Duration::from_millis(ms))?;
    }
    viewer.show(&mut window, 0)?;

    let count = viewer.images.len();
    while let Some(event) = window.wait()? {
        match event {
            Event::Redraw { .. } => viewer.draw(&mut window)?,
            Event::Timer(_) => viewer.show(&mut window, viewer.current + 1)?,
            Event::MouseMove(mouse) => viewer.track_cursor(&mut window, mouse.point)?,
            Event::MouseDown(mouse) => match mouse.button {
                Some(MouseButton::Left) | Some(MouseButton::WheelDown) => {
                    viewer.show(&mut window, viewer.current + 1)?
                }
                Some(MouseButton::Right) | Some(MouseButton::WheelUp) => {
                    viewer.show(&mut window, viewer.current + count - 1)?
                }
                _ => {}
            },
            Event::KeyDown(key) => match key.key {
                Key::RIGHT | Key::DOWN | Key::PGDOWN => viewer.show(&mut window, viewer.current + 1)?,
                Key::LEFT | Key::UP | Key::PGUP => viewer.show(&mut window, viewer.current + count - 1)?,
                Key::HOME => viewer.show(&mut window, 0)?,
                Key::END => viewer.show(&mut window, count - 1)?,
                Key::ESC => window.close(),
                k if k == Key::from_char('q') => window.close(),
                k if k == Key::from_char(' ') => viewer.show(&mut window, viewer.current + 1)?,
                _ => {}
            },
            _ => {}
        }
    }

    Ok(())
}
