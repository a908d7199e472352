// SPDX-License-Identifier: MIT

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use jacui::prelude::*;

/// Fonts tried when no font file is given.
const FALLBACK_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Show a line of text in a window and print the font metrics.
#[derive(Debug, Parser)]
struct Args {
    /// TrueType font file
    #[arg(short = 'f', value_name = "FONTFILE")]
    font: Option<PathBuf>,

    /// Font size in points
    #[arg(short = 's', value_name = "PTSIZE", default_value_t = 12)]
    size: u32,

    /// Render into a canvas first and blit that
    #[arg(short = 'c')]
    canvas: bool,

    /// Move the baseline down by DY pixels
    #[arg(short = 'y', value_name = "DY", default_value_t = 0, allow_negative_numbers = true)]
    dy: i32,

    /// The text; read from stdin if missing
    text: Option<String>,
}

fn open_font(args: &Args) -> anyhow::Result<Font> {
    if let Some(path) = &args.font {
        return Font::open(path, args.size).with_context(|| format!("cannot open {}", path.display()));
    }
    for path in FALLBACK_FONTS {
        if let Ok(font) = Font::open(path, args.size) {
            log::info!("using {}", path);
            return Ok(font);
        }
    }
    bail!("no font found, use -f FONTFILE")
}

fn redraw(window: &mut Window, font: &Font, text: &str, rendered: Option<&Canvas>, dy: i32) {
    let bg = Color::gray(0xff);
    let fg = Color::gray(0x00);
    match rendered {
        Some(canvas) => window.view_mut().blit(canvas),
        None => {
            window.view_mut().fill(bg);
            font.draw(window.view_mut(), text, fg, Point2d::new(0, font.ascent() + dy));
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let text = match &args.text {
        Some(text) => text.clone(),
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            input.split_whitespace().next().unwrap_or_default().to_string()
        }
    };

    let font = open_font(&args)?;
    let family = font.family();
    let style = font.style();
    println!("Family: {}", family.as_deref().unwrap_or("n/a"));
    println!("Style: {}", style.as_deref().unwrap_or("n/a"));
    println!("Size: {}", font.size());
    println!("Height: {}", font.height());
    println!("Ascent: {}", font.ascent());
    println!("Descent: {}", font.descent());
    println!("Leading: {}", font.leading());

    let size = font.text_size(&text);
    println!("Text size: {}x{}", size.width, size.height);

    let title = match (family, style) {
        (Some(family), Some(style)) => format!("{} - {}", family, style),
        (Some(family), None) => family,
        _ => String::from("Font View"),
    };

    let mut window: Window = Window::with_size(&title, size, WindowFlags::empty())?;
    let rendered = args
        .canvas
        .then(|| font.render(&text, Color::gray(0x00), Color::gray(0xff)));

    redraw(&mut window, &font, &text, rendered.as_ref(), args.dy);
    window.update()?;

    while let Some(event) = window.wait()? {
        match event {
            Event::Redraw { .. } => {
                redraw(&mut window, &font, &text, rendered.as_ref(), args.dy);
                window.update()?;
            }
            Event::KeyDown(key) if key.key == Key::from_char('q') || key.key == Key::ESC => {
                window.close();
            }
            _ => {}
        }
    }

    Ok(())
}
