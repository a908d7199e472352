use std::time::Duration;

use jacui_core::color::colors;
use jacui_core::cursor::cursors;
use jacui_core::event::{Event, Key, Modifiers, SourceEvent};
use jacui_core::platform::HeadlessBackend;
use jacui_core::surface::{Surface, SurfaceMut};
use jacui_core::types::{Point2d, Rect2d, Size2d};
use jacui_core::window::Window;
use jacui_core::xpm::XpmIcon;

fn headless(width: u32, height: u32) -> Window<HeadlessBackend> {
    Window::with_backend(HeadlessBackend::new(Size2d::new(width, height)))
}

#[test]
fn test_size_and_title() {
    let mut window = headless(320, 200);
    assert_eq!(window.size(), Size2d::new(320, 200));
    assert_eq!(window.width(), 320);
    assert_eq!(window.height(), 200);

    assert_eq!(window.set_title("first"), "");
    assert_eq!(window.set_title("second"), "first");
    assert_eq!(window.title(), "second");
}

#[test]
fn test_draw_and_update() {
    let mut window = headless(16, 16);
    window.view_mut().fill(colors::NAVY);
    window.view_mut().fill_rect(colors::YELLOW, Rect2d::from_xywh(4, 4, 2, 2));
    window.update().unwrap();

    let frames = window.backend().frames();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].pixel(Point2d::new(0, 0)), Some(colors::NAVY));
    assert_eq!(frames[0].pixel(Point2d::new(5, 5)), Some(colors::YELLOW));
}

#[test]
fn test_resize() {
    let mut window = headless(16, 16);
    window.resize(Size2d::new(40, 30)).unwrap();
    assert_eq!(window.size(), Size2d::new(40, 30));
    assert_eq!(window.view().size(), Size2d::new(40, 30));
}

#[test]
fn test_resize_keeps_drawing() {
    let mut window = headless(4, 4);
    window.view_mut().fill(colors::TEAL);
    window.resize(Size2d::new(8, 2)).unwrap();

    assert_eq!(window.view().pixel(Point2d::new(3, 1)), Some(colors::TEAL));
    assert_eq!(window.view().pixel(Point2d::new(4, 0)), Some(colors::BLACK));
}

#[test]
fn test_cursor_and_icon() {
    let mut window = headless(16, 16);
    window.show_cursor(false);
    assert!(!window.backend().cursor_visible());

    window.set_cursor(cursors::crosshair()).unwrap();
    assert_eq!(window.backend().cursor(), Some(cursors::crosshair()));

    let icon = XpmIcon::from_lines(&["2 1 2 1", "o c #00ff00", "  c None", "o "]).unwrap();
    window.set_icon(&icon).unwrap();
    assert_eq!(window.backend().icon(), Some(&icon));
}

#[test]
fn test_event_loop() {
    let mut window = headless(100, 100);
    window.backend_mut().inject(SourceEvent::Resize(Size2d::new(240, 160)));

    let mut seen = Vec::new();
    while let Some(event) = window.wait().unwrap() {
        seen.push(event.name());
        match event {
            Event::Redraw { rect } => {
                window.view_mut().fill(colors::TEAL);
                window.update().unwrap();
                assert_eq!(rect, Rect2d::from(window.size()));
                window.backend_mut().inject(SourceEvent::Key {
                    key: Key::ESC,
                    text: None,
                    pressed: true,
                    modifiers: Modifiers::empty(),
                });
            }
            Event::KeyDown(key) if key.key == Key::ESC => window.close(),
            _ => {}
        }
    }

    assert_eq!(seen, ["resize", "redraw", "keydown"]);
    assert_eq!(window.size(), Size2d::new(240, 160));
    assert_eq!(window.backend().frames().len(), 1);
    assert_eq!(window.backend().frames()[0].size(), Size2d::new(240, 160));
}

#[test]
fn test_user_events_and_timers() {
    let mut window: Window<HeadlessBackend, &'static str> =
        Window::with_backend(HeadlessBackend::new(Size2d::new(8, 8)));
    let timer = window.set_timeout(Duration::from_millis(5)).unwrap();
    window.push("hello");

    assert_eq!(window.wait().unwrap(), Some(Event::User("hello")));
    assert_eq!(window.wait().unwrap(), Some(Event::Timer(timer)));
    assert!(!window.clear_timer(jacui_core::timer::TimerId(0)));
    assert_eq!(window.wait().unwrap(), Some(Event::Quit));
}
