use std::time::Duration;

use jacui_core::event::{Event, EventType, Key, Modifiers, MouseButton, SourceEvent};
use jacui_core::event_queue::EventQueue;
use jacui_core::platform::{Backend, HeadlessBackend};
use jacui_core::timer::MAX_TIMERS;
use jacui_core::types::{Point2d, Rect2d, Size2d};
use jacui_core::Error;

fn queue_with(events: &[SourceEvent]) -> EventQueue<HeadlessBackend, u32> {
    let mut backend = HeadlessBackend::new(Size2d::new(100, 50));
    for event in events {
        backend.inject(event.clone());
    }
    EventQueue::new(backend)
}

#[test]
fn test_resize_is_applied_on_next_fetch() {
    let mut queue = queue_with(&[SourceEvent::Resize(Size2d::new(200, 80))]);

    assert_eq!(
        queue.wait().unwrap(),
        Some(Event::Resize {
            size: Size2d::new(200, 80)
        })
    );
    // still the old size while the resize is being handled
    assert_eq!(queue.backend().screen_size(), Size2d::new(100, 50));

    assert_eq!(
        queue.wait().unwrap(),
        Some(Event::Redraw {
            rect: Rect2d::from_xywh(0, 0, 200, 80)
        })
    );
    assert_eq!(queue.backend().screen_size(), Size2d::new(200, 80));
}

#[test]
fn test_cancelled_resize_is_not_applied() {
    let mut queue = queue_with(&[SourceEvent::Resize(Size2d::new(200, 80))]);

    assert_eq!(queue.wait().unwrap().map(|e| e.event_type()), Some(EventType::Resize));
    assert_eq!(queue.last_type(), EventType::Resize);
    assert!(queue.cancel());
    assert_eq!(queue.last_type(), EventType::NoEvent);
    assert!(!queue.cancel());

    assert_eq!(queue.poll().unwrap(), None);
    assert_eq!(queue.backend().screen_size(), Size2d::new(100, 50));
}

#[test]
fn test_exhausted_source_quits() {
    let mut queue = queue_with(&[]);
    assert_eq!(queue.poll().unwrap(), None);
    assert_eq!(queue.wait().unwrap(), Some(Event::Quit));
    assert_eq!(queue.wait().unwrap(), None);
    assert_eq!(queue.poll().unwrap(), None);
    assert!(queue.is_closed());
}

#[test]
fn test_cancelled_quit_keeps_running() {
    let mut queue = queue_with(&[SourceEvent::Quit, SourceEvent::Motion(Point2d::new(3, 4))]);

    assert_eq!(queue.wait().unwrap(), Some(Event::Quit));
    assert!(queue.cancel());
    assert_eq!(queue.wait().unwrap().map(|e| e.point()), Some(Point2d::new(3, 4)));
    assert!(!queue.is_closed());
}

#[test]
fn test_close() {
    let mut queue = queue_with(&[SourceEvent::Expose]);
    queue.close();
    assert_eq!(queue.wait().unwrap(), None);
    assert_eq!(queue.poll().unwrap(), None);
}

#[test]
fn test_user_events_are_fifo() {
    let mut queue = queue_with(&[SourceEvent::Expose, SourceEvent::Motion(Point2d::new(1, 1))]);

    assert_eq!(queue.poll().unwrap().map(|e| e.event_type()), Some(EventType::Redraw));
    queue.push(7);
    queue.push(8);

    assert_eq!(queue.wait().unwrap().map(|e| e.event_type()), Some(EventType::MouseMove));
    assert_eq!(queue.wait().unwrap(), Some(Event::User(7)));
    assert_eq!(queue.wait().unwrap(), Some(Event::User(8)));
    assert_eq!(queue.poll().unwrap(), None);
}

#[test]
fn test_input_translation() {
    let mut backend = HeadlessBackend::new(Size2d::new(64, 64));
    backend.set_modifiers(Modifiers::SHIFT);
    backend.inject(SourceEvent::Focus(true));
    backend.inject(SourceEvent::Motion(Point2d::new(10, 20)));
    backend.inject(SourceEvent::Button {
        button: MouseButton::Right,
        pressed: true,
        point: Point2d::new(11, 21),
    });
    backend.inject(SourceEvent::Button {
        button: MouseButton::Right,
        pressed: false,
        point: Point2d::new(12, 22),
    });
    backend.inject(SourceEvent::Key {
        key: Key::from_char('a'),
        text: Some('a'),
        pressed: true,
        modifiers: Modifiers::CTRL,
    });
    backend.inject(SourceEvent::Key {
        key: Key::ESC,
        text: None,
        pressed: false,
        modifiers: Modifiers::empty(),
    });
    let mut queue: EventQueue<_> = EventQueue::new(backend);

    // focus changes aren't reported
    let moved = queue.wait().unwrap().unwrap();
    assert_eq!(moved.event_type(), EventType::MouseMove);
    assert_eq!(moved.button(), None);
    assert_eq!(moved.modifiers(), Modifiers::SHIFT);

    let down = queue.wait().unwrap().unwrap();
    assert_eq!(down.name(), "mousedown");
    assert_eq!(down.button(), Some(MouseButton::Right));
    assert_eq!(down.point(), Point2d::new(11, 21));

    let up = queue.wait().unwrap().unwrap();
    assert_eq!(up.name(), "mouseup");
    assert_eq!(up.point(), Point2d::new(12, 22));

    let key = queue.wait().unwrap().unwrap();
    assert_eq!(key.name(), "keydown");
    assert_eq!(key.key(), Some(Key('A' as i32)));
    assert_eq!(key.text_char(), Some('a'));
    assert_eq!(key.modifiers(), Modifiers::CTRL);

    let key = queue.wait().unwrap().unwrap();
    assert_eq!(key.name(), "keyup");
    assert_eq!(key.key(), Some(Key::ESC));
    assert!(key.modifiers().is_empty());
}

#[test]
fn test_timeout_fires_once() {
    let mut queue = queue_with(&[]);
    let id = queue.set_timeout(Duration::from_millis(10)).unwrap();

    assert_eq!(queue.wait().unwrap(), Some(Event::Timer(id)));
    // the id stays taken until the event has been handled
    assert!(queue.timers().is_allocated(id));

    assert_eq!(queue.poll().unwrap(), None);
    assert!(!queue.timers().is_allocated(id));
    assert_eq!(queue.wait().unwrap(), Some(Event::Quit));
}

#[test]
fn test_interval_repeats_until_cancelled() {
    let mut queue = queue_with(&[]);
    let id = queue.set_interval(Duration::from_millis(5)).unwrap();

    for _ in 0..3 {
        assert_eq!(queue.wait().unwrap(), Some(Event::Timer(id)));
    }
    assert!(queue.cancel());
    assert!(!queue.timers().is_allocated(id));
    assert_eq!(queue.wait().unwrap(), Some(Event::Quit));
}

#[test]
fn test_clear_timer_drops_pending_events() {
    let mut queue = queue_with(&[]);
    let first = queue.set_timeout(Duration::ZERO).unwrap();
    let second = queue.set_timeout(Duration::ZERO).unwrap();

    assert_eq!(queue.poll().unwrap(), Some(Event::Timer(first)));
    assert!(queue.clear_timer(second));
    assert!(!queue.clear_timer(second));

    assert_eq!(queue.poll().unwrap(), None);
    assert!(queue.timers().is_empty());
}

#[test]
fn test_timer_limit() {
    let mut queue = queue_with(&[]);
    for _ in 1..MAX_TIMERS {
        queue.set_interval(Duration::from_secs(60)).unwrap();
    }
    let err = queue.set_interval(Duration::from_secs(60)).unwrap_err();
    assert!(matches!(err, Error::TimerLimit));
}
