// SPDX-License-Identifier: MIT

//! The backend-agnostic event model.

use bitflags::bitflags;

use crate::timer::TimerId;
use crate::types::{Point2d, Rect2d, Size2d};

/// The kind of an [Event].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// No event, also what a cancelled event turns into.
    NoEvent,
    /// The window was resized.
    Resize,
    /// (Part of) the window needs to be redrawn.
    Redraw,
    /// The mouse moved.
    MouseMove,
    /// A mouse button was pressed.
    MouseDown,
    /// A mouse button was released.
    MouseUp,
    /// A key was pressed.
    KeyDown,
    /// A key was released.
    KeyUp,
    /// A timer expired.
    Timer,
    /// The window was closed.
    Quit,
    /// An event pushed by the application.
    User,
}

impl EventType {
    /// The lowercase name of the event type.
    pub const fn name(&self) -> &'static str {
        match self {
            EventType::NoEvent => "noevent",
            EventType::Resize => "resize",
            EventType::Redraw => "redraw",
            EventType::MouseMove => "mousemove",
            EventType::MouseDown => "mousedown",
            EventType::MouseUp => "mouseup",
            EventType::KeyDown => "keydown",
            EventType::KeyUp => "keyup",
            EventType::Timer => "timer",
            EventType::Quit => "quit",
            EventType::User => "user",
        }
    }
}

bitflags! {
    /// Keyboard modifier state.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u32 {
        /// Either shift key.
        const SHIFT = 0b0001;
        /// Either control key.
        const CTRL = 0b0010;
        /// Either alt key.
        const ALT = 0b0100;
    }
}

impl Modifiers {
    /// Whether shift is held.
    pub fn shift(&self) -> bool {
        self.contains(Modifiers::SHIFT)
    }

    /// Whether control is held.
    pub fn ctrl(&self) -> bool {
        self.contains(Modifiers::CTRL)
    }

    /// Whether alt is held.
    pub fn alt(&self) -> bool {
        self.contains(Modifiers::ALT)
    }
}

/// A mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// The left button.
    Left,
    /// The middle button.
    Middle,
    /// The right button.
    Right,
    /// One wheel step up.
    WheelUp,
    /// One wheel step down.
    WheelDown,
    /// Any other button.
    Other(u16),
}

/// A key code. Printable keys use their (uppercase) ASCII code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(pub i32);

#[allow(missing_docs)]
impl Key {
    pub const BS: Key = Key(0x08);
    pub const HT: Key = Key(0x09);
    pub const CR: Key = Key(0x0d);
    pub const ESC: Key = Key(0x1b);
    pub const DEL: Key = Key(0x7f);

    pub const UP: Key = Key(273);
    pub const DOWN: Key = Key(274);
    pub const RIGHT: Key = Key(275);
    pub const LEFT: Key = Key(276);
    pub const INS: Key = Key(277);
    pub const HOME: Key = Key(278);
    pub const END: Key = Key(279);
    pub const PGUP: Key = Key(280);
    pub const PGDOWN: Key = Key(281);

    pub const F1: Key = Key(282);
    pub const F2: Key = Key(283);
    pub const F3: Key = Key(284);
    pub const F4: Key = Key(285);
    pub const F5: Key = Key(286);
    pub const F6: Key = Key(287);
    pub const F7: Key = Key(288);
    pub const F8: Key = Key(289);
    pub const F9: Key = Key(290);
    pub const F10: Key = Key(291);
    pub const F11: Key = Key(292);
    pub const F12: Key = Key(293);

    pub const RSHIFT: Key = Key(303);
    pub const LSHIFT: Key = Key(304);
    pub const RCTRL: Key = Key(305);
    pub const LCTRL: Key = Key(306);
    pub const RALT: Key = Key(307);
    pub const LALT: Key = Key(308);

    /// The key for a character. Lowercase ASCII letters are reported as uppercase.
    pub fn from_char(c: char) -> Key {
        Key(c.to_ascii_uppercase() as i32)
    }

    /// The function key `F<n>` for `n` in `1..=12`.
    pub fn function(n: u8) -> Option<Key> {
        (1..=12).contains(&n).then(|| Key(Key::F1.0 + n as i32 - 1))
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Key::from_char(c)
    }
}

/// Payload of mouse events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// The button, [None] for motion.
    pub button: Option<MouseButton>,
    /// Cursor position in window coordinates.
    pub point: Point2d,
    /// Modifier state at the time of the event.
    pub modifiers: Modifiers,
}

/// Payload of keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code.
    pub key: Key,
    /// The character produced by the key, if any.
    pub text: Option<char>,
    /// Modifier state at the time of the event.
    pub modifiers: Modifiers,
}

/// A jacui event. `U` is the type of application defined events.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<U = ()> {
    /// The window was resized to `size`.
    Resize {
        /// The new size.
        size: Size2d,
    },
    /// `rect` needs to be redrawn.
    Redraw {
        /// The damaged region.
        rect: Rect2d,
    },
    /// The mouse moved.
    MouseMove(MouseEvent),
    /// A mouse button was pressed.
    MouseDown(MouseEvent),
    /// A mouse button was released.
    MouseUp(MouseEvent),
    /// A key was pressed.
    KeyDown(KeyEvent),
    /// A key was released.
    KeyUp(KeyEvent),
    /// A timer expired.
    Timer(TimerId),
    /// The window was closed.
    Quit,
    /// An application defined event.
    User(U),
}

impl<U> Event<U> {
    /// The kind of this event.
    pub fn event_type(&self) -> EventType {
        match self {
            Event::Resize { .. } => EventType::Resize,
            Event::Redraw { .. } => EventType::Redraw,
            Event::MouseMove(_) => EventType::MouseMove,
            Event::MouseDown(_) => EventType::MouseDown,
            Event::MouseUp(_) => EventType::MouseUp,
            Event::KeyDown(_) => EventType::KeyDown,
            Event::KeyUp(_) => EventType::KeyUp,
            Event::Timer(_) => EventType::Timer,
            Event::Quit => EventType::Quit,
            Event::User(_) => EventType::User,
        }
    }

    /// The lowercase name of the event.
    pub fn name(&self) -> &'static str {
        self.event_type().name()
    }

    /// The new size of a resize event.
    pub fn size(&self) -> Size2d {
        match self {
            Event::Resize { size } => *size,
            _ => Size2d::default(),
        }
    }

    /// The damaged region of a redraw event.
    pub fn rect(&self) -> Rect2d {
        match self {
            Event::Redraw { rect } => *rect,
            _ => Rect2d::default(),
        }
    }

    /// Modifier state of an input event.
    pub fn modifiers(&self) -> Modifiers {
        match self {
            Event::MouseMove(m) | Event::MouseDown(m) | Event::MouseUp(m) => m.modifiers,
            Event::KeyDown(k) | Event::KeyUp(k) => k.modifiers,
            _ => Modifiers::empty(),
        }
    }

    /// Cursor position of a mouse event.
    pub fn point(&self) -> Point2d {
        match self {
            Event::MouseMove(m) | Event::MouseDown(m) | Event::MouseUp(m) => m.point,
            _ => Point2d::default(),
        }
    }

    /// Button of a mouse button event.
    pub fn button(&self) -> Option<MouseButton> {
        match self {
            Event::MouseDown(m) | Event::MouseUp(m) => m.button,
            _ => None,
        }
    }

    /// Key code of a keyboard event.
    pub fn key(&self) -> Option<Key> {
        match self {
            Event::KeyDown(k) | Event::KeyUp(k) => Some(k.key),
            _ => None,
        }
    }

    /// Character produced by a keyboard event.
    pub fn text_char(&self) -> Option<char> {
        match self {
            Event::KeyDown(k) | Event::KeyUp(k) => k.text,
            _ => None,
        }
    }

    /// Timer of a timer event.
    pub fn timer(&self) -> Option<TimerId> {
        match self {
            Event::Timer(id) => Some(*id),
            _ => None,
        }
    }
}

/// Events as delivered by a [Backend](crate::platform::Backend), before timers and
/// application events are merged in.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceEvent {
    /// The window was resized by the user or the window manager.
    Resize(Size2d),
    /// The window contents were damaged.
    Expose,
    /// The cursor moved to a new position.
    Motion(Point2d),
    /// A mouse button changed state.
    Button {
        /// The button.
        button: MouseButton,
        /// `true` on press.
        pressed: bool,
        /// Cursor position.
        point: Point2d,
    },
    /// A key changed state.
    Key {
        /// The key code.
        key: Key,
        /// The character produced, if any.
        text: Option<char>,
        /// `true` on press.
        pressed: bool,
        /// Modifiers at the time of the key event.
        modifiers: Modifiers,
    },
    /// The window gained or lost focus. Not reported to the application.
    Focus(bool),
    /// The window was closed.
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        let e: Event = Event::Quit;
        assert_eq!(e.name(), "quit");
        assert_eq!(EventType::NoEvent.name(), "noevent");
        assert_eq!(Event::<()>::Redraw { rect: Rect2d::default() }.name(), "redraw");
        assert_eq!(Event::User(42).event_type(), EventType::User);
    }

    #[test]
    fn test_key_codes() {
        assert_eq!(Key::from_char('q'), Key('Q' as i32));
        assert_eq!(Key::from('\x1b'), Key::ESC);
        assert_eq!(Key::function(12), Some(Key::F12));
        assert_eq!(Key::function(0), None);
    }

    #[test]
    fn test_accessors_default_for_other_kinds() {
        let e: Event = Event::KeyDown(KeyEvent {
            key: Key::CR,
            text: Some('\r'),
            modifiers: Modifiers::SHIFT | Modifiers::ALT,
        });
        assert_eq!(e.key(), Some(Key::CR));
        assert!(e.modifiers().shift());
        assert!(!e.modifiers().ctrl());
        assert_eq!(e.point(), Point2d::default());
        assert_eq!(e.size(), Size2d::default());
        assert_eq!(e.timer(), None);
    }
}
