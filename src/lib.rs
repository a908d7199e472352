// SPDX-License-Identifier: MIT
#![warn(missing_docs)]

//! Windows, pixel surfaces, fonts, cursors and a timer-aware event queue.
//!
//! With the default `winit` feature, `Window::with_size` opens a desktop window. The loop
//! below drives the same API through the headless backend:
//!
//! ```
//! use jacui::core::event::SourceEvent;
//! use jacui::prelude::*;
//!
//! let mut backend = HeadlessBackend::new(Size2d::new(320, 200));
//! backend.inject(SourceEvent::Expose);
//!
//! let mut window: Window<HeadlessBackend> = Window::with_backend(backend);
//! window.set_cursor(cursors::crosshair())?;
//! while let Some(event) = window.wait()? {
//!     match event {
//!         Event::Redraw { .. } => {
//!             window.view_mut().fill(colors::TEAL);
//!             window.update()?;
//!         }
//!         Event::KeyDown(key) if key.key == Key::ESC => window.close(),
//!         _ => {}
//!     }
//! }
//! # Ok::<(), jacui::Error>(())
//! ```

pub use jacui_core as core;

pub use jacui_core::{Error, Result};

/// A "prelude" for users of jacui.
///
/// Importing this module brings into scope the most common types
/// needed to open a window and draw into it.
///
/// ```rust
/// use jacui::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::color::{colors, Color};
    pub use crate::core::cursor::{cursors, Cursor};
    pub use crate::core::event::{Event, EventType, Key, KeyEvent, Modifiers, MouseButton, MouseEvent};
    pub use crate::core::font::Font;
    pub use crate::core::image::Image;
    pub use crate::core::platform::{Backend, HeadlessBackend};
    pub use crate::core::surface::{Canvas, Surface, SurfaceMut};
    pub use crate::core::timer::TimerId;
    pub use crate::core::types::{Point2d, Rect2d, Size2d};
    pub use crate::core::window::{Window, WindowFlags};
    pub use crate::core::xpm::XpmIcon;
}
