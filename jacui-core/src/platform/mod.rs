// SPDX-License-Identifier: MIT

//! Platform abstraction for windowing and input.
//!
//! A [Backend] owns the native window (or an offscreen stand-in), its screen surface and
//! the native event source. The [EventQueue](crate::event_queue::EventQueue) pumps it and
//! merges timers and application events into the stream.

use std::time::Duration;

use crate::cursor::Cursor;
use crate::event::{Modifiers, SourceEvent};
use crate::surface::Canvas;
use crate::types::Size2d;
use crate::xpm::XpmIcon;
use crate::Result;

/// Offscreen backend for tests and headless rendering.
pub mod headless;

#[cfg(all(
    feature = "winit",
    any(target_os = "linux", target_os = "windows", target_os = "macos")
))]
pub mod winit;

pub use headless::HeadlessBackend;
#[cfg(all(
    feature = "winit",
    any(target_os = "linux", target_os = "windows", target_os = "macos")
))]
pub use self::winit::WinitBackend;

/// The backend used by [Window](crate::window::Window) unless another one is given.
#[cfg(all(
    feature = "winit",
    any(target_os = "linux", target_os = "windows", target_os = "macos")
))]
pub type DefaultBackend = WinitBackend;

/// The backend used by [Window](crate::window::Window) unless another one is given.
#[cfg(not(all(
    feature = "winit",
    any(target_os = "linux", target_os = "windows", target_os = "macos")
)))]
pub type DefaultBackend = HeadlessBackend;

/// Outcome of a [Backend::pump] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpStatus {
    /// The source is alive; any native events were appended.
    Continue,
    /// The source has shut down and will not produce more events.
    Exhausted,
}

/// A native windowing backend.
pub trait Backend {
    /// Collect native events into `events`.
    ///
    /// Waits at most `timeout` for the first event; `None` waits indefinitely and
    /// `Some(Duration::ZERO)` only collects what is already pending.
    fn pump(&mut self, timeout: Option<Duration>, events: &mut Vec<SourceEvent>)
        -> Result<PumpStatus>;

    /// The current keyboard modifier state.
    fn modifiers(&self) -> Modifiers;

    /// The size of the screen surface.
    fn screen_size(&self) -> Size2d {
        use crate::surface::Surface;
        self.view().size()
    }

    /// Resize the window and its screen surface.
    fn set_screen_size(&mut self, size: Size2d) -> Result<()>;

    /// The screen surface.
    fn view(&self) -> &Canvas;

    /// The screen surface, for drawing.
    fn view_mut(&mut self) -> &mut Canvas;

    /// Show the screen surface in the window.
    fn present(&mut self) -> Result<()>;

    /// The window title.
    fn title(&self) -> String;

    /// Change the window title.
    fn set_title(&mut self, title: &str);

    /// Show or hide the mouse cursor.
    fn show_cursor(&mut self, visible: bool);

    /// Change the mouse cursor.
    fn set_cursor(&mut self, cursor: &Cursor) -> Result<()>;

    /// Change the window icon.
    fn set_icon(&mut self, icon: &XpmIcon) -> Result<()>;
}
