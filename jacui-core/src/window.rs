// SPDX-License-Identifier: MIT

//! The application window: a screen surface plus its event queue.

use std::time::Duration;

use bitflags::bitflags;

#[cfg(all(
    feature = "winit",
    any(target_os = "linux", target_os = "windows", target_os = "macos")
))]
use crate::config::JacuiConfig;
use crate::cursor::Cursor;
use crate::event::Event;
use crate::event_queue::EventQueue;
use crate::platform::{Backend, DefaultBackend};
use crate::surface::Canvas;
use crate::timer::TimerId;
use crate::types::Size2d;
use crate::xpm::XpmIcon;
use crate::Result;

bitflags! {
    /// Window creation flags.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct WindowFlags: u32 {
        /// Cover the whole screen.
        const FULLSCREEN = 0b0001;
        /// Don't let the user resize the window.
        const NORESIZE = 0b0010;
        /// No window frame.
        const NOFRAME = 0b0100;
    }
}

impl WindowFlags {
    /// Apply the flags to a window configuration.
    pub fn apply(&self, config: &mut crate::config::WindowConfig) {
        config.fullscreen = self.contains(WindowFlags::FULLSCREEN);
        config.resizable = !self.contains(WindowFlags::NORESIZE);
        config.decorations = !self.contains(WindowFlags::NOFRAME);
    }
}

/// A window with a drawable screen surface and an event queue.
///
/// With the `winit` feature, [Window::new] opens a desktop window. Any [Backend] can be
/// wrapped with [Window::with_backend]:
///
/// ```
/// use jacui_core::color::colors;
/// use jacui_core::event::{Event, SourceEvent};
/// use jacui_core::platform::HeadlessBackend;
/// use jacui_core::surface::SurfaceMut;
/// use jacui_core::types::Size2d;
/// use jacui_core::window::Window;
///
/// let mut backend = HeadlessBackend::new(Size2d::new(64, 48));
/// backend.inject(SourceEvent::Expose);
///
/// let mut window: Window<HeadlessBackend> = Window::with_backend(backend);
/// while let Some(event) = window.wait()? {
///     if let Event::Redraw { .. } = event {
///         window.view_mut().fill(colors::NAVY);
///         window.update()?;
///     }
/// }
/// # Ok::<(), jacui_core::Error>(())
/// ```
pub struct Window<B: Backend = DefaultBackend, U = ()> {
    queue: EventQueue<B, U>,
}

#[cfg(all(
    feature = "winit",
    any(target_os = "linux", target_os = "windows", target_os = "macos")
))]
impl<U> Window<crate::platform::WinitBackend, U> {
    /// Open a window, leaving its size to the platform.
    pub fn new(title: &str, flags: WindowFlags) -> Result<Self> {
        Self::with_size(title, Size2d::default(), flags)
    }

    /// Open a window of the given size. A zero size leaves the size to the platform.
    pub fn with_size(title: &str, size: Size2d, flags: WindowFlags) -> Result<Self> {
        let mut config = JacuiConfig::load();
        config.window.title = title.to_string();
        config.window.width = size.width;
        config.window.height = size.height;
        flags.apply(&mut config.window);
        Self::from_config(&config)
    }

    /// Open a window as configured.
    pub fn from_config(config: &JacuiConfig) -> Result<Self> {
        log::debug!(
            "opening window {:?} ({}x{})",
            config.window.title,
            config.window.width,
            config.window.height
        );
        let backend = crate::platform::WinitBackend::new(&config.window, &config.render)?;
        Ok(Self::with_backend(backend))
    }

    /// Open a window with an icon.
    pub fn with_icon(title: &str, size: Size2d, flags: WindowFlags, icon: &XpmIcon) -> Result<Self> {
        let mut window = Self::with_size(title, size, flags)?;
        window.set_icon(icon)?;
        Ok(window)
    }
}

impl<B: Backend, U> Window<B, U> {
    /// Wrap an already set up backend.
    pub fn with_backend(backend: B) -> Self {
        Self {
            queue: EventQueue::new(backend),
        }
    }

    /// The size of the screen surface.
    pub fn size(&self) -> Size2d {
        self.queue.backend().screen_size()
    }

    /// The width of the screen surface.
    pub fn width(&self) -> u32 {
        self.size().width
    }

    /// The height of the screen surface.
    pub fn height(&self) -> u32 {
        self.size().height
    }

    /// The window title.
    pub fn title(&self) -> String {
        self.queue.backend().title()
    }

    /// Change the window title, returning the previous one.
    pub fn set_title(&mut self, title: &str) -> String {
        let previous = self.queue.backend().title();
        self.queue.backend_mut().set_title(title);
        previous
    }

    /// The screen surface.
    pub fn view(&self) -> &Canvas {
        self.queue.backend().view()
    }

    /// The screen surface, for drawing. Call [update](Self::update) to show the result.
    pub fn view_mut(&mut self) -> &mut Canvas {
        self.queue.backend_mut().view_mut()
    }

    /// The event queue.
    pub fn events(&self) -> &EventQueue<B, U> {
        &self.queue
    }

    /// The event queue, mutably.
    pub fn events_mut(&mut self) -> &mut EventQueue<B, U> {
        &mut self.queue
    }

    /// The backend.
    pub fn backend(&self) -> &B {
        self.queue.backend()
    }

    /// The backend, mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        self.queue.backend_mut()
    }

    /// Show or hide the mouse cursor.
    pub fn show_cursor(&mut self, visible: bool) {
        self.queue.backend_mut().show_cursor(visible);
    }

    /// Change the mouse cursor.
    pub fn set_cursor(&mut self, cursor: &Cursor) -> Result<()> {
        self.queue.backend_mut().set_cursor(cursor)
    }

    /// Change the window icon.
    pub fn set_icon(&mut self, icon: &XpmIcon) -> Result<()> {
        self.queue.backend_mut().set_icon(icon)
    }

    /// Resize the window. See [Canvas::resize] for what happens to the screen contents.
    pub fn resize(&mut self, size: Size2d) -> Result<()> {
        self.queue.backend_mut().set_screen_size(size)
    }

    /// Show the screen surface.
    pub fn update(&mut self) -> Result<()> {
        self.queue.backend_mut().present()
    }

    /// Close the window: the event queue delivers no more events.
    pub fn close(&mut self) {
        self.queue.close();
    }

    /// See [EventQueue::wait].
    pub fn wait(&mut self) -> Result<Option<Event<U>>> {
        self.queue.wait()
    }

    /// See [EventQueue::poll].
    pub fn poll(&mut self) -> Result<Option<Event<U>>> {
        self.queue.poll()
    }

    /// See [EventQueue::push].
    pub fn push(&mut self, event: U) {
        self.queue.push(event);
    }

    /// See [EventQueue::cancel].
    pub fn cancel(&mut self) -> bool {
        self.queue.cancel()
    }

    /// See [EventQueue::set_timeout].
    pub fn set_timeout(&mut self, delay: Duration) -> Result<TimerId> {
        self.queue.set_timeout(delay)
    }

    /// See [EventQueue::set_interval].
    pub fn set_interval(&mut self, period: Duration) -> Result<TimerId> {
        self.queue.set_interval(period)
    }

    /// See [EventQueue::clear_timer].
    pub fn clear_timer(&mut self, id: TimerId) -> bool {
        self.queue.clear_timer(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WindowConfig;

    #[test]
    fn test_flags_apply() {
        let mut config = WindowConfig::default();
        (WindowFlags::NORESIZE | WindowFlags::NOFRAME).apply(&mut config);
        assert!(!config.resizable);
        assert!(!config.decorations);
        assert!(!config.fullscreen);

        WindowFlags::FULLSCREEN.apply(&mut config);
        assert!(config.fullscreen);
        assert!(config.resizable);
        assert!(config.decorations);
    }
}
