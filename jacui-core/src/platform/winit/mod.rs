// SPDX-License-Identifier: MIT

//! Desktop backend on top of winit.
//!
//! The event loop is driven with `pump_app_events`, so the application keeps control
//! of its main loop. The window itself is created when the loop first resumes.

mod presenter;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key as WinitKey, KeyLocation, ModifiersState, NamedKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus as WinitPumpStatus};
use winit::window::{CustomCursor, Fullscreen, Icon, Window, WindowAttributes, WindowId};

use self::presenter::Presenter;
use crate::config::{PresentMode, RenderConfig, WindowConfig};
use crate::cursor::Cursor;
use crate::error::Error;
use crate::event::{Key, Modifiers, MouseButton, SourceEvent};
use crate::platform::{Backend, PumpStatus};
use crate::surface::{Canvas, Surface, SurfaceMut};
use crate::types::{Point2d, Size2d};
use crate::xpm::XpmIcon;
use crate::Result;

/// How long to wait for the platform to hand out the window.
const STARTUP_TIMEOUT: Duration = Duration::from_secs(5);

/// A native window driven by winit and presented with wgpu.
pub struct WinitBackend {
    event_loop: EventLoop<()>,
    state: WinitState,
}

struct WinitState {
    attributes: WindowAttributes,
    present_mode: PresentMode,
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    view: Canvas,
    title: String,
    modifiers: Modifiers,
    cursor_position: Point2d,
    cursor_visible: bool,
    cursor: Option<Cursor>,
    cursor_dirty: bool,
    cursors: HashMap<Cursor, CustomCursor>,
    events: Vec<SourceEvent>,
    error: Option<Error>,
}

impl WinitBackend {
    /// Open a window as described by `window` and `render`.
    ///
    /// Blocks until the platform has created the window.
    pub fn new(window: &WindowConfig, render: &RenderConfig) -> Result<Self> {
        let event_loop =
            EventLoop::new().map_err(|err| Error::Backend(format!("cannot create event loop: {}", err)))?;

        let mut attributes = Window::default_attributes()
            .with_title(window.title.clone())
            .with_resizable(window.resizable)
            .with_decorations(window.decorations);
        if !window.size().is_empty() {
            attributes = attributes.with_inner_size(PhysicalSize::new(window.width, window.height));
        }
        if window.fullscreen {
            attributes = attributes.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let mut view = Canvas::new(window.size());
        view.fill(render.background);

        let mut backend = Self {
            event_loop,
            state: WinitState {
                attributes,
                present_mode: render.present_mode,
                window: None,
                presenter: None,
                view,
                title: window.title.clone(),
                modifiers: Modifiers::empty(),
                cursor_position: Point2d::default(),
                cursor_visible: window.cursor_visible,
                cursor: None,
                cursor_dirty: false,
                cursors: HashMap::new(),
                events: Vec::new(),
                error: None,
            },
        };

        let started = std::time::Instant::now();
        while backend.state.window.is_none() {
            if started.elapsed() > STARTUP_TIMEOUT {
                return Err(Error::Backend("timed out waiting for the window".to_string()));
            }
            if let WinitPumpStatus::Exit(code) = backend
                .event_loop
                .pump_app_events(Some(Duration::from_millis(10)), &mut backend.state)
            {
                return Err(Error::Backend(format!("event loop exited with code {}", code)));
            }
            if let Some(err) = backend.state.error.take() {
                return Err(err);
            }
        }

        // the platform may have picked the size
        if let Some(window) = &backend.state.window {
            let inner = window.inner_size();
            let size = Size2d::new(inner.width, inner.height);
            if size != backend.state.view.size() {
                backend.state.view.resize(size);
                backend.state.view.fill(render.background);
            }
        }

        Ok(backend)
    }

    /// The native window.
    pub fn window(&self) -> Option<&Window> {
        self.state.window.as_deref()
    }

    fn flush(&mut self) -> Result<()> {
        if let WinitPumpStatus::Exit(code) =
            self.event_loop.pump_app_events(Some(Duration::ZERO), &mut self.state)
        {
            log::debug!("event loop exited with code {}", code);
        }
        match self.state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Backend for WinitBackend {
    fn pump(
        &mut self,
        timeout: Option<Duration>,
        events: &mut Vec<SourceEvent>,
    ) -> Result<PumpStatus> {
        let status = if self.state.events.is_empty() {
            self.event_loop.pump_app_events(timeout, &mut self.state)
        } else {
            self.event_loop.pump_app_events(Some(Duration::ZERO), &mut self.state)
        };

        events.append(&mut self.state.events);
        if let Some(err) = self.state.error.take() {
            return Err(err);
        }

        match status {
            WinitPumpStatus::Continue => Ok(PumpStatus::Continue),
            WinitPumpStatus::Exit(code) => {
                log::debug!("event loop exited with code {}", code);
                Ok(PumpStatus::Exhausted)
            }
        }
    }

    fn modifiers(&self) -> Modifiers {
        self.state.modifiers
    }

    fn set_screen_size(&mut self, size: Size2d) -> Result<()> {
        if size == self.state.view.size() {
            return Ok(());
        }
        if let Some(window) = &self.state.window {
            let inner = window.inner_size();
            if inner.width != size.width || inner.height != size.height {
                // the platform may refuse; the next Resized event reports the outcome
                let _ = window.request_inner_size(PhysicalSize::new(size.width, size.height));
            }
        }
        self.state.view.resize(size);
        Ok(())
    }

    fn view(&self) -> &Canvas {
        &self.state.view
    }

    fn view_mut(&mut self) -> &mut Canvas {
        &mut self.state.view
    }

    fn present(&mut self) -> Result<()> {
        let state = &mut self.state;
        match (&state.window, state.presenter.as_mut()) {
            (Some(window), Some(presenter)) => presenter.present(window, &state.view),
            _ => Ok(()),
        }
    }

    fn title(&self) -> String {
        self.state.title.clone()
    }

    fn set_title(&mut self, title: &str) {
        self.state.title = title.to_string();
        if let Some(window) = &self.state.window {
            window.set_title(title);
        }
    }

    fn show_cursor(&mut self, visible: bool) {
        self.state.cursor_visible = visible;
        if let Some(window) = &self.state.window {
            window.set_cursor_visible(visible);
        }
    }

    fn set_cursor(&mut self, cursor: &Cursor) -> Result<()> {
        self.state.cursor = Some(cursor.clone());
        self.state.cursor_dirty = true;
        // native cursors can only be created from inside the event loop
        self.flush()
    }

    fn set_icon(&mut self, icon: &XpmIcon) -> Result<()> {
        let size = icon.size();
        let rgba: Vec<u8> = bytemuck::cast_slice(icon.pixels()).to_vec();
        let icon = Icon::from_rgba(rgba, size.width, size.height)
            .map_err(|err| Error::Backend(format!("invalid icon: {}", err)))?;
        match &self.state.window {
            Some(window) => window.set_window_icon(Some(icon)),
            None => {
                let attributes = std::mem::take(&mut self.state.attributes);
                self.state.attributes = attributes.with_window_icon(Some(icon));
            }
        }
        Ok(())
    }
}

impl WinitState {
    fn apply_cursor(&mut self, event_loop: &ActiveEventLoop) {
        if !self.cursor_dirty {
            return;
        }
        let (Some(window), Some(cursor)) = (&self.window, &self.cursor) else {
            return;
        };
        self.cursor_dirty = false;

        let native = match self.cursors.get(cursor) {
            Some(native) => native.clone(),
            None => {
                let size = cursor.size();
                let hotspot = cursor.hotspot();
                let rgba: Vec<u8> = bytemuck::cast_slice(&cursor.to_rgba()).to_vec();
                let source = match CustomCursor::from_rgba(
                    rgba,
                    size.width as u16,
                    size.height as u16,
                    hotspot.x as u16,
                    hotspot.y as u16,
                ) {
                    Ok(source) => source,
                    Err(err) => {
                        self.error = Some(Error::Cursor(format!("cannot create cursor: {}", err)));
                        return;
                    }
                };
                let native = event_loop.create_custom_cursor(source);
                log::debug!("created native cursor {}x{}", size.width, size.height);
                self.cursors.insert(cursor.clone(), native.clone());
                native
            }
        };
        window.set_cursor(native);
    }

    fn push(&mut self, event: SourceEvent) {
        self.events.push(event);
    }

    fn button(&mut self, button: MouseButton, pressed: bool) {
        let point = self.cursor_position;
        self.push(SourceEvent::Button {
            button,
            pressed,
            point,
        });
    }

    fn keyboard_input(&mut self, event: KeyEvent) {
        let Some(key) = map_key(&event.logical_key, event.location) else {
            log::warn!("unsupported key {:?}", event.logical_key);
            return;
        };
        let text = event.text.as_ref().and_then(|text| text.chars().next());
        self.push(SourceEvent::Key {
            key,
            text,
            pressed: event.state == ElementState::Pressed,
            modifiers: self.modifiers,
        });
    }
}

impl ApplicationHandler for WinitState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(self.attributes.clone()) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                self.error = Some(Error::Backend(format!("cannot create window: {}", err)));
                event_loop.exit();
                return;
            }
        };
        log::debug!("window created: {:?}", window.id());
        window.set_cursor_visible(self.cursor_visible);

        match Presenter::new(window.clone(), self.present_mode) {
            Ok(presenter) => self.presenter = Some(presenter),
            Err(err) => {
                log::error!("cannot set up presentation: {}", err);
                self.error = Some(err);
            }
        }
        self.window = Some(window);
        self.apply_cursor(event_loop);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.push(SourceEvent::Quit),
            WindowEvent::Destroyed => event_loop.exit(),
            WindowEvent::Resized(size) => {
                let size = Size2d::new(size.width, size.height);
                if !size.is_empty() && size != self.view.size() {
                    self.push(SourceEvent::Resize(size));
                }
            }
            WindowEvent::RedrawRequested => self.push(SourceEvent::Expose),
            WindowEvent::Focused(focused) => self.push(SourceEvent::Focus(focused)),
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = map_modifiers(modifiers.state());
            }
            WindowEvent::CursorMoved { position, .. } => {
                let PhysicalPosition { x, y } = position;
                self.cursor_position = Point2d::new(x as i32, y as i32);
                self.push(SourceEvent::Motion(self.cursor_position));
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    winit::event::MouseButton::Left => MouseButton::Left,
                    winit::event::MouseButton::Middle => MouseButton::Middle,
                    winit::event::MouseButton::Right => MouseButton::Right,
                    winit::event::MouseButton::Back => MouseButton::Other(8),
                    winit::event::MouseButton::Forward => MouseButton::Other(9),
                    winit::event::MouseButton::Other(n) => MouseButton::Other(n),
                };
                self.button(button, state == ElementState::Pressed);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y as f64,
                    MouseScrollDelta::PixelDelta(position) => position.y,
                };
                let button = if dy > 0.0 {
                    MouseButton::WheelUp
                } else if dy < 0.0 {
                    MouseButton::WheelDown
                } else {
                    return;
                };
                // wheel steps are reported as a click
                self.button(button, true);
                self.button(button, false);
            }
            WindowEvent::KeyboardInput { event, .. } => self.keyboard_input(event),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.apply_cursor(event_loop);
    }
}

fn map_modifiers(state: ModifiersState) -> Modifiers {
    let mut modifiers = Modifiers::empty();
    modifiers.set(Modifiers::SHIFT, state.shift_key());
    modifiers.set(Modifiers::CTRL, state.control_key());
    modifiers.set(Modifiers::ALT, state.alt_key());
    modifiers
}

fn map_key(key: &WinitKey, location: KeyLocation) -> Option<Key> {
    let named = match key {
        WinitKey::Character(text) => return text.chars().next().map(Key::from_char),
        WinitKey::Named(named) => *named,
        _ => return None,
    };
    let right = location == KeyLocation::Right;

    Some(match named {
        NamedKey::Backspace => Key::BS,
        NamedKey::Tab => Key::HT,
        NamedKey::Enter => Key::CR,
        NamedKey::Escape => Key::ESC,
        NamedKey::Delete => Key::DEL,
        NamedKey::Space => Key::from_char(' '),
        NamedKey::ArrowUp => Key::UP,
        NamedKey::ArrowDown => Key::DOWN,
        NamedKey::ArrowRight => Key::RIGHT,
        NamedKey::ArrowLeft => Key::LEFT,
        NamedKey::Insert => Key::INS,
        NamedKey::Home => Key::HOME,
        NamedKey::End => Key::END,
        NamedKey::PageUp => Key::PGUP,
        NamedKey::PageDown => Key::PGDOWN,
        NamedKey::F1 => Key::F1,
        NamedKey::F2 => Key::F2,
        NamedKey::F3 => Key::F3,
        NamedKey::F4 => Key::F4,
        NamedKey::F5 => Key::F5,
        NamedKey::F6 => Key::F6,
        NamedKey::F7 => Key::F7,
        NamedKey::F8 => Key::F8,
        NamedKey::F9 => Key::F9,
        NamedKey::F10 => Key::F10,
        NamedKey::F11 => Key::F11,
        NamedKey::F12 => Key::F12,
        NamedKey::Shift if right => Key::RSHIFT,
        NamedKey::Shift => Key::LSHIFT,
        NamedKey::Control if right => Key::RCTRL,
        NamedKey::Control => Key::LCTRL,
        NamedKey::Alt if right => Key::RALT,
        NamedKey::Alt => Key::LALT,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_named_keys() {
        let left = KeyLocation::Left;
        assert_eq!(map_key(&WinitKey::Named(NamedKey::Escape), left), Some(Key::ESC));
        assert_eq!(map_key(&WinitKey::Named(NamedKey::F5), left), Some(Key::F5));
        assert_eq!(map_key(&WinitKey::Named(NamedKey::Shift), left), Some(Key::LSHIFT));
        assert_eq!(
            map_key(&WinitKey::Named(NamedKey::Control), KeyLocation::Right),
            Some(Key::RCTRL)
        );
        assert_eq!(map_key(&WinitKey::Named(NamedKey::CapsLock), left), None);
    }

    #[test]
    fn test_map_character_keys() {
        let key = WinitKey::Character("q".into());
        assert_eq!(map_key(&key, KeyLocation::Standard), Some(Key::from_char('Q')));
    }

    #[test]
    fn test_map_modifiers() {
        let state = ModifiersState::SHIFT | ModifiersState::ALT;
        assert_eq!(map_modifiers(state), Modifiers::SHIFT | Modifiers::ALT);
        assert!(map_modifiers(ModifiersState::empty()).is_empty());
    }
}
