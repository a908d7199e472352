// SPDX-License-Identifier: MIT

use std::collections::VecDeque;
use std::time::Duration;

use crate::cursor::Cursor;
use crate::event::{Modifiers, SourceEvent};
use crate::platform::{Backend, PumpStatus};
use crate::surface::Canvas;
use crate::types::Size2d;
use crate::xpm::XpmIcon;
use crate::Result;

/// A backend without a window.
///
/// Native events are injected with [inject](HeadlessBackend::inject). When asked to block
/// with nothing injected the source reports itself exhausted, so an event loop driven by
/// it always terminates.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    view: Canvas,
    title: String,
    pending: VecDeque<SourceEvent>,
    modifiers: Modifiers,
    cursor_visible: bool,
    cursor: Option<Cursor>,
    icon: Option<XpmIcon>,
    frames: Vec<Canvas>,
}

impl HeadlessBackend {
    /// Create a backend with a screen of the given size.
    pub fn new(size: Size2d) -> Self {
        Self {
            view: Canvas::new(size),
            cursor_visible: true,
            ..Default::default()
        }
    }

    /// Queue a native event.
    pub fn inject(&mut self, event: SourceEvent) {
        self.pending.push_back(event);
    }

    /// Set the modifier state reported for mouse events.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Every frame presented so far.
    pub fn frames(&self) -> &[Canvas] {
        &self.frames
    }

    /// Whether the cursor is shown.
    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// The last cursor set.
    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    /// The last icon set.
    pub fn icon(&self) -> Option<&XpmIcon> {
        self.icon.as_ref()
    }
}

impl Backend for HeadlessBackend {
    fn pump(
        &mut self,
        timeout: Option<Duration>,
        events: &mut Vec<SourceEvent>,
    ) -> Result<PumpStatus> {
        if !self.pending.is_empty() {
            events.extend(self.pending.drain(..));
            return Ok(PumpStatus::Continue);
        }

        match timeout {
            Some(timeout) => {
                if !timeout.is_zero() {
                    std::thread::sleep(timeout);
                }
                Ok(PumpStatus::Continue)
            }
            None => {
                log::debug!("headless source exhausted");
                Ok(PumpStatus::Exhausted)
            }
        }
    }

    fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    fn set_screen_size(&mut self, size: Size2d) -> Result<()> {
        self.view.resize(size);
        Ok(())
    }

    fn view(&self) -> &Canvas {
        &self.view
    }

    fn view_mut(&mut self) -> &mut Canvas {
        &mut self.view
    }

    fn present(&mut self) -> Result<()> {
        self.frames.push(self.view.clone());
        Ok(())
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn show_cursor(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    fn set_cursor(&mut self, cursor: &Cursor) -> Result<()> {
        self.cursor = Some(cursor.clone());
        Ok(())
    }

    fn set_icon(&mut self, icon: &XpmIcon) -> Result<()> {
        self.icon = Some(icon.clone());
        Ok(())
    }
}
