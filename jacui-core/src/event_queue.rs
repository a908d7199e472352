// SPDX-License-Identifier: MIT

//! The event queue: native events, timers and application events in one stream.
//!
//! Events are delivered in arrival order. The effects of an event are applied lazily,
//! when the *next* event is requested: a resize is only applied to the screen if it
//! wasn't [cancelled](EventQueue::cancel) in the meantime, a one-shot timer keeps its id
//! until its event has been handled, and a quit event ends the queue.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::event::{Event, EventType, KeyEvent, MouseEvent, SourceEvent};
use crate::platform::{Backend, PumpStatus};
use crate::timer::{TimerId, TimerTable};
use crate::types::{Rect2d, Size2d};
use crate::Result;

/// The effect of the most recently delivered event, applied on the next fetch.
#[derive(Debug, Clone, Copy)]
struct Delivered {
    kind: EventType,
    size: Size2d,
    timer: Option<TimerId>,
}

/// An event queue over a [Backend].
pub struct EventQueue<B: Backend, U = ()> {
    backend: B,
    timers: TimerTable,
    pending: VecDeque<Event<U>>,
    last: Option<Delivered>,
    closed: bool,
}

impl<B: Backend, U> EventQueue<B, U> {
    /// Create a queue reading native events from `backend`.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            timers: TimerTable::new(),
            pending: VecDeque::new(),
            last: None,
            closed: false,
        }
    }

    /// The backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The backend, mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Take the backend out of the queue.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// The timer table.
    pub fn timers(&self) -> &TimerTable {
        &self.timers
    }

    /// Block until the next event. Returns `None` once the queue is finished.
    pub fn wait(&mut self) -> Result<Option<Event<U>>> {
        self.next_event(true)
    }

    /// Fetch the next event without blocking. Returns `None` if no event is pending or the
    /// queue is finished.
    pub fn poll(&mut self) -> Result<Option<Event<U>>> {
        self.next_event(false)
    }

    /// Append an application event.
    pub fn push(&mut self, event: U) {
        self.pending.push_back(Event::User(event));
    }

    /// Start a one-shot timer.
    pub fn set_timeout(&mut self, delay: Duration) -> Result<TimerId> {
        self.timers.set_timeout(delay, Instant::now())
    }

    /// Start a repeating timer.
    pub fn set_interval(&mut self, period: Duration) -> Result<TimerId> {
        self.timers.set_interval(period, Instant::now())
    }

    /// Stop a timer. Timer events for it that haven't been delivered yet are dropped.
    ///
    /// Returns `false` if `id` doesn't name a live timer.
    pub fn clear_timer(&mut self, id: TimerId) -> bool {
        if !self.timers.clear(id) {
            return false;
        }
        self.pending.retain(|e| e.timer() != Some(id));
        if let Some(last) = self.last.as_mut() {
            if last.timer == Some(id) {
                last.timer = None;
            }
        }
        true
    }

    /// Cancel the most recently delivered event.
    ///
    /// A cancelled resize isn't applied to the screen, a cancelled timer event stops its
    /// timer and a cancelled quit keeps the queue running. Returns `false` if there is
    /// nothing to cancel.
    pub fn cancel(&mut self) -> bool {
        let Some(last) = self.last.take() else {
            return false;
        };
        log::trace!("cancelled {}", last.kind.name());
        if let Some(id) = last.timer {
            self.clear_timer(id);
        }
        true
    }

    /// The type of the most recently delivered event, [EventType::NoEvent] if it was cancelled.
    pub fn last_type(&self) -> EventType {
        self.last.map(|l| l.kind).unwrap_or(EventType::NoEvent)
    }

    /// Finish the queue: every further `wait`/`poll` returns `None`.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Whether the queue is finished.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn next_event(&mut self, block: bool) -> Result<Option<Event<U>>> {
        self.retire()?;
        if self.closed {
            return Ok(None);
        }

        let mut pumped = false;
        loop {
            self.expire_timers();
            if let Some(event) = self.pending.pop_front() {
                self.deliver(&event);
                return Ok(Some(event));
            }
            if pumped && !block {
                return Ok(None);
            }

            let timeout = if block {
                self.timers
                    .next_deadline()
                    .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            } else {
                Some(Duration::ZERO)
            };

            let mut native = Vec::new();
            let status = self.backend.pump(timeout, &mut native)?;
            self.translate(native);
            if status == PumpStatus::Exhausted {
                self.pending.push_back(Event::Quit);
            }
            pumped = true;
        }
    }

    /// Apply the deferred effects of the previously delivered event.
    fn retire(&mut self) -> Result<()> {
        let Some(last) = self.last.take() else {
            return Ok(());
        };

        match last.kind {
            EventType::Quit => self.closed = true,
            EventType::Resize => {
                log::debug!("resizing screen to {}x{}", last.size.width, last.size.height);
                self.backend.set_screen_size(last.size)?;
                self.pending.push_back(Event::Redraw {
                    rect: Rect2d::from(self.backend.screen_size()),
                });
            }
            EventType::Timer => {
                if let Some(id) = last.timer {
                    if !self.timers.is_interval(id) {
                        self.timers.clear(id);
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn deliver(&mut self, event: &Event<U>) {
        log::trace!("dispatching {}", event.name());
        self.last = Some(Delivered {
            kind: event.event_type(),
            size: event.size(),
            timer: event.timer(),
        });
    }

    fn expire_timers(&mut self) {
        for id in self.timers.expire(Instant::now()) {
            self.pending.push_back(Event::Timer(id));
        }
    }

    fn translate(&mut self, native: Vec<SourceEvent>) {
        for source in native {
            let event = match source {
                SourceEvent::Resize(size) => Event::Resize { size },
                SourceEvent::Expose => Event::Redraw {
                    rect: Rect2d::from(self.backend.screen_size()),
                },
                SourceEvent::Motion(point) => Event::MouseMove(MouseEvent {
                    button: None,
                    point,
                    modifiers: self.backend.modifiers(),
                }),
                SourceEvent::Button {
                    button,
                    pressed,
                    point,
                } => {
                    let mouse = MouseEvent {
                        button: Some(button),
                        point,
                        modifiers: self.backend.modifiers(),
                    };
                    if pressed {
                        Event::MouseDown(mouse)
                    } else {
                        Event::MouseUp(mouse)
                    }
                }
                SourceEvent::Key {
                    key,
                    text,
                    pressed,
                    modifiers,
                } => {
                    let key = KeyEvent {
                        key,
                        text,
                        modifiers,
                    };
                    if pressed {
                        Event::KeyDown(key)
                    } else {
                        Event::KeyUp(key)
                    }
                }
                SourceEvent::Focus(focused) => {
                    log::trace!("ignoring focus change ({})", focused);
                    continue;
                }
                SourceEvent::Quit => Event::Quit,
            };
            self.pending.push_back(event);
        }
    }
}
