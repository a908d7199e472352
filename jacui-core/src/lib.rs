// SPDX-License-Identifier: MIT
#![warn(missing_docs)]

//! Core library for jacui => See `jacui` crate.
//!
//! Contains surfaces, resources (images, fonts, cursors, icons), the event model and the
//! platform backends.

/// Contains the [Error] type and the crate [Result].
pub mod error;

/// Contains the geometry types.
pub mod types;

/// Contains [Color](color::Color) and the named colors.
pub mod color;

/// Contains the [Surface](surface::Surface) traits and the [Canvas](surface::Canvas).
pub mod surface;

/// Contains image loading.
pub mod image;

/// Contains the XPM parser and [XpmIcon](xpm::XpmIcon).
pub mod xpm;

/// Contains monochrome mouse cursors and the built-in cursor set.
pub mod cursor;

/// Contains text rendering.
pub mod font;

/// Contains the event types.
pub mod event;

/// Contains the timer table.
pub mod timer;

/// Contains the [EventQueue](event_queue::EventQueue).
pub mod event_queue;

/// Contains platform abstraction for windowing and input.
pub mod platform;

/// Contains the [Window](window::Window).
pub mod window;

/// Contains the [JacuiConfig](config::JacuiConfig) struct.
pub mod config;

pub use error::{Error, Result};
