// SPDX-License-Identifier: MIT

//! Errors reported by jacui.

use thiserror::Error;

/// Errors that can occur while talking to the backend or decoding resources.
#[derive(Debug, Error)]
pub enum Error {
    /// The windowing/graphics backend failed.
    #[error("backend error: {0}")]
    Backend(String),

    /// A surface operation failed.
    #[error("surface error: {0}")]
    Surface(String),

    /// Image decoding failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Font loading or rendering failed.
    #[error("font error: {0}")]
    Font(String),

    /// Malformed XPM data.
    #[error("xpm error: {0}")]
    Xpm(String),

    /// Invalid cursor bitmap.
    #[error("{0}")]
    Cursor(String),

    /// Every timer slot is in use.
    #[error("maximum number of timers exceeded")]
    TimerLimit,

    /// Reading a resource from disk failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Invalid configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Result type used throughout jacui.
pub type Result<T> = std::result::Result<T, Error>;
