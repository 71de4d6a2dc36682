//! Error types for the slideshow crate.
//!
//! Navigation itself never fails; it reports a
//! [`NavOutcome`](crate::controller::NavOutcome) instead. Errors only come
//! from construction and from settings I/O.

use thiserror::Error;

/// Errors that can occur while building a controller or loading settings
#[derive(Error, Debug)]
pub enum SlideshowError {
    /// The deck has no slides, so there is nothing to cycle through
    #[error("Slide deck is empty")]
    NoSlides,

    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings parsed but hold an unusable value
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type alias for slideshow operations
pub type SlideshowResult<T> = Result<T, SlideshowError>;
