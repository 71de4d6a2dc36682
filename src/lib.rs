//! Slideshow controller for a fixed deck of slides.
//!
//! The controller reacts to indicator clicks, prev/next buttons, arrow keys
//! and swipes, keeps exactly one slide and one indicator active at rest, and
//! serializes transitions behind a timed lock. A separate helper installs
//! mobile viewport affordances.
//!
//! The host environment is injected through the traits in [`host`], so the
//! whole crate runs deterministically against [`host::memory`] in tests.

pub mod constants;
pub mod controller;
pub mod error;
pub mod host;
pub mod settings;
pub mod viewport;

pub use controller::{BusyPolicy, Direction, DropReason, NavOutcome, SlideController, SlideDeck};
pub use error::{SlideshowError, SlideshowResult};
pub use settings::SlideshowSettings;
pub use viewport::MobileViewport;
