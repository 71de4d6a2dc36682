//! Slideshow-wide constants.
//!
//! Centralizes timing values, class names and attribute names so the
//! controller, the viewport helper and the settings defaults agree.

// ============================================================================
// Timing
// ============================================================================

/// Slide transition duration in milliseconds.
///
/// Must match the transition duration in the presentation stylesheet.
pub const TRANSITION_DURATION_MS: u64 = 250;

/// Two touch releases closer than this (inclusive) count as a double tap.
pub const DOUBLE_TAP_WINDOW_MS: u64 = 300;

// ============================================================================
// Presentation State
// ============================================================================

/// Class carried by the active slide and the active indicator
pub const ACTIVE_CLASS: &str = "active";

/// Transient class carried by the slide leaving view during a transition
pub const OUTGOING_CLASS: &str = "prev";

/// Class tagging slide elements in the host document
pub const SLIDE_CLASS: &str = "model-slide";

/// Class tagging indicator dots in the host document
pub const INDICATOR_CLASS: &str = "dot";

/// Class tagging prev/next buttons in the host document
pub const NAV_BUTTON_CLASS: &str = "nav-button";

// ============================================================================
// Navigation Buttons
// ============================================================================

/// Data attribute on nav buttons naming their direction
pub const DIRECTION_ATTRIBUTE: &str = "direction";

/// `direction` attribute value for the previous-slide button
pub const DIRECTION_PREV: &str = "prev";

/// `direction` attribute value for the next-slide button
pub const DIRECTION_NEXT: &str = "next";

// ============================================================================
// Touch & Viewport
// ============================================================================

/// Minimum horizontal travel in pixels for a swipe to change slides
pub const SWIPE_THRESHOLD_PX: f64 = 50.0;

/// Custom style property holding 1% of the viewport height
pub const VIEWPORT_HEIGHT_PROPERTY: &str = "--vh";

/// Fraction of the viewport height written to [`VIEWPORT_HEIGHT_PROPERTY`]
pub const VIEWPORT_UNIT_FRACTION: f64 = 0.01;
