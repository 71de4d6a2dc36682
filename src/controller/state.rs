//! Transition state machine for the slide controller.
//!
//! Replaces a bare `is_transitioning` flag with an explicit state that also
//! records which slides are involved, so "transitioning but to nowhere"
//! cannot be represented.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Transitioning        (advance / go_to_slide with a valid new target)
//! Transitioning -> Idle        (transition delay elapses, cleanup done)
//! ```
//!
//! Triggers arriving while `Transitioning` are dropped, or parked in a single
//! slot under [`BusyPolicy::QueueLatest`].

use serde::{Deserialize, Serialize};

/// Where the controller is in its transition cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionState {
    /// At rest; exactly one slide is active
    #[default]
    Idle,

    /// Animating from one slide to another
    Transitioning {
        /// Slide leaving view (still the current slide until cleanup)
        from: usize,
        /// Slide entering view
        to: usize,
    },
}

impl TransitionState {
    /// Returns true if the state is Idle
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true if a transition is in flight
    pub fn is_transitioning(&self) -> bool {
        matches!(self, Self::Transitioning { .. })
    }

    /// Slide the in-flight transition is heading to, if any
    pub fn target(&self) -> Option<usize> {
        match self {
            Self::Transitioning { to, .. } => Some(*to),
            Self::Idle => None,
        }
    }

    /// Start a transition
    pub fn begin(&mut self, from: usize, to: usize) {
        *self = Self::Transitioning { from, to };
    }

    /// Reset to Idle state
    pub fn finish(&mut self) {
        *self = Self::Idle;
    }
}

/// What to do with a navigation trigger that arrives mid-transition.
///
/// Keyboard input is ignored while transitioning under either policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusyPolicy {
    /// Drop the trigger; nothing is queued or coalesced
    #[default]
    Drop,
    /// Keep the most recent target and start it once the current
    /// transition completes
    QueueLatest,
}
