//! Horizontal swipe detection.
//!
//! A swipe is a single-contact touch whose release point lies at least
//! `threshold` pixels left or right of where it started. A second contact at
//! any point aborts the gesture.

use super::Direction;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeTracker {
    threshold: f64,
    start_x: Option<f64>,
}

impl SwipeTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start_x: None,
        }
    }

    /// Returns true while a single-contact gesture is being tracked
    pub fn is_tracking(&self) -> bool {
        self.start_x.is_some()
    }

    pub fn begin(&mut self, touches: usize, x: f64) {
        self.start_x = (touches == 1).then_some(x);
    }

    /// Touch moved; multi-touch cancels the gesture.
    pub fn track(&mut self, touches: usize) {
        if touches > 1 {
            self.start_x = None;
        }
    }

    /// Finish the gesture at `x`. Leftward travel means "show the next
    /// slide", rightward means "show the previous one".
    pub fn finish(&mut self, x: f64) -> Option<Direction> {
        let start = self.start_x.take()?;
        let dx = x - start;
        if dx.abs() < self.threshold {
            return None;
        }
        Some(if dx < 0.0 {
            Direction::Next
        } else {
            Direction::Previous
        })
    }
}
