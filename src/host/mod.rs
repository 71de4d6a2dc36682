//! Host capabilities the slideshow depends on.
//!
//! The controller never touches a real document or timer. Everything it
//! needs from the embedding environment comes through the traits here:
//!
//! - [`Element`] - class toggles and data attributes on one element
//! - [`EventSource`] - subscribe/unsubscribe to input events
//! - [`Scheduler`] - one-shot delayed callbacks, cancellable
//! - [`Viewport`] - viewport height and root style properties
//!
//! [`memory`] provides a deterministic implementation of all four for tests
//! and headless runs.

pub mod memory;

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Opaque identifier the host assigns to an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// Returned by [`EventSource::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Returned by [`Scheduler::schedule`], used to cancel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// A single element in the host document.
pub trait Element {
    fn id(&self) -> ElementId;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;

    /// Add `class` when `on`, remove it otherwise.
    fn toggle_class(&self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    /// Value of a `data-*` attribute, without the `data-` prefix.
    fn data_attribute(&self, key: &str) -> Option<String>;
}

/// Shared handle to a host element
pub type ElementHandle = Rc<dyn Element>;

/// Kind of input event a listener is interested in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    KeyDown,
    TouchStart,
    TouchMove,
    TouchEnd,
    Resize,
    OrientationChange,
    Load,
}

/// Where a listener is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Document,
    Window,
    Element(ElementId),
}

/// Keyboard key, as reported by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArrowLeft => f.write_str("ArrowLeft"),
            Self::ArrowRight => f.write_str("ArrowRight"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// Event-specific data
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    None,
    Key(Key),
    Touch {
        /// Number of simultaneous contact points
        touches: usize,
        /// Horizontal position of the primary contact
        x: f64,
    },
}

/// An input event delivered to listeners.
///
/// Listeners may call [`InputEvent::prevent_default`] to cancel the host's
/// default action; the dispatcher reads it back afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct InputEvent {
    pub kind: EventKind,
    /// Time since page load
    pub timestamp: Duration,
    pub payload: EventPayload,
    default_prevented: bool,
}

impl InputEvent {
    pub fn new(kind: EventKind, timestamp: Duration, payload: EventPayload) -> Self {
        Self {
            kind,
            timestamp,
            payload,
            default_prevented: false,
        }
    }

    pub fn click(timestamp: Duration) -> Self {
        Self::new(EventKind::Click, timestamp, EventPayload::None)
    }

    pub fn key_down(key: Key, timestamp: Duration) -> Self {
        Self::new(EventKind::KeyDown, timestamp, EventPayload::Key(key))
    }

    pub fn touch_start(touches: usize, x: f64, timestamp: Duration) -> Self {
        Self::new(EventKind::TouchStart, timestamp, EventPayload::Touch { touches, x })
    }

    pub fn touch_move(touches: usize, x: f64, timestamp: Duration) -> Self {
        Self::new(EventKind::TouchMove, timestamp, EventPayload::Touch { touches, x })
    }

    pub fn touch_end(x: f64, timestamp: Duration) -> Self {
        Self::new(EventKind::TouchEnd, timestamp, EventPayload::Touch { touches: 0, x })
    }

    /// Window-level event with no payload (resize, orientation change, load).
    pub fn window(kind: EventKind, timestamp: Duration) -> Self {
        Self::new(kind, timestamp, EventPayload::None)
    }

    pub fn key(&self) -> Option<&Key> {
        match &self.payload {
            EventPayload::Key(key) => Some(key),
            _ => None,
        }
    }

    /// Contact count and primary x position for touch events
    pub fn touch(&self) -> Option<(usize, f64)> {
        match self.payload {
            EventPayload::Touch { touches, x } => Some((touches, x)),
            _ => None,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Listener callback
pub type Handler = Box<dyn FnMut(&mut InputEvent)>;

/// Subscribe to named input events on the host.
pub trait EventSource {
    fn subscribe(&self, target: EventTarget, kind: EventKind, handler: Handler) -> ListenerId;

    /// Unknown or already-removed ids are ignored.
    fn unsubscribe(&self, id: ListenerId);
}

/// Schedule one-shot callbacks on the host's event loop.
///
/// Implementations must never run `task` from inside `schedule`.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId;

    /// Cancelling a timer that already fired is a no-op.
    fn cancel(&self, id: TimerId);
}

/// Viewport metrics and root style access.
pub trait Viewport {
    /// Current inner height of the viewport in CSS pixels
    fn inner_height(&self) -> f64;
    fn set_style_property(&self, name: &str, value: &str);
}
