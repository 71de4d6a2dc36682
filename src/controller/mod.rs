//! Slide controller - cycles through a fixed deck of slides.
//!
//! ## Architecture
//!
//! [`SlideController`] owns the listeners it attaches and a shared `Core`
//! holding the deck and the [`TransitionState`]. Listener closures and the
//! deferred cleanup task only hold weak references to the core, so dropping
//! the controller tears everything down.
//!
//! A transition has two phases:
//!
//! 1. Synchronous: the current slide loses `active` and gains the outgoing
//!    class, the target slide gains `active`, the lock is taken.
//! 2. Deferred (after `transition_ms`): outgoing classes are cleared, every
//!    slide except the target loses `active`, the current index moves to the
//!    target, indicators are re-synced and the lock is released.
//!
//! ## Modules
//!
//! - `state` - Transition state machine and busy policy
//! - `swipe` - Horizontal swipe detection

mod state;
mod swipe;

pub use state::{BusyPolicy, TransitionState};
pub use swipe::SwipeTracker;

use crate::constants::{DIRECTION_ATTRIBUTE, DIRECTION_NEXT, DIRECTION_PREV};
use crate::error::{SlideshowError, SlideshowResult};
use crate::host::{
    ElementHandle, EventKind, EventSource, EventTarget, InputEvent, Key, ListenerId, Scheduler,
    TimerId,
};
use crate::settings::SlideshowSettings;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, info, trace, warn};

/// Navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    /// Index reached by one step from `index` in a deck of `total` slides,
    /// wrapping at both ends.
    ///
    /// # Panics
    ///
    /// Panics if `total` is zero.
    pub fn step(self, index: usize, total: usize) -> usize {
        match self {
            Self::Next => (index + 1) % total,
            Self::Previous => {
                if index == 0 {
                    total - 1
                } else {
                    index - 1
                }
            }
        }
    }

    /// Direction implied by moving between two indices (forward when the
    /// target index is higher).
    pub fn between(from: usize, to: usize) -> Self {
        if to > from { Self::Next } else { Self::Previous }
    }

    /// Parse a nav button's `direction` attribute.
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            DIRECTION_PREV => Some(Self::Previous),
            DIRECTION_NEXT => Some(Self::Next),
            _ => None,
        }
    }
}

/// Element handles the controller drives.
#[derive(Clone, Default)]
pub struct SlideDeck {
    /// Slides in display order
    pub slides: Vec<ElementHandle>,
    /// One indicator dot per slide (not validated)
    pub indicators: Vec<ElementHandle>,
    /// Buttons carrying a `direction` data attribute of `prev` or `next`
    pub nav_buttons: Vec<ElementHandle>,
}

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// A transition began
    Started { from: usize, to: usize },
    /// Parked until the in-flight transition completes
    Queued { to: usize },
    /// Nothing happened
    Dropped(DropReason),
}

impl NavOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started { .. })
    }
}

/// Why a navigation request was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Another transition is in flight
    Transitioning,
    /// Target is already the current slide
    AlreadyActive,
    /// Target index is outside the deck
    OutOfRange,
    /// The controller has been disposed
    Disposed,
}

#[derive(Debug)]
struct ControllerState {
    current: usize,
    transition: TransitionState,
    timer: Option<TimerId>,
    queued: Option<usize>,
    swipe: SwipeTracker,
    disposed: bool,
}

struct Core {
    deck: SlideDeck,
    scheduler: Rc<dyn Scheduler>,
    settings: SlideshowSettings,
    state: RefCell<ControllerState>,
}

impl Core {
    fn total(&self) -> usize {
        self.deck.slides.len()
    }

    fn advance(self: &Rc<Self>, direction: Direction) -> NavOutcome {
        let base = {
            let state = self.state.borrow();
            if state.disposed {
                return NavOutcome::Dropped(DropReason::Disposed);
            }
            match state.transition {
                TransitionState::Idle => state.current,
                TransitionState::Transitioning { to, .. } => match self.settings.busy_policy {
                    BusyPolicy::Drop => {
                        trace!(?direction, "Advance dropped, transition in flight");
                        return NavOutcome::Dropped(DropReason::Transitioning);
                    }
                    BusyPolicy::QueueLatest => state.queued.unwrap_or(to),
                },
            }
        };
        self.go_to_slide(direction.step(base, self.total()))
    }

    fn go_to_slide(self: &Rc<Self>, index: usize) -> NavOutcome {
        let from = {
            let mut state = self.state.borrow_mut();
            if state.disposed {
                return NavOutcome::Dropped(DropReason::Disposed);
            }
            if index >= self.total() {
                warn!(index, total = self.total(), "Slide index out of range");
                return NavOutcome::Dropped(DropReason::OutOfRange);
            }
            if state.transition.is_transitioning() {
                return match self.settings.busy_policy {
                    BusyPolicy::Drop => {
                        trace!(index, "Slide change dropped, transition in flight");
                        NavOutcome::Dropped(DropReason::Transitioning)
                    }
                    BusyPolicy::QueueLatest => {
                        trace!(index, "Slide change queued");
                        state.queued = Some(index);
                        NavOutcome::Queued { to: index }
                    }
                };
            }
            if index == state.current {
                return NavOutcome::Dropped(DropReason::AlreadyActive);
            }
            let from = state.current;
            state.transition.begin(from, index);
            from
        };

        let classes = &self.settings.classes;
        let outgoing = &self.deck.slides[from];
        let incoming = &self.deck.slides[index];
        outgoing.remove_class(&classes.active);
        incoming.add_class(&classes.active);
        // Same outgoing treatment in both directions for now.
        let direction = Direction::between(from, index);
        outgoing.add_class(&classes.outgoing);

        let weak = Rc::downgrade(self);
        let timer = self.scheduler.schedule(
            self.settings.transition_duration(),
            Box::new(move || {
                if let Some(core) = weak.upgrade() {
                    core.complete_transition();
                }
            }),
        );
        self.state.borrow_mut().timer = Some(timer);

        debug!(from, to = index, ?direction, "Slide transition started");
        NavOutcome::Started { from, to: index }
    }

    /// Deferred phase of a transition. No-op when idle.
    fn complete_transition(self: &Rc<Self>) {
        let (target, queued) = {
            let mut state = self.state.borrow_mut();
            let Some(target) = state.transition.target() else {
                return;
            };
            state.timer = None;
            (target, state.queued.take())
        };

        let classes = &self.settings.classes;
        for (i, slide) in self.deck.slides.iter().enumerate() {
            slide.remove_class(&classes.outgoing);
            if i != target {
                slide.remove_class(&classes.active);
            }
        }

        self.state.borrow_mut().current = target;
        self.sync_indicators();
        self.state.borrow_mut().transition.finish();
        debug!(current = target, "Slide transition finished");

        if let Some(next) = queued {
            if next != target {
                self.go_to_slide(next);
            }
        }
    }

    fn handle_keydown(self: &Rc<Self>, event: &mut InputEvent) {
        {
            let state = self.state.borrow();
            if state.disposed || state.transition.is_transitioning() {
                return;
            }
        }
        let direction = match event.key() {
            Some(Key::ArrowLeft) => Direction::Previous,
            Some(Key::ArrowRight) => Direction::Next,
            _ => return,
        };
        event.prevent_default();
        self.advance(direction);
    }

    fn handle_nav_click(self: &Rc<Self>, button: usize) {
        let Some(value) = self.deck.nav_buttons[button].data_attribute(DIRECTION_ATTRIBUTE) else {
            trace!(button, "Nav button has no direction");
            return;
        };
        match Direction::from_attribute(&value) {
            Some(direction) => {
                self.advance(direction);
            }
            None => trace!(button, direction = %value, "Unknown nav direction"),
        }
    }

    fn handle_touch(self: &Rc<Self>, event: &InputEvent) {
        let Some((touches, x)) = event.touch() else {
            return;
        };
        let swiped = {
            let mut state = self.state.borrow_mut();
            match event.kind {
                EventKind::TouchStart => {
                    state.swipe.begin(touches, x);
                    None
                }
                EventKind::TouchMove => {
                    state.swipe.track(touches);
                    None
                }
                EventKind::TouchEnd => state.swipe.finish(x),
                _ => None,
            }
        };
        if let Some(direction) = swiped {
            trace!(?direction, "Swipe detected");
            self.advance(direction);
        }
    }

    fn sync_indicators(&self) {
        let current = self.state.borrow().current;
        for (i, dot) in self.deck.indicators.iter().enumerate() {
            dot.toggle_class(&self.settings.classes.active, i == current);
        }
    }

    /// Bring slides in line with the current index: only it is active and
    /// nothing is outgoing.
    fn normalize_slides(&self) {
        let current = self.state.borrow().current;
        let classes = &self.settings.classes;
        for (i, slide) in self.deck.slides.iter().enumerate() {
            slide.remove_class(&classes.outgoing);
            slide.toggle_class(&classes.active, i == current);
        }
    }
}

/// Drives a deck of slides from clicks, arrow keys and swipes.
pub struct SlideController {
    core: Rc<Core>,
    events: Rc<dyn EventSource>,
    listeners: Vec<ListenerId>,
}

impl SlideController {
    /// Build a controller at slide 0 and attach its listeners.
    pub fn create(
        deck: SlideDeck,
        events: Rc<dyn EventSource>,
        scheduler: Rc<dyn Scheduler>,
        settings: SlideshowSettings,
    ) -> SlideshowResult<Self> {
        settings.validate()?;
        if deck.slides.is_empty() {
            return Err(SlideshowError::NoSlides);
        }
        if deck.indicators.len() != deck.slides.len() {
            warn!(
                slides = deck.slides.len(),
                indicators = deck.indicators.len(),
                "Indicator count does not match slide count"
            );
        }

        let swipe = SwipeTracker::new(settings.swipe_threshold_px);
        let core = Rc::new(Core {
            deck,
            scheduler,
            settings,
            state: RefCell::new(ControllerState {
                current: 0,
                transition: TransitionState::Idle,
                timer: None,
                queued: None,
                swipe,
                disposed: false,
            }),
        });
        core.normalize_slides();
        core.sync_indicators();

        let listeners = attach_listeners(&core, events.as_ref());
        info!(
            slides = core.total(),
            listeners = listeners.len(),
            "Slide controller created"
        );

        Ok(Self {
            core,
            events,
            listeners,
        })
    }

    /// Step one slide forward or back, wrapping at either end.
    pub fn advance(&self, direction: Direction) -> NavOutcome {
        self.core.advance(direction)
    }

    /// Start a transition to `index`.
    pub fn go_to_slide(&self, index: usize) -> NavOutcome {
        self.core.go_to_slide(index)
    }

    /// Arrow-key navigation. Ignored entirely (default not prevented) while
    /// a transition is in flight.
    pub fn handle_keydown(&self, event: &mut InputEvent) {
        self.core.handle_keydown(event);
    }

    pub fn sync_indicators(&self) {
        self.core.sync_indicators();
    }

    /// Index of the current slide. During a transition this is still the
    /// slide being left.
    pub fn current_slide(&self) -> usize {
        self.core.state.borrow().current
    }

    pub fn total_slides(&self) -> usize {
        self.core.total()
    }

    pub fn is_transitioning(&self) -> bool {
        self.core.state.borrow().transition.is_transitioning()
    }

    pub fn transition_state(&self) -> TransitionState {
        self.core.state.borrow().transition
    }

    pub fn is_disposed(&self) -> bool {
        self.core.state.borrow().disposed
    }

    /// Remove every listener and settle any in-flight transition.
    pub fn dispose(&mut self) {
        let timer = {
            let mut state = self.core.state.borrow_mut();
            if state.disposed {
                return;
            }
            state.disposed = true;
            state.queued = None;
            state.timer.take()
        };

        for id in self.listeners.drain(..) {
            self.events.unsubscribe(id);
        }
        if let Some(timer) = timer {
            self.core.scheduler.cancel(timer);
            self.core.complete_transition();
        }
        info!(current = self.current_slide(), "Slide controller disposed");
    }
}

impl Drop for SlideController {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn attach_listeners(core: &Rc<Core>, events: &dyn EventSource) -> Vec<ListenerId> {
    let mut listeners = Vec::new();

    for (index, dot) in core.deck.indicators.iter().enumerate() {
        let weak = Rc::downgrade(core);
        listeners.push(events.subscribe(
            EventTarget::Element(dot.id()),
            EventKind::Click,
            Box::new(move |_: &mut InputEvent| {
                with_core(&weak, |core| {
                    core.go_to_slide(index);
                })
            }),
        ));
    }

    for (index, button) in core.deck.nav_buttons.iter().enumerate() {
        let weak = Rc::downgrade(core);
        listeners.push(events.subscribe(
            EventTarget::Element(button.id()),
            EventKind::Click,
            Box::new(move |_: &mut InputEvent| {
                with_core(&weak, |core| core.handle_nav_click(index))
            }),
        ));
    }

    let weak = Rc::downgrade(core);
    listeners.push(events.subscribe(
        EventTarget::Document,
        EventKind::KeyDown,
        Box::new(move |event: &mut InputEvent| {
            with_core(&weak, |core| core.handle_keydown(event))
        }),
    ));

    if core.settings.swipe_enabled {
        for kind in [EventKind::TouchStart, EventKind::TouchMove, EventKind::TouchEnd] {
            let weak = Rc::downgrade(core);
            listeners.push(events.subscribe(
                EventTarget::Document,
                kind,
                Box::new(move |event: &mut InputEvent| {
                    with_core(&weak, |core| core.handle_touch(event))
                }),
            ));
        }
    }

    listeners
}

fn with_core(weak: &Weak<Core>, f: impl FnOnce(&Rc<Core>)) {
    if let Some(core) = weak.upgrade() {
        f(&core);
    }
}
