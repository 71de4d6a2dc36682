//! In-memory host for tests and headless runs.
//!
//! Everything here is single-threaded and deterministic: time only moves
//! when [`ManualScheduler::advance`] is called, and events only fire when
//! [`MemoryEventSource::dispatch`] is called.

use super::{
    Element, ElementHandle, ElementId, EventKind, EventSource, EventTarget, Handler, InputEvent,
    Key, ListenerId, Scheduler, TimerId, Viewport,
};
use crate::constants::{
    ACTIVE_CLASS, DIRECTION_ATTRIBUTE, DIRECTION_NEXT, DIRECTION_PREV, INDICATOR_CLASS,
    NAV_BUTTON_CLASS, OUTGOING_CLASS, SLIDE_CLASS,
};
use crate::controller::SlideDeck;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;
use std::time::Duration;

// ============================================================================
// Elements
// ============================================================================

/// Element with a class set and `data-*` attributes.
#[derive(Debug)]
pub struct MemoryElement {
    id: ElementId,
    classes: RefCell<BTreeSet<String>>,
    data: RefCell<HashMap<String, String>>,
}

impl MemoryElement {
    pub fn new(id: ElementId, classes: &[&str]) -> Self {
        Self {
            id,
            classes: RefCell::new(classes.iter().map(|c| c.to_string()).collect()),
            data: RefCell::new(HashMap::new()),
        }
    }

    pub fn with_data(self, key: &str, value: &str) -> Self {
        self.data.borrow_mut().insert(key.to_string(), value.to_string());
        self
    }

    /// Sorted snapshot of the current classes
    pub fn classes(&self) -> Vec<String> {
        self.classes.borrow().iter().cloned().collect()
    }
}

impl Element for MemoryElement {
    fn id(&self) -> ElementId {
        self.id
    }

    fn add_class(&self, class: &str) {
        self.classes.borrow_mut().insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.classes.borrow_mut().remove(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    fn data_attribute(&self, key: &str) -> Option<String> {
        self.data.borrow().get(key).cloned()
    }
}

// ============================================================================
// Event Source
// ============================================================================

struct Listener {
    id: ListenerId,
    target: EventTarget,
    kind: EventKind,
    handler: Rc<RefCell<Handler>>,
}

/// Event source that fires listeners only on explicit [`dispatch`](Self::dispatch).
#[derive(Default)]
pub struct MemoryEventSource {
    listeners: RefCell<Vec<Listener>>,
    next_id: Cell<u64>,
}

impl MemoryEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every listener registered for `target` and the event's kind, in
    /// subscription order, and hand the event back.
    ///
    /// A handler that dispatches an event reaching itself is skipped for the
    /// nested dispatch.
    pub fn dispatch(&self, target: EventTarget, mut event: InputEvent) -> InputEvent {
        // Handlers may subscribe or unsubscribe, so never hold the borrow while calling them.
        let matching: Vec<(ListenerId, Rc<RefCell<Handler>>)> = self
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.target == target && l.kind == event.kind)
            .map(|l| (l.id, Rc::clone(&l.handler)))
            .collect();

        for (id, handler) in matching {
            if !self.is_subscribed(id) {
                continue;
            }
            let Ok(mut callback) = handler.try_borrow_mut() else {
                continue;
            };
            (*callback)(&mut event);
        }
        event
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Number of listeners attached to one target
    pub fn listeners_on(&self, target: EventTarget) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|l| l.target == target)
            .count()
    }

    fn is_subscribed(&self, id: ListenerId) -> bool {
        self.listeners.borrow().iter().any(|l| l.id == id)
    }
}

impl EventSource for MemoryEventSource {
    fn subscribe(&self, target: EventTarget, kind: EventKind, handler: Handler) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push(Listener {
            id,
            target,
            kind,
            handler: Rc::new(RefCell::new(handler)),
        });
        id
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|l| l.id != id);
    }
}

// ============================================================================
// Scheduler
// ============================================================================

struct PendingTask {
    id: TimerId,
    due: Duration,
    task: Box<dyn FnOnce()>,
}

/// Scheduler driven by a virtual clock.
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<Duration>,
    queue: RefCell<Vec<PendingTask>>,
    next_id: Cell<u64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// Tasks scheduled and not yet run or cancelled
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Move the clock forward by `by`, running every task that falls due on
    /// the way, including tasks those tasks schedule.
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by;
        while let Some(task) = self.pop_due(Some(target)) {
            self.now.set(task.due);
            (task.task)();
        }
        self.now.set(target);
    }

    /// Run tasks until the queue is empty, moving the clock as needed.
    pub fn run_until_idle(&self) {
        while let Some(task) = self.pop_due(None) {
            if task.due > self.now.get() {
                self.now.set(task.due);
            }
            (task.task)();
        }
    }

    /// Earliest task due at or before `limit`. Ties go to the task scheduled first.
    fn pop_due(&self, limit: Option<Duration>) -> Option<PendingTask> {
        let mut queue = self.queue.borrow_mut();
        let index = queue
            .iter()
            .enumerate()
            .filter(|(_, t)| limit.is_none_or(|limit| t.due <= limit))
            .min_by_key(|(_, t)| (t.due, t.id.0))
            .map(|(i, _)| i)?;
        Some(queue.remove(index))
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId {
        let id = TimerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.queue.borrow_mut().push(PendingTask {
            id,
            due: self.now.get() + delay,
            task,
        });
        id
    }

    fn cancel(&self, id: TimerId) {
        self.queue.borrow_mut().retain(|t| t.id != id);
    }
}

// ============================================================================
// Viewport
// ============================================================================

/// Viewport with a settable height and a readable root style.
#[derive(Debug)]
pub struct MemoryViewport {
    height: Cell<f64>,
    properties: RefCell<HashMap<String, String>>,
}

impl MemoryViewport {
    pub fn new(height: f64) -> Self {
        Self {
            height: Cell::new(height),
            properties: RefCell::new(HashMap::new()),
        }
    }

    pub fn set_inner_height(&self, height: f64) {
        self.height.set(height);
    }

    pub fn style_property(&self, name: &str) -> Option<String> {
        self.properties.borrow().get(name).cloned()
    }
}

impl Viewport for MemoryViewport {
    fn inner_height(&self) -> f64 {
        self.height.get()
    }

    fn set_style_property(&self, name: &str, value: &str) {
        self.properties
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }
}

// ============================================================================
// Document
// ============================================================================

/// A complete slideshow page: slides, indicator dots, prev/next buttons,
/// plus the event source, scheduler and viewport they live in.
pub struct MemoryDocument {
    pub events: Rc<MemoryEventSource>,
    pub scheduler: Rc<ManualScheduler>,
    pub viewport: Rc<MemoryViewport>,
    pub slides: Vec<Rc<MemoryElement>>,
    pub indicators: Vec<Rc<MemoryElement>>,
    pub prev_button: Rc<MemoryElement>,
    pub next_button: Rc<MemoryElement>,
    pub extra_buttons: Vec<Rc<MemoryElement>>,
    next_element_id: u64,
}

impl MemoryDocument {
    /// Page with `slide_count` slides (the first one active) and one
    /// indicator per slide.
    pub fn new(slide_count: usize) -> Self {
        Self::with_indicators(slide_count, slide_count)
    }

    /// Page whose indicator count may differ from its slide count.
    pub fn with_indicators(slide_count: usize, indicator_count: usize) -> Self {
        let mut next_element_id = 0;
        let mut alloc = || {
            let id = ElementId(next_element_id);
            next_element_id += 1;
            id
        };

        let slides = (0..slide_count)
            .map(|i| {
                let classes: &[&str] = if i == 0 {
                    &[SLIDE_CLASS, ACTIVE_CLASS]
                } else {
                    &[SLIDE_CLASS]
                };
                Rc::new(MemoryElement::new(alloc(), classes))
            })
            .collect();
        let indicators = (0..indicator_count)
            .map(|_| Rc::new(MemoryElement::new(alloc(), &[INDICATOR_CLASS])))
            .collect();
        let prev_button = Rc::new(
            MemoryElement::new(alloc(), &[NAV_BUTTON_CLASS])
                .with_data(DIRECTION_ATTRIBUTE, DIRECTION_PREV),
        );
        let next_button = Rc::new(
            MemoryElement::new(alloc(), &[NAV_BUTTON_CLASS])
                .with_data(DIRECTION_ATTRIBUTE, DIRECTION_NEXT),
        );

        Self {
            events: Rc::new(MemoryEventSource::new()),
            scheduler: Rc::new(ManualScheduler::new()),
            viewport: Rc::new(MemoryViewport::new(800.0)),
            slides,
            indicators,
            prev_button,
            next_button,
            extra_buttons: Vec::new(),
            next_element_id,
        }
    }

    /// Add an extra nav button carrying an arbitrary `direction` value.
    /// It is part of every [`deck`](Self::deck) built afterwards.
    pub fn add_nav_button(&mut self, direction: &str) -> Rc<MemoryElement> {
        let id = ElementId(self.next_element_id);
        self.next_element_id += 1;
        let button = Rc::new(
            MemoryElement::new(id, &[NAV_BUTTON_CLASS]).with_data(DIRECTION_ATTRIBUTE, direction),
        );
        self.extra_buttons.push(Rc::clone(&button));
        button
    }

    /// Element handles in the shape the controller expects.
    pub fn deck(&self) -> SlideDeck {
        SlideDeck {
            slides: self.slides.iter().map(|s| Rc::clone(s) as ElementHandle).collect(),
            indicators: self
                .indicators
                .iter()
                .map(|d| Rc::clone(d) as ElementHandle)
                .collect(),
            nav_buttons: [&self.prev_button, &self.next_button]
                .into_iter()
                .chain(self.extra_buttons.iter())
                .map(|b| Rc::clone(b) as ElementHandle)
                .collect(),
        }
    }

    // ------------------------------------------------------------------------
    // Input simulation (timestamps come from the scheduler clock)
    // ------------------------------------------------------------------------

    pub fn click(&self, element: &MemoryElement) -> InputEvent {
        self.events.dispatch(
            EventTarget::Element(element.id()),
            InputEvent::click(self.scheduler.now()),
        )
    }

    pub fn click_indicator(&self, index: usize) -> InputEvent {
        self.click(&self.indicators[index])
    }

    pub fn click_next(&self) -> InputEvent {
        self.click(&self.next_button)
    }

    pub fn click_prev(&self) -> InputEvent {
        self.click(&self.prev_button)
    }

    pub fn press_key(&self, name: &str) -> InputEvent {
        self.events.dispatch(
            EventTarget::Document,
            InputEvent::key_down(Key::from_name(name), self.scheduler.now()),
        )
    }

    pub fn touch_start(&self, touches: usize, x: f64) -> InputEvent {
        self.events.dispatch(
            EventTarget::Document,
            InputEvent::touch_start(touches, x, self.scheduler.now()),
        )
    }

    pub fn touch_move(&self, touches: usize, x: f64) -> InputEvent {
        self.events.dispatch(
            EventTarget::Document,
            InputEvent::touch_move(touches, x, self.scheduler.now()),
        )
    }

    pub fn touch_end(&self, x: f64) -> InputEvent {
        self.events.dispatch(
            EventTarget::Document,
            InputEvent::touch_end(x, self.scheduler.now()),
        )
    }

    /// Fire a window-level event (resize, orientation change, load).
    pub fn window_event(&self, kind: EventKind) -> InputEvent {
        self.events
            .dispatch(EventTarget::Window, InputEvent::window(kind, self.scheduler.now()))
    }

    // ------------------------------------------------------------------------
    // Presentation state queries
    // ------------------------------------------------------------------------

    pub fn slides_with(&self, class: &str) -> Vec<usize> {
        indices_with(&self.slides, class)
    }

    pub fn active_slides(&self) -> Vec<usize> {
        self.slides_with(ACTIVE_CLASS)
    }

    pub fn outgoing_slides(&self) -> Vec<usize> {
        self.slides_with(OUTGOING_CLASS)
    }

    pub fn active_indicators(&self) -> Vec<usize> {
        indices_with(&self.indicators, ACTIVE_CLASS)
    }
}

fn indices_with(elements: &[Rc<MemoryElement>], class: &str) -> Vec<usize> {
    elements
        .iter()
        .enumerate()
        .filter(|(_, e)| e.has_class(class))
        .map(|(i, _)| i)
        .collect()
}
