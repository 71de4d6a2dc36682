//! Controller create/dispose lifecycle tests.

use crate::helpers::{TRANSITION, assert_at_rest, create_controller, deck_with};
use slideshow::controller::{Direction, DropReason, NavOutcome, SlideController};
use slideshow::host::memory::MemoryDocument;
use slideshow::host::{Element, EventSource, EventTarget, Scheduler};
use slideshow::{SlideshowError, SlideshowSettings};
use std::rc::Rc;

#[test]
fn test_create_attaches_expected_listeners() {
    let doc = MemoryDocument::new(4);
    let _controller = create_controller(&doc, SlideshowSettings::default());

    // 4 dots + 2 buttons + keydown + touchstart/move/end
    assert_eq!(doc.events.listener_count(), 4 + 2 + 1 + 3);
    assert_eq!(doc.events.listeners_on(EventTarget::Document), 4);
}

#[test]
fn test_create_without_swipe_skips_touch_listeners() {
    let doc = MemoryDocument::new(4);
    let settings = SlideshowSettings {
        swipe_enabled: false,
        ..Default::default()
    };
    let _controller = create_controller(&doc, settings);
    assert_eq!(doc.events.listeners_on(EventTarget::Document), 1);
}

#[test]
fn test_create_normalizes_stray_classes() {
    let doc = MemoryDocument::new(3);
    // Markup left over from a previous run
    doc.slides[2].add_class("active");
    doc.slides[1].add_class("prev");
    doc.indicators[2].add_class("active");

    let controller = create_controller(&doc, SlideshowSettings::default());
    assert_eq!(controller.current_slide(), 0);
    assert_eq!(doc.active_slides(), vec![0]);
    assert!(doc.outgoing_slides().is_empty());
    assert_eq!(doc.active_indicators(), vec![0]);
}

#[test]
fn test_create_rejects_invalid_settings() {
    let doc = MemoryDocument::new(3);
    let settings = SlideshowSettings {
        transition_ms: 0,
        ..Default::default()
    };
    let result = SlideController::create(
        doc.deck(),
        Rc::clone(&doc.events) as Rc<dyn EventSource>,
        Rc::clone(&doc.scheduler) as Rc<dyn Scheduler>,
        settings,
    );
    assert!(matches!(result, Err(SlideshowError::InvalidSettings(_))));
}

#[test]
fn test_dispose_removes_every_listener() {
    let mut deck = deck_with(3);
    assert!(deck.doc.events.listener_count() > 0);

    deck.controller.dispose();
    assert_eq!(deck.doc.events.listener_count(), 0);
    assert!(deck.controller.is_disposed());

    deck.doc.click_next();
    let event = deck.doc.press_key("ArrowRight");
    assert!(!event.default_prevented());
    assert_eq!(
        deck.controller.advance(Direction::Next),
        NavOutcome::Dropped(DropReason::Disposed)
    );
    assert_at_rest(&deck, 0);
}

#[test]
fn test_dispose_settles_pending_transition() {
    let mut deck = deck_with(4);

    deck.controller.go_to_slide(2);
    assert_eq!(deck.doc.scheduler.pending(), 1);

    deck.controller.dispose();
    assert_eq!(deck.doc.scheduler.pending(), 0);
    assert_at_rest(&deck, 2);

    // The cancelled cleanup never runs later
    deck.doc.scheduler.advance(TRANSITION * 4);
    assert_at_rest(&deck, 2);
}

#[test]
fn test_dispose_is_idempotent() {
    let mut deck = deck_with(2);
    deck.controller.dispose();
    deck.controller.dispose();
    assert_eq!(deck.doc.events.listener_count(), 0);
}

#[test]
fn test_drop_detaches_listeners() {
    let doc = MemoryDocument::new(3);
    {
        let _controller = create_controller(&doc, SlideshowSettings::default());
        assert!(doc.events.listener_count() > 0);
    }
    assert_eq!(doc.events.listener_count(), 0);

    // Events after teardown reach nobody
    let event = doc.press_key("ArrowRight");
    assert!(!event.default_prevented());
}

#[test]
fn test_drop_mid_transition_leaves_no_timer_behind() {
    let doc = MemoryDocument::new(3);
    {
        let controller = create_controller(&doc, SlideshowSettings::default());
        controller.go_to_slide(1);
    }
    assert_eq!(doc.scheduler.pending(), 0);
    assert_eq!(doc.active_slides(), vec![1]);
    assert!(doc.outgoing_slides().is_empty());
}

#[test]
fn test_independent_instances() {
    let first = deck_with(3);
    let second = deck_with(5);

    first.doc.click_next();
    first.settle();
    second.doc.press_key("ArrowLeft");
    second.settle();

    assert_at_rest(&first, 1);
    assert_at_rest(&second, 4);
}
