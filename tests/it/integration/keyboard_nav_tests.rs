//! Arrow-key navigation tests.

use crate::helpers::{TestDeckBuilder, assert_at_rest, deck_with};
use slideshow::controller::BusyPolicy;
use slideshow::host::{InputEvent, Key};
use std::time::Duration;

#[test]
fn test_arrow_right_advances_and_prevents_default() {
    let deck = deck_with(3);

    let event = deck.doc.press_key("ArrowRight");
    assert!(event.default_prevented());
    deck.settle();
    assert_at_rest(&deck, 1);
}

#[test]
fn test_arrow_left_wraps_and_prevents_default() {
    let deck = deck_with(3);

    let event = deck.doc.press_key("ArrowLeft");
    assert!(event.default_prevented());
    deck.settle();
    assert_at_rest(&deck, 2);
}

#[test]
fn test_other_keys_are_ignored() {
    let deck = deck_with(3);

    for key in ["Enter", " ", "ArrowUp", "ArrowDown", "a"] {
        let event = deck.doc.press_key(key);
        assert!(!event.default_prevented(), "{key} should not be prevented");
    }
    assert!(!deck.controller.is_transitioning());
    assert_at_rest(&deck, 0);
}

#[test]
fn test_arrows_ignored_while_transitioning() {
    let deck = deck_with(5);

    deck.doc.click_next();
    assert!(deck.controller.is_transitioning());

    let right = deck.doc.press_key("ArrowRight");
    let left = deck.doc.press_key("ArrowLeft");
    assert!(!right.default_prevented());
    assert!(!left.default_prevented());

    deck.settle();
    assert_at_rest(&deck, 1);
}

#[test]
fn test_arrows_ignored_while_transitioning_even_when_queueing() {
    let deck = TestDeckBuilder::new()
        .with_slides(5)
        .with_busy_policy(BusyPolicy::QueueLatest)
        .build();

    deck.doc.click_next();
    let event = deck.doc.press_key("ArrowRight");
    assert!(!event.default_prevented());

    deck.doc.scheduler.advance(Duration::from_secs(1));
    assert_at_rest(&deck, 1);
    assert_eq!(deck.doc.scheduler.pending(), 0);
}

#[test]
fn test_handle_keydown_directly() {
    let deck = deck_with(4);

    let mut event = InputEvent::key_down(Key::ArrowRight, Duration::ZERO);
    deck.controller.handle_keydown(&mut event);
    assert!(event.default_prevented());
    assert!(deck.controller.is_transitioning());

    let mut late = InputEvent::key_down(Key::ArrowRight, Duration::from_millis(10));
    deck.controller.handle_keydown(&mut late);
    assert!(!late.default_prevented());

    deck.settle();
    assert_at_rest(&deck, 1);
}
