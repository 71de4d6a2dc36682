//! Unit tests for the mobile viewport helper.

use slideshow::host::memory::MemoryDocument;
use slideshow::host::{EventKind, EventSource, Viewport};
use slideshow::{MobileViewport, SlideshowError, SlideshowSettings};
use std::rc::Rc;
use std::time::Duration;

fn install(doc: &MemoryDocument) -> MobileViewport {
    install_with(doc, &SlideshowSettings::default())
}

fn install_with(doc: &MemoryDocument, settings: &SlideshowSettings) -> MobileViewport {
    MobileViewport::install(
        Rc::clone(&doc.events) as Rc<dyn EventSource>,
        Rc::clone(&doc.viewport) as Rc<dyn Viewport>,
        settings,
    )
    .expect("helper should install")
}

#[test]
fn test_double_tap_within_window_is_suppressed() {
    let doc = MemoryDocument::new(1);
    let _helper = install(&doc);

    doc.scheduler.advance(Duration::from_secs(10));
    let first = doc.touch_end(0.0);
    doc.scheduler.advance(Duration::from_millis(200));
    let second = doc.touch_end(0.0);

    assert!(!first.default_prevented());
    assert!(second.default_prevented());
}

#[test]
fn test_taps_far_apart_are_not_suppressed() {
    let doc = MemoryDocument::new(1);
    let _helper = install(&doc);

    doc.scheduler.advance(Duration::from_secs(10));
    doc.touch_end(0.0);
    doc.scheduler.advance(Duration::from_millis(400));
    let second = doc.touch_end(0.0);

    assert!(!second.default_prevented());
}

#[test]
fn test_first_tap_right_after_load_is_not_suppressed() {
    let doc = MemoryDocument::new(1);
    let helper = install(&doc);

    doc.scheduler.advance(Duration::from_millis(50));
    let first = doc.touch_end(0.0);
    assert!(!first.default_prevented());
    assert_eq!(helper.last_touch_end(), Some(Duration::from_millis(50)));
}

#[test]
fn test_window_is_measured_from_the_latest_release() {
    let doc = MemoryDocument::new(1);
    let _helper = install(&doc);

    // Triple tap: each release is 250ms after the previous one
    let results: Vec<bool> = (0..3)
        .map(|_| {
            doc.scheduler.advance(Duration::from_millis(250));
            doc.touch_end(0.0).default_prevented()
        })
        .collect();
    assert_eq!(results, vec![false, true, true]);
}

#[test]
fn test_custom_double_tap_window() {
    let doc = MemoryDocument::new(1);
    let settings = SlideshowSettings {
        double_tap_window_ms: 100,
        ..Default::default()
    };
    let _helper = install_with(&doc, &settings);

    doc.touch_end(0.0);
    doc.scheduler.advance(Duration::from_millis(200));
    assert!(!doc.touch_end(0.0).default_prevented());
}

#[test]
fn test_multi_touch_move_is_suppressed() {
    let doc = MemoryDocument::new(1);
    let _helper = install(&doc);

    assert!(!doc.touch_move(1, 10.0).default_prevented());
    assert!(doc.touch_move(2, 10.0).default_prevented());
    assert!(doc.touch_move(3, 10.0).default_prevented());
}

#[test]
fn test_viewport_unit_written_on_install() {
    let doc = MemoryDocument::new(1);
    doc.viewport.set_inner_height(900.0);
    let _helper = install(&doc);

    assert_eq!(doc.viewport.style_property("--vh").as_deref(), Some("9px"));
}

#[test]
fn test_viewport_unit_tracks_window_events() {
    let doc = MemoryDocument::new(1);
    let _helper = install(&doc);

    for (height, kind, expected) in [
        (1000.0, EventKind::Resize, "10px"),
        (500.0, EventKind::OrientationChange, "5px"),
        (800.0, EventKind::Load, "8px"),
    ] {
        doc.viewport.set_inner_height(height);
        doc.window_event(kind);
        assert_eq!(doc.viewport.style_property("--vh").as_deref(), Some(expected));
    }
}

#[test]
fn test_custom_property_name() {
    let doc = MemoryDocument::new(1);
    let settings = SlideshowSettings {
        viewport_property: "--app-vh".into(),
        ..Default::default()
    };
    let _helper = install_with(&doc, &settings);

    assert_eq!(doc.viewport.style_property("--app-vh").as_deref(), Some("8px"));
    assert_eq!(doc.viewport.style_property("--vh"), None);
}

#[test]
fn test_dispose_removes_listeners() {
    let doc = MemoryDocument::new(1);
    let mut helper = install(&doc);
    assert_eq!(doc.events.listener_count(), 5);

    helper.dispose();
    helper.dispose();
    assert_eq!(doc.events.listener_count(), 0);

    doc.viewport.set_inner_height(100.0);
    doc.window_event(EventKind::Resize);
    assert_eq!(doc.viewport.style_property("--vh").as_deref(), Some("8px"));
}

#[test]
fn test_install_rejects_invalid_settings() {
    let doc = MemoryDocument::new(1);
    let settings = SlideshowSettings {
        viewport_property: String::new(),
        ..Default::default()
    };
    let result = MobileViewport::install(
        Rc::clone(&doc.events) as Rc<dyn EventSource>,
        Rc::clone(&doc.viewport) as Rc<dyn Viewport>,
        &settings,
    );
    assert!(matches!(result, Err(SlideshowError::InvalidSettings(_))));
}
