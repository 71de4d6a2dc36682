//! Snapshot tests using the insta crate.
//!
//! Pins the on-disk settings format so renamed fields or changed defaults
//! show up as a snapshot diff. To update after an intentional change:
//! ```sh
//! cargo insta test --accept
//! ```

use slideshow::controller::BusyPolicy;
use slideshow::SlideshowSettings;

#[test]
fn snapshot_default_settings() {
    let json = serde_json::to_string_pretty(&SlideshowSettings::default()).unwrap();
    insta::assert_snapshot!(json, @r#"
    {
      "transition_ms": 250,
      "double_tap_window_ms": 300,
      "swipe_threshold_px": 50.0,
      "swipe_enabled": true,
      "busy_policy": "drop",
      "classes": {
        "active": "active",
        "outgoing": "prev"
      },
      "viewport_property": "--vh"
    }
    "#);
}

#[test]
fn snapshot_queueing_settings() {
    let settings = SlideshowSettings {
        transition_ms: 600,
        swipe_enabled: false,
        busy_policy: BusyPolicy::QueueLatest,
        ..Default::default()
    };
    let json = serde_json::to_string_pretty(&settings).unwrap();
    insta::assert_snapshot!(json, @r#"
    {
      "transition_ms": 600,
      "double_tap_window_ms": 300,
      "swipe_threshold_px": 50.0,
      "swipe_enabled": false,
      "busy_policy": "queue_latest",
      "classes": {
        "active": "active",
        "outgoing": "prev"
      },
      "viewport_property": "--vh"
    }
    "#);
}
