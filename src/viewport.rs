//! Mobile viewport affordances.
//!
//! Independent of the slide controller. Installs three groups of
//! document/window listeners:
//!
//! - touch releases closer together than the double-tap window have their
//!   default action cancelled (no double-tap zoom)
//! - multi-contact touch moves have their default action cancelled (no
//!   pull-to-refresh / pinch)
//! - a custom style property (`--vh` by default) holds 1% of the viewport
//!   height, refreshed on load, resize and orientation change

use crate::constants::VIEWPORT_UNIT_FRACTION;
use crate::error::SlideshowResult;
use crate::host::{EventKind, EventSource, EventTarget, InputEvent, ListenerId, Viewport};
use crate::settings::SlideshowSettings;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use tracing::{info, trace};

/// Handle to the installed listeners; dropping it removes them.
pub struct MobileViewport {
    events: Rc<dyn EventSource>,
    listeners: Vec<ListenerId>,
    last_touch_end: Rc<Cell<Option<Duration>>>,
}

impl MobileViewport {
    pub fn install(
        events: Rc<dyn EventSource>,
        viewport: Rc<dyn Viewport>,
        settings: &SlideshowSettings,
    ) -> SlideshowResult<Self> {
        settings.validate()?;

        let last_touch_end = Rc::new(Cell::new(None));
        let mut listeners = Vec::new();

        let window = settings.double_tap_window();
        let last = Rc::clone(&last_touch_end);
        listeners.push(events.subscribe(
            EventTarget::Document,
            EventKind::TouchEnd,
            Box::new(move |event: &mut InputEvent| {
                if is_double_tap(last.get(), event.timestamp, window) {
                    trace!(at = ?event.timestamp, "Double tap suppressed");
                    event.prevent_default();
                }
                last.set(Some(event.timestamp));
            }),
        ));

        listeners.push(events.subscribe(
            EventTarget::Document,
            EventKind::TouchMove,
            Box::new(|event: &mut InputEvent| {
                if event.touch().is_some_and(|(touches, _)| touches > 1) {
                    event.prevent_default();
                }
            }),
        ));

        for kind in [EventKind::Load, EventKind::Resize, EventKind::OrientationChange] {
            let viewport = Rc::clone(&viewport);
            let property = settings.viewport_property.clone();
            listeners.push(events.subscribe(
                EventTarget::Window,
                kind,
                Box::new(move |_: &mut InputEvent| {
                    update_viewport_height(viewport.as_ref(), &property);
                }),
            ));
        }

        update_viewport_height(viewport.as_ref(), &settings.viewport_property);
        info!(listeners = listeners.len(), "Mobile viewport helper installed");

        Ok(Self {
            events,
            listeners,
            last_touch_end,
        })
    }

    /// Timestamp of the most recent touch release, if any
    pub fn last_touch_end(&self) -> Option<Duration> {
        self.last_touch_end.get()
    }

    /// Remove all listeners. Idempotent.
    pub fn dispose(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        for id in self.listeners.drain(..) {
            self.events.unsubscribe(id);
        }
        info!("Mobile viewport helper disposed");
    }
}

impl Drop for MobileViewport {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// A release at `now` is the second half of a double tap when the previous
/// release was at most `window` earlier.
pub fn is_double_tap(last: Option<Duration>, now: Duration, window: Duration) -> bool {
    last.is_some_and(|last| now.saturating_sub(last) <= window)
}

/// Write 1% of the viewport height to `property` as a pixel length.
pub fn update_viewport_height(viewport: &dyn Viewport, property: &str) {
    let unit = viewport.inner_height() * VIEWPORT_UNIT_FRACTION;
    viewport.set_style_property(property, &format!("{unit}px"));
}
