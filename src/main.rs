//! Headless slideshow session.
//!
//! Builds an in-memory page, wires the controller and the viewport helper to
//! it, and replays a short scripted tour, logging the state after each step.
//! Pass a slide count as the first argument (default 5). Set `RUST_LOG` to
//! change verbosity.

use anyhow::{Context, Result, bail};
use slideshow::controller::SlideController;
use slideshow::host::memory::MemoryDocument;
use slideshow::host::{EventKind, EventSource, Scheduler, Viewport};
use slideshow::{MobileViewport, SlideshowSettings};
use std::rc::Rc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("slideshow=debug")),
        )
        .init();

    let slide_count = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<usize>()
            .with_context(|| format!("invalid slide count: {arg}"))?,
        None => 5,
    };
    if slide_count == 0 {
        bail!("slide count must be at least 1");
    }

    let settings = SlideshowSettings::load();
    let step = settings.transition_duration();
    let doc = MemoryDocument::new(slide_count);

    let mut controller = SlideController::create(
        doc.deck(),
        Rc::clone(&doc.events) as Rc<dyn EventSource>,
        Rc::clone(&doc.scheduler) as Rc<dyn Scheduler>,
        settings.clone(),
    )
    .context("failed to create slide controller")?;
    let mut mobile = MobileViewport::install(
        Rc::clone(&doc.events) as Rc<dyn EventSource>,
        Rc::clone(&doc.viewport) as Rc<dyn Viewport>,
        &settings,
    )
    .context("failed to install viewport helper")?;

    let report = |label: &str| {
        info!(
            step = label,
            current = controller.current_slide(),
            transitioning = controller.is_transitioning(),
            active = ?doc.active_slides(),
            dots = ?doc.active_indicators(),
            "state"
        );
    };

    report("start");

    doc.click_next();
    report("next clicked");
    let key = doc.press_key("ArrowRight");
    info!(prevented = key.default_prevented(), "ArrowRight during transition");
    doc.scheduler.advance(step);
    report("transition settled");

    doc.click_indicator(slide_count - 1);
    doc.scheduler.advance(step);
    report("last dot clicked");

    doc.press_key("ArrowRight");
    doc.scheduler.advance(step);
    report("ArrowRight wraps");

    doc.click_prev();
    doc.scheduler.advance(step);
    report("prev clicked");

    doc.touch_start(1, 300.0);
    doc.touch_end(120.0);
    doc.scheduler.advance(step);
    report("swiped left");

    doc.scheduler.advance(Duration::from_secs(1));
    let first = doc.touch_end(0.0);
    doc.scheduler.advance(Duration::from_millis(200));
    let second = doc.touch_end(0.0);
    info!(
        first = first.default_prevented(),
        second = second.default_prevented(),
        "double tap"
    );

    doc.viewport.set_inner_height(640.0);
    doc.window_event(EventKind::Resize);
    info!(vh = ?doc.viewport.style_property(&settings.viewport_property), "viewport resized");

    controller.dispose();
    mobile.dispose();
    info!(listeners = doc.events.listener_count(), "session finished");
    Ok(())
}
