//! Persisted slideshow settings.
//!
//! Settings live in `settings.json` under the platform config directory.
//! Every field has a default, so a partial file (or none at all) is fine.

use crate::constants::{
    ACTIVE_CLASS, DOUBLE_TAP_WINDOW_MS, OUTGOING_CLASS, SWIPE_THRESHOLD_PX,
    TRANSITION_DURATION_MS, VIEWPORT_HEIGHT_PROPERTY,
};
use crate::controller::BusyPolicy;
use crate::error::{SlideshowError, SlideshowResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

const SETTINGS_DIR: &str = "slideshow";
const SETTINGS_FILE: &str = "settings.json";

/// Class names toggled on slide and indicator elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassNames {
    pub active: String,
    pub outgoing: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            active: ACTIVE_CLASS.to_string(),
            outgoing: OUTGOING_CLASS.to_string(),
        }
    }
}

/// Tunables for the slide controller and the mobile viewport helper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideshowSettings {
    /// Deferred cleanup delay; keep in sync with the stylesheet transition
    pub transition_ms: u64,
    pub double_tap_window_ms: u64,
    pub swipe_threshold_px: f64,
    pub swipe_enabled: bool,
    /// What happens to a trigger arriving mid-transition
    pub busy_policy: BusyPolicy,
    pub classes: ClassNames,
    pub viewport_property: String,
}

impl Default for SlideshowSettings {
    fn default() -> Self {
        Self {
            transition_ms: TRANSITION_DURATION_MS,
            double_tap_window_ms: DOUBLE_TAP_WINDOW_MS,
            swipe_threshold_px: SWIPE_THRESHOLD_PX,
            swipe_enabled: true,
            busy_policy: BusyPolicy::default(),
            classes: ClassNames::default(),
            viewport_property: VIEWPORT_HEIGHT_PROPERTY.to_string(),
        }
    }
}

impl SlideshowSettings {
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn double_tap_window(&self) -> Duration {
        Duration::from_millis(self.double_tap_window_ms)
    }

    /// Reject values the controller cannot work with.
    pub fn validate(&self) -> SlideshowResult<()> {
        if self.transition_ms == 0 {
            return Err(SlideshowError::InvalidSettings(
                "transition_ms must be positive".into(),
            ));
        }
        if self.classes.active.trim().is_empty() || self.classes.outgoing.trim().is_empty() {
            return Err(SlideshowError::InvalidSettings(
                "class names must not be empty".into(),
            ));
        }
        if self.classes.active == self.classes.outgoing {
            return Err(SlideshowError::InvalidSettings(format!(
                "active and outgoing classes are both \"{}\"",
                self.classes.active
            )));
        }
        if self.swipe_threshold_px.is_nan() || self.swipe_threshold_px <= 0.0 {
            return Err(SlideshowError::InvalidSettings(
                "swipe_threshold_px must be positive".into(),
            ));
        }
        if self.viewport_property.trim().is_empty() {
            return Err(SlideshowError::InvalidSettings(
                "viewport_property must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Load from the default location, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load() -> Self {
        let Some(path) = default_settings_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_path(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Falling back to default settings");
                Self::default()
            }
        }
    }

    pub fn load_from_path(path: &Path) -> SlideshowResult<Self> {
        let content = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save_to_path(&self, path: &Path) -> SlideshowResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// `<config dir>/slideshow/settings.json`, if the platform has a config dir.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(SETTINGS_DIR);
        path.push(SETTINGS_FILE);
        path
    })
}
