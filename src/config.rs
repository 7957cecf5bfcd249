//! Tunables shared by the widgets.
//!
//! Pages may override any of them by embedding a JSON object in
//! `<script type="application/json" id="feed-widgets-config">`. Nothing here is
//! persisted.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WidgetError};

/// Id of the optional script element carrying a [`WidgetSettings`] override.
pub const SETTINGS_ELEMENT_ID: &str = "feed-widgets-config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSettings {
    /// Minimum travel (css px) before a swipe or drag counts as navigation.
    pub swipe_threshold: f64,
    /// How long a reel transition blocks further reel navigation.
    pub transition_lock_ms: u32,
    /// Visible fraction at which media starts playing.
    pub visibility_threshold: f64,
    pub visibility_root_margin: String,
    pub mute_indicator_ms: u32,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            swipe_threshold: 50.0,
            transition_lock_ms: 500,
            visibility_threshold: 0.5,
            visibility_root_margin: "0px 0px -10% 0px".to_string(),
            mute_indicator_ms: 2000,
        }
    }
}

impl WidgetSettings {
    /// Parse a (possibly partial) settings object. Missing fields keep their
    /// defaults; out-of-range values are clamped.
    pub fn from_json(raw: &str) -> Result<Self> {
        let settings: Self =
            serde_json::from_str(raw).map_err(|e| WidgetError::Config(e.to_string()))?;
        Ok(settings.normalized())
    }

    fn normalized(mut self) -> Self {
        if !self.swipe_threshold.is_finite() || self.swipe_threshold < 0.0 {
            self.swipe_threshold = Self::default().swipe_threshold;
        }
        if !self.visibility_threshold.is_finite() {
            self.visibility_threshold = Self::default().visibility_threshold;
        }
        self.visibility_threshold = self.visibility_threshold.clamp(0.0, 1.0);
        if self.visibility_root_margin.trim().is_empty() {
            self.visibility_root_margin = Self::default().visibility_root_margin;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_widget_timings() {
        let settings = WidgetSettings::default();
        assert_eq!(settings.swipe_threshold, 50.0);
        assert_eq!(settings.transition_lock_ms, 500);
        assert_eq!(settings.visibility_threshold, 0.5);
        assert_eq!(settings.visibility_root_margin, "0px 0px -10% 0px");
        assert_eq!(settings.mute_indicator_ms, 2000);
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let settings = WidgetSettings::from_json(r#"{ "transition_lock_ms": 800 }"#).unwrap();
        assert_eq!(settings.transition_lock_ms, 800);
        assert_eq!(settings.swipe_threshold, 50.0);
        assert_eq!(settings.mute_indicator_ms, 2000);
    }

    #[test]
    fn out_of_range_values_are_normalized() {
        let settings = WidgetSettings::from_json(
            r#"{ "swipe_threshold": -4, "visibility_threshold": 3.0, "visibility_root_margin": " " }"#,
        )
        .unwrap();
        assert_eq!(settings.swipe_threshold, 50.0);
        assert_eq!(settings.visibility_threshold, 1.0);
        assert_eq!(settings.visibility_root_margin, "0px 0px -10% 0px");
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        let err = WidgetSettings::from_json("{ nope").unwrap_err();
        assert!(matches!(err, WidgetError::Config(_)));
    }
}
