//! Engine configuration
//!
//! All thresholds the gesture engine consults live here, already scaled to
//! physical pixels by the host (density-dependent values carry a `_px`
//! suffix). Defaults mirror common phone-sized values. Configs can be
//! loaded from and saved to YAML files.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Effective layout direction, resolved once at engine construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutDirection {
    LeftToRight,
    RightToLeft,
}

impl LayoutDirection {
    pub fn is_ltr(&self) -> bool {
        matches!(self, LayoutDirection::LeftToRight)
    }

    /// Resolve the direction from a BCP 47 locale tag (e.g. "en-US", "ar")
    ///
    /// Only the primary language subtag is inspected.
    pub fn from_locale(tag: &str) -> Self {
        let language = tag
            .split(|c| c == '-' || c == '_')
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        match language.as_str() {
            "ar" | "he" | "iw" | "fa" | "ur" | "yi" | "ji" | "ps" | "sd" | "dv" => {
                LayoutDirection::RightToLeft
            }
            _ => LayoutDirection::LeftToRight,
        }
    }
}

impl Default for LayoutDirection {
    fn default() -> Self {
        LayoutDirection::LeftToRight
    }
}

/// Tunable thresholds and durations for the panels engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelsConfig {
    /// Horizontal distance a pointer must travel before a pan is claimed
    #[serde(default = "default_scroll_slop_px")]
    pub scroll_slop_px: f32,

    /// Height of the bottom strip reserved for the system home gesture
    #[serde(default = "default_home_gesture_from_bottom_px")]
    pub home_gesture_from_bottom_px: f32,

    /// Release speed above which a gesture resolves as a fling
    #[serde(default = "default_min_fling_px_per_second")]
    pub min_fling_px_per_second: f32,

    /// Gap kept between the center panel and a fully-open side panel
    #[serde(default = "default_margin_between_panels_px")]
    pub margin_between_panels_px: f32,

    /// Width of the center panel strip still visible while a side panel is open
    #[serde(default = "default_closed_center_panel_visible_width_px")]
    pub closed_center_panel_visible_width_px: f32,

    /// Optional cap on the computed non-full-screen side panel width
    #[serde(default)]
    pub max_side_panel_width_px: Option<f32>,

    /// Physical pixels per device-independent pixel; the drag jitter filter
    /// ignores normalized moves smaller than one dip
    #[serde(default = "default_density")]
    pub density: f32,

    /// Side panel open animation duration
    #[serde(default = "default_open_duration_ms")]
    pub open_duration_ms: u64,

    /// Side panel close animation duration
    #[serde(default = "default_close_duration_ms")]
    pub close_duration_ms: u64,

    /// Whether the platform can deliver system back/home gestures from the
    /// bottom edge; when false the bottom strip is not reserved
    #[serde(default)]
    pub system_gesture_navigation: bool,
}

fn default_scroll_slop_px() -> f32 {
    8.0
}

fn default_home_gesture_from_bottom_px() -> f32 {
    64.0
}

fn default_min_fling_px_per_second() -> f32 {
    400.0
}

fn default_margin_between_panels_px() -> f32 {
    16.0
}

fn default_closed_center_panel_visible_width_px() -> f32 {
    48.0
}

fn default_density() -> f32 {
    1.0
}

fn default_open_duration_ms() -> u64 {
    250
}

fn default_close_duration_ms() -> u64 {
    200
}

impl Default for PanelsConfig {
    fn default() -> Self {
        Self {
            scroll_slop_px: default_scroll_slop_px(),
            home_gesture_from_bottom_px: default_home_gesture_from_bottom_px(),
            min_fling_px_per_second: default_min_fling_px_per_second(),
            margin_between_panels_px: default_margin_between_panels_px(),
            closed_center_panel_visible_width_px: default_closed_center_panel_visible_width_px(),
            max_side_panel_width_px: None,
            density: default_density(),
            open_duration_ms: default_open_duration_ms(),
            close_duration_ms: default_close_duration_ms(),
            system_gesture_navigation: false,
        }
    }
}

impl PanelsConfig {
    /// Parse a config from a YAML string
    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(content).context("failed to parse panels config")
    }

    /// Load a config from a YAML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Save the config as YAML
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self).context("failed to serialize panels config")?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        tracing::info!(target: "panels", "saved config to {}", path.display());
        Ok(())
    }
}
