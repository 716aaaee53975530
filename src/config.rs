//! TOML configuration for controller layout and styling.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use log::{info, warn};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ControllerConfig {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub style: StyleConfig,
}

/// Proportions and spacings of the horizontal controller row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LayoutConfig {
    /// D-pad width as a fraction of the overlay width.
    #[serde(default = "default_dpad_fraction")]
    pub dpad_fraction: f32,
    /// Select/Start column width as a fraction of the overlay width.
    #[serde(default = "default_meta_fraction")]
    pub meta_fraction: f32,
    /// Action button panel width as a fraction of the overlay width.
    #[serde(default = "default_action_fraction")]
    pub action_fraction: f32,
    #[serde(default = "default_spacing")]
    pub spacing: f32,
    #[serde(default = "default_dpad_padding")]
    pub dpad_padding: f32,
    /// How far the D-pad touch grid reaches past the drawn D-pad.
    #[serde(default = "default_touch_overhang")]
    pub touch_overhang: f32,
    #[serde(default = "default_meta_spacing")]
    pub meta_spacing: f32,
    /// Width / height of the Select and Start capsules.
    #[serde(default = "default_meta_aspect")]
    pub meta_aspect: f32,
    #[serde(default = "default_action_spacing")]
    pub action_spacing: f32,
    /// D-pad outline stroke width.
    #[serde(default = "default_line_width")]
    pub line_width: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            dpad_fraction: default_dpad_fraction(),
            meta_fraction: default_meta_fraction(),
            action_fraction: default_action_fraction(),
            spacing: default_spacing(),
            dpad_padding: default_dpad_padding(),
            touch_overhang: default_touch_overhang(),
            meta_spacing: default_meta_spacing(),
            meta_aspect: default_meta_aspect(),
            action_spacing: default_action_spacing(),
            line_width: default_line_width(),
        }
    }
}

/// Colors as `RRGGBB` or `RRGGBBAA` hex strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StyleConfig {
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_dpad_fill")]
    pub dpad_fill: String,
    #[serde(default = "default_outline")]
    pub dpad_stroke: String,
    #[serde(default = "default_meta_fill")]
    pub meta_fill: String,
    #[serde(default = "default_outline")]
    pub meta_stroke: String,
    #[serde(default = "default_action_fill")]
    pub action_fill: String,
    #[serde(default = "default_outline")]
    pub action_stroke: String,
    #[serde(default = "default_label")]
    pub label: String,
    #[serde(default = "default_pressed")]
    pub pressed: String,
    /// Font for button labels. Labels are skipped without one.
    pub font: Option<PathBuf>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        StyleConfig {
            background: default_background(),
            dpad_fill: default_dpad_fill(),
            dpad_stroke: default_outline(),
            meta_fill: default_meta_fill(),
            meta_stroke: default_outline(),
            action_fill: default_action_fill(),
            action_stroke: default_outline(),
            label: default_label(),
            pressed: default_pressed(),
            font: None,
        }
    }
}

impl ControllerConfig {
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path).map_err(|e| format!("read {}: {e}", path.display()))?;
        Self::parse(&content).map_err(|e| format!("parse {}: {e}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Candidate config paths, most specific first:
    /// 1. $ONSCREEN_CONTROLLER_CONFIG env var
    /// 2. ./controller.toml
    pub fn candidates() -> Vec<PathBuf> {
        vec![
            std::env::var("ONSCREEN_CONTROLLER_CONFIG").ok().map(PathBuf::from),
            Some(PathBuf::from("controller.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// First existing candidate that parses, else built-in defaults.
    /// Also returns the path it came from.
    pub fn find_and_load() -> (Self, Option<PathBuf>) {
        for path in Self::candidates() {
            if path.exists() {
                match Self::load(&path) {
                    Ok(config) => {
                        info!("Loaded controller config from {}", path.display());
                        return (config, Some(path));
                    }
                    Err(e) => warn!("Failed to load {}: {e}", path.display()),
                }
            }
        }

        info!("Using built-in default controller config");
        (Self::default(), None)
    }
}

fn default_dpad_fraction() -> f32 { 0.3 }
fn default_meta_fraction() -> f32 { 0.15 }
fn default_action_fraction() -> f32 { 0.35 }
fn default_spacing() -> f32 { 5.0 }
fn default_dpad_padding() -> f32 { 10.0 }
fn default_touch_overhang() -> f32 { 10.0 }
fn default_meta_spacing() -> f32 { 20.0 }
fn default_meta_aspect() -> f32 { 3.0 }
fn default_action_spacing() -> f32 { 8.0 }
fn default_line_width() -> f32 { 12.0 }

fn default_background() -> String { "00000000".into() }
fn default_dpad_fill() -> String { "8E8E93FF".into() }
fn default_outline() -> String { "000000FF".into() }
fn default_meta_fill() -> String { "8E8E93FF".into() }
fn default_action_fill() -> String { "007AFFFF".into() }
fn default_label() -> String { "000000CC".into() }
fn default_pressed() -> String { "FFFFFF66".into() }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
[layout]
dpad_fraction = 0.25
meta_fraction = 0.2
action_fraction = 0.3
line_width = 16.0

[style]
dpad_fill = "444444"
action_fill = "E94560FF"
font = "/tmp/font.ttf"
"#;
        let config = ControllerConfig::parse(toml_str).unwrap();
        assert_eq!(config.layout.dpad_fraction, 0.25);
        assert_eq!(config.layout.line_width, 16.0);
        assert_eq!(config.layout.spacing, 5.0);
        assert_eq!(config.style.dpad_fill, "444444");
        assert_eq!(config.style.meta_fill, "8E8E93FF");
        assert_eq!(config.style.font.as_deref(), Some(Path::new("/tmp/font.ttf")));
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let config = ControllerConfig::parse("").unwrap();
        assert_eq!(config.layout, LayoutConfig::default());
        assert_eq!(config.style, StyleConfig::default());
    }

    #[test]
    fn default_proportions() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.dpad_fraction, 0.3);
        assert_eq!(layout.meta_fraction, 0.15);
        assert_eq!(layout.action_fraction, 0.35);
        assert_eq!(layout.touch_overhang, 10.0);
    }

    #[test]
    fn bad_type_is_an_error() {
        let err = ControllerConfig::parse("[layout]\ndpad_fraction = \"wide\"\n").unwrap_err();
        assert!(!err.is_empty());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ControllerConfig::load(Path::new("/nonexistent/controller.toml")).unwrap_err();
        assert!(err.contains("/nonexistent/controller.toml"));
    }
}
