//! Resolved colors and label font for the controller.

use std::fmt;
use std::path::Path;

use log::warn;

use crate::config::StyleConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            6 => Some(Color::rgba(channel(0)?, channel(2)?, channel(4)?, 255)),
            8 => Some(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Color { a, ..self }
    }

    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub dpad_fill: Color,
    pub dpad_stroke: Color,
    pub meta_fill: Color,
    pub meta_stroke: Color,
    pub action_fill: Color,
    pub action_stroke: Color,
    pub label: Color,
    pub pressed: Color,
}

impl Palette {
    /// Resolve config colors, falling back to the defaults for anything
    /// that does not parse.
    pub fn from_config(style: &StyleConfig) -> Self {
        let defaults = StyleConfig::default();
        let get_color = |key: &str, value: &str, default: &str| -> Color {
            Color::from_hex(value).unwrap_or_else(|| {
                warn!("Invalid color {key} = {value:?}, using {default}");
                Color::from_hex(default).unwrap_or(Color::rgba(0, 0, 0, 255))
            })
        };

        Palette {
            background: get_color("background", &style.background, &defaults.background),
            dpad_fill: get_color("dpad_fill", &style.dpad_fill, &defaults.dpad_fill),
            dpad_stroke: get_color("dpad_stroke", &style.dpad_stroke, &defaults.dpad_stroke),
            meta_fill: get_color("meta_fill", &style.meta_fill, &defaults.meta_fill),
            meta_stroke: get_color("meta_stroke", &style.meta_stroke, &defaults.meta_stroke),
            action_fill: get_color("action_fill", &style.action_fill, &defaults.action_fill),
            action_stroke: get_color("action_stroke", &style.action_stroke, &defaults.action_stroke),
            label: get_color("label", &style.label, &defaults.label),
            pressed: get_color("pressed", &style.pressed, &defaults.pressed),
        }
    }
}

/// Load a label font, or `None` (labels are then not drawn).
pub fn load_font(path: &Path) -> Option<fontdue::Font> {
    match std::fs::read(path) {
        Ok(data) => match fontdue::Font::from_bytes(data, fontdue::FontSettings::default()) {
            Ok(font) => Some(font),
            Err(e) => {
                warn!("Failed to parse font {}: {e}, labels disabled", path.display());
                None
            }
        },
        Err(e) => {
            warn!("Failed to read font {}: {e}, labels disabled", path.display());
            None
        }
    }
}
