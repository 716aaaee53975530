//! Rasterizes the controller into an ARGB buffer.
//!
//! D-pad: thick outline stroke under a gray fill with the divot cut out.
//! Select/Start: thin-stroked capsules with caption labels. B/A: accent
//! circles with large letters. Pressed buttons get a translucent highlight.

use tiny_skia::*;

use crate::buttons::Button;
use crate::config::StyleConfig;
use crate::geometry;
use crate::layout::ControllerLayout;
use crate::mapper::ButtonStates;
use crate::shape;
use crate::style::{self, Color as Color8, Palette};

const META_STROKE_WIDTH: f32 = 0.5;
const ACTION_STROKE_WIDTH: f32 = 1.0;

pub struct Renderer {
    palette: Palette,
    font: Option<fontdue::Font>,
}

impl Renderer {
    pub fn new(config: &StyleConfig) -> Self {
        Renderer {
            palette: Palette::from_config(config),
            font: config.font.as_deref().and_then(style::load_font),
        }
    }

    /// Render the whole overlay. Empty for a zero-sized layout.
    pub fn render(&self, layout: &ControllerLayout, states: &ButtonStates) -> Vec<u32> {
        match self.render_pixmap(layout, states) {
            Some(pixmap) => pixmap_to_argb(&pixmap),
            None => {
                log::warn!("Cannot render {}x{} overlay", layout.size.width, layout.size.height);
                Vec::new()
            }
        }
    }

    pub fn render_pixmap(&self, layout: &ControllerLayout, states: &ButtonStates) -> Option<Pixmap> {
        let w = layout.size.width.round() as u32;
        let h = layout.size.height.round() as u32;
        let mut pixmap = Pixmap::new(w, h)?;
        pixmap.fill(self.palette.background.to_skia());

        self.draw_dpad(&mut pixmap, layout, states);

        let meta = [(Button::Select, layout.select, "Select"), (Button::Start, layout.start, "Start")];
        for (button, rect, title) in meta {
            self.draw_meta_button(&mut pixmap, &rect, title, states.is_pressed(button));
        }

        let action = [(Button::B, layout.b, "B"), (Button::A, layout.a, "A")];
        for (button, rect, title) in action {
            self.draw_action_button(&mut pixmap, &rect, title, states.is_pressed(button));
        }

        Some(pixmap)
    }

    // ── D-pad ───────────────────────────────────────────────

    fn draw_dpad(&self, pixmap: &mut Pixmap, layout: &ControllerLayout, states: &ButtonStates) {
        let Some(path) = shape::dpad_path(&layout.dpad, layout.line_width) else {
            return;
        };

        let stroke = Stroke { width: layout.line_width, ..Stroke::default() };
        pixmap.stroke_path(&path, &solid(self.palette.dpad_stroke), &stroke, Transform::identity(), None);
        pixmap.fill_path(&path, &solid(self.palette.dpad_fill), FillRule::EvenOdd, Transform::identity(), None);

        for direction in states.pressed().filter(|b| b.is_direction()) {
            if let Some(arm) = shape::dpad_arm(&layout.dpad, layout.line_width, direction) {
                fill_rect(pixmap, &arm, self.palette.pressed);
            }
        }
    }

    // ── Select / Start ──────────────────────────────────────

    fn draw_meta_button(&self, pixmap: &mut Pixmap, rect: &geometry::Rect, title: &str, pressed: bool) {
        let Some(path) = shape::capsule_path(rect) else {
            return;
        };
        pixmap.fill_path(&path, &solid(self.palette.meta_fill), FillRule::Winding, Transform::identity(), None);
        if pressed {
            pixmap.fill_path(&path, &solid(self.palette.pressed), FillRule::Winding, Transform::identity(), None);
        }
        let stroke = Stroke { width: META_STROKE_WIDTH, ..Stroke::default() };
        pixmap.stroke_path(&path, &solid(self.palette.meta_stroke), &stroke, Transform::identity(), None);

        self.draw_centered_label(pixmap, rect, title, rect.height * 0.5, self.palette.label);
    }

    // ── B / A ───────────────────────────────────────────────

    fn draw_action_button(&self, pixmap: &mut Pixmap, rect: &geometry::Rect, title: &str, pressed: bool) {
        let Some(path) = shape::circle_path(rect.mid_x(), rect.mid_y(), rect.width / 2.0) else {
            return;
        };
        pixmap.fill_path(&path, &solid(self.palette.action_fill), FillRule::Winding, Transform::identity(), None);
        if pressed {
            pixmap.fill_path(&path, &solid(self.palette.pressed), FillRule::Winding, Transform::identity(), None);
        }
        let stroke = Stroke { width: ACTION_STROKE_WIDTH, ..Stroke::default() };
        pixmap.stroke_path(&path, &solid(self.palette.action_stroke), &stroke, Transform::identity(), None);

        let label = self.palette.label;
        let faded = label.with_alpha((label.a as f32 * 0.8) as u8);
        self.draw_centered_label(pixmap, rect, title, rect.height * 0.45, faded);
    }

    fn draw_centered_label(&self, pixmap: &mut Pixmap, rect: &geometry::Rect, text: &str, size: f32, c: Color8) {
        let Some(font) = &self.font else {
            return;
        };
        let tw = measure_text(font, text, size);
        let x = rect.mid_x() - tw / 2.0;
        let y = text_center_y(font, size, rect.y, rect.height);
        rasterize_text(pixmap, text, font, size, x, y, c);
    }
}

// ── Drawing helpers ─────────────────────────────────────────

fn solid(c: Color8) -> Paint<'static> {
    Paint {
        shader: Shader::SolidColor(c.to_skia()),
        anti_alias: true,
        ..Paint::default()
    }
}

fn fill_rect(pixmap: &mut Pixmap, rect: &geometry::Rect, c: Color8) {
    if c.a == 0 {
        return;
    }
    if let Some(r) = rect.to_skia() {
        pixmap.fill_rect(r, &solid(c), Transform::identity(), None);
    }
}

/// Rasterize text with y = top of text em-box (not baseline).
fn rasterize_text(pixmap: &mut Pixmap, text: &str, font: &fontdue::Font, size: f32, x: f32, y: f32, c: Color8) {
    if c.a == 0 {
        return;
    }
    let pw = pixmap.width() as i32;
    let ph = pixmap.height() as i32;
    let data = pixmap.data_mut();

    let ascent = font.horizontal_line_metrics(size).map(|lm| lm.ascent).unwrap_or(size * 0.8);
    let baseline_y = y + ascent;

    let mut cursor_x = x;
    for ch in text.chars() {
        let (metrics, bitmap) = font.rasterize(ch, size);
        let gx = cursor_x as i32 + metrics.xmin;
        let gy = baseline_y as i32 - metrics.ymin - metrics.height as i32;

        for row in 0..metrics.height {
            for col in 0..metrics.width {
                let px = gx + col as i32;
                let py = gy + row as i32;
                if px < 0 || py < 0 || px >= pw || py >= ph {
                    continue;
                }
                let coverage = bitmap[row * metrics.width + col];
                if coverage == 0 {
                    continue;
                }
                let alpha = (coverage as u32 * c.a as u32) / 255;
                let inv = 255 - alpha;
                let idx = ((py as u32 * pw as u32 + px as u32) * 4) as usize;
                data[idx] = ((c.r as u32 * alpha + data[idx] as u32 * inv) / 255) as u8;
                data[idx + 1] = ((c.g as u32 * alpha + data[idx + 1] as u32 * inv) / 255) as u8;
                data[idx + 2] = ((c.b as u32 * alpha + data[idx + 2] as u32 * inv) / 255) as u8;
                data[idx + 3] = (alpha + data[idx + 3] as u32 * inv / 255).min(255) as u8;
            }
        }
        cursor_x += metrics.advance_width;
    }
}

fn text_height(font: &fontdue::Font, size: f32) -> f32 {
    font.horizontal_line_metrics(size).map(|lm| lm.ascent - lm.descent).unwrap_or(size)
}

fn text_center_y(font: &fontdue::Font, size: f32, container_y: f32, container_h: f32) -> f32 {
    container_y + (container_h - text_height(font, size)) / 2.0
}

pub fn measure_text(font: &fontdue::Font, text: &str, size: f32) -> f32 {
    text.chars().map(|ch| font.metrics(ch, size).advance_width).sum()
}

pub fn pixmap_to_argb(pixmap: &Pixmap) -> Vec<u32> {
    pixmap
        .data()
        .chunks_exact(4)
        .map(|px| (px[3] as u32) << 24 | (px[0] as u32) << 16 | (px[1] as u32) << 8 | px[2] as u32)
        .collect()
}
