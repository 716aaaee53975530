//! D-pad silhouette: a plus sign traced as one closed outline, with a round
//! divot in the middle.

use std::f32::consts::PI;

use tiny_skia::{Path, PathBuilder};

use crate::buttons::Button;
use crate::geometry::{Point, Rect, Transform};

/// Cubic bezier handle length for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

/// Side of the neutral inner square and how far each arm sticks out of it.
fn proportions(rect: &Rect, line_width: f32) -> (f32, f32) {
    let min_side = rect.width.min(rect.height);
    let inner = min_side / 3.0;
    (inner, inner - line_width / 2.0)
}

/// The twelve outline corners, clockwise from the top-left of the up arm,
/// centered in `rect`. The stroke of `line_width` stays inside `rect`.
pub fn dpad_outline(rect: &Rect, line_width: f32) -> Vec<Point> {
    let (inner, protrudance) = proportions(rect, line_width);

    // Up, right, back down: one arm. Rotating it about each corner of the
    // inner square traces the whole plus.
    let segment = [
        Point::new(0.0, -protrudance),
        Point::new(inner, -protrudance),
        Point::new(inner, 0.0),
    ];
    let turns = [
        Transform::identity(),
        Transform::rotate_then_translate(PI / 2.0, inner, 0.0),
        Transform::rotate_then_translate(PI, inner, inner),
        Transform::rotate_then_translate(PI * 3.0 / 2.0, 0.0, inner),
    ];
    let raw: Vec<Point> = turns
        .iter()
        .flat_map(|t| segment.iter().map(move |p| t.apply(*p)))
        .collect();

    let Some(bounds) = Rect::bounding(&raw) else {
        return raw;
    };
    let shift = Transform::translate(rect.mid_x() - bounds.mid_x(), rect.mid_y() - bounds.mid_y());
    raw.into_iter().map(|p| shift.apply(p)).collect()
}

/// Bounds of the circular divot.
pub fn dpad_divot(rect: &Rect) -> Rect {
    let d = rect.width.min(rect.height) / 4.0;
    Rect::from_center(rect.center(), d, d)
}

/// Rectangle of one arm, for pressed highlighting. `None` for buttons that
/// are not directions.
pub fn dpad_arm(rect: &Rect, line_width: f32, direction: Button) -> Option<Rect> {
    let (inner, p) = proportions(rect, line_width);
    let x = rect.mid_x() - inner / 2.0;
    let y = rect.mid_y() - inner / 2.0;
    match direction {
        Button::Up => Some(Rect::new(x, y - p, inner, p)),
        Button::Down => Some(Rect::new(x, y + inner, inner, p)),
        Button::Left => Some(Rect::new(x - p, y, p, inner)),
        Button::Right => Some(Rect::new(x + inner, y, p, inner)),
        _ => None,
    }
}

/// Outline plus divot as one tiny-skia path. Fill with `EvenOdd` to cut the
/// divot out.
pub fn dpad_path(rect: &Rect, line_width: f32) -> Option<Path> {
    let outline = dpad_outline(rect, line_width);
    let (first, rest) = outline.split_first()?;

    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);
    for p in rest {
        pb.line_to(p.x, p.y);
    }
    pb.close();

    let divot = dpad_divot(rect);
    push_circle(&mut pb, divot.mid_x(), divot.mid_y(), divot.width / 2.0);
    pb.finish()
}

/// Capsule (stadium) filling `rect`, rounded along its shorter side.
pub fn capsule_path(rect: &Rect) -> Option<Path> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);
    let r = w.min(h) / 2.0;
    let k = KAPPA * r;
    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.cubic_to(x + w - r + k, y, x + w, y + r - k, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.cubic_to(x + w, y + h - r + k, x + w - r + k, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.cubic_to(x + r - k, y + h, x, y + h - r + k, x, y + h - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    pb.close();
    pb.finish()
}

pub fn circle_path(cx: f32, cy: f32, radius: f32) -> Option<Path> {
    let mut pb = PathBuilder::new();
    push_circle(&mut pb, cx, cy, radius);
    pb.finish()
}

fn push_circle(pb: &mut PathBuilder, cx: f32, cy: f32, radius: f32) {
    let kr = KAPPA * radius;
    pb.move_to(cx, cy - radius);
    pb.cubic_to(cx + kr, cy - radius, cx + radius, cy - kr, cx + radius, cy);
    pb.cubic_to(cx + radius, cy + kr, cx + kr, cy + radius, cx, cy + radius);
    pb.cubic_to(cx - kr, cy + radius, cx - radius, cy + kr, cx - radius, cy);
    pb.cubic_to(cx - radius, cy - kr, cx - kr, cy - radius, cx, cy - radius);
    pb.close();
}
