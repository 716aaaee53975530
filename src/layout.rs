//! Controller layout: one bottom-aligned row of D-pad, Select/Start column
//! and action buttons, plus the touch region rectangles derived from it.
//!
//! Everything here is computed in overlay-local coordinates. Touch space is
//! reached through one explicit [`Transform`] in
//! [`ControllerLayout::region_frames`].

use log::debug;

use crate::buttons::Region;
use crate::config::LayoutConfig;
use crate::geometry::{Rect, Size, Transform};
use crate::mapper::RegionFrames;

/// Drawn element rects and touch regions for one overlay size.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerLayout {
    pub size: Size,
    /// Square the D-pad shape is drawn into.
    pub dpad: Rect,
    /// D-pad square extended by the touch overhang; split 3x3 into regions.
    pub dpad_touch: Rect,
    pub select: Rect,
    pub start: Rect,
    pub b: Rect,
    pub a: Rect,
    pub line_width: f32,
}

impl ControllerLayout {
    pub fn compute(size: Size, config: &LayoutConfig) -> Self {
        let (w, h) = (size.width, size.height);
        let pad = config.dpad_padding;
        let spacing = config.spacing;

        // D-pad keeps its fraction of the width unless the height runs out.
        let side = (w * config.dpad_fraction).min(h - pad * 2.0).max(0.0);
        let row_h = side + pad * 2.0;
        let row_mid = (h - row_h).max(0.0) + row_h / 2.0;

        let dpad = Rect::new(spacing + pad, row_mid - side / 2.0, side, side);
        let dpad_end = spacing + pad * 2.0 + side;

        // Action panel hugs the trailing edge.
        let action_w = w * config.action_fraction;
        let action_x = w - spacing - action_w;

        // Select/Start column sits centered in what is left between them,
        // narrowed so it never reaches into the D-pad grid or the circles.
        // Grid edges snap to whole pixels, so the grid can end half a pixel
        // past `dpad_touch`.
        let dpad_touch = dpad.outset(config.touch_overhang);
        let gap_start = dpad_end.max(dpad_touch.max_x() + 0.5);
        let gap = (action_x - gap_start).max(0.0);
        let meta_w = (w * config.meta_fraction).min(gap);
        let meta_x = gap_start + (gap - meta_w) / 2.0;
        let meta_h = meta_w / config.meta_aspect;
        let meta_top = row_mid - (meta_h * 2.0 + config.meta_spacing) / 2.0;
        let select = Rect::new(meta_x, meta_top, meta_w, meta_h);
        let start = Rect::new(meta_x, meta_top + meta_h + config.meta_spacing, meta_w, meta_h);

        let diameter = ((action_w - config.action_spacing) / 2.0).min(row_h).max(0.0);
        let circles_x = (action_x + (action_w - (diameter * 2.0 + config.action_spacing)) / 2.0).max(action_x);
        let b = Rect::new(circles_x, row_mid - diameter / 2.0, diameter, diameter);
        let a = Rect::new(circles_x + diameter + config.action_spacing, b.y, diameter, diameter);

        let layout = ControllerLayout {
            size,
            dpad,
            dpad_touch,
            select,
            start,
            b,
            a,
            line_width: config.line_width,
        };
        debug!("Layout for {}x{}: dpad={:?}", w, h, layout.dpad);
        layout
    }

    /// One cell of the D-pad touch grid.
    pub fn dpad_cell(&self, row: usize, col: usize) -> Rect {
        grid_cell(&self.dpad_touch, row, col)
    }

    /// Rect of a region in overlay-local coordinates.
    pub fn region_rect(&self, region: Region) -> Rect {
        match region {
            Region::Select => self.select,
            Region::Start => self.start,
            Region::B => self.b,
            Region::A => self.a,
            dpad => match grid_position(dpad) {
                Some((row, col)) => self.dpad_cell(row, col),
                None => Rect::default(),
            },
        }
    }

    /// All 13 region rects mapped into touch space.
    ///
    /// The D-pad grid is split after the transform, so neighbouring cells
    /// still share exact edges in touch space.
    pub fn region_frames(&self, to_touch_space: &Transform) -> RegionFrames {
        let touch_grid = to_touch_space.apply_rect(&self.dpad_touch);
        Region::ALL
            .iter()
            .map(|r| {
                let rect = match grid_position(*r) {
                    Some((row, col)) => grid_cell(&touch_grid, row, col),
                    None => to_touch_space.apply_rect(&self.region_rect(*r)),
                };
                (*r, rect)
            })
            .collect()
    }
}

fn grid_position(region: Region) -> Option<(usize, usize)> {
    Region::DPAD_GRID.iter().enumerate().find_map(|(row, cells)| {
        cells.iter().position(|r| *r == region).map(|col| (row, col))
    })
}

/// Whole-pixel edges of three equal spans over `[min, min + len)`.
fn thirds(min: f32, len: f32) -> [f32; 4] {
    let lo = min.round();
    let hi = (min + len).round();
    let span = hi - lo;
    [lo, (lo + span / 3.0).round(), (lo + span * 2.0 / 3.0).round(), hi]
}

/// Cell of a 3x3 grid over `area`. Edges are whole pixels, so a cell's max
/// edge is the same f32 as its neighbour's min edge.
fn grid_cell(area: &Rect, row: usize, col: usize) -> Rect {
    let xs = thirds(area.x, area.width);
    let ys = thirds(area.y, area.height);
    Rect::new(xs[col], ys[row], xs[col + 1] - xs[col], ys[row + 1] - ys[row])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn overlaps(a: &Rect, b: &Rect) -> bool {
        a.min_x() < b.max_x() && b.min_x() < a.max_x() && a.min_y() < b.max_y() && b.min_y() < a.max_y()
    }

    fn landscape() -> ControllerLayout {
        ControllerLayout::compute(Size::new(844.0, 390.0), &LayoutConfig::default())
    }

    fn portrait() -> ControllerLayout {
        ControllerLayout::compute(Size::new(390.0, 844.0), &LayoutConfig::default())
    }

    #[test]
    fn dpad_takes_its_fraction_of_the_width() {
        let layout = landscape();
        assert!((layout.dpad.width - 844.0 * 0.3).abs() < 1e-3);
        assert_eq!(layout.dpad.width, layout.dpad.height);
        assert!((layout.select.width - 844.0 * 0.15).abs() < 1e-3);
    }

    #[test]
    fn dpad_shrinks_to_fit_short_overlays() {
        let layout = ControllerLayout::compute(Size::new(1000.0, 200.0), &LayoutConfig::default());
        assert_eq!(layout.dpad.height, 180.0);
    }

    #[test]
    fn row_is_bottom_aligned() {
        for layout in [landscape(), portrait()] {
            assert!((layout.dpad.max_y() + 10.0 - layout.size.height).abs() < 1e-3);
        }
    }

    const SIZES: [(f32, f32); 9] = [
        (844.0, 390.0),
        (390.0, 844.0),
        (667.0, 375.0),
        (375.0, 667.0),
        (1366.0, 1024.0),
        (1000.0, 200.0),
        (333.3, 777.7),
        (120.0, 300.0),
        (97.0, 61.0),
    ];

    const ORIGINS: [(f32, f32); 3] = [(0.0, 0.0), (0.0, 454.0), (12.3, 0.7)];

    fn assert_disjoint(frames: &RegionFrames, context: &str) {
        let all: Vec<(Region, Rect)> = frames.iter().map(|(r, rect)| (r, *rect)).collect();
        for (i, (ra, a)) in all.iter().enumerate() {
            for (rb, b) in &all[i + 1..] {
                assert!(!overlaps(a, b), "{context}: {ra:?} {a:?} overlaps {rb:?} {b:?}");
            }
        }
    }

    #[test]
    fn regions_do_not_overlap() {
        for (w, h) in SIZES {
            let layout = ControllerLayout::compute(Size::new(w, h), &LayoutConfig::default());
            for (ox, oy) in ORIGINS {
                let frames = layout.region_frames(&Transform::translate(ox, oy));
                assert_eq!(frames.len(), 13);
                assert_disjoint(&frames, &format!("{w}x{h} at ({ox}, {oy})"));
            }
        }
    }

    #[test]
    fn shared_grid_edges_belong_to_the_cell_starting_there() {
        for (w, h) in SIZES {
            let layout = ControllerLayout::compute(Size::new(w, h), &LayoutConfig::default());
            for (ox, oy) in ORIGINS {
                let frames = layout.region_frames(&Transform::translate(ox, oy));
                for row in 0..3 {
                    for col in 0..3 {
                        let region = Region::DPAD_GRID[row][col];
                        let cell = *frames.get(region).unwrap();
                        if cell.width == 0.0 || cell.height == 0.0 {
                            continue;
                        }
                        if col > 0 {
                            let left = frames.get(Region::DPAD_GRID[row][col - 1]).unwrap();
                            assert_eq!(left.max_x(), cell.min_x());
                        }
                        if row > 0 {
                            let above = frames.get(Region::DPAD_GRID[row - 1][col]).unwrap();
                            assert_eq!(above.max_y(), cell.min_y());
                        }
                        assert_eq!(frames.hit_test(cell.origin()), Some(region), "{w}x{h} {region:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn down_left_edge_in_portrait_hits_down_left() {
        let layout = portrait();
        let frames = layout.region_frames(&Transform::identity());
        let down_left = frames.get(Region::DownLeft).unwrap();
        let p = Point::new(down_left.mid_x(), down_left.min_y());
        assert!(!frames.get(Region::Left).unwrap().contains(p));
        assert_eq!(frames.hit_test(p), Some(Region::DownLeft));
    }

    #[test]
    fn narrow_overlay_keeps_select_clear_of_the_dpad() {
        let layout = ControllerLayout::compute(Size::new(120.0, 300.0), &LayoutConfig::default());
        let frames = layout.region_frames(&Transform::identity());
        let right = frames.get(Region::Right).unwrap();
        assert!(layout.select.min_x() >= right.max_x());
        assert!(layout.select.max_x() <= layout.b.min_x());
        let p = Point::new(layout.select.min_x(), layout.select.mid_y());
        assert_eq!(frames.hit_test(p), Some(Region::Select));
    }

    #[test]
    fn touch_grid_extends_past_the_dpad() {
        let layout = landscape();
        let up_left = layout.region_rect(Region::UpLeft);
        let down_right = layout.region_rect(Region::DownRight);
        // Grid edges snap to whole pixels.
        assert!((up_left.x - (layout.dpad.x - 10.0)).abs() <= 0.5);
        assert!((down_right.max_x() - (layout.dpad.max_x() + 10.0)).abs() <= 0.5);
        let center = layout.region_rect(Region::Center).center();
        assert!((center.x - layout.dpad.mid_x()).abs() <= 1.0);
        assert!((center.y - layout.dpad.mid_y()).abs() <= 1.0);
    }

    #[test]
    fn elements_stay_ordered_left_to_right() {
        for layout in [landscape(), portrait()] {
            assert!(layout.dpad_touch.max_x() <= layout.select.min_x());
            assert!(layout.select.max_x() <= layout.b.min_x());
            assert!(layout.b.max_x() < layout.a.min_x());
            assert!(layout.a.max_x() <= layout.size.width);
        }
    }

    #[test]
    fn frames_follow_the_transform() {
        let layout = portrait();
        let local = layout.region_rect(Region::A);
        let frames = layout.region_frames(&Transform::translate(0.0, 100.0));
        let moved = frames.get(Region::A).unwrap();
        assert_eq!(moved.origin(), Point::new(local.x, local.y + 100.0));
    }
}
