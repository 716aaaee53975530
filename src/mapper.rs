//! Touch points + region frames -> full button state.
//!
//! The result is always the complete state of all eight buttons. Callers
//! redeliver every state on every update instead of diffing against the
//! previous one, so a missed transition can never leave a button stuck.

use std::collections::BTreeMap;

use crate::buttons::{Button, Region};
use crate::geometry::{Point, Rect};

/// Region rectangles in touch space, at most one per region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionFrames {
    frames: BTreeMap<Region, Rect>,
}

impl RegionFrames {
    pub fn new() -> Self {
        RegionFrames { frames: BTreeMap::new() }
    }

    /// Record a region's rect. A later write for the same region wins.
    pub fn insert(&mut self, region: Region, rect: Rect) {
        self.frames.insert(region, rect);
    }

    pub fn get(&self, region: Region) -> Option<&Rect> {
        self.frames.get(&region)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Region, &Rect)> {
        self.frames.iter().map(|(r, rect)| (*r, rect))
    }

    /// First region (in `Region` order) whose rect contains `p`.
    pub fn hit_test(&self, p: Point) -> Option<Region> {
        self.frames
            .iter()
            .find(|(_, rect)| rect.contains(p))
            .map(|(region, _)| *region)
    }
}

impl FromIterator<(Region, Rect)> for RegionFrames {
    fn from_iter<I: IntoIterator<Item = (Region, Rect)>>(iter: I) -> Self {
        let mut frames = RegionFrames::new();
        for (region, rect) in iter {
            frames.insert(region, rect);
        }
        frames
    }
}

/// Pressed state of every [`Button`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonStates {
    pressed: [bool; 8],
}

impl ButtonStates {
    pub fn released() -> Self {
        ButtonStates::default()
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.pressed[button.index()]
    }

    pub fn set(&mut self, button: Button, pressed: bool) {
        self.pressed[button.index()] = pressed;
    }

    /// Buttons that are on, in `Button::ALL` order.
    pub fn pressed(&self) -> impl Iterator<Item = Button> + '_ {
        Button::ALL.into_iter().filter(|b| self.is_pressed(*b))
    }

    /// Buttons that are off, in `Button::ALL` order.
    pub fn released_buttons(&self) -> impl Iterator<Item = Button> + '_ {
        Button::ALL.into_iter().filter(|b| !self.is_pressed(*b))
    }

    /// Every button with its state: on-set first, then off-set.
    pub fn deliveries(&self) -> impl Iterator<Item = (Button, bool)> + '_ {
        self.pressed()
            .map(|b| (b, true))
            .chain(self.released_buttons().map(|b| (b, false)))
    }
}

/// Union of the buttons of every region touched by any point.
pub fn compute_button_states(points: &[Point], frames: &RegionFrames) -> ButtonStates {
    let mut states = ButtonStates::released();
    for region in points.iter().filter_map(|p| frames.hit_test(*p)) {
        for button in region.buttons() {
            states.set(*button, true);
        }
    }
    states
}
