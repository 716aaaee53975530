//! The controller view: owns the per-button callbacks and wires layout and
//! touch input through the mapper.
//!
//! Two input streams drive it: region frames (from [`layout_changed`] or an
//! external layout pass) and touch points (raw touch events or ready-made
//! point lists). Every touch update redelivers all eight button states.
//!
//! [`layout_changed`]: OnscreenController::layout_changed

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};

use crate::buttons::Button;
use crate::config::LayoutConfig;
use crate::geometry::{Point, Rect, Transform};
use crate::layout::ControllerLayout;
use crate::mapper::{compute_button_states, ButtonStates, RegionFrames};
use crate::touch::{Touch, TouchPhase, TouchTracker};

pub type Handler = Box<dyn FnMut(bool)>;

/// One callback per button, called with `true` for pressed.
pub struct ButtonHandlers {
    pub up: Handler,
    pub down: Handler,
    pub left: Handler,
    pub right: Handler,
    pub select: Handler,
    pub start: Handler,
    pub b: Handler,
    pub a: Handler,
}

impl ButtonHandlers {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        up: impl FnMut(bool) + 'static,
        down: impl FnMut(bool) + 'static,
        left: impl FnMut(bool) + 'static,
        right: impl FnMut(bool) + 'static,
        select: impl FnMut(bool) + 'static,
        start: impl FnMut(bool) + 'static,
        b: impl FnMut(bool) + 'static,
        a: impl FnMut(bool) + 'static,
    ) -> Self {
        ButtonHandlers {
            up: Box::new(up),
            down: Box::new(down),
            left: Box::new(left),
            right: Box::new(right),
            select: Box::new(select),
            start: Box::new(start),
            b: Box::new(b),
            a: Box::new(a),
        }
    }

    /// Route every button to one shared callback. State the callback
    /// captures is shared by all eight buttons.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnMut(Button, bool) + 'static,
    {
        let shared = Rc::new(RefCell::new(f));
        let route = |button: Button| {
            let f = Rc::clone(&shared);
            move |pressed: bool| (&mut *f.borrow_mut())(button, pressed)
        };
        ButtonHandlers::new(
            route(Button::Up),
            route(Button::Down),
            route(Button::Left),
            route(Button::Right),
            route(Button::Select),
            route(Button::Start),
            route(Button::B),
            route(Button::A),
        )
    }

    fn get_mut(&mut self, button: Button) -> &mut Handler {
        match button {
            Button::Up => &mut self.up,
            Button::Down => &mut self.down,
            Button::Left => &mut self.left,
            Button::Right => &mut self.right,
            Button::Select => &mut self.select,
            Button::Start => &mut self.start,
            Button::B => &mut self.b,
            Button::A => &mut self.a,
        }
    }
}

pub struct OnscreenController {
    handlers: ButtonHandlers,
    config: LayoutConfig,
    tracker: TouchTracker,
    touch_points: Vec<Point>,
    region_frames: RegionFrames,
    layout: Option<ControllerLayout>,
    bounds: Rect,
}

impl OnscreenController {
    pub fn new(handlers: ButtonHandlers) -> Self {
        Self::with_config(handlers, LayoutConfig::default())
    }

    pub fn with_config(handlers: ButtonHandlers, config: LayoutConfig) -> Self {
        OnscreenController {
            handlers,
            config,
            tracker: TouchTracker::new(),
            touch_points: Vec::new(),
            region_frames: RegionFrames::new(),
            layout: None,
            bounds: Rect::default(),
        }
    }

    // ── Layout stream ───────────────────────────────────────

    /// Relayout for an overlay occupying `bounds` in touch space.
    pub fn layout_changed(&mut self, bounds: Rect) {
        let layout = ControllerLayout::compute(bounds.size(), &self.config);
        let to_touch_space = Transform::translate(bounds.x, bounds.y);
        self.region_frames = layout.region_frames(&to_touch_space);
        self.layout = Some(layout);
        self.bounds = bounds;
        info!("Layout changed: {}x{} at ({}, {})", bounds.width, bounds.height, bounds.x, bounds.y);
    }

    /// Replace the region frames wholesale, e.g. from a host layout system.
    pub fn region_frames_changed(&mut self, frames: RegionFrames) {
        debug!("Region frames replaced ({} regions)", frames.len());
        self.region_frames = frames;
    }

    pub fn set_layout_config(&mut self, config: LayoutConfig) {
        self.config = config;
        if self.layout.is_some() {
            self.layout_changed(self.bounds);
        }
    }

    // ── Touch stream ────────────────────────────────────────

    /// Forward one platform touch event of any phase.
    pub fn touches(&mut self, phase: TouchPhase, touches: &[Touch]) {
        let points = self.tracker.handle(phase, touches);
        self.touch_points_changed(points);
    }

    pub fn touches_began(&mut self, touches: &[Touch]) {
        self.touches(TouchPhase::Began, touches);
    }

    pub fn touches_moved(&mut self, touches: &[Touch]) {
        self.touches(TouchPhase::Moved, touches);
    }

    pub fn touches_ended(&mut self, touches: &[Touch]) {
        self.touches(TouchPhase::Ended, touches);
    }

    pub fn touches_cancelled(&mut self, touches: &[Touch]) {
        self.touches(TouchPhase::Cancelled, touches);
    }

    /// Forget every held touch, e.g. when the window stops receiving input
    /// and the matching end events will never arrive.
    pub fn touches_reset(&mut self) {
        let points = self.tracker.clear();
        self.touch_points_changed(points);
    }

    /// Replace the touch points and deliver every button's state.
    pub fn touch_points_changed(&mut self, points: Vec<Point>) {
        self.touch_points = points;
        let states = self.button_states();
        debug!(
            "{} touches -> pressed {:?}",
            self.touch_points.len(),
            states.pressed().collect::<Vec<_>>()
        );
        for (button, pressed) in states.deliveries() {
            (self.handlers.get_mut(button))(pressed);
        }
    }

    // ── Accessors ───────────────────────────────────────────

    /// States for the held touch points against the held frames.
    pub fn button_states(&self) -> ButtonStates {
        compute_button_states(&self.touch_points, &self.region_frames)
    }

    pub fn touch_points(&self) -> &[Point] {
        &self.touch_points
    }

    pub fn region_frames(&self) -> &RegionFrames {
        &self.region_frames
    }

    /// Latest computed layout, in overlay-local coordinates.
    pub fn layout(&self) -> Option<&ControllerLayout> {
        self.layout.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buttons::Region;

    type Log = Rc<RefCell<Vec<(Button, bool)>>>;

    fn recording_controller() -> (OnscreenController, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let handlers = ButtonHandlers::from_fn(move |button, pressed| sink.borrow_mut().push((button, pressed)));
        let mut controller = OnscreenController::new(handlers);
        controller.layout_changed(Rect::new(0.0, 0.0, 844.0, 390.0));
        (controller, log)
    }

    fn center(controller: &OnscreenController, region: Region) -> Point {
        controller.region_frames().get(region).unwrap().center()
    }

    fn pressed_in(log: &[(Button, bool)]) -> Vec<Button> {
        log.iter().filter(|(_, on)| *on).map(|(b, _)| *b).collect()
    }

    #[test]
    fn touch_on_up_presses_only_up() {
        let (mut controller, log) = recording_controller();
        let p = center(&controller, Region::Up);
        controller.touches_began(&[Touch::new(1, p.x, p.y)]);

        let log = log.borrow();
        assert_eq!(log.len(), 8);
        assert_eq!(log[0], (Button::Up, true));
        for button in [Button::Down, Button::Left, Button::Right, Button::Select, Button::Start, Button::B, Button::A] {
            assert!(log.contains(&(button, false)), "{button:?} not released");
        }
    }

    #[test]
    fn up_right_and_a_together() {
        let (mut controller, log) = recording_controller();
        let ur = center(&controller, Region::UpRight);
        let a = center(&controller, Region::A);
        controller.touches_began(&[Touch::new(1, ur.x, ur.y), Touch::new(2, a.x, a.y)]);

        let log = log.borrow();
        assert_eq!(log.len(), 8);
        assert_eq!(pressed_in(&log), vec![Button::Up, Button::Right, Button::A]);
    }

    #[test]
    fn lifting_all_fingers_releases_everything() {
        let (mut controller, log) = recording_controller();
        let p = center(&controller, Region::B);
        controller.touches_began(&[Touch::new(1, p.x, p.y)]);
        log.borrow_mut().clear();

        controller.touches_ended(&[Touch::new(1, p.x, p.y)]);
        let log = log.borrow();
        assert_eq!(log.len(), 8);
        assert!(log.iter().all(|(_, on)| !on));
    }

    #[test]
    fn unchanged_state_is_still_redelivered() {
        let (mut controller, log) = recording_controller();
        let p = center(&controller, Region::Start);
        controller.touches_began(&[Touch::new(1, p.x, p.y)]);
        controller.touches_moved(&[Touch::new(1, p.x + 1.0, p.y)]);
        controller.touch_points_changed(vec![p]);

        let log = log.borrow();
        assert_eq!(log.len(), 24);
        for chunk in log.chunks(8) {
            assert_eq!(pressed_in(chunk), vec![Button::Start]);
            for button in Button::ALL {
                assert_eq!(chunk.iter().filter(|(b, _)| *b == button).count(), 1);
            }
        }
    }

    #[test]
    fn cancelled_touch_releases_its_button() {
        let (mut controller, log) = recording_controller();
        let b = center(&controller, Region::B);
        let a = center(&controller, Region::A);
        controller.touches(TouchPhase::Began, &[Touch::new(1, b.x, b.y), Touch::new(2, a.x, a.y)]);
        log.borrow_mut().clear();

        controller.touches_cancelled(&[Touch::new(1, b.x, b.y)]);
        assert_eq!(pressed_in(&log.borrow()), vec![Button::A]);
    }

    #[test]
    fn reset_releases_held_touches() {
        let (mut controller, log) = recording_controller();
        let a = center(&controller, Region::A);
        let up = center(&controller, Region::Up);
        controller.touches_began(&[Touch::new(1, a.x, a.y), Touch::new(2, up.x, up.y)]);
        log.borrow_mut().clear();

        controller.touches_reset();
        assert!(controller.touch_points().is_empty());
        let log = log.borrow();
        assert_eq!(log.len(), 8);
        assert!(pressed_in(&log).is_empty());
    }

    #[test]
    fn dead_zone_presses_nothing() {
        let (mut controller, log) = recording_controller();
        let p = center(&controller, Region::Center);
        controller.touch_points_changed(vec![p]);
        assert!(pressed_in(&log.borrow()).is_empty());
    }

    #[test]
    fn sliding_between_cells_changes_direction() {
        let (mut controller, log) = recording_controller();
        let left = center(&controller, Region::Left);
        let down_left = center(&controller, Region::DownLeft);
        controller.touches_began(&[Touch::new(1, left.x, left.y)]);
        controller.touches_moved(&[Touch::new(1, down_left.x, down_left.y)]);

        let log = log.borrow();
        assert_eq!(pressed_in(&log[..8]), vec![Button::Left]);
        assert_eq!(pressed_in(&log[8..]), vec![Button::Down, Button::Left]);
    }

    #[test]
    fn layout_origin_moves_the_regions() {
        let (mut controller, log) = recording_controller();
        let local = controller.layout().unwrap().region_rect(Region::Select).center();
        controller.layout_changed(Rect::new(0.0, 500.0, 844.0, 390.0));
        controller.touch_points_changed(vec![Point::new(local.x, local.y + 500.0)]);
        assert_eq!(pressed_in(&log.borrow()), vec![Button::Select]);
    }

    #[test]
    fn external_frames_replace_layout_frames() {
        let (mut controller, log) = recording_controller();
        let frames: RegionFrames = [(Region::B, Rect::new(0.0, 0.0, 10.0, 10.0))].into_iter().collect();
        controller.region_frames_changed(frames);
        controller.touch_points_changed(vec![Point::new(5.0, 5.0)]);
        assert_eq!(pressed_in(&log.borrow()), vec![Button::B]);
        assert_eq!(controller.region_frames().len(), 1);
    }

    #[test]
    fn touches_without_layout_press_nothing() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let mut controller = OnscreenController::new(ButtonHandlers::from_fn(move |b, on| sink.borrow_mut().push((b, on))));
        controller.touches_began(&[Touch::new(1, 10.0, 10.0)]);
        assert_eq!(log.borrow().len(), 8);
        assert!(pressed_in(&log.borrow()).is_empty());
    }

    #[test]
    fn shared_callback_keeps_one_copy_of_its_state() {
        let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut calls = 0;
        let handlers = ButtonHandlers::from_fn(move |_, _| {
            calls += 1;
            sink.borrow_mut().push(calls);
        });
        let mut controller = OnscreenController::new(handlers);
        controller.touch_points_changed(Vec::new());
        assert_eq!(*seen.borrow(), (1..=8usize).collect::<Vec<_>>());
    }

    #[test]
    fn named_handlers_each_get_their_own_button() {
        let hits: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
        let rec = |name: &'static str| {
            let hits = hits.clone();
            move |on: bool| {
                if on {
                    hits.borrow_mut().push(name);
                }
            }
        };
        let handlers = ButtonHandlers::new(
            rec("up"), rec("down"), rec("left"), rec("right"),
            rec("select"), rec("start"), rec("b"), rec("a"),
        );
        let mut controller = OnscreenController::new(handlers);
        controller.layout_changed(Rect::new(0.0, 0.0, 390.0, 844.0));
        let p = controller.region_frames().get(Region::DownRight).unwrap().center();
        controller.touch_points_changed(vec![p]);
        assert_eq!(*hits.borrow(), vec!["down", "right"]);
    }
}
