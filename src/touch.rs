//! Multi-touch tracking.
//!
//! Platform glue forwards raw began/moved/ended/cancelled events; the
//! tracker keeps the set of active touches and answers every event with the
//! full list of current touch points. Points carry no identity: callers only
//! see positions.

use std::collections::BTreeMap;

use log::debug;

use crate::geometry::Point;

/// Platform-assigned identifier of one finger for the life of its gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TouchId(pub u64);

/// One touch as delivered by the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    pub id: TouchId,
    pub location: Point,
}

impl Touch {
    pub fn new(id: u64, x: f32, y: f32) -> Self {
        Touch { id: TouchId(id), location: Point::new(x, y) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Began,
    Moved,
    Ended,
    Cancelled,
}

#[derive(Debug, Default)]
pub struct TouchTracker {
    active: BTreeMap<TouchId, Point>,
}

impl TouchTracker {
    pub fn new() -> Self {
        TouchTracker { active: BTreeMap::new() }
    }

    /// Forward one platform event and get the current point list back.
    pub fn handle(&mut self, phase: TouchPhase, touches: &[Touch]) -> Vec<Point> {
        match phase {
            TouchPhase::Began => self.began(touches),
            TouchPhase::Moved => self.moved(touches),
            TouchPhase::Ended => self.ended(touches),
            TouchPhase::Cancelled => self.cancelled(touches),
        }
    }

    pub fn began(&mut self, touches: &[Touch]) -> Vec<Point> {
        for t in touches {
            self.active.insert(t.id, t.location);
        }
        self.points()
    }

    /// Update locations of active touches. Membership never changes here.
    pub fn moved(&mut self, touches: &[Touch]) -> Vec<Point> {
        for t in touches {
            if let Some(location) = self.active.get_mut(&t.id) {
                *location = t.location;
            }
        }
        self.points()
    }

    pub fn ended(&mut self, touches: &[Touch]) -> Vec<Point> {
        for t in touches {
            self.active.remove(&t.id);
        }
        self.points()
    }

    pub fn cancelled(&mut self, touches: &[Touch]) -> Vec<Point> {
        self.ended(touches)
    }

    /// Drop every active touch.
    pub fn clear(&mut self) -> Vec<Point> {
        self.active.clear();
        self.points()
    }

    /// Current locations, or an empty list when no touch is active.
    pub fn points(&self) -> Vec<Point> {
        if self.active.is_empty() {
            return Vec::new();
        }
        let points: Vec<Point> = self.active.values().copied().collect();
        debug!("{} active touches", points.len());
        points
    }
}
