//! Goal region membership detection
//!
//! Containment is an injected predicate with two equivalent strategies: a
//! geometric band test along the vertical travel axis, or an event-sourced
//! test against the collision pairs the physics engine reports. Either way
//! the [`RegionTracker`] turns raw per-step samples into edges, so callers
//! see `Entered` once per excursion rather than every step.

use serde::{Deserialize, Serialize};

use super::physics::{BallSample, BodyId, ContactPair};

/// Containment predicate for one candidate goal region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GoalGeometry {
    /// Vertical band: inside while `top < y < bottom`. Bounds are expected to
    /// be pre-widened by the ball radius so a touching ball still counts.
    Band { top: f32, bottom: f32 },
    /// Inside while any reported collision pair names this body
    Contact { body: BodyId },
}

impl GoalGeometry {
    /// Band centered on `center_y`, `height` tall, widened by `ball_radius`
    pub fn band_around(center_y: f32, height: f32, ball_radius: f32) -> Self {
        GoalGeometry::Band {
            top: center_y - height / 2.0 - ball_radius,
            bottom: center_y + height / 2.0 + ball_radius,
        }
    }

    /// Containment test over one step's observations. `balls` must hold only
    /// actively simulated balls.
    pub fn contains(&self, balls: &[BallSample], contacts: &[ContactPair]) -> bool {
        match *self {
            GoalGeometry::Band { top, bottom } => {
                balls.iter().any(|s| s.pos.y > top && s.pos.y < bottom)
            }
            GoalGeometry::Contact { body } => contacts.iter().any(|p| p.involves(body)),
        }
    }
}

/// Change in containment state between two successive samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MembershipEdge {
    /// Outside, was outside
    None,
    /// First sample inside
    Entered,
    /// Inside, was inside
    StillInside,
    /// First sample outside after being inside
    Left,
}

/// Latches the previous containment sample to produce membership edges
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RegionTracker {
    inside: bool,
}

impl RegionTracker {
    /// Feed the current containment sample, get the edge since the last one
    pub fn update(&mut self, inside_now: bool) -> MembershipEdge {
        let edge = match (self.inside, inside_now) {
            (false, true) => MembershipEdge::Entered,
            (true, true) => MembershipEdge::StillInside,
            (true, false) => MembershipEdge::Left,
            (false, false) => MembershipEdge::None,
        };
        self.inside = inside_now;
        edge
    }

    /// Last known containment state (drives the goal highlight flag)
    pub fn is_inside(&self) -> bool {
        self.inside
    }

    pub fn reset(&mut self) {
        self.inside = false;
    }
}
