//! Physics collaborator contract
//!
//! The engine never integrates bodies itself. Each simulation step the
//! collaborator reports a [`TickSnapshot`]; the engine answers with
//! [`PhysicsCommand`]s that must be applied before the next step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Identity of a body owned by the physics collaborator
pub type BodyId = u32;

/// Observed position of one ball body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSample {
    pub body: BodyId,
    pub pos: Vec2,
}

/// A collision pair reported by the physics engine, naming bodies by identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPair {
    pub a: BodyId,
    pub b: BodyId,
}

impl ContactPair {
    pub fn new(a: BodyId, b: BodyId) -> Self {
        Self { a, b }
    }

    /// True if either side of the pair is `body`
    #[inline]
    pub fn involves(&self, body: BodyId) -> bool {
        self.a == body || self.b == body
    }
}

/// One simulation step's observations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickSnapshot {
    /// Monotonic simulation timestamp (ms)
    pub timestamp_ms: f64,
    /// Positions of every ball body, parked or not
    pub balls: Vec<BallSample>,
    /// Collision pairs active this step (empty when the embedder uses the
    /// geometric containment strategy)
    pub contacts: Vec<ContactPair>,
}

impl TickSnapshot {
    /// Empty snapshot at a given timestamp
    pub fn at(timestamp_ms: f64) -> Self {
        Self {
            timestamp_ms,
            ..Self::default()
        }
    }
}

/// Body manipulation requested from the physics collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PhysicsCommand {
    /// Add the ball body back into the simulated world
    AddBall { body: BodyId },
    /// Remove the ball body from the simulated world
    RemoveBall { body: BodyId },
    /// Teleport the body
    Reposition { body: BodyId, pos: Vec2 },
    /// Zero the body's velocity, angular velocity and angle
    ZeroMotion { body: BodyId },
    /// Apply an instantaneous force at the body's center
    ApplyForce { body: BodyId, force: Vec2 },
    /// Add `delta` to the platform's angular velocity
    SpinPlatform { delta: f32 },
    /// Zero the platform's angle and angular velocity
    ResetPlatform,
}
