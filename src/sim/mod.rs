//! Deterministic round/dwell engine
//!
//! All round logic lives here. This module must be pure and deterministic:
//! - Externally supplied monotonic timestamps only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod dwell;
pub mod loss;
pub mod physics;
pub mod region;
pub mod state;
pub mod tick;

pub use dwell::DwellClock;
pub use loss::LossEnvelope;
pub use physics::{BallSample, BodyId, ContactPair, PhysicsCommand, TickSnapshot};
pub use region::{GoalGeometry, MembershipEdge, RegionTracker};
pub use state::{BallSlot, GameState, RoundEvent, RoundPhase, RoundState};
pub use tick::{SteerDirection, launch, lift, start_round, steer, tick};
