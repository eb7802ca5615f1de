//! Round state and core engine types
//!
//! One [`GameState`] is live at a time and is owned exclusively by the state
//! machine; detectors receive it by reference for the duration of a single
//! tick. Everything here is plain serializable data.

use serde::{Deserialize, Serialize};

use super::dwell::DwellClock;
use super::physics::BodyId;
use super::region::RegionTracker;
use crate::results::{ResultLog, ResultRecord};
use crate::settings::GameSettings;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No round active; also the terminal state after the final level
    #[default]
    Idle,
    /// Round configured, balls parked, waiting for a launch or the spawn timer
    AwaitingLaunch,
    /// Round timer ticking
    Running,
    /// Result recorded; transient before chaining or settling into Idle
    Ended,
}

/// One ball body and whether it is currently in the simulated world
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BallSlot {
    pub body: BodyId,
    pub active: bool,
}

/// Mutable state of the live round; fully reset by `start_round`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundState {
    pub phase: RoundPhase,
    /// 1-based level number
    pub level: u32,
    /// Timestamp at which the round timer began; `None` until the first launch
    pub started_at_ms: Option<f64>,
    /// Remaining round time, clamped at zero; recomputed while `Running`
    pub time_left_secs: f64,
    pub dwell: DwellClock,
    pub membership: RegionTracker,
    pub balls_lost: u32,
    /// Index of the live goal region, picked at round start
    pub goal_index: Option<usize>,
    /// Deadline for the automatic spawn countdown
    pub spawn_due_ms: Option<f64>,
}

/// Notable happenings surfaced to the embedder after each tick or input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RoundEvent {
    RoundStarted { level: u32 },
    BallLaunched { body: BodyId },
    GoalEntered,
    GoalLeft,
    BallLost { body: BodyId },
    RoundEnded(ResultRecord),
    GameEnded,
}

/// Complete engine state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub round: RoundState,
    /// Ball roster; at most one slot is active at a time
    pub balls: Vec<BallSlot>,
    /// Finished rounds, in level order
    pub results: ResultLog,
    /// Timestamp of the most recent tick (or operator trigger)
    pub last_tick_ms: f64,
    /// When the live ball was added to the world; anchors the ambient cadence
    pub activated_at_ms: Option<f64>,
    /// When the previous ambient disturbance fired
    pub last_ambient_ms: Option<f64>,
    /// Events since the start of the most recent tick; cleared when the
    /// next tick begins
    #[serde(skip)]
    pub events: Vec<RoundEvent>,
}

impl GameState {
    /// Fresh state with every roster ball parked
    pub fn new(settings: &GameSettings) -> Self {
        Self {
            round: RoundState::default(),
            balls: settings
                .ball_bodies
                .iter()
                .map(|&body| BallSlot {
                    body,
                    active: false,
                })
                .collect(),
            results: ResultLog::new(),
            last_tick_ms: 0.0,
            activated_at_ms: None,
            last_ambient_ms: None,
            events: Vec::new(),
        }
    }

    /// The live ball, if one is in the simulated world
    pub fn active_ball(&self) -> Option<BodyId> {
        self.balls.iter().find(|s| s.active).map(|s| s.body)
    }

    /// A spare ball available for launching
    pub fn parked_ball(&self) -> Option<BodyId> {
        self.balls.iter().find(|s| !s.active).map(|s| s.body)
    }

    pub fn is_active(&self, body: BodyId) -> bool {
        self.balls.iter().any(|s| s.body == body && s.active)
    }

    pub fn slot_mut(&mut self, body: BodyId) -> Option<&mut BallSlot> {
        self.balls.iter_mut().find(|s| s.body == body)
    }
}
