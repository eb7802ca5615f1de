//! Spotball - a ball-balance arcade toy round engine
//!
//! Core modules:
//! - `sim`: Deterministic round/dwell engine (membership, dwell, loss, tick)
//! - `game`: Facade owning the state machine, command queue and callbacks
//! - `settings`: Data-driven variant configuration (seesaw / pipe)
//! - `results`: Per-round result records and summaries
//!
//! The physics simulation, rendering and raw input capture are external
//! collaborators: the engine consumes per-tick observations and emits
//! body-manipulation commands, raw HUD values and result records.

pub mod game;
pub mod results;
pub mod settings;
pub mod sim;

pub use game::{Game, HudSnapshot};
pub use results::{ResultLog, ResultRecord};
pub use settings::{AmbientForce, GameSettings};

/// Game configuration constants (the packaged variants' defaults)
pub mod consts {
    /// Canvas metrics shared by both variants
    pub const CANVAS_WIDTH: f32 = 600.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Ball radius
    pub const BALL_RADIUS: f32 = 20.0;

    /// Seesaw variant defaults
    pub const SEESAW_ROUND_TIME_SECS: f64 = 120.0;
    pub const SEESAW_BLOCK_SIZE: f32 = 50.0;
    pub const SEESAW_POS_Y: f32 = 400.0;
    /// Platform angular velocity delta per steer event (radians)
    pub const SEESAW_STEER_STEP: f32 = std::f32::consts::PI / 180.0;
    pub const SEESAW_SPAWN_Y: f32 = 100.0;
    /// Horizontal launch offset magnitude from the spawn column
    pub const SEESAW_SPAWN_OFFSET: f32 = 70.0;
    /// Spare balls created by the embedder for the seesaw variant
    pub const SEESAW_BALL_COUNT: usize = 10;
    /// Level number -> goal region index. The interleaving is intentional:
    /// difficulty jumps around the platform rather than sweeping across it.
    pub const SEESAW_LEVEL_GOALS: [usize; 7] = [5, 4, 6, 3, 7, 2, 8];

    /// Pipe variant defaults
    pub const PIPE_ROUND_TIME_SECS: f64 = 60.0;
    pub const PIPE_POS_Y: f32 = 300.0;
    pub const PIPE_HEIGHT: f32 = 525.0;
    pub const PIPE_GOAL_HEIGHT: f32 = 50.0;
    /// Upward force magnitude per lift key event
    pub const PIPE_LIFT_FORCE: f32 = 0.03;
    /// Ambient disturbance force range and cadence
    pub const PIPE_AMBIENT_MIN: f32 = 0.02;
    pub const PIPE_AMBIENT_MAX: f32 = 0.08;
    pub const PIPE_AMBIENT_DELAY_MS: f64 = 2000.0;
    /// Automatic spawn countdown before (re)adding the ball
    pub const PIPE_SPAWN_DELAY_MS: f64 = 5000.0;

    /// Default body-id layout used by the packaged variant settings. The
    /// embedder may ignore it and supply its own ids in `GameSettings`.
    pub const BALL_BODY_BASE: u32 = 1;
    pub const SEESAW_BODY_BASE: u32 = 20;
}

/// Milliseconds to seconds
#[inline]
pub fn ms_to_secs(ms: f64) -> f64 {
    ms / 1000.0
}

/// Seconds to milliseconds
#[inline]
pub fn secs_to_ms(secs: f64) -> f64 {
    secs * 1000.0
}
