//! Game settings for the packaged variants
//!
//! An explicit configuration struct passed at construction; immutable while
//! a round is in flight. Two variants ship with the crate: the seesaw
//! (7 levels, manual launch, steerable platform) and the pipe (single round,
//! automatic spawn countdown, lift key, ambient disturbances).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::region::GoalGeometry;
use crate::sim::{BodyId, LossEnvelope};

/// Ambient random-force disturbance (the pipe's "random blows")
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AmbientForce {
    /// Force magnitude range, sampled uniformly
    pub min: f32,
    pub max: f32,
    /// Cadence: first blow fires this long after ball activation, then this
    /// long after the previous blow
    pub delay_ms: f64,
}

/// Full configuration for one game (all rounds share it)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSettings {
    /// Round timer duration in seconds
    pub round_time_secs: f64,
    /// Candidate goal regions; one is live per round
    pub goal_regions: Vec<GoalGeometry>,
    /// Level number -> index into `goal_regions`; length = level count
    pub level_goals: Vec<usize>,
    /// Bounds beyond which a ball is out of play
    pub loss_envelope: LossEnvelope,
    /// Parked/reset position for every ball
    pub spawn_pos: Vec2,
    /// Candidate horizontal launch offsets, picked uniformly
    pub spawn_offsets: Vec<f32>,
    /// Ball bodies owned by the physics collaborator
    pub ball_bodies: Vec<BodyId>,
    pub ball_radius: f32,
    /// Automatic spawn countdown (ms); `None` means launch is manual
    pub spawn_delay_ms: Option<f64>,
    /// Platform angular velocity delta per steer event; `None` = no platform
    pub steer_step: Option<f32>,
    /// Upward force per lift event; `None` = no lift control
    pub lift_force: Option<f32>,
    /// Ambient random disturbance; `None` = calm
    pub ambient: Option<AmbientForce>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::seesaw()
    }
}

impl GameSettings {
    /// Seesaw variant: seven interleaved levels, manual space-launch, a
    /// steerable platform and a pool of spare balls. Goal regions are the
    /// platform's parts, detected through collision pairs.
    pub fn seesaw() -> Self {
        let goal_regions = (0..9)
            .map(|i| GoalGeometry::Contact {
                body: SEESAW_BODY_BASE + i,
            })
            .collect();
        Self {
            round_time_secs: SEESAW_ROUND_TIME_SECS,
            goal_regions,
            level_goals: SEESAW_LEVEL_GOALS.to_vec(),
            // Open above: a ball may fly off the top and come back
            loss_envelope: LossEnvelope::new(f32::NEG_INFINITY, CANVAS_HEIGHT + BALL_RADIUS),
            spawn_pos: Vec2::new(CANVAS_WIDTH / 2.0, SEESAW_SPAWN_Y),
            spawn_offsets: vec![-SEESAW_SPAWN_OFFSET, SEESAW_SPAWN_OFFSET],
            ball_bodies: (0..SEESAW_BALL_COUNT as u32)
                .map(|i| BALL_BODY_BASE + i)
                .collect(),
            ball_radius: BALL_RADIUS,
            spawn_delay_ms: None,
            steer_step: Some(SEESAW_STEER_STEP),
            lift_force: None,
            ambient: None,
        }
    }

    /// Pipe variant: one 60 s round, a 5 s automatic spawn countdown, an
    /// upward lift key and ambient random blows. The goal is a vertical band
    /// at the pipe's midsection, widened by the ball radius so a touching
    /// ball still counts.
    pub fn pipe() -> Self {
        let band = GoalGeometry::band_around(PIPE_POS_Y, PIPE_GOAL_HEIGHT, BALL_RADIUS);
        Self {
            round_time_secs: PIPE_ROUND_TIME_SECS,
            goal_regions: vec![band],
            level_goals: vec![0],
            loss_envelope: LossEnvelope::new(
                PIPE_POS_Y - PIPE_HEIGHT / 2.0 - BALL_RADIUS,
                PIPE_POS_Y + PIPE_HEIGHT / 2.0 + BALL_RADIUS,
            ),
            spawn_pos: Vec2::new(CANVAS_WIDTH / 2.0, PIPE_POS_Y),
            spawn_offsets: vec![0.0],
            ball_bodies: vec![BALL_BODY_BASE],
            ball_radius: BALL_RADIUS,
            spawn_delay_ms: Some(PIPE_SPAWN_DELAY_MS),
            steer_step: None,
            lift_force: Some(PIPE_LIFT_FORCE),
            ambient: Some(AmbientForce {
                min: PIPE_AMBIENT_MIN,
                max: PIPE_AMBIENT_MAX,
                delay_ms: PIPE_AMBIENT_DELAY_MS,
            }),
        }
    }

    /// Number of levels in the configured sequence
    pub fn level_count(&self) -> u32 {
        self.level_goals.len() as u32
    }

    /// Parse settings from JSON, falling back to the seesaw defaults.
    /// Configuration must never fail startup.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Invalid settings JSON ({err}), using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_falls_back_to_defaults() {
        let settings = GameSettings::from_json("not json at all");
        assert_eq!(settings.level_goals, SEESAW_LEVEL_GOALS.to_vec());
        assert_eq!(settings.ball_bodies.len(), SEESAW_BALL_COUNT);
    }

    #[test]
    fn test_pipe_geometry_widened_by_ball_radius() {
        let settings = GameSettings::pipe();
        assert_eq!(
            settings.goal_regions,
            vec![GoalGeometry::Band {
                top: 255.0,
                bottom: 345.0,
            }]
        );
        assert_eq!(settings.loss_envelope.min_y, 17.5);
        assert_eq!(settings.loss_envelope.max_y, 582.5);
        assert_eq!(settings.level_count(), 1);
    }
}
