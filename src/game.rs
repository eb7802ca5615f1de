//! Game facade
//!
//! Owns the settings, the engine state, the seeded RNG, the outbound command
//! queue and the optional result callbacks. The embedder drives it with one
//! [`TickSnapshot`] per simulation step plus interleaved input events, drains
//! the queued [`PhysicsCommand`]s after each call, and reads raw HUD values
//! for display.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::results::{ResultLog, ResultRecord};
use crate::settings::GameSettings;
use crate::sim::state::{GameState, RoundEvent, RoundPhase};
use crate::sim::tick::{self, SteerDirection};
use crate::sim::{PhysicsCommand, TickSnapshot};

type RoundEndHandler = Box<dyn FnMut(&ResultRecord)>;
type GameEndHandler = Box<dyn FnMut(&[ResultRecord])>;

/// Raw values for the renderer; all formatting is the caller's job
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub phase: RoundPhase,
    pub level: u32,
    pub time_left_secs: f64,
    pub time_on_spot_ms: f64,
    pub balls_lost: u32,
    /// Which candidate goal region is live (highlight target)
    pub goal_index: Option<usize>,
    /// True while the ball is on the goal (highlight styling)
    pub goal_active: bool,
    /// Remaining automatic spawn countdown, if one is running
    pub spawn_countdown_ms: Option<f64>,
}

/// The round/level state machine and its collaborator plumbing
pub struct Game {
    settings: GameSettings,
    state: GameState,
    rng: Pcg32,
    commands: Vec<PhysicsCommand>,
    on_round_end: Option<RoundEndHandler>,
    on_game_end: Option<GameEndHandler>,
}

impl Game {
    /// Create a game with the given settings and RNG seed
    pub fn new(settings: GameSettings, seed: u64) -> Self {
        let state = GameState::new(&settings);
        Self {
            settings,
            state,
            rng: Pcg32::seed_from_u64(seed),
            commands: Vec::new(),
            on_round_end: None,
            on_game_end: None,
        }
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn results(&self) -> &ResultLog {
        &self.state.results
    }

    /// Events emitted since the start of the last tick
    pub fn events(&self) -> &[RoundEvent] {
        &self.state.events
    }

    /// Register the per-round callback; an unset slot is simply skipped
    pub fn on_round_end(&mut self, handler: impl FnMut(&ResultRecord) + 'static) {
        self.on_round_end = Some(Box::new(handler));
    }

    /// Register the per-game callback; an unset slot is simply skipped
    pub fn on_game_end(&mut self, handler: impl FnMut(&[ResultRecord]) + 'static) {
        self.on_game_end = Some(Box::new(handler));
    }

    /// Operator trigger: begin the level sequence. Valid from `Idle` only;
    /// ignored while a game is in progress.
    pub fn start_game(&mut self, now_ms: f64) {
        if self.state.round.phase != RoundPhase::Idle {
            log::debug!("start_game ignored while {:?}", self.state.round.phase);
            return;
        }
        self.state.results.clear();
        self.state.last_tick_ms = now_ms;
        tick::start_round(&mut self.state, &self.settings, 1, now_ms, &mut self.commands);
    }

    /// Put a ball into play (the launch key)
    pub fn launch(&mut self) {
        let now = self.state.last_tick_ms;
        tick::launch(
            &mut self.state,
            &self.settings,
            now,
            &mut self.rng,
            &mut self.commands,
        );
    }

    /// Nudge the platform's angular velocity; accepted at any phase
    pub fn steer(&mut self, direction: SteerDirection) {
        tick::steer(&self.settings, direction, &mut self.commands);
    }

    /// Apply the upward lift force; inert unless a ball is live
    pub fn lift(&mut self) {
        tick::lift(&self.state, &self.settings, &mut self.commands);
    }

    /// Advance one simulation step and fire any due result callbacks
    pub fn tick(&mut self, snap: &TickSnapshot) {
        tick::tick(
            &mut self.state,
            &self.settings,
            snap,
            &mut self.rng,
            &mut self.commands,
        );
        self.dispatch_callbacks();
    }

    /// Take the commands queued since the last drain; the embedder must
    /// apply them to the physics world before the next step
    pub fn drain_commands(&mut self) -> Vec<PhysicsCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Render-facing snapshot of the live round
    pub fn hud(&self) -> HudSnapshot {
        let round = &self.state.round;
        HudSnapshot {
            phase: round.phase,
            level: round.level,
            time_left_secs: round.time_left_secs,
            time_on_spot_ms: round.dwell.accumulated_ms(),
            balls_lost: round.balls_lost,
            goal_index: round.goal_index,
            goal_active: round.membership.is_inside(),
            spawn_countdown_ms: round
                .spawn_due_ms
                .map(|due| (due - self.state.last_tick_ms).max(0.0)),
        }
    }

    fn dispatch_callbacks(&mut self) {
        for event in &self.state.events {
            match event {
                RoundEvent::RoundEnded(record) => {
                    if let Some(handler) = self.on_round_end.as_mut() {
                        handler(record);
                    }
                }
                RoundEvent::GameEnded => {
                    if let Some(handler) = self.on_game_end.as_mut() {
                        handler(&self.state.results.records);
                    }
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::region::GoalGeometry;
    use crate::sim::{BallSample, LossEnvelope};
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Seven quick levels sharing one band region, instant auto-spawn
    fn seven_level_settings() -> GameSettings {
        GameSettings {
            round_time_secs: 1.0,
            goal_regions: vec![GoalGeometry::Band {
                top: 280.0,
                bottom: 320.0,
            }],
            level_goals: vec![0; 7],
            loss_envelope: LossEnvelope::new(f32::NEG_INFINITY, 625.0),
            spawn_pos: Vec2::new(300.0, 100.0),
            spawn_offsets: vec![0.0],
            ball_bodies: vec![1],
            ball_radius: 20.0,
            spawn_delay_ms: Some(0.0),
            steer_step: None,
            lift_force: None,
            ambient: None,
        }
    }

    fn snapshot(now_ms: f64, y: f32) -> TickSnapshot {
        TickSnapshot {
            timestamp_ms: now_ms,
            balls: vec![BallSample {
                body: 1,
                pos: Vec2::new(300.0, y),
            }],
            contacts: Vec::new(),
        }
    }

    #[test]
    fn test_seven_rounds_then_game_end() {
        let mut game = Game::new(seven_level_settings(), 42);

        let rounds: Rc<RefCell<Vec<u32>>> = Rc::new(RefCell::new(Vec::new()));
        let finished: Rc<RefCell<Option<usize>>> = Rc::new(RefCell::new(None));
        {
            let rounds = rounds.clone();
            game.on_round_end(move |record| rounds.borrow_mut().push(record.level));
        }
        {
            let finished = finished.clone();
            game.on_game_end(move |records| *finished.borrow_mut() = Some(records.len()));
        }

        game.start_game(0.0);
        // 100 ms steps; instant auto-spawn launches each round on its first
        // tick, so every level lasts exactly its 1 s duration
        let mut now = 0.0;
        while game.state().round.phase != RoundPhase::Idle && now < 60_000.0 {
            now += 100.0;
            game.tick(&snapshot(now, 300.0));
        }

        assert_eq!(*rounds.borrow(), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(*finished.borrow(), Some(7));
        assert_eq!(game.results().len(), 7);
        assert_eq!(game.state().round.phase, RoundPhase::Idle);
    }

    #[test]
    fn test_unset_callbacks_are_skipped() {
        let mut settings = seven_level_settings();
        settings.level_goals = vec![0];
        let mut game = Game::new(settings, 1);
        game.start_game(0.0);
        game.tick(&snapshot(100.0, 300.0));
        game.tick(&snapshot(2000.0, 300.0));
        // Round and game both ended with no handlers registered
        assert_eq!(game.results().len(), 1);
        assert_eq!(game.state().round.phase, RoundPhase::Idle);
    }

    #[test]
    fn test_start_game_rejected_while_live() {
        let mut game = Game::new(seven_level_settings(), 1);
        game.start_game(0.0);
        game.tick(&snapshot(100.0, 300.0));
        assert_eq!(game.state().round.phase, RoundPhase::Running);

        game.start_game(200.0);
        assert_eq!(game.state().round.level, 1);
        assert_eq!(game.state().round.phase, RoundPhase::Running);
    }

    #[test]
    fn test_hud_reports_raw_values() {
        let mut settings = seven_level_settings();
        settings.spawn_delay_ms = Some(5000.0);
        let mut game = Game::new(settings, 1);
        game.start_game(0.0);
        game.tick(&snapshot(1000.0, 300.0));

        let hud = game.hud();
        assert_eq!(hud.phase, RoundPhase::AwaitingLaunch);
        assert_eq!(hud.level, 1);
        assert_eq!(hud.spawn_countdown_ms, Some(4000.0));
        assert_eq!(hud.balls_lost, 0);
        assert!(!hud.goal_active);

        game.tick(&snapshot(5000.0, 300.0));
        game.tick(&snapshot(5100.0, 300.0));
        game.tick(&snapshot(5200.0, 300.0));
        let hud = game.hud();
        assert_eq!(hud.phase, RoundPhase::Running);
        assert!(hud.goal_active);
        assert_eq!(hud.time_on_spot_ms, 100.0);
        assert_eq!(hud.spawn_countdown_ms, None);
    }

    #[test]
    fn test_commands_drain_once() {
        let mut game = Game::new(seven_level_settings(), 1);
        game.start_game(0.0);
        assert!(!game.drain_commands().is_empty());
        assert!(game.drain_commands().is_empty());
    }
}
