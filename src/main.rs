//! Spotball entry point
//!
//! Headless demo: wires the round engine to a toy vertical integrator that
//! stands in for the physics collaborator, then plays one automated session
//! of the pipe variant. Run with `RUST_LOG=info` to watch the round engine.

use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;
use spotball::consts::PIPE_POS_Y;
use spotball::sim::{BallSample, BodyId, PhysicsCommand, RoundPhase, TickSnapshot};
use spotball::{Game, GameSettings};

/// Fixed demo timestep (60 Hz)
const STEP_MS: f64 = 1000.0 / 60.0;
/// Converts the engine's force units into toy velocity kicks
const FORCE_SCALE: f32 = 12_000.0;
/// Downward acceleration in the toy world (px/s^2)
const GRAVITY: f32 = 900.0;
/// Per-step velocity retention (stand-in for air friction)
const DRAG: f32 = 0.97;
/// Minimum gap between autopilot lift presses
const LIFT_COOLDOWN_MS: f64 = 150.0;

/// One ball body on a vertical axis. This is deliberately not a physics
/// engine - just enough motion for the round engine to have something to
/// measure.
struct ToyBody {
    id: BodyId,
    pos: Vec2,
    vel: Vec2,
    in_world: bool,
}

struct ToyWorld {
    bodies: Vec<ToyBody>,
}

impl ToyWorld {
    fn new(settings: &GameSettings) -> Self {
        let bodies = settings
            .ball_bodies
            .iter()
            .map(|&id| ToyBody {
                id,
                pos: settings.spawn_pos,
                vel: Vec2::ZERO,
                in_world: false,
            })
            .collect();
        Self { bodies }
    }

    fn apply(&mut self, cmd: PhysicsCommand) {
        match cmd {
            PhysicsCommand::AddBall { body } => self.with(body, |b| b.in_world = true),
            PhysicsCommand::RemoveBall { body } => self.with(body, |b| b.in_world = false),
            PhysicsCommand::Reposition { body, pos } => self.with(body, |b| b.pos = pos),
            PhysicsCommand::ZeroMotion { body } => self.with(body, |b| b.vel = Vec2::ZERO),
            PhysicsCommand::ApplyForce { body, force } => {
                self.with(body, |b| b.vel += force * FORCE_SCALE)
            }
            // The pipe variant has no platform
            PhysicsCommand::SpinPlatform { .. } | PhysicsCommand::ResetPlatform => {}
        }
    }

    fn with(&mut self, id: BodyId, f: impl FnOnce(&mut ToyBody)) {
        if let Some(body) = self.bodies.iter_mut().find(|b| b.id == id) {
            f(body);
        }
    }

    fn step(&mut self, dt_secs: f32) {
        for body in self.bodies.iter_mut().filter(|b| b.in_world) {
            body.vel.y += GRAVITY * dt_secs;
            body.vel *= DRAG;
            body.pos += body.vel * dt_secs;
        }
    }

    fn snapshot(&self, now_ms: f64) -> TickSnapshot {
        TickSnapshot {
            timestamp_ms: now_ms,
            balls: self
                .bodies
                .iter()
                .map(|b| BallSample {
                    body: b.id,
                    pos: b.pos,
                })
                .collect(),
            contacts: Vec::new(),
        }
    }

    fn active_ball_y(&self) -> Option<f32> {
        self.bodies.iter().find(|b| b.in_world).map(|b| b.pos.y)
    }
}

fn main() {
    env_logger::init();
    log::info!("Spotball headless demo (pipe variant)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let settings = GameSettings::pipe();
    let mut world = ToyWorld::new(&settings);
    let mut game = Game::new(settings, seed);

    game.on_round_end(|record| {
        log::info!(
            "Round over: level {}, {:.0} ms on the spot, {} balls lost",
            record.level,
            record.time_on_spot_ms,
            record.balls_lost
        );
    });

    game.start_game(0.0);
    for cmd in game.drain_commands() {
        world.apply(cmd);
    }

    let mut now = 0.0;
    let mut last_lift = f64::NEG_INFINITY;
    let mut next_report = 0.0;

    while game.state().round.phase != RoundPhase::Idle {
        now += STEP_MS;
        world.step(STEP_MS as f32 / 1000.0);

        let snap = world.snapshot(now);
        game.tick(&snap);
        for cmd in game.drain_commands() {
            world.apply(cmd);
        }

        // Autopilot: press the lift key whenever the ball sags below the
        // goal's midline
        if let Some(y) = world.active_ball_y() {
            if y > PIPE_POS_Y && now - last_lift >= LIFT_COOLDOWN_MS {
                game.lift();
                last_lift = now;
                for cmd in game.drain_commands() {
                    world.apply(cmd);
                }
            }
        }

        if now >= next_report {
            let hud = game.hud();
            log::info!(
                "t={:5.1}s phase={:?} left={:4.1}s dwell={:6.0}ms lost={} on_goal={}",
                now / 1000.0,
                hud.phase,
                hud.time_left_secs,
                hud.time_on_spot_ms,
                hud.balls_lost,
                hud.goal_active
            );
            next_report += 5000.0;
        }
    }

    let results = game.results();
    println!("Session complete after {:.1}s:", now / 1000.0);
    for record in &results.records {
        println!(
            "  level {}: {:.0} ms on the spot, {} balls lost",
            record.level, record.time_on_spot_ms, record.balls_lost
        );
    }
    println!(
        "  total: {:.0} ms on the spot, {} balls lost",
        results.total_time_on_spot_ms(),
        results.total_balls_lost()
    );
}
