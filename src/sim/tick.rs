//! Simulation tick fan-out and round transitions
//!
//! Each step the physics collaborator reports a [`TickSnapshot`] and the
//! engine advances in a fixed order: membership/dwell first, loss second,
//! the countdown check third - a ball simultaneously on the goal and past
//! the loss envelope still gets its final dwell credit. The automatic spawn
//! countdown and ambient disturbances run after the fan-out.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::physics::{BallSample, BodyId, PhysicsCommand, TickSnapshot};
use super::region::MembershipEdge;
use super::state::{GameState, RoundEvent, RoundPhase, RoundState};
use crate::ms_to_secs;
use crate::results::ResultRecord;
use crate::settings::GameSettings;

/// Direction for platform steering input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SteerDirection {
    Left,
    Right,
}

/// Advance the engine by one simulation step
pub fn tick(
    state: &mut GameState,
    settings: &GameSettings,
    snap: &TickSnapshot,
    rng: &mut Pcg32,
    commands: &mut Vec<PhysicsCommand>,
) {
    state.last_tick_ms = snap.timestamp_ms;
    state.events.clear();

    // Nothing ticks outside a live round
    if !matches!(
        state.round.phase,
        RoundPhase::AwaitingLaunch | RoundPhase::Running
    ) {
        return;
    }

    // Only balls the engine has added to the world are observed; parked balls
    // sit at spawn and must read as "not lost"
    let active: Vec<BallSample> = snap
        .balls
        .iter()
        .copied()
        .filter(|s| state.is_active(s.body))
        .collect();

    update_membership(state, settings, &active, snap);
    detect_losses(state, settings, &active, snap.timestamp_ms, commands);
    update_countdown(state, settings, snap.timestamp_ms, commands);
    update_auto_spawn(state, settings, snap.timestamp_ms, rng, commands);
    update_ambient(state, settings, snap.timestamp_ms, rng, commands);
}

/// Start a round at the given level. Valid from `Idle` or `Ended` only;
/// attempts while a round is live are ignored.
pub fn start_round(
    state: &mut GameState,
    settings: &GameSettings,
    level: u32,
    now_ms: f64,
    commands: &mut Vec<PhysicsCommand>,
) {
    if matches!(
        state.round.phase,
        RoundPhase::AwaitingLaunch | RoundPhase::Running
    ) {
        log::debug!(
            "start_round({level}) ignored while {:?}",
            state.round.phase
        );
        return;
    }

    // The live goal region is picked here, strictly before the first tick of
    // the new round can run a membership check
    let goal_index = settings
        .level_goals
        .get((level as usize).saturating_sub(1))
        .copied();

    state.round = RoundState {
        phase: RoundPhase::AwaitingLaunch,
        level,
        started_at_ms: None,
        time_left_secs: settings.round_time_secs,
        dwell: Default::default(),
        membership: Default::default(),
        balls_lost: 0,
        goal_index,
        spawn_due_ms: settings.spawn_delay_ms.map(|d| now_ms + d),
    };

    let bodies: Vec<BodyId> = state.balls.iter().map(|s| s.body).collect();
    for body in bodies {
        park_ball(state, settings, body, commands);
    }
    if settings.steer_step.is_some() {
        commands.push(PhysicsCommand::ResetPlatform);
    }

    state.events.push(RoundEvent::RoundStarted { level });
    log::info!("Level {level} started (goal region {goal_index:?})");
}

/// Put a ball into play. Valid while awaiting launch, or mid-round after a
/// loss; a no-op whenever a ball is already live, so repeated launches
/// neither re-add balls nor reset the timer.
pub fn launch(
    state: &mut GameState,
    settings: &GameSettings,
    now_ms: f64,
    rng: &mut Pcg32,
    commands: &mut Vec<PhysicsCommand>,
) {
    if !matches!(
        state.round.phase,
        RoundPhase::AwaitingLaunch | RoundPhase::Running
    ) {
        log::debug!("launch ignored while {:?}", state.round.phase);
        return;
    }
    if state.active_ball().is_some() {
        return;
    }
    let Some(body) = state.parked_ball() else {
        return;
    };

    let offset = if settings.spawn_offsets.is_empty() {
        0.0
    } else {
        settings.spawn_offsets[rng.random_range(0..settings.spawn_offsets.len())]
    };
    commands.push(PhysicsCommand::Reposition {
        body,
        pos: settings.spawn_pos + Vec2::new(offset, 0.0),
    });
    commands.push(PhysicsCommand::AddBall { body });

    if let Some(slot) = state.slot_mut(body) {
        slot.active = true;
    }
    state.activated_at_ms = Some(now_ms);
    state.last_ambient_ms = None;
    state.round.spawn_due_ms = None;

    if state.round.started_at_ms.is_none() {
        state.round.started_at_ms = Some(now_ms);
        state.round.phase = RoundPhase::Running;
        log::debug!("Round timer started at {now_ms} ms");
    }
    state.events.push(RoundEvent::BallLaunched { body });
}

/// Platform steering: accepted at any phase, delegated straight to physics
pub fn steer(
    settings: &GameSettings,
    direction: SteerDirection,
    commands: &mut Vec<PhysicsCommand>,
) {
    let Some(step) = settings.steer_step else {
        return;
    };
    let delta = match direction {
        SteerDirection::Left => -step,
        SteerDirection::Right => step,
    };
    commands.push(PhysicsCommand::SpinPlatform { delta });
}

/// Player lift force: accepted only while a ball is actively simulated
pub fn lift(state: &GameState, settings: &GameSettings, commands: &mut Vec<PhysicsCommand>) {
    let Some(force) = settings.lift_force else {
        return;
    };
    let Some(body) = state.active_ball() else {
        return;
    };
    commands.push(PhysicsCommand::ApplyForce {
        body,
        force: Vec2::new(0.0, -force),
    });
}

fn update_membership(
    state: &mut GameState,
    settings: &GameSettings,
    active: &[BallSample],
    snap: &TickSnapshot,
) {
    let Some(goal) = state
        .round
        .goal_index
        .and_then(|i| settings.goal_regions.get(i))
    else {
        return;
    };
    let inside = goal.contains(active, &snap.contacts);
    let edge = state.round.membership.update(inside);
    state.round.dwell.on_edge(edge, snap.timestamp_ms);
    match edge {
        MembershipEdge::Entered => {
            state.events.push(RoundEvent::GoalEntered);
            log::debug!("Ball entered the goal region");
        }
        MembershipEdge::Left => {
            state.events.push(RoundEvent::GoalLeft);
            log::debug!("Ball left the goal region");
        }
        _ => {}
    }
}

fn detect_losses(
    state: &mut GameState,
    settings: &GameSettings,
    active: &[BallSample],
    now_ms: f64,
    commands: &mut Vec<PhysicsCommand>,
) {
    for sample in active {
        if settings.loss_envelope.is_lost(sample.pos.y) {
            park_ball(state, settings, sample.body, commands);
            state.round.balls_lost += 1;
            state.events.push(RoundEvent::BallLost { body: sample.body });
            log::debug!(
                "Ball {} lost at y={:.1} ({} this round)",
                sample.body,
                sample.pos.y,
                state.round.balls_lost
            );
            // Losing the ball re-arms the automatic spawn countdown
            if let Some(delay) = settings.spawn_delay_ms {
                state.round.spawn_due_ms = Some(now_ms + delay);
            }
        }
    }
}

/// Remove a ball from the world and return it to spawn with zeroed motion
fn park_ball(
    state: &mut GameState,
    settings: &GameSettings,
    body: BodyId,
    commands: &mut Vec<PhysicsCommand>,
) {
    commands.push(PhysicsCommand::RemoveBall { body });
    commands.push(PhysicsCommand::Reposition {
        body,
        pos: settings.spawn_pos,
    });
    commands.push(PhysicsCommand::ZeroMotion { body });
    if let Some(slot) = state.slot_mut(body) {
        slot.active = false;
    }
    state.activated_at_ms = None;
    state.last_ambient_ms = None;
}

fn update_countdown(
    state: &mut GameState,
    settings: &GameSettings,
    now_ms: f64,
    commands: &mut Vec<PhysicsCommand>,
) {
    if state.round.phase != RoundPhase::Running {
        return;
    }
    let Some(started_at) = state.round.started_at_ms else {
        return;
    };
    let left = settings.round_time_secs - ms_to_secs(now_ms - started_at);
    state.round.time_left_secs = left.max(0.0);
    if left <= 0.0 {
        end_round(state, settings, now_ms, commands);
    }
}

/// Freeze the result, report it, and chain into the next level or settle
/// into terminal `Idle`
fn end_round(
    state: &mut GameState,
    settings: &GameSettings,
    now_ms: f64,
    commands: &mut Vec<PhysicsCommand>,
) {
    let record = ResultRecord {
        level: state.round.level,
        time_on_spot_ms: state.round.dwell.accumulated_ms(),
        balls_lost: state.round.balls_lost,
    };
    log::info!(
        "Level {} ended: {:.0} ms on goal, {} balls lost",
        record.level,
        record.time_on_spot_ms,
        record.balls_lost
    );
    state.round.phase = RoundPhase::Ended;
    state.round.time_left_secs = 0.0;
    state.results.push(record.clone());
    state.events.push(RoundEvent::RoundEnded(record));

    let next = state.round.level + 1;
    if next <= settings.level_count() {
        start_round(state, settings, next, now_ms, commands);
    } else {
        state.round.phase = RoundPhase::Idle;
        state.events.push(RoundEvent::GameEnded);
        log::info!("Game ended after {} levels", state.results.len());
    }
}

fn update_auto_spawn(
    state: &mut GameState,
    settings: &GameSettings,
    now_ms: f64,
    rng: &mut Pcg32,
    commands: &mut Vec<PhysicsCommand>,
) {
    if !matches!(
        state.round.phase,
        RoundPhase::AwaitingLaunch | RoundPhase::Running
    ) {
        return;
    }
    let Some(due) = state.round.spawn_due_ms else {
        return;
    };
    if now_ms >= due {
        launch(state, settings, now_ms, rng, commands);
    }
}

fn update_ambient(
    state: &mut GameState,
    settings: &GameSettings,
    now_ms: f64,
    rng: &mut Pcg32,
    commands: &mut Vec<PhysicsCommand>,
) {
    if state.round.phase != RoundPhase::Running {
        return;
    }
    let Some(cfg) = settings.ambient else {
        return;
    };
    let Some(body) = state.active_ball() else {
        return;
    };
    // First blow is anchored to ball activation, later ones to the previous
    let Some(anchor) = state.last_ambient_ms.or(state.activated_at_ms) else {
        return;
    };
    if now_ms - anchor >= cfg.delay_ms {
        let magnitude = if cfg.max > cfg.min {
            rng.random_range(cfg.min..cfg.max)
        } else {
            cfg.min
        };
        let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        commands.push(PhysicsCommand::ApplyForce {
            body,
            force: Vec2::new(0.0, sign * magnitude),
        });
        state.last_ambient_ms = Some(now_ms);
        log::debug!("Ambient blow {:+.3}", sign * magnitude);
    }
}
