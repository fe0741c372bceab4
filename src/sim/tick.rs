//! Per-frame simulation step
//!
//! Core game loop that advances the session by one normalized timestep.

use super::collision::first_contact;
use super::rng::RandomSource;
use super::state::{GameEvent, GamePhase, Session};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap (only honoured while playing)
    pub flap: bool,
    /// Start a new run (only honoured after game over)
    pub restart: bool,
    /// Idle/demo mode - autopilot flies the bird
    pub idle_mode: bool,
}

/// How far below the gap centre the autopilot lets the bird sink before flapping
const AUTOPILOT_SINK: f32 = 20.0;

/// Advance the session by one step of `dt` normalized frames
pub fn tick<R: RandomSource>(session: &mut Session<R>, input: &TickInput, dt: f32) {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    if input.restart && session.phase == GamePhase::GameOver {
        session.reset();
    }

    if session.phase == GamePhase::Playing {
        if input.flap || (input.idle_mode && autopilot_wants_flap(session)) {
            session.flap();
        }
        advance_playing(session, dt);
    }

    // Cosmetic motion never stops
    session.ground.advance(dt);
    let width = session.tuning.playfield_width;
    let mut clouds = std::mem::take(&mut session.clouds);
    for cloud in &mut clouds {
        cloud.advance(dt, width, session.scenery_rng());
    }
    session.clouds = clouds;
    let tuning = &session.tuning;
    session.bird.animate(dt, tuning);

    session.time_ticks += 1;
}

/// Gameplay half of the step: physics, spawning, scoring, collision
fn advance_playing<R: RandomSource>(session: &mut Session<R>, dt: f32) {
    let tuning = &session.tuning;
    session.bird.advance(dt, tuning);
    for pipe in &mut session.pipes {
        pipe.advance(dt, tuning.pipe_speed);
    }

    // Spacing follows horizontal position, not frame count
    let spawn_line = tuning.playfield_width - tuning.spawn_lead;
    if session
        .pipes
        .last()
        .is_none_or(|newest| newest.x < spawn_line)
    {
        let pipe = session.spawn_pipe();
        session.pipes.push(pipe);
    }

    session.pipes.retain(|pipe| !pipe.is_offscreen());

    let bird_x = session.bird.pos.x;
    for pipe in &mut session.pipes {
        if !pipe.passed() && pipe.right() < bird_x && pipe.mark_passed() {
            session.score += 1;
            session.events.push(GameEvent::Scored {
                score: session.score,
            });
            log::debug!("Pipe cleared, score {}", session.score);
        }
    }

    let hitbox = session.bird.hitbox();
    if let Some(contact) = first_contact(&hitbox, &session.pipes, session.ground.y) {
        session.end_run(contact);
    }
}

/// Demo heuristic: flap whenever the bird sinks below the gap it is heading for
fn autopilot_wants_flap<R: RandomSource>(session: &Session<R>) -> bool {
    let bird = &session.bird;
    let tail = bird.pos.x - bird.size().x / 2.0;
    let target = session
        .pipes
        .iter()
        .find(|pipe| pipe.right() >= tail)
        .map(|pipe| pipe.gap_center())
        .unwrap_or(session.tuning.ground_y() / 2.0);
    bird.pos.y > target + AUTOPILOT_SINK
}
