//! Per-frame simulation step
//!
//! Core game loop: one call per display refresh with a variable time step.
//! Motion and spawn cadence are counted in frames; only survival time uses
//! the measured delta.

use super::collision::apply_damage;
use super::difficulty;
use super::spawn::spawn_burst;
use super::state::{GamePhase, GameState};
use crate::consts::NOMINAL_FRAME_SECS;

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameEvents {
    /// Projectiles emitted this frame
    pub spawned: u32,
    /// Projectiles that left the field this frame
    pub culled: u32,
    /// Hearts lost this frame
    pub hits: u32,
    /// The session ended this frame
    pub game_over: bool,
}

/// Advance one display frame given the refresh callback's timestamp (ms).
///
/// The delta is measured against the previous timestamp; a backwards clock
/// counts as zero so survival time never decreases.
pub fn advance_frame(state: &mut GameState, timestamp_ms: f64) -> FrameEvents {
    if state.phase != GamePhase::Playing {
        return FrameEvents::default();
    }

    let dt = match state.last_timestamp_ms {
        Some(last) => (timestamp_ms - last) / 1000.0,
        None => NOMINAL_FRAME_SECS,
    };
    state.last_timestamp_ms = Some(timestamp_ms);

    tick(state, dt)
}

/// Advance the game state by one frame that took `dt` seconds
pub fn tick(state: &mut GameState, dt: f64) -> FrameEvents {
    let mut events = FrameEvents::default();
    if state.phase != GamePhase::Playing {
        return events;
    }

    state.time_ticks += 1;
    state.survival_secs += dt.max(0.0);
    let t = state.survival_secs;

    // Emission uses the speed computed on the previous frame
    let burst = state.scheduler.step(&state.tuning, t);
    if burst > 0 {
        events.spawned = spawn_burst(state, burst);
        log::debug!(
            "t={:.2}s: burst of {} at speed {}",
            t,
            burst,
            state.projectile_speed
        );
    }

    state.projectile_speed = difficulty::speed(&state.tuning, t);

    // Move, then drop anything outside its padded bounds before it is drawn or tested
    for projectile in &mut state.projectiles {
        projectile.tick();
    }
    let before = state.projectiles.len();
    let field = state.field;
    state.projectiles.retain(|p| p.in_bounds(&field));
    events.culled = (before - state.projectiles.len()) as u32;

    state
        .player
        .tick(&mut state.invincibility_frames, state.tuning.blink_period_frames);

    let damage = apply_damage(state);
    events.hits = damage.hits;
    events.game_over = damage.game_over;
    if damage.game_over {
        log::info!(
            "Game over after {:.2}s ({} frames)",
            state.survival_secs,
            state.time_ticks
        );
    }

    events
}
