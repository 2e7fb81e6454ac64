//! Collision detection and damage
//!
//! Player and projectiles are circles; a hit is a strict overlap of the two.

use super::state::{GamePhase, GameState, Player, Projectile};
use crate::circles_overlap;

/// Outcome of one damage pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamageResult {
    /// Hearts lost this frame
    pub hits: u32,
    /// Hearts reached zero this frame
    pub game_over: bool,
}

/// Whether a projectile overlaps the player
#[inline]
pub fn player_hit_by(player: &Player, projectile: &Projectile) -> bool {
    circles_overlap(player.pos, player.size, projectile.pos, projectile.size)
}

/// Apply damage from every projectile touching the player.
///
/// Skipped entirely while invincible. Each hit costs one heart and re-arms
/// the invincibility window; unless `stack_simultaneous_hits` is set, only
/// the first overlapping projectile counts. Projectiles are not consumed.
pub fn apply_damage(state: &mut GameState) -> DamageResult {
    let mut result = DamageResult::default();
    if state.phase != GamePhase::Playing || state.invincibility_frames > 0 {
        return result;
    }

    for projectile in &state.projectiles {
        if !player_hit_by(&state.player, projectile) {
            continue;
        }

        state.hearts = state.hearts.saturating_sub(1);
        state.invincibility_frames = state.tuning.invincibility_frames;
        result.hits += 1;
        log::debug!(
            "Hit by projectile {} ({} hearts left)",
            projectile.id,
            state.hearts
        );

        if state.hearts == 0 {
            state.phase = GamePhase::GameOver;
            state.final_secs = Some(state.survival_secs);
            result.game_over = true;
            break;
        }
        if !state.tuning.stack_simultaneous_hits {
            break;
        }
    }

    result
}
