//! Bullet Dodge - survive a storm of projectiles converging from the edges
//!
//! Core modules:
//! - `sim`: Simulation (entities, difficulty curve, spawning, collisions, frame loop)
//! - `renderer`: Draw surface abstraction and WebGPU circle pipeline
//! - `hud`: Read-only values the page displays (timer, hearts, phase)
//! - `tuning`: Data-driven game balance

pub mod hud;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use hud::{HudSnapshot, format_time};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Play field caps (pixels)
    pub const MAX_FIELD_WIDTH: f32 = 600.0;
    pub const MAX_FIELD_HEIGHT: f32 = 800.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 20.0;
    pub const STARTING_HEARTS: u8 = 3;
    /// ~1 second at 60 fps
    pub const INVINCIBILITY_FRAMES: u32 = 60;
    pub const BLINK_PERIOD_FRAMES: u32 = 10;

    /// Projectile size tiers: 10 / 20 / 30
    pub const PROJECTILE_MIN_SIZE: f32 = 10.0;
    pub const PROJECTILE_SIZE_STEP: f32 = 10.0;
    pub const PROJECTILE_SIZE_TIERS: u32 = 3;

    /// Difficulty curve
    pub const BASE_SPEED: f32 = 2.0;
    pub const SPEED_STEP: f32 = 0.5;
    pub const SPEED_STEP_SECS: f64 = 20.0;
    /// 1 second = 60 frames
    pub const BASE_EMISSION_FRAMES: u32 = 60;
    pub const LATE_GAME_RATE: f32 = 1.5;
    pub const LATE_GAME_SECS: f64 = 60.0;
    pub const BURST_STEP_SECS: f64 = 10.0;

    /// Nominal frame duration used for the very first frame (seconds)
    pub const NOMINAL_FRAME_SECS: f64 = 1.0 / 60.0;
}

/// Unit vector pointing from `from` toward `to`.
///
/// Coincident points have no direction; the zero vector is returned.
#[inline]
pub fn direction_toward(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Strict circle-circle overlap test using diameters.
///
/// Touching circles (distance exactly equal to the combined radius) do not overlap.
#[inline]
pub fn circles_overlap(a: Vec2, a_diameter: f32, b: Vec2, b_diameter: f32) -> bool {
    a.distance(b) < (a_diameter + b_diameter) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_toward_is_unit() {
        let dir = direction_toward(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0));
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!((dir.x - 0.6).abs() < 1e-6);
        assert!((dir.y - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_direction_toward_coincident_is_zero() {
        let p = Vec2::new(12.0, -7.0);
        assert_eq!(direction_toward(p, p), Vec2::ZERO);
    }

    #[test]
    fn test_overlap_is_strict() {
        let a = Vec2::ZERO;
        // Combined radius of 20 + 10 diameters is 15
        assert!(circles_overlap(a, 20.0, Vec2::new(14.9, 0.0), 10.0));
        assert!(!circles_overlap(a, 20.0, Vec2::new(15.0, 0.0), 10.0));
        assert!(!circles_overlap(a, 20.0, Vec2::new(0.0, 30.0), 10.0));
    }
}
