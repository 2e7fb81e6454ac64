//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Defaults reproduce the
//! classic feel; a JSON document may override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::consts;

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Play field ===
    /// Field width cap (pixels); the field is `min(viewport, cap)`
    pub max_field_width: f32,
    /// Field height cap (pixels)
    pub max_field_height: f32,

    // === Player ===
    /// Player diameter (pixels)
    pub player_size: f32,
    /// Hearts at session start
    pub starting_hearts: u8,
    /// Invincibility window after a hit (frames)
    pub invincibility_frames: u32,
    /// Blink period while invincible (frames); visible for the upper half
    pub blink_period_frames: u32,
    /// Let several projectiles overlapping in the same frame each cost a heart
    pub stack_simultaneous_hits: bool,

    // === Projectiles ===
    /// Smallest projectile diameter (tier 0)
    pub projectile_min_size: f32,
    /// Diameter added per size tier
    pub projectile_size_step: f32,
    /// Number of size tiers
    pub projectile_size_tiers: u32,

    // === Difficulty curve ===
    /// Projectile speed at t = 0 (pixels/frame)
    pub base_speed: f32,
    /// Speed added every `speed_step_secs`
    pub speed_step: f32,
    pub speed_step_secs: f64,
    /// Frames between emissions before the late-game threshold
    pub base_emission_frames: u32,
    /// Emission interval divisor once `late_game_secs` have elapsed
    pub late_game_rate: f32,
    pub late_game_secs: f64,
    /// Burst grows by one projectile every `burst_step_secs`
    pub burst_step_secs: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_field_width: consts::MAX_FIELD_WIDTH,
            max_field_height: consts::MAX_FIELD_HEIGHT,

            player_size: consts::PLAYER_SIZE,
            starting_hearts: consts::STARTING_HEARTS,
            invincibility_frames: consts::INVINCIBILITY_FRAMES,
            blink_period_frames: consts::BLINK_PERIOD_FRAMES,
            stack_simultaneous_hits: false,

            projectile_min_size: consts::PROJECTILE_MIN_SIZE,
            projectile_size_step: consts::PROJECTILE_SIZE_STEP,
            projectile_size_tiers: consts::PROJECTILE_SIZE_TIERS,

            base_speed: consts::BASE_SPEED,
            speed_step: consts::SPEED_STEP,
            speed_step_secs: consts::SPEED_STEP_SECS,
            base_emission_frames: consts::BASE_EMISSION_FRAMES,
            late_game_rate: consts::LATE_GAME_RATE,
            late_game_secs: consts::LATE_GAME_SECS,
            burst_step_secs: consts::BURST_STEP_SECS,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning document.
    ///
    /// Missing fields take their defaults. The result is sanitized.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Parse JSON, falling back to defaults (with a warning) on bad input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring invalid tuning JSON: {e}");
                Self::default()
            }
        }
    }

    /// Replace values that would stall or break the simulation
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if self.projectile_size_tiers == 0 {
            log::warn!("projectile_size_tiers must be >= 1, using default");
            self.projectile_size_tiers = defaults.projectile_size_tiers;
        }
        if !(self.projectile_min_size > 0.0) {
            log::warn!("projectile_min_size must be positive, using default");
            self.projectile_min_size = defaults.projectile_min_size;
        }
        if !(self.projectile_size_step >= 0.0) {
            self.projectile_size_step = defaults.projectile_size_step;
        }
        if !(self.player_size > 0.0) {
            log::warn!("player_size must be positive, using default");
            self.player_size = defaults.player_size;
        }
        if self.starting_hearts == 0 {
            log::warn!("starting_hearts must be >= 1, using default");
            self.starting_hearts = defaults.starting_hearts;
        }
        if self.blink_period_frames < 2 {
            self.blink_period_frames = defaults.blink_period_frames;
        }
        if self.base_emission_frames == 0 {
            log::warn!("base_emission_frames must be >= 1, using default");
            self.base_emission_frames = defaults.base_emission_frames;
        }
        if !(self.late_game_rate >= 1.0) {
            self.late_game_rate = defaults.late_game_rate;
        }
        if !(self.base_speed >= 0.0) {
            self.base_speed = defaults.base_speed;
        }
        if !(self.speed_step >= 0.0) {
            log::warn!("speed_step must not be negative, using default");
            self.speed_step = defaults.speed_step;
        }
        // Curve periods shorter than a frame would step every frame and overflow the counts
        if !(self.speed_step_secs >= consts::NOMINAL_FRAME_SECS) {
            log::warn!("speed_step_secs must be at least one frame, using default");
            self.speed_step_secs = defaults.speed_step_secs;
        }
        if !(self.burst_step_secs >= consts::NOMINAL_FRAME_SECS) {
            log::warn!("burst_step_secs must be at least one frame, using default");
            self.burst_step_secs = defaults.burst_step_secs;
        }
        if !(self.max_field_width > 0.0) {
            self.max_field_width = defaults.max_field_width;
        }
        if !(self.max_field_height > 0.0) {
            self.max_field_height = defaults.max_field_height;
        }

        self
    }

    /// Diameter of the given size tier
    #[inline]
    pub fn projectile_diameter(&self, tier: u32) -> f32 {
        self.projectile_min_size + tier as f32 * self.projectile_size_step
    }

    /// Largest diameter any projectile can have (also the spawn offset)
    #[inline]
    pub fn max_projectile_size(&self) -> f32 {
        self.projectile_diameter(self.projectile_size_tiers.saturating_sub(1))
    }

    /// Play field dimensions for a viewport of the given size
    pub fn field_for_viewport(&self, viewport_w: f32, viewport_h: f32) -> (f32, f32) {
        (
            viewport_w.min(self.max_field_width),
            viewport_h.min(self.max_field_height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_size_tiers() {
        let tuning = Tuning::default();
        assert_eq!(tuning.projectile_diameter(0), 10.0);
        assert_eq!(tuning.projectile_diameter(1), 20.0);
        assert_eq!(tuning.projectile_diameter(2), 30.0);
        assert_eq!(tuning.max_projectile_size(), 30.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "starting_hearts": 5 }"#).unwrap();
        assert_eq!(tuning.starting_hearts, 5);
        assert_eq!(tuning.player_size, 20.0);
        assert_eq!(tuning.base_emission_frames, 60);
    }

    #[test]
    fn test_invalid_json_falls_back() {
        let tuning = Tuning::from_json_or_default("{ not json");
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_sanitize_rejects_zero_interval() {
        let tuning = Tuning::from_json(
            r#"{ "base_emission_frames": 0, "projectile_size_tiers": 0, "late_game_rate": 0.5 }"#,
        )
        .unwrap();
        assert_eq!(tuning.base_emission_frames, 60);
        assert_eq!(tuning.projectile_size_tiers, 3);
        assert_eq!(tuning.late_game_rate, 1.5);
    }

    #[test]
    fn test_sanitize_rejects_sub_frame_periods() {
        let tuning =
            Tuning::from_json(r#"{ "burst_step_secs": 1e-9, "speed_step_secs": 0.001 }"#).unwrap();
        assert_eq!(tuning.burst_step_secs, 10.0);
        assert_eq!(tuning.speed_step_secs, 20.0);
        assert_eq!(crate::sim::burst_size(&tuning, 5.0), 1);

        let tuning = Tuning::from_json(r#"{ "burst_step_secs": 0.5 }"#).unwrap();
        assert_eq!(tuning.burst_step_secs, 0.5);
    }

    #[test]
    fn test_field_is_capped() {
        let tuning = Tuning::default();
        assert_eq!(tuning.field_for_viewport(1920.0, 1080.0), (600.0, 800.0));
        assert_eq!(tuning.field_for_viewport(375.0, 667.0), (375.0, 667.0));
    }

    #[test]
    fn test_roundtrip_serialization() {
        let mut tuning = Tuning::default();
        tuning.stack_simultaneous_hits = true;
        let json = serde_json::to_string(&tuning).unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }
}
