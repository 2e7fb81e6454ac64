//! Simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! platform dependencies:
//! - Motion and emission counted in frames
//! - Seeded RNG only
//! - Stable iteration order (spawn order)

pub mod collision;
pub mod difficulty;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{DamageResult, apply_damage, player_hit_by};
pub use difficulty::{burst_size, emission_interval_frames, speed};
pub use spawn::{Edge, SpawnScheduler, random_projectile, spawn_burst};
pub use state::{GamePhase, GameState, PlayField, Player, Projectile};
pub use tick::{FrameEvents, advance_frame, tick};
