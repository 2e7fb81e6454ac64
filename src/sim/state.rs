//! Game state and core simulation types
//!
//! Everything a session mutates lives in [`GameState`]; systems borrow it
//! mutably one at a time.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty;
use super::spawn::SpawnScheduler;
use crate::tuning::Tuning;

/// Coarse session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// Title screen, waiting for the start command
    #[default]
    Title,
    /// Active gameplay
    Playing,
    /// Hearts depleted, waiting for the restart command
    GameOver,
}

/// The rectangular play field (origin top-left, pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayField {
    pub width: f32,
    pub height: f32,
}

impl PlayField {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Strictly inside the field grown by `pad` on every side
    #[inline]
    pub fn contains_padded(&self, pos: Vec2, pad: f32) -> bool {
        pos.x > -pad && pos.x < self.width + pad && pos.y > -pad && pos.y < self.height + pad
    }
}

/// The player's dot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Diameter (pixels)
    pub size: f32,
    /// Display color state: `false` during the "off" half of an invincibility blink
    pub visible: bool,
}

impl Player {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            size,
            visible: true,
        }
    }

    /// Move to an absolute field position (no clamping)
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.pos = Vec2::new(x, y);
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    /// Count down the invincibility window and update the blink state
    pub fn tick(&mut self, invincibility_frames: &mut u32, blink_period: u32) {
        if *invincibility_frames > 0 {
            *invincibility_frames -= 1;
            let period = blink_period.max(2);
            self.visible = *invincibility_frames % period >= period / 2;
        } else {
            self.visible = true;
        }
    }
}

/// A projectile flying in a straight line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Pixels per frame, fixed at spawn
    pub vel: Vec2,
    /// Diameter (pixels)
    pub size: f32,
}

impl Projectile {
    #[inline]
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    /// Advance one frame
    #[inline]
    pub fn tick(&mut self) {
        self.pos += self.vel;
    }

    /// Still inside the field padded by this projectile's own size
    #[inline]
    pub fn in_bounds(&self, field: &PlayField) -> bool {
        field.contains_padded(self.pos, self.size)
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub field: PlayField,
    pub phase: GamePhase,
    pub player: Player,
    /// Live projectiles, in spawn order
    pub projectiles: Vec<Projectile>,
    pub scheduler: SpawnScheduler,
    /// Speed handed to newly spawned projectiles (pixels/frame)
    pub projectile_speed: f32,
    /// Seconds survived this session
    pub survival_secs: f64,
    /// Survival time of the last finished session; outlives resizes until the next start
    pub final_secs: Option<f64>,
    pub hearts: u8,
    /// Frames of invincibility left
    pub invincibility_frames: u32,
    /// Timestamp of the previous frame (ms), if one has been seen
    pub last_timestamp_ms: Option<f64>,
    /// Frames simulated this session
    pub time_ticks: u64,
    next_id: u32,
}

impl GameState {
    /// Create a session on the title screen for a viewport of the given size
    pub fn new(seed: u64, tuning: Tuning, viewport_w: f32, viewport_h: f32) -> Self {
        let (width, height) = tuning.field_for_viewport(viewport_w, viewport_h);
        let field = PlayField::new(width, height);
        let player = Player::new(field.center(), tuning.player_size);

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            field,
            phase: GamePhase::Title,
            player,
            projectiles: Vec::new(),
            scheduler: SpawnScheduler::default(),
            projectile_speed: tuning.base_speed,
            survival_secs: 0.0,
            final_secs: None,
            hearts: tuning.starting_hearts,
            invincibility_frames: 0,
            last_timestamp_ms: None,
            time_ticks: 0,
            next_id: 1,
            tuning,
        };
        state.reset_session();
        state
    }

    /// Reset everything a session accumulates; the phase and last result are left untouched
    pub fn reset_session(&mut self) {
        self.player = Player::new(self.field.center(), self.tuning.player_size);
        self.projectiles.clear();
        self.scheduler.reset();
        self.projectile_speed = difficulty::speed(&self.tuning, 0.0);
        self.survival_secs = 0.0;
        self.hearts = self.tuning.starting_hearts;
        self.invincibility_frames = 0;
        self.last_timestamp_ms = None;
        self.time_ticks = 0;
    }

    /// Full reset and enter `Playing`; `now_ms` anchors the first frame's delta
    pub fn start(&mut self, now_ms: f64) {
        self.reset_session();
        self.final_secs = None;
        self.phase = GamePhase::Playing;
        self.last_timestamp_ms = Some(now_ms);
        log::info!("Session started (seed {})", self.seed);
    }

    /// Same as [`GameState::start`]
    pub fn restart(&mut self, now_ms: f64) {
        self.start(now_ms);
    }

    /// Resize the field to a new viewport and reset the session.
    ///
    /// A session in progress restarts immediately; title and game-over
    /// screens keep their phase.
    pub fn resize(&mut self, viewport_w: f32, viewport_h: f32, now_ms: f64) {
        let (width, height) = self.tuning.field_for_viewport(viewport_w, viewport_h);
        self.field = PlayField::new(width, height);
        self.reset_session();
        if self.phase == GamePhase::Playing {
            self.last_timestamp_ms = Some(now_ms);
        }
        log::info!("Field resized to {}x{}", width, height);
    }

    /// Latest pointer/touch position; ignored outside `Playing`
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if self.phase == GamePhase::Playing {
            self.player.set_position(x, y);
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}
