//! Rendering
//!
//! The simulation draws through [`DrawSurface`], which only knows how to
//! clear and fill circles. [`DrawList`] records those calls so they can be
//! tessellated and uploaded by the WebGPU [`RenderState`].

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::{Color, Vertex, colors};

use glam::Vec2;

use crate::sim::{GamePhase, GameState, Player, Projectile};

/// Minimal drawing surface
pub trait DrawSurface {
    /// Clear the whole field
    fn clear(&mut self);
    /// Fill a circle
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
}

/// A recorded draw command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCall {
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
}

/// Draw calls recorded since the last clear
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    calls: Vec<DrawCall>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Triangulated vertices in field coordinates
    pub fn vertices(&self) -> Vec<Vertex> {
        shapes::tessellate(&self.calls)
    }
}

impl DrawSurface for DrawList {
    fn clear(&mut self) {
        self.calls.clear();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.calls.push(DrawCall::FillCircle {
            center,
            radius,
            color,
        });
    }
}

pub fn draw_projectile(surface: &mut impl DrawSurface, projectile: &Projectile) {
    surface.fill_circle(projectile.pos, projectile.radius(), colors::PROJECTILE);
}

pub fn draw_player(surface: &mut impl DrawSurface, player: &Player) {
    let color = if player.visible {
        colors::PLAYER
    } else {
        colors::PLAYER_BLINK
    };
    surface.fill_circle(player.pos, player.radius(), color);
}

/// Draw one frame: projectiles first, then the player on top.
///
/// The title screen shows an empty field.
pub fn draw_frame(state: &GameState, surface: &mut impl DrawSurface) {
    surface.clear();
    if state.phase == GamePhase::Title {
        return;
    }
    for projectile in &state.projectiles {
        draw_projectile(surface, projectile);
    }
    draw_player(surface, &state.player);
}
