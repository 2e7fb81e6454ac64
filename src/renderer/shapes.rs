//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::DrawCall;
use super::vertex::{Color, Vertex};

/// Fewest segments used for any circle
const MIN_SEGMENTS: u32 = 12;
/// Roughly one segment per this many pixels of circumference
const PIXELS_PER_SEGMENT: f32 = 3.0;

/// Segment count that keeps a circle of this radius looking round
pub fn segments_for_radius(radius: f32) -> u32 {
    let circumference = 2.0 * PI * radius.max(0.0);
    ((circumference / PIXELS_PER_SEGMENT).ceil() as u32).clamp(MIN_SEGMENTS, 64)
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Triangulate recorded draw calls, in order (later calls paint over earlier ones)
pub fn tessellate(calls: &[DrawCall]) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for call in calls {
        match *call {
            DrawCall::FillCircle {
                center,
                radius,
                color,
            } => {
                // Fully transparent circles contribute nothing
                if color[3] <= 0.0 || radius <= 0.0 {
                    continue;
                }
                vertices.extend(circle(center, radius, color, segments_for_radius(radius)));
            }
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::colors;

    #[test]
    fn test_circle_vertex_count() {
        let verts = circle(Vec2::new(5.0, 5.0), 10.0, colors::PLAYER, 16);
        assert_eq!(verts.len(), 48);
        for tri in verts.chunks(3) {
            assert_eq!(tri[0].position, [5.0, 5.0]);
            for v in &tri[1..] {
                let d = Vec2::from(v.position).distance(Vec2::new(5.0, 5.0));
                assert!((d - 10.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_segments_scale_with_radius() {
        assert_eq!(segments_for_radius(1.0), MIN_SEGMENTS);
        assert!(segments_for_radius(15.0) > segments_for_radius(5.0));
        assert_eq!(segments_for_radius(10_000.0), 64);
    }

    #[test]
    fn test_tessellate_skips_invisible() {
        let calls = [
            DrawCall::FillCircle {
                center: Vec2::ZERO,
                radius: 10.0,
                color: colors::PLAYER_BLINK,
            },
            DrawCall::FillCircle {
                center: Vec2::ZERO,
                radius: 5.0,
                color: colors::PROJECTILE,
            },
        ];
        let verts = tessellate(&calls);
        assert_eq!(verts.len(), segments_for_radius(5.0) as usize * 3);
        assert!(verts.iter().all(|v| v.color == colors::PROJECTILE));
    }
}
