//! Toroidal boundary policy
//!
//! Entities that leave the field re-enter from the opposite edge. The edge
//! checks are chained, so a single call wraps at most one axis; vertical
//! edges take precedence and a corner exit resolves over two frames.

use glam::Vec2;

/// Wrap `pos` for a circle of `radius` inside a `width` x `height` field.
///
/// Each boundary is tested with the circle radius as margin, and a crossing
/// entity re-enters one unit inside the opposite edge on the wrapped axis.
/// A position already inside the field comes back unchanged, which makes the
/// check idempotent.
pub fn wrap_position(pos: Vec2, radius: f32, width: f32, height: f32) -> Vec2 {
    if pos.y + radius <= 0.0 {
        Vec2::new(pos.x, height - radius - 1.0)
    } else if pos.y + radius >= height {
        Vec2::new(pos.x, -radius + 1.0)
    } else if pos.x + radius <= 0.0 {
        Vec2::new(width - radius - 1.0, pos.y)
    } else if pos.x + radius >= width {
        Vec2::new(-radius + 1.0, pos.y)
    } else {
        pos
    }
}
