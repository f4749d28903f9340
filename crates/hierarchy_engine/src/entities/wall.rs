//! Static walls

use crate::debug::{colors, DebugDrawSystem};
use crate::foundation::math::{Matrix3, Vector2};
use crate::physics::AABB;
use crate::scene::NodeTransform;

/// An indestructible box; its collider is the bound of its transformed corners
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    half_extents: Vector2,
    collider: AABB,
}

impl Wall {
    /// Create a wall with the given local half size
    pub fn new(half_extents: Vector2) -> Self {
        Self {
            half_extents: half_extents.abs(),
            collider: AABB::empty(),
        }
    }

    /// Half size in the node's local frame
    pub fn half_extents(&self) -> Vector2 {
        self.half_extents
    }

    /// Current world-space collider
    pub fn collider(&self) -> AABB {
        self.collider
    }

    pub(crate) fn sync_collider(&mut self, global: &Matrix3) {
        self.collider = super::world_box(global, self.half_extents);
    }

    pub(crate) fn on_update(&mut self, transform: &mut NodeTransform<'_>, _delta_time: f32) {
        self.sync_collider(transform.global());
    }

    pub(crate) fn on_draw(&self, global: &Matrix3, draw: &mut DebugDrawSystem) {
        draw.draw_polygon(super::oriented_corners(global, self.half_extents), colors::GREY, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::QUARTER_PI;
    use crate::foundation::math::Vector3;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotated_wall_grows_its_box() {
        let mut wall = Wall::new(Vector2::new(10.0, 10.0));
        let mut global = Matrix3::from_translation(50.0, 0.0);
        global.rotate_z(QUARTER_PI);
        wall.sync_collider(&global);

        let half_diagonal = 10.0 * std::f32::consts::SQRT_2;
        assert_relative_eq!(wall.collider().min(), Vector3::new(50.0 - half_diagonal, -half_diagonal, 0.0), epsilon = 1e-4);
        assert_relative_eq!(wall.collider().max(), Vector3::new(50.0 + half_diagonal, half_diagonal, 0.0), epsilon = 1e-4);
    }

    #[test]
    fn test_new_wall_has_empty_collider_until_synced() {
        let wall = Wall::new(Vector2::new(-4.0, 2.0));
        assert!(wall.collider().is_empty());
        assert_eq!(wall.half_extents(), Vector2::new(4.0, 2.0));
    }
}
