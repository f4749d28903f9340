//! Plain visible boxes

use crate::debug::DebugDrawSystem;
use crate::foundation::math::{Matrix3, Vector2, Vector4};
use crate::physics::AABB;
use crate::scene::NodeTransform;

/// A colored box drawn in its node's frame
///
/// A solid sprite also carries a box collider on the tank layer, the way a
/// tank hull blocks against walls and obstacles.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    half_extents: Vector2,
    color: Vector4,
    solid: bool,
    collider: AABB,
}

impl Sprite {
    /// Create a decorative sprite
    pub fn new(half_extents: Vector2, color: Vector4) -> Self {
        Self {
            half_extents: half_extents.abs(),
            color,
            solid: false,
            collider: AABB::empty(),
        }
    }

    /// Make the sprite take part in collision
    #[must_use]
    pub fn solid(mut self) -> Self {
        self.solid = true;
        self
    }

    /// Half size in the node's local frame
    pub fn half_extents(&self) -> Vector2 {
        self.half_extents
    }

    /// Draw color
    pub fn color(&self) -> Vector4 {
        self.color
    }

    /// World-space collider, if solid
    pub fn collider(&self) -> Option<AABB> {
        self.solid.then_some(self.collider)
    }

    pub(crate) fn sync_collider(&mut self, global: &Matrix3) {
        if self.solid {
            self.collider = super::world_box(global, self.half_extents);
        }
    }

    pub(crate) fn on_update(&mut self, transform: &mut NodeTransform<'_>, _delta_time: f32) {
        self.sync_collider(transform.global());
    }

    pub(crate) fn on_draw(&self, global: &Matrix3, draw: &mut DebugDrawSystem) {
        draw.draw_polygon(super::oriented_corners(global, self.half_extents), self.color, 0.0);
    }
}
