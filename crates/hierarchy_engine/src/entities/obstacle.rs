//! Destructible obstacles

use crate::debug::{colors, draw_collider, CollisionDebugColors, DebugDrawSystem};
use crate::foundation::math::{Matrix3, Vector2};
use crate::physics::{Collider, AABB};
use crate::scene::NodeTransform;

/// A box that blocks tanks and shots until its hit points run out
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    half_extents: Vector2,
    hit_points: u32,
    max_hit_points: u32,
    collider: AABB,
}

impl Obstacle {
    /// Create an obstacle with full hit points
    pub fn new(half_extents: Vector2, hit_points: u32) -> Self {
        Self {
            half_extents: half_extents.abs(),
            hit_points,
            max_hit_points: hit_points,
            collider: AABB::empty(),
        }
    }

    /// Half size in the node's local frame
    pub fn half_extents(&self) -> Vector2 {
        self.half_extents
    }

    /// Remaining hit points
    pub fn hit_points(&self) -> u32 {
        self.hit_points
    }

    /// Hit points at creation
    pub fn max_hit_points(&self) -> u32 {
        self.max_hit_points
    }

    /// Still standing
    pub fn is_active(&self) -> bool {
        self.hit_points > 0
    }

    /// Take damage, saturating at zero
    ///
    /// Returns true when this hit destroyed the obstacle.
    pub fn apply_hit(&mut self, damage: u32) -> bool {
        let was_active = self.is_active();
        self.hit_points = self.hit_points.saturating_sub(damage);
        was_active && !self.is_active()
    }

    /// World-space collider while active
    pub fn collider(&self) -> Option<AABB> {
        self.is_active().then_some(self.collider)
    }

    pub(crate) fn sync_collider(&mut self, global: &Matrix3) {
        self.collider = super::world_box(global, self.half_extents);
    }

    pub(crate) fn on_update(&mut self, transform: &mut NodeTransform<'_>, _delta_time: f32) {
        self.sync_collider(transform.global());
    }

    pub(crate) fn on_draw(&self, global: &Matrix3, draw: &mut DebugDrawSystem) {
        if self.is_active() {
            draw_collider(draw, &Collider::Aabb(self.collider), &CollisionDebugColors::default(), false);
            draw.draw_polygon(super::oriented_corners(global, self.half_extents), colors::WHITE, 0.0);
        } else {
            // rubble
            draw.draw_polygon(super::oriented_corners(global, self.half_extents * 0.5), colors::GREY, 0.0);
        }
    }
}
