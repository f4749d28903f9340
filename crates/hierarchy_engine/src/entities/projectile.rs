//! Projectiles

use crate::debug::{colors, DebugDrawSystem};
use crate::foundation::math::{Matrix3, Vector2, Vector3};
use crate::physics::Sphere;
use crate::scene::NodeTransform;

/// A shot that travels along its local x axis until it expires or hits
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    direction: Vector2,
    speed: f32,
    lifetime: f32,
    radius: f32,
    collider: Sphere,
    consumed: bool,
}

impl Projectile {
    /// Create a projectile moving along its node's facing
    pub fn new(speed: f32, lifetime: f32, radius: f32) -> Self {
        Self {
            direction: Vector2::X,
            speed,
            lifetime,
            radius,
            collider: Sphere::new(Vector3::zero(), radius),
            consumed: false,
        }
    }

    /// Override the travel direction, given in the node's local frame
    ///
    /// A zero direction leaves the projectile stationary.
    #[must_use]
    pub fn with_direction(mut self, direction: Vector2) -> Self {
        self.direction = direction.normalized();
        self
    }

    /// Units per second along the travel direction
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Seconds left before expiry
    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }

    /// Current world-space collider
    pub fn collider(&self) -> Sphere {
        self.collider
    }

    /// Mark as spent after hitting something
    pub fn consume(&mut self) {
        self.consumed = true;
    }

    /// Whether a hit has already been resolved for this projectile
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Whether the lifetime has run out
    pub fn is_expired(&self) -> bool {
        self.lifetime <= 0.0
    }

    pub(crate) fn wants_removal(&self) -> bool {
        self.consumed || self.is_expired()
    }

    pub(crate) fn sync_collider(&mut self, global: &Matrix3) {
        self.collider.resize(global.translation().extend(0.0), self.radius);
    }

    pub(crate) fn on_update(&mut self, transform: &mut NodeTransform<'_>, delta_time: f32) {
        self.lifetime -= delta_time;
        transform.translate(self.direction * (self.speed * delta_time));
        self.sync_collider(transform.global());
    }

    pub(crate) fn on_draw(&self, global: &Matrix3, draw: &mut DebugDrawSystem) {
        let position = global.translation();
        let heading = global.transform_vector(self.direction).normalized();
        draw.draw_circle(position, self.radius, colors::YELLOW, 0.0);
        draw.draw_line(position, position + heading * (self.radius * 2.0), colors::WHITE, 0.0);
    }
}
