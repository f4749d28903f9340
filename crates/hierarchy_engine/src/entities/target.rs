//! Targets and random spawn placement

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::debug::{colors, DebugDrawSystem};
use crate::foundation::math::{Matrix3, Vector2, Vector3};
use crate::physics::Sphere;
use crate::scene::NodeTransform;

/// Rectangle random spawn points are drawn from
///
/// `min` is inclusive and `max` exclusive on each axis. A degenerate axis
/// (`max <= min`) always yields `min`, as does an axis whose width overflows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnArea {
    /// Lower corner
    pub min: Vector2,
    /// Upper corner
    pub max: Vector2,
}

impl SpawnArea {
    /// Create a spawn area from its corners
    pub const fn new(min: Vector2, max: Vector2) -> Self {
        Self { min, max }
    }

    /// Draw a uniformly distributed point
    pub fn random_point(&self, rng: &mut impl Rng) -> Vector2 {
        Vector2::new(sample_axis(rng, self.min.x, self.max.x), sample_axis(rng, self.min.y, self.max.y))
    }

    /// Whether both corners and the width of each axis are finite
    pub fn is_finite(&self) -> bool {
        axis_is_finite(self.min.x, self.max.x) && axis_is_finite(self.min.y, self.max.y)
    }

    /// Whether a point lies inside the half-open area
    pub fn contains(&self, point: Vector2) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }
}

impl Default for SpawnArea {
    fn default() -> Self {
        Self::new(Vector2::new(40.0, 40.0), Vector2::new(600.0, 440.0))
    }
}

fn axis_is_finite(lo: f32, hi: f32) -> bool {
    lo.is_finite() && hi.is_finite() && (hi - lo).is_finite()
}

fn sample_axis(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    // gen_range panics when the width overflows to infinity
    if hi > lo && axis_is_finite(lo, hi) {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

/// A round target that counts the hits it has taken
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    radius: f32,
    collider: Sphere,
    hits: u32,
}

impl Target {
    /// Create a target with the given collider radius
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            collider: Sphere::new(Vector3::zero(), radius),
            hits: 0,
        }
    }

    /// Pick a fresh position for a respawn
    ///
    /// Moving the node is up to the caller, through the scene graph.
    pub fn random_spawn_point(rng: &mut impl Rng, area: &SpawnArea) -> Vector2 {
        area.random_point(rng)
    }

    /// Collider radius
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Current world-space collider
    pub fn collider(&self) -> Sphere {
        self.collider
    }

    /// Number of hits taken so far
    pub fn hits(&self) -> u32 {
        self.hits
    }

    /// Count one more hit
    pub fn register_hit(&mut self) {
        self.hits = self.hits.saturating_add(1);
    }

    pub(crate) fn sync_collider(&mut self, global: &Matrix3) {
        self.collider.resize(global.translation().extend(0.0), self.radius);
    }

    pub(crate) fn on_update(&mut self, transform: &mut NodeTransform<'_>, _delta_time: f32) {
        self.sync_collider(transform.global());
    }

    pub(crate) fn on_draw(&self, global: &Matrix3, draw: &mut DebugDrawSystem) {
        let center = global.translation();
        draw.draw_circle(center, self.radius, colors::RED, 0.0);
        draw.draw_circle(center, self.radius * 0.5, colors::WHITE, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_spawn_points_stay_inside_area() {
        let area = SpawnArea::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let point = Target::random_spawn_point(&mut rng, &area);
            assert!(area.contains(point), "{point} outside spawn area");
        }
    }

    #[test]
    fn test_same_seed_same_points() {
        let area = SpawnArea::default();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(Target::random_spawn_point(&mut a, &area), Target::random_spawn_point(&mut b, &area));
        }
    }

    #[test]
    fn test_degenerate_area_returns_min() {
        let area = SpawnArea::new(Vector2::new(5.0, 5.0), Vector2::new(5.0, 1.0));
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(area.random_point(&mut rng), Vector2::new(5.0, 5.0));
    }

    #[test]
    fn test_overflowing_width_returns_min() {
        let area = SpawnArea::new(Vector2::new(-3.0e38, 0.0), Vector2::new(3.0e38, 10.0));
        assert!(!area.is_finite());
        let mut rng = StdRng::seed_from_u64(3);
        let point = area.random_point(&mut rng);
        assert_eq!(point.x, -3.0e38);
        assert!(point.y >= 0.0 && point.y < 10.0);
        assert!(SpawnArea::default().is_finite());
    }

    #[test]
    fn test_collider_follows_global_position() {
        let mut target = Target::new(15.0);
        target.sync_collider(&Matrix3::from_translation(320.0, 240.0));
        assert_eq!(target.collider().center(), Vector3::new(320.0, 240.0, 0.0));
        assert_eq!(target.collider().radius(), 15.0);
        target.register_hit();
        assert_eq!(target.hits(), 1);
    }
}
