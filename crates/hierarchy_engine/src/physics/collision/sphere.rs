//! Bounding spheres

use crate::foundation::math::Vector3;

use super::{CollisionError, AABB};

/// A sphere (a circle in gameplay, where z stays 0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vector3,
    radius: f32,
}

impl Default for Sphere {
    fn default() -> Self {
        Self::new(Vector3::zero(), 1.0)
    }
}

impl Sphere {
    /// Creates a sphere; negative radii are clamped to zero
    pub fn new(center: Vector3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    /// Center point
    #[inline]
    pub fn center(&self) -> Vector3 {
        self.center
    }

    /// Radius
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Replace center and radius
    pub fn resize(&mut self, center: Vector3, radius: f32) {
        self.center = center;
        self.radius = radius.max(0.0);
    }

    /// Move the center, keeping the radius
    pub fn set_center(&mut self, center: Vector3) {
        self.center = center;
    }

    /// Cheap bounding fit: centered on the point set's bounding box, reaching
    /// its maximum corner
    ///
    /// This encloses every point but is not the minimal enclosing sphere.
    /// An empty set is an error and leaves the sphere unchanged.
    pub fn fit(&mut self, points: &[Vector3]) -> Result<(), CollisionError> {
        if points.is_empty() {
            return Err(CollisionError::EmptyPointSet);
        }
        let bounds = AABB::from_points(points);
        self.center = bounds.center();
        self.radius = self.center.distance(bounds.max());
        Ok(())
    }

    /// Boundary-inclusive point test
    pub fn overlaps_point(&self, point: Vector3) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }

    /// Sphere against sphere
    pub fn overlaps_sphere(&self, other: &Sphere) -> bool {
        let reach = self.radius + other.radius;
        self.center.distance_squared(other.center) <= reach * reach
    }

    /// Sphere against box, via the box's closest point to our center
    pub fn overlaps_aabb(&self, aabb: &AABB) -> bool {
        if aabb.is_empty() {
            return false;
        }
        self.overlaps_point(aabb.closest_point(self.center))
    }

    /// The point itself when inside, otherwise its projection onto the surface
    pub fn closest_point(&self, point: Vector3) -> Vector3 {
        if self.overlaps_point(point) {
            return point;
        }
        // Outside means point != center, so the direction is well defined.
        self.center + (point - self.center).normalized() * self.radius
    }

    /// Axis-aligned box enclosing the sphere
    pub fn bounding_box(&self) -> AABB {
        AABB::from_center_extents(self.center, Vector3::splat(self.radius))
    }
}
