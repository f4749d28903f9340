//! Bounded rays and ray casts

use crate::foundation::math::{MathError, Vector3};

use super::{Sphere, AABB};

/// A ray with an origin, a unit direction and a maximum length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Vector3,
    direction: Vector3,
    length: f32,
}

/// Result of a ray intersection test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin to the entry point
    pub distance: f32,
    /// The entry point
    pub point: Vector3,
}

impl Ray {
    /// Length used for rays with no practical end
    pub const UNBOUNDED_LENGTH: f32 = f32::MAX;

    /// Creates a ray; the direction is normalized
    ///
    /// A zero direction stays zero, giving a ray that only ever reaches its
    /// origin. Use [`Ray::try_new`] to reject it instead.
    pub fn new(origin: Vector3, direction: Vector3, length: f32) -> Self {
        Self {
            origin,
            direction: direction.normalized(),
            length: length.max(0.0),
        }
    }

    /// Creates a ray, failing on a zero-length direction
    pub fn try_new(origin: Vector3, direction: Vector3, length: f32) -> Result<Self, MathError> {
        Ok(Self {
            origin,
            direction: direction.try_normalized()?,
            length: length.max(0.0),
        })
    }

    /// Creates a ray of [`Ray::UNBOUNDED_LENGTH`]
    pub fn unbounded(origin: Vector3, direction: Vector3) -> Self {
        Self::new(origin, direction, Self::UNBOUNDED_LENGTH)
    }

    /// Origin point
    #[inline]
    pub fn origin(&self) -> Vector3 {
        self.origin
    }

    /// Unit direction (or zero for a degenerate ray)
    #[inline]
    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    /// Maximum distance along the ray
    #[inline]
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3 {
        self.origin + self.direction * t
    }

    /// End point, `None` for an unbounded ray
    pub fn end(&self) -> Option<Vector3> {
        (self.length < Self::UNBOUNDED_LENGTH).then(|| self.point_at(self.length))
    }

    fn within_length(&self, t: f32) -> bool {
        (0.0..=self.length).contains(&t)
    }

    fn hit_at(&self, t: f32) -> Option<RayHit> {
        self.within_length(t).then(|| RayHit {
            distance: t,
            point: self.point_at(t),
        })
    }

    /// Closest point on the ray segment to `point`
    pub fn closest_point(&self, point: Vector3) -> Vector3 {
        let t = (point - self.origin).dot(self.direction).clamp(0.0, self.length);
        self.point_at(t)
    }

    /// Entry point into a sphere
    ///
    /// Projects the center onto the ray axis, then steps back by the half
    /// chord. A ray starting inside the sphere has a negative entry and
    /// reports no hit.
    pub fn intersect_sphere(&self, sphere: &Sphere) -> Option<RayHit> {
        let to_center = sphere.center() - self.origin;
        let t0 = to_center.dot(self.direction);
        let perpendicular_squared = (to_center.magnitude_squared() - t0 * t0).max(0.0);
        let chord_squared = sphere.radius() * sphere.radius() - perpendicular_squared;
        if chord_squared < 0.0 {
            return None;
        }
        self.hit_at(t0 - chord_squared.sqrt())
    }

    /// Entry point into a box, by the slab method on x and y
    ///
    /// A ray starting inside the box has a negative entry and reports no hit.
    pub fn intersect_aabb(&self, aabb: &AABB) -> Option<RayHit> {
        if aabb.is_empty() {
            return None;
        }
        let (min, max) = (aabb.min(), aabb.max());
        let slabs = [
            (self.origin.x, self.direction.x, min.x, max.x),
            (self.origin.y, self.direction.y, min.y, max.y),
        ];

        let mut entry = f32::NEG_INFINITY;
        let mut exit = f32::INFINITY;
        for (origin, direction, lo, hi) in slabs {
            if direction == 0.0 {
                // Parallel to this slab: inside it for every t, or never.
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }
            let mut near = (lo - origin) / direction;
            let mut far = (hi - origin) / direction;
            if direction < 0.0 {
                std::mem::swap(&mut near, &mut far);
            }
            entry = entry.max(near);
            exit = exit.min(far);
            if entry > exit {
                return None;
            }
        }
        self.hit_at(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn x_ray(length: f32) -> Ray {
        Ray::new(Vector3::zero(), Vector3::X, length)
    }

    #[test]
    fn test_ray_through_sphere_center() {
        let sphere = Sphere::new(Vector3::new(10.0, 0.0, 0.0), 2.0);
        let hit = x_ray(100.0).intersect_sphere(&sphere).unwrap();
        assert_relative_eq!(hit.distance, 8.0);
        assert_relative_eq!(hit.point, Vector3::new(8.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_sphere_off_axis() {
        let sphere = Sphere::new(Vector3::new(10.0, 3.0, 0.0), 5.0);
        let hit = x_ray(100.0).intersect_sphere(&sphere).unwrap();
        assert_relative_eq!(hit.distance, 6.0, epsilon = 1e-5);
    }

    #[test]
    fn test_ray_sphere_misses() {
        let ray = x_ray(100.0);
        assert!(ray.intersect_sphere(&Sphere::new(Vector3::new(10.0, 3.0, 0.0), 2.0)).is_none());
        assert!(ray.intersect_sphere(&Sphere::new(Vector3::new(-10.0, 0.0, 0.0), 2.0)).is_none());
        assert!(x_ray(5.0).intersect_sphere(&Sphere::new(Vector3::new(10.0, 0.0, 0.0), 2.0)).is_none());
    }

    #[test]
    fn test_ray_aabb_entry() {
        let aabb = AABB::new(Vector3::new(10.0, -5.0, 0.0), Vector3::new(20.0, 5.0, 0.0));
        let hit = x_ray(100.0).intersect_aabb(&aabb).unwrap();
        assert_relative_eq!(hit.distance, 10.0);
        assert_relative_eq!(hit.point, Vector3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_aabb_negative_direction_and_diagonal() {
        let aabb = AABB::new(Vector3::new(-20.0, -5.0, 0.0), Vector3::new(-10.0, 5.0, 0.0));
        let hit = Ray::unbounded(Vector3::zero(), -Vector3::X).intersect_aabb(&aabb).unwrap();
        assert_relative_eq!(hit.distance, 10.0);

        let square = AABB::new(Vector3::new(4.0, 4.0, 0.0), Vector3::new(8.0, 8.0, 0.0));
        let diagonal = Ray::unbounded(Vector3::zero(), Vector3::new(1.0, 1.0, 0.0));
        let hit = diagonal.intersect_aabb(&square).unwrap();
        assert_relative_eq!(hit.distance, 32.0_f32.sqrt(), epsilon = 1e-4);
    }

    #[test]
    fn test_ray_aabb_misses() {
        let aabb = AABB::new(Vector3::new(10.0, 6.0, 0.0), Vector3::new(20.0, 10.0, 0.0));
        assert!(x_ray(100.0).intersect_aabb(&aabb).is_none());
        let ahead = AABB::new(Vector3::new(10.0, -5.0, 0.0), Vector3::new(20.0, 5.0, 0.0));
        assert!(x_ray(9.0).intersect_aabb(&ahead).is_none());
        assert!(x_ray(100.0).intersect_aabb(&AABB::empty()).is_none());
    }

    #[test]
    fn test_closest_point_clamps_to_segment() {
        let ray = x_ray(10.0);
        assert_eq!(ray.closest_point(Vector3::new(4.0, 3.0, 0.0)), Vector3::new(4.0, 0.0, 0.0));
        assert_eq!(ray.closest_point(Vector3::new(-4.0, 3.0, 0.0)), Vector3::zero());
        assert_eq!(ray.closest_point(Vector3::new(40.0, 3.0, 0.0)), Vector3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_direction_is_normalized() {
        let ray = Ray::new(Vector3::zero(), Vector3::new(0.0, 5.0, 0.0), 10.0);
        assert_eq!(ray.direction(), Vector3::Y);
        assert!(Ray::try_new(Vector3::zero(), Vector3::zero(), 1.0).is_err());
        assert!(Ray::unbounded(Vector3::zero(), Vector3::X).end().is_none());
        assert_eq!(x_ray(3.0).end(), Some(Vector3::new(3.0, 0.0, 0.0)));
    }
}
