//! Axis-aligned bounding boxes

use crate::foundation::math::{Matrix3, Vector2, Vector3};

use super::CollisionError;

/// Axis-Aligned Bounding Box
///
/// Either a valid box (`min <= max` on every axis) or the empty sentinel
/// (`min = +inf`, `max = -inf`), which overlaps nothing and becomes a proper
/// bound on the first [`AABB::add_point`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    min: Vector3,
    max: Vector3,
}

impl Default for AABB {
    fn default() -> Self {
        Self::empty()
    }
}

impl AABB {
    /// The empty sentinel box
    pub const fn empty() -> Self {
        Self {
            min: Vector3::splat(f32::INFINITY),
            max: Vector3::splat(f32::NEG_INFINITY),
        }
    }

    /// Create a box from its corners without validation
    ///
    /// The caller must supply `min <= max` on every axis. Use
    /// [`AABB::try_new`] when the corners come from untrusted input.
    pub const fn new(min: Vector3, max: Vector3) -> Self {
        Self { min, max }
    }

    /// Create a box, rejecting inverted corners
    pub fn try_new(min: Vector3, max: Vector3) -> Result<Self, CollisionError> {
        check_bounds(min, max)?;
        Ok(Self { min, max })
    }

    /// Create a box centered at a point with given half sizes
    pub fn from_center_extents(center: Vector3, extents: Vector3) -> Self {
        let extents = extents.abs();
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Create the tightest box around a point set
    pub fn from_points(points: &[Vector3]) -> Self {
        let mut aabb = Self::empty();
        aabb.fit(points);
        aabb
    }

    /// Minimum corner
    #[inline]
    pub fn min(&self) -> Vector3 {
        self.min
    }

    /// Maximum corner
    #[inline]
    pub fn max(&self) -> Vector3 {
        self.max
    }

    /// True for the empty sentinel (or any box inverted on x or y)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Reset to the empty sentinel, then grow over every point
    ///
    /// An empty slice leaves the sentinel, which never overlaps anything.
    pub fn fit(&mut self, points: &[Vector3]) {
        *self = Self::empty();
        for &point in points {
            self.add_point(point);
        }
    }

    /// Grow the box to include `point`
    pub fn add_point(&mut self, point: Vector3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Replace the bounds directly
    ///
    /// No sorting or validation happens here: the caller must supply
    /// `min <= max` on every axis, since every query assumes it. Use
    /// [`AABB::try_resize`] to have inverted input rejected instead.
    pub fn resize(&mut self, min: Vector3, max: Vector3) {
        self.min = min;
        self.max = max;
    }

    /// Replace the bounds, rejecting inverted input and leaving the box unchanged
    pub fn try_resize(&mut self, min: Vector3, max: Vector3) -> Result<(), CollisionError> {
        check_bounds(min, max)?;
        self.resize(min, max);
        Ok(())
    }

    /// Inclusive point-in-box test on x and y
    pub fn overlaps_point(&self, point: Vector3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Separating-axis test against another box on x and y
    ///
    /// Rejects on the x axis before looking at y. Empty boxes fail the first
    /// comparison against any finite box.
    pub fn overlaps(&self, other: &AABB) -> bool {
        if self.max.x < other.min.x || self.min.x > other.max.x {
            return false;
        }
        if self.max.y < other.min.y || self.min.y > other.max.y {
            return false;
        }
        true
    }

    /// Closest point inside the box to `point` (component-wise clamp)
    ///
    /// An empty box has no points; `point` comes back unchanged.
    pub fn closest_point(&self, point: Vector3) -> Vector3 {
        if self.is_empty() {
            return point;
        }
        point.clamp(self.min, self.max)
    }

    /// Center point
    pub fn center(&self) -> Vector3 {
        (self.min + self.max) * 0.5
    }

    /// Half size on each axis
    pub fn extents(&self) -> Vector3 {
        (self.max - self.min).abs() * 0.5
    }

    /// The four corners in the x/y plane
    ///
    /// Order is fixed: minimum corner, `(min.x, max.y)`, maximum corner,
    /// `(max.x, min.y)`. The z of the first two comes from `min`, of the last
    /// two from `max`.
    pub fn corners(&self) -> [Vector3; 4] {
        [
            self.min,
            Vector3::new(self.min.x, self.max.y, self.min.z),
            self.max,
            Vector3::new(self.max.x, self.min.y, self.max.z),
        ]
    }

    /// Bounding box of this box's corners after a 2D affine transform
    pub fn transformed(&self, transform: &Matrix3) -> AABB {
        if self.is_empty() {
            return *self;
        }
        let mut result = AABB::empty();
        for corner in self.corners() {
            let p = transform.transform_point(Vector2::new(corner.x, corner.y));
            result.add_point(Vector3::new(p.x, p.y, corner.z));
        }
        result
    }
}

#[allow(clippy::neg_cmp_op_on_partial_ord)]
fn check_bounds(min: Vector3, max: Vector3) -> Result<(), CollisionError> {
    for (axis, lo, hi) in [("x", min.x, max.x), ("y", min.y, max.y), ("z", min.z, max.z)] {
        // Negated so NaN bounds are rejected too.
        if !(lo <= hi) {
            return Err(CollisionError::InvertedBounds { axis, min: lo, max: hi });
        }
    }
    Ok(())
}
