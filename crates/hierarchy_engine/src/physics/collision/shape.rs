//! High-level collider shape
//!
//! Entities own exactly one [`Collider`] in world space. Every pairwise
//! query dispatches to the primitive tests and is symmetric.

use crate::foundation::math::Vector3;

use super::{Ray, RayHit, Sphere, AABB};

/// A world-space collision shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collider {
    /// Axis-aligned box
    Aabb(AABB),
    /// Sphere
    Sphere(Sphere),
}

impl Collider {
    /// Center of the shape
    pub fn center(&self) -> Vector3 {
        match self {
            Self::Aabb(aabb) => aabb.center(),
            Self::Sphere(sphere) => sphere.center(),
        }
    }

    /// Box enclosing the shape
    pub fn bounding_box(&self) -> AABB {
        match self {
            Self::Aabb(aabb) => *aabb,
            Self::Sphere(sphere) => sphere.bounding_box(),
        }
    }

    /// Test if this shape overlaps another
    pub fn overlaps(&self, other: &Collider) -> bool {
        match (self, other) {
            (Self::Aabb(a), Self::Aabb(b)) => a.overlaps(b),
            (Self::Sphere(a), Self::Sphere(b)) => a.overlaps_sphere(b),
            (Self::Sphere(sphere), Self::Aabb(aabb)) | (Self::Aabb(aabb), Self::Sphere(sphere)) => {
                sphere.overlaps_aabb(aabb)
            }
        }
    }

    /// Test if a point lies inside the shape
    pub fn overlaps_point(&self, point: Vector3) -> bool {
        match self {
            Self::Aabb(aabb) => aabb.overlaps_point(point),
            Self::Sphere(sphere) => sphere.overlaps_point(point),
        }
    }

    /// Closest point of the shape to `point`
    pub fn closest_point(&self, point: Vector3) -> Vector3 {
        match self {
            Self::Aabb(aabb) => aabb.closest_point(point),
            Self::Sphere(sphere) => sphere.closest_point(point),
        }
    }

    /// Ray cast against the shape
    pub fn intersect_ray(&self, ray: &Ray) -> Option<RayHit> {
        match self {
            Self::Aabb(aabb) => ray.intersect_aabb(aabb),
            Self::Sphere(sphere) => ray.intersect_sphere(sphere),
        }
    }
}

impl From<AABB> for Collider {
    fn from(aabb: AABB) -> Self {
        Self::Aabb(aabb)
    }
}

impl From<Sphere> for Collider {
    fn from(sphere: Sphere) -> Self {
        Self::Sphere(sphere)
    }
}
