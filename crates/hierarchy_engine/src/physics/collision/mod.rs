//! Collision primitives and intersection queries
//!
//! # Module Organization
//!
//! - [`aabb`] - Axis-aligned boxes, including the empty sentinel
//! - [`sphere`] - Spheres (circles in gameplay, the third axis is inert)
//! - [`ray`] - Bounded rays and ray casts returning [`RayHit`] values
//! - [`shape`] - The [`Collider`] enum dispatching between box and sphere
//!
//! Box tests work on the x and y axes only. Sphere tests use full 3D
//! distances, which agree with the 2D result as long as every shape lives on
//! the `z = 0` plane, as all scene-derived colliders do.

pub mod aabb;
pub mod ray;
pub mod shape;
pub mod sphere;

pub use aabb::AABB;
pub use ray::{Ray, RayHit};
pub use shape::Collider;
pub use sphere::Sphere;

use thiserror::Error;

/// Collision primitive errors
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CollisionError {
    /// A box was given a minimum greater than its maximum
    #[error("inverted bounds on the {axis} axis: min {min} > max {max}")]
    InvertedBounds {
        /// Axis name (`"x"`, `"y"` or `"z"`)
        axis: &'static str,
        /// Offending minimum
        min: f32,
        /// Offending maximum
        max: f32,
    },

    /// A bounding fit was asked to enclose nothing
    #[error("cannot fit a bounding volume to an empty point set")]
    EmptyPointSet,
}
