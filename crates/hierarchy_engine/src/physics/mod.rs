//! Physics module: geometric collision queries
//!
//! There is no integration or response here. Game logic moves nodes, the
//! entity bindings refresh their colliders, and the queries below answer
//! overlap, closest-point and ray questions. All pair tests are brute force.

pub mod collision;
pub mod collision_layers;
pub mod collision_system;

pub use collision::{Collider, CollisionError, Ray, RayHit, Sphere, AABB};
pub use collision_layers::CollisionLayers;
pub use collision_system::{CollisionBody, CollisionPair, PhysicsCollisionSystem};
