//! # Hierarchy Engine
//!
//! The geometric backbone of a small 2D arcade game.
//!
//! ## Features
//!
//! - **Math kernel**: 2/3/4-component vectors and column-major square matrices
//! - **Collision**: boxes, spheres and rays with overlap, closest-point and
//!   ray-cast queries, plus a layered pair finder
//! - **Transform hierarchy**: an arena scene graph with synchronous
//!   propagation of global transforms
//! - **Entity bindings**: projectiles, targets, obstacles and walls that keep
//!   their colliders in step with their nodes
//!
//! ## Quick Start
//!
//! ```rust
//! use hierarchy_engine::prelude::*;
//!
//! let mut graph = SceneGraph::new();
//! let hull = graph.create_node(Entity::Plain);
//! let turret = graph.create_child(hull, Entity::Plain).unwrap();
//!
//! graph.set_position(hull, Vector2::new(10.0, 0.0)).unwrap();
//! graph.set_position(turret, Vector2::new(5.0, 0.0)).unwrap();
//! assert_eq!(graph.global_position(turret), Some(Vector2::new(15.0, 0.0)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod debug;
pub mod entities;
pub mod foundation;
pub mod physics;
pub mod scene;

#[cfg(test)]
mod tests;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, ConfigFormat},
        debug::{colors, DebugDrawSystem, DebugShape},
        entities::{Entity, Obstacle, Projectile, SpawnArea, Sprite, Target, Wall},
        foundation::{
            math::{Matrix2, Matrix3, Matrix4, MathError, Vector2, Vector3, Vector4},
            time::{FpsCounter, Timer},
        },
        physics::{
            Collider, CollisionBody, CollisionError, CollisionLayers, CollisionPair, PhysicsCollisionSystem, Ray,
            RayHit, Sphere, AABB,
        },
        scene::{NodeHooks, NodeId, NodeTransform, SceneError, SceneGraph},
    };
}
