//! Debug module for visualization and debugging tools
//!
//! Rendering is an external collaborator: draw hooks record shapes here and a
//! renderer (or the log) consumes them.

pub mod draw;
pub mod collision_debug;

pub use draw::{colors, DebugShape, DebugDrawSystem, DebugShapeId};
pub use collision_debug::{draw_collider, CollisionDebugColors};
