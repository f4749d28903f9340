//! Debug drawing primitives and system
//!
//! Shapes are recorded in world space. Temporary shapes expire once their
//! duration runs out; a duration of `0.0` lasts until the next
//! [`DebugDrawSystem::update`], i.e. exactly one frame.

use std::collections::HashMap;

use crate::foundation::math::{Vector2, Vector4};

/// Unique identifier for persistent debug shapes
pub type DebugShapeId = String;

/// Common RGBA colors
pub mod colors {
    use crate::foundation::math::Vector4;

    /// Opaque white
    pub const WHITE: Vector4 = Vector4::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque red
    pub const RED: Vector4 = Vector4::new(1.0, 0.0, 0.0, 1.0);
    /// Opaque green
    pub const GREEN: Vector4 = Vector4::new(0.0, 1.0, 0.0, 1.0);
    /// Opaque blue
    pub const BLUE: Vector4 = Vector4::new(0.0, 0.0, 1.0, 1.0);
    /// Opaque yellow
    pub const YELLOW: Vector4 = Vector4::new(1.0, 1.0, 0.0, 1.0);
    /// Mid grey
    pub const GREY: Vector4 = Vector4::new(0.5, 0.5, 0.5, 1.0);
}

/// Debug shape primitives that can be rendered for visualization
#[derive(Clone, Debug, PartialEq)]
pub enum DebugShape {
    /// Line segment from start to end
    Line {
        /// Start point
        start: Vector2,
        /// End point
        end: Vector2,
        /// RGBA color
        color: Vector4,
        /// Remaining lifetime in seconds
        duration: f32,
    },

    /// Circle outline
    Circle {
        /// Center point
        center: Vector2,
        /// Radius
        radius: f32,
        /// RGBA color
        color: Vector4,
        /// Remaining lifetime in seconds
        duration: f32,
    },

    /// Closed polygon outline
    Polygon {
        /// Vertices in drawing order
        points: Vec<Vector2>,
        /// RGBA color
        color: Vector4,
        /// Remaining lifetime in seconds
        duration: f32,
    },

    /// Point at position
    Point {
        /// Position
        position: Vector2,
        /// RGBA color
        color: Vector4,
        /// Size in pixels
        size: f32,
        /// Remaining lifetime in seconds
        duration: f32,
    },
}

impl DebugShape {
    fn duration_mut(&mut self) -> &mut f32 {
        match self {
            DebugShape::Line { duration, .. }
            | DebugShape::Circle { duration, .. }
            | DebugShape::Polygon { duration, .. }
            | DebugShape::Point { duration, .. } => duration,
        }
    }

    /// Get remaining duration
    pub fn duration(&self) -> f32 {
        match self {
            DebugShape::Line { duration, .. }
            | DebugShape::Circle { duration, .. }
            | DebugShape::Polygon { duration, .. }
            | DebugShape::Point { duration, .. } => *duration,
        }
    }

    /// Color of the shape
    pub fn color(&self) -> Vector4 {
        match self {
            DebugShape::Line { color, .. }
            | DebugShape::Circle { color, .. }
            | DebugShape::Polygon { color, .. }
            | DebugShape::Point { color, .. } => *color,
        }
    }

    /// Set duration (returns modified shape)
    pub fn with_duration(mut self, new_duration: f32) -> Self {
        *self.duration_mut() = new_duration;
        self
    }

    /// Decrease duration by delta_time, returns true if expired
    pub fn tick(&mut self, delta_time: f32) -> bool {
        let duration = self.duration_mut();
        *duration -= delta_time;
        *duration <= 0.0
    }
}

/// Debug drawing system for recording debug shapes
///
/// Holds temporary shapes, which expire after their duration, and persistent
/// shapes keyed by id, which remain until explicitly removed.
pub struct DebugDrawSystem {
    temporary_shapes: Vec<DebugShape>,
    persistent_shapes: HashMap<DebugShapeId, DebugShape>,

    /// Master enable/disable flag
    pub enabled: bool,
}

impl DebugDrawSystem {
    /// Create a new debug draw system
    pub fn new() -> Self {
        Self {
            temporary_shapes: Vec::new(),
            persistent_shapes: HashMap::new(),
            enabled: true,
        }
    }

    /// Record a temporary shape
    pub fn draw(&mut self, shape: DebugShape) {
        if self.enabled {
            self.temporary_shapes.push(shape);
        }
    }

    /// Draw a line segment (temporary)
    pub fn draw_line(&mut self, start: Vector2, end: Vector2, color: Vector4, duration: f32) {
        self.draw(DebugShape::Line { start, end, color, duration });
    }

    /// Draw a circle outline (temporary)
    pub fn draw_circle(&mut self, center: Vector2, radius: f32, color: Vector4, duration: f32) {
        self.draw(DebugShape::Circle { center, radius, color, duration });
    }

    /// Draw a closed polygon outline (temporary)
    pub fn draw_polygon(&mut self, points: Vec<Vector2>, color: Vector4, duration: f32) {
        self.draw(DebugShape::Polygon { points, color, duration });
    }

    /// Draw a point (temporary)
    pub fn draw_point(&mut self, position: Vector2, color: Vector4, size: f32, duration: f32) {
        self.draw(DebugShape::Point { position, color, size, duration });
    }

    /// Draw a persistent shape that remains until explicitly removed
    pub fn draw_persistent(&mut self, id: impl Into<String>, shape: DebugShape) {
        if !self.enabled {
            return;
        }
        self.persistent_shapes.insert(id.into(), shape);
    }

    /// Remove a persistent shape
    pub fn clear_persistent(&mut self, id: &str) {
        self.persistent_shapes.remove(id);
    }

    /// Clear all persistent shapes
    pub fn clear_all_persistent(&mut self) {
        self.persistent_shapes.clear();
    }

    /// Update shape lifetimes and remove expired temporary shapes
    pub fn update(&mut self, delta_time: f32) {
        if !self.enabled {
            return;
        }
        self.temporary_shapes.retain_mut(|shape| !shape.tick(delta_time));
    }

    /// Get all shapes for rendering (both temporary and persistent)
    pub fn get_shapes(&self) -> Vec<&DebugShape> {
        if !self.enabled {
            return Vec::new();
        }
        self.temporary_shapes.iter().chain(self.persistent_shapes.values()).collect()
    }

    /// Get the number of active shapes
    pub fn shape_count(&self) -> usize {
        self.temporary_shapes.len() + self.persistent_shapes.len()
    }

    /// Clear all shapes (temporary and persistent)
    pub fn clear(&mut self) {
        self.temporary_shapes.clear();
        self.persistent_shapes.clear();
    }
}

impl Default for DebugDrawSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temporary_shape_expiration() {
        let mut system = DebugDrawSystem::new();
        system.draw_circle(Vector2::zero(), 1.0, colors::RED, 1.0);
        assert_eq!(system.shape_count(), 1);

        system.update(0.5);
        assert_eq!(system.shape_count(), 1);

        system.update(0.6);
        assert_eq!(system.shape_count(), 0);
    }

    #[test]
    fn test_single_frame_shapes() {
        let mut system = DebugDrawSystem::new();
        system.draw_line(Vector2::zero(), Vector2::X, colors::WHITE, 0.0);
        assert_eq!(system.get_shapes().len(), 1);
        system.update(1.0 / 60.0);
        assert!(system.get_shapes().is_empty());
    }

    #[test]
    fn test_persistent_shapes() {
        let mut system = DebugDrawSystem::new();
        system.draw_persistent(
            "arena",
            DebugShape::Polygon {
                points: vec![Vector2::zero(), Vector2::X, Vector2::Y],
                color: colors::GREY,
                duration: f32::INFINITY,
            },
        );
        for _ in 0..100 {
            system.update(1.0);
        }
        assert_eq!(system.shape_count(), 1);

        system.clear_persistent("arena");
        assert_eq!(system.shape_count(), 0);
    }

    #[test]
    fn test_disabled_system_records_nothing() {
        let mut system = DebugDrawSystem::new();
        system.enabled = false;
        system.draw_point(Vector2::zero(), colors::GREEN, 2.0, 1.0);
        assert_eq!(system.shape_count(), 0);
    }
}
