//! Collision-specific debug visualization

use crate::debug::draw::{colors, DebugDrawSystem};
use crate::foundation::math::{Vector2, Vector4};
use crate::physics::collision::Collider;

/// Color scheme for collision visualization
#[derive(Clone, Debug)]
pub struct CollisionDebugColors {
    /// Outline of a collider that is not overlapping anything
    pub shape_default: Vector4,
    /// Outline of a collider that is currently overlapping
    pub shape_colliding: Vector4,
    /// Box corners at even indices
    pub corner_even: Vector4,
    /// Box corners at odd indices
    pub corner_odd: Vector4,
}

impl Default for CollisionDebugColors {
    fn default() -> Self {
        Self {
            shape_default: Vector4::new(0.0, 1.0, 0.0, 0.6),
            shape_colliding: Vector4::new(1.0, 0.0, 0.0, 0.8),
            corner_even: colors::YELLOW,
            corner_odd: colors::BLUE,
        }
    }
}

/// Record a single-frame outline of a collider
///
/// Boxes also get their four corners as points, alternating color by index
/// parity in [`AABB::corners`](crate::physics::AABB::corners) order.
pub fn draw_collider(draw: &mut DebugDrawSystem, collider: &Collider, palette: &CollisionDebugColors, colliding: bool) {
    let outline = if colliding { palette.shape_colliding } else { palette.shape_default };
    match collider {
        Collider::Sphere(sphere) => {
            draw.draw_circle(sphere.center().truncate(), sphere.radius(), outline, 0.0);
        }
        Collider::Aabb(aabb) => {
            if aabb.is_empty() {
                return;
            }
            let corners: Vec<Vector2> = aabb.corners().iter().map(|corner| corner.truncate()).collect();
            for (index, corner) in corners.iter().enumerate() {
                let color = if index % 2 == 0 { palette.corner_even } else { palette.corner_odd };
                draw.draw_point(*corner, color, 3.0, 0.0);
            }
            draw.draw_polygon(corners, outline, 0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::DebugShape;
    use crate::foundation::math::Vector3;
    use crate::physics::collision::{Sphere, AABB};

    #[test]
    fn test_box_corners_alternate_color() {
        let mut draw = DebugDrawSystem::new();
        let palette = CollisionDebugColors::default();
        let aabb = AABB::new(Vector3::zero(), Vector3::new(4.0, 2.0, 0.0));
        draw_collider(&mut draw, &aabb.into(), &palette, false);

        let point_colors: Vec<Vector4> = draw
            .get_shapes()
            .into_iter()
            .filter(|shape| matches!(shape, DebugShape::Point { .. }))
            .map(DebugShape::color)
            .collect();
        assert_eq!(
            point_colors,
            vec![palette.corner_even, palette.corner_odd, palette.corner_even, palette.corner_odd]
        );
        assert_eq!(draw.shape_count(), 5);
    }

    #[test]
    fn test_sphere_draws_circle_in_colliding_color() {
        let mut draw = DebugDrawSystem::new();
        let palette = CollisionDebugColors::default();
        draw_collider(&mut draw, &Sphere::new(Vector3::new(1.0, 2.0, 0.0), 3.0).into(), &palette, true);
        assert_eq!(
            draw.get_shapes(),
            vec![&DebugShape::Circle {
                center: Vector2::new(1.0, 2.0),
                radius: 3.0,
                color: palette.shape_colliding,
                duration: 0.0,
            }]
        );
    }

    #[test]
    fn test_empty_box_draws_nothing() {
        let mut draw = DebugDrawSystem::new();
        draw_collider(&mut draw, &AABB::empty().into(), &CollisionDebugColors::default(), false);
        assert_eq!(draw.shape_count(), 0);
    }
}
