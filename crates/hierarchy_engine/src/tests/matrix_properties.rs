//! Algebraic properties of the matrix kernel

use crate::foundation::math::constants::{HALF_PI, PI};
use crate::foundation::math::{Matrix2, Matrix3, Matrix4, Vector2, Vector3};
use approx::assert_relative_eq;

fn sample_transforms() -> Vec<Matrix3> {
    let mut out = Vec::new();
    for (i, angle) in [0.0, 0.3, HALF_PI, 2.5, -1.1].into_iter().enumerate() {
        let offset = i as f32;
        let mut m = Matrix3::from_translation(offset * 3.0 - 4.0, 2.0 - offset);
        m.rotate_z(angle);
        m.scale(1.0 + offset * 0.5, 2.0 - offset * 0.25, 1.0);
        out.push(m);
    }
    out
}

#[test]
fn identity_is_neutral() {
    for m in sample_transforms() {
        assert_eq!(m * Matrix3::identity(), m);
        assert_eq!(Matrix3::identity() * m, m);
    }
    let m4 = Matrix4::from_rotation_y(0.7);
    assert_eq!(m4 * Matrix4::identity(), m4);
    let m2 = Matrix2::from_rotation(0.7);
    assert_eq!(Matrix2::identity() * m2, m2);
}

#[test]
fn multiplication_is_associative() {
    let samples = sample_transforms();
    for a in &samples {
        for b in &samples {
            for c in &samples {
                assert_relative_eq!((*a * *b) * *c, *a * (*b * *c), epsilon = 1e-3);
            }
        }
    }
}

#[test]
fn affine_products_keep_homogeneous_row() {
    let samples = sample_transforms();
    for a in &samples {
        for b in &samples {
            let p = *a * *b;
            assert_relative_eq!(p.get(2, 0), 0.0, epsilon = 1e-6);
            assert_relative_eq!(p.get(2, 1), 0.0, epsilon = 1e-6);
            assert_relative_eq!(p.get(2, 2), 1.0, epsilon = 1e-6);
        }
    }
}

#[test]
fn product_applies_right_operand_first() {
    let samples = sample_transforms();
    let point = Vector2::new(1.5, -2.0);
    for a in &samples {
        for b in &samples {
            let composed = (*a * *b).transform_point(point);
            let stepwise = a.transform_point(b.transform_point(point));
            assert_relative_eq!(composed, stepwise, epsilon = 1e-3);
        }
    }
}

#[test]
fn determinant_is_multiplicative() {
    let samples = sample_transforms();
    let a = samples[1];
    let b = samples[3];
    assert_relative_eq!((a * b).determinant(), a.determinant() * b.determinant(), max_relative = 1e-4);
}

#[test]
fn rotation_round_trips_through_accessor() {
    for angle in [0.0_f32, 0.5, 1.5, 3.0, -2.0] {
        let m = Matrix3::from_rotation_z(angle);
        assert_relative_eq!(m.rotation_z(), angle, epsilon = 1e-5);
    }
    assert_relative_eq!(Matrix3::from_rotation_z(PI).rotation_z().abs(), PI, epsilon = 1e-5);
}

#[test]
fn homogeneous_weight_selects_point_or_direction() {
    let mut m = Matrix3::from_translation(10.0, 20.0);
    m.rotate_z(HALF_PI);
    assert_relative_eq!(m * Vector3::point(1.0, 0.0), Vector3::new(10.0, 21.0, 1.0), epsilon = 1e-5);
    assert_relative_eq!(m * Vector3::direction(1.0, 0.0), Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-5);
}
