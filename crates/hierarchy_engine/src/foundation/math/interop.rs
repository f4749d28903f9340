//! Conversions between the engine math kernel and `nalgebra`
//!
//! Tools and tests that already speak `nalgebra` can hand values across
//! without copying element by element. Matrix storage is column-major on
//! both sides, so conversions are straight copies.

use nalgebra as na;

use super::{Matrix2, Matrix3, Matrix4, Vector2, Vector3, Vector4};

macro_rules! impl_vector_interop {
    ($name:ident, $na:ident { $($field:ident),+ }) => {
        impl From<na::$na<f32>> for $name {
            fn from(v: na::$na<f32>) -> Self {
                Self::new($(v.$field),+)
            }
        }

        impl From<$name> for na::$na<f32> {
            fn from(v: $name) -> Self {
                na::$na::new($(v.$field),+)
            }
        }
    };
}

macro_rules! impl_matrix_interop {
    ($name:ident, $na:ident) => {
        impl From<na::$na<f32>> for $name {
            fn from(m: na::$na<f32>) -> Self {
                Self::from_fn(|row, col| m[(row, col)])
            }
        }

        impl From<$name> for na::$na<f32> {
            fn from(m: $name) -> Self {
                na::$na::from_fn(|row, col| m.get(row, col))
            }
        }
    };
}

impl_vector_interop!(Vector2, Vector2 { x, y });
impl_vector_interop!(Vector3, Vector3 { x, y, z });
impl_vector_interop!(Vector4, Vector4 { x, y, z, w });

impl_matrix_interop!(Matrix2, Matrix2);
impl_matrix_interop!(Matrix3, Matrix3);
impl_matrix_interop!(Matrix4, Matrix4);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_product_agrees_with_nalgebra() {
        let mut a = Matrix3::from_rotation_z(0.9);
        a.translate(4.0, -1.0);
        let mut b = Matrix3::from_scale(1.5, -2.0, 1.0);
        b.rotate_z(0.2);
        b.set_translation(-3.0, 7.0);

        let na_a: na::Matrix3<f32> = a.into();
        let na_b: na::Matrix3<f32> = b.into();
        let expected: Matrix3 = (na_a * na_b).into();

        assert_relative_eq!(a * b, expected, epsilon = 1e-4);
    }

    #[test]
    fn test_matrix4_product_agrees_with_nalgebra() {
        let a = Matrix4::from_fn(|row, col| (row as f32 - col as f32) * 0.75 + 1.0);
        let mut b = Matrix4::from_rotation_x(0.4);
        b.translate(1.0, 2.0, 3.0);

        let expected: Matrix4 = (na::Matrix4::from(a) * na::Matrix4::from(b)).into();
        assert_relative_eq!(a * b, expected, epsilon = 1e-4);
    }

    #[test]
    fn test_vector_transform_agrees_with_nalgebra() {
        let m = Matrix3::from_rotation_z(1.2);
        let v = Vector3::new(2.0, -1.0, 1.0);
        let expected: Vector3 = (na::Matrix3::from(m) * na::Vector3::from(v)).into();
        assert_relative_eq!(m * v, expected, epsilon = 1e-5);
    }
}
