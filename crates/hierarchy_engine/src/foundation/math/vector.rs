//! Fixed-size vector types
//!
//! `Vector2`, `Vector3` and `Vector4` are small `Copy` value types. They are
//! immutable by convention: every operator returns a new value, and the only
//! in-place operations are the `*Assign` operators and [`Vector3::normalize`]
//! (and its siblings).
//!
//! Gameplay is 2D. `Vector3` doubles as a homogeneous 2D point (`z == 1`) or
//! direction (`z == 0`) when it is multiplied by a [`Matrix3`](super::Matrix3).

use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use super::MathError;

/// Squared magnitude below which a vector is treated as zero-length.
pub const NORMALIZE_EPSILON: f32 = 1.0e-12;

/// Operators, approx impls and the shared method set for every vector type.
macro_rules! impl_vector {
    ($name:ident { $($field:ident),+ }) => {
        impl $name {
            /// Create a vector from its components
            #[inline]
            pub const fn new($($field: f32),+) -> Self {
                Self { $($field),+ }
            }

            /// The zero vector
            #[inline]
            pub const fn zero() -> Self {
                Self { $($field: 0.0),+ }
            }

            /// A vector with every component set to `value`
            #[inline]
            pub const fn splat(value: f32) -> Self {
                Self { $($field: value),+ }
            }

            /// Dot product
            #[inline]
            pub fn dot(self, rhs: Self) -> f32 {
                0.0 $(+ self.$field * rhs.$field)+
            }

            /// Squared Euclidean length.
            ///
            /// Prefer this over [`Self::magnitude`] whenever the result is only
            /// compared against a squared threshold.
            #[inline]
            pub fn magnitude_squared(self) -> f32 {
                self.dot(self)
            }

            /// Euclidean length
            #[inline]
            pub fn magnitude(self) -> f32 {
                self.magnitude_squared().sqrt()
            }

            /// Euclidean distance between two points
            #[inline]
            pub fn distance(self, other: Self) -> f32 {
                (self - other).magnitude()
            }

            /// Squared Euclidean distance between two points
            #[inline]
            pub fn distance_squared(self, other: Self) -> f32 {
                (self - other).magnitude_squared()
            }

            /// Unit-length copy of this vector, or an error if the vector has
            /// no direction (zero or non-finite length).
            pub fn try_normalized(self) -> Result<Self, MathError> {
                let length_squared = self.magnitude_squared();
                if length_squared <= NORMALIZE_EPSILON || !length_squared.is_finite() {
                    return Err(MathError::ZeroLengthVector);
                }
                Ok(self / length_squared.sqrt())
            }

            /// Unit-length copy of this vector.
            ///
            /// A zero-length (or non-finite) vector normalizes to the zero
            /// vector, so NaN never leaks out of this call.
            pub fn normalized(self) -> Self {
                self.try_normalized().unwrap_or_else(|_| Self::zero())
            }

            /// Normalize in place.
            ///
            /// On a zero-length vector this returns
            /// [`MathError::ZeroLengthVector`] and leaves the value untouched.
            pub fn normalize(&mut self) -> Result<(), MathError> {
                *self = self.try_normalized()?;
                Ok(())
            }

            /// Angle in radians between two vectors, in `[0, PI]`.
            ///
            /// The dot product of the normalized inputs is clamped to
            /// `[-1, 1]` before `acos`. Returns `0.0` when either vector is
            /// zero-length.
            pub fn angle_between(self, other: Self) -> f32 {
                match (self.try_normalized(), other.try_normalized()) {
                    (Ok(a), Ok(b)) => a.dot(b).clamp(-1.0, 1.0).acos(),
                    _ => 0.0,
                }
            }

            /// Component-wise minimum
            #[inline]
            pub fn min(self, other: Self) -> Self {
                Self { $($field: self.$field.min(other.$field)),+ }
            }

            /// Component-wise maximum
            #[inline]
            pub fn max(self, other: Self) -> Self {
                Self { $($field: self.$field.max(other.$field)),+ }
            }

            /// Component-wise clamp into `[lo, hi]`.
            ///
            /// Applies `max(lo)` then `min(hi)`, so an inverted range never
            /// panics (unlike `f32::clamp`).
            #[inline]
            pub fn clamp(self, lo: Self, hi: Self) -> Self {
                self.max(lo).min(hi)
            }

            /// Component-wise absolute value
            #[inline]
            pub fn abs(self) -> Self {
                Self { $($field: self.$field.abs()),+ }
            }

            /// Linear interpolation towards `to`
            #[inline]
            pub fn lerp(self, to: Self, t: f32) -> Self {
                self + (to - self) * t
            }

            /// True if every component is finite
            #[inline]
            pub fn is_finite(self) -> bool {
                true $(&& self.$field.is_finite())+
            }
        }

        impl Add for $name {
            type Output = Self;
            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl AddAssign for $name {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                $(self.$field += rhs.$field;)+
            }
        }

        impl Sub for $name {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl SubAssign for $name {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                $(self.$field -= rhs.$field;)+
            }
        }

        impl Mul<f32> for $name {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: f32) -> Self {
                Self { $($field: self.$field * rhs),+ }
            }
        }

        impl Mul<$name> for f32 {
            type Output = $name;
            #[inline]
            fn mul(self, rhs: $name) -> $name {
                rhs * self
            }
        }

        impl MulAssign<f32> for $name {
            #[inline]
            fn mul_assign(&mut self, rhs: f32) {
                $(self.$field *= rhs;)+
            }
        }

        impl Div<f32> for $name {
            type Output = Self;
            #[inline]
            fn div(self, rhs: f32) -> Self {
                Self { $($field: self.$field / rhs),+ }
            }
        }

        impl DivAssign<f32> for $name {
            #[inline]
            fn div_assign(&mut self, rhs: f32) {
                $(self.$field /= rhs;)+
            }
        }

        impl Neg for $name {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }

        impl approx::AbsDiffEq for $name {
            type Epsilon = f32;

            fn default_epsilon() -> f32 {
                f32::EPSILON
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
                true $(&& approx::AbsDiffEq::abs_diff_eq(&self.$field, &other.$field, epsilon))+
            }
        }

        impl approx::RelativeEq for $name {
            fn default_max_relative() -> f32 {
                f32::EPSILON
            }

            fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
                true $(&& approx::RelativeEq::relative_eq(&self.$field, &other.$field, epsilon, max_relative))+
            }
        }
    };
}

/// Two-component vector
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vector2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

/// Three-component vector, also used as a homogeneous 2D point/direction
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vector3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component (homogeneous weight when used with `Matrix3`)
    pub z: f32,
}

/// Four-component vector
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vector4 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
    /// W component
    pub w: f32,
}

impl_vector!(Vector2 { x, y });
impl_vector!(Vector3 { x, y, z });
impl_vector!(Vector4 { x, y, z, w });

impl Vector2 {
    /// Unit vector along +X
    pub const X: Self = Self::new(1.0, 0.0);
    /// Unit vector along +Y
    pub const Y: Self = Self::new(0.0, 1.0);

    /// Perpendicular vector rotated a quarter turn counter-clockwise (y-up): `(-y, x)`
    ///
    /// Same as rotating by `+HALF_PI`.
    #[inline]
    pub fn perpendicular(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Perpendicular vector rotated a quarter turn clockwise (y-up): `(y, -x)`
    ///
    /// Same as rotating by `-HALF_PI`. The name follows a y-down screen,
    /// where this normal lands on the left.
    #[inline]
    pub fn perpendicular_left(self) -> Self {
        Self::new(self.y, -self.x)
    }

    /// 2D cross product (z of the 3D cross product)
    #[inline]
    pub fn perp_dot(self, rhs: Self) -> f32 {
        self.x * rhs.y - self.y * rhs.x
    }

    /// Extend to a `Vector3` with the given z
    #[inline]
    pub fn extend(self, z: f32) -> Vector3 {
        Vector3::new(self.x, self.y, z)
    }

    /// Unit vector pointing at `radians` from +X, counter-clockwise
    #[inline]
    pub fn from_angle(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new(cos, sin)
    }
}

impl Vector3 {
    /// Unit vector along +X
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    /// Unit vector along +Y
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// Unit vector along +Z
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Homogeneous 2D point (weight 1, picks up translation)
    #[inline]
    pub const fn point(x: f32, y: f32) -> Self {
        Self::new(x, y, 1.0)
    }

    /// Homogeneous 2D direction (weight 0, ignores translation)
    #[inline]
    pub const fn direction(x: f32, y: f32) -> Self {
        Self::new(x, y, 0.0)
    }

    /// Cross product (right-handed)
    #[inline]
    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    /// Drop the z component
    #[inline]
    pub fn truncate(self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    /// Extend to a `Vector4` with the given w
    #[inline]
    pub fn extend(self, w: f32) -> Vector4 {
        Vector4::new(self.x, self.y, self.z, w)
    }
}

impl Vector4 {
    /// Drop the w component
    #[inline]
    pub fn truncate(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<Vector2> for Vector3 {
    /// Lifts a 2D position into the plane `z = 0`
    fn from(v: Vector2) -> Self {
        v.extend(0.0)
    }
}

impl From<[f32; 2]> for Vector2 {
    fn from([x, y]: [f32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<[f32; 4]> for Vector4 {
    fn from([x, y, z, w]: [f32; 4]) -> Self {
        Self::new(x, y, z, w)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl fmt::Display for Vector4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::{HALF_PI, PI};
    use crate::foundation::math::Matrix3;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_magnitude_and_squared() {
        let v = Vector3::new(3.0, 4.0, 0.0);
        assert_eq!(v.magnitude_squared(), 25.0);
        assert_eq!(v.magnitude(), 5.0);
        assert_eq!(Vector4::new(1.0, 1.0, 1.0, 1.0).magnitude(), 2.0);
    }

    #[test]
    fn test_normalized_has_unit_length() {
        let samples = [
            Vector3::new(3.0, 4.0, 0.0),
            Vector3::new(-0.001, 0.002, 0.0),
            Vector3::new(1.0e6, -2.0e6, 3.0e6),
            Vector3::new(0.0, 0.0, -7.5),
        ];
        for v in samples {
            assert_relative_eq!(v.normalized().magnitude(), 1.0, epsilon = EPSILON);
        }
        assert_relative_eq!(Vector2::new(-5.0, 12.0).normalized().magnitude(), 1.0, epsilon = EPSILON);
        assert_relative_eq!(Vector4::new(1.0, 2.0, 3.0, 4.0).normalized().magnitude(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_zero_vector_normalization_is_defined() {
        let zero = Vector3::zero();
        assert_eq!(zero.normalized(), Vector3::zero());
        assert_eq!(zero.try_normalized(), Err(MathError::ZeroLengthVector));

        let mut v = Vector2::zero();
        assert_eq!(v.normalize(), Err(MathError::ZeroLengthVector));
        assert_eq!(v, Vector2::zero());
        assert!(v.normalized().is_finite());
    }

    #[test]
    fn test_normalize_in_place() {
        let mut v = Vector2::new(0.0, -9.0);
        v.normalize().unwrap();
        assert_eq!(v, Vector2::new(0.0, -1.0));
    }

    #[test]
    fn test_cross_product_right_handed() {
        assert_relative_eq!(Vector3::X.cross(Vector3::Y), Vector3::Z, epsilon = EPSILON);
        assert_relative_eq!(Vector3::Y.cross(Vector3::Z), Vector3::X, epsilon = EPSILON);
        assert_relative_eq!(Vector3::Z.cross(Vector3::X), Vector3::Y, epsilon = EPSILON);
    }

    #[test]
    fn test_distance() {
        let a = Vector2::new(1.0, 1.0);
        let b = Vector2::new(4.0, 5.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.distance_squared(b), 25.0);
    }

    #[test]
    fn test_angle_between_clamps_rounding() {
        let v = Vector3::new(0.1, 0.7, 0.3);
        // Parallel vectors can round to a dot product just above 1.
        let angle = v.angle_between(v * 3.0);
        assert!(!angle.is_nan());
        assert_abs_diff_eq!(angle, 0.0, epsilon = 1e-3);

        assert_relative_eq!(Vector2::X.angle_between(Vector2::Y), HALF_PI, epsilon = EPSILON);
        assert_relative_eq!(Vector2::X.angle_between(-Vector2::X), PI, epsilon = EPSILON);
        assert_eq!(Vector2::zero().angle_between(Vector2::X), 0.0);
    }

    #[test]
    fn test_perpendiculars() {
        let v = Vector2::new(2.0, 1.0);
        assert_eq!(v.perpendicular(), Vector2::new(-1.0, 2.0));
        assert_eq!(v.perpendicular_left(), Vector2::new(1.0, -2.0));
        assert_eq!(v.dot(v.perpendicular()), 0.0);
    }

    #[test]
    fn test_perpendicular_matches_positive_quarter_turn() {
        let turned = Matrix3::from_rotation_z(HALF_PI).transform_vector(Vector2::X);
        assert_abs_diff_eq!(turned.x, Vector2::X.perpendicular().x, epsilon = EPSILON);
        assert_abs_diff_eq!(turned.y, Vector2::X.perpendicular().y, epsilon = EPSILON);
        let back = Matrix3::from_rotation_z(-HALF_PI).transform_vector(Vector2::X);
        assert_abs_diff_eq!(back.y, Vector2::X.perpendicular_left().y, epsilon = EPSILON);
    }

    #[test]
    fn test_clamp_with_inverted_range_does_not_panic() {
        let p = Vector3::new(5.0, 5.0, 5.0);
        let clamped = p.clamp(Vector3::splat(f32::INFINITY), Vector3::splat(f32::NEG_INFINITY));
        assert_eq!(clamped, Vector3::splat(f32::NEG_INFINITY));
    }

    #[test]
    fn test_operators() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vector3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vector3::splat(3.0));
        assert_eq!(a * 2.0, 2.0 * a);
        assert_eq!(b / 2.0, Vector3::new(2.0, 2.5, 3.0));
        assert_eq!(-a, Vector3::new(-1.0, -2.0, -3.0));
        assert_eq!(a.dot(b), 32.0);

        let mut c = a;
        c += b;
        c -= a;
        c *= 2.0;
        c /= 4.0;
        assert_eq!(c, Vector3::new(2.0, 2.5, 3.0));
    }
}
