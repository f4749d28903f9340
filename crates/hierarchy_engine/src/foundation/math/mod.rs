//! Math utilities and types
//!
//! A small self-contained kernel for 2D game transforms: fixed-size vectors,
//! column-major square matrices, and the angle helpers the rest of the
//! engine leans on. Conversions to and from `nalgebra` live in [`interop`].
//!
//! World space is y-up: +X points right, +Y up, and a positive angle turns
//! counter-clockwise.

mod matrix;
mod vector;

pub mod interop;

pub use matrix::{Matrix2, Matrix3, Matrix4};
pub use vector::{Vector2, Vector3, Vector4, NORMALIZE_EPSILON};

use thiserror::Error;

/// Math errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// A zero-length (or non-finite) vector has no direction
    #[error("cannot normalize a zero-length vector")]
    ZeroLengthVector,
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Pi / 4
    pub const QUARTER_PI: f32 = PI * 0.25;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Wrap an angle into `(-PI, PI]`
    pub fn wrap_angle(radians: f32) -> f32 {
        let wrapped = (radians + constants::PI).rem_euclid(constants::TAU) - constants::PI;
        if wrapped <= -constants::PI {
            wrapped + constants::TAU
        } else {
            wrapped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::constants::*;
    use super::utils::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_angle_conversions() {
        assert_relative_eq!(deg_to_rad(180.0), PI);
        assert_relative_eq!(rad_to_deg(HALF_PI), 90.0);
    }

    #[test]
    fn test_wrap_angle() {
        assert_relative_eq!(wrap_angle(TAU + 0.5), 0.5, epsilon = 1e-5);
        assert_relative_eq!(wrap_angle(-PI), PI, epsilon = 1e-5);
        assert_relative_eq!(wrap_angle(3.0 * HALF_PI), -HALF_PI, epsilon = 1e-5);
    }

    #[test]
    fn test_lerp() {
        assert_relative_eq!(lerp(2.0, 4.0, 0.25), 2.5);
    }
}
