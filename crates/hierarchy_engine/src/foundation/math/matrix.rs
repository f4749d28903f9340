//! Square matrix types
//!
//! All matrices are stored column-major (`cols[column][row]`), the layout
//! render backends expect, and act on column vectors: `m * v`.
//!
//! - [`Matrix2`] is a 2D linear transform (rotation/scale only).
//! - [`Matrix3`] is the workhorse: a 2D affine transform in homogeneous form.
//!   The upper-left 2×2 block is the linear part, the third column holds the
//!   translation, and the bottom row stays `(0, 0, 1)` for every affine
//!   helper, so a point multiplied with weight 1 keeps weight 1.
//! - [`Matrix4`] is the 3D homogeneous analogue.
//!
//! The `translate`/`rotate_*`/`scale` family right-multiplies an elementary
//! matrix onto the current one (`self = self * elementary`), composing an
//! additional transform in the matrix's local frame. The `set_*` family
//! replaces.

use std::fmt;
use std::ops::{Mul, MulAssign};

use bytemuck::{Pod, Zeroable};

use super::{Vector2, Vector3, Vector4};

/// Shared construction, composition and comparison for every matrix size.
macro_rules! impl_matrix {
    ($name:ident, $vector:ident, $n:literal) => {
        impl $name {
            /// Build a matrix from a function of `(row, col)`
            pub fn from_fn(mut f: impl FnMut(usize, usize) -> f32) -> Self {
                let mut cols = [[0.0; $n]; $n];
                for (col, column) in cols.iter_mut().enumerate() {
                    for (row, cell) in column.iter_mut().enumerate() {
                        *cell = f(row, col);
                    }
                }
                Self { cols }
            }

            /// Build a matrix from column-major storage
            pub const fn from_cols_array(cols: [[f32; $n]; $n]) -> Self {
                Self { cols }
            }

            /// Build a matrix from rows as they read on paper
            pub fn from_rows_array(rows: [[f32; $n]; $n]) -> Self {
                // Row-major input is the transpose of our storage.
                Self { cols: rows }.transposed()
            }

            /// The identity matrix
            pub fn identity() -> Self {
                Self::from_fn(|row, col| if row == col { 1.0 } else { 0.0 })
            }

            /// Element at `(row, col)`
            #[inline]
            pub fn get(&self, row: usize, col: usize) -> f32 {
                self.cols[col][row]
            }

            /// Set the element at `(row, col)`
            #[inline]
            pub fn set(&mut self, row: usize, col: usize, value: f32) {
                self.cols[col][row] = value;
            }

            /// Column `col` as a vector
            #[inline]
            pub fn col(&self, col: usize) -> $vector {
                $vector::from(self.cols[col])
            }

            /// Row `row` as a vector
            #[inline]
            pub fn row(&self, row: usize) -> $vector {
                let mut cells = [0.0; $n];
                for (col, cell) in cells.iter_mut().enumerate() {
                    *cell = self.cols[col][row];
                }
                $vector::from(cells)
            }

            /// Matrix with rows and columns swapped
            pub fn transposed(&self) -> Self {
                Self::from_fn(|row, col| self.cols[row][col])
            }

            /// Column-major storage
            #[inline]
            pub const fn to_cols_array(&self) -> [[f32; $n]; $n] {
                self.cols
            }

            /// Flat column-major view, ready to upload as a uniform
            #[inline]
            pub fn as_flat_slice(&self) -> &[f32] {
                bytemuck::cast_slice(&self.cols)
            }

            /// True if every element is finite
            pub fn is_finite(&self) -> bool {
                self.cols.iter().flatten().all(|cell| cell.is_finite())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::identity()
            }
        }

        impl Mul for $name {
            type Output = Self;

            /// Matrix product: every cell is the dot product of a row of
            /// `self` with a column of `rhs`.
            fn mul(self, rhs: Self) -> Self {
                Self::from_fn(|row, col| self.row(row).dot(rhs.col(col)))
            }
        }

        impl MulAssign for $name {
            fn mul_assign(&mut self, rhs: Self) {
                *self = *self * rhs;
            }
        }

        impl Mul<$vector> for $name {
            type Output = $vector;

            fn mul(self, rhs: $vector) -> $vector {
                let mut cells = [0.0; $n];
                for (row, cell) in cells.iter_mut().enumerate() {
                    *cell = self.row(row).dot(rhs);
                }
                $vector::from(cells)
            }
        }

        impl approx::AbsDiffEq for $name {
            type Epsilon = f32;

            fn default_epsilon() -> f32 {
                f32::EPSILON
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
                self.cols
                    .iter()
                    .flatten()
                    .zip(other.cols.iter().flatten())
                    .all(|(a, b)| approx::AbsDiffEq::abs_diff_eq(a, b, epsilon))
            }
        }

        impl approx::RelativeEq for $name {
            fn default_max_relative() -> f32 {
                f32::EPSILON
            }

            fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
                self.cols
                    .iter()
                    .flatten()
                    .zip(other.cols.iter().flatten())
                    .all(|(a, b)| approx::RelativeEq::relative_eq(a, b, epsilon, max_relative))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                for row in 0..$n {
                    let cells: Vec<String> = (0..$n).map(|col| format!("{:>10.4}", self.get(row, col))).collect();
                    writeln!(f, "[{}]", cells.join(", "))?;
                }
                Ok(())
            }
        }
    };
}

/// 2×2 linear transform (rotation and scale in the plane)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Matrix2 {
    cols: [[f32; 2]; 2],
}

/// 3×3 matrix, used as a 2D affine transform in homogeneous form
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Matrix3 {
    cols: [[f32; 3]; 3],
}

/// 4×4 matrix, used as a 3D affine transform in homogeneous form
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Matrix4 {
    cols: [[f32; 4]; 4],
}

impl_matrix!(Matrix2, Vector2, 2);
impl_matrix!(Matrix3, Vector3, 3);
impl_matrix!(Matrix4, Vector4, 4);

impl Matrix2 {
    /// Pure scale matrix
    pub fn from_scale(x: f32, y: f32) -> Self {
        Self::from_cols_array([[x, 0.0], [0.0, y]])
    }

    /// Pure counter-clockwise rotation in the plane
    pub fn from_rotation(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::from_cols_array([[cos, sin], [-sin, cos]])
    }

    /// Replace with a pure scale
    pub fn set_scaled(&mut self, x: f32, y: f32) {
        *self = Self::from_scale(x, y);
    }

    /// Replace with a pure rotation about the (implicit) Z axis
    pub fn set_rotate_z(&mut self, radians: f32) {
        *self = Self::from_rotation(radians);
    }

    /// Compose an additional scale
    pub fn scale(&mut self, x: f32, y: f32) {
        *self *= Self::from_scale(x, y);
    }

    /// Compose an additional rotation
    pub fn rotate_z(&mut self, radians: f32) {
        *self *= Self::from_rotation(radians);
    }

    /// Determinant
    pub fn determinant(&self) -> f32 {
        self.get(0, 0) * self.get(1, 1) - self.get(0, 1) * self.get(1, 0)
    }
}

impl Matrix3 {
    /// Build from three column vectors
    pub fn from_cols(x_axis: Vector3, y_axis: Vector3, translation: Vector3) -> Self {
        Self::from_cols_array([
            [x_axis.x, x_axis.y, x_axis.z],
            [y_axis.x, y_axis.y, y_axis.z],
            [translation.x, translation.y, translation.z],
        ])
    }

    /// Pure 2D translation
    pub fn from_translation(x: f32, y: f32) -> Self {
        let mut m = Self::identity();
        m.set_translation(x, y);
        m
    }

    /// Pure counter-clockwise rotation in the XY plane
    pub fn from_rotation_z(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::from_cols_array([[cos, sin, 0.0], [-sin, cos, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Rotation about the X axis (3D linear; leaves the 2D affine subset)
    pub fn from_rotation_x(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::from_cols_array([[1.0, 0.0, 0.0], [0.0, cos, sin], [0.0, -sin, cos]])
    }

    /// Rotation about the Y axis (3D linear; leaves the 2D affine subset)
    pub fn from_rotation_y(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::from_cols_array([[cos, 0.0, -sin], [0.0, 1.0, 0.0], [sin, 0.0, cos]])
    }

    /// Pure scale. Keep `z == 1` for affine use.
    pub fn from_scale(x: f32, y: f32, z: f32) -> Self {
        Self::from_cols_array([[x, 0.0, 0.0], [0.0, y, 0.0], [0.0, 0.0, z]])
    }

    /// Replace with a pure scale
    pub fn set_scaled(&mut self, x: f32, y: f32, z: f32) {
        *self = Self::from_scale(x, y, z);
    }

    /// Replace with a pure scale taken from a vector
    pub fn set_scaled_vector(&mut self, v: Vector3) {
        self.set_scaled(v.x, v.y, v.z);
    }

    /// Replace with a pure rotation about X
    pub fn set_rotate_x(&mut self, radians: f32) {
        *self = Self::from_rotation_x(radians);
    }

    /// Replace with a pure rotation about Y
    pub fn set_rotate_y(&mut self, radians: f32) {
        *self = Self::from_rotation_y(radians);
    }

    /// Replace with a pure rotation about Z
    pub fn set_rotate_z(&mut self, radians: f32) {
        *self = Self::from_rotation_z(radians);
    }

    /// Replace with the Euler rotation `Z(roll) * Y(yaw) * X(pitch)`
    pub fn set_euler(&mut self, pitch: f32, yaw: f32, roll: f32) {
        *self = Self::from_rotation_z(roll) * Self::from_rotation_y(yaw) * Self::from_rotation_x(pitch);
    }

    /// Overwrite the translation column, keeping the linear block
    pub fn set_translation(&mut self, x: f32, y: f32) {
        self.cols[2] = [x, y, 1.0];
    }

    /// Compose an additional scale
    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        *self *= Self::from_scale(x, y, z);
    }

    /// Compose an additional rotation about X
    pub fn rotate_x(&mut self, radians: f32) {
        *self *= Self::from_rotation_x(radians);
    }

    /// Compose an additional rotation about Y
    pub fn rotate_y(&mut self, radians: f32) {
        *self *= Self::from_rotation_y(radians);
    }

    /// Compose an additional rotation about Z
    pub fn rotate_z(&mut self, radians: f32) {
        *self *= Self::from_rotation_z(radians);
    }

    /// Compose an additional translation, expressed in this matrix's frame
    pub fn translate(&mut self, x: f32, y: f32) {
        *self *= Self::from_translation(x, y);
    }

    /// Translation component
    pub fn translation(&self) -> Vector2 {
        Vector2::new(self.cols[2][0], self.cols[2][1])
    }

    /// Rotation angle of the linear block, from the direction of its X axis
    pub fn rotation_z(&self) -> f32 {
        self.cols[0][1].atan2(self.cols[0][0])
    }

    /// Per-axis scale of the linear block (lengths of its X and Y axes)
    pub fn scale_2d(&self) -> Vector2 {
        Vector2::new(
            Vector2::new(self.cols[0][0], self.cols[0][1]).magnitude(),
            Vector2::new(self.cols[1][0], self.cols[1][1]).magnitude(),
        )
    }

    /// The linear 2×2 block
    pub fn linear(&self) -> Matrix2 {
        Matrix2::from_cols_array([
            [self.cols[0][0], self.cols[0][1]],
            [self.cols[1][0], self.cols[1][1]],
        ])
    }

    /// Replace the linear 2×2 block, keeping the translation
    pub fn set_linear(&mut self, linear: Matrix2) {
        let cols = linear.to_cols_array();
        self.cols[0] = [cols[0][0], cols[0][1], 0.0];
        self.cols[1] = [cols[1][0], cols[1][1], 0.0];
    }

    /// Transform a 2D point (weight 1, translation applies)
    pub fn transform_point(&self, point: Vector2) -> Vector2 {
        (*self * Vector3::point(point.x, point.y)).truncate()
    }

    /// Transform a 2D direction (weight 0, translation ignored)
    pub fn transform_vector(&self, vector: Vector2) -> Vector2 {
        (*self * Vector3::direction(vector.x, vector.y)).truncate()
    }

    /// Determinant
    pub fn determinant(&self) -> f32 {
        self.col(0).dot(self.col(1).cross(self.col(2)))
    }
}

impl Matrix4 {
    /// Pure 3D translation
    pub fn from_translation(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::identity();
        m.set_translation(x, y, z);
        m
    }

    /// Pure scale (w stays 1)
    pub fn from_scale(x: f32, y: f32, z: f32) -> Self {
        Self::from_cols_array([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about X
    pub fn from_rotation_x(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::from_cols_array([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, cos, sin, 0.0],
            [0.0, -sin, cos, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about Y
    pub fn from_rotation_y(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::from_cols_array([
            [cos, 0.0, -sin, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [sin, 0.0, cos, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about Z
    pub fn from_rotation_z(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::from_cols_array([
            [cos, sin, 0.0, 0.0],
            [-sin, cos, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Replace with a pure scale
    pub fn set_scaled(&mut self, x: f32, y: f32, z: f32) {
        *self = Self::from_scale(x, y, z);
    }

    /// Replace with a pure rotation about X
    pub fn set_rotate_x(&mut self, radians: f32) {
        *self = Self::from_rotation_x(radians);
    }

    /// Replace with a pure rotation about Y
    pub fn set_rotate_y(&mut self, radians: f32) {
        *self = Self::from_rotation_y(radians);
    }

    /// Replace with a pure rotation about Z
    pub fn set_rotate_z(&mut self, radians: f32) {
        *self = Self::from_rotation_z(radians);
    }

    /// Replace with the Euler rotation `Z(roll) * Y(yaw) * X(pitch)`
    pub fn set_euler(&mut self, pitch: f32, yaw: f32, roll: f32) {
        *self = Self::from_rotation_z(roll) * Self::from_rotation_y(yaw) * Self::from_rotation_x(pitch);
    }

    /// Overwrite the translation column, keeping the linear block
    pub fn set_translation(&mut self, x: f32, y: f32, z: f32) {
        self.cols[3] = [x, y, z, 1.0];
    }

    /// Compose an additional scale
    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        *self *= Self::from_scale(x, y, z);
    }

    /// Compose an additional rotation about X
    pub fn rotate_x(&mut self, radians: f32) {
        *self *= Self::from_rotation_x(radians);
    }

    /// Compose an additional rotation about Y
    pub fn rotate_y(&mut self, radians: f32) {
        *self *= Self::from_rotation_y(radians);
    }

    /// Compose an additional rotation about Z
    pub fn rotate_z(&mut self, radians: f32) {
        *self *= Self::from_rotation_z(radians);
    }

    /// Compose an additional translation, expressed in this matrix's frame
    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        *self *= Self::from_translation(x, y, z);
    }

    /// Translation component
    pub fn translation(&self) -> Vector3 {
        Vector3::new(self.cols[3][0], self.cols[3][1], self.cols[3][2])
    }

    /// Transform a 3D point (weight 1)
    pub fn transform_point(&self, point: Vector3) -> Vector3 {
        (*self * point.extend(1.0)).truncate()
    }

    /// Transform a 3D direction (weight 0)
    pub fn transform_vector(&self, vector: Vector3) -> Vector3 {
        (*self * vector.extend(0.0)).truncate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::{HALF_PI, PI, QUARTER_PI};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn sample_matrices3() -> [Matrix3; 4] {
        let mut a = Matrix3::from_rotation_z(0.7);
        a.translate(3.0, -2.0);
        let mut b = Matrix3::from_scale(2.0, 0.5, 1.0);
        b.rotate_z(-1.3);
        let c = Matrix3::from_rows_array([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 10.0]]);
        let mut d = Matrix3::identity();
        d.set_euler(0.2, -0.4, 1.1);
        [a, b, c, d]
    }

    fn sample_matrices4() -> [Matrix4; 3] {
        let mut a = Matrix4::from_rotation_y(0.3);
        a.translate(1.0, 2.0, 3.0);
        let mut b = Matrix4::from_scale(1.5, 2.0, 0.25);
        b.rotate_x(2.1);
        let c = Matrix4::from_fn(|row, col| (row * 4 + col) as f32 * 0.5 - 3.0);
        [a, b, c]
    }

    #[test]
    fn test_identity_is_neutral() {
        for m in sample_matrices3() {
            assert_relative_eq!(m * Matrix3::identity(), m, epsilon = EPSILON);
            assert_relative_eq!(Matrix3::identity() * m, m, epsilon = EPSILON);
        }
        for m in sample_matrices4() {
            assert_relative_eq!(m * Matrix4::identity(), m, epsilon = EPSILON);
        }
        let m = Matrix2::from_rotation(0.4) * Matrix2::from_scale(3.0, -1.0);
        assert_relative_eq!(m * Matrix2::identity(), m, epsilon = EPSILON);
    }

    #[test]
    fn test_multiplication_is_associative() {
        let m3 = sample_matrices3();
        for a in m3 {
            for b in m3 {
                for c in m3 {
                    assert_relative_eq!((a * b) * c, a * (b * c), epsilon = 1e-3, max_relative = 1e-4);
                }
            }
        }
        let m4 = sample_matrices4();
        for a in m4 {
            for b in m4 {
                for c in m4 {
                    assert_relative_eq!((a * b) * c, a * (b * c), epsilon = 1e-3, max_relative = 1e-4);
                }
            }
        }
        let (a, b, c) = (Matrix2::from_rotation(0.3), Matrix2::from_scale(2.0, 3.0), Matrix2::from_rotation(-1.2));
        assert_relative_eq!((a * b) * c, a * (b * c), epsilon = EPSILON);
    }

    #[test]
    fn test_multiplication_uses_full_dot_products() {
        let a = Matrix2::from_rows_array([[1.0, 2.0], [3.0, 4.0]]);
        let b = Matrix2::from_rows_array([[5.0, 6.0], [7.0, 8.0]]);
        assert_eq!(a * b, Matrix2::from_rows_array([[19.0, 22.0], [43.0, 50.0]]));

        let a = Matrix3::from_rows_array([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        let b = Matrix3::from_rows_array([[9.0, 8.0, 7.0], [6.0, 5.0, 4.0], [3.0, 2.0, 1.0]]);
        let expected = Matrix3::from_rows_array([[30.0, 24.0, 18.0], [84.0, 69.0, 54.0], [138.0, 114.0, 90.0]]);
        assert_eq!(a * b, expected);
    }

    #[test]
    fn test_composition_matches_sequential_application() {
        let [a, b, c, _] = sample_matrices3();
        let p = Vector3::point(1.5, -4.0);
        assert_relative_eq!((a * b * c) * p, a * (b * (c * p)), epsilon = 1e-3);
    }

    #[test]
    fn test_affine_helpers_keep_homogeneous_row() {
        let mut m = Matrix3::from_rotation_z(1.0);
        m.translate(5.0, 6.0);
        m.scale(2.0, 3.0, 1.0);
        assert_eq!(m.row(2), Vector3::new(0.0, 0.0, 1.0));
        assert_relative_eq!((m * Vector3::point(1.0, 1.0)).z, 1.0);
    }

    #[test]
    fn test_translate_composes_in_local_frame() {
        let mut m = Matrix3::from_rotation_z(HALF_PI);
        m.translate(10.0, 0.0);
        assert_relative_eq!(m.translation(), Vector2::new(0.0, 10.0), epsilon = EPSILON);

        let mut t = Matrix3::from_translation(1.0, 2.0);
        t.translate(3.0, 4.0);
        assert_eq!(t.translation(), Vector2::new(4.0, 6.0));
    }

    #[test]
    fn test_set_translation_keeps_linear_block() {
        let mut m = Matrix3::from_rotation_z(0.5);
        let linear = m.linear();
        m.set_translation(7.0, -3.0);
        assert_eq!(m.linear(), linear);
        assert_eq!(m.translation(), Vector2::new(7.0, -3.0));
    }

    #[test]
    fn test_point_and_vector_transforms() {
        let mut m = Matrix3::from_translation(10.0, 0.0);
        m.rotate_z(HALF_PI);
        assert_relative_eq!(m.transform_point(Vector2::new(1.0, 0.0)), Vector2::new(10.0, 1.0), epsilon = EPSILON);
        assert_relative_eq!(m.transform_vector(Vector2::new(1.0, 0.0)), Vector2::new(0.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_decomposition_helpers() {
        let mut m = Matrix3::from_translation(4.0, 5.0);
        m.rotate_z(QUARTER_PI);
        m.scale(2.0, 3.0, 1.0);
        assert_relative_eq!(m.rotation_z(), QUARTER_PI, epsilon = EPSILON);
        assert_relative_eq!(m.scale_2d(), Vector2::new(2.0, 3.0), epsilon = EPSILON);
        assert_relative_eq!(m.determinant(), 6.0, epsilon = EPSILON);
    }

    #[test]
    fn test_transposed_swaps_rows_and_columns() {
        let m = Matrix3::from_rows_array([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        let t = m.transposed();
        for row in 0..3 {
            assert_eq!(t.row(row), m.col(row));
        }
        assert_eq!(t.transposed(), m);
    }

    #[test]
    fn test_rotation_axes() {
        let rx = Matrix4::from_rotation_x(HALF_PI);
        assert_relative_eq!(rx.transform_vector(Vector3::Y), Vector3::Z, epsilon = EPSILON);
        let ry = Matrix4::from_rotation_y(HALF_PI);
        assert_relative_eq!(ry.transform_vector(Vector3::Z), Vector3::X, epsilon = EPSILON);
        let rz = Matrix4::from_rotation_z(PI);
        assert_relative_eq!(rz.transform_vector(Vector3::X), -Vector3::X, epsilon = EPSILON);
        let r2 = Matrix2::from_rotation(HALF_PI);
        assert_relative_eq!(r2 * Vector2::X, Vector2::Y, epsilon = EPSILON);
    }

    #[test]
    fn test_flat_slice_is_column_major() {
        let m = Matrix3::from_translation(8.0, 9.0);
        assert_eq!(m.as_flat_slice(), &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 8.0, 9.0, 1.0]);
    }
}
