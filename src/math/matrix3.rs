use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};

use crate::error::{Result, TransformError};

/// What [`Matrix3::get_inverse`] does when the source block has a zero determinant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum InversePolicy {
    /// Return [`TransformError::SingularMatrix`] and leave the target untouched.
    Strict,
    /// Fall back to the identity and log a warning.
    #[default]
    Lenient,
}

/// 3x3 matrix stored column-major, laid out for direct upload as a `mat3` uniform.
///
/// Arguments to [`Matrix3::new`] and [`Matrix3::set`] are given in row-major
/// reading order (`n12` is row 1, column 2), storage is column-major.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Matrix3 {
    elements: [f32; 9],
}

impl Matrix3 {
    pub const IDENTITY: Matrix3 = Matrix3 {
        elements: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        n11: f32,
        n12: f32,
        n13: f32,
        n21: f32,
        n22: f32,
        n23: f32,
        n31: f32,
        n32: f32,
        n33: f32,
    ) -> Self {
        let mut matrix = Self::zeroed();
        matrix.set(n11, n12, n13, n21, n22, n23, n31, n32, n33);
        matrix
    }

    pub fn from_cols_array(elements: [f32; 9]) -> Self {
        Self { elements }
    }

    /// Upper-left 3x3 block of a 4x4 matrix.
    pub fn from_mat4(matrix: &Mat4) -> Self {
        Self::from(Mat3::from_mat4(*matrix))
    }

    pub fn elements(&self) -> &[f32; 9] {
        &self.elements
    }

    #[allow(clippy::too_many_arguments)]
    pub fn set(
        &mut self,
        n11: f32,
        n12: f32,
        n13: f32,
        n21: f32,
        n22: f32,
        n23: f32,
        n31: f32,
        n32: f32,
        n33: f32,
    ) -> &mut Self {
        let te = &mut self.elements;

        te[0] = n11;
        te[3] = n12;
        te[6] = n13;
        te[1] = n21;
        te[4] = n22;
        te[7] = n23;
        te[2] = n31;
        te[5] = n32;
        te[8] = n33;

        self
    }

    pub fn identity(&mut self) -> &mut Self {
        self.elements = Self::IDENTITY.elements;
        self
    }

    pub fn copy_from(&mut self, other: &Matrix3) -> &mut Self {
        self.elements = other.elements;
        self
    }

    pub fn multiply_scalar(&mut self, s: f32) -> &mut Self {
        for element in &mut self.elements {
            *element *= s;
        }

        self
    }

    pub fn determinant(&self) -> f32 {
        let [a, b, c, d, e, f, g, h, i] = self.elements;

        a * e * i - a * f * h - b * d * i + b * f * g + c * d * h - c * e * g
    }

    /// Sets this matrix to the inverse of the upper-left 3x3 block of `matrix`.
    ///
    /// The adjugate is built straight from the 4x4 element indices, so column
    /// `k` of the block lives at `4k..4k+3` in `matrix`.
    pub fn get_inverse(&mut self, matrix: &Mat4, policy: InversePolicy) -> Result<&mut Self> {
        match policy {
            InversePolicy::Strict => {
                let (adjugate, det) = Self::adjugate_and_determinant(matrix)?;
                Ok(self.assign_inverse(adjugate, det))
            }
            InversePolicy::Lenient => Ok(self.inverse_or_identity(matrix)),
        }
    }

    fn inverse_or_identity(&mut self, matrix: &Mat4) -> &mut Self {
        match Self::adjugate_and_determinant(matrix) {
            Ok((adjugate, det)) => self.assign_inverse(adjugate, det),
            Err(err) => {
                log::warn!("Matrix3::get_inverse: {err}, falling back to identity");
                self.identity()
            }
        }
    }

    fn assign_inverse(&mut self, adjugate: [f32; 9], det: f32) -> &mut Self {
        self.elements = adjugate;
        self.multiply_scalar(1.0 / det)
    }

    fn adjugate_and_determinant(matrix: &Mat4) -> Result<([f32; 9], f32)> {
        let me = matrix.to_cols_array();

        let adjugate = [
            me[10] * me[5] - me[6] * me[9],
            -me[10] * me[1] + me[2] * me[9],
            me[6] * me[1] - me[2] * me[5],
            -me[10] * me[4] + me[6] * me[8],
            me[10] * me[0] - me[2] * me[8],
            -me[6] * me[0] + me[2] * me[4],
            me[9] * me[4] - me[5] * me[8],
            -me[9] * me[0] + me[1] * me[8],
            me[5] * me[0] - me[1] * me[4],
        ];

        let det = me[0] * adjugate[0] + me[1] * adjugate[3] + me[2] * adjugate[6];

        if det == 0.0 {
            return Err(TransformError::SingularMatrix);
        }

        Ok((adjugate, det))
    }

    pub fn transpose(&mut self) -> &mut Self {
        let m = &mut self.elements;

        m.swap(1, 3);
        m.swap(2, 6);
        m.swap(5, 7);

        self
    }

    /// Inverse transpose of the upper-left block, for transforming normals.
    /// Singular input yields the identity.
    pub fn get_normal_matrix(&mut self, matrix: &Mat4) -> &mut Self {
        self.inverse_or_identity(matrix).transpose()
    }

    pub fn transpose_into_array(&self, target: &mut [f32; 9]) -> &Self {
        let m = &self.elements;

        target[0] = m[0];
        target[1] = m[3];
        target[2] = m[6];
        target[3] = m[1];
        target[4] = m[4];
        target[5] = m[7];
        target[6] = m[2];
        target[7] = m[5];
        target[8] = m[8];

        self
    }

    pub fn apply_to_vector3(&self, v: Vec3) -> Vec3 {
        Mat3::from(*self) * v
    }

    /// Transforms a packed `xyzxyz...` stream in place. A trailing partial
    /// triple is left untouched.
    pub fn multiply_vector3_array<'a>(&self, array: &'a mut [f32]) -> &'a mut [f32] {
        let matrix = Mat3::from(*self);

        for chunk in array.chunks_exact_mut(3) {
            let v = matrix * Vec3::from_slice(chunk);
            v.write_to_slice(chunk);
        }

        array
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Mat3> for Matrix3 {
    fn from(matrix: Mat3) -> Self {
        Self {
            elements: matrix.to_cols_array(),
        }
    }
}

impl From<Matrix3> for Mat3 {
    fn from(matrix: Matrix3) -> Self {
        Mat3::from_cols_array(&matrix.elements)
    }
}
