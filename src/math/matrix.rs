use serde::{Deserialize, Serialize};

use super::Vec3;

/// Principal axis for rotations, scales and translations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// 3D affine transform with optional perspective (column-major, column vectors)
///
/// Builder methods right-multiply, so in
/// `Transform3D::IDENTITY.perspective(500.0).rotate(Axis::Y, 18.0)` the rotation
/// reaches a point first and the perspective divide happens last.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub data: [f32; 16],
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform3D {
    pub const IDENTITY: Transform3D = Transform3D {
        data: [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    pub fn from_cols(data: [f32; 16]) -> Self {
        Self { data }
    }

    /// Element at `row`, `col`
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.data[col * 4 + row]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[col * 4 + row] = value;
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.data[12] = x;
        m.data[13] = y;
        m.data[14] = z;
        m
    }

    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.data[0] = x;
        m.data[5] = y;
        m.data[10] = z;
        m
    }

    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0,
                0.0, c, s, 0.0,
                0.0, -s, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            data: [
                c, 0.0, -s, 0.0,
                0.0, 1.0, 0.0, 0.0,
                s, 0.0, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            data: [
                c, s, 0.0, 0.0,
                -s, c, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Simple viewer-distance perspective: `w' = w - z / eye_distance`
    pub fn perspective_projection(eye_distance: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.set(3, 2, -1.0 / eye_distance);
        m
    }

    /// Matrix multiplication
    pub fn mul(&self, other: &Transform3D) -> Self {
        let mut result = [0.0f32; 16];

        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.data[row + k * 4] * other.data[k + col * 4];
                }
                result[row + col * 4] = sum;
            }
        }

        Self { data: result }
    }

    /// Append `op` so that it is applied to points before `self`
    pub fn then(&self, op: &Transform3D) -> Self {
        self.mul(op)
    }

    pub fn perspective(&self, eye_distance: f32) -> Self {
        self.then(&Self::perspective_projection(eye_distance))
    }

    pub fn rotate(&self, axis: Axis, degrees: f32) -> Self {
        let radians = degrees.to_radians();
        let op = match axis {
            Axis::X => Self::rotation_x(radians),
            Axis::Y => Self::rotation_y(radians),
            Axis::Z => Self::rotation_z(radians),
        };
        self.then(&op)
    }

    pub fn scale(&self, axis: Axis, by: f32) -> Self {
        let op = match axis {
            Axis::X => Self::scaling(by, 1.0, 1.0),
            Axis::Y => Self::scaling(1.0, by, 1.0),
            Axis::Z => Self::scaling(1.0, 1.0, by),
        };
        self.then(&op)
    }

    pub fn translate(&self, axis: Axis, by: f32) -> Self {
        let op = match axis {
            Axis::X => Self::translation(by, 0.0, 0.0),
            Axis::Y => Self::translation(0.0, by, 0.0),
            Axis::Z => Self::translation(0.0, 0.0, by),
        };
        self.then(&op)
    }

    /// Conjugate by the reflection `x -> -x`
    ///
    /// Flips every X translation and every Y/Z rotation while leaving
    /// perspective, pitch and scale untouched.
    pub fn mirror_x(&self) -> Self {
        let mut m = *self;
        for row in 0..4 {
            for col in 0..4 {
                if (row == 0) != (col == 0) {
                    m.set(row, col, -self.at(row, col));
                }
            }
        }
        m
    }

    /// Transform a point, including the homogeneous divide
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let x = self.data[0] * p.x + self.data[4] * p.y + self.data[8] * p.z + self.data[12];
        let y = self.data[1] * p.x + self.data[5] * p.y + self.data[9] * p.z + self.data[13];
        let z = self.data[2] * p.x + self.data[6] * p.y + self.data[10] * p.z + self.data[14];
        let w = self.data[3] * p.x + self.data[7] * p.y + self.data[11] * p.z + self.data[15];
        if w != 0.0 && w != 1.0 {
            Vec3::new(x / w, y / w, z / w)
        } else {
            Vec3::new(x, y, z)
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn approx_eq(&self, other: &Transform3D, epsilon: f32) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }

    /// Get as slice for the host renderer
    pub fn as_slice(&self) -> &[f32; 16] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let m = Transform3D::IDENTITY;
        assert_eq!(m.data[0], 1.0);
        assert_eq!(m.data[5], 1.0);
        assert_eq!(m.data[10], 1.0);
        assert_eq!(m.data[15], 1.0);
        assert!(m.is_identity());
    }

    #[test]
    fn test_translation() {
        let m = Transform3D::IDENTITY.translate(Axis::X, 1.0).translate(Axis::Y, 2.0);
        let result = m.transform_point(Vec3::ZERO);
        assert!((result.x - 1.0).abs() < 0.0001);
        assert!((result.y - 2.0).abs() < 0.0001);
        assert!(result.z.abs() < 0.0001);
    }

    #[test]
    fn test_rotate_z_degrees() {
        let m = Transform3D::IDENTITY.rotate(Axis::Z, 90.0);
        let result = m.transform_point(Vec3::X);
        assert!(result.x.abs() < 0.0001);
        assert!((result.y - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_chained_ops_apply_last_first() {
        // translate, then scale: the scale reaches the point first
        let m = Transform3D::IDENTITY
            .translate(Axis::X, 1.0)
            .scale(Axis::X, 2.0);
        let result = m.transform_point(Vec3::X);
        assert!((result.x - 3.0).abs() < 0.0001);
    }

    #[test]
    fn test_perspective_places_m34() {
        let m = Transform3D::IDENTITY.perspective(500.0);
        assert_eq!(m.at(3, 2), -1.0 / 500.0);

        // Points toward the viewer are magnified
        let p = m.transform_point(Vec3::new(10.0, 0.0, 50.0));
        assert!(p.x > 10.0);
    }

    #[test]
    fn test_mirror_flips_yaw_and_x_translation() {
        let yaw_left = Transform3D::IDENTITY.perspective(500.0).rotate(Axis::Y, -10.0);
        let yaw_right = Transform3D::IDENTITY.perspective(500.0).rotate(Axis::Y, 10.0);
        assert!(yaw_left.mirror_x().approx_eq(&yaw_right, 1e-7));

        let pitch = Transform3D::IDENTITY.rotate(Axis::X, -18.0);
        assert_eq!(pitch.mirror_x(), pitch);

        let shifted = Transform3D::translation(4.0, 5.0, 0.0);
        assert_eq!(shifted.mirror_x(), Transform3D::translation(-4.0, 5.0, 0.0));
    }

    #[test]
    fn test_mirror_is_involution() {
        let m = Transform3D::IDENTITY
            .perspective(500.0)
            .rotate(Axis::X, -18.0)
            .rotate(Axis::Y, 18.0)
            .translate(Axis::X, 2.0)
            .rotate(Axis::Z, -8.0);
        assert_eq!(m.mirror_x().mirror_x(), m);
    }
}
