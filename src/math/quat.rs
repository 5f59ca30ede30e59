//! Quaternion for the rotational part of decomposed transforms

use serde::{Deserialize, Serialize};

use super::Vec3;

/// Unit quaternion. Interpolated with [`Quat::slerp`] while a pose is in flight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Quat = Quat {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create from axis-angle representation (angle in radians)
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let len = axis.length();
        if len < 1e-6 {
            return Self::IDENTITY;
        }

        let (s, c) = (angle * 0.5).sin_cos();
        let axis = axis.scale(1.0 / len);
        Self {
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
            w: c,
        }
    }

    /// Build from the columns of an orthonormal, right-handed basis
    ///
    /// Magnitudes come from the diagonal; signs from the antisymmetric part.
    pub fn from_basis(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        let mut x = 0.5 * (1.0 + c0.x - c1.y - c2.z).max(0.0).sqrt();
        let mut y = 0.5 * (1.0 - c0.x + c1.y - c2.z).max(0.0).sqrt();
        let mut z = 0.5 * (1.0 - c0.x - c1.y + c2.z).max(0.0).sqrt();
        let w = 0.5 * (1.0 + c0.x + c1.y + c2.z).max(0.0).sqrt();

        if c2.y > c1.z {
            x = -x;
        }
        if c0.z > c2.x {
            y = -y;
        }
        if c1.x > c0.y {
            z = -z;
        }

        Self { x, y, z, w }
    }

    pub fn normalize(&self) -> Self {
        let len = self.dot(*self).sqrt();
        if len < 1e-6 {
            return Self::IDENTITY;
        }
        let inv_len = 1.0 / len;
        Self {
            x: self.x * inv_len,
            y: self.y * inv_len,
            z: self.z * inv_len,
            w: self.w * inv_len,
        }
    }

    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Spherical linear interpolation along the shorter arc
    pub fn slerp(&self, other: Self, t: f32) -> Self {
        let mut cos_half_theta = self.dot(other);

        let mut b = other;
        if cos_half_theta < 0.0 {
            b = Self::new(-b.x, -b.y, -b.z, -b.w);
            cos_half_theta = -cos_half_theta;
        }

        // Nearly parallel: nlerp is stable and indistinguishable
        if cos_half_theta > 0.9995 {
            return Self::new(
                self.x + t * (b.x - self.x),
                self.y + t * (b.y - self.y),
                self.z + t * (b.z - self.z),
                self.w + t * (b.w - self.w),
            )
            .normalize();
        }

        let half_theta = cos_half_theta.acos();
        let sin_half_theta = (1.0 - cos_half_theta * cos_half_theta).sqrt();

        let ratio_a = ((1.0 - t) * half_theta).sin() / sin_half_theta;
        let ratio_b = (t * half_theta).sin() / sin_half_theta;

        Self::new(
            self.x * ratio_a + b.x * ratio_b,
            self.y * ratio_a + b.y * ratio_b,
            self.z * ratio_a + b.z * ratio_b,
            self.w * ratio_a + b.w * ratio_b,
        )
    }

    /// Columns of the equivalent 3x3 rotation matrix
    pub fn to_basis(&self) -> [Vec3; 3] {
        let x2 = self.x + self.x;
        let y2 = self.y + self.y;
        let z2 = self.z + self.z;

        let xx = self.x * x2;
        let xy = self.x * y2;
        let xz = self.x * z2;
        let yy = self.y * y2;
        let yz = self.y * z2;
        let zz = self.z * z2;
        let wx = self.w * x2;
        let wy = self.w * y2;
        let wz = self.w * z2;

        [
            Vec3::new(1.0 - (yy + zz), xy + wz, xz - wy),
            Vec3::new(xy - wz, 1.0 - (xx + zz), yz + wx),
            Vec3::new(xz + wy, yz - wx, 1.0 - (xx + yy)),
        ]
    }
}
