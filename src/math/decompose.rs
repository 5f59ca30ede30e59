//! Transform decomposition and interpolation
//!
//! A transform in flight is split into perspective, translation, rotation,
//! skew and scale. Each component is interpolated on its own (the rotation by
//! slerp) and the result is recomposed, so a part turning its head stays rigid
//! instead of shearing the way an element-wise matrix blend would.

use serde::{Deserialize, Serialize};

use super::{Quat, Transform3D, Vec3};

const EPSILON: f32 = 1e-8;

/// Components of a [`Transform3D`]
///
/// Recomposes as `M = [R·K·S | t]` with the bottom row `perspective · [R·K·S | t]`,
/// where `K` is the unit upper-triangular skew matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decomposed {
    pub perspective: [f32; 4],
    pub translation: Vec3,
    pub rotation: Quat,
    /// `(xy, xz, yz)` shear factors
    pub skew: Vec3,
    pub scale: Vec3,
}

impl Decomposed {
    pub const IDENTITY: Decomposed = Decomposed {
        perspective: [0.0, 0.0, 0.0, 1.0],
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        skew: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Split `m` into components, or `None` for degenerate matrices
    ///
    /// The matrix is normalized so that `m[3][3] == 1`; the recomposed matrix
    /// is projectively equal to the input, not necessarily element-wise equal.
    pub fn from_transform(m: &Transform3D) -> Option<Self> {
        let w = m.at(3, 3);
        if w.abs() < EPSILON {
            return None;
        }
        let mut m = *m;
        for v in m.data.iter_mut() {
            *v /= w;
        }

        let mut c0 = Vec3::new(m.at(0, 0), m.at(1, 0), m.at(2, 0));
        let mut c1 = Vec3::new(m.at(0, 1), m.at(1, 1), m.at(2, 1));
        let mut c2 = Vec3::new(m.at(0, 2), m.at(1, 2), m.at(2, 2));
        let translation = Vec3::new(m.at(0, 3), m.at(1, 3), m.at(2, 3));

        let perspective = if m.at(3, 0) != 0.0 || m.at(3, 1) != 0.0 || m.at(3, 2) != 0.0 {
            // Solve p · [A | t] = bottom row, with A the upper-left 3x3
            let inverse = inverse3([c0, c1, c2])?;
            let rhs = Vec3::new(m.at(3, 0), m.at(3, 1), m.at(3, 2));
            let p = inverse[0].scale(rhs.x) + inverse[1].scale(rhs.y) + inverse[2].scale(rhs.z);
            [p.x, p.y, p.z, m.at(3, 3) - p.dot(&translation)]
        } else {
            if determinant3([c0, c1, c2]).abs() < EPSILON {
                return None;
            }
            [0.0, 0.0, 0.0, 1.0]
        };

        let mut scale = Vec3::ZERO;
        let mut skew = Vec3::ZERO;

        scale.x = c0.length();
        c0 = c0.normalize();

        skew.x = c0.dot(&c1);
        c1 = c1 - c0.scale(skew.x);
        scale.y = c1.length();
        c1 = c1.normalize();
        skew.x /= scale.y;

        skew.y = c0.dot(&c2);
        c2 = c2 - c0.scale(skew.y);
        skew.z = c1.dot(&c2);
        c2 = c2 - c1.scale(skew.z);
        scale.z = c2.length();
        c2 = c2.normalize();
        skew.y /= scale.z;
        skew.z /= scale.z;

        // A reflection is folded into the scale so the basis stays a rotation
        if c0.dot(&c1.cross(&c2)) < 0.0 {
            scale = -scale;
            c0 = -c0;
            c1 = -c1;
            c2 = -c2;
        }

        Some(Self {
            perspective,
            translation,
            rotation: Quat::from_basis(c0, c1, c2),
            skew,
            scale,
        })
    }

    pub fn to_transform(&self) -> Transform3D {
        let [r0, r1, r2] = self.rotation.to_basis();
        let (kxy, kxz, kyz) = (self.skew.x, self.skew.y, self.skew.z);
        let s = self.scale;

        // Columns of R·K·S
        let c0 = r0.scale(s.x);
        let c1 = (r1 + r0.scale(kxy)).scale(s.y);
        let c2 = (r2 + r1.scale(kyz) + r0.scale(kxz)).scale(s.z);
        let t = self.translation;
        let p = self.perspective;
        let pv = Vec3::new(p[0], p[1], p[2]);

        Transform3D::from_cols([
            c0.x, c0.y, c0.z, pv.dot(&c0),
            c1.x, c1.y, c1.z, pv.dot(&c1),
            c2.x, c2.y, c2.z, pv.dot(&c2),
            t.x, t.y, t.z, pv.dot(&t) + p[3],
        ])
    }

    pub fn interpolate(&self, other: &Decomposed, t: f32) -> Decomposed {
        let mut perspective = [0.0; 4];
        for (i, out) in perspective.iter_mut().enumerate() {
            *out = self.perspective[i] + (other.perspective[i] - self.perspective[i]) * t;
        }

        Decomposed {
            perspective,
            translation: self.translation.lerp(&other.translation, t),
            rotation: self.rotation.slerp(other.rotation, t),
            skew: self.skew.lerp(&other.skew, t),
            scale: self.scale.lerp(&other.scale, t),
        }
    }
}

/// Interpolation between two fixed transforms
///
/// Both ends are decomposed once up front; [`TransformTrack::sample`] only
/// recomposes. The ends themselves are returned verbatim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformTrack {
    from: Transform3D,
    to: Transform3D,
    parts: Option<(Decomposed, Decomposed)>,
}

impl TransformTrack {
    pub fn new(from: Transform3D, to: Transform3D) -> Self {
        let parts = if from == to {
            None
        } else {
            Decomposed::from_transform(&from).zip(Decomposed::from_transform(&to))
        };
        Self { from, to, parts }
    }

    pub fn source(&self) -> &Transform3D {
        &self.from
    }

    pub fn target(&self) -> &Transform3D {
        &self.to
    }

    pub fn sample(&self, t: f32) -> Transform3D {
        if t <= 0.0 || self.from == self.to {
            return self.from;
        }
        if t >= 1.0 {
            return self.to;
        }
        match &self.parts {
            Some((a, b)) => a.interpolate(b, t).to_transform(),
            // Not decomposable: switch halfway
            None if t < 0.5 => self.from,
            None => self.to,
        }
    }
}

fn determinant3(c: [Vec3; 3]) -> f32 {
    c[0].dot(&c[1].cross(&c[2]))
}

/// Rows of the inverse of the matrix with columns `c`
fn inverse3(c: [Vec3; 3]) -> Option<[Vec3; 3]> {
    let det = determinant3(c);
    if det.abs() < EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;
    Some([
        c[1].cross(&c[2]).scale(inv_det),
        c[2].cross(&c[0]).scale(inv_det),
        c[0].cross(&c[1]).scale(inv_det),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Axis;

    fn roundtrip(m: Transform3D) -> Transform3D {
        Decomposed::from_transform(&m)
            .expect("decomposable")
            .to_transform()
    }

    fn assert_projectively_close(a: &Transform3D, b: &Transform3D) {
        let (wa, wb) = (a.at(3, 3), b.at(3, 3));
        for i in 0..16 {
            let (x, y) = (a.data[i] / wa, b.data[i] / wb);
            assert!((x - y).abs() < 1e-4, "element {}: {} vs {}", i, x, y);
        }
    }

    #[test]
    fn test_identity_decomposes_to_identity() {
        let d = Decomposed::from_transform(&Transform3D::IDENTITY).unwrap();
        assert_eq!(d, Decomposed::IDENTITY);
    }

    #[test]
    fn test_roundtrip_affine() {
        let m = Transform3D::IDENTITY
            .scale(Axis::X, 1.12)
            .scale(Axis::Y, 1.12)
            .scale(Axis::Z, 1.01)
            .translate(Axis::X, -10.3)
            .translate(Axis::Y, 8.2);
        assert_projectively_close(&roundtrip(m), &m);
    }

    #[test]
    fn test_roundtrip_perspective_rotation() {
        let m = Transform3D::IDENTITY
            .perspective(500.0)
            .rotate(Axis::X, -18.0)
            .rotate(Axis::Y, 18.0);
        assert_projectively_close(&roundtrip(m), &m);
    }

    #[test]
    fn test_roundtrip_perspective_with_translation() {
        let m = Transform3D::IDENTITY
            .perspective(500.0)
            .rotate(Axis::X, -18.0)
            .rotate(Axis::Y, -18.0)
            .translate(Axis::X, -2.0)
            .translate(Axis::Y, 12.0)
            .rotate(Axis::Z, 8.0);
        assert_projectively_close(&roundtrip(m), &m);
    }

    #[test]
    fn test_roundtrip_reflection() {
        let m = Transform3D::scaling(-1.0, 1.0, 1.0);
        assert_projectively_close(&roundtrip(m), &m);
    }

    #[test]
    fn test_singular_matrix_is_rejected() {
        assert!(Decomposed::from_transform(&Transform3D::scaling(0.0, 1.0, 1.0)).is_none());
    }

    #[test]
    fn test_track_endpoints_are_exact() {
        let from = Transform3D::IDENTITY.perspective(500.0).rotate(Axis::Y, -10.0);
        let to = Transform3D::IDENTITY.perspective(500.0).rotate(Axis::Y, 10.0);
        let track = TransformTrack::new(from, to);
        assert_eq!(track.sample(0.0), from);
        assert_eq!(track.sample(1.0), to);
        assert_eq!(track.sample(-3.0), from);
        assert_eq!(track.sample(7.0), to);
    }

    #[test]
    fn test_track_midpoint_is_rigid_rotation() {
        let from = Transform3D::IDENTITY.rotate(Axis::Y, -10.0);
        let to = Transform3D::IDENTITY.rotate(Axis::Y, 10.0);
        let mid = TransformTrack::new(from, to).sample(0.5);
        assert!(mid.approx_eq(&Transform3D::IDENTITY, 1e-5), "{:?}", mid);
    }

    #[test]
    fn test_track_translation_is_linear() {
        let from = Transform3D::translation(-10.3, 8.2, 0.0);
        let to = Transform3D::translation(10.3, 8.2, 0.0);
        let quarter = TransformTrack::new(from, to).sample(0.25);
        assert!((quarter.at(0, 3) + 5.15).abs() < 1e-4);
        assert!((quarter.at(1, 3) - 8.2).abs() < 1e-4);
    }

    #[test]
    fn test_track_degenerate_switches_halfway() {
        let from = Transform3D::scaling(0.0, 0.0, 0.0);
        let to = Transform3D::IDENTITY;
        let track = TransformTrack::new(from, to);
        assert_eq!(track.sample(0.49), from);
        assert_eq!(track.sample(0.5), to);
    }
}
