//! Canonical head-turn poses
//!
//! The critter turns its head between two mirror-image poses. Every sideways
//! quantity (yaw, roll, X offsets) is computed once from the reference
//! geometry and applied with opposite signs at the two ends of the turn;
//! pitch, scale and vertical offsets are shared.

use serde::{Deserialize, Serialize};

use super::layout::{self, BACK_Z};
use super::{Part, PartMap};
use crate::math::{Axis, Transform3D};

/// Distance of the virtual eye from the image plane
pub const PERSPECTIVE_DISTANCE: f32 = 500.0;
pub const BODY_YAW: f32 = 10.0;
pub const HEAD_PITCH: f32 = -18.0;
pub const HEAD_YAW: f32 = 18.0;
pub const EYE_SCALE: f32 = 1.12;
/// Nudges the eyes off the head plane so they do not z-fight mid-turn
pub const EYE_DEPTH_SCALE: f32 = 1.01;
pub const FAR_EAR_SHIFT: f32 = 10.0;
pub const NEAR_EAR_SHIFT_X: f32 = 2.0;
pub const NEAR_EAR_SHIFT_Y: f32 = 12.0;
pub const NEAR_EAR_ROLL: f32 = 8.0;

/// Layer ordering used where the ears cross the head
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZOrder {
    Front,
    Back,
}

impl ZOrder {
    pub fn z_position(self) -> f32 {
        match self {
            ZOrder::Front => -BACK_Z,
            ZOrder::Back => BACK_Z,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarLayering {
    pub left: ZOrder,
    pub right: ZOrder,
}

impl EarLayering {
    pub const REST: EarLayering = EarLayering {
        left: ZOrder::Back,
        right: ZOrder::Back,
    };

    /// Z order of `part`; `None` for anything but an ear
    pub fn get(&self, part: Part) -> Option<ZOrder> {
        match part {
            Part::LeftEar => Some(self.left),
            Part::RightEar => Some(self.right),
            _ => None,
        }
    }
}

/// A complete assignment of transforms to parts, plus ear layering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub transforms: PartMap<Transform3D>,
    pub ears: EarLayering,
}

impl Pose {
    /// Every part untransformed, both ears behind the head
    pub fn rest() -> Self {
        Self {
            transforms: PartMap::splat(Transform3D::IDENTITY),
            ears: EarLayering::REST,
        }
    }

    pub fn transform(&self, part: Part) -> Transform3D {
        self.transforms[part]
    }

    pub fn with_transforms(&self, transforms: PartMap<Transform3D>) -> Self {
        Self {
            transforms,
            ears: self.ears,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::rest()
    }
}

/// Which end of the turn a pose describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEnd {
    Initial,
    Final,
}

impl TurnEnd {
    fn sign(self) -> f32 {
        match self {
            TurnEnd::Initial => -1.0,
            TurnEnd::Final => 1.0,
        }
    }
}

/// Pose the critter glides into when a turn begins
pub fn initial_turn_pose() -> Pose {
    turn_pose(TurnEnd::Initial)
}

/// Pose reached when the turn is scrubbed all the way through
pub fn final_turn_pose() -> Pose {
    turn_pose(TurnEnd::Final)
}

pub fn turn_pose(end: TurnEnd) -> Pose {
    let sign = end.sign();
    let identity = Transform3D::IDENTITY;
    let mut transforms = PartMap::splat(identity);

    transforms[Part::Body] = identity
        .perspective(PERSPECTIVE_DISTANCE)
        .rotate(Axis::Y, sign * BODY_YAW);

    let head = identity
        .perspective(PERSPECTIVE_DISTANCE)
        .rotate(Axis::X, HEAD_PITCH)
        .rotate(Axis::Y, sign * HEAD_YAW);
    transforms[Part::Head] = head;

    let eye = identity
        .scale(Axis::X, EYE_SCALE)
        .scale(Axis::Y, EYE_SCALE)
        .scale(Axis::Z, EYE_DEPTH_SCALE);
    for part in Part::EYES {
        transforms[part] = slide(eye, part, sign);
    }

    for part in [Part::Muzzle, Part::Nose, Part::MouthOpen] {
        transforms[part] = slide(identity, part, sign);
    }

    // The ear on the side the head turns away from tucks in behind it; the
    // other swings forward over the head
    let (far, near) = match end {
        TurnEnd::Initial => (Part::LeftEar, Part::RightEar),
        TurnEnd::Final => (Part::RightEar, Part::LeftEar),
    };
    transforms[far] = head.translate(Axis::X, -sign * FAR_EAR_SHIFT);
    transforms[near] = head
        .translate(Axis::X, sign * NEAR_EAR_SHIFT_X)
        .translate(Axis::Y, NEAR_EAR_SHIFT_Y)
        .rotate(Axis::Z, -sign * NEAR_EAR_ROLL);

    let mut ears = EarLayering::REST;
    match near {
        Part::LeftEar => ears.left = ZOrder::Front,
        _ => ears.right = ZOrder::Front,
    }

    Pose { transforms, ears }
}

/// Offset `base` by the part's anchor delta, X mirrored by `sign`
fn slide(base: Transform3D, part: Part, sign: f32) -> Transform3D {
    match layout::anchors(part) {
        Some(pair) => base
            .translate(Axis::X, -sign * pair.dx())
            .translate(Axis::Y, pair.dy()),
        None => base,
    }
}
