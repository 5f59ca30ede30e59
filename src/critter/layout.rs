//! Reference geometry of the critter scene
//!
//! Frames are in the coordinate space of each part's parent layer. The poses
//! only use the anchor pairs; the frames are exposed so a host can lay out
//! the image views the animation expects.

use serde::{Deserialize, Serialize};

use super::Part;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            width,
            height,
        }
    }
}

/// Where a part travels to when the head turns: `to - from` is its offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorPair {
    pub from: Point,
    pub to: Point,
}

impl AnchorPair {
    pub const fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    pub fn dx(&self) -> f32 {
        self.to.x - self.from.x
    }

    pub fn dy(&self) -> f32 {
        self.to.y - self.from.y
    }
}

/// Eye diameter at rest
pub const EYE_DIAMETER: f32 = 11.7;

/// Resting z position of the body and of both ears
pub const BACK_Z: f32 = -30.0;

pub fn frame(part: Part) -> Rect {
    match part {
        Part::Body => Rect::new(33.9, 109.2, 92.1, 73.4),
        Part::LeftEar => Rect::new(20.1, 48.8, 36.7, 36.3),
        Part::RightEar => Rect::new(107.1, 48.8, 36.7, 36.3),
        Part::Head => Rect::new(29.2, 52.1, 105.5, 90.9),
        Part::LeftEye => Rect::new(21.8, 28.8, EYE_DIAMETER, EYE_DIAMETER),
        Part::RightEye => Rect::new(72.4, 28.8, EYE_DIAMETER, EYE_DIAMETER),
        Part::Muzzle => Rect::new(24.0, 43.0, 57.5, 46.8),
        Part::Nose => Rect::new(22.4, 1.7, 12.7, 9.6),
        Part::MouthOpen => Rect::new(15.5, 24.6, 26.4, 18.7),
    }
}

/// Layer the part's frame is expressed in; `None` for the root view
pub fn parent(part: Part) -> Option<Part> {
    match part {
        Part::Body | Part::LeftEar | Part::RightEar | Part::Head => None,
        Part::LeftEye | Part::RightEye | Part::Muzzle => Some(Part::Head),
        Part::Nose | Part::MouthOpen => Some(Part::Muzzle),
    }
}

/// Static z position; ears are driven by the pose instead
pub fn base_z(part: Part) -> f32 {
    match part {
        Part::Body | Part::LeftEar | Part::RightEar => BACK_Z,
        _ => 0.0,
    }
}

/// Anchor pair of the parts that slide across the face during a turn
pub fn anchors(part: Part) -> Option<AnchorPair> {
    let pair = match part {
        Part::LeftEye => AnchorPair::new(Point::new(21.8, 28.8), Point::new(11.5, 37.0)),
        Part::RightEye => AnchorPair::new(Point::new(72.4, 28.8), Point::new(62.1, 37.0)),
        Part::Muzzle => AnchorPair::new(Point::new(24.0, 43.0), Point::new(12.9, 45.1)),
        Part::Nose => AnchorPair::new(Point::new(22.4, 1.7), Point::new(13.2, 5.2)),
        Part::MouthOpen => AnchorPair::new(Point::new(15.5, 24.6), Point::new(14.9, 22.1)),
        _ => return None,
    };
    Some(pair)
}
