use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::error::CritterError;

/// A layered image part of the critter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Part {
    Body,
    Head,
    LeftEar,
    RightEar,
    LeftEye,
    RightEye,
    Muzzle,
    Nose,
    MouthOpen,
}

impl Part {
    pub const COUNT: usize = 9;

    pub const ALL: [Part; Part::COUNT] = [
        Part::Body,
        Part::Head,
        Part::LeftEar,
        Part::RightEar,
        Part::LeftEye,
        Part::RightEye,
        Part::Muzzle,
        Part::Nose,
        Part::MouthOpen,
    ];

    pub const EARS: [Part; 2] = [Part::LeftEar, Part::RightEar];
    pub const EYES: [Part; 2] = [Part::LeftEye, Part::RightEye];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Part::Body => "body",
            Part::Head => "head",
            Part::LeftEar => "left_ear",
            Part::RightEar => "right_ear",
            Part::LeftEye => "left_eye",
            Part::RightEye => "right_eye",
            Part::Muzzle => "muzzle",
            Part::Nose => "nose",
            Part::MouthOpen => "mouth_open",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, CritterError> {
        Part::ALL
            .into_iter()
            .find(|part| part.name() == name)
            .ok_or_else(|| CritterError::UnknownPart(name.to_string()))
    }

    pub fn is_ear(self) -> bool {
        matches!(self, Part::LeftEar | Part::RightEar)
    }

    pub fn is_eye(self) -> bool {
        matches!(self, Part::LeftEye | Part::RightEye)
    }
}

/// Dense per-part storage indexed by [`Part`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartMap<T> {
    values: [T; Part::COUNT],
}

impl<T: Copy> PartMap<T> {
    pub fn splat(value: T) -> Self {
        Self {
            values: [value; Part::COUNT],
        }
    }
}

impl<T> PartMap<T> {
    pub fn from_fn(mut f: impl FnMut(Part) -> T) -> Self {
        Self {
            values: Part::ALL.map(&mut f),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Part, &T)> {
        Part::ALL.into_iter().zip(self.values.iter())
    }

    pub fn map<U>(&self, mut f: impl FnMut(Part, &T) -> U) -> PartMap<U> {
        PartMap::from_fn(|part| f(part, &self.values[part.index()]))
    }
}

impl<T> Index<Part> for PartMap<T> {
    type Output = T;

    fn index(&self, part: Part) -> &T {
        &self.values[part.index()]
    }
}

impl<T> IndexMut<Part> for PartMap<T> {
    fn index_mut(&mut self, part: Part) -> &mut T {
        &mut self.values[part.index()]
    }
}
