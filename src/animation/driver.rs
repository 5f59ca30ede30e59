//! Interpolation drivers
//!
//! A driver owns a start and an end value and a [`Playback`] clock. It is
//! either played back by time through [`Playback::update`] or scrubbed by
//! writing its fraction directly. Dropping a driver cancels it; drivers never
//! call back into their owner, so a cancelled driver cannot complete.

use super::easing::{ease, Easing};
use crate::critter::{EarLayering, Part, PartMap, Pose};
use crate::math::{Transform3D, TransformTrack};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Created, not yet started or scrubbed
    Inactive,
    /// Advancing with the host clock
    Running,
    /// Paused at a fraction set from outside
    Scrubbing,
    Finished,
}

/// Time/fraction bookkeeping shared by every driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playback {
    /// Duration in seconds
    pub duration: f32,
    pub easing: Easing,
    elapsed: f32,
    fraction: f32,
    state: DriverState,
}

impl Playback {
    pub fn new(duration: f32, easing: Easing) -> Self {
        Self {
            duration,
            easing,
            elapsed: 0.0,
            fraction: 0.0,
            state: DriverState::Inactive,
        }
    }

    /// Begin time-driven playback from the current fraction
    pub fn start(&mut self) {
        self.elapsed = self.fraction * self.duration;
        self.state = DriverState::Running;
    }

    /// Advance by `dt` seconds; returns true on the tick that finishes playback
    pub fn update(&mut self, dt: f32) -> bool {
        if self.state != DriverState::Running {
            return false;
        }

        self.elapsed += dt.max(0.0);
        self.fraction = if self.duration > 0.0 {
            (self.elapsed / self.duration).min(1.0)
        } else {
            1.0
        };

        if self.fraction >= 1.0 {
            self.fraction = 1.0;
            self.state = DriverState::Finished;
            return true;
        }
        false
    }

    /// Pause at `fraction`, clamped to [0, 1]; NaN is ignored
    pub fn set_fraction(&mut self, fraction: f32) {
        if fraction.is_nan() {
            return;
        }
        self.fraction = fraction.clamp(0.0, 1.0);
        self.elapsed = self.fraction * self.duration;
        self.state = DriverState::Scrubbing;
    }

    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    pub fn eased_fraction(&self) -> f32 {
        ease(self.fraction, self.easing)
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, DriverState::Running | DriverState::Scrubbing)
    }
}

/// Drives all nine part transforms between two poses
///
/// Ear layering is discrete: the source layering holds until the halfway
/// point, where the ears cross behind/in front of the head.
#[derive(Debug, Clone)]
pub struct PoseDriver {
    pub playback: Playback,
    tracks: PartMap<TransformTrack>,
    from_ears: EarLayering,
    to_ears: EarLayering,
}

impl PoseDriver {
    pub fn new(from: &Pose, to: &Pose, duration: f32, easing: Easing) -> Self {
        Self {
            playback: Playback::new(duration, easing),
            tracks: PartMap::from_fn(|part| {
                TransformTrack::new(from.transforms[part], to.transforms[part])
            }),
            from_ears: from.ears,
            to_ears: to.ears,
        }
    }

    pub fn target(&self) -> Pose {
        Pose {
            transforms: self.tracks.map(|_, track| *track.target()),
            ears: self.to_ears,
        }
    }

    pub fn sample_part(&self, part: Part) -> Transform3D {
        self.tracks[part].sample(self.playback.eased_fraction())
    }

    /// Presentation value at the current fraction
    pub fn sample(&self) -> Pose {
        let t = self.playback.eased_fraction();
        Pose {
            transforms: self.tracks.map(|_, track| track.sample(t)),
            ears: if t < 0.5 { self.from_ears } else { self.to_ears },
        }
    }
}

/// Drives a single float, e.g. an eye diameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarDriver {
    pub playback: Playback,
    from: f32,
    to: f32,
}

impl ScalarDriver {
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        Self {
            playback: Playback::new(duration, easing),
            from,
            to,
        }
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn sample(&self) -> f32 {
        let t = self.playback.eased_fraction();
        self.from * (1.0 - t) + self.to * t
    }
}
