//! Validation flourish on the eyes
//!
//! Each toggle flips the doe-eyed state, cross-fades both eyes between the two
//! eye bitmaps and resizes them. Runs independently of the head turn.

use crate::animation::{ContentLayer, ContentPresentation, CrossFade, Easing, ScalarDriver};
use crate::config::AnimatorConfig;

use super::{Part, PartMap};

pub const EYE_CROSS_FADE_KEY: &str = "eyeCrossFade";

/// Which of the two host-provided eye bitmaps to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EyeImage {
    Normal,
    DoeEyed,
}

/// Everything a host needs to draw one eye
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyePresentation {
    pub contents: ContentPresentation<EyeImage>,
    pub diameter: f32,
}

#[derive(Debug, Clone)]
struct EyeLayer {
    contents: ContentLayer<EyeImage>,
    diameter: f32,
    resize: Option<ScalarDriver>,
}

impl EyeLayer {
    fn new(diameter: f32) -> Self {
        Self {
            contents: ContentLayer::new(EyeImage::Normal),
            diameter,
            resize: None,
        }
    }

    fn presented_diameter(&self) -> f32 {
        self.resize.map_or(self.diameter, |resize| resize.sample())
    }

    fn update(&mut self, dt: f32) {
        self.contents.update(dt);
        if let Some(resize) = self.resize.as_mut() {
            if resize.playback.update(dt) {
                self.diameter = resize.target();
                self.resize = None;
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct EyeAnimator {
    doe_eyed: bool,
    duration: f32,
    normal_diameter: f32,
    doe_diameter: f32,
    // Only the eye entries are used
    layers: PartMap<EyeLayer>,
}

impl EyeAnimator {
    pub fn new(config: &AnimatorConfig) -> Self {
        Self {
            doe_eyed: false,
            duration: config.validation_duration,
            normal_diameter: config.eye_diameter,
            doe_diameter: config.doe_eye_diameter,
            layers: PartMap::from_fn(|_| EyeLayer::new(config.eye_diameter)),
        }
    }

    pub fn is_doe_eyed(&self) -> bool {
        self.doe_eyed
    }

    /// Flip the eye state and start the cross-fade and resize toward it
    pub fn toggle(&mut self) {
        self.doe_eyed = !self.doe_eyed;

        let (from, to) = if self.doe_eyed {
            (EyeImage::Normal, EyeImage::DoeEyed)
        } else {
            (EyeImage::DoeEyed, EyeImage::Normal)
        };
        let diameter = if self.doe_eyed {
            self.doe_diameter
        } else {
            self.normal_diameter
        };

        tracing::debug!(doe_eyed = self.doe_eyed, diameter, "validation toggle");

        for eye in Part::EYES {
            let layer = &mut self.layers[eye];
            layer
                .contents
                .add_animation(EYE_CROSS_FADE_KEY, CrossFade::new(from, to, self.duration));

            let mut resize = ScalarDriver::new(
                layer.presented_diameter(),
                diameter,
                self.duration,
                Easing::EaseIn,
            );
            resize.playback.start();
            layer.diameter = diameter;
            layer.resize = Some(resize);
        }
    }

    pub fn update(&mut self, dt: f32) {
        for eye in Part::EYES {
            self.layers[eye].update(dt);
        }
    }

    pub fn is_animating(&self) -> bool {
        Part::EYES.into_iter().any(|eye| {
            let layer = &self.layers[eye];
            layer.resize.is_some() || layer.contents.is_animating()
        })
    }

    /// Presentation of `eye`; `None` for parts that are not eyes
    pub fn presentation(&self, eye: Part) -> Option<EyePresentation> {
        if !eye.is_eye() {
            return None;
        }
        let layer = &self.layers[eye];
        Some(EyePresentation {
            contents: layer.contents.presentation(),
            diameter: layer.presented_diameter(),
        })
    }

    /// Model diameter both eyes settle at
    pub fn diameter(&self) -> f32 {
        self.layers[Part::LeftEye].diameter
    }
}
