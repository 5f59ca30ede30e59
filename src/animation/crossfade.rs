//! Keyed content cross-fades
//!
//! A layer can carry several content animations, each under a string key.
//! Adding an animation under a key that is already present replaces it, so a
//! repeated trigger supersedes the fade in flight instead of queueing behind it.

use super::driver::Playback;
use super::easing::Easing;

/// Blend from one content value to another
///
/// Fills forwards: once finished it keeps presenting `to` until removed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossFade<C> {
    pub from: C,
    pub to: C,
    pub playback: Playback,
}

impl<C: Copy> CrossFade<C> {
    pub fn new(from: C, to: C, duration: f32) -> Self {
        let mut playback = Playback::new(duration, Easing::Linear);
        playback.start();
        Self { from, to, playback }
    }

    /// Weight of `to` in the blend
    pub fn blend(&self) -> f32 {
        self.playback.eased_fraction()
    }
}

/// What a layer is currently showing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentPresentation<C> {
    pub from: C,
    pub to: C,
    /// 0 shows only `from`, 1 only `to`
    pub blend: f32,
}

impl<C: Copy> ContentPresentation<C> {
    /// Dominant content of the blend
    pub fn shown(&self) -> C {
        if self.blend < 0.5 {
            self.from
        } else {
            self.to
        }
    }
}

/// Layer contents plus the keyed cross-fades running on them
#[derive(Debug, Clone)]
pub struct ContentLayer<C> {
    contents: C,
    animations: Vec<(&'static str, CrossFade<C>)>,
}

impl<C: Copy> ContentLayer<C> {
    pub fn new(contents: C) -> Self {
        Self {
            contents,
            animations: Vec::new(),
        }
    }

    pub fn contents(&self) -> C {
        self.contents
    }

    pub fn animation(&self, key: &str) -> Option<&CrossFade<C>> {
        self.animations
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, fade)| fade)
    }

    pub fn remove_animation(&mut self, key: &str) -> Option<CrossFade<C>> {
        let index = self.animations.iter().position(|(k, _)| *k == key)?;
        Some(self.animations.remove(index).1)
    }

    /// Add `fade` under `key`, replacing any animation already there
    pub fn add_animation(&mut self, key: &'static str, fade: CrossFade<C>) {
        self.remove_animation(key);
        self.contents = fade.to;
        self.animations.push((key, fade));
    }

    pub fn update(&mut self, dt: f32) {
        for (_, fade) in self.animations.iter_mut() {
            fade.playback.update(dt);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animations.iter().any(|(_, fade)| fade.playback.is_running())
    }

    /// The most recently added animation wins; a bare layer shows its contents
    pub fn presentation(&self) -> ContentPresentation<C> {
        match self.animations.last() {
            Some((_, fade)) => ContentPresentation {
                from: fade.from,
                to: fade.to,
                blend: fade.blend(),
            },
            None => ContentPresentation {
                from: self.contents,
                to: self.contents,
                blend: 1.0,
            },
        }
    }
}
