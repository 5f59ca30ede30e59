//! Animation primitives for the critter
//!
//! Timing curves, interpolation drivers that are either played back by the
//! host clock or scrubbed by gesture progress, and keyed content cross-fades.

mod easing;
mod driver;
mod crossfade;

pub use easing::{Easing, ease};
pub use driver::{DriverState, Playback, PoseDriver, ScalarDriver};
pub use crossfade::{ContentLayer, ContentPresentation, CrossFade};
