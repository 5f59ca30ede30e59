//! The login critter: its parts, reference layout, canonical head-turn poses
//! and the animator that drives them.

pub mod layout;
mod part;
mod pose;
mod session;
mod eyes;
mod animator;

pub use part::{Part, PartMap};
pub use pose::{
    final_turn_pose, initial_turn_pose, turn_pose, EarLayering, Pose, TurnEnd, ZOrder,
    PERSPECTIVE_DISTANCE,
};
pub use session::{Completion, SessionId};
pub use eyes::{EyeAnimator, EyeImage, EyePresentation, EYE_CROSS_FADE_KEY};
pub use animator::{AnimatorState, PoseAnimator};
