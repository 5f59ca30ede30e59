//! The critter's pose animator
//!
//! Holds the model value of every part (what the parts settle at) and the
//! drivers animating toward it. Hosts read the presentation through
//! [`PoseAnimator::pose`] and advance time with [`PoseAnimator::tick`].
//!
//! A turn gesture runs in two stages: a short start driver glides the parts
//! into the turn's starting pose, and once it completes a scrubbed end driver
//! follows gesture progress from the initial-turn to the final-turn pose.

use crate::animation::{Easing, PoseDriver};
use crate::config::AnimatorConfig;
use crate::error::{CritterError, Result};
use crate::math::Transform3D;

use super::eyes::{EyeAnimator, EyePresentation};
use super::pose::{final_turn_pose, initial_turn_pose, EarLayering, Pose, ZOrder};
use super::session::{Completion, RestAnimation, SessionId, SessionIds, TurnPhase, TurnSession};
use super::{Part, PartMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    Idle,
    Turning,
    Returning,
}

#[derive(Debug, Clone)]
pub struct PoseAnimator {
    config: AnimatorConfig,
    model: Pose,
    stored: Option<PartMap<Transform3D>>,
    session: Option<TurnSession>,
    rest: Option<RestAnimation>,
    ids: SessionIds,
    /// Unstarted initial-to-final driver, decomposed once and cloned per session
    turn: PoseDriver,
    eyes: EyeAnimator,
}

impl Default for PoseAnimator {
    fn default() -> Self {
        Self::new(AnimatorConfig::default())
    }
}

impl PoseAnimator {
    pub fn new(config: AnimatorConfig) -> Self {
        let turn = PoseDriver::new(
            &initial_turn_pose(),
            &final_turn_pose(),
            config.end_duration,
            Easing::Linear,
        );
        Self {
            eyes: EyeAnimator::new(&config),
            config,
            model: Pose::rest(),
            stored: None,
            session: None,
            rest: None,
            ids: SessionIds::default(),
            turn,
        }
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    /// Begin (or restart) a turn gesture
    ///
    /// Once the start driver has glided into place the end driver is
    /// pre-positioned at `initial_progress`.
    pub fn start_head_rotation(&mut self, initial_progress: f32) {
        if self.session.is_some() {
            self.store_current_state();
        }
        self.stop_all_animations();

        let start_target = match &self.stored {
            Some(stored) => self.model.with_transforms(*stored),
            None => initial_turn_pose(),
        };

        let id = self.ids.next_id();
        tracing::debug!(
            session = %id,
            initial_progress,
            resumed = self.stored.is_some(),
            "head rotation started"
        );

        self.session = Some(TurnSession::begin(
            id,
            &self.model,
            &start_target,
            self.turn.clone(),
            self.config.start_duration,
            initial_progress,
        ));
    }

    /// Scrub the active turn; no-op without one
    pub fn update_head_rotation(&mut self, progress: f32) {
        if let Some(session) = self.session.as_mut() {
            session.end.playback.set_fraction(progress);
        }
    }

    /// End the gesture and glide every part back to rest
    pub fn stop_head_rotation(&mut self) {
        if self.session.is_some() {
            self.store_current_state();
        }
        self.stop_all_animations();

        let target = Pose {
            transforms: PartMap::splat(Transform3D::IDENTITY),
            ears: self.model.ears,
        };
        let mut driver = PoseDriver::new(&self.model, &target, self.config.rest_duration, Easing::EaseIn);
        driver.playback.start();

        let id = self.ids.next_id();
        tracing::debug!(session = %id, "head rotation stopped, returning to rest");
        self.rest = Some(RestAnimation { id, driver });
    }

    /// Toggle the doe-eyed validation flourish
    pub fn validate(&mut self) {
        self.eyes.toggle();
    }

    /// Snapshot the presented transform of every part
    pub fn store_current_state(&mut self) {
        self.stored = Some(self.pose().transforms);
    }

    /// Write the stored snapshot back to the model
    ///
    /// # Panics
    ///
    /// If nothing has been stored yet; see [`PoseAnimator::try_restore_state`].
    pub fn restore_state(&mut self) {
        if let Err(err) = self.try_restore_state() {
            panic!("{}", err);
        }
    }

    pub fn try_restore_state(&mut self) -> Result<()> {
        let stored = self.stored.ok_or(CritterError::NoStoredPose)?;
        self.model.transforms = stored;
        Ok(())
    }

    /// Advance every time-driven animation by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        self.eyes.update(dt);

        let mut finished = [None, None];
        if let Some(session) = self.session.as_mut() {
            if session.phase == TurnPhase::Normalizing && session.start.playback.update(dt) {
                finished[0] = Some(Completion::Start(session.id));
            }
        }
        if let Some(rest) = self.rest.as_mut() {
            if rest.driver.playback.update(dt) {
                finished[1] = Some(Completion::Rest(rest.id));
            }
        }

        for completion in finished.into_iter().flatten() {
            self.complete(completion);
        }
    }

    fn complete(&mut self, completion: Completion) {
        match completion {
            Completion::Start(id) => {
                let Some(session) = self.session.as_mut().filter(|s| s.id == id) else {
                    tracing::trace!(session = %id, "dropping stale start completion");
                    return;
                };
                self.model = initial_turn_pose();
                session.phase = TurnPhase::Scrubbing;
                session.end.playback.set_fraction(session.initial_progress);
                tracing::trace!(session = %id, fraction = session.initial_progress, "turn ready");
            }
            Completion::Rest(id) => {
                if self.rest.as_ref().map(|r| r.id) != Some(id) {
                    tracing::trace!(session = %id, "dropping stale rest completion");
                    return;
                }
                let Some(rest) = self.rest.take() else {
                    return;
                };
                self.model = rest.driver.target();
                self.model.ears = EarLayering::REST;
                tracing::trace!(session = %id, "at rest");
            }
        }
    }

    /// Cancel every pose driver in place, suppressing its completion
    fn stop_all_animations(&mut self) {
        let presented = self.pose();
        if let Some(session) = self.session.take() {
            tracing::trace!(session = %session.id, "turn session torn down");
        }
        if let Some(rest) = self.rest.take() {
            tracing::trace!(session = %rest.id, "rest animation cancelled");
        }
        self.model = presented;
    }

    fn presenting(&self) -> Option<&PoseDriver> {
        match (&self.session, &self.rest) {
            (Some(session), _) => session.presenting(),
            (None, Some(rest)) => Some(&rest.driver),
            (None, None) => None,
        }
    }

    /// Presented pose of every part
    pub fn pose(&self) -> Pose {
        self.presenting().map_or(self.model, |driver| driver.sample())
    }

    /// Value the parts settle at once drivers are done
    pub fn model_pose(&self) -> &Pose {
        &self.model
    }

    pub fn transform(&self, part: Part) -> Transform3D {
        self.presenting()
            .map_or(self.model.transforms[part], |driver| driver.sample_part(part))
    }

    /// Presented z order of an ear; `None` for other parts
    pub fn ear_z_order(&self, part: Part) -> Option<ZOrder> {
        self.pose().ears.get(part)
    }

    pub fn eye_presentation(&self, eye: Part) -> Option<EyePresentation> {
        self.eyes.presentation(eye)
    }

    pub fn is_doe_eyed(&self) -> bool {
        self.eyes.is_doe_eyed()
    }

    pub fn stored_pose(&self) -> Option<&PartMap<Transform3D>> {
        self.stored.as_ref()
    }

    /// Fraction of the active session's end driver
    pub fn end_fraction(&self) -> Option<f32> {
        self.session.as_ref().map(|s| s.end.playback.fraction())
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.session.as_ref().map(|s| s.id)
    }

    pub fn state(&self) -> AnimatorState {
        match (&self.session, &self.rest) {
            (Some(_), _) => AnimatorState::Turning,
            (None, Some(_)) => AnimatorState::Returning,
            (None, None) => AnimatorState::Idle,
        }
    }

    /// Whether the host should keep ticking
    pub fn is_animating(&self) -> bool {
        let normalizing = self
            .session
            .as_ref()
            .is_some_and(|s| s.phase == TurnPhase::Normalizing);
        normalizing || self.rest.is_some() || self.eyes.is_animating()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Comfortably longer than any default driver
    const SETTLE: f32 = 0.5;

    fn animator() -> PoseAnimator {
        PoseAnimator::default()
    }

    #[test]
    fn test_fresh_animator_is_at_rest() {
        let a = animator();
        assert_eq!(a.state(), AnimatorState::Idle);
        assert_eq!(a.pose(), Pose::rest());
        assert!(a.stored_pose().is_none());
        assert!(a.end_fraction().is_none());
        assert!(!a.is_animating());
    }

    #[test]
    fn test_turn_scenario() {
        let mut a = animator();
        a.start_head_rotation(0.3);
        assert_eq!(a.state(), AnimatorState::Turning);
        assert!(a.is_animating());
        assert_eq!(a.end_fraction(), Some(0.0));

        a.tick(SETTLE);
        assert_eq!(a.end_fraction(), Some(0.3));
        assert_eq!(a.model_pose().transform(Part::Head), initial_turn_pose().transform(Part::Head));
        assert!(!a.is_animating(), "scrubbing needs no ticks");

        a.update_head_rotation(1.0);
        assert_eq!(a.transform(Part::Head), final_turn_pose().transform(Part::Head));
        assert_eq!(a.pose(), final_turn_pose());

        a.update_head_rotation(0.0);
        assert_eq!(a.pose(), initial_turn_pose());

        a.stop_head_rotation();
        assert_eq!(a.state(), AnimatorState::Returning);
        a.tick(SETTLE);
        assert_eq!(a.state(), AnimatorState::Idle);
        assert!(a.transform(Part::Head).is_identity());
    }

    #[test]
    fn test_start_driver_glides_from_rest() {
        let mut a = animator();
        a.start_head_rotation(0.0);
        a.tick(0.1);

        let head = a.transform(Part::Head);
        assert_ne!(head, Transform3D::IDENTITY);
        assert_ne!(head, initial_turn_pose().transform(Part::Head));
        assert_eq!(a.model_pose(), &Pose::rest(), "model moves only on completion");
    }

    #[test]
    fn test_update_without_session_is_noop() {
        let mut a = animator();
        a.update_head_rotation(0.7);
        assert!(a.end_fraction().is_none());
        assert_eq!(a.pose(), Pose::rest());
    }

    #[test]
    fn test_update_clamps_out_of_range() {
        let mut a = animator();
        a.start_head_rotation(0.0);
        a.tick(SETTLE);
        a.update_head_rotation(4.0);
        assert_eq!(a.end_fraction(), Some(1.0));
        a.update_head_rotation(-1.0);
        assert_eq!(a.end_fraction(), Some(0.0));
    }

    #[test]
    fn test_restart_mid_glide_stores_live_pose_and_drops_old_completion() {
        let mut a = animator();
        a.start_head_rotation(0.3);
        let first = a.session_id().unwrap();
        a.tick(0.1);

        let live = a.pose();
        a.start_head_rotation(0.6);
        let second = a.session_id().unwrap();
        assert_ne!(first, second);
        assert_eq!(a.stored_pose(), Some(&live.transforms));
        assert_eq!(a.model_pose(), &live, "old drivers are cancelled in place");

        // The first session would have completed here
        a.tick(0.15);
        assert_eq!(a.end_fraction(), Some(0.0));
        assert_eq!(a.model_pose(), &live);

        // A late completion for the torn-down session changes nothing
        a.complete(Completion::Start(first));
        assert_eq!(a.end_fraction(), Some(0.0));

        a.tick(0.1);
        assert_eq!(a.end_fraction(), Some(0.6));
        assert_eq!(a.model_pose(), &initial_turn_pose());
    }

    #[test]
    fn test_restart_mid_scrub_resumes_from_stored_pose() {
        let mut a = animator();
        a.start_head_rotation(0.0);
        a.tick(SETTLE);
        a.update_head_rotation(0.5);
        let mid = a.pose();

        a.start_head_rotation(0.5);
        assert_eq!(a.stored_pose(), Some(&mid.transforms));

        // Start driver heads for the stored pose, which is where the parts are
        a.tick(0.1);
        assert!(a.transform(Part::Head).approx_eq(&mid.transform(Part::Head), 1e-4));

        a.tick(SETTLE);
        assert_eq!(a.model_pose(), &initial_turn_pose());
        assert_eq!(a.end_fraction(), Some(0.5));
    }

    #[test]
    fn test_stop_resets_ears_after_rest() {
        let mut a = animator();
        a.start_head_rotation(1.0);
        a.tick(SETTLE);
        assert_eq!(a.ear_z_order(Part::LeftEar), Some(ZOrder::Front));

        a.stop_head_rotation();
        assert!(a.stored_pose().is_some());
        assert!(a.end_fraction().is_none());
        // Layering holds while returning
        assert_eq!(a.ear_z_order(Part::LeftEar), Some(ZOrder::Front));

        a.tick(SETTLE);
        for part in Part::ALL {
            assert!(a.transform(part).is_identity(), "{:?}", part);
        }
        assert_eq!(a.ear_z_order(Part::LeftEar), Some(ZOrder::Back));
        assert_eq!(a.ear_z_order(Part::RightEar), Some(ZOrder::Back));
        assert_eq!(a.ear_z_order(Part::Nose), None);
    }

    #[test]
    fn test_stop_without_session_still_returns_to_rest() {
        let mut a = animator();
        a.stop_head_rotation();
        assert!(a.stored_pose().is_none());
        a.tick(SETTLE);
        assert_eq!(a.pose(), Pose::rest());
    }

    #[test]
    fn test_start_cancels_rest_animation() {
        let mut a = animator();
        a.start_head_rotation(1.0);
        a.tick(SETTLE);
        a.stop_head_rotation();
        a.tick(0.05);
        let rest_id = a.rest.as_ref().unwrap().id;

        a.start_head_rotation(0.2);
        assert!(a.rest.is_none());
        a.complete(Completion::Rest(rest_id));
        assert_ne!(a.model_pose().ears, EarLayering::REST, "stale rest completion ignored");
    }

    #[test]
    fn test_store_and_restore() {
        let mut a = animator();
        a.start_head_rotation(0.0);
        a.tick(SETTLE);
        a.store_current_state();
        a.stop_head_rotation();
        a.tick(SETTLE);
        assert_eq!(a.model_pose(), &Pose::rest());

        a.restore_state();
        assert_eq!(a.model_pose().transforms, initial_turn_pose().transforms);
    }

    #[test]
    fn test_try_restore_without_snapshot() {
        let mut a = animator();
        assert!(matches!(a.try_restore_state(), Err(CritterError::NoStoredPose)));
    }

    #[test]
    #[should_panic(expected = "no pose has been stored")]
    fn test_restore_without_snapshot_panics() {
        animator().restore_state();
    }

    #[test]
    fn test_validation_runs_alongside_turn() {
        let mut a = animator();
        a.start_head_rotation(0.0);
        a.validate();
        assert!(a.is_doe_eyed());

        a.tick(SETTLE);
        assert_eq!(a.eye_presentation(Part::LeftEye).unwrap().diameter, 12.7);
        assert_eq!(a.end_fraction(), Some(0.0));

        a.validate();
        a.tick(SETTLE);
        assert!(!a.is_doe_eyed());
        assert_eq!(a.eye_presentation(Part::RightEye).unwrap().diameter, 11.7);
    }

    #[test]
    fn test_custom_timing() {
        let config = AnimatorConfig {
            start_duration: 1.0,
            ..Default::default()
        };
        let mut a = PoseAnimator::new(config);
        a.start_head_rotation(0.25);
        a.tick(0.5);
        assert_eq!(a.end_fraction(), Some(0.0));
        a.tick(0.6);
        assert_eq!(a.end_fraction(), Some(0.25));
    }

    proptest! {
        #[test]
        fn prop_update_sets_exact_fraction(p in 0.0f32..=1.0, repeats in 1usize..5) {
            let mut a = animator();
            a.start_head_rotation(0.0);
            a.tick(SETTLE);
            for _ in 0..repeats {
                a.update_head_rotation(p);
            }
            prop_assert_eq!(a.end_fraction(), Some(p));
        }
    }
}
