//! Bookkeeping for one head-turn gesture and for the return to rest

use std::fmt;

use crate::animation::{Easing, PoseDriver};

use super::Pose;

/// Monotonic id tagging a session or rest animation
///
/// Completions carry the id they were started under and are dropped unless it
/// still names the live session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u64);

impl SessionId {
    pub fn to_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out increasing [`SessionId`]s
#[derive(Debug, Default, Clone)]
pub struct SessionIds {
    next: u64,
}

impl SessionIds {
    pub fn next_id(&mut self) -> SessionId {
        self.next += 1;
        SessionId(self.next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// Start driver is gliding into the turn's starting pose
    Normalizing,
    /// End driver follows the gesture
    Scrubbing,
}

/// The start/end driver pair of one turn gesture
#[derive(Debug, Clone)]
pub struct TurnSession {
    pub id: SessionId,
    pub phase: TurnPhase,
    /// End-driver fraction to apply once normalizing is over
    pub initial_progress: f32,
    pub start: PoseDriver,
    pub end: PoseDriver,
}

impl TurnSession {
    /// `end` must be an unstarted initial-to-final driver
    pub fn begin(
        id: SessionId,
        live: &Pose,
        start_target: &Pose,
        end: PoseDriver,
        start_duration: f32,
        initial_progress: f32,
    ) -> Self {
        let mut start = PoseDriver::new(live, start_target, start_duration, Easing::EaseIn);
        start.playback.start();
        Self {
            id,
            phase: TurnPhase::Normalizing,
            initial_progress,
            start,
            end,
        }
    }

    /// Driver whose value is on screen
    pub fn presenting(&self) -> Option<&PoseDriver> {
        match self.phase {
            TurnPhase::Normalizing => Some(&self.start),
            TurnPhase::Scrubbing if self.end.playback.is_active() => Some(&self.end),
            TurnPhase::Scrubbing => None,
        }
    }
}

/// One-shot glide back to the neutral pose
#[derive(Debug, Clone)]
pub struct RestAnimation {
    pub id: SessionId,
    pub driver: PoseDriver,
}

/// A finished one-shot driver, tagged with the id it ran under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Start(SessionId),
    Rest(SessionId),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::critter::{final_turn_pose, initial_turn_pose};

    #[test]
    fn test_ids_increase() {
        let mut ids = SessionIds::default();
        let a = ids.next_id();
        let b = ids.next_id();
        assert!(b > a);
        assert_eq!(b.to_raw(), a.to_raw() + 1);
        assert_eq!(a.to_string(), "#1");
    }

    #[test]
    fn test_session_presents_start_then_end() {
        let mut ids = SessionIds::default();
        let initial = initial_turn_pose();
        let end = PoseDriver::new(&initial, &final_turn_pose(), 0.2, Easing::Linear);
        let mut session = TurnSession::begin(ids.next_id(), &Pose::rest(), &initial, end, 0.2, 0.4);

        assert!(session.start.playback.is_running());
        assert_eq!(session.presenting().unwrap().sample(), Pose::rest());

        session.phase = TurnPhase::Scrubbing;
        assert!(session.presenting().is_none(), "end driver has not been positioned yet");
        session.end.playback.set_fraction(session.initial_progress);
        assert_eq!(session.presenting().unwrap().playback.fraction(), 0.4);
    }
}
