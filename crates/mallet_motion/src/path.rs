//! Three-phase mallet path.
//!
//! Within each event window the mallet lifts off the target it just struck,
//! cruises over to the rest pose above the next target, then strikes it:
//!
//! ```text
//!  strike                                         next strike
//!  |----|------------------------------------|----|
//!   lift               cruise                 hit
//!   0-10%              10-90%                 90-100%
//! ```

use std::collections::BTreeMap;

use mallet_math::{
    AnimatedValue, ConfigError, ConfigResult, Curve, Interpolate, Mat4, Pose,
};

use crate::StrikeEvent;

/// Window fraction at which the lift phase ends.
pub const PHASE_LIFT_END: f32 = 0.1;
/// Window fraction at which the strike phase begins.
pub const PHASE_STRIKE_START: f32 = 0.9;

/// Motion of a single mallet, rooted at the mallet's base.
///
/// Only the strikes this mallet is responsible for belong in `events`.
#[derive(Debug, Clone)]
pub struct MalletPath {
    events: Vec<StrikeEvent>,
    /// Pose that puts the mallet head on the target
    strike_poses: BTreeMap<u8, Pose>,
    /// Pose hovering above the target, ready to strike
    rest_poses: BTreeMap<u8, Pose>,
}

impl MalletPath {
    /// Build a path, checking every target has both poses.
    pub fn new(
        events: Vec<StrikeEvent>,
        strike_poses: BTreeMap<u8, Pose>,
        rest_poses: BTreeMap<u8, Pose>,
    ) -> ConfigResult<Self> {
        if events.is_empty() {
            return Err(ConfigError::EmptyEvents);
        }

        for event in &events {
            ConfigError::check_positive("strike duration", event.duration)?;
            if !strike_poses.contains_key(&event.target) {
                return Err(ConfigError::MissingPose {
                    kind: "strike",
                    target: event.target,
                });
            }
            if !rest_poses.contains_key(&event.target) {
                return Err(ConfigError::MissingPose {
                    kind: "rest",
                    target: event.target,
                });
            }
        }

        log::debug!(
            "MalletPath: {} strikes over {} targets",
            events.len(),
            strike_poses.len()
        );

        Ok(Self {
            events,
            strike_poses,
            rest_poses,
        })
    }

    pub fn events(&self) -> &[StrikeEvent] {
        &self.events
    }

    /// Pose of the mallet at `time`.
    pub fn pose(&self, time: f32) -> Pose {
        // The last event has no successor to move toward
        for pair in self.events.windows(2) {
            let (event, next) = (&pair[0], &pair[1]);
            if time < event.time || time >= event.end() {
                continue;
            }
            let x = (time - event.time) / event.duration;

            return if x < PHASE_LIFT_END {
                self.strike(event.target)
                    .interpolate(&self.rest(event.target), x / PHASE_LIFT_END)
            } else if x < PHASE_STRIKE_START {
                let span = PHASE_STRIKE_START - PHASE_LIFT_END;
                self.rest(event.target)
                    .interpolate(&self.rest(next.target), (x - PHASE_LIFT_END) / span)
            } else {
                let span = 1.0 - PHASE_STRIKE_START;
                self.rest(next.target)
                    .interpolate(&self.strike(next.target), (x - PHASE_STRIKE_START) / span)
            };
        }

        // Non-empty by construction
        let last = self.events[self.events.len() - 1];
        self.rest(last.target)
    }

    /// Wrap the path as an animated transform.
    pub fn into_animated(self) -> AnimatedValue<Mat4> {
        AnimatedValue::curve(self)
    }

    fn strike(&self, target: u8) -> Pose {
        // Presence checked in `new`
        self.strike_poses.get(&target).copied().unwrap_or_default()
    }

    fn rest(&self, target: u8) -> Pose {
        self.rest_poses.get(&target).copied().unwrap_or_default()
    }
}

impl Curve<Mat4> for MalletPath {
    fn evaluate(&self, time: f32) -> Mat4 {
        self.pose(time).to_mat4()
    }
}

impl Curve<Pose> for MalletPath {
    fn evaluate(&self, time: f32) -> Pose {
        self.pose(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Onset;
    use mallet_math::Vec3;

    fn poses() -> (BTreeMap<u8, Pose>, BTreeMap<u8, Pose>) {
        let mut strike = BTreeMap::new();
        let mut rest = BTreeMap::new();
        for (target, x) in [(60u8, -1.0f32), (62, 1.0)] {
            strike.insert(target, Pose::new(Vec3::new(x, 0.0, 0.0), Default::default()));
            rest.insert(target, Pose::new(Vec3::new(x, 1.0, 0.0), Default::default()));
        }
        (strike, rest)
    }

    fn path() -> MalletPath {
        let onsets = [Onset::new(0.0, 60, 100), Onset::new(1.0, 62, 100)];
        let (strike, rest) = poses();
        MalletPath::new(StrikeEvent::from_onsets(&onsets, 1.0), strike, rest).unwrap()
    }

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_rejects_empty_and_missing() {
        let (strike, rest) = poses();
        let err = MalletPath::new(Vec::new(), strike.clone(), rest.clone()).unwrap_err();
        assert_eq!(err, ConfigError::EmptyEvents);

        let events = vec![StrikeEvent::new(0.0, 1.0, 70, 100)];
        let err = MalletPath::new(events, strike, rest).unwrap_err();
        assert_eq!(err, ConfigError::MissingPose { kind: "strike", target: 70 });
    }

    #[test]
    fn test_rejects_zero_duration() {
        let (strike, rest) = poses();
        let events = vec![StrikeEvent::new(0.0, 0.0, 60, 100)];
        assert!(MalletPath::new(events, strike, rest).is_err());
    }

    #[test]
    fn test_phases() {
        let path = path();

        // Window start: on the first target
        assert!(close(path.pose(0.0).translation, Vec3::new(-1.0, 0.0, 0.0)));
        // End of lift: hovering over the first target
        assert!(close(path.pose(0.1).translation, Vec3::new(-1.0, 1.0, 0.0)));
        // Halfway through the cruise
        assert!(close(path.pose(0.5).translation, Vec3::new(0.0, 1.0, 0.0)));
        // Halfway through the strike on the next target
        assert!(close(path.pose(0.95).translation, Vec3::new(1.0, 0.5, 0.0)));
    }

    #[test]
    fn test_outside_windows_rests_on_last_target() {
        let path = path();
        let last_rest = Vec3::new(1.0, 1.0, 0.0);
        assert!(close(path.pose(5.0).translation, last_rest));
        assert!(close(path.pose(-1.0).translation, last_rest));
    }

    #[test]
    fn test_animated_transform() {
        let animated = path().into_animated();
        let m = animated.evaluate(0.5);
        assert!(close(m.transform_point3(Vec3::ZERO), Vec3::new(0.0, 1.0, 0.0)));
    }
}
