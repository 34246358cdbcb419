//! Edit/playback mode tracking and the interpolated-frame cache

use log::{debug, warn};

use super::{Easing, KeyframeTrack};
use crate::error::{Result, RigError};
use crate::pose::Pose;
use crate::skeleton::Skeleton;

/// Which side of the editor is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "snake_case"))]
pub enum Mode {
    /// Bones and keyframes may be edited
    #[default]
    Edit,
    /// The track is being played back
    Playback,
}

/// Current playback time plus the frame computed for it
#[derive(Debug, Clone, Default)]
pub struct PlaybackState {
    mode: Mode,
    time: f32,
    last_evaluated: Option<f32>,
    cached: Option<Pose>,
}

impl PlaybackState {
    /// Edit mode at time zero with an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Active mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether playback is running
    pub fn is_playing(&self) -> bool {
        self.mode == Mode::Playback
    }

    /// Current playback time in keyframe units
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Time of the cached frame, if any
    pub fn last_evaluated(&self) -> Option<f32> {
        self.last_evaluated
    }

    /// Move the playhead without changing mode
    pub fn seek(&mut self, time: f32) {
        self.time = time;
    }

    /// Fail with [`RigError::PlaybackActive`] unless in edit mode
    pub fn require_edit(&self) -> Result<()> {
        match self.mode {
            Mode::Edit => Ok(()),
            Mode::Playback => Err(RigError::PlaybackActive),
        }
    }

    /// Start from time zero; needs a start and an end keyframe
    pub fn start(&mut self, keyframe_count: usize) -> Result<()> {
        if keyframe_count < 2 {
            return Err(RigError::NotEnoughKeyframes {
                count: keyframe_count,
            });
        }
        self.time = 0.0;
        self.mode = Mode::Playback;
        self.invalidate();
        debug!("Playback started over {keyframe_count} keyframes");
        Ok(())
    }

    /// Return to edit mode, keeping the playhead
    pub fn stop(&mut self) {
        if self.mode == Mode::Playback {
            debug!("Playback stopped at {:.3}", self.time);
        }
        self.mode = Mode::Edit;
    }

    /// Switch between edit and playback; returns the new mode
    pub fn toggle(&mut self, keyframe_count: usize) -> Result<Mode> {
        match self.mode {
            Mode::Edit => self.start(keyframe_count)?,
            Mode::Playback => self.stop(),
        }
        Ok(self.mode)
    }

    /// Advance the playhead by `dt` keyframe units while playing.
    ///
    /// Reaching the last keyframe wraps time to zero and drops back to edit
    /// mode, as does a step too small to move the playhead at all. Returns
    /// the mode after the step.
    pub fn advance(&mut self, dt: f32, keyframe_count: usize) -> Mode {
        if self.mode != Mode::Playback {
            return self.mode;
        }

        let next = self.time + dt;
        let max_time = keyframe_count.saturating_sub(1) as f32;
        if next >= max_time {
            debug!("Playback reached the last keyframe, back to edit mode");
            self.finish();
        } else if dt > 0.0 && next <= self.time {
            warn!("Step {dt} cannot move the playhead past {}, stopping playback", self.time);
            self.finish();
        } else {
            self.time = next;
        }
        self.mode
    }

    fn finish(&mut self) {
        self.time = 0.0;
        self.mode = Mode::Edit;
    }

    /// Forget the cached frame
    pub fn invalidate(&mut self) {
        self.last_evaluated = None;
        self.cached = None;
    }

    /// Frame at the current time, recomputed only when the time changed
    /// since the last call
    pub fn evaluate(&mut self, track: &KeyframeTrack, rig: &Skeleton, easing: Easing) -> Result<&Pose> {
        let stale = self.last_evaluated != Some(self.time) || self.cached.is_none();
        if stale {
            let pose = track.sample(rig, self.time, easing)?;
            self.last_evaluated = Some(self.time);
            self.cached = Some(pose);
        }
        self.cached.as_ref().ok_or(RigError::EmptyTrack)
    }

    /// One-line summary such as `edit: 3 keyframes` or
    /// `playback: 1.25 / 2.00`
    pub fn status_line(&self, keyframe_count: usize) -> String {
        match self.mode {
            Mode::Edit => format!("edit: {keyframe_count} keyframes"),
            Mode::Playback => format!(
                "playback: {:.2} / {:.2}",
                self.time,
                keyframe_count.saturating_sub(1) as f32
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KinematicsConfig;
    use crate::rig::RigDescription;
    use glam::Vec3;

    #[test]
    fn test_start_needs_two_keyframes() {
        let mut state = PlaybackState::new();
        assert!(matches!(
            state.start(1),
            Err(RigError::NotEnoughKeyframes { count: 1 })
        ));
        assert_eq!(state.mode(), Mode::Edit);
        state.start(2).unwrap();
        assert!(state.is_playing());
    }

    #[test]
    fn test_advance_wraps_to_edit() {
        let mut state = PlaybackState::new();
        state.start(3).unwrap();
        assert_eq!(state.advance(1.5, 3), Mode::Playback);
        assert!((state.time() - 1.5).abs() < 1e-6);
        assert_eq!(state.advance(0.5, 3), Mode::Edit);
        assert_eq!(state.time(), 0.0);
        // No-op outside playback
        assert_eq!(state.advance(0.5, 3), Mode::Edit);
        assert_eq!(state.time(), 0.0);
    }

    #[test]
    fn test_advance_with_vanishing_step_ends_playback() {
        let mut state = PlaybackState::new();
        state.start(2).unwrap();
        state.seek(0.25);
        assert_eq!(state.advance(1e-8, 2), Mode::Edit);
        assert_eq!(state.time(), 0.0);
    }

    #[test]
    fn test_toggle_and_status() {
        let mut state = PlaybackState::new();
        assert_eq!(state.status_line(4), "edit: 4 keyframes");
        assert_eq!(state.toggle(4).unwrap(), Mode::Playback);
        state.advance(1.25, 4);
        assert_eq!(state.status_line(4), "playback: 1.25 / 3.00");
        assert!(matches!(state.require_edit(), Err(RigError::PlaybackActive)));
        assert_eq!(state.toggle(4).unwrap(), Mode::Edit);
        assert!((state.time() - 1.25).abs() < 1e-6);
    }

    #[test]
    fn test_evaluate_caches_by_time() {
        let mut skeleton = Skeleton::from_description(
            &RigDescription::straight_chain(2, 1.0),
            &KinematicsConfig::default(),
        )
        .unwrap();
        let mut track = KeyframeTrack::new();
        track.capture(&skeleton);
        skeleton.rotate_on_axis(1, 1.0, Vec3::X).unwrap();
        track.capture(&skeleton);

        let mut state = PlaybackState::new();
        state.start(track.len()).unwrap();
        state.seek(0.25);
        let first = state.evaluate(&track, &skeleton, Easing::Linear).unwrap().clone();
        assert_eq!(state.last_evaluated(), Some(0.25));

        // Same time: the cached frame comes back even for a different rig
        let other = Skeleton::from_description(
            &RigDescription::straight_chain(7, 1.0),
            &KinematicsConfig::default(),
        )
        .unwrap();
        let again = state.evaluate(&track, &other, Easing::Linear).unwrap();
        assert_eq!(again, &first);

        state.seek(0.5);
        assert!(state.evaluate(&track, &other, Easing::Linear).is_err());
    }
}
