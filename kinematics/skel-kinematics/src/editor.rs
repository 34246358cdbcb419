//! Editing session over one skeleton
//!
//! [`RigEditor`] ties the live skeleton to its keyframe track, the playback
//! state and the current selection. It is the surface an input layer talks
//! to: everything crossing it is plain numbers and `glam` vectors.

use glam::Vec3;
use log::debug;

use crate::animation::{KeyframeTrack, Mode, PlaybackState};
use crate::config::KinematicsConfig;
use crate::error::Result;
use crate::ik::{FabrikSolver, IkOutcome};
use crate::picking::{self, Ray};
use crate::pose::Pose;
use crate::render::RenderData;
use crate::rig::RigDescription;
use crate::skeleton::Skeleton;

/// Live skeleton, keyframes, playback and selection
#[derive(Debug, Clone)]
pub struct RigEditor {
    skeleton: Skeleton,
    track: KeyframeTrack,
    playback: PlaybackState,
    config: KinematicsConfig,
    highlighted: Option<usize>,
}

impl RigEditor {
    /// Validate a rig description and open an editor on it
    pub fn new(description: &RigDescription, config: KinematicsConfig) -> Result<Self> {
        let skeleton = Skeleton::from_description(description, &config)?;
        Ok(Self::from_skeleton(skeleton, config))
    }

    /// Open an editor on an existing skeleton
    pub fn from_skeleton(skeleton: Skeleton, config: KinematicsConfig) -> Self {
        Self {
            skeleton,
            track: KeyframeTrack::new(),
            playback: PlaybackState::new(),
            config,
            highlighted: None,
        }
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn track(&self) -> &KeyframeTrack {
        &self.track
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn config(&self) -> &KinematicsConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.playback.mode()
    }

    /// Currently selected bone
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Select a bone directly (or clear the selection with `None`)
    pub fn set_highlighted(&mut self, bone: Option<usize>) -> Result<()> {
        if let Some(index) = bone {
            self.skeleton.check_index(index)?;
        }
        self.highlighted = bone;
        Ok(())
    }

    /// Select the closest bone along `ray`; a miss clears the selection
    pub fn pick(&mut self, ray: &Ray) -> Option<usize> {
        self.highlighted = picking::pick(&self.skeleton, ray, &self.config).map(|hit| hit.bone);
        self.highlighted
    }

    /// See [`Skeleton::rotate_on_axis`]
    pub fn rotate_on_axis(&mut self, bone: usize, angle: f32, world_axis: Vec3) -> Result<()> {
        self.skeleton.rotate_on_axis(bone, angle, world_axis)
    }

    /// See [`Skeleton::roll`]
    pub fn roll(&mut self, bone: usize, angle: f32) -> Result<()> {
        self.skeleton.roll(bone, angle)
    }

    /// See [`Skeleton::translate`]
    #[allow(clippy::too_many_arguments)]
    pub fn translate(
        &mut self,
        bone: usize,
        dx: f32,
        dy: f32,
        right: Vec3,
        up: Vec3,
        max_reach: f32,
        anchor: Vec3,
    ) -> Result<bool> {
        self.skeleton
            .translate(bone, dx, dy, right, up, max_reach, anchor)
    }

    /// Translate bounded by the bone's own chain: the anchor joint is the
    /// fixed point and the chain's total length the reach
    pub fn drag_bone(&mut self, bone: usize, dx: f32, dy: f32, right: Vec3, up: Vec3) -> Result<bool> {
        let chain = self.skeleton.ik_chain(bone)?;
        self.skeleton
            .translate(bone, dx, dy, right, up, chain.reach(), chain.base())
    }

    /// Pull the tip of `bone` towards `target` with FABRIK over its chain
    pub fn ik_drag(&mut self, bone: usize, target: Vec3) -> Result<IkOutcome> {
        let chain = self.skeleton.ik_chain(bone)?;
        FabrikSolver::new(self.config.epsilon).solve(&mut self.skeleton, &chain, target)
    }

    /// Append the live pose to the track; returns the new keyframe index
    pub fn capture(&mut self) -> Result<usize> {
        self.playback.require_edit()?;
        self.playback.invalidate();
        Ok(self.track.capture(&self.skeleton))
    }

    /// Overwrite keyframe `index` with the live pose
    pub fn replace(&mut self, index: usize) -> Result<()> {
        self.playback.require_edit()?;
        self.track.replace(index, &self.skeleton)?;
        self.playback.invalidate();
        Ok(())
    }

    /// Remove keyframe `index`
    pub fn delete(&mut self, index: usize) -> Result<()> {
        self.playback.require_edit()?;
        self.track.delete(index)?;
        self.playback.invalidate();
        Ok(())
    }

    /// Load keyframe `index` back into the live pose
    pub fn restore(&mut self, index: usize) -> Result<()> {
        self.playback.require_edit()?;
        self.track.get(index)?.apply_to(&mut self.skeleton)?;
        debug!("Restored keyframe {index}");
        Ok(())
    }

    /// Drop every keyframe and rewind
    pub fn clear_keyframes(&mut self) -> Result<()> {
        self.playback.require_edit()?;
        self.track.clear();
        self.playback.seek(0.0);
        self.playback.invalidate();
        debug!("Cleared keyframe track");
        Ok(())
    }

    pub fn start_playback(&mut self) -> Result<()> {
        self.playback.start(self.track.len())
    }

    pub fn stop_playback(&mut self) {
        self.playback.stop();
    }

    pub fn toggle_playback(&mut self) -> Result<Mode> {
        self.playback.toggle(self.track.len())
    }

    /// Advance playback by `dt`; returns the mode afterwards
    pub fn advance(&mut self, dt: f32) -> Mode {
        self.playback.advance(dt, self.track.len())
    }

    /// Interpolated pose at `time`, cached per time value
    pub fn evaluate(&mut self, time: f32) -> Result<&Pose> {
        self.playback.seek(time);
        self.playback
            .evaluate(&self.track, &self.skeleton, self.config.easing)
    }

    /// The pose a renderer should draw now: the interpolated frame while
    /// playing, the live skeleton otherwise
    pub fn current_pose(&mut self) -> Result<Pose> {
        if self.playback.is_playing() {
            let pose = self
                .playback
                .evaluate(&self.track, &self.skeleton, self.config.easing)?;
            Ok(pose.clone())
        } else {
            Ok(Pose::from_skeleton(&self.skeleton))
        }
    }

    /// Flat translation/rotation buffers plus the selection
    pub fn render_data(&mut self) -> Result<RenderData> {
        let pose = self.current_pose()?;
        Ok(RenderData::from_pose(&pose, self.highlighted))
    }

    /// Mode summary for a status bar
    pub fn status_line(&self) -> String {
        self.playback.status_line(self.track.len())
    }
}
