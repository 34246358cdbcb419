//! Keyframe snapshots and pose interpolation

use glam::{Quat, Vec3};
use log::debug;

use super::Easing;
use crate::error::{Result, RigError};
use crate::pose::Pose;
use crate::skeleton::Skeleton;

/// Captured state of one bone
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct BoneSnapshot {
    pub position: Vec3,
    pub endpoint: Vec3,
    pub local_rotation: Quat,
    pub local_offset: Vec3,
    pub rest_local_endpoint: Vec3,
}

/// Deep copy of every bone at one instant
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Keyframe {
    bones: Vec<BoneSnapshot>,
}

impl Keyframe {
    /// Snapshot the live pose
    pub fn capture(skeleton: &Skeleton) -> Self {
        let bones = skeleton
            .bones()
            .iter()
            .map(|bone| BoneSnapshot {
                position: bone.position(),
                endpoint: bone.endpoint(),
                local_rotation: bone.local_rotation(),
                local_offset: bone.local_offset(),
                rest_local_endpoint: bone.rest_local_endpoint(),
            })
            .collect();
        Self { bones }
    }

    /// Per-bone snapshots in bone-index order
    pub fn bones(&self) -> &[BoneSnapshot] {
        &self.bones
    }

    /// Number of bones captured
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    fn check_fits(&self, skeleton: &Skeleton) -> Result<()> {
        if self.bones.len() == skeleton.len() {
            Ok(())
        } else {
            Err(RigError::BoneCountMismatch {
                expected: skeleton.len(),
                found: self.bones.len(),
            })
        }
    }

    /// Overwrite the live pose with this snapshot and re-propagate
    pub fn apply_to(&self, skeleton: &mut Skeleton) -> Result<()> {
        self.check_fits(skeleton)?;
        for (bone, snapshot) in skeleton.bones.iter_mut().zip(&self.bones) {
            bone.position = snapshot.position;
            bone.endpoint = snapshot.endpoint;
            bone.local_rotation = snapshot.local_rotation;
        }
        skeleton.propagate_all();
        Ok(())
    }
}

/// Ordered keyframe list; the keyframe index doubles as its time stamp
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyframeTrack {
    keyframes: Vec<Keyframe>,
}

impl KeyframeTrack {
    /// Create an empty track
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keyframes
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    /// Whether nothing has been captured yet
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// All keyframes in order
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Keyframe at `index`
    pub fn get(&self, index: usize) -> Result<&Keyframe> {
        self.keyframes.get(index).ok_or(RigError::KeyframeOutOfRange {
            index,
            count: self.keyframes.len(),
        })
    }

    /// Last valid playback time (`len - 1`), `None` for an empty track
    pub fn max_time(&self) -> Option<f32> {
        self.keyframes.len().checked_sub(1).map(|last| last as f32)
    }

    /// Append a snapshot of the live pose; returns its index
    pub fn capture(&mut self, skeleton: &Skeleton) -> usize {
        self.keyframes.push(Keyframe::capture(skeleton));
        let index = self.keyframes.len() - 1;
        debug!("Captured keyframe {index}");
        index
    }

    /// Overwrite keyframe `index` with the live pose
    pub fn replace(&mut self, index: usize, skeleton: &Skeleton) -> Result<()> {
        let count = self.keyframes.len();
        let slot = self
            .keyframes
            .get_mut(index)
            .ok_or(RigError::KeyframeOutOfRange { index, count })?;
        *slot = Keyframe::capture(skeleton);
        debug!("Replaced keyframe {index}");
        Ok(())
    }

    /// Remove keyframe `index`, shifting later keyframes down
    pub fn delete(&mut self, index: usize) -> Result<Keyframe> {
        if index >= self.keyframes.len() {
            return Err(RigError::KeyframeOutOfRange {
                index,
                count: self.keyframes.len(),
            });
        }
        debug!("Deleted keyframe {index}");
        Ok(self.keyframes.remove(index))
    }

    /// Drop every keyframe
    pub fn clear(&mut self) {
        self.keyframes.clear();
    }

    /// Interpolated pose at `time`.
    ///
    /// Rotations between keyframes `floor(time)` and `floor(time) + 1` are
    /// slerped with the eased fraction; joints of root bones come from the
    /// start keyframe and the rest of the pose is rebuilt by forward
    /// kinematics on a copy of `rig`. `time` equal to the last index yields
    /// the last keyframe's pose.
    pub fn sample(&self, rig: &Skeleton, time: f32, easing: Easing) -> Result<Pose> {
        let max = self.max_time().ok_or(RigError::EmptyTrack)?;
        if !(0.0..=max).contains(&time) {
            return Err(RigError::TimeOutOfRange { time, max });
        }

        let start_index = time.floor() as usize;
        let start = self.get(start_index)?;
        start.check_fits(rig)?;

        let mut frame = rig.clone();
        let Some(end) = self.keyframes.get(start_index + 1) else {
            start.apply_to(&mut frame)?;
            return Ok(Pose::from_skeleton(&frame));
        };
        end.check_fits(rig)?;

        let fraction = easing.apply(time - start_index as f32);
        for ((bone, from), to) in frame.bones.iter_mut().zip(&start.bones).zip(&end.bones) {
            bone.local_rotation = slerp_shortest(from.local_rotation, to.local_rotation, fraction);
            bone.position = from.position;
            bone.endpoint = from.endpoint;
        }
        frame.propagate_all();

        Ok(Pose::from_skeleton(&frame))
    }
}

/// Shortest-path spherical interpolation; exact at both ends
pub fn slerp_shortest(from: Quat, to: Quat, t: f32) -> Quat {
    if t <= 0.0 {
        return from;
    }
    let to = if from.dot(to) < 0.0 { -to } else { to };
    if t >= 1.0 {
        return to;
    }
    from.slerp(to, t).normalize()
}
