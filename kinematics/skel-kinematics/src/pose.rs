//! Flattened per-bone world pose

use glam::{Quat, Vec3};

use crate::skeleton::Skeleton;

/// World-space state of one bone
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct PoseBone {
    /// Joint position
    pub position: Vec3,
    /// Tip position
    pub endpoint: Vec3,
    /// Rotation relative to the parent frame
    pub local_rotation: Quat,
    /// Accumulated rotation from the root
    pub world_rotation: Quat,
}

/// A full skeleton pose in bone-index order
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    bones: Vec<PoseBone>,
}

impl Pose {
    /// Snapshot the live pose of a skeleton
    pub fn from_skeleton(skeleton: &Skeleton) -> Self {
        let bones = skeleton
            .bones()
            .iter()
            .map(|bone| PoseBone {
                position: bone.position(),
                endpoint: bone.endpoint(),
                local_rotation: bone.local_rotation(),
                world_rotation: skeleton.world_rotation_of(bone.index()),
            })
            .collect();
        Self { bones }
    }

    /// Per-bone entries
    pub fn bones(&self) -> &[PoseBone] {
        &self.bones
    }

    /// Number of bones
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    /// Whether the pose holds no bones
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Joint positions flattened to `[x, y, z]` per bone
    pub fn translations(&self) -> Vec<f32> {
        self.bones
            .iter()
            .flat_map(|bone| bone.position.to_array())
            .collect()
    }

    /// World rotations flattened to `[x, y, z, w]` per bone
    pub fn rotations(&self) -> Vec<f32> {
        self.bones
            .iter()
            .flat_map(|bone| bone.world_rotation.to_array())
            .collect()
    }
}
