//! Per-frame export for a skinning renderer

use crate::pose::Pose;

/// Flat buffers uploaded once per frame
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderData {
    /// `[x, y, z]` joint translation per bone
    pub translations: Vec<f32>,
    /// `[x, y, z, w]` world rotation per bone
    pub rotations: Vec<f32>,
    /// Selected bone, -1 when nothing is selected
    pub highlighted: i32,
}

impl RenderData {
    /// Flatten a pose together with the current selection
    pub fn from_pose(pose: &Pose, highlighted: Option<usize>) -> Self {
        Self {
            translations: pose.translations(),
            rotations: pose.rotations(),
            highlighted: highlighted
                .and_then(|index| i32::try_from(index).ok())
                .unwrap_or(-1),
        }
    }

    /// Number of bones described
    pub fn bone_count(&self) -> usize {
        self.translations.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KinematicsConfig;
    use crate::rig::RigDescription;
    use crate::skeleton::Skeleton;

    #[test]
    fn test_render_data_layout() {
        let skeleton = Skeleton::from_description(
            &RigDescription::straight_chain(4, 0.5),
            &KinematicsConfig::default(),
        )
        .unwrap();
        let pose = Pose::from_skeleton(&skeleton);

        let data = RenderData::from_pose(&pose, None);
        assert_eq!(data.translations.len(), 12);
        assert_eq!(data.rotations.len(), 16);
        assert_eq!(data.highlighted, -1);
        assert_eq!(data.bone_count(), 4);

        assert_eq!(RenderData::from_pose(&pose, Some(2)).highlighted, 2);
    }
}
