//! Tunables shared by the kinematics operations

use crate::animation::Easing;

/// Options controlling picking, degenerate-geometry handling and playback
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct KinematicsConfig {
    /// Radius of the picking cylinder around every bone (world units)
    pub pick_radius: f32,
    /// Threshold below which directions and offsets count as zero-length,
    /// and the alignment tolerance used when building IK frames
    pub epsilon: f32,
    /// Squared-length threshold under which a pick ray counts as parallel
    /// to a bone axis
    pub parallel_epsilon: f32,
    /// Maximum ancestor depth accepted when validating a hierarchy
    pub max_depth: usize,
    /// Time remapping applied between two keyframes during playback
    pub easing: Easing,
}

impl Default for KinematicsConfig {
    fn default() -> Self {
        Self {
            pick_radius: 0.1,
            epsilon: 1e-5,
            parallel_epsilon: 1e-9,
            max_depth: 256,
            easing: Easing::Linear,
        }
    }
}

impl KinematicsConfig {
    /// Set the picking cylinder radius
    pub fn with_pick_radius(mut self, radius: f32) -> Self {
        self.pick_radius = radius;
        self
    }

    /// Set the degenerate-geometry threshold
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the hierarchy depth limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the playback easing
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}
