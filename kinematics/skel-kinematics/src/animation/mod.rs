//! Keyframe animation
//!
//! This module provides keyframe support for edited poses:
//! - Deep pose snapshots collected in an ordered track
//! - Eased shortest-path interpolation between neighbouring keyframes
//! - Edit/playback mode tracking with a per-time frame cache

mod easing;
mod keyframe;
mod playback;

pub use easing::Easing;
pub use keyframe::{BoneSnapshot, Keyframe, KeyframeTrack, slerp_shortest};
pub use playback::{Mode, PlaybackState};
