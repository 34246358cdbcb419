//! Skeletal kinematics for rigged meshes
//!
//! A [`Skeleton`] is a validated bone hierarchy with a live pose. Edits
//! (rotate, roll, translate, IK drag) change per-bone local rotations or
//! joints and are propagated down the hierarchy before they return. Poses
//! can be captured into a [`KeyframeTrack`] and played back with eased
//! shortest-path interpolation.
//!
//! # Example
//!
//! ```rust
//! use glam::Vec3;
//! use skel_kinematics::{KinematicsConfig, Ray, RigDescription, RigEditor};
//!
//! let rig = RigDescription::straight_chain(3, 1.0);
//! let mut editor = RigEditor::new(&rig, KinematicsConfig::default())?;
//!
//! let picked = editor.pick(&Ray::new(Vec3::new(0.0, 1.5, 5.0), Vec3::NEG_Z));
//! assert_eq!(picked, Some(1));
//!
//! editor.capture()?;
//! editor.rotate_on_axis(1, 0.5, Vec3::Z)?;
//! editor.capture()?;
//!
//! let pose = editor.evaluate(0.5)?;
//! assert_eq!(pose.len(), 3);
//! # Ok::<(), skel_kinematics::RigError>(())
//! ```

pub mod animation;
pub mod config;
pub mod editor;
pub mod error;
pub mod ik;
pub mod picking;
pub mod pose;
pub mod render;
pub mod rig;
pub mod skeleton;

// Re-export common types
pub use animation::{Easing, Keyframe, KeyframeTrack, Mode, PlaybackState};
pub use config::KinematicsConfig;
pub use editor::RigEditor;
pub use error::{Result, RigError};
pub use ik::{FabrikSolver, IkChain, IkOutcome};
pub use picking::{PickHit, Ray, pick};
pub use pose::{Pose, PoseBone};
pub use render::RenderData;
pub use rig::{BoneDescription, RigDescription};
pub use skeleton::{Bone, Collider, Skeleton};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
