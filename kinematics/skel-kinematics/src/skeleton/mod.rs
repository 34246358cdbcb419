//! Bone hierarchy and forward kinematics
//!
//! World transforms compose root to leaf:
//!
//! - root: `Translate(position) * Rotate(local_rotation)`
//! - child: `World(parent) * Translate(parent.rest_local_endpoint + local_offset) * Rotate(local_rotation)`
//!
//! After every mutating operation each bone's endpoint equals
//! `World(bone) * rest_local_endpoint` and each child joint equals
//! `parent.endpoint + WorldRotation(parent) * child.local_offset`.

mod bone;
mod edit;
mod hierarchy;

pub use bone::{Bone, Collider};
pub use hierarchy::Skeleton;
