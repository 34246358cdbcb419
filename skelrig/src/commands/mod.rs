//! Command implementations

pub mod anim;
pub mod rig;
