//! Single-pass FABRIK inverse kinematics
//!
//! One forward pass (effector towards base) followed by one backward pass
//! (base towards effector). There is no iteration to convergence, so an
//! unreachable target simply leaves the chain stretched towards it.
//!
//! The bone closest to the base keeps the world orientation it had before
//! the solve; only the bones above it are re-aimed.

use glam::{Quat, Vec3};
use log::{debug, warn};
use std::f32::consts::PI;

use crate::error::{Result, RigError};
use crate::skeleton::Skeleton;

/// Parent-linked run of bones, effector first
#[derive(Debug, Clone, PartialEq)]
pub struct IkChain {
    bones: Vec<usize>,
    base: Vec3,
    reach: f32,
}

impl IkChain {
    /// Build a chain; each bone after the first must be the parent of the
    /// one before it
    pub fn new(skeleton: &Skeleton, bones: Vec<usize>, base: Vec3) -> Result<Self> {
        if bones.is_empty() {
            return Err(RigError::InvalidChain("chain is empty".to_string()));
        }
        for &index in &bones {
            skeleton.check_index(index)?;
        }
        for pair in bones.windows(2) {
            if skeleton.bones[pair[0]].parent() != Some(pair[1]) {
                return Err(RigError::InvalidChain(format!(
                    "bone {} is not the parent of bone {}",
                    pair[1], pair[0]
                )));
            }
        }

        let reach = bones.iter().map(|&i| skeleton.bones[i].length()).sum();
        Ok(Self { bones, base, reach })
    }

    /// Bone indices, effector first
    pub fn bones(&self) -> &[usize] {
        &self.bones
    }

    /// Fixed base point the chain hangs from
    pub fn base(&self) -> Vec3 {
        self.base
    }

    /// Sum of the chain's bone lengths
    pub fn reach(&self) -> f32 {
        self.reach
    }

    /// The bone whose tip is driven to the target
    pub fn effector(&self) -> usize {
        self.bones[0]
    }

    /// The bone closest to the base
    pub fn base_bone(&self) -> usize {
        self.bones[self.bones.len() - 1]
    }
}

/// Result of a solve, measured after forward kinematics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IkOutcome {
    /// Effector tip in world space
    pub tip: Vec3,
    /// Distance from the tip to the requested target
    pub distance: f32,
}

/// FABRIK solver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FabrikSolver {
    epsilon: f32,
}

impl Default for FabrikSolver {
    fn default() -> Self {
        Self { epsilon: 1e-5 }
    }
}

impl FabrikSolver {
    /// Create a solver with the given degenerate-geometry threshold
    pub fn new(epsilon: f32) -> Self {
        Self { epsilon }
    }

    /// Aim `chain` so the effector tip moves towards `target`, then
    /// re-propagate the pose from the base bone
    pub fn solve(&self, skeleton: &mut Skeleton, chain: &IkChain, target: Vec3) -> Result<IkOutcome> {
        let base_bone = chain.base_bone();
        let pinned = skeleton.world_rotation_of(base_bone);

        self.forward_pass(skeleton, chain.bones(), target, chain.base());
        let solved = self.backward_pass(skeleton, chain.bones(), target, chain.base());

        // Terminal correction: the base bone keeps its pre-solve orientation
        let local = match skeleton.bones[base_bone].parent() {
            Some(parent) => skeleton.world_rotation_of(parent).inverse() * pinned,
            None => pinned,
        };
        skeleton.set_local_rotation(base_bone, local);

        // Bones above the base keep their solved world orientation
        for &(index, rotation) in solved.iter().skip(1) {
            if let Some(parent) = skeleton.bones[index].parent() {
                let local = skeleton.world_rotation_of(parent).inverse() * rotation;
                skeleton.set_local_rotation(index, local);
            }
        }

        skeleton.propagate_from(base_bone);

        let tip = skeleton.bones[chain.effector()].endpoint();
        let outcome = IkOutcome {
            tip,
            distance: tip.distance(target),
        };
        debug!(
            "IK solve over {} bones: tip {:?}, {:.4} from target",
            chain.bones().len(),
            outcome.tip,
            outcome.distance
        );
        Ok(outcome)
    }

    /// Effector towards base: lay each bone from the running effector point
    /// towards the next bone's endpoint, the last one towards `base`
    fn forward_pass(&self, skeleton: &mut Skeleton, chain: &[usize], target: Vec3, base: Vec3) {
        let mut effector = target;
        for (k, &index) in chain.iter().enumerate() {
            let aim = match chain.get(k + 1) {
                Some(&next) => skeleton.bones[next].endpoint(),
                None => base,
            };
            let bone = &skeleton.bones[index];
            let fallback = (bone.position() - bone.endpoint())
                .normalize_or(-bone.rest_local_endpoint().normalize_or(Vec3::Y));
            let direction = self.direction_or(index, effector, aim, fallback);

            let bone = &mut skeleton.bones[index];
            bone.position = effector;
            bone.endpoint = effector + direction * bone.length;
            effector = bone.endpoint;
        }
    }

    /// Base towards effector: lay each bone from the running base point and
    /// re-aim its rotation; the effector bone points at `target`.
    ///
    /// Returns the world rotation chosen for each bone, base first.
    fn backward_pass(
        &self,
        skeleton: &mut Skeleton,
        chain: &[usize],
        target: Vec3,
        base: Vec3,
    ) -> Vec<(usize, Quat)> {
        let order: Vec<usize> = chain.iter().rev().copied().collect();
        let mut solved = Vec::with_capacity(order.len());
        let mut effector = base;

        for (k, &index) in order.iter().enumerate() {
            let aim = match order.get(k + 1) {
                Some(&next) => skeleton.bones[next].endpoint(),
                None => target,
            };
            let bone = &skeleton.bones[index];
            let fallback = (bone.endpoint() - bone.position())
                .normalize_or(bone.rest_local_endpoint().normalize_or(Vec3::Y));
            let direction = self.direction_or(index, effector, aim, fallback);

            let bone = &mut skeleton.bones[index];
            bone.position = effector;
            bone.endpoint = effector + direction * bone.length;
            effector = bone.endpoint;

            let rotation = self.update_frame(skeleton, index, direction);
            solved.push((index, rotation));
        }

        solved
    }

    /// Store the rotation taking the rest direction onto `direction` as the
    /// bone's world orientation; returns that world rotation
    fn update_frame(&self, skeleton: &mut Skeleton, index: usize, direction: Vec3) -> Quat {
        let bone = &mut skeleton.bones[index];
        bone.collider.update(bone.position, bone.endpoint);

        let rest = bone.rest_local_endpoint().normalize_or_zero();
        if rest == Vec3::ZERO {
            return skeleton.world_rotation_of(index);
        }

        let rotation = rotation_between(rest, direction, self.epsilon);
        let local = match skeleton.bones[index].parent() {
            Some(parent) => skeleton.world_rotation_of(parent).inverse() * rotation,
            None => rotation,
        };
        skeleton.set_local_rotation(index, local);
        rotation
    }

    fn direction_or(&self, index: usize, from: Vec3, to: Vec3, fallback: Vec3) -> Vec3 {
        let delta = to - from;
        let length = delta.length();
        if length < self.epsilon || !length.is_finite() {
            warn!("Bone {index}: zero-length IK segment, keeping previous direction");
            fallback
        } else {
            delta / length
        }
    }
}

/// Rotation taking `rest` onto `target` (both normalized internally).
///
/// Aligned inputs give identity. Opposite inputs turn half a revolution
/// about an axis perpendicular to `rest` (world X crossed with it, or world
/// Y when `rest` lies along X).
pub fn rotation_between(rest: Vec3, target: Vec3, epsilon: f32) -> Quat {
    let rest = rest.normalize_or_zero();
    let target = target.normalize_or_zero();
    if rest == Vec3::ZERO || target == Vec3::ZERO {
        return Quat::IDENTITY;
    }

    let dot = rest.dot(target);
    if dot > 1.0 - epsilon {
        Quat::IDENTITY
    } else if dot < -1.0 + epsilon {
        let mut ortho = Vec3::X.cross(rest);
        if ortho.length() < epsilon {
            ortho = Vec3::Y.cross(rest);
        }
        Quat::from_axis_angle(ortho.normalize(), PI)
    } else {
        let axis = rest.cross(target).normalize();
        Quat::from_axis_angle(axis, dot.clamp(-1.0, 1.0).acos())
    }
}
