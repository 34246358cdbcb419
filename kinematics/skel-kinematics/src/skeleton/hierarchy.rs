//! Bone arena, hierarchy validation and forward kinematics

use std::collections::HashSet;

use glam::{Mat4, Quat, Vec3};
use log::{debug, trace};

use super::bone::Bone;
use crate::config::KinematicsConfig;
use crate::error::{Result, RigError};
use crate::ik::IkChain;
use crate::rig::RigDescription;

/// A validated bone hierarchy with its live pose
///
/// Bones are addressed by index. Parent links always point at a valid bone
/// and the hierarchy is acyclic, so every traversal terminates.
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    pub(crate) bones: Vec<Bone>,
    roots: Vec<usize>,
    depth: usize,
    epsilon: f32,
}

impl Skeleton {
    /// Validate a rest-pose description and build the skeleton.
    ///
    /// Bones may appear before their parent: a parent index only has to
    /// name some other bone of the rig. Propagation walks children lists, so
    /// storage order never matters once the hierarchy is known to be acyclic.
    pub fn from_description(description: &RigDescription, config: &KinematicsConfig) -> Result<Self> {
        let count = description.bones.len();
        if count == 0 {
            return Err(RigError::EmptyRig);
        }

        for (index, bone) in description.bones.iter().enumerate() {
            if let Some(parent) = bone.parent {
                if parent >= count || parent == index {
                    return Err(RigError::DanglingParent { bone: index, parent });
                }
            }
        }

        let depth = Self::validate_acyclic(description, config.max_depth)?;

        let mut children = vec![Vec::new(); count];
        for (index, bone) in description.bones.iter().enumerate() {
            if let Some(parent) = bone.parent {
                children[parent].push(index);
            }
        }

        for (index, bone) in description.bones.iter().enumerate() {
            if let Some(explicit) = &bone.children {
                let mut sorted = explicit.clone();
                sorted.sort_unstable();
                if sorted != children[index] {
                    return Err(RigError::InconsistentChildren { bone: index });
                }
            }
        }

        let mut bones = Vec::with_capacity(count);
        for (index, bone) in description.bones.iter().enumerate() {
            let position = Vec3::from_array(bone.position);
            let endpoint = Vec3::from_array(bone.endpoint);
            let local_offset = match bone.parent {
                Some(parent) => {
                    let offset = position - Vec3::from_array(description.bones[parent].endpoint);
                    if offset.length() < config.epsilon {
                        Vec3::ZERO
                    } else {
                        offset
                    }
                }
                None => Vec3::ZERO,
            };
            bones.push(Bone::new(index, bone.parent, position, endpoint, local_offset));
        }

        for (bone, list) in bones.iter_mut().zip(children) {
            bone.children = list;
        }

        let roots: Vec<usize> = bones
            .iter()
            .filter(|bone| bone.is_root())
            .map(|bone| bone.index)
            .collect();

        let mut skeleton = Self {
            bones,
            roots,
            depth,
            epsilon: config.epsilon,
        };
        skeleton.propagate_all();

        debug!(
            "Validated rig: {} bones, {} roots, depth {}",
            count,
            skeleton.roots.len(),
            depth
        );

        Ok(skeleton)
    }

    /// Walk every ancestor chain once; returns the maximum depth found
    fn validate_acyclic(description: &RigDescription, max_depth: usize) -> Result<usize> {
        let mut deepest = 0;
        for start in 0..description.bones.len() {
            let mut visited = HashSet::new();
            visited.insert(start);
            let mut current = start;
            let mut depth = 0;

            while let Some(parent) = description.bones[current].parent {
                if !visited.insert(parent) {
                    return Err(RigError::CyclicHierarchy { bone: start });
                }
                depth += 1;
                if depth > max_depth {
                    return Err(RigError::HierarchyTooDeep {
                        bone: start,
                        max_depth,
                    });
                }
                current = parent;
            }

            deepest = deepest.max(depth);
        }
        Ok(deepest)
    }

    /// Number of bones
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    /// Whether the skeleton has no bones (never true for a validated rig)
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// All bones in index order
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    /// Bone at `index`
    pub fn bone(&self, index: usize) -> Result<&Bone> {
        self.bones.get(index).ok_or(RigError::BoneOutOfRange {
            index,
            count: self.bones.len(),
        })
    }

    /// Root bone indices in ascending order
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Longest ancestor chain in the hierarchy (0 for a flat rig)
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Degenerate-geometry threshold this skeleton was built with
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<()> {
        if index < self.bones.len() {
            Ok(())
        } else {
            Err(RigError::BoneOutOfRange {
                index,
                count: self.bones.len(),
            })
        }
    }

    /// Bone transform relative to its parent frame
    fn local_matrix(&self, index: usize) -> Mat4 {
        let bone = &self.bones[index];
        let translation = match bone.parent {
            Some(parent) => self.bones[parent].rest_local_endpoint + bone.local_offset,
            None => bone.position,
        };
        Mat4::from_rotation_translation(bone.local_rotation, translation)
    }

    /// Ancestors of `index` from the bone itself up to its root
    fn ancestry(&self, index: usize) -> Vec<usize> {
        let mut chain = vec![index];
        let mut current = index;
        while let Some(parent) = self.bones[current].parent {
            chain.push(parent);
            current = parent;
        }
        chain
    }

    pub(crate) fn world_matrix(&self, index: usize) -> Mat4 {
        self.ancestry(index)
            .iter()
            .rev()
            .fold(Mat4::IDENTITY, |world, &i| world * self.local_matrix(i))
    }

    pub(crate) fn world_rotation_of(&self, index: usize) -> Quat {
        self.ancestry(index)
            .iter()
            .rev()
            .fold(Quat::IDENTITY, |world, &i| world * self.bones[i].local_rotation)
            .normalize()
    }

    /// World transform of a bone, recomputed from its ancestors
    pub fn world_transform(&self, index: usize) -> Result<Mat4> {
        self.check_index(index)?;
        Ok(self.world_matrix(index))
    }

    /// World rotation of a bone (product of local rotations root to bone)
    pub fn world_rotation(&self, index: usize) -> Result<Quat> {
        self.check_index(index)?;
        Ok(self.world_rotation_of(index))
    }

    /// Recompute endpoints, child joints and colliders below `index`
    pub fn update_subtree(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.propagate_from(index);
        Ok(())
    }

    /// Recompute the whole pose from every root
    pub fn propagate_all(&mut self) {
        for i in 0..self.roots.len() {
            let root = self.roots[i];
            self.propagate_from(root);
        }
    }

    pub(crate) fn propagate_from(&mut self, index: usize) {
        let mut stack = vec![(index, self.world_matrix(index))];

        while let Some((current, world)) = stack.pop() {
            let endpoint = world.transform_point3(self.bones[current].rest_local_endpoint);
            let bone = &mut self.bones[current];
            bone.endpoint = endpoint;
            bone.collider.update(bone.position, endpoint);
            trace!(
                "Bone {} joint {:?} tip {:?}",
                current, bone.position, bone.endpoint
            );

            for k in 0..self.bones[current].children.len() {
                let child = self.bones[current].children[k];
                let offset = self.bones[child].local_offset;
                self.bones[child].position = endpoint + world.transform_vector3(offset);
                stack.push((child, world * self.local_matrix(child)));
            }
        }
    }

    /// Nearest strict ancestor with more than one child, else the root of
    /// the bone's tree. A root bone is its own anchor.
    pub fn anchor_of(&self, index: usize) -> Result<usize> {
        self.check_index(index)?;
        let mut current = index;
        while let Some(parent) = self.bones[current].parent {
            current = parent;
            if self.bones[current].children.len() > 1 {
                break;
            }
        }
        Ok(current)
    }

    /// Chain from `index` up to and including its anchor, effector first,
    /// based at the anchor's joint
    pub fn ik_chain(&self, index: usize) -> Result<IkChain> {
        let anchor = self.anchor_of(index)?;
        let mut bones = vec![index];
        let mut current = index;
        while current != anchor {
            if let Some(parent) = self.bones[current].parent {
                current = parent;
                bones.push(current);
            } else {
                break;
            }
        }
        IkChain::new(self, bones, self.bones[anchor].position)
    }

    /// Descendants of `index` including itself, in depth-first order
    pub fn subtree(&self, index: usize) -> Result<Vec<usize>> {
        self.check_index(index)?;
        let mut order = Vec::new();
        let mut stack = vec![index];
        while let Some(current) = stack.pop() {
            order.push(current);
            stack.extend(self.bones[current].children.iter().rev().copied());
        }
        Ok(order)
    }

    pub(crate) fn set_local_rotation(&mut self, index: usize, rotation: Quat) {
        self.bones[index].local_rotation = rotation.normalize();
    }
}
