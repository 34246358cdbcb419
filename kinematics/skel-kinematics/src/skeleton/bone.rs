//! Bone records and their picking colliders

use glam::{Mat4, Quat, Vec3};

/// Local cylinder frame used for ray picking
///
/// The frame's origin sits on the bone joint and its local +Z runs along the
/// bone towards the tip. The two tangents are derived from a reference
/// vector (world Y, or world X when the axis is nearly vertical).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    transform: Mat4,
    inverse: Mat4,
}

impl Collider {
    /// Build a collider for the segment `start -> end`
    pub fn new(start: Vec3, end: Vec3) -> Self {
        let axis = (end - start).normalize_or(Vec3::Z);
        let reference = if axis.y.abs() < 0.99 { Vec3::Y } else { Vec3::X };
        let x_axis = reference.cross(axis).normalize();
        let y_axis = axis.cross(x_axis).normalize();

        let transform = Mat4::from_cols(
            x_axis.extend(0.0),
            y_axis.extend(0.0),
            axis.extend(0.0),
            start.extend(1.0),
        );

        Self {
            transform,
            inverse: transform.inverse(),
        }
    }

    /// Rebuild the frame after the segment moved
    pub fn update(&mut self, start: Vec3, end: Vec3) {
        *self = Self::new(start, end);
    }

    /// Local-to-world transform of the cylinder frame
    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    /// Unit axis of the cylinder in world space
    pub fn axis(&self) -> Vec3 {
        self.transform.z_axis.truncate()
    }

    /// Cylinder origin (the bone joint) in world space
    pub fn origin(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }

    /// Express a world-space ray in the cylinder frame.
    ///
    /// The returned direction is normalized (zero if the input was zero).
    pub fn to_local_ray(&self, origin: Vec3, direction: Vec3) -> (Vec3, Vec3) {
        let local_origin = self.inverse.transform_point3(origin);
        let local_direction = self.inverse.transform_vector3(direction).normalize_or_zero();
        (local_origin, local_direction)
    }
}

/// A single joint of the skeleton
///
/// World-space fields are derived state: they are rewritten by every
/// propagation pass. Rest-pose fields are fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    pub(crate) index: usize,
    pub(crate) parent: Option<usize>,
    pub(crate) children: Vec<usize>,
    pub(crate) position: Vec3,
    pub(crate) endpoint: Vec3,
    pub(crate) rest_local_endpoint: Vec3,
    pub(crate) local_offset: Vec3,
    pub(crate) local_rotation: Quat,
    pub(crate) length: f32,
    pub(crate) collider: Collider,
}

impl Bone {
    pub(crate) fn new(
        index: usize,
        parent: Option<usize>,
        position: Vec3,
        endpoint: Vec3,
        local_offset: Vec3,
    ) -> Self {
        let rest_local_endpoint = endpoint - position;
        Self {
            index,
            parent,
            children: Vec::new(),
            position,
            endpoint,
            rest_local_endpoint,
            local_offset,
            local_rotation: Quat::IDENTITY,
            length: rest_local_endpoint.length(),
            collider: Collider::new(position, endpoint),
        }
    }

    /// Position of this bone in the skeleton's bone array
    pub fn index(&self) -> usize {
        self.index
    }

    /// Parent bone index, `None` for roots
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Child bone indices in ascending order
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    /// Whether this bone has no parent
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Joint location in world space
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Tip location in world space
    pub fn endpoint(&self) -> Vec3 {
        self.endpoint
    }

    /// Tip relative to the joint in the bone's rest frame
    pub fn rest_local_endpoint(&self) -> Vec3 {
        self.rest_local_endpoint
    }

    /// Rest displacement from the parent's tip to this joint, in the
    /// parent's frame (zero for roots)
    pub fn local_offset(&self) -> Vec3 {
        self.local_offset
    }

    /// Rotation relative to the parent frame
    pub fn local_rotation(&self) -> Quat {
        self.local_rotation
    }

    /// Rest length (joint to tip)
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Picking collider
    pub fn collider(&self) -> &Collider {
        &self.collider
    }
}
