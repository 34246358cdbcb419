//! Direct manipulation: rotate, roll and translate

use glam::{Quat, Vec3};
use log::{debug, trace};

use super::Skeleton;
use crate::error::Result;

impl Skeleton {
    /// Rotate a bone by `angle` radians about a world-space axis.
    ///
    /// The axis is carried into the bone's frame through the inverse of its
    /// current world rotation, so the turn happens about `world_axis` as seen
    /// in the scene. Descendants follow. A zero axis is a no-op.
    pub fn rotate_on_axis(&mut self, index: usize, angle: f32, world_axis: Vec3) -> Result<()> {
        self.check_index(index)?;
        let world_rotation = self.world_rotation_of(index);
        let local_axis = (world_rotation.inverse() * world_axis).normalize_or_zero();
        self.apply_local_turn(index, angle, local_axis);
        Ok(())
    }

    /// Twist a bone about its own length
    pub fn roll(&mut self, index: usize, angle: f32) -> Result<()> {
        self.check_index(index)?;
        let axis = self.bones[index].rest_local_endpoint.normalize_or_zero();
        self.apply_local_turn(index, angle, axis);
        Ok(())
    }

    fn apply_local_turn(&mut self, index: usize, angle: f32, local_axis: Vec3) {
        if local_axis == Vec3::ZERO {
            debug!("Bone {index}: degenerate rotation axis, ignoring");
            return;
        }
        let turn = Quat::from_axis_angle(local_axis, angle);
        let rotation = self.bones[index].local_rotation * turn;
        self.set_local_rotation(index, rotation);
        self.propagate_from(index);
    }

    /// Move a bone joint in a screen-aligned plane.
    ///
    /// The candidate joint is `position + dx * right + dy * up`. Non-root
    /// bones only accept candidates within `max_reach` of `anchor`; roots
    /// always move. Returns whether the move was applied.
    #[allow(clippy::too_many_arguments)]
    pub fn translate(
        &mut self,
        index: usize,
        dx: f32,
        dy: f32,
        right: Vec3,
        up: Vec3,
        max_reach: f32,
        anchor: Vec3,
    ) -> Result<bool> {
        self.check_index(index)?;
        let bone = &self.bones[index];
        let candidate = bone.position + right * dx + up * dy;

        if !bone.is_root() && candidate.distance(anchor) > max_reach {
            trace!(
                "Bone {index}: candidate {candidate:?} beyond reach {max_reach} of {anchor:?}"
            );
            return Ok(false);
        }

        self.bones[index].position = candidate;
        self.propagate_from(index);
        Ok(true)
    }
}
