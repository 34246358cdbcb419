//! Ray picking against per-bone cylinders

use glam::Vec3;
use log::trace;

use crate::config::KinematicsConfig;
use crate::skeleton::{Collider, Skeleton};

/// World-space pick ray
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Ray {
    /// Ray origin
    pub origin: Vec3,
    /// Ray direction (need not be normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray from an origin and a direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Ray starting at `origin` passing through `through`
    pub fn through(origin: Vec3, through: Vec3) -> Self {
        Self {
            origin,
            direction: through - origin,
        }
    }

    /// Point at distance `t` along the normalized direction
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction.normalize_or_zero() * t
    }
}

/// Closest bone hit by a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// Index of the hit bone
    pub bone: usize,
    /// Distance from the ray origin to the hit
    pub distance: f32,
}

/// Distance along `ray` to the first accepted hit on a bone cylinder.
///
/// The cylinder has the given `radius`, starts at the collider origin and
/// ends `length` units along its axis. Hits behind the ray origin are
/// ignored, as are rays parallel to the axis.
pub fn intersect_bone(
    collider: &Collider,
    length: f32,
    ray: &Ray,
    radius: f32,
    parallel_epsilon: f32,
) -> Option<f32> {
    let (origin, direction) = collider.to_local_ray(ray.origin, ray.direction);

    let a = direction.x * direction.x + direction.y * direction.y;
    if a < parallel_epsilon {
        return None;
    }
    let b = 2.0 * (origin.x * direction.x + origin.y * direction.y);
    let c = origin.x * origin.x + origin.y * origin.y - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let t1 = (-b - root) / (2.0 * a);
    let t2 = (-b + root) / (2.0 * a);
    let (near, far) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };

    [near, far].into_iter().find(|&t| {
        let z = origin.z + t * direction.z;
        t >= 0.0 && (0.0..=length).contains(&z)
    })
}

/// Closest bone along `ray`, or `None` when every cylinder is missed.
///
/// "Closest" is the smallest non-negative ray parameter. Intersections
/// behind the origin have negative parameters and are dropped, so a bone
/// behind the camera never wins over one in front of it.
pub fn pick(skeleton: &Skeleton, ray: &Ray, config: &KinematicsConfig) -> Option<PickHit> {
    let mut closest: Option<PickHit> = None;

    for bone in skeleton.bones() {
        let Some(t) = intersect_bone(
            bone.collider(),
            bone.length(),
            ray,
            config.pick_radius,
            config.parallel_epsilon,
        ) else {
            continue;
        };
        trace!("Ray hits bone {} at {t}", bone.index());

        if closest.is_none_or(|hit| t < hit.distance) {
            closest = Some(PickHit {
                bone: bone.index(),
                distance: t,
            });
        }
    }

    closest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rig::{BoneDescription, RigDescription};

    fn two_parallel_bones() -> Skeleton {
        let rig = RigDescription::new(vec![
            BoneDescription::new(None, [0.0, 0.0, 0.0], [0.0, 2.0, 0.0]),
            BoneDescription::new(None, [0.0, 0.0, -3.0], [0.0, 2.0, -3.0]),
        ]);
        Skeleton::from_description(&rig, &KinematicsConfig::default()).unwrap()
    }

    #[test]
    fn test_pick_closest() {
        let skeleton = two_parallel_bones();
        let ray = Ray::new(Vec3::new(0.0, 1.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = pick(&skeleton, &ray, &KinematicsConfig::default()).unwrap();
        assert_eq!(hit.bone, 0);
        assert!((hit.distance - 4.9).abs() < 1e-4);
    }

    #[test]
    fn test_pick_miss() {
        let skeleton = two_parallel_bones();
        let ray = Ray::new(Vec3::new(5.0, 1.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(pick(&skeleton, &ray, &KinematicsConfig::default()), None);
    }

    #[test]
    fn test_pick_beyond_segment_misses() {
        let skeleton = two_parallel_bones();
        let ray = Ray::new(Vec3::new(0.0, 2.5, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(pick(&skeleton, &ray, &KinematicsConfig::default()), None);
    }

    #[test]
    fn test_pick_ignores_hits_behind_origin() {
        let skeleton = two_parallel_bones();
        // Bone 0 sits 0.9 behind the origin; bone 1 is 1.9 ahead
        let ray = Ray::new(Vec3::new(0.0, 1.0, -1.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = pick(&skeleton, &ray, &KinematicsConfig::default()).unwrap();
        assert_eq!(hit.bone, 1);
        assert!((hit.distance - 1.9).abs() < 1e-4);

        let collider = skeleton.bones()[0].collider();
        assert_eq!(intersect_bone(collider, 2.0, &ray, 0.1, 1e-9), None);
    }

    #[test]
    fn test_parallel_ray_skipped() {
        let skeleton = two_parallel_bones();
        let ray = Ray::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y);
        let collider = skeleton.bones()[0].collider();
        assert_eq!(intersect_bone(collider, 2.0, &ray, 0.1, 1e-9), None);
    }

    #[test]
    fn test_wider_radius_catches_near_miss() {
        let skeleton = two_parallel_bones();
        let ray = Ray::new(Vec3::new(0.2, 1.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(pick(&skeleton, &ray, &KinematicsConfig::default()), None);

        let config = KinematicsConfig::default().with_pick_radius(0.25);
        assert_eq!(pick(&skeleton, &ray, &config).map(|hit| hit.bone), Some(0));
    }

    #[test]
    fn test_ray_through() {
        let ray = Ray::through(Vec3::ZERO, Vec3::new(0.0, 0.0, 4.0));
        assert!(ray.at(2.0).abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), 1e-6));
    }
}
