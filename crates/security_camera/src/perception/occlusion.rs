//! Occluder boxes and the line-of-sight query over them.
//!
//! Occluders are axis-aligned: rotation on an occluder's transform is ignored,
//! scale is applied to its half extents. The set is rebuilt every fixed tick
//! from `(Occluder, GlobalTransform)` pairs.
//!
//! A sensor placed inside an occluder box sees nothing; mount lenses outside
//! of any wall volume.

use bevy::math::bounding::{Aabb3d, RayCast3d};
use bevy::math::{Dir3, Ray3d};
use bevy::prelude::*;

use crate::collaborators::OcclusionQuery;

/// Solid, view-blocking box centred on the entity's translation.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Occluder {
    pub half_extents: Vec3,
}

impl Occluder {
    pub fn new(half_extents: Vec3) -> Self {
        Self { half_extents }
    }
}

/// World-space occluder boxes for the current tick.
#[derive(Resource, Default, Clone, Debug)]
pub struct OccluderSet {
    boxes: Vec<Aabb3d>,
}

impl OccluderSet {
    pub fn push(&mut self, center: Vec3, half_extents: Vec3) {
        self.boxes.push(Aabb3d::new(center, half_extents.abs()));
    }

    pub fn clear(&mut self) {
        self.boxes.clear();
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

impl OcclusionQuery for OccluderSet {
    fn is_obstructed(&self, from: Vec3, to: Vec3) -> bool {
        let delta = to - from;
        let Ok(direction) = Dir3::new(delta) else {
            // Zero-length ray: nothing can be in between.
            return false;
        };
        let ray = RayCast3d::from_ray(
            Ray3d {
                origin: from,
                direction,
            },
            delta.length(),
        );
        self.boxes
            .iter()
            .any(|aabb| ray.aabb_intersection_at(aabb).is_some())
    }
}

/// System: rebuild [`OccluderSet`] from the current occluder entities.
pub fn collect_occluders(
    mut set: ResMut<OccluderSet>,
    occluders: Query<(&Occluder, &GlobalTransform)>,
) {
    set.clear();
    for (occluder, transform) in &occluders {
        let (scale, _rotation, center) = transform.to_scale_rotation_translation();
        set.push(center, occluder.half_extents * scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall() -> OccluderSet {
        let mut set = OccluderSet::default();
        set.push(Vec3::new(0.0, 1.0, -5.0), Vec3::new(2.0, 1.0, 0.25));
        set
    }

    #[test]
    fn test_empty_set_never_blocks() {
        let set = OccluderSet::default();
        assert!(set.is_empty());
        assert!(!set.is_obstructed(Vec3::ZERO, Vec3::new(0.0, 0.0, -50.0)));
    }

    #[test]
    fn test_wall_between_blocks() {
        let set = wall();
        assert!(set.is_obstructed(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, -10.0)));
    }

    #[test]
    fn test_wall_beyond_target_does_not_block() {
        let set = wall();
        assert!(!set.is_obstructed(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, -3.0)));
    }

    #[test]
    fn test_ray_passing_beside_wall_is_clear() {
        let set = wall();
        assert!(!set.is_obstructed(Vec3::new(5.0, 1.0, 0.0), Vec3::new(5.0, 1.0, -10.0)));
    }

    #[test]
    fn test_ray_passing_over_wall_is_clear() {
        let set = wall();
        assert!(!set.is_obstructed(Vec3::new(0.0, 4.0, 0.0), Vec3::new(0.0, 4.0, -10.0)));
    }

    #[test]
    fn test_zero_length_ray_is_clear() {
        let set = wall();
        let p = Vec3::new(0.0, 1.0, -5.0);
        assert!(!set.is_obstructed(p, p));
    }

    #[test]
    fn test_collect_occluders_applies_scale() {
        let mut world = World::new();
        world.init_resource::<OccluderSet>();
        world.spawn((
            Occluder::new(Vec3::splat(0.5)),
            GlobalTransform::from(
                Transform::from_xyz(0.0, 0.0, -5.0).with_scale(Vec3::new(4.0, 4.0, 1.0)),
            ),
        ));
        let mut schedule = Schedule::default();
        schedule.add_systems(collect_occluders);
        schedule.run(&mut world);

        let set = world.resource::<OccluderSet>();
        assert_eq!(set.len(), 1);
        // Scaled to 2.0 wide, so a ray offset by 1.5 on X still hits.
        assert!(set.is_obstructed(Vec3::new(1.5, 0.0, 0.0), Vec3::new(1.5, 0.0, -10.0)));
        assert!(!set.is_obstructed(Vec3::new(2.5, 0.0, 0.0), Vec3::new(2.5, 0.0, -10.0)));
    }
}
