//! Turning the rig toward the look target.
//!
//! The hub yaws around the mount's Y axis so its `+Z` faces the target; the
//! head then looks straight at the target (`-Z` forward), which is what the
//! lens and its view cone inherit.

use bevy::prelude::*;

use crate::rig::{CameraHead, CameraHub, CameraRig, SecurityCamera, HEAD_OFFSET, HUB_OFFSET};

/// Local rotations for the hub and head that aim the lens at a target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AimPose {
    /// Hub rotation about the mount's Y axis, radians.
    pub hub_yaw: f32,
    /// Head rotation relative to the hub.
    pub head_rotation: Quat,
}

impl AimPose {
    pub fn hub_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.hub_yaw)
    }
}

/// Pose that aims at `target`, given in mount-local space.
pub fn aim_pose(target: Vec3) -> AimPose {
    let hub_yaw = target.x.atan2(target.z);
    let in_hub = Quat::from_rotation_y(hub_yaw).inverse() * (target - HUB_OFFSET);
    let head_rotation = Transform::from_translation(HEAD_OFFSET)
        .looking_at(in_hub, Dir3::Y)
        .rotation;
    AimPose {
        hub_yaw,
        head_rotation,
    }
}

/// System: point every rig at its brain's current look target.
pub fn aim_camera_rigs(
    cameras: Query<(&SecurityCamera, &CameraRig, &GlobalTransform)>,
    mut parts: Query<&mut Transform, Or<(With<CameraHub>, With<CameraHead>)>>,
) {
    for (camera, rig, mount) in &cameras {
        let target = mount
            .affine()
            .inverse()
            .transform_point3(camera.brain.look_target());
        let pose = aim_pose(target);

        if let Ok(mut hub) = parts.get_mut(rig.hub) {
            hub.rotation = pose.hub_rotation();
        }
        if let Ok(mut head) = parts.get_mut(rig.head) {
            head.rotation = pose.head_rotation;
        }
    }
}
