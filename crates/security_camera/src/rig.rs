//! Camera rig entities and spawning.
//!
//! A camera is a small hierarchy:
//!
//! ```text
//! mount (SecurityCamera, CameraRig, DetectionVolume, ActorPresence)
//! └── hub (CameraHub)        yaws toward the look target
//!     └── head (CameraHead)  pitches to look at it
//!         └── lens (CameraLens, StatusLight)  the perception sensor
//! ```

use bevy::prelude::*;

use crate::aim::aim_pose;
use crate::brain::CameraController;
use crate::config::CameraConfig;
use crate::countdown::SuspicionCountdown;
use crate::error::CameraConfigError;
use crate::motion::GlideTrack;
use crate::perception::{ActorPresence, DetectionVolume};
use crate::status::{StatusLight, StatusPalette};

/// Hub position relative to the mount.
pub const HUB_OFFSET: Vec3 = Vec3::new(0.0, -0.2, 0.0);
/// Head position relative to the hub.
pub const HEAD_OFFSET: Vec3 = Vec3::new(0.0, -0.15, 0.0);
/// Lens position relative to the head, along its forward axis.
pub const LENS_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -0.3);

/// The camera's controller and perception settings. Lives on the mount.
#[derive(Component, Debug)]
pub struct SecurityCamera {
    pub brain: CameraController,
    pub fov_half_angle_deg: f32,
    pub actor_aim_height: f32,
    pub palette: StatusPalette,
}

/// Entities making up one camera's moving parts.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CameraRig {
    pub hub: Entity,
    pub head: Entity,
    pub lens: Entity,
}

impl CameraRig {
    /// World pose of the lens, composed from the mount and the rig's local
    /// transforms.
    ///
    /// The lens's own `GlobalTransform` is only refreshed in `PostUpdate`, so
    /// it lags behind when several fixed steps run in one frame. Mounts are
    /// assumed static within a frame.
    pub fn lens_pose(
        &self,
        mount: &GlobalTransform,
        parts: &Query<&Transform>,
    ) -> Option<GlobalTransform> {
        let hub = parts.get(self.hub).ok()?;
        let head = parts.get(self.head).ok()?;
        let lens = parts.get(self.lens).ok()?;
        Some(
            mount
                .mul_transform(*hub)
                .mul_transform(*head)
                .mul_transform(*lens),
        )
    }
}

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct CameraHub;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct CameraHead;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct CameraLens;

/// Validate `config` and spawn a camera rig at `mount`.
///
/// Nothing is spawned when the configuration is rejected.
pub fn spawn_security_camera(
    commands: &mut Commands,
    config: &CameraConfig,
    mount: Transform,
) -> Result<Entity, CameraConfigError> {
    config.validate()?;
    let local_route = config.route()?;
    let route = local_route.transformed(&mount);

    let brain = CameraController::new(
        route,
        config.patrol_mode,
        config.brain_settings(),
        GlideTrack::new(config.glide_easing),
        SuspicionCountdown::default(),
    );
    let pose = aim_pose(local_route.first().position);

    let lens = commands
        .spawn((
            CameraLens,
            StatusLight {
                color: config.palette.search,
            },
            Transform::from_translation(LENS_OFFSET),
        ))
        .id();
    let head = commands
        .spawn((
            CameraHead,
            Transform::from_translation(HEAD_OFFSET).with_rotation(pose.head_rotation),
        ))
        .add_child(lens)
        .id();
    let hub = commands
        .spawn((
            CameraHub,
            Transform::from_translation(HUB_OFFSET).with_rotation(pose.hub_rotation()),
        ))
        .add_child(head)
        .id();

    let camera = commands
        .spawn((
            SecurityCamera {
                brain,
                fov_half_angle_deg: config.fov_half_angle_deg,
                actor_aim_height: config.actor_aim_height,
                palette: config.palette,
            },
            CameraRig { hub, head, lens },
            DetectionVolume {
                radius: config.detection_radius,
            },
            ActorPresence::default(),
            mount,
        ))
        .add_child(hub)
        .id();

    info!(
        "Spawned security camera {:?} with {} waypoints ({:?})",
        camera,
        config.waypoints.len(),
        config.patrol_mode
    );
    Ok(camera)
}
