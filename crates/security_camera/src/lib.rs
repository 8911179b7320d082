//! Patrolling security camera: perception, behavior state machine and
//! look-target motion, packaged as a Bevy plugin.
//!
//! Each fixed tick a camera checks whether its tracked actor is visible (view
//! cone + line of sight), feeds the answer to its [`brain::CameraBrain`], and
//! moves its look target either along a patrol route (Search) or toward the
//! actor (Track). Losing the actor leaves the camera Suspicious until a
//! countdown sends it back to patrolling.

use bevy::prelude::*;

pub mod aim;
pub mod brain;
pub mod collaborators;
pub mod config;
pub mod countdown;
pub mod error;
pub mod events;
pub mod motion;
pub mod patrol;
pub mod perception;
pub mod rig;
pub mod status;
pub mod systems;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use brain::{CameraBrain, CameraController, CameraMode, CameraState};
pub use config::CameraConfig;
pub use error::CameraConfigError;
pub use events::{ActorSighted, CameraStateChanged};
pub use perception::{ActorEnteredVolume, ActorExitedVolume, Occluder, TrackedActor};
pub use rig::{spawn_security_camera, SecurityCamera};

/// Ordering of the camera systems inside `FixedUpdate`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraSet {
    /// Occluder collection and detection-volume presence.
    Sensing,
    /// Visibility test and state machine tick.
    Behavior,
    /// Glide animator and suspicion countdown.
    Clock,
    /// Rig orientation and status colours.
    Aim,
}

pub struct SecurityCameraPlugin;

impl Plugin for SecurityCameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<perception::OccluderSet>()
            .add_event::<ActorEnteredVolume>()
            .add_event::<ActorExitedVolume>()
            .add_event::<CameraStateChanged>()
            .add_event::<ActorSighted>()
            .configure_sets(
                FixedUpdate,
                (
                    CameraSet::Sensing,
                    CameraSet::Behavior,
                    CameraSet::Clock,
                    CameraSet::Aim,
                )
                    .chain(),
            )
            .add_systems(
                FixedUpdate,
                (
                    perception::collect_occluders,
                    perception::detect_volume_crossings,
                    perception::apply_presence_events,
                )
                    .chain()
                    .in_set(CameraSet::Sensing),
            )
            .add_systems(
                FixedUpdate,
                systems::evaluate_cameras.in_set(CameraSet::Behavior),
            )
            .add_systems(
                FixedUpdate,
                systems::advance_camera_clocks.in_set(CameraSet::Clock),
            )
            .add_systems(
                FixedUpdate,
                (status::apply_status_colors, aim::aim_camera_rigs).in_set(CameraSet::Aim),
            );
    }
}
