//! Per-tick camera systems: perception + brain, then the brain's clocks.

use bevy::prelude::*;

use crate::brain::Transition;
use crate::events::{ActorSighted, CameraStateChanged};
use crate::perception::{
    is_visible, ActorPresence, OccluderSet, PerceptionFrame, PerceptionInput, TrackedActor,
};
use crate::rig::{CameraRig, SecurityCamera};

fn report_transition(
    camera: Entity,
    transition: Transition,
    changes: &mut EventWriter<CameraStateChanged>,
) {
    info!(
        "Camera {:?}: {} -> {}",
        camera,
        transition.from.label(),
        transition.to.label()
    );
    changes.send(CameraStateChanged {
        camera,
        from: transition.from,
        to: transition.to,
    });
}

/// System: run the visibility test for every camera and feed the result to
/// its brain.
pub fn evaluate_cameras(
    time: Res<Time<Fixed>>,
    occluders: Res<OccluderSet>,
    actors: Query<&GlobalTransform, With<TrackedActor>>,
    parts: Query<&Transform>,
    mut cameras: Query<(
        Entity,
        &mut SecurityCamera,
        &CameraRig,
        &ActorPresence,
        &GlobalTransform,
    )>,
    mut changes: EventWriter<CameraStateChanged>,
    mut sightings: EventWriter<ActorSighted>,
) {
    let dt = time.timestep().as_secs_f32();

    for (camera, mut security_camera, rig, presence, mount) in &mut cameras {
        let Some(lens) = rig.lens_pose(mount, &parts) else {
            warn!("Camera {:?}: rig parts missing, skipping tick", camera);
            continue;
        };

        let actor = presence.actor();
        let actor_position = actor
            .and_then(|entity| actors.get(entity).ok())
            .map(|transform| transform.translation());
        let input = PerceptionInput {
            actor_present: presence.is_present(),
            actor_position,
            occlusion: &*occluders,
        };
        let visible = is_visible(
            &input,
            &PerceptionFrame::from_global(&lens),
            security_camera.fov_half_angle_deg,
            security_camera.actor_aim_height,
        );

        let report = security_camera.brain.tick(visible, actor_position, dt);
        if let Some(transition) = report.transition {
            report_transition(camera, transition, &mut changes);
        }
        if let (Some(position), Some(actor)) = (report.sighting, actor) {
            sightings.send(ActorSighted {
                camera,
                actor,
                position,
            });
        }
    }
}

/// System: advance each brain's glide and suspicion countdown.
pub fn advance_camera_clocks(
    time: Res<Time<Fixed>>,
    mut cameras: Query<(Entity, &mut SecurityCamera)>,
    mut changes: EventWriter<CameraStateChanged>,
) {
    let dt = time.timestep().as_secs_f32();

    for (camera, mut security_camera) in &mut cameras {
        if let Some(transition) = security_camera.brain.advance_clocks(dt) {
            report_transition(camera, transition, &mut changes);
        }
    }
}
