//! Detection volume: edge-triggered actor presence for each camera.
//!
//! The built-in volume is a sphere centred on the camera lens. Hosts with a
//! physics engine can skip [`detect_volume_crossings`] and send
//! [`ActorEnteredVolume`] / [`ActorExitedVolume`] themselves; presence is only
//! ever updated from those events.

use bevy::prelude::*;

use crate::rig::CameraRig;

/// Marker for the entity cameras watch for.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct TrackedActor;

/// Spherical trigger region around the camera lens.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct DetectionVolume {
    pub radius: f32,
}

/// Which actor, if any, is currently inside a camera's detection volume.
///
/// Only one actor is tracked at a time. An enter event replaces the current
/// actor; [`detect_volume_crossings`] only sends one when the slot is free.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActorPresence {
    actor: Option<Entity>,
}

impl ActorPresence {
    pub fn actor(&self) -> Option<Entity> {
        self.actor
    }

    pub fn is_present(&self) -> bool {
        self.actor.is_some()
    }

    pub fn enter(&mut self, actor: Entity) {
        self.actor = Some(actor);
    }

    /// Clear presence if `actor` is the one being tracked. Returns whether
    /// anything changed.
    pub fn exit(&mut self, actor: Entity) -> bool {
        if self.actor == Some(actor) {
            self.actor = None;
            true
        } else {
            false
        }
    }
}

/// An actor crossed into a camera's detection volume.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActorEnteredVolume {
    pub camera: Entity,
    pub actor: Entity,
}

/// An actor left a camera's detection volume (or stopped existing).
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActorExitedVolume {
    pub camera: Entity,
    pub actor: Entity,
}

/// System: compare actor positions with each sphere volume and emit
/// enter/exit events on edges.
///
/// A camera holds one actor at a time. While it is inside, other actors in
/// the sphere are ignored; once it leaves (or is despawned) the nearest actor
/// still inside takes its place.
pub fn detect_volume_crossings(
    cameras: Query<(
        Entity,
        &DetectionVolume,
        &CameraRig,
        &ActorPresence,
        &GlobalTransform,
    )>,
    parts: Query<&Transform>,
    actors: Query<(Entity, &GlobalTransform), With<TrackedActor>>,
    mut entered: EventWriter<ActorEnteredVolume>,
    mut exited: EventWriter<ActorExitedVolume>,
) {
    for (camera, volume, rig, presence, mount) in &cameras {
        let Some(lens) = rig.lens_pose(mount, &parts) else {
            continue;
        };
        let center = lens.translation();

        if let Some(current) = presence.actor() {
            let still_inside = actors.get(current).is_ok_and(|(_, transform)| {
                transform.translation().distance(center) <= volume.radius
            });
            if still_inside {
                continue;
            }
            exited.send(ActorExitedVolume {
                camera,
                actor: current,
            });
        }

        let nearest = actors
            .iter()
            .map(|(actor, transform)| (actor, transform.translation().distance(center)))
            .filter(|(_, distance)| *distance <= volume.radius)
            .min_by(|a, b| a.1.total_cmp(&b.1));
        if let Some((actor, _)) = nearest {
            entered.send(ActorEnteredVolume { camera, actor });
        }
    }
}

/// System: fold enter/exit events into each camera's [`ActorPresence`].
pub fn apply_presence_events(
    mut entered: EventReader<ActorEnteredVolume>,
    mut exited: EventReader<ActorExitedVolume>,
    mut cameras: Query<&mut ActorPresence>,
) {
    for event in exited.read() {
        if let Ok(mut presence) = cameras.get_mut(event.camera) {
            if presence.exit(event.actor) {
                debug!(
                    "Camera {:?}: actor {:?} left detection volume",
                    event.camera, event.actor
                );
            }
        }
    }
    for event in entered.read() {
        if let Ok(mut presence) = cameras.get_mut(event.camera) {
            presence.enter(event.actor);
            debug!(
                "Camera {:?}: actor {:?} entered detection volume",
                event.camera, event.actor
            );
        }
    }
}
