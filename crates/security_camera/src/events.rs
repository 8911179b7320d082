//! Events published by cameras.

use bevy::prelude::*;

use crate::brain::CameraMode;

/// A camera changed behavior state. Drives the status colour.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CameraStateChanged {
    pub camera: Entity,
    pub from: CameraMode,
    pub to: CameraMode,
}

/// A tracking camera saw the actor this tick.
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub struct ActorSighted {
    pub camera: Entity,
    pub actor: Entity,
    pub position: Vec3,
}
