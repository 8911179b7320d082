//! Status colours: which colour each behavior state shows on the lens.

use bevy::color::palettes::css::{ORANGE, RED, YELLOW};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::brain::CameraMode;
use crate::events::CameraStateChanged;
use crate::rig::{CameraRig, SecurityCamera};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusPalette {
    pub search: Color,
    pub track: Color,
    pub suspicious: Color,
}

impl Default for StatusPalette {
    fn default() -> Self {
        Self {
            search: YELLOW.into(),
            track: RED.into(),
            suspicious: ORANGE.into(),
        }
    }
}

impl StatusPalette {
    pub fn color(&self, mode: CameraMode) -> Color {
        match mode {
            CameraMode::Search => self.search,
            CameraMode::Track => self.track,
            CameraMode::Suspicious => self.suspicious,
        }
    }
}

/// Indicator colour on the lens. Hosts mirror this onto their light or
/// material.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct StatusLight {
    pub color: Color,
}

/// System: repaint the lens light of every camera that changed state.
pub fn apply_status_colors(
    mut changes: EventReader<CameraStateChanged>,
    cameras: Query<(&SecurityCamera, &CameraRig)>,
    mut lights: Query<&mut StatusLight>,
) {
    for change in changes.read() {
        let Ok((camera, rig)) = cameras.get(change.camera) else {
            continue;
        };
        if let Ok(mut light) = lights.get_mut(rig.lens) {
            light.color = camera.palette.color(change.to);
        }
    }
}
