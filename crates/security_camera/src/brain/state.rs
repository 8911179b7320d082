//! `CameraState` and the data-less `CameraMode` tag.

use crate::collaborators::{CountdownHandle, GlideHandle};

/// Behavior state. Each variant carries only the handles it owns, so a glide
/// cannot outlive Search and a countdown cannot outlive Suspicious.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraState {
    /// Sweeping the patrol route. `glide` is `None` only while resting on a
    /// single-waypoint route.
    Search { glide: Option<GlideHandle> },
    /// Following the actor every tick.
    Track,
    /// Lost sight of the actor; waiting for the countdown.
    Suspicious { countdown: CountdownHandle },
}

impl CameraState {
    pub fn mode(&self) -> CameraMode {
        match self {
            CameraState::Search { .. } => CameraMode::Search,
            CameraState::Track => CameraMode::Track,
            CameraState::Suspicious { .. } => CameraMode::Suspicious,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CameraMode {
    #[default]
    Search,
    Track,
    Suspicious,
}

impl CameraMode {
    pub fn label(self) -> &'static str {
        match self {
            CameraMode::Search => "Search",
            CameraMode::Track => "Track",
            CameraMode::Suspicious => "Suspicious",
        }
    }
}

/// A state change, reported so the caller can apply status side effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: CameraMode,
    pub to: CameraMode,
}
