//! The brain as used by the plugin: wired to the in-process animator and
//! countdown.

use std::time::Duration;

use crate::countdown::SuspicionCountdown;
use crate::motion::GlideTrack;

use super::machine::CameraBrain;
use super::state::Transition;

/// Brain driven by [`GlideTrack`] and [`SuspicionCountdown`].
pub type CameraController = CameraBrain<GlideTrack, SuspicionCountdown>;

impl CameraBrain<GlideTrack, SuspicionCountdown> {
    /// Run the countdown and the glide for `dt` seconds and deliver their
    /// notifications. Returns the transition caused by countdown expiry.
    pub fn advance_clocks(&mut self, dt: f32) -> Option<Transition> {
        let mut transition = None;

        if let Some(handle) = self
            .countdown_mut()
            .advance(Duration::from_secs_f32(dt.max(0.0)))
        {
            transition = self.on_countdown_expired(handle);
        }

        if let Some(step) = self.animator_mut().advance(dt) {
            if let Some(position) = step.position {
                self.on_glide_progress(step.handle, position);
            }
            if step.finished {
                self.on_glide_finished(step.handle);
            }
        }

        transition
    }
}
