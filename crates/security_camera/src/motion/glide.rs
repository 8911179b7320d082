//! Patrol glide legs and the in-process animator that plays them.
//!
//! A leg moves the look target from `from` to `to` over `duration` seconds,
//! then holds for `dwell` seconds. [`GlideTrack`] runs at most one leg at a
//! time; starting a new leg replaces the old one.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::collaborators::{GlideAnimator, GlideHandle, GlideRequest};

/// Interpolation curve for the move phase of a glide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlideEasing {
    #[default]
    Linear,
    /// Hermite `3t^2 - 2t^3`: slow start and stop.
    SmoothStep,
}

impl GlideEasing {
    /// Map linear progress `t` in [0, 1] onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            GlideEasing::Linear => t,
            GlideEasing::SmoothStep => t * t * (3.0 - 2.0 * t),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum GlidePhase {
    Moving { elapsed: f32 },
    Dwelling { elapsed: f32 },
}

#[derive(Clone, Copy, Debug)]
struct ActiveGlide {
    handle: GlideHandle,
    request: GlideRequest,
    phase: GlidePhase,
}

/// What happened to the running glide during one [`GlideTrack::advance`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlideStep {
    pub handle: GlideHandle,
    /// New look-target position, while the leg is still moving (or just
    /// arrived). `None` while dwelling.
    pub position: Option<Vec3>,
    /// The leg, including its dwell, is complete.
    pub finished: bool,
}

/// Single-lane glide player.
#[derive(Clone, Debug, Default)]
pub struct GlideTrack {
    active: Option<ActiveGlide>,
    next_id: u64,
    easing: GlideEasing,
}

impl GlideTrack {
    pub fn new(easing: GlideEasing) -> Self {
        Self {
            active: None,
            next_id: 0,
            easing,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_handle(&self) -> Option<GlideHandle> {
        self.active.map(|glide| glide.handle)
    }

    /// Advance the running leg by `dt` seconds.
    ///
    /// Time left over after the move phase carries into the dwell. Returns
    /// `None` when nothing is running; a finished leg is dropped, so it
    /// reports `finished` exactly once.
    pub fn advance(&mut self, dt: f32) -> Option<GlideStep> {
        let easing = self.easing;
        let glide = self.active.as_mut()?;
        let handle = glide.handle;
        let request = glide.request;
        let mut carry = dt.max(0.0);
        let mut position = None;

        if let GlidePhase::Moving { elapsed } = glide.phase {
            let elapsed = elapsed + carry;
            if elapsed >= request.duration {
                carry = elapsed - request.duration;
                position = Some(request.to);
                glide.phase = GlidePhase::Dwelling { elapsed: 0.0 };
            } else {
                let t = easing.apply(elapsed / request.duration);
                position = Some(request.from.lerp(request.to, t));
                glide.phase = GlidePhase::Moving { elapsed };
                carry = 0.0;
            }
        }

        let mut finished = false;
        if let GlidePhase::Dwelling { elapsed } = glide.phase {
            let elapsed = elapsed + carry;
            finished = elapsed >= request.dwell;
            glide.phase = GlidePhase::Dwelling { elapsed };
        }

        if finished {
            self.active = None;
        }

        Some(GlideStep {
            handle,
            position,
            finished,
        })
    }
}

impl GlideAnimator for GlideTrack {
    fn start(&mut self, request: GlideRequest) -> GlideHandle {
        if let Some(previous) = self.active.take() {
            debug!("GlideTrack: {:?} replaced by a new leg", previous.handle);
        }
        self.next_id += 1;
        let handle = GlideHandle(self.next_id);
        self.active = Some(ActiveGlide {
            handle,
            request,
            phase: GlidePhase::Moving { elapsed: 0.0 },
        });
        handle
    }

    fn cancel(&mut self, handle: GlideHandle) {
        if self.active_handle() == Some(handle) {
            self.active = None;
        }
    }
}
