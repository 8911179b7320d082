//! Narrow interfaces to the things a camera consumes but does not own.
//!
//! The [`CameraBrain`] is generic over the glide animator and the countdown
//! timer so it can be driven by the in-process implementations
//! ([`GlideTrack`], [`SuspicionCountdown`]) or by a host engine's own tween and
//! timer services. Occlusion is passed per tick as a trait object.
//!
//! [`CameraBrain`]: crate::brain::CameraBrain
//! [`GlideTrack`]: crate::motion::GlideTrack
//! [`SuspicionCountdown`]: crate::countdown::SuspicionCountdown

use bevy::prelude::*;

/// Line-of-sight test against world geometry.
pub trait OcclusionQuery {
    /// True when something solid lies on the segment `from -> to`.
    fn is_obstructed(&self, from: Vec3, to: Vec3) -> bool;
}

/// Nothing ever blocks the view.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClearSight;

impl OcclusionQuery for ClearSight {
    fn is_obstructed(&self, _from: Vec3, _to: Vec3) -> bool {
        false
    }
}

impl<F: Fn(Vec3, Vec3) -> bool> OcclusionQuery for F {
    fn is_obstructed(&self, from: Vec3, to: Vec3) -> bool {
        self(from, to)
    }
}

/// Opaque id of a glide started through a [`GlideAnimator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GlideHandle(pub u64);

/// Opaque id of a countdown started through a [`CountdownTimer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CountdownHandle(pub u64);

/// One patrol leg: move the look target, then hold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlideRequest {
    pub from: Vec3,
    pub to: Vec3,
    /// Seconds spent moving from `from` to `to`.
    pub duration: f32,
    /// Seconds spent holding at `to` once the move completes.
    pub dwell: f32,
}

/// Timed interpolation service.
///
/// Implementations report progress and completion back to the brain through
/// [`CameraBrain::on_glide_progress`] and [`CameraBrain::on_glide_finished`].
/// After `cancel(handle)` returns, no further report for `handle` may be
/// delivered. Canceling an unknown or already finished handle is a no-op.
///
/// [`CameraBrain::on_glide_progress`]: crate::brain::CameraBrain::on_glide_progress
/// [`CameraBrain::on_glide_finished`]: crate::brain::CameraBrain::on_glide_finished
pub trait GlideAnimator {
    fn start(&mut self, request: GlideRequest) -> GlideHandle;
    fn cancel(&mut self, handle: GlideHandle);
}

/// Single-shot, restartable countdown service.
///
/// Expiry is reported through [`CameraBrain::on_countdown_expired`] at most
/// once per `start`. `stop` is idempotent.
///
/// [`CameraBrain::on_countdown_expired`]: crate::brain::CameraBrain::on_countdown_expired
pub trait CountdownTimer {
    fn start(&mut self, seconds: f32) -> CountdownHandle;
    fn stop(&mut self, handle: CountdownHandle);
}
