//! Direct chase: move at most `speed * dt` toward a point, never past it.

use bevy::prelude::*;

/// One chase step from `current` toward `target`.
///
/// Lands exactly on `target` when the step is long enough to reach it.
pub fn chase_step(current: Vec3, target: Vec3, speed: f32, dt: f32) -> Vec3 {
    let max_step = (speed * dt).max(0.0);
    let offset = target - current;
    let distance = offset.length();
    if distance <= max_step || distance <= f32::EPSILON {
        return target;
    }
    current + offset * (max_step / distance)
}

/// Seconds a glide from `from` to `to` takes at `speed` units per second.
pub fn glide_duration(from: Vec3, to: Vec3, speed: f32) -> f32 {
    if speed <= 0.0 || !speed.is_finite() {
        return 0.0;
    }
    from.distance(to) / speed
}
