//! Field-of-view and line-of-sight test for a single sensor.
//!
//! The test is stateless: everything it needs arrives in a
//! [`PerceptionInput`] snapshot each tick.

use bevy::prelude::*;

use crate::collaborators::OcclusionQuery;

/// Height above the actor's origin that the sight ray aims at, so ground
/// clutter at the actor's feet does not count as cover.
pub const DEFAULT_ACTOR_AIM_HEIGHT: f32 = 0.5;

/// World-space pose of the sensor. Forward is local `-Z`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerceptionFrame {
    pub origin: Vec3,
    pub rotation: Quat,
}

impl PerceptionFrame {
    pub fn new(origin: Vec3, rotation: Quat) -> Self {
        Self { origin, rotation }
    }

    pub fn from_global(transform: &GlobalTransform) -> Self {
        let (_scale, rotation, origin) = transform.to_scale_rotation_translation();
        Self { origin, rotation }
    }

    /// Express a world-space point in the sensor's local frame.
    pub fn to_local(&self, point: Vec3) -> Vec3 {
        self.rotation.inverse() * (point - self.origin)
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }
}

/// Everything the visibility test needs for one tick.
pub struct PerceptionInput<'a> {
    /// Whether the detection volume currently reports the actor inside.
    pub actor_present: bool,
    /// Actor world position, if the actor could be resolved this tick.
    pub actor_position: Option<Vec3>,
    pub occlusion: &'a dyn OcclusionQuery,
}

/// Angle in radians between the sensor's forward axis and the actor.
///
/// An actor sitting exactly on the sensor origin is straight ahead.
pub fn angle_to_actor(frame: &PerceptionFrame, actor: Vec3) -> f32 {
    let local = frame.to_local(actor);
    if local.length_squared() <= f32::EPSILON {
        return 0.0;
    }
    Vec3::NEG_Z.angle_between(local)
}

/// True when the actor is present, inside the view cone and unobstructed.
///
/// The occlusion query is only issued once both cheaper checks pass.
pub fn is_visible(
    input: &PerceptionInput<'_>,
    frame: &PerceptionFrame,
    fov_half_angle_deg: f32,
    aim_height: f32,
) -> bool {
    if !input.actor_present {
        return false;
    }
    // Present but unresolved: the detection volume and the world disagree.
    let Some(actor) = input.actor_position else {
        return false;
    };

    if angle_to_actor(frame, actor) > fov_half_angle_deg.to_radians() {
        return false;
    }

    let aim_point = actor + Vec3::Y * aim_height;
    !input.occlusion.is_obstructed(frame.origin, aim_point)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::collaborators::ClearSight;

    /// Occlusion stub that records how often it was asked.
    struct CountingQuery {
        blocked: bool,
        calls: Cell<u32>,
        last_target: Cell<Vec3>,
    }

    impl CountingQuery {
        fn new(blocked: bool) -> Self {
            Self {
                blocked,
                calls: Cell::new(0),
                last_target: Cell::new(Vec3::ZERO),
            }
        }
    }

    impl OcclusionQuery for CountingQuery {
        fn is_obstructed(&self, _from: Vec3, to: Vec3) -> bool {
            self.calls.set(self.calls.get() + 1);
            self.last_target.set(to);
            self.blocked
        }
    }

    fn frame_at_origin() -> PerceptionFrame {
        PerceptionFrame::new(Vec3::ZERO, Quat::IDENTITY)
    }

    #[test]
    fn test_absent_actor_never_visible() {
        let query = CountingQuery::new(false);
        let input = PerceptionInput {
            actor_present: false,
            actor_position: Some(Vec3::new(0.0, 0.0, -5.0)),
            occlusion: &query,
        };
        assert!(!is_visible(&input, &frame_at_origin(), 15.0, 0.5));
        assert_eq!(query.calls.get(), 0, "absent actor must skip the ray query");
    }

    #[test]
    fn test_present_without_position_is_not_visible() {
        let query = CountingQuery::new(false);
        let input = PerceptionInput {
            actor_present: true,
            actor_position: None,
            occlusion: &query,
        };
        assert!(!is_visible(&input, &frame_at_origin(), 15.0, 0.5));
        assert_eq!(query.calls.get(), 0);
    }

    #[test]
    fn test_outside_cone_not_visible_even_when_clear() {
        let query = CountingQuery::new(false);
        // 45 degrees off forward.
        let input = PerceptionInput {
            actor_present: true,
            actor_position: Some(Vec3::new(5.0, 0.0, -5.0)),
            occlusion: &query,
        };
        assert!(!is_visible(&input, &frame_at_origin(), 30.0, 0.5));
        assert_eq!(query.calls.get(), 0, "angle rejection must skip the ray query");
    }

    #[test]
    fn test_inside_cone_and_clear_is_visible() {
        let query = CountingQuery::new(false);
        let input = PerceptionInput {
            actor_present: true,
            actor_position: Some(Vec3::new(0.5, 0.0, -10.0)),
            occlusion: &query,
        };
        assert!(is_visible(&input, &frame_at_origin(), 15.0, 0.5));
        assert_eq!(query.calls.get(), 1);
    }

    #[test]
    fn test_inside_cone_but_blocked_is_not_visible() {
        let query = CountingQuery::new(true);
        let input = PerceptionInput {
            actor_present: true,
            actor_position: Some(Vec3::new(0.0, 0.0, -10.0)),
            occlusion: &query,
        };
        assert!(!is_visible(&input, &frame_at_origin(), 15.0, 0.5));
    }

    #[test]
    fn test_ray_aims_above_actor_origin() {
        let query = CountingQuery::new(false);
        let actor = Vec3::new(0.0, 0.0, -8.0);
        let input = PerceptionInput {
            actor_present: true,
            actor_position: Some(actor),
            occlusion: &query,
        };
        is_visible(&input, &frame_at_origin(), 15.0, 0.5);
        assert_eq!(query.last_target.get(), actor + Vec3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_cone_follows_sensor_rotation() {
        // Sensor turned to face +X.
        let frame = PerceptionFrame::new(
            Vec3::new(0.0, 2.0, 0.0),
            Quat::from_rotation_y(-std::f32::consts::FRAC_PI_2),
        );
        assert!((frame.forward() - Vec3::X).length() < 1e-5, "got: {}", frame.forward());

        let ahead = PerceptionInput {
            actor_present: true,
            actor_position: Some(Vec3::new(10.0, 2.0, 0.0)),
            occlusion: &ClearSight,
        };
        assert!(is_visible(&ahead, &frame, 15.0, 0.0));

        let behind = PerceptionInput {
            actor_present: true,
            actor_position: Some(Vec3::new(0.0, 2.0, -10.0)),
            occlusion: &ClearSight,
        };
        assert!(!is_visible(&behind, &frame, 15.0, 0.0));
    }

    #[test]
    fn test_angle_on_boundary_counts_as_inside() {
        let frame = frame_at_origin();
        let half = 20.0_f32;
        let actor = Quat::from_rotation_y(half.to_radians() * 0.999) * Vec3::new(0.0, 0.0, -4.0);
        let angle = angle_to_actor(&frame, actor);
        assert!(angle <= half.to_radians(), "got: {angle}");
    }

    #[test]
    fn test_actor_at_sensor_origin_is_straight_ahead() {
        assert_eq!(angle_to_actor(&frame_at_origin(), Vec3::ZERO), 0.0);
    }

    #[test]
    fn test_closure_as_occlusion_query() {
        let wall_at_z = -3.0;
        let query = move |from: Vec3, to: Vec3| from.z > wall_at_z && to.z < wall_at_z;
        let input = PerceptionInput {
            actor_present: true,
            actor_position: Some(Vec3::new(0.0, 0.0, -6.0)),
            occlusion: &query,
        };
        assert!(!is_visible(&input, &frame_at_origin(), 15.0, 0.5));
    }
}
