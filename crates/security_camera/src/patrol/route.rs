//! `PatrolRoute` and `Waypoint`: authored patrol data, fixed after spawn.

use bevy::prelude::*;

use crate::error::CameraConfigError;

/// A single look-at point on a patrol route.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Waypoint {
    /// World-space point the camera looks at.
    pub position: Vec3,
    /// Seconds to hold on this point after arriving.
    pub dwell: f32,
}

impl Waypoint {
    pub fn new(position: Vec3, dwell: f32) -> Self {
        Self { position, dwell }
    }
}

/// Ordered, non-empty sequence of waypoints.
///
/// The only way to build one is [`PatrolRoute::new`], which refuses an empty
/// list, so every index handed out by a [`PatrolCursor`] is valid.
///
/// [`PatrolCursor`]: super::PatrolCursor
#[derive(Clone, Debug, PartialEq)]
pub struct PatrolRoute {
    waypoints: Vec<Waypoint>,
}

impl PatrolRoute {
    pub fn new(waypoints: Vec<Waypoint>) -> Result<Self, CameraConfigError> {
        if waypoints.is_empty() {
            return Err(CameraConfigError::EmptyPatrolRoute);
        }
        Ok(Self { waypoints })
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always false; kept so the type reads like a collection.
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }

    /// The first waypoint. The look target starts here.
    pub fn first(&self) -> &Waypoint {
        &self.waypoints[0]
    }

    /// Same route with every position mapped through `transform`.
    ///
    /// Used at spawn to turn mount-relative waypoints into world space.
    pub fn transformed(&self, transform: &Transform) -> Self {
        Self {
            waypoints: self
                .waypoints
                .iter()
                .map(|wp| Waypoint::new(transform.transform_point(wp.position), wp.dwell))
                .collect(),
        }
    }
}

impl std::ops::Index<usize> for PatrolRoute {
    type Output = Waypoint;

    fn index(&self, index: usize) -> &Waypoint {
        &self.waypoints[index]
    }
}
