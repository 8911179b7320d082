//! Camera configuration: the authored, serde-loadable description of one
//! security camera.
//!
//! Waypoint positions are relative to the camera mount; they are resolved to
//! world space when the camera is spawned.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::brain::BrainSettings;
use crate::error::CameraConfigError;
use crate::motion::GlideEasing;
use crate::patrol::{PatrolMode, PatrolRoute, Waypoint};
use crate::perception::DEFAULT_ACTOR_AIM_HEIGHT;
use crate::status::StatusPalette;

/// Narrowest supported view cone half angle (degrees).
pub const MIN_FOV_HALF_ANGLE_DEG: f32 = 5.0;
/// Widest supported view cone half angle (degrees).
pub const MAX_FOV_HALF_ANGLE_DEG: f32 = 30.0;

const DEFAULT_DWELL_SECS: f32 = 1.0;

fn default_dwell() -> f32 {
    DEFAULT_DWELL_SECS
}

/// One authored patrol point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaypointConfig {
    /// Mount-relative look-at point.
    pub position: Vec3,
    #[serde(default = "default_dwell")]
    pub dwell: f32,
}

impl WaypointConfig {
    pub fn new(position: Vec3, dwell: f32) -> Self {
        Self { position, dwell }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Half angle of the view cone, degrees.
    pub fov_half_angle_deg: f32,
    /// Patrol glide speed, units per second.
    pub search_speed: f32,
    /// Chase speed while tracking, units per second.
    pub track_speed: f32,
    pub patrol_mode: PatrolMode,
    /// Seconds to stay Suspicious before resuming the patrol.
    pub suspicious_secs: f32,
    /// Radius of the detection sphere around the lens.
    pub detection_radius: f32,
    /// Height above the actor's origin the sight ray aims at.
    pub actor_aim_height: f32,
    pub glide_easing: GlideEasing,
    pub palette: StatusPalette,
    pub waypoints: Vec<WaypointConfig>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_half_angle_deg: 15.0,
            search_speed: 1.0,
            track_speed: 3.0,
            patrol_mode: PatrolMode::Bounce,
            suspicious_secs: 2.0,
            detection_radius: 12.0,
            actor_aim_height: DEFAULT_ACTOR_AIM_HEIGHT,
            glide_easing: GlideEasing::Linear,
            palette: StatusPalette::default(),
            waypoints: vec![
                WaypointConfig::new(Vec3::new(-3.0, -2.5, 5.0), DEFAULT_DWELL_SECS),
                WaypointConfig::new(Vec3::new(0.0, -2.5, 6.0), DEFAULT_DWELL_SECS),
                WaypointConfig::new(Vec3::new(3.0, -2.5, 5.0), DEFAULT_DWELL_SECS),
            ],
        }
    }
}

impl CameraConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, CameraConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CameraConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), CameraConfigError> {
        if self.waypoints.is_empty() {
            return Err(CameraConfigError::EmptyPatrolRoute);
        }
        if !(MIN_FOV_HALF_ANGLE_DEG..=MAX_FOV_HALF_ANGLE_DEG).contains(&self.fov_half_angle_deg) {
            return Err(CameraConfigError::FovOutOfRange {
                value: self.fov_half_angle_deg,
                min: MIN_FOV_HALF_ANGLE_DEG,
                max: MAX_FOV_HALF_ANGLE_DEG,
            });
        }
        for (name, value) in [
            ("search_speed", self.search_speed),
            ("track_speed", self.track_speed),
        ] {
            if !is_positive(value) {
                return Err(CameraConfigError::InvalidSpeed { name, value });
            }
        }
        for (name, value) in [
            ("suspicious_secs", self.suspicious_secs),
            ("detection_radius", self.detection_radius),
        ] {
            if !is_positive(value) {
                return Err(CameraConfigError::InvalidSetting { name, value });
            }
        }
        if !self.actor_aim_height.is_finite() {
            return Err(CameraConfigError::InvalidSetting {
                name: "actor_aim_height",
                value: self.actor_aim_height,
            });
        }
        for (index, waypoint) in self.waypoints.iter().enumerate() {
            if !(waypoint.dwell >= 0.0 && waypoint.dwell.is_finite()) {
                return Err(CameraConfigError::InvalidDwell {
                    index,
                    value: waypoint.dwell,
                });
            }
        }
        Ok(())
    }

    /// Mount-relative patrol route.
    pub fn route(&self) -> Result<PatrolRoute, CameraConfigError> {
        PatrolRoute::new(
            self.waypoints
                .iter()
                .map(|wp| Waypoint::new(wp.position, wp.dwell))
                .collect(),
        )
    }

    pub fn brain_settings(&self) -> BrainSettings {
        BrainSettings {
            search_speed: self.search_speed,
            track_speed: self.track_speed,
            suspicious_secs: self.suspicious_secs,
        }
    }
}

fn is_positive(value: f32) -> bool {
    value > 0.0 && value.is_finite()
}
