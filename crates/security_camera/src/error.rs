// ---------------------------------------------------------------------------
// CameraConfigError: rejected camera configurations
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors raised while validating or loading a [`CameraConfig`].
///
/// All of these are fatal at spawn time: a camera with a bad configuration is
/// never inserted into the world.
///
/// [`CameraConfig`]: crate::config::CameraConfig
#[derive(Debug, Clone, PartialEq)]
pub enum CameraConfigError {
    /// The patrol route has no waypoints.
    EmptyPatrolRoute,
    /// Field-of-view half angle outside the supported range (degrees).
    FovOutOfRange { value: f32, min: f32, max: f32 },
    /// A speed setting is zero, negative, or not finite.
    InvalidSpeed { name: &'static str, value: f32 },
    /// A waypoint has a negative or non-finite dwell time.
    InvalidDwell { index: usize, value: f32 },
    /// A duration or distance setting is zero, negative, or not finite.
    InvalidSetting { name: &'static str, value: f32 },
    /// The JSON document could not be parsed.
    Parse(String),
    /// The config file could not be read.
    Io(String),
}

impl fmt::Display for CameraConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraConfigError::EmptyPatrolRoute => {
                write!(f, "Patrol route must contain at least one waypoint")
            }
            CameraConfigError::FovOutOfRange { value, min, max } => write!(
                f,
                "Field-of-view half angle {value} deg is outside [{min}, {max}]"
            ),
            CameraConfigError::InvalidSpeed { name, value } => {
                write!(f, "Speed '{name}' must be positive and finite, got {value}")
            }
            CameraConfigError::InvalidDwell { index, value } => write!(
                f,
                "Waypoint {index} dwell must be non-negative and finite, got {value}"
            ),
            CameraConfigError::InvalidSetting { name, value } => {
                write!(f, "Setting '{name}' must be positive and finite, got {value}")
            }
            CameraConfigError::Parse(msg) => write!(f, "Config parse error: {msg}"),
            CameraConfigError::Io(msg) => write!(f, "Config I/O error: {msg}"),
        }
    }
}

impl std::error::Error for CameraConfigError {}

impl From<std::io::Error> for CameraConfigError {
    fn from(e: std::io::Error) -> Self {
        CameraConfigError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CameraConfigError {
    fn from(e: serde_json::Error) -> Self {
        CameraConfigError::Parse(e.to_string())
    }
}
