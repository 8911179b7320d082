//! Perception: can the camera see the actor right now?
//!
//! - [`visibility`]: the per-tick field-of-view + line-of-sight test.
//! - [`occlusion`]: axis-aligned occluder boxes and the ray query over them.
//! - [`detection`]: the trigger sphere that reports actor enter/exit edges.

pub mod detection;
pub mod occlusion;
pub mod visibility;

pub use detection::*;
pub use occlusion::*;
pub use visibility::*;
