//! Look-target motion strategies.
//!
//! - [`chase`]: per-tick linear step toward the actor (Track).
//! - [`glide`]: timed move-then-dwell legs between waypoints (Search), plus
//!   the in-process [`GlideTrack`] animator that plays them.

pub mod chase;
pub mod glide;

pub use chase::*;
pub use glide::*;
