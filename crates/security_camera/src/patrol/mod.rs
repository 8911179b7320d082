//! Patrol routes and the cursor that walks them.
//!
//! A [`PatrolRoute`] is the immutable, non-empty list of waypoints a camera
//! sweeps while idle. A [`PatrolCursor`] remembers which waypoint is next and,
//! in bounce mode, which way it is travelling.

mod cursor;
mod route;


pub use cursor::*;
pub use route::*;
