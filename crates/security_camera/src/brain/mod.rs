//! The camera's behavior state machine.
//!
//! [`CameraBrain`] owns the current [`CameraState`], the look target and the
//! patrol cursor. It is fed one visibility result per fixed tick and
//! notifications from its glide and countdown collaborators; everything else
//! (events, status colours, aiming) is the plugin's job.

mod controller;
mod machine;
mod state;

#[cfg(test)]
mod tests;

pub use controller::*;
pub use machine::*;
pub use state::*;
