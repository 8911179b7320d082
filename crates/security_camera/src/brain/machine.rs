//! `CameraBrain`: transitions, patrol chaining and direct chase.

use bevy::prelude::*;

use crate::collaborators::{
    CountdownHandle, CountdownTimer, GlideAnimator, GlideHandle, GlideRequest,
};
use crate::motion::{chase_step, glide_duration};
use crate::patrol::{PatrolCursor, PatrolMode, PatrolRoute};

use super::state::{CameraMode, CameraState, Transition};

/// Motion and timing parameters the brain needs at runtime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrainSettings {
    /// Look-target speed along the patrol route, units per second.
    pub search_speed: f32,
    /// Look-target speed while chasing the actor, units per second.
    pub track_speed: f32,
    /// Seconds spent Suspicious before returning to Search.
    pub suspicious_secs: f32,
}

impl Default for BrainSettings {
    fn default() -> Self {
        Self {
            search_speed: 1.0,
            track_speed: 3.0,
            suspicious_secs: 2.0,
        }
    }
}

/// Result of one [`CameraBrain::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    /// Visibility after guarding against a missing actor position.
    pub visible: bool,
    pub transition: Option<Transition>,
    /// Actor position observed while tracking, for anyone listening.
    pub sighting: Option<Vec3>,
}

/// Search / Track / Suspicious controller for one camera.
#[derive(Clone, Debug)]
pub struct CameraBrain<A, T> {
    state: CameraState,
    route: PatrolRoute,
    cursor: PatrolCursor,
    look_target: Vec3,
    settings: BrainSettings,
    animator: A,
    countdown: T,
}

impl<A: GlideAnimator, T: CountdownTimer> CameraBrain<A, T> {
    /// Build a brain in Search, looking at the first waypoint, and start the
    /// first patrol leg.
    pub fn new(
        route: PatrolRoute,
        mode: PatrolMode,
        settings: BrainSettings,
        animator: A,
        countdown: T,
    ) -> Self {
        let cursor = PatrolCursor::new(&route, mode);
        let look_target = route.first().position;
        let mut brain = Self {
            state: CameraState::Search { glide: None },
            route,
            cursor,
            look_target,
            settings,
            animator,
            countdown,
        };
        brain.start_next_glide();
        brain
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn mode(&self) -> CameraMode {
        self.state.mode()
    }

    pub fn look_target(&self) -> Vec3 {
        self.look_target
    }

    pub fn cursor(&self) -> &PatrolCursor {
        &self.cursor
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    pub fn countdown(&self) -> &T {
        &self.countdown
    }

    pub fn countdown_mut(&mut self) -> &mut T {
        &mut self.countdown
    }

    /// The glide Search is currently waiting on, if any.
    pub fn active_glide(&self) -> Option<GlideHandle> {
        match self.state {
            CameraState::Search { glide } => glide,
            _ => None,
        }
    }

    /// The countdown Suspicious is currently waiting on, if any.
    pub fn active_countdown(&self) -> Option<CountdownHandle> {
        match self.state {
            CameraState::Suspicious { countdown } => Some(countdown),
            _ => None,
        }
    }

    /// Evaluate one fixed tick.
    ///
    /// `visible` without an `actor_position` is treated as not visible.
    pub fn tick(&mut self, visible: bool, actor_position: Option<Vec3>, dt: f32) -> TickReport {
        let actor = if visible { actor_position } else { None };
        let mut report = TickReport {
            visible: actor.is_some(),
            transition: None,
            sighting: None,
        };

        match self.state {
            CameraState::Search { glide } => {
                if actor.is_some() {
                    if let Some(handle) = glide {
                        self.animator.cancel(handle);
                    }
                    report.transition = Some(self.switch_to(CameraState::Track));
                }
            }
            CameraState::Track => match actor {
                Some(actor) => {
                    self.look_target =
                        chase_step(self.look_target, actor, self.settings.track_speed, dt);
                    report.sighting = Some(actor);
                }
                None => {
                    let countdown = self.countdown.start(self.settings.suspicious_secs);
                    report.transition =
                        Some(self.switch_to(CameraState::Suspicious { countdown }));
                }
            },
            CameraState::Suspicious { countdown } => {
                if actor.is_some() {
                    self.countdown.stop(countdown);
                    report.transition = Some(self.switch_to(CameraState::Track));
                }
            }
        }

        report
    }

    /// The animator moved the look target along glide `handle`.
    pub fn on_glide_progress(&mut self, handle: GlideHandle, position: Vec3) {
        if self.active_glide() == Some(handle) {
            self.look_target = position;
        } else {
            debug!("CameraBrain: dropping progress from stale glide {:?}", handle);
        }
    }

    /// Glide `handle` finished its move and dwell; start the next leg.
    pub fn on_glide_finished(&mut self, handle: GlideHandle) {
        if self.active_glide() == Some(handle) {
            self.start_next_glide();
        } else {
            debug!("CameraBrain: ignoring completion of stale glide {:?}", handle);
        }
    }

    /// Countdown `handle` ran out. Returns to Search if it is the one
    /// Suspicious is waiting on.
    pub fn on_countdown_expired(&mut self, handle: CountdownHandle) -> Option<Transition> {
        if self.active_countdown() != Some(handle) {
            debug!("CameraBrain: ignoring stale countdown {:?}", handle);
            return None;
        }
        let transition = self.switch_to(CameraState::Search { glide: None });
        self.start_next_glide();
        Some(transition)
    }

    fn switch_to(&mut self, next: CameraState) -> Transition {
        let from = self.state.mode();
        self.state = next;
        Transition {
            from,
            to: next.mode(),
        }
    }

    /// Advance the cursor and glide toward the next waypoint.
    ///
    /// A single-waypoint route only glides when the look target is away from
    /// its waypoint, then rests.
    fn start_next_glide(&mut self) {
        let index = self.cursor.advance();
        let waypoint = self.route[index];

        if self.route.len() == 1
            && self.look_target.distance_squared(waypoint.position) <= f32::EPSILON
        {
            self.state = CameraState::Search { glide: None };
            return;
        }

        let request = GlideRequest {
            from: self.look_target,
            to: waypoint.position,
            duration: glide_duration(
                self.look_target,
                waypoint.position,
                self.settings.search_speed,
            ),
            dwell: waypoint.dwell,
        };
        let handle = self.animator.start(request);
        self.state = CameraState::Search {
            glide: Some(handle),
        };
    }
}
