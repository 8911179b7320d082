//! Unit tests for the camera state machine, driven by recording mocks.

use bevy::math::Vec3;

use super::*;
use crate::collaborators::{
    CountdownHandle, CountdownTimer, GlideAnimator, GlideHandle, GlideRequest,
};
use crate::patrol::{PatrolMode, PatrolRoute, Waypoint};

// -------------------------------------------------------------------------
// Recording collaborators
// -------------------------------------------------------------------------

#[derive(Default)]
struct RecordingAnimator {
    started: Vec<(GlideHandle, GlideRequest)>,
    canceled: Vec<GlideHandle>,
}

impl GlideAnimator for RecordingAnimator {
    fn start(&mut self, request: GlideRequest) -> GlideHandle {
        let handle = GlideHandle(self.started.len() as u64 + 1);
        self.started.push((handle, request));
        handle
    }

    fn cancel(&mut self, handle: GlideHandle) {
        self.canceled.push(handle);
    }
}

impl RecordingAnimator {
    fn last(&self) -> (GlideHandle, GlideRequest) {
        *self.started.last().expect("a glide was started")
    }
}

#[derive(Default)]
struct RecordingCountdown {
    started: Vec<(CountdownHandle, f32)>,
    stopped: Vec<CountdownHandle>,
}

impl CountdownTimer for RecordingCountdown {
    fn start(&mut self, seconds: f32) -> CountdownHandle {
        let handle = CountdownHandle(self.started.len() as u64 + 1);
        self.started.push((handle, seconds));
        handle
    }

    fn stop(&mut self, handle: CountdownHandle) {
        self.stopped.push(handle);
    }
}

type TestBrain = CameraBrain<RecordingAnimator, RecordingCountdown>;

const DT: f32 = 0.1;

fn square_route() -> PatrolRoute {
    PatrolRoute::new(vec![
        Waypoint::new(Vec3::new(0.0, 0.0, -4.0), 1.0),
        Waypoint::new(Vec3::new(2.0, 0.0, -4.0), 1.0),
        Waypoint::new(Vec3::new(2.0, 0.0, -6.0), 1.0),
        Waypoint::new(Vec3::new(0.0, 0.0, -6.0), 1.0),
    ])
    .expect("non-empty route")
}

fn settings() -> BrainSettings {
    BrainSettings {
        search_speed: 2.0,
        track_speed: 5.0,
        suspicious_secs: 3.0,
    }
}

fn brain(mode: PatrolMode) -> TestBrain {
    CameraBrain::new(
        square_route(),
        mode,
        settings(),
        RecordingAnimator::default(),
        RecordingCountdown::default(),
    )
}

/// Finish whatever glide is active, as the animator would.
fn finish_glide(brain: &mut TestBrain) {
    let (handle, request) = brain.animator().last();
    brain.on_glide_progress(handle, request.to);
    brain.on_glide_finished(handle);
}

fn actor() -> Vec3 {
    Vec3::new(1.0, 0.0, -5.0)
}

// -------------------------------------------------------------------------
// Startup
// -------------------------------------------------------------------------

#[test]
fn test_starts_in_search_gliding_to_second_waypoint() {
    let brain = brain(PatrolMode::Bounce);
    assert_eq!(brain.mode(), CameraMode::Search);
    assert_eq!(brain.look_target(), Vec3::new(0.0, 0.0, -4.0));
    assert_eq!(brain.animator().started.len(), 1);

    let (handle, request) = brain.animator().last();
    assert_eq!(brain.active_glide(), Some(handle));
    assert_eq!(request.from, Vec3::new(0.0, 0.0, -4.0));
    assert_eq!(request.to, Vec3::new(2.0, 0.0, -4.0));
    assert!((request.duration - 1.0).abs() < 1e-5, "2 units at 2/s, got {}", request.duration);
    assert!((request.dwell - 1.0).abs() < f32::EPSILON);
}

#[test]
fn test_glide_progress_moves_look_target() {
    let mut brain = brain(PatrolMode::Bounce);
    let (handle, _) = brain.animator().last();
    brain.on_glide_progress(handle, Vec3::new(1.0, 0.0, -4.0));
    assert_eq!(brain.look_target(), Vec3::new(1.0, 0.0, -4.0));
}

#[test]
fn test_finished_glide_chains_to_next_waypoint() {
    let mut brain = brain(PatrolMode::Bounce);
    finish_glide(&mut brain);
    assert_eq!(brain.cursor().index(), 2);
    let (_, request) = brain.animator().last();
    assert_eq!(request.from, Vec3::new(2.0, 0.0, -4.0));
    assert_eq!(request.to, Vec3::new(2.0, 0.0, -6.0));
    assert_eq!(brain.animator().started.len(), 2);
}

#[test]
fn test_not_visible_in_search_is_a_no_op() {
    let mut brain = brain(PatrolMode::Bounce);
    let before = brain.state();
    let report = brain.tick(false, Some(actor()), DT);
    assert_eq!(report.transition, None);
    assert_eq!(brain.state(), before);
    assert!(brain.animator().canceled.is_empty());
}

// -------------------------------------------------------------------------
// Search -> Track
// -------------------------------------------------------------------------

#[test]
fn test_sighting_in_search_tracks_and_cancels_glide_once() {
    let mut brain = brain(PatrolMode::Bounce);
    let (handle, _) = brain.animator().last();
    let look_before = brain.look_target();

    let report = brain.tick(true, Some(actor()), DT);
    assert_eq!(
        report.transition,
        Some(Transition {
            from: CameraMode::Search,
            to: CameraMode::Track
        })
    );
    assert_eq!(brain.mode(), CameraMode::Track);
    assert_eq!(brain.animator().canceled, vec![handle]);
    assert_eq!(brain.look_target(), look_before, "no chase on the entry tick");

    brain.tick(true, Some(actor()), DT);
    brain.tick(true, Some(actor()), DT);
    assert_eq!(brain.animator().canceled.len(), 1, "cancel invoked exactly once");
}

#[test]
fn test_stale_glide_completion_after_leaving_search_is_ignored() {
    let mut brain = brain(PatrolMode::Bounce);
    let (handle, request) = brain.animator().last();
    brain.tick(true, Some(actor()), DT);
    let look_before = brain.look_target();
    let cursor_before = *brain.cursor();

    brain.on_glide_progress(handle, request.to);
    brain.on_glide_finished(handle);

    assert_eq!(brain.mode(), CameraMode::Track);
    assert_eq!(brain.look_target(), look_before);
    assert_eq!(*brain.cursor(), cursor_before);
    assert_eq!(brain.animator().started.len(), 1, "no new glide");
}

// -------------------------------------------------------------------------
// Track
// -------------------------------------------------------------------------

#[test]
fn test_track_chases_actor_and_reports_sighting() {
    let mut brain = brain(PatrolMode::Bounce);
    brain.tick(true, Some(actor()), DT);
    let start = brain.look_target();

    let report = brain.tick(true, Some(actor()), DT);
    assert_eq!(report.sighting, Some(actor()));
    let moved = start.distance(brain.look_target());
    assert!((moved - 0.5).abs() < 1e-4, "5/s for 0.1s, got {moved}");
}

#[test]
fn test_track_lands_on_actor_without_overshoot() {
    let mut brain = brain(PatrolMode::Bounce);
    brain.tick(true, Some(actor()), DT);
    for _ in 0..50 {
        brain.tick(true, Some(actor()), DT);
    }
    assert_eq!(brain.look_target(), actor());
}

#[test]
fn test_losing_sight_starts_countdown_once() {
    let mut brain = brain(PatrolMode::Bounce);
    brain.tick(true, Some(actor()), DT);

    let report = brain.tick(false, Some(actor()), DT);
    assert_eq!(
        report.transition,
        Some(Transition {
            from: CameraMode::Track,
            to: CameraMode::Suspicious
        })
    );
    assert_eq!(brain.countdown().started.len(), 1);
    assert!((brain.countdown().started[0].1 - 3.0).abs() < f32::EPSILON);

    brain.tick(false, None, DT);
    brain.tick(false, None, DT);
    assert_eq!(brain.countdown().started.len(), 1, "countdown started exactly once");
    assert_eq!(brain.mode(), CameraMode::Suspicious);
}

#[test]
fn test_visible_without_position_counts_as_lost() {
    let mut brain = brain(PatrolMode::Bounce);
    brain.tick(true, Some(actor()), DT);
    let report = brain.tick(true, None, DT);
    assert!(!report.visible);
    assert_eq!(brain.mode(), CameraMode::Suspicious);
}

// -------------------------------------------------------------------------
// Suspicious
// -------------------------------------------------------------------------

#[test]
fn test_reacquire_in_suspicious_stops_countdown() {
    let mut brain = brain(PatrolMode::Bounce);
    brain.tick(true, Some(actor()), DT);
    brain.tick(false, None, DT);
    let countdown = brain.active_countdown().expect("suspicious");

    let report = brain.tick(true, Some(actor()), DT);
    assert_eq!(
        report.transition,
        Some(Transition {
            from: CameraMode::Suspicious,
            to: CameraMode::Track
        })
    );
    assert_eq!(brain.countdown().stopped, vec![countdown]);
}

#[test]
fn test_expiry_returns_to_search_and_resumes_from_cursor() {
    let mut brain = brain(PatrolMode::Loop);
    // Walk the patrol to waypoint 2.
    finish_glide(&mut brain);
    assert_eq!(brain.cursor().index(), 2);

    brain.tick(true, Some(actor()), DT);
    brain.tick(true, Some(actor()), DT);
    brain.tick(false, None, DT);
    let countdown = brain.active_countdown().expect("suspicious");
    let look_before = brain.look_target();

    let transition = brain.on_countdown_expired(countdown);
    assert_eq!(
        transition,
        Some(Transition {
            from: CameraMode::Suspicious,
            to: CameraMode::Search
        })
    );
    assert_eq!(brain.mode(), CameraMode::Search);
    assert_eq!(brain.cursor().index(), 3, "resumes after waypoint 2, not from 0");

    let (handle, request) = brain.animator().last();
    assert_eq!(brain.active_glide(), Some(handle));
    assert_eq!(request.from, look_before);
    assert_eq!(request.to, Vec3::new(0.0, 0.0, -6.0));
}

#[test]
fn test_stale_countdown_expiry_is_ignored() {
    let mut brain = brain(PatrolMode::Bounce);
    brain.tick(true, Some(actor()), DT);
    brain.tick(false, None, DT);
    let stale = brain.active_countdown().expect("suspicious");
    brain.tick(true, Some(actor()), DT);

    assert_eq!(brain.on_countdown_expired(stale), None);
    assert_eq!(brain.mode(), CameraMode::Track);
}

#[test]
fn test_second_suspicious_period_uses_fresh_countdown() {
    let mut brain = brain(PatrolMode::Bounce);
    brain.tick(true, Some(actor()), DT);
    brain.tick(false, None, DT);
    let first = brain.active_countdown().expect("suspicious");
    brain.tick(true, Some(actor()), DT);
    brain.tick(false, None, DT);
    let second = brain.active_countdown().expect("suspicious");

    assert_ne!(first, second);
    assert_eq!(brain.on_countdown_expired(first), None);
    assert!(brain.on_countdown_expired(second).is_some());
}

// -------------------------------------------------------------------------
// Single-waypoint route
// -------------------------------------------------------------------------

fn single_point_brain() -> TestBrain {
    let route = PatrolRoute::new(vec![Waypoint::new(Vec3::new(0.0, 0.0, -3.0), 0.5)])
        .expect("non-empty route");
    CameraBrain::new(
        route,
        PatrolMode::Bounce,
        settings(),
        RecordingAnimator::default(),
        RecordingCountdown::default(),
    )
}

#[test]
fn test_single_waypoint_rests_without_glide() {
    let brain = single_point_brain();
    assert_eq!(brain.state(), CameraState::Search { glide: None });
    assert!(brain.animator().started.is_empty());
    assert_eq!(brain.cursor().index(), 0);
}

#[test]
fn test_single_waypoint_glides_home_once_after_suspicion() {
    let mut brain = single_point_brain();
    brain.tick(true, Some(Vec3::new(3.0, 0.0, -3.0)), DT);
    for _ in 0..10 {
        brain.tick(true, Some(Vec3::new(3.0, 0.0, -3.0)), DT);
    }
    brain.tick(false, None, DT);
    let countdown = brain.active_countdown().expect("suspicious");
    brain.on_countdown_expired(countdown);

    assert_eq!(brain.animator().started.len(), 1, "one glide home");
    let (_, request) = brain.animator().last();
    assert_eq!(request.to, Vec3::new(0.0, 0.0, -3.0));

    finish_glide(&mut brain);
    assert_eq!(brain.state(), CameraState::Search { glide: None });
    assert_eq!(brain.animator().started.len(), 1, "rests after arriving");
    assert_eq!(brain.cursor().index(), 0);
}
