//! Headless demo: one ceiling camera patrolling a room with a few pillars
//! while an intruder wanders around. Every state change is logged.
//!
//! Environment:
//!   - `SECURITY_CAMERA_CONFIG`: path to a JSON `CameraConfig` (default: built-in)
//!   - `SECURITY_CAMERA_DEMO_SECS`: how long to run (default: 20)
//!   - `SECURITY_CAMERA_SEED`: intruder wander seed (default: 42)

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::hierarchy::HierarchyPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::transform::TransformPlugin;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use security_camera::{
    spawn_security_camera, ActorSighted, CameraConfig, CameraMode, CameraStateChanged, Occluder,
    SecurityCameraPlugin, TrackedActor,
};

const DEFAULT_RUN_SECS: f32 = 20.0;
const DEFAULT_SEED: u64 = 42;
const TICK_HZ: f64 = 64.0;
const INTRUDER_SPEED: f32 = 1.5;

/// Floor area the intruder wanders over: x in [-6, 6], z in [1, 10].
const ROOM_MIN: Vec2 = Vec2::new(-6.0, 1.0);
const ROOM_MAX: Vec2 = Vec2::new(6.0, 10.0);

fn main() -> AppExit {
    let settings = DemoSettings::from_env();

    let mut app = App::new();
    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / TICK_HZ,
        ))),
    )
    .add_plugins((LogPlugin::default(), TransformPlugin, HierarchyPlugin))
    .add_plugins(SecurityCameraPlugin)
    .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
    .insert_resource(WanderRng(ChaCha8Rng::seed_from_u64(settings.seed)))
    .insert_resource(DemoClock(Timer::from_seconds(
        settings.run_secs,
        TimerMode::Once,
    )))
    .insert_resource(settings)
    .init_resource::<DemoStats>()
    .add_systems(Startup, setup_room)
    .add_systems(FixedUpdate, wander_intruder)
    .add_systems(Update, (log_camera_events, stop_after_run_time).chain());

    app.run()
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

#[derive(Resource, Debug, Clone)]
struct DemoSettings {
    config_path: Option<String>,
    run_secs: f32,
    seed: u64,
}

impl DemoSettings {
    fn from_env() -> Self {
        Self {
            config_path: std::env::var("SECURITY_CAMERA_CONFIG").ok(),
            run_secs: std::env::var("SECURITY_CAMERA_DEMO_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|secs: &f32| *secs > 0.0)
                .unwrap_or(DEFAULT_RUN_SECS),
            seed: std::env::var("SECURITY_CAMERA_SEED")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SEED),
        }
    }
}

#[derive(Resource)]
struct WanderRng(ChaCha8Rng);

#[derive(Resource)]
struct DemoClock(Timer);

#[derive(Resource, Default, Debug)]
struct DemoStats {
    transitions: u32,
    sightings: u32,
    alarms: u32,
}

#[derive(Component, Debug)]
struct Intruder {
    goal: Vec3,
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

fn setup_room(
    mut commands: Commands,
    settings: Res<DemoSettings>,
    mut rng: ResMut<WanderRng>,
    mut exit: EventWriter<AppExit>,
) {
    let config = match &settings.config_path {
        Some(path) => match CameraConfig::from_json_file(path) {
            Ok(config) => {
                info!("Loaded camera config from {}", path);
                config
            }
            Err(e) => {
                error!("Rejected camera config {}: {}", path, e);
                exit.send(AppExit::error());
                return;
            }
        },
        None => CameraConfig::default(),
    };

    let mount = Transform::from_xyz(0.0, 3.0, 0.0);
    if let Err(e) = spawn_security_camera(&mut commands, &config, mount) {
        error!("Could not spawn camera: {}", e);
        exit.send(AppExit::error());
        return;
    }

    for x in [-2.5, 2.5] {
        commands.spawn((
            Occluder::new(Vec3::new(0.3, 1.5, 0.3)),
            Transform::from_xyz(x, 1.5, 4.0),
        ));
    }

    let start = random_floor_point(&mut rng.0);
    commands.spawn((
        TrackedActor,
        Intruder {
            goal: random_floor_point(&mut rng.0),
        },
        Transform::from_translation(start),
    ));

    info!(
        "Demo running for {:.1}s (seed {})",
        settings.run_secs, settings.seed
    );
}

fn random_floor_point(rng: &mut ChaCha8Rng) -> Vec3 {
    Vec3::new(
        rng.gen_range(ROOM_MIN.x..=ROOM_MAX.x),
        0.0,
        rng.gen_range(ROOM_MIN.y..=ROOM_MAX.y),
    )
}

fn wander_intruder(
    time: Res<Time<Fixed>>,
    mut rng: ResMut<WanderRng>,
    mut intruders: Query<(&mut Intruder, &mut Transform)>,
) {
    let dt = time.timestep().as_secs_f32();
    for (mut intruder, mut transform) in &mut intruders {
        let step = INTRUDER_SPEED * dt;
        let to_goal = intruder.goal - transform.translation;
        if to_goal.length() <= step {
            transform.translation = intruder.goal;
            intruder.goal = random_floor_point(&mut rng.0);
        } else {
            transform.translation += to_goal.normalize() * step;
        }
    }
}

fn log_camera_events(
    mut changes: EventReader<CameraStateChanged>,
    mut sightings: EventReader<ActorSighted>,
    mut stats: ResMut<DemoStats>,
) {
    for change in changes.read() {
        stats.transitions += 1;
        if change.to == CameraMode::Track && change.from == CameraMode::Search {
            stats.alarms += 1;
            warn!("Camera {:?} spotted the intruder", change.camera);
        }
    }
    for sighting in sightings.read() {
        stats.sightings += 1;
        debug!(
            "Camera {:?} sees {:?} at {}",
            sighting.camera, sighting.actor, sighting.position
        );
    }
}

fn stop_after_run_time(
    time: Res<Time>,
    mut clock: ResMut<DemoClock>,
    stats: Res<DemoStats>,
    mut exit: EventWriter<AppExit>,
) {
    if clock.0.tick(time.delta()).just_finished() {
        info!(
            "Demo finished: {} transitions, {} alarms, {} sighting ticks",
            stats.transitions, stats.alarms, stats.sightings
        );
        exit.send(AppExit::Success);
    }
}
