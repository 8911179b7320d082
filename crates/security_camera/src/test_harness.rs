//! # TestSite: headless harness for camera integration tests
//!
//! Wraps a `bevy::app::App` with `MinimalPlugins`, transform propagation and
//! [`SecurityCameraPlugin`]. Build the scene with the `with_*` methods, then
//! call `tick()` to run fixed steps and inspect the result.

use std::time::Duration;

use bevy::ecs::system::SystemState;
use bevy::ecs::world::CommandQueue;
use bevy::hierarchy::HierarchyPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;

use crate::brain::CameraMode;
use crate::config::CameraConfig;
use crate::error::CameraConfigError;
use crate::events::{ActorSighted, CameraStateChanged};
use crate::perception::{ActorEnteredVolume, ActorPresence, Occluder, TrackedActor};
use crate::rig::{spawn_security_camera, CameraRig, SecurityCamera};
use crate::status::StatusLight;
use crate::SecurityCameraPlugin;

pub struct TestSite {
    app: App,
    camera: Option<Entity>,
    actor: Option<Entity>,
}

/// State changes seen by a reader in `Update`, across event buffer swaps.
#[derive(Resource, Default, Debug)]
struct ObservedChanges(Vec<CameraStateChanged>);

fn record_state_changes(
    mut changes: EventReader<CameraStateChanged>,
    mut observed: ResMut<ObservedChanges>,
) {
    observed.0.extend(changes.read().copied());
}

impl Default for TestSite {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSite {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// An empty site: no cameras, no actor, no occluders.
    pub fn new() -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins((TransformPlugin, HierarchyPlugin));
        app.add_plugins(SecurityCameraPlugin);
        app.init_resource::<ObservedChanges>()
            .add_systems(Update, record_state_changes);
        app.update();
        Self {
            app,
            camera: None,
            actor: None,
        }
    }

    // -----------------------------------------------------------------------
    // Scene setup (builder pattern, consumes and returns Self)
    // -----------------------------------------------------------------------

    /// Spawn a camera, panicking if the config is rejected.
    pub fn with_camera(self, config: CameraConfig, mount: Transform) -> Self {
        match self.try_with_camera(config, mount) {
            Ok(site) => site,
            Err(e) => panic!("camera config rejected: {e}"),
        }
    }

    pub fn try_with_camera(
        mut self,
        config: CameraConfig,
        mount: Transform,
    ) -> Result<Self, CameraConfigError> {
        let camera = self.spawn_camera(&config, mount)?;
        self.camera = Some(camera);
        self.propagate();
        Ok(self)
    }

    /// Spawn through the public spawn function and apply the commands.
    pub fn spawn_camera(
        &mut self,
        config: &CameraConfig,
        mount: Transform,
    ) -> Result<Entity, CameraConfigError> {
        let world = self.app.world_mut();
        let mut queue = CommandQueue::default();
        let result = {
            let mut commands = Commands::new(&mut queue, world);
            spawn_security_camera(&mut commands, config, mount)
        };
        queue.apply(world);
        result
    }

    /// Spawn the main actor, the one `move_actor` and `actor_entity` refer to.
    pub fn with_actor(mut self, position: Vec3) -> Self {
        let actor = self.spawn_actor(position);
        self.actor = Some(actor);
        self
    }

    /// Spawn an additional tracked actor.
    pub fn spawn_actor(&mut self, position: Vec3) -> Entity {
        let actor = self
            .app
            .world_mut()
            .spawn((TrackedActor, Transform::from_translation(position)))
            .id();
        self.propagate();
        actor
    }

    pub fn with_occluder(mut self, center: Vec3, half_extents: Vec3) -> Self {
        self.app
            .world_mut()
            .spawn((Occluder::new(half_extents), Transform::from_translation(center)));
        self.propagate();
        self
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    pub fn move_actor(&mut self, position: Vec3) {
        let actor = self.actor_entity();
        self.move_entity(actor, position);
    }

    pub fn move_entity(&mut self, entity: Entity, position: Vec3) {
        if let Some(mut transform) = self.app.world_mut().get_mut::<Transform>(entity) {
            transform.translation = position;
        }
        self.propagate();
    }

    pub fn despawn_actor(&mut self) {
        let actor = self.actor_entity();
        self.app.world_mut().despawn(actor);
    }

    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Run `n` fixed steps by executing `FixedUpdate` directly, followed by
    /// `PostUpdate` so transform propagation sees the new rig pose.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
            self.propagate();
        }
    }

    /// Run enough fixed steps to cover `seconds` of simulated time.
    pub fn tick_secs(&mut self, seconds: f32) {
        let step = self.timestep_secs();
        self.tick((seconds / step).ceil() as u32);
    }

    /// Run `n` fixed steps without transform propagation, so every
    /// `GlobalTransform` keeps its value from before the steps.
    pub fn fixed_steps(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    /// Run `n` whole frames through `App::update()`, each advancing time by
    /// `frame`. The fixed loop runs as many steps per frame as fit.
    pub fn run_frames(&mut self, n: u32, frame: Duration) {
        self.app
            .insert_resource(TimeUpdateStrategy::ManualDuration(frame));
        for _ in 0..n {
            self.app.update();
        }
    }

    pub fn timestep_secs(&self) -> f32 {
        self.app
            .world()
            .resource::<Time<Fixed>>()
            .timestep()
            .as_secs_f32()
    }

    pub fn propagate(&mut self) {
        self.app.world_mut().run_schedule(PostUpdate);
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn camera_entity(&self) -> Entity {
        self.camera.expect("site has a camera")
    }

    pub fn actor_entity(&self) -> Entity {
        self.actor.expect("site has an actor")
    }

    pub fn camera(&self) -> &SecurityCamera {
        self.app
            .world()
            .get::<SecurityCamera>(self.camera_entity())
            .expect("camera entity has SecurityCamera")
    }

    pub fn rig(&self) -> CameraRig {
        *self
            .app
            .world()
            .get::<CameraRig>(self.camera_entity())
            .expect("camera entity has CameraRig")
    }

    pub fn mode(&self) -> CameraMode {
        self.camera().brain.mode()
    }

    pub fn look_target(&self) -> Vec3 {
        self.camera().brain.look_target()
    }

    pub fn presence(&self) -> ActorPresence {
        *self
            .app
            .world()
            .get::<ActorPresence>(self.camera_entity())
            .expect("camera entity has ActorPresence")
    }

    pub fn status_color(&self) -> Color {
        self.app
            .world()
            .get::<StatusLight>(self.rig().lens)
            .expect("lens has StatusLight")
            .color
    }

    /// Lens pose composed from the rig's local transforms.
    pub fn lens_pose(&mut self) -> GlobalTransform {
        let rig = self.rig();
        let camera = self.camera_entity();
        let world = self.app.world_mut();
        let mount = *world
            .get::<GlobalTransform>(camera)
            .expect("camera entity has GlobalTransform");
        let mut state = SystemState::<Query<&Transform>>::new(world);
        let parts = state.get(world);
        rig.lens_pose(&mount, &parts).expect("rig parts present")
    }

    /// The lens's propagated `GlobalTransform`.
    pub fn lens_global(&self) -> GlobalTransform {
        *self
            .app
            .world()
            .get::<GlobalTransform>(self.rig().lens)
            .expect("lens has GlobalTransform")
    }

    pub fn hub_rotation(&self) -> Quat {
        self.app
            .world()
            .get::<Transform>(self.rig().hub)
            .expect("hub has Transform")
            .rotation
    }

    pub fn security_camera_count(&mut self) -> usize {
        let world = self.app.world_mut();
        world.query::<&SecurityCamera>().iter(world).count()
    }

    /// Every state change sent so far.
    pub fn state_changes(&self) -> Vec<CameraStateChanged> {
        self.app
            .world()
            .resource::<Events<CameraStateChanged>>()
            .iter_current_update_events()
            .copied()
            .collect()
    }

    /// State changes as seen by a reader in `Update`. Only filled by
    /// [`run_frames`](Self::run_frames).
    pub fn observed_changes(&self) -> Vec<CameraStateChanged> {
        self.app.world().resource::<ObservedChanges>().0.clone()
    }

    /// Every volume entry sent so far.
    pub fn volume_entries(&self) -> Vec<ActorEnteredVolume> {
        self.app
            .world()
            .resource::<Events<ActorEnteredVolume>>()
            .iter_current_update_events()
            .copied()
            .collect()
    }

    /// Every sighting sent so far.
    pub fn sightings(&self) -> Vec<ActorSighted> {
        self.app
            .world()
            .resource::<Events<ActorSighted>>()
            .iter_current_update_events()
            .copied()
            .collect()
    }
}
