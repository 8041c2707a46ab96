//! Integration test harness.
//!
//! Two flavours:
//! - `app_headless`: the whole gameplay stack (physics included) on `MinimalPlugins`.
//! - `app_deterministic`: no physics; every `update` runs exactly one fixed tick, and
//!   collisions are injected as `CollisionStart` messages.
#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::ecs::message::{Message, Messages};
use bevy::input::InputPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use bevy_fireballs::common::settings::FireballSettings;
use bevy_fireballs::common::state::GameState;
use bevy_fireballs::plugins::fireballs::FireballsPlugin;
use bevy_fireballs::plugins::host::scheduler::SimulationTick;
use bevy_fireballs::plugins::{core, host};

/// One simulation tick.
pub const TICK: Duration = Duration::from_millis(50);

pub fn app_headless() -> App {
    let mut app = App::new();

    // AssetPlugin + ScenePlugin so avian's collider plumbing finds its resources,
    // InputPlugin for the player's keyboard/mouse resources.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
        InputPlugin,
    ));

    bevy_fireballs::game::configure_headless(&mut app);
    app
}

pub fn app_deterministic(settings: FireballSettings) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(settings);

    core::plugin(&mut app);
    host::plugin(&mut app);
    app.init_state::<GameState>();
    app.add_plugins(FireballsPlugin);

    app.insert_resource(Time::<Fixed>::from_duration(TICK));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(TICK));
    // Leave startup and the initial state transition behind.
    app.update();
    app
}

pub fn tick(app: &App) -> u64 {
    app.world().resource::<SimulationTick>().get()
}

/// Update until `n` more simulation ticks have run.
pub fn run_ticks(app: &mut App, n: u64) {
    let target = tick(app) + n;
    for _ in 0..n * 4 + 4 {
        if tick(app) >= target {
            return;
        }
        app.update();
    }
    panic!("simulation stuck at tick {} (wanted {target})", tick(app));
}

pub fn drain<M: Message>(app: &mut App) -> Vec<M> {
    app.world_mut().resource_mut::<Messages<M>>().drain().collect()
}

pub fn count<C: Component>(app: &mut App) -> usize {
    app.world_mut().query::<&C>().iter(app.world()).count()
}
