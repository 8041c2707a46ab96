//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::fireballs::FireballsPlugin;

pub mod core;
pub mod fireballs;
pub mod host;
pub mod physics;
pub mod player;
pub mod world;

// Render-only
pub mod camera;

/// Register gameplay plugins that work in headless tests.
///
/// `core` goes first: later plugins read its resources while building.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    host::plugin(app);
    world::plugin(app);
    player::plugin(app);
    app.add_plugins(FireballsPlugin);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
}
