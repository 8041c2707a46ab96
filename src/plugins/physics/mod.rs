//! Physics plugin: avian2d at block scale, stepped at the simulation tick rate.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    let tunables = app.world().resource::<Tunables>().clone();
    app.insert_resource(Time::<Fixed>::from_hz(tunables.tick_hz))
        .add_plugins(PhysicsPlugins::default().with_length_unit(tunables.pixels_per_meter))
        // Top-down: fireballs fly straight until they hit something.
        .insert_resource(Gravity(Vec2::ZERO));
}
