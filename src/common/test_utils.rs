//! Test helpers.
//!
//! `World::run_system_once` (via `RunSystemOnce`) runs a system without building a schedule.
//! Queued `Commands` are flushed afterwards so assertions see structural changes.
//!
//! Most systems here are message consumers, so the helpers below also make sure the
//! `Messages<T>` storage exists before writing and let tests drain what a system wrote.

use bevy::ecs::message::{Message, Messages};
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

/// Run a system once on the given world, then flush deferred commands.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// Initialise `Messages<M>` if no plugin did it yet.
pub fn ensure_messages<M: Message>(world: &mut World) {
    if world.get_resource::<Messages<M>>().is_none() {
        world.init_resource::<Messages<M>>();
    }
}

/// Write a message, creating its storage on first use.
pub fn send<M: Message>(world: &mut World, message: M) {
    ensure_messages::<M>(world);
    world.write_message(message);
}

/// Take every buffered message of type `M`.
pub fn drain_messages<M: Message>(world: &mut World) -> Vec<M> {
    ensure_messages::<M>(world);
    world.resource_mut::<Messages<M>>().drain().collect()
}
