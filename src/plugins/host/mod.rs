//! Host world plugin: the collaborators the fireball core talks to.
//!
//! Everything here is engine-side plumbing with no fireball knowledge:
//! - a simulation tick and an entity-bound deferred task queue,
//! - explosive projectiles and their default explosion mechanics,
//! - the explosion sink,
//! - actor identity, inventories and the raw client packet inbox.
//!
//! ```text
//! FixedPreUpdate:  advance_tick -> run_due_tasks
//! FixedPostUpdate: emit_projectile_signals -> (interceptors) -> detonate_primed -> apply_explosions
//! ```

use avian2d::collision::narrow_phase::CollisionEventSystems;
use avian2d::prelude::CollisionStart;
use bevy::prelude::*;

pub mod actor;
pub mod blast;
pub mod explosives;
pub mod inventory;
pub mod protocol;
pub mod scheduler;

pub use actor::{Actor, ActorDeparted, ActorId, Facing};

pub fn plugin(app: &mut App) {
    app.init_resource::<scheduler::SimulationTick>()
        .init_resource::<scheduler::EntityScheduler>()
        .init_resource::<blast::ExplosionLog>()
        .init_resource::<protocol::PacketInbox>()
        .init_resource::<protocol::PacketLog>();

    // Avian registers CollisionStart itself; this keeps physics-less apps working.
    app.add_message::<CollisionStart>()
        .add_message::<explosives::ExplosionPrimed>()
        .add_message::<explosives::ProjectileHit>()
        .add_message::<blast::ExplosionRequest>()
        .add_message::<ActorDeparted>()
        .add_message::<protocol::ClientPacket>();

    app.add_systems(Update, protocol::handle_client_packets);

    app.add_systems(
        FixedPreUpdate,
        (scheduler::advance_tick, scheduler::run_due_tasks).chain(),
    );

    app.add_systems(
        FixedPostUpdate,
        (
            explosives::emit_projectile_signals.after(CollisionEventSystems),
            explosives::detonate_primed.after(explosives::emit_projectile_signals),
            blast::apply_explosions.after(explosives::detonate_primed),
        ),
    );
}
