//! Fireball spawn and time-to-live.
//!
//! ```text
//! Spawned ─> Flying ─┬─> Collided           (explosion::detonate_fireball_hits)
//!                    ├─> Expired            (TTL task below)
//!                    └─> ExternallyRemoved  (anything else despawning it)
//! ```
//!
//! All three exits are terminal. The TTL task is never cancelled; when it fires it
//! re-checks that the handle still resolves to a tagged fireball and otherwise does nothing.
//! Entity generations make a stale handle fail that check even if the index was reused.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::host::explosives::{large_fireball_bundle, Explosive, Shooter};
use crate::plugins::host::scheduler::{EntityScheduler, SimulationTick};
use crate::plugins::host::ActorId;

use super::tag::{managed_projectile, FireballTag, TaggedProjectile};

/// Distance in front of the eye, in blocks, so the fireball clears its own shooter.
pub const SPAWN_OFFSET: f32 = 1.5;
/// Initial speed in blocks per tick.
pub const VELOCITY_MULTIPLIER: f32 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActorPose {
    pub eye: Vec2,
    pub look: Vec2,
}

#[derive(Clone, Copy, Debug)]
pub struct FireballLaunch {
    pub owner: Entity,
    pub owner_id: ActorId,
    pub pose: ActorPose,
    /// Zero means no TTL.
    pub ttl_ticks: u32,
}

/// Spawn point and initial velocity for a launch from `pose`.
pub fn launch_vectors(pose: ActorPose, tunables: &Tunables) -> (Vec2, Vec2) {
    let look = pose.look.try_normalize().unwrap_or(Vec2::Y);
    let origin = pose.eye + look * (SPAWN_OFFSET * tunables.pixels_per_meter);
    let velocity = look * tunables.blocks_per_tick_to_velocity(VELOCITY_MULTIPLIER);
    (origin, velocity)
}

pub fn spawn_fireball(
    commands: &mut Commands,
    scheduler: &mut EntityScheduler,
    now: SimulationTick,
    tunables: &Tunables,
    launch: FireballLaunch,
) -> TaggedProjectile {
    let (origin, velocity) = launch_vectors(launch.pose, tunables);
    let ttl_deadline = (launch.ttl_ticks > 0).then(|| now.get() + u64::from(launch.ttl_ticks));
    let tag = FireballTag::new(launch.owner_id, now.get(), ttl_deadline);

    // Same command batch as the spawn: nothing observes the world's default yield.
    let entity = commands
        .spawn(large_fireball_bundle(origin, velocity))
        .insert((Explosive::new(0.0, false), Shooter(Some(launch.owner)), tag))
        .id();

    if launch.ttl_ticks > 0 {
        scheduler.run_delayed(now.get(), entity, launch.ttl_ticks, expire_if_still_flying);
    }

    debug!(
        owner = %launch.owner_id,
        ?entity,
        ttl_ticks = launch.ttl_ticks,
        "fireball launched"
    );
    tag.describe(entity)
}

fn expire_if_still_flying(world: &mut World, entity: Entity) {
    let Some(fireball) = world.get_entity(entity).ok().and_then(managed_projectile) else {
        return;
    };
    world.despawn(fireball.entity);
    debug!(entity = ?fireball.entity, owner = %fireball.owner, "fireball expired in flight");
}

