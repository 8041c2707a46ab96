//! The marker that makes a large fireball ours.
//!
//! Only this crate's lifecycle can build a `FireballTag`, so an entity of the same kind
//! spawned by any other code path is never mistaken for a managed projectile. Callers ask
//! through `ManagedProjectiles` (systems) or `managed_projectile` (exclusive access) and get
//! a `TaggedProjectile` back instead of poking at the tag themselves.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::plugins::host::explosives::EntityKind;
use crate::plugins::host::ActorId;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireballTag {
    owner: ActorId,
    spawned_at_tick: u64,
    ttl_deadline: Option<u64>,
}

impl FireballTag {
    pub(super) fn new(owner: ActorId, spawned_at_tick: u64, ttl_deadline: Option<u64>) -> Self {
        Self {
            owner,
            spawned_at_tick,
            ttl_deadline,
        }
    }

    pub fn owner(&self) -> ActorId {
        self.owner
    }

    pub(super) fn describe(&self, entity: Entity) -> TaggedProjectile {
        TaggedProjectile {
            entity,
            owner: self.owner,
            spawned_at_tick: self.spawned_at_tick,
            ttl_deadline: self.ttl_deadline,
        }
    }
}

/// Bookkeeping view of a managed fireball.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaggedProjectile {
    pub entity: Entity,
    pub owner: ActorId,
    pub spawned_at_tick: u64,
    /// `None` when flight time is unbounded.
    pub ttl_deadline: Option<u64>,
}

/// `Some` only for a live large fireball carrying our tag.
pub fn managed_projectile(entity: EntityRef) -> Option<TaggedProjectile> {
    if entity.get::<EntityKind>() != Some(&EntityKind::LargeFireball) {
        return None;
    }
    entity.get::<FireballTag>().map(|tag| tag.describe(entity.id()))
}

#[derive(SystemParam)]
pub struct ManagedProjectiles<'w, 's> {
    q: Query<'w, 's, (&'static EntityKind, &'static FireballTag)>,
}

impl ManagedProjectiles<'_, '_> {
    pub fn get(&self, entity: Entity) -> Option<TaggedProjectile> {
        let Ok((kind, tag)) = self.q.get(entity) else {
            return None;
        };
        (*kind == EntityKind::LargeFireball).then(|| tag.describe(entity))
    }
}
