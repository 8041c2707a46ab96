//! Explosion override for managed fireballs.
//!
//! The world reports two moments for an explosive projectile. For our fireballs:
//! - **primed**: the default explosion is suppressed, nothing else happens;
//! - **hit**: the fireball is neutralized, despawned, and exactly one explosion built
//!   from `ExplosionProfile` is requested where it was.
//!
//! Both systems run between `emit_projectile_signals` and `detonate_primed`, so the
//! default explosion never sees an unsuppressed managed fireball. The despawn is queued
//! before the request is written and is applied at the sync point ahead of the explosion
//! sink.

use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::settings::FireballSettings;
use crate::plugins::host::blast::ExplosionRequest;
use crate::plugins::host::explosives::{EntityKind, Explosive, ExplosionPrimed, ProjectileHit};

use super::tag::ManagedProjectiles;

/// Explosion parameters, derived once from settings and reused for every detonation.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ExplosionProfile {
    pub power: f32,
    pub ignite: bool,
    pub destroy_blocks: bool,
}

impl ExplosionProfile {
    pub fn from_settings(settings: &FireballSettings) -> Self {
        Self {
            power: settings.explosion_power,
            ignite: settings.set_fire,
            destroy_blocks: settings.break_blocks,
        }
    }

    #[inline]
    pub fn at(&self, location: Vec2) -> ExplosionRequest {
        ExplosionRequest {
            location,
            power: self.power,
            ignite: self.ignite,
            destroy_blocks: self.destroy_blocks,
        }
    }
}

impl Default for ExplosionProfile {
    fn default() -> Self {
        Self::from_settings(&FireballSettings::default())
    }
}

pub fn suppress_primed_fireballs(
    mut primed: MessageReader<ExplosionPrimed>,
    managed: ManagedProjectiles,
    mut q_explosive: Query<&mut Explosive>,
) {
    for ev in primed.read() {
        if ev.kind != EntityKind::LargeFireball || managed.get(ev.entity).is_none() {
            continue;
        }
        if let Ok(mut explosive) = q_explosive.get_mut(ev.entity) {
            explosive.suppress_default();
        }
    }
}

pub fn detonate_fireball_hits(
    mut commands: Commands,
    mut hits: MessageReader<ProjectileHit>,
    managed: ManagedProjectiles,
    mut q_explosive: Query<&mut Explosive>,
    q_transform: Query<&Transform>,
    profile: Res<ExplosionProfile>,
    mut explosions: MessageWriter<ExplosionRequest>,
    // Despawns are deferred, so a repeated hit in the same run still resolves.
    mut detonated: Local<HashSet<Entity>>,
) {
    detonated.clear();

    for hit in hits.read() {
        if hit.kind != EntityKind::LargeFireball {
            continue;
        }
        let Some(fireball) = managed.get(hit.projectile) else {
            continue;
        };
        if !detonated.insert(fireball.entity) {
            continue;
        }

        if let Ok(mut explosive) = q_explosive.get_mut(fireball.entity) {
            explosive.neutralize();
            explosive.suppress_default();
        }

        let Ok(tf) = q_transform.get(fireball.entity) else {
            // No place in the world to explode at.
            commands.entity(fireball.entity).try_despawn();
            debug!(entity = ?fireball.entity, "fireball without a location removed");
            continue;
        };
        let location = tf.translation.truncate();

        commands.entity(fireball.entity).try_despawn();
        explosions.write(profile.at(location));
        debug!(owner = %fireball.owner, ?location, "fireball detonated");
    }
}
