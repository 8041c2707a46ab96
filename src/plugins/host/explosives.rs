//! Projectiles that can explode, and the world's default explosion mechanics.
//!
//! ```text
//! CollisionStart (avian)
//!   └─ emit_projectile_signals ── ExplosionPrimed (explosives only)
//!                              └─ ProjectileHit
//!        ... interceptors may suppress / neutralize / despawn here ...
//!   └─ detonate_primed ── ExplosionRequest (default: yield + incendiary, breaks blocks)
//! ```
//!
//! Signals are not de-duplicated: a body touching two colliders in one step is reported twice.

use avian2d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState};

use super::blast::ExplosionRequest;

#[derive(Component)]
pub struct Projectile;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    LargeFireball,
    SmallFireball,
    Arrow,
}

/// Who launched the projectile, for attribution.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Shooter(pub Option<Entity>);

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Explosive {
    pub yield_power: f32,
    pub incendiary: bool,
    suppressed: bool,
}

impl Explosive {
    pub const LARGE_FIREBALL_YIELD: f32 = 1.0;

    pub fn new(yield_power: f32, incendiary: bool) -> Self {
        Self {
            yield_power,
            incendiary,
            suppressed: false,
        }
    }

    /// Zero yield, no fire.
    pub fn neutralize(&mut self) {
        self.yield_power = 0.0;
        self.incendiary = false;
    }

    /// Cancel the pending default explosion for this entity.
    pub fn suppress_default(&mut self) {
        self.suppressed = true;
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    #[inline]
    fn would_detonate(&self) -> bool {
        !self.suppressed && self.yield_power > 0.0
    }
}

/// An explosive is about to detonate with its default mechanics.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExplosionPrimed {
    pub entity: Entity,
    pub kind: EntityKind,
}

/// A projectile touched something.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProjectileHit {
    pub projectile: Entity,
    pub kind: EntityKind,
}

/// What the world spawns when asked for a large fireball: incendiary, default yield.
pub fn large_fireball_bundle(position: Vec2, velocity: Vec2) -> impl Bundle {
    (
        Name::new("LargeFireball"),
        Projectile,
        EntityKind::LargeFireball,
        Explosive::new(Explosive::LARGE_FIREBALL_YIELD, true),
        Shooter::default(),
        Sprite {
            color: Color::srgb(1.0, 0.45, 0.1),
            custom_size: Some(Vec2::splat(16.0)),
            ..default()
        },
        Transform::from_translation(position.extend(2.0)),
        RigidBody::Dynamic,
        Collider::circle(8.0),
        CollisionLayers::new(Layer::Projectile, [Layer::World, Layer::Player]),
        LinearVelocity(velocity),
        // Avian only writes CollisionStart when one side opts in.
        CollisionEventsEnabled,
        DespawnOnExit(GameState::InGame),
    )
}

pub fn emit_projectile_signals(
    mut started: MessageReader<CollisionStart>,
    q_projectiles: Query<(&EntityKind, Has<Explosive>), With<Projectile>>,
    mut primed: MessageWriter<ExplosionPrimed>,
    mut hits: MessageWriter<ProjectileHit>,
) {
    for ev in started.read() {
        for this in [ev.collider1, ev.collider2] {
            let Ok((kind, explosive)) = q_projectiles.get(this) else {
                continue;
            };
            if explosive {
                primed.write(ExplosionPrimed { entity: this, kind: *kind });
            }
            hits.write(ProjectileHit {
                projectile: this,
                kind: *kind,
            });
        }
    }
}

/// Default explosion for every primed explosive that is still alive and not suppressed.
pub fn detonate_primed(
    mut commands: Commands,
    mut primed: MessageReader<ExplosionPrimed>,
    q_explosives: Query<(&Explosive, &Transform)>,
    mut explosions: MessageWriter<ExplosionRequest>,
    mut detonated: Local<HashSet<Entity>>,
) {
    detonated.clear();

    for ev in primed.read() {
        let Ok((explosive, tf)) = q_explosives.get(ev.entity) else {
            continue;
        };
        if !explosive.would_detonate() || !detonated.insert(ev.entity) {
            continue;
        }

        commands.entity(ev.entity).try_despawn();
        explosions.write(ExplosionRequest {
            location: tf.translation.truncate(),
            power: explosive.yield_power,
            ignite: explosive.incendiary,
            destroy_blocks: true,
        });
    }
}
