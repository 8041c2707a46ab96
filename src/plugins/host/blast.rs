//! Explosion sink: the only place that turns an `ExplosionRequest` into world damage.

use bevy::platform::collections::HashSet;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{state::GameState, tunables::Tunables};

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct ExplosionRequest {
    pub location: Vec2,
    pub power: f32,
    pub ignite: bool,
    pub destroy_blocks: bool,
}

/// Terrain that explosions may remove.
#[derive(Component, Debug, Clone, Copy)]
pub struct Breakable;

/// Fire left behind by an igniting explosion.
#[derive(Component, Debug, Clone, Copy)]
pub struct Fire;

/// Running record of applied explosions.
#[derive(Resource, Debug, Default, Clone)]
pub struct ExplosionLog {
    pub total: u64,
    pub blocks_destroyed: u64,
    pub last: Option<ExplosionRequest>,
}

pub fn apply_explosions(
    mut commands: Commands,
    mut requests: MessageReader<ExplosionRequest>,
    q_breakable: Query<(Entity, &Transform), With<Breakable>>,
    tunables: Res<Tunables>,
    mut log: ResMut<ExplosionLog>,
    // Overlapping blasts in one run must not destroy the same block twice.
    mut destroyed_blocks: Local<HashSet<Entity>>,
) {
    destroyed_blocks.clear();

    for req in requests.read() {
        let radius = req.power * tunables.blast_radius_per_power * tunables.pixels_per_meter;

        let mut destroyed = 0;
        if req.destroy_blocks {
            for (e, tf) in &q_breakable {
                if tf.translation.truncate().distance(req.location) <= radius
                    && destroyed_blocks.insert(e)
                {
                    commands.entity(e).try_despawn();
                    destroyed += 1;
                }
            }
        }

        if req.ignite {
            commands.spawn((
                Name::new("Fire"),
                Fire,
                Sprite {
                    color: Color::srgb(0.95, 0.3, 0.05),
                    custom_size: Some(Vec2::splat(radius.max(4.0))),
                    ..default()
                },
                Transform::from_translation(req.location.extend(0.5)),
                DespawnOnExit(GameState::InGame),
            ));
        }

        log.total += 1;
        log.blocks_destroyed += destroyed;
        log.last = Some(*req);
        debug!(
            location = ?req.location,
            power = req.power,
            destroyed,
            ignite = req.ignite,
            "explosion applied"
        );
    }
}
