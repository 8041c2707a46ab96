//! Activation funnel: both input channels, one path to a fireball.
//!
//! An actor gets at most one activation per run of `process_activations`, whichever
//! channel delivered it and however many times. Across runs the cooldown gate decides.
//! The cooldown is charged before ammunition is checked.

use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::{settings::FireballSettings, tunables::Tunables};
use crate::plugins::host::inventory::{Inventory, ItemKind};
use crate::plugins::host::protocol::{ClientPacket, PacketInbox};
use crate::plugins::host::scheduler::{EntityScheduler, SimulationTick};
use crate::plugins::host::{Actor, Facing};

use super::cooldown::{Acquire, CooldownGate};
use super::lifecycle::{spawn_fireball, ActorPose, FireballLaunch};
use super::messages::{ActivationRequest, ActivationSource, ActorNotice, NoticeKind};

/// Turn `UseItem` packets from actors holding a fire charge into activation requests.
/// Every other packet is passed on untouched as a `ClientPacket` message.
pub fn intercept_use_item_packets(
    inbox: Res<PacketInbox>,
    q_actors: Query<(Entity, &Actor, &Inventory)>,
    mut requests: MessageWriter<ActivationRequest>,
    mut passthrough: MessageWriter<ClientPacket>,
) {
    for packet in inbox.drain() {
        let armed = match packet {
            ClientPacket::UseItem { actor } => q_actors
                .iter()
                .find(|(_, a, inv)| a.id == actor && inv.holding(ItemKind::FireCharge))
                .map(|(entity, ..)| entity),
            ClientPacket::SwingArm { .. } => None,
        };
        match armed {
            Some(actor) => {
                requests.write(ActivationRequest {
                    actor,
                    source: ActivationSource::Protocol,
                });
            }
            None => {
                passthrough.write(packet);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn process_activations(
    mut commands: Commands,
    mut requests: MessageReader<ActivationRequest>,
    mut q_actors: Query<(&Actor, &Transform, &Facing, &mut Inventory)>,
    gate: Res<CooldownGate>,
    settings: Res<FireballSettings>,
    tunables: Res<Tunables>,
    time: Res<Time>,
    tick: Res<SimulationTick>,
    mut scheduler: ResMut<EntityScheduler>,
    mut notices: MessageWriter<ActorNotice>,
    mut handled: Local<HashSet<Entity>>,
) {
    handled.clear();
    let now = time.elapsed();
    let cooldown = settings.cooldown();

    for req in requests.read() {
        if !handled.insert(req.actor) {
            debug!(source = ?req.source, actor = ?req.actor, "duplicate activation dropped");
            continue;
        }
        let Ok((actor, tf, facing, mut inventory)) = q_actors.get_mut(req.actor) else {
            continue;
        };

        if let Acquire::Denied { remaining } = gate.try_acquire(actor.id, now, cooldown) {
            notices.write(ActorNotice {
                actor: req.actor,
                kind: NoticeKind::Cooldown { remaining },
            });
            continue;
        }

        if !inventory.consume_one(ItemKind::FireCharge) {
            notices.write(ActorNotice {
                actor: req.actor,
                kind: NoticeKind::OutOfAmmo,
            });
            continue;
        }

        let launch = FireballLaunch {
            owner: req.actor,
            owner_id: actor.id,
            pose: ActorPose {
                eye: tf.translation.truncate(),
                look: facing.0,
            },
            ttl_ticks: settings.max_flight_ticks,
        };
        spawn_fireball(&mut commands, &mut scheduler, *tick, &tunables, launch);
    }
}
