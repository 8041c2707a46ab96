//! Raw client packets.
//!
//! Network threads push into the inbox through a cloned `Sender`; the simulation drains it
//! from inside the schedule, so everything a packet causes happens on the simulation side.
//!
//! Interceptors drain the inbox first. Whatever they do not consume is written back out as
//! a `ClientPacket` message and handled here with the world's default behaviour.

use bevy::prelude::*;
use crossbeam_channel::{unbounded, Receiver, Sender};

use super::actor::ActorId;

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientPacket {
    /// Right click with the main hand, sent even when no block or entity is targeted.
    UseItem { actor: ActorId },
    SwingArm { actor: ActorId },
}

#[derive(Resource)]
pub struct PacketInbox {
    tx: Sender<ClientPacket>,
    rx: Receiver<ClientPacket>,
}

impl Default for PacketInbox {
    fn default() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }
}

impl PacketInbox {
    pub fn sender(&self) -> Sender<ClientPacket> {
        self.tx.clone()
    }

    /// Everything received so far; never blocks.
    pub fn drain(&self) -> impl Iterator<Item = ClientPacket> + '_ {
        self.rx.try_iter()
    }
}

/// Packets that reached default handling.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct PacketLog {
    pub item_uses: u64,
    pub swings: u64,
}

/// Default handling for packets no interceptor consumed.
pub fn handle_client_packets(mut packets: MessageReader<ClientPacket>, mut log: ResMut<PacketLog>) {
    for packet in packets.read() {
        match *packet {
            ClientPacket::UseItem { actor } => {
                log.item_uses += 1;
                debug!(%actor, "item used");
            }
            ClientPacket::SwingArm { actor } => {
                log.swings += 1;
                debug!(%actor, "arm swung");
            }
        }
    }
}
