//! Per-actor activation cooldown.
//!
//! The table is the one piece of state touched by many workers at once, so it lives in a
//! sharded concurrent map and every mutation goes through a single shard-locked operation.
//! Timestamps are elapsed simulation time supplied by the caller, which keeps the gate
//! independent of any clock.

use std::sync::Arc;
use std::time::Duration;

use bevy::prelude::*;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::common::settings::FireballSettings;
use crate::plugins::host::{ActorDeparted, ActorId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Acquire {
    Granted,
    Denied { remaining: Duration },
}

impl Acquire {
    #[inline]
    pub fn is_granted(self) -> bool {
        matches!(self, Acquire::Granted)
    }
}

/// Cheap to clone; clones share the same table.
#[derive(Resource, Clone, Default)]
pub struct CooldownGate {
    last_activation: Arc<DashMap<ActorId, Duration>>,
}

impl std::fmt::Debug for CooldownGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CooldownGate")
            .field("entries", &self.last_activation.len())
            .finish()
    }
}

impl CooldownGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check and record an activation in one step.
    ///
    /// A zero `cooldown` disables the gate and writes nothing. A `now` earlier than the
    /// stored timestamp counts as zero elapsed time, so stored timestamps never go back.
    pub fn try_acquire(&self, actor: ActorId, now: Duration, cooldown: Duration) -> Acquire {
        if cooldown.is_zero() {
            return Acquire::Granted;
        }

        // The shard write lock is held from lookup to store.
        match self.last_activation.entry(actor) {
            Entry::Vacant(slot) => {
                slot.insert(now);
                Acquire::Granted
            }
            Entry::Occupied(mut slot) => {
                let elapsed = now.saturating_sub(*slot.get());
                if elapsed >= cooldown {
                    slot.insert(now);
                    Acquire::Granted
                } else {
                    Acquire::Denied {
                        remaining: cooldown - elapsed,
                    }
                }
            }
        }
    }

    /// Forget `actor`. Returns whether an entry existed.
    pub fn release(&self, actor: ActorId) -> bool {
        self.last_activation.remove(&actor).is_some()
    }

    /// Drop entries older than `cooldown`. Entries added concurrently may or may not be seen.
    pub fn sweep_expired(&self, now: Duration, cooldown: Duration) -> usize {
        let mut removed = 0;
        self.last_activation.retain(|_, last| {
            let keep = now.saturating_sub(*last) <= cooldown;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    pub fn clear(&self) -> usize {
        let count = self.last_activation.len();
        self.last_activation.clear();
        count
    }

    pub fn last_activation(&self, actor: ActorId) -> Option<Duration> {
        self.last_activation.get(&actor).map(|entry| *entry)
    }

    pub fn len(&self) -> usize {
        self.last_activation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_activation.is_empty()
    }
}

/// Repeating timer driving `sweep_expired_cooldowns`.
#[derive(Resource, Debug, Deref, DerefMut)]
pub struct CooldownSweep(pub Timer);

impl CooldownSweep {
    pub fn every(interval: Duration) -> Self {
        Self(Timer::new(interval, TimerMode::Repeating))
    }
}

pub fn release_departed_actors(mut departed: MessageReader<ActorDeparted>, gate: Res<CooldownGate>) {
    for ev in departed.read() {
        if gate.release(ev.actor) {
            debug!("released cooldown of departed {}", ev.actor);
        }
    }
}

pub fn sweep_expired_cooldowns(
    time: Res<Time>,
    settings: Res<FireballSettings>,
    gate: Res<CooldownGate>,
    mut sweep: ResMut<CooldownSweep>,
) {
    if !sweep.tick(time.delta()).just_finished() {
        return;
    }
    let removed = gate.sweep_expired(time.elapsed(), settings.cooldown());
    if removed > 0 {
        debug!("removed {removed} expired cooldown entries");
    }
}

pub fn clear_cooldowns(gate: Res<CooldownGate>) {
    let removed = gate.clear();
    info!("cooldowns cleared: {removed} entries removed");
}
