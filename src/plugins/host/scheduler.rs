//! Simulation clock and the per-entity deferred task queue.
//!
//! Tasks are keyed to an entity handle but the queue does not follow the entity's
//! lifetime: a task whose entity has been despawned still runs, and must treat the
//! vanished handle as a no-op.

use bevy::prelude::*;

/// Fixed steps completed since startup.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SimulationTick(pub u64);

impl SimulationTick {
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

pub type EntityTask = Box<dyn FnOnce(&mut World, Entity) + Send + Sync>;

struct ScheduledTask {
    due: u64,
    entity: Entity,
    task: EntityTask,
}

/// Queue ordered by due tick; equal due ticks keep submission order.
#[derive(Resource, Default)]
pub struct EntityScheduler {
    queue: Vec<ScheduledTask>,
}

impl std::fmt::Debug for EntityScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityScheduler")
            .field("pending", &self.queue.len())
            .field("next_due", &self.next_due())
            .finish()
    }
}

impl EntityScheduler {
    /// Run `task` for `entity` once `delay_ticks` more steps have completed.
    /// Returns the due tick. A zero delay is treated as one tick.
    pub fn run_delayed(
        &mut self,
        now: u64,
        entity: Entity,
        delay_ticks: u32,
        task: impl FnOnce(&mut World, Entity) + Send + Sync + 'static,
    ) -> u64 {
        let due = now + u64::from(delay_ticks.max(1));
        let at = self.queue.partition_point(|t| t.due <= due);
        self.queue.insert(
            at,
            ScheduledTask {
                due,
                entity,
                task: Box::new(task),
            },
        );
        due
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn next_due(&self) -> Option<u64> {
        self.queue.first().map(|t| t.due)
    }

    fn take_due(&mut self, now: u64) -> Vec<ScheduledTask> {
        let split = self.queue.partition_point(|t| t.due <= now);
        self.queue.drain(..split).collect()
    }
}

pub fn advance_tick(mut tick: ResMut<SimulationTick>) {
    tick.0 += 1;
}

/// Exclusive: tasks get the whole world.
pub fn run_due_tasks(world: &mut World) {
    let now = world.resource::<SimulationTick>().get();
    let due = world.resource_mut::<EntityScheduler>().take_due(now);
    for ScheduledTask { entity, task, .. } in due {
        task(world, entity);
    }
}
