//! Identity and pose of whoever triggers an activation.

use bevy::prelude::*;

/// Stable id of an actor, independent of its ECS handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u64);

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Actor {
    pub id: ActorId,
}

/// Look direction in world space. Not required to be normalized.
#[derive(Component, Debug, Clone, Copy, PartialEq, Deref, DerefMut)]
pub struct Facing(pub Vec2);

impl Default for Facing {
    fn default() -> Self {
        Self(Vec2::Y)
    }
}

/// The actor left the game; any per-actor state may be dropped.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActorDeparted {
    pub actor: ActorId,
}
