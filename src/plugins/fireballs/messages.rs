//! Messages in and out of the fireball pipeline.
//!
//! Both activation channels produce the same `ActivationRequest`; the consumer decides.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use bevy::prelude::*;

use crate::common::settings::FireballSettings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivationSource {
    /// Right click on the player entity.
    Interaction,
    /// An intercepted `UseItem` packet.
    Protocol,
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivationRequest {
    pub actor: Entity,
    pub source: ActivationSource,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Cooldown { remaining: Duration },
    OutOfAmmo,
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeKind::Cooldown { remaining } => {
                // Round up so the last fraction of a second never reads "0s".
                let secs = remaining.as_millis().div_ceil(1000);
                write!(f, "Wait {secs}s before using it again!")
            }
            NoticeKind::OutOfAmmo => f.write_str("You need a fire charge as ammunition!"),
        }
    }
}

/// Fire-and-forget text for one actor.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActorNotice {
    pub actor: Entity,
    pub kind: NoticeKind,
}

/// Replace the active settings. The last reload in a frame wins.
#[derive(Message, Clone, Debug, PartialEq)]
pub struct ReloadSettings(pub FireballSettings);

impl ReloadSettings {
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self(FireballSettings::load_or_default(path))
    }
}
