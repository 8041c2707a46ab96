//! Global state machine.
//!
//! `Closing` plays the role of a plugin shutdown: leaving `InGame` drops all
//! per-actor bookkeeping.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
    Closing,
}
