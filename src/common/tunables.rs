//! Tunable engine constants.
//!
//! Gameplay values an operator may change live in `FireballSettings`; these are
//! the fixed scales of the simulated world.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    /// Pixels per block.
    pub pixels_per_meter: f32,
    pub player_speed: f32,
    /// Simulation ticks per second (fixed timestep).
    pub tick_hz: f64,
    /// Blast radius in blocks per unit of explosion power.
    pub blast_radius_per_power: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            player_speed: 420.0,
            tick_hz: 20.0,
            blast_radius_per_power: 1.5,
        }
    }
}

impl Tunables {
    /// Converts a per-tick distance in blocks into pixels per second.
    #[inline]
    pub fn blocks_per_tick_to_velocity(&self, blocks: f32) -> f32 {
        blocks * self.pixels_per_meter * self.tick_hz as f32
    }
}
