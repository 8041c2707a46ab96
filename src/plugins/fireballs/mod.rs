//! Fireballs plugin: player-launched fireballs with a custom explosion.
//!
//! # Data flow
//! ```text
//!   Update (InGame)
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │  player::request_activation ──┐                                          │
//! │  intercept_use_item_packets ──┴─> ActivationRequest                      │
//! │                                      │                                   │
//! │  process_activations: dedupe per actor                                   │
//! │      -> CooldownGate::try_acquire   (Denied -> ActorNotice)              │
//! │      -> Inventory::consume_one      (empty  -> ActorNotice)              │
//! │      -> spawn_fireball: tag + zero yield + TTL task                      │
//! │                                                                          │
//! │  release_departed_actors / sweep_expired_cooldowns / apply_settings_reload│
//! └──────────────────────────────────────────────────────────────────────────┘
//!   FixedPreUpdate:  TTL task fires -> despawn if still a tagged fireball
//!   FixedPostUpdate: emit_projectile_signals
//!                    -> suppress_primed_fireballs
//!                    -> detonate_fireball_hits  (despawn + one ExplosionRequest)
//!                    -> detonate_primed (default; skips suppressed) -> apply_explosions
//! ```
//!
//! The cooldown table is the only state shared across threads. Everything else is either
//! a snapshot replaced on reload or owned by the fireball entity itself.

pub mod activation;
pub mod cooldown;
pub mod explosion;
pub mod lifecycle;
pub mod messages;
pub mod tag;

use bevy::prelude::*;

use crate::common::settings::FireballSettings;
use crate::common::state::GameState;
use crate::plugins::host::{explosives, protocol};

pub struct FireballsPlugin;

/// Swap in reloaded settings and rebuild everything derived from them.
pub fn apply_settings_reload(
    mut reloads: MessageReader<messages::ReloadSettings>,
    mut settings: ResMut<FireballSettings>,
    mut profile: ResMut<explosion::ExplosionProfile>,
    mut sweep: ResMut<cooldown::CooldownSweep>,
) {
    let Some(messages::ReloadSettings(next)) = reloads.read().last() else {
        return;
    };
    // Reloads built in code never went through the file parser.
    let next = next.clone().sanitized();

    *profile = explosion::ExplosionProfile::from_settings(&next);
    sweep.set_duration(next.sweep_interval());
    info!(
        cooldown_seconds = next.cooldown_seconds,
        explosion_power = next.explosion_power,
        set_fire = next.set_fire,
        break_blocks = next.break_blocks,
        max_flight_ticks = next.max_flight_ticks,
        "fireball settings reloaded"
    );
    *settings = next;
}

impl Plugin for FireballsPlugin {
    fn build(&self, app: &mut App) {
        let settings = app
            .world()
            .get_resource::<FireballSettings>()
            .cloned()
            .unwrap_or_default()
            .sanitized();

        app.insert_resource(explosion::ExplosionProfile::from_settings(&settings))
            .insert_resource(cooldown::CooldownSweep::every(settings.sweep_interval()))
            .init_resource::<cooldown::CooldownGate>()
            .insert_resource(settings.clone());

        app.add_message::<messages::ActivationRequest>()
            .add_message::<messages::ActorNotice>()
            .add_message::<messages::ReloadSettings>();

        app.add_systems(
            Update,
            (
                apply_settings_reload,
                activation::intercept_use_item_packets.before(protocol::handle_client_packets),
                activation::process_activations
                    .after(apply_settings_reload)
                    .after(activation::intercept_use_item_packets),
                cooldown::release_departed_actors,
                cooldown::sweep_expired_cooldowns,
            )
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(OnExit(GameState::InGame), cooldown::clear_cooldowns);

        app.add_systems(
            FixedPostUpdate,
            (explosion::suppress_primed_fireballs, explosion::detonate_fireball_hits)
                .chain()
                .after(explosives::emit_projectile_signals)
                .before(explosives::detonate_primed)
                .run_if(in_state(GameState::InGame)),
        );

        info!(
            explosion_power = settings.explosion_power,
            set_fire = settings.set_fire,
            "fireballs enabled"
        );
    }
}
