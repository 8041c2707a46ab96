//! Game composition root.
//!
//! Provides two public configuration functions:
//! - `configure_full`: DefaultPlugins (window/render/log) + settings file + game plugins.
//! - `configure_headless`: gameplay plugins only, for integration tests.

use std::path::PathBuf;

use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::common::settings::FireballSettings;
use crate::common::state::GameState;
use crate::plugins;
use crate::plugins::fireballs::messages::ReloadSettings;

/// Overrides the settings file location.
pub const CONFIG_ENV: &str = "FIREBALLS_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.yml";

/// Where `config.yml` is read from, at startup and on reload.
#[derive(Resource, Debug, Clone)]
pub struct ConfigPath(pub PathBuf);

impl Default for ConfigPath {
    fn default() -> Self {
        Self(
            std::env::var_os(CONFIG_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH)),
        )
    }
}

pub fn run() {
    App::new().add_plugins(configure_full).run();
}

/// Full configuration for `cargo run`.
pub fn configure_full(app: &mut App) {
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Fireballs".into(),
            resolution: WindowResolution::new(1280, 720),
            ..default()
        }),
        ..default()
    }));

    // After DefaultPlugins so the warning for a bad file reaches the log.
    let config = ConfigPath::default();
    app.insert_resource(FireballSettings::load_or_default(&config.0))
        .insert_resource(config)
        .add_systems(Update, reload_on_f5.run_if(in_state(GameState::InGame)));

    configure_game(app);
    plugins::register_render(app);
}

/// Headless configuration for integration tests.
///
/// Notes:
/// - Do NOT add DefaultPlugins.
/// - Do NOT add render-only plugins (camera).
/// - Settings stay at their defaults unless the caller inserted some first.
pub fn configure_headless(app: &mut App) {
    configure_game(app);
}

/// Configuration shared by both full and headless apps.
fn configure_game(app: &mut App) {
    app.init_state::<GameState>();
    plugins::register_gameplay(app);
}

fn reload_on_f5(
    keys: Res<ButtonInput<KeyCode>>,
    config: Res<ConfigPath>,
    mut reloads: MessageWriter<ReloadSettings>,
) {
    if keys.just_pressed(KeyCode::F5) {
        info!(path = %config.0.display(), "reloading fireball settings");
        reloads.write(ReloadSettings::from_file(&config.0));
    }
}
