//! Core plugin: shared resources every other plugin reads at build time.
//!
//! `FireballSettings` is only defaulted here; the composition root inserts the loaded
//! file first when there is one.

use bevy::prelude::*;

use crate::common::{settings::FireballSettings, tunables::Tunables};

pub fn plugin(app: &mut App) {
    app.init_resource::<Tunables>()
        .init_resource::<FireballSettings>()
        .insert_resource(ClearColor(Color::srgb(0.09, 0.06, 0.05)));
}
