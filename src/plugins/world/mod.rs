//! World plugin: arena walls, a floor grid and rows of breakable crates.
//!
//! Crates are the blocks an explosion can destroy when `break-blocks` is on.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::host::blast::Breakable;

const TILE: i32 = 64;
const HALF_W: i32 = TILE * 16;
const HALF_H: i32 = TILE * 9;

/// Crate rows, as (y in tiles, first x, last x).
const CRATE_ROWS: [(i32, i32, i32); 3] = [(4, -6, 6), (-4, -6, 6), (0, 8, 12)];

pub fn plugin(app: &mut App) {
    app.add_systems(
        OnEnter(GameState::InGame),
        (spawn_arena, spawn_floor, spawn_crates),
    );
}

fn world_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::World, [Layer::Player, Layer::Projectile])
}

fn spawn_arena(mut commands: Commands) {
    let wall_color = Color::srgb(0.25, 0.27, 0.33);
    let thickness = 30.0;
    let (half_w, half_h) = (HALF_W as f32, HALF_H as f32);

    let walls = [
        ("WallTop", Vec3::new(0.0, half_h + thickness * 0.5, 0.0), Vec2::new(half_w * 2.0 + thickness * 2.0, thickness)),
        ("WallBottom", Vec3::new(0.0, -half_h - thickness * 0.5, 0.0), Vec2::new(half_w * 2.0 + thickness * 2.0, thickness)),
        ("WallLeft", Vec3::new(-half_w - thickness * 0.5, 0.0, 0.0), Vec2::new(thickness, half_h * 2.0)),
        ("WallRight", Vec3::new(half_w + thickness * 0.5, 0.0, 0.0), Vec2::new(thickness, half_h * 2.0)),
    ];

    for (name, pos, size) in walls {
        commands.spawn((
            Name::new(name),
            Sprite {
                color: wall_color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(pos),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            world_layers(),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

/// One crate per block along each row; a crate is one block wide.
fn spawn_crates(mut commands: Commands, tunables: Res<Tunables>) {
    let block = tunables.pixels_per_meter;
    let crate_color = Color::srgb(0.55, 0.38, 0.2);

    for (row, first, last) in CRATE_ROWS {
        let y = (row * TILE) as f32;
        for x in (first * TILE..=last * TILE).step_by(block as usize) {
            commands.spawn((
                Name::new("Crate"),
                Breakable,
                Sprite::from_color(crate_color, Vec2::splat(block)),
                Transform::from_xyz(x as f32, y, 0.5),
                RigidBody::Static,
                Collider::rectangle(block, block),
                world_layers(),
                DespawnOnExit(GameState::InGame),
            ));
        }
    }
}

fn spawn_floor(mut commands: Commands) {
    (-(HALF_H / TILE)..=HALF_H / TILE)
        .flat_map(|y| (-(HALF_W / TILE)..=HALF_W / TILE).map(move |x| (x, y)))
        .for_each(|(x, y)| {
            let world_pos = Vec3::new(x as f32 * TILE as f32, y as f32 * TILE as f32, 0.0);
            let color = if (x + y) % 2 == 0 {
                Color::srgb(0.16, 0.13, 0.12)
            } else {
                Color::srgb(0.14, 0.11, 0.10)
            };

            commands.spawn((
                Sprite::from_color(color, Vec2::splat(TILE as f32)),
                Transform::from_translation(world_pos),
                DespawnOnExit(GameState::InGame),
            ));
        });
}
