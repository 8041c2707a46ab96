//! Player plugin: the locally controlled actor.
//!
//! Pipeline:
//! - Update: sample keys/mouse into `PlayerInput`, turn `Facing` toward the cursor,
//!   right click -> `ActivationRequest` (interaction channel)
//! - FixedUpdate: apply velocity to the kinematic rigid body
//! - Update: log any `ActorNotice` addressed to the player
//!
//! The cursor is read through the main camera; without a window or camera (headless)
//! the aim simply never updates.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy::window::PrimaryWindow;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::camera::MainCamera;
use crate::plugins::fireballs::activation::process_activations;
use crate::plugins::fireballs::messages::{ActivationRequest, ActivationSource, ActorNotice};
use crate::plugins::host::inventory::{Inventory, ItemKind, ItemStack};
use crate::plugins::host::{Actor, ActorId, Facing};

/// Fire charges the player starts with.
pub const STARTING_CHARGES: u32 = 16;

#[derive(Component)]
pub struct Player;

#[derive(Resource, Default, Debug)]
struct PlayerInput {
    move_axis: Vec2,
    /// Cursor position in world space, if known this frame.
    aim: Option<Vec2>,
    fire: bool,
}

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerInput::default())
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(
            Update,
            (
                (gather_input, track_cursor, face_cursor).chain(),
                request_activation
                    .after(gather_input)
                    .before(process_activations),
                show_notices.after(process_activations),
            )
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(FixedUpdate, apply_movement);
}

fn spawn(mut commands: Commands) {
    let layers = CollisionLayers::new(Layer::Player, [Layer::World, Layer::Projectile]);

    commands.spawn((
        Name::new("Player"),
        Player,
        Actor { id: ActorId(1) },
        Facing::default(),
        Inventory {
            main_hand: Some(ItemStack::new(ItemKind::FireCharge, STARTING_CHARGES)),
            storage: vec![Some(ItemStack::new(ItemKind::Stick, 4)), None, None],
        },
        Sprite {
            color: Color::srgb(0.95, 0.6, 0.2),
            custom_size: Some(Vec2::splat(26.0)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 1.0),
        RigidBody::Kinematic,
        Collider::circle(13.0),
        layers,
        LinearVelocity::ZERO,
        DespawnOnExit(GameState::InGame),
    ));
}

fn gather_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut input: ResMut<PlayerInput>,
) {
    let mut axis = Vec2::ZERO;

    if keys.pressed(KeyCode::KeyW) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        axis.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        axis.x += 1.0;
    }

    input.move_axis = axis.normalize_or_zero();
    input.fire = mouse.just_pressed(MouseButton::Right);
}

fn track_cursor(
    q_window: Query<&Window, With<PrimaryWindow>>,
    q_cam: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut input: ResMut<PlayerInput>,
) {
    let (Ok(window), Ok((camera, cam_tf))) = (q_window.single(), q_cam.single()) else {
        input.aim = None;
        return;
    };
    input.aim = window
        .cursor_position()
        .and_then(|cursor| camera.viewport_to_world_2d(cam_tf, cursor).ok());
}

fn face_cursor(input: Res<PlayerInput>, mut q_player: Query<(&Transform, &mut Facing), With<Player>>) {
    let (Some(aim), Ok((tf, mut facing))) = (input.aim, q_player.single_mut()) else {
        return;
    };
    if let Some(dir) = (aim - tf.translation.truncate()).try_normalize() {
        facing.0 = dir;
    }
}

/// Right click with a fire charge in hand.
fn request_activation(
    input: Res<PlayerInput>,
    q_player: Query<(Entity, &Inventory), With<Player>>,
    mut requests: MessageWriter<ActivationRequest>,
) {
    if !input.fire {
        return;
    }
    let Ok((entity, inventory)) = q_player.single() else {
        return;
    };
    if inventory.holding(ItemKind::FireCharge) {
        requests.write(ActivationRequest {
            actor: entity,
            source: ActivationSource::Interaction,
        });
    }
}

fn show_notices(mut notices: MessageReader<ActorNotice>, q_player: Query<&Actor, With<Player>>) {
    for notice in notices.read() {
        if let Ok(actor) = q_player.get(notice.actor) {
            info!(actor = %actor.id, "{}", notice.kind);
        }
    }
}

fn apply_movement(
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut q_player: Query<&mut LinearVelocity, With<Player>>,
) {
    let Ok(mut vel) = q_player.single_mut() else {
        return;
    };
    vel.0 = input.move_axis * tunables.player_speed;
}

#[cfg(test)]
mod tests;
