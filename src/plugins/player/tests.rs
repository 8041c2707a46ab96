use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::test_utils::{drain_messages, ensure_messages, run_system_once};
use crate::common::tunables::Tunables;
use crate::plugins::fireballs::messages::{ActivationRequest, ActivationSource};
use crate::plugins::host::inventory::{Inventory, ItemKind};
use crate::plugins::host::{Actor, ActorId, Facing};

use super::{Player, PlayerInput, STARTING_CHARGES};

#[test]
fn spawn_creates_an_armed_actor() {
    let mut world = World::new();
    run_system_once(&mut world, super::spawn);

    let (actor, inventory) = world
        .query_filtered::<(&Actor, &Inventory), With<Player>>()
        .single(&world)
        .unwrap();
    assert_eq!(actor.id, ActorId(1));
    assert!(inventory.holding(ItemKind::FireCharge));
    assert_eq!(inventory.count(ItemKind::FireCharge), STARTING_CHARGES);
}

#[test]
fn apply_movement_sets_velocity() {
    let mut world = World::new();
    world.insert_resource(Tunables { player_speed: 100.0, ..default() });
    world.insert_resource(PlayerInput { move_axis: Vec2::new(1.0, 0.0), ..default() });
    world.spawn((Player, LinearVelocity::ZERO));

    run_system_once(&mut world, super::apply_movement);

    let v = world.query::<&LinearVelocity>().iter(&world).next().unwrap();
    assert_eq!(v.0, Vec2::new(100.0, 0.0));
}

#[test]
fn facing_turns_toward_the_cursor() {
    let mut world = World::new();
    world.insert_resource(PlayerInput { aim: Some(Vec2::new(10.0, 10.0)), ..default() });
    let player = world
        .spawn((Player, Transform::from_xyz(10.0, 0.0, 1.0), Facing::default()))
        .id();

    run_system_once(&mut world, super::face_cursor);
    assert_eq!(world.get::<Facing>(player).unwrap().0, Vec2::Y);

    // Cursor on top of the player: keep the previous facing.
    world.resource_mut::<PlayerInput>().aim = Some(Vec2::new(10.0, 0.0));
    run_system_once(&mut world, super::face_cursor);
    assert_eq!(world.get::<Facing>(player).unwrap().0, Vec2::Y);
}

fn armed_world(fire: bool) -> (World, Entity) {
    let mut world = World::new();
    ensure_messages::<ActivationRequest>(&mut world);
    world.insert_resource(PlayerInput { fire, ..default() });
    run_system_once(&mut world, super::spawn);
    let player = world.query_filtered::<Entity, With<Player>>().single(&world).unwrap();
    (world, player)
}

#[test]
fn right_click_with_a_fire_charge_requests_activation() {
    let (mut world, player) = armed_world(true);

    run_system_once(&mut world, super::request_activation);

    assert_eq!(
        drain_messages::<ActivationRequest>(&mut world),
        vec![ActivationRequest { actor: player, source: ActivationSource::Interaction }]
    );
}

#[test]
fn no_request_without_click_or_charge() {
    let (mut world, player) = armed_world(false);
    run_system_once(&mut world, super::request_activation);
    assert!(drain_messages::<ActivationRequest>(&mut world).is_empty());

    world.resource_mut::<PlayerInput>().fire = true;
    world.get_mut::<Inventory>(player).unwrap().main_hand = None;
    run_system_once(&mut world, super::request_activation);
    assert!(drain_messages::<ActivationRequest>(&mut world).is_empty());
}
