//! End-to-end fireball flows on the deterministic app: activation, flight,
//! collision, expiry and shutdown, with collisions injected by hand.

mod common;

use std::time::Duration;

use avian2d::prelude::CollisionStart;
use bevy::prelude::*;

use bevy_fireballs::common::settings::FireballSettings;
use bevy_fireballs::common::state::GameState;
use bevy_fireballs::plugins::fireballs::cooldown::CooldownGate;
use bevy_fireballs::plugins::fireballs::messages::{
    ActivationRequest, ActivationSource, ActorNotice, NoticeKind, ReloadSettings,
};
use bevy_fireballs::plugins::fireballs::tag::FireballTag;
use bevy_fireballs::plugins::host::blast::{Breakable, ExplosionLog, ExplosionRequest, Fire};
use bevy_fireballs::plugins::host::explosives::{large_fireball_bundle, Explosive};
use bevy_fireballs::plugins::host::inventory::{Inventory, ItemKind, ItemStack};
use bevy_fireballs::plugins::host::protocol::{ClientPacket, PacketInbox, PacketLog};
use bevy_fireballs::plugins::host::{Actor, ActorDeparted, ActorId, Facing};

fn spawn_actor(app: &mut App, id: u64, charges: u32) -> Entity {
    app.world_mut()
        .spawn((
            Actor { id: ActorId(id) },
            Transform::default(),
            Facing(Vec2::X),
            Inventory {
                main_hand: Some(ItemStack::new(ItemKind::FireCharge, charges)),
                storage: Vec::new(),
            },
        ))
        .id()
}

fn activate(app: &mut App, actor: Entity) {
    app.world_mut().write_message(ActivationRequest {
        actor,
        source: ActivationSource::Interaction,
    });
    app.update();
}

fn fireballs(app: &mut App) -> Vec<Entity> {
    app.world_mut()
        .query_filtered::<Entity, With<FireballTag>>()
        .iter(app.world())
        .collect()
}

fn collide(app: &mut App, a: Entity, b: Entity) {
    app.world_mut().write_message(CollisionStart {
        collider1: a,
        collider2: b,
        body1: None,
        body2: None,
    });
}

fn explosions(app: &App) -> ExplosionLog {
    app.world().resource::<ExplosionLog>().clone()
}

#[test]
fn launch_collide_explode_once() {
    let mut app = common::app_deterministic(FireballSettings::default());
    let actor = spawn_actor(&mut app, 1, 5);

    activate(&mut app, actor);
    let [fireball] = fireballs(&mut app)[..] else {
        panic!("expected exactly one fireball");
    };
    assert_eq!(app.world().get::<Explosive>(fireball).unwrap().yield_power, 0.0);
    assert_eq!(
        app.world().get::<Inventory>(actor).unwrap().count(ItemKind::FireCharge),
        4
    );

    common::run_ticks(&mut app, 3);
    let wall = app.world_mut().spawn(Breakable).id();
    // Collision reported twice, both directions.
    collide(&mut app, fireball, wall);
    collide(&mut app, wall, fireball);
    common::run_ticks(&mut app, 1);

    assert!(app.world().get_entity(fireball).is_err());
    let log = explosions(&app);
    assert_eq!(log.total, 1);
    let last = log.last.unwrap();
    assert_eq!(last.power, 4.0);
    assert!(last.ignite);
    assert!(!last.destroy_blocks);
    assert_eq!(common::count::<Fire>(&mut app), 1);

    // The TTL task is still queued; it must find nothing to do.
    common::run_ticks(&mut app, 90);
    assert_eq!(explosions(&app).total, 1);
}

#[test]
fn second_activation_inside_cooldown_is_refused() {
    let mut app = common::app_deterministic(FireballSettings::default());
    let actor = spawn_actor(&mut app, 1, 5);

    activate(&mut app, actor);
    common::drain::<ActorNotice>(&mut app);
    common::run_ticks(&mut app, 20);
    activate(&mut app, actor);

    let notices = common::drain::<ActorNotice>(&mut app);
    let [ActorNotice { actor: who, kind: NoticeKind::Cooldown { remaining } }] = notices[..] else {
        panic!("expected one cooldown notice, got {notices:?}");
    };
    assert_eq!(who, actor);
    assert!(remaining > Duration::ZERO && remaining < Duration::from_secs(3));
    assert_eq!(fireballs(&mut app).len(), 1);
    assert_eq!(
        app.world().get::<Inventory>(actor).unwrap().count(ItemKind::FireCharge),
        4
    );

    // Past the cooldown the next one goes through.
    common::run_ticks(&mut app, 50);
    activate(&mut app, actor);
    assert_eq!(fireballs(&mut app).len(), 2);
}

#[test]
fn uncollided_fireball_expires_without_exploding() {
    let settings = FireballSettings {
        max_flight_ticks: 10,
        ..default()
    };
    let mut app = common::app_deterministic(settings);
    let actor = spawn_actor(&mut app, 1, 5);

    activate(&mut app, actor);
    let [fireball] = fireballs(&mut app)[..] else {
        panic!("expected exactly one fireball");
    };

    common::run_ticks(&mut app, 8);
    assert!(app.world().get_entity(fireball).is_ok());
    common::run_ticks(&mut app, 3);
    assert!(app.world().get_entity(fireball).is_err());
    assert_eq!(explosions(&app).total, 0);
}

#[test]
fn protocol_and_interaction_in_one_frame_fire_once() {
    let mut app = common::app_deterministic(FireballSettings::default());
    let actor = spawn_actor(&mut app, 7, 5);

    let tx = app.world().resource::<PacketInbox>().sender();
    tx.send(ClientPacket::UseItem { actor: ActorId(7) }).unwrap();
    tx.send(ClientPacket::SwingArm { actor: ActorId(7) }).unwrap();
    activate(&mut app, actor);

    assert_eq!(fireballs(&mut app).len(), 1);
    assert!(common::drain::<ActorNotice>(&mut app).is_empty());
    // The consumed UseItem never reaches default handling; the swing does.
    assert_eq!(
        *app.world().resource::<PacketLog>(),
        PacketLog { item_uses: 0, swings: 1 }
    );
}

#[test]
fn fireballs_from_elsewhere_keep_the_default_explosion() {
    let mut app = common::app_deterministic(FireballSettings::default());
    let stray = app
        .world_mut()
        .spawn(large_fireball_bundle(Vec2::new(100.0, 0.0), Vec2::X))
        .id();
    let wall = app.world_mut().spawn_empty().id();

    collide(&mut app, stray, wall);
    common::run_ticks(&mut app, 1);

    assert!(app.world().get_entity(stray).is_err());
    let last = explosions(&app).last.unwrap();
    assert_eq!(last.power, Explosive::LARGE_FIREBALL_YIELD);
    assert!(last.destroy_blocks);
}

#[test]
fn reload_changes_the_next_explosion() {
    let mut app = common::app_deterministic(FireballSettings::default());
    let actor = spawn_actor(&mut app, 1, 5);

    app.world_mut().write_message(ReloadSettings(FireballSettings {
        explosion_power: 2.0,
        set_fire: false,
        break_blocks: true,
        ..default()
    }));
    activate(&mut app, actor);
    let [fireball] = fireballs(&mut app)[..] else {
        panic!("expected exactly one fireball");
    };

    let wall = app.world_mut().spawn_empty().id();
    collide(&mut app, fireball, wall);
    common::run_ticks(&mut app, 1);

    assert_eq!(
        explosions(&app).last,
        Some(ExplosionRequest {
            location: Vec2::new(30.0, 0.0),
            power: 2.0,
            ignite: false,
            destroy_blocks: true,
        })
    );
}

#[test]
fn departure_and_shutdown_drop_cooldowns() {
    let mut app = common::app_deterministic(FireballSettings::default());
    let first = spawn_actor(&mut app, 1, 5);
    let second = spawn_actor(&mut app, 2, 5);

    activate(&mut app, first);
    activate(&mut app, second);
    assert_eq!(app.world().resource::<CooldownGate>().len(), 2);

    app.world_mut().write_message(ActorDeparted { actor: ActorId(1) });
    app.update();
    let gate = app.world().resource::<CooldownGate>().clone();
    assert_eq!(gate.len(), 1);
    assert_eq!(gate.last_activation(ActorId(1)), None);

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Closing);
    app.update();
    assert!(gate.is_empty());
    assert!(fireballs(&mut app).is_empty());
}
