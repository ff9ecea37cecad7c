use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

use avian2d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::prelude::*;

use super::{Ship, ShipInput, ShipWeapon};
use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::plugins::core::{fallback_loadout, WeaponLoadout};
use crate::plugins::weapons::prelude::{
    FireRequest, TrackTarget, Weapon, WeaponCommand, WeaponConfig, WeaponControl,
};

#[test]
fn spawn_mounts_a_tracking_weapon() {
    let mut world = World::new();
    world.insert_resource(WeaponLoadout(fallback_loadout()));
    run_system_once(&mut world, super::spawn);

    let ship = world
        .query_filtered::<Entity, With<Ship>>()
        .single(&world)
        .unwrap();
    let weapon = world
        .query_filtered::<&Weapon, With<ShipWeapon>>()
        .single(&world)
        .unwrap();

    assert_eq!(weapon.config.pool_size, 30);
    assert_eq!(
        weapon.tracking(),
        Some(TrackTarget::Entity {
            entity: ship,
            offset: super::MUZZLE,
            track_rotation: true,
        })
    );
}

#[test]
fn turning_sets_angular_velocity() {
    let mut world = World::new();
    world.init_resource::<Time>();
    world.insert_resource(Tunables::default());
    world.insert_resource(ShipInput {
        turn: -1.0,
        ..default()
    });
    world.spawn((Ship, Transform::default(), AngularVelocity::ZERO, LinearVelocity::ZERO));

    run_system_once(&mut world, super::apply_controls);

    let ang = world.query::<&AngularVelocity>().single(&world).unwrap();
    assert_eq!(ang.0, -Tunables::default().ship_turn_rate);
}

#[test]
fn thrust_accelerates_along_heading() {
    let mut world = World::new();
    world.init_resource::<Time>();
    world
        .resource_mut::<Time>()
        .advance_by(Duration::from_millis(100));
    world.insert_resource(Tunables {
        ship_thrust: 100.0,
        ..default()
    });
    world.insert_resource(ShipInput {
        thrust: true,
        ..default()
    });
    world.spawn((
        Ship,
        Transform::from_rotation(Quat::from_rotation_z(FRAC_PI_2)),
        AngularVelocity::ZERO,
        LinearVelocity::ZERO,
    ));

    run_system_once(&mut world, super::apply_controls);

    let vel = world.query::<&LinearVelocity>().single(&world).unwrap();
    assert!(vel.0.abs_diff_eq(Vec2::new(0.0, 10.0), 1e-4));
}

fn command_world(input: ShipInput) -> (World, Entity) {
    let mut world = World::new();
    world.init_resource::<Messages<FireRequest>>();
    world.init_resource::<Messages<WeaponControl>>();
    world.insert_resource(input);
    let weapon = world
        .spawn((ShipWeapon, Weapon::new(WeaponConfig::default())))
        .id();
    (world, weapon)
}

#[test]
fn held_fire_requests_a_shot_per_tick() {
    let (mut world, weapon) = command_world(ShipInput {
        fire: true,
        ..default()
    });

    run_system_once(&mut world, super::command_weapon);

    let requests: Vec<_> = world
        .resource_mut::<Messages<FireRequest>>()
        .drain()
        .collect();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].weapon, weapon);
}

#[test]
fn pause_key_pauses_a_running_weapon() {
    let (mut world, weapon) = command_world(ShipInput {
        toggle_pause: true,
        ..default()
    });

    run_system_once(&mut world, super::command_weapon);

    let controls: Vec<_> = world
        .resource_mut::<Messages<WeaponControl>>()
        .drain()
        .collect();
    assert_eq!(
        controls,
        vec![WeaponControl {
            weapon,
            command: WeaponCommand::Pause,
        }]
    );
    assert!(
        world
            .resource_mut::<Messages<FireRequest>>()
            .drain()
            .next()
            .is_none()
    );
}

#[test]
fn missing_keyboard_leaves_input_idle() {
    let mut world = World::new();
    world.insert_resource(ShipInput::default());

    run_system_once(&mut world, super::gather_input);

    let input = world.resource::<ShipInput>();
    assert_eq!(input.turn, 0.0);
    assert!(!input.fire);
}
