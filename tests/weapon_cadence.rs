mod common;

use std::time::Duration;

use bevy::prelude::*;
use bevy_weapons::plugins::weapons::prelude::*;

fn autofire_weapon(app: &mut App, config: WeaponConfig) -> Entity {
    let weapon = app
        .world_mut()
        .spawn(weapon_bundle(WeaponConfig {
            autofire: true,
            bullet_kill_type: KillType::Never,
            // Start away from the ship and the rocks.
            fire_from: (0.0, -120.0),
            fire_angle: 180.0,
            ..config
        }))
        .id();
    common::tick(app, 1);
    weapon
}

#[test]
fn autofire_respects_fire_rate() {
    let mut app = common::app_stepped(Duration::from_millis(100));
    let weapon = autofire_weapon(
        &mut app,
        WeaponConfig {
            pool_size: 5,
            fire_rate: 1.0,
            ..default()
        },
    );

    // ~1.5 s of game time: one shot at the start, one a second later.
    common::tick(&mut app, 14);

    let w = app.world().get::<Weapon>(weapon).unwrap();
    assert_eq!(w.shots(), 2);
    assert_eq!(app.world().get::<BulletPool>(weapon).unwrap().active_len(), 2);
}

#[test]
fn expired_bullets_are_reused() {
    let mut app = common::app_stepped(Duration::from_millis(100));
    let weapon = autofire_weapon(
        &mut app,
        WeaponConfig {
            pool_size: 1,
            fire_rate: 0.0,
            bullet_speed: 50.0,
            bullet_lifespan: 0.25,
            ..default()
        },
    );

    common::tick(&mut app, 10);

    let pool = app.world().get::<BulletPool>(weapon).unwrap();
    assert_eq!(pool.capacity(), 1);
    assert!(app.world().get::<Weapon>(weapon).unwrap().shots() >= 2);
}

#[test]
fn fire_limit_is_reported_once() {
    let mut app = common::app_stepped(Duration::from_millis(100));
    let weapon = autofire_weapon(
        &mut app,
        WeaponConfig {
            pool_size: 5,
            fire_rate: 0.0,
            fire_limit: 3,
            ..default()
        },
    );

    common::tick(&mut app, 5);

    let w = app.world().get::<Weapon>(weapon).unwrap();
    assert_eq!(w.shots(), 3);
    assert!(w.limit_reached());
}
