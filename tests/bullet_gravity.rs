mod common;

use std::time::Duration;

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy_weapons::plugins::weapons::prelude::*;

fn bullets_of(app: &mut App, weapon: Entity) -> Vec<(Entity, Vec2, Vec2, BulletState)> {
    app.world_mut()
        .query::<(Entity, &Bullet, &Transform, &LinearVelocity, &BulletState)>()
        .iter(app.world())
        .filter(|(_, b, ..)| b.weapon == weapon)
        .map(|(e, _, tf, vel, state)| (e, tf.translation.truncate(), vel.0, *state))
        .collect()
}

#[test]
fn dormant_bullets_do_not_fall() {
    let mut app = common::app_stepped(Duration::from_millis(50));
    app.insert_resource(Gravity(Vec2::new(0.0, -500.0)));

    let weapon = app
        .world_mut()
        .spawn(weapon_bundle(WeaponConfig {
            pool_size: 3,
            bullet_gravity_scale: 1.0,
            bullet_kill_type: KillType::Never,
            fire_from: (0.0, -120.0),
            fire_angle: 180.0,
            ..default()
        }))
        .id();
    common::tick(&mut app, 10);

    for (_, pos, vel, _) in bullets_of(&mut app, weapon) {
        assert_eq!(vel, Vec2::ZERO);
        assert_eq!(pos, Vec2::ZERO);
    }

    app.world_mut().write_message(FireRequest::new(weapon));
    common::tick(&mut app, 1);
    let launched = bullets_of(&mut app, weapon)
        .into_iter()
        .find(|(.., s)| s.is_active())
        .map(|(_, _, vel, _)| vel)
        .unwrap();
    common::tick(&mut app, 5);

    let bullets = bullets_of(&mut app, weapon);
    let (active, dormant): (Vec<_>, Vec<_>) =
        bullets.into_iter().partition(|(.., s)| s.is_active());
    assert_eq!(active.len(), 1);
    assert!(active[0].2.y < launched.y - 1.0, "a live bullet falls");
    assert!(dormant.iter().all(|(_, pos, vel, _)| *vel == Vec2::ZERO && *pos == Vec2::ZERO));
}

#[test]
fn paused_bullets_hang_in_place() {
    let mut app = common::app_stepped(Duration::from_millis(50));
    app.insert_resource(Gravity(Vec2::new(0.0, -500.0)));

    let weapon = app
        .world_mut()
        .spawn(weapon_bundle(WeaponConfig {
            pool_size: 1,
            bullet_speed: 50.0,
            bullet_gravity_scale: 1.0,
            bullet_kill_type: KillType::Never,
            fire_from: (0.0, -120.0),
            fire_angle: 180.0,
            ..default()
        }))
        .id();
    common::tick(&mut app, 2);

    app.world_mut().write_message(FireRequest::new(weapon));
    common::tick(&mut app, 2);
    app.world_mut().write_message(WeaponControl {
        weapon,
        command: WeaponCommand::Pause,
    });
    common::tick(&mut app, 1);

    let (_, paused_at, ..) = bullets_of(&mut app, weapon)[0];
    common::tick(&mut app, 5);
    let (_, pos, vel, state) = bullets_of(&mut app, weapon)[0];

    assert!(state.is_active());
    assert_eq!(vel, Vec2::ZERO);
    assert!(pos.distance(paused_at) < 1e-3);
}
