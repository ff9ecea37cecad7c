mod common;

use std::time::Duration;

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy_weapons::plugins::ship::ShipWeapon;
use bevy_weapons::plugins::weapons::prelude::*;
use bevy_weapons::plugins::world::Rock;

#[test]
fn bullet_hitting_a_rock_returns_to_the_pool() {
    let mut app = common::app_stepped(Duration::from_millis(50));
    common::tick(&mut app, 2);

    let weapon = common::single_entity::<With<ShipWeapon>>(&mut app);
    let rock = app
        .world_mut()
        .query_filtered::<Entity, With<Rock>>()
        .iter(app.world())
        .next()
        .unwrap();

    app.world_mut()
        .write_message(FireRequest::new(weapon).origin(Vec2::new(0.0, 100.0)));
    app.update();

    let bullet = app
        .world_mut()
        .query::<(Entity, &BulletState)>()
        .iter(app.world())
        .find(|(_, s)| s.is_active())
        .map(|(e, _)| e)
        .expect("a bullet should be in flight");

    // Inject the contact avian would report.
    app.world_mut().write_message(CollisionStart {
        collider1: bullet,
        collider2: rock,
        body1: Some(bullet),
        body2: Some(rock),
    });
    app.update();

    let state = *app.world().get::<BulletState>(bullet).unwrap();
    assert_eq!(state, BulletState::Dormant);
    assert_eq!(
        *app.world().get::<Visibility>(bullet).unwrap(),
        Visibility::Hidden
    );

    let pool = app.world().get::<BulletPool>(weapon).unwrap();
    assert_eq!(pool.free_len(), pool.capacity());
    assert!(app.world().get_entity(rock).is_ok());
}
