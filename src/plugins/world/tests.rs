use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::plugins::weapons::layers::Layer;

#[test]
fn spawns_walls_on_enter() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    run_system_once(&mut world, super::spawn_arena);

    let walls = world
        .query::<(&Name, &RigidBody)>()
        .iter(&world)
        .filter(|(n, rb)| n.as_str().starts_with("Wall") && matches!(**rb, RigidBody::Static))
        .count();
    assert_eq!(walls, 4);
}

#[test]
fn walls_sit_outside_world_bounds() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    run_system_once(&mut world, super::spawn_arena);

    let bounds = Tunables::default().world_bounds();
    for (tf, sprite) in world.query::<(&Transform, &Sprite)>().iter(&world) {
        let size = sprite.custom_size.unwrap();
        let wall = Rect::from_center_size(tf.translation.truncate(), size);
        assert!(wall.intersect(bounds).is_empty(), "wall overlaps the playfield");
    }
}

#[test]
fn rocks_are_bullet_targets() {
    let mut world = World::new();
    run_system_once(&mut world, super::spawn_rocks);

    let mut q = world.query_filtered::<&CollisionLayers, With<super::Rock>>();
    let rocks: Vec<_> = q.iter(&world).collect();
    assert_eq!(rocks.len(), super::ROCKS.len());
    assert!(
        rocks
            .iter()
            .all(|l| l.memberships.has_all(Layer::Target) && l.filters.has_all(Layer::Bullet))
    );
}
