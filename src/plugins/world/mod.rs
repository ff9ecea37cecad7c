//! World plugin: arena walls just outside the world bounds, plus a few static rocks
//! for the ship to shoot at.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{state::GameState, tunables::Tunables};
use crate::plugins::weapons::layers::Layer;

const WALL_THICKNESS: f32 = 30.0;

/// (position, radius)
const ROCKS: [(Vec2, f32); 4] = [
    (Vec2::new(-250.0, 200.0), 40.0),
    (Vec2::new(260.0, 180.0), 28.0),
    (Vec2::new(-180.0, -260.0), 34.0),
    (Vec2::new(220.0, -220.0), 46.0),
];

#[derive(Component)]
pub struct Rock;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), (spawn_arena, spawn_rocks));
}

fn spawn_arena(mut commands: Commands, tunables: Res<Tunables>) {
    let wall_color = Color::srgb(0.25, 0.27, 0.33);
    let half = tunables.world_size * 0.5;
    let t = WALL_THICKNESS;

    let wall_layers = CollisionLayers::new(Layer::World, [Layer::Ship, Layer::Bullet]);

    let mut spawn_wall = |name: &str, pos: Vec2, size: Vec2| {
        commands.spawn((
            Name::new(name.to_string()),
            Sprite {
                color: wall_color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(pos.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            wall_layers,
            DespawnOnExit(GameState::InGame),
        ));
    };

    let horizontal = Vec2::new(half.x * 2.0 + t * 2.0, t);
    let vertical = Vec2::new(t, half.y * 2.0);

    spawn_wall("WallTop", Vec2::new(0.0, half.y + t * 0.5), horizontal);
    spawn_wall("WallBottom", Vec2::new(0.0, -half.y - t * 0.5), horizontal);
    spawn_wall("WallLeft", Vec2::new(-half.x - t * 0.5, 0.0), vertical);
    spawn_wall("WallRight", Vec2::new(half.x + t * 0.5, 0.0), vertical);
}

fn spawn_rocks(mut commands: Commands) {
    let layers = CollisionLayers::new(Layer::Target, [Layer::Ship, Layer::Bullet]);

    for (i, (pos, radius)) in ROCKS.into_iter().enumerate() {
        commands.spawn((
            Name::new(format!("Rock{i}")),
            Rock,
            Sprite {
                color: Color::srgb(0.45, 0.38, 0.32),
                custom_size: Some(Vec2::splat(radius * 2.0)),
                ..default()
            },
            Transform::from_translation(pos.extend(0.5)),
            RigidBody::Static,
            Collider::circle(radius),
            layers,
            CollisionEventsEnabled,
            DespawnOnExit(GameState::InGame),
        ));
    }
}

#[cfg(test)]
mod tests;
