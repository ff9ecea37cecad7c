//! Lighting plugin (Firefly) (render-only).
//!
//! A light rides on the ship and flares briefly every time a bullet leaves the
//! weapon.

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::plugins::ship::{Ship, ShipWeapon};
use crate::plugins::weapons::prelude::BulletFired;

const BASE_RANGE: f32 = 450.0;
const FLASH_RANGE: f32 = 620.0;

#[derive(Component)]
pub struct ShipLight {
    flash: Timer,
}

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(OnEnter(GameState::InGame), setup)
        .add_systems(Update, (follow_ship_light, muzzle_flash).chain());
}

fn setup(mut commands: Commands) {
    // Start expired so the light comes up at its base range.
    let mut flash = Timer::from_seconds(0.06, TimerMode::Once);
    flash.tick(Duration::from_secs(1));

    commands.spawn((
        Name::new("ShipLight"),
        ShipLight { flash },
        PointLight2d {
            color: Color::srgb(1.0, 0.9, 0.75),
            radius: BASE_RANGE,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 10.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_ship_light(
    q_ship: Query<&Transform, (With<Ship>, Without<ShipLight>)>,
    mut q_light: Query<&mut Transform, (With<ShipLight>, Without<Ship>)>,
) {
    let (Ok(tf_ship), Ok(mut tf_light)) = (q_ship.single(), q_light.single_mut()) else {
        return;
    };

    tf_light.translation.x = tf_ship.translation.x;
    tf_light.translation.y = tf_ship.translation.y;
}

fn muzzle_flash(
    time: Res<Time>,
    mut fired: MessageReader<BulletFired>,
    q_weapons: Query<(), With<ShipWeapon>>,
    mut q_light: Query<(&mut ShipLight, &mut PointLight2d)>,
) {
    let Ok((mut light, mut point)) = q_light.single_mut() else {
        return;
    };

    if fired.read().any(|f| q_weapons.contains(f.weapon)) {
        light.flash.reset();
    }

    light.flash.tick(time.delta());
    point.radius = if light.flash.is_finished() {
        BASE_RANGE
    } else {
        FLASH_RANGE
    };
}
