//! Ship plugin.
//!
//! Pipeline:
//! - Update: sample keys into `ShipInput`, then turn a held fire key into `FireRequest`s
//!   (the weapon's cadence throttles them) and `P` into pause/resume
//! - FixedUpdate: turn and thrust the dynamic body
//!
//! Input is optional so headless apps (no `InputPlugin`) run the same systems.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{state::GameState, tunables::Tunables};
use crate::plugins::core::WeaponLoadout;
use crate::plugins::weapons::layers::Layer;
use crate::plugins::weapons::prelude::{
    BulletPool, FireRequest, Weapon, WeaponCommand, WeaponControl, WeaponSystems,
};

/// Muzzle position relative to the ship, in ship space.
const MUZZLE: Vec2 = Vec2::new(18.0, 0.0);

#[derive(Component)]
pub struct Ship;

/// Marks the weapon mounted on the ship.
#[derive(Component)]
pub struct ShipWeapon;

#[derive(Resource, Default, Debug)]
struct ShipInput {
    /// +1 counter-clockwise, -1 clockwise.
    turn: f32,
    thrust: bool,
    fire: bool,
    toggle_pause: bool,
}

pub fn plugin(app: &mut App) {
    app.insert_resource(ShipInput::default())
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(
            Update,
            (gather_input, command_weapon)
                .chain()
                .before(WeaponSystems::Fire)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(FixedUpdate, apply_controls);
}

fn spawn(mut commands: Commands, loadout: Res<WeaponLoadout>) {
    let ship = commands
        .spawn((
            Name::new("Ship"),
            Ship,
            Sprite {
                color: Color::srgb(0.2, 0.75, 0.9),
                custom_size: Some(Vec2::new(32.0, 20.0)),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, 1.0),
            RigidBody::Dynamic,
            Collider::circle(12.0),
            CollisionLayers::new(Layer::Ship, [Layer::World, Layer::Target]),
            LinearVelocity::ZERO,
            AngularVelocity::ZERO,
            LinearDamping(0.4),
            DespawnOnExit(GameState::InGame),
        ))
        .id();

    let mut weapon = Weapon::new(loadout.0.clone());
    weapon.track_entity(ship, MUZZLE, true);

    commands.spawn((
        Name::new("ShipWeapon"),
        ShipWeapon,
        weapon,
        BulletPool::default(),
        DespawnOnExit(GameState::InGame),
    ));
}

fn gather_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut input: ResMut<ShipInput>) {
    let Some(keys) = keys else {
        return;
    };

    let mut turn = 0.0;
    if keys.pressed(KeyCode::ArrowLeft) {
        turn += 1.0;
    }
    if keys.pressed(KeyCode::ArrowRight) {
        turn -= 1.0;
    }

    input.turn = turn;
    input.thrust = keys.pressed(KeyCode::ArrowUp);
    input.fire = keys.pressed(KeyCode::Space);
    input.toggle_pause = keys.just_pressed(KeyCode::KeyP);
}

fn command_weapon(
    input: Res<ShipInput>,
    q_weapons: Query<(Entity, &Weapon), With<ShipWeapon>>,
    mut fire: MessageWriter<FireRequest>,
    mut control: MessageWriter<WeaponControl>,
) {
    for (e, weapon) in &q_weapons {
        if input.toggle_pause {
            let command = if weapon.paused() {
                WeaponCommand::Resume
            } else {
                WeaponCommand::Pause
            };
            control.write(WeaponControl { weapon: e, command });
        }
        if input.fire {
            fire.write(FireRequest::new(e));
        }
    }
}

fn apply_controls(
    time: Res<Time>,
    tunables: Res<Tunables>,
    input: Res<ShipInput>,
    mut q_ship: Query<(&Transform, &mut AngularVelocity, &mut LinearVelocity), With<Ship>>,
) {
    let Ok((tf, mut ang, mut vel)) = q_ship.single_mut() else {
        return;
    };

    ang.0 = input.turn * tunables.ship_turn_rate;

    if input.thrust {
        let heading = (tf.rotation * Vec3::X).truncate();
        vel.0 += heading * tunables.ship_thrust * time.delta_secs();
    }
}

#[cfg(test)]
mod tests;
