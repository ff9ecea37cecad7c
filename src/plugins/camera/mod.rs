//! Camera plugin.
//!
//! A `Query<&Transform>` and a `Query<&mut Transform>` in the same system must be
//! provably disjoint (B0001), so the ship and camera queries exclude each other with
//! `Without<...>` filters.
//!
//! ```text
//! OnEnter(InGame): spawn MainCamera
//! PostUpdate:      follow_ship eases the camera toward the ship
//! ```

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::plugins::ship::Ship;

#[derive(Component)]
pub struct MainCamera {
    pub responsiveness: f32,
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            PostUpdate,
            follow_ship
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera {
            responsiveness: 5.0,
        },
        FireflyConfig::default(),
        Transform::from_xyz(0.0, 0.0, 999.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_ship(
    time: Res<Time>,
    q_ship: Query<&Transform, (With<Ship>, Without<MainCamera>)>,
    mut q_cam: Query<(&mut Transform, &MainCamera), Without<Ship>>,
) {
    let (Ok(tf_ship), Ok((mut tf_cam, cam))) = (q_ship.single(), q_cam.single_mut()) else {
        return;
    };

    let alpha = 1.0 - (-cam.responsiveness * time.delta_secs()).exp();
    let target = tf_ship.translation.truncate();
    let current = tf_cam.translation.truncate();
    let eased = current.lerp(target, alpha);

    tf_cam.translation.x = eased.x;
    tf_cam.translation.y = eased.y;
}
