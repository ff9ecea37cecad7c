//! Per-tick inputs for the fire and lifecycle stages: cursor, camera view, weapon
//! anchors and kill bounds.
//!
//! The window/camera systems return early when there is no window or camera, which
//! keeps headless apps working without extra wiring.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{Aim, CameraView, PooledBullet, WorldBounds};
use super::lifecycle::kill_bounds_for;
use super::weapon::{Anchor, TrackTarget, Weapon};

pub fn update_aim_from_cursor(
    mut aim: ResMut<Aim>,
    windows: Query<&Window>,
    q_camera: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
) {
    let (Ok(window), Ok((camera, camera_tf))) = (windows.single(), q_camera.single()) else {
        return;
    };

    aim.world_cursor = window
        .cursor_position()
        .and_then(|cursor| camera.viewport_to_world_2d(camera_tf, cursor).ok());
}

pub fn update_camera_view(
    mut view: ResMut<CameraView>,
    q_camera: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
) {
    let Ok((camera, camera_tf)) = q_camera.single() else {
        return;
    };
    let Some(size) = camera.logical_viewport_size() else {
        return;
    };

    let corners = (
        camera.viewport_to_world_2d(camera_tf, Vec2::ZERO),
        camera.viewport_to_world_2d(camera_tf, size),
    );
    if let (Ok(a), Ok(b)) = corners {
        view.0 = Some(Rect::from_corners(a, b));
    }
}

/// Z rotation of a 2D transform, in degrees.
#[inline]
fn heading_degrees(tf: &Transform) -> f32 {
    tf.rotation.to_euler(EulerRot::ZYX).0.to_degrees()
}

pub fn resolve_tracking(
    aim: Res<Aim>,
    mut q_weapons: Query<(Entity, &mut Weapon)>,
    q_targets: Query<(&Transform, Option<&LinearVelocity>), Without<PooledBullet>>,
) {
    for (weapon_e, mut weapon) in &mut q_weapons {
        let Some(track) = weapon.tracking() else {
            continue;
        };

        let anchor = match track {
            TrackTarget::Entity {
                entity,
                offset,
                track_rotation,
            } => match q_targets.get(entity) {
                Ok((tf, vel)) => {
                    let rotation = if track_rotation { heading_degrees(tf) } else { 0.0 };
                    let offset = if track_rotation {
                        Vec2::from_angle(rotation.to_radians()).rotate(offset)
                    } else {
                        offset
                    };
                    Some(Anchor {
                        position: tf.translation.truncate() + offset,
                        rotation,
                        velocity: vel.map_or(Vec2::ZERO, |v| v.0),
                    })
                }
                Err(err) => {
                    debug!("weapon {weapon_e}: tracked entity {entity:?} unavailable: {err:?}");
                    None
                }
            },
            TrackTarget::Pointer { offset } => aim.world_cursor.map(|cursor| Anchor {
                position: cursor + offset,
                rotation: 0.0,
                velocity: Vec2::ZERO,
            }),
        };

        weapon.set_anchor(anchor);
    }
}

pub fn refresh_kill_bounds(
    world: Option<Res<WorldBounds>>,
    view: Res<CameraView>,
    mut q_weapons: Query<&mut Weapon>,
) {
    let world = world.map(|w| w.0);

    for mut weapon in &mut q_weapons {
        let bounds = kill_bounds_for(&weapon.config, weapon.anchor(), world, view.0);
        if weapon.kill_bounds() != bounds {
            weapon.set_kill_bounds(bounds);
        }
    }
}
