//! `WeaponControl` handling: kill-all, pause/resume, shot reset, destroy.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{Bullet, BulletState, PooledBullet};
use super::lifecycle::RetireReason;
use super::messages::{WeaponCommand, WeaponControl};
use super::physics::{BodyMut, PhysicsAdapter};
use super::pool::BulletPool;
use super::weapon::Weapon;

pub fn apply_weapon_controls(
    mut commands: Commands,
    adapter: Res<PhysicsAdapter>,
    mut reader: MessageReader<WeaponControl>,
    mut q_weapons: Query<(&mut Weapon, &BulletPool)>,
    mut q_bullets: Query<
        (
            &mut BulletState,
            &mut Bullet,
            &mut Transform,
            &mut LinearVelocity,
            &mut CollisionLayers,
            &mut GravityScale,
        ),
        With<PooledBullet>,
    >,
) {
    let adapter = adapter.get();

    for msg in reader.read() {
        let Ok((mut weapon, pool)) = q_weapons.get_mut(msg.weapon) else {
            debug!("WeaponControl for missing weapon {:?}", msg.weapon);
            continue;
        };

        match msg.command {
            WeaponCommand::KillAll => {
                for slot in pool.members() {
                    let Ok((mut state, ..)) = q_bullets.get_mut(slot.0) else {
                        continue;
                    };
                    if state.is_active() {
                        *state = BulletState::Retiring(RetireReason::Requested);
                    }
                }
            }
            WeaponCommand::Pause => {
                if weapon.paused() {
                    continue;
                }
                weapon.set_paused(true);
                for slot in pool.members() {
                    let Ok((state, mut bullet, mut tf, mut vel, mut layers, mut gravity)) =
                        q_bullets.get_mut(slot.0)
                    else {
                        continue;
                    };
                    if !state.is_active() {
                        continue;
                    }
                    bullet.pause(vel.0);
                    let mut body = BodyMut {
                        transform: &mut *tf,
                        velocity: &mut *vel,
                        layers: &mut *layers,
                        gravity: &mut *gravity,
                        gravity_scale: bullet.gravity_scale,
                    };
                    adapter.set_enabled(&mut body, false);
                }
            }
            WeaponCommand::Resume => {
                if !weapon.paused() {
                    continue;
                }
                weapon.set_paused(false);
                for slot in pool.members() {
                    let Ok((_, mut bullet, mut tf, mut vel, mut layers, mut gravity)) =
                        q_bullets.get_mut(slot.0)
                    else {
                        continue;
                    };
                    let Some(velocity) = bullet.resume() else {
                        continue;
                    };
                    let mut body = BodyMut {
                        transform: &mut *tf,
                        velocity: &mut *vel,
                        layers: &mut *layers,
                        gravity: &mut *gravity,
                        gravity_scale: bullet.gravity_scale,
                    };
                    adapter.set_enabled(&mut body, true);
                    body.velocity.0 = velocity;
                }
            }
            WeaponCommand::ResetShots(limit) => weapon.reset_shots(limit),
            WeaponCommand::Destroy => {
                for slot in pool.members() {
                    commands.entity(slot.0).despawn();
                }
                commands.entity(msg.weapon).despawn();
                info!("weapon {}: destroyed with {} bullets", msg.weapon, pool.capacity());
            }
        }
    }
}
