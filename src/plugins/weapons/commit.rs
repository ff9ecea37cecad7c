//! Retirement commit: recycle bullets back into their pools.
//!
//! This system is the only place a bullet becomes `Dormant` again, so the dormant
//! invariants (hidden, still, empty filters, no timer) are all written here.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{Bullet, BulletEntity, BulletState, PooledBullet};
use super::messages::BulletKilled;
use super::physics::{BodyMut, PhysicsAdapter};
use super::pool::{sleep, BulletPool};

pub fn commit_retirements(
    mut commands: Commands,
    adapter: Res<PhysicsAdapter>,
    mut killed: MessageWriter<BulletKilled>,
    mut q_pools: Query<&mut BulletPool>,
    mut q: Query<
        (
            Entity,
            &mut BulletState,
            &mut Bullet,
            &mut Transform,
            &mut LinearVelocity,
            &mut CollisionLayers,
            &mut GravityScale,
            &mut Visibility,
        ),
        With<PooledBullet>,
    >,
) {
    let adapter = adapter.get();

    for (e, mut state, mut bullet, mut tf, mut vel, mut layers, mut gravity, mut vis) in &mut q {
        let BulletState::Retiring(reason) = *state else {
            continue;
        };

        let position = tf.translation.truncate();
        let mut body = BodyMut {
            transform: &mut *tf,
            velocity: &mut *vel,
            layers: &mut *layers,
            gravity: &mut *gravity,
            gravity_scale: 0.0,
        };
        sleep(adapter, &mut body, &mut vis);
        bullet.disarm();
        *state = BulletState::Dormant;

        match q_pools.get_mut(bullet.weapon) {
            Ok(mut pool) => pool.push_free(BulletEntity(e)),
            Err(_) => {
                debug!("bullet {e}: owning weapon is gone, despawning");
                commands.entity(e).despawn();
            }
        }

        killed.write(BulletKilled {
            weapon: bullet.weapon,
            bullet: e,
            id: bullet.id,
            reason,
            position,
        });
    }
}

/// Despawn bullets whose weapon no longer exists.
///
/// `WeaponCommand::Destroy` takes its bullets with it; this catches weapons despawned
/// any other way (state-scoped cleanup, a plain `despawn`), including dormant bullets
/// that would never reach the retirement commit.
pub fn despawn_orphaned_bullets(
    mut commands: Commands,
    q_weapons: Query<(), With<BulletPool>>,
    q_bullets: Query<(Entity, &Bullet), With<PooledBullet>>,
) {
    for (e, bullet) in &q_bullets {
        if !q_weapons.contains(bullet.weapon) {
            debug!("bullet {e}: weapon {} is gone, despawning", bullet.weapon);
            commands.entity(e).despawn();
        }
    }
}
