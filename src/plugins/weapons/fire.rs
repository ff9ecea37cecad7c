//! Fire consumer: turn `FireRequest`s into live bullets.
//!
//! # Fail-fast invariants
//! - A pool's free list only holds pooled bullet entities, so every popped entity must
//!   match the bullet query. A miss is a bug and panics.
//!
//! Everything else that can go wrong (weapon cooling down, pool empty, target gone) is
//! an ordinary rejection: logged at debug level, nothing mutated.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{
    Aim, Bullet, BulletEntity, BulletId, BulletIds, BulletState, PooledBullet, WeaponRng,
};
use super::config::WeaponConfig;
use super::messages::{BulletFired, FireAim, FireLimitReached, FirePattern, FireRequest};
use super::physics::{BodyAdapter, BodyMut, PhysicsAdapter};
use super::pool::{body_spec, spawn_bullet, wake, BulletParts, BulletPool};
use super::weapon::Weapon;

/// Launch parameters for one bullet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Shot {
    pub origin: Vec2,
    /// Degrees.
    pub angle: f32,
    pub speed: f32,
    pub velocity: Vec2,
}

pub(crate) fn plan_shot(
    weapon: &Weapon,
    origin: Vec2,
    target: Option<Vec2>,
    rng: &mut WeaponRng,
) -> Shot {
    let config = &weapon.config;

    let origin = if config.has_spread() {
        origin + rng.point_in(config.fire_from_spread.as_vec2())
    } else {
        origin
    };

    let base_angle = match target {
        Some(point) if point != origin => {
            let d = point - origin;
            d.y.atan2(d.x).to_degrees()
        }
        _ => weapon.forward_angle(),
    };
    let angle = base_angle + rng.spread(config.bullet_angle_variance);
    let speed = config.bullet_speed + rng.spread(config.bullet_speed_variance);

    let mut velocity = Vec2::from_angle(angle.to_radians()) * speed;
    if config.bullet_inherit_velocity {
        if let Some(anchor) = weapon.anchor() {
            velocity += anchor.velocity;
        }
    }

    Shot {
        origin,
        angle,
        speed,
        velocity,
    }
}

fn arm(
    adapter: &dyn BodyAdapter,
    config: &WeaponConfig,
    shot: &Shot,
    state: &mut BulletState,
    bullet: &mut Bullet,
    mut body: BodyMut,
    visibility: &mut Visibility,
) {
    wake(adapter, &mut body, visibility, shot.origin, shot.velocity);
    body.transform.rotation =
        Quat::from_rotation_z((shot.angle + config.bullet_angle_offset).to_radians());
    bullet.arm(shot.origin, config);
    *state = BulletState::Active;
}

/// Spawn one extra bullet, already in flight.
fn expand_pool(
    commands: &mut Commands,
    adapter: &dyn BodyAdapter,
    ids: &mut BulletIds,
    weapon_e: Entity,
    config: &WeaponConfig,
    shot: &Shot,
) -> (BulletEntity, BulletId) {
    let mut parts = BulletParts::dormant(weapon_e, ids.next_id(), config.bullet_size.as_vec2());
    arm(
        adapter,
        config,
        shot,
        &mut parts.state,
        &mut parts.bullet,
        BodyMut {
            transform: &mut parts.transform,
            velocity: &mut parts.velocity,
            layers: &mut parts.layers,
            gravity: &mut parts.gravity,
            gravity_scale: config.bullet_gravity_scale,
        },
        &mut parts.visibility,
    );
    let id = parts.bullet.id;
    (spawn_bullet(commands, adapter, parts, body_spec(config)), id)
}

/// Weapons with `autofire` ask to fire every tick; cadence does the throttling.
pub fn autofire(q: Query<(Entity, &Weapon)>, mut writer: MessageWriter<FireRequest>) {
    for (e, weapon) in &q {
        if weapon.config.autofire && !weapon.paused() {
            writer.write(FireRequest::new(e));
        }
    }
}

pub fn fire_weapons(
    mut commands: Commands,
    time: Res<Time>,
    adapter: Res<PhysicsAdapter>,
    aim: Res<Aim>,
    mut rng: ResMut<WeaponRng>,
    mut ids: ResMut<BulletIds>,
    mut requests: MessageReader<FireRequest>,
    mut fired: MessageWriter<BulletFired>,
    mut limit_reached: MessageWriter<FireLimitReached>,
    mut q_weapons: Query<(&mut Weapon, &mut BulletPool)>,
    q_targets: Query<&Transform, Without<PooledBullet>>,
    mut q_bullets: Query<
        (
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
    let now = time.elapsed();
    let adapter = adapter.get();

    for req in requests.read() {
        let Ok((mut weapon, mut pool)) = q_weapons.get_mut(req.weapon) else {
            debug!("FireRequest for missing weapon {:?}", req.weapon);
            continue;
        };
        if let Some(reason) = weapon.fire_blocked(now) {
            debug!("weapon {:?}: shot rejected, {reason}", req.weapon);
            continue;
        }

        let target = match req.aim {
            FireAim::Forward => None,
            FireAim::AtPoint(point) => Some(point),
            FireAim::AtEntity(e) => match q_targets.get(e) {
                Ok(tf) => Some(tf.translation.truncate()),
                Err(err) => {
                    debug!("fire target {e:?} unavailable: {err:?}");
                    continue;
                }
            },
            FireAim::AtPointer => match aim.world_cursor {
                Some(point) => Some(point),
                None => {
                    debug!("Cursor position is None");
                    continue;
                }
            },
        };

        let base = weapon.fire_origin(req.from);
        let origins: Vec<Vec2> = match &req.pattern {
            FirePattern::Single => vec![base],
            FirePattern::Offset(offset) => vec![base + *offset],
            FirePattern::Many(points) if req.from.is_some() || weapon.anchor().is_some() => {
                points.iter().map(|p| base + *p).collect()
            }
            FirePattern::Many(points) => points.clone(),
        };

        let mut launched = 0usize;
        for origin in origins {
            let shot = plan_shot(&weapon, origin, target, &mut rng);

            let (slot, id) = if let Some(slot) = pool.pop_free() {
                let (mut state, mut bullet, mut tf, mut vel, mut layers, mut gravity, mut vis) =
                    q_bullets
                        .get_mut(slot.0)
                        .expect("BulletPool contained an entity missing pooled bullet components");
                arm(
                    adapter,
                    &weapon.config,
                    &shot,
                    &mut state,
                    &mut bullet,
                    BodyMut {
                        transform: &mut *tf,
                        velocity: &mut *vel,
                        layers: &mut *layers,
                        gravity: &mut *gravity,
                        gravity_scale: weapon.config.bullet_gravity_scale,
                    },
                    &mut vis,
                );
                (slot, bullet.id)
            } else if weapon.config.auto_expand {
                let (slot, id) = expand_pool(
                    &mut commands,
                    adapter,
                    &mut ids,
                    req.weapon,
                    &weapon.config,
                    &shot,
                );
                pool.adopt(slot, false);
                (slot, id)
            } else {
                // Capacity decision, not a correctness failure.
                debug!("weapon {:?}: pool exhausted", req.weapon);
                break;
            };

            launched += 1;
            fired.write(BulletFired {
                weapon: req.weapon,
                bullet: slot.0,
                id,
                position: shot.origin,
                velocity: shot.velocity,
                speed: shot.speed,
            });
        }

        if launched > 0 {
            let rate = weapon.config.fire_rate + rng.spread(weapon.config.fire_rate_variance);
            if weapon.record_shot(now, rate) {
                limit_reached.write(FireLimitReached {
                    weapon: req.weapon,
                    limit: weapon.config.fire_limit,
                });
            }
        }
    }
}
