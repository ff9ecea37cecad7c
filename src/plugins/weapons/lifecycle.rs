//! Retirement rules.
//!
//! Every tick each active bullet is turned into a `BulletSample` (plain values) and fed
//! to [`evaluate`]. The rule itself never touches the ECS, so it can be reasoned about
//! (and tested) on its own. The systems below only gather inputs and write the verdict
//! back as `BulletState::Retiring`.
//!
//! ```text
//!   lifespan timer expired? ──yes──> Retire(Lifespan)
//!            │ no
//!   kill type ─ Never / Lifespan ──> Keep
//!             ─ Distance ──────────> |pos - origin| > kill_distance ?
//!             ─ *Bounds ───────────> body bounds overlap kill bounds ?
//! ```

use avian2d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::components::{Bullet, BulletState, PooledBullet, WorldBounds};
use super::config::{Area, WeaponConfig};
use super::messages::KillBullet;
use super::physics::PhysicsAdapter;
use super::weapon::{Anchor, Weapon};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KillType {
    /// Only a lifespan timer or an explicit kill retires the bullet.
    Never,
    /// Retire when `bullet_lifespan` runs out.
    Lifespan,
    /// Retire once the bullet is further than `bullet_kill_distance` from where it was fired.
    Distance,
    /// Leave the weapon's rectangle, which follows the tracked target.
    WeaponBounds,
    CameraBounds,
    #[default]
    WorldBounds,
    /// Leave the fixed `bounds` rectangle.
    StaticBounds,
}

impl KillType {
    #[inline]
    pub fn uses_bounds(self) -> bool {
        matches!(
            self,
            Self::WeaponBounds | Self::CameraBounds | Self::WorldBounds | Self::StaticBounds
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetireReason {
    Lifespan,
    Distance,
    OutOfBounds,
    /// `KillBullet` or `WeaponCommand::KillAll`.
    Requested,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KillRule {
    pub kind: KillType,
    pub distance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletSample {
    pub lifespan_expired: bool,
    pub position: Vec2,
    pub origin: Vec2,
    pub body_bounds: Rect,
    /// `None` when the rectangle for the kill type is unknown this tick.
    pub kill_bounds: Option<Rect>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    Retire(RetireReason),
}

pub fn evaluate(rule: KillRule, sample: &BulletSample) -> Verdict {
    if sample.lifespan_expired {
        return Verdict::Retire(RetireReason::Lifespan);
    }

    match rule.kind {
        KillType::Never | KillType::Lifespan => Verdict::Keep,
        KillType::Distance => {
            if sample.position.distance(sample.origin) > rule.distance {
                Verdict::Retire(RetireReason::Distance)
            } else {
                Verdict::Keep
            }
        }
        KillType::WeaponBounds
        | KillType::CameraBounds
        | KillType::WorldBounds
        | KillType::StaticBounds => match sample.kill_bounds {
            Some(bounds) if !overlaps(sample.body_bounds, bounds) => {
                Verdict::Retire(RetireReason::OutOfBounds)
            }
            _ => Verdict::Keep,
        },
    }
}

/// Touching edges count as overlapping.
#[inline]
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.min.x <= b.max.x && a.max.x >= b.min.x && a.min.y <= b.max.y && a.max.y >= b.min.y
}

/// Teleport a position that left `bounds` (grown by `padding`) to the opposite edge.
pub fn wrap_position(position: Vec2, bounds: Rect, padding: f32) -> Vec2 {
    let min = bounds.min - Vec2::splat(padding);
    let max = bounds.max + Vec2::splat(padding);

    let wrap = |v: f32, lo: f32, hi: f32| {
        if v < lo {
            hi
        } else if v > hi {
            lo
        } else {
            v
        }
    };

    Vec2::new(wrap(position.x, min.x, max.x), wrap(position.y, min.y, max.y))
}

/// Resolve the rectangle a weapon's bullets must stay inside this tick.
pub fn kill_bounds_for(
    config: &WeaponConfig,
    anchor: Option<&Anchor>,
    world: Option<Rect>,
    camera: Option<Rect>,
) -> Option<Rect> {
    match config.bullet_kill_type {
        KillType::WeaponBounds => config.bounds.map(|area| {
            let rect = area.to_rect();
            match anchor {
                Some(anchor) => Rect::from_center_size(anchor.position, rect.size()),
                None => rect,
            }
        }),
        KillType::CameraBounds => camera,
        KillType::WorldBounds => world,
        KillType::StaticBounds => config.bounds.map(Area::to_rect),
        KillType::Never | KillType::Lifespan | KillType::Distance => None,
    }
}

/// Host-requested kills (collisions, scripted events).
pub fn apply_kill_requests(
    mut reader: MessageReader<KillBullet>,
    mut q: Query<&mut BulletState, With<PooledBullet>>,
) {
    for req in reader.read() {
        let Ok(mut state) = q.get_mut(req.bullet) else {
            debug!("KillBullet for non-pooled entity {:?}", req.bullet);
            continue;
        };
        if state.is_active() {
            *state = BulletState::Retiring(RetireReason::Requested);
        }
    }
}

/// Tick lifespans, apply the kill rule, then rotate/wrap survivors.
pub fn evaluate_bullets(
    time: Res<Time>,
    adapter: Res<PhysicsAdapter>,
    world_bounds: Option<Res<WorldBounds>>,
    gravity: Option<Res<Gravity>>,
    q_weapons: Query<&Weapon>,
    mut q_bullets: Query<
        (
            &mut Bullet,
            &mut BulletState,
            &mut Transform,
            &mut LinearVelocity,
            &GravityScale,
        ),
        With<PooledBullet>,
    >,
) {
    let dt = time.delta();
    let adapter = adapter.get();
    let world = world_bounds.map(|w| w.0);
    // Kinematic bodies are not pulled by the solver.
    let manual_gravity = gravity
        .filter(|_| !adapter.simulates_gravity())
        .map(|g| g.0)
        .filter(|g| *g != Vec2::ZERO);

    for (mut bullet, mut state, mut tf, mut vel, gravity_scale) in &mut q_bullets {
        if !state.is_active() || bullet.is_paused() {
            continue;
        }

        let lifespan_expired = bullet
            .lifespan
            .as_mut()
            .is_some_and(|timer| timer.tick(dt).is_finished());

        let sample = BulletSample {
            lifespan_expired,
            position: tf.translation.truncate(),
            origin: bullet.origin,
            body_bounds: adapter.bounds(&tf, bullet.size),
            kill_bounds: q_weapons.get(bullet.weapon).ok().and_then(Weapon::kill_bounds),
        };

        if let Verdict::Retire(reason) = evaluate(bullet.rule(), &sample) {
            *state = BulletState::Retiring(reason);
            continue;
        }

        if let Some(g) = manual_gravity {
            vel.0 += g * gravity_scale.0 * dt.as_secs_f32();
        }

        if bullet.rotate_to_velocity && vel.0.length_squared() > 0.0 {
            tf.rotation = Quat::from_rotation_z(vel.0.y.atan2(vel.0.x));
        }

        if let (Some(padding), Some(world)) = (bullet.wrap_padding, world) {
            let wrapped = wrap_position(sample.position, world, padding);
            if wrapped != sample.position {
                tf.translation.x = wrapped.x;
                tf.translation.y = wrapped.y;
            }
        }
    }
}
