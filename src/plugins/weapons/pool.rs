//! Bullet pools.
//!
//! Each weapon owns one `BulletPool`. Bullets are spawned once, dormant, and then only
//! change component *values*: no insert/remove on activation or retirement, so pooled
//! bullets never move between archetypes.
//!
//! This module owns both sides of the body invariant:
//! - `wake`: enabled filters, configured gravity, position/velocity reset, visible.
//! - `sleep`: empty filters, zero velocity, zero gravity, hidden.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{Bullet, BulletEntity, BulletId, BulletIds, BulletState, PooledBullet};
use super::config::WeaponConfig;
use super::layers::dormant_bullet_layers;
use super::physics::{BodyAdapter, BodyMut, BodySpec, PhysicsAdapter};
use super::weapon::Weapon;

const BULLET_Z: f32 = 2.0;

#[derive(Component, Debug, Default)]
pub struct BulletPool {
    members: Vec<BulletEntity>,
    free: Vec<BulletEntity>,
}

impl BulletPool {
    #[inline]
    pub fn capacity(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    #[inline]
    pub fn active_len(&self) -> usize {
        self.members.len() - self.free.len()
    }

    #[inline]
    pub fn members(&self) -> &[BulletEntity] {
        &self.members
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.free.is_empty()
    }

    #[inline]
    pub fn pop_free(&mut self) -> Option<BulletEntity> {
        self.free.pop()
    }

    pub fn push_free(&mut self, bullet: BulletEntity) {
        debug_assert!(self.members.contains(&bullet), "returned bullet is not a member of this pool");
        debug_assert!(!self.free.contains(&bullet), "bullet returned to the pool twice");
        self.free.push(bullet);
    }

    /// Register a new member; `free` says whether it starts dormant.
    pub(crate) fn adopt(&mut self, bullet: BulletEntity, free: bool) {
        self.members.push(bullet);
        if free {
            self.free.push(bullet);
        }
    }
}

/// Owned component values of one pooled bullet, before it is spawned.
pub(crate) struct BulletParts {
    pub state: BulletState,
    pub bullet: Bullet,
    pub transform: Transform,
    pub velocity: LinearVelocity,
    pub layers: CollisionLayers,
    pub gravity: GravityScale,
    pub visibility: Visibility,
}

impl BulletParts {
    pub fn dormant(weapon: Entity, id: BulletId, size: Vec2) -> Self {
        Self {
            state: BulletState::Dormant,
            bullet: Bullet::new(weapon, id, size),
            transform: Transform::from_xyz(0.0, 0.0, BULLET_Z),
            velocity: LinearVelocity::ZERO,
            layers: dormant_bullet_layers(),
            gravity: GravityScale(0.0),
            visibility: Visibility::Hidden,
        }
    }
}

#[inline]
pub(crate) fn body_spec(config: &WeaponConfig) -> BodySpec {
    BodySpec {
        size: config.bullet_size.as_vec2(),
    }
}

pub(crate) fn spawn_bullet(
    commands: &mut Commands,
    adapter: &dyn BodyAdapter,
    parts: BulletParts,
    spec: BodySpec,
) -> BulletEntity {
    let mut bullet = commands.spawn((
        Name::new("Bullet(Pooled)"),
        PooledBullet,
        parts.state,
        parts.bullet,
        Sprite {
            color: Color::srgb(1.0, 0.85, 0.3),
            custom_size: Some(spec.size),
            ..default()
        },
        parts.transform,
        parts.visibility,
        parts.layers,
        parts.velocity,
        parts.gravity,
        // Inactive bullets have empty filters, so this only reports live hits.
        CollisionEventsEnabled,
    ));
    adapter.insert_body(&mut bullet, spec);
    BulletEntity(bullet.id())
}

pub(crate) fn wake(
    adapter: &dyn BodyAdapter,
    body: &mut BodyMut,
    visibility: &mut Visibility,
    position: Vec2,
    velocity: Vec2,
) {
    adapter.set_enabled(body, true);
    adapter.reset(body, position, velocity);
    *visibility = Visibility::Visible;
}

pub(crate) fn sleep(adapter: &dyn BodyAdapter, body: &mut BodyMut, visibility: &mut Visibility) {
    adapter.set_enabled(body, false);
    *visibility = Visibility::Hidden;
}

/// Fill newly created pools with dormant bullets.
pub fn init_bullet_pools(
    mut commands: Commands,
    adapter: Res<PhysicsAdapter>,
    mut ids: ResMut<BulletIds>,
    mut q: Query<(Entity, &Weapon, &mut BulletPool), Added<BulletPool>>,
) {
    let adapter = adapter.get();

    for (weapon_e, weapon, mut pool) in &mut q {
        let config = &weapon.config;
        // An auto-expanding weapon still starts with one bullet.
        let count = config.pool_size.max(1);
        let size = config.bullet_size.as_vec2();

        for _ in 0..count {
            let parts = BulletParts::dormant(weapon_e, ids.next_id(), size);
            let bullet = spawn_bullet(&mut commands, adapter, parts, body_spec(config));
            pool.adopt(bullet, true);
        }

        info!(
            "weapon {weapon_e}: pooled {count} bullets ({:?} physics)",
            adapter.backend()
        );
    }
}
