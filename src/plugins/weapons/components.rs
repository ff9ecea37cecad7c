use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::config::WeaponConfig;
use super::lifecycle::{KillRule, KillType, RetireReason};

/// Marker for bullets owned by a weapon pool.
#[derive(Component)]
pub struct PooledBullet;

/// A pool slot. Only pooled bullet entities are ever wrapped in this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BulletEntity(pub Entity);

/// Stable bullet identity, unique for the lifetime of the app.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BulletId(pub u32);

#[derive(Resource, Debug, Default)]
pub struct BulletIds {
    next: u32,
}

impl BulletIds {
    pub fn next_id(&mut self) -> BulletId {
        let id = BulletId(self.next);
        self.next += 1;
        id
    }
}

/// Dormant → Active → Retiring → Dormant.
///
/// `Retiring` is written by the lifecycle rules (and kill requests); only the commit
/// step moves a bullet back to `Dormant`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulletState {
    #[default]
    Dormant,
    Active,
    Retiring(RetireReason),
}

impl BulletState {
    #[inline]
    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}

/// Per-bullet data copied from the weapon at fire time.
///
/// Values are overwritten on every shot, so a recycled bullet never carries state from
/// its previous flight.
#[derive(Component, Debug, Clone)]
pub struct Bullet {
    pub weapon: Entity,
    pub id: BulletId,
    pub size: Vec2,
    /// Where the current flight started.
    pub origin: Vec2,
    pub kill_type: KillType,
    pub kill_distance: f32,
    pub rotate_to_velocity: bool,
    /// Gravity scale of the body while in flight.
    pub gravity_scale: f32,
    /// `Some(padding)` when the bullet wraps around the world bounds.
    pub wrap_padding: Option<f32>,
    pub lifespan: Option<Timer>,
    /// Velocity held while the owning weapon is paused.
    pub stashed_velocity: Option<Vec2>,
}

impl Bullet {
    pub fn new(weapon: Entity, id: BulletId, size: Vec2) -> Self {
        Self {
            weapon,
            id,
            size,
            origin: Vec2::ZERO,
            kill_type: KillType::Never,
            kill_distance: 0.0,
            rotate_to_velocity: false,
            gravity_scale: 0.0,
            wrap_padding: None,
            lifespan: None,
            stashed_velocity: None,
        }
    }

    pub fn arm(&mut self, origin: Vec2, config: &WeaponConfig) {
        self.origin = origin;
        self.kill_type = config.bullet_kill_type;
        self.kill_distance = config.bullet_kill_distance;
        self.rotate_to_velocity = config.bullet_rotate_to_velocity;
        self.gravity_scale = config.bullet_gravity_scale;
        self.wrap_padding = config
            .bullet_world_wrap
            .then_some(config.bullet_world_wrap_padding);
        self.lifespan = (config.bullet_lifespan > 0.0)
            .then(|| Timer::from_seconds(config.bullet_lifespan, TimerMode::Once));
        self.stashed_velocity = None;
    }

    /// Drop the flight's timer and any paused velocity.
    pub fn disarm(&mut self) {
        self.lifespan = None;
        self.stashed_velocity = None;
    }

    #[inline]
    pub fn rule(&self) -> KillRule {
        KillRule {
            kind: self.kill_type,
            distance: self.kill_distance,
        }
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.stashed_velocity.is_some()
    }

    pub fn pause(&mut self, velocity: Vec2) {
        self.stashed_velocity = Some(velocity);
        if let Some(timer) = self.lifespan.as_mut() {
            timer.pause();
        }
    }

    /// Returns the velocity to restore, if the bullet was paused.
    pub fn resume(&mut self) -> Option<Vec2> {
        let velocity = self.stashed_velocity.take()?;
        if let Some(timer) = self.lifespan.as_mut() {
            timer.unpause();
        }
        Some(velocity)
    }
}

/// Cursor position in world space. `None` while the cursor is outside the window.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct Aim {
    pub world_cursor: Option<Vec2>,
}

/// Visible world rectangle of the 2D camera, refreshed every frame.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct CameraView(pub Option<Rect>);

/// Playfield rectangle, inserted by the host scene.
#[derive(Resource, Debug, Clone, Copy)]
pub struct WorldBounds(pub Rect);

/// Randomness for spread and variance.
#[derive(Resource, Debug)]
pub struct WeaponRng(pub ChaCha8Rng);

impl WeaponRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(ChaCha8Rng::from_entropy())
    }

    /// Uniform sample in `[-variance, variance]`; exactly zero when there is no variance.
    pub fn spread(&mut self, variance: f32) -> f32 {
        if variance > 0.0 {
            self.0.gen_range(-variance..=variance)
        } else {
            0.0
        }
    }

    /// Uniform point in a rectangle of `size` centred on the origin.
    pub fn point_in(&mut self, size: Vec2) -> Vec2 {
        Vec2::new(self.spread(size.x * 0.5), self.spread(size.y * 0.5))
    }
}
