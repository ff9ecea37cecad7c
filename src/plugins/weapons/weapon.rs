//! The weapon component: cadence, shot accounting and tracking state.

use std::time::Duration;

use bevy::prelude::*;

use super::config::WeaponConfig;
use super::error::WeaponError;
use super::pool::BulletPool;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrackTarget {
    /// Follow an entity's transform. With `track_rotation`, the offset and the fire
    /// angle turn with the entity.
    Entity {
        entity: Entity,
        offset: Vec2,
        track_rotation: bool,
    },
    /// Follow the cursor (see `Aim`).
    Pointer { offset: Vec2 },
}

/// Where the tracked target is this tick, already including the tracking offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    pub position: Vec2,
    /// Degrees; 0 unless rotation is tracked.
    pub rotation: f32,
    pub velocity: Vec2,
}

#[derive(Component, Debug, Clone)]
pub struct Weapon {
    pub config: WeaponConfig,
    shots: u32,
    next_fire: Duration,
    paused: bool,
    track: Option<TrackTarget>,
    anchor: Option<Anchor>,
    kill_bounds: Option<Rect>,
}

impl Weapon {
    /// `config` must pass [`WeaponConfig::validate`]; non-finite rates or variances
    /// would panic inside the cadence and spread math.
    pub fn new(config: WeaponConfig) -> Self {
        debug_assert!(
            config.validate().is_ok(),
            "invalid weapon config: {:?}",
            config.validate()
        );
        Self {
            config,
            shots: 0,
            next_fire: Duration::ZERO,
            paused: false,
            track: None,
            anchor: None,
            kill_bounds: None,
        }
    }

    #[inline]
    pub fn shots(&self) -> u32 {
        self.shots
    }

    #[inline]
    pub fn next_fire(&self) -> Duration {
        self.next_fire
    }

    #[inline]
    pub fn paused(&self) -> bool {
        self.paused
    }

    pub(crate) fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    #[inline]
    pub fn limit_reached(&self) -> bool {
        self.config.fire_limit > 0 && self.shots >= self.config.fire_limit
    }

    #[inline]
    pub fn can_fire(&self, now: Duration) -> bool {
        self.fire_blocked(now).is_none()
    }

    /// Why a shot at `now` would be rejected, if it would be.
    pub fn fire_blocked(&self, now: Duration) -> Option<&'static str> {
        if self.paused {
            Some("paused")
        } else if now < self.next_fire {
            Some("cooling down")
        } else if self.limit_reached() {
            Some("fire limit reached")
        } else {
            None
        }
    }

    /// Count a shot and schedule the next one `rate` seconds from `now`.
    ///
    /// Returns `true` when this shot used up the fire limit.
    pub fn record_shot(&mut self, now: Duration, rate: f32) -> bool {
        self.next_fire = now + Duration::from_secs_f32(rate.max(0.0));
        self.shots += 1;
        self.config.fire_limit > 0 && self.shots == self.config.fire_limit
    }

    pub fn reset_shots(&mut self, new_limit: Option<u32>) {
        self.shots = 0;
        if let Some(limit) = new_limit {
            self.config.fire_limit = limit;
        }
    }

    pub fn track_entity(&mut self, entity: Entity, offset: Vec2, track_rotation: bool) {
        self.track = Some(TrackTarget::Entity {
            entity,
            offset,
            track_rotation,
        });
    }

    pub fn track_pointer(&mut self, offset: Vec2) {
        self.track = Some(TrackTarget::Pointer { offset });
    }

    pub fn stop_tracking(&mut self) {
        self.track = None;
        self.anchor = None;
    }

    #[inline]
    pub fn tracking(&self) -> Option<TrackTarget> {
        self.track
    }

    #[inline]
    pub fn anchor(&self) -> Option<&Anchor> {
        self.anchor.as_ref()
    }

    pub(crate) fn set_anchor(&mut self, anchor: Option<Anchor>) {
        self.anchor = anchor;
    }

    #[inline]
    pub fn kill_bounds(&self) -> Option<Rect> {
        self.kill_bounds
    }

    pub(crate) fn set_kill_bounds(&mut self, bounds: Option<Rect>) {
        self.kill_bounds = bounds;
    }

    /// Explicit origin, else the tracked anchor, else the configured `fire_from`.
    pub fn fire_origin(&self, from: Option<Vec2>) -> Vec2 {
        from.or_else(|| self.anchor.map(|a| a.position))
            .unwrap_or_else(|| self.config.fire_from())
    }

    /// Angle used when a shot has no target point.
    pub fn forward_angle(&self) -> f32 {
        self.config.fire_angle + self.anchor.map_or(0.0, |a| a.rotation)
    }
}

/// Components for a new weapon. Its bullets are spawned by `init_bullet_pools`.
pub fn weapon_bundle(config: WeaponConfig) -> impl Bundle {
    (Name::new("Weapon"), Weapon::new(config), BulletPool::default())
}

/// Validate `config` and spawn a weapon with it.
pub fn spawn_weapon(commands: &mut Commands, config: WeaponConfig) -> Result<Entity, WeaponError> {
    config.validate()?;
    Ok(commands.spawn(weapon_bundle(config)).id())
}
