//! Weapon loadouts.
//!
//! A `WeaponConfig` is plain data: every field has a default so a RON loadout only
//! needs to name what it changes.
//!
//! ```ron
//! (
//!     pool_size: 30,
//!     fire_rate: 0.1,
//!     bullet_speed: 600.0,
//!     bullet_lifespan: 0.5,
//!     bullet_kill_type: WorldBounds,
//! )
//! ```
//!
//! Times are seconds, angles are degrees (0 = +X, counter-clockwise), distances are
//! world units.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::WeaponError;
use super::lifecycle::KillType;

/// Width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    pub const fn splat(v: f32) -> Self {
        Self { width: v, height: v }
    }

    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    fn is_zero(self) -> bool {
        self.width <= 0.0 && self.height <= 0.0
    }
}

/// Axis-aligned rectangle given by its minimum corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Area {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Area {
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            x: center.x - size.x * 0.5,
            y: center.y - size.y * 0.5,
            width: size.x,
            height: size.y,
        }
    }

    #[inline]
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    /// Bullets pre-spawned into the pool.
    pub pool_size: usize,
    /// Grow the pool by one bullet whenever a shot finds it empty.
    pub auto_expand: bool,

    /// Minimum time between shots.
    pub fire_rate: f32,
    /// Random +/- applied to `fire_rate` per shot.
    pub fire_rate_variance: f32,
    /// Shots allowed before `ResetShots`; 0 means unlimited.
    pub fire_limit: u32,
    pub fire_angle: f32,
    /// Origin used when neither an explicit origin nor a tracking target is available.
    pub fire_from: (f32, f32),
    /// Bullets leave from a random point inside this rectangle around the origin.
    pub fire_from_spread: Extent,
    pub autofire: bool,

    pub bullet_size: Extent,
    pub bullet_speed: f32,
    pub bullet_speed_variance: f32,
    /// Added to the sprite angle only; does not change the direction of travel.
    pub bullet_angle_offset: f32,
    pub bullet_angle_variance: f32,
    /// Seconds before a bullet retires; 0 disables the timer.
    pub bullet_lifespan: f32,
    pub bullet_kill_type: KillType,
    pub bullet_kill_distance: f32,
    pub bullet_rotate_to_velocity: bool,
    /// Add the tracked entity's velocity to each bullet.
    pub bullet_inherit_velocity: bool,
    pub bullet_world_wrap: bool,
    pub bullet_world_wrap_padding: f32,
    pub bullet_gravity_scale: f32,

    /// Rectangle for `StaticBounds`, and the size/initial placement for `WeaponBounds`.
    pub bounds: Option<Area>,
    /// Draw bullet bodies with the physics debug renderer (full app only).
    pub debug_physics: bool,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            pool_size: 30,
            auto_expand: false,
            fire_rate: 0.1,
            fire_rate_variance: 0.0,
            fire_limit: 0,
            fire_angle: 0.0,
            fire_from: (0.0, 0.0),
            fire_from_spread: Extent::default(),
            autofire: false,
            bullet_size: Extent::splat(8.0),
            bullet_speed: 200.0,
            bullet_speed_variance: 0.0,
            bullet_angle_offset: 0.0,
            bullet_angle_variance: 0.0,
            bullet_lifespan: 0.0,
            bullet_kill_type: KillType::WorldBounds,
            bullet_kill_distance: 0.0,
            bullet_rotate_to_velocity: false,
            bullet_inherit_velocity: false,
            bullet_world_wrap: false,
            bullet_world_wrap_padding: 0.0,
            bullet_gravity_scale: 0.0,
            bounds: None,
            debug_physics: false,
        }
    }
}

impl WeaponConfig {
    /// Parse and validate a RON loadout.
    pub fn from_ron_str(src: &str) -> Result<Self, WeaponError> {
        let config: Self = ron::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, WeaponError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| WeaponError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&src)
    }

    pub fn validate(&self) -> Result<(), WeaponError> {
        if self.pool_size == 0 && !self.auto_expand {
            return Err(WeaponError::invalid("pool_size", "must be at least 1 unless auto_expand is set"));
        }

        let non_negative = [
            ("fire_rate", self.fire_rate),
            ("fire_rate_variance", self.fire_rate_variance),
            ("bullet_speed_variance", self.bullet_speed_variance),
            ("bullet_angle_variance", self.bullet_angle_variance),
            ("bullet_lifespan", self.bullet_lifespan),
            ("bullet_kill_distance", self.bullet_kill_distance),
            ("bullet_world_wrap_padding", self.bullet_world_wrap_padding),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(WeaponError::invalid(field, "must be a finite, non-negative number"));
            }
        }

        if !self.bullet_speed.is_finite() {
            return Err(WeaponError::invalid("bullet_speed", "must be finite"));
        }
        if !self.bullet_gravity_scale.is_finite() {
            return Err(WeaponError::invalid("bullet_gravity_scale", "must be finite"));
        }
        if self.bullet_size.width <= 0.0 || self.bullet_size.height <= 0.0 {
            return Err(WeaponError::invalid("bullet_size", "must be positive in both axes"));
        }
        if self.fire_from_spread.width < 0.0 || self.fire_from_spread.height < 0.0 {
            return Err(WeaponError::invalid("fire_from_spread", "must not be negative"));
        }

        match self.bullet_kill_type {
            KillType::Distance if self.bullet_kill_distance <= 0.0 => Err(WeaponError::invalid(
                "bullet_kill_distance",
                "must be positive for the Distance kill type",
            )),
            KillType::Lifespan if self.bullet_lifespan <= 0.0 => Err(WeaponError::invalid(
                "bullet_lifespan",
                "must be positive for the Lifespan kill type",
            )),
            KillType::WeaponBounds | KillType::StaticBounds => match self.bounds {
                Some(area) if area.width > 0.0 && area.height > 0.0 => Ok(()),
                _ => Err(WeaponError::invalid("bounds", "a positive rectangle is required for this kill type")),
            },
            _ => Ok(()),
        }
    }

    #[inline]
    pub fn has_spread(&self) -> bool {
        !self.fire_from_spread.is_zero()
    }

    #[inline]
    pub fn fire_from(&self) -> Vec2 {
        Vec2::new(self.fire_from.0, self.fire_from.1)
    }
}
