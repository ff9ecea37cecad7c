//! Buffered weapon traffic.
//!
//! Inbound (written by the game): `FireRequest`, `KillBullet`, `WeaponControl`.
//! Outbound (written by the plugin): `BulletFired`, `BulletKilled`, `FireLimitReached`.
//!
//! Producers never borrow a pool; `fire_weapons` is the single writer that pops from
//! it and `commit_retirements` the single writer that pushes back.

use bevy::prelude::*;

use super::components::BulletId;
use super::lifecycle::RetireReason;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FireAim {
    /// Weapon's fire angle (plus tracked rotation).
    Forward,
    AtPoint(Vec2),
    /// Aim at an entity's current position.
    AtEntity(Entity),
    /// Aim at the cursor; dropped while the cursor is outside the window.
    AtPointer,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FirePattern {
    Single,
    /// Shift the origin by this amount.
    Offset(Vec2),
    /// One bullet per point, counted as a single shot. Points are offsets from the
    /// origin when there is an explicit origin or a tracking target, origins otherwise.
    Many(Vec<Vec2>),
}

#[derive(Message, Clone, Debug)]
pub struct FireRequest {
    pub weapon: Entity,
    pub from: Option<Vec2>,
    pub aim: FireAim,
    pub pattern: FirePattern,
}

impl FireRequest {
    pub fn new(weapon: Entity) -> Self {
        Self {
            weapon,
            from: None,
            aim: FireAim::Forward,
            pattern: FirePattern::Single,
        }
    }

    pub fn many(weapon: Entity, points: impl IntoIterator<Item = Vec2>) -> Self {
        Self {
            pattern: FirePattern::Many(points.into_iter().collect()),
            ..Self::new(weapon)
        }
    }

    pub fn origin(mut self, from: Vec2) -> Self {
        self.from = Some(from);
        self
    }

    pub fn at(mut self, point: Vec2) -> Self {
        self.aim = FireAim::AtPoint(point);
        self
    }

    pub fn at_entity(mut self, target: Entity) -> Self {
        self.aim = FireAim::AtEntity(target);
        self
    }

    pub fn at_pointer(mut self) -> Self {
        self.aim = FireAim::AtPointer;
        self
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.pattern = FirePattern::Offset(offset);
        self
    }
}

/// Retire an active bullet (e.g. it hit something). Ignored for dormant bullets.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct KillBullet {
    pub bullet: Entity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeaponCommand {
    KillAll,
    /// Freeze every live bullet (velocity, body, lifespan) and stop firing.
    Pause,
    Resume,
    /// Zero the shot counter, optionally replacing the fire limit.
    ResetShots(Option<u32>),
    /// Despawn the weapon and all of its bullets.
    Destroy,
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeaponControl {
    pub weapon: Entity,
    pub command: WeaponCommand,
}

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct BulletFired {
    pub weapon: Entity,
    pub bullet: Entity,
    pub id: BulletId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub speed: f32,
}

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct BulletKilled {
    pub weapon: Entity,
    pub bullet: Entity,
    pub id: BulletId,
    pub reason: RetireReason,
    pub position: Vec2,
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct FireLimitReached {
    pub weapon: Entity,
    pub limit: u32,
}
