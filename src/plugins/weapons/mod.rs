//! Weapons plugin: pooled bullets, firing cadence, tracking and kill rules.
//!
//! # Philosophy: invariants first
//! Correctness checks live at the boundaries (config validation, pool creation, state
//! transitions) so the per-tick paths (fire, evaluate, commit) stay straight-line.
//! A pooled entity missing its components is a bug and fails fast; an empty pool or a
//! cooling weapon is an ordinary outcome and is only logged.
//!
//! # Data flow
//! ```text
//!   Update
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│ Track      init_bullet_pools      (Added<BulletPool> -> dormant bullets)    │
//!│            update_aim_from_cursor / update_camera_view                     │
//!│            resolve_tracking       (TrackTarget -> Anchor)                  │
//!│            refresh_kill_bounds    (KillType -> Option<Rect>)               │
//!│                                                                            │
//!│ Fire       apply_weapon_controls  (WeaponControl)                          │
//!│            autofire               (-> FireRequest)                         │
//!│            fire_weapons           (FireRequest -> pool.pop_free, Active)   │
//!│                                   (-> BulletFired, FireLimitReached)       │
//!│                                                                            │
//!│ Lifecycle  apply_kill_requests    (KillBullet -> Retiring)                 │
//!│            evaluate_bullets       (lifespan / distance / bounds -> Retiring)│
//!│                                                                            │
//!│ Commit     commit_retirements     (Retiring -> Dormant, pool.push_free)    │
//!│                                   (-> BulletKilled)                        │
//!│            despawn_orphaned_bullets (weapon gone -> despawn its bullets)   │
//!└────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Bodies are driven through one [`physics::BodyAdapter`] chosen when the plugin is
//! added (`Arcade`, `Impact` or `RigidBody`).

pub mod commit;
pub mod components;
pub mod config;
pub mod control;
pub mod error;
pub mod fire;
pub mod layers;
pub mod lifecycle;
pub mod messages;
pub mod physics;
pub mod pool;
pub mod tracking;
pub mod weapon;

use bevy::prelude::*;

use components::{Aim, BulletIds, CameraView, WeaponRng};
use physics::{PhysicsAdapter, PhysicsBackend};

pub mod prelude {
    pub use super::components::{
        Aim, Bullet, BulletId, BulletState, CameraView, PooledBullet, WorldBounds,
    };
    pub use super::config::{Area, Extent, WeaponConfig};
    pub use super::error::WeaponError;
    pub use super::lifecycle::{KillType, RetireReason};
    pub use super::messages::{
        BulletFired, BulletKilled, FireAim, FireLimitReached, FirePattern, FireRequest,
        KillBullet, WeaponCommand, WeaponControl,
    };
    pub use super::physics::PhysicsBackend;
    pub use super::pool::BulletPool;
    pub use super::weapon::{spawn_weapon, weapon_bundle, TrackTarget, Weapon};
    pub use super::{WeaponSystems, WeaponsPlugin};
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum WeaponSystems {
    Track,
    Fire,
    Lifecycle,
    Commit,
}

pub struct WeaponsPlugin {
    pub backend: PhysicsBackend,
    /// Fixed RNG seed for reproducible spread; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for WeaponsPlugin {
    fn default() -> Self {
        Self {
            backend: PhysicsBackend::Arcade,
            seed: None,
        }
    }
}

impl Plugin for WeaponsPlugin {
    fn build(&self, app: &mut App) {
        let rng = match self.seed {
            Some(seed) => WeaponRng::seeded(seed),
            None => WeaponRng::from_entropy(),
        };

        app.insert_resource(PhysicsAdapter::for_backend(self.backend))
            .insert_resource(rng)
            .init_resource::<BulletIds>()
            .init_resource::<Aim>()
            .init_resource::<CameraView>();

        app.add_message::<messages::FireRequest>()
            .add_message::<messages::KillBullet>()
            .add_message::<messages::WeaponControl>()
            .add_message::<messages::BulletFired>()
            .add_message::<messages::BulletKilled>()
            .add_message::<messages::FireLimitReached>();

        app.configure_sets(
            Update,
            (
                WeaponSystems::Track,
                WeaponSystems::Fire,
                WeaponSystems::Lifecycle,
                WeaponSystems::Commit,
            )
                .chain(),
        );

        app.add_systems(
            Update,
            (
                pool::init_bullet_pools,
                tracking::update_aim_from_cursor,
                tracking::update_camera_view,
                tracking::resolve_tracking,
                tracking::refresh_kill_bounds,
            )
                .chain()
                .in_set(WeaponSystems::Track),
        )
        .add_systems(
            Update,
            (control::apply_weapon_controls, fire::autofire, fire::fire_weapons)
                .chain()
                .in_set(WeaponSystems::Fire),
        )
        .add_systems(
            Update,
            (lifecycle::apply_kill_requests, lifecycle::evaluate_bullets)
                .chain()
                .in_set(WeaponSystems::Lifecycle),
        )
        .add_systems(
            Update,
            (commit::commit_retirements, commit::despawn_orphaned_bullets)
                .chain()
                .in_set(WeaponSystems::Commit),
        );

        info!("weapons: {:?} physics", self.backend);
    }
}
