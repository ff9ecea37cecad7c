//! Core plugin: shared resources and global settings.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::weapons::prelude::{KillType, WeaponConfig};

pub const LOADOUT_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/weapons/blaster.ron");

/// Configuration of the ship's weapon.
#[derive(Resource, Debug, Clone)]
pub struct WeaponLoadout(pub WeaponConfig);

pub fn plugin(app: &mut App) {
    app.insert_resource(Tunables::default());
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));
    app.insert_resource(load_loadout(LOADOUT_PATH));
}

/// Built-in blaster, used when the loadout file is missing or broken.
pub fn fallback_loadout() -> WeaponConfig {
    WeaponConfig {
        pool_size: 30,
        fire_rate: 0.1,
        bullet_speed: 600.0,
        bullet_lifespan: 0.5,
        bullet_kill_type: KillType::WorldBounds,
        ..default()
    }
}

fn load_loadout(path: &str) -> WeaponLoadout {
    match WeaponConfig::load(path) {
        Ok(config) => {
            info!("loaded weapon loadout from {path}");
            WeaponLoadout(config)
        }
        Err(err) => {
            warn!("{err}; using the built-in blaster");
            WeaponLoadout(fallback_loadout())
        }
    }
}
