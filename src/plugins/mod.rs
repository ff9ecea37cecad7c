//! Feature plugins.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::weapons::WeaponsPlugin;

pub mod core;
pub mod impacts;
pub mod physics;
pub mod ship;
pub mod weapons;
pub mod world;

// Render-only
pub mod camera;
pub mod lighting;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);

    let backend = app.world().resource::<Tunables>().physics_backend;
    app.add_plugins(WeaponsPlugin {
        backend,
        seed: None,
    });

    world::plugin(app);
    ship::plugin(app);
    impacts::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    camera::plugin(app);
}
