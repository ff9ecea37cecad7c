//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `bevy_weapons::game::configure_headless` to install gameplay plugins.
#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

pub fn app_headless() -> App {
    let mut app = App::new();

    // AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));

    bevy_weapons::game::configure_headless(&mut app);
    // `App::run` normally does this; tests drive `update()` directly, and
    // plugins (e.g. avian) register resources in `Plugin::finish`.
    app.finish();
    app.cleanup();
    app
}

/// Headless app whose clock advances by exactly `step` per update.
pub fn app_stepped(step: Duration) -> App {
    let mut app = app_headless();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(step));
    app
}

/// Run `n` updates.
pub fn tick(app: &mut App, n: usize) {
    for _ in 0..n {
        app.update();
    }
}

pub fn single_entity<F: bevy::ecs::query::QueryFilter>(app: &mut App) -> Entity {
    app.world_mut()
        .query_filtered::<Entity, F>()
        .single(app.world())
        .expect("expected exactly one matching entity")
}
