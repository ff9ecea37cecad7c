//! Test helpers.
//!
//! Systems under test run once on a bare `World` through `RunSystemOnce`. Anything
//! they queue on `Commands` (spawned bullets, despawned weapons) is applied before
//! the helper returns, so assertions see the final state.

use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}
