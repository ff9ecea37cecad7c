//! Global state machine.
//!
//! Scene entities (ship, weapon, walls, rocks, camera) are scoped to `InGame`.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
}
