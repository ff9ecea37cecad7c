//! Tunable gameplay constants.

use bevy::prelude::*;

use crate::plugins::weapons::physics::PhysicsBackend;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    /// Radians per second while a turn key is held.
    pub ship_turn_rate: f32,
    /// Pixels per second squared while thrusting.
    pub ship_thrust: f32,
    /// Playfield size, centred on the origin.
    pub world_size: Vec2,
    pub physics_backend: PhysicsBackend,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            ship_turn_rate: 4.0,
            ship_thrust: 240.0,
            world_size: Vec2::splat(900.0),
            physics_backend: PhysicsBackend::RigidBody,
        }
    }
}

impl Tunables {
    #[inline]
    pub fn world_bounds(&self) -> Rect {
        Rect::from_center_size(Vec2::ZERO, self.world_size)
    }
}
