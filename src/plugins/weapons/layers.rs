use avian2d::prelude::*;

/// Collision layers shared by the weapon plugin and the scene that hosts it.
#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    World,
    Ship,
    Target,
    Bullet,
}

/// Live bullets hit the world and targets.
#[inline]
pub fn active_bullet_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Bullet, [Layer::World, Layer::Target])
}

/// Dormant bullets keep their body but collide with nothing.
#[inline]
pub fn dormant_bullet_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Bullet, [] as [Layer; 0])
}
