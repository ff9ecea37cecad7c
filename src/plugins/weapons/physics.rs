//! Physics adapters: how a bullet's body is built, moved, switched on/off and measured.
//!
//! The rest of the plugin only sees [`BodyAdapter`]; which backend is in use is an
//! app-wide choice made when `WeaponsPlugin` is added.
//!
//! Enabling/disabling never adds or removes components. A disabled body keeps its
//! collider but its collision filters are empty, its velocity is zero and its gravity
//! scale is zero, so a dynamic body stays put even under world gravity.

use avian2d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::layers::{active_bullet_layers, dormant_bullet_layers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PhysicsBackend {
    /// Kinematic boxes: move at a set velocity, never pushed around.
    #[default]
    Arcade,
    /// Solid boxes for tile worlds: no rotation, no bounce.
    Impact,
    /// Rigid-body sensors: round, undamped, report overlaps without resolving them.
    RigidBody,
}

/// Static body parameters, fixed for the lifetime of a pooled bullet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySpec {
    pub size: Vec2,
}

/// Mutable view over the body state an adapter is allowed to touch.
pub struct BodyMut<'a> {
    pub transform: &'a mut Transform,
    pub velocity: &'a mut LinearVelocity,
    pub layers: &'a mut CollisionLayers,
    pub gravity: &'a mut GravityScale,
    /// Gravity scale restored when the body is enabled.
    pub gravity_scale: f32,
}

pub trait BodyAdapter: Send + Sync + 'static {
    fn backend(&self) -> PhysicsBackend;

    /// Insert the backend's body components on a freshly spawned bullet.
    fn insert_body(&self, bullet: &mut EntityCommands, spec: BodySpec);

    /// World-space bounds of a body centred on `transform`.
    fn bounds(&self, transform: &Transform, size: Vec2) -> Rect;

    /// Move the body to `position` and launch it with `velocity`.
    fn reset(&self, body: &mut BodyMut, position: Vec2, velocity: Vec2) {
        body.transform.translation.x = position.x;
        body.transform.translation.y = position.y;
        body.velocity.0 = velocity;
    }

    fn set_enabled(&self, body: &mut BodyMut, enabled: bool) {
        if enabled {
            *body.layers = active_bullet_layers();
            body.gravity.0 = body.gravity_scale;
        } else {
            *body.layers = dormant_bullet_layers();
            body.velocity.0 = Vec2::ZERO;
            body.gravity.0 = 0.0;
        }
    }

    /// Whether the physics engine applies world gravity to this body. When it does
    /// not, `evaluate_bullets` integrates `Gravity * GravityScale` itself.
    fn simulates_gravity(&self) -> bool {
        true
    }
}

pub struct ArcadeAdapter;

impl BodyAdapter for ArcadeAdapter {
    fn backend(&self) -> PhysicsBackend {
        PhysicsBackend::Arcade
    }

    fn insert_body(&self, bullet: &mut EntityCommands, spec: BodySpec) {
        bullet.insert((
            RigidBody::Kinematic,
            Collider::rectangle(spec.size.x, spec.size.y),
        ));
    }

    /// Kinematic bodies ignore gravity.
    fn simulates_gravity(&self) -> bool {
        false
    }

    /// Arcade bodies are axis-aligned; rotation does not change their box.
    fn bounds(&self, transform: &Transform, size: Vec2) -> Rect {
        Rect::from_center_size(transform.translation.truncate(), size)
    }
}

pub struct ImpactAdapter;

impl BodyAdapter for ImpactAdapter {
    fn backend(&self) -> PhysicsBackend {
        PhysicsBackend::Impact
    }

    fn insert_body(&self, bullet: &mut EntityCommands, spec: BodySpec) {
        bullet.insert((
            RigidBody::Dynamic,
            Collider::rectangle(spec.size.x, spec.size.y),
            LockedAxes::ROTATION_LOCKED,
            Friction::ZERO,
            Restitution::ZERO,
        ));
    }

    fn bounds(&self, transform: &Transform, size: Vec2) -> Rect {
        Rect::from_center_size(transform.translation.truncate(), size)
    }

    fn reset(&self, body: &mut BodyMut, position: Vec2, velocity: Vec2) {
        body.transform.translation.x = position.x;
        body.transform.translation.y = position.y;
        // Rotation is locked; keep the sprite upright.
        body.transform.rotation = Quat::IDENTITY;
        body.velocity.0 = velocity;
    }
}

pub struct RigidBodyAdapter;

impl RigidBodyAdapter {
    #[inline]
    fn radius(size: Vec2) -> f32 {
        size.max_element() * 0.5
    }
}

impl BodyAdapter for RigidBodyAdapter {
    fn backend(&self) -> PhysicsBackend {
        PhysicsBackend::RigidBody
    }

    fn insert_body(&self, bullet: &mut EntityCommands, spec: BodySpec) {
        bullet.insert((
            RigidBody::Dynamic,
            Collider::circle(Self::radius(spec.size)),
            Sensor,
            LinearDamping(0.0),
        ));
    }

    fn bounds(&self, transform: &Transform, size: Vec2) -> Rect {
        Rect::from_center_half_size(
            transform.translation.truncate(),
            Vec2::splat(Self::radius(size)),
        )
    }
}

/// The app's single body adapter.
#[derive(Resource)]
pub struct PhysicsAdapter(Box<dyn BodyAdapter>);

impl PhysicsAdapter {
    pub fn new(adapter: impl BodyAdapter) -> Self {
        Self(Box::new(adapter))
    }

    pub fn for_backend(backend: PhysicsBackend) -> Self {
        match backend {
            PhysicsBackend::Arcade => Self::new(ArcadeAdapter),
            PhysicsBackend::Impact => Self::new(ImpactAdapter),
            PhysicsBackend::RigidBody => Self::new(RigidBodyAdapter),
        }
    }

    #[inline]
    pub fn get(&self) -> &dyn BodyAdapter {
        self.0.as_ref()
    }
}
