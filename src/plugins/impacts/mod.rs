//! Impacts plugin: bullets that start touching a wall or a target are handed back to
//! the weapons plugin through `KillBullet`.
//!
//! ```text
//! FixedPostUpdate: avian CollisionStart -> kill_bullets_on_impact -> KillBullet
//! Update:          weapons Lifecycle reads KillBullet -> Retiring -> commit
//! ```

use avian2d::collision::narrow_phase::CollisionEventSystems;
use avian2d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::weapons::layers::Layer;
use crate::plugins::weapons::prelude::{BulletState, KillBullet, PooledBullet};

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedPostUpdate,
        kill_bullets_on_impact
            .after(CollisionEventSystems)
            .run_if(in_state(GameState::InGame)),
    );
}

#[derive(Clone, Copy, Debug)]
struct CollisionTarget {
    collider: Entity,
    body: Option<Entity>,
}

impl CollisionTarget {
    #[inline]
    fn owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
fn targets(ev: &CollisionStart) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget {
            collider: ev.collider1,
            body: ev.body1,
        },
        CollisionTarget {
            collider: ev.collider2,
            body: ev.body2,
        },
    )
}

#[inline]
fn stops_bullets(layers: &CollisionLayers) -> bool {
    layers.memberships.has_all(Layer::World) || layers.memberships.has_all(Layer::Target)
}

pub fn kill_bullets_on_impact(
    mut started: MessageReader<CollisionStart>,
    q_bullets: Query<&BulletState, With<PooledBullet>>,
    q_layers: Query<&CollisionLayers>,
    mut kills: MessageWriter<KillBullet>,
    // Per-frame dedupe
    mut seen: Local<HashSet<Entity>>,
) {
    seen.clear();

    for ev in started.read() {
        let (t1, t2) = targets(ev);

        let b1 = q_bullets.contains(t1.collider);
        let b2 = q_bullets.contains(t2.collider);
        if !(b1 ^ b2) {
            continue; // exactly one side must be a bullet
        }
        let (bullet_side, other_side) = if b1 { (t1, t2) } else { (t2, t1) };

        if !seen.insert(bullet_side.collider) {
            continue;
        }

        let Ok(state) = q_bullets.get(bullet_side.collider) else {
            continue;
        };
        if !state.is_active() {
            continue;
        }

        let Ok(other_layers) = q_layers.get(other_side.collider) else {
            continue;
        };
        if stops_bullets(other_layers) {
            debug!(
                "bullet {:?} hit {:?}",
                bullet_side.collider,
                other_side.owner()
            );
            kills.write(KillBullet {
                bullet: bullet_side.collider,
            });
        }
    }
}
