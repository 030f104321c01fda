//! Cleanup system: despawns queued entities.
//!
//! Cancels any pending timers for the entity and releases its net-identity
//! registration before removing it from the world.

use std::collections::HashMap;

use hecs::{Entity, World};

use hookshot_core::components::NetIdentity;
use hookshot_core::types::NetId;

use crate::timers::TimerQueue;

/// Drain the despawn buffer.
pub fn run(
    world: &mut World,
    despawn_buffer: &mut Vec<Entity>,
    timers: &mut TimerQueue,
    registry: &mut HashMap<NetId, Entity>,
) {
    for entity in despawn_buffer.drain(..) {
        timers.cancel(entity);
        if let Ok(id) = world.get::<&NetIdentity>(entity).map(|n| n.id) {
            registry.remove(&id);
        }
        let _ = world.despawn(entity);
    }
}
