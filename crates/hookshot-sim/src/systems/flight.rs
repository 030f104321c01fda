//! Flight integration system.
//!
//! Advances anchor positions from their velocities each tick. A live
//! (blocking) anchor moves by collision sweep; on a blocking contact it
//! embeds at the stop point with its velocity zeroed, and the contact is
//! reported to the engine's hit-reaction path. Unarmed anchors fly
//! through everything.
//!
//! Runs on every instance: proxies dead-reckon the same motion from the
//! replicated velocity, but only the authority reacts to the returned
//! contacts.

use hecs::{Entity, World};

use hookshot_core::components::{Anchor, Collider, NetIdentity};
use hookshot_core::enums::CollisionResponse;
use hookshot_core::events::HitInfo;
use hookshot_core::types::{NetId, Position, Velocity};

use crate::sweep;

struct PlannedMove {
    entity: Entity,
    anchor: NetId,
    from: Position,
    to: Position,
    radius: f64,
    swept: bool,
}

/// Integrate anchor flight for one tick. Returns the blocking contacts.
pub fn run(world: &mut World, dt: f64) -> Vec<(NetId, HitInfo)> {
    let mut moves = Vec::new();
    for (entity, (_anchor, net, pos, vel, collider)) in world
        .query::<(&Anchor, &NetIdentity, &Position, &Velocity, &Collider)>()
        .iter()
    {
        if vel.speed() == 0.0 {
            continue;
        }
        moves.push(PlannedMove {
            entity,
            anchor: net.id,
            from: *pos,
            to: Position::new(pos.x + vel.x * dt, pos.y + vel.y * dt, pos.z + vel.z * dt),
            radius: collider.radius,
            swept: collider.response == CollisionResponse::Block,
        });
    }

    let mut hits = Vec::new();
    let mut writes: Vec<(Entity, Position, bool)> = Vec::new();
    for planned in moves {
        if planned.swept {
            let result =
                sweep::sweep_sphere(world, planned.entity, &planned.from, &planned.to, planned.radius);
            let blocked = result.hit.is_some();
            writes.push((planned.entity, result.stop, blocked));
            if let Some(hit) = result.hit {
                hits.push((planned.anchor, hit));
            }
        } else {
            writes.push((planned.entity, planned.to, false));
        }
    }

    for (entity, stop, embed) in writes {
        if let Ok(mut pos) = world.get::<&mut Position>(entity) {
            *pos = stop;
        }
        if embed {
            if let Ok(mut vel) = world.get::<&mut Velocity>(entity) {
                *vel = Velocity::default();
            }
        }
    }

    hits
}
