//! Pull system — the anchor's per-tick decision logic.
//!
//! Authority only. For each anchor, in order: terminate at max travel
//! distance, terminate an active pull at the cutoff distance, otherwise
//! advance the tracked position toward the anchor. The engine applies the
//! outcomes (termination routes through `stop_pull`, advances through the
//! tracked-position change handler, so observers replay the same effect).

use std::collections::HashMap;

use hecs::{Entity, World};

use hookshot_core::components::{Anchor, AnchorConfig, AnchorState, NetIdentity};
use hookshot_core::types::{NetId, Position};

/// Decision produced for one anchor this tick.
#[derive(Debug, Clone, Copy)]
pub enum PullOutcome {
    /// The anchor terminates: max travel distance reached, or an active
    /// pull came within the cutoff distance. Both route through the same
    /// termination path.
    Expire { anchor: NetId },
    /// An active pull advances: the new interpolated tracked position.
    Advance { anchor: NetId, tracked: Position },
}

/// Evaluate every anchor not already pending destruction.
pub fn run(
    world: &World,
    registry: &HashMap<NetId, Entity>,
    pending: &[Entity],
    dt: f64,
) -> Vec<PullOutcome> {
    let mut outcomes = Vec::new();
    for (entity, (_anchor, net, config, state, pos)) in world
        .query::<(&Anchor, &NetIdentity, &AnchorConfig, &AnchorState, &Position)>()
        .iter()
    {
        if pending.contains(&entity) {
            continue;
        }

        if state.spawn_location.range_to(pos) >= config.max_distance {
            outcomes.push(PullOutcome::Expire { anchor: net.id });
            continue;
        }

        let Some(target) = state.pull_target else {
            continue;
        };
        let Some(&target_entity) = registry.get(&target) else {
            continue;
        };
        let target_pos = match world.get::<&Position>(target_entity) {
            Ok(p) => *p,
            Err(_) => continue,
        };

        if pos.range_to(&target_pos) <= config.cutoff_distance {
            outcomes.push(PullOutcome::Expire { anchor: net.id });
            continue;
        }

        outcomes.push(PullOutcome::Advance {
            anchor: net.id,
            tracked: target_pos.interp_to(pos, dt, config.pull_speed),
        });
    }
    outcomes
}
