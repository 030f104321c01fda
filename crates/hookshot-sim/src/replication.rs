//! Replication diffing and the transport codec.
//!
//! The authority keeps a baseline of the last field values it sent for
//! each anchor. After systems run, changed fields are collected into an
//! [`ReplicationBatch`] alongside any spawn/destroy messages queued during
//! the tick. Proxies feed batches into `SimulationEngine::apply_batch`.

use std::collections::HashMap;

use hecs::World;

use hookshot_core::components::{AnchorState, NetIdentity};
use hookshot_core::replication::{AnchorField, ReplicationBatch, ReplicationMessage};
use hookshot_core::types::{NetId, Position};

/// Last-sent replicated field values for one anchor.
#[derive(Debug, Clone)]
pub struct AnchorBaseline {
    pub is_live: bool,
    pub dynamic_speed: f64,
    pub pull_target: Option<NetId>,
    pub tracked_position: Position,
}

impl AnchorBaseline {
    pub fn from_state(state: &AnchorState) -> Self {
        Self {
            is_live: state.is_live,
            dynamic_speed: state.dynamic_speed,
            pull_target: state.pull_target,
            tracked_position: state.tracked_position,
        }
    }
}

/// Diff every live anchor against its baseline and build this tick's batch.
///
/// `queued` carries the spawn/destroy messages the engine accumulated
/// during the tick; they are delivered ahead of the field deltas so a
/// proxy always sees an anchor spawn before its first delta.
pub fn collect(
    world: &World,
    baseline: &mut HashMap<NetId, AnchorBaseline>,
    queued: Vec<ReplicationMessage>,
    tick: u64,
) -> ReplicationBatch {
    let mut messages = queued;

    for message in &messages {
        if let ReplicationMessage::AnchorDestroyed { anchor } = message {
            baseline.remove(anchor);
        }
    }

    // Deltas in net-id order, so identical runs serialize identically.
    let mut deltas: Vec<(NetId, Vec<AnchorField>)> = Vec::new();
    for (_entity, (state, net)) in world.query::<(&AnchorState, &NetIdentity)>().iter() {
        let Some(prev) = baseline.get_mut(&net.id) else {
            continue;
        };
        let mut fields = Vec::new();
        if state.is_live != prev.is_live {
            fields.push(AnchorField::IsLive {
                value: state.is_live,
            });
            prev.is_live = state.is_live;
        }
        if state.dynamic_speed != prev.dynamic_speed {
            fields.push(AnchorField::DynamicSpeed {
                value: state.dynamic_speed,
            });
            prev.dynamic_speed = state.dynamic_speed;
        }
        if state.pull_target != prev.pull_target {
            fields.push(AnchorField::PullTarget {
                value: state.pull_target,
            });
            prev.pull_target = state.pull_target;
        }
        if state.tracked_position != prev.tracked_position {
            fields.push(AnchorField::TrackedPosition {
                value: state.tracked_position,
            });
            prev.tracked_position = state.tracked_position;
        }
        if !fields.is_empty() {
            deltas.push((net.id, fields));
        }
    }
    deltas.sort_by_key(|(id, _)| *id);
    messages.extend(
        deltas
            .into_iter()
            .map(|(anchor, fields)| ReplicationMessage::AnchorDelta { anchor, fields }),
    );

    ReplicationBatch { tick, messages }
}

/// Errors crossing the transport boundary.
#[derive(Debug, thiserror::Error)]
pub enum ReplicationError {
    /// Failed to encode a batch to JSON.
    #[error("failed to encode replication batch: {0}")]
    Encode(#[source] serde_json::Error),

    /// Failed to decode a batch from JSON.
    #[error("failed to decode replication batch: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Encode a batch for the transport.
///
/// # Errors
///
/// Returns [`ReplicationError::Encode`] if serialisation fails.
pub fn encode(batch: &ReplicationBatch) -> Result<String, ReplicationError> {
    serde_json::to_string(batch).map_err(ReplicationError::Encode)
}

/// Decode a batch received from the transport.
///
/// # Errors
///
/// Returns [`ReplicationError::Decode`] if deserialisation fails.
pub fn decode(payload: &str) -> Result<ReplicationBatch, ReplicationError> {
    serde_json::from_str(payload).map_err(ReplicationError::Decode)
}
