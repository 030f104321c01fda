//! Replication messages — authoritative state delivered to observers.
//!
//! The authority diffs each anchor's replicated fields against the last
//! values it sent and emits only changes, batched per tick. Proxies apply
//! each field and then run its paired change-notification handler. How the
//! bytes move between instances is the transport's business, not ours.

use serde::{Deserialize, Serialize};

use crate::components::AnchorConfig;
use crate::types::{NetId, Position, Velocity};

/// A single replicated anchor field.
///
/// Each variant has a paired change handler on the receiving side:
/// `IsLive` re-applies the collision response, `DynamicSpeed` re-normalizes
/// the projectile velocity, `TrackedPosition` re-applies the pulled
/// entity's placement, `PullTarget` rebinds the local target reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field")]
pub enum AnchorField {
    IsLive { value: bool },
    DynamicSpeed { value: f64 },
    PullTarget { value: Option<NetId> },
    TrackedPosition { value: Position },
}

/// One tick's worth of replication traffic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplicationBatch {
    pub tick: u64,
    pub messages: Vec<ReplicationMessage>,
}

/// A single replication message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ReplicationMessage {
    /// A new anchor exists; observers spawn a local proxy copy.
    AnchorSpawned {
        anchor: NetId,
        config: AnchorConfig,
        position: Position,
        velocity: Velocity,
        is_live: bool,
        dynamic_speed: f64,
    },
    /// Changed fields for an existing anchor.
    AnchorDelta {
        anchor: NetId,
        fields: Vec<AnchorField>,
    },
    /// The anchor was destroyed; observers despawn their copy.
    AnchorDestroyed { anchor: NetId },
}

impl ReplicationBatch {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
