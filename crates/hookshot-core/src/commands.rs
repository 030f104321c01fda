//! Commands sent from the game layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary. Every
//! variant is authority-gated: a proxy engine silently ignores them.

use serde::{Deserialize, Serialize};

use crate::types::NetId;

/// All possible anchor commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AnchorCommand {
    /// Update the anchor's projectile speed, preserving direction.
    SetSpeed { anchor: NetId, speed: f64 },
    /// Begin pulling the target entity. No-op if a pull is already active.
    StartPull { anchor: NetId, target: NetId },
    /// Stop pulling. When `destroy_self` is set the anchor broadcasts its
    /// expiry and is destroyed.
    StopPull { anchor: NetId, destroy_self: bool },
    /// Flip the anchor's armed flag and re-apply its collision response.
    ActivateCollision { anchor: NetId },
}
