//! Events emitted by the simulation for the game layer.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::types::{NetId, Position, Transform};

/// Details of a blocking collision reported by a sweep.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HitInfo {
    /// Contact point on the blocking surface.
    pub position: Position,
    /// Unit surface normal at the contact point, facing the swept entity.
    pub normal: DVec3,
    /// The blocking entity, when it carries a net identity.
    pub blocker: Option<NetId>,
}

/// Events broadcast by anchors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AnchorEvent {
    /// The armed anchor struck a surface while no pull was active.
    HookshotHit { anchor: NetId, hit: HitInfo },
    /// An in-progress pull's movement step was obstructed. This is also
    /// how callers detect that a pull has dragged its target home.
    PullBlocked { anchor: NetId, hit: HitInfo },
    /// Fired immediately before the anchor is destroyed, carrying its
    /// final pose.
    AnchorExpire { anchor: NetId, transform: Transform },
}

impl AnchorEvent {
    /// The anchor this event belongs to.
    pub fn anchor(&self) -> NetId {
        match self {
            AnchorEvent::HookshotHit { anchor, .. }
            | AnchorEvent::PullBlocked { anchor, .. }
            | AnchorEvent::AnchorExpire { anchor, .. } => *anchor,
        }
    }
}
