//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Which side of the replication boundary an engine instance is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetRole {
    /// The single decision-making instance. Only this role may originate
    /// state changes (arm, pull, destroy, speed).
    #[default]
    Authority,
    /// An observer copy. Reacts to replicated-state change notifications
    /// and dead-reckons projectile flight, nothing more.
    SimulatedProxy,
}

impl NetRole {
    pub fn is_authority(&self) -> bool {
        matches!(self, NetRole::Authority)
    }
}

/// Collision response of a collider volume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionResponse {
    /// Volume is inert; sweeps pass through it and it registers no hits.
    /// Anchors spawn with this response so they cannot clip their spawner.
    #[default]
    Ignore,
    /// Volume blocks sweeps and registers hits.
    Block,
}
