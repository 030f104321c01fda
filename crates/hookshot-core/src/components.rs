//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::CollisionResponse;
use crate::types::{NetId, Position};

/// Marks an entity as a hookshot anchor projectile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Anchor;

/// Marks an entity as static blocking geometry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle;

/// Marks an entity the anchor may pull.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pullable;

/// Binds an entity to its stable cross-instance identity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NetIdentity {
    pub id: NetId,
}

/// Author-time anchor tuning. Immutable after spawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorConfig {
    /// Exponential interp speed of the pull (1/s).
    pub pull_speed: f64,
    /// Maximum travel distance from the spawn location (units).
    pub max_distance: f64,
    /// Arming delay before collision goes live (seconds).
    pub time_until_live: f64,
    /// Pull-termination proximity (units).
    pub cutoff_distance: f64,
    /// Arm immediately at spawn instead of waiting out the delay.
    pub spawn_armed: bool,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            pull_speed: ANCHOR_PULL_SPEED,
            max_distance: ANCHOR_MAX_DISTANCE,
            time_until_live: ANCHOR_TIME_UNTIL_LIVE,
            cutoff_distance: ANCHOR_CUTOFF_DISTANCE,
            spawn_armed: false,
        }
    }
}

/// The anchor's authoritative state machine.
///
/// `is_live`, `dynamic_speed`, `pull_target`, and `tracked_position` are
/// replicated to observers field-by-field; `spawn_location` is captured at
/// spawn on the authority and never replicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorState {
    /// Whether the collider is armed (blocking).
    pub is_live: bool,
    /// Commanded projectile speed magnitude (units/s).
    pub dynamic_speed: f64,
    /// Entity currently being pulled. Absence = no pull in progress.
    pub pull_target: Option<NetId>,
    /// Last computed interpolated position of the pulled entity. The sole
    /// channel by which the pulled entity's placement is advanced.
    pub tracked_position: Position,
    /// Fixed at spawn; bounds the anchor's travel distance.
    pub spawn_location: Position,
}

impl AnchorState {
    pub fn at_spawn(spawn_location: Position, dynamic_speed: f64) -> Self {
        Self {
            is_live: false,
            dynamic_speed,
            pull_target: None,
            tracked_position: Position::default(),
            spawn_location,
        }
    }
}

/// Sphere collision volume.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Collider {
    pub radius: f64,
    pub response: CollisionResponse,
}

/// Axis-aligned box collision volume.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoxCollider {
    pub half_x: f64,
    pub half_y: f64,
    pub half_z: f64,
    pub response: CollisionResponse,
}
