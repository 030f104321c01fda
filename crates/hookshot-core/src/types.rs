//! Fundamental geometric and simulation types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// 3D position in world space (engine units, Cartesian).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// 3D velocity in world space (units/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// An entity's pose: location plus horizontal heading.
/// Carried by the anchor-expire event as the final resting pose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Position,
    /// Heading in radians (0 = North, clockwise).
    pub heading: f64,
}

/// Stable cross-instance entity identity.
///
/// Allocated sequentially by each engine. Scenario entities are spawned in
/// the same order on every instance (same seed), so their ids line up;
/// runtime-spawned anchors reach proxies via replicated spawn messages.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NetId(pub u32);

impl std::fmt::Display for NetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "net:{}", self.0)
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

/// Deltas smaller than this snap straight to the interpolation target.
const INTERP_SNAP_DIST_SQ: f64 = 1e-8;

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Range to another position (3D distance).
    pub fn range_to(&self, other: &Position) -> f64 {
        DVec3::from(*self).distance(DVec3::from(*other))
    }

    /// Frame-rate-independent exponential interpolation toward `target`.
    ///
    /// Moves a constant fraction of the remaining delta per unit time:
    /// `self + delta * clamp(dt * speed, 0, 1)`. A non-positive speed or a
    /// negligible delta snaps to the target.
    pub fn interp_to(&self, target: &Position, dt: f64, speed: f64) -> Position {
        if speed <= 0.0 {
            return *target;
        }
        let current = DVec3::from(*self);
        let delta = DVec3::from(*target) - current;
        if delta.length_squared() < INTERP_SNAP_DIST_SQ {
            return *target;
        }
        let alpha = (dt * speed).clamp(0.0, 1.0);
        Position::from(current + delta * alpha)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Speed magnitude (units/s).
    pub fn speed(&self) -> f64 {
        DVec3::from(*self).length()
    }

    /// Heading in radians (0 = North, clockwise).
    pub fn heading(&self) -> f64 {
        self.x.atan2(self.y).rem_euclid(std::f64::consts::TAU)
    }

    /// Re-normalize to a new magnitude, preserving direction.
    /// A zero velocity has no direction and stays zero.
    pub fn with_speed(&self, new_speed: f64) -> Velocity {
        let v = DVec3::from(*self);
        match v.try_normalize() {
            Some(dir) => Velocity::from(dir * new_speed),
            None => *self,
        }
    }
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

impl From<Position> for DVec3 {
    fn from(p: Position) -> Self {
        DVec3::new(p.x, p.y, p.z)
    }
}

impl From<DVec3> for Position {
    fn from(v: DVec3) -> Self {
        Position::new(v.x, v.y, v.z)
    }
}

impl From<Velocity> for DVec3 {
    fn from(v: Velocity) -> Self {
        DVec3::new(v.x, v.y, v.z)
    }
}

impl From<DVec3> for Velocity {
    fn from(v: DVec3) -> Self {
        Velocity::new(v.x, v.y, v.z)
    }
}
