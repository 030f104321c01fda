//! Entity spawn factories for setting up scenario worlds.
//!
//! Scenario geometry is part of world construction, not replication: run
//! the same factories in the same order on every instance (same seed) and
//! the static net ids line up across the boundary.

use rand::Rng;

use hookshot_core::types::{NetId, Position};

use crate::engine::SimulationEngine;

/// Net identities of the firing-range scenario.
#[derive(Debug, Clone, Copy)]
pub struct RangeLayout {
    /// The wall the anchor is fired at.
    pub wall: NetId,
    /// The pullable player stand-in at the firing point.
    pub player: NetId,
}

/// The demo scenario: a wall 1500 units north of the firing point and a
/// pullable player entity at the origin.
pub fn setup_range(engine: &mut SimulationEngine) -> RangeLayout {
    let wall = spawn_wall(engine, Position::new(0.0, 1500.0, 0.0), 400.0, 8.0, 200.0);
    let player = engine.spawn_pullable(Position::new(0.0, 0.0, 0.0), 20.0);
    RangeLayout { wall, player }
}

/// Spawn a box wall at `center`.
pub fn spawn_wall(
    engine: &mut SimulationEngine,
    center: Position,
    half_x: f64,
    half_y: f64,
    half_z: f64,
) -> NetId {
    engine.spawn_obstacle_box(center, half_x, half_y, half_z)
}

/// Spawn a spherical pillar at `center`.
pub fn spawn_pillar(engine: &mut SimulationEngine, center: Position, radius: f64) -> NetId {
    engine.spawn_obstacle_sphere(center, radius)
}

/// Scatter `count` pillars in a ring between 600 and 1600 units from the
/// origin. Deterministic for a given engine seed.
pub fn spawn_pillar_field(engine: &mut SimulationEngine, count: usize) -> Vec<NetId> {
    let mut ids = Vec::with_capacity(count);
    for _ in 0..count {
        let (bearing, range, radius) = {
            let rng = engine.rng_mut();
            (
                rng.gen_range(0.0..std::f64::consts::TAU),
                rng.gen_range(600.0..1600.0),
                rng.gen_range(20.0..60.0),
            )
        };
        let position = Position::new(range * bearing.sin(), range * bearing.cos(), 0.0);
        ids.push(spawn_pillar(engine, position, radius));
    }
    ids
}
