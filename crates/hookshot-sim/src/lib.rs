//! Simulation engine for the hookshot anchor.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate, and either
//! produces per-tick replication batches (authority) or applies them
//! (proxy). Completely headless, enabling deterministic testing.

pub mod engine;
pub mod replication;
pub mod sweep;
pub mod systems;
pub mod timers;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use hookshot_core as core;
