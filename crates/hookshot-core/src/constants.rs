//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Anchor defaults ---

/// How quickly a pulled entity is interpolated toward the anchor
/// (exponential interp speed, 1/s).
pub const ANCHOR_PULL_SPEED: f64 = 5.0;

/// Maximum distance the anchor may stray from its spawn location before it
/// is destroyed (units).
pub const ANCHOR_MAX_DISTANCE: f64 = 2000.0;

/// Delay before the anchor's collision goes live (seconds). Provides a
/// small buffer so it cannot collide with whatever spawned it.
pub const ANCHOR_TIME_UNTIL_LIVE: f64 = 0.2;

/// Proximity at which an active pull is cut off and the anchor expires
/// (units).
pub const ANCHOR_CUTOFF_DISTANCE: f64 = 500.0;

/// Radius of the anchor's sphere collider (units).
pub const ANCHOR_COLLIDER_RADIUS: f64 = 8.0;

// --- Collision sweeps ---

/// Sample interval for stepped collision sweeps (units). Half the anchor
/// collider radius, so a swept sphere cannot tunnel through geometry
/// thicker than its own radius.
pub const SWEEP_SAMPLE_INTERVAL: f64 = 4.0;
