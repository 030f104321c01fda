//! Arming system: fires due one-shot timers.
//!
//! Runs on the authority only. Each returned anchor gets its collision
//! activated by the engine, completing the false→true live transition
//! scheduled at spawn.

use hookshot_core::types::NetId;

use crate::timers::TimerQueue;

/// Fire every timer due at `now_secs` and return the anchors to arm.
pub fn run(timers: &mut TimerQueue, now_secs: f64) -> Vec<NetId> {
    timers.fire_due(now_secs)
}
