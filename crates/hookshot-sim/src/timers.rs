//! One-shot deferred callbacks keyed by entity.
//!
//! The only deferred operation in the simulation is the anchor arming
//! delay. Entries are cancelled when their entity is despawned, so a timer
//! can never fire for a dead anchor.

use hecs::Entity;

use hookshot_core::types::NetId;

/// A single scheduled one-shot callback.
#[derive(Debug, Clone, Copy)]
struct OneShotTimer {
    entity: Entity,
    anchor: NetId,
    fire_at_secs: f64,
}

/// Queue of pending one-shot timers.
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: Vec<OneShotTimer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a one-shot callback for `anchor` at the given sim time.
    pub fn schedule(&mut self, entity: Entity, anchor: NetId, fire_at_secs: f64) {
        self.entries.push(OneShotTimer {
            entity,
            anchor,
            fire_at_secs,
        });
    }

    /// Remove and return every anchor whose timer is due at `now_secs`.
    pub fn fire_due(&mut self, now_secs: f64) -> Vec<NetId> {
        let mut due = Vec::new();
        self.entries.retain(|timer| {
            if timer.fire_at_secs <= now_secs {
                due.push(timer.anchor);
                false
            } else {
                true
            }
        });
        due
    }

    /// Drop all timers belonging to a despawned entity.
    pub fn cancel(&mut self, entity: Entity) {
        self.entries.retain(|timer| timer.entity != entity);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hecs::World;

    #[test]
    fn test_fire_due_removes_entries() {
        let mut world = World::new();
        let e = world.spawn(());
        let mut timers = TimerQueue::new();
        timers.schedule(e, NetId(1), 0.2);
        timers.schedule(e, NetId(2), 0.5);

        assert!(timers.fire_due(0.1).is_empty());
        assert_eq!(timers.len(), 2);

        let due = timers.fire_due(0.3);
        assert_eq!(due, vec![NetId(1)]);
        assert_eq!(timers.len(), 1);

        let due = timers.fire_due(1.0);
        assert_eq!(due, vec![NetId(2)]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_cancel_drops_entity_timers() {
        let mut world = World::new();
        let a = world.spawn(());
        let b = world.spawn(());
        let mut timers = TimerQueue::new();
        timers.schedule(a, NetId(1), 0.2);
        timers.schedule(b, NetId(2), 0.2);

        timers.cancel(a);
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.fire_due(1.0), vec![NetId(2)]);
    }
}
