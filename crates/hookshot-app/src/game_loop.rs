//! Demo loop — drives the authority engine at the fixed tick rate and
//! mirrors every replication batch into a proxy engine, the way a
//! connected observer would receive it.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use hookshot_core::commands::AnchorCommand;
use hookshot_core::components::AnchorConfig;
use hookshot_core::constants::TICK_RATE;
use hookshot_core::enums::NetRole;
use hookshot_core::events::AnchorEvent;
use hookshot_core::types::{Position, Velocity};
use hookshot_sim::engine::{SimConfig, SimulationEngine};
use hookshot_sim::world_setup;

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Demo settings.
pub struct DemoConfig {
    /// Scenario seed; both instances must share it.
    pub seed: u64,
    /// Pace the loop at the nominal tick rate instead of free-running.
    pub realtime: bool,
    /// Safety bound on the number of ticks.
    pub max_ticks: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            seed: 7,
            realtime: true,
            max_ticks: 600,
        }
    }
}

/// What the demo run produced.
pub struct DemoOutcome {
    pub ticks: u64,
    pub authority_events: Vec<AnchorEvent>,
    pub proxy_events: Vec<AnchorEvent>,
}

/// Fire an anchor at the range wall, start reeling the player in on the
/// hit report, and run until the anchor expires.
pub fn run_demo(config: DemoConfig) -> DemoOutcome {
    let mut authority = SimulationEngine::new(SimConfig {
        seed: config.seed,
        role: NetRole::Authority,
    });
    let mut proxy = SimulationEngine::new(SimConfig {
        seed: config.seed,
        role: NetRole::SimulatedProxy,
    });

    // Scenario setup runs on both instances so static net ids line up.
    let layout = world_setup::setup_range(&mut authority);
    let _ = world_setup::setup_range(&mut proxy);

    let mut authority_events = Vec::new();
    let mut proxy_events = Vec::new();
    let Some(anchor) = authority.spawn_anchor(
        AnchorConfig::default(),
        Position::default(),
        Velocity::new(0.0, 1000.0, 0.0),
    ) else {
        return DemoOutcome {
            ticks: 0,
            authority_events,
            proxy_events,
        };
    };

    let mut next_tick_time = Instant::now();
    let mut ticks = 0;
    let mut expired = false;

    while ticks < config.max_ticks && !expired {
        let report = authority.tick();
        ticks = report.time.tick;

        for event in &report.events {
            info!(?event, "authority event");
            match event {
                AnchorEvent::HookshotHit { anchor: hit_anchor, hit } if *hit_anchor == anchor => {
                    debug!(blocker = ?hit.blocker, "anchor latched, reeling in");
                    authority.queue_command(AnchorCommand::StartPull {
                        anchor,
                        target: layout.player,
                    });
                }
                AnchorEvent::AnchorExpire { .. } => expired = true,
                _ => {}
            }
        }

        let applied = proxy.apply_batch(&report.replication);
        for event in &applied {
            info!(?event, "proxy event");
        }
        proxy_events.extend(applied);
        proxy.tick();

        authority_events.extend(report.events);

        if config.realtime {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind — reset to avoid a catch-up spiral.
                next_tick_time = now;
            }
        }
    }

    DemoOutcome {
        ticks,
        authority_events,
        proxy_events,
    }
}
