//! Headless hookshot demo.
//!
//! Runs an authority engine and a proxy engine in lockstep over the
//! in-process replication stream: fires an anchor at a wall, reels the
//! player in when it latches, and logs every event on both sides until the
//! anchor expires.

use tracing::info;
use tracing_subscriber::EnvFilter;

mod game_loop;

use game_loop::DemoConfig;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let outcome = game_loop::run_demo(DemoConfig::default());
    info!(
        ticks = outcome.ticks,
        authority_events = outcome.authority_events.len(),
        proxy_events = outcome.proxy_events.len(),
        "demo complete"
    );
}
