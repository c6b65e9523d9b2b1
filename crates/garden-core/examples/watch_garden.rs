//! Example: Watching Synthetic Garden Telemetry
//!
//! This example spawns the dashboard refresh loop over a seeded synthetic
//! source and prints the latest reading of each published snapshot as JSON.
//!
//! Run with: `cargo run --example watch_garden -- [SEED]`

use std::env;
use std::sync::Arc;
use std::time::Duration;

use garden_core::plants::default_catalog;
use garden_core::{DashboardViewModel, RefreshOptions, SyntheticSource, SystemClock};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let seed = env::args()
        .nth(1)
        .map(|s| s.parse::<u64>())
        .transpose()?
        .unwrap_or(42);

    let vm = Arc::new(DashboardViewModel::new(
        Arc::new(SyntheticSource::seeded(seed)),
        Arc::new(SystemClock::utc()),
        default_catalog(),
    ));

    let options = RefreshOptions::builder()
        .period(Duration::from_secs(5))
        .build();
    let handle = vm.spawn(options)?;
    let mut rx = vm.subscribe();

    println!("Watching 3 snapshots (seed {})...", seed);
    for generation in 1..=3 {
        let state = rx.wait_for(|s| s.generation >= generation && !s.loading).await?;
        if let Some(snapshot) = state.visible()
            && let Some(latest) = snapshot.latest()
        {
            println!("#{} {}", snapshot.generation, serde_json::to_string(latest)?);
        }
    }

    handle.shutdown().await;
    println!("Done.");
    Ok(())
}
