//! Saving-Ideas host entry point
//!
//! Composes the host once, then holds the published registry until Ctrl+C.

use anyhow::{Context, Result};
use host_config::ProcessHost;
use host_runtime::{release, Startup, StartupOptions};
use host_telemetry::{init_telemetry, TelemetryConfig};
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry = init_telemetry(TelemetryConfig::from_env()).context("failed to initialize telemetry")?;

    let ready = Startup::new(ProcessHost, StartupOptions::default())
        .run_once()
        .context("host startup aborted")?;

    for source in ready.configuration().sources() {
        debug!(source = %source.name, rank = source.rank, status = %source.status, "Configuration layer");
    }
    for capability in ready.registry().construction_order() {
        debug!(
            capability = %capability,
            lifetime = ?ready.registry().lifetime_of(*capability),
            "Capability available"
        );
    }

    info!("Host is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    info!("Shutting down");
    drop(ready);
    release();

    Ok(())
}
