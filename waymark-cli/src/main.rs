//! Waymark CLI - terminal front end for the location session demo
//!
//! Runs the full demo wiring (simulated provider, location session,
//! headless map, controller) on a single-threaded runtime and streams the
//! session's log output to the terminal.

use std::process;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use waymark::app::{AppConfig, AppError, WaymarkApp, DEFAULT_DEMO_ADDRESS};

#[derive(Parser, Debug)]
#[command(name = "waymark", version, about = "Location session and map annotation demo")]
struct Cli {
    /// Address for the demonstration forward geocode at startup
    #[arg(long, default_value = DEFAULT_DEMO_ADDRESS)]
    address: String,

    /// Number of waypoints on the simulated route into the geofence
    #[arg(long, default_value_t = 5)]
    steps: usize,

    /// Pause between simulated position fixes, in milliseconds
    #[arg(long, default_value_t = 500)]
    interval_ms: u64,

    /// Report significant-change tracking as unavailable
    #[arg(long)]
    no_tracking: bool,
}

fn main() {
    init_logging();

    if let Err(error) = run(Cli::parse()) {
        eprintln!("Error: {}", error);
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), AppError> {
    // All callbacks share one sequential event queue, so a single-threaded
    // runtime is enough.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::RuntimeCreation(e.to_string()))?;

    let config = AppConfig::default()
        .with_demo_address(cli.address)
        .with_tracking_available(!cli.no_tracking)
        .with_route_steps(cli.steps)
        .with_step_interval(Duration::from_millis(cli.interval_ms));

    runtime.block_on(async {
        let app = WaymarkApp::start(config)?;

        tokio::select! {
            _ = app.run_demo_route() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting down");
            }
        }

        app.shutdown().await;
        Ok(())
    })
}
