//! HDMI matrix controller entry point.
//!
//! Wires together the infrastructure services and starts the Tokio async
//! runtime. The graphical shell is an external collaborator that drives the
//! commands in `infrastructure::ui_bridge`; this binary is the headless
//! variant, which loads state, reports device reachability, and parks until
//! Ctrl-C.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ AppState::new()        -- loads config + names, builds use cases
//!  └─ check_connection       -- one probe task, result logged
//!  └─ park until Ctrl-C
//! ```

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use matrix_ctl::infrastructure::ui_bridge::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("HDMI matrix controller starting");

    // Load configuration and initialise shared state.
    let state = AppState::new();

    {
        let config = state.config.lock().await;
        info!(
            device = %config.endpoint(),
            routes = config.output_mappings.len(),
            "configuration loaded"
        );
    }

    // ── Initial connectivity check ────────────────────────────────────────────
    // Runs on its own task; an unreachable matrix only costs this log line.
    let probe_state = Arc::clone(&state);
    tokio::spawn(async move {
        let result = ui_bridge::check_connection(probe_state).await;
        match (result.data, result.error) {
            (Some(true), _) => info!("matrix is reachable"),
            (Some(false), _) => warn!("matrix is not reachable"),
            (_, Some(e)) => warn!("connectivity check could not run: {e}"),
            _ => {}
        }
    });

    info!("HDMI matrix controller ready.  Press Ctrl-C to exit.");

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");

    // Fold live routing back into the config file before exiting.
    let result = ui_bridge::persist(Arc::clone(&state)).await;
    if let Some(e) = result.error {
        warn!("failed to persist state on shutdown: {e}");
    }

    info!("HDMI matrix controller stopped");
    Ok(())
}
