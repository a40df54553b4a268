// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! FitBridge Tracker API Server
//!
//! Runs the fitness log store and its REST API: record logging, streaks,
//! XP levels, and calendar-period statistics for the FitBridge client.

use fitbridge_tracker::{
    config::Config,
    services::ActivityLedger,
    store::{spawn_mtime_poller, ActivityStore},
    AppState,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting FitBridge Tracker API");

    // Open the activity store (disk-backed if a data dir is configured)
    let store = match &config.data_dir {
        Some(dir) => {
            Arc::new(ActivityStore::open_disk(dir).expect("Failed to open data directory"))
        }
        None => {
            tracing::warn!("FITBRIDGE_DATA_DIR not set; records will not survive a restart");
            Arc::new(ActivityStore::open_memory())
        }
    };

    // Watch for writes from other processes sharing the data directory
    if config.poll_interval_secs > 0 {
        spawn_mtime_poller(store.clone(), Duration::from_secs(config.poll_interval_secs));
    }

    let ledger = ActivityLedger::new(store.clone());

    if config.demo_mode {
        tracing::info!("Demo mode enabled: empty session requests sign in the demo user");
    }

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        ledger,
    });

    // Build router
    let app = fitbridge_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to install ctrl+c handler");
            tracing::info!("Shutdown signal received");
        })
        .await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fitbridge_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
