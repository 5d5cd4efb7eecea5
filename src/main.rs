// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Day Explorer API Server
//!
//! Suggests one-day itineraries for a place using a generative language
//! model and serves them as an activity list plus map pins.

use day_explorer::{
    config::Config,
    services::{GeminiClient, ItineraryService, SessionStore},
    AppState,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Sessions idle longer than this are dropped.
const SESSION_MAX_IDLE_MINUTES: i64 = 60;
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(
        port = config.port,
        model = %config.generation_model,
        "Starting Day Explorer API"
    );

    let generator = GeminiClient::new(&config).expect("Failed to initialize generation client");
    let itinerary_service = ItineraryService::new(Arc::new(generator));

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        itinerary_service,
        sessions: SessionStore::new(),
    });

    spawn_session_sweeper(state.clone());

    // Build router
    let app = day_explorer::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Periodically drop idle sessions so the in-memory store stays bounded.
fn spawn_session_sweeper(state: Arc<AppState>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let evicted = state
                .sessions
                .evict_idle(chrono::Duration::minutes(SESSION_MAX_IDLE_MINUTES));
            if evicted > 0 {
                tracing::info!(
                    evicted,
                    remaining = state.sessions.len(),
                    "Evicted idle sessions"
                );
            }
        }
    });
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
                .add_directive("day_explorer=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
