// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Day Explorer: one-day itineraries for any place.
//!
//! This crate provides the backend API that asks a generative language model
//! for suggested activities, validates what comes back, and serves the result
//! as a list and a map of pins.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::{ItineraryService, SessionStore};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub itinerary_service: ItineraryService,
    pub sessions: SessionStore,
}
