// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Itinerary routes: search, replace one activity, map views.

use crate::error::{AppError, Result};
use crate::models::map::{pins_for, to_feature_collection};
use crate::models::{ActivityRecord, Itinerary, ItinerarySource, MapView, SearchFilters};
use crate::services::SessionStore;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::SecondsFormat;
use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const MAX_PLACE_LEN: usize = 200;
const MAX_SESSION_ID_LEN: usize = 64;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/itinerary", post(search))
        .route("/api/itinerary/{session_id}", get(get_itinerary))
        .route("/api/itinerary/{session_id}/replace", post(replace_activity))
        .route("/api/itinerary/{session_id}/map", get(get_map))
        .route("/api/itinerary/{session_id}/geojson", get(get_geojson))
}

// ─── Responses ───────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ItineraryResponse {
    pub session_id: String,
    pub place: String,
    pub activities: Vec<ActivityRecord>,
    pub source: ItinerarySource,
    /// True when the list is empty or only the placeholder.
    pub retry_suggested: bool,
    pub generated_at: String,
    pub map: MapView,
}

impl ItineraryResponse {
    fn new(session_id: &str, itinerary: Itinerary) -> Self {
        let map = MapView::from_records(&itinerary.activities);
        let retry_suggested = itinerary.retry_suggested();
        Self {
            session_id: session_id.to_string(),
            generated_at: itinerary
                .generated_at
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            place: itinerary.place,
            activities: itinerary.activities,
            source: itinerary.source,
            retry_suggested,
            map,
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ReplaceResponse {
    /// False when no valid alternative came back; the list is unchanged.
    pub replaced: bool,
    pub itinerary: ItineraryResponse,
}

// ─── Search ──────────────────────────────────────────────────

#[derive(Deserialize)]
struct SearchRequest {
    place: String,
    #[serde(default)]
    include_restaurants: bool,
    #[serde(default)]
    include_religious: bool,
    /// Existing session to replace the list of; a new one is created if absent.
    session_id: Option<String>,
}

/// Start a fresh itinerary for a place. The previous list of the session is discarded.
async fn search(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<ItineraryResponse>> {
    let place = validate_place(&req.place)?;
    let session_id = match req.session_id {
        Some(id) => validate_session_id(&id)?.to_string(),
        None => SessionStore::new_session_id()?,
    };
    let filters = SearchFilters {
        include_restaurants: req.include_restaurants,
        include_religious: req.include_religious,
    };

    tracing::debug!(
        session = %session_id,
        place = %place,
        ?filters,
        "Searching itinerary"
    );

    let ticket = state.sessions.begin_search(&session_id);
    let itinerary = state
        .itinerary_service
        .fetch_itinerary(place, filters)
        .await;

    if !state
        .sessions
        .commit_search(&session_id, ticket, filters, itinerary.clone())
    {
        return Err(AppError::Superseded(session_id));
    }

    Ok(Json(ItineraryResponse::new(&session_id, itinerary)))
}

/// Get the session's current itinerary.
async fn get_itinerary(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<ItineraryResponse>> {
    let itinerary = current_itinerary(&state, &session_id)?;
    Ok(Json(ItineraryResponse::new(&session_id, itinerary)))
}

// ─── Replace ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct ReplaceRequest {
    index: usize,
}

/// Replace one activity with an alternative that does not duplicate the others.
async fn replace_activity(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    Json(req): Json<ReplaceRequest>,
) -> Result<Json<ReplaceResponse>> {
    validate_session_id(&session_id)?;

    // Any replacement still in flight for this session is stale from here on.
    let snapshot = state.sessions.begin_replacement(&session_id, req.index)?;

    let replacement = state
        .itinerary_service
        .fetch_replacement(
            &snapshot.itinerary.place,
            &snapshot.itinerary.activities,
            req.index,
            snapshot.filters,
        )
        .await;

    let (itinerary, replaced) = state
        .sessions
        .commit_replacement(&session_id, snapshot.ticket, req.index, replacement)
        .ok_or_else(|| AppError::Superseded(session_id.clone()))?;

    tracing::info!(
        session = %session_id,
        index = req.index,
        replaced,
        "Replacement request finished"
    );

    Ok(Json(ReplaceResponse {
        replaced,
        itinerary: ItineraryResponse::new(&session_id, itinerary),
    }))
}

// ─── Map ─────────────────────────────────────────────────────

/// Map pane data: pins, center and bounds, or the "no locations" view.
async fn get_map(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<MapView>> {
    let itinerary = current_itinerary(&state, &session_id)?;
    Ok(Json(MapView::from_records(&itinerary.activities)))
}

/// Pins as a GeoJSON FeatureCollection.
async fn get_geojson(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<FeatureCollection>> {
    let itinerary = current_itinerary(&state, &session_id)?;
    Ok(Json(to_feature_collection(&pins_for(&itinerary.activities))))
}

// ─── Helpers ─────────────────────────────────────────────────

fn current_itinerary(state: &AppState, session_id: &str) -> Result<Itinerary> {
    validate_session_id(session_id)?;
    state
        .sessions
        .current(session_id)
        .ok_or_else(|| AppError::NotFound(format!("No itinerary for session {}", session_id)))
}

fn validate_place(raw: &str) -> Result<&str> {
    let place = raw.trim();
    if place.is_empty() {
        return Err(AppError::BadRequest("'place' must not be empty".to_string()));
    }
    if place.chars().count() > MAX_PLACE_LEN {
        return Err(AppError::BadRequest(format!(
            "'place' must be at most {} characters",
            MAX_PLACE_LEN
        )));
    }
    Ok(place)
}

fn validate_session_id(raw: &str) -> Result<&str> {
    let valid = !raw.is_empty()
        && raw.len() <= MAX_SESSION_ID_LEN
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(raw)
    } else {
        Err(AppError::BadRequest("Invalid session id".to_string()))
    }
}
