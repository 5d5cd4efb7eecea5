// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-session itinerary state with request sequencing.
//!
//! Every search and every replacement takes a ticket from a process-wide
//! monotonic counter and becomes the session's latest request. A response is
//! only applied if its ticket is still the latest when it arrives; a slower,
//! older response is discarded instead of overwriting newer state. So a
//! replacement goes stale when any newer search or replacement starts, and a
//! search goes stale when any newer request starts after it.
//!
//! No lock is held while a generation call is in flight.

use crate::error::AppError;
use crate::models::{ActivityRecord, Itinerary, ItinerarySource, SearchFilters};
use crate::services::itinerary::replace_at;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use ring::rand::{SecureRandom, SystemRandom};
use std::sync::atomic::{AtomicU64, Ordering};

const SESSION_ID_BYTES: usize = 16;

/// State kept for one browsing session.
#[derive(Debug, Clone)]
struct SessionState {
    /// Ticket of the most recently started request, search or replacement.
    latest: u64,
    /// Ticket of the most recently started search.
    latest_search: u64,
    /// Ticket of the search that produced `itinerary`.
    list_search: u64,
    filters: SearchFilters,
    itinerary: Option<Itinerary>,
    touched_at: DateTime<Utc>,
}

/// A copy of a session's current list, taken when a replacement starts.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    /// Ticket of the replacement request this snapshot belongs to.
    pub ticket: u64,
    pub filters: SearchFilters,
    pub itinerary: Itinerary,
}

/// In-memory session store. Nothing survives a restart.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<String, SessionState>,
    next_ticket: AtomicU64,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh random session id (hex).
    pub fn new_session_id() -> Result<String, AppError> {
        let mut bytes = [0u8; SESSION_ID_BYTES];
        SystemRandom::new()
            .fill(&mut bytes)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to generate session id")))?;
        Ok(hex::encode(bytes))
    }

    fn take_ticket(&self) -> u64 {
        self.next_ticket.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Register a new search for `session` and return its ticket.
    pub fn begin_search(&self, session: &str) -> u64 {
        let ticket = self.take_ticket();
        let now = Utc::now();

        self.sessions
            .entry(session.to_string())
            .and_modify(|s| {
                s.latest = ticket;
                s.latest_search = ticket;
                s.touched_at = now;
            })
            .or_insert_with(|| SessionState {
                latest: ticket,
                latest_search: ticket,
                list_search: 0,
                filters: SearchFilters::default(),
                itinerary: None,
                touched_at: now,
            });

        ticket
    }

    /// Install a search result if `ticket` is still the session's latest.
    ///
    /// Returns `false` when the result was discarded as stale.
    pub fn commit_search(
        &self,
        session: &str,
        ticket: u64,
        filters: SearchFilters,
        itinerary: Itinerary,
    ) -> bool {
        let Some(mut state) = self.sessions.get_mut(session) else {
            return false;
        };

        if state.latest != ticket {
            tracing::info!(
                session = %session,
                ticket,
                latest = state.latest,
                "Discarding stale itinerary response"
            );
            return false;
        }

        state.list_search = ticket;
        state.filters = filters;
        state.itinerary = Some(itinerary);
        state.touched_at = Utc::now();
        true
    }

    /// Current itinerary for a session, if a search has completed.
    pub fn current(&self, session: &str) -> Option<Itinerary> {
        self.sessions.get(session)?.itinerary.clone()
    }

    /// Register a replacement of `index` and snapshot the list it works on.
    ///
    /// The returned ticket becomes the session's latest request, so any
    /// replacement still in flight for this session is now stale. Fails with
    /// `NotFound` for an unknown session, `Superseded` while a search is in
    /// flight (or none has completed), and `BadRequest` for an out-of-range
    /// index. A rejected request leaves the session's latest ticket alone.
    pub fn begin_replacement(
        &self,
        session: &str,
        index: usize,
    ) -> Result<SessionSnapshot, AppError> {
        let mut state = self
            .sessions
            .get_mut(session)
            .ok_or_else(|| AppError::NotFound(format!("Session {} not found", session)))?;

        if state.latest_search != state.list_search {
            return Err(AppError::Superseded(session.to_string()));
        }
        let Some(itinerary) = state.itinerary.clone() else {
            return Err(AppError::Superseded(session.to_string()));
        };

        let len = itinerary.activities.len();
        if index >= len {
            return Err(AppError::BadRequest(format!(
                "Index {} out of range for {} activities",
                index, len
            )));
        }

        let ticket = self.take_ticket();
        state.latest = ticket;
        state.touched_at = Utc::now();

        Ok(SessionSnapshot {
            ticket,
            filters: state.filters,
            itinerary,
        })
    }

    /// Apply the replacement registered as `ticket`.
    ///
    /// Returns the resulting itinerary and whether the record was replaced,
    /// or `None` if a newer search or replacement made this one stale. A
    /// successful replacement turns a placeholder list into a generated one.
    pub fn commit_replacement(
        &self,
        session: &str,
        ticket: u64,
        index: usize,
        replacement: Option<ActivityRecord>,
    ) -> Option<(Itinerary, bool)> {
        let mut state = self.sessions.get_mut(session)?;

        if state.latest != ticket {
            tracing::info!(
                session = %session,
                ticket,
                latest = state.latest,
                "Discarding stale replacement response"
            );
            return None;
        }

        state.touched_at = Utc::now();
        let itinerary = state.itinerary.as_mut()?;

        let activities = std::mem::take(&mut itinerary.activities);
        let (activities, replaced) = replace_at(activities, index, replacement);
        itinerary.activities = activities;
        if replaced && itinerary.source == ItinerarySource::Placeholder {
            itinerary.source = ItinerarySource::Generated;
        }

        Some((itinerary.clone(), replaced))
    }

    /// Drop sessions untouched for longer than `max_idle`. Returns how many were dropped.
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        let cutoff = Utc::now() - max_idle;
        let before = self.sessions.len();
        self.sessions.retain(|_, s| s.touched_at >= cutoff);
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
