// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Itinerary service: prompt, generate, extract.
//!
//! Failures from the generation API are never surfaced as errors here. A
//! failed search yields an empty list and a failed replacement yields `None`,
//! so the caller always has something to render.

use crate::models::{ActivityRecord, Itinerary, ItinerarySource, SearchFilters};
use crate::services::extract::{extract_list, extract_single};
use crate::services::gemini::TextGenerator;
use crate::services::prompt::{itinerary_prompt, replacement_prompt};
use std::sync::Arc;

/// Issues generation requests and turns responses into activity lists.
#[derive(Clone)]
pub struct ItineraryService {
    generator: Arc<dyn TextGenerator>,
}

impl ItineraryService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Fetch a fresh one-day itinerary for `place`.
    ///
    /// `place` must already be trimmed and non-empty.
    pub async fn fetch_itinerary(&self, place: &str, filters: SearchFilters) -> Itinerary {
        let prompt = itinerary_prompt(place, filters);

        let text = match self.generator.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    place = %place,
                    error = %e,
                    rate_limited = e.is_rate_limited(),
                    "Error fetching itinerary"
                );
                return Itinerary::new(place, Vec::new(), ItinerarySource::Unavailable);
            }
        };

        let activities = extract_list(&text);
        if activities.is_empty() {
            tracing::info!(place = %place, "No valid activities extracted, using placeholder");
            return Itinerary::new(
                place,
                vec![ActivityRecord::placeholder(place)],
                ItinerarySource::Placeholder,
            );
        }

        tracing::info!(place = %place, count = activities.len(), "Itinerary generated");
        Itinerary::new(place, activities, ItinerarySource::Generated)
    }

    /// Ask for one alternative to `current[index]`.
    ///
    /// Returns `None` for an out-of-range index or when no valid record comes
    /// back; the caller keeps the original record in that case.
    pub async fn fetch_replacement(
        &self,
        place: &str,
        current: &[ActivityRecord],
        index: usize,
        filters: SearchFilters,
    ) -> Option<ActivityRecord> {
        if index >= current.len() {
            tracing::warn!(index, len = current.len(), "Replacement index out of range");
            return None;
        }

        let prompt = replacement_prompt(place, current, index, filters)
            .map_err(|e| tracing::error!(error = %e, "Failed to serialize current itinerary"))
            .ok()?;

        let text = self
            .generator
            .generate(&prompt)
            .await
            .map_err(|e| {
                tracing::warn!(place = %place, index, error = %e, "Error fetching replacement");
            })
            .ok()?;

        let replacement = extract_single(&text);
        if replacement.is_none() {
            tracing::info!(place = %place, index, "No valid replacement extracted");
        }
        replacement
    }
}

/// Splice `replacement` into `list` at `index`.
///
/// Returns the list and whether anything changed. `None` or an out-of-range
/// index leaves the list untouched.
pub fn replace_at(
    mut list: Vec<ActivityRecord>,
    index: usize,
    replacement: Option<ActivityRecord>,
) -> (Vec<ActivityRecord>, bool) {
    match (replacement, list.get_mut(index)) {
        (Some(record), Some(slot)) => {
            *slot = record;
            (list, true)
        }
        _ => (list, false),
    }
}
