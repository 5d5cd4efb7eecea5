// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! One-day itinerary for a place.

use super::ActivityRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Optional content filters chosen alongside the place name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SearchFilters {
    #[serde(default)]
    pub include_restaurants: bool,
    #[serde(default)]
    pub include_religious: bool,
}

/// Where the activities of an itinerary came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum ItinerarySource {
    /// At least one valid record was extracted from the model output.
    Generated,
    /// Nothing valid was extracted; the list is the single placeholder record.
    Placeholder,
    /// The generation service failed; the list is empty.
    Unavailable,
}

/// The current activity list for a place.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub place: String,
    pub activities: Vec<ActivityRecord>,
    pub source: ItinerarySource,
    pub generated_at: DateTime<Utc>,
}

impl Itinerary {
    pub fn new(place: &str, activities: Vec<ActivityRecord>, source: ItinerarySource) -> Self {
        Self {
            place: place.to_string(),
            activities,
            source,
            generated_at: Utc::now(),
        }
    }

    /// Whether the caller should be offered a retry.
    pub fn retry_suggested(&self) -> bool {
        self.source != ItinerarySource::Generated
    }
}
