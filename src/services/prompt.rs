// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Prompt construction for itinerary and replacement requests.

use crate::models::{ActivityRecord, SearchFilters};

const RESTAURANTS_CLAUSE: &str = "Include at least one restaurant or local food spot.";
const RELIGIOUS_CLAUSE: &str =
    "Include at least one religious or spiritual site such as a temple, church, or mosque.";

/// Prompt asking for a full one-day itinerary.
pub fn itinerary_prompt(place: &str, filters: SearchFilters) -> String {
    let mut prompt = format!(
        "Suggest top things that can be done in {} in a one-day itinerary in JSON format \
         with the following fields: activity, type, description, lat, long.",
        place
    );
    push_filter_clauses(&mut prompt, filters);
    prompt
}

/// Prompt asking for one alternative to `current[index]`.
///
/// The whole current list is embedded so the model can avoid duplicates.
pub fn replacement_prompt(
    place: &str,
    current: &[ActivityRecord],
    index: usize,
    filters: SearchFilters,
) -> Result<String, serde_json::Error> {
    let current_json = serde_json::to_string_pretty(current)?;

    let mut prompt = format!(
        "Here is a one-day itinerary for {place} in JSON format:\n{current_json}\n\
         Suggest one alternative activity in {place} to replace the item at index {index} \
         (zero-based). It must not duplicate any activity already in the list. \
         Respond with a single JSON object with the following fields: \
         activity, type, description, lat, long."
    );
    push_filter_clauses(&mut prompt, filters);
    Ok(prompt)
}

fn push_filter_clauses(prompt: &mut String, filters: SearchFilters) {
    if filters.include_restaurants {
        prompt.push(' ');
        prompt.push_str(RESTAURANTS_CLAUSE);
    }
    if filters.include_religious {
        prompt.push(' ');
        prompt.push_str(RELIGIOUS_CLAUSE);
    }
}
