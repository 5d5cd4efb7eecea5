// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recover activity records from free-form model output.
//!
//! Extraction runs in two stages:
//! 1. Strip Markdown code fences and parse the remaining text as JSON.
//! 2. If that fails, scan for the first bracket-delimited span (`[...]` for
//!    lists, `{...}` for single items) and parse only that span.
//!
//! Every candidate then goes through [`ActivityRecord::from_value`]; anything
//! that does not match the record shape is dropped.

use crate::models::ActivityRecord;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn fence_regex() -> &'static Regex {
    static FENCE_RE: OnceLock<Regex> = OnceLock::new();
    FENCE_RE.get_or_init(|| Regex::new(r"(?i)```(?:json)?").expect("fence regex must compile"))
}

fn array_span_regex() -> &'static Regex {
    static ARRAY_SPAN_RE: OnceLock<Regex> = OnceLock::new();
    ARRAY_SPAN_RE.get_or_init(|| Regex::new(r"(?s)\[.*\]").expect("array span regex must compile"))
}

fn object_span_regex() -> &'static Regex {
    static OBJECT_SPAN_RE: OnceLock<Regex> = OnceLock::new();
    OBJECT_SPAN_RE
        .get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("object span regex must compile"))
}

/// Remove all "```json" / "```" markers and surrounding whitespace.
pub fn strip_code_fences(text: &str) -> String {
    fence_regex().replace_all(text, "").trim().to_string()
}

/// Extract every valid record from a list-style response, in order.
///
/// Returns an empty list when nothing can be parsed.
pub fn extract_list(text: &str) -> Vec<ActivityRecord> {
    let candidates = raw_candidates(text, array_span_regex());
    let total = candidates.len();

    let records: Vec<ActivityRecord> = candidates.iter().filter_map(validate).collect();

    tracing::debug!(
        candidates = total,
        accepted = records.len(),
        "Extracted activity list"
    );
    records
}

/// Extract one record from a single-item response.
///
/// When the response holds a list, only its first element is considered.
/// `None` means "no replacement".
pub fn extract_single(text: &str) -> Option<ActivityRecord> {
    raw_candidates(text, object_span_regex())
        .first()
        .and_then(validate)
}

fn validate(candidate: &Value) -> Option<ActivityRecord> {
    ActivityRecord::from_value(candidate)
        .map_err(|reason| {
            tracing::debug!(%reason, "Dropping invalid activity candidate");
        })
        .ok()
}

/// Untyped candidates from the response, before validation.
fn raw_candidates(text: &str, span: &Regex) -> Vec<Value> {
    let cleaned = strip_code_fences(text);

    if let Some(candidates) = parse_structured(&cleaned) {
        return candidates;
    }

    // Direct parse failed: fall back to the first bracketed span.
    let Some(found) = span.find(&cleaned) else {
        tracing::debug!("No JSON found in generation response");
        return Vec::new();
    };

    parse_structured(found.as_str()).unwrap_or_else(|| {
        tracing::warn!("Failed to parse JSON span from generation response");
        Vec::new()
    })
}

/// Parse text as a JSON array or object. Scalars count as a failed parse.
fn parse_structured(text: &str) -> Option<Vec<Value>> {
    match serde_json::from_str::<Value>(text).ok()? {
        Value::Array(items) => Some(items),
        obj @ Value::Object(_) => Some(vec![obj]),
        _ => None,
    }
}
