// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Extraction behaviour on realistic model output.
//!
//! IMPORTANT: these cases come from the shapes the model actually returns
//! (fenced, chatty, stringly-typed coordinates). If they fail, users get the
//! placeholder instead of an itinerary.

use day_explorer::models::ActivityRecord;
use day_explorer::services::extract::{extract_list, extract_single, strip_code_fences};
use serde_json::json;

fn paris() -> Vec<serde_json::Value> {
    vec![
        json!({"activity": "Louvre", "type": "Museum", "description": "Art", "lat": 48.8606, "long": 2.3376}),
        json!({"activity": "Seine cruise", "type": "Boat", "description": "River views", "lat": 48.8589, "long": 2.2936}),
        json!({"activity": "Montmartre", "type": "Neighbourhood", "description": "Sacré-Cœur", "lat": 48.8867, "long": 2.3431}),
        json!({"activity": "Le Marais dinner", "type": "Food", "description": "Falafel", "lat": 48.8575, "long": 2.3590}),
    ]
}

#[test]
fn test_clean_list_round_trip() {
    let values = paris();
    let text = serde_json::to_string(&values).unwrap();

    let records = extract_list(&text);
    let expected: Vec<ActivityRecord> = values
        .iter()
        .map(|v| ActivityRecord::from_value(v).unwrap())
        .collect();
    assert_eq!(records, expected);
}

#[test]
fn test_fence_stripping_is_transparent() {
    let text = serde_json::to_string_pretty(&paris()).unwrap();
    let fenced = format!("```json\n{}\n```", text);

    assert_eq!(strip_code_fences(&fenced), text);
    assert_eq!(extract_list(&fenced), extract_list(&text));
}

#[test]
fn test_list_embedded_in_prose() {
    let text = format!(
        "Absolutely! Here's a relaxed day in Paris.\n\n{}\n\nLet me know if you'd like changes.",
        serde_json::to_string_pretty(&paris()).unwrap()
    );
    assert_eq!(extract_list(&text).len(), 4);
}

#[test]
fn test_fenced_list_embedded_in_prose() {
    let text = format!(
        "Here you go:\n```json\n{}\n```\nBon voyage!",
        serde_json::to_string_pretty(&paris()).unwrap()
    );
    let records = extract_list(&text);
    assert_eq!(records.len(), 4);
    assert_eq!(records[3].activity, "Le Marais dinner");
}

#[test]
fn test_string_coordinates_are_dropped() {
    let mut values = paris();
    values[1]["lat"] = json!("48.8589");
    let text = serde_json::to_string(&values).unwrap();

    let records = extract_list(&text);
    let titles: Vec<&str> = records.iter().map(|r| r.activity.as_str()).collect();
    assert_eq!(titles, vec!["Louvre", "Montmartre", "Le Marais dinner"]);
}

#[test]
fn test_nothing_valid_is_empty() {
    let text = r#"[{"name": "Louvre"}, {"activity": "Seine", "lat": 1, "long": 2}]"#;
    assert!(extract_list(text).is_empty());
}

#[test]
fn test_single_item_in_fence_and_prose() {
    let text = "Try this instead:\n```json\n{\"activity\": \"Musée d'Orsay\", \"type\": \"Museum\", \"description\": \"Impressionists\", \"lat\": 48.86, \"long\": 2.3266}\n```";
    let record = extract_single(text).unwrap();
    assert_eq!(record.activity, "Musée d'Orsay");
    assert_eq!(record.category, "Museum");
}
