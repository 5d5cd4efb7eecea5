// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod itinerary;
pub mod map;

pub use activity::{ActivityRecord, RecordRejection};
pub use itinerary::{Itinerary, ItinerarySource, SearchFilters};
pub use map::{MapPin, MapView};
