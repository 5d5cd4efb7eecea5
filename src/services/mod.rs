// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod extract;
pub mod gemini;
pub mod itinerary;
pub mod prompt;
pub mod session;

pub use gemini::{GeminiClient, TextGenerator};
pub use itinerary::ItineraryService;
pub use session::{SessionSnapshot, SessionStore};
