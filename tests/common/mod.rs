// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use day_explorer::config::Config;
use day_explorer::error::AppError;
use day_explorer::routes::create_router;
use day_explorer::services::{ItineraryService, SessionStore, TextGenerator};
use day_explorer::AppState;
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Responder = dyn Fn(&str) -> (Duration, Result<String, AppError>) + Send + Sync;

/// Offline stand-in for the generation API.
///
/// The responder sees the prompt and returns a delay plus the reply.
pub struct FakeGenerator {
    respond: Box<Responder>,
    pub prompts: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl FakeGenerator {
    pub fn new(
        respond: impl Fn(&str) -> (Duration, Result<String, AppError>) + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            respond: Box::new(respond),
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Always reply with the same text, immediately.
    pub fn replying(text: &str) -> Arc<Self> {
        let text = text.to_string();
        Self::new(move |_| (Duration::ZERO, Ok(text.clone())))
    }

    /// Always fail like an unreachable API.
    pub fn failing() -> Arc<Self> {
        Self::new(|_| {
            (
                Duration::ZERO,
                Err(AppError::GenerationApi("HTTP 503: unavailable".to_string())),
            )
        })
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, AppError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let (delay, reply) = (self.respond)(prompt);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        reply
    }
}

/// Three valid Rome activities, fenced the way the model usually answers.
#[allow(dead_code)]
pub const ROME_RESPONSE: &str = r#"```json
[
  {"activity": "Colosseum", "type": "History", "description": "Ancient arena", "lat": 41.8902, "long": 12.4922},
  {"activity": "Trevi Fountain", "type": "Landmark", "description": "Toss a coin", "lat": 41.9009, "long": 12.4833},
  {"activity": "Trastevere dinner", "type": "Food", "description": "Pasta by the river", "lat": 41.8897, "long": 12.4694}
]
```"#;

/// Create a test app backed by the given generator.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(generator: Arc<FakeGenerator>) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config: Config::test_default(),
        itinerary_service: ItineraryService::new(generator),
        sessions: SessionStore::new(),
    });

    (create_router(state.clone()), state)
}

#[allow(dead_code)]
pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
