//! HTTP surface: shared state, router assembly, and request body helpers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::boards;
use crate::cards;
use crate::notify::Notifier;
use crate::store::Database;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
    /// Receives card-created announcements.
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(db: Arc<dyn Database>, notifier: Arc<dyn Notifier>) -> Self {
        Self { db, notifier }
    }
}

/// Build the full router: health, boards, and cards.
pub fn app_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(boards::routes::router())
        .merge(cards::routes::router())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "inspiration-board"
    }))
}

// ── Body helpers ────────────────────────────────────────────────────────

/// A required key was absent or not a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingKey(pub &'static str);

/// Unwrap a JSON body, treating an unreadable body as an empty one.
pub fn body_or_null(body: Result<Json<Value>, JsonRejection>) -> Value {
    match body {
        Ok(Json(value)) => value,
        Err(e) => {
            tracing::debug!(error = %e, "Unreadable JSON body");
            Value::Null
        }
    }
}

/// Fetch a required string field from a JSON object.
pub fn required_str<'a>(body: &'a Value, key: &'static str) -> Result<&'a str, MissingKey> {
    body.get(key).and_then(Value::as_str).ok_or(MissingKey(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_str_reports_the_missing_key() {
        let body = serde_json::json!({"title": "Motivation", "owner": 3});
        assert_eq!(required_str(&body, "title"), Ok("Motivation"));
        assert_eq!(required_str(&body, "owner"), Err(MissingKey("owner")));
        assert_eq!(required_str(&body, "message"), Err(MissingKey("message")));
        assert_eq!(required_str(&Value::Null, "title"), Err(MissingKey("title")));
    }
}
