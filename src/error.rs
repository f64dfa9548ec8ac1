//! Error types for the inspiration board API.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Database-related errors.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Migration failed: {0}")]
    Migration(String),
}

impl DatabaseError {
    /// Classify a libsql failure. Only CHECK violations count as `Constraint`.
    pub(crate) fn from_libsql(op: &str, e: libsql::Error) -> Self {
        let text = e.to_string();
        if text.contains("CHECK constraint failed") {
            Self::Constraint(format!("{op}: {text}"))
        } else {
            Self::Query(format!("{op}: {text}"))
        }
    }
}

/// Outbound notification errors.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Notification token not set in ${var}")]
    MissingToken { var: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Notification rejected by {service}: {reason}")]
    Rejected { service: String, reason: String },
}

/// Request-level errors, rendered as `{"details": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid {kind} id {raw}")]
    InvalidIdentifier { kind: &'static str, raw: String },

    #[error("No {kind} with id {id} found")]
    NotFound { kind: &'static str, id: i64 },

    #[error("{0}")]
    InvalidData(String),

    #[error("Message exceeds {} character limit", crate::cards::model::MAX_MESSAGE_CHARS)]
    MessageTooLong,

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidIdentifier { .. } | Self::InvalidData(_) | Self::MessageTooLong => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let details = match &self {
            Self::Database(e) => {
                tracing::error!(error = %e, "Database error while handling request");
                "an internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(serde_json::json!({ "details": details }))).into_response()
    }
}
