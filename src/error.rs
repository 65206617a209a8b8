// =============================================================================
// ERROR MODULE
// =============================================================================
// Error types for the gateway and their HTTP responses.
//
// Upstream weather failures never show up here: they are absorbed by the
// weather service and replaced with fallback data. What remains is:
// - data-access failures (500, per-endpoint message)
// - malformed request bodies (400)
// - routing misses (404)
// - anything unexpected (500, generic message)
// =============================================================================

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ApiResponse;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    /// The guest store could not answer. `message` is what the display sees.
    #[error("{message}: {source}")]
    Store {
        message: &'static str,
        #[source]
        source: StoreError,
    },

    /// Invalid request data
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// No route matched
    #[error("Endpoint not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Wraps a store failure with the message shown to the client.
    pub fn store(message: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| AppError::Store { message, source }
    }

    /// Status the client receives; also the `status` label on request metrics.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Store { .. } | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

// =============================================================================
// HTTP RESPONSE CONVERSION
// =============================================================================
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::Store { message, .. } => (*message).to_string(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::NotFound => "Endpoint not found".to_string(),
            // Never leak internal details
            AppError::Internal(_) => "Internal server error".to_string(),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (status, Json(ApiResponse::failure(message))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

// -----------------------------------------------------------------------------
// PANIC RECOVERY
// -----------------------------------------------------------------------------
/// Response for a handler that panicked. Installed through
/// `CatchPanicLayer::custom` so a code fault still yields the JSON envelope.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::Internal(detail).into_response()
}
