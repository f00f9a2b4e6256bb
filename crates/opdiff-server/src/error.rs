use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use opdiff_engine::EngineError;

use crate::model::DiffResponse;

pub const INVALID_ID: &str = "Invalid ID";
pub const INVALID_PAYLOAD: &str = "Invalid Base64 payload!";
pub const WRONG_ORDER: &str = "Must call endpoint /left before calling endpoint /right";
pub const BODY_TOO_LARGE: &str = "Request body is too large!";

/// Errors starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// A request that could not be served, rendered as a JSON message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid ID")]
    InvalidId,

    #[error("Invalid Base64 payload!")]
    InvalidPayload,

    #[error("Request body is too large!")]
    BodyTooLarge,

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId | Self::InvalidPayload => StatusCode::BAD_REQUEST,
            Self::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Engine(err) => match err {
                EngineError::DuplicateTransaction { .. } => StatusCode::CONFLICT,
                EngineError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
                EngineError::EmptyPayload(_)
                | EngineError::OutOfOrderSubmission(_)
                | EngineError::NoPendingTransaction(_)
                | EngineError::IncompleteTransaction(_)
                | EngineError::BackendCapacityExceeded { .. } => StatusCode::BAD_REQUEST,
            },
        }
    }

    /// The user-facing message.
    pub fn message(&self) -> String {
        match self {
            Self::InvalidId => INVALID_ID.to_string(),
            Self::InvalidPayload | Self::Engine(EngineError::EmptyPayload(_)) => {
                INVALID_PAYLOAD.to_string()
            }
            Self::BodyTooLarge => BODY_TOO_LARGE.to_string(),
            Self::Engine(EngineError::OutOfOrderSubmission(_)) => WRONG_ORDER.to_string(),
            // A left-only pair is reported to clients like an empty key.
            Self::Engine(
                EngineError::NoPendingTransaction(key) | EngineError::IncompleteTransaction(key),
            ) => format!("No comparison pending for ID [{key}]"),
            Self::Engine(EngineError::BackendCapacityExceeded { max, .. }) => {
                format!("Payload cannot exceed {} in size!", human_size(*max))
            }
            Self::Engine(EngineError::Store(_)) => "Internal storage error".to_string(),
            Self::Engine(other) => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }
        (status, Json(DiffResponse::message(self.message()))).into_response()
    }
}

/// Render a byte count the way the limit is usually stated: `1 MB`, `64 KB`,
/// or a plain byte count.
fn human_size(bytes: usize) -> String {
    const KIB: usize = 1024;
    const MIB: usize = 1024 * 1024;
    match bytes {
        b if b >= MIB && b % MIB == 0 => format!("{} MB", b / MIB),
        b if b >= KIB && b % KIB == 0 => format!("{} KB", b / KIB),
        b => format!("{b} bytes"),
    }
}
