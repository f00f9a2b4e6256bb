use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use opdiff_engine::{OperandStore, TransactionEngine, TransactionKey};

use crate::error::ApiError;
use crate::model::{DiffRequest, DiffResponse, HealthResponse};

/// Engine shared by all handlers, over any store backend.
pub type SharedEngine = Arc<TransactionEngine<Arc<dyn OperandStore>>>;

#[derive(Clone)]
pub struct AppState {
    pub engine: SharedEngine,
}

impl AppState {
    pub fn new(engine: SharedEngine) -> Self {
        Self { engine }
    }
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// `POST /v1/diff/{id}/left`
pub async fn left_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<DiffRequest>, JsonRejection>,
) -> Result<Json<DiffResponse>, ApiError> {
    let key = parse_key(&id)?;
    let data = decode_payload(body)?;
    let ack = state.engine.submit_left(&key, data)?;
    Ok(Json(ack.into()))
}

/// `POST /v1/diff/{id}/right`
pub async fn right_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<DiffRequest>, JsonRejection>,
) -> Result<Json<DiffResponse>, ApiError> {
    let key = parse_key(&id)?;
    let data = decode_payload(body)?;
    let ack = state.engine.submit_right(&key, data)?;
    Ok(Json(ack.into()))
}

/// `GET /v1/diff/{id}`
pub async fn diff_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DiffResponse>, ApiError> {
    let key = parse_key(&id)?;
    let report = state.engine.compare(&key)?;
    Ok(Json(report.into()))
}

fn parse_key(id: &str) -> Result<TransactionKey, ApiError> {
    TransactionKey::new(id).map_err(|_| ApiError::InvalidId)
}

/// Decode the Base64 payload of a submission body. A missing body, an empty
/// payload, and undecodable text are all the same client error; a body over
/// the request limit is reported as such.
fn decode_payload(body: Result<Json<DiffRequest>, JsonRejection>) -> Result<Vec<u8>, ApiError> {
    let Json(request) = body.map_err(|rejection| {
        tracing::debug!(%rejection, "unreadable request body");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::BodyTooLarge
        } else {
            ApiError::InvalidPayload
        }
    })?;
    if request.payload.is_empty() {
        return Err(ApiError::InvalidPayload);
    }
    STANDARD
        .decode(request.payload.as_bytes())
        .map_err(|_| ApiError::InvalidPayload)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json(payload: &str) -> Result<Json<DiffRequest>, JsonRejection> {
        Ok(Json(DiffRequest {
            payload: payload.to_string(),
        }))
    }

    #[test]
    fn decodes_standard_base64() {
        assert_eq!(decode_payload(json("QUJDREU=")).unwrap(), b"ABCDE");
    }

    #[test]
    fn rejects_empty_and_garbage() {
        assert!(matches!(decode_payload(json("")), Err(ApiError::InvalidPayload)));
        assert!(matches!(
            decode_payload(json("not base64!")),
            Err(ApiError::InvalidPayload)
        ));
    }

    #[test]
    fn blank_id_is_invalid() {
        assert!(matches!(parse_key(" "), Err(ApiError::InvalidId)));
        assert_eq!(parse_key("12").unwrap().as_str(), "12");
    }
}
