//! HTTP server for opdiff.
//!
//! Exposes the transaction engine over three endpoints:
//!
//! - `POST /v1/diff/{id}/left` -- submit the left operand (`{"payload": "<base64>"}`)
//! - `POST /v1/diff/{id}/right` -- submit the right operand
//! - `GET /v1/diff/{id}` -- consume the pair and report where it differs

pub mod config;
pub mod error;
pub mod handler;
pub mod model;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError, ServerResult};
pub use handler::{AppState, SharedEngine};
pub use model::{DiffRequest, DiffResponse, HealthResponse};
pub use server::OpdiffServer;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use rand::RngCore;
    use tower::util::ServiceExt;

    use opdiff_engine::{DifferenceRun, DuplicatePolicy};

    fn app() -> Router {
        OpdiffServer::new(ServerConfig::default()).router()
    }

    fn random_bytes(len: usize) -> Vec<u8> {
        let mut buf = vec![0u8; len];
        rand::thread_rng().fill_bytes(&mut buf);
        buf
    }

    fn body_for(bytes: &[u8]) -> String {
        serde_json::json!({ "payload": STANDARD.encode(bytes) }).to_string()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, DiffResponse) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post(app: &Router, uri: &str, body: String) -> (StatusCode, DiffResponse) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        send(app, request).await
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, DiffResponse) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        send(app, request).await
    }

    fn done() -> DiffResponse {
        DiffResponse::message("Done")
    }

    #[tokio::test]
    async fn health_endpoint() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    // -----------------------------------------------------------------------
    // Successful comparisons
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn diff_equal() {
        let app = app();
        let data = body_for(&random_bytes(1024));

        assert_eq!(post(&app, "/v1/diff/1/left", data.clone()).await, (StatusCode::OK, done()));
        assert_eq!(post(&app, "/v1/diff/1/right", data).await, (StatusCode::OK, done()));

        let (status, response) = get(&app, "/v1/diff/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response, DiffResponse::message("Byte arrays are equal!"));
    }

    #[tokio::test]
    async fn diff_unequal_size() {
        let app = app();
        post(&app, "/v1/diff/2/left", body_for(&random_bytes(1024))).await;
        post(&app, "/v1/diff/2/right", body_for(&[0u8; 10])).await;

        let (status, response) = get(&app, "/v1/diff/2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response, DiffResponse::message("Byte arrays are NOT equal!"));
    }

    #[tokio::test]
    async fn diff_reports_runs() {
        let app = app();
        post(&app, "/v1/diff/abc-123/left", body_for(b"ABCDEFGHIJKLMNOPQRSTUVWXYZ")).await;
        post(&app, "/v1/diff/abc-123/right", body_for(b"ABCDZFGHXJKLMNWPQRSTUVOIYE")).await;

        let (status, response) = get(&app, "/v1/diff/abc-123").await;
        assert_eq!(status, StatusCode::OK);
        let expected: Vec<DifferenceRun> = [(4, 1), (8, 1), (14, 1), (22, 2), (25, 1)]
            .into_iter()
            .map(|(p, l)| DifferenceRun::new(p, l).unwrap())
            .collect();
        assert_eq!(
            response,
            DiffResponse {
                message: "Byte arrays are NOT equal!".into(),
                differences: expected,
            }
        );
    }

    #[tokio::test]
    async fn diff_consumes_pair() {
        let app = app();
        let data = body_for(b"same");
        post(&app, "/v1/diff/7/left", data.clone()).await;
        post(&app, "/v1/diff/7/right", data).await;

        assert_eq!(get(&app, "/v1/diff/7").await.0, StatusCode::OK);
        let (status, response) = get(&app, "/v1/diff/7").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response.message, "No comparison pending for ID [7]");
    }

    // -----------------------------------------------------------------------
    // Rejections
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn left_without_content() {
        let app = app();
        let (status, response) = post(&app, "/v1/diff/3/left", body_for(&[])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response, DiffResponse::message("Invalid Base64 payload!"));
    }

    #[tokio::test]
    async fn left_with_invalid_base64() {
        let app = app();
        let body = serde_json::json!({ "payload": "%%%" }).to_string();
        let (status, response) = post(&app, "/v1/diff/3/left", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response.message, "Invalid Base64 payload!");
    }

    #[tokio::test]
    async fn left_with_malformed_json() {
        let app = app();
        let (status, response) = post(&app, "/v1/diff/3/left", "{".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response.message, "Invalid Base64 payload!");
    }

    #[tokio::test]
    async fn right_without_content_after_left() {
        let app = app();
        assert_eq!(post(&app, "/v1/diff/8/left", body_for(b"x")).await.0, StatusCode::OK);
        let (status, response) = post(&app, "/v1/diff/8/right", body_for(&[])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response.message, "Invalid Base64 payload!");
    }

    #[tokio::test]
    async fn right_without_left() {
        let app = app();
        let (status, response) = post(&app, "/v1/diff/4/right", body_for(&random_bytes(64))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response,
            DiffResponse::message("Must call endpoint /left before calling endpoint /right")
        );
    }

    #[tokio::test]
    async fn diff_without_submissions() {
        let app = app();
        let (status, response) = get(&app, "/v1/diff/5").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response.message, "No comparison pending for ID [5]");
        assert!(response.differences.is_empty());
    }

    #[tokio::test]
    async fn diff_without_right() {
        let app = app();
        post(&app, "/v1/diff/6/left", body_for(b"lonely")).await;
        let (status, response) = get(&app, "/v1/diff/6").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response.message, "No comparison pending for ID [6]");

        // The left operand is still pending.
        post(&app, "/v1/diff/6/right", body_for(b"lonely")).await;
        let (status, response) = get(&app, "/v1/diff/6").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.message, "Byte arrays are equal!");
    }

    #[tokio::test]
    async fn left_resubmission_compares_against_stored_right() {
        let app = app();
        post(&app, "/v1/diff/7/left", body_for(b"AAAA")).await;
        post(&app, "/v1/diff/7/right", body_for(b"AAAA")).await;
        post(&app, "/v1/diff/7/left", body_for(b"AABA")).await;

        let (status, response) = get(&app, "/v1/diff/7").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.message, "Byte arrays are NOT equal!");
        assert_eq!(response.differences, vec![DifferenceRun::new(2, 1).unwrap()]);
    }

    #[tokio::test]
    async fn request_body_over_limit() {
        let config = ServerConfig {
            max_request_body: 64,
            ..Default::default()
        };
        let app = OpdiffServer::new(config).router();
        let body = body_for(&random_bytes(300));
        let (status, response) = post(&app, "/v1/diff/13/left", body).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(response.message, "Request body is too large!");

        let (status, _) = post(&app, "/v1/diff/13/left", body_for(b"tiny")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn blank_id_rejected() {
        let app = app();
        let (status, response) = get(&app, "/v1/diff/%20").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response.message, "Invalid ID");
    }

    #[tokio::test]
    async fn oversized_left_operand() {
        let app = app();
        let body = body_for(&vec![0u8; 1024 * 1024 + 1]);
        let (status, response) = post(&app, "/v1/diff/10/left", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response.message, "Payload cannot exceed 1 MB in size!");
    }

    #[tokio::test]
    async fn oversized_right_operand() {
        let app = app();
        post(&app, "/v1/diff/11/left", body_for(&random_bytes(1024))).await;
        let body = body_for(&vec![0u8; 1024 * 1024 + 1]);
        let (status, response) = post(&app, "/v1/diff/11/right", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response.message, "Payload cannot exceed 1 MB in size!");
    }

    #[tokio::test]
    async fn duplicate_rejected_under_strict_policy() {
        let config = ServerConfig {
            duplicate_policy: DuplicatePolicy::Reject,
            ..Default::default()
        };
        let app = OpdiffServer::new(config).router();
        post(&app, "/v1/diff/12/left", body_for(b"one")).await;
        let (status, response) = post(&app, "/v1/diff/12/left", body_for(b"two")).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            response.message,
            "Transaction [12] already holds an unconsumed left operand"
        );
    }
}
