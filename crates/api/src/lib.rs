//! HTTP API layer with Axum routes and extractors.
//!
//! This crate provides:
//! - REST API routes for content records and diary entries
//! - The owner-identity extractor
//! - Error-to-response mapping

pub mod error;
pub mod extractors;
pub mod routes;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use pinboard_core::storage::StorageService;
use pinboard_db::ContentRepository;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Blob storage backend.
    pub storage: Arc<StorageService>,
    /// Content repository, shared so all handlers see one per-id lock map.
    pub contents: Arc<ContentRepository>,
}

impl AppState {
    /// Build the state from its backing services.
    #[must_use]
    pub fn new(db: DatabaseConnection, storage: StorageService) -> Self {
        let contents = Arc::new(ContentRepository::new(db.clone()));
        Self {
            db: Arc::new(db),
            storage: Arc::new(storage),
            contents,
        }
    }
}

// Headroom on top of the upload cap for the JSON part and multipart
// framing, so a maximum-size image still fits in one request body.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Transport body cap derived from the configured upload maximum.
///
/// Axum's built-in default is smaller than the configured cap, which would
/// cut off uploads mid-read before the storage size check can reject them
/// with a proper response.
fn multipart_body_limit(max_upload: u64) -> usize {
    usize::try_from(max_upload)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD)
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    let body_limit = multipart_body_limit(state.storage.config().max_file_size);
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use pinboard_core::storage::{StorageConfig, StorageProvider};

    const BOUNDARY: &str = "x-test-boundary";

    fn state_with_max_upload(max_upload: u64) -> AppState {
        let root = std::env::temp_dir().join(format!("pinboard-api-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&root).expect("create test root");
        let config = StorageConfig::new(
            StorageProvider::local_fs(root),
            "http://localhost:8080/blobs",
        )
        .with_max_file_size(max_upload);
        let storage = StorageService::from_config(config).expect("storage should build");
        AppState::new(DatabaseConnection::default(), storage)
    }

    fn upload_request(image: &[u8], content_type: &str) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"content\"\r\n\
                 Content-Type: application/json\r\n\r\n{{\"title\":\"t\",\"body\":\"b\"}}\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; \
                 filename=\"big.png\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(image);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/v1/contents")
            .header("x-owner-id", "owner-1")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("request should build")
    }

    async fn body_message(response: axum::response::Response) -> String {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body should collect")
            .to_bytes();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[test]
    fn test_body_limit_covers_configured_upload_max() {
        let limit = multipart_body_limit(StorageConfig::DEFAULT_MAX_FILE_SIZE);
        let max = usize::try_from(StorageConfig::DEFAULT_MAX_FILE_SIZE).unwrap();
        assert!(limit > max);

        // Saturates instead of overflowing.
        assert_eq!(multipart_body_limit(u64::MAX), usize::MAX);
    }

    #[tokio::test]
    async fn test_upload_between_builtin_and_configured_cap_reaches_validation() {
        // 3 MiB is over axum's built-in body default but within the 10 MiB
        // cap: the body must be fully readable so the MIME check answers,
        // not a mid-read transport failure.
        let app = create_router(state_with_max_upload(StorageConfig::DEFAULT_MAX_FILE_SIZE));
        let image = vec![0u8; 3 * 1024 * 1024];

        let response = app
            .oneshot(upload_request(&image, "text/plain"))
            .await
            .expect("router should respond");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let message = body_message(response).await;
        assert!(message.contains("MIME type"), "unexpected body: {message}");
    }

    #[tokio::test]
    async fn test_oversized_upload_maps_to_size_rejection() {
        // One byte over the configured cap still fits under the transport
        // limit, so the size check produces the rejection.
        let max = 1024 * 1024;
        let app = create_router(state_with_max_upload(max as u64));
        let image = vec![0u8; max + 1];

        let response = app
            .oneshot(upload_request(&image, "image/png"))
            .await
            .expect("router should respond");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let message = body_message(response).await;
        assert!(
            message.contains("exceeds maximum"),
            "unexpected body: {message}"
        );
    }
}
