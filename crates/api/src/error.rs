//! Error-to-response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use pinboard_core::content::ContentError;
use pinboard_core::diary::DiaryError;
use pinboard_shared::AppError;

/// Response wrapper around the shared application error taxonomy.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(json!({
            "error": self.0.error_code(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        let app = match err {
            ContentError::NotFound(id) => AppError::NotFound(format!("content {id}")),
            ContentError::UploadFailed(storage_err) if storage_err.is_rejection() => {
                AppError::Validation(storage_err.to_string())
            }
            ContentError::UploadFailed(storage_err) => {
                AppError::ExternalService(storage_err.to_string())
            }
            ContentError::PersistFailed(msg) => AppError::Database(msg),
        };
        Self(app)
    }
}

impl From<DiaryError> for ApiError {
    fn from(err: DiaryError) -> Self {
        match err {
            DiaryError::Repository(msg) => Self(AppError::Database(msg)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinboard_core::storage::StorageError;
    use uuid::Uuid;

    #[test]
    fn test_content_error_mapping() {
        let not_found = ApiError::from(ContentError::NotFound(Uuid::new_v4()));
        assert_eq!(not_found.0.status_code(), 404);

        let rejected =
            ApiError::from(ContentError::UploadFailed(StorageError::invalid_mime_type(
                "text/html",
            )));
        assert_eq!(rejected.0.status_code(), 400);

        let backend_down = ApiError::from(ContentError::UploadFailed(StorageError::operation(
            "connection refused",
        )));
        assert_eq!(backend_down.0.status_code(), 502);

        let persist = ApiError::from(ContentError::persist("insert failed"));
        assert_eq!(persist.0.status_code(), 500);
    }
}
