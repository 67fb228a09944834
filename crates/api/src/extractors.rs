//! Request extractors.

use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};
use serde_json::json;

/// Header carrying the opaque owner identifier.
pub const OWNER_HEADER: &str = "x-owner-id";

/// Extractor for the opaque owner identifier supplied by the caller layer.
///
/// The core never validates or resolves this value; it is attached to each
/// created record as-is.
///
/// ```ignore
/// async fn handler(owner: OwnerId) -> impl IntoResponse {
///     let owner_id: String = owner.0;
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct OwnerId(pub String);

impl<S> FromRequestParts<S> for OwnerId
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let owner = parts
            .headers
            .get(OWNER_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        match owner {
            Some(owner) => Ok(Self(owner.to_string())),
            None => Err((
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "missing_owner",
                    "message": format!("{OWNER_HEADER} header is required")
                })),
            )),
        }
    }
}
