//! Mapping of domain errors onto HTTP responses

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use tracing::error;

use crate::api::types::ApiResponse;
use crate::errors::AskDeskError;

/// Handler error rendered as an `ApiResponse` body.
///
/// - `EmptyQuery` → 400
/// - `FeatureUnavailable` → 403
/// - `DocumentNotFound`, `SessionNotFound` → 404
/// - everything else → 500
#[derive(Debug)]
pub struct ApiError(pub AskDeskError);

impl From<AskDeskError> for ApiError {
    fn from(err: AskDeskError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AskDeskError::EmptyQuery => StatusCode::BAD_REQUEST,
            AskDeskError::FeatureUnavailable { .. } => StatusCode::FORBIDDEN,
            AskDeskError::DocumentNotFound(_) | AskDeskError::SessionNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }
        let body = Json(ApiResponse::<()>::error(self.0.to_string()));
        (status, body).into_response()
    }
}

/// Result type returned by handlers
pub type ApiResult<T> = std::result::Result<Json<ApiResponse<T>>, ApiError>;
