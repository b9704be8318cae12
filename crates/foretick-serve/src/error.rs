use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use foretick_core::ValidationError;
use foretick_model::{InferenceError, ModelError, WindowError};

/// Terminal request errors, mapped to HTTP statuses and a `{"error": …}`
/// body. Upstream degradation never reaches this type; it is absorbed
/// before the handler returns.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        Self::BadRequest(error.to_string())
    }
}

impl From<ModelError> for ApiError {
    fn from(error: ModelError) -> Self {
        match error {
            ModelError::ModelNotFound { .. } | ModelError::ScalerNotFound { .. } => {
                Self::NotFound(error.to_string())
            }
            ModelError::ArtifactCorrupt { .. } => Self::Internal(error.to_string()),
        }
    }
}

impl From<WindowError> for ApiError {
    fn from(error: WindowError) -> Self {
        Self::BadRequest(error.to_string())
    }
}

impl From<InferenceError> for ApiError {
    fn from(error: InferenceError) -> Self {
        Self::Internal(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foretick_core::Ticker;

    #[test]
    fn missing_artifacts_map_to_not_found() {
        let ticker = Ticker::parse("AAPL").expect("valid");
        let api: ApiError = ModelError::ModelNotFound { ticker }.into();
        assert_eq!(api.status(), StatusCode::NOT_FOUND);
        assert!(!api.to_string().is_empty());
    }

    #[test]
    fn window_errors_map_to_bad_request() {
        let api: ApiError = WindowError::InsufficientData { have: 3, need: 5 }.into();
        assert_eq!(api.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn inference_errors_map_to_internal() {
        let api: ApiError = InferenceError::ShapeMismatch { expected: 5, got: 3 }.into();
        assert_eq!(api.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
