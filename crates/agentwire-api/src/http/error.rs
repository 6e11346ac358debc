//! Application error type mapping to HTTP status codes and envelope format.

use axum::response::{IntoResponse, Response};

use agentwire_types::error::RuntimeError;

use super::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Rejected request input.
    Validation(String),
    /// The agent runtime cannot serve turns.
    Runtime(RuntimeError),
}

impl From<RuntimeError> for AppError {
    fn from(e: RuntimeError) -> Self {
        AppError::Runtime(e)
    }
}

impl AppError {
    /// Machine-readable code carried in the envelope.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Runtime(RuntimeError::Unavailable(_)) => "RUNTIME_UNAVAILABLE",
            AppError::Runtime(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Runtime(e) => e.to_string(),
        };
        tracing::debug!(code = self.code(), %message, "Request failed");

        ApiResponse::error(self.code(), &message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_validation_error_is_bad_request_envelope() {
        let (status, body) = render(AppError::Validation("user_input is required".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["data"].is_null());
        assert_eq!(body["errors"][0]["code"], "VALIDATION_ERROR");
        assert_eq!(body["errors"][0]["message"], "user_input is required");
        assert!(body["meta"]["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_runtime_errors_map_to_status() {
        let (status, body) =
            render(RuntimeError::Unavailable("no transcript".into()).into()).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["errors"][0]["code"], "RUNTIME_UNAVAILABLE");

        let (status, _) = render(RuntimeError::Stream("reset".into()).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
