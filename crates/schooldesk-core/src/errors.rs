//! Application error type and its HTTP representation.
//!
//! Every handler returns `Result<_, AppError>`. The status code carries the
//! error class:
//!
//! | Class | Status | Constructor |
//! |-------|--------|-------------|
//! | Validation | 400 | [`AppError::bad_request`] |
//! | Authentication | 401 | [`AppError::unauthorized`] |
//! | Permission | 403 | [`AppError::forbidden`] |
//! | Not found | 404 | [`AppError::not_found`] |
//! | Conflict | 409 | [`AppError::conflict`] |
//! | Store / unclassified | 500 | [`AppError::internal`] |
//!
//! Authentication failures render as `{"error": "..."}`. Everything else
//! renders as `{"success": false, "status": <code>, "message": "..."}`.
//! Server errors never leak their cause to the client: the body carries a
//! generic message and the cause travels in an [`InternalErrorDetail`]
//! response extension so the request logger can record it with the path.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Message returned to clients for any 5xx response.
pub const GENERIC_SERVER_ERROR: &str = "An unknown error occurred on the server. Try again later.";

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

/// Cause of a server error, attached to the response for logging.
#[derive(Debug, Clone)]
pub struct InternalErrorDetail(pub String);

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, anyhow::anyhow!(message.into()))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(message.into()))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow::anyhow!(message.into()))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, anyhow::anyhow!(message.into()))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, anyhow::anyhow!(message.into()))
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    /// The client-facing message for this error.
    pub fn message(&self) -> String {
        if self.status.is_server_error() {
            GENERIC_SERVER_ERROR.to_string()
        } else {
            self.error.to_string()
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:#}", self.status, self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.message();

        if self.status == StatusCode::UNAUTHORIZED {
            return (self.status, Json(json!({ "error": message }))).into_response();
        }

        let body = Json(json!({
            "success": false,
            "status": self.status.as_u16(),
            "message": message,
        }));

        let mut response = (self.status, body).into_response();
        if self.status.is_server_error() {
            response
                .extensions_mut()
                .insert(InternalErrorDetail(format!("{:#}", self.error)));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn unauthorized_uses_error_field() {
        let response = AppError::unauthorized("Invalid Token").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body, json!({ "error": "Invalid Token" }));
    }

    #[tokio::test]
    async fn client_errors_use_envelope() {
        let response = AppError::conflict("User already exists").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["status"], 409);
        assert_eq!(body["message"], "User already exists");
    }

    #[tokio::test]
    async fn server_errors_hide_cause() {
        let response =
            AppError::internal(anyhow::anyhow!("connection refused")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let detail = response
            .extensions()
            .get::<InternalErrorDetail>()
            .cloned()
            .unwrap();
        assert!(detail.0.contains("connection refused"));

        let body = body_json(response).await;
        assert_eq!(body["message"], GENERIC_SERVER_ERROR);
    }

    #[test]
    fn not_found_message_is_passed_through() {
        let err = AppError::not_found("Student not found");
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Student not found");
    }
}
