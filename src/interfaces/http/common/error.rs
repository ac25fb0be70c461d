//! Error responses
//!
//! Every failed request answers with the same body:
//! `{timestamp, status, error, message, path}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::shared::errors::DomainError;

/// Body returned for any failed request
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    /// HTTP status code
    pub status: u16,
    /// HTTP reason phrase
    pub error: String,
    pub message: String,
    /// Request path that failed
    pub path: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    path: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            path: path.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, path)
    }

    pub fn from_domain(err: DomainError, path: impl Into<String>) -> Self {
        let status = match err {
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            ref e if e.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = if status.is_server_error() {
            format!("An unexpected error occurred: {}", err)
        } else {
            err.to_string()
        };

        Self::new(status, message, path)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            timestamp: Utc::now(),
            status: self.status.as_u16(),
            error: self
                .status
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string(),
            message: self.message,
            path: self.path,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_400() {
        for err in [
            DomainError::InvalidTimeSlot("End time must be after start time".into()),
            DomainError::InvalidArgument("bad".into()),
            DomainError::BusinessRule("overlap".into()),
        ] {
            let api = ApiError::from_domain(err.clone(), "/api/bookings");
            assert_eq!(api.status(), StatusCode::BAD_REQUEST);
            assert_eq!(api.message(), err.to_string());
        }
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = DomainError::NotFound {
            entity: "Booking",
            field: "id",
            value: "9".into(),
        };
        assert_eq!(
            ApiError::from_domain(err, "/api/bookings/9").status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn storage_errors_are_500_with_prefix() {
        let api = ApiError::from_domain(DomainError::Storage("gone".into()), "/x");
        assert_eq!(api.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(api.message().starts_with("An unexpected error occurred: "));
    }
}
