//! Error handling utilities for API responses.
//!
//! Converts service-layer errors into HTTP responses. Every error body has the
//! shape `{"message": "..."}`.
//!
//! # Error Handling Flow
//! 1. Service layer returns a `ServiceError`
//! 2. `service_error_to_http` picks the status code and client-facing message
//! 3. Internal failures are logged here, once, at the boundary

use crate::errors::ServiceError;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type HttpError = (StatusCode, Json<ErrorResponse>);

/// JSON body extractor whose rejections use the standard error body.
///
/// Malformed JSON, a wrong content type and fields of the wrong type all
/// become `400 {"message": ...}`.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(rejection.body_text())),
            )),
        }
    }
}

/// Converts ServiceError to the matching HTTP status and JSON body
pub fn service_error_to_http(error: ServiceError) -> HttpError {
    let (status, message) = match error {
        ServiceError::Validation { message } => (StatusCode::BAD_REQUEST, message),
        ServiceError::DuplicateAccount { .. } => {
            (StatusCode::BAD_REQUEST, "User already exists".to_string())
        }
        ServiceError::InvalidCredentials => (
            StatusCode::BAD_REQUEST,
            ServiceError::InvalidCredentials.to_string(),
        ),
        ServiceError::NotFound { entity, identifier } => (
            StatusCode::NOT_FOUND,
            format!("{} '{}' not found", entity, identifier),
        ),
        ServiceError::InternalError { message } => {
            tracing::error!("Internal error: {}", message);
            (StatusCode::INTERNAL_SERVER_ERROR, message)
        }
    };

    (status, Json(ErrorResponse::new(message)))
}
