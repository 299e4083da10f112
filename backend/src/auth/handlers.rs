//! Handler functions for authentication-related API endpoints.
//!
//! These functions extract the request body, delegate to `AuthService` and
//! translate its errors into HTTP responses via `service_error_to_http`.
//! Body rejections are reported in the same `{message}` shape by `JsonBody`.

use crate::api::common::{HttpError, JsonBody, service_error_to_http};
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::utils::jwt::Claims;
use axum::{
    extract::Extension,
    http::StatusCode,
    response::Json as ResponseJson,
};

/// Handle user signup request
#[axum::debug_handler]
pub async fn signup(
    Extension(auth_service): Extension<AuthService>,
    JsonBody(payload): JsonBody<SignupRequest>,
) -> Result<(StatusCode, ResponseJson<AuthResponse>), HttpError> {
    match auth_service.register(payload).await {
        Ok(response) => Ok((StatusCode::CREATED, ResponseJson(response))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(auth_service): Extension<AuthService>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<ResponseJson<AuthResponse>, HttpError> {
    match auth_service.login(payload).await {
        Ok(response) => Ok(ResponseJson(response)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Get current user information from token
#[axum::debug_handler]
pub async fn me(
    Extension(auth_service): Extension<AuthService>,
    Extension(claims): Extension<Claims>,
) -> Result<ResponseJson<UserInfo>, HttpError> {
    auth_service
        .current_user(claims.user_id())
        .await
        .map(ResponseJson)
        .map_err(service_error_to_http)
}
