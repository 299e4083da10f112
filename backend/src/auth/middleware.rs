//! Middleware for protecting authenticated routes.
//!
//! Validates the bearer token on the request and makes its claims available
//! to handlers through request extensions.

use crate::auth::service::AuthService;
use axum::{
    extract::Request,
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

/// JWT authentication middleware
///
/// Expects `AuthService` to be installed as an `Extension` on the router.
pub async fn jwt_auth(mut request: Request, next: Next) -> Result<Response, StatusCode> {
    let auth_service = request
        .extensions()
        .get::<AuthService>()
        .cloned()
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

    let claims = {
        let token = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|header| header.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "))
            .ok_or(StatusCode::UNAUTHORIZED)?;

        auth_service.validate_token(token).map_err(|e| {
            tracing::debug!("Rejected bearer token: {}", e);
            StatusCode::UNAUTHORIZED
        })?
    };

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
