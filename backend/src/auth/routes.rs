//! Defines the HTTP routes for authentication.
//!
//! The router expects an `Extension<AuthService>` layer to be applied by the
//! caller and is mounted under `/api/auth`.

use crate::auth::handlers::*;
use crate::auth::middleware::jwt_auth;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/me", get(me).layer(middleware::from_fn(jwt_auth)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::service::AuthService;
    use crate::config::Config;
    use crate::database::Database;
    use crate::repositories::memory_repository::MemoryUserRepository;
    use crate::repositories::user_repository::{UserRepository, UserStore};
    use crate::utils::jwt::JwtUtils;
    use axum::{
        Extension,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app_with(users: Arc<dyn UserStore>) -> Router {
        let config = Config::for_tests();
        let service = AuthService::new(users, Arc::new(JwtUtils::new(&config)), config.bcrypt_cost);
        Router::new()
            .nest("/api/auth", auth_router())
            .layer(Extension(service))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_me(token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri("/api/auth/me");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn run_signup_login_scenario(app: Router) {
        let signup = json!({
            "name": "Test User",
            "email": "test@example.com",
            "password": "12345678"
        });

        let (status, body) = send(&app, post_json("/api/auth/signup", signup.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
        assert!(body["_id"].is_string());
        assert_eq!(body["name"], "Test User");
        assert_eq!(body["email"], "test@example.com");
        assert!(body.get("password").is_none());

        let (status, body) = send(&app, post_json("/api/auth/signup", signup)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "User already exists");

        let (status, body) = send(
            &app,
            post_json(
                "/api/auth/login",
                json!({ "email": "test@example.com", "password": "12345678" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["token"].is_string());

        let (status, body) = send(
            &app,
            post_json(
                "/api/auth/login",
                json!({ "email": "test@example.com", "password": "wrongpassword" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid email or password");
    }

    #[tokio::test]
    async fn test_signup_login_scenario_in_memory() {
        run_signup_login_scenario(app_with(Arc::new(MemoryUserRepository::new()))).await;
    }

    #[tokio::test]
    async fn test_signup_login_scenario_sqlite() {
        let db = Database::new(&Config::for_tests()).await.unwrap();
        db.migrate().await.unwrap();

        run_signup_login_scenario(app_with(Arc::new(UserRepository::new(db.pool().clone()))))
            .await;
    }

    #[tokio::test]
    async fn test_login_unknown_email_matches_wrong_password() {
        let app = app_with(Arc::new(MemoryUserRepository::new()));

        let (status, body) = send(
            &app,
            post_json(
                "/api/auth/login",
                json!({ "email": "nobody@example.com", "password": "12345678" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid email or password");
    }

    #[tokio::test]
    async fn test_signup_missing_field_is_bad_request() {
        let app = app_with(Arc::new(MemoryUserRepository::new()));

        let (status, body) = send(
            &app,
            post_json(
                "/api/auth/signup",
                json!({ "name": "Test User", "email": "test@example.com" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "password: Password is required");
    }

    fn post_raw(uri: &str, content_type: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_malformed_bodies_get_json_bad_request() {
        let app = app_with(Arc::new(MemoryUserRepository::new()));

        let requests = [
            post_raw("/api/auth/signup", "application/json", "{not json}"),
            post_raw(
                "/api/auth/login",
                "application/json",
                r#"{"email": 123, "password": "12345678"}"#,
            ),
            post_raw(
                "/api/auth/login",
                "text/plain",
                r#"{"email": "test@example.com", "password": "12345678"}"#,
            ),
        ];

        for request in requests {
            let (status, body) = send(&app, request).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(
                body["message"].as_str().is_some_and(|m| !m.is_empty()),
                "expected a JSON message, got {:?}",
                body
            );
        }
    }

    #[tokio::test]
    async fn test_signup_over_length_password_is_bad_request() {
        let app = app_with(Arc::new(MemoryUserRepository::new()));

        let (status, body) = send(
            &app,
            post_json(
                "/api/auth/signup",
                json!({
                    "name": "Test User",
                    "email": "test@example.com",
                    "password": "a".repeat(80)
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "password: Password must be at most 71 bytes");
    }

    #[tokio::test]
    async fn test_me_requires_valid_bearer_token() {
        let app = app_with(Arc::new(MemoryUserRepository::new()));

        let (_, body) = send(
            &app,
            post_json(
                "/api/auth/signup",
                json!({ "name": "Test User", "email": "test@example.com", "password": "12345678" }),
            ),
        )
        .await;
        let token = body["token"].as_str().unwrap().to_string();

        let (status, me) = send(&app, get_me(Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["_id"], body["_id"]);
        assert_eq!(me["email"], "test@example.com");

        let (status, _) = send(&app, get_me(None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, get_me(Some("not-a-token"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
