//! Main entry point for the credential backend.
//!
//! This file initializes the Axum web server, sets up the database connection,
//! wires the credential service to its storage and token collaborators, and
//! registers the API routes.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod utils;

use anyhow::{Context, Result};
use auth::service::AuthService;
use axum::{Extension, Router, response::Json, routing::get};
use config::Config;
use database::Database;
use repositories::user_repository::UserRepository;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::init;
use utils::jwt::JwtUtils;

#[tokio::main]
async fn main() -> Result<()> {
    init();

    let config = Config::from_env()?;
    let db = Database::new(&config).await?;
    db.migrate().await?;

    let auth_service = AuthService::new(
        Arc::new(UserRepository::new(db.pool().clone())),
        Arc::new(JwtUtils::new(&config)),
        config.bcrypt_cost,
    );

    let app = Router::new()
        .route("/", get(root_handler))
        .nest("/api/auth", auth::routes::auth_router())
        .layer(Extension(auth_service));

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    info!("Starting credential server on port {}", config.server_port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    db.close().await;
    Ok(())
}

/// Service name and version, for liveness checks.
async fn root_handler() -> Json<Value> {
    Json(json!({
        "service": "Credential Backend",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
