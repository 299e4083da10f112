//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the database URL, server port, token signing secret and password hashing cost.

use anyhow::{Context, Result, ensure};
use std::env;

const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;
/// Ten years
const MAX_JWT_EXPIRES_IN_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expires_in_seconds: u64,
    pub server_port: u16,
    /// bcrypt work factor used when hashing new passwords
    pub bcrypt_cost: u32,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, applying defaults and range checks.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = lookup("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = var_or("DB_MAX_CONNECTIONS", "5")
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = var_or("DB_ACQUIRE_TIMEOUT_SECONDS", "3")
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET not set")?;
        ensure!(!jwt_secret.is_empty(), "JWT_SECRET must not be empty");

        let jwt_expires_in_seconds = var_or("JWT_EXPIRES_IN_SECONDS", "86400")
            .parse::<u64>()
            .context("JWT_EXPIRES_IN_SECONDS must be a valid number")?;
        ensure!(
            (1..=MAX_JWT_EXPIRES_IN_SECONDS).contains(&jwt_expires_in_seconds),
            "JWT_EXPIRES_IN_SECONDS must be between 1 and {}",
            MAX_JWT_EXPIRES_IN_SECONDS
        );

        let server_port = var_or("SERVER_PORT", "3000")
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        let bcrypt_cost = var_or("BCRYPT_COST", "10")
            .parse::<u32>()
            .context("BCRYPT_COST must be a valid number")?;
        ensure!(
            (MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&bcrypt_cost),
            "BCRYPT_COST must be between {} and {}",
            MIN_BCRYPT_COST,
            MAX_BCRYPT_COST
        );

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            jwt_secret,
            jwt_expires_in_seconds,
            server_port,
            bcrypt_cost,
        })
    }
}

#[cfg(test)]
impl Config {
    /// Configuration for tests: in-memory SQLite, cheapest bcrypt cost.
    pub fn for_tests() -> Self {
        Config {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_seconds: 3,
            jwt_secret: "test-secret".to_string(),
            jwt_expires_in_seconds: 3600,
            server_port: 0,
            bcrypt_cost: MIN_BCRYPT_COST,
        }
    }
}
