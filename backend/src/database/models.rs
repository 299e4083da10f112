//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database. They differ from the API models in `auth::models`: the
//! password hash never leaves this layer.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A persisted user account
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to insert a new user; the id is generated on creation
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl CreateUser {
    /// Builds the full record with a fresh UUIDv7 id and current timestamps.
    pub fn into_user(self) -> User {
        let now = Utc::now();
        User {
            id: uuid::Uuid::now_v7().to_string(),
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}
