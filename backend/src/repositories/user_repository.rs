//! Database repository for user records.
//!
//! Defines the `UserStore` seam the credential service depends on and its
//! SQLite implementation.

use crate::database::models::{CreateUser, User};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::SqlitePool;

/// Persistence operations the credential service needs over user records.
///
/// Implementations must treat email as an exact, case-sensitive key.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Returns the user registered under `email`, if any.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Returns the user with the given identifier, if any.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;

    /// Persists a new user and returns the stored record.
    async fn create(&self, user: CreateUser) -> Result<User>;
}

/// Repository for user database operations.
#[derive(Clone)]
pub struct UserRepository {
    /// Shared SQLite connection pool
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// * `pool` - SQLite connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to query user by email")?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to query user by id")?;

        Ok(user)
    }

    /// Inserts the user. A concurrent insert of the same email fails on the
    /// `UNIQUE(email)` constraint and is returned as an error.
    async fn create(&self, user: CreateUser) -> Result<User> {
        let user = user.into_user();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, name, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert user")?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::database::Database;

    async fn repository() -> UserRepository {
        let db = Database::new(&Config::for_tests()).await.unwrap();
        db.migrate().await.unwrap();
        UserRepository::new(db.pool().clone())
    }

    fn new_user(email: &str) -> CreateUser {
        CreateUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: "$2b$04$notarealhashbutlongenoughtostore".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let repo = repository().await;

        let created = repo.create(new_user("test@example.com")).await.unwrap();
        assert!(uuid::Uuid::parse_str(&created.id).is_ok());
        assert_eq!(created.name, "Test User");

        let by_email = repo.find_by_email("test@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);
        assert_eq!(by_email.password_hash, created.password_hash);

        let by_id = repo.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "test@example.com");
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_sensitive() {
        let repo = repository().await;
        repo.create(new_user("test@example.com")).await.unwrap();

        assert!(repo.find_by_email("Test@Example.com").await.unwrap().is_none());
        assert!(repo.find_by_email("unknown@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unique_email_constraint_rejects_second_insert() {
        let repo = repository().await;
        repo.create(new_user("test@example.com")).await.unwrap();

        let err = repo.create(new_user("test@example.com")).await.unwrap_err();
        assert!(format!("{:#}", err).contains("UNIQUE"));
    }
}
