//! In-memory `UserStore` used to exercise the credential service without a database.

use crate::database::models::{CreateUser, User};
use crate::repositories::user_repository::UserStore;
use anyhow::{Result, bail};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Users keyed by email.
#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserStore for MemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.id == id)
            .cloned())
    }

    async fn create(&self, user: CreateUser) -> Result<User> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            bail!("duplicate key: email {}", user.email);
        }

        let user = user.into_user();
        users.insert(user.email.clone(), user.clone());
        Ok(user)
    }
}
