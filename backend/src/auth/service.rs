//! Core business logic for the authentication system.

use crate::auth::models::*;
use crate::database::models::CreateUser;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserStore;
use crate::utils::jwt::{Claims, TokenIssuer};
use crate::utils::password::{hash_password, verify_password};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};
use validator::Validate;

/// Authentication service handling registration, login and token checks.
///
/// Storage and token signing are injected, so the service is cheap to clone
/// into every request. The only state it owns is a lazily computed dummy hash,
/// shared by all clones.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: Arc<dyn TokenIssuer>,
    bcrypt_cost: u32,
    /// Verified against when the email is unknown, so both login failures cost one bcrypt run
    dummy_hash: Arc<OnceCell<String>>,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(users: Arc<dyn UserStore>, tokens: Arc<dyn TokenIssuer>, bcrypt_cost: u32) -> Self {
        Self {
            users,
            tokens,
            bcrypt_cost,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Register a new account and issue its first token.
    ///
    /// The email check is not atomic with the insert. Two concurrent signups
    /// for one email can both pass it; the store's unique constraint then
    /// rejects the second insert, which surfaces as `InternalError`.
    ///
    /// # Errors
    /// - `Validation` if a field is missing or empty
    /// - `DuplicateAccount` if the email is already registered
    /// - `InternalError` on storage, hashing or signing failure
    pub async fn register(&self, request: SignupRequest) -> ServiceResult<AuthResponse> {
        validate_request(&request)?;

        if self.users.find_by_email(&request.email).await?.is_some() {
            debug!("Signup rejected, email already registered");
            return Err(ServiceError::duplicate_account(request.email));
        }

        let password_hash = hash_password(&request.password, self.bcrypt_cost).await?;

        let user = self
            .users
            .create(CreateUser {
                name: request.name,
                email: request.email,
                password_hash,
            })
            .await?;

        let token = self.tokens.issue(&user.id)?;

        info!("Registered user {}", user.id);
        Ok(AuthResponse::new(user, token))
    }

    /// Authenticate user and generate a JWT token
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`.
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        validate_request(&request)?;

        let Some(user) = self.users.find_by_email(&request.email).await? else {
            let dummy_hash = self
                .dummy_hash
                .get_or_try_init(|| hash_password(DUMMY_PASSWORD, self.bcrypt_cost))
                .await?;
            verify_password(&request.password, dummy_hash).await?;

            warn!("Login failed: invalid credentials");
            return Err(ServiceError::InvalidCredentials);
        };

        if !verify_password(&request.password, &user.password_hash).await? {
            warn!("Login failed: invalid credentials");
            return Err(ServiceError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user.id)?;

        info!("User {} logged in", user.id);
        Ok(AuthResponse::new(user, token))
    }

    /// Decode and verify a bearer token
    pub fn validate_token(&self, token: &str) -> ServiceResult<Claims> {
        self.tokens.validate(token)
    }

    /// Look up the user a validated token refers to
    pub async fn current_user(&self, user_id: &str) -> ServiceResult<UserInfo> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(UserInfo::from)
            .ok_or_else(|| ServiceError::not_found("User", user_id))
    }
}

const DUMMY_PASSWORD: &str = "no-such-account";

/// Runs `validator` rules and folds the failures into a single message.
fn validate_request<T: Validate>(request: &T) -> ServiceResult<()> {
    if let Err(validation_errors) = request.validate() {
        let mut error_messages: Vec<String> = validation_errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    format!(
                        "{}: {}",
                        field,
                        error.message.as_ref().unwrap_or(&"Invalid value".into())
                    )
                })
            })
            .collect();
        error_messages.sort();

        return Err(ServiceError::validation(error_messages.join(", ")));
    }

    Ok(())
}
