use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use super::{require, ServiceError};
use crate::auth::{PasswordHasher, TokenIssuer};
use crate::database::{User, UserRepository};

/// Auth payload returned by a successful login
#[derive(Debug, Serialize)]
pub struct Session {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: User,
}

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: TokenIssuer,
}

const INVALID_CREDENTIALS: &str = "Invalid email or password";

impl UserService {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: TokenIssuer,
    ) -> Self {
        Self { repo, hasher, tokens }
    }

    pub async fn signup(&self, email: &str, password: &str) -> Result<User, ServiceError> {
        require(email, "email")?;
        require(password, "password")?;

        let password_hash = self.hash_password(password).await?;
        let user = self
            .repo
            .insert(email, &password_hash)
            .await
            .map_err(|e| match ServiceError::from(e) {
                ServiceError::Conflict(_) => {
                    ServiceError::Conflict("Email already registered".to_string())
                }
                other => other,
            })?;

        info!(user_id = user.id, "User signed up");
        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ServiceError> {
        require(email, "email")?;
        require(password, "password")?;

        // Unknown email and wrong password are indistinguishable to the caller
        let Some(user) = self.repo.select_by_email(email).await? else {
            warn!("Login rejected: unknown email");
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !self.verify_password(password, &user.password).await? {
            warn!(user_id = user.id, "Login rejected: password mismatch");
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let issued = self.tokens.issue(&user)?;
        info!(user_id = user.id, "User logged in");

        Ok(Session {
            token: issued.token,
            token_type: "Bearer",
            expires_in: issued.expires_in,
            user,
        })
    }

    async fn hash_password(&self, password: &str) -> Result<String, ServiceError> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| ServiceError::Internal(format!("hashing task failed: {}", e)))?
            .map_err(ServiceError::from)
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, ServiceError> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| ServiceError::Internal(format!("hashing task failed: {}", e)))?
            .map_err(ServiceError::from)
    }
}
