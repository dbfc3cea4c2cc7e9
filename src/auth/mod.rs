use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::config::{SecurityConfig, MAX_JWT_EXPIRY_HOURS};
use crate::database::models::User;

pub mod password;

pub use password::{Argon2Hasher, PasswordError, PasswordHasher};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user: &User, expiry_hours: u64) -> Result<Self, TokenError> {
        let iat = Utc::now().timestamp();
        let exp = iat
            .checked_add(expiry_seconds(expiry_hours)?)
            .ok_or(TokenError::InvalidExpiry(expiry_hours))?;

        Ok(Self {
            sub: user.id.to_string(),
            email: user.email.clone(),
            exp,
            iat,
        })
    }
}

fn expiry_seconds(expiry_hours: u64) -> Result<i64, TokenError> {
    i64::try_from(expiry_hours)
        .ok()
        .and_then(|hours| hours.checked_mul(3600))
        .ok_or(TokenError::InvalidExpiry(expiry_hours))
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("JWT generation error: {0}")]
    Generation(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid JWT secret")]
    InvalidSecret,

    #[error("Token expiry of {0} hours is out of range")]
    InvalidExpiry(u64),
}

/// Signed token handed back by a successful login
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

/// Signs HS256 session tokens with the configured secret
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    expiry_hours: u64,
}

impl TokenIssuer {
    pub fn new(secret: &str, expiry_hours: u64) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::InvalidSecret);
        }
        if !(1..=MAX_JWT_EXPIRY_HOURS).contains(&expiry_hours) {
            return Err(TokenError::InvalidExpiry(expiry_hours));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        })
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, TokenError> {
        Self::new(&security.jwt_secret, security.jwt_expiry_hours)
    }

    pub fn issue(&self, user: &User) -> Result<IssuedToken, TokenError> {
        let claims = Claims::new(user, self.expiry_hours)?;
        let token = encode(&Header::default(), &claims, &self.encoding_key)?;

        Ok(IssuedToken {
            token,
            expires_in: claims.exp - claims.iat,
        })
    }
}
