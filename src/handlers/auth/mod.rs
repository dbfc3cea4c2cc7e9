// handlers/auth/mod.rs - Account handlers (no authentication required)

use serde::Deserialize;

pub mod login;  // POST /api/login - verify credentials and get a token
pub mod signup; // POST /api/signup - create an account

pub use login::login;
pub use signup::signup;

/// Body shared by login and signup
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}
