// handlers/auth/login.rs - POST /api/login handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use super::CredentialsRequest;
use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::Session;

/// POST /api/login - Verify credentials and receive a token
///
/// Expected Output (Success):
/// ```json
/// {
///   "token": "eyJhbGciOiJIUzI1NiI...",
///   "token_type": "Bearer",
///   "expires_in": 604800,
///   "user": { "id": 1, "email": "ada@example.com" }
/// }
/// ```
///
/// Unknown email and wrong password both answer 401 with the same body.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> ApiResult<Session> {
    let Json(credentials) = payload?;
    let session = state
        .users
        .login(&credentials.email, &credentials.password)
        .await?;
    Ok(ApiResponse::success(session))
}
