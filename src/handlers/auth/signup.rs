// handlers/auth/signup.rs - POST /api/signup handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use super::CredentialsRequest;
use crate::app::AppState;
use crate::database::User;
use crate::middleware::{ApiResponse, ApiResult};

/// POST /api/signup - Register a new account
///
/// Responds 201 with `{"id": .., "email": ..}`; 409 when the email is taken.
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> ApiResult<User> {
    let Json(credentials) = payload?;
    let user = state
        .users
        .signup(&credentials.email, &credentials.password)
        .await?;
    Ok(ApiResponse::created(user))
}
