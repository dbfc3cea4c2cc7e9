use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered account. `password` holds the PHC hash string and is never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: String,
}
