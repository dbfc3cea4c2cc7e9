use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{Todo, User};

mod todo;
mod user;

pub use todo::PgTodoRepository;
pub use user::PgUserRepository;

/// Storage operations for todo items
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// All todos, ordered by id
    async fn select_all(&self) -> Result<Vec<Todo>, DatabaseError>;

    /// Insert a todo and return the stored row
    async fn insert(&self, title: &str) -> Result<Todo, DatabaseError>;

    /// Delete by id, returning the number of rows affected
    async fn delete(&self, id: i64) -> Result<u64, DatabaseError>;
}

/// Storage operations for user accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn select_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    /// Insert a user. A duplicate email surfaces as `DatabaseError::Conflict`.
    async fn insert(&self, email: &str, password_hash: &str) -> Result<User, DatabaseError>;
}
