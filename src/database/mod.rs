pub mod manager;
pub mod models;
pub mod repository;

pub use manager::{Database, DatabaseError, HealthCheck};
pub use models::{Todo, User};
pub use repository::{PgTodoRepository, PgUserRepository, TodoRepository, UserRepository};
