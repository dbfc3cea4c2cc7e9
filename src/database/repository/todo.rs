use async_trait::async_trait;
use sqlx::PgPool;

use super::TodoRepository;
use crate::database::manager::DatabaseError;
use crate::database::models::Todo;

pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn select_all(&self) -> Result<Vec<Todo>, DatabaseError> {
        let todos = sqlx::query_as::<_, Todo>("SELECT id, title, done FROM todos ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(todos)
    }

    async fn insert(&self, title: &str) -> Result<Todo, DatabaseError> {
        let todo = sqlx::query_as::<_, Todo>(
            "INSERT INTO todos (title) VALUES ($1) RETURNING id, title, done",
        )
        .bind(title)
        .fetch_one(&self.pool)
        .await?;
        Ok(todo)
    }

    async fn delete(&self, id: i64) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
