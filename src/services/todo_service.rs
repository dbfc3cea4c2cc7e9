use std::sync::Arc;

use super::{require, ServiceError};
use crate::database::{Todo, TodoRepository};

#[derive(Clone)]
pub struct TodoService {
    repo: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(repo: Arc<dyn TodoRepository>) -> Self {
        Self { repo }
    }

    pub async fn all_todos(&self) -> Result<Vec<Todo>, ServiceError> {
        Ok(self.repo.select_all().await?)
    }

    pub async fn create_todo(&self, title: &str) -> Result<Todo, ServiceError> {
        require(title, "title")?;
        Ok(self.repo.insert(title).await?)
    }

    pub async fn delete_todo(&self, id: i64) -> Result<(), ServiceError> {
        match self.repo.delete(id).await? {
            0 => Err(ServiceError::NotFound(format!("todo {} not found", id))),
            _ => Ok(()),
        }
    }
}
