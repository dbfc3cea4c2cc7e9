use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

use crate::app::{self, AppState};
use crate::auth::{PasswordError, PasswordHasher, TokenIssuer};
use crate::config::AppConfig;
use crate::database::{DatabaseError, HealthCheck, Todo, TodoRepository, User, UserRepository};
use crate::services::{TodoService, UserService};

/// Todo store backed by a Vec, ids assigned like BIGSERIAL
#[derive(Default)]
pub struct InMemoryTodoRepository {
    inner: Mutex<Table<Todo>>,
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    inner: Mutex<Table<User>>,
}

struct Table<T> {
    rows: Vec<T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self { rows: Vec::new(), last_id: 0 }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

impl InMemoryTodoRepository {
    pub fn snapshot(&self) -> Vec<Todo> {
        self.inner.lock().unwrap().rows.clone()
    }
}

impl InMemoryUserRepository {
    pub fn snapshot(&self) -> Vec<User> {
        self.inner.lock().unwrap().rows.clone()
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn select_all(&self) -> Result<Vec<Todo>, DatabaseError> {
        Ok(self.snapshot())
    }

    async fn insert(&self, title: &str) -> Result<Todo, DatabaseError> {
        let mut table = self.inner.lock().unwrap();
        let todo = Todo {
            id: table.next_id(),
            title: title.to_string(),
            done: false,
        };
        table.rows.push(todo.clone());
        Ok(todo)
    }

    async fn delete(&self, id: i64) -> Result<u64, DatabaseError> {
        let mut table = self.inner.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|todo| todo.id != id);
        Ok((before - table.rows.len()) as u64)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn select_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let table = self.inner.lock().unwrap();
        Ok(table.rows.iter().find(|user| user.email == email).cloned())
    }

    async fn insert(&self, email: &str, password_hash: &str) -> Result<User, DatabaseError> {
        let mut table = self.inner.lock().unwrap();
        if table.rows.iter().any(|user| user.email == email) {
            return Err(DatabaseError::Conflict("users_email_key".to_string()));
        }
        let user = User {
            id: table.next_id(),
            email: email.to_string(),
            password: password_hash.to_string(),
        };
        table.rows.push(user.clone());
        Ok(user)
    }
}

fn unreachable_store() -> DatabaseError {
    DatabaseError::ConnectionError("connection refused".to_string())
}

/// Every call fails as if the database were down
pub struct FailingTodoRepository;

pub struct FailingUserRepository;

#[async_trait]
impl TodoRepository for FailingTodoRepository {
    async fn select_all(&self) -> Result<Vec<Todo>, DatabaseError> {
        Err(unreachable_store())
    }

    async fn insert(&self, _title: &str) -> Result<Todo, DatabaseError> {
        Err(unreachable_store())
    }

    async fn delete(&self, _id: i64) -> Result<u64, DatabaseError> {
        Err(unreachable_store())
    }
}

#[async_trait]
impl UserRepository for FailingUserRepository {
    async fn select_by_email(&self, _email: &str) -> Result<Option<User>, DatabaseError> {
        Err(unreachable_store())
    }

    async fn insert(&self, _email: &str, _password_hash: &str) -> Result<User, DatabaseError> {
        Err(unreachable_store())
    }
}

/// Answers correctly, but only after `delay`
pub struct SlowTodoRepository {
    pub delay: Duration,
}

#[async_trait]
impl TodoRepository for SlowTodoRepository {
    async fn select_all(&self) -> Result<Vec<Todo>, DatabaseError> {
        tokio::time::sleep(self.delay).await;
        Ok(Vec::new())
    }

    async fn insert(&self, title: &str) -> Result<Todo, DatabaseError> {
        tokio::time::sleep(self.delay).await;
        Ok(Todo {
            id: 1,
            title: title.to_string(),
            done: false,
        })
    }

    async fn delete(&self, _id: i64) -> Result<u64, DatabaseError> {
        tokio::time::sleep(self.delay).await;
        Ok(0)
    }
}

/// Reversible stand-in for Argon2 so router tests stay fast
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        Ok(format!("plain${}", password))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        hash.strip_prefix("plain$")
            .map(|stored| stored == password)
            .ok_or(PasswordError::MalformedHash)
    }
}

pub struct StaticHealth(pub bool);

#[async_trait]
impl HealthCheck for StaticHealth {
    async fn ping(&self) -> Result<(), DatabaseError> {
        if self.0 {
            Ok(())
        } else {
            Err(unreachable_store())
        }
    }
}

/// Router wired to in-memory collaborators, with handles for inspecting the stores
pub struct TestApp {
    pub router: Router,
    pub todos: Arc<InMemoryTodoRepository>,
    pub users: Arc<InMemoryUserRepository>,
}

impl TestApp {
    pub fn new() -> Self {
        let todos = Arc::new(InMemoryTodoRepository::default());
        let users = Arc::new(InMemoryUserRepository::default());
        let router = build_router(
            &AppConfig::development(),
            todos.clone(),
            users.clone(),
            true,
        );
        Self { router, todos, users }
    }

    /// Router built from `config` around a todo store that takes `delay` per call
    pub fn slow_store(config: &AppConfig, delay: Duration) -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let router = build_router(
            config,
            Arc::new(SlowTodoRepository { delay }),
            users.clone(),
            true,
        );
        Self {
            router,
            todos: Arc::default(),
            users,
        }
    }

    /// Repositories and health check that always fail
    pub fn failing_store() -> Self {
        let router = build_router(
            &AppConfig::development(),
            Arc::new(FailingTodoRepository),
            Arc::new(FailingUserRepository),
            false,
        );
        Self {
            router,
            todos: Arc::default(),
            users: Arc::default(),
        }
    }
}

fn build_router(
    config: &AppConfig,
    todos: Arc<dyn TodoRepository>,
    users: Arc<dyn UserRepository>,
    healthy: bool,
) -> Router {
    let tokens = TokenIssuer::from_config(&config.security).unwrap();
    let state = AppState {
        todos: TodoService::new(todos),
        users: UserService::new(users, Arc::new(PlainHasher), tokens),
        health: Arc::new(StaticHealth(healthy)),
    };
    app::router(state, config).unwrap()
}

pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Drive one request through the router; empty bodies come back as `Value::Null`
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}
