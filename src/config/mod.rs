use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub read_timeout_secs: u64,
    pub write_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub cors_origins: Vec<String>,
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

const DEV_JWT_SECRET: &str = "todo-api-development-secret";

/// One year
pub const MAX_JWT_EXPIRY_HOURS: u64 = 24 * 365;

/// Replace `target` when `key` is set; a value that fails to parse is an error
fn override_parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    target: &mut T,
) -> Result<(), ConfigError> {
    if let Some(value) = lookup(key) {
        *target = value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value })?;
    }
    Ok(())
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides(&lookup)?
        .validate()
    }

    fn with_env_overrides(
        mut self,
        lookup: &impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        // Database overrides
        if let Some(v) = lookup("DATABASE_URL") {
            self.database.url = v;
        }
        override_parsed(lookup, "DATABASE_MAX_CONNECTIONS", &mut self.database.max_connections)?;
        override_parsed(
            lookup,
            "DATABASE_CONNECTION_TIMEOUT",
            &mut self.database.connection_timeout,
        )?;
        override_parsed(lookup, "DATABASE_RUN_MIGRATIONS", &mut self.database.run_migrations)?;

        // Server overrides
        if let Some(v) = lookup("TODO_API_HOST") {
            self.server.host = v;
        }
        if lookup("TODO_API_PORT").is_some() {
            override_parsed(lookup, "TODO_API_PORT", &mut self.server.port)?;
        } else {
            override_parsed(lookup, "PORT", &mut self.server.port)?;
        }
        override_parsed(lookup, "SERVER_READ_TIMEOUT_SECS", &mut self.server.read_timeout_secs)?;
        override_parsed(lookup, "SERVER_WRITE_TIMEOUT_SECS", &mut self.server.write_timeout_secs)?;
        override_parsed(lookup, "SERVER_IDLE_TIMEOUT_SECS", &mut self.server.idle_timeout_secs)?;
        override_parsed(
            lookup,
            "SERVER_MAX_REQUEST_SIZE_BYTES",
            &mut self.server.max_request_size_bytes,
        )?;

        // Security overrides
        if let Some(v) = lookup("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(v) = lookup("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        override_parsed(lookup, "SECURITY_JWT_EXPIRY_HOURS", &mut self.security.jwt_expiry_hours)?;

        Ok(self)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.database.url.is_empty() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }
        if self.security.jwt_secret.is_empty() {
            return Err(ConfigError::Missing("JWT_SECRET"));
        }
        if !(1..=MAX_JWT_EXPIRY_HOURS).contains(&self.security.jwt_expiry_hours) {
            return Err(ConfigError::Invalid {
                key: "SECURITY_JWT_EXPIRY_HOURS",
                value: self.security.jwt_expiry_hours.to_string(),
            });
        }
        if self.server.host.parse::<std::net::IpAddr>().is_err() {
            return Err(ConfigError::Invalid {
                key: "TODO_API_HOST",
                value: self.server.host.clone(),
            });
        }
        Ok(self)
    }

    pub(crate) fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 10,
                connection_timeout: 30,
                run_migrations: true,
            },
            server: ServerConfig::default(),
            security: SecurityConfig {
                cors_origins: vec!["http://localhost:8080".to_string()],
                jwt_secret: DEV_JWT_SECRET.to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 20,
                connection_timeout: 10,
                run_migrations: true,
            },
            server: ServerConfig::default(),
            security: SecurityConfig {
                cors_origins: vec!["http://localhost:8080".to_string()],
                jwt_secret: DEV_JWT_SECRET.to_string(),
                jwt_expiry_hours: 24,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 50,
                connection_timeout: 5,
                run_migrations: false,
            },
            server: ServerConfig {
                max_request_size_bytes: 64 * 1024,
                ..ServerConfig::default()
            },
            security: SecurityConfig {
                cors_origins: vec!["http://localhost:8080".to_string()],
                // Must come from JWT_SECRET
                jwt_secret: String::new(),
                jwt_expiry_hours: 4,
            },
        }
    }

    /// Default `tracing` filter when `RUST_LOG` is unset
    pub fn default_log_filter(&self) -> &'static str {
        match self.environment {
            Environment::Development => "todo_api=debug,tower_http=debug,info",
            Environment::Staging | Environment::Production => "info",
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8085,
            read_timeout_secs: 5,
            write_timeout_secs: 10,
            idle_timeout_secs: 120,
            max_request_size_bytes: 1024 * 1024, // 1MB
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::Invalid {
            key: "TODO_API_HOST",
            value: raw,
        })
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}
