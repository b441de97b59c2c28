use std::str::FromStr;

use axum::http::HeaderValue;

/// Errors raised while loading [`ServerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be set")]
    Missing { name: &'static str },

    #[error("{name} has invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Which [`MovieStore`](movies_db::MovieStore) implementation backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// MongoDB, reached through `MONGODB_URLSTRING`.
    Mongo,
    /// Process-local store; data is lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("expected 'mongo' or 'memory', got '{other}'")),
        }
    }
}

/// MongoDB connection settings.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the MongoDB connection string have defaults suitable
/// for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3008`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<HeaderValue>,
    /// Storage backend (default: `mongo`).
    pub store: StoreBackend,
    /// Present whenever `store` is [`StoreBackend::Mongo`].
    pub mongo: Option<MongoConfig>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default                  |
    /// |----------------------|--------------------------|
    /// | `HOST`               | `0.0.0.0`                |
    /// | `PORT`               | `3008`                   |
    /// | `CORS_ORIGINS`       | `http://localhost:5173`  |
    /// | `MOVIES_STORE`       | `mongo`                  |
    /// | `MONGODB_URLSTRING`  | required for `mongo`     |
    /// | `MONGODB_DATABASE`   | `movies`                 |
    /// | `MONGODB_COLLECTION` | `movies`                 |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");

        let port_raw = var("PORT", "3008");
        let port: u16 = port_raw.parse().map_err(|e| ConfigError::Invalid {
            name: "PORT",
            value: port_raw.clone(),
            reason: format!("{e}"),
        })?;

        let cors_origins = var("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                origin.parse::<HeaderValue>().map_err(|e| ConfigError::Invalid {
                    name: "CORS_ORIGINS",
                    value: origin.to_string(),
                    reason: format!("{e}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let store_raw = var("MOVIES_STORE", "mongo");
        let store: StoreBackend = store_raw.parse().map_err(|reason| ConfigError::Invalid {
            name: "MOVIES_STORE",
            value: store_raw.clone(),
            reason,
        })?;

        let mongo = match store {
            StoreBackend::Mongo => Some(MongoConfig {
                uri: lookup("MONGODB_URLSTRING").ok_or(ConfigError::Missing {
                    name: "MONGODB_URLSTRING",
                })?,
                database: var("MONGODB_DATABASE", "movies"),
                collection: var("MONGODB_COLLECTION", "movies"),
            }),
            StoreBackend::Memory => None,
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            store,
            mongo,
        })
    }
}
