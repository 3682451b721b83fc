//! Server configuration, read from environment variables

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to (`BIND_ADDRESS`)
    pub bind_address: String,
    /// Connection string of the relational store (`DATABASE_URL`).
    /// When absent the in-memory backend is used.
    pub database_url: Option<String>,
    /// Pool size for the relational store (`DATABASE_MAX_CONNECTIONS`)
    pub database_max_connections: u32,
    /// Directory of the built web client (`STATIC_DIR`)
    pub static_dir: Option<PathBuf>,
}

/// Storage backend selected at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Sql { url: String, max_connections: u32 },
}

impl ServerConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment...");
        Self::from_source(config::Environment::default())
    }

    fn from_source<S>(source: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default(
                "database_max_connections",
                i64::from(DEFAULT_MAX_CONNECTIONS),
            )?
            .add_source(source)
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn storage_backend(&self) -> StorageBackend {
        match self.database_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => StorageBackend::Sql {
                url: url.to_string(),
                max_connections: self.database_max_connections.max(1),
            },
            _ => StorageBackend::Memory,
        }
    }
}
