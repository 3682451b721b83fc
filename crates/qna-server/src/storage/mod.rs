//! Storage layer
//!
//! Two interchangeable backends behind `qna_core::Storage`: SQLite (embedded)
//! for persistent deployments and DashMap (in-memory) for development.

pub mod db;
pub mod memory;

#[cfg(test)]
pub(crate) mod contract_tests;

pub use db::SqlStorage;
pub use memory::MemoryStorage;

use crate::config::StorageBackend;
use anyhow::Result;
use qna_core::Storage;
use std::sync::Arc;

/// Build the backend chosen at startup
pub async fn open(backend: &StorageBackend) -> Result<Arc<dyn Storage>> {
    let storage: Arc<dyn Storage> = match backend {
        StorageBackend::Memory => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage (data is lost on exit)");
            Arc::new(MemoryStorage::new())
        }
        StorageBackend::Sql {
            url,
            max_connections,
        } => Arc::new(SqlStorage::connect(url, *max_connections).await?),
    };
    Ok(storage)
}
