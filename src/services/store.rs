use thiserror::Error;

use crate::models::{ListParams, Property};
use crate::services::{memory::MemoryStore, sqlite::SqliteStore};

/// Errors that can occur when reading or writing listings
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Generate an id for a listing created without one
pub fn new_property_id() -> String {
    format!("p-{}", uuid::Uuid::new_v4().simple())
}

/// Listing source backing the API
///
/// Both backends share the same filter, sort and pagination semantics.
pub enum PropertyStore {
    Memory(MemoryStore),
    Sqlite(SqliteStore),
}

impl PropertyStore {
    pub fn backend(&self) -> &'static str {
        match self {
            PropertyStore::Memory(_) => "memory",
            PropertyStore::Sqlite(_) => "sqlite",
        }
    }

    /// Filtered, sorted page plus the total number of filtered listings
    pub async fn list(&self, params: &ListParams) -> Result<(Vec<Property>, usize), StoreError> {
        match self {
            PropertyStore::Memory(store) => Ok(store.list(params).await),
            PropertyStore::Sqlite(store) => store.list(params).await,
        }
    }

    /// Every listing in id order
    pub async fn all(&self) -> Result<Vec<Property>, StoreError> {
        match self {
            PropertyStore::Memory(store) => Ok(store.all().await),
            PropertyStore::Sqlite(store) => store.all().await,
        }
    }

    pub async fn get(&self, id: &str) -> Result<Option<Property>, StoreError> {
        match self {
            PropertyStore::Memory(store) => Ok(store.get(id).await),
            PropertyStore::Sqlite(store) => store.get(id).await,
        }
    }

    /// Store a new listing, assigning an id when it has none
    pub async fn create(&self, property: Property) -> Result<Property, StoreError> {
        match self {
            PropertyStore::Memory(store) => Ok(store.create(property).await),
            PropertyStore::Sqlite(store) => store.create(property).await,
        }
    }

    /// Returns whether a listing was removed
    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        match self {
            PropertyStore::Memory(store) => Ok(store.delete(id).await),
            PropertyStore::Sqlite(store) => store.delete(id).await,
        }
    }

    pub async fn count(&self) -> Result<usize, StoreError> {
        match self {
            PropertyStore::Memory(store) => Ok(store.count().await),
            PropertyStore::Sqlite(store) => store.count().await,
        }
    }

    /// Insert listings whose id is not stored yet
    pub async fn seed(&self, properties: Vec<Property>) -> Result<(), StoreError> {
        match self {
            PropertyStore::Memory(store) => {
                store.seed(properties).await;
                Ok(())
            }
            PropertyStore::Sqlite(store) => store.seed(&properties).await,
        }
    }

    pub async fn health_check(&self) -> bool {
        match self {
            PropertyStore::Memory(_) => true,
            PropertyStore::Sqlite(store) => store.health_check().await.unwrap_or(false),
        }
    }
}
