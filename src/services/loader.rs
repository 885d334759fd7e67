use std::path::Path;

use crate::config::{StorageBackend, StorageSettings};
use crate::models::Property;
use crate::services::{
    memory::MemoryStore,
    sqlite::SqliteStore,
    store::{PropertyStore, StoreError},
};

/// Read a JSON array of listings from disk
pub fn load_properties_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Property>, StoreError> {
    let bytes = std::fs::read(path.as_ref())?;
    let properties: Vec<Property> = serde_json::from_slice(&bytes)?;
    Ok(properties)
}

/// Build the configured listing store
///
/// The memory backend is filled from the properties file. The SQLite backend
/// is seeded from the same file only when its table is empty. Any failure here
/// is meant to abort startup.
pub async fn open_store(settings: &StorageSettings) -> Result<PropertyStore, StoreError> {
    match settings.backend {
        StorageBackend::Memory => {
            let properties = load_properties_from_file(&settings.properties_path)?;
            tracing::info!(
                "Loaded {} properties from {}",
                properties.len(),
                settings.properties_path
            );
            Ok(PropertyStore::Memory(MemoryStore::new(properties)))
        }
        StorageBackend::Sqlite => {
            let store = SqliteStore::connect(
                &settings.database_url,
                settings.max_connections.unwrap_or(5),
            )
            .await?;

            if store.count().await? == 0 {
                let seed = load_properties_from_file(&settings.properties_path)?;
                tracing::info!(
                    "Seeding empty database with {} properties from {}",
                    seed.len(),
                    settings.properties_path
                );
                store.seed(&seed).await?;
            }

            Ok(PropertyStore::Sqlite(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"[
        {"id": "es-001", "title": "Quiet flat", "location": "Valencia", "price": 320000,
         "bedrooms": 3, "amenities": ["parking"], "features": {"quietness": 0.9}},
        {"id": "es-002", "title": "Beach house", "location": "Alicante", "price": 450000}
    ]"#;

    fn write_sample(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_properties() {
        let file = write_sample(SAMPLE);
        let properties = load_properties_from_file(file.path()).unwrap();

        assert_eq!(properties.len(), 2);
        assert_eq!(properties[0].features.quietness, 0.9);
        assert!(properties[1].amenities.is_empty());
    }

    #[test]
    fn test_load_entry_without_price() {
        let file = write_sample(r#"[{"id": "es-003", "title": "Plot", "location": "Murcia"}]"#);
        let properties = load_properties_from_file(file.path()).unwrap();

        assert_eq!(properties.len(), 1);
        assert_eq!(properties[0].price, 0.0);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = load_properties_from_file("/nonexistent/properties.json").unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let file = write_sample("{not json");
        let err = load_properties_from_file(file.path()).unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
    }

    #[tokio::test]
    async fn test_open_memory_store() {
        let file = write_sample(SAMPLE);
        let settings = StorageSettings {
            properties_path: file.path().to_string_lossy().into_owned(),
            ..Default::default()
        };

        let store = open_store(&settings).await.unwrap();

        assert_eq!(store.backend(), "memory");
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_open_sqlite_store_seeds_once() {
        let file = write_sample(SAMPLE);
        let dir = tempfile::tempdir().unwrap();
        let settings = StorageSettings {
            backend: StorageBackend::Sqlite,
            properties_path: file.path().to_string_lossy().into_owned(),
            database_url: format!("sqlite://{}", dir.path().join("app.db").display()),
            max_connections: Some(2),
        };

        let store = open_store(&settings).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 2);
        store.delete("es-002").await.unwrap();
        drop(store);

        // Non-empty database is not re-seeded
        let reopened = open_store(&settings).await.unwrap();
        assert_eq!(reopened.count().await.unwrap(), 1);
    }
}
