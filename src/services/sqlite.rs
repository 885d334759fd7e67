use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use serde::de::DeserializeOwned;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use std::str::FromStr;
use std::time::Duration;

use crate::models::{ListParams, Property, SortKey};
use crate::services::store::{new_property_id, StoreError};

const SELECT_COLUMNS: &str = "SELECT id, title, location, price, bedrooms, bathrooms, area_sqm, \
     description, image_urls_json, amenities_json, features_json FROM properties";

const INSERT_COLUMNS: &str = "(id, title, location, location_lower, price, bedrooms, bathrooms, \
     area_sqm, description, image_urls_json, amenities_json, features_json) \
     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

/// SQLite-backed listing store
///
/// Nested collections are kept as JSON text columns. The schema is created by
/// the embedded migrations on connect. `location_lower` holds the location
/// lowercased with Unicode rules on write; SQLite's `LOWER` only folds ASCII.
pub struct SqliteStore {
    pool: SqlitePool,
}

fn to_i64(v: usize) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

fn to_u32(v: i64) -> u32 {
    u32::try_from(v).unwrap_or_default()
}

/// Decode a JSON text column, degrading to an empty value when it is damaged
fn decode_json_column<T: DeserializeOwned + Default>(id: &str, column: &str, raw: &str) -> T {
    match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Property {}: unreadable {} ({}), using empty value", id, column, e);
            T::default()
        }
    }
}

fn row_to_property(row: &SqliteRow) -> Result<Property, StoreError> {
    let id: String = row.try_get("id")?;
    let image_urls: String = row.try_get("image_urls_json")?;
    let amenities: String = row.try_get("amenities_json")?;
    let features: String = row.try_get("features_json")?;

    Ok(Property {
        image_urls: decode_json_column(&id, "image_urls_json", &image_urls),
        amenities: decode_json_column(&id, "amenities_json", &amenities),
        features: decode_json_column(&id, "features_json", &features),
        id,
        title: row.try_get("title")?,
        location: row.try_get("location")?,
        price: row.try_get("price")?,
        bedrooms: to_u32(row.try_get("bedrooms")?),
        bathrooms: to_u32(row.try_get("bathrooms")?),
        area_sqm: row.try_get("area_sqm")?,
        description: row.try_get("description")?,
    })
}

fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, params: &ListParams) {
    let mut separator = " WHERE ";

    if let Some(needle) = params.location_needle() {
        // Plain substring search; `%` and `_` in the needle are literal
        qb.push(separator)
            .push("instr(location_lower, ")
            .push_bind(needle)
            .push(") > 0");
        separator = " AND ";
    }
    if let Some(min) = params.min_price.filter(|v| *v > 0.0) {
        qb.push(separator).push("price >= ").push_bind(min);
        separator = " AND ";
    }
    if let Some(max) = params.max_price.filter(|v| *v > 0.0) {
        qb.push(separator).push("price <= ").push_bind(max);
        separator = " AND ";
    }
    if let Some(min) = params.min_bedrooms.filter(|v| *v > 0) {
        qb.push(separator).push("bedrooms >= ").push_bind(i64::from(min));
    }
}

fn order_clause(sort: SortKey) -> &'static str {
    match sort {
        SortKey::IdAsc => " ORDER BY id",
        SortKey::PriceAsc => " ORDER BY price ASC, id",
        SortKey::PriceDesc => " ORDER BY price DESC, id",
    }
}

impl SqliteStore {
    /// Open (creating if missing) a database file and run migrations
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?;

        Self::with_pool(pool).await
    }

    /// Private in-memory database, kept alive on a single connection
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn count(&self) -> Result<usize, StoreError> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM properties")
            .fetch_one(&self.pool)
            .await?;
        Ok(usize::try_from(n).unwrap_or_default())
    }

    /// Insert listings, skipping ids that already exist
    pub async fn seed(&self, items: &[Property]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        let sql = format!("INSERT OR IGNORE INTO properties {}", INSERT_COLUMNS);

        for p in items {
            sqlx::query(&sql)
                .bind(&p.id)
                .bind(&p.title)
                .bind(&p.location)
                .bind(p.location.to_lowercase())
                .bind(p.price)
                .bind(i64::from(p.bedrooms))
                .bind(i64::from(p.bathrooms))
                .bind(p.area_sqm)
                .bind(&p.description)
                .bind(serde_json::to_string(&p.image_urls)?)
                .bind(serde_json::to_string(&p.amenities)?)
                .bind(serde_json::to_string(&p.features)?)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        tracing::debug!("Seeded {} properties", items.len());
        Ok(())
    }

    pub async fn create(&self, mut property: Property) -> Result<Property, StoreError> {
        if property.id.is_empty() {
            property.id = new_property_id();
        }

        let sql = format!("INSERT INTO properties {}", INSERT_COLUMNS);
        sqlx::query(&sql)
            .bind(&property.id)
            .bind(&property.title)
            .bind(&property.location)
            .bind(property.location.to_lowercase())
            .bind(property.price)
            .bind(i64::from(property.bedrooms))
            .bind(i64::from(property.bathrooms))
            .bind(property.area_sqm)
            .bind(&property.description)
            .bind(serde_json::to_string(&property.image_urls)?)
            .bind(serde_json::to_string(&property.amenities)?)
            .bind(serde_json::to_string(&property.features)?)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Created property {}", property.id);
        Ok(property)
    }

    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM properties WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Property>, StoreError> {
        let sql = format!("{} WHERE id = ?", SELECT_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_property).transpose()
    }

    pub async fn all(&self) -> Result<Vec<Property>, StoreError> {
        let sql = format!("{} ORDER BY id", SELECT_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(row_to_property).collect()
    }

    pub async fn list(&self, params: &ListParams) -> Result<(Vec<Property>, usize), StoreError> {
        let mut count_qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM properties");
        push_filters(&mut count_qb, params);
        let total: i64 = count_qb.build_query_scalar().fetch_one(&self.pool).await?;

        let mut qb = QueryBuilder::<Sqlite>::new(SELECT_COLUMNS);
        push_filters(&mut qb, params);
        qb.push(order_clause(params.sort))
            .push(" LIMIT ")
            .push_bind(to_i64(params.limit))
            .push(" OFFSET ")
            .push_bind(to_i64(params.offset));

        let rows = qb.build().fetch_all(&self.pool).await?;
        let items = rows.iter().map(row_to_property).collect::<Result<Vec<_>, _>>()?;

        Ok((items, usize::try_from(total).unwrap_or_default()))
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }

    /// Drop the listings table so every later query fails
    #[cfg(test)]
    pub(crate) async fn drop_table(&self) -> Result<(), StoreError> {
        sqlx::query("DROP TABLE properties").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Features;

    fn create_property(id: &str, location: &str, price: f64, bedrooms: u32) -> Property {
        Property {
            id: id.to_string(),
            title: id.to_uppercase(),
            location: location.to_string(),
            price,
            bedrooms,
            bathrooms: 2,
            area_sqm: 100.0,
            amenities: vec!["parking".to_string()],
            features: Features {
                quietness: 0.7,
                distance_to_sea_km: 3.5,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    async fn create_store() -> SqliteStore {
        let store = SqliteStore::in_memory().await.unwrap();
        store
            .seed(&[
                create_property("c", "Madrid", 500_000.0, 4),
                create_property("a", "Valencia", 320_000.0, 3),
                create_property("b", "valencia center", 450_000.0, 4),
            ])
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_seed_and_count() {
        let store = create_store().await;
        assert_eq!(store.count().await.unwrap(), 3);

        // Re-seeding the same ids is a no-op
        store.seed(&[create_property("a", "X", 1.0, 1)]).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_round_trips_json_columns() {
        let store = create_store().await;
        let a = store.get("a").await.unwrap().unwrap();
        assert_eq!(a, create_property("a", "Valencia", 320_000.0, 3));
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_filters_and_sort() {
        let store = create_store().await;
        let params = ListParams {
            location: Some("VALENCIA".to_string()),
            min_price: Some(400_000.0),
            min_bedrooms: Some(4),
            sort: SortKey::PriceDesc,
            limit: 20,
            offset: 0,
            ..Default::default()
        };

        let (items, total) = store.list(&params).await.unwrap();

        assert_eq!(total, 1);
        assert_eq!(items[0].title, "B");
    }

    #[tokio::test]
    async fn test_list_max_price_and_pagination() {
        let store = create_store().await;
        let params = ListParams {
            max_price: Some(480_000.0),
            sort: SortKey::PriceAsc,
            limit: 1,
            offset: 1,
            ..Default::default()
        };

        let (items, total) = store.list(&params).await.unwrap();

        assert_eq!(total, 2);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "b");
    }

    #[tokio::test]
    async fn test_create_and_delete() {
        let store = create_store().await;
        let created = store
            .create(create_property("", "Alicante", 210_000.0, 2))
            .await
            .unwrap();

        assert!(created.id.starts_with("p-"));
        assert_eq!(store.all().await.unwrap().len(), 4);
        assert!(store.delete(&created.id).await.unwrap());
        assert!(!store.delete(&created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_health_check() {
        let store = SqliteStore::in_memory().await.unwrap();
        assert!(store.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_location_filter_agrees_with_memory_store() {
        use crate::services::memory::MemoryStore;

        let listings = vec![
            create_property("a", "Valencia, Spain", 300_000.0, 3),
            create_property("b", "Málaga, Spain", 310_000.0, 3),
            create_property("c", "100% sea view", 320_000.0, 3),
            create_property("d", "MÁLAGA centro", 330_000.0, 3),
            create_property("e", "Costa_Blanca", 340_000.0, 3),
        ];

        let sqlite = SqliteStore::in_memory().await.unwrap();
        sqlite.seed(&listings).await.unwrap();
        let memory = MemoryStore::new(listings);

        for needle in ["_", "%", "\\", "MÁLAGA", "málaga", "valencia", "100%", "a_b", "  "] {
            let params = ListParams {
                location: Some(needle.to_string()),
                limit: 20,
                ..Default::default()
            };

            let (sql_items, sql_total) = sqlite.list(&params).await.unwrap();
            let (mem_items, mem_total) = memory.list(&params).await;

            let sql_ids: Vec<_> = sql_items.iter().map(|p| p.id.clone()).collect();
            let mem_ids: Vec<_> = mem_items.iter().map(|p| p.id.clone()).collect();
            assert_eq!((sql_ids, sql_total), (mem_ids, mem_total), "needle {:?}", needle);
        }

        let params = ListParams {
            location: Some("MÁLAGA".to_string()),
            limit: 20,
            ..Default::default()
        };
        let (items, total) = sqlite.list(&params).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(items[0].id, "b");
        assert_eq!(items[1].id, "d");
    }

    #[tokio::test]
    async fn test_damaged_json_columns_degrade_to_empty() {
        let store = create_store().await;
        sqlx::query("UPDATE properties SET amenities_json = 'not json', features_json = '[' WHERE id = 'a'")
            .execute(&store.pool)
            .await
            .unwrap();

        let a = store.get("a").await.unwrap().unwrap();
        assert!(a.amenities.is_empty());
        assert_eq!(a.features, Features::default());
        assert_eq!(a.location, "Valencia");
    }

    #[tokio::test]
    async fn test_dropped_table_fails_list() {
        let store = create_store().await;
        store.drop_table().await.unwrap();

        let params = ListParams {
            limit: 20,
            ..Default::default()
        };
        assert!(store.list(&params).await.is_err());
    }
}
