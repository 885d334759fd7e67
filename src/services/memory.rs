use std::cmp::Ordering;
use tokio::sync::RwLock;

use crate::models::{ListParams, Property, SortKey};
use crate::services::store::new_property_id;

/// In-process listing store seeded from the properties file
pub struct MemoryStore {
    properties: RwLock<Vec<Property>>,
}

fn compare(sort: SortKey, a: &Property, b: &Property) -> Ordering {
    let by_price = a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal);
    match sort {
        SortKey::IdAsc => a.id.cmp(&b.id),
        SortKey::PriceAsc => by_price.then_with(|| a.id.cmp(&b.id)),
        SortKey::PriceDesc => by_price.reverse().then_with(|| a.id.cmp(&b.id)),
    }
}

impl MemoryStore {
    pub fn new(properties: Vec<Property>) -> Self {
        Self {
            properties: RwLock::new(properties),
        }
    }

    pub async fn list(&self, params: &ListParams) -> (Vec<Property>, usize) {
        let properties = self.properties.read().await;

        let mut filtered: Vec<&Property> = properties.iter().filter(|p| params.matches(p)).collect();
        filtered.sort_by(|a, b| compare(params.sort, a, b));

        let total = filtered.len();
        let page = filtered
            .into_iter()
            .skip(params.offset)
            .take(params.limit)
            .cloned()
            .collect();

        (page, total)
    }

    pub async fn all(&self) -> Vec<Property> {
        let mut all = self.properties.read().await.clone();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    pub async fn get(&self, id: &str) -> Option<Property> {
        self.properties
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub async fn create(&self, mut property: Property) -> Property {
        if property.id.is_empty() {
            property.id = new_property_id();
        }
        self.properties.write().await.push(property.clone());
        tracing::debug!("Created property {}", property.id);
        property
    }

    pub async fn delete(&self, id: &str) -> bool {
        let mut properties = self.properties.write().await;
        let before = properties.len();
        properties.retain(|p| p.id != id);
        before != properties.len()
    }

    pub async fn count(&self) -> usize {
        self.properties.read().await.len()
    }

    pub async fn seed(&self, items: Vec<Property>) {
        let mut properties = self.properties.write().await;
        for item in items {
            if !properties.iter().any(|p| p.id == item.id) {
                properties.push(item);
            }
        }
    }
}
