use super::{DocumentBackend, Filter, StoreError};
use crate::schema::Fields;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-local backend keeping documents in insertion order.
/// Selected with `DATABASE_URL=memory://` and used by tests.
pub struct MemoryBackend {
    name: String,
    collections: RwLock<HashMap<String, Vec<Fields>>>,
}

impl MemoryBackend {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collections: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl DocumentBackend for MemoryBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert(&self, collection: &str, document: Fields) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();

        let id = document.get(super::ID_FIELD);
        if id.is_some() && docs.iter().any(|d| d.get(super::ID_FIELD) == id) {
            return Err(StoreError::Storage(format!(
                "duplicate _id in collection {}",
                collection
            )));
        }
        docs.push(document);
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        filter: &Filter,
        limit: usize,
    ) -> Result<Vec<Fields>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| filter.matches(d))
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
