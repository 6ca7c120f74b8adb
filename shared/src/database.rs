use crate::config::{AppConfig, MEMORY_DATABASE_URL};
use aws_sdk_dynamodb::Client as DynamoClient;
use std::sync::Arc;
use taskhub_atoms::store::{DocumentBackend, DocumentStore, DynamoBackend, MemoryBackend};

/// Builds the process-wide store. Never fails: a missing configuration or an
/// unreachable table leaves the store disconnected (degraded mode).
pub async fn connect(config: &AppConfig) -> DocumentStore {
    let Some((url, name)) = config.database() else {
        tracing::warn!("⚠️ DATABASE_URL / DATABASE_NAME not set - running without a database");
        return DocumentStore::disconnected();
    };

    let backend: Arc<dyn DocumentBackend> = if url == MEMORY_DATABASE_URL {
        Arc::new(MemoryBackend::new(name))
    } else {
        let aws_config = aws_config::from_env().endpoint_url(url).load().await;
        Arc::new(DynamoBackend::new(DynamoClient::new(&aws_config), name))
    };

    let store = DocumentStore::new(backend);
    match store.ping().await {
        Ok(()) => {
            tracing::info!("✅ Connected to database {}", name);
            store
        }
        Err(e) => {
            tracing::warn!("⚠️ Database {} unreachable, continuing without it: {}", name, e);
            DocumentStore::disconnected()
        }
    }
}
