//! Generic document persistence.
//!
//! [`DocumentStore`] is the only thing services talk to. It routes a record
//! type to its collection through [`Document::KIND`], serializes records to
//! JSON objects, and hands them to a [`DocumentBackend`]. A store without a
//! backend is the degraded mode: creates fail with
//! [`StoreError::NotInitialized`], queries return nothing.

pub mod dynamo;
pub mod id;
pub mod memory;

use crate::schema::{Document, EntityKind, Fields};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

pub use dynamo::DynamoBackend;
pub use id::DocumentId;
pub use memory::MemoryBackend;

/// Field holding the document identifier in every stored document.
pub const ID_FIELD: &str = "_id";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database not available")]
    NotInitialized,
    #[error("{0}")]
    Storage(String),
    #[error("failed to encode document: {0}")]
    Encode(String),
}

/// Exact-equality filter on at most one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    All,
    Eq { field: &'static str, value: String },
}

impl Filter {
    pub fn eq(field: &'static str, value: impl Into<String>) -> Self {
        Filter::Eq {
            field,
            value: value.into(),
        }
    }

    /// `Eq` when a non-empty value is given, `All` otherwise.
    pub fn eq_opt(field: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => Filter::eq(field, v),
            _ => Filter::All,
        }
    }

    pub fn matches(&self, document: &Fields) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq { field, value } => {
                matches!(document.get(*field), Some(Value::String(s)) if s == value)
            }
        }
    }
}

/// A record as read back from the store, identifier included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<T> {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub record: T,
}

/// Storage engine behind the adapter. Implementations own the mapping from
/// JSON objects to their native representation.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Database (table) name, for diagnostics.
    fn name(&self) -> &str;

    /// Cheap reachability check.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Inserts `document` (already carrying `_id`) into `collection`.
    async fn insert(&self, collection: &str, document: Fields) -> Result<(), StoreError>;

    /// Up to `limit` documents of `collection` matching `filter`, in the
    /// backend's natural order.
    async fn query(
        &self,
        collection: &str,
        filter: &Filter,
        limit: usize,
    ) -> Result<Vec<Fields>, StoreError>;
}

#[derive(Clone, Default)]
pub struct DocumentStore {
    backend: Option<Arc<dyn DocumentBackend>>,
}

impl DocumentStore {
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// A store in degraded mode.
    pub fn disconnected() -> Self {
        Self { backend: None }
    }

    pub fn is_connected(&self) -> bool {
        self.backend.is_some()
    }

    pub fn database_name(&self) -> Option<&str> {
        self.backend.as_deref().map(|b| b.name())
    }

    pub async fn create_document<T: Document>(&self, record: &T) -> Result<DocumentId, StoreError> {
        let backend = self.backend.as_ref().ok_or(StoreError::NotInitialized)?;

        let mut document = match serde_json::to_value(record) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                return Err(StoreError::Encode(format!(
                    "{} serialized to {} instead of an object",
                    T::KIND.name(),
                    other
                )))
            }
            Err(e) => return Err(StoreError::Encode(e.to_string())),
        };

        let id = DocumentId::generate();
        document.insert(ID_FIELD.to_string(), Value::String(id.to_string()));

        backend.insert(T::KIND.collection(), document).await?;
        tracing::info!("Created {} document {}", T::KIND.collection(), id);
        Ok(id)
    }

    pub async fn get_documents<T: Document>(
        &self,
        filter: &Filter,
        limit: usize,
    ) -> Result<Vec<Stored<T>>, StoreError> {
        let Some(backend) = self.backend.as_ref() else {
            return Ok(Vec::new());
        };
        if limit == 0 {
            return Ok(Vec::new());
        }

        let rows = backend.query(T::KIND.collection(), filter, limit).await?;

        let mut documents = Vec::with_capacity(rows.len());
        for row in rows {
            match serde_json::from_value::<Stored<T>>(Value::Object(row)) {
                Ok(doc) => documents.push(doc),
                Err(e) => {
                    tracing::warn!("Skipping undecodable {} document: {}", T::KIND.collection(), e)
                }
            }
        }
        Ok(documents)
    }

    /// Collections that currently hold at least one document.
    pub async fn collections(&self) -> Result<Vec<String>, StoreError> {
        let backend = self.backend.as_ref().ok_or(StoreError::NotInitialized)?;

        let mut names = Vec::new();
        for kind in EntityKind::ALL {
            let sample = backend.query(kind.collection(), &Filter::All, 1).await?;
            if !sample.is_empty() {
                names.push(kind.collection().to_string());
            }
        }
        Ok(names)
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        let backend = self.backend.as_ref().ok_or(StoreError::NotInitialized)?;
        backend.ping().await
    }
}
