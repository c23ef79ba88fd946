use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::DataError;

/// Opaque JSON document as stored remotely.
pub type Record = Value;

/// Fetch and write-back contract of the remote document store.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch_collection(&self, name: &str) -> Result<Vec<Record>, DataError>;
    async fn fetch_by_id(&self, collection: &str, id: &str) -> Result<Record, DataError>;
    async fn write_record(&self, collection: &str, id: &str, patch: Record)
        -> Result<(), DataError>;
}

pub struct MissingDocumentSource;

#[async_trait]
impl DocumentSource for MissingDocumentSource {
    async fn fetch_collection(&self, name: &str) -> Result<Vec<Record>, DataError> {
        Err(DataError::NetworkFailure(format!(
            "document store unavailable for collection {name}"
        )))
    }

    async fn fetch_by_id(&self, collection: &str, id: &str) -> Result<Record, DataError> {
        Err(DataError::NetworkFailure(format!(
            "document store unavailable for {collection}/{id}"
        )))
    }

    async fn write_record(
        &self,
        collection: &str,
        id: &str,
        _patch: Record,
    ) -> Result<(), DataError> {
        Err(DataError::NetworkFailure(format!(
            "document store unavailable for {collection}/{id}"
        )))
    }
}

/// Process-local store. Collections keep insertion order; a write merges the
/// patch's top-level keys into the stored document and creates it if absent.
#[derive(Default)]
pub struct MemoryDocumentSource {
    collections: RwLock<HashMap<String, Vec<(String, Record)>>>,
}

impl MemoryDocumentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, collection: &str, id: &str, record: Record) -> Self {
        upsert(self.collections.get_mut(), collection, id, record);
        self
    }

    pub async fn insert(&self, collection: &str, id: &str, record: Record) {
        let mut collections = self.collections.write().await;
        upsert(&mut collections, collection, id, record);
    }

    pub async fn get(&self, collection: &str, id: &str) -> Option<Record> {
        let collections = self.collections.read().await;
        collections
            .get(collection)?
            .iter()
            .find(|(doc_id, _)| doc_id == id)
            .map(|(_, record)| record.clone())
    }
}

fn upsert(
    collections: &mut HashMap<String, Vec<(String, Record)>>,
    collection: &str,
    id: &str,
    patch: Record,
) {
    let documents = collections.entry(collection.to_string()).or_default();
    match documents.iter_mut().find(|(doc_id, _)| doc_id == id) {
        Some((_, existing)) => merge(existing, patch),
        None => documents.push((id.to_string(), patch)),
    }
}

fn merge(existing: &mut Record, patch: Record) {
    match (existing, patch) {
        (Value::Object(existing), Value::Object(patch)) => {
            for (key, value) in patch {
                existing.insert(key, value);
            }
        }
        (existing, patch) => *existing = patch,
    }
}

#[async_trait]
impl DocumentSource for MemoryDocumentSource {
    async fn fetch_collection(&self, name: &str) -> Result<Vec<Record>, DataError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(name)
            .map(|documents| documents.iter().map(|(_, record)| record.clone()).collect())
            .unwrap_or_default())
    }

    async fn fetch_by_id(&self, collection: &str, id: &str) -> Result<Record, DataError> {
        self.get(collection, id)
            .await
            .ok_or_else(|| DataError::NotFound(format!("{collection}/{id}")))
    }

    async fn write_record(
        &self,
        collection: &str,
        id: &str,
        patch: Record,
    ) -> Result<(), DataError> {
        info!(collection, id, "store: writing record in memory");
        self.insert(collection, id, patch).await;
        Ok(())
    }
}
