// ./infrastructure/src/persistence/in_memory_repository.rs
use application::{ApplicationError, DocumentRepository};
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use domain::{Document, DocumentId, SearchRequest};
use std::sync::Arc;
use tracing::{debug, instrument, trace};

/// Document repository backed by a concurrent hash map.
///
/// Cloning shares the underlying storage. Entries are never removed.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentRepository {
    // Document ID -> Document
    documents: Arc<DashMap<DocumentId, Arc<Document>>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self {
            documents: Arc::new(DashMap::new()),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            documents: Arc::new(DashMap::with_capacity(capacity)),
        }
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    #[instrument(skip(self, document))]
    async fn upsert(&self, mut document: Document) -> Result<Document, ApplicationError> {
        let id = document.assigned_id().cloned().ok_or_else(|| {
            ApplicationError::InvalidInput("Cannot store a document without an id".to_string())
        })?;

        // The entry holds the shard lock, so the existence check and the
        // write cannot interleave with another save of the same id.
        match self.documents.entry(id) {
            Entry::Occupied(mut occupied) => {
                debug!(doc_id = %occupied.key(), "Replacing stored document, keeping its creation time");
                document.set_created(occupied.get().created());
                occupied.insert(Arc::new(document.clone()));
            }
            Entry::Vacant(vacant) => {
                debug!(doc_id = %vacant.key(), "Inserting new document");
                vacant.insert(Arc::new(document.clone()));
            }
        }
        Ok(document)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &DocumentId) -> Result<Option<Document>, ApplicationError> {
        debug!(doc_id = %id.as_str(), "Getting document from in-memory store");
        // Get returns a Ref, so we clone the document out of the Arc
        let doc = self.documents.get(id).map(|doc_ref| (**doc_ref).clone());
        Ok(doc)
    }

    #[instrument(skip(self, request))]
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Document>, ApplicationError> {
        debug!(
            stored = self.documents.len(),
            "Scanning in-memory store for matching documents"
        );
        let hits: Vec<Document> = self
            .documents
            .iter()
            .filter(|entry| request.matches(entry.value()))
            .map(|entry| (**entry.value()).clone())
            .collect();
        trace!(hits = hits.len(), "Scan finished");
        Ok(hits)
    }

    async fn count(&self) -> Result<usize, ApplicationError> {
        Ok(self.documents.len())
    }
}
