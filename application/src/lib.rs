use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{Document, DocumentId, SearchRequest};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, instrument};

// --- Application Errors ---
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Repository operation '{operation}' failed: {source}")]
    RepositoryError {
        operation: &'static str,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),
}

// --- Infrastructure Interfaces (Traits) ---

/// Source of creation timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of fresh document ids.
pub trait IdGenerator: Send + Sync {
    /// Returns a non-empty id that has never been returned before.
    fn generate(&self) -> DocumentId;
}

/// Interface for storing and retrieving documents.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Inserts or replaces the document under its id and returns what was stored.
    ///
    /// If an entry with the same id already exists, its `created` value replaces
    /// the incoming one. The existence check and the write must be a single
    /// atomic step. Fails with `InvalidInput` when the document has no id.
    async fn upsert(&self, document: Document) -> Result<Document, ApplicationError>;
    /// Retrieves a document by its ID.
    async fn get(&self, id: &DocumentId) -> Result<Option<Document>, ApplicationError>;
    /// Returns every stored document accepted by the request, in no particular order.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Document>, ApplicationError>;
    /// Returns the number of stored documents.
    async fn count(&self) -> Result<usize, ApplicationError>;
    /// Upserts multiple documents, returning the stored versions in input order.
    #[instrument(skip(self, documents))]
    async fn upsert_batch(
        &self,
        documents: Vec<Document>,
    ) -> Result<Vec<Document>, ApplicationError> {
        debug!(count = documents.len(), "Upserting batch via default iteration");
        let mut stored = Vec::with_capacity(documents.len());
        for doc in documents {
            // If one fails, stop.
            stored.push(self.upsert(doc).await?);
        }
        Ok(stored)
    }
}

// --- Application Services (Use Cases) ---

/// Upsert, lookup and search over a document repository.
///
/// Assigns ids and creation times to new documents using the injected
/// `IdGenerator` and `Clock`. Construct once and share behind an `Arc`.
pub struct DocumentStore {
    repository: Arc<dyn DocumentRepository>,
    clock: Arc<dyn Clock>,
    id_generator: Arc<dyn IdGenerator>,
}

impl DocumentStore {
    pub fn new(
        repository: Arc<dyn DocumentRepository>,
        clock: Arc<dyn Clock>,
        id_generator: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            repository,
            clock,
            id_generator,
        }
    }

    /// Upserts a document.
    ///
    /// A missing or empty id is replaced by a generated one and `created` is
    /// stamped with the current time. A known id keeps its stored `created`.
    /// An unknown, caller-supplied id is stored with whatever `created` the
    /// caller gave, including none.
    #[instrument(skip(self, document))]
    pub async fn save(&self, document: Document) -> Result<Document, ApplicationError> {
        let document = self.assign_identity(document);
        let doc_id = document.id().map(ToString::to_string).unwrap_or_default();

        match self.repository.upsert(document).await {
            Ok(stored) => {
                info!(doc_id = %doc_id, "Document saved");
                Ok(stored)
            }
            Err(e) => {
                error!(doc_id = %doc_id, "Failed to save document to repository: {}", e);
                Err(ApplicationError::RepositoryError {
                    operation: "upsert",
                    source: Box::new(e),
                })
            }
        }
    }

    /// Saves each document with `save` semantics and returns the stored
    /// documents in input order. Stops at the first failure.
    #[instrument(skip(self, documents), fields(batch_size = documents.len()))]
    pub async fn save_batch(
        &self,
        documents: Vec<Document>,
    ) -> Result<Vec<Document>, ApplicationError> {
        if documents.is_empty() {
            debug!("Received an empty batch.");
            return Ok(Vec::new());
        }

        let prepared: Vec<Document> = documents
            .into_iter()
            .map(|doc| self.assign_identity(doc))
            .collect();

        let stored = self.repository.upsert_batch(prepared).await.map_err(|e| {
            error!("Failed to save batch to repository: {}", e);
            ApplicationError::RepositoryError {
                operation: "upsert_batch",
                source: Box::new(e),
            }
        })?;
        info!(saved = stored.len(), "Batch saved");
        Ok(stored)
    }

    /// Looks up a document by id. Unknown ids yield `None`.
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Document>, ApplicationError> {
        let doc_id = DocumentId::from(id);
        let found = self.repository.get(&doc_id).await.map_err(|e| {
            error!(doc_id = %id, "Failed to read document from repository: {}", e);
            ApplicationError::RepositoryError {
                operation: "get",
                source: Box::new(e),
            }
        })?;
        debug!(doc_id = %id, found = found.is_some(), "Lookup completed");
        Ok(found)
    }

    /// Returns every document matching all present criteria of the request.
    #[instrument(skip(self, request), fields(unconstrained = request.is_unconstrained()))]
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<Document>, ApplicationError> {
        let hits = self.repository.search(request).await.map_err(|e| {
            error!("Search failed in repository: {}", e);
            ApplicationError::RepositoryError {
                operation: "search",
                source: Box::new(e),
            }
        })?;
        info!(hits = hits.len(), "Search completed");
        Ok(hits)
    }

    /// Number of stored documents.
    pub async fn count(&self) -> Result<usize, ApplicationError> {
        self.repository
            .count()
            .await
            .map_err(|e| ApplicationError::RepositoryError {
                operation: "count",
                source: Box::new(e),
            })
    }

    fn assign_identity(&self, mut document: Document) -> Document {
        if document.assigned_id().is_none() {
            let id = self.id_generator.generate();
            debug!(doc_id = %id, "Assigned generated id");
            document.set_id(id);
            document.set_created(Some(self.clock.now()));
        }
        document
    }
}
