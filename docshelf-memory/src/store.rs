//! In-memory storage implementation for document stores.
//!
//! This module provides a simple in-memory backend that keeps documents in a
//! `HashMap` keyed by identifier, behind an async-safe read-write lock, and
//! hands out identifiers from a per-instance counter.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};
use async_trait::async_trait;
use mea::rwlock::RwLock;

use docshelf_core::{
    document::Document,
    query::Expr,
    error::{DocumentStoreError, DocumentStoreResult},
    backend::{StoreBackend, StoreBackendBuilder},
};

use crate::evaluator::DocumentEvaluator;

type DocumentMap = HashMap<String, Document>;

/// Identifier handed to the first document saved without one.
pub const DEFAULT_FIRST_ID: u64 = 1;


/// Thread-safe in-memory document storage backend.
///
/// Documents are stored by value, indexed by their identifier. Saving a
/// document without an identifier assigns the next value of a counter owned
/// by this instance, rendered in decimal (`"1"`, `"2"`, ...). Two separate
/// stores never share a counter.
///
/// Generated identifiers are not checked against identifiers callers chose
/// themselves, so saving `"1"` explicitly and then saving a document without
/// an identifier replaces the first record.
///
/// # Thread Safety
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state, allowing
/// it to be safely shared across async tasks. Multiple clones of the same instance
/// share the same underlying data and the same counter.
///
/// # Performance
///
/// Searches scan every document (no indexing).
///
/// # Example
///
/// ```ignore
/// use docshelf_memory::InMemoryStore;
/// use docshelf::{backend::StoreBackend, document::Document};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = InMemoryStore::new();
///
///     let saved = store.save_document(Document::builder().title("Notes").build()).await?;
///     assert_eq!(saved.id, "1");
///
///     let found = store.get_document("1").await?;
///     assert_eq!(found, Some(saved));
///
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct InMemoryStore {
    /// document_id -> document
    documents: Arc<RwLock<DocumentMap>>,
    /// Next identifier to hand out
    next_id: Arc<AtomicU64>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Creates a new empty in-memory document store.
    pub fn new() -> Self {
        Self::with_options(DEFAULT_FIRST_ID, 0)
    }

    /// Creates a builder for constructing an `InMemoryStore` with custom options.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use docshelf_memory::InMemoryStore;
    ///
    /// let store = InMemoryStore::builder().first_id(100).build().await.unwrap();
    /// ```
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }

    fn with_options(first_id: u64, capacity: usize) -> Self {
        Self {
            documents: Arc::new(RwLock::new(DocumentMap::with_capacity(capacity))),
            next_id: Arc::new(AtomicU64::new(first_id)),
        }
    }

    /// Reserves the next identifier, failing once the counter is used up.
    fn generate_id(&self) -> DocumentStoreResult<String> {
        self.next_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |id| id.checked_add(1))
            .map(|id| id.to_string())
            .map_err(|_| DocumentStoreError::IdentifiersExhausted)
    }
}


#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn save_document(&self, document: Document) -> DocumentStoreResult<Document> {
        let generated = !document.has_id();
        let document = match generated {
            true => {
                let id = self.generate_id()?;
                document.with_id(id)
            },
            false => document,
        };

        let replaced = self.documents
            .write()
            .await
            .insert(document.id.clone(), document.clone())
            .is_some();

        tracing::debug!(id = %document.id, generated, replaced, "saved document");

        Ok(document)
    }

    async fn get_document(&self, id: &str) -> DocumentStoreResult<Option<Document>> {
        let document = self.documents
            .read()
            .await
            .get(id)
            .cloned();

        tracing::trace!(id, found = document.is_some(), "looked up document");

        Ok(document)
    }

    async fn query_documents(&self, filter: Option<Expr>) -> DocumentStoreResult<Vec<Document>> {
        let documents = self.documents.read().await;

        let matched = match &filter {
            Some(filter) => DocumentEvaluator::filter_documents(documents.values(), filter),
            None => documents
                .values()
                .cloned()
                .collect::<Vec<_>>(),
        };

        match &filter {
            Some(filter) => tracing::debug!(%filter, scanned = documents.len(), matched = matched.len(), "queried documents"),
            None => tracing::debug!(scanned = documents.len(), matched = matched.len(), "listed all documents"),
        }

        Ok(matched)
    }

    async fn count_documents(&self) -> DocumentStoreResult<usize> {
        Ok(self.documents.read().await.len())
    }
}


/// Builder for constructing [`InMemoryStore`] instances.
///
/// # Example
///
/// ```ignore
/// use docshelf_memory::InMemoryStore;
/// use docshelf::backend::StoreBackendBuilder;
///
/// #[tokio::main]
/// async fn main() {
///     let store = InMemoryStore::builder()
///         .first_id(1000)
///         .capacity(64)
///         .build()
///         .await
///         .unwrap();
/// }
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryStoreBuilder {
    first_id: u64,
    capacity: usize,
}

impl Default for InMemoryStoreBuilder {
    fn default() -> Self {
        Self {
            first_id: DEFAULT_FIRST_ID,
            capacity: 0,
        }
    }
}

impl InMemoryStoreBuilder {
    /// Sets the value of the first generated identifier.
    pub fn first_id(mut self, first_id: u64) -> Self {
        self.first_id = first_id;
        self
    }

    /// Pre-sizes the document map for `capacity` documents.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Builds and returns a new [`InMemoryStore`] instance.
    ///
    /// This always succeeds and returns a freshly initialized store.
    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        Ok(InMemoryStore::with_options(self.first_id, self.capacity))
    }
}
