//! Main document store interface.
//!
//! This module provides the API callers work with. It exposes two store types:
//!
//! - [`DocumentStore`] - Typed store for working with a specific backend implementation
//! - [`DynDocumentStore`] - Dynamic dispatch store for runtime backend selection
//!
//! Both offer the same three core operations: [`save`](DocumentStore::save),
//! [`search`](DocumentStore::search) and [`find_by_id`](DocumentStore::find_by_id).
//!
//! # Example
//!
//! ```ignore
//! use docshelf::{prelude::*, memory::InMemoryStore};
//!
//! let store = DocumentStore::new(InMemoryStore::new());
//! let saved = store.save(Document::builder().title("Notes").build()).await?;
//!
//! assert_eq!(store.find_by_id(&saved.id).await?, Some(saved));
//! ```

use crate::{
    backend::{DynStoreBackend, StoreBackend},
    document::Document,
    error::DocumentStoreResult,
    query::Expr,
    search::SearchRequest,
};

/// A document store bound to a specific backend implementation.
///
/// # Type Parameters
///
/// * `B` - The backend implementation type
#[derive(Debug)]
pub struct DocumentStore<B: StoreBackend> {
    backend: B,
}

impl<B: StoreBackend> DocumentStore<B> {
    /// Creates a new document store with the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns a reference to the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Upserts a document and returns it with its resolved identifier.
    ///
    /// A document without an identifier gets a freshly generated one. A document
    /// with an identifier replaces whatever was stored under it; nothing of the
    /// previous record is kept.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend fails.
    pub async fn save(&self, document: Document) -> DocumentStoreResult<Document> {
        StoreBackend::save_document(&self.backend, document).await
    }

    /// Returns every stored document matching the request.
    ///
    /// Categories are combined with AND, values inside one category with OR.
    /// An unconstrained request returns all documents. No ordering is guaranteed.
    pub async fn search(&self, request: &SearchRequest) -> DocumentStoreResult<Vec<Document>> {
        StoreBackend::query_documents(&self.backend, request.to_filter()).await
    }

    /// Returns every stored document matching a hand-built filter expression.
    pub async fn query(&self, filter: Expr) -> DocumentStoreResult<Vec<Document>> {
        StoreBackend::query_documents(&self.backend, Some(filter)).await
    }

    /// Looks up a document by identifier. Unknown identifiers yield `None`.
    pub async fn find_by_id(&self, id: &str) -> DocumentStoreResult<Option<Document>> {
        StoreBackend::get_document(&self.backend, id).await
    }

    /// Returns the number of stored documents.
    pub async fn count(&self) -> DocumentStoreResult<usize> {
        StoreBackend::count_documents(&self.backend).await
    }

    /// Shuts down the store and releases backend resources.
    ///
    /// # Errors
    ///
    /// Returns an error if the shutdown operation fails.
    pub async fn shutdown(self) -> DocumentStoreResult<()> {
        StoreBackend::shutdown(self.backend).await?;

        Ok(())
    }
}

impl<B: StoreBackend + 'static> DocumentStore<B> {
    /// Converts this store into a dynamically dispatched one.
    pub fn into_dyn(self) -> DynDocumentStore {
        DynDocumentStore::new(Box::new(self.backend))
    }
}

/// A document store over a boxed backend trait object.
#[derive(Debug)]
pub struct DynDocumentStore {
    backend: Box<dyn DynStoreBackend>,
}

impl DynDocumentStore {
    /// Creates a new dynamic document store with the given backend trait object.
    pub fn new(backend: Box<dyn DynStoreBackend>) -> Self {
        Self { backend }
    }

    /// Attempts to downcast the backend to a concrete type.
    pub fn backend_as<B: StoreBackend + 'static>(&self) -> Option<&B> {
        self.backend
            .as_any()
            .downcast_ref::<B>()
    }

    /// Upserts a document and returns it with its resolved identifier.
    pub async fn save(&self, document: Document) -> DocumentStoreResult<Document> {
        self.backend
            .save_document(document)
            .await
    }

    /// Returns every stored document matching the request.
    pub async fn search(&self, request: &SearchRequest) -> DocumentStoreResult<Vec<Document>> {
        self.backend
            .query_documents(request.to_filter())
            .await
    }

    /// Returns every stored document matching a hand-built filter expression.
    pub async fn query(&self, filter: Expr) -> DocumentStoreResult<Vec<Document>> {
        self.backend
            .query_documents(Some(filter))
            .await
    }

    /// Looks up a document by identifier. Unknown identifiers yield `None`.
    pub async fn find_by_id(&self, id: &str) -> DocumentStoreResult<Option<Document>> {
        self.backend
            .get_document(id)
            .await
    }

    /// Returns the number of stored documents.
    pub async fn count(&self) -> DocumentStoreResult<usize> {
        self.backend
            .count_documents()
            .await
    }

    /// Shuts down the store and releases backend resources.
    pub async fn shutdown(self) -> DocumentStoreResult<()> {
        self.backend
            .shutdown_boxed()
            .await
    }
}
