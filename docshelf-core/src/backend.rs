//! Storage backend abstraction for the document store.
//!
//! This module defines the traits that abstract over storage implementations,
//! so the [`DocumentStore`](crate::store::DocumentStore) facade does not care
//! where documents live.
//!
//! # Traits
//!
//! - [`StoreBackend`]: The core trait for storage backends
//! - [`DynStoreBackend`]: A trait for dynamic dispatch over backend implementations
//! - [`StoreBackendBuilder`]: Factory trait for creating backend instances
//!
//! # Examples
//!
//! ```ignore
//! use docshelf::backend::StoreBackend;
//! use docshelf::document::Document;
//!
//! let backend = MyBackendImpl::new();
//!
//! let saved = backend
//!     .save_document(Document::builder().title("Notes").build())
//!     .await?;
//! assert!(saved.has_id());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use async_trait::async_trait;
use std::{any::Any, fmt::Debug};

use crate::{document::Document, error::DocumentStoreResult, query::Expr};

/// Abstract interface for document storage backends.
///
/// # Thread Safety
///
/// All implementations must be thread-safe and support concurrent access from multiple
/// async tasks. The exact concurrency model is implementation-specific but should be
/// documented by the implementer.
///
/// # Error Handling
///
/// Operations return [`DocumentStoreResult<T>`](crate::error::DocumentStoreResult).
/// A document that does not exist is not an error: lookups return `None` and
/// queries return an empty vector.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Upserts a document, assigning a fresh identifier when it has none.
    ///
    /// A document with an empty `id` is stored under a newly generated identifier
    /// that no earlier generated identifier of this backend shares. A document with
    /// a non-empty `id` is stored under exactly that identifier, replacing any
    /// previous record in full.
    ///
    /// # Returns
    ///
    /// The stored document, carrying its resolved identifier.
    async fn save_document(&self, document: Document) -> DocumentStoreResult<Document>;

    /// Retrieves a document by its identifier.
    async fn get_document(&self, id: &str) -> DocumentStoreResult<Option<Document>>;

    /// Returns every stored document matching `filter`, or every document when
    /// `filter` is `None`.
    ///
    /// Result order is backend-defined.
    async fn query_documents(&self, filter: Option<Expr>) -> DocumentStoreResult<Vec<Document>>;

    /// Returns the number of stored documents.
    async fn count_documents(&self) -> DocumentStoreResult<usize>;

    /// Cleanly shuts down the backend, releasing all resources.
    ///
    /// The default implementation is a no-op.
    async fn shutdown(self) -> DocumentStoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

#[async_trait]
impl<B> StoreBackend for &B
where
    B: StoreBackend,
{
    async fn save_document(&self, document: Document) -> DocumentStoreResult<Document> {
        (*self)
            .save_document(document)
            .await
    }

    async fn get_document(&self, id: &str) -> DocumentStoreResult<Option<Document>> {
        (*self)
            .get_document(id)
            .await
    }

    async fn query_documents(&self, filter: Option<Expr>) -> DocumentStoreResult<Vec<Document>> {
        (*self)
            .query_documents(filter)
            .await
    }

    async fn count_documents(&self) -> DocumentStoreResult<usize> {
        (*self)
            .count_documents()
            .await
    }
}

/// Object-safe counterpart of [`StoreBackend`], implemented for every backend.
#[async_trait]
pub trait DynStoreBackend: Send + Sync + Debug {
    async fn save_document(&self, document: Document) -> DocumentStoreResult<Document>;
    async fn get_document(&self, id: &str) -> DocumentStoreResult<Option<Document>>;
    async fn query_documents(&self, filter: Option<Expr>) -> DocumentStoreResult<Vec<Document>>;
    async fn count_documents(&self) -> DocumentStoreResult<usize>;
    async fn shutdown_boxed(self: Box<Self>) -> DocumentStoreResult<()>;

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

#[async_trait]
impl<B: StoreBackend + Send + Sync + 'static> DynStoreBackend for B {
    async fn save_document(&self, document: Document) -> DocumentStoreResult<Document> {
        StoreBackend::save_document(self, document)
            .await
    }

    async fn get_document(&self, id: &str) -> DocumentStoreResult<Option<Document>> {
        StoreBackend::get_document(self, id)
            .await
    }

    async fn query_documents(&self, filter: Option<Expr>) -> DocumentStoreResult<Vec<Document>> {
        StoreBackend::query_documents(self, filter)
            .await
    }

    async fn count_documents(&self) -> DocumentStoreResult<usize> {
        StoreBackend::count_documents(self)
            .await
    }

    async fn shutdown_boxed(self: Box<Self>) -> DocumentStoreResult<()> {
        StoreBackend::shutdown(*self)
            .await
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Factory for backends that need asynchronous setup.
#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> DocumentStoreResult<Self::Backend>;
}
