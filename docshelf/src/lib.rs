//! Main docshelf crate providing an in-memory document store.
//!
//! This crate is the primary entry point for users of docshelf. It re-exports the
//! core types from `docshelf-core` and the in-memory backend from `docshelf-memory`.
//!
//! # Features
//!
//! - **Upsert** - `save` assigns an identifier when a document has none and replaces records by identifier
//! - **Lookup** - `find_by_id` returns `None` for unknown identifiers
//! - **Search** - `search` filters by title prefix, content substring, author and creation range
//! - **Custom filters** - `query` evaluates hand-built filter expressions
//!
//! # Quick Start
//!
//! ```ignore
//! use docshelf::{prelude::*, memory::InMemoryStore};
//! use chrono::{Duration, Utc};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = DocumentStore::new(InMemoryStore::builder().build().await.unwrap());
//!
//!     let doc = store
//!         .save(
//!             Document::builder()
//!                 .title("Advanced Java Programming")
//!                 .content("This document covers advanced topics in Java.")
//!                 .author(Author::new("author1", "John Doe"))
//!                 .created(Utc::now() - Duration::hours(1))
//!                 .build(),
//!         )
//!         .await
//!         .unwrap();
//!
//!     let results = store
//!         .search(
//!             &SearchRequest::builder()
//!                 .title_prefix("Advanced")
//!                 .contains_content("Java")
//!                 .author_id("author1")
//!                 .created_from(Utc::now() - Duration::hours(2))
//!                 .build(),
//!         )
//!         .await
//!         .unwrap();
//!
//!     assert_eq!(results, vec![doc]);
//!
//!     store.shutdown().await.unwrap();
//! }
//! ```
//!
//! # Dynamic Dispatch
//!
//! A typed `DocumentStore` converts into a [`DynDocumentStore`](store::DynDocumentStore)
//! with `into_dyn`, for code that picks its backend at runtime.
//!
//! ```ignore
//! let store = DocumentStore::new(InMemoryStore::new()).into_dyn();
//! let saved = store.save(Document::builder().title("Notes").build()).await.unwrap();
//! store.shutdown().await.unwrap();
//! ```

pub mod prelude;

pub use docshelf_core::{document, store, backend, query, search, error};

// Re-export chrono for building timestamps and ranges
pub use chrono;

/// In-memory storage backend implementations.
pub mod memory {
    pub use docshelf_memory::{InMemoryStore, InMemoryStoreBuilder, DEFAULT_FIRST_ID};
}
