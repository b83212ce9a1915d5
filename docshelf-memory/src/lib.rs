//! In-memory document storage backend for docshelf.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StoreBackend` trait.
//! It keeps every document in a map guarded by an async-aware read-write lock and is
//! the backend docshelf ships with.
//!
//! # Features
//!
//! - **Identifier assignment** - Documents saved without an id get the next value of a per-store counter
//! - **Upsert semantics** - Saving under an existing id replaces the stored record
//! - **Full filter support** - Evaluates any filter expression with a full scan
//! - **Shareable** - Clones share the same documents and counter
//!
//! # Quick Start
//!
//! ```ignore
//! use docshelf::{prelude::*, memory::InMemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = DocumentStore::new(InMemoryStore::builder().build().await?);
//!
//!     let doc = store
//!         .save(Document::builder().title("Advanced Java Programming").build())
//!         .await?;
//!
//!     assert_eq!(store.find_by_id(&doc.id).await?, Some(doc));
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docshelf_memory;

pub mod store;
pub(crate) mod evaluator;

pub use store::{InMemoryStore, InMemoryStoreBuilder, DEFAULT_FIRST_ID};
