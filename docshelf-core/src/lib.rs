//! Core types for an in-memory-first document store.
//!
//! This crate is the core of the docshelf project and provides:
//!
//! - **Records** ([`document`]) - Documents and their authors
//! - **Search requests** ([`search`]) - Multi-field search criteria
//! - **Filter expressions** ([`query`]) - The predicate language backends evaluate
//! - **Store backend abstraction** ([`backend`]) - Traits for implementing storage backends
//! - **Document store** ([`store`]) - The `save` / `search` / `find_by_id` facade
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! # Example
//!
//! ```ignore
//! use docshelf::{prelude::*, memory::InMemoryStore};
//!
//! let store = DocumentStore::new(InMemoryStore::new());
//! let doc = store
//!     .save(Document::builder().title("Advanced Java Programming").build())
//!     .await?;
//!
//! let found = store
//!     .search(&SearchRequest::builder().title_prefix("Advanced").build())
//!     .await?;
//! assert_eq!(found, vec![doc]);
//! ```

#[allow(unused_extern_crates)]
extern crate self as docshelf_core;

pub mod backend;
pub mod document;
pub mod error;
pub mod query;
pub mod search;
pub mod store;
