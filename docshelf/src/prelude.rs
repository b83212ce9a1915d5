//! Convenient re-exports of commonly used types from docshelf.
//!
//! ```ignore
//! use docshelf::prelude::*;
//! ```

pub use docshelf_core::{
    store::{DocumentStore, DynDocumentStore},
    document::{Author, Document, DocumentBuilder},
    search::{SearchRequest, SearchRequestBuilder},
    backend::{StoreBackend, DynStoreBackend, StoreBackendBuilder},
    query::{QueryVisitor, Expr, Field, FieldOp, Filter, Value},
    error::{DocumentStoreError, DocumentStoreResult},
};
