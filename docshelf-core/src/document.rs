//! Document and author records held by a document store.
//!
//! Records are plain values with public fields. Every field except the
//! identifier is optional, and an empty identifier means "not assigned yet":
//! saving such a document makes the store generate one.
//!
//! # Example
//!
//! ```ignore
//! use docshelf::document::{Author, Document};
//! use chrono::Utc;
//!
//! let doc = Document::builder()
//!     .title("Introduction to Rust")
//!     .content("Ownership, borrowing and lifetimes.")
//!     .author(Author::new("author1", "John Doe"))
//!     .created(Utc::now())
//!     .build();
//!
//! assert!(!doc.has_id());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, from_value, to_value};

use crate::error::DocumentStoreResult;

/// The author of a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub name: String,
}

impl Author {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A document record.
///
/// The `id` is the unique key inside a store. An empty `id` is treated as
/// unset, and the store assigns a fresh identifier when the document is saved.
/// Documents with a non-empty `id` replace whatever was stored under it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier, empty when not yet assigned.
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    /// Creation instant. The store never fills this in on its own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

impl Document {
    /// Creates a new builder for fluent construction.
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::new()
    }

    /// Returns `true` if this document carries a non-empty identifier.
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    /// Returns a copy of this document stored under `id`, keeping every other field.
    pub fn with_id(self, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..self
        }
    }

    /// Returns the author's identifier, if the document has an author.
    pub fn author_id(&self) -> Option<&str> {
        self.author
            .as_ref()
            .map(|author| author.id.as_str())
    }

    /// Converts this document to a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> DocumentStoreResult<Value> {
        Ok(to_value(self)?)
    }

    /// Creates a document from a JSON value.
    ///
    /// Missing keys fall back to their defaults, so `{}` yields an empty document.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not describe a document.
    pub fn from_json(value: Value) -> DocumentStoreResult<Self> {
        Ok(from_value(value)?)
    }
}

/// Fluent builder for [`Document`].
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    document: Document,
}

impl DocumentBuilder {
    /// Creates a new builder for an empty document.
    pub fn new() -> Self {
        DocumentBuilder { document: Document::default() }
    }

    /// Sets the identifier. Leave it unset to have the store generate one.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.document.id = id.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.document.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.document.content = Some(content.into());
        self
    }

    pub fn author(mut self, author: Author) -> Self {
        self.document.author = Some(author);
        self
    }

    pub fn created(mut self, created: DateTime<Utc>) -> Self {
        self.document.created = Some(created);
        self
    }

    /// Builds and returns the final document.
    pub fn build(self) -> Document {
        self.document
    }
}
