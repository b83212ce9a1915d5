//! Multi-field search requests.
//!
//! A [`SearchRequest`] holds optional criteria in four categories. A document
//! matches when it satisfies every category that is constrained, and within a
//! category it only has to satisfy one of the listed values:
//!
//! - `title_prefixes`: title starts with one of the prefixes
//! - `contains_contents`: content contains one of the substrings
//! - `author_ids`: author id equals one of the ids
//! - `created_from` / `created_to`: creation instant within the inclusive range
//!
//! Empty lists and `None` bounds impose no constraint. Documents missing the
//! field a constrained category looks at never match it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::query::{Expr, Field, Filter};

/// Search criteria for [`DocumentStore::search`](crate::store::DocumentStore::search).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    pub title_prefixes: Vec<String>,
    pub contains_contents: Vec<String>,
    pub author_ids: Vec<String>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

impl SearchRequest {
    /// Creates a request with no criteria, which matches every document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new search request builder for fluent construction.
    pub fn builder() -> SearchRequestBuilder {
        SearchRequestBuilder::new()
    }

    /// Returns `true` if no category is constrained.
    pub fn is_unconstrained(&self) -> bool {
        self.title_prefixes.is_empty()
            && self.contains_contents.is_empty()
            && self.author_ids.is_empty()
            && self.created_from.is_none()
            && self.created_to.is_none()
    }

    /// Compiles this request into a filter expression.
    ///
    /// Returns `None` when the request is unconstrained.
    pub fn to_filter(&self) -> Option<Expr> {
        let mut clauses = Vec::new();

        if !self.title_prefixes.is_empty() {
            clauses.push(Filter::or(
                self.title_prefixes
                    .iter()
                    .map(|prefix| Filter::starts_with(Field::Title, prefix)),
            ));
        }

        if !self.contains_contents.is_empty() {
            clauses.push(Filter::or(
                self.contains_contents
                    .iter()
                    .map(|needle| Filter::contains(Field::Content, needle)),
            ));
        }

        if !self.author_ids.is_empty() {
            clauses.push(Filter::or(
                self.author_ids
                    .iter()
                    .map(|id| Filter::eq(Field::AuthorId, id)),
            ));
        }

        if let Some(from) = self.created_from {
            clauses.push(Filter::gte(Field::Created, from));
        }

        if let Some(to) = self.created_to {
            clauses.push(Filter::lte(Field::Created, to));
        }

        match clauses.len() {
            0 => None,
            1 => clauses.pop(),
            _ => Some(Expr::And(clauses)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchRequestBuilder {
    request: SearchRequest,
}

impl SearchRequestBuilder {
    /// Creates a new builder with no criteria.
    pub fn new() -> Self {
        SearchRequestBuilder { request: SearchRequest::default() }
    }

    /// Adds one accepted title prefix.
    pub fn title_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.request.title_prefixes.push(prefix.into());
        self
    }

    /// Adds several accepted title prefixes.
    pub fn title_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.request
            .title_prefixes
            .extend(prefixes.into_iter().map(Into::into));
        self
    }

    /// Adds one accepted content substring.
    pub fn contains_content(mut self, needle: impl Into<String>) -> Self {
        self.request.contains_contents.push(needle.into());
        self
    }

    /// Adds several accepted content substrings.
    pub fn contains_contents<I, S>(mut self, needles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.request
            .contains_contents
            .extend(needles.into_iter().map(Into::into));
        self
    }

    /// Adds one accepted author id.
    pub fn author_id(mut self, id: impl Into<String>) -> Self {
        self.request.author_ids.push(id.into());
        self
    }

    /// Adds several accepted author ids.
    pub fn author_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.request
            .author_ids
            .extend(ids.into_iter().map(Into::into));
        self
    }

    /// Sets the inclusive lower bound on the creation instant.
    pub fn created_from(mut self, from: DateTime<Utc>) -> Self {
        self.request.created_from = Some(from);
        self
    }

    /// Sets the inclusive upper bound on the creation instant.
    pub fn created_to(mut self, to: DateTime<Utc>) -> Self {
        self.request.created_to = Some(to);
        self
    }

    /// Builds and returns the final request.
    pub fn build(self) -> SearchRequest {
        self.request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn unconstrained_request_has_no_filter() {
        let request = SearchRequest::new();

        assert!(request.is_unconstrained());
        assert_eq!(request.to_filter(), None);
    }

    #[test]
    fn single_category_is_not_wrapped() {
        let request = SearchRequest::builder()
            .author_id("author1")
            .build();

        assert_eq!(
            request.to_filter(),
            Some(Filter::or([Filter::eq(Field::AuthorId, "author1")]))
        );
    }

    #[test]
    fn categories_are_joined_with_and() {
        let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();
        let request = SearchRequest::builder()
            .title_prefixes(["Adv", "Intro"])
            .contains_content("Java")
            .created_from(from)
            .created_to(to)
            .build();

        assert!(!request.is_unconstrained());
        assert_eq!(
            request.to_filter(),
            Some(Filter::and([
                Filter::or([
                    Filter::starts_with(Field::Title, "Adv"),
                    Filter::starts_with(Field::Title, "Intro"),
                ]),
                Filter::or([Filter::contains(Field::Content, "Java")]),
                Filter::gte(Field::Created, from),
                Filter::lte(Field::Created, to),
            ]))
        );
    }

    #[test]
    fn only_one_bound_constrains_the_range() {
        let to = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let request = SearchRequest::builder().created_to(to).build();

        assert_eq!(request.to_filter(), Some(Filter::lte(Field::Created, to)));
    }

    #[test]
    fn deserializes_partial_requests() {
        let request: SearchRequest = serde_json::from_value(serde_json::json!({
            "author_ids": ["author1", "author2"],
        }))
        .unwrap();

        assert_eq!(request.author_ids, vec!["author1", "author2"]);
        assert!(request.title_prefixes.is_empty());
        assert_eq!(request.created_from, None);
    }
}
