//! Filter expression evaluation for in-memory document matching.
//!
//! This module provides the evaluation engine for filter expressions,
//! deciding for each stored [`Document`] whether it satisfies an [`Expr`].

use std::{cmp::Ordering, convert::Infallible};
use chrono::{DateTime, Utc};

use docshelf_core::{
    document::Document,
    query::{QueryVisitor, Expr, Field, FieldOp, Value},
};


/// Borrowed, comparable view of a document field or a filter literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Comparable<'a> {
    String(&'a str),
    DateTime(DateTime<Utc>),
}

impl<'a> Comparable<'a> {
    /// Resolves `field` on `document`, returning `None` if the field is absent.
    pub fn resolve(document: &'a Document, field: Field) -> Option<Self> {
        match field {
            Field::Id => Some(Comparable::String(&document.id)),
            Field::Title => document.title.as_deref().map(Comparable::String),
            Field::Content => document.content.as_deref().map(Comparable::String),
            Field::AuthorId => document
                .author
                .as_ref()
                .map(|author| Comparable::String(&author.id)),
            Field::AuthorName => document
                .author
                .as_ref()
                .map(|author| Comparable::String(&author.name)),
            Field::Created => document.created.map(Comparable::DateTime),
        }
    }
}

impl<'a> From<&'a Value> for Comparable<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::String(value) => Comparable::String(value),
            Value::DateTime(value) => Comparable::DateTime(*value),
        }
    }
}

impl<'a> PartialOrd for Comparable<'a> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Comparable::String(a), Comparable::String(b)) => a.partial_cmp(b),
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}


pub(crate) struct DocumentEvaluator<'a> {
    document: &'a Document,
}

impl<'a> DocumentEvaluator<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    pub fn evaluate(&mut self, expr: &Expr) -> bool {
        match self.visit_expr(expr) {
            Ok(matched) => matched,
            Err(err) => match err {},
        }
    }

    pub fn filter_documents(
        documents: impl IntoIterator<Item = &'a Document>,
        expr: &Expr,
    ) -> Vec<Document> {
        documents
            .into_iter()
            .filter(|doc| DocumentEvaluator::new(doc).evaluate(expr))
            .cloned()
            .collect::<Vec<_>>()
    }
}

impl<'a> QueryVisitor for DocumentEvaluator<'a> {
    type Output = bool;
    type Error = Infallible;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if !self.visit_expr(expr)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn visit_or(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if self.visit_expr(expr)? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn visit_not(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        Ok(!self.visit_expr(expr)?)
    }

    fn visit_exists(&mut self, field: Field, should_exist: bool) -> Result<Self::Output, Self::Error> {
        Ok(Comparable::resolve(self.document, field).is_some() == should_exist)
    }

    fn visit_field(&mut self, field: Field, op: FieldOp, value: &Value) -> Result<Self::Output, Self::Error> {
        let Some(left) = Comparable::resolve(self.document, field) else {
            return Ok(false);
        };
        let right = Comparable::from(value);

        Ok(match op {
            FieldOp::Eq => left == right,
            FieldOp::Ne => left.partial_cmp(&right).is_some() && left != right,
            FieldOp::Gt => left.partial_cmp(&right) == Some(Ordering::Greater),
            FieldOp::Gte => matches!(left.partial_cmp(&right), Some(Ordering::Greater | Ordering::Equal)),
            FieldOp::Lt => left.partial_cmp(&right) == Some(Ordering::Less),
            FieldOp::Lte => matches!(left.partial_cmp(&right), Some(Ordering::Less | Ordering::Equal)),
            FieldOp::Contains => match (left, right) {
                (Comparable::String(left), Comparable::String(right)) => left.contains(right),
                _ => false,
            },
            FieldOp::NotContains => match (left, right) {
                (Comparable::String(left), Comparable::String(right)) => !left.contains(right),
                _ => false,
            },
            FieldOp::StartsWith => match (left, right) {
                (Comparable::String(left), Comparable::String(right)) => left.starts_with(right),
                _ => false,
            },
            FieldOp::EndsWith => match (left, right) {
                (Comparable::String(left), Comparable::String(right)) => left.ends_with(right),
                _ => false,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use docshelf_core::{document::Author, query::Filter};

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 9, 30, 0).unwrap()
    }

    fn sample() -> Document {
        Document::builder()
            .id("doc1")
            .title("Advanced Java Programming")
            .content("This document covers advanced topics in Java.")
            .author(Author::new("author1", "John Doe"))
            .created(created())
            .build()
    }

    fn matches(document: &Document, expr: &Expr) -> bool {
        DocumentEvaluator::new(document).evaluate(expr)
    }

    #[test]
    fn string_operators_are_case_sensitive() {
        let doc = sample();

        assert!(matches(&doc, &Filter::starts_with(Field::Title, "Advanced")));
        assert!(!matches(&doc, &Filter::starts_with(Field::Title, "advanced")));
        assert!(matches(&doc, &Filter::contains(Field::Content, "topics")));
        assert!(!matches(&doc, &Filter::contains(Field::Content, "TOPICS")));
        assert!(matches(&doc, &Filter::ends_with(Field::Title, "Programming")));
        assert!(matches(&doc, &Filter::not_contains(Field::Content, "Kotlin")));
        assert!(matches(&doc, &Filter::eq(Field::AuthorName, "John Doe")));
        assert!(matches(&doc, &Filter::ne(Field::AuthorId, "author2")));
    }

    #[test]
    fn range_comparisons_are_inclusive_where_asked() {
        let doc = sample();
        let at = created();

        assert!(matches(&doc, &Filter::gte(Field::Created, at)));
        assert!(matches(&doc, &Filter::lte(Field::Created, at)));
        assert!(!matches(&doc, &Filter::gt(Field::Created, at)));
        assert!(!matches(&doc, &Filter::lt(Field::Created, at)));
        assert!(!matches(&doc, &Filter::gte(Field::Created, at + Duration::seconds(1))));
        assert!(!matches(&doc, &Filter::lte(Field::Created, at - Duration::seconds(1))));
    }

    #[test]
    fn absent_fields_never_match_comparisons() {
        let doc = Document::builder().id("bare").build();

        assert!(!matches(&doc, &Filter::starts_with(Field::Title, "")));
        assert!(!matches(&doc, &Filter::contains(Field::Content, "")));
        assert!(!matches(&doc, &Filter::not_contains(Field::Content, "x")));
        assert!(!matches(&doc, &Filter::ne(Field::AuthorId, "author1")));
        assert!(!matches(&doc, &Filter::gte(Field::Created, created())));
        assert!(matches(&doc, &Filter::not_exists(Field::AuthorId)));
        assert!(matches(&doc, &Filter::exists(Field::Id)));
    }

    #[test]
    fn mismatched_kinds_do_not_match() {
        let doc = sample();

        assert!(!matches(&doc, &Filter::eq(Field::Created, "2024-03-10T09:30:00Z")));
        assert!(!matches(&doc, &Filter::gte(Field::Title, created())));
        assert!(!matches(&doc, &Filter::ne(Field::Title, created())));
    }

    #[test]
    fn logical_operators() {
        let doc = sample();
        let hit = Filter::eq(Field::Id, "doc1");
        let miss = Filter::eq(Field::Id, "doc2");

        assert!(matches(&doc, &Filter::and([])));
        assert!(!matches(&doc, &Filter::or([])));
        assert!(matches(&doc, &hit.clone().or(miss.clone())));
        assert!(!matches(&doc, &hit.clone().and(miss.clone())));
        assert!(matches(&doc, &miss.not()));
    }

    #[test]
    fn filter_documents_keeps_matches() {
        let docs = vec![
            sample(),
            sample().with_id("doc2"),
            Document::builder().id("doc3").title("Basic Java").build(),
        ];

        let kept = DocumentEvaluator::filter_documents(
            &docs,
            &Filter::starts_with(Field::Title, "Advanced"),
        );

        let ids = kept.iter().map(|doc| doc.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["doc1", "doc2"]);
    }
}
