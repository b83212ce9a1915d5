//! Filter expressions evaluated against stored documents.
//!
//! A backend evaluates a single predicate language: an [`Expr`] tree of
//! field comparisons joined by logical operators. [`SearchRequest`](crate::search::SearchRequest)
//! compiles into this form, and callers may also build expressions directly.
//!
//! # Filter Expression API
//!
//! The [`Filter`] struct provides a collection of static methods for building filter expressions:
//!
//! - Comparison: `eq`, `ne`, `gt`, `gte`, `lt`, `lte`
//! - String: `starts_with`, `ends_with`, `contains`, `not_contains`
//! - Existence: `exists`, `not_exists`
//! - Logical: `and`, `or`
//!
//! ```ignore
//! use docshelf::query::{Field, Filter};
//!
//! let expr = Filter::starts_with(Field::Title, "Advanced")
//!     .and(Filter::eq(Field::AuthorId, "author1"));
//! ```
//!
//! # Semantics
//!
//! - `And([])` matches everything, `Or([])` matches nothing.
//! - Any comparison against an absent field is false, whatever the operator.
//! - Comparing values of different kinds (a string with an instant) is false.
//! - String comparisons are case-sensitive.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::DocumentStoreError;

/// A document field that a filter can look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Title,
    Content,
    /// The `id` of the document's author.
    AuthorId,
    /// The `name` of the document's author.
    AuthorName,
    Created,
}

impl Field {
    /// Returns the dotted path this field is known by in serialized documents.
    pub fn path(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Title => "title",
            Field::Content => "content",
            Field::AuthorId => "author.id",
            Field::AuthorName => "author.name",
            Field::Created => "created",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A literal value on the right-hand side of a field comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    String(String),
    DateTime(DateTime<Utc>),
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::String(value.clone())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(value) => write!(f, "{value:?}"),
            Value::DateTime(value) => write!(f, "{}", value.to_rfc3339()),
        }
    }
}

/// Field comparison operators for filter expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOp {
    /// Equal to (exact match).
    Eq,
    /// Not equal to.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal to.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal to.
    Lte,
    /// String contains value.
    Contains,
    /// String does not contain value.
    NotContains,
    /// String starts with value.
    StartsWith,
    /// String ends with value.
    EndsWith,
}

impl FieldOp {
    fn symbol(&self) -> &'static str {
        match self {
            FieldOp::Eq => "==",
            FieldOp::Ne => "!=",
            FieldOp::Gt => ">",
            FieldOp::Gte => ">=",
            FieldOp::Lt => "<",
            FieldOp::Lte => "<=",
            FieldOp::Contains => "contains",
            FieldOp::NotContains => "!contains",
            FieldOp::StartsWith => "starts_with",
            FieldOp::EndsWith => "ends_with",
        }
    }
}

/// A filter expression for matching documents.
///
/// Expressions can be combined using logical operators (`And`, `Or`, `Not`)
/// to build complex filter predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Logical AND of multiple expressions (all must match).
    And(Vec<Expr>),
    /// Logical OR of multiple expressions (any must match).
    Or(Vec<Expr>),
    /// Logical NOT of an expression (inverts the result).
    Not(Box<Expr>),
    /// Checks if a field is present or absent.
    Exists(Field, bool),
    /// Field comparison expression.
    Field {
        /// The field to compare.
        field: Field,
        /// The comparison operator.
        op: FieldOp,
        /// The value to compare against.
        value: Value,
    },
}

impl Expr {
    /// Creates a field comparison expression.
    pub fn field(field: Field, op: FieldOp, value: Value) -> Self {
        Expr::Field { field, op, value }
    }

    /// Combines this expression with another using logical AND.
    ///
    /// If this expression is already an AND, the other expression is appended
    /// to the list. Otherwise, a new AND expression is created.
    pub fn and(self, other: Expr) -> Self {
        match self {
            Expr::And(mut list) => {
                list.push(other);
                Expr::And(list)
            }
            _ => Expr::And(vec![self, other]),
        }
    }

    /// Combines this expression with another using logical OR.
    ///
    /// If this expression is already an OR, the other expression is appended
    /// to the list. Otherwise, a new OR expression is created.
    pub fn or(self, other: Expr) -> Self {
        match self {
            Expr::Or(mut list) => {
                list.push(other);
                Expr::Or(list)
            }
            _ => Expr::Or(vec![self, other]),
        }
    }

    /// Negates this expression (logical NOT).
    pub fn not(self) -> Self {
        Expr::Not(Box::new(self))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match ExprRenderer.visit_expr(self) {
            Ok(rendered) => f.write_str(&rendered),
            Err(err) => match err {},
        }
    }
}

/// Helper struct for constructing filter expressions.
///
/// All methods accept values as `Into<Value>`, so string slices, owned
/// strings and `DateTime<Utc>` instants can be passed directly.
pub struct Filter;

impl Filter {
    /// Matches documents where the field equals the value.
    pub fn eq(field: Field, value: impl Into<Value>) -> Expr {
        Expr::field(field, FieldOp::Eq, value.into())
    }

    /// Matches documents where the field is present and differs from the value.
    pub fn ne(field: Field, value: impl Into<Value>) -> Expr {
        Expr::field(field, FieldOp::Ne, value.into())
    }

    pub fn gt(field: Field, value: impl Into<Value>) -> Expr {
        Expr::field(field, FieldOp::Gt, value.into())
    }

    pub fn gte(field: Field, value: impl Into<Value>) -> Expr {
        Expr::field(field, FieldOp::Gte, value.into())
    }

    pub fn lt(field: Field, value: impl Into<Value>) -> Expr {
        Expr::field(field, FieldOp::Lt, value.into())
    }

    pub fn lte(field: Field, value: impl Into<Value>) -> Expr {
        Expr::field(field, FieldOp::Lte, value.into())
    }

    /// Matches documents where the string field starts with the value.
    pub fn starts_with(field: Field, value: impl Into<Value>) -> Expr {
        Expr::field(field, FieldOp::StartsWith, value.into())
    }

    /// Matches documents where the string field ends with the value.
    pub fn ends_with(field: Field, value: impl Into<Value>) -> Expr {
        Expr::field(field, FieldOp::EndsWith, value.into())
    }

    /// Matches documents where the string field contains the value.
    pub fn contains(field: Field, value: impl Into<Value>) -> Expr {
        Expr::field(field, FieldOp::Contains, value.into())
    }

    /// Matches documents where the string field is present and does not contain the value.
    pub fn not_contains(field: Field, value: impl Into<Value>) -> Expr {
        Expr::field(field, FieldOp::NotContains, value.into())
    }

    pub fn exists(field: Field) -> Expr {
        Expr::Exists(field, true)
    }

    pub fn not_exists(field: Field) -> Expr {
        Expr::Exists(field, false)
    }

    /// Combines multiple expressions such that all must match.
    pub fn and(exprs: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::And(exprs.into_iter().collect())
    }

    /// Combines multiple expressions such that any can match.
    pub fn or(exprs: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::Or(exprs.into_iter().collect())
    }
}

pub trait QueryVisitor {
    type Output;
    type Error: Into<DocumentStoreError>;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error>;
    fn visit_or(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error>;
    fn visit_not(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error>;
    fn visit_exists(
        &mut self,
        field: Field,
        should_exist: bool,
    ) -> Result<Self::Output, Self::Error>;
    fn visit_field(
        &mut self,
        field: Field,
        op: FieldOp,
        value: &Value,
    ) -> Result<Self::Output, Self::Error>;

    fn visit_expr(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        match expr {
            Expr::And(exprs) => self.visit_and(exprs),
            Expr::Or(exprs) => self.visit_or(exprs),
            Expr::Not(expr) => self.visit_not(expr),
            Expr::Exists(field, should_exist) => self.visit_exists(*field, *should_exist),
            Expr::Field { field, op, value } => self.visit_field(*field, *op, value),
        }
    }
}

/// Renders an expression as compact text for log output.
struct ExprRenderer;

impl ExprRenderer {
    fn join(&mut self, exprs: &[Expr], separator: &str) -> String {
        let parts = exprs
            .iter()
            .map(|expr| match self.visit_expr(expr) {
                Ok(rendered) => rendered,
                Err(err) => match err {},
            })
            .collect::<Vec<_>>();

        format!("({})", parts.join(separator))
    }
}

impl QueryVisitor for ExprRenderer {
    type Output = String;
    type Error = std::convert::Infallible;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        if exprs.is_empty() {
            return Ok("true".to_string());
        }

        Ok(self.join(exprs, " && "))
    }

    fn visit_or(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        if exprs.is_empty() {
            return Ok("false".to_string());
        }

        Ok(self.join(exprs, " || "))
    }

    fn visit_not(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        Ok(format!("!{}", self.visit_expr(expr)?))
    }

    fn visit_exists(&mut self, field: Field, should_exist: bool) -> Result<Self::Output, Self::Error> {
        Ok(match should_exist {
            true => format!("exists({field})"),
            false => format!("!exists({field})"),
        })
    }

    fn visit_field(&mut self, field: Field, op: FieldOp, value: &Value) -> Result<Self::Output, Self::Error> {
        Ok(format!("{field} {} {value}", op.symbol()))
    }
}
