use itertools::Itertools;
use std::fmt::Display;

use super::Condition;

/// A predicate over document fields, independent of any store's query syntax.
///
/// Expressions are built once per request and never mutated. The combinators
/// [and] and [or] keep the tree normalised:
///
/// * `Empty` never appears inside `And`/`Or`
/// * a combinator with no remaining clause is `Empty`
/// * a combinator with a single remaining clause is that clause
///
/// # Examples
///
/// ```rust
/// use mealquery::filter::{and, Condition, FilterExpression};
///
/// let name = FilterExpression::field("name", Condition::regex("soup"));
/// assert_eq!(and(vec![FilterExpression::Empty, name.clone()]), name);
/// assert_eq!(and(vec![]), FilterExpression::Empty);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FilterExpression {
    /// A condition on a single (possibly dotted) field.
    FieldMatch { field: String, condition: Condition },
    /// Every clause must match.
    And { clauses: Vec<FilterExpression> },
    /// At least one clause must match.
    Or { clauses: Vec<FilterExpression> },
    /// Full-text search delegated to the store's native text index.
    Text { search: String },
    /// Matches everything.
    #[default]
    Empty,
}

impl FilterExpression {
    pub fn field(field: impl Into<String>, condition: Condition) -> Self {
        FilterExpression::FieldMatch {
            field: field.into(),
            condition,
        }
    }

    /// Wraps an optional condition; an omitted condition becomes `Empty`.
    pub fn field_opt(field: impl Into<String>, condition: Option<Condition>) -> Self {
        match condition {
            Some(condition) => FilterExpression::field(field, condition),
            None => FilterExpression::Empty,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, FilterExpression::Empty)
    }

    /// Combines this expression with another using logical AND.
    pub fn and(self, other: FilterExpression) -> Self {
        and(vec![self, other])
    }

    /// Combines this expression with another using logical OR.
    pub fn or(self, other: FilterExpression) -> Self {
        or(vec![self, other])
    }

    /// The sub-expressions of a logical expression, empty for leaves.
    pub fn clauses(&self) -> &[FilterExpression] {
        match self {
            FilterExpression::And { clauses } | FilterExpression::Or { clauses } => clauses,
            _ => &[],
        }
    }
}

/// Logical AND over `expressions`, pruning `Empty` entries and collapsing
/// trivial results. Clause order is preserved.
pub fn and(expressions: Vec<FilterExpression>) -> FilterExpression {
    combine(expressions, |clauses| FilterExpression::And { clauses })
}

/// Logical OR over `expressions`, with the same pruning and collapsing rules
/// as [and].
pub fn or(expressions: Vec<FilterExpression>) -> FilterExpression {
    combine(expressions, |clauses| FilterExpression::Or { clauses })
}

fn combine<F>(expressions: Vec<FilterExpression>, wrap: F) -> FilterExpression
where
    F: FnOnce(Vec<FilterExpression>) -> FilterExpression,
{
    let mut clauses: Vec<FilterExpression> = expressions
        .into_iter()
        .filter(|expr| !expr.is_empty())
        .collect();

    match clauses.len() {
        0 => FilterExpression::Empty,
        1 => clauses.remove(0),
        _ => wrap(clauses),
    }
}

impl Display for FilterExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterExpression::FieldMatch { field, condition } => {
                write!(f, "({} {})", field, condition)
            }
            FilterExpression::And { clauses } => {
                write!(f, "({})", clauses.iter().join(" && "))
            }
            FilterExpression::Or { clauses } => {
                write!(f, "({})", clauses.iter().join(" || "))
            }
            FilterExpression::Text { search } => write!(f, "(text =~ {})", search),
            FilterExpression::Empty => write!(f, "(all)"),
        }
    }
}
