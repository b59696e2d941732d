//! The filter algebra: conditions, expressions and the builders that make them
//! from loosely-typed request parameters.
//!
//! # Building filters
//!
//! - condition builders (`build_string_condition`, `build_numeric_range_condition`,
//!   `build_date_range_condition`, `build_array_condition`, `build_boolean_condition`,
//!   `build_enum_condition`) turn an optional input into an optional [Condition]
//! - [and] / [or] combine expressions, pruning `Empty` clauses
//! - [build_text_search] and [build_nested_field_condition] cover free text and
//!   dotted paths into sub-documents
//! - [field] offers the same conditions fluently
//!
//! # Using filters
//!
//! - [FilterExpression::to_mongo] renders MongoDB query syntax
//! - [FilterExpression::apply] evaluates a filter against a [crate::common::Document]
//!
//! # Examples
//!
//! ```rust
//! use mealquery::filter::{and, build_boolean_condition, build_text_search, FilterExpression, TextSearch};
//!
//! let filter = and(vec![
//!     build_text_search(&TextSearch::new("soup").in_fields(["name"])),
//!     FilterExpression::field_opt("isPublic", build_boolean_condition(Some(true))),
//! ]);
//! assert_eq!(filter.clauses().len(), 2);
//! ```

mod builders;
mod condition;
mod eval;
mod expression;
mod fluent;
mod mongo;
mod nested;
mod sanitize;
mod text_search;

pub use builders::*;
pub use condition::*;
pub use expression::*;
pub use fluent::*;
pub use nested::*;
pub use sanitize::*;
pub use text_search::*;
