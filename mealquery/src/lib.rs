//! # mealquery - Typed query filters for the meal-planning store
//!
//! mealquery turns loosely typed search parameters (optional strings, numeric
//! bounds, date strings, tag lists) into a store-independent filter tree, plus
//! the sort and page window that go with it. A single adapter translates the
//! tree into MongoDB query syntax.
//!
//! ## Key Features
//!
//! - **Filter algebra**: [`filter::FilterExpression`] trees built from field
//!   conditions and `and`/`or` combinators
//! - **Absent means no constraint**: every builder drops blank input instead of
//!   producing a filter that matches nothing
//! - **Safe text matching**: user text is regex-escaped unless configured otherwise
//! - **Sort and pagination**: defaults of `createdAt` descending, page 1 of 20
//! - **MongoDB adapter**: operator names live in one module only
//! - **In-memory evaluation**: any expression can be applied to a [`common::Document`]
//!
//! ## Quick Start
//!
//! ```rust
//! use mealquery::query::Query;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let query = Query::builder()
//!     .text_search_in(Some("chicken"), Some(vec!["name".into(), "description".into()]))
//!     .range("prepTime", None, Some(30.0))
//!     .boolean("isPublic", Some(true))
//!     .sort(None, None)
//!     .paginate(Some(2), Some(10))
//!     .build()?;
//!
//! let args = query.to_find_args()?;
//! assert_eq!(args.skip, Some(10));
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`common`] - Values, documents, sort order and shared constants
//! - [`errors`] - Error types and result definitions
//! - [`filter`] - Filter expressions, condition builders and the MongoDB adapter
//! - [`options`] - Sort and pagination directives
//! - [`query`] - A filter with its sort and page window
//! - [`query_config`] - Defaults for sorting, paging and string matching
//! - [`query_config_builder`] - Builder for [`query_config::QueryConfig`]
//! - [`search`] - Recipe and meal plan search parameters

pub mod common;
pub mod errors;
pub mod filter;
pub mod options;
pub mod query;
pub mod query_config;
pub mod query_config_builder;
pub mod search;

#[cfg(test)]
#[ctor::ctor]
fn init() {
    colog::init();
}
