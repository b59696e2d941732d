//! Sort and pagination directives handed to the store next to a filter.

use crate::common::{Document, SortOrder, DEFAULT_SORT_FIELD};
use crate::errors::QueryResult;

/// Ordering of a result set.
///
/// # Examples
///
/// ```rust
/// use mealquery::common::SortOrder;
/// use mealquery::options::{build_sort, SortDirective};
///
/// assert_eq!(build_sort(None, None), SortDirective::default());
/// assert_eq!(build_sort(Some("price"), Some("desc")).order, SortOrder::Descending);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortDirective {
    pub field: String,
    pub order: SortOrder,
}

impl SortDirective {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        SortDirective {
            field: field.into(),
            order,
        }
    }

    /// The MongoDB sort document, `{ field: 1 }` or `{ field: -1 }`.
    pub fn to_mongo(&self) -> QueryResult<Document> {
        let mut sort = Document::new();
        sort.put(&self.field, self.order.direction())?;
        Ok(sort)
    }
}

/// Newest first by creation time.
impl Default for SortDirective {
    fn default() -> Self {
        SortDirective::new(DEFAULT_SORT_FIELD, SortOrder::Descending)
    }
}

/// A 1-indexed page window.
///
/// Values are not validated: `page = 0` gives a negative skip and is passed
/// through for the store to reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    /// Number of documents before this page. Saturates instead of overflowing.
    pub fn skip(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }
}

/// Builds the sort directive for a request.
///
/// An absent or blank `sort_by` gives the default (`createdAt` descending).
/// With a field, only `"desc"` sorts descending.
pub fn build_sort(sort_by: Option<&str>, sort_order: Option<&str>) -> SortDirective {
    match sort_by.map(str::trim).filter(|field| !field.is_empty()) {
        Some(field) => SortDirective::new(field, SortOrder::parse(sort_order)),
        None => SortDirective::default(),
    }
}

/// Builds the page window for a 1-indexed `page` of `limit` documents.
///
/// # Examples
///
/// ```rust
/// use mealquery::options::build_pagination;
///
/// let pagination = build_pagination(3, 20);
/// assert_eq!((pagination.skip(), pagination.limit()), (40, 20));
/// ```
pub fn build_pagination(page: i64, limit: i64) -> Pagination {
    Pagination { page, limit }
}
