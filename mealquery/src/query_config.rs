//! Defaults applied when a request leaves sorting, paging or matching open.

use std::sync::Arc;

use crate::common::{SortOrder, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, DEFAULT_SORT_FIELD};
use crate::filter::StringMatchOptions;
use crate::options::SortDirective;
use crate::query_config_builder::QueryConfigBuilder;

/// Query defaults shared by every request handler.
///
/// Cloning is cheap; all clones share one immutable configuration. Build a
/// custom one with [QueryConfig::builder].
///
/// # Examples
///
/// ```rust
/// use mealquery::query_config::QueryConfig;
///
/// let config = QueryConfig::default();
/// assert_eq!(config.default_sort().field, "createdAt");
/// assert_eq!(config.default_page_size(), 20);
/// ```
#[derive(Clone, Debug)]
pub struct QueryConfig {
    inner: Arc<QueryConfigInner>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryConfig {
    /// Creates a configuration with the built-in defaults.
    pub fn new() -> Self {
        QueryConfig {
            inner: Arc::new(QueryConfigInner::default()),
        }
    }

    pub fn builder() -> QueryConfigBuilder {
        QueryConfigBuilder::new()
    }

    pub(crate) fn from_inner(inner: QueryConfigInner) -> Self {
        QueryConfig {
            inner: Arc::new(inner),
        }
    }

    /// Sort used when a request names no sort field.
    pub fn default_sort(&self) -> &SortDirective {
        &self.inner.default_sort
    }

    pub fn default_page(&self) -> i64 {
        self.inner.default_page
    }

    pub fn default_page_size(&self) -> i64 {
        self.inner.default_page_size
    }

    /// Matching options for free-form string parameters.
    pub fn string_options(&self) -> StringMatchOptions {
        self.inner.string_options
    }

    /// Fields searched by free text. `None` delegates to the store's text index.
    pub fn text_search_fields(&self) -> Option<&[String]> {
        self.inner.text_search_fields.as_deref()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct QueryConfigInner {
    pub(crate) default_sort: SortDirective,
    pub(crate) default_page: i64,
    pub(crate) default_page_size: i64,
    pub(crate) string_options: StringMatchOptions,
    pub(crate) text_search_fields: Option<Vec<String>>,
}

impl Default for QueryConfigInner {
    fn default() -> Self {
        QueryConfigInner {
            default_sort: SortDirective::new(DEFAULT_SORT_FIELD, SortOrder::Descending),
            default_page: DEFAULT_PAGE,
            default_page_size: DEFAULT_PAGE_SIZE,
            string_options: StringMatchOptions::default(),
            text_search_fields: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = QueryConfig::new();
        assert_eq!(config.default_sort(), &SortDirective::default());
        assert_eq!(config.default_page(), 1);
        assert_eq!(config.default_page_size(), 20);
        assert_eq!(config.string_options(), StringMatchOptions::default());
        assert!(config.text_search_fields().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let config = QueryConfig::new();
        let clone = config.clone();
        assert!(Arc::ptr_eq(&config.inner, &clone.inner));
    }
}
