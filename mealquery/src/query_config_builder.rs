use crate::common::SortOrder;
use crate::errors::{ErrorKind, QueryError, QueryResult};
use crate::options::SortDirective;
use crate::query_config::{QueryConfig, QueryConfigInner};

/// Builder for [QueryConfig].
///
/// Setters never fail; the first invalid setting is remembered and returned by
/// [QueryConfigBuilder::build].
///
/// # Examples
///
/// ```rust
/// use mealquery::common::SortOrder;
/// use mealquery::query_config::QueryConfig;
///
/// let config = QueryConfig::builder()
///     .default_sort("updatedAt", SortOrder::Descending)
///     .default_page_size(50)
///     .text_search_fields(["name", "description"])
///     .build()
///     .unwrap();
/// assert_eq!(config.default_page_size(), 50);
///
/// assert!(QueryConfig::builder().default_page_size(0).build().is_err());
/// ```
#[derive(Default)]
pub struct QueryConfigBuilder {
    error: Option<QueryError>,
    inner: QueryConfigInner,
}

impl QueryConfigBuilder {
    pub fn new() -> Self {
        QueryConfigBuilder {
            error: None,
            inner: QueryConfigInner::default(),
        }
    }

    /// Sort applied when a request does not name one. The field must not be blank.
    pub fn default_sort(mut self, field: &str, order: SortOrder) -> Self {
        let field = field.trim();
        if field.is_empty() {
            self.record(QueryError::new(
                "Default sort field cannot be empty",
                ErrorKind::ConfigError,
            ));
        } else {
            self.inner.default_sort = SortDirective::new(field, order);
        }
        self
    }

    /// Page used when a request has none. Must be at least 1.
    pub fn default_page(mut self, page: i64) -> Self {
        if page < 1 {
            self.record(QueryError::new(
                &format!("Default page must be at least 1, got {}", page),
                ErrorKind::ConfigError,
            ));
        } else {
            self.inner.default_page = page;
        }
        self
    }

    /// Page size used when a request has none. Must be positive.
    pub fn default_page_size(mut self, limit: i64) -> Self {
        if limit <= 0 {
            self.record(QueryError::new(
                &format!("Default page size must be positive, got {}", limit),
                ErrorKind::ConfigError,
            ));
        } else {
            self.inner.default_page_size = limit;
        }
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.inner.string_options = self.inner.string_options.case_sensitive(case_sensitive);
        self
    }

    /// Whether user text is regex-escaped before it becomes a pattern.
    pub fn escape_patterns(mut self, escape: bool) -> Self {
        self.inner.string_options = self.inner.string_options.escape_pattern(escape);
        self
    }

    /// Fields searched by free text instead of the store's native text index.
    pub fn text_search_fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        let fields: Vec<String> = fields
            .into_iter()
            .map(Into::into)
            .filter(|f: &String| !f.trim().is_empty())
            .collect();
        self.inner.text_search_fields = if fields.is_empty() { None } else { Some(fields) };
        self
    }

    pub fn build(self) -> QueryResult<QueryConfig> {
        match self.error {
            Some(err) => Err(err),
            None => {
                log::debug!(
                    "Query config: default sort {} {:?}, page size {}",
                    self.inner.default_sort.field,
                    self.inner.default_sort.order,
                    self.inner.default_page_size
                );
                Ok(QueryConfig::from_inner(self.inner))
            }
        }
    }

    fn record(&mut self, error: QueryError) {
        log::error!("{}", error);
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_defaults() {
        let config = QueryConfigBuilder::new().build().unwrap();
        assert_eq!(config.default_sort(), &SortDirective::default());
        assert_eq!(config.default_page(), 1);
    }

    #[test]
    fn test_custom_values() {
        let config = QueryConfigBuilder::new()
            .default_sort(" name ", SortOrder::Ascending)
            .default_page(2)
            .default_page_size(5)
            .case_sensitive(true)
            .escape_patterns(false)
            .text_search_fields(["name", " ", "description"])
            .build()
            .unwrap();
        assert_eq!(config.default_sort(), &SortDirective::new("name", SortOrder::Ascending));
        assert_eq!(config.default_page(), 2);
        assert_eq!(config.default_page_size(), 5);
        assert!(config.string_options().case_sensitive);
        assert!(!config.string_options().escape_pattern);
        assert_eq!(
            config.text_search_fields(),
            Some(&["name".to_string(), "description".to_string()][..])
        );
    }

    #[test]
    fn test_first_error_wins() {
        let err = QueryConfigBuilder::new()
            .default_sort("", SortOrder::Ascending)
            .default_page_size(-1)
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::ConfigError);
        assert_eq!(err.message(), "Default sort field cannot be empty");
    }

    #[test]
    fn test_invalid_page() {
        let err = QueryConfigBuilder::new().default_page(0).build().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::ConfigError);
    }

    #[test]
    fn test_empty_text_search_fields_fall_back_to_native() {
        let config = QueryConfigBuilder::new()
            .text_search_fields(Vec::<String>::new())
            .build()
            .unwrap();
        assert!(config.text_search_fields().is_none());
    }
}
