//! Assembly of a complete query: filter, sort and page window.

use std::cmp::Ordering;

use crate::common::{Document, SortOrder, Value};
use crate::errors::{QueryError, QueryResult};
use crate::filter::{
    and, build_array_condition, build_boolean_condition, build_date_range_condition,
    build_enum_condition, build_nested_field_condition, build_numeric_range_condition,
    build_string_condition, build_text_search, ArrayOperator, DateInput, FilterExpression,
    NestedOperator, StringMatchOptions, TextSearch,
};
use crate::options::{build_pagination, build_sort, Pagination, SortDirective};
use crate::query_config::QueryConfig;

/// A filter together with its sort directive and optional page window.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub filter: FilterExpression,
    pub sort: SortDirective,
    pub pagination: Option<Pagination>,
}

/// Arguments for a MongoDB `find`: filter document, sort document, skip, limit.
#[derive(Debug, Clone, PartialEq)]
pub struct MongoFindArgs {
    pub filter: Document,
    pub sort: Document,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl Query {
    pub fn builder() -> QueryBuilder {
        QueryBuilder::new()
    }

    pub fn to_find_args(&self) -> QueryResult<MongoFindArgs> {
        Ok(MongoFindArgs {
            filter: self.filter.to_mongo()?,
            sort: self.sort.to_mongo()?,
            skip: self.pagination.map(|p| p.skip()),
            limit: self.pagination.map(|p| p.limit()),
        })
    }

    /// Runs this query over in-memory documents: filter, then a stable sort,
    /// then the page window.
    ///
    /// Documents missing the sort field sort before all others. A negative skip
    /// is clamped to zero here, and a non-positive limit means "no limit".
    pub fn execute(&self, documents: &[Document]) -> QueryResult<Vec<Document>> {
        let mut matched = Vec::new();
        for document in documents {
            if self.filter.apply(document)? {
                matched.push(document.clone());
            }
        }

        let mut keyed = matched
            .into_iter()
            .map(|doc| doc.get(&self.sort.field).map(|key| (key, doc)))
            .collect::<QueryResult<Vec<(Value, Document)>>>()?;
        keyed.sort_by(|(a, _), (b, _)| {
            let ordering = compare_sort_keys(a, b);
            match self.sort.order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });

        let sorted = keyed.into_iter().map(|(_, doc)| doc);
        let page: Vec<Document> = match self.pagination {
            Some(pagination) => {
                let skip = usize::try_from(pagination.skip().max(0)).unwrap_or(usize::MAX);
                let skipped = sorted.skip(skip);
                if pagination.limit() > 0 {
                    let limit = usize::try_from(pagination.limit()).unwrap_or(usize::MAX);
                    skipped.take(limit).collect()
                } else {
                    skipped.collect()
                }
            }
            None => sorted.collect(),
        };
        Ok(page)
    }
}

fn compare_sort_keys(a: &Value, b: &Value) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.compare(b).unwrap_or(Ordering::Equal),
    }
}

/// Collects conditions from request parameters into a [Query].
///
/// Every method takes the raw optional input; absent input adds nothing.
/// Conditions are AND-ed in call order. Errors (an unparseable date) are kept
/// and returned by [QueryBuilder::build].
///
/// # Examples
///
/// ```rust
/// use mealquery::query::Query;
///
/// let query = Query::builder()
///     .string("cuisine", Some("thai"))
///     .range("prepTime", None, Some(30.0))
///     .boolean("isPublic", Some(true))
///     .sort(Some("prepTime"), Some("asc"))
///     .paginate(Some(2), Some(10))
///     .build()
///     .unwrap();
/// assert_eq!(query.filter.clauses().len(), 3);
/// assert_eq!(query.pagination.map(|p| p.skip()), Some(10));
/// ```
pub struct QueryBuilder {
    config: QueryConfig,
    clauses: Vec<FilterExpression>,
    sort: Option<SortDirective>,
    pagination: Option<Pagination>,
    error: Option<QueryError>,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::with_config(QueryConfig::default())
    }

    pub fn with_config(config: QueryConfig) -> Self {
        QueryBuilder {
            config,
            clauses: Vec::new(),
            sort: None,
            pagination: None,
            error: None,
        }
    }

    /// Adds an already built expression.
    pub fn filter(mut self, expression: FilterExpression) -> Self {
        self.clauses.push(expression);
        self
    }

    /// Text condition using the configured string options.
    pub fn string(self, field: &str, value: Option<&str>) -> Self {
        let options = self.config.string_options();
        self.string_with(field, value, options)
    }

    pub fn string_with(self, field: &str, value: Option<&str>, options: StringMatchOptions) -> Self {
        self.filter(FilterExpression::field_opt(field, build_string_condition(value, options)))
    }

    pub fn range(self, field: &str, min: Option<f64>, max: Option<f64>) -> Self {
        self.filter(FilterExpression::field_opt(field, build_numeric_range_condition(min, max)))
    }

    pub fn date_range(mut self, field: &str, start: Option<DateInput>, end: Option<DateInput>) -> Self {
        match build_date_range_condition(start, end) {
            Ok(condition) => self.filter(FilterExpression::field_opt(field, condition)),
            Err(err) => {
                let err = QueryError::new_with_cause(
                    &format!("Invalid date range for {}", field),
                    err.kind().clone(),
                    err,
                );
                if self.error.is_none() {
                    self.error = Some(err);
                }
                self
            }
        }
    }

    pub fn array<T: Into<Value>>(self, field: &str, values: Option<Vec<T>>, operator: ArrayOperator) -> Self {
        self.filter(FilterExpression::field_opt(field, build_array_condition(values, operator)))
    }

    pub fn boolean(self, field: &str, value: Option<bool>) -> Self {
        self.filter(FilterExpression::field_opt(field, build_boolean_condition(value)))
    }

    pub fn enumeration<T: Into<Value>>(self, field: &str, value: Option<T>) -> Self {
        self.filter(FilterExpression::field_opt(field, build_enum_condition(value)))
    }

    pub fn nested<T: Into<Value>>(self, path: &str, value: Option<T>, operator: NestedOperator) -> Self {
        match value {
            Some(value) => self.filter(build_nested_field_condition(path, value, operator)),
            None => self,
        }
    }

    /// Free-text search over the configured fields, or the store's text index
    /// when none are configured.
    pub fn text_search(self, search: Option<&str>) -> Self {
        let fields = self.config.text_search_fields().map(|f| f.to_vec());
        self.text_search_in(search, fields)
    }

    pub fn text_search_in(self, search: Option<&str>, fields: Option<Vec<String>>) -> Self {
        let options = self.config.string_options();
        let params = TextSearch {
            search: search.map(|s| options.pattern(s.trim())),
            fields,
        };
        let expression = match build_text_search(&params) {
            // the native text index gets the raw term
            FilterExpression::Text { .. } => FilterExpression::Text {
                search: search.map(str::trim).unwrap_or_default().to_string(),
            },
            other => other,
        };
        self.filter(expression)
    }

    /// Sort for the request; without a field the configured default applies.
    pub fn sort(mut self, sort_by: Option<&str>, sort_order: Option<&str>) -> Self {
        let has_field = sort_by.is_some_and(|field| !field.trim().is_empty());
        self.sort = if has_field {
            Some(build_sort(sort_by, sort_order))
        } else {
            Some(self.config.default_sort().clone())
        };
        self
    }

    /// Page window; absent values fall back to the configured defaults.
    pub fn paginate(mut self, page: Option<i64>, limit: Option<i64>) -> Self {
        self.pagination = Some(build_pagination(
            page.unwrap_or(self.config.default_page()),
            limit.unwrap_or(self.config.default_page_size()),
        ));
        self
    }

    pub fn build(self) -> QueryResult<Query> {
        if let Some(err) = self.error {
            log::error!("Failed to build query: {}", err);
            return Err(err);
        }

        let filter = and(self.clauses);
        log::debug!("Built query filter {}", filter);
        Ok(Query {
            filter,
            sort: self.sort.unwrap_or_else(|| self.config.default_sort().clone()),
            pagination: self.pagination,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;
    use crate::errors::ErrorKind;
    use crate::filter::{field, Condition};

    fn recipes() -> Vec<Document> {
        vec![
            doc! { name: "Pad Thai", cuisine: "thai", "prepTime": 25, "isPublic": true },
            doc! { name: "Green Curry", cuisine: "thai", "prepTime": 40, "isPublic": true },
            doc! { name: "Tom Yum", cuisine: "thai", "prepTime": 15, "isPublic": false },
            doc! { name: "Risotto", cuisine: "italian", "prepTime": 35, "isPublic": true },
            doc! { name: "Larb", cuisine: "thai", "isPublic": true },
        ]
    }

    #[test]
    fn test_empty_builder() {
        let query = QueryBuilder::new().build().unwrap();
        assert_eq!(query.filter, FilterExpression::Empty);
        assert_eq!(query.sort, SortDirective::default());
        assert!(query.pagination.is_none());
    }

    #[test]
    fn test_absent_inputs_add_nothing() {
        let query = QueryBuilder::new()
            .string("name", None)
            .string("cuisine", Some("  "))
            .range("prepTime", None, None)
            .date_range("createdAt", None, None)
            .array::<&str>("tags", None, ArrayOperator::In)
            .boolean("isPublic", None)
            .enumeration::<&str>("difficulty", None)
            .nested::<&str>("tags.name", None, NestedOperator::Equals)
            .text_search(None)
            .build()
            .unwrap();
        assert_eq!(query.filter, FilterExpression::Empty);
    }

    #[test]
    fn test_clauses_in_call_order() {
        let query = QueryBuilder::new()
            .boolean("isPublic", Some(false))
            .enumeration("difficulty", Some("easy"))
            .build()
            .unwrap();
        assert_eq!(
            query.filter,
            field("isPublic").is(false).and(field("difficulty").eq("easy"))
        );
    }

    #[test]
    fn test_invalid_date_fails_build() {
        let err = QueryBuilder::new()
            .date_range("createdAt", Some("whenever".into()), None)
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::ValidationError);
        assert_eq!(err.message(), "Invalid date range for createdAt");
    }

    #[test]
    fn test_text_search_uses_config_fields() {
        let config = QueryConfig::builder()
            .text_search_fields(["name", "description"])
            .build()
            .unwrap();
        let query = QueryBuilder::with_config(config)
            .text_search(Some("chicken"))
            .build()
            .unwrap();
        assert_eq!(query.filter.clauses().len(), 2);

        let native = QueryBuilder::new().text_search(Some(" a+b ")).build().unwrap();
        assert_eq!(
            native.filter,
            FilterExpression::Text {
                search: "a+b".to_string()
            }
        );
    }

    #[test]
    fn test_text_search_in_fields_escapes() {
        let query = QueryBuilder::new()
            .text_search_in(Some("a+b"), Some(vec!["name".to_string()]))
            .build()
            .unwrap();
        assert_eq!(query.filter, FilterExpression::field("name", Condition::regex(r"a\+b")));
    }

    #[test]
    fn test_sort_and_paginate_defaults() {
        let config = QueryConfig::builder()
            .default_sort("name", SortOrder::Ascending)
            .default_page_size(2)
            .build()
            .unwrap();
        let query = QueryBuilder::with_config(config)
            .sort(None, Some("desc"))
            .paginate(None, None)
            .build()
            .unwrap();
        assert_eq!(query.sort, SortDirective::new("name", SortOrder::Ascending));
        assert_eq!(query.pagination, Some(build_pagination(1, 2)));
    }

    #[test]
    fn test_to_find_args() {
        let query = QueryBuilder::new()
            .enumeration("cuisine", Some("thai"))
            .sort(Some("prepTime"), Some("desc"))
            .paginate(Some(3), Some(20))
            .build()
            .unwrap();
        let args = query.to_find_args().unwrap();
        assert_eq!(args.filter, doc! { cuisine: "thai" });
        assert_eq!(args.sort, doc! { "prepTime": (-1) });
        assert_eq!(args.skip, Some(40));
        assert_eq!(args.limit, Some(20));
    }

    #[test]
    fn test_execute_filters_sorts_and_pages() {
        let query = QueryBuilder::new()
            .enumeration("cuisine", Some("thai"))
            .boolean("isPublic", Some(true))
            .sort(Some("prepTime"), Some("asc"))
            .paginate(Some(1), Some(2))
            .build()
            .unwrap();
        let page = query.execute(&recipes()).unwrap();
        let names: Vec<Value> = page.iter().map(|d| d.get("name").unwrap()).collect();
        // missing sort key first
        assert_eq!(names, vec![Value::from("Larb"), Value::from("Pad Thai")]);

        let second = Query {
            pagination: Some(build_pagination(2, 2)),
            ..query
        };
        let page = second.execute(&recipes()).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].get("name").unwrap(), Value::from("Green Curry"));
    }

    #[test]
    fn test_execute_descending_without_pagination() {
        let query = QueryBuilder::new()
            .sort(Some("prepTime"), Some("desc"))
            .build()
            .unwrap();
        let all = query.execute(&recipes()).unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].get("name").unwrap(), Value::from("Green Curry"));
        assert_eq!(all[4].get("name").unwrap(), Value::from("Larb"));
    }

    #[test]
    fn test_execute_with_invalid_window() {
        let query = Query {
            filter: FilterExpression::Empty,
            sort: SortDirective::new("name", SortOrder::Ascending),
            pagination: Some(build_pagination(0, 0)),
        };
        assert_eq!(query.execute(&recipes()).unwrap().len(), 5);
    }
}
