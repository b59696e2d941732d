use super::{or, Condition, FilterExpression};

/// Free-text search parameters of a request.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct TextSearch {
    pub search: Option<String>,
    pub fields: Option<Vec<String>>,
}

impl TextSearch {
    pub fn new(search: impl Into<String>) -> Self {
        TextSearch {
            search: Some(search.into()),
            fields: None,
        }
    }

    pub fn in_fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }
}

/// Builds the free-text part of a filter.
///
/// With explicit `fields` the term is matched case-insensitively as a substring
/// of each field, OR-ed in field order. Without fields the raw term is handed
/// to the store's native text index. A missing or blank term matches
/// everything.
///
/// The term is used as given; callers that need literal matching of regex
/// metacharacters escape it first (see [build_text_search_escaped]).
///
/// # Examples
///
/// ```rust
/// use mealquery::filter::{build_text_search, Condition, FilterExpression, TextSearch};
///
/// let filter = build_text_search(&TextSearch::new("chicken").in_fields(["name", "description"]));
/// assert_eq!(
///     filter,
///     FilterExpression::Or {
///         clauses: vec![
///             FilterExpression::field("name", Condition::regex("chicken")),
///             FilterExpression::field("description", Condition::regex("chicken")),
///         ]
///     }
/// );
/// ```
pub fn build_text_search(params: &TextSearch) -> FilterExpression {
    text_search(params, false)
}

/// Like [build_text_search], with regex metacharacters in the term escaped
/// before per-field matching.
pub fn build_text_search_escaped(params: &TextSearch) -> FilterExpression {
    text_search(params, true)
}

fn text_search(params: &TextSearch, escape: bool) -> FilterExpression {
    let search = match params.search.as_deref() {
        Some(search) if !search.trim().is_empty() => search,
        _ => return FilterExpression::Empty,
    };

    match &params.fields {
        Some(fields) if !fields.is_empty() => {
            let pattern = if escape {
                regex::escape(search)
            } else {
                search.to_string()
            };
            or(fields
                .iter()
                .map(|field| FilterExpression::field(field.as_str(), Condition::regex(pattern.as_str())))
                .collect())
        }
        _ => FilterExpression::Text {
            search: search.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_search_term_matches_everything() {
        assert_eq!(build_text_search(&TextSearch::default()), FilterExpression::Empty);
        assert_eq!(
            build_text_search(&TextSearch::new("   ").in_fields(["name"])),
            FilterExpression::Empty
        );
    }

    #[test]
    fn test_fields_produce_or_in_field_order() {
        let filter = build_text_search(&TextSearch::new("chicken").in_fields(["name", "description"]));
        assert_eq!(
            filter,
            FilterExpression::Or {
                clauses: vec![
                    FilterExpression::field("name", Condition::regex("chicken")),
                    FilterExpression::field("description", Condition::regex("chicken")),
                ]
            }
        );
    }

    #[test]
    fn test_single_field_collapses() {
        let filter = build_text_search(&TextSearch::new("curry").in_fields(["name"]));
        assert_eq!(filter, FilterExpression::field("name", Condition::regex("curry")));
    }

    #[test]
    fn test_without_fields_uses_native_text_search() {
        let filter = build_text_search(&TextSearch::new("spicy noodles"));
        assert_eq!(
            filter,
            FilterExpression::Text {
                search: "spicy noodles".to_string()
            }
        );

        let empty_fields = TextSearch {
            search: Some("tofu".to_string()),
            fields: Some(vec![]),
        };
        assert_eq!(
            build_text_search(&empty_fields),
            FilterExpression::Text {
                search: "tofu".to_string()
            }
        );
    }

    #[test]
    fn test_escaped_variant() {
        let filter = build_text_search_escaped(&TextSearch::new("1+1").in_fields(["name"]));
        assert_eq!(filter, FilterExpression::field("name", Condition::regex(r"1\+1")));
    }
}
