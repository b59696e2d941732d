use lru::LruCache;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::{Regex, RegexBuilder};
use std::num::NonZeroUsize;

use crate::common::{Document, Value, REGEX_CACHE_CAPACITY};
use crate::errors::{ErrorKind, QueryError, QueryResult};

use super::{parse_date, Condition, FilterExpression};

static REGEX_CACHE: Lazy<Mutex<LruCache<(String, bool), Regex>>> = Lazy::new(|| {
    let capacity = NonZeroUsize::new(REGEX_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
    Mutex::new(LruCache::new(capacity))
});

fn compiled_regex(pattern: &str, case_sensitive: bool) -> QueryResult<Regex> {
    let key = (pattern.to_string(), case_sensitive);
    if let Some(regex) = REGEX_CACHE.lock().get(&key) {
        return Ok(regex.clone());
    }

    let regex = RegexBuilder::new(pattern)
        .case_insensitive(!case_sensitive)
        .build()
        .map_err(|e| {
            log::error!("Invalid regex pattern '{}': {}", pattern, e);
            QueryError::new_with_cause(
                &format!("Invalid regex pattern {}", pattern),
                ErrorKind::FilterError,
                e.into(),
            )
        })?;
    REGEX_CACHE.lock().put(key, regex.clone());
    Ok(regex)
}

impl FilterExpression {
    /// Evaluates this filter against `document` in memory.
    ///
    /// Matching follows the document store's rules: a condition on an array
    /// field matches when any element satisfies it, dotted paths descend into
    /// arrays of sub-documents, and a missing field only matches `Empty`.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::FilterError] for a regex pattern that does not
    /// compile, and [ErrorKind::InvalidFieldName] for a malformed field path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mealquery::doc;
    /// use mealquery::filter::{Condition, FilterExpression};
    ///
    /// let recipe = doc! { name: "Chicken Tikka", tags: [{ name: "spicy" }] };
    /// let filter = FilterExpression::field("name", Condition::regex("chicken"))
    ///     .and(FilterExpression::field("tags.name", Condition::regex("SPICY")));
    /// assert!(filter.apply(&recipe).unwrap());
    /// ```
    pub fn apply(&self, document: &Document) -> QueryResult<bool> {
        match self {
            FilterExpression::Empty => Ok(true),
            FilterExpression::FieldMatch { field, condition } => {
                let value = document.get(field)?;
                condition.apply(&value)
            }
            FilterExpression::And { clauses } => {
                for clause in clauses {
                    if !clause.apply(document)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            FilterExpression::Or { clauses } => {
                for clause in clauses {
                    if clause.apply(document)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            FilterExpression::Text { search } => Ok(text_matches(search, document)),
        }
    }
}

impl Condition {
    /// Evaluates this condition against a resolved field value.
    pub fn apply(&self, value: &Value) -> QueryResult<bool> {
        match self {
            Condition::Equals(expected) => Ok(value == expected || any_element(value, |v| v == expected)),
            Condition::BooleanEquals(expected) => {
                Ok(any_element(value, |v| v.as_bool() == Some(*expected)))
            }
            Condition::RegexMatch {
                pattern,
                case_sensitive,
            } => {
                let regex = compiled_regex(pattern, *case_sensitive)?;
                Ok(any_element(value, |v| {
                    v.as_string().is_some_and(|s| regex.is_match(s))
                }))
            }
            Condition::Range { min, max } => Ok(any_element(value, |v| match v.as_f64() {
                Some(n) => min.map_or(true, |m| n >= m) && max.map_or(true, |m| n <= m),
                None => false,
            })),
            Condition::DateRange { start, end } => Ok(any_element(value, |v| {
                let date = match v {
                    Value::DateTime(dt) => Some(*dt),
                    Value::String(s) => parse_date(s).ok(),
                    _ => None,
                };
                match date {
                    Some(dt) => {
                        start.map_or(true, |s| dt >= s) && end.map_or(true, |e| dt <= e)
                    }
                    None => false,
                }
            })),
            Condition::In(candidates) => Ok(candidates.iter().any(|candidate| {
                value == candidate || any_element(value, |v| v == candidate)
            })),
            Condition::All(required) => {
                if required.is_empty() {
                    return Ok(false);
                }
                Ok(required
                    .iter()
                    .all(|item| value == item || any_element(value, |v| v == item)))
            }
        }
    }
}

/// Applies `predicate` to a scalar value, or to each element of an array.
fn any_element<F>(value: &Value, predicate: F) -> bool
where
    F: Fn(&Value) -> bool,
{
    match value {
        Value::Array(items) => items.iter().any(&predicate),
        scalar => predicate(scalar),
    }
}

fn text_matches(search: &str, document: &Document) -> bool {
    let terms: Vec<String> = search
        .split_whitespace()
        .map(|term| term.to_lowercase())
        .collect();
    if terms.is_empty() {
        return false;
    }

    let mut words = Vec::new();
    collect_words(&Value::Document(document.clone()), &mut words);
    terms.iter().any(|term| words.contains(term))
}

fn collect_words(value: &Value, words: &mut Vec<String>) {
    match value {
        Value::String(s) => words.extend(
            s.split(|c: char| !c.is_alphanumeric())
                .filter(|w| !w.is_empty())
                .map(|w| w.to_lowercase()),
        ),
        Value::Array(items) => items.iter().for_each(|item| collect_words(item, words)),
        Value::Document(doc) => doc.iter().for_each(|(_, v)| collect_words(v, words)),
        _ => {}
    }
}
