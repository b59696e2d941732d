use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::common::Value;
use crate::errors::{ErrorKind, QueryError, QueryResult};

use super::Condition;

/// Options controlling how [build_string_condition] matches text.
///
/// The default is a case-insensitive substring match with the user's text
/// escaped, so that characters like `(` or `+` are matched literally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringMatchOptions {
    pub case_sensitive: bool,
    pub exact_match: bool,
    pub allow_partial_match: bool,
    pub escape_pattern: bool,
}

impl Default for StringMatchOptions {
    fn default() -> Self {
        StringMatchOptions {
            case_sensitive: false,
            exact_match: false,
            allow_partial_match: true,
            escape_pattern: true,
        }
    }
}

impl StringMatchOptions {
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn exact_match(mut self, exact_match: bool) -> Self {
        self.exact_match = exact_match;
        self
    }

    pub fn allow_partial_match(mut self, allow_partial_match: bool) -> Self {
        self.allow_partial_match = allow_partial_match;
        self
    }

    pub fn escape_pattern(mut self, escape_pattern: bool) -> Self {
        self.escape_pattern = escape_pattern;
        self
    }

    pub(crate) fn pattern(&self, text: &str) -> String {
        if self.escape_pattern {
            regex::escape(text)
        } else {
            text.to_string()
        }
    }
}

/// Array membership semantics for [build_array_condition].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayOperator {
    /// The field matches any of the values.
    #[default]
    In,
    /// The array field contains all of the values.
    All,
}

/// A date bound as it arrives from a request: raw text or an already parsed
/// timestamp.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    Text(String),
    Parsed(DateTime<Utc>),
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        DateInput::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        DateInput::Text(value)
    }
}

impl From<&String> for DateInput {
    fn from(value: &String) -> Self {
        DateInput::Text(value.clone())
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(value: DateTime<Utc>) -> Self {
        DateInput::Parsed(value)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        DateInput::Parsed(value.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc())
    }
}

impl DateInput {
    /// Resolves the bound. Blank text is treated as an absent bound.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::ValidationError] when the text is not a date.
    pub fn resolve(&self) -> QueryResult<Option<DateTime<Utc>>> {
        match self {
            DateInput::Parsed(dt) => Ok(Some(*dt)),
            DateInput::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(None);
                }
                parse_date(text).map(Some)
            }
        }
    }
}

/// Parses a date the way request parameters carry them: RFC 3339, a local
/// `YYYY-MM-DDTHH:MM:SS` timestamp read as UTC, or a bare `YYYY-MM-DD` at
/// midnight UTC.
pub fn parse_date(text: &str) -> QueryResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc());
        }
    }

    match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        Ok(date) => match date.and_hms_opt(0, 0, 0) {
            Some(naive) => Ok(naive.and_utc()),
            None => Err(QueryError::new(
                &format!("Invalid date {}", text),
                ErrorKind::ValidationError,
            )),
        },
        Err(e) => {
            log::error!("Invalid date '{}': {}", text, e);
            Err(QueryError::new_with_cause(
                &format!("Invalid date {}", text),
                ErrorKind::ValidationError,
                e.into(),
            ))
        }
    }
}

/// Builds a text condition from an optional request value.
///
/// Absent or blank input yields `None`, so the caller omits the field rather
/// than matching everything through an empty pattern.
///
/// # Examples
///
/// ```rust
/// use mealquery::filter::{build_string_condition, Condition, StringMatchOptions};
///
/// let partial = build_string_condition(Some("  chick "), StringMatchOptions::default());
/// assert_eq!(partial, Some(Condition::regex("chick")));
///
/// assert_eq!(build_string_condition(Some("   "), StringMatchOptions::default()), None);
/// ```
pub fn build_string_condition(value: Option<&str>, options: StringMatchOptions) -> Option<Condition> {
    let value = value.map(str::trim).filter(|v| !v.is_empty())?;

    let condition = if options.exact_match {
        if options.case_sensitive {
            Condition::Equals(Value::from(value))
        } else {
            Condition::regex(format!("^{}$", options.pattern(value)))
        }
    } else if options.allow_partial_match {
        Condition::RegexMatch {
            pattern: options.pattern(value),
            case_sensitive: options.case_sensitive,
        }
    } else {
        Condition::Equals(Value::from(value))
    };
    Some(condition)
}

/// Inclusive numeric range. `min > max` is passed through as-is and matches
/// nothing.
pub fn build_numeric_range_condition(min: Option<f64>, max: Option<f64>) -> Option<Condition> {
    if min.is_none() && max.is_none() {
        return None;
    }
    Some(Condition::Range { min, max })
}

/// Inclusive date range from raw bounds.
///
/// # Errors
///
/// Returns [ErrorKind::ValidationError] if a present bound cannot be parsed.
///
/// # Examples
///
/// ```rust
/// use mealquery::filter::{build_date_range_condition, DateInput};
///
/// let range = build_date_range_condition(Some(DateInput::from("2024-03-01")), None).unwrap();
/// assert!(range.is_some());
/// assert!(build_date_range_condition(Some(DateInput::from("yesterday")), None).is_err());
/// ```
pub fn build_date_range_condition(
    start: Option<DateInput>,
    end: Option<DateInput>,
) -> QueryResult<Option<Condition>> {
    let start = match start {
        Some(input) => input.resolve()?,
        None => None,
    };
    let end = match end {
        Some(input) => input.resolve()?,
        None => None,
    };

    if start.is_none() && end.is_none() {
        return Ok(None);
    }
    Ok(Some(Condition::DateRange { start, end }))
}

pub fn build_array_condition<T: Into<Value>>(
    values: Option<Vec<T>>,
    operator: ArrayOperator,
) -> Option<Condition> {
    let values: Vec<Value> = values?.into_iter().map(Into::into).collect();
    if values.is_empty() {
        return None;
    }

    match operator {
        ArrayOperator::In => Some(Condition::In(values)),
        ArrayOperator::All => Some(Condition::All(values)),
    }
}

/// Only an absent value is omitted; `Some(false)` is a real condition.
pub fn build_boolean_condition(value: Option<bool>) -> Option<Condition> {
    value.map(Condition::BooleanEquals)
}

/// Equality on an enum-like code. Absent, null and empty-string codes are
/// omitted.
pub fn build_enum_condition<T: Into<Value>>(value: Option<T>) -> Option<Condition> {
    let value: Value = value?.into();
    if value.is_null() || value.as_string().is_some_and(|s| s.is_empty()) {
        return None;
    }
    Some(Condition::Equals(value))
}
