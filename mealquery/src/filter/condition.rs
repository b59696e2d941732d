use chrono::{DateTime, Utc};
use itertools::Itertools;
use std::fmt::Display;

use crate::common::Value;

/// A single-field predicate.
///
/// The set is closed: every condition a search endpoint can express is one of
/// these variants, and the document-store adapter translates each of them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Condition {
    /// The field equals the value. Array fields match when any element equals it.
    Equals(Value),
    /// The field's string form matches the regular expression.
    RegexMatch {
        pattern: String,
        case_sensitive: bool,
    },
    /// Numeric range, both bounds inclusive. An absent bound is unbounded.
    Range {
        min: Option<f64>,
        max: Option<f64>,
    },
    /// Date range, both bounds inclusive. An absent bound is unbounded.
    DateRange {
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    },
    /// The field (or any of its elements) is one of the values.
    In(Vec<Value>),
    /// The array field contains every one of the values.
    All(Vec<Value>),
    /// The field is exactly this boolean.
    BooleanEquals(bool),
}

impl Condition {
    /// Case-insensitive substring match on `pattern`.
    pub fn regex(pattern: impl Into<String>) -> Self {
        Condition::RegexMatch {
            pattern: pattern.into(),
            case_sensitive: false,
        }
    }

    pub fn regex_case_sensitive(pattern: impl Into<String>) -> Self {
        Condition::RegexMatch {
            pattern: pattern.into(),
            case_sensitive: true,
        }
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::Equals(value) => write!(f, "== {}", value),
            Condition::RegexMatch {
                pattern,
                case_sensitive,
            } => {
                if *case_sensitive {
                    write!(f, "=~ /{}/", pattern)
                } else {
                    write!(f, "=~ /{}/i", pattern)
                }
            }
            Condition::Range { min, max } => write!(
                f,
                "in [{}, {}]",
                min.map_or("-inf".to_string(), |v| v.to_string()),
                max.map_or("+inf".to_string(), |v| v.to_string())
            ),
            Condition::DateRange { start, end } => write!(
                f,
                "in [{}, {}]",
                start.map_or("..".to_string(), |v| v.to_rfc3339()),
                end.map_or("..".to_string(), |v| v.to_rfc3339())
            ),
            Condition::In(values) => write!(f, "in ({})", values.iter().join(", ")),
            Condition::All(values) => write!(f, "all ({})", values.iter().join(", ")),
            Condition::BooleanEquals(value) => write!(f, "== {}", value),
        }
    }
}
