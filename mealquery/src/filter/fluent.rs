use chrono::{DateTime, Utc};

use crate::common::Value;

use super::{Condition, FilterExpression};

/// Creates a fluent filter builder for the specified field name.
///
/// # Examples
///
/// ```rust
/// use mealquery::filter::field;
///
/// let filter = field("cuisine").eq("thai").and(field("prepTime").between(10.0, 30.0));
/// assert_eq!(filter.clauses().len(), 2);
/// ```
pub fn field(field_name: &str) -> FluentFilter {
    FluentFilter {
        field_name: field_name.to_string(),
    }
}

/// A builder of single-field expressions. Each method consumes the builder and
/// returns a [FilterExpression] ready to be combined with others.
pub struct FluentFilter {
    field_name: String,
}

impl FluentFilter {
    #[inline]
    pub fn eq<T: Into<Value>>(self, value: T) -> FilterExpression {
        self.condition(Condition::Equals(value.into()))
    }

    #[inline]
    pub fn is(self, value: bool) -> FilterExpression {
        self.condition(Condition::BooleanEquals(value))
    }

    /// Case-insensitive regex match.
    #[inline]
    pub fn regex(self, pattern: &str) -> FilterExpression {
        self.condition(Condition::regex(pattern))
    }

    #[inline]
    pub fn regex_case_sensitive(self, pattern: &str) -> FilterExpression {
        self.condition(Condition::regex_case_sensitive(pattern))
    }

    /// Inclusive numeric range.
    #[inline]
    pub fn between(self, min: f64, max: f64) -> FilterExpression {
        self.condition(Condition::Range {
            min: Some(min),
            max: Some(max),
        })
    }

    #[inline]
    pub fn gte(self, min: f64) -> FilterExpression {
        self.condition(Condition::Range {
            min: Some(min),
            max: None,
        })
    }

    #[inline]
    pub fn lte(self, max: f64) -> FilterExpression {
        self.condition(Condition::Range {
            min: None,
            max: Some(max),
        })
    }

    /// Inclusive date range; `None` leaves a side unbounded.
    #[inline]
    pub fn between_dates(
        self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> FilterExpression {
        self.condition(Condition::DateRange { start, end })
    }

    #[inline]
    pub fn in_values<T: Into<Value>>(self, values: Vec<T>) -> FilterExpression {
        self.condition(Condition::In(values.into_iter().map(Into::into).collect()))
    }

    #[inline]
    pub fn all<T: Into<Value>>(self, values: Vec<T>) -> FilterExpression {
        self.condition(Condition::All(values.into_iter().map(Into::into).collect()))
    }

    fn condition(self, condition: Condition) -> FilterExpression {
        FilterExpression::field(self.field_name, condition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eq() {
        assert_eq!(
            field("cuisine").eq("thai"),
            FilterExpression::field("cuisine", Condition::Equals(Value::from("thai")))
        );
    }

    #[test]
    fn test_is() {
        assert_eq!(
            field("isPublic").is(false),
            FilterExpression::field("isPublic", Condition::BooleanEquals(false))
        );
    }

    #[test]
    fn test_regex() {
        assert_eq!(
            field("name").regex("soup"),
            FilterExpression::field("name", Condition::regex("soup"))
        );
        assert_eq!(
            field("name").regex_case_sensitive("Soup"),
            FilterExpression::field("name", Condition::regex_case_sensitive("Soup"))
        );
    }

    #[test]
    fn test_ranges() {
        assert_eq!(
            field("prepTime").gte(5.0),
            FilterExpression::field("prepTime", Condition::Range { min: Some(5.0), max: None })
        );
        assert_eq!(
            field("prepTime").lte(5.0),
            FilterExpression::field("prepTime", Condition::Range { min: None, max: Some(5.0) })
        );
        assert_eq!(
            field("prepTime").between(1.0, 2.0),
            FilterExpression::field(
                "prepTime",
                Condition::Range { min: Some(1.0), max: Some(2.0) }
            )
        );
    }

    #[test]
    fn test_membership() {
        assert_eq!(
            field("tags.name").in_values(vec!["a", "b"]),
            FilterExpression::field(
                "tags.name",
                Condition::In(vec![Value::from("a"), Value::from("b")])
            )
        );
        assert_eq!(
            field("dietary").all(vec!["vegan"]),
            FilterExpression::field("dietary", Condition::All(vec![Value::from("vegan")]))
        );
    }

    #[test]
    fn test_between_dates_open_ended() {
        assert_eq!(
            field("createdAt").between_dates(None, None),
            FilterExpression::field("createdAt", Condition::DateRange { start: None, end: None })
        );
    }
}
