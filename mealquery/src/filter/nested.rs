use crate::common::Value;

use super::{Condition, FilterExpression};

/// How [build_nested_field_condition] compares the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NestedOperator {
    /// Exact equality.
    #[default]
    Equals,
    /// Case-insensitive substring match on the value's string form, always.
    RegexMatch,
    /// Membership; the value is expected to be an array.
    In,
}

/// Builds a condition on a dotted path into an embedded document or an array
/// of sub-documents, e.g. `tags.name` or `ingredients.item`.
///
/// A blank path or an absent/blank value yields `Empty`. With
/// [NestedOperator::RegexMatch] the value is escaped and matched
/// case-insensitively; there is no case-sensitive nested variant.
///
/// # Examples
///
/// ```rust
/// use mealquery::common::Value;
/// use mealquery::filter::{build_nested_field_condition, Condition, FilterExpression, NestedOperator};
///
/// let filter = build_nested_field_condition("ingredients.item", Value::from("Basil"), NestedOperator::RegexMatch);
/// assert_eq!(filter, FilterExpression::field("ingredients.item", Condition::regex("Basil")));
/// ```
pub fn build_nested_field_condition(
    path: &str,
    value: impl Into<Value>,
    operator: NestedOperator,
) -> FilterExpression {
    let path = path.trim();
    if path.is_empty() {
        log::debug!("Skipping nested field condition without a path");
        return FilterExpression::Empty;
    }

    let value = value.into();
    if value.is_vacuous() || value.as_string().is_some_and(|s| s.trim().is_empty()) {
        return FilterExpression::Empty;
    }

    let condition = match operator {
        NestedOperator::Equals => Condition::Equals(value),
        NestedOperator::RegexMatch => {
            let text = match &value {
                Value::String(s) => s.trim().to_string(),
                other => other.to_string(),
            };
            Condition::regex(regex::escape(&text))
        }
        NestedOperator::In => match value {
            Value::Array(values) => Condition::In(values),
            single => Condition::In(vec![single]),
        },
    };
    FilterExpression::field(path, condition)
}
