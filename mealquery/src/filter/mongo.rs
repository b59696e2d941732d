//! The MongoDB adapter. Operator names appear nowhere else in the crate.
//!
//! Every expression renders the same way wherever it sits in the tree, and the
//! result selects the documents [FilterExpression::apply] accepts. Nothing is
//! dropped on the way: a condition on `Null`, `""` or an empty list is rendered
//! as written. Use [super::prune_empty] on hand-assembled documents instead.
//!
//! Rendering fails only when a field match has an empty field name.

use crate::common::{
    Document, Value, CASE_INSENSITIVE_OPTION, OP_ALL, OP_AND, OP_GTE, OP_IN, OP_LTE, OP_OPTIONS,
    OP_OR, OP_REGEX, OP_SEARCH, OP_TEXT, OP_TYPE, TYPE_DATE, TYPE_NUMBER,
};
use crate::errors::QueryResult;

use super::{Condition, FilterExpression};

impl FilterExpression {
    /// Translates this expression into MongoDB query syntax.
    ///
    /// # Errors
    ///
    /// Returns [crate::errors::ErrorKind::InvalidFieldName] if a field match
    /// has an empty field name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mealquery::doc;
    /// use mealquery::filter::{Condition, FilterExpression};
    ///
    /// let filter = FilterExpression::field("name", Condition::regex("soup"));
    /// assert_eq!(
    ///     filter.to_mongo().unwrap(),
    ///     doc! { name: { "$regex": "soup", "$options": "i" } }
    /// );
    /// ```
    pub fn to_mongo(&self) -> QueryResult<Document> {
        let mut document = Document::new();
        match self {
            FilterExpression::Empty => {}
            FilterExpression::FieldMatch { field, condition } => {
                document.put(field, condition.to_mongo_value()?)?;
            }
            FilterExpression::And { clauses } => {
                document.put(OP_AND, clauses_to_mongo(clauses)?)?;
            }
            FilterExpression::Or { clauses } => {
                document.put(OP_OR, clauses_to_mongo(clauses)?)?;
            }
            FilterExpression::Text { search } => {
                let mut text = Document::new();
                text.put(OP_SEARCH, search.as_str())?;
                document.put(OP_TEXT, text)?;
            }
        }
        Ok(document)
    }
}

fn clauses_to_mongo(clauses: &[FilterExpression]) -> QueryResult<Value> {
    let documents = clauses
        .iter()
        .map(|clause| clause.to_mongo().map(Value::Document))
        .collect::<QueryResult<Vec<Value>>>()?;
    Ok(Value::Array(documents))
}

impl Condition {
    /// The value placed under the field name in a MongoDB filter.
    pub fn to_mongo_value(&self) -> QueryResult<Value> {
        let value = match self {
            Condition::Equals(value) => value.clone(),
            Condition::BooleanEquals(value) => Value::Bool(*value),
            Condition::RegexMatch {
                pattern,
                case_sensitive,
            } => {
                let mut regex = Document::new();
                regex.put(OP_REGEX, pattern.as_str())?;
                if !case_sensitive {
                    regex.put(OP_OPTIONS, CASE_INSENSITIVE_OPTION)?;
                }
                Value::Document(regex)
            }
            Condition::Range { min, max } => {
                let mut range = Document::new();
                if let Some(min) = min {
                    range.put(OP_GTE, *min)?;
                }
                if let Some(max) = max {
                    range.put(OP_LTE, *max)?;
                }
                // unbounded: any number
                if range.is_empty() {
                    range.put(OP_TYPE, TYPE_NUMBER)?;
                }
                Value::Document(range)
            }
            Condition::DateRange { start, end } => {
                let mut range = Document::new();
                if let Some(start) = start {
                    range.put(OP_GTE, *start)?;
                }
                if let Some(end) = end {
                    range.put(OP_LTE, *end)?;
                }
                if range.is_empty() {
                    range.put(OP_TYPE, TYPE_DATE)?;
                }
                Value::Document(range)
            }
            Condition::In(values) => {
                let mut members = Document::new();
                members.put(OP_IN, Value::Array(values.clone()))?;
                Value::Document(members)
            }
            Condition::All(values) => {
                let mut members = Document::new();
                members.put(OP_ALL, Value::Array(values.clone()))?;
                Value::Document(members)
            }
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;
    use crate::filter::{and, or};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_empty_is_empty_document() {
        assert_eq!(FilterExpression::Empty.to_mongo().unwrap(), Document::new());
    }

    #[test]
    fn test_equality_and_boolean() {
        let equals = FilterExpression::field("cuisine", Condition::Equals(Value::from("thai")));
        assert_eq!(equals.to_mongo().unwrap(), doc! { cuisine: "thai" });

        let flag = FilterExpression::field("isPublic", Condition::BooleanEquals(false));
        assert_eq!(flag.to_mongo().unwrap(), doc! { "isPublic": false });
    }

    #[test]
    fn test_regex_options() {
        let insensitive = FilterExpression::field("name", Condition::regex("soup"));
        assert_eq!(
            insensitive.to_mongo().unwrap(),
            doc! { name: { "$regex": "soup", "$options": "i" } }
        );

        let sensitive = FilterExpression::field("name", Condition::regex_case_sensitive("Soup"));
        assert_eq!(
            sensitive.to_mongo().unwrap(),
            doc! { name: { "$regex": "Soup" } }
        );
    }

    #[test]
    fn test_ranges_omit_absent_bounds() {
        let min_only = FilterExpression::field(
            "nutrition.calories",
            Condition::Range {
                min: Some(200.0),
                max: None,
            },
        );
        assert_eq!(
            min_only.to_mongo().unwrap(),
            doc! { "nutrition.calories": { "$gte": 200 } }
        );

        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
        let dates = FilterExpression::field(
            "createdAt",
            Condition::DateRange {
                start: Some(start),
                end: Some(end),
            },
        );
        assert_eq!(
            dates.to_mongo().unwrap(),
            doc! { "createdAt": { "$gte": start, "$lte": end } }
        );
    }

    #[test]
    fn test_membership() {
        let tags = FilterExpression::field(
            "tags.name",
            Condition::In(vec![Value::from("vegan"), Value::from("quick")]),
        );
        assert_eq!(
            tags.to_mongo().unwrap(),
            doc! { "tags.name": { "$in": ["vegan", "quick"] } }
        );

        let dietary = FilterExpression::field("dietary", Condition::All(vec![Value::from("vegan")]));
        assert_eq!(
            dietary.to_mongo().unwrap(),
            doc! { dietary: { "$all": ["vegan"] } }
        );
    }

    #[test]
    fn test_logical_operators_keep_clause_order() {
        let filter = and(vec![
            or(vec![
                FilterExpression::field("name", Condition::regex("chicken")),
                FilterExpression::field("description", Condition::regex("chicken")),
            ]),
            FilterExpression::field("isPublic", Condition::BooleanEquals(true)),
        ]);
        assert_eq!(
            filter.to_mongo().unwrap(),
            doc! {
                "$and": [
                    { "$or": [
                        { name: { "$regex": "chicken", "$options": "i" } },
                        { description: { "$regex": "chicken", "$options": "i" } },
                    ] },
                    { "isPublic": true },
                ]
            }
        );
    }

    #[test]
    fn test_text_search() {
        let text = FilterExpression::Text {
            search: "lemon chicken".to_string(),
        };
        assert_eq!(
            text.to_mongo().unwrap(),
            doc! { "$text": { "$search": "lemon chicken" } }
        );
    }

    #[test]
    fn test_empty_field_name_is_rejected() {
        let filter = FilterExpression::field("", Condition::BooleanEquals(true));
        assert!(filter.to_mongo().is_err());
    }

    #[test]
    fn test_vacuous_conditions_are_rendered_as_written() {
        let status = FilterExpression::field("status", Condition::Equals(Value::from("")));
        assert_eq!(status.to_mongo().unwrap(), doc! { status: "" });

        let tags = FilterExpression::field("tags", Condition::In(vec![]));
        assert_eq!(tags.to_mongo().unwrap(), doc! { tags: { "$in": [] } });

        let deleted = FilterExpression::field("deletedAt", Condition::Equals(Value::Null));
        assert_eq!(deleted.to_mongo().unwrap(), doc! { "deletedAt": (Value::Null) });
    }

    #[test]
    fn test_clause_renders_the_same_when_nested() {
        let public = FilterExpression::field("isPublic", Condition::BooleanEquals(true));
        let clauses = vec![
            FilterExpression::field("status", Condition::Equals(Value::from(""))),
            FilterExpression::field("tags", Condition::In(vec![])),
            FilterExpression::field("deletedAt", Condition::Equals(Value::Null)),
        ];

        for clause in clauses {
            let top_level = Value::Document(clause.to_mongo().unwrap());
            for combined in [
                and(vec![clause.clone(), public.clone()]),
                or(vec![clause.clone(), public.clone()]),
            ] {
                let rendered = combined.to_mongo().unwrap();
                let (_, nested) = rendered.iter().next().unwrap();
                let nested = nested.as_array().unwrap();
                assert_eq!(nested[0], top_level);
            }
        }
    }

    #[test]
    fn test_rendering_agrees_with_apply() {
        let tags = FilterExpression::field("tags", Condition::In(vec![]));
        assert_eq!(tags.to_mongo().unwrap(), doc! { tags: { "$in": [] } });
        assert!(!tags.apply(&doc! { tags: ["vegan"] }).unwrap());
        assert!(!tags.apply(&doc! { name: "Soup" }).unwrap());

        // { deletedAt: null } matches null or missing, never a set value
        let live = FilterExpression::field("deletedAt", Condition::Equals(Value::Null));
        assert_eq!(live.to_mongo().unwrap(), doc! { "deletedAt": (Value::Null) });
        assert!(live.apply(&doc! { name: "Soup" }).unwrap());
        assert!(live.apply(&doc! { name: "Soup", "deletedAt": (Value::Null) }).unwrap());
        assert!(!live.apply(&doc! { name: "Soup", "deletedAt": "2024-01-01" }).unwrap());
    }

    #[test]
    fn test_unbounded_ranges_require_the_type() {
        let any_number = FilterExpression::field("prepTime", Condition::Range { min: None, max: None });
        assert_eq!(
            any_number.to_mongo().unwrap(),
            doc! { "prepTime": { "$type": "number" } }
        );
        assert!(any_number.apply(&doc! { "prepTime": 10 }).unwrap());
        assert!(!any_number.apply(&doc! { "prepTime": "ten" }).unwrap());

        let any_date = FilterExpression::field("createdAt", Condition::DateRange { start: None, end: None });
        assert_eq!(
            any_date.to_mongo().unwrap(),
            doc! { "createdAt": { "$type": "date" } }
        );
    }
}
