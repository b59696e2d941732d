use im::OrdMap;

use crate::common::{Value, FIELD_SEPARATOR};
use crate::errors::{ErrorKind, QueryError, QueryResult};
use std::fmt::{Debug, Display};

/// An ordered string-keyed map of [Value]s.
///
/// `Document` is both the shape of the records a filter is evaluated against and
/// the shape of the query documents produced for the document store. Keys are
/// stored literally, so a key may contain the field separator (`"tags.name"`) or
/// start with `$` (`"$regex"`), as query documents require.
///
/// Lookups with [Document::get] resolve a literal key first and then fall back to
/// a dotted path that descends into embedded documents and arrays.
///
/// The backing `im::OrdMap` makes clones O(1); documents are cheap to pass
/// around by value.
#[derive(Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    data: OrdMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document {
            data: OrdMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Associates `value` with the literal `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mealquery::common::{Document, Value};
    ///
    /// let mut doc = Document::new();
    /// doc.put("tags.name", "vegan").unwrap();
    /// assert_eq!(doc.get("tags.name").unwrap(), Value::from("vegan"));
    /// assert_eq!(doc.size(), 1);
    /// ```
    pub fn put<T: Into<Value>>(&mut self, key: &str, value: T) -> QueryResult<()> {
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(QueryError::new(
                "Document does not support empty key",
                ErrorKind::InvalidFieldName,
            ));
        }
        self.data = self.data.update(key.to_string(), value.into());
        Ok(())
    }

    /// Returns the value for `key`, or [Value::Null] when nothing is found.
    ///
    /// A literal key wins. Otherwise the key is split on the field separator and
    /// resolved level by level: embedded documents are descended into, a numeric
    /// segment indexes into an array, and any other segment applied to an array
    /// is resolved against every element and the results are flattened.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mealquery::doc;
    /// use mealquery::common::Value;
    ///
    /// let recipe = doc! {
    ///     nutrition: { calories: 420 },
    ///     tags: [{ name: "quick" }, { name: "vegan" }],
    /// };
    /// assert_eq!(recipe.get("nutrition.calories").unwrap(), Value::from(420));
    /// assert_eq!(
    ///     recipe.get("tags.name").unwrap(),
    ///     Value::from(vec!["quick", "vegan"])
    /// );
    /// ```
    pub fn get(&self, key: &str) -> QueryResult<Value> {
        match self.data.get(key) {
            Some(value) => Ok(value.clone()),
            None => {
                if key.contains(FIELD_SEPARATOR) {
                    self.get_by_embedded_key(key)
                } else {
                    Ok(Value::Null)
                }
            }
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Removes the literal `key` from this document.
    pub fn remove(&mut self, key: &str) {
        self.data = self.data.without(key);
    }

    /// Iterates top-level entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.data.keys()
    }

    pub(crate) fn to_pretty_json(&self, indent: usize) -> String {
        if self.data.is_empty() {
            return "{}".to_string();
        }

        let estimated_size = self.data.len() * 30 + indent * 2;
        let mut json_string = String::with_capacity(estimated_size);

        json_string.push_str("{\n");
        let indent_str = " ".repeat(indent + 2);
        for (key, value) in self.data.iter() {
            json_string.push_str(&format!(
                "{}\"{}\": {},\n",
                indent_str,
                key,
                value.to_pretty_json(indent + 2)
            ));
        }

        json_string.pop();
        json_string.pop();
        json_string.push_str(&format!("\n{}}}", " ".repeat(indent)));
        json_string
    }

    fn get_by_embedded_key(&self, key: &str) -> QueryResult<Value> {
        let splits: Vec<&str> = key.split(FIELD_SEPARATOR).collect();

        let first = splits[0];
        if first.is_empty() {
            log::error!("Invalid field path {}", key);
            return Err(QueryError::new(
                &format!("Invalid field path {}", key),
                ErrorKind::InvalidFieldName,
            ));
        }

        // get current level value and scan to next level using remaining keys
        self.recursive_get(self.data.get(first), &splits[1..])
    }

    fn recursive_get(&self, value: Option<&Value>, splits: &[&str]) -> QueryResult<Value> {
        let value = match value {
            None => return Ok(Value::Null),
            Some(v) => v,
        };

        if splits.is_empty() {
            return Ok(value.clone());
        }

        let key = splits[0];
        if key.is_empty() {
            log::error!("Field path contains an empty segment");
            return Err(QueryError::new(
                "Field path contains an empty segment",
                ErrorKind::InvalidFieldName,
            ));
        }

        match value {
            Value::Document(obj) => self.recursive_get(obj.data.get(key), &splits[1..]),
            Value::Array(arr) => {
                if let Ok(index) = key.parse::<usize>() {
                    // out of range index resolves to nothing, like a missing key
                    self.recursive_get(arr.get(index), &splits[1..])
                } else {
                    self.decompose(arr, splits)
                }
            }
            _ => Ok(Value::Null),
        }
    }

    fn decompose(&self, arr: &[Value], splits: &[&str]) -> QueryResult<Value> {
        let mut items: Vec<Value> = Vec::with_capacity(arr.len());

        for item in arr {
            let result = self.recursive_get(Some(item), splits)?;
            match result {
                Value::Null => {}
                Value::Array(values) => {
                    for v in values {
                        push_unique(&mut items, v);
                    }
                }
                value => push_unique(&mut items, value),
            }
        }
        Ok(Value::Array(items))
    }
}

fn push_unique(items: &mut Vec<Value>, value: Value) {
    if !items.contains(&value) {
        items.push(value);
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_pretty_json(0))
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_pretty_json(0))
    }
}

impl FromIterator<(String, Value)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Document {
            data: iter.into_iter().collect(),
        }
    }
}

pub fn normalize(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// Creates a [Document] with JSON-like syntax.
///
/// # Examples
///
/// ```rust
/// use mealquery::doc;
///
/// let empty = doc! {};
/// assert!(empty.is_empty());
///
/// let recipe = doc! {
///     name: "Lentil soup",
///     "prepTime": 25,
///     nutrition: { calories: 310 },
///     tags: ["vegan", "soup"],
/// };
/// assert_eq!(recipe.size(), 4);
/// ```
#[macro_export]
macro_rules! doc {
    ({}) => {
        $crate::common::Document::new()
    };

    () => {
        $crate::common::Document::new()
    };

    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::doc!($($key : $value),*)
    };

    ($($key:tt : $value:tt),* $(,)?) => {
        {
            let mut doc = $crate::common::Document::new();
            $(
                doc.put(&$crate::common::normalize(stringify!($key)), $crate::doc_value!($value))
                    .expect(&format!("Failed to put value {} in document", stringify!($value)));
            )*
            doc
        }
    };
}

/// Helper macro to convert values for the doc! macro.
#[macro_export]
macro_rules! doc_value {
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
    };

    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}
