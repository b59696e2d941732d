use crate::common::{Document, Value};

/// Returns a copy of `filter` without vacuous entries.
///
/// Keys holding `Null`, an empty string or an empty array are dropped. Embedded
/// documents are pruned recursively and dropped if nothing is left in them.
/// Arrays and other leaves are kept as they are. The input is not modified.
///
/// # Examples
///
/// ```rust
/// use mealquery::doc;
/// use mealquery::common::Value;
/// use mealquery::filter::prune_empty;
///
/// let raw = doc! { a: "", b: (Value::Null), c: [], d: { e: (Value::Null) }, f: 1 };
/// assert_eq!(prune_empty(&raw), doc! { f: 1 });
/// ```
pub fn prune_empty(filter: &Document) -> Document {
    filter
        .iter()
        .filter_map(|(key, value)| match value {
            Value::Document(nested) => {
                let pruned = prune_empty(nested);
                if pruned.is_empty() {
                    None
                } else {
                    Some((key.clone(), Value::Document(pruned)))
                }
            }
            value if value.is_vacuous() => None,
            value => Some((key.clone(), value.clone())),
        })
        .collect()
}
