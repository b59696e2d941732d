/// Specifies the direction for sorting documents.
///
/// Parsed from the loosely-typed `sortOrder` request parameter: only `"desc"`
/// selects [SortOrder::Descending], every other input sorts ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortOrder {
    /// Sort in ascending order (smallest to largest, A-Z, oldest to newest)
    #[cfg_attr(feature = "serde", serde(rename = "asc"))]
    Ascending,
    /// Sort in descending order (largest to smallest, Z-A, newest to oldest)
    #[cfg_attr(feature = "serde", serde(rename = "desc"))]
    Descending,
}

impl SortOrder {
    /// Parses a request's sort order. Absent or unrecognised input is ascending.
    pub fn parse(sort_order: Option<&str>) -> SortOrder {
        match sort_order {
            Some(order) if order.trim().eq_ignore_ascii_case(crate::common::SORT_DESC) => {
                SortOrder::Descending
            }
            _ => SortOrder::Ascending,
        }
    }

    /// The store's numeric direction: `1` ascending, `-1` descending.
    pub fn direction(&self) -> i64 {
        match self {
            SortOrder::Ascending => 1,
            SortOrder::Descending => -1,
        }
    }
}
