// field path constants
pub const FIELD_SEPARATOR: &str = ".";

// sort constants
pub const DEFAULT_SORT_FIELD: &str = "createdAt";
pub const SORT_DESC: &str = "desc";

// pagination constants
pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 20;

// document store operators
pub const OP_AND: &str = "$and";
pub const OP_OR: &str = "$or";
pub const OP_REGEX: &str = "$regex";
pub const OP_OPTIONS: &str = "$options";
pub const OP_GTE: &str = "$gte";
pub const OP_LTE: &str = "$lte";
pub const OP_IN: &str = "$in";
pub const OP_ALL: &str = "$all";
pub const OP_TEXT: &str = "$text";
pub const OP_SEARCH: &str = "$search";
pub const OP_TYPE: &str = "$type";
pub const TYPE_NUMBER: &str = "number";
pub const TYPE_DATE: &str = "date";
pub const CASE_INSENSITIVE_OPTION: &str = "i";

// regex cache
pub const REGEX_CACHE_CAPACITY: usize = 256;
