use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;
use std::sync::Arc;

/// Error kinds for query building and evaluation.
///
/// Absent search parameters are never errors; these kinds describe input that
/// was present but unusable, or a filter that cannot be evaluated.
///
/// # Examples
///
/// ```rust
/// use mealquery::errors::{ErrorKind, QueryError, QueryResult};
///
/// fn example() -> QueryResult<()> {
///     Err(QueryError::new("Invalid date bound", ErrorKind::ValidationError))
/// }
/// assert!(example().is_err());
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// Error during filter evaluation or construction
    FilterError,
    /// A present input value could not be used (e.g. an unparseable date)
    ValidationError,
    /// Invalid field name or path
    InvalidFieldName,
    /// Invalid query configuration
    ConfigError,
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::FilterError => write!(f, "Filter error"),
            ErrorKind::ValidationError => write!(f, "Validation error"),
            ErrorKind::InvalidFieldName => write!(f, "Invalid field name"),
            ErrorKind::ConfigError => write!(f, "Configuration error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Error type for all fallible query operations.
///
/// `QueryError` carries a message, a kind, an optional cause and the backtrace
/// captured where it was raised.
///
/// # Examples
///
/// ```rust
/// use mealquery::errors::{ErrorKind, QueryError};
///
/// let cause = QueryError::new("input contains no date", ErrorKind::ValidationError);
/// let err = QueryError::new_with_cause("Invalid start date", ErrorKind::ValidationError, cause);
/// assert!(err.cause().is_some());
/// ```
#[derive(Clone)]
pub struct QueryError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<QueryError>>,
    backtrace: Arc<Backtrace>,
}

impl QueryError {
    /// Creates a new `QueryError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        QueryError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Arc::new(Backtrace::new()),
        }
    }

    /// Creates a new `QueryError` that keeps `cause` in its error chain.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: QueryError) -> Self {
        QueryError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Arc::new(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&QueryError> {
        self.cause.as_deref()
    }
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // message and stack trace, or message followed by the cause chain
        match &self.cause {
            Some(cause) => write!(f, "{} ({})\nCaused by: {:?}", self.message, self.error_kind, cause),
            None => write!(f, "{} ({})\n{:?}", self.message, self.error_kind, self.backtrace),
        }
    }
}

impl Error for QueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// Shorthand for `Result<T, QueryError>`.
pub type QueryResult<T> = Result<T, QueryError>;

impl From<chrono::ParseError> for QueryError {
    fn from(err: chrono::ParseError) -> Self {
        QueryError::new(
            &format!("Date parsing error: {}", err),
            ErrorKind::ValidationError,
        )
    }
}

impl From<regex::Error> for QueryError {
    fn from(err: regex::Error) -> Self {
        QueryError::new(
            &format!("Invalid regex pattern: {}", err),
            ErrorKind::FilterError,
        )
    }
}

impl From<String> for QueryError {
    fn from(msg: String) -> Self {
        QueryError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for QueryError {
    fn from(msg: &str) -> Self {
        QueryError::new(msg, ErrorKind::InternalError)
    }
}
