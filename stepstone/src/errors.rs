use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

/// Error kinds for stepstone operations
///
/// This enum represents all possible error types that can occur while
/// registering and applying migrations. Each error kind describes a specific
/// category of failure, enabling precise error handling.
///
/// # Examples
///
/// ```rust,ignore
/// use stepstone::errors::{StepstoneError, ErrorKind, StepstoneResult};
///
/// fn example() -> StepstoneResult<()> {
///     Err(StepstoneError::new("No version detector configured", ErrorKind::MissingVersionDetector))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Version Errors - raised when a version marker cannot be compared
    /// A version marker has an empty or non-numeric segment
    MalformedVersion,

    // Configuration Errors - raised before any filtering occurs
    /// A detector-sourced migration was requested without a configured detector
    MissingVersionDetector,

    // Collaborator Errors - available to callers implementing the two
    // collaborator traits; the sequencer never raises these itself
    /// Error reported by a version detector
    DetectorError,
    /// Error raised by a migration unit while applying
    MigrationError,

    // Validation Errors - actively used in registration checks
    /// Generic validation error
    ValidationError,

    // Generic/Internal Errors - used as fallback
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::MalformedVersion => write!(f, "Malformed version"),
            ErrorKind::MissingVersionDetector => write!(f, "Missing version detector"),
            ErrorKind::DetectorError => write!(f, "Detector error"),
            ErrorKind::MigrationError => write!(f, "Migration error"),
            ErrorKind::ValidationError => write!(f, "Validation error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom stepstone error type.
///
/// `StepstoneError` encapsulates error information including the error message, kind, and optional cause.
/// It supports error chaining and backtraces for debugging.
///
/// # Examples
///
/// ```rust,ignore
/// use stepstone::errors::{StepstoneError, ErrorKind};
///
/// // Create a simple error
/// let err = StepstoneError::new("Malformed version marker", ErrorKind::MalformedVersion);
///
/// // Create an error with a cause
/// let cause = StepstoneError::new("Store read failed", ErrorKind::DetectorError);
/// let err = StepstoneError::new_with_cause("Version detection failed", ErrorKind::DetectorError, cause);
/// ```
///
/// # Type alias
///
/// The `StepstoneResult<T>` type alias is equivalent to `Result<T, StepstoneError>` and is used
/// throughout the codebase for operations that can fail.
#[derive(Clone)]
pub struct StepstoneError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<StepstoneError>>,
    backtrace: Backtrace,
}

impl StepstoneError {
    /// Creates a new `StepstoneError` with the specified message and error kind.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_kind` - The category of error
    ///
    /// # Returns
    ///
    /// A new `StepstoneError` instance.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        StepstoneError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Backtrace::new(),
        }
    }

    /// Creates a new `StepstoneError` with a cause error.
    ///
    /// This creates an error chain where the cause error is preserved for debugging.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_type` - The category of error
    /// * `cause` - The underlying error that caused this error
    ///
    /// # Returns
    ///
    /// A new `StepstoneError` instance with the cause error attached.
    pub fn new_with_cause(message: &str, error_type: ErrorKind, cause: StepstoneError) -> Self {
        StepstoneError {
            message: message.to_string(),
            error_kind: error_type,
            cause: Some(Box::new(cause)),
            backtrace: Backtrace::new(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&Box<StepstoneError>> {
        self.cause.as_ref()
    }
}

impl Display for StepstoneError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for StepstoneError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace),
        }
    }
}

impl Error for StepstoneError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for stepstone operations.
///
/// `StepstoneResult<T>` is shorthand for `Result<T, StepstoneError>`.
/// All fallible stepstone operations return this type.
///
/// # Examples
///
/// ```rust,ignore
/// use stepstone::errors::StepstoneResult;
///
/// fn current_version() -> StepstoneResult<String> {
///     // Return success
///     Ok("0.1".to_string())
///     // Or return error
///     // Err(StepstoneError::new("Store unreachable", ErrorKind::DetectorError))
/// }
/// ```
pub type StepstoneResult<T> = Result<T, StepstoneError>;

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== ErrorKind Tests ====================

    #[test]
    fn test_error_kind_display() {
        assert_eq!(format!("{}", ErrorKind::MalformedVersion), "Malformed version");
        assert_eq!(
            format!("{}", ErrorKind::MissingVersionDetector),
            "Missing version detector"
        );
        assert_eq!(format!("{}", ErrorKind::MigrationError), "Migration error");
    }

    #[test]
    fn test_error_kind_equality() {
        assert_eq!(ErrorKind::MalformedVersion, ErrorKind::MalformedVersion);
        assert_ne!(ErrorKind::MalformedVersion, ErrorKind::ValidationError);
    }

    // ==================== StepstoneError Tests ====================

    #[test]
    fn test_error_new() {
        let err = StepstoneError::new("something failed", ErrorKind::InternalError);
        assert_eq!(err.message(), "something failed");
        assert_eq!(err.kind(), &ErrorKind::InternalError);
        assert!(err.cause().is_none());
    }

    #[test]
    fn test_error_with_cause_chains_source() {
        let cause = StepstoneError::new("store unreachable", ErrorKind::DetectorError);
        let err = StepstoneError::new_with_cause(
            "version detection failed",
            ErrorKind::DetectorError,
            cause,
        );

        assert!(err.cause().is_some());
        assert_eq!(err.cause().unwrap().message(), "store unreachable");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_display_shows_message_only() {
        let err = StepstoneError::new("bad marker", ErrorKind::MalformedVersion);
        assert_eq!(format!("{}", err), "bad marker");
    }

    #[test]
    fn test_error_debug_includes_cause() {
        let cause = StepstoneError::new("inner", ErrorKind::InternalError);
        let err = StepstoneError::new_with_cause("outer", ErrorKind::InternalError, cause);
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("outer"));
        assert!(debug_str.contains("Caused by"));
        assert!(debug_str.contains("inner"));
    }
}
