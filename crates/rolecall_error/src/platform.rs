//! Chat platform error types.

/// Chat platform error conditions.
///
/// Raised by role mutation, role listing, and command registration calls.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum PlatformErrorKind {
    /// The platform API rejected or failed the request.
    #[display("Platform API error: {_0}")]
    Api(String),

    /// Bot lacks required permissions for an operation.
    #[display("Insufficient permissions: {_0}")]
    InsufficientPermissions(String),

    /// Identifier is not a valid platform snowflake.
    #[display("Invalid ID: {_0}")]
    InvalidId(String),

    /// Connection to the platform gateway failed.
    #[display("Connection failed: {_0}")]
    Connection(String),
}

/// Chat platform error with source location tracking.
///
/// # Example
/// ```
/// use rolecall_error::{PlatformError, PlatformErrorKind};
///
/// let err = PlatformError::new(PlatformErrorKind::InvalidId("abc".into()));
/// assert_eq!(err.kind(), &PlatformErrorKind::InvalidId("abc".into()));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Platform Error: {} at line {} in {}", kind, line, file)]
pub struct PlatformError {
    kind: PlatformErrorKind,
    line: u32,
    file: &'static str,
}

impl PlatformError {
    /// Create a new PlatformError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PlatformErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// The kind of error that occurred.
    pub fn kind(&self) -> &PlatformErrorKind {
        &self.kind
    }
}
