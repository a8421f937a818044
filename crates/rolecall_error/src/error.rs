//! Top-level error wrapper types.

use crate::{ConfigError, PlatformError, StoreError};

/// Every error a Rolecall operation can produce.
///
/// # Examples
///
/// ```
/// use rolecall_error::{RolecallError, ConfigError};
///
/// let err: RolecallError = ConfigError::new("DATABASE_URL not set").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum RolecallErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Role store error
    #[from(StoreError)]
    Store(StoreError),
    /// Chat platform error
    #[from(PlatformError)]
    Platform(PlatformError),
}

/// Rolecall error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Rolecall Error: {}", _0)]
pub struct RolecallError(Box<RolecallErrorKind>);

impl RolecallError {
    /// Create a new error from a kind.
    pub fn new(kind: RolecallErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RolecallErrorKind {
        &self.0
    }

    /// Whether this error means the role store could not be reached.
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self.kind(), RolecallErrorKind::Store(e) if e.is_unavailable())
    }
}

// Generic From implementation for any type that converts to RolecallErrorKind
impl<T> From<T> for RolecallError
where
    T: Into<RolecallErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Rolecall operations.
pub type RolecallResult<T> = std::result::Result<T, RolecallError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PlatformErrorKind, StoreErrorKind};

    #[test]
    fn test_store_unavailable_is_detected() {
        let err: RolecallError =
            StoreError::new(StoreErrorKind::Unavailable("timed out".into())).into();
        assert!(err.is_store_unavailable());
    }

    #[test]
    fn test_query_error_is_not_unavailable() {
        let err: RolecallError = StoreError::new(StoreErrorKind::Query("syntax".into())).into();
        assert!(!err.is_store_unavailable());
    }

    #[test]
    fn test_platform_error_wraps() {
        let err: RolecallError =
            PlatformError::new(PlatformErrorKind::Api("500".into())).into();
        assert!(matches!(err.kind(), RolecallErrorKind::Platform(_)));
        assert!(format!("{}", err).contains("Platform API error"));
    }

    #[test]
    fn test_location_is_captured() {
        let err = StoreError::new(StoreErrorKind::Migration("bad".into()));
        assert!(err.file.ends_with("error.rs"));
        assert!(err.line > 0);
    }
}
