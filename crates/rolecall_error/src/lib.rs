//! Error types for the Rolecall role bot.
//!
//! This crate provides the error types shared by every Rolecall crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use rolecall_error::{RolecallResult, StoreError, StoreErrorKind};
//!
//! fn load() -> RolecallResult<Vec<String>> {
//!     Err(StoreError::new(StoreErrorKind::Unavailable("pool exhausted".into())))?
//! }
//!
//! assert!(load().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod platform;
mod store;

pub use config::ConfigError;
pub use error::{RolecallError, RolecallErrorKind, RolecallResult};
pub use platform::{PlatformError, PlatformErrorKind};
pub use store::{StoreError, StoreErrorKind};
