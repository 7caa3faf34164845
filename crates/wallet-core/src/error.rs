//! Error types for the wallet core library.
//!
//! This module provides the crate-wide error type [`enum@Error`] that covers
//! every failure mode of the validation, normalization, and signature
//! verification layers.
//!
//! # Error Categories
//!
//! - **Validation errors**: wrong type, wrong size, or malformed content
//! - **Input errors**: missing required properties on a public entrypoint call
//! - **Recovery errors**: public key recovery failures (absorbed by the
//!   verification entrypoint, never surfaced from it)
//! - **Assertion errors**: aborts raised by the assertion engine
//!
//! # Example
//!
//! ```
//! use evm_wallet_core::Error;
//!
//! fn example() -> Result<(), Error> {
//!     let err = Error::InvalidLength("address must be 40 hex characters".to_string());
//!     assert!(matches!(err, Error::InvalidLength(_)));
//!     Ok(())
//! }
//! ```

use core::result::Result as CoreResult;

use hex::FromHexError;
use thiserror::Error;

/// The main error type for the wallet core library.
///
/// Validators fail fast with one of the validation variants; each message
/// names the exact invariant that was violated so callers can branch on the
/// error kind or surface the message as-is.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    /// A value had the wrong primitive type or shape.
    #[error("invalid type: {0}")]
    InvalidType(String),

    /// A value had the wrong size.
    #[error("invalid length: {0}")]
    InvalidLength(String),

    /// A value was syntactically malformed.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    // =========================================================================
    // Input Errors
    // =========================================================================
    /// A required property was missing from a public entrypoint argument.
    #[error("missing required property: {0}")]
    MissingRequiredProperty(String),

    // =========================================================================
    // Recovery Errors
    // =========================================================================
    /// Public key recovery from a signed message failed.
    ///
    /// The top-level verification entrypoint absorbs this variant and turns
    /// it into a warning plus a `false` result.
    #[error("public key recovery failed: {0}")]
    RecoveryFailure(String),

    // =========================================================================
    // Assertion Errors
    // =========================================================================
    /// A high-severity assertion evaluated to false.
    #[error("{0}")]
    AssertionFailed(String),

    // =========================================================================
    // Arithmetic Errors
    // =========================================================================
    /// A checked big-number unit conversion overflowed.
    #[error("numeric overflow: {0}")]
    Overflow(String),
}

impl From<FromHexError> for Error {
    fn from(err: FromHexError) -> Self {
        Error::InvalidFormat(err.to_string())
    }
}

/// A specialized [`Result`] type for wallet core operations.
///
/// This type alias is used throughout the library to avoid having to
/// specify the error type explicitly.
pub type Result<T> = CoreResult<T, Error>;
