//! Error type for the length-checked entry points.

use thiserror::Error;

/// Errors raised when untyped byte slices are handed to the cipher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Key slice was not exactly 32 bytes.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Required length.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },
    /// Block slice was not exactly 16 bytes.
    #[error("invalid block length: expected {expected} bytes, got {actual}")]
    InvalidBlockLength {
        /// Required length.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
