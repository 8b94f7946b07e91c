//! Error types for envelope and dictionary operations
//!
//! Every failure is synchronous and returned to the immediate caller.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use thiserror::Error;

/// Result type alias for envelope operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the response envelope and code dictionary
///
/// | Variant | Raised by |
/// |---------|-----------|
/// | `UnknownCode` | symbolic/numeric translation, title/description lookup |
/// | `InvalidDictionary` | dictionary load, validation, reconfigure, inject |
/// | `InvalidMerge` | payload merge with mismatched shapes |
/// | `Config` | `envelope.toml` read or parse |
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Code is not registered, or is not a well-formed status code
    #[error("unknown response code: {code}")]
    UnknownCode {
        /// The code as the caller supplied it
        code: String,
    },

    /// Dictionary source is malformed or could not be read
    #[error("invalid dictionary: {reason}")]
    InvalidDictionary {
        /// What was wrong with the source
        reason: String,
    },

    /// Payload shapes cannot be merged
    #[error("invalid merge: cannot merge {actual} into {expected}")]
    InvalidMerge {
        /// Shape of the data already held
        expected: String,
        /// Shape of the incoming value
        actual: String,
    },

    /// Configuration file could not be read or parsed
    #[error("config error: {reason}")]
    Config {
        /// What went wrong
        reason: String,
    },
}

impl Error {
    /// Create an `UnknownCode` error
    pub fn unknown_code(code: impl ToString) -> Self {
        Error::UnknownCode {
            code: code.to_string(),
        }
    }

    /// Create an `InvalidDictionary` error
    pub fn invalid_dictionary(reason: impl Into<String>) -> Self {
        Error::InvalidDictionary {
            reason: reason.into(),
        }
    }

    /// Create an `InvalidMerge` error
    pub fn invalid_merge(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Error::InvalidMerge {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a `Config` error
    pub fn config(reason: impl Into<String>) -> Self {
        Error::Config {
            reason: reason.into(),
        }
    }

    /// Check if this is an `UnknownCode` error
    pub fn is_unknown_code(&self) -> bool {
        matches!(self, Error::UnknownCode { .. })
    }

    /// Check if this is an `InvalidDictionary` error
    pub fn is_invalid_dictionary(&self) -> bool {
        matches!(self, Error::InvalidDictionary { .. })
    }

    /// Check if this is an `InvalidMerge` error
    pub fn is_invalid_merge(&self) -> bool {
        matches!(self, Error::InvalidMerge { .. })
    }
}
