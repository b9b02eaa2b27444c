//! Configuration Error Types
//!
//! Structured errors using `exn` for automatic location tracking, matching
//! the truncation crate.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// An explicitly requested config file does not exist.
    #[display("config file not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// The config file extension isn't a format we can read.
    #[display("unsupported config format: {}", _0.display())]
    UnsupportedFormat(#[error(not(source))] PathBuf),
    /// A value in the file or environment has the wrong shape.
    #[display("invalid configuration")]
    InvalidConfig,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Config has to be fixed by a human first.
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_display() {
        assert_eq!(
            ErrorKind::NotFound(PathBuf::from("/etc/marktrim.toml")).to_string(),
            "config file not found: /etc/marktrim.toml"
        );
        assert_eq!(
            ErrorKind::UnsupportedFormat(PathBuf::from("marktrim.ini")).to_string(),
            "unsupported config format: marktrim.ini"
        );
        assert_eq!(ErrorKind::InvalidConfig.to_string(), "invalid configuration");
    }

    #[test]
    fn error_kind_retryable() {
        assert!(!ErrorKind::InvalidConfig.is_retryable());
    }
}
