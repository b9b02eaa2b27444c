//! Truncation Error Types
//!
//! Only the validating entry point ([`truncate_strict`](crate::truncate_strict))
//! can fail. Errors use `exn` for location tracking, the same as the rest of
//! the workspace.

use derive_more::{Display, Error};

/// A truncation error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for truncation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A closing tag was found while no element was open.
    #[display("unexpected closing tag </{_0}>: no element is open")]
    UnexpectedClose(#[error(not(source))] String),
    /// A closing tag does not match the innermost open element.
    #[display("mismatched closing tag </{found}>, expected </{expected}>")]
    MismatchedClose {
        /// Name of the innermost open element.
        expected: String,
        /// Name found in the closing tag.
        found: String,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Markup either nests or it doesn't, running it again changes nothing.
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_display() {
        assert_eq!(
            ErrorKind::UnexpectedClose("p".to_string()).to_string(),
            "unexpected closing tag </p>: no element is open"
        );
        assert_eq!(
            ErrorKind::MismatchedClose { expected: "b".to_string(), found: "i".to_string() }.to_string(),
            "mismatched closing tag </i>, expected </b>"
        );
    }

    #[test]
    fn error_kind_retryable() {
        assert!(!ErrorKind::UnexpectedClose("p".to_string()).is_retryable());
        assert!(!ErrorKind::MismatchedClose { expected: "b".to_string(), found: "i".to_string() }.is_retryable());
    }
}
