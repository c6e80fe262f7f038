#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use petstore_core::AppError;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// Library error (settings, documents, HTTP transport).
    #[display("{}", _0)]
    Core(AppError),

    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// JSON (de)serialization failure.
    #[display("JSON Error: {}", _0)]
    Json(serde_json::Error),

    /// YAML serialization failure.
    #[display("YAML Error: {}", _0)]
    Yaml(serde_yaml::Error),

    /// A test case expectation did not hold.
    #[from(ignore)]
    #[display("Assertion failed: {}", _0)]
    Assertion(String),

    /// General failure message.
    #[display("Operation failed: {}", _0)]
    General(String),
}

/// Manual implementation of the standard Error trait.
///
/// `General(String)` and `Assertion(String)` hold plain strings, so a derived
/// `source()` would not compile.
impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = CliError::Assertion("expected 200, got 404".into());
        assert_eq!(err.to_string(), "Assertion failed: expected 200, got 404");

        let err: CliError = AppError::NotFound("definition 'Owner'".into()).into();
        assert_eq!(err.to_string(), "Not Found: definition 'Owner'");

        let err: CliError = String::from("boom").into();
        assert!(matches!(err, CliError::General(_)));
    }
}
