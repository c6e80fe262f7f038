//! # Error Handling
//!
//! `AppError` covers document loading, `$ref` resolution, validation,
//! settings and HTTP transport failures.

use derive_more::{Display, From};

/// Errors raised by the library.
///
/// `From<String>` produces `General`; the other string variants are built explicitly.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Reading a document or env file failed.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// JSON (de)serialization failure.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// YAML parsing failure.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// Transport-level HTTP failure (connection, timeout, body read).
    #[cfg(feature = "client")]
    #[display("HTTP Error: {_0}")]
    Http(ureq::Error),

    /// Settings could not be loaded or parsed.
    #[from(ignore)]
    #[display("Config Error: {_0}")]
    Config(String),

    /// The API description lacks a required top-level section.
    #[from(ignore)]
    #[display("Malformed Document: {_0}")]
    MalformedDocument(String),

    /// A definition, path, method, status code or `$ref` target does not exist.
    #[from(ignore)]
    #[display("Not Found: {_0}")]
    NotFound(String),

    /// A `$ref` was revisited while it was still being expanded.
    #[from(ignore)]
    #[display("Cyclic Reference: {_0}")]
    CyclicReference(String),

    /// A resolved schema was rejected by the JSON Schema compiler.
    #[from(ignore)]
    #[display("Invalid Schema: {_0}")]
    InvalidSchema(String),

    /// Anything without a dedicated variant.
    #[display("General Error: {_0}")]
    General(String),
}

impl AppError {
    /// Returns true for the lookup and shape errors raised while resolving schemas.
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            AppError::MalformedDocument(_) | AppError::NotFound(_) | AppError::CyclicReference(_)
        )
    }
}

impl std::error::Error for AppError {}

/// Result alias used throughout the crate.
pub type AppResult<T> = Result<T, AppError>;
