//! # API Description Module
//!
//! - **document**: Loading and shape checks of Swagger / OpenAPI documents.
//! - **ref_utils**: Local JSON Pointer helpers.
//! - **resolver**: `$ref` expansion and schema lookup.
//! - **validation**: Draft 4 validation of resolved schemas.

pub mod document;
pub(crate) mod ref_utils;
pub mod resolver;
pub mod validation;

pub use document::{ApiDocument, DefinitionsSection};
pub use resolver::SchemaResolver;
pub use validation::{validate_against, SchemaValidator, Validation};
