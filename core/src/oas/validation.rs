//! # Schema Validation
//!
//! Hands resolved schemas to the `jsonschema` crate. Swagger 2.0 schemas are
//! a Draft 4 dialect, so every schema is compiled as Draft 4.

use crate::error::{AppError, AppResult};
use crate::oas::document::ApiDocument;
use crate::oas::resolver::SchemaResolver;
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;
use std::fmt::Display;
use std::path::Path;
use tracing::{debug, error, warn};

/// Outcome of validating one instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// The instance satisfies the schema.
    Valid,
    /// One message per violation, `"<instance path>: <message>"`.
    Invalid(Vec<String>),
}

impl Validation {
    /// True for [`Validation::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    /// The individual violation messages (empty when valid).
    pub fn errors(&self) -> &[String] {
        match self {
            Validation::Valid => &[],
            Validation::Invalid(errors) => errors,
        }
    }

    /// All violations joined with `"; "`, or `None` when valid.
    pub fn message(&self) -> Option<String> {
        match self {
            Validation::Valid => None,
            Validation::Invalid(errors) => Some(errors.join("; ")),
        }
    }
}

/// Validates payloads against schemas drawn from one API description.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    document: ApiDocument,
}

impl SchemaValidator {
    /// Wraps a loaded document.
    pub fn new(document: ApiDocument) -> Self {
        SchemaValidator { document }
    }

    /// Loads the description at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        ApiDocument::from_path(path).map(Self::new)
    }

    /// The underlying document.
    pub fn document(&self) -> &ApiDocument {
        &self.document
    }

    /// A resolver borrowing the document.
    pub fn resolver(&self) -> SchemaResolver<'_> {
        SchemaResolver::new(&self.document)
    }

    /// Validates `data` against an already resolved `schema`.
    pub fn validate(&self, data: &Value, schema: &Value) -> AppResult<Validation> {
        validate_against(data, schema)
    }

    /// Validates `data` against a named definition.
    pub fn validate_definition(&self, data: &Value, name: &str) -> AppResult<Validation> {
        let schema = self.resolver().definition_schema(name)?;
        validate_against(data, &schema)
    }

    /// Validates a response body.
    ///
    /// The exact status is tried first, then `default`. Responses the document does
    /// not describe, or describes without a body, are accepted with a warning.
    pub fn validate_response(
        &self,
        data: &Value,
        path: &str,
        method: &str,
        status: impl Display,
    ) -> AppResult<Validation> {
        let status = status.to_string();
        let documented = self.resolver().first_documented_response(
            path,
            method,
            &[status.as_str(), "default"],
        )?;

        match documented {
            Some((_, Some(schema))) => validate_against(data, &schema),
            Some((key, None)) => {
                debug!(
                    "Response {} of {} {} documents no body",
                    key,
                    method.to_uppercase(),
                    path
                );
                Ok(Validation::Valid)
            }
            None => {
                warn!(
                    "No schema defined for {} {} [{}]",
                    method.to_uppercase(),
                    path,
                    status
                );
                Ok(Validation::Valid)
            }
        }
    }

    /// Validates a request body.
    pub fn validate_request(&self, data: &Value, path: &str, method: &str) -> AppResult<Validation> {
        let resolver = self.resolver();
        if !resolver.operation_documented(path, method) {
            warn!(
                "No request schema defined for {} {}",
                method.to_uppercase(),
                path
            );
            return Ok(Validation::Valid);
        }

        match resolver.request_body_schema(path, method)? {
            Some(schema) => validate_against(data, &schema),
            None => {
                warn!(
                    "No request schema defined for {} {}",
                    method.to_uppercase(),
                    path
                );
                Ok(Validation::Valid)
            }
        }
    }
}

/// Compiles `schema` as Draft 4 and validates `data` against it.
pub fn validate_against(data: &Value, schema: &Value) -> AppResult<Validation> {
    let compiled = JSONSchema::options()
        .with_draft(Draft::Draft4)
        .compile(schema)
        .map_err(|e| {
            error!("Invalid schema: {}", e);
            AppError::InvalidSchema(e.to_string())
        })?;

    let outcome = match compiled.validate(data) {
        Ok(()) => Validation::Valid,
        Err(errors) => Validation::Invalid(
            errors
                .map(|e| {
                    let path = e.instance_path.to_string();
                    if path.is_empty() {
                        e.to_string()
                    } else {
                        format!("{}: {}", path, e)
                    }
                })
                .collect(),
        ),
    };

    match outcome.message() {
        Some(message) => error!("Schema validation failed: {}", message),
        None => debug!("Schema validation passed"),
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn petstore() -> SchemaValidator {
        SchemaValidator::new(ApiDocument::petstore().unwrap())
    }

    #[test]
    fn test_valid_pet_definition() {
        let validator = petstore();
        let pet = json!({
            "id": 1234,
            "name": "doggie",
            "photoUrls": ["https://example.com/a.jpg"],
            "category": {"id": 1, "name": "Dogs"},
            "tags": [{"id": 7, "name": "friendly"}],
            "status": "available"
        });
        assert_eq!(validator.validate_definition(&pet, "Pet").unwrap(), Validation::Valid);
    }

    #[test]
    fn test_missing_required_name() {
        let validator = petstore();
        let outcome = validator
            .validate_definition(&json!({"photoUrls": [], "status": "available"}), "Pet")
            .unwrap();
        assert!(!outcome.is_valid());
        assert!(outcome.message().unwrap().to_lowercase().contains("name"));
    }

    #[test]
    fn test_missing_required_photo_urls() {
        let validator = petstore();
        let outcome = validator
            .validate_definition(&json!({"name": "test_pet"}), "Pet")
            .unwrap();
        assert!(outcome.message().unwrap().to_lowercase().contains("photourls"));
    }

    #[test]
    fn test_nested_error_carries_instance_path() {
        let validator = petstore();
        let outcome = validator
            .validate_definition(
                &json!({"name": "x", "photoUrls": [], "tags": [{"id": "seven"}]}),
                "Pet",
            )
            .unwrap();
        assert_eq!(outcome.errors().len(), 1);
        assert!(outcome.errors()[0].starts_with("/tags/0/id: "));
    }

    #[test]
    fn test_invalid_enum_value() {
        let validator = petstore();
        let outcome = validator
            .validate_definition(
                &json!({"name": "x", "photoUrls": [], "status": "invalid_status"}),
                "Pet",
            )
            .unwrap();
        assert!(!outcome.is_valid());
    }

    #[test]
    fn test_response_array_of_pets() {
        let validator = petstore();
        let body = json!([{"name": "a", "photoUrls": []}, {"name": "b", "photoUrls": []}]);
        let outcome = validator
            .validate_response(&body, "/pet/findByStatus", "get", 200)
            .unwrap();
        assert!(outcome.is_valid());

        let bad = json!([{"name": "a"}]);
        let outcome = validator
            .validate_response(&bad, "/pet/findByStatus", "get", 200)
            .unwrap();
        assert!(!outcome.is_valid());
    }

    #[test]
    fn test_inventory_response() {
        let validator = petstore();
        let outcome = validator
            .validate_response(&json!({"available": 3, "sold": 1}), "/store/inventory", "get", 200)
            .unwrap();
        assert!(outcome.is_valid());
        let outcome = validator
            .validate_response(&json!({"available": "many"}), "/store/inventory", "get", 200)
            .unwrap();
        assert!(!outcome.is_valid());
    }

    #[test]
    fn test_undocumented_response_is_accepted() {
        let validator = petstore();
        let body = json!({"anything": true});
        assert!(validator.validate_response(&body, "/pet/{petId}", "get", 404).unwrap().is_valid());
        assert!(validator.validate_response(&body, "/nowhere", "get", 200).unwrap().is_valid());
        assert!(validator.validate_response(&body, "/pet/{petId}", "get", 418).unwrap().is_valid());
    }

    #[test]
    fn test_default_response_fallback() {
        let doc = ApiDocument::load(json!({
            "definitions": {"Error": {"required": ["code"], "properties": {"code": {"type": "integer"}}}},
            "paths": {"/x": {"get": {"responses": {
                "default": {"description": "error", "schema": {"$ref": "#/definitions/Error"}}
            }}}}
        }))
        .unwrap();
        let validator = SchemaValidator::new(doc);
        assert!(!validator.validate_response(&json!({}), "/x", "get", 500).unwrap().is_valid());
        assert!(validator.validate_response(&json!({"code": 5}), "/x", "get", 500).unwrap().is_valid());
    }

    #[test]
    fn test_broken_ref_in_response_is_an_error() {
        let doc = ApiDocument::load(json!({
            "definitions": {},
            "paths": {"/x": {"get": {"responses": {
                "200": {"description": "ok", "schema": {"$ref": "#/definitions/Gone"}}
            }}}}
        }))
        .unwrap();
        let err = SchemaValidator::new(doc)
            .validate_response(&json!({}), "/x", "get", 200)
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m.contains("#/definitions/Gone")));
    }

    #[test]
    fn test_request_validation() {
        let validator = petstore();
        let outcome = validator
            .validate_request(&json!({"photoUrls": []}), "/pet", "post")
            .unwrap();
        assert!(!outcome.is_valid());
        assert!(validator
            .validate_request(&json!({}), "/user/logout", "get")
            .unwrap()
            .is_valid());
    }

    #[test]
    fn test_invalid_schema_is_reported() {
        let err = validate_against(&json!(1), &json!({"type": 12})).unwrap_err();
        assert!(matches!(err, AppError::InvalidSchema(_)));
    }
}
