//! # Resolver Module
//!
//! Expands `$ref` pointers inside an API description so that a generic
//! JSON Schema validator can consume the result without knowing anything
//! about the surrounding document.
//!
//! Handles:
//! - Definition lookup (`definitions` or `components.schemas`).
//! - Response schema lookup by path, method and status code.
//! - Request body schema lookup (Swagger `in: body` or OpenAPI `requestBody`).
//! - Cycle detection along the active expansion chain.

use crate::error::{AppError, AppResult};
use crate::oas::document::ApiDocument;
use crate::oas::ref_utils::{build_local_pointer, parse_local_pointer};
use indexmap::IndexSet;
use serde_json::{Map, Value};
use std::fmt::Display;
use tracing::debug;

/// Resolves schemas out of a borrowed, read-only document.
///
/// Every call builds a fresh `Value`; the document is never modified, so a
/// resolver can be shared freely between threads.
#[derive(Debug, Clone, Copy)]
pub struct SchemaResolver<'a> {
    document: &'a ApiDocument,
}

impl<'a> SchemaResolver<'a> {
    /// Creates a resolver over `document`.
    pub fn new(document: &'a ApiDocument) -> Self {
        SchemaResolver { document }
    }

    /// The underlying document.
    pub fn document(&self) -> &'a ApiDocument {
        self.document
    }

    /// Returns the fully resolved schema of a named type definition.
    pub fn definition_schema(&self, name: &str) -> AppResult<Value> {
        let fragment = self.document.definitions().get(name).ok_or_else(|| {
            AppError::NotFound(format!("definition '{}' does not exist", name))
        })?;

        let own_pointer = build_local_pointer(
            self.document
                .definitions_section()
                .segments()
                .iter()
                .copied()
                .chain(std::iter::once(name)),
        );
        let mut expanding = IndexSet::new();
        expanding.insert(own_pointer);

        let schema = self.resolve_with(fragment, &mut expanding)?;
        debug!("Retrieved definition schema for: {}", name);
        Ok(schema)
    }

    /// Returns the fully resolved schema documented for a response.
    ///
    /// Path and method must match the document's keys literally.
    pub fn response_schema(
        &self,
        path: &str,
        method: &str,
        status: impl Display,
    ) -> AppResult<Value> {
        let status = status.to_string();
        self.response_body_schema(path, method, &status)?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "response {} of {} {} has no body schema",
                    status, method, path
                ))
            })
    }

    /// Like [`Self::response_schema`], but a documented response without a body is `Ok(None)`.
    pub fn response_body_schema(
        &self,
        path: &str,
        method: &str,
        status: impl Display,
    ) -> AppResult<Option<Value>> {
        let status = status.to_string();
        let (entry, wrapped) = self.response_entry(path, method, &status)?;

        let Some(schema) = body_schema_of_response(entry, wrapped) else {
            return Ok(None);
        };
        let schema = self.resolve(schema)?;
        debug!(
            "Retrieved response schema for: {} {} [{}]",
            method, path, status
        );
        Ok(Some(schema))
    }

    /// Returns the fully resolved request body schema of an operation.
    pub fn request_schema(&self, path: &str, method: &str) -> AppResult<Value> {
        self.request_body_schema(path, method)?.ok_or_else(|| {
            AppError::NotFound(format!("{} {} declares no request body", method, path))
        })
    }

    /// Like [`Self::request_schema`], but an operation without a body is `Ok(None)`.
    pub fn request_body_schema(&self, path: &str, method: &str) -> AppResult<Option<Value>> {
        let (path_item, operation) = self.operation(path, method)?;

        for param in self.parameters(path_item, operation)? {
            if param.get("in").and_then(Value::as_str) == Some("body") {
                return match param.get("schema") {
                    Some(schema) => self.resolve(schema).map(Some),
                    None => Ok(None),
                };
            }
        }

        if let Some(body) = operation.get("requestBody") {
            let body = self.deref_shallow(body)?;
            if let Some(schema) = body.get("content").and_then(json_media_schema) {
                return self.resolve(schema).map(Some);
            }
        }

        Ok(None)
    }

    /// Names of the required parameters of an operation (path-level first).
    pub fn required_parameters(&self, path: &str, method: &str) -> AppResult<Vec<String>> {
        let (path_item, operation) = self.operation(path, method)?;
        let mut names: IndexSet<String> = IndexSet::new();
        for param in self.parameters(path_item, operation)? {
            let required = param
                .get("required")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            if let (true, Some(name)) = (required, param.get("name").and_then(Value::as_str)) {
                names.insert(name.to_string());
            }
        }
        Ok(names.into_iter().collect())
    }

    /// True when `paths[path][method]` exists.
    pub fn operation_documented(&self, path: &str, method: &str) -> bool {
        self.operation(path, method).is_ok()
    }

    /// True when a response entry exists for `status`.
    pub fn response_documented(&self, path: &str, method: &str, status: impl Display) -> bool {
        self.response_entry(path, method, &status.to_string()).is_ok()
    }

    /// Body schema of the first status in `statuses` the operation documents.
    ///
    /// Returns the matched status with its schema (`None` for a response without
    /// a body), or `Ok(None)` when neither the operation nor any of the statuses
    /// is documented. Broken or cyclic references inside the entry still fail.
    pub fn first_documented_response(
        &self,
        path: &str,
        method: &str,
        statuses: &[&str],
    ) -> AppResult<Option<(String, Option<Value>)>> {
        let operation = match self.operation(path, method) {
            Ok((_, operation)) => operation,
            Err(AppError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };
        let (responses, wrapped) = responses_of(operation);
        let Some((status, entry)) = statuses
            .iter()
            .find_map(|status| responses.get(*status).map(|entry| (*status, entry)))
        else {
            return Ok(None);
        };

        let entry = self.deref_shallow(entry)?;
        let schema = body_schema_of_response(entry, wrapped)
            .map(|schema| self.resolve(schema))
            .transpose()?;
        Ok(Some((status.to_string(), schema)))
    }

    /// Resolves every `$ref` inside `fragment`, returning a new tree.
    pub fn resolve(&self, fragment: &Value) -> AppResult<Value> {
        let mut expanding = IndexSet::new();
        self.resolve_with(fragment, &mut expanding)
    }

    /// Resolves the target of a local pointer, e.g. `#/definitions/Pet`.
    pub fn resolve_pointer(&self, pointer: &str) -> AppResult<Value> {
        self.resolve(&Value::Object(Map::from_iter([(
            "$ref".to_string(),
            Value::String(pointer.to_string()),
        )])))
    }

    /// Walks the document to the raw (unresolved) value a pointer addresses.
    pub fn lookup(&self, pointer: &str) -> AppResult<&'a Value> {
        let segments = parse_local_pointer(pointer)?;
        segments
            .iter()
            .try_fold(self.document.root(), |node, segment| match node {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            })
            .ok_or_else(|| {
                AppError::NotFound(format!("$ref target '{}' does not exist", pointer))
            })
    }

    fn resolve_with(&self, fragment: &Value, expanding: &mut IndexSet<String>) -> AppResult<Value> {
        match fragment {
            Value::Object(map) => {
                if let Some(reference) = map.get("$ref") {
                    let pointer = reference.as_str().ok_or_else(|| {
                        AppError::NotFound(format!("$ref must be a pointer string, got {}", reference))
                    })?;
                    return self.expand(pointer, expanding);
                }

                let mut resolved = Map::with_capacity(map.len());
                for (key, value) in map {
                    resolved.insert(key.clone(), self.resolve_with(value, expanding)?);
                }
                Ok(Value::Object(resolved))
            }
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve_with(item, expanding))
                .collect::<AppResult<Vec<_>>>()
                .map(Value::Array),
            scalar => Ok(scalar.clone()),
        }
    }

    fn expand(&self, pointer: &str, expanding: &mut IndexSet<String>) -> AppResult<Value> {
        if let Some(start) = expanding.get_index_of(pointer) {
            let chain: Vec<&str> = expanding
                .iter()
                .skip(start)
                .map(String::as_str)
                .chain(std::iter::once(pointer))
                .collect();
            return Err(AppError::CyclicReference(chain.join(" -> ")));
        }

        let target = self.lookup(pointer)?;
        expanding.insert(pointer.to_string());
        let resolved = self.resolve_with(target, expanding);
        expanding.pop();
        resolved
    }

    /// Follows `$ref`s at the top level only (Path Items, Responses, Parameters).
    fn deref_shallow(&self, value: &'a Value) -> AppResult<&'a Value> {
        let mut current = value;
        let mut seen: IndexSet<&'a str> = IndexSet::new();
        while let Some(reference) = current.get("$ref") {
            let pointer = reference.as_str().ok_or_else(|| {
                AppError::NotFound(format!("$ref must be a pointer string, got {}", reference))
            })?;
            if !seen.insert(pointer) {
                let chain: Vec<&str> = seen.iter().copied().chain(std::iter::once(pointer)).collect();
                return Err(AppError::CyclicReference(chain.join(" -> ")));
            }
            current = self.lookup(pointer)?;
        }
        Ok(current)
    }

    fn operation(&self, path: &str, method: &str) -> AppResult<(&'a Value, &'a Value)> {
        let path_item = self
            .document
            .paths()
            .get(path)
            .ok_or_else(|| AppError::NotFound(format!("path '{}' is not documented", path)))?;
        let path_item = self.deref_shallow(path_item)?;
        let operation = path_item.get(method).ok_or_else(|| {
            AppError::NotFound(format!(
                "method '{}' is not documented for path '{}'",
                method, path
            ))
        })?;
        Ok((path_item, operation))
    }

    /// The response entry for `status`, and whether it sits under a `responses` wrapper.
    fn response_entry(
        &self,
        path: &str,
        method: &str,
        status: &str,
    ) -> AppResult<(&'a Value, bool)> {
        let (_, operation) = self.operation(path, method)?;
        let (responses, wrapped) = responses_of(operation);
        let entry = responses.get(status).ok_or_else(|| {
            AppError::NotFound(format!(
                "response {} is not documented for {} {}",
                status, method, path
            ))
        })?;
        Ok((self.deref_shallow(entry)?, wrapped))
    }

    fn parameters(&self, path_item: &'a Value, operation: &'a Value) -> AppResult<Vec<&'a Value>> {
        let declared = [path_item, operation]
            .into_iter()
            .filter_map(|holder| holder.get("parameters").and_then(Value::as_array))
            .flatten();
        declared.map(|param| self.deref_shallow(param)).collect()
    }
}

/// The status map of an operation: its `responses` wrapper, or the operation itself
/// in the compact `status -> schema` shape.
fn responses_of(operation: &Value) -> (&Value, bool) {
    match operation.get("responses") {
        Some(responses) => (responses, true),
        None => (operation, false),
    }
}

/// Picks the body schema out of a (dereferenced) response entry.
///
/// Under a `responses` wrapper the entry is a Response Object and may have no
/// body. In the compact shape the entry is the schema itself.
fn body_schema_of_response(entry: &Value, wrapped: bool) -> Option<&Value> {
    if !wrapped {
        return Some(entry);
    }
    if let Some(schema) = entry.get("schema") {
        return Some(schema);
    }
    entry.get("content").and_then(json_media_schema)
}

/// Schema of the preferred media type in an OpenAPI `content` map.
fn json_media_schema(content: &Value) -> Option<&Value> {
    let media = content.as_object()?;
    let chosen = media
        .get("application/json")
        .or_else(|| {
            media
                .iter()
                .find(|(name, _)| name.contains("json"))
                .map(|(_, v)| v)
        })
        .or_else(|| media.values().next())?;
    chosen.get("schema")
}
