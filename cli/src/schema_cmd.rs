//! # Schema Command
//!
//! Prints fully resolved schemas from an API description and optionally
//! validates a JSON file against them.

use crate::error::{CliError, CliResult};
use crate::logging;
use petstore_core::{validate_against, ApiDocument, SchemaResolver, Validation};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Output encodings.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

/// Arguments for the schema command.
#[derive(clap::Args, Debug, Clone)]
pub struct SchemaArgs {
    /// Which schema to resolve.
    #[clap(subcommand)]
    pub target: SchemaTarget,

    /// Swagger/OpenAPI description (defaults to the bundled Petstore).
    #[clap(long, global = true)]
    pub swagger: Option<PathBuf>,

    /// Output encoding.
    #[clap(long, value_enum, default_value = "json", global = true)]
    pub format: OutputFormat,

    /// JSON file to validate against the resolved schema.
    #[clap(long, global = true)]
    pub validate: Option<PathBuf>,
}

/// Schema lookups.
#[derive(clap::Subcommand, Debug, Clone)]
pub enum SchemaTarget {
    /// A named definition, e.g. `Pet`.
    Definition {
        /// Definition name.
        name: String,
    },
    /// The body schema of one documented response.
    Response {
        /// Path template, e.g. `/pet/{petId}`.
        path: String,
        /// Lower-case method.
        method: String,
        /// Status code or `default`.
        status: String,
    },
    /// The body schema of an operation's request.
    Request {
        /// Path template.
        path: String,
        /// Lower-case method.
        method: String,
    },
}

/// Resolves one schema from `document`.
pub fn resolve_target(document: &ApiDocument, target: &SchemaTarget) -> CliResult<Value> {
    let resolver = SchemaResolver::new(document);
    let schema = match target {
        SchemaTarget::Definition { name } => resolver.definition_schema(name)?,
        SchemaTarget::Response {
            path,
            method,
            status,
        } => resolver.response_schema(path, method, status)?,
        SchemaTarget::Request { path, method } => resolver.request_schema(path, method)?,
    };
    Ok(schema)
}

/// Encodes `schema` in the chosen format.
pub fn render(schema: &Value, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(schema)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(schema)?),
    }
}

/// Executes the schema command. Returns `Ok(false)` when `--validate` found violations.
pub fn execute(args: &SchemaArgs) -> CliResult<bool> {
    logging::init_stderr("warn")?;

    let document = match &args.swagger {
        Some(path) => ApiDocument::from_path(path)?,
        None => ApiDocument::petstore()?,
    };
    let schema = resolve_target(&document, &args.target)?;

    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", render(&schema, args.format)?)?;

    let Some(data_path) = &args.validate else {
        return Ok(true);
    };
    let data: Value = serde_json::from_str(&fs::read_to_string(data_path).map_err(|e| {
        CliError::General(format!("Failed to read {:?}: {}", data_path, e))
    })?)?;

    match validate_against(&data, &schema)? {
        Validation::Valid => {
            writeln!(out, "{:?}: valid", data_path)?;
            Ok(true)
        }
        Validation::Invalid(errors) => {
            writeln!(out, "{:?}: {} violation(s)", data_path, errors.len())?;
            for error in errors {
                writeln!(out, "  - {}", error)?;
            }
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petstore_core::AppError;

    #[test]
    fn test_resolve_definition() {
        let doc = ApiDocument::petstore().unwrap();
        let schema = resolve_target(&doc, &SchemaTarget::Definition { name: "Order".into() }).unwrap();
        assert_eq!(schema["properties"]["status"]["enum"][0], "placed");
    }

    #[test]
    fn test_resolve_response_and_request() {
        let doc = ApiDocument::petstore().unwrap();
        let response = resolve_target(
            &doc,
            &SchemaTarget::Response {
                path: "/pet/findByStatus".into(),
                method: "get".into(),
                status: "200".into(),
            },
        )
        .unwrap();
        assert_eq!(response["type"], "array");

        let request = resolve_target(
            &doc,
            &SchemaTarget::Request {
                path: "/store/order".into(),
                method: "post".into(),
            },
        )
        .unwrap();
        assert!(request["properties"].get("petId").is_some());
    }

    #[test]
    fn test_unknown_definition() {
        let doc = ApiDocument::petstore().unwrap();
        let err = resolve_target(&doc, &SchemaTarget::Definition { name: "Owner".into() }).unwrap_err();
        assert!(matches!(err, CliError::Core(AppError::NotFound(_))));
    }

    #[test]
    fn test_render_formats() {
        let schema = serde_json::json!({"type": "string"});
        assert!(render(&schema, OutputFormat::Json).unwrap().contains("\"type\": \"string\""));
        assert_eq!(render(&schema, OutputFormat::Yaml).unwrap().trim(), "type: string");
    }
}
