//! # API Description Document
//!
//! Loads a Swagger 2.0 or OpenAPI 3.x description and checks that the
//! sections the resolver walks are present. The parsed tree is kept as a
//! `serde_json::Value` (insertion ordered) and is never mutated after load.

use crate::error::{AppError, AppResult};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info};

/// The Petstore description bundled with the crate.
const PETSTORE_SWAGGER: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/schemas/swagger.json"
));

/// Where the named type definitions live in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionsSection {
    /// Swagger 2.0 `definitions`.
    Definitions,
    /// OpenAPI 3.x `components.schemas`.
    ComponentsSchemas,
}

impl DefinitionsSection {
    /// Path segments from the document root to the section.
    pub fn segments(&self) -> &'static [&'static str] {
        match self {
            DefinitionsSection::Definitions => &["definitions"],
            DefinitionsSection::ComponentsSchemas => &["components", "schemas"],
        }
    }
}

/// A loaded, read-only API description.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiDocument {
    root: Value,
    section: DefinitionsSection,
}

impl ApiDocument {
    /// Accepts an already parsed document.
    ///
    /// Fails with `MalformedDocument` when the root is not a mapping, when `paths`
    /// is absent, or when neither `definitions` nor `components.schemas` is present.
    pub fn load(root: Value) -> AppResult<Self> {
        let Some(obj) = root.as_object() else {
            return Err(AppError::MalformedDocument(
                "document root must be a mapping".into(),
            ));
        };

        match obj.get("paths") {
            Some(Value::Object(_)) => {}
            Some(_) => {
                return Err(AppError::MalformedDocument(
                    "'paths' must be a mapping".into(),
                ))
            }
            None => {
                return Err(AppError::MalformedDocument(
                    "document missing required 'paths' section".into(),
                ))
            }
        }

        let section = detect_definitions_section(obj)?;
        let doc = ApiDocument { root, section };
        info!("Loaded API description: {}", doc.title());
        Ok(doc)
    }

    /// Parses JSON or YAML text.
    pub fn parse(content: &str) -> AppResult<Self> {
        // YAML is a superset of JSON, so one parser covers both.
        let root: Value = serde_yaml::from_str(content)?;
        Self::load(root)
    }

    /// Reads and parses a description file.
    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        debug!("Loading API description from: {:?}", path);
        if !path.exists() {
            return Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("API description not found: {:?}", path),
            )));
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Loads the bundled Swagger Petstore description.
    pub fn petstore() -> AppResult<Self> {
        let root: Value = serde_json::from_str(PETSTORE_SWAGGER)?;
        Self::load(root)
    }

    /// The whole document tree.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Which definitions section this document uses.
    pub fn definitions_section(&self) -> DefinitionsSection {
        self.section
    }

    /// Named type definitions.
    pub fn definitions(&self) -> &Map<String, Value> {
        self.object_at(self.section.segments())
    }

    /// The `paths` mapping.
    pub fn paths(&self) -> &Map<String, Value> {
        self.object_at(&["paths"])
    }

    /// `info.title`, or "Unknown".
    pub fn title(&self) -> &str {
        self.root
            .get("info")
            .and_then(|info| info.get("title"))
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
    }

    // Shapes are checked in `load`; the empty fallback is never hit for a loaded document.
    fn object_at(&self, segments: &[&str]) -> &Map<String, Value> {
        static EMPTY: OnceLock<Map<String, Value>> = OnceLock::new();
        segments
            .iter()
            .try_fold(&self.root, |node, segment| node.get(*segment))
            .and_then(Value::as_object)
            .unwrap_or_else(|| EMPTY.get_or_init(Map::new))
    }
}

fn detect_definitions_section(obj: &Map<String, Value>) -> AppResult<DefinitionsSection> {
    if let Some(defs) = obj.get("definitions") {
        if defs.is_object() {
            return Ok(DefinitionsSection::Definitions);
        }
        return Err(AppError::MalformedDocument(
            "'definitions' must be a mapping".into(),
        ));
    }

    match obj.get("components").and_then(|c| c.get("schemas")) {
        Some(Value::Object(_)) => Ok(DefinitionsSection::ComponentsSchemas),
        Some(_) => Err(AppError::MalformedDocument(
            "'components.schemas' must be a mapping".into(),
        )),
        None => Err(AppError::MalformedDocument(
            "document missing 'definitions' (or 'components.schemas') section".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_swagger_shape() {
        let doc = ApiDocument::load(json!({
            "info": {"title": "Mini"},
            "definitions": {"Pet": {"type": "object"}},
            "paths": {}
        }))
        .unwrap();
        assert_eq!(doc.title(), "Mini");
        assert_eq!(doc.definitions_section(), DefinitionsSection::Definitions);
        assert!(doc.definitions().contains_key("Pet"));
        assert!(doc.paths().is_empty());
    }

    #[test]
    fn test_load_openapi3_shape() {
        let doc = ApiDocument::load(json!({
            "components": {"schemas": {"Tag": {"type": "object"}}},
            "paths": {"/tags": {}}
        }))
        .unwrap();
        assert_eq!(doc.title(), "Unknown");
        assert_eq!(doc.definitions_section(), DefinitionsSection::ComponentsSchemas);
        assert!(doc.definitions().contains_key("Tag"));
    }

    #[test]
    fn test_load_missing_paths() {
        let err = ApiDocument::load(json!({"definitions": {}})).unwrap_err();
        assert!(matches!(err, AppError::MalformedDocument(ref m) if m.contains("paths")));
    }

    #[test]
    fn test_load_missing_definitions() {
        let err = ApiDocument::load(json!({"paths": {}})).unwrap_err();
        assert!(matches!(err, AppError::MalformedDocument(ref m) if m.contains("definitions")));
    }

    #[test]
    fn test_load_non_mapping_root() {
        let err = ApiDocument::load(json!([1, 2])).unwrap_err();
        assert!(matches!(err, AppError::MalformedDocument(_)));
    }

    #[test]
    fn test_from_str_yaml() {
        let yaml = r#"
swagger: "2.0"
info: {title: YAML Store}
paths:
  /pet:
    get:
      responses:
        "200": {description: ok}
definitions:
  Pet: {type: object}
"#;
        let doc = ApiDocument::parse(yaml).unwrap();
        assert_eq!(doc.title(), "YAML Store");
        assert!(doc.paths().contains_key("/pet"));
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ApiDocument::from_path(dir.path().join("swagger.json")).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn test_from_path_reads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swagger.json");
        std::fs::write(&path, r#"{"definitions": {"A": {}}, "paths": {}}"#).unwrap();
        let doc = ApiDocument::from_path(&path).unwrap();
        assert!(doc.definitions().contains_key("A"));
    }

    #[test]
    fn test_bundled_petstore() {
        let doc = ApiDocument::petstore().unwrap();
        assert_eq!(doc.title(), "Swagger Petstore");
        for name in ["Pet", "Category", "Tag", "Order", "User", "ApiResponse"] {
            assert!(doc.definitions().contains_key(name), "missing {}", name);
        }
        assert!(doc.paths().contains_key("/pet/{petId}"));
    }
}
