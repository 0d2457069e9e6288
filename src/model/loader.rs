//! Reading documentation object trees from disk.
//!
//! The serialization format is chosen from the file extension:
//!
//! | Extension       | Format |
//! |-----------------|--------|
//! | `.json`         | JSON   |
//! | `.yaml`, `.yml` | YAML   |
//! | `.toml`         | TOML   |
//!
//! A document holds a single root object, a list of roots, or a table with an
//! `objects` list. TOML documents are always tables, so they use either a single
//! root or the `objects` form.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use std::path::Path;
use tokio::fs;

use super::DocObject;
use crate::core::RstapiError;

/// Serialization format of an input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
    Toml,
}

impl InputFormat {
    /// Detect the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, RstapiError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("toml") => Ok(Self::Toml),
            _ => Err(RstapiError::UnsupportedInputFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

/// Top-level layout of an input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentShape {
    /// A list of root objects
    List,
    /// A table with an `objects` list
    Wrapped,
    /// A single root object
    Single,
}

#[derive(Deserialize)]
struct WrappedDocument {
    objects: Vec<DocObject>,
}

const SHAPE_ERROR: &str = "expected a documentation object, a list of objects, or a table with an `objects` list";

impl DocumentShape {
    fn of_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Array(_) => Some(Self::List),
            serde_json::Value::Object(map) if map.contains_key("objects") => Some(Self::Wrapped),
            serde_json::Value::Object(_) => Some(Self::Single),
            _ => None,
        }
    }

    fn of_yaml(value: &serde_yaml::Value) -> Option<Self> {
        match value {
            serde_yaml::Value::Sequence(_) => Some(Self::List),
            serde_yaml::Value::Mapping(map) if map.contains_key("objects") => Some(Self::Wrapped),
            serde_yaml::Value::Mapping(_) => Some(Self::Single),
            _ => None,
        }
    }

    fn of_toml(value: &toml::Value) -> Option<Self> {
        match value {
            toml::Value::Array(_) => Some(Self::List),
            toml::Value::Table(table) if table.contains_key("objects") => Some(Self::Wrapped),
            toml::Value::Table(_) => Some(Self::Single),
            _ => None,
        }
    }

    /// Deserialize the roots of a document with this shape.
    fn roots<'de, D>(self, value: D) -> Result<Vec<DocObject>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match self {
            Self::List => Vec::<DocObject>::deserialize(value),
            Self::Wrapped => WrappedDocument::deserialize(value).map(|doc| doc.objects),
            Self::Single => DocObject::deserialize(value).map(|object| vec![object]),
        }
    }
}

/// Parse a document's content into its root objects.
///
/// `origin` names the document in error messages.
pub fn parse_objects(
    content: &str,
    format: InputFormat,
    origin: &str,
) -> Result<Vec<DocObject>, RstapiError> {
    let parse_error = |reason: String| RstapiError::InputParseError {
        file: origin.to_string(),
        reason,
    };

    let roots = match format {
        InputFormat::Json => {
            let value: serde_json::Value =
                serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?;
            let shape = DocumentShape::of_json(&value).ok_or_else(|| parse_error(SHAPE_ERROR.to_string()))?;
            shape.roots(value).map_err(|e| parse_error(e.to_string()))?
        }
        InputFormat::Yaml => {
            let value: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?;
            let shape = DocumentShape::of_yaml(&value).ok_or_else(|| parse_error(SHAPE_ERROR.to_string()))?;
            shape.roots(value).map_err(|e| parse_error(e.to_string()))?
        }
        InputFormat::Toml => {
            let value: toml::Value = toml::from_str(content).map_err(|e| parse_error(e.to_string()))?;
            let shape = DocumentShape::of_toml(&value).ok_or_else(|| parse_error(SHAPE_ERROR.to_string()))?;
            shape.roots(value).map_err(|e| parse_error(e.to_string()))?
        }
    };

    tracing::debug!(
        "Parsed {} root object(s), {} total, from {}",
        roots.len(),
        roots.iter().map(DocObject::count).sum::<usize>(),
        origin
    );
    Ok(roots)
}

/// Read and parse a documentation input file.
///
/// # Errors
///
/// - [`RstapiError::InputNotFound`] if `path` does not exist
/// - [`RstapiError::UnsupportedInputFormat`] for unknown extensions
/// - [`RstapiError::InputParseError`] when the content does not deserialize
pub async fn load_objects(path: &Path) -> Result<Vec<DocObject>> {
    if !path.exists() {
        return Err(RstapiError::InputNotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let format = InputFormat::from_path(path)?;
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read documentation input from {}", path.display()))?;

    let roots = parse_objects(&content, format, &path.display().to_string())?;
    if roots.is_empty() {
        tracing::warn!("{} contains no documentation objects", path.display());
    }
    Ok(roots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ObjectKind;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("a.json")).unwrap(), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("a.YML")).unwrap(), InputFormat::Yaml);
        assert_eq!(InputFormat::from_path(Path::new("a.toml")).unwrap(), InputFormat::Toml);
        assert!(matches!(
            InputFormat::from_path(Path::new("a.xml")),
            Err(RstapiError::UnsupportedInputFormat { .. })
        ));
        assert!(InputFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_parse_json_single_root() {
        let json = r#"{
            "id": "pkg",
            "type": "package",
            "children": [{"id": "pkg.mod", "docstring": "Does X."}]
        }"#;
        let roots = parse_objects(json, InputFormat::Json, "tree.json").unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].kind, ObjectKind::Package);
        assert_eq!(roots[0].children[0].docstring.as_deref(), Some("Does X."));
    }

    #[test]
    fn test_parse_json_list_and_wrapped() {
        let list = r#"[{"id": "a"}, {"id": "b", "display": false}]"#;
        let roots = parse_objects(list, InputFormat::Json, "list.json").unwrap();
        assert_eq!(roots.len(), 2);
        assert!(!roots[1].display);

        let wrapped = r#"{"objects": [{"id": "a"}, {"id": "b"}, {"id": "c"}]}"#;
        let roots = parse_objects(wrapped, InputFormat::Json, "wrapped.json").unwrap();
        assert_eq!(roots.len(), 3);
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = "id: pkg.mod\ntype: module\nchildren:\n  - id: pkg.mod.run\n    type: function\n    signature: \"(x)\"\n";
        let roots = parse_objects(yaml, InputFormat::Yaml, "tree.yaml").unwrap();
        let run = &roots[0].children[0];
        assert_eq!(run.kind, ObjectKind::Function);
        assert_eq!(run.signature.as_deref(), Some("(x)"));
    }

    #[test]
    fn test_parse_toml_objects_table() {
        let toml = r#"
[[objects]]
id = "pkg"
type = "package"

[[objects.children]]
id = "pkg.Thing"
type = "class"
"#;
        let roots = parse_objects(toml, InputFormat::Toml, "tree.toml").unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].children[0].id, "pkg.Thing");
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = parse_objects(r#"{"type": "module"}"#, InputFormat::Json, "bad.json").unwrap_err();
        match err {
            RstapiError::InputParseError {
                file,
                ..
            } => assert_eq!(file, "bad.json"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_reports_nested_field() {
        let json = r#"{"objects": [{"id": "pkg", "children": [{"id": "pkg.x", "type": "enum"}]}]}"#;
        let err = parse_objects(json, InputFormat::Json, "bad.json").unwrap_err();
        match err {
            RstapiError::InputParseError {
                reason,
                ..
            } => assert!(reason.contains("unknown variant `enum`"), "reason: {reason}"),
            other => panic!("unexpected error: {other:?}"),
        }

        let yaml = "- id: a\n- type: module\n";
        let err = parse_objects(yaml, InputFormat::Yaml, "bad.yaml").unwrap_err();
        assert!(err.to_string().contains("bad.yaml"));
        match err {
            RstapiError::InputParseError {
                reason,
                ..
            } => assert!(reason.contains("missing field `id`"), "reason: {reason}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_scalar_document() {
        let err = parse_objects("42", InputFormat::Json, "scalar.json").unwrap_err();
        assert!(matches!(err, RstapiError::InputParseError { reason, .. } if reason.contains("`objects` list")));
    }

    #[tokio::test]
    async fn test_load_objects_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = load_objects(&temp.path().join("missing.json")).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RstapiError>(),
            Some(RstapiError::InputNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_load_objects_reads_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tree.json");
        std::fs::write(&path, r#"[{"id": "pkg", "type": "package"}]"#).unwrap();

        let roots = load_objects(&path).await.unwrap();
        assert_eq!(roots[0].id, "pkg");
    }
}
