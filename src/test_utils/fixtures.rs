//! Test fixtures for documentation object trees and input files.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::{DocObject, ObjectKind};

/// A small package exercising every rendering branch.
///
/// ```text
/// pkg (package)            "Top-level package." + second paragraph
/// ├── pkg.core (module)    "Core helpers."
/// │   └── pkg.core.helper (function, "(value)")
/// ├── pkg.VERSION (data)
/// ├── pkg._private (function)
/// └── pkg.Client (class, "(url)")  "HTTP client."
///     ├── pkg.Client.get (method, "(path)")  "Fetch a path."
///     └── pkg.Client.hidden (method, display = false)
/// ```
pub fn sample_package() -> DocObject {
    DocObject::new("pkg", ObjectKind::Package)
        .with_docstring("Top-level package.\n\n    Second paragraph.\n    ")
        .with_child(
            DocObject::new("pkg.core", ObjectKind::Module)
                .with_docstring("Core helpers.")
                .with_child(
                    DocObject::new("pkg.core.helper", ObjectKind::Function).with_signature("(value)"),
                ),
        )
        .with_child(DocObject::new("pkg.VERSION", ObjectKind::Data))
        .with_child(DocObject::new("pkg._private", ObjectKind::Function))
        .with_child(
            DocObject::new("pkg.Client", ObjectKind::Class)
                .with_signature("(url)")
                .with_docstring("HTTP client.")
                .with_child(
                    DocObject::new("pkg.Client.get", ObjectKind::Method)
                        .with_signature("(path)")
                        .with_docstring("Fetch a path."),
                )
                .with_child(DocObject::new("pkg.Client.hidden", ObjectKind::Method).hidden()),
        )
}

/// Serialized documentation input written to a test directory.
#[derive(Clone, Debug)]
pub struct InputFixture {
    pub file_name: String,
    pub content: String,
}

impl InputFixture {
    /// [`sample_package`] as pretty JSON.
    pub fn sample_json() -> Self {
        Self {
            file_name: "api.json".to_string(),
            content: serde_json::to_string_pretty(&sample_package())
                .unwrap_or_else(|e| panic!("fixture serializes: {e}")),
        }
    }

    /// Two roots in YAML, one of them a loose function.
    pub fn multi_root_yaml() -> Self {
        Self {
            file_name: "api.yaml".to_string(),
            content: r#"
- id: alpha
  type: package
  docstring: Alpha package.
  children:
    - id: alpha.io
      type: module
- id: beta
  type: module
  docstring: Beta module.
- id: loose
  type: function
  signature: "()"
"#
            .trim_start()
            .to_string(),
        }
    }

    /// Write the fixture into `dir`, returning the file path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write fixture {}", path.display()))?;
        Ok(path)
    }
}
