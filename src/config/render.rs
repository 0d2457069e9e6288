use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::core::RstapiError;
use crate::model::ObjectKind;

/// Default configuration file name, looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = "rstapi.toml";

/// Settings that shape rendered pages and the build output layout.
///
/// # Examples
///
/// ```rust,no_run
/// use rstapi_cli::config::RenderConfig;
///
/// let config: RenderConfig = toml::from_str("group_by_kind = true").unwrap();
/// assert!(config.group_by_kind);
/// assert_eq!(config.domain, "py");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Directive domain prefix (`py` gives `.. py:module::`).
    pub domain: String,

    /// Kinds that get a page of their own instead of being inlined.
    pub own_page_types: Vec<ObjectKind>,

    /// Split page members into one subsection per kind.
    pub group_by_kind: bool,

    /// Render objects whose name starts with a single underscore.
    pub include_private: bool,

    /// Glob patterns matched against object ids; matches are not rendered.
    pub ignore: Vec<String>,

    /// Directory `build` writes pages into.
    pub output_dir: PathBuf,

    /// Title of the generated root `index.rst`.
    pub index_title: String,

    /// Subheading above inlined members when not grouping by kind.
    pub members_heading: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            domain: "py".to_string(),
            own_page_types: vec![ObjectKind::Package, ObjectKind::Module],
            group_by_kind: false,
            include_private: true,
            ignore: Vec::new(),
            output_dir: PathBuf::from("autoapi"),
            index_title: "API Reference".to_string(),
            members_heading: "Members".to_string(),
        }
    }
}

impl RenderConfig {
    /// Load configuration from an optional path.
    ///
    /// With an explicit path the file must exist. Without one,
    /// `rstapi.toml` in the current directory is used when present and the
    /// defaults otherwise.
    pub async fn load_with_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(RstapiError::ConfigError {
                        message: format!("configuration file {} does not exist", path.display()),
                    }
                    .into());
                }
                Self::load_from(path).await
            }
            None => {
                let default_path = PathBuf::from(CONFIG_FILE_NAME);
                if default_path.exists() {
                    Self::load_from(&default_path).await
                } else {
                    tracing::debug!("No {} found, using default configuration", CONFIG_FILE_NAME);
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load and validate configuration from a specific file path.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config = Self::from_toml_str(&content).with_context(|| {
            format!("Failed to load config from {}", path.display())
        })?;

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration text.
    pub fn from_toml_str(content: &str) -> Result<Self, RstapiError> {
        let config: Self = toml::from_str(content).map_err(|e| RstapiError::ConfigError {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as pretty-printed TOML, creating parent directories.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize rstapi config")?;
        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Compile the `ignore` globs.
    pub fn ignore_patterns(&self) -> Result<Vec<glob::Pattern>, RstapiError> {
        self.ignore
            .iter()
            .map(|raw| {
                glob::Pattern::new(raw).map_err(|e| RstapiError::ConfigError {
                    message: format!("invalid ignore pattern '{raw}': {e}"),
                })
            })
            .collect()
    }

    fn validate(&self) -> Result<(), RstapiError> {
        if self.domain.trim().is_empty() || self.domain.contains(char::is_whitespace) {
            return Err(RstapiError::ConfigError {
                message: format!("domain must be a single word, got '{}'", self.domain),
            });
        }
        self.ignore_patterns()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.domain, "py");
        assert_eq!(config.own_page_types, vec![ObjectKind::Package, ObjectKind::Module]);
        assert!(config.include_private);
        assert!(!config.group_by_kind);
        assert_eq!(config.output_dir, PathBuf::from("autoapi"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = RenderConfig::from_toml_str(
            "own_page_types = [\"package\"]\nignore = [\"pkg.tests*\"]\n",
        )
        .unwrap();
        assert_eq!(config.own_page_types, vec![ObjectKind::Package]);
        assert_eq!(config.ignore, vec!["pkg.tests*".to_string()]);
        assert_eq!(config.index_title, "API Reference");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = RenderConfig::from_toml_str("colour = \"blue\"").unwrap_err();
        assert!(matches!(err, RstapiError::ConfigError { .. }));
    }

    #[test]
    fn test_invalid_glob_rejected() {
        let err = RenderConfig::from_toml_str("ignore = [\"pkg[\"]").unwrap_err();
        assert!(err.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_domain_must_be_one_word() {
        assert!(RenderConfig::from_toml_str("domain = \"c pp\"").is_err());
        assert!(RenderConfig::from_toml_str("domain = \"\"").is_err());
        assert_eq!(RenderConfig::from_toml_str("domain = \"js\"").unwrap().domain, "js");
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join(CONFIG_FILE_NAME);

        let config = RenderConfig {
            group_by_kind: true,
            index_title: "Reference".to_string(),
            ..RenderConfig::default()
        };
        config.save_to(&path).await.unwrap();

        let loaded = RenderConfig::load_from(&path).await.unwrap();
        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn test_explicit_missing_path_is_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");
        let err = RenderConfig::load_with_optional(Some(&missing)).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RstapiError>(),
            Some(RstapiError::ConfigError { .. })
        ));
    }
}
