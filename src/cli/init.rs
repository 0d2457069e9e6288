//! Scaffold a Sphinx documentation directory.
//!
//! Creates (by default) `docs/` with:
//!
//! - `conf.py` - Sphinx configuration with the autoapi, sphinx_design and
//!   intersphinx extensions and the pydata theme
//! - `index.rst` - project title and a toctree pointing at the generated API index
//! - `Makefile`, `README.md`, `requirements.txt`
//! - `.gitignore` - ignores the generated pages and `_build/`
//! - `rstapi.toml` - default render configuration
//! - empty `_static/` and `_templates/` directories
//!
//! # Error Conditions
//!
//! - Returns [`RstapiError::AlreadyInitialized`] if `conf.py` exists and `--force` is not used
//!
//! Without `--force`, other existing files are left untouched. An existing
//! `.gitignore` is extended with any missing entries instead of being replaced.

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::CliConfig;
use crate::config::{CONFIG_FILE_NAME, RenderConfig};
use crate::core::RstapiError;
use crate::templating::{ScaffoldContext, ScaffoldRenderer};

const DEFAULT_DOCS_DIR: &str = "docs";
const DEFAULT_AUTHOR: &str = "unknown";
const DEFAULT_PROJECT: &str = "project";
const GITIGNORE: &str = ".gitignore";

/// Command to scaffold a Sphinx documentation directory.
#[derive(Args)]
pub struct InitCommand {
    /// Documentation directory to create
    #[arg(default_value = DEFAULT_DOCS_DIR)]
    dir: PathBuf,

    /// Project name (defaults to the name of the directory containing DIR)
    #[arg(long)]
    project: Option<String>,

    /// Author used in the copyright notice
    #[arg(long)]
    author: Option<String>,

    /// Overwrite existing files
    #[arg(short, long)]
    force: bool,
}

impl InitCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let written = self.scaffold().await?;

        if !cli.quiet {
            println!(
                "{} Initialized Sphinx docs at {} ({} file(s) written)",
                "✓".green(),
                self.dir.display(),
                written.len()
            );
            println!("\n{}", "Next steps:".cyan());
            println!("  cd {}", self.dir.display());
            println!("  {} <objects file>", "rstapi build".bright_white());
            println!("  make html");
        }
        Ok(())
    }

    /// Write the scaffold, returning the files that were written.
    async fn scaffold(&self) -> Result<Vec<PathBuf>> {
        let conf_path = self.dir.join("conf.py");
        if conf_path.exists() && !self.force {
            return Err(RstapiError::AlreadyInitialized {
                path: self.dir.display().to_string(),
            }
            .into());
        }

        for sub in ["", "_static", "_templates"] {
            let path = self.dir.join(sub);
            fs::create_dir_all(&path)
                .await
                .with_context(|| format!("Failed to create directory {}", path.display()))?;
        }

        let render_config = RenderConfig::default();
        let context = ScaffoldContext {
            project: self.project_name(),
            author: self.author.clone().unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            year: chrono::Local::now().year(),
            output_dir: render_config.output_dir.to_string_lossy().into_owned(),
        };
        tracing::debug!("Scaffold context: {:?}", context);

        let renderer = ScaffoldRenderer::new()?;
        let mut written = Vec::new();

        for (name, content) in renderer.render_all(&context)? {
            let path = self.dir.join(name);

            if name == GITIGNORE {
                if merge_gitignore(&path, &content).await? {
                    written.push(path);
                }
                continue;
            }

            if path.exists() && !self.force {
                tracing::warn!("Keeping existing {}", path.display());
                continue;
            }

            fs::write(&path, content)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            written.push(path);
        }

        let config_path = self.dir.join(CONFIG_FILE_NAME);
        if self.force || !config_path.exists() {
            render_config.save_to(&config_path).await?;
            written.push(config_path);
        }

        tracing::info!("Scaffolded {} file(s) in {}", written.len(), self.dir.display());
        Ok(written)
    }

    fn project_name(&self) -> String {
        if let Some(project) = &self.project {
            return project.clone();
        }

        let absolute = if self.dir.is_absolute() {
            self.dir.clone()
        } else {
            std::env::current_dir().map(|cwd| cwd.join(&self.dir)).unwrap_or_else(|_| self.dir.clone())
        };

        absolute
            .parent()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_PROJECT.to_string())
    }
}

/// Append the lines of `rendered` that `path` does not already contain.
///
/// Returns whether the file was written.
async fn merge_gitignore(path: &Path, rendered: &str) -> Result<bool> {
    let mut content = if path.exists() {
        fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?
    } else {
        String::new()
    };

    let missing: Vec<&str> = rendered
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter(|line| !content.lines().any(|existing| existing.trim() == line.trim()))
        .collect();

    if missing.is_empty() {
        return Ok(false);
    }

    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    for line in missing {
        content.push_str(line);
        content.push('\n');
    }

    fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}
