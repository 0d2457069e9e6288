//! Shared setup for commands that read documentation input.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::CliConfig;
use crate::config::RenderConfig;
use crate::model::{self, DocObject};
use crate::render::PageRenderer;

/// Loaded configuration, renderer and input for one command run.
#[derive(Debug)]
pub struct CommandContext {
    /// Effective render configuration
    pub config: RenderConfig,
    /// Renderer built from `config`
    pub renderer: PageRenderer,
    /// Root documentation objects
    pub roots: Vec<DocObject>,
    /// Path the roots were read from
    pub input_path: PathBuf,
}

impl CommandContext {
    /// Load configuration and the documentation input file.
    pub async fn load(input_path: &Path, cli: &CliConfig) -> Result<Self> {
        let config = RenderConfig::load_with_optional(cli.config_path.as_deref()).await?;
        let renderer = PageRenderer::new(&config)?;

        let roots = model::load_objects(input_path).await.with_context(|| {
            format!("Failed to load documentation input {}", input_path.display())
        })?;

        tracing::info!(
            "Loaded {} root object(s) from {}",
            roots.len(),
            input_path.display()
        );

        Ok(Self {
            config,
            renderer,
            roots,
            input_path: input_path.to_path_buf(),
        })
    }
}
