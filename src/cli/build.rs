//! Write API pages for a documentation object tree.
//!
//! Every visible object whose kind owns a page is written to
//! `<output>/<id segments>/index.rst`, and `<output>/index.rst` links the
//! top-level pages. Files whose content would not change are left alone, so
//! Sphinx only rebuilds what actually changed.
//!
//! ```bash
//! rstapi build api.json                 # into ./autoapi (or output_dir)
//! rstapi build api.json -o api --clean  # wipe ./api first
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::fs;

use super::CliConfig;
use super::common::CommandContext;
use crate::writer::{PagePlan, WriteSummary};

/// Write one page per own-page object plus the root index.
#[derive(Args)]
pub struct BuildCommand {
    /// Documentation object file (.json, .yaml, .yml or .toml)
    input: PathBuf,

    /// Output directory (defaults to `output_dir` from the configuration)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Remove the output directory before writing
    #[arg(long)]
    clean: bool,
}

impl BuildCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let start = Instant::now();
        let ctx = CommandContext::load(&self.input, cli).await?;
        let out_dir = self.output.clone().unwrap_or_else(|| ctx.config.output_dir.clone());

        let summary = self.build(&ctx, &out_dir).await?;

        tracing::info!(
            "Built {} page(s) from {} in {:.2?}",
            summary.written + summary.unchanged,
            ctx.input_path.display(),
            start.elapsed()
        );

        if !cli.quiet {
            println!(
                "{} Wrote {} page(s) to {} ({} unchanged)",
                "✓".green(),
                summary.written,
                out_dir.display(),
                summary.unchanged
            );
        }
        Ok(())
    }

    async fn build(&self, ctx: &CommandContext, out_dir: &Path) -> Result<WriteSummary> {
        if self.clean && out_dir.exists() {
            tracing::info!("Removing {}", out_dir.display());
            fs::remove_dir_all(out_dir)
                .await
                .with_context(|| format!("Failed to clean output directory {}", out_dir.display()))?;
        }

        let plan = PagePlan::build(&ctx.renderer, &ctx.roots, &ctx.config.index_title);
        tracing::debug!("Planned {} page(s)", plan.pages.len());

        plan.write_to(out_dir).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::render::PageRenderer;
    use crate::test_utils::sample_package;
    use tempfile::TempDir;

    fn context() -> CommandContext {
        let config = RenderConfig::default();
        CommandContext {
            renderer: PageRenderer::new(&config).unwrap(),
            config,
            roots: vec![sample_package()],
            input_path: PathBuf::from("api.json"),
        }
    }

    #[tokio::test]
    async fn test_build_writes_pages() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("autoapi");
        let cmd = BuildCommand {
            input: PathBuf::from("api.json"),
            output: Some(out.clone()),
            clean: false,
        };

        let summary = cmd.build(&context(), &out).await.unwrap();
        assert_eq!(summary.written, 3);
        assert!(out.join("index.rst").exists());
        assert!(out.join("pkg").join("index.rst").exists());
        assert!(out.join("pkg").join("core").join("index.rst").exists());
    }

    #[tokio::test]
    async fn test_clean_removes_stale_pages() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("autoapi");
        std::fs::create_dir_all(out.join("old")).unwrap();
        std::fs::write(out.join("old").join("index.rst"), "stale").unwrap();

        let keep = BuildCommand {
            input: PathBuf::from("api.json"),
            output: Some(out.clone()),
            clean: false,
        };
        keep.build(&context(), &out).await.unwrap();
        assert!(out.join("old").join("index.rst").exists());

        let clean = BuildCommand {
            input: PathBuf::from("api.json"),
            output: Some(out.clone()),
            clean: true,
        };
        let summary = clean.build(&context(), &out).await.unwrap();
        assert!(!out.join("old").exists());
        assert_eq!(summary.written, 3);
    }
}
