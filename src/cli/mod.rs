//! Command-line interface for rstapi.
//!
//! # Available Commands
//!
//! - `render` - Print the reStructuredText of one object or of every root
//! - `build` - Write one page per own-page object plus a root `index.rst`
//! - `list` - Show which pages a build would produce
//! - `init` - Scaffold a Sphinx documentation directory
//!
//! # Basic Workflow
//!
//! ```bash
//! # 1. Create docs/ with conf.py, index.rst and rstapi.toml
//! rstapi init docs --project mypkg --author "Jane Doe"
//!
//! # 2. Generate API pages from the extracted objects
//! cd docs && rstapi build ../api.json
//!
//! # 3. Inspect a single object
//! rstapi render ../api.json --id mypkg.core
//! ```
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug logging
//! - `--quiet` - Only log errors and suppress summaries
//! - `--config` - Path to an `rstapi.toml` other than `./rstapi.toml`

mod build;
pub mod common;
mod init;
mod list;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Runtime configuration derived from the global flags.
///
/// Kept separate from [`Cli`] so commands and tests can be driven without
/// parsing arguments.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive. `None` defers to `RUST_LOG`, falling back to `warn`.
    pub log_level: Option<String>,

    /// Suppress informational output on stdout.
    pub quiet: bool,

    /// Explicit configuration file path.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// Safe to call more than once; later calls are no-ops.
    pub fn init_logging(&self) {
        let filter = match &self.log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Main CLI application structure for rstapi.
#[derive(Parser)]
#[command(
    name = "rstapi",
    about = "Render reStructuredText API reference pages from documentation objects",
    version,
    long_about = "rstapi turns a tree of extracted documentation objects (JSON, YAML or TOML) \
                  into Sphinx-ready reStructuredText pages."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file (defaults to ./rstapi.toml when present)
    #[arg(short, long, global = true, env = "RSTAPI_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render documentation objects to stdout.
    ///
    /// See [`render::RenderCommand`] for detailed options and behavior.
    Render(render::RenderCommand),

    /// Write API pages to the output directory.
    ///
    /// See [`build::BuildCommand`] for detailed options and behavior.
    Build(build::BuildCommand),

    /// List the pages a build would write.
    List(list::ListCommand),

    /// Scaffold a Sphinx documentation directory.
    ///
    /// See [`init::InitCommand`] for detailed options and behavior.
    Init(init::InitCommand),
}

impl Cli {
    /// Execute the CLI with configuration built from the parsed flags.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate global flags into a [`CliConfig`].
    ///
    /// - `--verbose` → `debug`
    /// - `--quiet` → `error`
    /// - neither → `RUST_LOG` or `warn`
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            quiet: self.quiet,
            config_path: self.config.clone(),
        }
    }

    /// Execute with an injected configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::Render(cmd) => cmd.execute(&config).await,
            Commands::Build(cmd) => cmd.execute(&config).await,
            Commands::List(cmd) => cmd.execute(&config).await,
            Commands::Init(cmd) => cmd.execute(&config).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_config_levels() {
        let cli = Cli::parse_from(["rstapi", "--verbose", "list", "api.json"]);
        assert_eq!(cli.build_config().log_level.as_deref(), Some("debug"));

        let cli = Cli::parse_from(["rstapi", "-q", "list", "api.json"]);
        let config = cli.build_config();
        assert_eq!(config.log_level.as_deref(), Some("error"));
        assert!(config.quiet);

        let cli = Cli::parse_from(["rstapi", "list", "api.json"]);
        assert!(cli.build_config().log_level.is_none());
    }

    #[test]
    fn test_global_config_flag_after_subcommand() {
        let cli = Cli::parse_from(["rstapi", "build", "api.json", "--config", "custom.toml"]);
        assert_eq!(cli.build_config().config_path, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["rstapi", "-v", "-q", "list", "api.json"]).is_err());
    }
}
