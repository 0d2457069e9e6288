//! rstapi CLI entry point
//!
//! Parses arguments, runs the selected command, and turns failures into a
//! colored error report with suggestions.
//!
//! - `render` - Print reStructuredText for documentation objects
//! - `build` - Write API pages to the output directory
//! - `list` - Show the pages a build would write
//! - `init` - Scaffold a Sphinx documentation directory

use anyhow::Result;
use clap::Parser;
use rstapi_cli::cli;
use rstapi_cli::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
