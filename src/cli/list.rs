//! Show the page plan without writing anything.

use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::CliConfig;
use super::common::CommandContext;
use crate::writer::PagePlan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    Text,
    Json,
}

/// List the pages `build` would write.
#[derive(Args)]
pub struct ListCommand {
    /// Documentation object file (.json, .yaml, .yml or .toml)
    input: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = ListFormat::Text)]
    format: ListFormat,
}

#[derive(Debug, Serialize)]
struct PageEntry {
    id: String,
    path: String,
}

impl ListCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let ctx = CommandContext::load(&self.input, cli).await?;
        let plan = PagePlan::build(&ctx.renderer, &ctx.roots, &ctx.config.index_title);
        print!("{}", self.format_plan(&plan)?);
        Ok(())
    }

    fn format_plan(&self, plan: &PagePlan) -> Result<String> {
        let entries: Vec<PageEntry> = plan
            .object_pages()
            .filter_map(|page| {
                page.id.as_ref().map(|id| PageEntry {
                    id: id.clone(),
                    path: page.path.to_string_lossy().replace('\\', "/"),
                })
            })
            .collect();

        match self.format {
            ListFormat::Json => {
                let mut json = serde_json::to_string_pretty(&entries)?;
                json.push('\n');
                Ok(json)
            }
            ListFormat::Text => {
                if entries.is_empty() {
                    return Ok("No pages to write\n".to_string());
                }
                let width = entries.iter().map(|e| e.id.chars().count()).max().unwrap_or(0);
                let mut out = String::new();
                for entry in &entries {
                    let pad = " ".repeat(width - entry.id.chars().count());
                    out.push_str(&format!("{}{}  {}\n", entry.id.bold(), pad, entry.path));
                }
                Ok(out)
            }
        }
    }
}
