//! Print rendered reStructuredText to stdout.
//!
//! ```bash
//! # Every root as a page
//! rstapi render api.json
//!
//! # One object, as it appears embedded in its parent
//! rstapi render api.json --id pkg.Client --inline
//! ```

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::CliConfig;
use super::common::CommandContext;
use crate::core::RstapiError;
use crate::model::find_in;
use crate::render::RenderMode;

/// Render one object, or every root, to stdout.
#[derive(Args)]
pub struct RenderCommand {
    /// Documentation object file (.json, .yaml, .yml or .toml)
    input: PathBuf,

    /// Identifier of the object to render (defaults to every root)
    #[arg(long)]
    id: Option<String>,

    /// Render as embedded in a parent page instead of as a page of its own
    #[arg(long)]
    inline: bool,
}

impl RenderCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let ctx = CommandContext::load(&self.input, cli).await?;
        let output = self.render_output(&ctx)?;
        print!("{output}");
        Ok(())
    }

    fn mode(&self) -> RenderMode {
        if self.inline {
            RenderMode::Inline
        } else {
            RenderMode::Page
        }
    }

    /// Selected objects' renderings, separated by blank lines.
    fn render_output(&self, ctx: &CommandContext) -> Result<String, RstapiError> {
        let mode = self.mode();

        if let Some(id) = &self.id {
            if find_in(&ctx.roots, id).is_none() {
                return Err(RstapiError::ObjectNotFound {
                    id: id.clone(),
                });
            }
            // Found but hidden by itself or an ancestor: renders to nothing
            return Ok(ctx
                .renderer
                .find_visible(&ctx.roots, id)
                .map(|obj| ctx.renderer.render(obj, mode))
                .unwrap_or_default());
        }

        let rendered: Vec<String> = ctx
            .roots
            .iter()
            .map(|root| ctx.renderer.render(root, mode))
            .filter(|text| !text.is_empty())
            .collect();
        Ok(rendered.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::model::{DocObject, ObjectKind};
    use crate::render::PageRenderer;
    use crate::test_utils::sample_package;

    fn context(roots: Vec<DocObject>) -> CommandContext {
        let config = RenderConfig::default();
        CommandContext {
            renderer: PageRenderer::new(&config).unwrap(),
            config,
            roots,
            input_path: PathBuf::from("api.json"),
        }
    }

    fn command(id: Option<&str>, inline: bool) -> RenderCommand {
        RenderCommand {
            input: PathBuf::from("api.json"),
            id: id.map(str::to_string),
            inline,
        }
    }

    #[test]
    fn test_render_by_id() {
        let ctx = context(vec![sample_package()]);
        let out = command(Some("pkg.Client.get"), true).render_output(&ctx).unwrap();
        assert_eq!(
            out,
            ".. py:method:: get(path)\n\n   .. autoapi-nested-parse::\n\n      Fetch a path.\n"
        );
    }

    #[test]
    fn test_render_missing_id() {
        let ctx = context(vec![sample_package()]);
        let err = command(Some("pkg.nope"), false).render_output(&ctx).unwrap_err();
        assert!(matches!(err, RstapiError::ObjectNotFound { .. }));
    }

    #[test]
    fn test_render_all_roots_skips_hidden() {
        let ctx = context(vec![
            DocObject::new("a", ObjectKind::Module),
            DocObject::new("b", ObjectKind::Module).hidden(),
            DocObject::new("c", ObjectKind::Module),
        ]);
        let out = command(None, false).render_output(&ctx).unwrap();
        assert_eq!(out, "a\n=\n\n.. py:module:: a\n\nc\n=\n\n.. py:module:: c\n");
    }

    #[test]
    fn test_render_descendant_of_hidden_object_is_empty() {
        let ctx = context(vec![
            DocObject::new("pkg", ObjectKind::Package).with_child(
                DocObject::new("pkg.Gone", ObjectKind::Class)
                    .hidden()
                    .with_child(DocObject::new("pkg.Gone.run", ObjectKind::Method)),
            ),
        ]);

        let out = command(Some("pkg.Gone.run"), true).render_output(&ctx).unwrap();
        assert_eq!(out, "");
        let out = command(Some("pkg.Gone"), false).render_output(&ctx).unwrap();
        assert_eq!(out, "");
    }
}
