//! Tera rendering of the embedded documentation scaffold.

use serde::Serialize;
use tera::{Context as TeraContext, Tera};

use crate::core::RstapiError;

/// Scaffold files: (output file name, embedded template source).
const SCAFFOLD_TEMPLATES: [(&str, &str); 6] = [
    ("conf.py", include_str!("templates/conf.py.tera")),
    ("index.rst", include_str!("templates/index.rst.tera")),
    ("Makefile", include_str!("templates/Makefile.tera")),
    ("README.md", include_str!("templates/README.md.tera")),
    ("requirements.txt", include_str!("templates/requirements.txt.tera")),
    (".gitignore", include_str!("templates/gitignore.tera")),
];

/// Values substituted into the scaffold templates.
#[derive(Debug, Clone, Serialize)]
pub struct ScaffoldContext {
    pub project: String,
    pub author: String,
    pub year: i32,
    /// Directory `rstapi build` writes into, relative to the docs directory.
    pub output_dir: String,
}

impl ScaffoldContext {
    fn to_tera(&self) -> Result<TeraContext, RstapiError> {
        let mut context = TeraContext::from_serialize(self).map_err(|e| {
            RstapiError::ScaffoldTemplateError {
                template: "context".to_string(),
                reason: format_tera_error(&e),
            }
        })?;
        context.insert("title_underline", &"=".repeat(self.project.chars().count()));
        context.insert("api_index", &format!("{}/index", self.output_dir.trim_end_matches('/')));
        Ok(context)
    }
}

/// Renders the documentation scaffold written by `rstapi init`.
pub struct ScaffoldRenderer {
    tera: Tera,
}

impl ScaffoldRenderer {
    /// Parse every embedded template.
    pub fn new() -> Result<Self, RstapiError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(SCAFFOLD_TEMPLATES.to_vec()).map_err(|e| {
            RstapiError::ScaffoldTemplateError {
                template: "scaffold".to_string(),
                reason: format_tera_error(&e),
            }
        })?;
        Ok(Self {
            tera,
        })
    }

    /// Output file names, in the order they are rendered.
    pub fn file_names() -> impl Iterator<Item = &'static str> {
        SCAFFOLD_TEMPLATES.iter().map(|(name, _)| *name)
    }

    /// Render one scaffold file.
    pub fn render(&self, name: &str, context: &ScaffoldContext) -> Result<String, RstapiError> {
        let tera_context = context.to_tera()?;
        tracing::debug!("Rendering scaffold template {}", name);
        self.tera.render(name, &tera_context).map_err(|e| RstapiError::ScaffoldTemplateError {
            template: name.to_string(),
            reason: format_tera_error(&e),
        })
    }

    /// Render every scaffold file as (file name, content).
    pub fn render_all(
        &self,
        context: &ScaffoldContext,
    ) -> Result<Vec<(&'static str, String)>, RstapiError> {
        Self::file_names().map(|name| Ok((name, self.render(name, context)?))).collect()
    }
}

/// Flatten a Tera error and its sources into one message.
fn format_tera_error(error: &tera::Error) -> String {
    use std::error::Error;

    let mut messages = vec![error.to_string()];
    let mut current: Option<&dyn Error> = error.source();
    while let Some(err) = current {
        messages.push(err.to_string());
        current = err.source();
    }
    messages.join("\n  → ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ScaffoldContext {
        ScaffoldContext {
            project: "mypyutils".to_string(),
            author: "lunaria".to_string(),
            year: 2025,
            output_dir: "autoapi".to_string(),
        }
    }

    #[test]
    fn test_all_templates_parse() {
        let renderer = ScaffoldRenderer::new().unwrap();
        let files = renderer.render_all(&context()).unwrap();
        assert_eq!(files.len(), 6);
        assert!(files.iter().all(|(_, content)| !content.is_empty()));
    }

    #[test]
    fn test_conf_py_values() {
        let conf = ScaffoldRenderer::new().unwrap().render("conf.py", &context()).unwrap();
        assert!(conf.contains("project = 'mypyutils'"));
        assert!(conf.contains("copyright = 'CC BY 4.0, 2025, lunaria'"));
        assert!(conf.contains("author = 'lunaria'"));
        assert!(conf.contains("'autoapi.extension',"));
        assert!(conf.contains("html_theme = 'pydata_sphinx_theme'"));
        assert!(conf.contains("html_title = 'mypyutils'"));
    }

    #[test]
    fn test_index_title_underline() {
        let index = ScaffoldRenderer::new().unwrap().render("index.rst", &context()).unwrap();
        assert!(index.starts_with("mypyutils\n=========\n"));
        assert!(index.contains("   autoapi/index"));
    }

    #[test]
    fn test_gitignore_follows_output_dir() {
        let ctx = ScaffoldContext {
            output_dir: "api".to_string(),
            ..context()
        };
        let gitignore = ScaffoldRenderer::new().unwrap().render(".gitignore", &ctx).unwrap();
        assert!(gitignore.contains("api/\n"));
        assert!(gitignore.contains("_build/"));
    }

    #[test]
    fn test_makefile_keeps_tabs() {
        let makefile = ScaffoldRenderer::new().unwrap().render("Makefile", &context()).unwrap();
        assert!(makefile.contains("\n\t@$(SPHINXBUILD) -M help"));
    }

    #[test]
    fn test_unknown_template_is_error() {
        let err = ScaffoldRenderer::new().unwrap().render("setup.py", &context()).unwrap_err();
        assert!(matches!(err, RstapiError::ScaffoldTemplateError { .. }));
    }
}
