//! Page planning and writing for `rstapi build`.
//!
//! A [`PagePlan`] is computed from the documentation roots before anything
//! touches the disk: one [`PlannedPage`] per visible object whose kind owns a
//! page, at `<id segments joined by '/'>/index.rst`, plus the root `index.rst`.
//! Writing the plan skips files whose content is already up to date.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::core::RstapiError;
use crate::model::DocObject;
use crate::render::rst::{heading, toctree};
use crate::render::{PageRenderer, RenderMode, child_page_target, page_segments};

/// File name of every generated page.
pub const PAGE_FILE_NAME: &str = "index.rst";

/// One page of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedPage {
    /// Identifier of the object that owns the page; `None` for the root index.
    pub id: Option<String>,
    /// Path relative to the output directory.
    pub path: PathBuf,
    pub content: String,
}

/// Outcome counts of [`PagePlan::write_to`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub written: usize,
    pub unchanged: usize,
}

/// Every page one build produces, in depth-first order after the root index.
#[derive(Debug, Clone, Default)]
pub struct PagePlan {
    pub pages: Vec<PlannedPage>,
}

/// Relative output path of the page owned by `id`.
///
/// `None` for ids that cannot name a page directory (see [`page_segments`]).
/// Every returned path has at least one directory, so it never collides with
/// the root index.
#[must_use]
pub fn page_path(id: &str) -> Option<PathBuf> {
    let mut path: PathBuf = page_segments(id)?.into_iter().collect();
    path.push(PAGE_FILE_NAME);
    Some(path)
}

/// Toctree entry for a page path: relative, forward slashes, no suffix.
fn toctree_target(path: &Path) -> String {
    path.with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

impl PagePlan {
    /// Plan the pages for a forest of roots.
    ///
    /// Pages whose directory lies below their parent page's directory are
    /// linked from the parent's toctree; every other page (roots, pages nested
    /// under inlined objects, and children with unrelated ids) is linked from
    /// the root index. Visible roots that do not own a page are inlined into
    /// the root index. Ids that cannot name a page path are skipped, and so is
    /// a second object mapping to an already planned path.
    #[must_use]
    pub fn build(renderer: &PageRenderer, roots: &[DocObject], index_title: &str) -> Self {
        let mut planner = Planner {
            renderer,
            pages: Vec::new(),
            seen: HashSet::new(),
            top_level: Vec::new(),
        };

        for root in roots {
            planner.visit(root, None);
        }

        let inline_roots: Vec<String> = roots
            .iter()
            .filter(|root| renderer.is_visible(root) && !renderer.is_own_page(root))
            .map(|root| renderer.render(root, RenderMode::Inline).trim_end().to_string())
            .collect();

        let index = PlannedPage {
            id: None,
            path: PathBuf::from(PAGE_FILE_NAME),
            content: render_index(index_title, &planner.top_level, &inline_roots),
        };

        let mut pages = Vec::with_capacity(planner.pages.len() + 1);
        pages.push(index);
        pages.extend(planner.pages);
        Self {
            pages,
        }
    }

    /// Pages owned by documentation objects, excluding the root index.
    pub fn object_pages(&self) -> impl Iterator<Item = &PlannedPage> {
        self.pages.iter().filter(|page| page.id.is_some())
    }

    /// Write every page below `out_dir`, creating directories as needed.
    pub async fn write_to(&self, out_dir: &Path) -> Result<WriteSummary> {
        let mut summary = WriteSummary::default();

        for page in &self.pages {
            let target = out_dir.join(&page.path);

            let current = fs::read_to_string(&target).await;
            if current.is_ok_and(|existing| existing == page.content) {
                tracing::debug!("Unchanged: {}", target.display());
                summary.unchanged += 1;
                continue;
            }

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).await.with_context(|| RstapiError::FileSystemError {
                    operation: "create page directory".to_string(),
                    path: parent.display().to_string(),
                })?;
            }

            fs::write(&target, &page.content)
                .await
                .with_context(|| format!("Failed to write page {}", target.display()))?;
            tracing::debug!("Wrote {}", target.display());
            summary.written += 1;
        }

        Ok(summary)
    }
}

struct Planner<'a> {
    renderer: &'a PageRenderer,
    pages: Vec<PlannedPage>,
    seen: HashSet<PathBuf>,
    top_level: Vec<String>,
}

impl Planner<'_> {
    /// `parent_page` is the id of the nearest enclosing object, if it was
    /// planned as a page.
    fn visit(&mut self, obj: &DocObject, parent_page: Option<&str>) {
        if !self.renderer.is_visible(obj) {
            return;
        }

        let mut this_page = None;
        if self.renderer.is_own_page(obj) {
            match page_path(&obj.id) {
                None => {
                    tracing::warn!("Skipping page for '{}': id is not usable as a file path", obj.id);
                }
                Some(path) if self.seen.contains(&path) => {
                    tracing::warn!(
                        "Duplicate page {} for '{}', keeping the first occurrence",
                        path.display(),
                        obj.id
                    );
                    return;
                }
                Some(path) => {
                    let linked_by_parent = parent_page
                        .is_some_and(|parent| child_page_target(parent, &obj.id).is_some());
                    if !linked_by_parent {
                        self.top_level.push(toctree_target(&path));
                    }
                    self.seen.insert(path.clone());
                    self.pages.push(PlannedPage {
                        id: Some(obj.id.clone()),
                        path,
                        content: self.renderer.render(obj, RenderMode::Page),
                    });
                    this_page = Some(obj.id.as_str());
                }
            }
        }

        for child in &obj.children {
            self.visit(child, this_page);
        }
    }
}

fn render_index(title: &str, entries: &[String], inline_roots: &[String]) -> String {
    let mut blocks = vec![heading(title, '=')];
    if !entries.is_empty() {
        blocks.push(toctree(&[":titlesonly:"], entries));
    }
    blocks.extend(inline_roots.iter().cloned());

    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}
