//! Page and inline rendering of documentation objects.
//!
//! [`PageRenderer`] turns a [`DocObject`] into reStructuredText in one of two
//! modes:
//!
//! - [`RenderMode::Page`]: the object owns a page. Its identifier becomes the
//!   page title, followed by its declaration, its docstring, a toctree of
//!   children that own pages of their own, and its remaining children inlined
//!   under a `-` subheading.
//! - [`RenderMode::Inline`]: the object is embedded in its parent's page. It is
//!   a declaration with the docstring and children nested three spaces deeper.
//!
//! Which kinds own a page is configured by `own_page_types`. An object is
//! rendered exactly once: on its own page, or inline in its parent's page,
//! never both. Objects that are not visible (see [`PageRenderer::is_visible`])
//! render to the empty string together with their whole subtree.
//!
//! Rendering is pure: no I/O, no mutation, and no failure modes. Missing
//! optional fields omit their block.
//!
//! # Example
//!
//! ```rust,no_run
//! use rstapi_cli::config::RenderConfig;
//! use rstapi_cli::model::{DocObject, ObjectKind};
//! use rstapi_cli::render::{PageRenderer, RenderMode};
//!
//! let renderer = PageRenderer::new(&RenderConfig::default()).unwrap();
//! let module = DocObject::new("pkg.mod", ObjectKind::Module).with_docstring("Does X.");
//!
//! let page = renderer.render(&module, RenderMode::Page);
//! assert!(page.starts_with("pkg.mod\n=======\n"));
//! ```

pub mod rst;

use crate::config::RenderConfig;
use crate::core::RstapiError;
use crate::model::{DocObject, ObjectKind};

use rst::{DIRECTIVE_INDENT, domain_directive, heading, indent, nested_parse, toctree};

/// Title underline character of a page.
const PAGE_UNDERLINE: char = '=';

/// Underline character of subsections within a page.
const SECTION_UNDERLINE: char = '-';

/// Title of the toctree section that links child pages.
const SUBPAGES_HEADING: &str = "Submodules";

/// Subsection order when members are grouped by kind.
const SECTION_ORDER: [&str; 7] =
    ["Attributes", "Exceptions", "Classes", "Functions", "Methods", "Properties", "Modules"];

/// Directory segments of the page owned by `id`.
///
/// `None` when the id cannot name a page directory: it is empty, has an empty
/// dot-separated segment, or a segment contains a path separator.
#[must_use]
pub fn page_segments(id: &str) -> Option<Vec<&str>> {
    let segments: Vec<&str> = id.split('.').collect();
    segments
        .iter()
        .all(|segment| !segment.is_empty() && !segment.contains(['/', '\\']))
        .then_some(segments)
}

/// Toctree entry linking the page of `child_id` from the page of `parent_id`.
///
/// `None` unless the child's page directory lies strictly below the parent's.
#[must_use]
pub fn child_page_target(parent_id: &str, child_id: &str) -> Option<String> {
    let parent = page_segments(parent_id)?;
    let child = page_segments(child_id)?;
    if child.len() <= parent.len() || !child.starts_with(&parent) {
        return None;
    }
    Some(format!("{}/index", child[parent.len()..].join("/")))
}

/// Where an object is placed in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// The object gets a page of its own.
    Page,
    /// The object is embedded in its parent's page.
    Inline,
}

/// Stateless renderer configured from a [`RenderConfig`].
#[derive(Debug, Clone)]
pub struct PageRenderer {
    domain: String,
    own_page_types: Vec<ObjectKind>,
    group_by_kind: bool,
    include_private: bool,
    members_heading: String,
    ignore: Vec<glob::Pattern>,
}

impl PageRenderer {
    /// Build a renderer, compiling the configured ignore patterns.
    pub fn new(config: &RenderConfig) -> Result<Self, RstapiError> {
        Ok(Self {
            domain: config.domain.clone(),
            own_page_types: config.own_page_types.clone(),
            group_by_kind: config.group_by_kind,
            include_private: config.include_private,
            members_heading: config.members_heading.clone(),
            ignore: config.ignore_patterns()?,
        })
    }

    /// Whether the object is rendered at all.
    ///
    /// Requires `display`, no matching ignore pattern, and either a public
    /// name or `include_private`.
    #[must_use]
    pub fn is_visible(&self, obj: &DocObject) -> bool {
        if !obj.display {
            return false;
        }
        if !self.include_private && obj.is_private() {
            return false;
        }
        !self.ignore.iter().any(|pattern| pattern.matches(&obj.id))
    }

    /// Whether the object's kind is rendered on a page of its own.
    #[must_use]
    pub fn is_own_page(&self, obj: &DocObject) -> bool {
        self.own_page_types.contains(&obj.kind)
    }

    /// Visible children that own a page, in parent order.
    pub fn page_children<'a>(&'a self, obj: &'a DocObject) -> impl Iterator<Item = &'a DocObject> {
        obj.children.iter().filter(|child| self.is_visible(child) && self.is_own_page(child))
    }

    /// Visible children rendered inline, in parent order.
    pub fn inline_children<'a>(
        &'a self,
        obj: &'a DocObject,
    ) -> impl Iterator<Item = &'a DocObject> {
        obj.children.iter().filter(|child| self.is_visible(child) && !self.is_own_page(child))
    }

    /// Render an object. Invisible objects produce an empty string.
    ///
    /// Non-empty output always ends with a single newline.
    #[must_use]
    pub fn render(&self, obj: &DocObject, mode: RenderMode) -> String {
        if !self.is_visible(obj) {
            tracing::debug!("Skipping hidden object {}", obj.id);
            return String::new();
        }

        let mut out = match mode {
            RenderMode::Page => self.page_body(obj),
            RenderMode::Inline => self.inline_body(obj),
        };
        out.push('\n');
        out
    }

    /// Find `id` in `roots`, descending only through visible objects.
    ///
    /// Objects below a hidden ancestor are hidden with it and are not found.
    #[must_use]
    pub fn find_visible<'a>(&self, roots: &'a [DocObject], id: &str) -> Option<&'a DocObject> {
        roots.iter().filter(|obj| self.is_visible(obj)).find_map(|obj| {
            if obj.id == id {
                Some(obj)
            } else {
                self.find_visible(&obj.children, id)
            }
        })
    }

    fn page_body(&self, obj: &DocObject) -> String {
        let mut blocks = vec![heading(&obj.id, PAGE_UNDERLINE), self.declaration(obj)];

        if let Some(doc) = obj.cleaned_docstring() {
            blocks.push(nested_parse(&doc));
        }

        let entries: Vec<String> = self
            .page_children(obj)
            .filter_map(|child| child_page_target(&obj.id, &child.id))
            .collect();
        if !entries.is_empty() {
            blocks.push(heading(SUBPAGES_HEADING, SECTION_UNDERLINE));
            blocks.push(toctree(&[":maxdepth: 1"], &entries));
        }

        let members: Vec<&DocObject> = self.inline_children(obj).collect();
        if !members.is_empty() {
            if self.group_by_kind {
                for title in SECTION_ORDER {
                    let mut group =
                        members.iter().filter(|child| child.kind.section_title() == title).peekable();
                    if group.peek().is_none() {
                        continue;
                    }
                    blocks.push(heading(title, SECTION_UNDERLINE));
                    blocks.extend(group.map(|child| self.inline_body(child)));
                }
            } else {
                blocks.push(heading(&self.members_heading, SECTION_UNDERLINE));
                blocks.extend(members.iter().map(|child| self.inline_body(child)));
            }
        }

        blocks.join("\n\n")
    }

    fn inline_body(&self, obj: &DocObject) -> String {
        let mut blocks = vec![self.declaration(obj)];

        if let Some(doc) = obj.cleaned_docstring() {
            blocks.push(indent(&nested_parse(&doc), DIRECTIVE_INDENT));
        }

        for child in self.inline_children(obj) {
            blocks.push(indent(&self.inline_body(child), DIRECTIVE_INDENT));
        }

        blocks.join("\n\n")
    }

    fn declaration(&self, obj: &DocObject) -> String {
        let target = if obj.kind.is_module_like() {
            obj.id.clone()
        } else {
            format!("{}{}", obj.display_name(), obj.signature.as_deref().unwrap_or_default())
        };
        domain_directive(&self.domain, obj.kind.directive(), &target)
    }
}
