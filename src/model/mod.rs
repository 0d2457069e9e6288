//! Documentation object model.
//!
//! A [`DocObject`] describes one code-level entity (package, module, class,
//! function, ...) as produced by an external extraction tool. The tree is
//! constructed once by [`loader`] and is never mutated by rendering.
//!
//! # Input shape
//!
//! ```yaml
//! id: pkg.mod
//! type: module
//! docstring: Does X.
//! children:
//!   - id: pkg.mod.Foo
//!     type: class
//!     signature: "(value)"
//! ```
//!
//! `name` defaults to the last dotted segment of `id`, `display` defaults to
//! `true`, and `type` defaults to `module`.

pub mod docstring;
pub mod loader;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use docstring::clean_docstring;
pub use loader::{InputFormat, load_objects, parse_objects};

/// Category of a documented entity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Package,
    #[default]
    Module,
    Class,
    Exception,
    Function,
    Method,
    Property,
    Attribute,
    Data,
}

impl ObjectKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Package,
        Self::Module,
        Self::Class,
        Self::Exception,
        Self::Function,
        Self::Method,
        Self::Property,
        Self::Attribute,
        Self::Data,
    ];

    /// Directive name used in declarations (`.. py:<directive>::`).
    #[must_use]
    pub const fn directive(self) -> &'static str {
        match self {
            Self::Package | Self::Module => "module",
            Self::Class => "class",
            Self::Exception => "exception",
            Self::Function => "function",
            Self::Method => "method",
            Self::Property => "property",
            Self::Attribute => "attribute",
            Self::Data => "data",
        }
    }

    /// Subsection title used when members are grouped by kind.
    #[must_use]
    pub const fn section_title(self) -> &'static str {
        match self {
            Self::Package | Self::Module => "Modules",
            Self::Attribute | Self::Data => "Attributes",
            Self::Exception => "Exceptions",
            Self::Class => "Classes",
            Self::Function => "Functions",
            Self::Method => "Methods",
            Self::Property => "Properties",
        }
    }

    /// Packages and modules are declared by their full identifier.
    #[must_use]
    pub const fn is_module_like(self) -> bool {
        matches!(self, Self::Package | Self::Module)
    }

    /// Lowercase name as it appears in input files and configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Package => "package",
            Self::Module => "module",
            Self::Class => "class",
            Self::Exception => "exception",
            Self::Function => "function",
            Self::Method => "method",
            Self::Property => "property",
            Self::Attribute => "attribute",
            Self::Data => "data",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown object kind '{s}'"))
    }
}

const fn default_display() -> bool {
    true
}

/// One documented entity and its nested children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocObject {
    /// Fully-qualified name, used as the page heading.
    pub id: String,

    /// Short name for inline declarations. Falls back to the last segment of `id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docstring: Option<String>,

    /// Argument list of callables, rendered verbatim after the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DocObject>,

    /// Whether the extraction tool wants this object rendered at all.
    #[serde(default = "default_display")]
    pub display: bool,

    #[serde(rename = "type", default)]
    pub kind: ObjectKind,
}

impl DocObject {
    /// Create a displayed object with no docstring or children.
    pub fn new(id: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            id: id.into(),
            name: None,
            docstring: None,
            signature: None,
            children: Vec::new(),
            display: true,
            kind,
        }
    }

    #[must_use]
    pub fn with_docstring(mut self, docstring: impl Into<String>) -> Self {
        self.docstring = Some(docstring.into());
        self
    }

    #[must_use]
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: DocObject) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.display = false;
        self
    }

    /// Last dotted segment of the identifier.
    #[must_use]
    pub fn last_segment(&self) -> &str {
        self.id.rsplit('.').next().unwrap_or(&self.id)
    }

    /// The short name used in inline declarations.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => self.last_segment(),
        }
    }

    /// Private names start with an underscore but are not dunders.
    #[must_use]
    pub fn is_private(&self) -> bool {
        let name = self.display_name();
        name.starts_with('_') && !is_dunder(name)
    }

    /// The docstring after cleaning, or `None` when absent or blank.
    #[must_use]
    pub fn cleaned_docstring(&self) -> Option<String> {
        self.docstring.as_deref().and_then(clean_docstring)
    }

    /// Depth-first search for an object with the given identifier.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&DocObject> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Number of objects in this subtree, including `self`.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(DocObject::count).sum::<usize>()
    }
}

/// `__name__` style: two underscores on each side, and no third one next to them.
fn is_dunder(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() >= 5
        && name.starts_with("__")
        && name.ends_with("__")
        && bytes[2] != b'_'
        && bytes[bytes.len() - 3] != b'_'
}

/// Search a forest of roots for an identifier.
#[must_use]
pub fn find_in<'a>(roots: &'a [DocObject], id: &str) -> Option<&'a DocObject> {
    roots.iter().find_map(|root| root.find(id))
}
