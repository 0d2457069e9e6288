//! rstapi - reStructuredText API reference pages from documentation objects
//!
//! An external extraction tool describes a codebase as a tree of
//! documentation objects (identifier, short name, docstring, kind, children,
//! display flag). rstapi renders that tree into Sphinx-ready pages: packages
//! and modules get pages of their own, everything else is inlined into its
//! parent's page.
//!
//! # Modules
//!
//! - [`model`] - The documentation object tree and its loaders
//! - [`render`] - Pure page/inline rendering
//! - [`writer`] - Page planning and output for a whole tree
//! - [`config`] - `rstapi.toml` render configuration
//! - [`templating`] - Tera templates for the `init` scaffold
//! - [`cli`] - Command-line interface
//! - [`core`] - Errors and user-facing error reporting
//!
//! # Example
//!
//! ```rust,no_run
//! use rstapi_cli::config::RenderConfig;
//! use rstapi_cli::model::{DocObject, ObjectKind};
//! use rstapi_cli::render::{PageRenderer, RenderMode};
//!
//! let renderer = PageRenderer::new(&RenderConfig::default())?;
//! let module = DocObject::new("pkg.mod", ObjectKind::Module)
//!     .with_docstring("Does X.")
//!     .with_child(DocObject::new("pkg.mod.run", ObjectKind::Function).with_signature("()"));
//!
//! print!("{}", renderer.render(&module, RenderMode::Page));
//! # Ok::<(), rstapi_cli::core::RstapiError>(())
//! ```

// Core functionality modules
pub mod cli;
pub mod config;
pub mod core;

// Documentation model and output
pub mod model;
pub mod render;
pub mod templating;
pub mod writer;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
