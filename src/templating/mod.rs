//! Tera templating for generated project files.
//!
//! API pages have a fixed layout and are produced by [`crate::render`]. The
//! files around them (Sphinx `conf.py`, the docs `index.rst`, `Makefile`,
//! `README.md`, `requirements.txt`, `.gitignore`) are embedded Tera templates
//! rendered once by `rstapi init`.
//!
//! # Template Context
//!
//! - `project`: project name, also used as the docs title
//! - `author`: copyright holder
//! - `year`: copyright year
//! - `output_dir`: where `rstapi build` writes pages
//! - `title_underline`: `=` repeated to the width of `project`
//! - `api_index`: toctree entry of the generated API index

mod scaffold;

pub use scaffold::{ScaffoldContext, ScaffoldRenderer};
