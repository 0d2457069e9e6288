//! Configuration for rstapi
//!
//! Rendering is controlled by a single TOML file, `rstapi.toml`, read from the
//! current directory or from the path given with `--config`. Every key is
//! optional:
//!
//! ```toml
//! domain = "py"
//! own_page_types = ["package", "module"]
//! group_by_kind = false
//! include_private = true
//! ignore = ["*.tests.*", "*._vendor*"]
//! output_dir = "autoapi"
//! index_title = "API Reference"
//! members_heading = "Members"
//! ```

mod render;

pub use render::{CONFIG_FILE_NAME, RenderConfig};
