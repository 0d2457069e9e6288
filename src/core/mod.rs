//! Core types shared across rstapi
//!
//! - [`RstapiError`] - Enumerated error types covering every rstapi failure mode
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to the user-friendly format

pub mod error;

pub use error::{ErrorContext, RstapiError, user_friendly_error};
