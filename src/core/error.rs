//! Error handling for rstapi
//!
//! The error system follows two rules:
//! 1. **Strongly-typed errors** ([`RstapiError`]) for the failure cases code needs to match on
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable suggestions for CLI users
//!
//! Page rendering itself never fails: a missing docstring or an empty child list
//! simply omits that block. Every error here comes from the surrounding pipeline
//! (reading input, loading configuration, writing pages, scaffolding a docs directory).
//!
//! # Examples
//!
//! ```rust,no_run
//! use rstapi_cli::core::{RstapiError, user_friendly_error};
//!
//! let error = RstapiError::ObjectNotFound {
//!     id: "pkg.missing".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Enumerated failure cases of rstapi.
#[derive(Error, Debug, Clone)]
pub enum RstapiError {
    /// Configuration file is invalid (bad TOML, bad glob pattern, unknown field).
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of what is wrong with the configuration
        message: String,
    },

    /// An explicitly requested file does not exist.
    #[error("Input file not found: {path}")]
    InputNotFound {
        /// Path that was requested
        path: String,
    },

    /// The input file extension does not map to a known serialization format.
    #[error("Unsupported input format for '{path}'")]
    UnsupportedInputFormat {
        /// Path with the unrecognized extension
        path: String,
    },

    /// The input file could not be deserialized into documentation objects.
    #[error("Invalid documentation input in {file}")]
    InputParseError {
        /// File that failed to parse
        file: String,
        /// Parser message
        reason: String,
    },

    /// No object with the requested identifier exists in the tree.
    #[error("No documentation object with id '{id}'")]
    ObjectNotFound {
        /// Identifier that was looked up
        id: String,
    },

    /// `init` would overwrite an existing documentation directory.
    #[error("Documentation directory already initialized: {path}")]
    AlreadyInitialized {
        /// Directory containing the existing `conf.py`
        path: String,
    },

    /// A filesystem operation failed.
    #[error("File system error: {operation}")]
    FileSystemError {
        /// The operation that failed (e.g. "write page")
        operation: String,
        /// Path the operation was applied to
        path: String,
    },

    /// One of the embedded scaffold templates failed to render.
    #[error("Failed to render scaffold template '{template}': {reason}")]
    ScaffoldTemplateError {
        /// Template name
        template: String,
        /// Tera error message
        reason: String,
    },

    /// Other error
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// Error wrapper carrying a suggestion and details for display.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying rstapi error
    pub error: RstapiError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: RstapiError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`RstapiError`] anywhere in the context chain, then
/// [`std::io::Error`] and [`toml::de::Error`]. Anything else is reported with its
/// full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(rstapi_error) = error.downcast_ref::<RstapiError>() {
        return create_error_context(rstapi_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(RstapiError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check file ownership and permissions of the output directory")
                .with_details(format_chain(&error));
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(RstapiError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct")
                .with_details(format_chain(&error));
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(RstapiError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax. Verify quotes, brackets, and key names");
    }

    ErrorContext::new(RstapiError::Other {
        message: format_chain(&error),
    })
}

/// Render an error followed by its numbered cause chain.
fn format_chain(error: &anyhow::Error) -> String {
    let mut message = error.to_string();

    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    message
}

/// Map each [`RstapiError`] variant to a tailored suggestion.
fn create_error_context(error: RstapiError) -> ErrorContext {
    match &error {
        RstapiError::ConfigError {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Check rstapi.toml: valid keys are domain, own_page_types, group_by_kind, \
             include_private, ignore, output_dir, index_title and members_heading",
        ),
        RstapiError::InputNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the path passed to the command and try again"),
        RstapiError::UnsupportedInputFormat {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Use a .json, .yaml, .yml or .toml file"),
        RstapiError::InputParseError {
            reason,
            ..
        } => {
            let details = reason.clone();
            ErrorContext::new(error)
                .with_details(details)
                .with_suggestion("Every object needs an 'id'; 'type' must be a known kind such as module or class")
        }
        RstapiError::ObjectNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Run 'rstapi list <INPUT>' to see the identifiers of pages in the input"),
        RstapiError::AlreadyInitialized {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Use --force to overwrite the existing files"),
        RstapiError::FileSystemError {
            path,
            ..
        } => {
            let details = format!("Path: {path}");
            ErrorContext::new(error)
                .with_details(details)
                .with_suggestion("Check that the directory is writable and has free space")
        }
        RstapiError::ScaffoldTemplateError {
            ..
        }
        | RstapiError::Other {
            ..
        } => ErrorContext::new(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_context_display_includes_details_and_suggestion() {
        let ctx = ErrorContext::new(RstapiError::ObjectNotFound {
            id: "pkg.mod".to_string(),
        })
        .with_details("looked in 3 roots")
        .with_suggestion("check the id");

        let text = ctx.to_string();
        assert!(text.contains("No documentation object with id 'pkg.mod'"));
        assert!(text.contains("Details: looked in 3 roots"));
        assert!(text.contains("Suggestion: check the id"));
    }

    #[test]
    fn test_user_friendly_error_finds_typed_error_behind_context() {
        let error = anyhow::Error::from(RstapiError::UnsupportedInputFormat {
            path: "tree.xml".to_string(),
        })
        .context("Failed to load documentation input");

        let ctx = user_friendly_error(error);
        assert!(matches!(ctx.error, RstapiError::UnsupportedInputFormat { .. }));
        assert!(ctx.suggestion.unwrap().contains(".json"));
    }

    #[test]
    fn test_user_friendly_error_io_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let ctx = user_friendly_error(anyhow::Error::from(io));
        assert!(matches!(ctx.error, RstapiError::FileSystemError { .. }));
        assert!(ctx.suggestion.is_some());
    }

    #[test]
    fn test_user_friendly_error_generic_keeps_cause_chain() {
        let error = anyhow::anyhow!("root cause").context("outer failure");
        let ctx = user_friendly_error(error);

        let text = ctx.error.to_string();
        assert!(text.starts_with("outer failure"));
        assert!(text.contains("Caused by:"));
        assert!(text.contains("1: root cause"));
    }
}
