#![deny(clippy::unwrap_used, clippy::expect_used)]

use serde::{Deserialize, Serialize};

/// The broad class a failure belongs to, so that the caller can tell a storage problem
/// apart from a problem with the PDF library or with the configuration it was given.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCategory {
    /// The output file (or a configuration file) could not be created, read, written or renamed.
    Io,
    /// The PDF library failed to encode or serialize the document.
    Library,
    /// The configuration could not be parsed or describes a layout that does not fit the page.
    Configuration,
}

/// A struct that represents an error with a context and possibly the propagated source error.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ContextError {
    pub category: ErrorCategory,
    pub context: String,
    pub source_error: Option<String>,
}

impl std::fmt::Display for ContextError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source_error {
            Some(source_error) => write!(
                formatter,
                "{}: {}",
                self.context,
                minimize_first_letter(source_error.to_string()),
            ),
            None => write!(formatter, "{}", self.context),
        }
    }
}

impl std::error::Error for ContextError {}

impl ContextError {
    /// Create a new `ContextError` in the given category with only a context.
    pub fn with_context<S: Into<String>>(category: ErrorCategory, context: S) -> ContextError {
        ContextError {
            category,
            context: context.into(),
            source_error: None,
        }
    }

    /// Create a new `ContextError` in the given category with the context and the source error.
    pub fn with_error<S: Into<String>>(
        category: ErrorCategory,
        context: S,
        error: &dyn std::error::Error,
    ) -> ContextError {
        ContextError {
            category,
            context: context.into(),
            source_error: Some(error.to_string()),
        }
    }

    /// Shorthand for an I/O failure propagated from the standard library.
    pub fn io<S: Into<String>>(context: S, error: &std::io::Error) -> ContextError {
        ContextError::with_error(ErrorCategory::Io, context, error)
    }

    /// Shorthand for a failure propagated from `lopdf`.
    pub fn library<S: Into<String>>(context: S, error: &lopdf::Error) -> ContextError {
        ContextError::with_error(ErrorCategory::Library, context, error)
    }

    /// Shorthand for a configuration problem which has no underlying source error.
    pub fn configuration<S: Into<String>>(context: S) -> ContextError {
        ContextError::with_context(ErrorCategory::Configuration, context)
    }
}

/// Minimizes the first letter of a string, it is used for standardizing the error message.
fn minimize_first_letter(string: String) -> String {
    let mut characters = string.chars();
    match characters.next() {
        None => String::new(),
        Some(character) => character.to_lowercase().chain(characters).collect(),
    }
}
