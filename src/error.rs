//! Error types for the retex library.

use std::io;
use thiserror::Error;

/// Result type alias for retex operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during markup conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A delimiter pair never closed before the input ended.
    #[error("unbalanced '{open}…{close}' starting near offset {offset}")]
    UnbalancedDelimiter {
        /// Opening delimiter character
        open: char,
        /// Closing delimiter character
        close: char,
        /// Offset of the opening delimiter in the scanned text
        offset: usize,
    },

    /// An expected environment block is absent or malformed.
    #[error("environment '{name}' not found: {detail}")]
    EnvironmentNotFound {
        /// Environment name that was searched for
        name: String,
        /// What went wrong (missing begin, unmatched end, parameter count)
        detail: String,
    },

    /// A required structural signature was not found in the input.
    #[error("no match for `{pattern}` while parsing {kind}; input starts: {snippet:?}")]
    PatternMismatch {
        /// Section kind being parsed
        kind: String,
        /// Source of the expected pattern, for diagnostics
        pattern: String,
        /// Leading slice of the offending text
        snippet: String,
    },

    /// The type name has no registered parse config or template.
    #[error("unknown section type: {0}")]
    UnknownType(String),

    /// A parse operation failed; carries the kind and operation for context.
    #[error("parse of {kind} failed in operation '{operation}'")]
    Parse {
        /// Section kind being parsed
        kind: String,
        /// Name of the failing operation
        operation: String,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },

    /// A template variable required for generation is missing.
    #[error("cannot generate {kind}: missing required field '{field}'")]
    MissingField {
        /// Section kind being generated
        kind: String,
        /// Dotted path of the missing field
        field: String,
    },

    /// Document-level structure is invalid (missing markers, bad layout).
    #[error("document structure error: {0}")]
    Structure(String),

    /// YAML serialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build a [`Error::PatternMismatch`] with a bounded snippet of the input.
    pub fn pattern_mismatch(kind: &str, pattern: &str, text: &str) -> Self {
        let snippet: String = text.chars().take(80).collect();
        Error::PatternMismatch {
            kind: kind.to_string(),
            pattern: pattern.to_string(),
            snippet,
        }
    }

    /// The innermost error in a chain of parse wrappers.
    ///
    /// Used to surface the offending construct from a whole-document failure
    /// without the caller unwinding the wrapping layers by hand.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Parse { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownType("mystery".to_string());
        assert_eq!(err.to_string(), "unknown section type: mystery");

        let err = Error::UnbalancedDelimiter {
            open: '{',
            close: '}',
            offset: 12,
        };
        assert_eq!(err.to_string(), "unbalanced '{…}' starting near offset 12");
    }

    #[test]
    fn test_root_cause_unwraps_parse_layers() {
        let inner = Error::pattern_mismatch("skill_category", r"\\item", "junk");
        let wrapped = Error::Parse {
            kind: "skill_categories".to_string(),
            operation: "recursive_parse".to_string(),
            source: Box::new(inner),
        };
        assert!(matches!(
            wrapped.root_cause(),
            Error::PatternMismatch { .. }
        ));
    }

    #[test]
    fn test_snippet_is_bounded() {
        let long = "x".repeat(500);
        if let Error::PatternMismatch { snippet, .. } =
            Error::pattern_mismatch("unknown", "p", &long)
        {
            assert_eq!(snippet.len(), 80);
        } else {
            panic!("expected PatternMismatch");
        }
    }
}
