use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for apigen-spec operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Carries the raw text and a display name so parse and config errors can
/// point at the offending location.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Convert a 1-based line/column pair into a single-character span.
    pub fn span_at(&self, line: usize, column: usize) -> Option<SourceSpan> {
        if line == 0 {
            return None;
        }
        let line_start: usize = self
            .src
            .split_inclusive('\n')
            .take(line - 1)
            .map(str::len)
            .sum();
        let offset = (line_start + column.saturating_sub(1)).min(self.src.len());
        Some(SourceSpan::from((offset, 1)))
    }

    /// Create a parse error once every serialization attempt has failed.
    pub fn parse_error(&self, message: impl Into<String>, span: Option<SourceSpan>) -> Box<Error> {
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    /// Create a configuration error.
    pub fn config_error(&self, message: impl Into<String>, span: Option<SourceSpan>) -> Box<Error> {
        Box::new(Error::Config {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(apigen::io_error))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse document: {message}")]
    #[diagnostic(
        code(apigen::parse_error),
        help("the document must be valid JSON or YAML")
    )]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("{message}")]
    #[diagnostic(code(apigen::validation_error))]
    Validation {
        message: String,
        /// The top-level field that failed validation, if any.
        field: Option<String>,
        #[help]
        help: Option<String>,
    },

    #[error("invalid document at `{path}`: {message}")]
    #[diagnostic(code(apigen::structure_error))]
    Structure { path: String, message: String },

    #[error("invalid configuration: {message}")]
    #[diagnostic(code(apigen::config_error))]
    Config {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}

impl Error {
    /// Create an I/O error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }

    /// Create a validation error tied to a top-level field.
    pub fn validation(message: impl Into<String>, field: Option<&str>) -> Box<Self> {
        Box::new(Error::Validation {
            message: message.into(),
            field: field.map(str::to_string),
            help: None,
        })
    }

    /// Create a validation error with a hint for the user.
    pub fn validation_with_help(
        message: impl Into<String>,
        field: Option<&str>,
        help: impl Into<String>,
    ) -> Box<Self> {
        Box::new(Error::Validation {
            message: message.into(),
            field: field.map(str::to_string),
            help: Some(help.into()),
        })
    }

    /// Create a structure error at a dotted document path.
    pub fn structure(path: impl Into<String>, message: impl Into<String>) -> Box<Self> {
        Box::new(Error::Structure {
            path: path.into(),
            message: message.into(),
        })
    }

    /// Whether this error came from the serialization layer.
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }

    /// Whether this error came from document validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. } | Error::Structure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_at_first_line() {
        let ctx = SourceContext::new("{\"a\": }", "api.json");
        let span = ctx.span_at(1, 7).unwrap();
        assert_eq!(span.offset(), 6);
    }

    #[test]
    fn test_span_at_later_line() {
        let ctx = SourceContext::new("openapi: 3.0.0\ninfo: [\n", "api.yaml");
        let span = ctx.span_at(2, 1).unwrap();
        assert_eq!(span.offset(), 15);
    }

    #[test]
    fn test_span_clamped_to_source() {
        let ctx = SourceContext::new("{", "api.json");
        let span = ctx.span_at(1, 40).unwrap();
        assert_eq!(span.offset(), 1);
        assert!(ctx.span_at(0, 0).is_none());
    }

    #[test]
    fn test_validation_message() {
        let err = Error::validation("missing required field `paths`", Some("paths"));
        assert_eq!(err.to_string(), "missing required field `paths`");
        assert!(err.is_validation());
        assert!(!err.is_parse());
    }
}
