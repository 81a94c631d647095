use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for schema loading (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Carries the raw file content and its display name so validation code
/// can attach labelled spans without threading both through every call.
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

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Find the first quoted occurrence of `name` in the source.
    pub fn find_quoted(&self, name: &str) -> Option<SourceSpan> {
        let quoted = format!("\"{}\"", name);
        self.src
            .find(&quoted)
            .map(|pos| SourceSpan::from((pos + 1, name.len())))
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            filename: self.filename.clone(),
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error, pointing at `needle` when it can be found.
    pub fn validation_error(&self, message: impl Into<String>, needle: &str) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: self.find_quoted(needle),
            message: message.into(),
        })
    }

    /// Create a duplicate table error.
    pub fn duplicate_table_error(&self, name: &str) -> Box<Error> {
        let first = self.find_quoted(name);
        let second = first.and_then(|span| {
            let offset = span.offset() + span.len();
            self.src[offset..]
                .find(&format!("\"{}\"", name))
                .map(|pos| SourceSpan::from((offset + pos + 1, name.len())))
        });
        Box::new(Error::DuplicateTable {
            src: self.named_source(),
            first_span: first,
            second_span: second,
            name: name.to_string(),
        })
    }

    /// Create an unknown lookup target error.
    pub fn unknown_lookup_error(&self, table: &str, field: &str, target: &str) -> Box<Error> {
        Box::new(Error::UnknownLookupTable {
            src: self.named_source(),
            span: self.find_quoted(target),
            table: table.to_string(),
            field: field.to_string(),
            target: target.to_string(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(fairy::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse '{filename}'")]
    #[diagnostic(code(fairy::parse_error))]
    Parse {
        filename: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("duplicate table '{name}'")]
    #[diagnostic(
        code(fairy::duplicate_table),
        help("table names must be unique within a dataset")
    )]
    DuplicateTable {
        #[source_code]
        src: NamedSource<String>,
        #[label("first declared here")]
        first_span: Option<SourceSpan>,
        #[label("declared again here")]
        second_span: Option<SourceSpan>,
        name: String,
    },

    #[error("lookup field '{table}.{field}' targets unknown table '{target}'")]
    #[diagnostic(
        code(fairy::unknown_lookup),
        help("a lookup target must name another table in the same dataset")
    )]
    UnknownLookupTable {
        #[source_code]
        src: NamedSource<String>,
        #[label("no table with this name")]
        span: Option<SourceSpan>,
        table: String,
        field: String,
        target: String,
    },

    #[error("template '{kind}' file '{path}' could not be read")]
    #[diagnostic(
        code(fairy::missing_template),
        help("template paths in template.toml are relative to the template package directory")
    )]
    MissingTemplate {
        kind: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(fairy::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}

impl Error {
    /// Create an I/O error for the given path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }
}
