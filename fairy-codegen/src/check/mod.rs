//! Static checks over a dataset and template set.
//!
//! Checks never render or write anything. They report configuration a run
//! would skip, abort on, or silently accept.

pub mod lints;

use std::fmt;

use datafairy_schema::Dataset;
pub use lints::{DuplicateRowIdLint, EnumNameLint, MissingFragmentLint, UnmappedTypeLint};
use serde::Serialize;

use crate::{TypeResolver, fragments::FragmentRenderer, passes::TemplateSet};

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A pass would abort.
    Error,
    /// Output would be produced but is probably not what was meant.
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A single finding from a lint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Name of the lint that produced this diagnostic.
    pub lint: &'static str,
    pub message: String,
    /// Optional location, e.g. `tables.Item` or `fragments.parameter`.
    pub location: Option<String>,
}

impl Diagnostic {
    pub fn error(lint: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, lint, message)
    }

    pub fn warning(lint: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, lint, message)
    }

    pub fn info(lint: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, lint, message)
    }

    fn new(severity: Severity, lint: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity,
            lint,
            message: message.into(),
            location: None,
        }
    }

    /// Add a location to this diagnostic.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " (at {})", loc)?;
        }
        Ok(())
    }
}

/// What a lint gets to look at.
pub struct CheckInput<'a> {
    pub dataset: &'a Dataset,
    pub templates: &'a TemplateSet,
    pub fragments: &'a dyn FragmentRenderer,
    pub types: &'a TypeResolver,
}

/// A lint over a dataset and its templates.
pub trait Lint: Send + Sync {
    /// The name of this lint.
    fn name(&self) -> &'static str;

    /// Short description of what this lint checks.
    fn description(&self) -> &'static str;

    /// Inspect the input and add any diagnostics.
    fn check(&self, input: &CheckInput<'_>, diagnostics: &mut Vec<Diagnostic>);
}

/// Runs a configurable set of lints.
pub struct Checker {
    lints: Vec<Box<dyn Lint>>,
}

impl Checker {
    /// A checker with every built-in lint.
    pub fn new() -> Self {
        Self {
            lints: vec![
                Box::new(MissingFragmentLint),
                Box::new(DuplicateRowIdLint),
                Box::new(EnumNameLint),
                Box::new(UnmappedTypeLint),
            ],
        }
    }

    /// Run every lint, most severe diagnostics first.
    pub fn run(&self, input: &CheckInput<'_>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for lint in &self.lints {
            lint.check(input, &mut diagnostics);
        }
        diagnostics.sort_by_key(|d| d.severity);
        diagnostics
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::warning("duplicate-row-id", "row id '7' appears 2 times")
            .at("tables.Item");
        assert_eq!(
            diag.to_string(),
            "warning: row id '7' appears 2 times (at tables.Item)"
        );
    }

    #[test]
    fn test_severity_order() {
        let mut severities = vec![Severity::Info, Severity::Error, Severity::Warning];
        severities.sort();
        assert_eq!(
            severities,
            [Severity::Error, Severity::Warning, Severity::Info]
        );
    }

    #[test]
    fn test_empty_dataset_reports_nothing() {
        let dataset = Dataset::new();
        let templates = TemplateSet::default();
        let fragments = crate::PatternFragments::default();
        let types = TypeResolver::default();
        let input = CheckInput {
            dataset: &dataset,
            templates: &templates,
            fragments: &fragments,
            types: &types,
        };

        assert!(Checker::new().run(&input).is_empty());
    }
}
