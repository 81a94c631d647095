//! Template-driven code generation for Data Fairy datasets.
//!
//! A [`TemplateWriter`] takes a validated [`Dataset`](datafairy_schema::Dataset),
//! a set of template bodies and a [`FragmentRenderer`] for the target
//! language, and writes one source file per table per template kind.
//!
//! # Module Organization
//!
//! - [`passes`] - The five generation passes and their shared context
//! - [`fragments`] - Target-language syntax for single constructs
//! - [`substitution`] - Placeholder tokens and template variable replacement
//! - [`check`] - Lints over a dataset and template set
//! - [`log`] - The per-run write log

pub mod check;
pub mod error;
pub mod fragments;
pub mod log;
pub mod naming;
pub mod passes;
pub mod substitution;
pub mod types;
mod writer;

pub use check::{Checker, Diagnostic, Lint, Severity};
pub use error::{GenerateError, PassError, Result};
pub use fragments::{FragmentKind, FragmentRenderer, PatternFragments};
pub use log::{LogEntry, LogLevel, RunLog};
pub use naming::NamingConvention;
pub use passes::{GeneratedFile, PassKind, TemplateSet};
pub use substitution::TemplateVariables;
pub use types::TypeResolver;
pub use writer::{
    PassReport, PassStatus, Preview, RunStatus, TemplateWriter, WriteReport, WriterConfig,
};
