//! Generation passes.
//!
//! Each pass walks the dataset once and renders every output file of a
//! single kind. Passes only render; writing and logging belong to the
//! [`TemplateWriter`](crate::TemplateWriter).
//!
//! Built-in passes, in execution order:
//! - [`EnumerationPass`] - one constants file per table
//! - [`RowPass`] - one row class per table
//! - [`TablePass`] - one table class per table, holding every row
//! - [`DatabasePass`] - a single file referencing every table
//! - [`PackagePass`] - auxiliary files copied with variables applied

mod database;
mod enumeration;
mod package;
mod row;
mod table;

use std::fmt;

pub use database::DatabasePass;
use datafairy_core::{File, TemplateFile};
use datafairy_schema::Dataset;
pub use enumeration::EnumerationPass;
pub use package::PackagePass;
pub use row::RowPass;
use serde::Serialize;
pub use table::TablePass;

use crate::{
    TypeResolver,
    error::PassError,
    fragments::{FragmentKind, FragmentRenderer},
    naming::NamingConvention,
    substitution::{PACKAGE_STRING, Substitution, TemplateVariables},
};

/// The kinds of output a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PassKind {
    Enumeration,
    Row,
    Table,
    Database,
    Package,
}

impl PassKind {
    /// Label used in "Created ... File" log messages.
    pub fn label(&self) -> &'static str {
        match self {
            PassKind::Enumeration => "Enum",
            PassKind::Row => "Row",
            PassKind::Table => "Table",
            PassKind::Database => "Database",
            PassKind::Package => "Package",
        }
    }
}

impl fmt::Display for PassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassKind::Enumeration => write!(f, "enumeration"),
            PassKind::Row => write!(f, "row"),
            PassKind::Table => write!(f, "table"),
            PassKind::Database => write!(f, "database"),
            PassKind::Package => write!(f, "package"),
        }
    }
}

/// The template slots a run can fill.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    pub database: Option<TemplateFile>,
    pub table: Option<TemplateFile>,
    pub row: Option<TemplateFile>,
    pub enumeration: Option<TemplateFile>,
    pub package_files: Vec<TemplateFile>,
}

impl TemplateSet {
    /// The template for a single-slot pass.
    pub fn slot(&self, kind: PassKind) -> Option<&TemplateFile> {
        match kind {
            PassKind::Enumeration => self.enumeration.as_ref(),
            PassKind::Row => self.row.as_ref(),
            PassKind::Table => self.table.as_ref(),
            PassKind::Database => self.database.as_ref(),
            PassKind::Package => None,
        }
    }
}

/// Everything a pass reads while rendering.
pub struct GenerationContext<'a> {
    pub dataset: &'a Dataset,
    pub templates: &'a TemplateSet,
    pub fragments: &'a dyn FragmentRenderer,
    pub types: &'a TypeResolver,
    pub naming: &'a NamingConvention,
    pub variables: &'a TemplateVariables,
    /// Package string after case normalisation.
    pub package: &'a str,
}

impl GenerationContext<'_> {
    /// Fail with [`PassError::MissingFragment`] unless every kind is supported.
    pub fn require(&self, pass: PassKind, kinds: &[FragmentKind]) -> Result<(), PassError> {
        match kinds.iter().find(|k| !self.fragments.supports(**k)) {
            Some(&fragment) => Err(PassError::MissingFragment { pass, fragment }),
            None => Ok(()),
        }
    }

    /// Start a substitution with user variables and the package string applied.
    pub fn substitute(&self, template: &TemplateFile) -> Substitution {
        Substitution::new(template.contents())
            .variables(self.variables)
            .replace(PACKAGE_STRING, self.package)
    }
}

/// A rendered file plus the name it is reported under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub name: String,
    pub file: File,
}

/// A single generation pass.
pub trait Pass {
    fn kind(&self) -> PassKind;

    /// Fragment kinds this pass cannot render without.
    fn required_fragments(&self) -> &'static [FragmentKind] {
        &[]
    }

    /// Render every file of this kind.
    ///
    /// Returns `Ok(None)` when the pass has no template to work from. A
    /// missing template is checked before missing fragments.
    fn render(&self, ctx: &GenerationContext<'_>) -> Result<Option<Vec<GeneratedFile>>, PassError>;
}

/// The built-in passes in execution order.
pub fn builtin() -> Vec<Box<dyn Pass>> {
    vec![
        Box::new(EnumerationPass),
        Box::new(RowPass),
        Box::new(TablePass),
        Box::new(DatabasePass),
        Box::new(PackagePass),
    ]
}
