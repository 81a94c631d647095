//! Check operation - lint a dataset against a template package.

use std::path::Path;

use datafairy_codegen::{Checker, Severity, TemplateWriter};
use datafairy_schema::{Dataset, TemplatePackage};

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Loading already validated the dataset structure; this runs the lints
/// that look at the dataset and templates together.
pub fn check(dataset: &Dataset, package: &TemplatePackage, dataset_path: &Path) -> CheckReport {
    let writer = TemplateWriter::from_package(dataset, package);
    let diagnostics = writer.check(&Checker::new());

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for diag in diagnostics {
        let msg = if let Some(loc) = &diag.location {
            format!("{}\n  --> {}", diag.message, loc)
        } else {
            diag.message.clone()
        };

        match diag.severity {
            Severity::Error => errors.push(msg),
            Severity::Warning => warnings.push(msg),
            Severity::Info => infos.push(msg),
        }
    }

    CheckReport {
        dataset_path: dataset_path.to_path_buf(),
        template_dir: package.dir().to_path_buf(),
        tables: dataset.tables.len(),
        rows: dataset.tables.iter().map(|t| t.rows.len()).sum(),
        errors,
        warnings,
        infos,
    }
}
