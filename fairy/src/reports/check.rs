//! Check command report data structures.

use std::path::PathBuf;

use serde::Serialize;

use super::output::{Output, Report};

/// Report data from checking a dataset against its templates.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub dataset_path: PathBuf,
    pub template_dir: PathBuf,
    pub tables: usize,
    pub rows: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.warning(&format!("error: {}", error));
        }

        for warning in &self.warnings {
            out.warning(&format!("warning: {}", warning));
        }

        for info in &self.infos {
            out.preformatted(&format!("info: {}", info));
        }

        if !self.warnings.is_empty() || !self.errors.is_empty() || !self.infos.is_empty() {
            out.newline();
        }

        if self.is_valid() {
            out.preformatted(&format!(
                "✓ {} is ready for {}",
                self.dataset_path.display(),
                self.template_dir.display()
            ));
            out.list_item(&format!("{} tables", self.tables));
            out.list_item(&format!("{} rows", self.rows));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::test_support::Recorder;

    fn report(errors: Vec<String>) -> CheckReport {
        CheckReport {
            dataset_path: PathBuf::from("data.toml"),
            template_dir: PathBuf::from("csharp"),
            tables: 2,
            rows: 4,
            errors,
            warnings: vec!["row id '1' appears 2 times in table 'Item'".to_string()],
            infos: Vec::new(),
        }
    }

    #[test]
    fn test_valid_report() {
        let mut out = Recorder::default();
        report(Vec::new()).render(&mut out);

        assert_eq!(
            out.lines,
            [
                "! warning: row id '1' appears 2 times in table 'Item'",
                "",
                "✓ data.toml is ready for csharp",
                "  - 2 tables",
                "  - 4 rows",
            ]
        );
    }

    #[test]
    fn test_errors_make_report_invalid() {
        let report = report(vec!["missing fragment".to_string()]);
        assert!(!report.is_valid());

        let mut out = Recorder::default();
        report.render(&mut out);
        assert_eq!(out.lines[0], "! error: missing fragment");
        assert!(!out.lines.iter().any(|l| l.starts_with('✓')));
    }
}
