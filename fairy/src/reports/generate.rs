//! Generate command report data structures.

use std::path::PathBuf;

use datafairy_codegen::{LogLevel, PassKind, RunLog, RunStatus};
use serde::Serialize;

use super::output::{Output, Report};

/// Report data from a generate run.
#[derive(Debug, Serialize)]
pub struct GenerateReport {
    /// Template package name from template.toml.
    pub template_name: Option<String>,
    /// Outcome of each pass in execution order.
    pub passes: Vec<PassSummary>,
    /// The run log.
    pub log: RunLog,
    /// Files written, or previewed in a dry run.
    pub result: GenerationResult,
}

#[derive(Debug, Serialize)]
pub struct PassSummary {
    pub kind: PassKind,
    pub status: &'static str,
    pub files: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of generation.
#[derive(Debug, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum GenerationResult {
    /// Files were written to disk.
    Written {
        status: RunStatus,
        output_root: Option<PathBuf>,
        files: Vec<PathBuf>,
    },
    /// Dry-run preview.
    Preview { files: Vec<PreviewFile> },
}

/// A file in preview mode.
#[derive(Debug, Serialize)]
pub struct PreviewFile {
    /// Path relative to the output directory.
    pub path: String,
    pub content: String,
}

impl GenerateReport {
    /// The run completed and no pass aborted.
    pub fn is_success(&self) -> bool {
        let completed = match &self.result {
            GenerationResult::Written { status, .. } => *status == RunStatus::Completed,
            GenerationResult::Preview { .. } => true,
        };
        completed && self.passes.iter().all(|p| p.error.is_none())
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for entry in self.log.entries() {
            match entry.level {
                LogLevel::Warning | LogLevel::Aborted => out.warning(&entry.to_string()),
                LogLevel::Info | LogLevel::Skipped => out.preformatted(&entry.to_string()),
            }
        }

        if self.passes.is_empty() {
            return;
        }

        out.newline();
        match &self.template_name {
            Some(name) => out.section(&format!("Passes ({})", name)),
            None => out.section("Passes"),
        }
        for pass in &self.passes {
            let value = match &pass.error {
                Some(error) => format!("{} - {}", pass.status, error),
                None if pass.files > 0 => format!("{} ({} files)", pass.status, pass.files),
                None => pass.status.to_string(),
            };
            out.key_value_indented(&pass.kind.to_string(), &value);
        }

        match &self.result {
            GenerationResult::Written {
                output_root: Some(root),
                files,
                ..
            } => {
                out.newline();
                out.section(&format!("Wrote {} files to {}", files.len(), root.display()));
                for file in files {
                    let shown = file.strip_prefix(root).unwrap_or(file);
                    out.added_item(&shown.display().to_string());
                }
            }
            GenerationResult::Written { .. } => {}
            GenerationResult::Preview { files } => {
                for file in files {
                    out.newline();
                    out.divider(&file.path);
                    out.preformatted(&file.content);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::test_support::Recorder;

    fn report(result: GenerationResult, error: Option<&str>) -> GenerateReport {
        GenerateReport {
            template_name: Some("C#".to_string()),
            passes: vec![PassSummary {
                kind: PassKind::Database,
                status: if error.is_some() { "aborted" } else { "completed" },
                files: if error.is_some() { 0 } else { 1 },
                error: error.map(str::to_string),
            }],
            log: RunLog::new(),
            result,
        }
    }

    #[test]
    fn test_aborted_pass_is_failure() {
        let preview = || GenerationResult::Preview { files: Vec::new() };

        assert!(report(preview(), None).is_success());
        assert!(!report(preview(), Some("No class instance fragment")).is_success());
    }

    #[test]
    fn test_aborted_run_is_failure() {
        let result = GenerationResult::Written {
            status: RunStatus::Aborted,
            output_root: None,
            files: Vec::new(),
        };
        assert!(!report(result, None).is_success());
    }

    #[test]
    fn test_render_written_files_relative_to_root() {
        let result = GenerationResult::Written {
            status: RunStatus::Completed,
            output_root: Some(PathBuf::from("/out/net")),
            files: vec![PathBuf::from("/out/net/Database.cs")],
        };
        let mut out = Recorder::default();
        report(result, None).render(&mut out);

        assert_eq!(
            out.lines,
            [
                "",
                "Passes (C#):",
                "  database: completed (1 files)",
                "",
                "Wrote 1 files to /out/net:",
                "  + Database.cs",
            ]
        );
    }

    #[test]
    fn test_json_shape() {
        let result = GenerationResult::Preview {
            files: vec![PreviewFile {
                path: "Base.cs".to_string(),
                content: "x".to_string(),
            }],
        };
        let json = serde_json::to_value(report(result, None)).unwrap();

        assert_eq!(json["result"]["mode"], "preview");
        assert_eq!(json["result"]["files"][0]["path"], "Base.cs");
        assert_eq!(json["passes"][0]["kind"], "database");
        assert!(json["passes"][0].get("error").is_none());
    }
}
