//! Generate operation - render templates and write them out.

use std::path::Path;

use datafairy_codegen::{PassReport, PassStatus, TemplateWriter};
use datafairy_schema::{Dataset, TemplatePackage};
use eyre::{Context, Result};

use crate::reports::{GenerateReport, GenerationResult, PassSummary, PreviewFile};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Directory to clear and write into. Only read when not a dry run.
    pub output_dir: Option<&'a Path>,
    /// Replaces the dataset's package string when set.
    pub package: Option<&'a str>,
    /// Whether to preview without writing.
    pub dry_run: bool,
}

/// Execute the generate operation.
pub fn generate(
    dataset: &Dataset,
    package: &TemplatePackage,
    opts: GenerateOptions,
) -> Result<GenerateReport> {
    let mut writer = TemplateWriter::from_package(dataset, package);
    if let Some(package_string) = opts.package {
        writer.config_mut().set_package_string(package_string);
    }
    tracing::debug!(
        tables = dataset.tables.len(),
        templates = %package.dir().display(),
        "generating"
    );

    let template_name = package.manifest.template.name.clone();

    if opts.dry_run {
        let preview = writer.preview();
        return Ok(GenerateReport {
            template_name,
            passes: summarize(&preview.passes),
            log: preview.log,
            result: GenerationResult::Preview {
                files: preview
                    .files
                    .into_iter()
                    .map(|f| PreviewFile {
                        path: f.file.path().display().to_string(),
                        content: f.file.content().to_string(),
                    })
                    .collect(),
            },
        });
    }

    let Some(output_dir) = opts.output_dir else {
        eyre::bail!("An output directory is required unless --dry-run is set");
    };
    let report = writer
        .write_to(output_dir)
        .wrap_err_with(|| format!("Failed to generate into {}", output_dir.display()))?;

    Ok(GenerateReport {
        template_name,
        passes: summarize(&report.passes),
        log: report.log,
        result: GenerationResult::Written {
            status: report.status,
            output_root: report.output_root,
            files: report.written,
        },
    })
}

fn summarize(passes: &[PassReport]) -> Vec<PassSummary> {
    passes
        .iter()
        .map(|p| match &p.status {
            PassStatus::Completed { files } => PassSummary {
                kind: p.kind,
                status: "completed",
                files: *files,
                error: None,
            },
            PassStatus::Skipped => PassSummary {
                kind: p.kind,
                status: "skipped",
                files: 0,
                error: None,
            },
            PassStatus::Aborted(err) => PassSummary {
                kind: p.kind,
                status: "aborted",
                files: 0,
                error: Some(err.to_string()),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use datafairy_codegen::RunStatus;
    use tempfile::TempDir;

    use super::*;

    fn package(dir: &Path) -> TemplatePackage {
        fs::write(
            dir.join("template.toml"),
            "[files]\npackage = [\"Info.txt\"]\n",
        )
        .unwrap();
        fs::write(dir.join("Info.txt"), "package PACKAGE_STRING").unwrap();
        TemplatePackage::open(dir).unwrap()
    }

    #[test]
    fn test_package_override() {
        let templates = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let package = package(templates.path());
        let dataset = Dataset::new().package("from.dataset");

        let report = generate(
            &dataset,
            &package,
            GenerateOptions {
                output_dir: Some(output.path()),
                package: Some("from.cli"),
                dry_run: false,
            },
        )
        .unwrap();

        assert!(report.is_success());
        assert!(matches!(
            report.result,
            GenerationResult::Written { status: RunStatus::Completed, .. }
        ));
        assert_eq!(
            fs::read_to_string(output.path().join("Info.txt")).unwrap(),
            "package from.cli"
        );
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let templates = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let package = package(templates.path());
        let dataset = Dataset::new().package("net.mkv25");

        let report = generate(
            &dataset,
            &package,
            GenerateOptions {
                output_dir: Some(output.path()),
                package: None,
                dry_run: true,
            },
        )
        .unwrap();

        match &report.result {
            GenerationResult::Preview { files } => {
                assert_eq!(files.len(), 1);
                assert_eq!(files[0].content, "package net.mkv25");
            }
            other => panic!("expected preview, got {:?}", other),
        }
        assert!(!output.path().join("Info.txt").exists());
    }

    #[test]
    fn test_dry_run_without_output_dir() {
        let templates = TempDir::new().unwrap();
        let package = package(templates.path());
        let dataset = Dataset::new().package("net.mkv25");

        let report = generate(
            &dataset,
            &package,
            GenerateOptions {
                output_dir: None,
                package: None,
                dry_run: true,
            },
        )
        .unwrap();

        assert!(matches!(report.result, GenerationResult::Preview { .. }));
    }

    #[test]
    fn test_write_requires_output_dir() {
        let templates = TempDir::new().unwrap();
        let package = package(templates.path());
        let dataset = Dataset::new().package("net.mkv25");

        let err = generate(
            &dataset,
            &package,
            GenerateOptions {
                output_dir: None,
                package: None,
                dry_run: false,
            },
        )
        .unwrap_err();

        assert!(err.to_string().contains("--dry-run"));
    }
}
