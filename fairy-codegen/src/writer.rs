//! The template writer: validates the output location, clears it and runs
//! every pass in order.

use std::path::{Path, PathBuf};

use datafairy_core::clear_files;
use datafairy_schema::{Dataset, TemplateManifest, TemplatePackage};
use serde::Serialize;

use crate::{
    TypeResolver,
    check::{CheckInput, Checker, Diagnostic},
    error::{GenerateError, PassError, Result},
    fragments::{FragmentRenderer, PatternFragments},
    log::RunLog,
    naming::NamingConvention,
    passes::{self, GeneratedFile, GenerationContext, Pass, PassKind, TemplateSet},
    substitution::TemplateVariables,
};

/// Package handling and descriptive metadata for a run.
#[derive(Debug, Clone, Serialize)]
pub struct WriterConfig {
    /// Separator between package path segments
    pub package_separator: String,
    /// Mirror the package path as nested output folders
    pub generate_package_folder_structure: bool,
    /// Lowercase the package string wherever it is used
    pub force_lowercase_package_structure: bool,
    pub name: Option<String>,
    pub author: Option<String>,
    pub contact: Option<String>,
    package_string: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            package_separator: ".".to_string(),
            generate_package_folder_structure: false,
            force_lowercase_package_structure: false,
            name: None,
            author: None,
            contact: None,
            package_string: String::new(),
        }
    }
}

impl WriterConfig {
    /// Build the config declared by a template manifest.
    pub fn from_manifest(manifest: &TemplateManifest) -> Self {
        Self {
            package_separator: manifest.package.separator.clone(),
            generate_package_folder_structure: manifest.package.folders,
            force_lowercase_package_structure: manifest.package.lowercase,
            name: manifest.template.name.clone(),
            author: manifest.template.author.clone(),
            contact: manifest.template.contact.clone(),
            package_string: String::new(),
        }
    }

    /// Store the package string verbatim.
    pub fn set_package_string(&mut self, package: impl Into<String>) {
        self.package_string = package.into();
    }

    /// The package string as stored.
    pub fn raw_package_string(&self) -> &str {
        &self.package_string
    }

    /// The package string with lowercase mode applied.
    pub fn package_string(&self) -> String {
        if self.force_lowercase_package_structure {
            self.package_string.to_lowercase()
        } else {
            self.package_string.clone()
        }
    }

    /// Nested folders for the package path, relative to the output directory.
    pub fn package_path(&self) -> PathBuf {
        let package = self.package_string();
        if self.package_separator.is_empty() {
            return PathBuf::from(package);
        }
        package
            .split(self.package_separator.as_str())
            .filter(|part| !part.is_empty())
            .collect()
    }
}

impl From<&TemplatePackage> for TemplateSet {
    fn from(package: &TemplatePackage) -> Self {
        Self {
            database: package.database.clone(),
            table: package.table.clone(),
            row: package.row.clone(),
            enumeration: package.enumeration.clone(),
            package_files: package.package_files.clone(),
        }
    }
}

/// How a pass ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassStatus {
    /// The pass rendered and wrote its files.
    Completed { files: usize },
    /// No template for this kind; nothing to do.
    Skipped,
    /// Configuration was incomplete; the pass wrote nothing.
    Aborted(PassError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    pub kind: PassKind,
    pub status: PassStatus,
}

/// How the whole run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// All passes ran (some may have been skipped or aborted).
    Completed,
    /// The output directory was unusable; nothing was touched.
    Aborted,
}

/// The result of [`TemplateWriter::write_to`].
#[derive(Debug)]
pub struct WriteReport {
    pub status: RunStatus,
    /// Directory the files were written under, after package nesting.
    pub output_root: Option<PathBuf>,
    pub passes: Vec<PassReport>,
    /// Absolute paths of every file written, in write order.
    pub written: Vec<PathBuf>,
    pub log: RunLog,
}

impl WriteReport {
    fn aborted(log: RunLog) -> Self {
        Self {
            status: RunStatus::Aborted,
            output_root: None,
            passes: Vec::new(),
            written: Vec::new(),
            log,
        }
    }

    /// Passes that stopped because of incomplete configuration.
    pub fn aborted_passes(&self) -> impl Iterator<Item = (PassKind, &PassError)> {
        self.passes.iter().filter_map(|p| match &p.status {
            PassStatus::Aborted(err) => Some((p.kind, err)),
            _ => None,
        })
    }
}

/// The result of [`TemplateWriter::preview`].
#[derive(Debug)]
pub struct Preview {
    pub passes: Vec<PassReport>,
    /// Files relative to the output root, package nesting included.
    pub files: Vec<GeneratedFile>,
    pub log: RunLog,
}

/// Generates source files from a dataset and a set of templates.
///
/// # Example
///
/// ```ignore
/// let writer = TemplateWriter::from_package(&dataset, &package);
/// let report = writer.write_to("out")?;
/// for entry in report.log.entries() {
///     println!("{}", entry);
/// }
/// ```
pub struct TemplateWriter<'a> {
    dataset: &'a Dataset,
    config: WriterConfig,
    templates: TemplateSet,
    fragments: Box<dyn FragmentRenderer + 'a>,
    types: TypeResolver,
    variables: TemplateVariables,
    naming: NamingConvention,
}

impl<'a> TemplateWriter<'a> {
    /// Create a writer with no templates and no fragments.
    pub fn new(dataset: &'a Dataset) -> Self {
        let mut config = WriterConfig::default();
        if let Some(package) = &dataset.package {
            config.set_package_string(package);
        }
        Self {
            dataset,
            config,
            templates: TemplateSet::default(),
            fragments: Box::new(PatternFragments::default()),
            types: TypeResolver::default(),
            variables: TemplateVariables::new(),
            naming: NamingConvention::default(),
        }
    }

    /// Create a writer configured entirely from a template package.
    pub fn from_package(dataset: &'a Dataset, package: &TemplatePackage) -> Self {
        let manifest = &package.manifest;
        let mut config = WriterConfig::from_manifest(manifest);
        if let Some(package) = &dataset.package {
            config.set_package_string(package);
        }

        Self::new(dataset)
            .config(config)
            .templates(TemplateSet::from(package))
            .fragments(PatternFragments::new(manifest.fragments.clone()))
            .types(TypeResolver::new(manifest.types.clone()))
            .variables(TemplateVariables::from(manifest.variables.as_slice()))
    }

    pub fn config(mut self, config: WriterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn templates(mut self, templates: TemplateSet) -> Self {
        self.templates = templates;
        self
    }

    pub fn fragments(mut self, fragments: impl FragmentRenderer + 'a) -> Self {
        self.fragments = Box::new(fragments);
        self
    }

    pub fn types(mut self, types: TypeResolver) -> Self {
        self.types = types;
        self
    }

    pub fn variables(mut self, variables: TemplateVariables) -> Self {
        self.variables = variables;
        self
    }

    pub fn naming(mut self, naming: NamingConvention) -> Self {
        self.naming = naming;
        self
    }

    /// Add a template variable to be searched and replaced.
    pub fn add_template_variable(&mut self, token: impl Into<String>, value: impl Into<String>) {
        self.variables.push(token, value);
    }

    pub fn config_mut(&mut self) -> &mut WriterConfig {
        &mut self.config
    }

    pub fn writer_config(&self) -> &WriterConfig {
        &self.config
    }

    /// Generate every file into `output_dir`.
    ///
    /// Every existing file under `output_dir` is deleted first. An empty or
    /// missing directory aborts the run without touching anything; that is
    /// reported through the log, not as an error. Errors are reserved for
    /// file system failures, which leave already written files in place.
    pub fn write_to(&self, output_dir: impl AsRef<Path>) -> Result<WriteReport> {
        let output_dir = output_dir.as_ref();
        let mut log = RunLog::new();

        if output_dir.as_os_str().is_empty() {
            log.aborted("No output directory set");
            return Ok(WriteReport::aborted(log));
        }
        if !output_dir.is_dir() {
            log.aborted("Output path does not exist.");
            return Ok(WriteReport::aborted(log));
        }

        log.info("Starting Write Process");

        let removed = clear_files(output_dir).map_err(|source| GenerateError::Clear {
            path: output_dir.to_path_buf(),
            source,
        })?;
        tracing::debug!(removed, dir = %output_dir.display(), "cleared output directory");

        let root = self.output_root(output_dir);
        let mut written = Vec::new();

        let passes = self.run_passes(&mut log, |generated, kind, log| {
            let path = generated
                .file
                .write(&root)
                .map_err(|source| GenerateError::Write {
                    path: generated.file.destination(&root),
                    source,
                })?;
            written.push(path);
            log.info(format!("Created {} File - {}", kind.label(), generated.name));
            Ok(())
        })?;

        log.info("Finished Write Process");

        Ok(WriteReport {
            status: RunStatus::Completed,
            output_root: Some(root),
            passes,
            written,
            log,
        })
    }

    /// Render every pass without touching the file system.
    pub fn preview(&self) -> Preview {
        let mut log = RunLog::new();
        let prefix = self.output_root(Path::new(""));
        let mut files = Vec::new();

        let result = self.run_passes(&mut log, |generated, kind, log| {
            let mut generated = generated.clone();
            generated.file = datafairy_core::File::new(
                prefix.join(generated.file.path()),
                generated.file.content(),
            );
            log.info(format!("Rendered {} File - {}", kind.label(), generated.name));
            files.push(generated);
            Ok(())
        });

        // The sink above never fails.
        let passes = result.unwrap_or_default();
        Preview { passes, files, log }
    }

    /// Run `checker` over this writer's dataset and templates.
    pub fn check(&self, checker: &Checker) -> Vec<Diagnostic> {
        checker.run(&CheckInput {
            dataset: self.dataset,
            templates: &self.templates,
            fragments: self.fragments.as_ref(),
            types: &self.types,
        })
    }

    /// Output root after optional package folder nesting.
    fn output_root(&self, output_dir: &Path) -> PathBuf {
        if self.config.generate_package_folder_structure {
            output_dir.join(self.config.package_path())
        } else {
            output_dir.to_path_buf()
        }
    }

    /// Run every pass in order, handing each rendered file to `emit`.
    fn run_passes<F>(&self, log: &mut RunLog, mut emit: F) -> Result<Vec<PassReport>>
    where
        F: FnMut(&GeneratedFile, PassKind, &mut RunLog) -> Result<()>,
    {
        if self.config.generate_package_folder_structure
            && self.config.package_path().as_os_str().is_empty()
        {
            log.warning("Package folders requested but no package string set, writing to output root");
        }

        let package = self.config.package_string();
        let ctx = GenerationContext {
            dataset: self.dataset,
            templates: &self.templates,
            fragments: self.fragments.as_ref(),
            types: &self.types,
            naming: &self.naming,
            variables: &self.variables,
            package: &package,
        };

        let mut reports = Vec::new();
        for pass in passes::builtin() {
            let status = self.run_pass(pass.as_ref(), &ctx, log, &mut emit)?;
            reports.push(PassReport {
                kind: pass.kind(),
                status,
            });
        }
        Ok(reports)
    }

    fn run_pass<F>(
        &self,
        pass: &dyn Pass,
        ctx: &GenerationContext<'_>,
        log: &mut RunLog,
        emit: &mut F,
    ) -> Result<PassStatus>
    where
        F: FnMut(&GeneratedFile, PassKind, &mut RunLog) -> Result<()>,
    {
        let kind = pass.kind();
        match pass.render(ctx) {
            Ok(Some(files)) => {
                for file in &files {
                    emit(file, kind, log)?;
                }
                Ok(PassStatus::Completed { files: files.len() })
            }
            Ok(None) => {
                log.skipped(format!("No {} template, skipping {} files", kind, kind));
                Ok(PassStatus::Skipped)
            }
            Err(err) => {
                log.aborted(err.to_string());
                Ok(PassStatus::Aborted(err))
            }
        }
    }
}
