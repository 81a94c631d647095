//! Template package manifest (`template.toml`) and loading.
//!
//! A template package is a directory holding a `template.toml` manifest and
//! the raw template bodies it references by relative path.

use std::path::{Component, Path, PathBuf};

use datafairy_core::TemplateFile;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::{Error, Result, error::SourceContext};

/// File name of the manifest inside a template package.
pub const MANIFEST_FILE: &str = "template.toml";

/// Root manifest for template.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateManifest {
    /// Descriptive metadata, not consumed by generation
    #[serde(default)]
    pub template: TemplateInfo,

    /// Package path handling
    #[serde(default)]
    pub package: PackageConfig,

    /// Template body locations
    #[serde(default)]
    pub files: FileSlots,

    /// Domain type to target type mapping
    #[serde(default)]
    pub types: IndexMap<String, String>,

    /// Fragment patterns for the target language
    #[serde(default)]
    pub fragments: FragmentPatterns,

    /// Ordered search-and-replace pairs applied to every file
    #[serde(default)]
    pub variables: Vec<TemplateVariable>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateInfo {
    pub name: Option<String>,
    pub author: Option<String>,
    pub contact: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PackageConfig {
    /// Separator between package path segments
    pub separator: String,
    /// Mirror the package path as nested output folders
    pub folders: bool,
    /// Lowercase the package string before use
    pub lowercase: bool,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            separator: ".".to_string(),
            folders: false,
            lowercase: false,
        }
    }
}

/// Relative paths of the template bodies, one slot per output kind.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileSlots {
    pub database: Option<PathBuf>,
    pub table: Option<PathBuf>,
    pub row: Option<PathBuf>,
    pub enumeration: Option<PathBuf>,
    #[serde(default)]
    pub package: Vec<PathBuf>,
}

/// Patterns for the seven code fragments.
///
/// Patterns use `{name}`, `{type}` and `{value}` tokens.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FragmentPatterns {
    pub class_variable: Option<String>,
    pub class_property: Option<String>,
    pub constant: Option<String>,
    pub local_variable: Option<String>,
    pub local_assignment: Option<String>,
    pub new_class_instance: Option<String>,
    pub parameter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplateVariable {
    pub token: String,
    pub value: String,
}

impl TemplateManifest {
    /// Parse a manifest with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let manifest: TemplateManifest =
            toml::from_str(content).map_err(|e| ctx.parse_error(e))?;

        if let Some(variable) = manifest.variables.iter().find(|v| v.token.is_empty()) {
            return Err(ctx.validation_error("template variable token cannot be empty", &variable.value));
        }
        manifest.files.validate(&ctx)?;
        Ok(manifest)
    }
}

impl FileSlots {
    /// Every declared path with the slot it fills.
    fn paths(&self) -> impl Iterator<Item = (&'static str, &Path)> {
        [
            ("database", self.database.as_deref()),
            ("table", self.table.as_deref()),
            ("row", self.row.as_deref()),
            ("enumeration", self.enumeration.as_deref()),
        ]
        .into_iter()
        .filter_map(|(kind, path)| path.map(|p| (kind, p)))
        .chain(self.package.iter().map(|p| ("package", p.as_path())))
    }

    /// Reject paths that could resolve outside the package or output directory.
    ///
    /// Template paths double as output paths for database and package files,
    /// so only plain relative components are allowed.
    fn validate(&self, ctx: &SourceContext) -> Result<()> {
        for (kind, path) in self.paths() {
            let plain = path.components().next().is_some()
                && path.components().all(|c| matches!(c, Component::Normal(_)));
            if !plain {
                return Err(ctx.validation_error(
                    format!(
                        "{} template path '{}' must be relative and stay inside the template directory",
                        kind,
                        path.display()
                    ),
                    &path.display().to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for TemplateManifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_str_with_filename(s, MANIFEST_FILE)
    }
}

/// A template package with every referenced body read into memory.
#[derive(Debug, Clone)]
pub struct TemplatePackage {
    dir: PathBuf,
    pub manifest: TemplateManifest,
    pub database: Option<TemplateFile>,
    pub table: Option<TemplateFile>,
    pub row: Option<TemplateFile>,
    pub enumeration: Option<TemplateFile>,
    pub package_files: Vec<TemplateFile>,
}

impl TemplatePackage {
    /// Open a template package directory and read all template bodies.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let manifest_path = dir.join(MANIFEST_FILE);
        let content =
            std::fs::read_to_string(&manifest_path).map_err(|e| Error::io(&manifest_path, e))?;
        let manifest = TemplateManifest::from_str_with_filename(
            &content,
            &manifest_path.display().to_string(),
        )?;
        Self::load(dir, manifest)
    }

    /// Read the bodies referenced by an already parsed manifest.
    pub fn load(dir: impl Into<PathBuf>, manifest: TemplateManifest) -> Result<Self> {
        let dir = dir.into();
        let slots = &manifest.files;
        slots.validate(&SourceContext::new("", MANIFEST_FILE))?;

        let database = read_slot(&dir, "database", slots.database.as_deref())?;
        let table = read_slot(&dir, "table", slots.table.as_deref())?;
        let row = read_slot(&dir, "row", slots.row.as_deref())?;
        let enumeration = read_slot(&dir, "enumeration", slots.enumeration.as_deref())?;
        let package_files = slots
            .package
            .iter()
            .map(|path| read_template(&dir, "package", path))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            dir,
            manifest,
            database,
            table,
            row,
            enumeration,
            package_files,
        })
    }

    /// Directory the package was loaded from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn read_slot(dir: &Path, kind: &str, path: Option<&Path>) -> Result<Option<TemplateFile>> {
    path.map(|path| read_template(dir, kind, path)).transpose()
}

fn read_template(dir: &Path, kind: &str, path: &Path) -> Result<TemplateFile> {
    let full = dir.join(path);
    let contents = std::fs::read_to_string(&full).map_err(|source| {
        Box::new(Error::MissingTemplate {
            kind: kind.to_string(),
            path: full.clone(),
            source,
        })
    })?;
    Ok(TemplateFile::new(path, contents))
}
