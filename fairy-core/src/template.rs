//! Raw template bodies.

use std::path::{Path, PathBuf};

/// A template body together with the file name it was declared under.
///
/// The file name doubles as a destination hint: its folder and extension
/// decide where per-entity files land, and for single-output kinds
/// (database, package files) it is the destination itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    file_name: PathBuf,
    contents: String,
}

impl TemplateFile {
    pub fn new(file_name: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            contents: contents.into(),
        }
    }

    /// The declared file name, relative to the template package.
    pub fn file_name(&self) -> &Path {
        &self.file_name
    }

    /// The raw body, placeholders included.
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Folder part of the file name (empty when the template sits at the root).
    pub fn folder(&self) -> &Path {
        self.file_name.parent().unwrap_or(Path::new(""))
    }

    /// Extension of the file name including the leading dot, or empty.
    pub fn extension(&self) -> String {
        self.file_name
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default()
    }

    /// Destination for a generated file named `stem` alongside this template.
    pub fn sibling(&self, stem: &str) -> PathBuf {
        self.folder().join(format!("{}{}", stem, self.extension()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_and_extension() {
        let template = TemplateFile::new("src/rows/Row.as", "");
        assert_eq!(template.folder(), Path::new("src/rows"));
        assert_eq!(template.extension(), ".as");
    }

    #[test]
    fn test_root_template_without_extension() {
        let template = TemplateFile::new("Makefile", "");
        assert_eq!(template.folder(), Path::new(""));
        assert_eq!(template.extension(), "");
        assert_eq!(template.sibling("ItemRow"), PathBuf::from("ItemRow"));
    }

    #[test]
    fn test_sibling_uses_folder_and_extension() {
        let template = TemplateFile::new("tables/Table.cs", "");
        assert_eq!(
            template.sibling("ItemTable"),
            PathBuf::from("tables/ItemTable.cs")
        );
    }
}
