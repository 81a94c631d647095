use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Write `content` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}

/// Recursively delete every file below `dir`.
///
/// Directories themselves are left in place, including `dir`.
/// Returns the number of files removed.
pub fn clear_files(dir: &Path) -> io::Result<usize> {
    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            removed += clear_files(&path)?;
        } else {
            fs::remove_file(&path)?;
            removed += 1;
        }
    }
    Ok(removed)
}

/// A rendered output file, addressed relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    path: PathBuf,
    content: String,
}

impl File {
    /// Create a new file with the given relative path and content.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the path relative to the output root
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Resolve the destination of this file below `base`.
    pub fn destination(&self, base: &Path) -> PathBuf {
        base.join(&self.path)
    }

    /// Write the file below `base`, always overwriting.
    pub fn write(&self, base: &Path) -> io::Result<PathBuf> {
        let path = self.destination(base);
        write_file(&path, &self.content)?;
        Ok(path)
    }
}
