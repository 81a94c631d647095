//! Error classification for generation runs.

use std::path::PathBuf;

use thiserror::Error;

use crate::{fragments::FragmentKind, passes::PassKind};

/// Result type for a whole run
pub type Result<T> = std::result::Result<T, GenerateError>;

/// A fatal failure: the run stops and files already written stay on disk.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to clear output directory '{path}'")]
    Clear {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a single pass stopped without producing files.
///
/// Only the pass is abandoned; the remaining passes still run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PassError {
    #[error("No {fragment} fragment available to write {pass} template.")]
    MissingFragment {
        pass: PassKind,
        fragment: FragmentKind,
    },

    #[error("Lookup field '{table}.{field}' has no lookup target, cannot write {pass} template.")]
    MissingLookupTarget {
        pass: PassKind,
        table: String,
        field: String,
    },
}

impl PassError {
    /// The pass that aborted.
    pub fn pass(&self) -> PassKind {
        match self {
            PassError::MissingFragment { pass, .. } | PassError::MissingLookupTarget { pass, .. } => {
                *pass
            }
        }
    }
}
