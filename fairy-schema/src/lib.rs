// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Dataset and template package loading for the Data Fairy template writer.
//!
//! - [`Dataset`] - tables, typed fields and rows read from `data.toml`
//! - [`TemplatePackage`] - `template.toml` plus the template bodies it names

mod dataset;
mod error;
mod template;

pub use dataset::{DECIMAL, Dataset, Field, INT, LOOKUP, Row, Table};
pub use error::{Error, Result};
pub use template::{
    FileSlots, FragmentPatterns, MANIFEST_FILE, PackageConfig, TemplateInfo, TemplateManifest,
    TemplatePackage, TemplateVariable,
};
