//! Core utilities and types for the Data Fairy template writer.
//!
//! This crate provides the value types shared by the schema loader,
//! the generation engine and the command-line front end.

mod file;
mod template;
mod utils;

// File operations
pub use file::{File, clear_files, write_file};
// Template bodies
pub use template::TemplateFile;
// String utilities
pub use utils::{to_camel_case, to_pascal_case, to_screaming_snake_case, toml_value_to_string};
