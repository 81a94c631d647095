use std::path::PathBuf;

use clap::Args;
use datafairy_schema::{Dataset, TemplatePackage};
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the dataset (defaults to ./data.toml)
    #[arg(short, long, default_value = "data.toml")]
    pub dataset: PathBuf,

    /// Template package directory containing template.toml
    #[arg(short, long, default_value = ".")]
    pub templates: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let dataset = Dataset::open(&self.dataset).unwrap_or_exit();
        let package = TemplatePackage::open(&self.templates).unwrap_or_exit();

        let report = ops::check(&dataset, &package, &self.dataset);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            report.render(&mut TerminalOutput::new());
        }

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
