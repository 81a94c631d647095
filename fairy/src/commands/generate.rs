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
pub struct GenerateCommand {
    /// Path to the dataset (defaults to ./data.toml)
    #[arg(short, long, default_value = "data.toml")]
    pub dataset: PathBuf,

    /// Template package directory containing template.toml
    #[arg(short, long, default_value = ".")]
    pub templates: PathBuf,

    /// Output directory; every file in it is deleted first. Not needed with --dry-run
    #[arg(short, long, required_unless_present = "dry_run")]
    pub output: Option<PathBuf>,

    /// Override the dataset's package string
    #[arg(short, long)]
    pub package: Option<String>,

    /// Render everything and print it without touching the output directory
    #[arg(long)]
    pub dry_run: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let dataset = Dataset::open(&self.dataset).unwrap_or_exit();
        let package = TemplatePackage::open(&self.templates).unwrap_or_exit();

        let report = ops::generate(
            &dataset,
            &package,
            ops::generate::GenerateOptions {
                output_dir: self.output.as_deref(),
                package: self.package.as_deref(),
                dry_run: self.dry_run,
            },
        )?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            report.render(&mut TerminalOutput::new());
        }

        if !report.is_success() {
            std::process::exit(1);
        }
        Ok(())
    }
}
