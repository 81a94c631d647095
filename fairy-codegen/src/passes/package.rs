use datafairy_core::File;

use super::{GeneratedFile, GenerationContext, Pass, PassKind};
use crate::error::PassError;

/// Copies auxiliary package files with only variables and the package
/// string substituted.
pub struct PackagePass;

impl Pass for PackagePass {
    fn kind(&self) -> PassKind {
        PassKind::Package
    }

    fn render(&self, ctx: &GenerationContext<'_>) -> Result<Option<Vec<GeneratedFile>>, PassError> {
        let files = ctx
            .templates
            .package_files
            .iter()
            .map(|template| GeneratedFile {
                name: template.file_name().display().to_string(),
                file: File::new(template.file_name(), ctx.substitute(template).finish()),
            })
            .collect();

        Ok(Some(files))
    }
}
