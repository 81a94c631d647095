use datafairy_core::File;
use datafairy_schema::INT;

use super::{GeneratedFile, GenerationContext, Pass, PassKind};
use crate::{
    error::PassError,
    fragments::FragmentKind,
    substitution::{Block, CLASS_NAME, VARIABLE_LIST},
};

/// Writes one constants file per table, one constant per row.
///
/// Constants are named from each row's `Name` cell and valued from its `Id`.
pub struct EnumerationPass;

impl Pass for EnumerationPass {
    fn kind(&self) -> PassKind {
        PassKind::Enumeration
    }

    fn required_fragments(&self) -> &'static [FragmentKind] {
        &[FragmentKind::Constant]
    }

    fn render(&self, ctx: &GenerationContext<'_>) -> Result<Option<Vec<GeneratedFile>>, PassError> {
        let Some(template) = ctx.templates.enumeration.as_ref() else {
            return Ok(None);
        };
        ctx.require(self.kind(), self.required_fragments())?;

        let int_type = ctx.types.resolve(INT);
        let mut files = Vec::with_capacity(ctx.dataset.tables.len());

        for table in &ctx.dataset.tables {
            let class_name = format!("{}Enum", ctx.naming.class(&table.name));

            let mut constants = Block::new("// code generated list of all rows");
            for row in &table.rows {
                let name = ctx.naming.constant(row.get("Name"));
                constants.line(&ctx.fragments.constant(&name, int_type, row.get("Id")));
            }

            let body = ctx
                .substitute(template)
                .replace(CLASS_NAME, &class_name)
                .block(VARIABLE_LIST, constants.as_str())
                .finish();

            let path = template.sibling(&class_name);
            files.push(GeneratedFile {
                name: format!("{}{}", class_name, template.extension()),
                file: File::new(path, body),
            });
        }

        Ok(Some(files))
    }
}
