use datafairy_core::File;
use datafairy_schema::{Field, Row};

use super::{GeneratedFile, GenerationContext, Pass, PassKind};
use crate::{
    error::PassError,
    fragments::FragmentKind,
    substitution::{Block, CLASS_NAME, ROW_CLASS_NAME, ROW_LIST, TABLE_NAME},
};

/// Value written for empty numeric cells.
const EMPTY_NUMBER: &str = "-1";

/// Writes one table class per table, declaring a row instance per data row.
///
/// Rows are declared as `row<id>` using the id verbatim; duplicate ids
/// produce duplicate declarations.
pub struct TablePass;

impl Pass for TablePass {
    fn kind(&self) -> PassKind {
        PassKind::Table
    }

    fn required_fragments(&self) -> &'static [FragmentKind] {
        &[FragmentKind::NewClassInstance, FragmentKind::LocalVariable]
    }

    fn render(&self, ctx: &GenerationContext<'_>) -> Result<Option<Vec<GeneratedFile>>, PassError> {
        let Some(template) = ctx.templates.table.as_ref() else {
            return Ok(None);
        };
        ctx.require(self.kind(), self.required_fragments())?;

        let mut files = Vec::with_capacity(ctx.dataset.tables.len());

        for table in &ctx.dataset.tables {
            let base = ctx.naming.class(&table.name);
            let class_name = format!("{}Table", base);
            let row_class = format!("{}Row", base);

            let mut rows = Block::new("// code generated list of all rows");
            for row in &table.rows {
                let args = row_arguments(table.schema(), row);
                let instance = ctx.fragments.new_class_instance(&row_class, &args);
                let var_name = format!("row{}", row.id());
                rows.line(&ctx.fragments.local_variable(&var_name, &row_class, &instance));
            }

            let body = ctx
                .substitute(template)
                .replace(ROW_CLASS_NAME, &row_class)
                .replace(CLASS_NAME, &class_name)
                .replace(TABLE_NAME, &table.name)
                .block(ROW_LIST, rows.as_str())
                .finish();

            files.push(GeneratedFile {
                name: format!("{}{}", class_name, template.extension()),
                file: File::new(template.sibling(&class_name), body),
            });
        }

        Ok(Some(files))
    }
}

/// Positional constructor arguments for one row, in schema order.
fn row_arguments(schema: &[Field], row: &Row) -> String {
    schema
        .iter()
        .map(|field| format_cell(field, row.get(&field.name)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Numbers are written bare (`-1` when empty); everything else is quoted.
fn format_cell(field: &Field, value: &str) -> String {
    if field.is_numeric() {
        if value.is_empty() {
            EMPTY_NUMBER.to_string()
        } else {
            value.to_string()
        }
    } else {
        format!("\"{}\"", value.replace('"', "\\\""))
    }
}
