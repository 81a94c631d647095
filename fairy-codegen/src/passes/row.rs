use datafairy_core::File;

use super::{GeneratedFile, GenerationContext, Pass, PassKind};
use crate::{
    error::PassError,
    fragments::FragmentKind,
    substitution::{
        Block, CLASS_NAME, CLASS_PARAMS_LIST, CLASS_PARAMS_STRING, PROPERTY_LIST, VARIABLE_LIST,
    },
};

/// Name of the identifier field every row template stores itself.
const RESERVED_ID: &str = "id";

/// Writes one row class per table.
///
/// Every field becomes a constructor parameter and an assignment. Plain
/// fields also get a backing variable; lookup fields get an `Id` suffixed
/// variable plus a property typed as the target's row class. The reserved
/// `id` field gets neither.
pub struct RowPass;

impl Pass for RowPass {
    fn kind(&self) -> PassKind {
        PassKind::Row
    }

    fn required_fragments(&self) -> &'static [FragmentKind] {
        &[
            FragmentKind::ClassVariable,
            FragmentKind::ClassProperty,
            FragmentKind::LocalAssignment,
            FragmentKind::Parameter,
        ]
    }

    fn render(&self, ctx: &GenerationContext<'_>) -> Result<Option<Vec<GeneratedFile>>, PassError> {
        let Some(template) = ctx.templates.row.as_ref() else {
            return Ok(None);
        };
        ctx.require(self.kind(), self.required_fragments())?;

        let fragments = ctx.fragments;
        let mut files = Vec::with_capacity(ctx.dataset.tables.len());

        for table in &ctx.dataset.tables {
            let class_name = format!("{}Row", ctx.naming.class(&table.name));

            let mut variables = Block::new("// code generated list of variables");
            let mut properties = Block::new("// code generated list of properties");
            let mut assignments = Block::new("// code generated list of params");
            let mut params = Vec::with_capacity(table.fields.len());

            for field in table.schema() {
                let name = field.name.as_str();
                let field_type = ctx.types.resolve(&field.field_type);
                let mut param_name = format!("_{}", ctx.naming.variable(name));

                if field.is_lookup() {
                    let Some(target) = field.lookup.as_deref() else {
                        return Err(PassError::MissingLookupTarget {
                            pass: self.kind(),
                            table: table.name.clone(),
                            field: field.name.clone(),
                        });
                    };
                    let id_name = format!("{}Id", name);
                    param_name.push_str("Id");

                    let target_row = format!("{}Row", ctx.naming.class(target));
                    properties.line(&fragments.class_property(name, &target_row));
                    variables.line(&fragments.class_variable(&id_name, field_type));
                    assignments.line(&fragments.local_assignment(&id_name, &param_name));
                } else if name == RESERVED_ID {
                    assignments.line(&fragments.local_assignment(name, &param_name));
                } else {
                    variables.line(&fragments.class_variable(name, field_type));
                    assignments.line(&fragments.local_assignment(name, &param_name));
                }

                params.push(fragments.parameter(&param_name, field_type));
            }

            let body = ctx
                .substitute(template)
                .replace(CLASS_NAME, &class_name)
                .block(VARIABLE_LIST, variables.as_str())
                .block(PROPERTY_LIST, properties.as_str())
                .block(CLASS_PARAMS_STRING, &params.join(", "))
                .block(CLASS_PARAMS_LIST, assignments.as_str())
                .finish();

            files.push(GeneratedFile {
                name: format!("{}{}", class_name, template.extension()),
                file: File::new(template.sibling(&class_name), body),
            });
        }

        Ok(Some(files))
    }
}

#[cfg(test)]
mod tests {
    use datafairy_core::TemplateFile;
    use datafairy_schema::{Dataset, Field, Table};

    use super::*;
    use crate::passes::{
        TemplateSet,
        test_support::{CSharp, render},
    };

    const TEMPLATE: &str = "\
class CLASS_NAME : RowBase {
VARIABLE_LIST
PROPERTY_LIST
public CLASS_NAME(CLASS_PARAMS_STRING) {
CLASS_PARAMS_LIST
}
}";

    fn templates() -> TemplateSet {
        TemplateSet {
            row: Some(TemplateFile::new("rows/Row.cs", TEMPLATE)),
            ..TemplateSet::default()
        }
    }

    fn items() -> Dataset {
        Dataset::new()
            .table(
                Table::new("item")
                    .field(Field::new("id", "int"))
                    .field(Field::new("name", "string"))
                    .field(Field::new("cost", "decimal"))
                    .field(Field::lookup("kind", "item_kind")),
            )
            .table(Table::new("item_kind").field(Field::new("id", "int")))
    }

    fn render_items() -> Vec<GeneratedFile> {
        render(&RowPass, &templates(), &items(), &CSharp)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_row_class() {
        let files = render_items();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name, "ItemRow.cs");
        insta::assert_snapshot!(files[0].file.content(), @r"
        class ItemRow : RowBase {
        // code generated list of variables
        public string name;
        public decimal cost;
        public int kindId;
        // code generated list of properties
        public ItemKindRow kind { get; set; }
        public ItemRow(int _id, string _name, decimal _cost, int _kindId) {
        // code generated list of params
        id = _id;
        name = _name;
        cost = _cost;
        kindId = _kindId;
        }
        }
        ");
    }

    #[test]
    fn test_reserved_id_only_in_params_and_assignments() {
        let files = render_items();
        let content = files[1].file.content();

        assert_eq!(
            content,
            "class ItemKindRow : RowBase {\n\
             // code generated list of variables\n\
             // code generated list of properties\n\
             public ItemKindRow(int _id) {\n\
             // code generated list of params\n\
             id = _id;\n\
             }\n\
             }"
        );
        assert_eq!(content.matches("int _id").count(), 1);
        assert_eq!(content.matches("id = _id;").count(), 1);
    }

    #[test]
    fn test_missing_parameter_fragment_aborts() {
        struct NoParams;
        impl crate::fragments::FragmentRenderer for NoParams {
            fn supports(&self, kind: FragmentKind) -> bool {
                kind != FragmentKind::Parameter
            }
            fn class_variable(&self, _: &str, _: &str) -> String {
                String::new()
            }
            fn class_property(&self, _: &str, _: &str) -> String {
                String::new()
            }
            fn constant(&self, _: &str, _: &str, _: &str) -> String {
                String::new()
            }
            fn local_variable(&self, _: &str, _: &str, _: &str) -> String {
                String::new()
            }
            fn local_assignment(&self, _: &str, _: &str) -> String {
                String::new()
            }
            fn new_class_instance(&self, _: &str, _: &str) -> String {
                String::new()
            }
            fn parameter(&self, _: &str, _: &str) -> String {
                String::new()
            }
        }

        let err = render(&RowPass, &templates(), &items(), &NoParams).unwrap_err();
        assert_eq!(
            err,
            PassError::MissingFragment {
                pass: PassKind::Row,
                fragment: FragmentKind::Parameter,
            }
        );
    }

    #[test]
    fn test_lookup_without_target_aborts() {
        let mut dataset = items();
        dataset.tables[0].fields[3].lookup = None;

        let err = render(&RowPass, &templates(), &dataset, &CSharp).unwrap_err();
        assert!(matches!(err, PassError::MissingLookupTarget { ref field, .. } if field == "kind"));
    }
}
