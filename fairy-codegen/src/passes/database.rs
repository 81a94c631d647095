use datafairy_core::File;

use super::{GeneratedFile, GenerationContext, Pass, PassKind};
use crate::{
    error::PassError,
    fragments::FragmentKind,
    substitution::{Block, CLASS_LIST, VARIABLE_LIST},
};

/// Writes the single database file that declares and constructs every table.
///
/// The output path is the template's own file name.
pub struct DatabasePass;

impl Pass for DatabasePass {
    fn kind(&self) -> PassKind {
        PassKind::Database
    }

    fn required_fragments(&self) -> &'static [FragmentKind] {
        &[
            FragmentKind::NewClassInstance,
            FragmentKind::LocalAssignment,
            FragmentKind::ClassVariable,
        ]
    }

    fn render(&self, ctx: &GenerationContext<'_>) -> Result<Option<Vec<GeneratedFile>>, PassError> {
        let Some(template) = ctx.templates.database.as_ref() else {
            return Ok(None);
        };
        ctx.require(self.kind(), self.required_fragments())?;

        let mut variables = Block::new("// code generated list of all tables");
        let mut classes = Block::new("// code generated list of all tables");

        for table in &ctx.dataset.tables {
            let class_name = format!("{}Table", ctx.naming.class(&table.name));
            let var_name = ctx.naming.constant(&table.name);
            let instance = ctx.fragments.new_class_instance(&class_name, "");

            variables.line(&ctx.fragments.class_variable(&var_name, &class_name));
            classes.line(&ctx.fragments.local_assignment(&var_name, &instance));
        }

        let body = ctx
            .substitute(template)
            .block(VARIABLE_LIST, variables.as_str())
            .block(CLASS_LIST, classes.as_str())
            .finish();

        let name = template.file_name().display().to_string();
        Ok(Some(vec![GeneratedFile {
            name,
            file: File::new(template.file_name(), body),
        }]))
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use datafairy_core::TemplateFile;
    use datafairy_schema::{Dataset, Table};

    use super::*;
    use crate::{
        fragments::FragmentRenderer,
        passes::{
            TemplateSet,
            test_support::{CSharp, render},
        },
    };

    /// Delegates to [`CSharp`] but hides one fragment.
    struct Without(FragmentKind);

    impl FragmentRenderer for Without {
        fn supports(&self, kind: FragmentKind) -> bool {
            kind != self.0
        }
        fn class_variable(&self, name: &str, ty: &str) -> String {
            CSharp.class_variable(name, ty)
        }
        fn class_property(&self, name: &str, ty: &str) -> String {
            CSharp.class_property(name, ty)
        }
        fn constant(&self, name: &str, ty: &str, value: &str) -> String {
            CSharp.constant(name, ty, value)
        }
        fn local_variable(&self, name: &str, ty: &str, value: &str) -> String {
            CSharp.local_variable(name, ty, value)
        }
        fn local_assignment(&self, name: &str, value: &str) -> String {
            CSharp.local_assignment(name, value)
        }
        fn new_class_instance(&self, class_name: &str, params: &str) -> String {
            CSharp.new_class_instance(class_name, params)
        }
        fn parameter(&self, name: &str, ty: &str) -> String {
            CSharp.parameter(name, ty)
        }
    }

    fn templates() -> TemplateSet {
        TemplateSet {
            database: Some(TemplateFile::new(
                "data/Database.cs",
                "namespace PACKAGE_STRING {\nVARIABLE_LIST\nvoid Init() {\nCLASS_LIST\n}\n}",
            )),
            ..TemplateSet::default()
        }
    }

    fn dataset() -> Dataset {
        Dataset::new()
            .table(Table::new("Item"))
            .table(Table::new("ItemKind"))
    }

    #[test]
    fn test_database_file() {
        let files = render(&DatabasePass, &templates(), &dataset(), &CSharp)
            .unwrap()
            .unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "data/Database.cs");
        assert_eq!(files[0].file.path(), Path::new("data/Database.cs"));
        insta::assert_snapshot!(files[0].file.content(), @r"
        namespace net.mkv25.game {
        // code generated list of all tables
        public ItemTable ITEM;
        public ItemKindTable ITEM_KIND;
        void Init() {
        // code generated list of all tables
        ITEM = new ItemTable();
        ITEM_KIND = new ItemKindTable();
        }
        }
        ");
    }

    #[test]
    fn test_missing_instance_fragment_aborts() {
        let err = render(
            &DatabasePass,
            &templates(),
            &dataset(),
            &Without(FragmentKind::NewClassInstance),
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "No class instance fragment available to write database template."
        );
    }

    #[test]
    fn test_missing_assignment_fragment_aborts() {
        let err = render(
            &DatabasePass,
            &templates(),
            &dataset(),
            &Without(FragmentKind::LocalAssignment),
        )
        .unwrap_err();

        assert_eq!(
            err,
            PassError::MissingFragment {
                pass: PassKind::Database,
                fragment: FragmentKind::LocalAssignment,
            }
        );
        assert_eq!(
            err.to_string(),
            "No local assignment fragment available to write database template."
        );
    }

    #[test]
    fn test_template_checked_before_fragments() {
        let result = render(
            &DatabasePass,
            &TemplateSet::default(),
            &dataset(),
            &Without(FragmentKind::NewClassInstance),
        );
        assert_eq!(result, Ok(None));
    }
}
