//! Built-in lints.

use datafairy_schema::LOOKUP;
use indexmap::{IndexMap, IndexSet};

use super::{CheckInput, Diagnostic, Lint};
use crate::passes::{self, PassKind};

/// Errors on fragments a configured template needs but the renderer lacks.
pub struct MissingFragmentLint;

impl Lint for MissingFragmentLint {
    fn name(&self) -> &'static str {
        "missing-fragment"
    }

    fn description(&self) -> &'static str {
        "Detect templates whose pass would abort for lack of a fragment"
    }

    fn check(&self, input: &CheckInput<'_>, diagnostics: &mut Vec<Diagnostic>) {
        for pass in passes::builtin() {
            let kind = pass.kind();
            if input.templates.slot(kind).is_none() {
                continue;
            }
            for &fragment in pass.required_fragments() {
                if !input.fragments.supports(fragment) {
                    diagnostics.push(
                        Diagnostic::error(
                            self.name(),
                            format!(
                                "{} template needs a {} fragment; the {} pass will abort",
                                kind, fragment, kind
                            ),
                        )
                        .at(format!("fragments.{}", fragment.key())),
                    );
                }
            }
        }
    }
}

/// Warns about tables where several rows share an id.
///
/// Generation keeps every row, so the table file declares the same
/// `row<id>` variable more than once.
pub struct DuplicateRowIdLint;

impl Lint for DuplicateRowIdLint {
    fn name(&self) -> &'static str {
        "duplicate-row-id"
    }

    fn description(&self) -> &'static str {
        "Detect rows sharing an id within one table"
    }

    fn check(&self, input: &CheckInput<'_>, diagnostics: &mut Vec<Diagnostic>) {
        for table in &input.dataset.tables {
            let mut counts: IndexMap<&str, usize> = IndexMap::new();
            for row in &table.rows {
                let id = row.id();
                if !id.is_empty() {
                    *counts.entry(id).or_default() += 1;
                }
            }

            for (id, count) in counts.into_iter().filter(|(_, count)| *count > 1) {
                diagnostics.push(
                    Diagnostic::warning(
                        self.name(),
                        format!(
                            "row id '{}' appears {} times in table '{}'",
                            id, count, table.name
                        ),
                    )
                    .at(format!("tables.{}", table.name)),
                );
            }
        }
    }
}

/// Warns about rows with no `Name` cell when an enumeration template is set.
pub struct EnumNameLint;

impl Lint for EnumNameLint {
    fn name(&self) -> &'static str {
        "enum-name"
    }

    fn description(&self) -> &'static str {
        "Detect rows that would produce an unnamed enumeration constant"
    }

    fn check(&self, input: &CheckInput<'_>, diagnostics: &mut Vec<Diagnostic>) {
        if input.templates.slot(PassKind::Enumeration).is_none() {
            return;
        }

        for table in &input.dataset.tables {
            let unnamed = table.rows.iter().filter(|r| r.get("Name").is_empty()).count();
            if unnamed > 0 {
                diagnostics.push(
                    Diagnostic::warning(
                        self.name(),
                        format!(
                            "{} row(s) in table '{}' have no Name; their constants will be unnamed",
                            unnamed, table.name
                        ),
                    )
                    .at(format!("tables.{}", table.name)),
                );
            }
        }
    }
}

/// Notes field types the type map does not cover.
///
/// Unmapped types are passed through verbatim, which is often intended.
pub struct UnmappedTypeLint;

impl Lint for UnmappedTypeLint {
    fn name(&self) -> &'static str {
        "unmapped-type"
    }

    fn description(&self) -> &'static str {
        "List field types with no entry in the type map"
    }

    fn check(&self, input: &CheckInput<'_>, diagnostics: &mut Vec<Diagnostic>) {
        let mut seen = IndexSet::new();
        for table in &input.dataset.tables {
            for field in table.schema() {
                let ty = field.field_type.as_str();
                if ty == LOOKUP || input.types.contains(ty) || !seen.insert(ty) {
                    continue;
                }
                diagnostics.push(
                    Diagnostic::info(
                        self.name(),
                        format!("type '{}' is not mapped and will be written as-is", ty),
                    )
                    .at(format!("tables.{}.{}", table.name, field.name)),
                );
            }
        }
    }
}
