//! Dataset model and `data.toml` parsing.

use std::{collections::HashSet, path::Path};

use datafairy_core::toml_value_to_string;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::{Error, Result, error::SourceContext};

/// Domain type tag for foreign references to another table's row.
pub const LOOKUP: &str = "lookup";
/// Domain type tag for whole numbers.
pub const INT: &str = "int";
/// Domain type tag for fractional numbers.
pub const DECIMAL: &str = "decimal";

/// Ordered collection of tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    /// Package string declared by the dataset, if any.
    pub package: Option<String>,
    pub tables: Vec<Table>,
}

/// A named table: an ordered schema plus ordered rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub fields: Vec<Field>,
    pub rows: Vec<Row>,
}

/// A typed column of a table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Field {
    pub name: String,
    /// Domain type tag, e.g. `int`, `string`, `decimal` or `lookup`.
    #[serde(rename = "type")]
    pub field_type: String,
    /// Target table name, present for lookup fields.
    #[serde(default)]
    pub lookup: Option<String>,
}

/// One row: field name to text value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    values: IndexMap<String, String>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    /// Load and validate a dataset file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse and validate a dataset with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let raw: RawDataset = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
        let dataset = raw.into_dataset(&ctx)?;
        dataset.validate(&ctx)?;
        Ok(dataset)
    }

    /// Check the structural invariants the generator relies on.
    fn validate(&self, ctx: &SourceContext) -> Result<()> {
        let mut seen = HashSet::new();
        for table in &self.tables {
            if !seen.insert(table.name.as_str()) {
                return Err(ctx.duplicate_table_error(&table.name));
            }
        }

        for table in &self.tables {
            for field in &table.fields {
                match (field.is_lookup(), &field.lookup) {
                    (true, None) => {
                        return Err(ctx.validation_error(
                            format!(
                                "lookup field '{}.{}' has no lookup target",
                                table.name, field.name
                            ),
                            &field.name,
                        ));
                    }
                    (true, Some(target)) if !seen.contains(target.as_str()) => {
                        return Err(ctx.unknown_lookup_error(&table.name, &field.name, target));
                    }
                    (false, Some(_)) => {
                        return Err(ctx.validation_error(
                            format!(
                                "field '{}.{}' of type '{}' cannot declare a lookup target",
                                table.name, field.name, field.field_type
                            ),
                            &field.name,
                        ));
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for Dataset {
    type Err = Box<Error>;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_str_with_filename(s, "data.toml")
    }
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    /// The ordered schema of this table.
    pub fn schema(&self) -> &[Field] {
        &self.fields
    }
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            lookup: None,
        }
    }

    /// A lookup field referencing `target`.
    pub fn lookup(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: LOOKUP.to_string(),
            lookup: Some(target.into()),
        }
    }

    pub fn is_lookup(&self) -> bool {
        self.field_type == LOOKUP
    }

    /// Whether cells of this field are written as bare numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(self.field_type.as_str(), LOOKUP | INT | DECIMAL)
    }
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    /// Read a cell by field name.
    ///
    /// Exact matches win; otherwise the first case-insensitive match is used.
    /// Missing cells read as empty text.
    pub fn get(&self, field: &str) -> &str {
        if let Some(value) = self.values.get(field) {
            return value;
        }
        self.values
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(field))
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    /// The mandatory row identifier.
    pub fn id(&self) -> &str {
        self.get("id")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[derive(Deserialize)]
struct RawDataset {
    #[serde(default)]
    package: Option<String>,
    #[serde(default)]
    tables: Vec<RawTable>,
}

#[derive(Deserialize)]
struct RawTable {
    name: String,
    #[serde(default)]
    fields: Vec<Field>,
    #[serde(default)]
    rows: Vec<IndexMap<String, toml::Value>>,
}

impl RawDataset {
    /// Render every cell to text; only scalar cells are accepted.
    fn into_dataset(self, ctx: &SourceContext) -> Result<Dataset> {
        let tables = self
            .tables
            .into_iter()
            .map(|raw| raw.into_table(ctx))
            .collect::<Result<Vec<_>>>()?;

        Ok(Dataset {
            package: self.package,
            tables,
        })
    }
}

impl RawTable {
    fn into_table(self, ctx: &SourceContext) -> Result<Table> {
        let mut rows = Vec::with_capacity(self.rows.len());
        for (index, cells) in self.rows.iter().enumerate() {
            let mut row = Row::new();
            for (field, value) in cells {
                let Some(text) = toml_value_to_string(value) else {
                    return Err(ctx.validation_error(
                        format!(
                            "cell '{}.{}' in row {} must be a scalar value, found {}",
                            self.name,
                            field,
                            index + 1,
                            value.type_str()
                        ),
                        &self.name,
                    ));
                };
                row = row.with(field.as_str(), text);
            }
            rows.push(row);
        }

        Ok(Table {
            name: self.name,
            fields: self.fields,
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    const ITEMS: &str = r#"
        package = "net.mkv25.Game"

        [[tables]]
        name = "ItemKind"
        fields = [{ name = "id", type = "int" }, { name = "Name", type = "string" }]
        rows = [{ id = 0, Name = "Weapon" }, { id = 1, Name = "Armour" }]

        [[tables]]
        name = "Item"
        fields = [
            { name = "id", type = "int" },
            { name = "name", type = "string" },
            { name = "cost", type = "decimal" },
            { name = "kind", type = "lookup", lookup = "ItemKind" },
        ]
        rows = [
            { id = 1, name = "Sword", cost = 10, kind = 0 },
            { id = 2, name = "Shield", cost = "", kind = 1 },
        ]
    "#;

    #[test]
    fn test_parse_dataset() {
        let dataset = Dataset::from_str(ITEMS).unwrap();

        assert_eq!(dataset.package.as_deref(), Some("net.mkv25.Game"));
        assert_eq!(dataset.tables.len(), 2);

        let item = &dataset.tables[1];
        assert_eq!(item.name, "Item");
        assert_eq!(item.schema().len(), 4);
        assert!(item.schema()[3].is_lookup());
        assert_eq!(item.schema()[3].lookup.as_deref(), Some("ItemKind"));
        assert_eq!(item.rows[0].get("name"), "Sword");
        assert_eq!(item.rows[0].get("cost"), "10");
        assert_eq!(item.rows[1].get("cost"), "");
        assert_eq!(item.rows[1].id(), "2");
    }

    #[test]
    fn test_row_lookup_is_case_insensitive() {
        let row = Row::new().with("Id", "7").with("Name", "Active");

        assert_eq!(row.id(), "7");
        assert_eq!(row.get("name"), "Active");
        assert_eq!(row.get("missing"), "");
    }

    #[test]
    fn test_exact_match_wins_over_case_insensitive() {
        let row = Row::new().with("ID", "upper").with("id", "lower");
        assert_eq!(row.id(), "lower");
    }

    #[test]
    fn test_numeric_types() {
        assert!(Field::new("a", "int").is_numeric());
        assert!(Field::new("b", "decimal").is_numeric());
        assert!(Field::lookup("c", "T").is_numeric());
        assert!(!Field::new("d", "string").is_numeric());
    }

    #[test]
    fn test_duplicate_table_rejected() {
        let err = Dataset::from_str(
            r#"
            [[tables]]
            name = "Item"

            [[tables]]
            name = "Item"
            "#,
        )
        .unwrap_err();

        assert!(matches!(*err, Error::DuplicateTable { ref name, .. } if name == "Item"));
    }

    #[test]
    fn test_lookup_without_target_rejected() {
        let err = Dataset::from_str(
            r#"
            [[tables]]
            name = "Item"
            fields = [{ name = "kind", type = "lookup" }]
            "#,
        )
        .unwrap_err();

        assert!(matches!(*err, Error::Validation { .. }));
        assert!(err.to_string().contains("has no lookup target"));
    }

    #[test]
    fn test_lookup_to_unknown_table_rejected() {
        let err = Dataset::from_str(
            r#"
            [[tables]]
            name = "Item"
            fields = [{ name = "kind", type = "lookup", lookup = "Nope" }]
            "#,
        )
        .unwrap_err();

        assert!(matches!(*err, Error::UnknownLookupTable { ref target, .. } if target == "Nope"));
    }

    #[test]
    fn test_target_on_plain_field_rejected() {
        let err = Dataset::from_str(
            r#"
            [[tables]]
            name = "Item"
            fields = [{ name = "cost", type = "int", lookup = "Item" }]
            "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("cannot declare a lookup target"));
    }

    #[test]
    fn test_non_scalar_cell_rejected() {
        let err = Dataset::from_str(
            r#"
            [[tables]]
            name = "Item"
            fields = [{ name = "id", type = "int" }, { name = "tags", type = "string" }]
            rows = [{ id = 1, tags = ["a", "b"] }]
            "#,
        )
        .unwrap_err();

        assert!(matches!(*err, Error::Validation { .. }));
        assert_eq!(
            err.to_string(),
            "cell 'Item.tags' in row 1 must be a scalar value, found array"
        );
    }

    #[test]
    fn test_inline_table_cell_rejected() {
        let err = Dataset::from_str(
            r#"
            [[tables]]
            name = "Item"
            rows = [{ id = 1 }, { id = 2, meta = { a = 1 } }]
            "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("'Item.meta' in row 2"));
        assert!(err.to_string().ends_with("found table"));
    }

    #[test]
    fn test_whole_float_cell_keeps_fraction() {
        let dataset = Dataset::from_str(
            r#"
            [[tables]]
            name = "Item"
            fields = [{ name = "cost", type = "decimal" }]
            rows = [{ cost = 10.0 }, { cost = 2.5 }]
            "#,
        )
        .unwrap();

        assert_eq!(dataset.tables[0].rows[0].get("cost"), "10.0");
        assert_eq!(dataset.tables[0].rows[1].get("cost"), "2.5");
    }

    #[test]
    fn test_parse_error_reported() {
        let err = Dataset::from_str("[[tables]\nname = ").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }
}
