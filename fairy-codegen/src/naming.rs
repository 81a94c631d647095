//! Naming conventions for generated identifiers.

use datafairy_core::{to_camel_case, to_pascal_case, to_screaming_snake_case};

/// How schema names become identifiers in the target language.
///
/// Each slot is a plain function so a template package for a different
/// language can swap one rule without re-implementing the others.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Transform a table or lookup target name to a class name (e.g., "item_kind" -> "ItemKind")
    pub class_name: fn(&str) -> String,
    /// Transform a row name or table name to a constant name (e.g., "ItemKind" -> "ITEM_KIND")
    pub constant_name: fn(&str) -> String,
    /// Transform a field name to a variable name (e.g., "item_kind" -> "itemKind")
    pub variable_name: fn(&str) -> String,
}

impl NamingConvention {
    pub fn class(&self, name: &str) -> String {
        (self.class_name)(name)
    }

    pub fn constant(&self, name: &str) -> String {
        (self.constant_name)(name)
    }

    pub fn variable(&self, name: &str) -> String {
        (self.variable_name)(name)
    }
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self {
            class_name: to_pascal_case,
            constant_name: to_screaming_snake_case,
            variable_name: to_camel_case,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_convention() {
        let naming = NamingConvention::default();

        assert_eq!(naming.class("item_kind"), "ItemKind");
        assert_eq!(naming.constant("ItemKind"), "ITEM_KIND");
        assert_eq!(naming.variable("item_kind"), "itemKind");
    }

    #[test]
    fn test_custom_rule() {
        let naming = NamingConvention {
            class_name: |s| s.to_uppercase(),
            ..NamingConvention::default()
        };

        assert_eq!(naming.class("item"), "ITEM");
        assert_eq!(naming.variable("item"), "item");
    }
}
