//! Type resolution between domain type tags and target types.

use datafairy_schema::{INT, LOOKUP};
use indexmap::IndexMap;

/// Maps domain type tags to target-language type names.
///
/// The map is open: names without an entry resolve to themselves, which
/// lets a dataset use target types directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeResolver {
    types: IndexMap<String, String>,
}

impl TypeResolver {
    pub fn new(types: IndexMap<String, String>) -> Self {
        Self { types }
    }

    /// Whether a domain type has an explicit mapping.
    pub fn contains(&self, domain: &str) -> bool {
        self.types.contains_key(domain)
    }

    /// Resolve a domain type to its target type.
    ///
    /// `lookup` always resolves as `int`; it is never looked up directly.
    pub fn resolve<'a>(&'a self, requested: &'a str) -> &'a str {
        if requested == LOOKUP {
            return self.resolve(INT);
        }
        self.types
            .get(requested)
            .map(String::as_str)
            .unwrap_or(requested)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TypeResolver {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            types: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapped_type() {
        let types = TypeResolver::from_iter([("string", "String"), ("int", "i64")]);
        assert_eq!(types.resolve("string"), "String");
        assert_eq!(types.resolve("int"), "i64");
    }

    #[test]
    fn test_unmapped_type_passes_through() {
        let types = TypeResolver::from_iter([("int", "int")]);
        assert_eq!(types.resolve("Vector3D"), "Vector3D");
        assert_eq!(types.resolve(""), "");
    }

    #[test]
    fn test_lookup_resolves_as_int() {
        let types = TypeResolver::from_iter([("int", "Number"), ("lookup", "Ignored")]);
        assert_eq!(types.resolve("lookup"), types.resolve("int"));
        assert_eq!(types.resolve("lookup"), "Number");
    }

    #[test]
    fn test_lookup_without_int_mapping() {
        let types = TypeResolver::default();
        assert_eq!(types.resolve("lookup"), "int");
    }
}
