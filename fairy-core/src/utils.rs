//! Shared utility functions for code generation.

/// Split a name into words on separators and lower-to-upper case boundaries.
fn words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in s.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Convert a string to PascalCase (e.g., "hello_world" -> "HelloWorld")
///
/// Only the first letter of each word is touched.
pub fn to_pascal_case(s: &str) -> String {
    s.split(|c: char| !c.is_alphanumeric())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Convert a string to camelCase (e.g., "item_kind" -> "itemKind")
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}

/// Convert a string to SCREAMING_SNAKE_CASE (e.g., "ItemKind" -> "ITEM_KIND")
pub fn to_screaming_snake_case(s: &str) -> String {
    words(s)
        .iter()
        .map(|w| w.to_uppercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Convert a scalar TOML value to its string representation.
///
/// Whole floats keep a trailing `.0` so `10.0` stays distinguishable from
/// `10`. Arrays and tables have no text form and return `None`.
pub fn toml_value_to_string(value: &toml::Value) -> Option<String> {
    let text = match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{:.1}", f),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(d) => d.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("hello"), "Hello");
        assert_eq!(to_pascal_case("hello_world"), "HelloWorld");
        assert_eq!(to_pascal_case("item kind"), "ItemKind");
        assert_eq!(to_pascal_case("hElLo"), "HElLo");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("cost"), "cost");
        assert_eq!(to_camel_case("item_kind"), "itemKind");
        assert_eq!(to_camel_case("ItemKind"), "itemKind");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn test_to_screaming_snake_case() {
        assert_eq!(to_screaming_snake_case("Active"), "ACTIVE");
        assert_eq!(to_screaming_snake_case("ItemKind"), "ITEM_KIND");
        assert_eq!(to_screaming_snake_case("item kind"), "ITEM_KIND");
        assert_eq!(to_screaming_snake_case("Level 2 boss"), "LEVEL_2_BOSS");
        assert_eq!(to_screaming_snake_case(""), "");
    }

    #[test]
    fn test_toml_value_to_string() {
        let text = |v: toml::Value| toml_value_to_string(&v);

        assert_eq!(text(toml::Value::String("hello".to_string())).as_deref(), Some("hello"));
        assert_eq!(text(toml::Value::Integer(42)).as_deref(), Some("42"));
        assert_eq!(text(toml::Value::Float(10.5)).as_deref(), Some("10.5"));
        assert_eq!(text(toml::Value::Boolean(true)).as_deref(), Some("true"));
    }

    #[test]
    fn test_whole_float_keeps_fraction() {
        assert_eq!(
            toml_value_to_string(&toml::Value::Float(10.0)).as_deref(),
            Some("10.0")
        );
        assert_eq!(
            toml_value_to_string(&toml::Value::Float(-3.0)).as_deref(),
            Some("-3.0")
        );
    }

    #[test]
    fn test_non_scalar_has_no_text() {
        let array = toml::Value::Array(vec![toml::Value::Integer(1)]);
        let table = toml::Value::Table(toml::Table::new());

        assert_eq!(toml_value_to_string(&array), None);
        assert_eq!(toml_value_to_string(&table), None);
    }
}
