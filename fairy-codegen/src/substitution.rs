//! Literal placeholder substitution over whole template bodies.
//!
//! Replacement is plain ordered substring replacement. Nothing is escaped
//! and later replacements see the output of earlier ones; template authors
//! rely on exactly this behaviour.

use datafairy_schema::TemplateVariable;

/// Structural placeholder: the resolved package string.
pub const PACKAGE_STRING: &str = "PACKAGE_STRING";
/// Structural placeholder: the generated class name.
pub const CLASS_NAME: &str = "CLASS_NAME";
/// Structural placeholder: variable or constant declarations.
pub const VARIABLE_LIST: &str = "VARIABLE_LIST";
/// Structural placeholder: property declarations.
pub const PROPERTY_LIST: &str = "PROPERTY_LIST";
/// Structural placeholder: the constructor parameter declarations.
pub const CLASS_PARAMS_STRING: &str = "CLASS_PARAMS_STRING";
/// Structural placeholder: the constructor assignment statements.
pub const CLASS_PARAMS_LIST: &str = "CLASS_PARAMS_LIST";
/// Structural placeholder: the row class name inside a table file.
pub const ROW_CLASS_NAME: &str = "ROW_CLASS_NAME";
/// Structural placeholder: the raw table name.
pub const TABLE_NAME: &str = "TABLE_NAME";
/// Structural placeholder: one declaration per row.
pub const ROW_LIST: &str = "ROW_LIST";
/// Structural placeholder: one construction per table.
pub const CLASS_LIST: &str = "CLASS_LIST";

/// Ordered user-defined token/replacement pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVariables {
    pairs: Vec<(String, String)>,
}

impl TemplateVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair; pairs apply in insertion order.
    pub fn push(&mut self, token: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((token.into(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(t, v)| (t.as_str(), v.as_str()))
    }

    /// Apply every pair to `body` in order.
    pub fn apply(&self, body: &str) -> String {
        self.pairs
            .iter()
            .fold(body.to_string(), |acc, (token, value)| {
                replace(acc, token, value)
            })
    }
}

impl From<&[TemplateVariable]> for TemplateVariables {
    fn from(variables: &[TemplateVariable]) -> Self {
        Self {
            pairs: variables
                .iter()
                .map(|v| (v.token.clone(), v.value.clone()))
                .collect(),
        }
    }
}

/// Fluent, ordered substitution over one template body.
///
/// # Example
///
/// ```
/// use datafairy_codegen::substitution::{Substitution, TemplateVariables, CLASS_NAME};
///
/// let body = Substitution::new("class CLASS_NAME {}")
///     .variables(&TemplateVariables::new())
///     .replace(CLASS_NAME, "ItemRow")
///     .finish();
///
/// assert_eq!(body, "class ItemRow {}");
/// ```
#[derive(Debug, Clone)]
pub struct Substitution {
    body: String,
}

impl Substitution {
    pub fn new(body: &str) -> Self {
        Self {
            body: body.to_string(),
        }
    }

    /// Apply the user-defined variables.
    pub fn variables(mut self, variables: &TemplateVariables) -> Self {
        self.body = variables.apply(&self.body);
        self
    }

    /// Replace every occurrence of `token` with `value`.
    pub fn replace(mut self, token: &str, value: &str) -> Self {
        self.body = replace(self.body, token, value);
        self
    }

    /// Replace `token` with a generated block, trailing line breaks trimmed.
    pub fn block(self, token: &str, block: &str) -> Self {
        self.replace(token, trim_line_ends(block))
    }

    pub fn finish(self) -> String {
        self.body
    }
}

fn replace(body: String, token: &str, value: &str) -> String {
    if token.is_empty() || !body.contains(token) {
        return body;
    }
    body.replace(token, value)
}

/// Strip trailing `\n` and `\r` characters.
pub fn trim_line_ends(s: &str) -> &str {
    s.trim_end_matches(['\n', '\r'])
}

/// Accumulates generated lines under a leading comment.
#[derive(Debug, Clone)]
pub struct Block {
    buffer: String,
}

impl Block {
    /// Start a block with its leading comment line.
    pub fn new(comment: &str) -> Self {
        let mut block = Self {
            buffer: String::new(),
        };
        block.line(comment);
        block
    }

    /// Append a line.
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}
