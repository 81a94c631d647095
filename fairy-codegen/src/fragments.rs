//! Fragment renderers: the target-language syntax for single constructs.

use std::fmt;

use datafairy_schema::FragmentPatterns;

/// The seven constructs a pass can ask a renderer for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    ClassVariable,
    ClassProperty,
    Constant,
    LocalVariable,
    LocalAssignment,
    NewClassInstance,
    Parameter,
}

impl FragmentKind {
    pub const ALL: [FragmentKind; 7] = [
        FragmentKind::ClassVariable,
        FragmentKind::ClassProperty,
        FragmentKind::Constant,
        FragmentKind::LocalVariable,
        FragmentKind::LocalAssignment,
        FragmentKind::NewClassInstance,
        FragmentKind::Parameter,
    ];

    /// Key used for this fragment in template.toml
    pub fn key(&self) -> &'static str {
        match self {
            FragmentKind::ClassVariable => "class_variable",
            FragmentKind::ClassProperty => "class_property",
            FragmentKind::Constant => "constant",
            FragmentKind::LocalVariable => "local_variable",
            FragmentKind::LocalAssignment => "local_assignment",
            FragmentKind::NewClassInstance => "new_class_instance",
            FragmentKind::Parameter => "parameter",
        }
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FragmentKind::ClassVariable => "class variable",
            FragmentKind::ClassProperty => "class property",
            FragmentKind::Constant => "constant",
            FragmentKind::LocalVariable => "local variable",
            FragmentKind::LocalAssignment => "local assignment",
            FragmentKind::NewClassInstance => "class instance",
            FragmentKind::Parameter => "parameter",
        };
        f.write_str(name)
    }
}

/// Renders single syntactic units of the target language.
///
/// Passes never format code themselves; swapping the renderer swaps the
/// output language. A renderer may leave some constructs unsupported, in
/// which case any pass needing them aborts instead of producing output.
pub trait FragmentRenderer {
    /// Whether this renderer can produce `kind`.
    fn supports(&self, _kind: FragmentKind) -> bool {
        true
    }

    /// A class level variable declaration.
    fn class_variable(&self, name: &str, ty: &str) -> String;

    /// A class property declaration.
    fn class_property(&self, name: &str, ty: &str) -> String;

    /// A constant declaration with a value.
    fn constant(&self, name: &str, ty: &str, value: &str) -> String;

    /// A local variable declaration with an initial value.
    fn local_variable(&self, name: &str, ty: &str, value: &str) -> String;

    /// An assignment of `value` to an existing name.
    fn local_assignment(&self, name: &str, value: &str) -> String;

    /// An expression constructing `class_name` from a parameter string.
    fn new_class_instance(&self, class_name: &str, params: &str) -> String;

    /// A single parameter declaration.
    fn parameter(&self, name: &str, ty: &str) -> String;
}

/// A renderer driven by the patterns declared in template.toml.
#[derive(Debug, Clone, Default)]
pub struct PatternFragments {
    patterns: FragmentPatterns,
}

impl PatternFragments {
    pub fn new(patterns: FragmentPatterns) -> Self {
        Self { patterns }
    }

    fn pattern(&self, kind: FragmentKind) -> Option<&str> {
        let p = &self.patterns;
        match kind {
            FragmentKind::ClassVariable => p.class_variable.as_deref(),
            FragmentKind::ClassProperty => p.class_property.as_deref(),
            FragmentKind::Constant => p.constant.as_deref(),
            FragmentKind::LocalVariable => p.local_variable.as_deref(),
            FragmentKind::LocalAssignment => p.local_assignment.as_deref(),
            FragmentKind::NewClassInstance => p.new_class_instance.as_deref(),
            FragmentKind::Parameter => p.parameter.as_deref(),
        }
    }

    fn render(&self, kind: FragmentKind, args: &[(&str, &str)]) -> String {
        self.pattern(kind)
            .map(|pattern| render_pattern(pattern, args))
            .unwrap_or_default()
    }
}

impl FragmentRenderer for PatternFragments {
    fn supports(&self, kind: FragmentKind) -> bool {
        self.pattern(kind).is_some()
    }

    fn class_variable(&self, name: &str, ty: &str) -> String {
        self.render(FragmentKind::ClassVariable, &[("name", name), ("type", ty)])
    }

    fn class_property(&self, name: &str, ty: &str) -> String {
        self.render(FragmentKind::ClassProperty, &[("name", name), ("type", ty)])
    }

    fn constant(&self, name: &str, ty: &str, value: &str) -> String {
        self.render(
            FragmentKind::Constant,
            &[("name", name), ("type", ty), ("value", value)],
        )
    }

    fn local_variable(&self, name: &str, ty: &str, value: &str) -> String {
        self.render(
            FragmentKind::LocalVariable,
            &[("name", name), ("type", ty), ("value", value)],
        )
    }

    fn local_assignment(&self, name: &str, value: &str) -> String {
        self.render(
            FragmentKind::LocalAssignment,
            &[("name", name), ("value", value)],
        )
    }

    fn new_class_instance(&self, class_name: &str, params: &str) -> String {
        self.render(
            FragmentKind::NewClassInstance,
            &[("name", class_name), ("value", params)],
        )
    }

    fn parameter(&self, name: &str, ty: &str) -> String {
        self.render(FragmentKind::Parameter, &[("name", name), ("type", ty)])
    }
}

/// Replace `{token}` markers in one left-to-right scan.
///
/// Inserted values are never rescanned, so a cell value containing
/// `{name}` is emitted literally.
fn render_pattern(pattern: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;

    'scan: while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        for &(token, value) in args {
            if let Some(after) = tail.strip_prefix(token).and_then(|t| t.strip_prefix('}')) {
                out.push_str(value);
                rest = after;
                continue 'scan;
            }
        }
        out.push('{');
        rest = tail;
    }
    out.push_str(rest);
    out
}
