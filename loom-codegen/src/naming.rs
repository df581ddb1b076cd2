//! Naming conventions for the target languages.

use loom_core::{to_pascal_case, to_snake_case};
use loom_ir::Lang;

/// Language-specific naming conventions.
///
/// Defines how declared names map onto type and file names and
/// how reserved words are escaped.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Transform a declared name into a type name (e.g., "order_item" -> "OrderItem")
    pub to_type: fn(&str) -> String,
    /// Transform a source file name (without extension)
    pub to_file: fn(&str) -> String,
    /// List of reserved words in the language
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g., "type" -> "_type")
    pub escape_reserved: fn(&str) -> String,
}

impl NamingConvention {
    /// Check if a name is a reserved word.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Get a safe name, escaping if necessary.
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }

    /// Transform and make safe for use as a type name.
    pub fn type_name(&self, name: &str) -> String {
        let transformed = (self.to_type)(name);
        self.safe_name(&transformed)
    }

    /// Transform for use as a file name.
    pub fn file_name(&self, name: &str) -> String {
        (self.to_file)(name)
    }
}

/// The qualifier under which declarations of the package at `import_path`
/// are named: the import path itself for Go, its dotted form for Java.
pub fn package_qualifier(lang: Lang, import_path: &str) -> String {
    match lang {
        Lang::Go => import_path.to_string(),
        Lang::Java => import_path
            .split('/')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("."),
    }
}

fn escape_with_underscore(name: &str) -> String {
    format!("_{}", name)
}

/// Go naming conventions.
pub const GO_NAMING: NamingConvention = NamingConvention {
    to_type: to_pascal_case,
    to_file: to_snake_case,
    reserved_words: &[
        "break",
        "case",
        "chan",
        "const",
        "continue",
        "default",
        "defer",
        "else",
        "fallthrough",
        "for",
        "func",
        "go",
        "goto",
        "if",
        "import",
        "interface",
        "map",
        "package",
        "range",
        "return",
        "select",
        "struct",
        "switch",
        "type",
        "var",
    ],
    escape_reserved: escape_with_underscore,
};

/// Java naming conventions.
pub const JAVA_NAMING: NamingConvention = NamingConvention {
    to_type: to_pascal_case,
    to_file: to_pascal_case,
    reserved_words: &[
        "abstract",
        "assert",
        "boolean",
        "break",
        "byte",
        "case",
        "catch",
        "char",
        "class",
        "const",
        "continue",
        "default",
        "do",
        "double",
        "else",
        "enum",
        "extends",
        "final",
        "finally",
        "float",
        "for",
        "goto",
        "if",
        "implements",
        "import",
        "instanceof",
        "int",
        "interface",
        "long",
        "native",
        "new",
        "package",
        "private",
        "protected",
        "public",
        "return",
        "short",
        "static",
        "strictfp",
        "super",
        "switch",
        "synchronized",
        "this",
        "throw",
        "throws",
        "transient",
        "try",
        "void",
        "volatile",
        "while",
        "true",
        "false",
        "null",
    ],
    escape_reserved: escape_with_underscore,
};
