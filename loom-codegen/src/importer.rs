//! Per-file symbol table for qualified names.
//!
//! Each output file gets its own [`Importer`]. Renderers pass every
//! qualified name through [`Importer::shortify`] while rendering the file
//! body, then write the import block from [`Importer::imports`] once the
//! body is complete.

use std::collections::HashMap;

use indexmap::IndexMap;
use loom_core::{Name, make_identifier, make_private};

use crate::builder::{CodeFragment, Renderable};
use crate::naming::GO_NAMING;

/// How a target language brings names into scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStyle {
    /// Packages are imported under a local alias, and names are written as
    /// `alias.Ident` (Go). An alias is never a Go keyword.
    Alias,
    /// Single classes are imported by their full name and written bare.
    /// There are no aliases, so a colliding name stays fully qualified
    /// (Java).
    Class,
}

/// Qualifiers which are always in scope for the [`ImportStyle::Class`]
/// style.
const IMPLICIT_CLASS_QUALIFIERS: &[&str] = &["java.lang"];

/// One line of the import block.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Import {
    /// Import path of a package or full name of a class.
    pub path: String,
    /// Local alias, if it differs from the default one.
    pub alias: Option<String>,
}

/// Collision-free local names for one file.
#[derive(Debug, Clone)]
pub struct Importer {
    style: ImportStyle,
    own_qualifier: String,
    /// Local name => qualifier (alias style) or full name (class style).
    bindings: IndexMap<String, String>,
    /// Qualifier => local alias, alias style only.
    aliases: HashMap<String, String>,
}

impl Importer {
    /// Create an importer for a file whose own package is `own_qualifier`.
    /// Names from the own package are never imported.
    pub fn new(style: ImportStyle, own_qualifier: impl Into<String>) -> Self {
        Self {
            style,
            own_qualifier: own_qualifier.into(),
            bindings: IndexMap::new(),
            aliases: HashMap::new(),
        }
    }

    pub fn style(&self) -> ImportStyle {
        self.style
    }

    /// The local name to use for `name` inside this file.
    ///
    /// Universe names are returned unchanged. Repeating a lookup returns
    /// the same local name.
    pub fn shortify(&mut self, name: &Name) -> String {
        let qualifier = name.qualifier();
        let ident = name.identifier();
        if qualifier.is_empty() || ident.is_empty() {
            return name.as_str().to_string();
        }
        if qualifier == self.own_qualifier {
            return ident.to_string();
        }
        match self.style {
            ImportStyle::Alias => {
                let alias = self.bind_alias(qualifier);
                format!("{alias}.{ident}")
            }
            ImportStyle::Class => self.bind_class(name, qualifier, ident),
        }
    }

    fn bind_alias(&mut self, qualifier: &str) -> String {
        if let Some(alias) = self.aliases.get(qualifier) {
            return alias.clone();
        }
        let base = default_alias(qualifier);
        let mut alias = base.clone();
        let mut num = 1;
        while self.bindings.contains_key(&alias) || GO_NAMING.is_reserved(&alias) {
            num += 1;
            alias = format!("{base}{num}");
        }
        tracing::trace!(%alias, qualifier, "bind import");
        self.bindings.insert(alias.clone(), qualifier.to_string());
        self.aliases.insert(qualifier.to_string(), alias.clone());
        alias
    }

    fn bind_class(&mut self, name: &Name, qualifier: &str, ident: &str) -> String {
        if IMPLICIT_CLASS_QUALIFIERS.contains(&qualifier) {
            return ident.to_string();
        }
        match self.bindings.get(ident) {
            Some(bound) if bound == name.as_str() => ident.to_string(),
            Some(_) => name.as_str().to_string(),
            None => {
                tracing::trace!(ident, name = name.as_str(), "bind import");
                self.bindings
                    .insert(ident.to_string(), name.as_str().to_string());
                ident.to_string()
            }
        }
    }

    /// The import block, sorted by path. An alias is written whenever the
    /// local name differs from the last path segment.
    pub fn imports(&self) -> Vec<Import> {
        let mut imports: Vec<Import> = self
            .bindings
            .iter()
            .map(|(local, path)| match self.style {
                ImportStyle::Alias => Import {
                    path: path.clone(),
                    alias: (local != last_segment(path)).then(|| local.clone()),
                },
                ImportStyle::Class => Import {
                    path: path.clone(),
                    alias: None,
                },
            })
            .collect();
        imports.sort();
        imports
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// The alias a package is imported under unless it collides: the last
/// path segment as a lower-case identifier.
pub fn default_alias(qualifier: &str) -> String {
    let alias = make_private(&make_identifier(last_segment(qualifier)));
    if alias.is_empty() {
        "pkg".to_string()
    } else {
        alias
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// A rendered import block.
#[derive(Debug, Clone)]
pub struct ImportBlock {
    style: ImportStyle,
    imports: Vec<Import>,
}

impl ImportBlock {
    pub fn new(importer: &Importer) -> Self {
        Self {
            style: importer.style,
            imports: importer.imports(),
        }
    }
}

impl Renderable for ImportBlock {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        if self.imports.is_empty() {
            return Vec::new();
        }
        let mut fragments = match self.style {
            ImportStyle::Alias => {
                let lines = self
                    .imports
                    .iter()
                    .map(|i| match &i.alias {
                        Some(alias) => CodeFragment::line(format!("{alias} \"{}\"", i.path)),
                        None => CodeFragment::line(format!("\"{}\"", i.path)),
                    })
                    .collect();
                vec![CodeFragment::block("import (", lines, Some(")".to_string()))]
            }
            ImportStyle::Class => self
                .imports
                .iter()
                .map(|i| CodeFragment::line(format!("import {};", i.path)))
                .collect(),
        };
        fragments.push(CodeFragment::blank());
        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::CodeBuilder;

    #[test]
    fn test_universe_names_are_unchanged() {
        let mut importer = Importer::new(ImportStyle::Alias, "example.com/m");
        assert_eq!(importer.shortify(&Name::new("int")), "int");
        assert!(importer.is_empty());
    }

    #[test]
    fn test_own_package_is_not_imported() {
        let mut importer = Importer::new(ImportStyle::Alias, "example.com/m");
        assert_eq!(importer.shortify(&Name::new("example.com/m.Point")), "Point");
        assert!(importer.imports().is_empty());
    }

    #[test]
    fn test_shortify_is_idempotent() {
        let mut importer = Importer::new(ImportStyle::Alias, "example.com/m");
        let name = Name::new("net/http.Request");
        let first = importer.shortify(&name);
        let second = importer.shortify(&name);
        assert_eq!(first, "http.Request");
        assert_eq!(first, second);
        assert_eq!(importer.imports().len(), 1);
    }

    #[test]
    fn test_collision_gets_numbered_alias() {
        let mut importer = Importer::new(ImportStyle::Alias, "example.com/m");
        let a = importer.shortify(&Name::new("a/foo.Thing"));
        let b = importer.shortify(&Name::new("b/foo.Thing"));
        let c = importer.shortify(&Name::new("c/foo.Thing"));
        assert_eq!(a, "foo.Thing");
        assert_eq!(b, "foo2.Thing");
        assert_eq!(c, "foo3.Thing");
        assert_eq!(importer.shortify(&Name::new("b/foo.Other")), "foo2.Other");

        let imports = importer.imports();
        assert_eq!(
            imports,
            vec![
                Import {
                    path: "a/foo".to_string(),
                    alias: None
                },
                Import {
                    path: "b/foo".to_string(),
                    alias: Some("foo2".to_string())
                },
                Import {
                    path: "c/foo".to_string(),
                    alias: Some("foo3".to_string())
                },
            ]
        );
    }

    #[test]
    fn test_importers_are_independent() {
        let mut first = Importer::new(ImportStyle::Alias, "m");
        let mut second = Importer::new(ImportStyle::Alias, "m");
        first.shortify(&Name::new("a/foo.X"));
        assert_eq!(first.shortify(&Name::new("b/foo.X")), "foo2.X");
        assert_eq!(second.shortify(&Name::new("b/foo.X")), "foo.X");
    }

    #[test]
    fn test_alias_is_sanitized() {
        assert_eq!(default_alias("gopkg.in/yaml.v3"), "yamlv3");
        assert_eq!(default_alias("github.com/google/uuid"), "uuid");
        assert_eq!(default_alias("net"), "net");
        assert_eq!(default_alias("a/---"), "pkg");
    }

    #[test]
    fn test_keyword_segment_gets_alias() {
        let mut importer = Importer::new(ImportStyle::Alias, "m");
        assert_eq!(importer.shortify(&Name::new("example.com/x/type.Kind")), "type2.Kind");
        assert_eq!(importer.shortify(&Name::new("example.com/x/type.Other")), "type2.Other");
        assert_eq!(
            importer.imports(),
            vec![Import {
                path: "example.com/x/type".to_string(),
                alias: Some("type2".to_string())
            }]
        );
    }

    #[test]
    fn test_sanitized_alias_is_written() {
        let mut importer = Importer::new(ImportStyle::Alias, "m");
        assert_eq!(importer.shortify(&Name::new("gopkg.in/yaml.v3.Node")), "yamlv3.Node");
        importer.shortify(&Name::new("net/http.Client"));

        let mut builder = CodeBuilder::go();
        builder.emit(&ImportBlock::new(&importer));
        assert_eq!(
            builder.build(),
            "import (\n\tyamlv3 \"gopkg.in/yaml.v3\"\n\t\"net/http\"\n)\n\n"
        );
    }

    #[test]
    fn test_class_style() {
        let mut importer = Importer::new(ImportStyle::Class, "com.example");
        assert_eq!(importer.shortify(&Name::new("java.util.List")), "List");
        assert_eq!(importer.shortify(&Name::new("java.lang.String")), "String");
        assert_eq!(importer.shortify(&Name::new("com.example.Point")), "Point");
        assert_eq!(importer.shortify(&Name::new("java.awt.List")), "java.awt.List");
        assert_eq!(importer.shortify(&Name::new("java.util.List")), "List");

        let paths: Vec<_> = importer.imports().into_iter().map(|i| i.path).collect();
        assert_eq!(paths, vec!["java.util.List"]);
    }

    #[test]
    fn test_import_block_rendering() {
        let mut importer = Importer::new(ImportStyle::Alias, "m");
        importer.shortify(&Name::new("fmt.Println"));
        importer.shortify(&Name::new("x/fmt.Println"));

        let mut builder = CodeBuilder::go();
        builder.emit(&ImportBlock::new(&importer));
        assert_eq!(
            builder.build(),
            "import (\n\t\"fmt\"\n\tfmt2 \"x/fmt\"\n)\n\n"
        );
    }
}
