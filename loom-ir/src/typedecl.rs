//! Type declarations, visibility and annotations.
//!
//! These are plain values: they are cloned freely and never attached to a
//! parent.

use indexmap::IndexMap;
use loom_core::Name;

use crate::stdlib;

/// Direction of a channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChanDir {
    #[default]
    Both,
    Send,
    Recv,
}

/// How a named type parameter relates to its inner type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeBound {
    /// No relation, the parameter stands alone.
    #[default]
    None,
    /// Upper bound, like `T extends Number`.
    Extends,
    /// Lower bound, like `T super Integer`.
    Super,
}

/// A reference to a type.
///
/// This is a closed set. Maps and lists are [`TypeDecl::Generic`] over the
/// [`stdlib::MAP`] and [`stdlib::LIST`] sentinels so every renderer can pick
/// its own syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDecl {
    /// A named type, qualified or universe scoped.
    Simple(Name),
    /// A pointer to the inner type.
    Pointer(Box<TypeDecl>),
    /// A dynamically sized sequence.
    Slice(Box<TypeDecl>),
    /// A fixed size sequence.
    Array { len: usize, elem: Box<TypeDecl> },
    /// A generic base instantiated with type parameters.
    Generic { base: Name, params: Vec<TypeDecl> },
    /// A type parameter, optionally bounded by an inner type.
    NamedTypeParam {
        ident: String,
        bound: TypeBound,
        inner: Option<Box<TypeDecl>>,
    },
    /// A channel carrying the inner type.
    Channel { elem: Box<TypeDecl>, dir: ChanDir },
    /// A function type.
    Func {
        inputs: Vec<TypeDecl>,
        outputs: Vec<TypeDecl>,
    },
}

impl TypeDecl {
    pub fn simple(name: impl Into<Name>) -> Self {
        TypeDecl::Simple(name.into())
    }

    pub fn pointer(inner: TypeDecl) -> Self {
        TypeDecl::Pointer(Box::new(inner))
    }

    pub fn slice(elem: TypeDecl) -> Self {
        TypeDecl::Slice(Box::new(elem))
    }

    pub fn array(len: usize, elem: TypeDecl) -> Self {
        TypeDecl::Array {
            len,
            elem: Box::new(elem),
        }
    }

    pub fn generic(base: impl Into<Name>, params: impl IntoIterator<Item = TypeDecl>) -> Self {
        TypeDecl::Generic {
            base: base.into(),
            params: params.into_iter().collect(),
        }
    }

    /// `map!<key, value>`
    pub fn map(key: TypeDecl, value: TypeDecl) -> Self {
        Self::generic(stdlib::MAP, [key, value])
    }

    /// `list!<elem>`
    pub fn list(elem: TypeDecl) -> Self {
        Self::generic(stdlib::LIST, [elem])
    }

    /// An unbounded type parameter.
    pub fn param(ident: impl Into<String>) -> Self {
        TypeDecl::NamedTypeParam {
            ident: ident.into(),
            bound: TypeBound::None,
            inner: None,
        }
    }

    /// A type parameter bounded by `inner`.
    pub fn bounded_param(ident: impl Into<String>, bound: TypeBound, inner: TypeDecl) -> Self {
        TypeDecl::NamedTypeParam {
            ident: ident.into(),
            bound,
            inner: Some(Box::new(inner)),
        }
    }

    pub fn chan(elem: TypeDecl, dir: ChanDir) -> Self {
        TypeDecl::Channel {
            elem: Box::new(elem),
            dir,
        }
    }

    pub fn func(
        inputs: impl IntoIterator<Item = TypeDecl>,
        outputs: impl IntoIterator<Item = TypeDecl>,
    ) -> Self {
        TypeDecl::Func {
            inputs: inputs.into_iter().collect(),
            outputs: outputs.into_iter().collect(),
        }
    }

    /// True for the stdlib `error!` sentinel.
    pub fn is_error(&self) -> bool {
        matches!(self, TypeDecl::Simple(name) if name.as_str() == stdlib::ERROR)
    }

    /// All names referenced by this declaration, depth first.
    pub fn names(&self) -> Vec<Name> {
        let mut out = Vec::new();
        self.collect_names(&mut out);
        out
    }

    fn collect_names(&self, out: &mut Vec<Name>) {
        match self {
            TypeDecl::Simple(name) => out.push(name.clone()),
            TypeDecl::Pointer(inner) | TypeDecl::Slice(inner) => inner.collect_names(out),
            TypeDecl::Array { elem, .. } | TypeDecl::Channel { elem, .. } => {
                elem.collect_names(out)
            }
            TypeDecl::Generic { base, params } => {
                out.push(base.clone());
                params.iter().for_each(|p| p.collect_names(out));
            }
            TypeDecl::NamedTypeParam { inner, .. } => {
                if let Some(inner) = inner {
                    inner.collect_names(out);
                }
            }
            TypeDecl::Func { inputs, outputs } => {
                inputs
                    .iter()
                    .chain(outputs.iter())
                    .for_each(|p| p.collect_names(out));
            }
        }
    }
}

impl From<Name> for TypeDecl {
    fn from(value: Name) -> Self {
        TypeDecl::Simple(value)
    }
}

impl From<&str> for TypeDecl {
    fn from(value: &str) -> Self {
        TypeDecl::Simple(value.into())
    }
}

/// Declaration visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    PackagePrivate,
    Protected,
    Private,
}

impl Visibility {
    /// True for [`Visibility::Public`].
    pub fn is_public(&self) -> bool {
        matches!(self, Visibility::Public)
    }
}

/// An annotation: a qualified name plus attribute values.
///
/// The empty attribute name is the default, positional value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub name: Name,
    pub attrs: IndexMap<String, String>,
}

impl Annotation {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            attrs: IndexMap::new(),
        }
    }

    /// Set the default attribute.
    pub fn with_value(self, value: impl Into<String>) -> Self {
        self.with_attr("", value)
    }

    /// Set a named attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// The default attribute, if set.
    pub fn value(&self) -> Option<&str> {
        self.attrs.get("").map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_uses_sentinel() {
        let decl = TypeDecl::map(TypeDecl::simple("string!"), TypeDecl::simple("int!"));
        match decl {
            TypeDecl::Generic { base, params } => {
                assert_eq!(base.as_str(), stdlib::MAP);
                assert_eq!(params.len(), 2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_names_depth_first() {
        let decl = TypeDecl::func(
            [TypeDecl::pointer(TypeDecl::simple("a/b.C"))],
            [TypeDecl::list(TypeDecl::simple("d.E"))],
        );
        let names: Vec<String> = decl.names().iter().map(|n| n.to_string()).collect();
        assert_eq!(names, vec!["a/b.C", "list!", "d.E"]);
    }

    #[test]
    fn test_annotation_attrs_keep_order() {
        let ann = Annotation::new("json")
            .with_value("world")
            .with_attr("omitempty", "true");
        assert_eq!(ann.value(), Some("world"));
        let keys: Vec<&str> = ann.attrs.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["", "omitempty"]);
    }

    #[test]
    fn test_is_error() {
        assert!(TypeDecl::simple(stdlib::ERROR).is_error());
        assert!(!TypeDecl::simple("error").is_error());
    }
}
