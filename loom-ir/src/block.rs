//! Blocks and their template elements.
//!
//! A block is an ordered sequence of opaque elements: text templates,
//! comments, type references, nested blocks, macros and the small set of
//! structured statements and expressions.

use loom_core::Name;

use crate::error::IrError;
use crate::node::{Content, Node};
use crate::typedecl::TypeDecl;
use crate::{Block, Comment, Tpl, TypeRef};

pub(crate) struct BlockData {
    elements: Vec<Node>,
}

impl Content for BlockData {
    fn children(&self) -> Vec<Node> {
        self.elements.clone()
    }

    fn duplicate(&self) -> Self {
        Self {
            elements: self.elements.iter().map(Node::deep_copy).collect(),
        }
    }
}

impl Block {
    pub fn new() -> Self {
        Self::from_data(BlockData {
            elements: Vec::new(),
        })
    }

    /// Attach and append one element.
    pub fn add(self, element: impl Into<Node>) -> Result<Self, IrError> {
        let element = element.into();
        self.as_node().attach(&element)?;
        self.data_mut().elements.push(element);
        Ok(self)
    }

    /// Attach and append elements in order.
    pub fn add_all<T: Into<Node>>(
        self,
        elements: impl IntoIterator<Item = T>,
    ) -> Result<Self, IrError> {
        let elements: Vec<Node> = elements.into_iter().map(Into::into).collect();
        self.as_node().attach_each(&elements)?;
        self.data_mut().elements.extend(elements);
        Ok(self)
    }

    /// Append a literal text line.
    pub fn text(self, text: impl Into<String>) -> Result<Self, IrError> {
        self.add(Tpl::text(text))
    }

    /// The elements in order.
    pub fn elements(&self) -> Vec<Node> {
        self.data().elements.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.data().elements.is_empty()
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::new()
    }
}

/// A piece of a [`Tpl`].
#[derive(Debug, Clone, PartialEq)]
pub enum TplPart {
    /// Emitted verbatim.
    Text(String),
    /// A type, rendered through the importer.
    Type(TypeDecl),
    /// A qualified symbol like `fmt.Sprintf`, shortened through the
    /// importer.
    Use(Name),
}

pub(crate) struct TplData {
    parts: Vec<TplPart>,
}

impl Content for TplData {
    fn children(&self) -> Vec<Node> {
        Vec::new()
    }

    fn duplicate(&self) -> Self {
        Self {
            parts: self.parts.clone(),
        }
    }
}

impl Tpl {
    /// An empty template.
    pub fn new() -> Self {
        Self::from_data(TplData { parts: Vec::new() })
    }

    /// A template holding only literal text.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new().push(text)
    }

    /// Append literal text.
    pub fn push(self, text: impl Into<String>) -> Self {
        self.data_mut().parts.push(TplPart::Text(text.into()));
        self
    }

    /// Append a type reference.
    pub fn push_type(self, decl: impl Into<TypeDecl>) -> Self {
        self.data_mut().parts.push(TplPart::Type(decl.into()));
        self
    }

    /// Append a qualified symbol.
    pub fn push_use(self, name: impl Into<Name>) -> Self {
        self.data_mut().parts.push(TplPart::Use(name.into()));
        self
    }

    pub fn parts(&self) -> Vec<TplPart> {
        self.data().parts.clone()
    }
}

impl Default for Tpl {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) struct CommentData {
    text: String,
}

impl Content for CommentData {
    fn children(&self) -> Vec<Node> {
        Vec::new()
    }

    fn duplicate(&self) -> Self {
        Self {
            text: self.text.clone(),
        }
    }
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self::from_data(CommentData { text: text.into() })
    }

    pub fn text(&self) -> String {
        self.data().text.clone()
    }
}

pub(crate) struct TypeRefData {
    decl: TypeDecl,
}

impl Content for TypeRefData {
    fn children(&self) -> Vec<Node> {
        Vec::new()
    }

    fn duplicate(&self) -> Self {
        Self {
            decl: self.decl.clone(),
        }
    }
}

impl TypeRef {
    pub fn new(decl: impl Into<TypeDecl>) -> Self {
        Self::from_data(TypeRefData { decl: decl.into() })
    }

    pub fn decl(&self) -> TypeDecl {
        self.data().decl.clone()
    }
}
