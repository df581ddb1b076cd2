//! The minimal expression set used where cross-target fidelity matters.

use crate::error::IrError;
use crate::node::{Content, Node};
use crate::typedecl::TypeDecl;
use crate::{BasicLit, Binary, Call, CompositeLit, Ident, Selector, Unary};

pub(crate) struct IdentData {
    name: String,
}

impl Content for IdentData {
    fn children(&self) -> Vec<Node> {
        Vec::new()
    }

    fn duplicate(&self) -> Self {
        Self {
            name: self.name.clone(),
        }
    }

    fn label(&self) -> Option<String> {
        Some(self.name.clone())
    }
}

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_data(IdentData { name: name.into() })
    }

    pub fn name(&self) -> String {
        self.data().name.clone()
    }
}

/// The kind of a [`BasicLit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
    Int,
    Float,
    /// Stored unquoted; renderers quote and escape.
    Str,
    /// Stored unquoted; renderers quote and escape.
    Char,
    Bool,
    /// The absent value: `nil` or `null`.
    Nil,
}

pub(crate) struct BasicLitData {
    kind: LitKind,
    value: String,
}

impl Content for BasicLitData {
    fn children(&self) -> Vec<Node> {
        Vec::new()
    }

    fn duplicate(&self) -> Self {
        Self {
            kind: self.kind,
            value: self.value.clone(),
        }
    }
}

impl BasicLit {
    pub fn new(kind: LitKind, value: impl Into<String>) -> Self {
        Self::from_data(BasicLitData {
            kind,
            value: value.into(),
        })
    }

    pub fn int(value: i64) -> Self {
        Self::new(LitKind::Int, value.to_string())
    }

    pub fn float(value: f64) -> Self {
        Self::new(LitKind::Float, value.to_string())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(LitKind::Str, value)
    }

    pub fn char(value: char) -> Self {
        Self::new(LitKind::Char, value.to_string())
    }

    pub fn bool(value: bool) -> Self {
        Self::new(LitKind::Bool, value.to_string())
    }

    pub fn nil() -> Self {
        Self::new(LitKind::Nil, "")
    }

    pub fn lit_kind(&self) -> LitKind {
        self.data().kind
    }

    pub fn value(&self) -> String {
        self.data().value.clone()
    }
}

pub(crate) struct SelectorData {
    x: Node,
    sel: String,
}

impl Content for SelectorData {
    fn children(&self) -> Vec<Node> {
        vec![self.x.clone()]
    }

    fn duplicate(&self) -> Self {
        Self {
            x: self.x.deep_copy(),
            sel: self.sel.clone(),
        }
    }
}

impl Selector {
    /// `x.sel`
    pub fn new(x: impl Into<Node>, sel: impl Into<String>) -> Result<Self, IrError> {
        let x = x.into();
        let this = Self::from_data(SelectorData {
            x: x.clone(),
            sel: sel.into(),
        });
        this.as_node().attach(&x)?;
        Ok(this)
    }

    pub fn x(&self) -> Node {
        self.data().x.clone()
    }

    pub fn sel(&self) -> String {
        self.data().sel.clone()
    }
}

pub(crate) struct CallData {
    fun: Node,
    args: Vec<Node>,
}

impl Content for CallData {
    fn children(&self) -> Vec<Node> {
        let mut children = vec![self.fun.clone()];
        children.extend(self.args.iter().cloned());
        children
    }

    fn duplicate(&self) -> Self {
        Self {
            fun: self.fun.deep_copy(),
            args: self.args.iter().map(Node::deep_copy).collect(),
        }
    }
}

impl Call {
    /// `fun(args...)`
    pub fn new<T: Into<Node>>(
        fun: impl Into<Node>,
        args: impl IntoIterator<Item = T>,
    ) -> Result<Self, IrError> {
        let fun = fun.into();
        let args: Vec<Node> = args.into_iter().map(Into::into).collect();
        let this = Self::from_data(CallData {
            fun: fun.clone(),
            args: args.clone(),
        });
        this.as_node()
            .attach_each(std::iter::once(&fun).chain(args.iter()))?;
        Ok(this)
    }

    pub fn fun(&self) -> Node {
        self.data().fun.clone()
    }

    pub fn args(&self) -> Vec<Node> {
        self.data().args.clone()
    }
}

pub(crate) struct CompositeLitData {
    ty: TypeDecl,
    elements: Vec<Node>,
}

impl Content for CompositeLitData {
    fn children(&self) -> Vec<Node> {
        self.elements.clone()
    }

    fn duplicate(&self) -> Self {
        Self {
            ty: self.ty.clone(),
            elements: self.elements.iter().map(Node::deep_copy).collect(),
        }
    }
}

impl CompositeLit {
    /// A literal of type `ty` with positional elements: `T{a, b}` or
    /// `new T(a, b)`.
    pub fn new<T: Into<Node>>(
        ty: impl Into<TypeDecl>,
        elements: impl IntoIterator<Item = T>,
    ) -> Result<Self, IrError> {
        let elements: Vec<Node> = elements.into_iter().map(Into::into).collect();
        let this = Self::from_data(CompositeLitData {
            ty: ty.into(),
            elements: elements.clone(),
        });
        this.as_node().attach_each(&elements)?;
        Ok(this)
    }

    pub fn type_decl(&self) -> TypeDecl {
        self.data().ty.clone()
    }

    pub fn elements(&self) -> Vec<Node> {
        self.data().elements.clone()
    }
}

pub(crate) struct UnaryData {
    op: String,
    x: Node,
}

impl Content for UnaryData {
    fn children(&self) -> Vec<Node> {
        vec![self.x.clone()]
    }

    fn duplicate(&self) -> Self {
        Self {
            op: self.op.clone(),
            x: self.x.deep_copy(),
        }
    }
}

impl Unary {
    /// `op x`, e.g. `&x` or `!ok`.
    pub fn new(op: impl Into<String>, x: impl Into<Node>) -> Result<Self, IrError> {
        let x = x.into();
        let this = Self::from_data(UnaryData {
            op: op.into(),
            x: x.clone(),
        });
        this.as_node().attach(&x)?;
        Ok(this)
    }

    pub fn op(&self) -> String {
        self.data().op.clone()
    }

    pub fn x(&self) -> Node {
        self.data().x.clone()
    }
}

pub(crate) struct BinaryData {
    x: Node,
    op: String,
    y: Node,
}

impl Content for BinaryData {
    fn children(&self) -> Vec<Node> {
        vec![self.x.clone(), self.y.clone()]
    }

    fn duplicate(&self) -> Self {
        Self {
            x: self.x.deep_copy(),
            op: self.op.clone(),
            y: self.y.deep_copy(),
        }
    }
}

impl Binary {
    /// `x op y`
    pub fn new(
        x: impl Into<Node>,
        op: impl Into<String>,
        y: impl Into<Node>,
    ) -> Result<Self, IrError> {
        let (x, y) = (x.into(), y.into());
        let this = Self::from_data(BinaryData {
            x: x.clone(),
            op: op.into(),
            y: y.clone(),
        });
        this.as_node().attach_each([&x, &y])?;
        Ok(this)
    }

    pub fn x(&self) -> Node {
        self.data().x.clone()
    }

    pub fn op(&self) -> String {
        self.data().op.clone()
    }

    pub fn y(&self) -> Node {
        self.data().y.clone()
    }
}
