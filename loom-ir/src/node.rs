//! Node identity, parent links, metadata and the attachment primitive.
//!
//! Every IR element is a [`Node`]: a cheap, shared handle to the element's
//! metadata and its kind-specific content. Typed handles like
//! [`Struct`](crate::Struct) wrap a `Node` and dereference to it, so the
//! metadata accessors are available on every handle.
//!
//! A node can be attached to exactly one parent, exactly once. All builder
//! methods go through [`Node::attach`]. A builder attaching several children
//! either attaches all of them or releases the ones it already linked, so a
//! failed call never strands a node.

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::fmt;
use std::ops::Deref;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;

use crate::block::{BlockData, CommentData, TplData, TypeRefData};
use crate::error::IrError;
use crate::error_group::{ErrorCaseData, ErrorGroupData};
use crate::expr::{
    BasicLitData, BinaryData, CallData, CompositeLitData, IdentData, SelectorData, UnaryData,
};
use crate::func::{FuncData, ParamData};
use crate::macros::MacroData;
use crate::module::{ModuleData, PackageData, SrcFileData};
use crate::stmt::{AssignData, DeferData, ForData, IfData, RangeData, ReturnData};
use crate::types::{EnumData, FieldData, InterfaceData, StructData};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Best-effort source position, used for diagnostics only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pos {
    pub file: String,
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.col)
    }
}

/// Kind-specific content of a node.
pub(crate) trait Content {
    /// Owned children in declaration order.
    fn children(&self) -> Vec<Node>;

    /// A copy whose children are fresh, unattached deep copies.
    fn duplicate(&self) -> Self;

    /// The declared name, if the kind has one.
    fn label(&self) -> Option<String> {
        None
    }
}

struct Inner {
    id: NodeId,
    parent: RefCell<Option<Weak<Inner>>>,
    attached: Cell<bool>,
    doc: RefCell<Option<String>>,
    pos: RefCell<Option<Pos>>,
    tags: RefCell<IndexMap<String, String>>,
    data: NodeData,
}

/// A shared handle to an IR element.
///
/// Cloning a `Node` clones the handle, not the element. Use
/// [`Node::deep_copy`] to get an independent, unattached copy.
#[derive(Clone)]
pub struct Node(Rc<Inner>);

impl Node {
    fn new(data: NodeData) -> Self {
        Self(Rc::new(Inner {
            id: NodeId::next(),
            parent: RefCell::new(None),
            attached: Cell::new(false),
            doc: RefCell::new(None),
            pos: RefCell::new(None),
            tags: RefCell::new(IndexMap::new()),
            data,
        }))
    }

    /// Identity of this node.
    pub fn id(&self) -> NodeId {
        self.0.id
    }

    /// The kind of element this node holds.
    pub fn kind(&self) -> NodeKind {
        self.0.data.kind()
    }

    /// The declared name, for kinds which have one.
    pub fn label(&self) -> Option<String> {
        self.0.data.label()
    }

    /// The parent this node is attached to. `None` for roots and for nodes
    /// not yet attached.
    pub fn parent(&self) -> Option<Node> {
        self.0
            .parent
            .borrow()
            .as_ref()
            .and_then(Weak::upgrade)
            .map(Node)
    }

    /// The children of this node in declaration order.
    ///
    /// This is a fresh vector on every call; mutating it never affects the
    /// node.
    pub fn children(&self) -> Vec<Node> {
        self.0.data.children()
    }

    /// The doc comment, if any.
    pub fn doc(&self) -> Option<String> {
        self.0.doc.borrow().clone()
    }

    /// Replace the doc comment.
    pub fn set_doc(&self, doc: impl Into<String>) {
        *self.0.doc.borrow_mut() = Some(doc.into());
    }

    /// The source position, if any.
    pub fn pos(&self) -> Option<Pos> {
        self.0.pos.borrow().clone()
    }

    /// Record the source position.
    pub fn set_pos(&self, pos: Pos) {
        *self.0.pos.borrow_mut() = Some(pos);
    }

    /// The out-of-band tag with the given key.
    pub fn tag(&self, key: &str) -> Option<String> {
        self.0.tags.borrow().get(key).cloned()
    }

    /// All tags in insertion order.
    pub fn tags(&self) -> IndexMap<String, String> {
        self.0.tags.borrow().clone()
    }

    /// Set an out-of-band tag.
    pub fn set_tag(&self, key: impl Into<String>, value: impl Into<String>) {
        self.0.tags.borrow_mut().insert(key.into(), value.into());
    }

    /// True if both handles point to the same element.
    pub fn same(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// True if `ancestor` is this node or one of its parents.
    pub fn is_descendant_of(&self, ancestor: &Node) -> bool {
        let mut cursor = Some(self.clone());
        while let Some(node) = cursor {
            if node.same(ancestor) {
                return true;
            }
            cursor = node.parent();
        }
        false
    }

    /// Convert into a typed handle.
    pub fn cast<T: TryFrom<Node>>(&self) -> Option<T> {
        T::try_from(self.clone()).ok()
    }

    /// Short human readable description used in error messages.
    pub fn describe(&self) -> String {
        match self.label() {
            Some(label) if !label.is_empty() => {
                format!("{} '{}' ({})", self.kind(), label, self.id())
            }
            _ => format!("{} ({})", self.kind(), self.id()),
        }
    }

    /// True once the node has been attached. Stays true after the parent
    /// is dropped, so a node is never adopted twice.
    pub fn is_attached(&self) -> bool {
        self.0.attached.get()
    }

    /// Attach `child` to this node.
    ///
    /// Fails if `child` was ever attached, or if `child` is this node or
    /// one of its ancestors.
    pub(crate) fn attach(&self, child: &Node) -> Result<(), IrError> {
        if child.is_attached() {
            let parent = child
                .parent()
                .map(|p| p.describe())
                .unwrap_or_else(|| "a dropped parent".to_string());
            return Err(IrError::AlreadyAttached {
                node: child.describe(),
                parent,
            });
        }
        if self.is_descendant_of(child) {
            return Err(IrError::Cycle {
                node: child.describe(),
                parent: self.describe(),
            });
        }
        child.link(self);
        Ok(())
    }

    /// Attach all of `children` to this node, or none of them: on failure
    /// the ones attached by this call are released again.
    pub(crate) fn attach_each<'a>(
        &self,
        children: impl IntoIterator<Item = &'a Node>,
    ) -> Result<(), IrError> {
        let mut linked: Vec<&Node> = Vec::new();
        for child in children {
            if let Err(err) = self.attach(child) {
                for node in linked {
                    node.unlink();
                }
                return Err(err);
            }
            linked.push(child);
        }
        Ok(())
    }

    fn link(&self, parent: &Node) {
        *self.0.parent.borrow_mut() = Some(Rc::downgrade(&parent.0));
        self.0.attached.set(true);
    }

    fn unlink(&self) {
        *self.0.parent.borrow_mut() = None;
        self.0.attached.set(false);
    }

    /// Parent every current child to this node. Only used on freshly built
    /// copies, whose children have no parent yet.
    fn adopt_children(&self) {
        for child in self.children() {
            child.link(self);
        }
    }

    fn copy_meta(&self, from: &Node) {
        *self.0.doc.borrow_mut() = from.doc();
        *self.0.pos.borrow_mut() = from.pos();
        *self.0.tags.borrow_mut() = from.tags();
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Eq for Node {}

/// Generates the closed set of node kinds together with one typed handle
/// per kind.
macro_rules! node_kinds {
    ($($(#[$meta:meta])* $kind:ident($data:ident)),* $(,)?) => {
        /// Discriminant of every IR element.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum NodeKind {
            $($kind),*
        }

        impl NodeKind {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(NodeKind::$kind => stringify!($kind)),*
                }
            }
        }

        impl fmt::Display for NodeKind {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        enum NodeData {
            $($kind(Rc<RefCell<$data>>)),*
        }

        impl NodeData {
            fn kind(&self) -> NodeKind {
                match self {
                    $(NodeData::$kind(_) => NodeKind::$kind),*
                }
            }

            fn children(&self) -> Vec<Node> {
                match self {
                    $(NodeData::$kind(d) => d.borrow().children()),*
                }
            }

            fn label(&self) -> Option<String> {
                match self {
                    $(NodeData::$kind(d) => d.borrow().label()),*
                }
            }
        }

        impl Node {
            /// An independent copy of this subtree. The copy and all of its
            /// descendants are fresh nodes; the copy itself is unattached.
            pub fn deep_copy(&self) -> Node {
                match &self.0.data {
                    $(NodeData::$kind(data) => {
                        $kind {
                            node: self.clone(),
                            data: data.clone(),
                        }
                        .duplicate()
                        .into()
                    }),*
                }
            }
        }

        $(
            $(#[$meta])*
            #[derive(Clone)]
            pub struct $kind {
                node: Node,
                data: Rc<RefCell<$data>>,
            }

            impl $kind {
                pub(crate) fn from_data(data: $data) -> Self {
                    let data = Rc::new(RefCell::new(data));
                    Self {
                        node: Node::new(NodeData::$kind(data.clone())),
                        data,
                    }
                }

                pub(crate) fn data(&self) -> Ref<'_, $data> {
                    self.data.borrow()
                }

                pub(crate) fn data_mut(&self) -> RefMut<'_, $data> {
                    self.data.borrow_mut()
                }

                /// The untyped node handle.
                pub fn as_node(&self) -> &Node {
                    &self.node
                }

                /// An independent, unattached deep copy.
                pub fn duplicate(&self) -> Self {
                    let copy = Self::from_data(self.data().duplicate());
                    copy.node.copy_meta(&self.node);
                    copy.node.adopt_children();
                    copy
                }

                /// Set the doc comment.
                pub fn with_doc(self, doc: impl Into<String>) -> Self {
                    self.node.set_doc(doc);
                    self
                }

                /// Set the source position.
                pub fn with_pos(self, pos: Pos) -> Self {
                    self.node.set_pos(pos);
                    self
                }

                /// Set an out-of-band tag.
                pub fn with_tag(self, key: impl Into<String>, value: impl Into<String>) -> Self {
                    self.node.set_tag(key, value);
                    self
                }
            }

            impl Deref for $kind {
                type Target = Node;

                fn deref(&self) -> &Node {
                    &self.node
                }
            }

            impl From<$kind> for Node {
                fn from(value: $kind) -> Node {
                    value.node
                }
            }

            impl From<&$kind> for Node {
                fn from(value: &$kind) -> Node {
                    value.node.clone()
                }
            }

            impl TryFrom<Node> for $kind {
                type Error = Node;

                fn try_from(node: Node) -> Result<Self, Node> {
                    match &node.0.data {
                        NodeData::$kind(data) => {
                            let data = data.clone();
                            Ok(Self { node, data })
                        }
                        #[allow(unreachable_patterns)]
                        _ => Err(node),
                    }
                }
            }

            impl fmt::Debug for $kind {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Debug::fmt(&self.node, f)
                }
            }

            impl PartialEq for $kind {
                fn eq(&self, other: &Self) -> bool {
                    self.node.same(&other.node)
                }
            }
        )*
    };
}

node_kinds! {
    /// The root of a model; owns packages and carries the render target.
    Module(ModuleData),
    /// A package with an import path; owns source files.
    Package(PackageData),
    /// A single output file; owns top-level types and functions.
    SrcFile(SrcFileData),
    /// A struct or class with fields, methods and nested types.
    Struct(StructData),
    /// An interface with method signatures.
    Interface(InterfaceData),
    /// An integer or string backed enumeration.
    Enum(EnumData),
    /// A closed group of error cases.
    ErrorGroup(ErrorGroupData),
    /// One alternative of an [`ErrorGroup`].
    ErrorCase(ErrorCaseData),
    /// A struct field.
    Field(FieldData),
    /// A function, method or interface method signature.
    Func(FuncData),
    /// A function parameter or result.
    Param(ParamData),
    /// An ordered sequence of block elements.
    Block(BlockData),
    /// A deferred, target-dispatched node producer.
    Macro(MacroData),
    /// A text template line.
    Tpl(TplData),
    /// A line comment inside a block.
    Comment(CommentData),
    /// A type reference resolved through the importer.
    TypeRef(TypeRefData),
    /// An identifier expression.
    Ident(IdentData),
    /// A literal expression.
    BasicLit(BasicLitData),
    /// `x.sel`
    Selector(SelectorData),
    /// `fun(args...)`
    Call(CallData),
    /// A composite literal or constructor call.
    CompositeLit(CompositeLitData),
    /// A prefix operator expression.
    Unary(UnaryData),
    /// A binary operator expression.
    Binary(BinaryData),
    /// An assignment or short variable declaration.
    Assign(AssignData),
    /// A conditional statement.
    If(IfData),
    /// A three-clause loop.
    For(ForData),
    /// A loop over the elements of a collection.
    Range(RangeData),
    /// A deferred call.
    Defer(DeferData),
    /// A return statement.
    Return(ReturnData),
}

/// Children of typed handles as plain nodes.
pub(crate) fn nodes<'a, T>(items: impl IntoIterator<Item = &'a T>) -> Vec<Node>
where
    T: Deref<Target = Node> + 'a,
{
    items.into_iter().map(|t| t.deref().clone()).collect()
}

/// Attach every item to `parent`, returning the items in order.
pub(crate) fn attach_all<T>(parent: &Node, items: impl IntoIterator<Item = T>) -> Result<Vec<T>, IrError>
where
    T: Deref<Target = Node>,
{
    let items: Vec<T> = items.into_iter().collect();
    parent.attach_each(items.iter().map(|item| item.deref()))?;
    Ok(items)
}
