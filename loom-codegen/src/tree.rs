//! Render-time tree over an IR model.
//!
//! The IR stays declarative and reusable. A [`Tree`] mirrors it in an
//! arena of entries addressed by [`TreeId`], adds upward navigation that
//! does not depend on the IR's parent links, and carries a payload map per
//! entry for render-pass state such as the per-file importer. Dropping the
//! tree drops all of that state, and nothing is written back into the
//! model.
//!
//! Macro expansions are inserted below the macro's entry, so a macro nested
//! inside an expansion still finds its enclosing function and file.

use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexMap;
use loom_ir::{Node, NodeId, NodeKind};

/// Index of an entry in a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreeId(usize);

struct Entry {
    node: Node,
    parent: Option<TreeId>,
    children: Vec<TreeId>,
    depth: usize,
    payload: IndexMap<&'static str, Rc<dyn Any>>,
}

/// Arena of render-time entries mirroring an IR subtree.
pub struct Tree {
    entries: Vec<Entry>,
    index: HashMap<NodeId, TreeId>,
}

impl Tree {
    /// Mirror `root` and all of its descendants.
    pub fn new(root: impl Into<Node>) -> Self {
        let mut tree = Self {
            entries: Vec::new(),
            index: HashMap::new(),
        };
        tree.push(None, root.into());
        tree
    }

    /// The entry of the node the tree was built from.
    pub fn root(&self) -> TreeId {
        TreeId(0)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn node(&self, id: TreeId) -> &Node {
        &self.entries[id.0].node
    }

    /// The node at `id` as a typed handle.
    pub fn get<T: TryFrom<Node>>(&self, id: TreeId) -> Option<T> {
        self.node(id).cast()
    }

    /// The entry mirroring `node`. For a node inserted more than once the
    /// latest entry wins.
    pub fn lookup(&self, node: &Node) -> Option<TreeId> {
        self.index.get(&node.id()).copied()
    }

    pub fn parent(&self, id: TreeId) -> Option<TreeId> {
        self.entries[id.0].parent
    }

    /// Child entries in declaration order. Always a fresh vector.
    pub fn children(&self, id: TreeId) -> Vec<TreeId> {
        self.entries[id.0].children.clone()
    }

    /// Distance from the root.
    pub fn depth(&self, id: TreeId) -> usize {
        self.entries[id.0].depth
    }

    /// Mirror `node` and its descendants below `parent`.
    pub fn insert(&mut self, parent: TreeId, node: impl Into<Node>) -> TreeId {
        self.push(Some(parent), node.into())
    }

    fn push(&mut self, parent: Option<TreeId>, node: Node) -> TreeId {
        let id = TreeId(self.entries.len());
        let depth = parent.map_or(0, |p| self.depth(p) + 1);
        let children = node.children();
        self.index.insert(node.id(), id);
        self.entries.push(Entry {
            node,
            parent,
            children: Vec::new(),
            depth,
            payload: IndexMap::new(),
        });
        if let Some(parent) = parent {
            self.entries[parent.0].children.push(id);
        }
        for child in children {
            self.push(Some(id), child);
        }
        id
    }

    /// Strict ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: TreeId) -> impl Iterator<Item = TreeId> + '_ {
        std::iter::successors(self.parent(id), |p| self.parent(*p))
    }

    /// The nearest strict ancestor of the given kind.
    pub fn parent_of_kind(&self, id: TreeId, kind: NodeKind) -> Option<TreeId> {
        self.ancestors(id).find(|a| self.node(*a).kind() == kind)
    }

    /// The nearest strict ancestor which converts into `T`.
    pub fn parent_as<T: TryFrom<Node>>(&self, id: TreeId) -> Option<T> {
        self.ancestors(id).find_map(|a| self.get::<T>(a))
    }

    /// The first ancestor for which `f` returns a value.
    pub fn find_ancestor<T>(&self, id: TreeId, f: impl Fn(&Node) -> Option<T>) -> Option<T> {
        self.ancestors(id).find_map(|a| f(self.node(a)))
    }

    /// Every entry in insertion order. The initial build is depth first.
    pub fn iter(&self) -> impl Iterator<Item = TreeId> + '_ {
        (0..self.entries.len()).map(TreeId)
    }

    /// All entries of the given kind.
    pub fn ids_of_kind(&self, kind: NodeKind) -> Vec<TreeId> {
        self.iter()
            .filter(|id| self.node(*id).kind() == kind)
            .collect()
    }

    /// Store a payload value on an entry, replacing any previous value
    /// under the same key.
    pub fn set_value<T: Any>(&mut self, id: TreeId, key: &'static str, value: T) {
        self.entries[id.0].payload.insert(key, Rc::new(value));
    }

    /// The payload value stored on `id` itself.
    pub fn value<T: Any>(&self, id: TreeId, key: &'static str) -> Option<Rc<T>> {
        let value = self.entries[id.0].payload.get(key)?.clone();
        value.downcast::<T>().ok()
    }

    /// The payload value stored on `id` or its nearest ancestor having one.
    pub fn find_value<T: Any>(&self, id: TreeId, key: &'static str) -> Option<Rc<T>> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find_map(|e| self.value(e, key))
    }

    /// Remove a payload value. Returns true if one was present.
    pub fn remove_value(&mut self, id: TreeId, key: &'static str) -> bool {
        self.entries[id.0].payload.shift_remove(key).is_some()
    }
}

impl std::fmt::Debug for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tree")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}
