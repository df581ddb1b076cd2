//! Ready-made macros shared by all targets.
//!
//! Each constructor returns a [`Macro`](loom_ir::Macro) with one matcher per
//! supported language. Arguments captured by a macro are deep-copied on
//! every expansion, so a macro can be rendered any number of times.
//!
//! - [`lang`] - declarations, calls and conversions
//! - [`fmt`] - printing
//! - [`errors`] - constructing and checking error cases

pub mod errors;
pub mod fmt;
pub mod lang;

use loom_ir::{Node, Package};

/// The package a node is declared in, following IR parent links.
pub fn enclosing_package(node: &Node) -> Option<Package> {
    std::iter::successors(node.parent(), Node::parent).find_map(|n| n.cast())
}

/// Deep copies of `nodes`, ready to be attached to a fresh parent.
pub(crate) fn copies(nodes: &[Node]) -> Vec<Node> {
    nodes.iter().map(Node::deep_copy).collect()
}
