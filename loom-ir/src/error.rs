//! Construction-time errors.
//!
//! These are programmer errors in how a model was built. They are returned
//! from the builder methods so a chain of `add_*` calls can use `?`.

use thiserror::Error;

/// A violated IR invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IrError {
    /// The node already has a parent.
    #[error("{node} is already attached to {parent}")]
    AlreadyAttached { node: String, parent: String },

    /// Attaching would make a node its own ancestor.
    #[error("attaching {node} to {parent} would create a cycle")]
    Cycle { node: String, parent: String },

    /// A constructor macro got the wrong number of arguments.
    #[error("{case} expects {expected} arguments, got {actual}")]
    Arity {
        case: String,
        expected: usize,
        actual: usize,
    },

    /// A node needs a parent to be meaningful but has none.
    #[error("{node} is not attached")]
    Detached { node: String },

    /// A macro returned a node owned by some other parent.
    #[error("{node} produced by {macro_node} is attached to {parent}")]
    MacroAttachment {
        node: String,
        macro_node: String,
        parent: String,
    },
}
