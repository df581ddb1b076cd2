//! Language-neutral intermediate representation for the loom source
//! generator.
//!
//! The IR models a program as a tree of [`Node`]s: a [`Module`] owns
//! [`Package`]s, which own [`SrcFile`]s, which own named types and
//! functions. Every node is attached to exactly one parent, exactly once,
//! and every child accessor returns a fresh vector.
//!
//! # Architecture
//!
//! ```text
//! builder API → loom-ir (declarative model) → loom-codegen (tree, importer, macros) → renderers
//! ```
//!
//! The IR is built in a single phase and then handed read-only to a
//! renderer. Render-pass state never lives here; see `loom_codegen::tree`.
//!
//! # Example
//!
//! ```
//! use loom_ir::{Field, Lang, Module, Package, SrcFile, Struct, Target, TypeDecl};
//!
//! # fn main() -> Result<(), loom_ir::IrError> {
//! let module = Module::new(Target::lang(Lang::Go)).add_packages([Package::new("example.com/m")
//!     .with_name("main")
//!     .add_files([SrcFile::new("main").add_types([Struct::new("Point").add_fields([
//!         Field::new("X", TypeDecl::simple("int")),
//!         Field::new("Y", TypeDecl::simple("int")),
//!     ])?])?])?])?;
//!
//! assert_eq!(module.packages()[0].files()[0].types()[0].name(), "Point");
//! # Ok(())
//! # }
//! ```

mod block;
mod error;
mod error_group;
mod expr;
mod func;
mod macros;
mod module;
mod node;
pub mod stdlib;
mod stmt;
mod target;
mod typedecl;
mod types;

pub use block::TplPart;
pub use error::IrError;
pub use error_group::Property;
pub use expr::LitKind;
pub use func::default_receiver;
pub use macros::{MacroCtx, Matcher, NameResolver};
pub use node::{
    Assign, BasicLit, Binary, Block, Call, Comment, CompositeLit, Defer, Enum, ErrorCase,
    ErrorGroup, Field, For, Func, Ident, If, Interface, Macro, Module, Node, NodeId, NodeKind,
    Package, Param, Pos, Range, Return, Selector, SrcFile, Struct, Tpl, TypeRef, Unary,
};
pub use stmt::AssignOp;
pub use target::{Arch, Lang, Os, Target};
pub use typedecl::{Annotation, ChanDir, TypeBound, TypeDecl, Visibility};
pub use types::{EnumBase, EnumCase, NamedType};

pub use loom_core::Name;
