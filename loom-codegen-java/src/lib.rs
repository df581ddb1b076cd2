//! Java renderer for the loom source generator.
//!
//! # Example
//!
//! ```
//! use loom_codegen::RenderConfig;
//! use loom_ir::{Field, Lang, Module, Package, SrcFile, Struct, Target, TypeDecl};
//!
//! # fn main() -> eyre::Result<()> {
//! let module = Module::new(Target::lang(Lang::Java)).add_packages([Package::new("com/example/geo")
//!     .add_files([SrcFile::new("point").add_types([Struct::new("Point").add_fields([
//!         Field::new("x", TypeDecl::simple("int!")),
//!     ])?])?])?])?;
//!
//! let rendered = loom_codegen_java::render(&module, &RenderConfig::default());
//! let text = rendered.text("com/example/geo/Point.java").unwrap_or_default();
//! assert!(text.starts_with("package com.example.geo;\n"));
//! assert!(text.contains("public class Point {\n    public int x;\n}"));
//! # Ok(())
//! # }
//! ```

mod backend;
mod decls;
mod enums;
mod errors;
mod stdlib;
mod stmts;
mod types;

pub use backend::JavaBackend;
pub use decls::modifier;
pub use enums::case_const;
pub use stdlib::{boxed, java_stdlib};
pub use types::type_expr;

use loom_codegen::{RenderConfig, Rendered};
use loom_ir::Module;

/// Render `module` as Java source.
pub fn render(module: &Module, config: &RenderConfig) -> Rendered {
    loom_codegen::render(module, &JavaBackend, config)
}
