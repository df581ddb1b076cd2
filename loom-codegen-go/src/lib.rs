//! Go renderer for the loom source generator.
//!
//! # Example
//!
//! ```
//! use loom_codegen::RenderConfig;
//! use loom_ir::{Field, Lang, Module, Package, SrcFile, Struct, Target, TypeDecl};
//!
//! # fn main() -> eyre::Result<()> {
//! let module = Module::new(Target::lang(Lang::Go)).add_packages([Package::new("example.com/m")
//!     .add_files([SrcFile::new("point").add_types([Struct::new("Point").add_fields([
//!         Field::new("X", TypeDecl::simple("int!")),
//!     ])?])?])?])?;
//!
//! let rendered = loom_codegen_go::render(&module, &RenderConfig::default());
//! let text = rendered.text("example.com/m/point.go").unwrap_or_default();
//! assert!(text.contains("type Point struct {\n\tX int\n}"));
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

pub use backend::{GoBackend, package_doc};
pub use decls::struct_tag;
pub use enums::case_const;
pub use stdlib::go_stdlib;
pub use types::type_expr;

use loom_codegen::{RenderConfig, Rendered};
use loom_ir::Module;

/// Render `module` as Go source.
pub fn render(module: &Module, config: &RenderConfig) -> Rendered {
    loom_codegen::render(module, &GoBackend, config)
}
