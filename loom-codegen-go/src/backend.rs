//! The Go [`Backend`].

use eyre::Result;
use loom_codegen::naming::{GO_NAMING, NamingConvention};
use loom_codegen::render::{StdlibMapper, preamble};
use loom_codegen::{Backend, CodeBuilder, ImportBlock, ImportStyle, Importer, Indent, RenderCx};
use loom_core::mime;
use loom_ir::{Lang, Package, SrcFile};

use crate::decls;
use crate::stdlib::go_stdlib;

/// Renders modules as Go packages.
///
/// Every package becomes a directory named by its import path. Imports
/// are grouped in a single parenthesized block, aliased only on
/// collision.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoBackend;

impl GoBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Backend for GoBackend {
    fn lang(&self) -> Lang {
        Lang::Go
    }

    fn file_extension(&self) -> &'static str {
        "go"
    }

    fn mime_type(&self) -> &'static str {
        mime::GO_SOURCE
    }

    fn default_indent(&self) -> Indent {
        Indent::GO
    }

    fn naming(&self) -> NamingConvention {
        GO_NAMING
    }

    fn import_style(&self) -> ImportStyle {
        ImportStyle::Alias
    }

    fn stdlib(&self) -> StdlibMapper {
        go_stdlib
    }

    fn own_qualifier(&self, pkg: &Package) -> String {
        pkg.import_path()
    }

    fn doc_file_name(&self) -> &'static str {
        "doc"
    }

    fn render_doc_file(&self, cx: &RenderCx, out: &mut CodeBuilder, pkg: &Package) -> Result<()> {
        let banner = pkg
            .preamble()
            .or_else(|| cx.config().header.clone())
            .filter(|text| !text.trim().is_empty());
        if let Some(banner) = banner {
            out.push_comment("// ", &banner);
            out.push_blank();
        }
        let name = pkg.name();
        out.push_comment("// ", &package_doc(&name, &pkg.doc().unwrap_or_default()));
        out.push_line(&format!("package {name}"));
        Ok(())
    }

    fn render_header(
        &self,
        cx: &RenderCx,
        out: &mut CodeBuilder,
        pkg: &Package,
        file: &SrcFile,
        importer: &Importer,
    ) -> Result<()> {
        if let Some(banner) = preamble(cx, pkg, file) {
            out.push_comment("// ", &banner);
            out.push_blank();
        }
        out.push_line(&format!("package {}", pkg.name()));
        out.push_blank();
        if let Some(doc) = file.doc().filter(|doc| !doc.trim().is_empty()) {
            out.push_comment("// ", doc.trim());
            out.push_blank();
        }
        out.emit(&ImportBlock::new(importer));
        Ok(())
    }

    fn render_body(&self, cx: &mut RenderCx, out: &mut CodeBuilder, file: &SrcFile) -> Result<()> {
        for ty in file.types() {
            out.push_separator();
            decls::named_type(cx, out, &ty)?;
        }
        for func in file.funcs() {
            out.push_separator();
            decls::func_decl(cx, out, &func)?;
        }
        Ok(())
    }
}

/// The package doc, starting with `Package <name>` as `go doc` expects.
pub fn package_doc(name: &str, doc: &str) -> String {
    let doc = doc.trim();
    let subject = format!("Package {name}");
    if doc.starts_with("...") {
        loom_codegen::comment::expand_ellipsis(&subject, doc)
    } else if doc.starts_with(&subject) {
        doc.to_string()
    } else {
        format!("{subject} {doc}")
    }
}
