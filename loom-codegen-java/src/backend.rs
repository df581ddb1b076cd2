//! The Java [`Backend`].

use eyre::Result;
use loom_codegen::comment::DocComment;
use loom_codegen::naming::{JAVA_NAMING, NamingConvention, package_qualifier};
use loom_codegen::render::{StdlibMapper, preamble};
use loom_codegen::{Backend, CodeBuilder, ImportBlock, ImportStyle, Importer, Indent, RenderCx};
use loom_core::mime;
use loom_ir::{Lang, Package, SrcFile};

use crate::decls;
use crate::stdlib::java_stdlib;

/// Renders modules as Java packages.
///
/// The import path of a package is its directory, and its dotted form
/// names the package. Classes are imported one by one; a simple name
/// that is already taken stays fully qualified.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaBackend;

impl JavaBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Backend for JavaBackend {
    fn lang(&self) -> Lang {
        Lang::Java
    }

    fn file_extension(&self) -> &'static str {
        "java"
    }

    fn mime_type(&self) -> &'static str {
        mime::JAVA_SOURCE
    }

    fn default_indent(&self) -> Indent {
        Indent::JAVA
    }

    fn naming(&self) -> NamingConvention {
        JAVA_NAMING
    }

    fn import_style(&self) -> ImportStyle {
        ImportStyle::Class
    }

    fn stdlib(&self) -> StdlibMapper {
        java_stdlib
    }

    fn own_qualifier(&self, pkg: &Package) -> String {
        package_qualifier(Lang::Java, &pkg.import_path())
    }

    fn doc_file_name(&self) -> &'static str {
        "package-info"
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
        let name = self.own_qualifier(pkg);
        if let Some(doc) = DocComment::block(&name, pkg.doc().as_deref()) {
            out.emit(&doc);
        }
        out.push_line(&format!("package {name};"));
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
        out.push_line(&format!("package {};", self.own_qualifier(pkg)));
        out.push_blank();
        out.emit(&ImportBlock::new(importer));
        if let Some(doc) = file.doc().filter(|doc| !doc.trim().is_empty()) {
            out.push_comment("// ", doc.trim());
            out.push_blank();
        }
        Ok(())
    }

    fn render_body(&self, cx: &mut RenderCx, out: &mut CodeBuilder, file: &SrcFile) -> Result<()> {
        for ty in file.types() {
            out.push_separator();
            decls::named_type(cx, out, &ty)?;
        }
        let funcs = file.funcs();
        if !funcs.is_empty() {
            out.push_separator();
            let class = JAVA_NAMING.type_name(&file.name());
            decls::holder_class(cx, out, &class, &funcs)?;
        }
        Ok(())
    }
}
