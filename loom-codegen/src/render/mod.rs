//! The render driver.
//!
//! [`render`] walks a module package by package and file by file, asks a
//! [`Backend`] for the language-specific text and collects everything into
//! a [`Dir`] tree. Failures are collected instead of aborting: every file
//! is rendered, a failed file keeps its partial text and carries its error,
//! and the first error is returned alongside the tree.

mod context;

pub use context::{IMPORTER, RenderCx, StdlibMapper};

use eyre::{Report, Result, WrapErr};
use loom_core::{Dir, File};
use loom_ir::{Lang, Module, Package, SrcFile};

use crate::builder::{CodeBuilder, Indent};
use crate::config::RenderConfig;
use crate::importer::{ImportStyle, Importer};
use crate::naming::NamingConvention;

/// A target language renderer.
///
/// The driver owns the walk over packages and files; a backend renders
/// single files.
pub trait Backend {
    /// The language this backend renders.
    fn lang(&self) -> Lang;

    /// File extension for generated source files (e.g., "go", "java")
    fn file_extension(&self) -> &'static str;

    /// Mime type of generated source files.
    fn mime_type(&self) -> &'static str;

    /// Indentation used when the configuration does not set one.
    fn default_indent(&self) -> Indent;

    fn naming(&self) -> NamingConvention;

    fn import_style(&self) -> ImportStyle;

    /// Mapping of stdlib sentinels onto the language's names.
    fn stdlib(&self) -> StdlibMapper;

    /// The qualifier under which declarations of `pkg` are named.
    fn own_qualifier(&self, pkg: &Package) -> String;

    /// File name, without extension, of the synthesized package doc file.
    fn doc_file_name(&self) -> &'static str;

    /// Render the package doc file.
    fn render_doc_file(&self, cx: &RenderCx, out: &mut CodeBuilder, pkg: &Package) -> Result<()>;

    /// Render everything above the file body: preamble, package clause and
    /// imports. Called after [`Backend::render_body`], so the importer is
    /// complete.
    fn render_header(
        &self,
        cx: &RenderCx,
        out: &mut CodeBuilder,
        pkg: &Package,
        file: &SrcFile,
        importer: &Importer,
    ) -> Result<()>;

    /// Render the types and functions of a file.
    fn render_body(&self, cx: &mut RenderCx, out: &mut CodeBuilder, file: &SrcFile) -> Result<()>;
}

/// Output of a render pass: the file tree and the first error, if any.
///
/// The tree is complete even on error. Files that failed carry their error
/// message and whatever text was produced before the failure.
#[derive(Debug)]
pub struct Rendered {
    pub root: Dir,
    pub error: Option<Report>,
}

impl Rendered {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// A rendered file by its `/`-separated path.
    pub fn file(&self, path: &str) -> Option<&File> {
        self.root.find_file(path)
    }

    /// The text of a rendered file.
    pub fn text(&self, path: &str) -> Option<String> {
        self.file(path).map(File::text)
    }

    /// The tree, or the first error.
    pub fn into_result(self) -> Result<Dir> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.root),
        }
    }
}

/// Render `module` with `backend`.
#[tracing::instrument(level = "debug", skip_all, fields(lang = %backend.lang()))]
pub fn render(module: &Module, backend: &dyn Backend, config: &RenderConfig) -> Rendered {
    let mut target = config.target.clone().unwrap_or_else(|| module.target());
    if target.lang != Some(backend.lang()) {
        tracing::debug!(configured = ?target.lang, "rendering with the backend language");
        target.lang = Some(backend.lang());
    }
    let indent = config.indent.unwrap_or_else(|| backend.default_indent());

    let mut cx = RenderCx::new(module, target, config.clone(), backend.stdlib());
    cx.tear_up(backend.import_style(), |pkg| backend.own_qualifier(pkg));

    let mut root = Dir::new("");
    let mut first_error: Option<Report> = None;
    for pkg in module.packages() {
        if let Err(err) = render_package(&mut cx, backend, indent, &pkg, &mut root) {
            first_error.get_or_insert(err);
        }
    }

    if let Err(err) = cx.tear_down() {
        tracing::warn!(error = %err, "tear down failed");
        first_error.get_or_insert_with(|| Report::new(err).wrap_err("tear down"));
    }

    Rendered {
        root,
        error: first_error,
    }
}

#[tracing::instrument(level = "debug", skip_all, fields(package = %pkg.import_path()))]
fn render_package(
    cx: &mut RenderCx,
    backend: &dyn Backend,
    indent: Indent,
    pkg: &Package,
    root: &mut Dir,
) -> Result<()> {
    let dir = root.ensure_path(&pkg.import_path());
    let mut first_error: Option<Report> = None;
    let extension = backend.file_extension();

    if pkg.doc().is_some_and(|doc| !doc.trim().is_empty()) {
        let name = format!("{}.{extension}", backend.doc_file_name());
        let mut out = CodeBuilder::new(indent);
        let result = backend.render_doc_file(cx, &mut out, pkg);
        push_file(dir, &name, backend, out.build(), result, &mut first_error);
    }

    for file in pkg.files() {
        let name = format!("{}.{extension}", backend.naming().file_name(&file.name()));
        let (text, result) = render_file(cx, backend, indent, pkg, &file);
        push_file(dir, &name, backend, text, result, &mut first_error);
    }

    match first_error {
        Some(err) => Err(err.wrap_err(format!("package {}", pkg.import_path()))),
        None => Ok(()),
    }
}

fn push_file(
    dir: &mut Dir,
    name: &str,
    backend: &dyn Backend,
    text: String,
    result: Result<()>,
    first_error: &mut Option<Report>,
) {
    let mut file = File::new(name, backend.mime_type(), text);
    if let Err(err) = result {
        let err = err.wrap_err(format!("file {name}"));
        tracing::debug!(file = name, error = %err, "file rendered with error");
        file = file.with_error(format!("{err:#}"));
        first_error.get_or_insert(err);
    }
    dir.files.push(file);
}

#[tracing::instrument(level = "debug", skip_all, fields(file = %file.name()))]
fn render_file(
    cx: &mut RenderCx,
    backend: &dyn Backend,
    indent: Indent,
    pkg: &Package,
    file: &SrcFile,
) -> (String, Result<()>) {
    let mut body = CodeBuilder::new(indent);
    let body_result = backend.render_body(cx, &mut body, file);

    let mut out = CodeBuilder::new(indent);
    let header_result = cx
        .importer(file.as_node())
        .wrap_err("no importer")
        .and_then(|importer| backend.render_header(cx, &mut out, pkg, file, &importer.borrow()));

    out.push_builder(body);
    (out.build(), body_result.and(header_result))
}

/// The preamble of a file: its own, its package's or the configured
/// generator banner, in that order.
pub fn preamble(cx: &RenderCx, pkg: &Package, file: &SrcFile) -> Option<String> {
    file.preamble()
        .or_else(|| pkg.preamble())
        .or_else(|| cx.config().header.clone())
        .filter(|text| !text.trim().is_empty())
}
