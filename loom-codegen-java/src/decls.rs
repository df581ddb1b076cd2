//! Java declarations: classes, interfaces and methods.
//!
//! Visibility is written as a modifier. Nested types stay inside the body
//! of their parent, and top-level functions are collected into a final
//! holder class named after the source file.

use eyre::{Result, WrapErr};
use loom_codegen::comment::DocComment;
use loom_codegen::naming::JAVA_NAMING;
use loom_codegen::{CodeBuilder, RenderCx, RenderError};
use loom_core::Name;
use loom_ir::{
    Annotation, Field, Func, Interface, Lang, NamedType, Node, Param, Struct, TypeDecl, Visibility,
    stdlib,
};

use crate::stmts;
use crate::types::type_expr;
use crate::{enums, errors};

/// Render a top-level or nested named type.
pub fn named_type(cx: &mut RenderCx, out: &mut CodeBuilder, ty: &NamedType) -> Result<()> {
    let result = match ty {
        NamedType::Struct(s) => class_decl(cx, out, s),
        NamedType::Interface(i) => interface_decl(cx, out, i),
        NamedType::Enum(e) => enums::enum_decl(cx, out, e),
        NamedType::Error(group) => errors::error_group(cx, out, group),
    };
    result.wrap_err_with(|| format!("type {}", ty.name()))
}

/// The modifier for `visibility`, with a trailing space unless empty.
pub fn modifier(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Public => "public ",
        Visibility::PackagePrivate => "",
        Visibility::Protected => "protected ",
        Visibility::Private => "private ",
    }
}

/// Javadoc and annotations above a declaration. Annotation names are
/// resolved through the importer of the file enclosing `at`.
pub fn preface(
    cx: &RenderCx,
    out: &mut CodeBuilder,
    at: &Node,
    name: &str,
    doc: Option<DocComment>,
    annotations: &[Annotation],
) -> Result<(), RenderError> {
    if let Some(doc) = doc {
        out.emit(&doc);
    }
    for annotation in annotations {
        out.push_line(&annotation_line(cx, at, annotation)?);
    }
    tracing::trace!(name, annotations = annotations.len(), "preface");
    Ok(())
}

/// `@Name`, `@Name(value)` or `@Name(key = value, ...)`. Values are
/// written verbatim.
fn annotation_line(cx: &RenderCx, at: &Node, annotation: &Annotation) -> Result<String, RenderError> {
    let name = cx.qualify(at, &annotation.name)?;
    let attrs = &annotation.attrs;
    Ok(match (attrs.len(), annotation.value()) {
        (0, _) => format!("@{name}"),
        (1, Some(value)) => format!("@{name}({value})"),
        _ => {
            let pairs: Vec<String> = attrs
                .iter()
                .map(|(key, value)| {
                    let key = if key.is_empty() { "value" } else { key.as_str() };
                    format!("{key} = {value}")
                })
                .collect();
            format!("@{name}({})", pairs.join(", "))
        }
    })
}

fn require_name(name: &str, kind: &'static str) -> Result<(), RenderError> {
    if name.is_empty() {
        return Err(RenderError::EmptyIdentifier { kind });
    }
    Ok(())
}

fn class_decl(cx: &mut RenderCx, out: &mut CodeBuilder, s: &Struct) -> Result<()> {
    let name = s.name();
    require_name(&name, "class")?;
    let doc = DocComment::block(&name, s.doc().as_deref());
    preface(cx, out, s.as_node(), &name, doc, &s.annotations())?;

    let mut header = String::from(modifier(s.visibility()));
    if s.is_static() {
        header.push_str("static ");
    }
    if s.is_final() {
        header.push_str("final ");
    }
    header.push_str("class ");
    header.push_str(&name);
    let interfaces = s.interfaces();
    if !interfaces.is_empty() {
        let mut names = Vec::with_capacity(interfaces.len());
        for iface in &interfaces {
            names.push(cx.qualify(s.as_node(), iface)?);
        }
        header.push_str(&format!(" implements {}", names.join(", ")));
    }

    let (fields, methods, nested) = (s.fields(), s.methods(), s.types());
    if fields.is_empty() && methods.is_empty() && nested.is_empty() {
        out.push_line(&format!("{header} {{}}"));
        return Ok(());
    }

    out.push_line(&format!("{header} {{"));
    out.push_indent();
    let result = class_body(cx, out, &fields, &methods, &nested);
    out.push_dedent();
    result?;
    out.push_line("}");
    Ok(())
}

fn class_body(
    cx: &mut RenderCx,
    out: &mut CodeBuilder,
    fields: &[Field],
    methods: &[Func],
    nested: &[NamedType],
) -> Result<()> {
    for field in fields {
        field_decl(cx, out, field).wrap_err_with(|| format!("field {}", field.name()))?;
    }
    for method in methods {
        out.push_separator();
        func_decl(cx, out, method, false)?;
    }
    for ty in nested {
        out.push_separator();
        named_type(cx, out, ty)?;
    }
    Ok(())
}

fn field_decl(cx: &mut RenderCx, out: &mut CodeBuilder, field: &Field) -> Result<(), RenderError> {
    let name = field.name();
    require_name(&name, "field")?;
    let doc = DocComment::block(&name, field.doc().as_deref());
    preface(cx, out, field.as_node(), &name, doc, &field.annotations())?;
    let ty = type_expr(cx, field.as_node(), &field.type_decl())?;
    let name = JAVA_NAMING.safe_name(&name);
    out.push_line(&format!("{}{ty} {name};", modifier(field.visibility())));
    Ok(())
}

fn interface_decl(cx: &mut RenderCx, out: &mut CodeBuilder, iface: &Interface) -> Result<()> {
    let name = iface.name();
    require_name(&name, "interface")?;
    let doc = DocComment::block(&name, iface.doc().as_deref());
    preface(cx, out, iface.as_node(), &name, doc, &iface.annotations())?;

    let header = format!("{}interface {name}", modifier(iface.visibility()));
    let (methods, nested) = (iface.methods(), iface.types());
    if methods.is_empty() && nested.is_empty() {
        out.push_line(&format!("{header} {{}}"));
        return Ok(());
    }

    out.push_line(&format!("{header} {{"));
    out.push_indent();
    let result = interface_body(cx, out, &methods, &nested);
    out.push_dedent();
    result?;
    out.push_line("}");
    Ok(())
}

fn interface_body(
    cx: &mut RenderCx,
    out: &mut CodeBuilder,
    methods: &[Func],
    nested: &[NamedType],
) -> Result<()> {
    for (i, method) in methods.iter().enumerate() {
        if i > 0 {
            out.push_blank();
        }
        let name = method.name();
        let doc = method_doc(method);
        preface(cx, out, method.as_node(), &name, doc, &method.annotations())
            .wrap_err_with(|| format!("method {name}"))?;
        let sig = signature(cx, method).wrap_err_with(|| format!("method {name}"))?;
        out.push_line(&format!("{sig};"));
    }
    for ty in nested {
        out.push_separator();
        named_type(cx, out, ty)?;
    }
    Ok(())
}

/// Render a method. Inside a holder class every method is static.
pub fn func_decl(cx: &mut RenderCx, out: &mut CodeBuilder, func: &Func, holder: bool) -> Result<()> {
    let name = func.name();
    let kind = if func.owner().is_some() { "method" } else { "func" };
    render_func(cx, out, func, holder).wrap_err_with(|| format!("{kind} {name}"))
}

fn render_func(cx: &mut RenderCx, out: &mut CodeBuilder, func: &Func, holder: bool) -> Result<()> {
    let name = func.name();
    require_name(&name, "method")?;
    let doc = method_doc(func);
    preface(cx, out, func.as_node(), &name, doc, &func.annotations())?;

    let mut header = String::from(modifier(func.visibility()));
    if holder || func.is_static() {
        header.push_str("static ");
    }
    header.push_str(&signature(cx, func)?);
    out.push_line(&format!("{header} {{"));
    if let Some(body) = func.body() {
        out.push_indent();
        let result = stmts::block(cx, out, &body);
        out.push_dedent();
        result?;
    }
    out.push_line("}");
    Ok(())
}

/// The method doc followed by one `@param` line per documented parameter.
fn method_doc(func: &Func) -> Option<DocComment> {
    let params: Vec<String> = func
        .params()
        .iter()
        .filter_map(|p| p.doc().map(|doc| format!("@param {} {}", p.name(), doc.trim())))
        .collect();
    match DocComment::block(&func.name(), func.doc().as_deref()) {
        Some(doc) => Some(doc.with_lines(params)),
        None if !params.is_empty() => {
            let text = params.join("\n");
            DocComment::block(&func.name(), Some(text.as_str()))
        }
        None => None,
    }
}

/// `Result name(params) throws Exception`
///
/// A trailing error result becomes the `throws` clause. Java has a single
/// return value, so more than one other result is an error.
pub fn signature(cx: &mut RenderCx, func: &Func) -> Result<String, RenderError> {
    let mut results = func.results();
    let throws = func.has_error_result();
    if throws {
        results.pop();
    }
    let ret = match results.as_slice() {
        [] => "void".to_string(),
        [single] => type_expr(cx, single.as_node(), &single.type_decl())?,
        many => {
            return Err(RenderError::MultipleResults {
                func: func.name(),
                count: many.len(),
                lang: Lang::Java,
            });
        }
    };

    let params = func.params();
    let last = params.len().saturating_sub(1);
    let mut rendered = Vec::with_capacity(params.len());
    for (i, param) in params.iter().enumerate() {
        rendered.push(param_decl(cx, param, func.is_variadic() && i == last)?);
    }

    let mut sig = format!("{ret} {}({})", func.name(), rendered.join(", "));
    if throws {
        let exception = cx.qualify(func.as_node(), &Name::new(stdlib::ERROR))?;
        sig.push_str(&format!(" throws {exception}"));
    }
    Ok(sig)
}

fn param_decl(cx: &mut RenderCx, param: &Param, variadic: bool) -> Result<String, RenderError> {
    let name = param.name();
    require_name(&name, "parameter")?;
    let decl = param.type_decl();
    let ty = match (&decl, variadic) {
        (TypeDecl::Slice(elem), true) => format!("{}...", type_expr(cx, param.as_node(), elem)?),
        (_, true) => format!("{}...", type_expr(cx, param.as_node(), &decl)?),
        (_, false) => type_expr(cx, param.as_node(), &decl)?,
    };
    Ok(format!("{ty} {}", JAVA_NAMING.safe_name(&name)))
}

/// Top-level functions of a file as static methods of a final class that
/// cannot be instantiated.
pub fn holder_class(
    cx: &mut RenderCx,
    out: &mut CodeBuilder,
    class: &str,
    funcs: &[Func],
) -> Result<()> {
    out.push_line(&format!("public final class {class} {{"));
    out.push_indent();
    out.push_line(&format!("private {class}() {{"));
    out.push_line("}");
    let mut result = Ok(());
    for func in funcs {
        out.push_blank();
        result = func_decl(cx, out, func, true);
        if result.is_err() {
            break;
        }
    }
    out.push_dedent();
    out.push_line("}");
    result
}
