//! Go declarations: structs, interfaces and functions.
//!
//! Visibility maps onto identifier case, so declared names are checked
//! against it rather than rewritten. Nested types are hoisted to package
//! scope right after their parent.

use eyre::{Result, WrapErr};
use loom_codegen::comment::DocComment;
use loom_codegen::error::check_exported;
use loom_codegen::naming::GO_NAMING;
use loom_codegen::{CodeBuilder, RenderCx, RenderError};
use loom_ir::{Annotation, Field, Func, Interface, NamedType, Param, Struct, TypeDecl};

use crate::stmts;
use crate::types::type_expr;
use crate::{enums, errors};

/// Render a top-level or hoisted named type.
pub fn named_type(cx: &mut RenderCx, out: &mut CodeBuilder, ty: &NamedType) -> Result<()> {
    let result = match ty {
        NamedType::Struct(s) => struct_decl(cx, out, s),
        NamedType::Interface(i) => interface_decl(cx, out, i),
        NamedType::Enum(e) => enums::enum_decl(cx, out, e),
        NamedType::Error(group) => errors::error_group(cx, out, group),
    };
    result.wrap_err_with(|| format!("type {}", ty.name()))
}

/// Doc comment and directives above a declaration.
pub fn preface(out: &mut CodeBuilder, name: &str, doc: Option<String>, annotations: &[Annotation]) {
    if let Some(doc) = DocComment::line(name, doc.as_deref()) {
        out.emit(&doc);
    }
    for annotation in annotations {
        out.push_line(&directive(annotation));
    }
}

/// A Go compiler directive such as `//go:generate stringer -type=Kind`.
fn directive(annotation: &Annotation) -> String {
    let mut line = format!("//{}", annotation.name);
    for (key, value) in &annotation.attrs {
        line.push(' ');
        if key.is_empty() {
            line.push_str(value);
        } else {
            line.push_str(&format!("{key}={value}"));
        }
    }
    line
}

fn struct_decl(cx: &mut RenderCx, out: &mut CodeBuilder, s: &Struct) -> Result<()> {
    let name = s.name();
    check_exported(&name, s.visibility().is_public())?;
    preface(out, &name, s.doc(), &s.annotations());

    let fields = s.fields();
    if fields.is_empty() {
        out.push_line(&format!("type {name} struct{{}}"));
    } else {
        out.push_line(&format!("type {name} struct {{"));
        out.push_indent();
        let result = field_block(cx, out, &fields);
        out.push_dedent();
        result?;
        out.push_line("}");
    }

    for method in s.methods() {
        out.push_separator();
        func_decl(cx, out, &method)?;
    }
    for nested in s.types() {
        out.push_separator();
        named_type(cx, out, &nested)?;
    }
    Ok(())
}

struct FieldLine {
    doc: Option<DocComment>,
    name: String,
    ty: String,
    tag: Option<String>,
}

/// Fields with names, types and tags aligned in columns.
fn field_block(cx: &mut RenderCx, out: &mut CodeBuilder, fields: &[Field]) -> Result<()> {
    let mut lines = Vec::with_capacity(fields.len());
    for field in fields {
        let name = field.name();
        if !name.is_empty() {
            check_exported(&name, field.visibility().is_public())
                .wrap_err_with(|| format!("field {name}"))?;
        }
        let ty = type_expr(cx, field.as_node(), &field.type_decl())
            .wrap_err_with(|| format!("field {name}"))?;
        lines.push(FieldLine {
            doc: DocComment::line(&name, field.doc().as_deref()),
            tag: struct_tag(&field.annotations()),
            name,
            ty,
        });
    }

    let name_width = lines.iter().map(|l| l.name.chars().count()).max().unwrap_or(0);
    let type_width = lines
        .iter()
        .filter(|l| l.tag.is_some())
        .map(|l| l.ty.chars().count())
        .max()
        .unwrap_or(0);
    for line in lines {
        if let Some(doc) = &line.doc {
            out.emit(doc);
        }
        let mut text = if line.name.is_empty() {
            line.ty.clone()
        } else {
            format!("{:<name_width$} {}", line.name, line.ty)
        };
        if let Some(tag) = &line.tag {
            let pad = type_width.saturating_sub(line.ty.chars().count());
            text.push_str(&" ".repeat(pad + 1));
            text.push_str(tag);
        }
        out.push_line(&text);
    }
    Ok(())
}

/// Lower field annotations to a struct tag: `` `json:"id" db:"ticket_id"` ``.
///
/// Only the default attribute of each annotation is used.
pub fn struct_tag(annotations: &[Annotation]) -> Option<String> {
    let mut pairs = Vec::new();
    for annotation in annotations {
        match annotation.value() {
            Some(value) => pairs.push(format!("{}:\"{}\"", annotation.name, value)),
            None => tracing::debug!(annotation = %annotation.name, "field annotation has no tag value"),
        }
    }
    (!pairs.is_empty()).then(|| format!("`{}`", pairs.join(" ")))
}

fn interface_decl(cx: &mut RenderCx, out: &mut CodeBuilder, iface: &Interface) -> Result<()> {
    let name = iface.name();
    check_exported(&name, iface.visibility().is_public())?;
    preface(out, &name, iface.doc(), &iface.annotations());

    let methods = iface.methods();
    if methods.is_empty() {
        out.push_line(&format!("type {name} interface{{}}"));
    } else {
        out.push_line(&format!("type {name} interface {{"));
        out.push_indent();
        let result = method_specs(cx, out, &methods);
        out.push_dedent();
        result?;
        out.push_line("}");
    }

    for nested in iface.types() {
        out.push_separator();
        named_type(cx, out, &nested)?;
    }
    Ok(())
}

fn method_specs(cx: &mut RenderCx, out: &mut CodeBuilder, methods: &[Func]) -> Result<()> {
    for method in methods {
        let name = method.name();
        check_exported(&name, method.visibility().is_public())
            .wrap_err_with(|| format!("method {name}"))?;
        if let Some(doc) = DocComment::line(&name, method.doc().as_deref()) {
            out.emit(&doc);
        }
        let sig = signature(cx, method).wrap_err_with(|| format!("method {name}"))?;
        out.push_line(&sig);
    }
    Ok(())
}

/// Render a function, or a method when it belongs to a named type.
pub fn func_decl(cx: &mut RenderCx, out: &mut CodeBuilder, func: &Func) -> Result<()> {
    let name = func.name();
    let kind = if func.owner().is_some() { "method" } else { "func" };
    render_func(cx, out, func).wrap_err_with(|| format!("{kind} {name}"))
}

fn render_func(cx: &mut RenderCx, out: &mut CodeBuilder, func: &Func) -> Result<()> {
    let name = func.name();
    check_exported(&name, func.visibility().is_public())?;
    preface(out, &name, func.doc(), &func.annotations());

    let receiver = match func.owner() {
        Some(owner) => {
            let receiver = func.receiver_name().unwrap_or_default();
            let star = if func.is_ptr_receiver() { "*" } else { "" };
            format!("({receiver} {star}{}) ", owner.name())
        }
        None => String::new(),
    };
    let sig = signature(cx, func)?;
    out.push_line(&format!("func {receiver}{sig} {{"));
    if let Some(body) = func.body() {
        out.push_indent();
        let result = stmts::block(cx, out, &body);
        out.push_dedent();
        result?;
    }
    out.push_line("}");
    Ok(())
}

/// `Name(params) results`
pub fn signature(cx: &mut RenderCx, func: &Func) -> Result<String, RenderError> {
    let params = func.params();
    let last = params.len().saturating_sub(1);
    let mut rendered = Vec::with_capacity(params.len());
    for (i, param) in params.iter().enumerate() {
        rendered.push(param_decl(cx, param, func.is_variadic() && i == last)?);
    }

    let results = func.results();
    let mut out = format!("{}({})", func.name(), rendered.join(", "));
    match results.as_slice() {
        [] => {}
        [single] if single.name().is_empty() => {
            out.push(' ');
            out.push_str(&type_expr(cx, single.as_node(), &single.type_decl())?);
        }
        many => {
            let mut rendered = Vec::with_capacity(many.len());
            for result in many {
                rendered.push(param_decl(cx, result, false)?);
            }
            out.push_str(&format!(" ({})", rendered.join(", ")));
        }
    }
    Ok(out)
}

fn param_decl(cx: &mut RenderCx, param: &Param, variadic: bool) -> Result<String, RenderError> {
    let decl = param.type_decl();
    let ty = match (&decl, variadic) {
        (TypeDecl::Slice(elem), true) => format!("...{}", type_expr(cx, param.as_node(), elem)?),
        (_, true) => format!("...{}", type_expr(cx, param.as_node(), &decl)?),
        (_, false) => type_expr(cx, param.as_node(), &decl)?,
    };
    let name = GO_NAMING.safe_name(&param.name());
    Ok(if name.is_empty() { ty } else { format!("{name} {ty}") })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_struct_tag() {
        let tags = [
            Annotation::new("json").with_value("id"),
            Annotation::new("validate").with_attr("min", "1"),
            Annotation::new("db").with_value("ticket_id"),
        ];
        assert_eq!(
            struct_tag(&tags).as_deref(),
            Some("`json:\"id\" db:\"ticket_id\"`")
        );
        assert_eq!(struct_tag(&[]), None);
    }

    #[test]
    fn test_directive() {
        let generate = Annotation::new("go:generate").with_value("stringer -type=Kind");
        assert_eq!(directive(&generate), "//go:generate stringer -type=Kind");
        assert_eq!(directive(&Annotation::new("go:noinline")), "//go:noinline");
    }
}
