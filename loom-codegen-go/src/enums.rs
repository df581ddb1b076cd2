//! Go enum lowering.
//!
//! An enum becomes a named type over `int` or `string` with one constant
//! per case, a `<Name>Values` slice in declaration order and `String` and
//! `IsValid` methods. Integer ordinals start at 1, so the zero value is
//! never a valid case.

use eyre::Result;
use loom_codegen::comment::DocComment;
use loom_codegen::error::check_exported;
use loom_codegen::literal::quote_str;
use loom_codegen::{CodeBuilder, RenderCx};
use loom_core::{Name, to_pascal_case};
use loom_ir::{Enum, EnumBase, default_receiver};

use crate::decls::preface;

/// The Go constant of an enum case.
pub fn case_const(enum_name: &str, case: &str) -> String {
    format!("{enum_name}{}", to_pascal_case(case))
}

pub fn enum_decl(cx: &mut RenderCx, out: &mut CodeBuilder, e: &Enum) -> Result<()> {
    let name = e.name();
    check_exported(&name, e.visibility().is_public())?;
    preface(out, &name, e.doc(), &e.annotations());

    let base = match e.base() {
        EnumBase::Int => "int",
        EnumBase::String => "string",
    };
    out.push_line(&format!("type {name} {base}"));

    let cases = e.cases();
    let consts: Vec<String> = cases.iter().map(|c| case_const(&name, &c.name)).collect();
    if !cases.is_empty() {
        out.push_blank();
        out.push_line("const (");
        out.push_indent();
        let width = consts.iter().map(|c| c.chars().count()).max().unwrap_or(0);
        for (i, (case, konst)) in cases.iter().zip(&consts).enumerate() {
            if let Some(doc) = DocComment::line(konst, case.doc.as_deref()) {
                out.emit(&doc);
            }
            match e.base() {
                EnumBase::Int if i == 0 => {
                    out.push_line(&format!("{konst} {name} = iota + 1"));
                }
                EnumBase::Int => {
                    out.push_line(konst);
                }
                EnumBase::String => {
                    let value = quote_str(&case.name);
                    out.push_line(&format!("{konst:<width$} {name} = {value}"));
                }
            }
        }
        out.push_dedent();
        out.push_line(")");
    }

    out.push_blank();
    out.push_line(&format!(
        "// {name}Values lists every {name} in declaration order."
    ));
    out.push_line(&format!(
        "var {name}Values = []{name}{{{}}}",
        consts.join(", ")
    ));

    let recv = default_receiver(&name);
    out.push_blank();
    out.push_line(&format!("// String returns the label of {recv}."));
    out.push_line(&format!("func ({recv} {name}) String() string {{"));
    out.push_indent();
    match e.base() {
        EnumBase::Int => {
            let itoa = cx.qualify(e.as_node(), &Name::new("strconv.Itoa"))?;
            out.push_line(&format!("switch {recv} {{"));
            for (case, konst) in cases.iter().zip(&consts) {
                out.push_line(&format!("case {konst}:"));
                out.push_indent();
                out.push_line(&format!("return {}", quote_str(&case.name)));
                out.push_dedent();
            }
            out.push_line("default:");
            out.push_indent();
            out.push_line(&format!("return {itoa}(int({recv}))"));
            out.push_dedent();
            out.push_line("}");
        }
        EnumBase::String => {
            out.push_line(&format!("return string({recv})"));
        }
    }
    out.push_dedent();
    out.push_line("}");

    out.push_blank();
    out.push_line(&format!(
        "// IsValid reports whether {recv} is a declared {name}."
    ));
    out.push_line(&format!("func ({recv} {name}) IsValid() bool {{"));
    out.push_indent();
    match (e.base(), consts.first(), consts.last()) {
        (_, None, _) | (_, _, None) => {
            out.push_line("return false");
        }
        (EnumBase::Int, Some(first), Some(last)) => {
            out.push_line(&format!("return {recv} >= {first} && {recv} <= {last}"));
        }
        (EnumBase::String, Some(_), Some(_)) => {
            out.push_line(&format!("switch {recv} {{"));
            out.push_line(&format!("case {}:", consts.join(", ")));
            out.push_indent();
            out.push_line("return true");
            out.push_dedent();
            out.push_line("default:");
            out.push_indent();
            out.push_line("return false");
            out.push_dedent();
            out.push_line("}");
        }
    }
    out.push_dedent();
    out.push_line("}");
    Ok(())
}
