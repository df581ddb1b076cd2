//! Go lowering of error groups.
//!
//! A group becomes an interface embedding `error` with a marker method.
//! Every case gets its own interface with a case marker and one getter per
//! property, implemented by a private struct whose last field is the
//! wrapped cause. The names come from [`ErrorNames`], which the `make` and
//! `check` macros use as well. A property may not shadow any generated
//! member.

use std::collections::HashSet;

use eyre::{Result, WrapErr};
use loom_codegen::comment::DocComment;
use loom_codegen::error::{RenderError, check_exported};
use loom_codegen::literal::quote_str;
use loom_codegen::naming::GO_NAMING;
use loom_codegen::stdlib::errors::ErrorNames;
use loom_codegen::{CodeBuilder, RenderCx};
use loom_core::{Name, make_private, make_public};
use loom_ir::{ErrorCase, ErrorGroup};

use crate::decls::preface;
use crate::types::type_expr;

/// Receiver of the generated methods.
const RECV: &str = "e";

/// Field holding the wrapped cause.
const CAUSE: &str = "cause";

pub fn error_group(cx: &mut RenderCx, out: &mut CodeBuilder, group: &ErrorGroup) -> Result<()> {
    let name = group.name();
    check_exported(&name, group.visibility().is_public())?;
    preface(out, &name, group.doc(), &group.annotations());

    let marker = ErrorNames::new(name.clone(), "").group_predicate();
    out.push_line(&format!("type {name} interface {{"));
    out.push_indent();
    out.push_line("error");
    out.push_line(&format!("{marker}() bool"));
    out.push_dedent();
    out.push_line("}");

    for case in group.cases() {
        out.push_separator();
        error_case(cx, out, group, &case).wrap_err_with(|| format!("case {}", case.name()))?;
    }
    Ok(())
}

struct Prop {
    field: String,
    getter: String,
    ty: String,
    doc: Option<String>,
}

fn error_case(
    cx: &mut RenderCx,
    out: &mut CodeBuilder,
    group: &ErrorGroup,
    case: &ErrorCase,
) -> Result<()> {
    let names = ErrorNames::of(group, case);
    let mut props = Vec::new();
    for prop in case.properties() {
        props.push(Prop {
            field: GO_NAMING.safe_name(&make_private(&prop.name)),
            getter: make_public(&prop.name),
            ty: type_expr(cx, case.as_node(), &prop.type_decl)
                .wrap_err_with(|| format!("property {}", prop.name))?,
            doc: prop.doc.clone(),
        });
    }
    check_members(&names, &props)?;

    let iface = names.case_interface();
    if let Some(doc) = DocComment::line(&iface, case.doc().as_deref()) {
        out.emit(&doc);
    }
    out.push_line(&format!("type {iface} interface {{"));
    out.push_indent();
    out.push_line(names.group());
    out.push_line(&format!("{}() bool", names.case_predicate()));
    for prop in &props {
        if let Some(doc) = DocComment::line(&prop.getter, prop.doc.as_deref()) {
            out.emit(&doc);
        }
        out.push_line(&format!("{}() {}", prop.getter, prop.ty));
    }
    out.push_dedent();
    out.push_line("}");

    let imp = names.implementation();
    out.push_blank();
    out.push_line(&format!("type {imp} struct {{"));
    out.push_indent();
    let width = props
        .iter()
        .map(|p| p.field.chars().count())
        .chain([CAUSE.len()])
        .max()
        .unwrap_or(0);
    for prop in &props {
        out.push_line(&format!("{:<width$} {}", prop.field, prop.ty));
    }
    out.push_line(&format!("{:<width$} error", CAUSE));
    out.push_dedent();
    out.push_line("}");

    let mut method = |signature: String, body: String| {
        out.push_blank();
        out.push_line(&format!("func ({RECV} *{imp}) {signature} {{"));
        out.push_indent();
        out.push_line(&format!("return {body}"));
        out.push_dedent();
        out.push_line("}");
    };
    method(format!("{}() bool", names.group_predicate()), "true".into());
    method(format!("{}() bool", names.case_predicate()), "true".into());
    for prop in &props {
        method(
            format!("{}() {}", prop.getter, prop.ty),
            format!("{RECV}.{}", prop.field),
        );
    }
    method("Unwrap() error".into(), format!("{RECV}.{CAUSE}"));

    let message = if props.is_empty() {
        quote_str(&case.name())
    } else {
        let sprintf = cx.qualify(case.as_node(), &Name::new("fmt.Sprintf"))?;
        let format: Vec<String> = props.iter().map(|p| format!("{}=%v", p.field)).collect();
        let args: Vec<String> = props.iter().map(|p| format!("{RECV}.{}", p.field)).collect();
        format!(
            "{sprintf}({}, {})",
            quote_str(&format!("{} {}", case.name(), format.join(" "))),
            args.join(", ")
        )
    };
    method("Error() string".into(), message);
    Ok(())
}

/// Reject properties whose field or getter would collide with the cause
/// field, the generated methods or another property.
fn check_members(names: &ErrorNames, props: &[Prop]) -> Result<(), RenderError> {
    let generated = [
        ("Error".to_string(), "Error method"),
        ("Unwrap".to_string(), "Unwrap method"),
        (names.group_predicate(), "group predicate"),
        (names.case_predicate(), "case predicate"),
    ];
    let mut seen = HashSet::new();
    for prop in props {
        if prop.field == CAUSE {
            return Err(RenderError::Clash {
                name: prop.field.clone(),
                member: "cause field".to_string(),
            });
        }
        if let Some((_, member)) = generated.iter().find(|(name, _)| *name == prop.getter) {
            return Err(RenderError::Clash {
                name: prop.getter.clone(),
                member: member.to_string(),
            });
        }
        if !seen.insert(prop.getter.as_str()) {
            return Err(RenderError::Clash {
                name: prop.getter.clone(),
                member: "getter of another property".to_string(),
            });
        }
    }
    Ok(())
}
