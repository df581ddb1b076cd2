//! Java lowering of error groups.
//!
//! A group becomes an abstract checked exception. Each case is a static
//! nested subclass with one final field and getter per property, so the
//! `make` and `check` macros can refer to it as `Group.Case`.

use eyre::{Result, WrapErr};
use loom_codegen::comment::DocComment;
use loom_codegen::literal::quote_str;
use loom_codegen::{CodeBuilder, RenderCx};
use loom_core::{Name, make_private, make_public};
use loom_ir::{ErrorCase, ErrorGroup, stdlib};

use crate::decls::{modifier, preface};
use crate::types::type_expr;

pub fn error_group(cx: &mut RenderCx, out: &mut CodeBuilder, group: &ErrorGroup) -> Result<()> {
    let name = group.name();
    let doc = DocComment::block(&name, group.doc().as_deref());
    preface(cx, out, group.as_node(), &name, doc, &group.annotations())?;

    let base = cx.qualify(group.as_node(), &Name::new(stdlib::ERROR))?;
    out.push_line(&format!(
        "{}abstract class {name} extends {base} {{",
        modifier(group.visibility())
    ));
    out.push_indent();
    out.push_line(&format!("protected {name}(Throwable cause) {{"));
    out.push_indent();
    out.push_line("super(cause);");
    out.push_dedent();
    out.push_line("}");

    let mut result = Ok(());
    for case in group.cases() {
        out.push_blank();
        result = error_case(cx, out, &name, &case).wrap_err_with(|| format!("case {}", case.name()));
        if result.is_err() {
            break;
        }
    }
    out.push_dedent();
    out.push_line("}");
    result
}

struct Prop {
    field: String,
    getter: String,
    ty: String,
    doc: Option<String>,
}

fn error_case(cx: &mut RenderCx, out: &mut CodeBuilder, group: &str, case: &ErrorCase) -> Result<()> {
    let name = case.name();
    let mut props = Vec::new();
    for prop in case.properties() {
        props.push(Prop {
            field: make_private(&prop.name),
            getter: format!("get{}", make_public(&prop.name)),
            ty: type_expr(cx, case.as_node(), &prop.type_decl)
                .wrap_err_with(|| format!("property {}", prop.name))?,
            doc: prop.doc.clone(),
        });
    }

    if let Some(doc) = DocComment::block(&name, case.doc().as_deref()) {
        out.emit(&doc);
    }
    out.push_line(&format!(
        "public static final class {name} extends {group} {{"
    ));
    out.push_indent();
    for prop in &props {
        out.push_line(&format!("private final {} {};", prop.ty, prop.field));
    }
    if !props.is_empty() {
        out.push_blank();
    }

    let params: Vec<String> = props.iter().map(|p| format!("{} {}", p.ty, p.field)).collect();
    let args: Vec<String> = props.iter().map(|p| p.field.clone()).collect();
    let mut with_cause = params.clone();
    with_cause.push("Throwable cause".to_string());
    let mut delegated = args.clone();
    delegated.push("null".to_string());

    out.push_line(&format!("public {name}({}) {{", params.join(", ")));
    out.push_indent();
    out.push_line(&format!("this({});", delegated.join(", ")));
    out.push_dedent();
    out.push_line("}");
    out.push_blank();
    out.push_line(&format!("public {name}({}) {{", with_cause.join(", ")));
    out.push_indent();
    out.push_line("super(cause);");
    for prop in &props {
        out.push_line(&format!("this.{0} = {0};", prop.field));
    }
    out.push_dedent();
    out.push_line("}");

    for prop in &props {
        out.push_blank();
        if let Some(doc) = DocComment::block(&prop.getter, prop.doc.as_deref()) {
            out.emit(&doc);
        }
        out.push_line(&format!("public {} {}() {{", prop.ty, prop.getter));
        out.push_indent();
        out.push_line(&format!("return {};", prop.field));
        out.push_dedent();
        out.push_line("}");
    }

    let message = if props.is_empty() {
        quote_str(&name)
    } else {
        let format: Vec<String> = props.iter().map(|p| format!("{}=%s", p.field)).collect();
        format!(
            "String.format({}, {})",
            quote_str(&format!("{name} {}", format.join(" "))),
            args.join(", ")
        )
    };
    out.push_blank();
    out.push_line("@Override");
    out.push_line("public String getMessage() {");
    out.push_indent();
    out.push_line(&format!("return {message};"));
    out.push_dedent();
    out.push_line("}");

    out.push_dedent();
    out.push_line("}");
    Ok(())
}
