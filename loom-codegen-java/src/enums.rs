//! Java enums.
//!
//! Constants are named in SCREAMING_SNAKE_CASE and carry their value.
//! Integer enums also keep the case name as a label for `toString`.

use eyre::Result;
use loom_codegen::comment::DocComment;
use loom_codegen::literal::quote_str;
use loom_codegen::{CodeBuilder, RenderCx};
use loom_core::to_screaming_snake_case;
use loom_ir::{Enum, EnumBase, EnumCase};

use crate::decls::{modifier, preface};

/// The constant name of a case: `notFound` becomes `NOT_FOUND`.
pub fn case_const(case: &str) -> String {
    to_screaming_snake_case(case)
}

pub fn enum_decl(cx: &mut RenderCx, out: &mut CodeBuilder, e: &Enum) -> Result<()> {
    let name = e.name();
    let doc = DocComment::block(&name, e.doc().as_deref());
    preface(cx, out, e.as_node(), &name, doc, &e.annotations())?;

    let cases = e.cases();
    let base = e.base();
    out.push_line(&format!("{}enum {name} {{", modifier(e.visibility())));
    out.push_indent();
    constants(out, base, &cases);
    out.push_blank();
    match base {
        EnumBase::Int => int_members(out, &name, cases.len()),
        EnumBase::String => string_members(out, &name),
    }
    out.push_dedent();
    out.push_line("}");
    Ok(())
}

fn constants(out: &mut CodeBuilder, base: EnumBase, cases: &[EnumCase]) {
    if cases.is_empty() {
        out.push_line(";");
        return;
    }
    let last = cases.len() - 1;
    for (i, case) in cases.iter().enumerate() {
        let constant = case_const(&case.name);
        if let Some(doc) = DocComment::block(&constant, case.doc.as_deref()) {
            out.emit(&doc);
        }
        let args = match base {
            EnumBase::Int => format!("{}, {}", i + 1, quote_str(&case.name)),
            EnumBase::String => quote_str(&case.name),
        };
        let end = if i == last { ";" } else { "," };
        out.push_line(&format!("{constant}({args}){end}"));
    }
}

fn int_members(out: &mut CodeBuilder, name: &str, count: usize) {
    out.push_line("private final int value;");
    out.push_line("private final String label;");
    out.push_blank();
    out.push_line(&format!("{name}(int value, String label) {{"));
    out.push_indent();
    out.push_line("this.value = value;");
    out.push_line("this.label = label;");
    out.push_dedent();
    out.push_line("}");

    getter(out, "int", "value", "value");
    to_string(out, "label");

    out.push_blank();
    out.push_line("/** Reports whether {@code value} is the value of a constant. */");
    out.push_line("public static boolean isValid(int value) {");
    out.push_indent();
    if count == 0 {
        out.push_line("return false;");
    } else {
        out.push_line(&format!("return value >= 1 && value <= {count};"));
    }
    out.push_dedent();
    out.push_line("}");

    lookup(out, name, "of", "int value", "c.value == value");
}

fn string_members(out: &mut CodeBuilder, name: &str) {
    out.push_line("private final String value;");
    out.push_blank();
    out.push_line(&format!("{name}(String value) {{"));
    out.push_indent();
    out.push_line("this.value = value;");
    out.push_dedent();
    out.push_line("}");

    getter(out, "String", "value", "value");
    to_string(out, "value");

    out.push_blank();
    out.push_line("/** Reports whether {@code value} is the value of a constant. */");
    out.push_line("public static boolean isValid(String value) {");
    out.push_indent();
    out.push_line("return parse(value) != null;");
    out.push_dedent();
    out.push_line("}");

    lookup(out, name, "parse", "String value", "c.value.equals(value)");
}

fn getter(out: &mut CodeBuilder, ty: &str, method: &str, field: &str) {
    out.push_blank();
    getter_body(out, &format!("public {ty} {method}()"), field);
}

fn to_string(out: &mut CodeBuilder, field: &str) {
    out.push_blank();
    out.push_line("@Override");
    getter_body(out, "public String toString()", field);
}

fn getter_body(out: &mut CodeBuilder, signature: &str, field: &str) {
    out.push_line(&format!("{signature} {{"));
    out.push_indent();
    out.push_line(&format!("return {field};"));
    out.push_dedent();
    out.push_line("}");
}

/// A static lookup returning the matching constant or `null`.
fn lookup(out: &mut CodeBuilder, name: &str, method: &str, param: &str, matches: &str) {
    out.push_blank();
    out.push_line("/** The constant with the given value, or {@code null}. */");
    out.push_line(&format!("public static {name} {method}({param}) {{"));
    out.push_indent();
    out.push_line(&format!("for ({name} c : values()) {{"));
    out.push_indent();
    out.push_line(&format!("if ({matches}) {{"));
    out.push_indent();
    out.push_line("return c;");
    out.push_dedent();
    out.push_line("}");
    out.push_dedent();
    out.push_line("}");
    out.push_line("return null;");
    out.push_dedent();
    out.push_line("}");
}
