//! Java statements and expressions.
//!
//! Expression statements end in `;`. Templates are written verbatim, so a
//! template statement carries its own terminator.

use loom_codegen::literal::{quote_char, quote_str};
use loom_codegen::{CodeBuilder, RenderCx, RenderError};
use loom_ir::{
    Assign, AssignOp, BasicLit, Binary, Block, Call, Comment, CompositeLit, Defer, For, Ident, If,
    Lang, LitKind, Macro, Node, Range, Return, Selector, Tpl, TplPart, TypeDecl, TypeRef, Unary,
};

use crate::types::type_expr;

/// Render the elements of `block` at the current indentation.
pub fn block(cx: &mut RenderCx, out: &mut CodeBuilder, block: &Block) -> Result<(), RenderError> {
    for element in block.elements() {
        stmt(cx, out, &element)?;
    }
    Ok(())
}

/// Render one block element as a statement.
pub fn stmt(cx: &mut RenderCx, out: &mut CodeBuilder, node: &Node) -> Result<(), RenderError> {
    if let Some(mac) = node.cast::<Macro>() {
        for produced in cx.expand(&mac)? {
            stmt(cx, out, &produced)?;
        }
    } else if let Some(nested) = node.cast::<Block>() {
        block(cx, out, &nested)?;
    } else if let Some(tpl) = node.cast::<Tpl>() {
        let text = template(cx, &tpl)?;
        if !text.is_empty() {
            out.push_lines(&text);
        }
    } else if let Some(comment) = node.cast::<Comment>() {
        out.push_comment("// ", &comment.text());
    } else if let Some(cond) = node.cast::<If>() {
        if_stmt(cx, out, &cond)?;
    } else if let Some(each) = node.cast::<For>() {
        let init = each.init().map(|n| simple_stmt(cx, &n)).transpose()?;
        let cond = each.cond().map(|n| expr(cx, &n)).transpose()?;
        let post = each.post().map(|n| simple_stmt(cx, &n)).transpose()?;
        let header = match (init, cond, post) {
            (None, None, None) => "while (true) {".to_string(),
            (None, Some(cond), None) => format!("while ({cond}) {{"),
            (init, cond, post) => format!(
                "for ({}; {}; {}) {{",
                init.unwrap_or_default(),
                cond.unwrap_or_default(),
                post.unwrap_or_default()
            ),
        };
        body(cx, out, &header, &each.body())?;
        out.push_line("}");
    } else if let Some(range) = node.cast::<Range>() {
        if range.key().is_some() {
            return Err(unsupported("range with a key"));
        }
        let over = expr(cx, &range.expr())?;
        let value = range.value().unwrap_or_else(|| "ignored".to_string());
        body(cx, out, &format!("for (var {value} : {over}) {{"), &range.body())?;
        out.push_line("}");
    } else if node.cast::<Defer>().is_some() {
        return Err(unsupported("defer"));
    } else if let Some(ret) = node.cast::<Return>() {
        let results = ret.results();
        match results.as_slice() {
            [] => out.push_line("return;"),
            [single] => {
                let value = expr(cx, single)?;
                out.push_line(&format!("return {value};"))
            }
            _ => return Err(unsupported(&format!("return of {} values", results.len()))),
        };
    } else if let Some(assign) = node.cast::<Assign>() {
        let line = assign_stmt(cx, &assign)?;
        out.push_line(&format!("{line};"));
    } else {
        let line = expr(cx, node)?;
        out.push_line(&format!("{line};"));
    }
    Ok(())
}

fn if_stmt(cx: &mut RenderCx, out: &mut CodeBuilder, cond: &If) -> Result<(), RenderError> {
    if let Some(init) = cond.init() {
        stmt(cx, out, &init)?;
    }
    let header = format!("if ({}) {{", expr(cx, &cond.cond())?);
    body(cx, out, &header, &cond.body())?;
    if let Some(otherwise) = cond.otherwise() {
        body(cx, out, "} else {", &otherwise)?;
    }
    out.push_line("}");
    Ok(())
}

/// `header`, then `inner` one level deeper. The caller closes the block.
fn body(
    cx: &mut RenderCx,
    out: &mut CodeBuilder,
    header: &str,
    inner: &Block,
) -> Result<(), RenderError> {
    out.push_line(header);
    out.push_indent();
    let result = block(cx, out, inner);
    out.push_dedent();
    result
}

/// A statement that fits into a `for` header.
fn simple_stmt(cx: &mut RenderCx, node: &Node) -> Result<String, RenderError> {
    match node.cast::<Assign>() {
        Some(assign) => assign_stmt(cx, &assign),
        None => expr(cx, node),
    }
}

fn assign_stmt(cx: &mut RenderCx, assign: &Assign) -> Result<String, RenderError> {
    let (lhs, rhs) = (assign.lhs(), assign.rhs());
    let ([target], [value]) = (lhs.as_slice(), rhs.as_slice()) else {
        return Err(unsupported(&format!(
            "assignment of {} values to {} targets",
            rhs.len(),
            lhs.len()
        )));
    };
    let target = expr(cx, target)?;
    let value = expr(cx, value)?;
    Ok(match assign.op() {
        AssignOp::Assign => format!("{target} = {value}"),
        AssignOp::Define => format!("var {target} = {value}"),
    })
}

/// Comma separated expressions.
pub fn exprs(cx: &mut RenderCx, nodes: &[Node]) -> Result<String, RenderError> {
    let mut rendered = Vec::with_capacity(nodes.len());
    for node in nodes {
        rendered.push(expr(cx, node)?);
    }
    Ok(rendered.join(", "))
}

/// Render `node` as a Java expression.
pub fn expr(cx: &mut RenderCx, node: &Node) -> Result<String, RenderError> {
    if let Some(ident) = node.cast::<Ident>() {
        Ok(ident.name())
    } else if let Some(lit) = node.cast::<BasicLit>() {
        Ok(literal(&lit))
    } else if let Some(sel) = node.cast::<Selector>() {
        Ok(format!("{}.{}", expr(cx, &sel.x())?, sel.sel()))
    } else if let Some(call) = node.cast::<Call>() {
        let fun = expr(cx, &call.fun())?;
        let args = exprs(cx, &call.args())?;
        Ok(format!("{fun}({args})"))
    } else if let Some(lit) = node.cast::<CompositeLit>() {
        composite(cx, &lit)
    } else if let Some(unary) = node.cast::<Unary>() {
        Ok(format!("{}{}", unary.op(), expr(cx, &unary.x())?))
    } else if let Some(binary) = node.cast::<Binary>() {
        let op = binary.op();
        let prec = precedence(&op);
        let x = operand(cx, &binary.x(), prec, false)?;
        let y = operand(cx, &binary.y(), prec, true)?;
        Ok(format!("{x} {op} {y}"))
    } else if let Some(tref) = node.cast::<TypeRef>() {
        type_expr(cx, tref.as_node(), &tref.decl())
    } else if let Some(tpl) = node.cast::<Tpl>() {
        template(cx, &tpl)
    } else if let Some(mac) = node.cast::<Macro>() {
        let mut text = String::new();
        for produced in cx.expand(&mac)? {
            text.push_str(&expr(cx, &produced)?);
        }
        Ok(text)
    } else if let Some(comment) = node.cast::<Comment>() {
        Ok(format!("/* {} */", comment.text()))
    } else {
        Err(unsupported(&format!("{} in expression position", node.kind())))
    }
}

/// Arrays are initialized in place, everything else through a
/// constructor.
fn composite(cx: &mut RenderCx, lit: &CompositeLit) -> Result<String, RenderError> {
    let decl = lit.type_decl();
    let elements = exprs(cx, &lit.elements())?;
    match &decl {
        TypeDecl::Slice(_) | TypeDecl::Array { .. } => {
            let ty = type_expr(cx, lit.as_node(), &decl)?;
            Ok(format!("new {ty}{{{elements}}}"))
        }
        _ => {
            let ty = type_expr(cx, lit.as_node(), &decl)?;
            Ok(format!("new {ty}({elements})"))
        }
    }
}

/// The operand of a binary expression, parenthesized where Java's
/// precedence would otherwise regroup it.
fn operand(
    cx: &mut RenderCx,
    node: &Node,
    parent: u8,
    right: bool,
) -> Result<String, RenderError> {
    let text = expr(cx, node)?;
    let inner = node.cast::<Binary>().map(|b| precedence(&b.op()));
    Ok(match inner {
        Some(prec) if prec < parent || (right && prec == parent) => format!("({text})"),
        _ => text,
    })
}

fn precedence(op: &str) -> u8 {
    match op {
        "||" => 1,
        "&&" => 2,
        "|" => 3,
        "^" => 4,
        "&" => 5,
        "==" | "!=" => 6,
        "<" | "<=" | ">" | ">=" | "instanceof" => 7,
        "<<" | ">>" | ">>>" => 8,
        "+" | "-" => 9,
        "*" | "/" | "%" => 10,
        _ => 0,
    }
}

fn literal(lit: &BasicLit) -> String {
    let value = lit.value();
    match lit.lit_kind() {
        LitKind::Int | LitKind::Float | LitKind::Bool => value,
        LitKind::Str => quote_str(&value),
        LitKind::Char => quote_char(&value),
        LitKind::Nil => "null".to_string(),
    }
}

/// The text of a template with its type and name references resolved.
pub fn template(cx: &RenderCx, tpl: &Tpl) -> Result<String, RenderError> {
    let mut text = String::new();
    for part in tpl.parts() {
        match part {
            TplPart::Text(s) => text.push_str(&s),
            TplPart::Type(decl) => text.push_str(&type_expr(cx, tpl.as_node(), &decl)?),
            TplPart::Use(name) => text.push_str(&cx.qualify(tpl.as_node(), &name)?),
        }
    }
    Ok(text)
}

fn unsupported(what: &str) -> RenderError {
    RenderError::Unsupported {
        what: what.to_string(),
        lang: Lang::Java,
    }
}
