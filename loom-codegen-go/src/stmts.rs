//! Go statements and expressions.
//!
//! Macros are expanded where they appear. Their output is rendered like
//! any other node, so a macro may produce further macros.

use loom_codegen::literal::{quote_char, quote_str};
use loom_codegen::{CodeBuilder, RenderCx, RenderError};
use loom_ir::{
    Assign, AssignOp, BasicLit, Binary, Block, Call, Comment, CompositeLit, Defer, For, Ident, If,
    Lang, LitKind, Macro, Node, Range, Return, Selector, Tpl, TplPart, TypeRef, Unary,
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
            (None, None, None) => "for {".to_string(),
            (None, Some(cond), None) => format!("for {cond} {{"),
            (init, cond, post) => format!(
                "for {}; {}; {} {{",
                init.unwrap_or_default(),
                cond.unwrap_or_default(),
                post.unwrap_or_default()
            ),
        };
        body(cx, out, &header, &each.body())?;
        out.push_line("}");
    } else if let Some(range) = node.cast::<Range>() {
        let over = expr(cx, &range.expr())?;
        let header = match (range.key(), range.value()) {
            (None, None) => format!("for range {over} {{"),
            (Some(key), None) => format!("for {key} := range {over} {{"),
            (key, Some(value)) => format!(
                "for {}, {value} := range {over} {{",
                key.unwrap_or_else(|| "_".to_string())
            ),
        };
        body(cx, out, &header, &range.body())?;
        out.push_line("}");
    } else if let Some(defer) = node.cast::<Defer>() {
        let call = expr(cx, &defer.call())?;
        out.push_line(&format!("defer {call}"));
    } else if let Some(ret) = node.cast::<Return>() {
        let results = exprs(cx, &ret.results())?;
        if results.is_empty() {
            out.push_line("return");
        } else {
            out.push_line(&format!("return {results}"));
        }
    } else if let Some(assign) = node.cast::<Assign>() {
        let line = assign_stmt(cx, &assign)?;
        out.push_line(&line);
    } else {
        let line = expr(cx, node)?;
        out.push_line(&line);
    }
    Ok(())
}

fn if_stmt(cx: &mut RenderCx, out: &mut CodeBuilder, cond: &If) -> Result<(), RenderError> {
    let mut header = String::from("if ");
    if let Some(init) = cond.init() {
        header.push_str(&simple_stmt(cx, &init)?);
        header.push_str("; ");
    }
    header.push_str(&expr(cx, &cond.cond())?);
    header.push_str(" {");
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

/// A statement that fits into an `if` or `for` header.
fn simple_stmt(cx: &mut RenderCx, node: &Node) -> Result<String, RenderError> {
    match node.cast::<Assign>() {
        Some(assign) => assign_stmt(cx, &assign),
        None => expr(cx, node),
    }
}

fn assign_stmt(cx: &mut RenderCx, assign: &Assign) -> Result<String, RenderError> {
    let op = match assign.op() {
        AssignOp::Assign => "=",
        AssignOp::Define => ":=",
    };
    let lhs = exprs(cx, &assign.lhs())?;
    let rhs = exprs(cx, &assign.rhs())?;
    Ok(format!("{lhs} {op} {rhs}"))
}

/// Comma separated expressions.
pub fn exprs(cx: &mut RenderCx, nodes: &[Node]) -> Result<String, RenderError> {
    let mut rendered = Vec::with_capacity(nodes.len());
    for node in nodes {
        rendered.push(expr(cx, node)?);
    }
    Ok(rendered.join(", "))
}

/// Render `node` as a Go expression.
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
        let ty = type_expr(cx, lit.as_node(), &lit.type_decl())?;
        let elements = exprs(cx, &lit.elements())?;
        Ok(format!("{ty}{{{elements}}}"))
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
        Err(RenderError::Unsupported {
            what: format!("{} in expression position", node.kind()),
            lang: Lang::Go,
        })
    }
}

/// The operand of a binary expression, parenthesized where Go's
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
        "==" | "!=" | "<" | "<=" | ">" | ">=" => 3,
        "+" | "-" | "|" | "^" => 4,
        "*" | "/" | "%" | "<<" | ">>" | "&" | "&^" => 5,
        _ => 0,
    }
}

fn literal(lit: &BasicLit) -> String {
    let value = lit.value();
    match lit.lit_kind() {
        LitKind::Int | LitKind::Float | LitKind::Bool => value,
        LitKind::Str => quote_str(&value),
        LitKind::Char => quote_char(&value),
        LitKind::Nil => "nil".to_string(),
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

#[cfg(test)]
mod tests {
    use loom_codegen::RenderConfig;
    use loom_codegen::importer::ImportStyle;
    use loom_codegen::stdlib::{fmt, lang};
    use loom_ir::{Func, Module, Package, SrcFile, Target};

    use super::*;
    use crate::stdlib::go_stdlib;

    fn render_body(body: Block) -> String {
        let module = Module::new(Target::lang(Lang::Go))
            .add_packages([Package::new("example.com/m")
                .add_files([SrcFile::new("main")
                    .add_funcs([Func::new("Run").with_body(body.clone()).unwrap()])
                    .unwrap()])
                .unwrap()])
            .unwrap();
        let mut cx = RenderCx::new(
            &module,
            Target::lang(Lang::Go),
            RenderConfig::default(),
            go_stdlib,
        );
        cx.tear_up(ImportStyle::Alias, |pkg| pkg.import_path());
        let mut out = CodeBuilder::go();
        block(&mut cx, &mut out, &body).unwrap();
        out.build()
    }

    #[test]
    fn test_assign_and_return() {
        let body = Block::new()
            .add(Assign::new([Ident::new("x")], AssignOp::Define, [BasicLit::int(1)]).unwrap())
            .unwrap()
            .add(Return::new([Ident::new("x")]).unwrap())
            .unwrap();
        assert_eq!(render_body(body), "x := 1\nreturn x\n");
    }

    #[test]
    fn test_if_else() {
        let cond = If::new(
            Binary::new(Ident::new("x"), ">", BasicLit::int(0)).unwrap(),
            Block::new().text("positive()").unwrap(),
        )
        .unwrap()
        .with_else(Block::new().add(Return::empty()).unwrap())
        .unwrap();
        let body = Block::new().add(cond).unwrap();
        assert_eq!(
            render_body(body),
            "if x > 0 {\n\tpositive()\n} else {\n\treturn\n}\n"
        );
    }

    #[test]
    fn test_loops() {
        let counting = For::new(Block::new().text("work(i)").unwrap())
            .unwrap()
            .with_init(Assign::new([Ident::new("i")], AssignOp::Define, [BasicLit::int(0)]).unwrap())
            .unwrap()
            .with_cond(Binary::new(Ident::new("i"), "<", Ident::new("n")).unwrap())
            .unwrap()
            .with_post(Tpl::text("i++"))
            .unwrap();
        let ranging = Range::new(
            None,
            Some("v"),
            Ident::new("items"),
            Block::new().text("use(v)").unwrap(),
        )
        .unwrap();
        let body = Block::new().add(counting).unwrap().add(ranging).unwrap();
        assert_eq!(
            render_body(body),
            "for i := 0; i < n; i++ {\n\twork(i)\n}\nfor _, v := range items {\n\tuse(v)\n}\n"
        );
    }

    #[test]
    fn test_precedence() {
        let sum = Binary::new(Ident::new("a"), "+", Ident::new("b")).unwrap();
        let product = Binary::new(sum, "*", Ident::new("c")).unwrap();
        let diff = Binary::new(
            Ident::new("a"),
            "-",
            Binary::new(Ident::new("b"), "-", Ident::new("c")).unwrap(),
        )
        .unwrap();
        let body = Block::new().add(product).unwrap().add(diff).unwrap();
        assert_eq!(render_body(body), "(a + b) * c\na - (b - c)\n");
    }

    #[test]
    fn test_literals() {
        let call = Call::new(
            Ident::new("f"),
            [
                Node::from(BasicLit::string("say \"hi\"")),
                BasicLit::char('x').into(),
                BasicLit::bool(true).into(),
                BasicLit::nil().into(),
                BasicLit::float(1.5).into(),
            ],
        )
        .unwrap();
        let body = Block::new().add(call).unwrap();
        assert_eq!(render_body(body), "f(\"say \\\"hi\\\"\", 'x', true, nil, 1.5)\n");
    }

    #[test]
    fn test_macros_resolve_imports() {
        let body = Block::new()
            .add(fmt::println([BasicLit::string("hi").into()]))
            .unwrap()
            .add(Defer::new(lang::call_static("os.Exit", [BasicLit::int(1).into()])).unwrap())
            .unwrap();
        assert_eq!(render_body(body), "fmt.Println(\"hi\")\ndefer os.Exit(1)\n");
    }

    #[test]
    fn test_comment_and_term() {
        let body = Block::new()
            .add(Comment::new("note"))
            .unwrap()
            .add(lang::term())
            .unwrap();
        assert_eq!(render_body(body), "// note\n");
    }
}
