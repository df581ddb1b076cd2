//! Declarations, calls and conversions.

use loom_core::Name;
use loom_ir::{
    Assign, AssignOp, BasicLit, Binary, Block, Call, Ident, If, IrError, Lang, Macro, MacroCtx,
    Node, Return, Selector, Target, Tpl, TypeDecl, stdlib,
};

use super::copies;

/// Numeric types whose zero value is `0` in Go.
const GO_NUMERIC: &[&str] = &[
    "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16", "uint32", "uint64",
    "uintptr", "float32", "float64", "byte", "rune",
];

/// Declare `lhs` from a call that may fail.
///
/// Go checks the error and returns it wrapped as `"<msg>: %w"` together
/// with zero values for the enclosing function's other results. Java
/// declares the variable; the exception propagates on its own.
pub fn try_define(lhs: impl Into<String>, rhs: impl Into<Node>, msg: impl Into<String>) -> Macro {
    let lhs = lhs.into();
    let rhs = rhs.into();
    let msg = msg.into();
    let (java_lhs, java_rhs) = (lhs.clone(), rhs.clone());
    Macro::new("lang::try_define")
        .with_matcher(Target::lang(Lang::Go), move |ctx| {
            go_try_define(ctx, &lhs, &rhs, &msg)
        })
        .with_matcher(Target::lang(Lang::Java), move |_| {
            let define = Assign::new(
                [Ident::new(java_lhs.clone())],
                AssignOp::Define,
                [java_rhs.deep_copy()],
            )?;
            Ok(vec![define.into()])
        })
}

fn go_try_define(
    ctx: &mut MacroCtx<'_>,
    lhs: &str,
    rhs: &Node,
    msg: &str,
) -> Result<Vec<Node>, IrError> {
    let define = Assign::new(
        [Ident::new(lhs), Ident::new("err")],
        AssignOp::Define,
        [rhs.deep_copy()],
    )?;

    let mut results = go_zero_results(ctx)?;
    let errorf = ctx.import("fmt.Errorf");
    let wrapped = Call::new(
        Ident::new(errorf),
        [
            Node::from(BasicLit::string(format!("{msg}: %w"))),
            Ident::new("err").into(),
        ],
    )?;
    results.push(wrapped.into());

    let check = If::new(
        Binary::new(Ident::new("err"), "!=", BasicLit::nil())?,
        Block::new().add(Return::new(results)?)?,
    )?;
    Ok(vec![define.into(), check.into()])
}

/// Zero values for all but the trailing error result of the enclosing
/// function.
fn go_zero_results(ctx: &mut MacroCtx<'_>) -> Result<Vec<Node>, IrError> {
    let Some(func) = ctx.func().cloned() else {
        return Ok(Vec::new());
    };
    let mut results = func.results();
    if func.has_error_result() {
        results.pop();
    }
    Ok(results
        .iter()
        .map(|r| go_zero_value(ctx, &r.type_decl()))
        .collect())
}

/// The zero value of `decl` in Go.
///
/// Named types use `*new(T)`, which holds for structs and interfaces alike.
pub fn go_zero_value(ctx: &MacroCtx<'_>, decl: &TypeDecl) -> Node {
    match decl {
        TypeDecl::Simple(name) => {
            let mapped = ctx.stdlib(name.clone());
            match mapped.as_str() {
                "string" => BasicLit::string("").into(),
                "bool" => BasicLit::bool(false).into(),
                "error" | "any" | "interface{}" => BasicLit::nil().into(),
                n if GO_NUMERIC.contains(&n) => BasicLit::int(0).into(),
                _ => new_zero(decl),
            }
        }
        TypeDecl::Generic { base, .. }
            if base.as_str() == stdlib::MAP || base.as_str() == stdlib::LIST =>
        {
            BasicLit::nil().into()
        }
        TypeDecl::Pointer(_)
        | TypeDecl::Slice(_)
        | TypeDecl::Channel { .. }
        | TypeDecl::Func { .. } => BasicLit::nil().into(),
        TypeDecl::Array { .. } | TypeDecl::Generic { .. } | TypeDecl::NamedTypeParam { .. } => {
            new_zero(decl)
        }
    }
}

fn new_zero(decl: &TypeDecl) -> Node {
    Tpl::new().push("*new(").push_type(decl.clone()).push(")").into()
}

/// Call a package level function (Go) or a static method (Java) by its
/// qualified name.
pub fn call_static(name: impl Into<Name>, args: impl IntoIterator<Item = Node>) -> Macro {
    let name = name.into();
    let args: Vec<Node> = args.into_iter().collect();
    let (java_name, java_args) = (name.clone(), args.clone());
    Macro::new("lang::call_static")
        .with_matcher(Target::lang(Lang::Go), move |ctx| {
            let fun = ctx.import(name.clone());
            Ok(vec![Call::new(Ident::new(fun), copies(&args))?.into()])
        })
        .with_matcher(Target::lang(Lang::Java), move |ctx| {
            let class = ctx.import(Name::new(java_name.qualifier()));
            let method = Selector::new(Ident::new(class), java_name.identifier())?;
            Ok(vec![Call::new(method, copies(&java_args))?.into()])
        })
}

/// Call `method` on the variable `ident`.
pub fn call_ident(
    ident: impl Into<String>,
    method: impl Into<String>,
    args: impl IntoIterator<Item = Node>,
) -> Macro {
    let ident = ident.into();
    let method = method.into();
    let args: Vec<Node> = args.into_iter().collect();
    Macro::new("lang::call_ident").with_matcher(Target::default(), move |_| {
        let fun = Selector::new(Ident::new(ident.clone()), method.clone())?;
        Ok(vec![Call::new(fun, copies(&args))?.into()])
    })
}

/// Convert any value to its string form.
pub fn to_string(expr: impl Into<Node>) -> Macro {
    let expr = expr.into();
    let java_expr = expr.clone();
    Macro::new("lang::to_string")
        .with_matcher(Target::lang(Lang::Go), move |ctx| {
            let sprintf = ctx.import("fmt.Sprintf");
            let call = Call::new(
                Ident::new(sprintf),
                [Node::from(BasicLit::string("%v")), expr.deep_copy()],
            )?;
            Ok(vec![call.into()])
        })
        .with_matcher(Target::lang(Lang::Java), move |ctx| {
            let string = ctx.import("java.lang.String");
            let fun = Selector::new(Ident::new(string), "valueOf")?;
            Ok(vec![Call::new(fun, [java_expr.deep_copy()])?.into()])
        })
}

/// Convert an integer to its decimal string form.
pub fn itoa(expr: impl Into<Node>) -> Macro {
    let expr = expr.into();
    let java_expr = expr.clone();
    Macro::new("lang::itoa")
        .with_matcher(Target::lang(Lang::Go), move |ctx| {
            let itoa = ctx.import("strconv.Itoa");
            Ok(vec![Call::new(Ident::new(itoa), [expr.deep_copy()])?.into()])
        })
        .with_matcher(Target::lang(Lang::Java), move |ctx| {
            let integer = ctx.import("java.lang.Integer");
            let fun = Selector::new(Ident::new(integer), "toString")?;
            Ok(vec![Call::new(fun, [java_expr.deep_copy()])?.into()])
        })
}

/// Access `field` of the enclosing method's receiver.
pub fn attr(field: impl Into<String>) -> Macro {
    let field = field.into();
    Macro::new("lang::attr").with_matcher(Target::default(), move |ctx| {
        let node: Node = match ctx.receiver_name() {
            Some(receiver) => Selector::new(Ident::new(receiver), field.clone())?.into(),
            None => Ident::new(field.clone()).into(),
        };
        Ok(vec![node])
    })
}

/// A statement terminator: nothing in Go, `;` in Java.
pub fn term() -> Macro {
    Macro::new("lang::term")
        .with_matcher(Target::lang(Lang::Go), |_| Ok(Vec::new()))
        .with_matcher(Target::lang(Lang::Java), |_| Ok(vec![Tpl::text(";").into()]))
}
