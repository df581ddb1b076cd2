//! Go type expressions.

use loom_codegen::{RenderCx, RenderError};
use loom_ir::{ChanDir, Lang, Node, TypeBound, TypeDecl, stdlib};

/// Render `decl` as a Go type expression. Qualified names are resolved
/// through the importer of the file enclosing `at`.
pub fn type_expr(cx: &RenderCx, at: &Node, decl: &TypeDecl) -> Result<String, RenderError> {
    match decl {
        TypeDecl::Simple(name) => cx.qualify(at, name),
        TypeDecl::Pointer(inner) => Ok(format!("*{}", type_expr(cx, at, inner)?)),
        TypeDecl::Slice(elem) => Ok(format!("[]{}", type_expr(cx, at, elem)?)),
        TypeDecl::Array { len, elem } => Ok(format!("[{len}]{}", type_expr(cx, at, elem)?)),
        TypeDecl::Generic { base, params } => match (base.as_str(), params.as_slice()) {
            (stdlib::MAP, [key, value]) => Ok(format!(
                "map[{}]{}",
                type_expr(cx, at, key)?,
                type_expr(cx, at, value)?
            )),
            (stdlib::LIST, [elem]) => Ok(format!("[]{}", type_expr(cx, at, elem)?)),
            (stdlib::MAP | stdlib::LIST, _) => Err(RenderError::Unsupported {
                what: format!("{base} with {} type parameters", params.len()),
                lang: Lang::Go,
            }),
            _ => Ok(format!(
                "{}[{}]",
                cx.qualify(at, base)?,
                type_list(cx, at, params)?
            )),
        },
        TypeDecl::NamedTypeParam { ident, bound, .. } => match bound {
            TypeBound::None => Ok(ident.clone()),
            TypeBound::Extends | TypeBound::Super => Err(RenderError::Unsupported {
                what: format!("bounded type parameter '{ident}'"),
                lang: Lang::Go,
            }),
        },
        TypeDecl::Channel { elem, dir } => {
            let elem = type_expr(cx, at, elem)?;
            Ok(match dir {
                ChanDir::Both => format!("chan {elem}"),
                ChanDir::Send => format!("chan<- {elem}"),
                ChanDir::Recv => format!("<-chan {elem}"),
            })
        }
        TypeDecl::Func { inputs, outputs } => {
            let mut out = format!("func({})", type_list(cx, at, inputs)?);
            match outputs.as_slice() {
                [] => {}
                [single] => {
                    out.push(' ');
                    out.push_str(&type_expr(cx, at, single)?);
                }
                many => {
                    out.push_str(&format!(" ({})", type_list(cx, at, many)?));
                }
            }
            Ok(out)
        }
    }
}

/// Comma separated type expressions.
pub fn type_list(cx: &RenderCx, at: &Node, decls: &[TypeDecl]) -> Result<String, RenderError> {
    let rendered = decls
        .iter()
        .map(|d| type_expr(cx, at, d))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rendered.join(", "))
}
