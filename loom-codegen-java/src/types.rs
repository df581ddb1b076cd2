//! Java type expressions.
//!
//! Java has no pointers, channels or function types. Pointers become
//! `AtomicReference`, channels `BlockingQueue`, and a function type is
//! replaced by `Object` behind a placeholder comment.

use loom_codegen::{RenderCx, RenderError};
use loom_core::Name;
use loom_ir::{Lang, Node, TypeBound, TypeDecl, stdlib};

use crate::stdlib::boxed;

/// Render `decl` as a Java type. Qualified names are resolved through the
/// importer of the file enclosing `at`.
pub fn type_expr(cx: &RenderCx, at: &Node, decl: &TypeDecl) -> Result<String, RenderError> {
    match decl {
        TypeDecl::Simple(name) => cx.qualify(at, name),
        TypeDecl::Pointer(inner) => generic(
            cx,
            at,
            "java.util.concurrent.atomic.AtomicReference",
            std::slice::from_ref(&**inner),
        ),
        TypeDecl::Slice(elem) | TypeDecl::Array { elem, .. } => {
            Ok(format!("{}[]", type_expr(cx, at, elem)?))
        }
        TypeDecl::Generic { base, params } => {
            let arity = match base.as_str() {
                stdlib::MAP => Some(2),
                stdlib::LIST => Some(1),
                _ => None,
            };
            if arity.is_some_and(|n| n != params.len()) {
                return Err(RenderError::Unsupported {
                    what: format!("{base} with {} type parameters", params.len()),
                    lang: Lang::Java,
                });
            }
            generic(cx, at, base.as_str(), params)
        }
        TypeDecl::NamedTypeParam { ident, bound, inner } => match (bound, inner) {
            (TypeBound::Extends, Some(inner)) => {
                Ok(format!("{ident} extends {}", type_arg(cx, at, inner)?))
            }
            (TypeBound::Super, Some(inner)) => {
                Ok(format!("{ident} super {}", type_arg(cx, at, inner)?))
            }
            _ => Ok(ident.clone()),
        },
        TypeDecl::Channel { elem, .. } => generic(
            cx,
            at,
            "java.util.concurrent.BlockingQueue",
            std::slice::from_ref(&**elem),
        ),
        TypeDecl::Func { .. } => {
            tracing::warn!(node = %at.describe(), "function types have no Java syntax");
            let object = cx.qualify(at, &Name::new("java.lang.Object"))?;
            Ok(format!("/* unsupported func type */ {object}"))
        }
    }
}

/// A type used as a type argument: primitives are boxed.
pub fn type_arg(cx: &RenderCx, at: &Node, decl: &TypeDecl) -> Result<String, RenderError> {
    let ty = type_expr(cx, at, decl)?;
    Ok(boxed(&ty).to_string())
}

fn generic(
    cx: &RenderCx,
    at: &Node,
    base: &str,
    params: &[TypeDecl],
) -> Result<String, RenderError> {
    let base = cx.qualify(at, &Name::new(base))?;
    let args = params
        .iter()
        .map(|p| type_arg(cx, at, p))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("{base}<{}>", args.join(", ")))
}

#[cfg(test)]
mod tests {
    use loom_codegen::RenderConfig;
    use loom_codegen::importer::ImportStyle;
    use loom_codegen::naming::package_qualifier;
    use loom_ir::{ChanDir, Field, Module, Package, SrcFile, Struct, Target};

    use super::*;
    use crate::stdlib::java_stdlib;

    fn render(decl: TypeDecl) -> (String, Vec<String>) {
        let field = Field::new("f", "int!");
        let module = Module::new(Target::lang(Lang::Java))
            .add_packages([Package::new("com/example/app")
                .add_files([SrcFile::new("main")
                    .add_types([Struct::new("S").add_fields([field.clone()]).unwrap()])
                    .unwrap()])
                .unwrap()])
            .unwrap();
        let mut cx = RenderCx::new(
            &module,
            Target::lang(Lang::Java),
            RenderConfig::default(),
            java_stdlib,
        );
        cx.tear_up(ImportStyle::Class, |pkg| {
            package_qualifier(Lang::Java, &pkg.import_path())
        });
        let text = type_expr(&cx, field.as_node(), &decl).unwrap();
        let imports = cx
            .importer(field.as_node())
            .unwrap()
            .borrow()
            .imports()
            .into_iter()
            .map(|i| i.path)
            .collect();
        (text, imports)
    }

    #[test]
    fn test_primitives_and_lang() {
        assert_eq!(render(TypeDecl::simple("int!")).0, "int");
        let (text, imports) = render(TypeDecl::simple("string!"));
        assert_eq!(text, "String");
        assert!(imports.is_empty());
    }

    #[test]
    fn test_collections_box_primitives() {
        let (text, imports) = render(TypeDecl::map(
            TypeDecl::simple("string!"),
            TypeDecl::list(TypeDecl::simple("int64!")),
        ));
        assert_eq!(text, "Map<String, List<Long>>");
        assert_eq!(imports, vec!["java.util.List", "java.util.Map"]);
    }

    #[test]
    fn test_arrays_pointers_and_channels() {
        assert_eq!(render(TypeDecl::slice(TypeDecl::simple("byte!"))).0, "byte[]");
        assert_eq!(render(TypeDecl::array(3, TypeDecl::simple("int!"))).0, "int[]");
        assert_eq!(
            render(TypeDecl::pointer(TypeDecl::simple("int!"))).0,
            "AtomicReference<Integer>"
        );
        assert_eq!(
            render(TypeDecl::chan(TypeDecl::simple("string!"), ChanDir::Recv)).0,
            "BlockingQueue<String>"
        );
    }

    #[test]
    fn test_type_params() {
        assert_eq!(render(TypeDecl::param("T")).0, "T");
        assert_eq!(
            render(TypeDecl::bounded_param(
                "T",
                TypeBound::Extends,
                TypeDecl::simple("java.lang.Number")
            ))
            .0,
            "T extends Number"
        );
    }

    #[test]
    fn test_func_type_placeholder() {
        let (text, _) = render(TypeDecl::func(Vec::new(), Vec::new()));
        assert_eq!(text, "/* unsupported func type */ Object");
    }

    #[test]
    fn test_own_package_is_not_imported() {
        let (text, imports) = render(TypeDecl::simple("com.example.app.Point"));
        assert_eq!(text, "Point");
        assert!(imports.is_empty());
    }
}
