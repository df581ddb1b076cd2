//! Printing.

use loom_ir::{BasicLit, Binary, Call, Ident, IrError, Lang, Macro, Node, Selector, Target};

use super::copies;

/// Print the arguments followed by a newline.
///
/// Go passes them to `fmt.Println`. Java concatenates them with single
/// spaces for `System.out.println`.
pub fn println(args: impl IntoIterator<Item = Node>) -> Macro {
    let args: Vec<Node> = args.into_iter().collect();
    let java_args = args.clone();
    Macro::new("fmt::println")
        .with_matcher(Target::lang(Lang::Go), move |ctx| {
            let println = ctx.import("fmt.Println");
            Ok(vec![Call::new(Ident::new(println), copies(&args))?.into()])
        })
        .with_matcher(Target::lang(Lang::Java), move |ctx| {
            let system = ctx.import("java.lang.System");
            let out = Selector::new(Ident::new(system), "out")?;
            let fun = Selector::new(out, "println")?;
            let args = match concat(copies(&java_args))? {
                Some(joined) => vec![joined],
                None => Vec::new(),
            };
            Ok(vec![Call::new(fun, args)?.into()])
        })
}

/// `a + " " + b + ...`
fn concat(args: Vec<Node>) -> Result<Option<Node>, IrError> {
    let mut args = args.into_iter();
    let Some(mut joined) = args.next() else {
        return Ok(None);
    };
    for arg in args {
        let spaced = Binary::new(joined, "+", BasicLit::string(" "))?;
        joined = Binary::new(spaced, "+", arg)?.into();
    }
    Ok(Some(joined))
}

#[cfg(test)]
mod tests {
    use loom_core::Name;
    use loom_ir::{MacroCtx, NameResolver};

    use super::*;

    struct Short;

    impl NameResolver for Short {
        fn stdlib(&self, name: &Name) -> Name {
            name.clone()
        }

        fn import(&mut self, name: &Name) -> String {
            name.identifier().to_string()
        }
    }

    #[test]
    fn test_java_println_concatenates() {
        let mac = println([Ident::new("a").into(), Ident::new("b").into()]);
        let target = Target::lang(Lang::Java);
        let mut resolver = Short;
        let mut ctx = MacroCtx::new(&target, &mut resolver);
        let nodes = mac.expand(&mut ctx).unwrap().unwrap().1;

        let call = nodes[0].cast::<Call>().unwrap();
        assert_eq!(call.args().len(), 1);
        let joined = call.args()[0].cast::<Binary>().unwrap();
        assert_eq!(joined.op(), "+");
        assert_eq!(joined.y().cast::<Ident>().unwrap().name(), "b");
    }

    #[test]
    fn test_go_println_passes_arguments() {
        let mac = println([Ident::new("a").into(), Ident::new("b").into()]);
        let target = Target::lang(Lang::Go);
        let mut resolver = Short;
        let mut ctx = MacroCtx::new(&target, &mut resolver);
        let nodes = mac.expand(&mut ctx).unwrap().unwrap().1;

        let call = nodes[0].cast::<Call>().unwrap();
        assert_eq!(call.args().len(), 2);
    }
}
