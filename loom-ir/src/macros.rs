//! Macros: deferred node producers dispatched on the render target.
//!
//! A macro is a list of matchers, each pairing a [`Target`] predicate with a
//! function. At render time the first matcher whose predicate matches the
//! active target runs; later matchers are never consulted. The function
//! receives an explicit [`MacroCtx`] instead of walking parent links.

use std::fmt;
use std::rc::Rc;

use loom_core::Name;

use crate::error::IrError;
use crate::func::default_receiver;
use crate::node::{Content, Node};
use crate::target::{Lang, Target};
use crate::types::NamedType;
use crate::{Func, Macro, SrcFile};

/// Name resolution offered by the renderer to macros.
pub trait NameResolver {
    /// Map a stdlib sentinel onto the target's qualified name. Other names
    /// are returned unchanged.
    fn stdlib(&self, name: &Name) -> Name;

    /// Register `name` with the current file's importer and return the
    /// local identifier to use in source text.
    fn import(&mut self, name: &Name) -> String;
}

/// Everything a macro may consult while producing nodes.
pub struct MacroCtx<'a> {
    target: &'a Target,
    func: Option<Func>,
    file: Option<SrcFile>,
    named_type: Option<NamedType>,
    resolver: &'a mut dyn NameResolver,
}

impl<'a> MacroCtx<'a> {
    pub fn new(target: &'a Target, resolver: &'a mut dyn NameResolver) -> Self {
        Self {
            target,
            func: None,
            file: None,
            named_type: None,
            resolver,
        }
    }

    /// Set the enclosing function.
    pub fn with_func(mut self, func: Option<Func>) -> Self {
        self.func = func;
        self
    }

    /// Set the enclosing file.
    pub fn with_file(mut self, file: Option<SrcFile>) -> Self {
        self.file = file;
        self
    }

    /// Set the enclosing named type.
    pub fn with_type(mut self, named_type: Option<NamedType>) -> Self {
        self.named_type = named_type;
        self
    }

    /// The active render target.
    pub fn target(&self) -> &Target {
        self.target
    }

    pub fn lang(&self) -> Option<Lang> {
        self.target.lang
    }

    pub fn func(&self) -> Option<&Func> {
        self.func.as_ref()
    }

    pub fn file(&self) -> Option<&SrcFile> {
        self.file.as_ref()
    }

    pub fn named_type(&self) -> Option<&NamedType> {
        self.named_type.as_ref()
    }

    /// See [`NameResolver::stdlib`].
    pub fn stdlib(&self, name: impl Into<Name>) -> Name {
        self.resolver.stdlib(&name.into())
    }

    /// See [`NameResolver::import`].
    pub fn import(&mut self, name: impl Into<Name>) -> String {
        self.resolver.import(&name.into())
    }

    /// The identifier that refers to the receiver inside the enclosing
    /// method: `this` for Java, otherwise the function's receiver name or
    /// one derived from the enclosing type.
    pub fn receiver_name(&self) -> Option<String> {
        let in_type = self.named_type.is_some()
            || self.func.as_ref().and_then(Func::owner).is_some();
        if self.lang() == Some(Lang::Java) {
            return in_type.then(|| "this".to_string());
        }
        self.func
            .as_ref()
            .and_then(Func::receiver_name)
            .or_else(|| self.named_type.as_ref().map(|t| default_receiver(&t.name())))
    }
}

type Produce = Rc<dyn Fn(&mut MacroCtx<'_>) -> Result<Vec<Node>, IrError>>;

/// A target predicate and the function to run when it matches.
#[derive(Clone)]
pub struct Matcher {
    target: Target,
    produce: Produce,
}

impl Matcher {
    pub fn new(
        target: Target,
        produce: impl Fn(&mut MacroCtx<'_>) -> Result<Vec<Node>, IrError> + 'static,
    ) -> Self {
        Self {
            target,
            produce: Rc::new(produce),
        }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

pub(crate) struct MacroData {
    name: String,
    matchers: Vec<Matcher>,
}

impl Content for MacroData {
    fn children(&self) -> Vec<Node> {
        Vec::new()
    }

    fn duplicate(&self) -> Self {
        Self {
            name: self.name.clone(),
            matchers: self.matchers.clone(),
        }
    }

    fn label(&self) -> Option<String> {
        Some(self.name.clone())
    }
}

impl Macro {
    /// Create a macro without matchers. The name shows up in diagnostics.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_data(MacroData {
            name: name.into(),
            matchers: Vec::new(),
        })
    }

    /// Register a matcher. Registration order is dispatch order.
    pub fn with_matcher(
        self,
        target: Target,
        produce: impl Fn(&mut MacroCtx<'_>) -> Result<Vec<Node>, IrError> + 'static,
    ) -> Self {
        self.data_mut()
            .matchers
            .push(Matcher::new(target, produce));
        self
    }

    pub fn name(&self) -> String {
        self.data().name.clone()
    }

    pub fn matchers(&self) -> Vec<Matcher> {
        self.data().matchers.clone()
    }

    /// The first matcher whose predicate matches `active`, with its index.
    pub fn select(&self, active: &Target) -> Option<(usize, Matcher)> {
        self.data()
            .matchers
            .iter()
            .enumerate()
            .find(|(_, m)| m.target.matches(active))
            .map(|(idx, m)| (idx, m.clone()))
    }

    /// Run the first matching producer and adopt its nodes.
    ///
    /// Returns `Ok(None)` if no matcher applies to the context's target.
    pub fn expand(&self, ctx: &mut MacroCtx<'_>) -> Result<Option<(usize, Vec<Node>)>, IrError> {
        let Some((idx, matcher)) = self.select(ctx.target()) else {
            return Ok(None);
        };
        let nodes = (matcher.produce)(ctx)?;
        for node in &nodes {
            self.adopt(node)?;
        }
        Ok(Some((idx, nodes)))
    }

    /// Attach an unattached node to this macro. A node already attached
    /// to this macro is accepted; one attached anywhere else is an error.
    pub fn adopt(&self, node: &Node) -> Result<(), IrError> {
        match node.parent() {
            None => self.as_node().attach(node),
            Some(parent) if parent.same(self.as_node()) => Ok(()),
            Some(parent) => Err(IrError::MacroAttachment {
                node: node.describe(),
                macro_node: self.describe(),
                parent: parent.describe(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::{Block, Ident, Struct, Tpl};

    struct Plain;

    impl NameResolver for Plain {
        fn stdlib(&self, name: &Name) -> Name {
            name.clone()
        }

        fn import(&mut self, name: &Name) -> String {
            name.identifier().to_string()
        }
    }

    #[test]
    fn test_first_match_wins() {
        let second_ran = Rc::new(Cell::new(false));
        let flag = second_ran.clone();
        let m = Macro::new("pick")
            .with_matcher(Target::lang(Lang::Go), |_| Ok(vec![Tpl::text("first").into()]))
            .with_matcher(Target::lang(Lang::Go), move |_| {
                flag.set(true);
                Ok(vec![Tpl::text("second").into()])
            });

        let target = Target::lang(Lang::Go);
        let mut resolver = Plain;
        let mut ctx = MacroCtx::new(&target, &mut resolver);
        let (idx, nodes) = m.expand(&mut ctx).unwrap().unwrap();

        assert_eq!(idx, 0);
        assert_eq!(nodes.len(), 1);
        assert!(!second_ran.get());
        assert_eq!(nodes[0].parent().unwrap(), *m.as_node());
    }

    #[test]
    fn test_no_match() {
        let m = Macro::new("go-only")
            .with_matcher(Target::lang(Lang::Go), |_| Ok(Vec::new()));
        let target = Target::lang(Lang::Java);
        let mut resolver = Plain;
        let mut ctx = MacroCtx::new(&target, &mut resolver);
        assert!(m.expand(&mut ctx).unwrap().is_none());
    }

    #[test]
    fn test_foreign_node_is_rejected() {
        let shared = Ident::new("x");
        let _owner = Block::new().add(shared.clone()).unwrap();
        let m = Macro::new("leaky")
            .with_matcher(Target::default(), move |_| Ok(vec![shared.as_node().clone()]));

        let target = Target::lang(Lang::Go);
        let mut resolver = Plain;
        let mut ctx = MacroCtx::new(&target, &mut resolver);
        let err = m.expand(&mut ctx).unwrap_err();
        assert!(matches!(err, IrError::MacroAttachment { .. }));
    }

    #[test]
    fn test_reexpanding_same_node_is_accepted() {
        let node = Ident::new("x");
        let m = Macro::new("stable")
            .with_matcher(Target::default(), move |_| Ok(vec![node.as_node().clone()]));

        let target = Target::lang(Lang::Go);
        let mut resolver = Plain;
        let mut ctx = MacroCtx::new(&target, &mut resolver);
        assert!(m.expand(&mut ctx).is_ok());
        assert!(m.expand(&mut ctx).is_ok());
    }

    #[test]
    fn test_receiver_name() {
        let sum = Func::new("Sum");
        let point = Struct::new("Point").add_methods([sum.clone()]).unwrap();

        let go = Target::lang(Lang::Go);
        let mut resolver = Plain;
        let ctx = MacroCtx::new(&go, &mut resolver).with_func(Some(sum.clone()));
        assert_eq!(ctx.receiver_name().as_deref(), Some("p"));

        let java = Target::lang(Lang::Java);
        let mut resolver = Plain;
        let ctx = MacroCtx::new(&java, &mut resolver).with_type(Some(point.into()));
        assert_eq!(ctx.receiver_name().as_deref(), Some("this"));

        let mut resolver = Plain;
        let ctx = MacroCtx::new(&go, &mut resolver);
        assert_eq!(ctx.receiver_name(), None);
    }
}
