//! Render-pass state and the macro engine.

use std::cell::RefCell;
use std::rc::Rc;

use loom_core::Name;
use loom_ir::{
    Comment, Macro, MacroCtx, Module, NameResolver, NamedType, Node, NodeKind, Package, SrcFile,
    Target,
};

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::importer::{ImportStyle, Importer};
use crate::tree::{Tree, TreeId};

/// Payload key of the per-file importer.
pub const IMPORTER: &str = "importer";

/// Maps stdlib sentinels onto a target's qualified names.
pub type StdlibMapper = fn(&Name) -> Name;

/// State shared by all render functions of one pass.
///
/// Owns the render-time [`Tree`] of the module. Importers live in the
/// tree's payload, one per source file, between [`RenderCx::tear_up`] and
/// [`RenderCx::tear_down`].
pub struct RenderCx {
    tree: Tree,
    target: Target,
    config: RenderConfig,
    stdlib: StdlibMapper,
}

impl RenderCx {
    pub fn new(module: &Module, target: Target, config: RenderConfig, stdlib: StdlibMapper) -> Self {
        Self {
            tree: Tree::new(module),
            target,
            config,
            stdlib,
        }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The active render target.
    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Attach a fresh importer to every source file. `own_qualifier`
    /// names the qualifier of the file's package.
    pub fn tear_up(&mut self, style: ImportStyle, own_qualifier: impl Fn(&Package) -> String) -> usize {
        let files = self.tree.ids_of_kind(NodeKind::SrcFile);
        for id in &files {
            let qualifier = self
                .tree
                .parent_as::<Package>(*id)
                .map(|pkg| own_qualifier(&pkg))
                .unwrap_or_default();
            self.tree
                .set_value(*id, IMPORTER, RefCell::new(Importer::new(style, qualifier)));
        }
        tracing::trace!(files = files.len(), "importers attached");
        files.len()
    }

    /// Detach all importers. Fails if a source file lost its importer
    /// during the pass; the remaining ones are still removed.
    pub fn tear_down(&mut self) -> Result<(), RenderError> {
        let mut missing = None;
        for id in self.tree.ids_of_kind(NodeKind::SrcFile) {
            if !self.tree.remove_value(id, IMPORTER) {
                missing.get_or_insert_with(|| self.tree.node(id).describe());
            }
        }
        match missing {
            Some(node) => Err(RenderError::MissingImporter { node }),
            None => Ok(()),
        }
    }

    /// The tree entry of `node`.
    pub fn entry(&self, node: &Node) -> Result<TreeId, RenderError> {
        self.tree.lookup(node).ok_or_else(|| RenderError::Detached {
            node: node.describe(),
        })
    }

    /// Mirror a node synthesized by a renderer below `parent`, so that
    /// it resolves names through the enclosing file's importer.
    pub fn graft(&mut self, parent: &Node, node: impl Into<Node>) -> Result<TreeId, RenderError> {
        let parent = self.entry(parent)?;
        Ok(self.tree.insert(parent, node))
    }

    /// The importer of the file enclosing `at`.
    pub fn importer(&self, at: &Node) -> Result<Rc<RefCell<Importer>>, RenderError> {
        let id = self.entry(at)?;
        self.tree
            .find_value::<RefCell<Importer>>(id, IMPORTER)
            .ok_or_else(|| RenderError::MissingImporter { node: at.describe() })
    }

    /// Map a stdlib sentinel onto the target's name.
    pub fn stdlib(&self, name: &Name) -> Name {
        (self.stdlib)(name)
    }

    /// The local name of `name` inside the file enclosing `at`.
    pub fn qualify(&self, at: &Node, name: &Name) -> Result<String, RenderError> {
        let name = self.stdlib(name);
        let importer = self.importer(at)?;
        let local = importer.borrow_mut().shortify(&name);
        Ok(local)
    }

    /// Expand a macro in its render context.
    ///
    /// The first matcher for the active target produces the nodes, which
    /// are mirrored below the macro so nested macros find the same
    /// enclosing function and file. Without a matching target the result is
    /// a single placeholder comment.
    pub fn expand(&mut self, mac: &Macro) -> Result<Vec<Node>, RenderError> {
        let id = self.entry(mac.as_node())?;
        let importer = self.importer(mac.as_node())?;
        let expanded = {
            let mut resolver = FileResolver {
                importer: &importer,
                stdlib: self.stdlib,
            };
            let mut ctx = MacroCtx::new(&self.target, &mut resolver)
                .with_func(self.tree.parent_as(id))
                .with_file(self.tree.parent_as::<SrcFile>(id))
                .with_type(self.tree.find_ancestor(id, NamedType::from_node));
            mac.expand(&mut ctx)?
        };

        let nodes = match expanded {
            Some((matcher, nodes)) => {
                tracing::debug!(
                    name = %mac.name(),
                    matcher,
                    produced = nodes.len(),
                    "macro expanded"
                );
                nodes
            }
            None => {
                tracing::warn!(name = %mac.name(), target = ?self.target, "no macro match found");
                let placeholder = Comment::new(format!("no macro match found: {}", mac.name()));
                mac.adopt(&placeholder)?;
                vec![placeholder.into()]
            }
        };
        for node in &nodes {
            self.tree.insert(id, node.clone());
        }
        Ok(nodes)
    }
}

/// Name resolution for macros, backed by one file's importer.
struct FileResolver<'a> {
    importer: &'a RefCell<Importer>,
    stdlib: StdlibMapper,
}

impl NameResolver for FileResolver<'_> {
    fn stdlib(&self, name: &Name) -> Name {
        (self.stdlib)(name)
    }

    fn import(&mut self, name: &Name) -> String {
        let name = (self.stdlib)(name);
        self.importer.borrow_mut().shortify(&name)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use loom_ir::{Block, Func, Lang, Os, Tpl};

    use super::*;

    fn identity(name: &Name) -> Name {
        name.clone()
    }

    fn module_with(body: Block) -> Module {
        Module::new(Target::lang(Lang::Go))
            .add_packages([Package::new("example.com/m").add_files([SrcFile::new("main")
                .add_funcs([Func::new("Run").with_body(body).unwrap()])
                .unwrap()])
            .unwrap()])
            .unwrap()
    }

    fn cx_for(module: &Module, target: Target) -> RenderCx {
        let mut cx = RenderCx::new(module, target, RenderConfig::default(), identity);
        cx.tear_up(ImportStyle::Alias, |pkg| pkg.import_path());
        cx
    }

    #[test]
    fn test_first_match_wins_and_sees_context() {
        let second = Rc::new(Cell::new(false));
        let flag = second.clone();
        let mac = Macro::new("hello")
            .with_matcher(Target::lang(Lang::Go), |ctx| {
                let func = ctx.func().map(|f| f.name()).unwrap_or_default();
                let println = ctx.import("fmt.Println");
                Ok(vec![Tpl::text(format!("{println}(\"{func}\")")).into()])
            })
            .with_matcher(Target::lang(Lang::Go), move |_| {
                flag.set(true);
                Ok(vec![])
            });
        let module = module_with(Block::new().add(mac.clone()).unwrap());
        let mut cx = cx_for(&module, Target::lang(Lang::Go).with_os(Os::Linux));

        let nodes = cx.expand(&mac).unwrap();
        assert_eq!(nodes.len(), 1);
        let tpl = nodes[0].cast::<Tpl>().unwrap();
        assert_eq!(
            tpl.parts(),
            vec![loom_ir::TplPart::Text("fmt.Println(\"Run\")".to_string())]
        );
        assert!(!second.get());

        let file = module.packages()[0].files()[0].clone();
        let importer = cx.importer(file.as_node()).unwrap();
        assert_eq!(importer.borrow().imports().len(), 1);
    }

    #[test]
    fn test_miss_yields_placeholder() {
        let mac = Macro::new("java_only")
            .with_matcher(Target::lang(Lang::Java), |_| Ok(vec![Tpl::text("x").into()]));
        let module = module_with(Block::new().add(mac.clone()).unwrap());
        let mut cx = cx_for(&module, Target::lang(Lang::Go));

        let nodes = cx.expand(&mac).unwrap();
        let comment = nodes[0].cast::<Comment>().unwrap();
        assert_eq!(comment.text(), "no macro match found: java_only");
    }

    #[test]
    fn test_nested_macro_finds_enclosing_func() {
        let inner = Macro::new("inner").with_matcher(Target::lang(Lang::Go), |ctx| {
            let name = ctx.func().map(|f| f.name()).unwrap_or_default();
            Ok(vec![Tpl::text(name).into()])
        });
        let captured = inner.clone();
        let outer = Macro::new("outer").with_matcher(Target::lang(Lang::Go), move |_| {
            Ok(vec![captured.duplicate().into()])
        });
        let module = module_with(Block::new().add(outer.clone()).unwrap());
        let mut cx = cx_for(&module, Target::lang(Lang::Go));

        let produced = cx.expand(&outer).unwrap();
        let nested = produced[0].cast::<Macro>().unwrap();
        let nodes = cx.expand(&nested).unwrap();
        let tpl = nodes[0].cast::<Tpl>().unwrap();
        assert_eq!(tpl.parts(), vec![loom_ir::TplPart::Text("Run".to_string())]);
    }

    #[test]
    fn test_grafted_node_uses_file_importer() {
        let module = module_with(Block::new());
        let mut cx = cx_for(&module, Target::lang(Lang::Go));
        let file = module.packages()[0].files()[0].clone();
        let run = file.funcs()[0].clone();

        let synthesized = Tpl::text("strings.Join(parts, sep)");
        cx.graft(run.as_node(), synthesized.clone()).unwrap();
        let local = cx
            .qualify(synthesized.as_node(), &Name::new("strings.Join"))
            .unwrap();
        assert_eq!(local, "strings.Join");
        let importer = cx.importer(file.as_node()).unwrap();
        assert_eq!(importer.borrow().imports()[0].path, "strings");

        let stray = Block::new();
        assert!(matches!(
            cx.graft(stray.as_node(), Tpl::text("x")),
            Err(RenderError::Detached { .. })
        ));
    }

    #[test]
    fn test_tear_down_removes_importers() {
        let module = module_with(Block::new());
        let mut cx = cx_for(&module, Target::lang(Lang::Go));
        let file = module.packages()[0].files()[0].clone();
        assert!(cx.importer(file.as_node()).is_ok());

        cx.tear_down().unwrap();
        assert!(matches!(
            cx.importer(file.as_node()),
            Err(RenderError::MissingImporter { .. })
        ));
        assert!(matches!(
            cx.tear_down(),
            Err(RenderError::MissingImporter { .. })
        ));
    }

    #[test]
    fn test_detached_node() {
        let module = module_with(Block::new());
        let cx = cx_for(&module, Target::lang(Lang::Go));
        let stray = Block::new();
        assert!(matches!(
            cx.importer(stray.as_node()),
            Err(RenderError::Detached { .. })
        ));
    }
}
