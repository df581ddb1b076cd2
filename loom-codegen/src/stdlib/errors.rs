//! Constructing and checking error cases.
//!
//! Error groups are lowered differently per target, and both macros here
//! must agree with that lowering. [`ErrorNames`] is the single source of
//! the Go names involved; in Java a case is the nested class
//! `<Group>.<Case>` of the group's exception class.

use loom_core::{Name, make_private, make_public};
use loom_ir::{
    BasicLit, Binary, Block, Call, CompositeLit, ErrorCase, ErrorGroup, Ident, If, IrError, Lang,
    Macro, Node, Selector, Target, Tpl, TypeDecl, Unary,
};

use super::{copies, enclosing_package};
use crate::naming::package_qualifier;

/// Go names derived from an error group and one of its cases.
///
/// For group `TicketError` and case `NotFound`:
///
/// | item | name |
/// |---|---|
/// | group interface | `TicketError` |
/// | group predicate | `Ticket()` |
/// | case interface | `TicketNotFoundError` |
/// | case predicate | `TicketNotFound()` |
/// | implementation | `ticketNotFoundError` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNames {
    group: String,
    case: String,
}

impl ErrorNames {
    pub fn new(group: impl Into<String>, case: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            case: case.into(),
        }
    }

    /// The names for `case` inside its group.
    pub fn of(group: &ErrorGroup, case: &ErrorCase) -> Self {
        Self::new(group.name(), case.name())
    }

    /// The group name without a trailing `Error`.
    pub fn base(&self) -> &str {
        match self.group.strip_suffix("Error") {
            Some(base) if !base.is_empty() => base,
            _ => &self.group,
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn case(&self) -> &str {
        &self.case
    }

    /// Predicate method implemented by every case of the group.
    pub fn group_predicate(&self) -> String {
        make_public(self.base())
    }

    /// Interface of the case.
    pub fn case_interface(&self) -> String {
        format!("{}{}Error", make_public(self.base()), self.case)
    }

    /// Predicate method implemented only by this case.
    pub fn case_predicate(&self) -> String {
        format!("{}{}", make_public(self.base()), self.case)
    }

    /// Private struct implementing the case interface.
    pub fn implementation(&self) -> String {
        format!("{}{}Error", make_private(self.base()), self.case)
    }
}

/// The strictness of a [`check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    /// The error belongs to the group and is the given case.
    Exact,
    /// The error belongs to the case's group, whichever case it is.
    Sum,
    /// The error is the given case.
    SingleCase,
}

impl CheckKind {
    /// Whether the group predicate is tested.
    pub fn checks_group(&self) -> bool {
        matches!(self, CheckKind::Exact | CheckKind::Sum)
    }

    /// Whether the case predicate is tested.
    pub fn checks_case(&self) -> bool {
        matches!(self, CheckKind::Exact | CheckKind::SingleCase)
    }
}

struct CaseRef {
    group: ErrorGroup,
    names: ErrorNames,
}

impl CaseRef {
    fn resolve(case: &ErrorCase) -> Result<Self, IrError> {
        let group = case.group().ok_or_else(|| IrError::Detached {
            node: case.describe(),
        })?;
        let names = ErrorNames::of(&group, case);
        Ok(Self { group, names })
    }

    /// `name` qualified with the package declaring the group.
    fn qualified(&self, lang: Lang, name: &str) -> Name {
        let qualifier = enclosing_package(self.group.as_node())
            .map(|pkg| package_qualifier(lang, &pkg.import_path()))
            .unwrap_or_default();
        Name::join(&qualifier, name)
    }
}

/// Construct an instance of `case` from positional arguments, one per
/// property in declaration order.
///
/// Fails with [`IrError::Arity`] unless the number of arguments matches
/// the number of properties.
pub fn make(case: &ErrorCase, args: impl IntoIterator<Item = Node>) -> Result<Macro, IrError> {
    let args: Vec<Node> = args.into_iter().collect();
    let expected = case.properties().len();
    if args.len() != expected {
        return Err(IrError::Arity {
            case: case.name(),
            expected,
            actual: args.len(),
        });
    }

    let (go_case, go_args) = (case.clone(), args.clone());
    let java_case = case.clone();
    Ok(Macro::new("errors::make")
        .with_matcher(Target::lang(Lang::Go), move |_| {
            let case = CaseRef::resolve(&go_case)?;
            let ty = case.qualified(Lang::Go, &case.names.implementation());
            let mut elements = copies(&go_args);
            elements.push(BasicLit::nil().into());
            let lit = CompositeLit::new(TypeDecl::Simple(ty), elements)?;
            Ok(vec![Unary::new("&", lit)?.into()])
        })
        .with_matcher(Target::lang(Lang::Java), move |_| {
            let case = CaseRef::resolve(&java_case)?;
            let ctor = Tpl::new()
                .push("new ")
                .push_use(case.qualified(Lang::Java, case.names.group()))
                .push(format!(".{}", case.names.case()));
            Ok(vec![Call::new(ctor, copies(&args))?.into()])
        }))
}

/// Run `body` if the error in variable `src` matches `case` with the given
/// strictness. Inside `body` the matched error is available as `dst`.
///
/// Predicates are chosen by role, see [`CheckKind`].
pub fn check(
    case: &ErrorCase,
    kind: CheckKind,
    src: impl Into<String>,
    dst: impl Into<String>,
    body: Block,
) -> Macro {
    let src = src.into();
    let dst = dst.into();
    let (go_case, go_src, go_dst, go_body) = (case.clone(), src.clone(), dst.clone(), body.clone());
    let java_case = case.clone();
    Macro::new("errors::check")
        .with_matcher(Target::lang(Lang::Go), move |_| {
            go_check(&go_case, kind, &go_src, &go_dst, &go_body)
        })
        .with_matcher(Target::lang(Lang::Java), move |_| {
            java_check(&java_case, kind, &src, &dst, &body)
        })
}

fn go_check(
    case: &ErrorCase,
    kind: CheckKind,
    src: &str,
    dst: &str,
    body: &Block,
) -> Result<Vec<Node>, IrError> {
    let case = CaseRef::resolve(case)?;
    let asserted = match kind {
        CheckKind::Sum => case.names.group().to_string(),
        CheckKind::Exact | CheckKind::SingleCase => case.names.case_interface(),
    };
    let init = Tpl::new()
        .push(format!("{dst}, ok := {src}.("))
        .push_type(TypeDecl::Simple(case.qualified(Lang::Go, &asserted)))
        .push(")");

    let mut predicates = Vec::new();
    if kind.checks_group() {
        predicates.push(case.names.group_predicate());
    }
    if kind.checks_case() {
        predicates.push(case.names.case_predicate());
    }
    let mut cond: Node = Ident::new("ok").into();
    for predicate in predicates {
        let call = Call::new(Selector::new(Ident::new(dst), predicate)?, Vec::<Node>::new())?;
        cond = Binary::new(cond, "&&", call)?.into();
    }

    let guard = If::new(cond, fresh_body(body, None)?)?.with_init(init)?;
    Ok(vec![guard.into()])
}

fn java_check(
    case: &ErrorCase,
    kind: CheckKind,
    src: &str,
    dst: &str,
    body: &Block,
) -> Result<Vec<Node>, IrError> {
    let case = CaseRef::resolve(case)?;
    let group = case.qualified(Lang::Java, case.names.group());
    let nested = format!(".{}", case.names.case());

    let mut cond = Tpl::new();
    if kind.checks_group() {
        cond = cond
            .push(format!("{src} instanceof "))
            .push_use(group.clone());
    }
    if kind == CheckKind::Exact {
        cond = cond.push(" && ");
    }
    if kind.checks_case() {
        cond = cond
            .push(format!("{src} instanceof "))
            .push_use(group.clone())
            .push(nested.clone());
    }

    let class = |tpl: Tpl| {
        let tpl = tpl.push_use(group.clone());
        if kind == CheckKind::Sum {
            tpl
        } else {
            tpl.push(nested.clone())
        }
    };
    let declaration = class(class(Tpl::new()).push(format!(" {dst} = (")))
        .push(format!(") {src};"));

    let guard = If::new(cond, fresh_body(body, Some(declaration.into()))?)?;
    Ok(vec![guard.into()])
}

/// A copy of `body`, optionally prefixed with one statement.
fn fresh_body(body: &Block, first: Option<Node>) -> Result<Block, IrError> {
    let block = match first {
        Some(first) => Block::new().add(first)?,
        None => Block::new(),
    };
    block.add_all(copies(&body.elements()))
}
