//! Named types: structs, interfaces, enums and error groups, plus fields.

use loom_core::Name;

use crate::error::IrError;
use crate::node::{Content, Node, attach_all, nodes};
use crate::typedecl::{Annotation, TypeDecl, Visibility};
use crate::{
    BasicLit, Binary, Block, Call, Enum, ErrorGroup, Field, Func, Ident, If, Interface, Param,
    Return, Selector, Struct,
};

/// A package-scoped, uniquely named declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum NamedType {
    Struct(Struct),
    Interface(Interface),
    Enum(Enum),
    Error(ErrorGroup),
}

impl NamedType {
    pub fn as_node(&self) -> &Node {
        match self {
            NamedType::Struct(t) => t.as_node(),
            NamedType::Interface(t) => t.as_node(),
            NamedType::Enum(t) => t.as_node(),
            NamedType::Error(t) => t.as_node(),
        }
    }

    pub fn name(&self) -> String {
        match self {
            NamedType::Struct(t) => t.name(),
            NamedType::Interface(t) => t.name(),
            NamedType::Enum(t) => t.name(),
            NamedType::Error(t) => t.name(),
        }
    }

    pub fn visibility(&self) -> Visibility {
        match self {
            NamedType::Struct(t) => t.visibility(),
            NamedType::Interface(t) => t.visibility(),
            NamedType::Enum(t) => t.visibility(),
            NamedType::Error(t) => t.visibility(),
        }
    }

    pub fn annotations(&self) -> Vec<Annotation> {
        match self {
            NamedType::Struct(t) => t.annotations(),
            NamedType::Interface(t) => t.annotations(),
            NamedType::Enum(t) => t.annotations(),
            NamedType::Error(t) => t.annotations(),
        }
    }

    pub fn duplicate(&self) -> Self {
        match self {
            NamedType::Struct(t) => NamedType::Struct(t.duplicate()),
            NamedType::Interface(t) => NamedType::Interface(t.duplicate()),
            NamedType::Enum(t) => NamedType::Enum(t.duplicate()),
            NamedType::Error(t) => NamedType::Error(t.duplicate()),
        }
    }

    /// Recover the named type behind a node.
    pub fn from_node(node: &Node) -> Option<Self> {
        node.cast::<Struct>()
            .map(NamedType::Struct)
            .or_else(|| node.cast::<Interface>().map(NamedType::Interface))
            .or_else(|| node.cast::<Enum>().map(NamedType::Enum))
            .or_else(|| node.cast::<ErrorGroup>().map(NamedType::Error))
    }
}

impl From<Struct> for NamedType {
    fn from(value: Struct) -> Self {
        NamedType::Struct(value)
    }
}

impl From<Interface> for NamedType {
    fn from(value: Interface) -> Self {
        NamedType::Interface(value)
    }
}

impl From<Enum> for NamedType {
    fn from(value: Enum) -> Self {
        NamedType::Enum(value)
    }
}

impl From<ErrorGroup> for NamedType {
    fn from(value: ErrorGroup) -> Self {
        NamedType::Error(value)
    }
}

impl From<NamedType> for Node {
    fn from(value: NamedType) -> Self {
        value.as_node().clone()
    }
}

fn attach_types<T: Into<NamedType>>(
    parent: &Node,
    types: impl IntoIterator<Item = T>,
) -> Result<Vec<NamedType>, IrError> {
    let types: Vec<NamedType> = types.into_iter().map(Into::into).collect();
    parent.attach_each(types.iter().map(NamedType::as_node))?;
    Ok(types)
}

pub(crate) struct StructData {
    name: String,
    visibility: Visibility,
    fields: Vec<Field>,
    methods: Vec<Func>,
    types: Vec<NamedType>,
    annotations: Vec<Annotation>,
    implements: Vec<Name>,
    is_static: bool,
    is_final: bool,
}

impl Content for StructData {
    fn children(&self) -> Vec<Node> {
        let mut children = nodes(&self.fields);
        children.extend(nodes(&self.methods));
        children.extend(self.types.iter().map(|t| t.as_node().clone()));
        children
    }

    fn duplicate(&self) -> Self {
        Self {
            name: self.name.clone(),
            visibility: self.visibility,
            fields: self.fields.iter().map(Field::duplicate).collect(),
            methods: self.methods.iter().map(Func::duplicate).collect(),
            types: self.types.iter().map(NamedType::duplicate).collect(),
            annotations: self.annotations.clone(),
            implements: self.implements.clone(),
            is_static: self.is_static,
            is_final: self.is_final,
        }
    }

    fn label(&self) -> Option<String> {
        Some(self.name.clone())
    }
}

impl Struct {
    /// Create a public struct.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_data(StructData {
            name: name.into(),
            visibility: Visibility::Public,
            fields: Vec::new(),
            methods: Vec::new(),
            types: Vec::new(),
            annotations: Vec::new(),
            implements: Vec::new(),
            is_static: false,
            is_final: false,
        })
    }

    pub fn with_visibility(self, visibility: Visibility) -> Self {
        self.data_mut().visibility = visibility;
        self
    }

    /// Mark as `static`. Only class-based targets use this.
    pub fn with_static(self, is_static: bool) -> Self {
        self.data_mut().is_static = is_static;
        self
    }

    /// Mark as `final`. Only class-based targets use this.
    pub fn with_final(self, is_final: bool) -> Self {
        self.data_mut().is_final = is_final;
        self
    }

    /// Declare an implemented interface. Targets with structural typing
    /// ignore this.
    pub fn implements(self, iface: impl Into<Name>) -> Self {
        self.data_mut().implements.push(iface.into());
        self
    }

    pub fn add_annotations(self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.data_mut().annotations.extend(annotations);
        self
    }

    /// Attach and append fields in order.
    pub fn add_fields(self, fields: impl IntoIterator<Item = Field>) -> Result<Self, IrError> {
        let fields = attach_all(self.as_node(), fields)?;
        self.data_mut().fields.extend(fields);
        Ok(self)
    }

    /// Attach and append methods in order.
    pub fn add_methods(self, methods: impl IntoIterator<Item = Func>) -> Result<Self, IrError> {
        let methods = attach_all(self.as_node(), methods)?;
        self.data_mut().methods.extend(methods);
        Ok(self)
    }

    /// Attach and append nested types in order.
    pub fn add_types<T: Into<NamedType>>(
        self,
        types: impl IntoIterator<Item = T>,
    ) -> Result<Self, IrError> {
        let types = attach_types(self.as_node(), types)?;
        self.data_mut().types.extend(types);
        Ok(self)
    }

    pub fn name(&self) -> String {
        self.data().name.clone()
    }

    pub fn visibility(&self) -> Visibility {
        self.data().visibility
    }

    pub fn is_static(&self) -> bool {
        self.data().is_static
    }

    pub fn is_final(&self) -> bool {
        self.data().is_final
    }

    pub fn interfaces(&self) -> Vec<Name> {
        self.data().implements.clone()
    }

    pub fn annotations(&self) -> Vec<Annotation> {
        self.data().annotations.clone()
    }

    pub fn fields(&self) -> Vec<Field> {
        self.data().fields.clone()
    }

    pub fn methods(&self) -> Vec<Func> {
        self.data().methods.clone()
    }

    pub fn types(&self) -> Vec<NamedType> {
        self.data().types.clone()
    }
}

pub(crate) struct InterfaceData {
    name: String,
    visibility: Visibility,
    methods: Vec<Func>,
    types: Vec<NamedType>,
    annotations: Vec<Annotation>,
}

impl Content for InterfaceData {
    fn children(&self) -> Vec<Node> {
        let mut children = nodes(&self.methods);
        children.extend(self.types.iter().map(|t| t.as_node().clone()));
        children
    }

    fn duplicate(&self) -> Self {
        Self {
            name: self.name.clone(),
            visibility: self.visibility,
            methods: self.methods.iter().map(Func::duplicate).collect(),
            types: self.types.iter().map(NamedType::duplicate).collect(),
            annotations: self.annotations.clone(),
        }
    }

    fn label(&self) -> Option<String> {
        Some(self.name.clone())
    }
}

impl Interface {
    /// Create a public interface.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_data(InterfaceData {
            name: name.into(),
            visibility: Visibility::Public,
            methods: Vec::new(),
            types: Vec::new(),
            annotations: Vec::new(),
        })
    }

    pub fn with_visibility(self, visibility: Visibility) -> Self {
        self.data_mut().visibility = visibility;
        self
    }

    pub fn add_annotations(self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.data_mut().annotations.extend(annotations);
        self
    }

    /// Attach and append method signatures in order. Bodies are ignored.
    pub fn add_methods(self, methods: impl IntoIterator<Item = Func>) -> Result<Self, IrError> {
        let methods = attach_all(self.as_node(), methods)?;
        self.data_mut().methods.extend(methods);
        Ok(self)
    }

    /// Attach and append nested types in order.
    pub fn add_types<T: Into<NamedType>>(
        self,
        types: impl IntoIterator<Item = T>,
    ) -> Result<Self, IrError> {
        let types = attach_types(self.as_node(), types)?;
        self.data_mut().types.extend(types);
        Ok(self)
    }

    pub fn name(&self) -> String {
        self.data().name.clone()
    }

    pub fn visibility(&self) -> Visibility {
        self.data().visibility
    }

    pub fn annotations(&self) -> Vec<Annotation> {
        self.data().annotations.clone()
    }

    pub fn methods(&self) -> Vec<Func> {
        self.data().methods.clone()
    }

    pub fn types(&self) -> Vec<NamedType> {
        self.data().types.clone()
    }
}

/// Receiver of the methods generated by [`Interface::implement_mock`].
const MOCK_RECEIVER: &str = "m";

impl Interface {
    /// A struct `<Name>Impl` with a method for every method of this
    /// interface. Signatures are copied, bodies are left empty for the
    /// caller to fill in.
    pub fn implement(&self, ptr_receiver: bool) -> Result<Struct, IrError> {
        let name = self.name();
        let mut methods = Vec::new();
        for method in self.methods() {
            let params = method.params().iter().map(Param::duplicate).collect::<Vec<_>>();
            let stub = copy_signature(&method, params)?
                .with_ptr_receiver(ptr_receiver)
                .with_body(Block::new())?;
            methods.push(stub);
        }
        Struct::new(format!("{name}Impl"))
            .with_doc(derived_doc(
                format!("...is an implementation of {name}."),
                &name,
                self.doc(),
            ))
            .add_methods(methods)
    }

    /// A struct `<Name>Mock` with a `<Method>Func` field per method. Each
    /// method forwards to its field and panics while the field is nil.
    ///
    /// Unnamed parameters are named `p0`, `p1`, ... so they can be passed
    /// on. A variadic tail is passed as a slice. The bodies use Go's nil
    /// check and `panic`, so the mock is meant for Go targets.
    pub fn implement_mock(&self) -> Result<Struct, IrError> {
        let name = self.name();
        let mut fields = Vec::new();
        let mut methods = Vec::new();
        for method in self.methods() {
            let (field, forward) = mock_method(&method)?;
            fields.push(field);
            methods.push(forward);
        }
        Struct::new(format!("{name}Mock"))
            .with_doc(derived_doc(
                format!("...is a mock implementation of {name}."),
                &name,
                self.doc(),
            ))
            .add_fields(fields)?
            .add_methods(methods)
    }
}

/// `summary` followed by the interface doc. A leading `...` in the
/// interface doc refers to the interface, not to the derived struct.
fn derived_doc(summary: String, iface: &str, doc: Option<String>) -> String {
    let Some(doc) = doc.filter(|doc| !doc.trim().is_empty()) else {
        return summary;
    };
    match doc.trim().strip_prefix("...") {
        Some(rest) => format!("{summary}\n{iface} {}", rest.trim()),
        None => format!("{summary}\n{}", doc.trim()),
    }
}

/// A detached method with the name, doc, results and variadic flag of
/// `method` and the given parameters.
fn copy_signature(method: &Func, params: Vec<Param>) -> Result<Func, IrError> {
    let mut copy = Func::new(method.name())
        .with_visibility(method.visibility())
        .with_variadic(method.is_variadic())
        .add_annotations(method.annotations())
        .add_params(params)?
        .add_results(method.results().iter().map(Param::duplicate))?;
    if let Some(doc) = method.doc() {
        copy = copy.with_doc(doc);
    }
    Ok(copy)
}

fn mock_method(method: &Func) -> Result<(Field, Func), IrError> {
    let name = method.name();
    let field_name = format!("{name}Func");

    let params: Vec<Param> = method
        .params()
        .iter()
        .enumerate()
        .map(|(i, param)| {
            let ident = match param.name() {
                named if !named.is_empty() => named,
                _ => format!("p{i}"),
            };
            Param::new(ident, param.type_decl()).add_annotations(param.annotations())
        })
        .collect();

    let last = params.len().saturating_sub(1);
    let inputs = params.iter().enumerate().map(|(i, param)| {
        let decl = param.type_decl();
        let tail = method.is_variadic() && i == last;
        if tail && !matches!(decl, TypeDecl::Slice(_)) {
            TypeDecl::slice(decl)
        } else {
            decl
        }
    });
    let outputs = method.results().iter().map(Param::type_decl).collect::<Vec<_>>();
    let field = Field::new(&field_name, TypeDecl::func(inputs, outputs.clone()))
        .with_doc(format!("...mocks the {name} method."));

    let args: Vec<Ident> = params.iter().map(|p| Ident::new(p.name())).collect();
    let call = Call::new(Selector::new(Ident::new(MOCK_RECEIVER), &field_name)?, args)?;
    let forward = if outputs.is_empty() {
        Block::new().add(call)?.add(Return::empty())?
    } else {
        Block::new().add(Return::new([call])?)?
    };
    let guard = If::new(
        Binary::new(
            Selector::new(Ident::new(MOCK_RECEIVER), &field_name)?,
            "!=",
            BasicLit::nil(),
        )?,
        forward,
    )?;
    let unavailable = Call::new(
        Ident::new("panic"),
        [BasicLit::string(format!("mock not available: {name}"))],
    )?;
    let body = Block::new().add(guard)?.add(unavailable)?;

    let forwarder = copy_signature(method, params)?
        .with_receiver(MOCK_RECEIVER)
        .with_body(body)?;
    Ok((field, forwarder))
}

/// The primitive an enum is backed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumBase {
    Int,
    String,
}

/// One case of an [`Enum`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumCase {
    pub name: String,
    pub doc: Option<String>,
}

impl EnumCase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

pub(crate) struct EnumData {
    name: String,
    visibility: Visibility,
    base: EnumBase,
    cases: Vec<EnumCase>,
    annotations: Vec<Annotation>,
}

impl Content for EnumData {
    fn children(&self) -> Vec<Node> {
        Vec::new()
    }

    fn duplicate(&self) -> Self {
        Self {
            name: self.name.clone(),
            visibility: self.visibility,
            base: self.base,
            cases: self.cases.clone(),
            annotations: self.annotations.clone(),
        }
    }

    fn label(&self) -> Option<String> {
        Some(self.name.clone())
    }
}

impl Enum {
    /// Create a public enum with the given backing primitive.
    pub fn new(name: impl Into<String>, base: EnumBase) -> Self {
        Self::from_data(EnumData {
            name: name.into(),
            visibility: Visibility::Public,
            base,
            cases: Vec::new(),
            annotations: Vec::new(),
        })
    }

    pub fn with_visibility(self, visibility: Visibility) -> Self {
        self.data_mut().visibility = visibility;
        self
    }

    pub fn add_annotations(self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.data_mut().annotations.extend(annotations);
        self
    }

    /// Append cases in order. Integer enums number them from 1 so the zero
    /// value is never a valid case.
    pub fn add_cases<C: Into<EnumCase>>(self, cases: impl IntoIterator<Item = C>) -> Self {
        self.data_mut()
            .cases
            .extend(cases.into_iter().map(Into::into));
        self
    }

    pub fn name(&self) -> String {
        self.data().name.clone()
    }

    pub fn visibility(&self) -> Visibility {
        self.data().visibility
    }

    pub fn base(&self) -> EnumBase {
        self.data().base
    }

    pub fn annotations(&self) -> Vec<Annotation> {
        self.data().annotations.clone()
    }

    pub fn cases(&self) -> Vec<EnumCase> {
        self.data().cases.clone()
    }

    /// The ordinal of the named case, starting at 1.
    pub fn ordinal(&self, case: &str) -> Option<usize> {
        self.data()
            .cases
            .iter()
            .position(|c| c.name == case)
            .map(|idx| idx + 1)
    }

    /// The case label for an ordinal, if it is valid.
    pub fn case_label(&self, ordinal: usize) -> Option<String> {
        let data = self.data();
        ordinal
            .checked_sub(1)
            .and_then(|idx| data.cases.get(idx))
            .map(|c| c.name.clone())
    }

    /// True for ordinals `1..=cases.len()`.
    pub fn is_valid_ordinal(&self, ordinal: usize) -> bool {
        (1..=self.data().cases.len()).contains(&ordinal)
    }
}

impl From<&str> for EnumCase {
    fn from(value: &str) -> Self {
        EnumCase::new(value)
    }
}

impl From<String> for EnumCase {
    fn from(value: String) -> Self {
        EnumCase::new(value)
    }
}

pub(crate) struct FieldData {
    name: String,
    type_decl: TypeDecl,
    visibility: Visibility,
    annotations: Vec<Annotation>,
}

impl Content for FieldData {
    fn children(&self) -> Vec<Node> {
        Vec::new()
    }

    fn duplicate(&self) -> Self {
        Self {
            name: self.name.clone(),
            type_decl: self.type_decl.clone(),
            visibility: self.visibility,
            annotations: self.annotations.clone(),
        }
    }

    fn label(&self) -> Option<String> {
        Some(self.name.clone())
    }
}

impl Field {
    /// Create a public field.
    pub fn new(name: impl Into<String>, type_decl: impl Into<TypeDecl>) -> Self {
        Self::from_data(FieldData {
            name: name.into(),
            type_decl: type_decl.into(),
            visibility: Visibility::Public,
            annotations: Vec::new(),
        })
    }

    pub fn with_visibility(self, visibility: Visibility) -> Self {
        self.data_mut().visibility = visibility;
        self
    }

    pub fn add_annotations(self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.data_mut().annotations.extend(annotations);
        self
    }

    pub fn name(&self) -> String {
        self.data().name.clone()
    }

    pub fn type_decl(&self) -> TypeDecl {
        self.data().type_decl.clone()
    }

    pub fn visibility(&self) -> Visibility {
        self.data().visibility
    }

    pub fn annotations(&self) -> Vec<Annotation> {
        self.data().annotations.clone()
    }
}
