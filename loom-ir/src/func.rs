//! Functions, methods and their parameters.

use crate::error::IrError;
use crate::node::{Content, Node, attach_all, nodes};
use crate::typedecl::{Annotation, TypeDecl, Visibility};
use crate::types::NamedType;
use crate::{Block, Func, Param};

pub(crate) struct FuncData {
    name: String,
    visibility: Visibility,
    params: Vec<Param>,
    results: Vec<Param>,
    receiver: Option<String>,
    ptr_receiver: bool,
    is_static: bool,
    variadic: bool,
    body: Option<Block>,
    annotations: Vec<Annotation>,
}

impl Content for FuncData {
    fn children(&self) -> Vec<Node> {
        let mut children = nodes(&self.params);
        children.extend(nodes(&self.results));
        if let Some(body) = &self.body {
            children.push(body.as_node().clone());
        }
        children
    }

    fn duplicate(&self) -> Self {
        Self {
            name: self.name.clone(),
            visibility: self.visibility,
            params: self.params.iter().map(Param::duplicate).collect(),
            results: self.results.iter().map(Param::duplicate).collect(),
            receiver: self.receiver.clone(),
            ptr_receiver: self.ptr_receiver,
            is_static: self.is_static,
            variadic: self.variadic,
            body: self.body.as_ref().map(Block::duplicate),
            annotations: self.annotations.clone(),
        }
    }

    fn label(&self) -> Option<String> {
        Some(self.name.clone())
    }
}

impl Func {
    /// Create a public function without parameters, results or body.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_data(FuncData {
            name: name.into(),
            visibility: Visibility::Public,
            params: Vec::new(),
            results: Vec::new(),
            receiver: None,
            ptr_receiver: false,
            is_static: false,
            variadic: false,
            body: None,
            annotations: Vec::new(),
        })
    }

    pub fn with_visibility(self, visibility: Visibility) -> Self {
        self.data_mut().visibility = visibility;
        self
    }

    /// Name the receiver of a method. When unset, renderers derive one
    /// from the owning type.
    pub fn with_receiver(self, receiver: impl Into<String>) -> Self {
        self.data_mut().receiver = Some(receiver.into());
        self
    }

    /// Use reference instead of value semantics for the receiver.
    pub fn with_ptr_receiver(self, ptr_receiver: bool) -> Self {
        self.data_mut().ptr_receiver = ptr_receiver;
        self
    }

    pub fn with_static(self, is_static: bool) -> Self {
        self.data_mut().is_static = is_static;
        self
    }

    /// Mark the last parameter as variadic.
    pub fn with_variadic(self, variadic: bool) -> Self {
        self.data_mut().variadic = variadic;
        self
    }

    pub fn add_annotations(self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.data_mut().annotations.extend(annotations);
        self
    }

    /// Attach and append input parameters in order.
    pub fn add_params(self, params: impl IntoIterator<Item = Param>) -> Result<Self, IrError> {
        let params = attach_all(self.as_node(), params)?;
        self.data_mut().params.extend(params);
        Ok(self)
    }

    /// Attach and append results in order. A trailing `error!` result is
    /// the error channel.
    pub fn add_results(self, results: impl IntoIterator<Item = Param>) -> Result<Self, IrError> {
        let results = attach_all(self.as_node(), results)?;
        self.data_mut().results.extend(results);
        Ok(self)
    }

    /// Attach the body.
    pub fn with_body(self, body: Block) -> Result<Self, IrError> {
        self.as_node().attach(body.as_node())?;
        self.data_mut().body = Some(body);
        Ok(self)
    }

    pub fn name(&self) -> String {
        self.data().name.clone()
    }

    pub fn visibility(&self) -> Visibility {
        self.data().visibility
    }

    pub fn params(&self) -> Vec<Param> {
        self.data().params.clone()
    }

    pub fn results(&self) -> Vec<Param> {
        self.data().results.clone()
    }

    pub fn receiver(&self) -> Option<String> {
        self.data().receiver.clone()
    }

    pub fn is_ptr_receiver(&self) -> bool {
        self.data().ptr_receiver
    }

    pub fn is_static(&self) -> bool {
        self.data().is_static
    }

    pub fn is_variadic(&self) -> bool {
        self.data().variadic
    }

    pub fn body(&self) -> Option<Block> {
        self.data().body.clone()
    }

    pub fn annotations(&self) -> Vec<Annotation> {
        self.data().annotations.clone()
    }

    /// True if the last result is the `error!` sentinel.
    pub fn has_error_result(&self) -> bool {
        self.data()
            .results
            .last()
            .is_some_and(|r| r.type_decl().is_error())
    }

    /// The named type declaring this function as a method.
    pub fn owner(&self) -> Option<NamedType> {
        self.parent().and_then(|p| NamedType::from_node(&p))
    }

    /// The explicit receiver, or one derived from the owning type.
    pub fn receiver_name(&self) -> Option<String> {
        self.receiver()
            .or_else(|| self.owner().map(|owner| default_receiver(&owner.name())))
    }
}

/// The conventional receiver name for methods of `type_name`: its first
/// letter, lower-cased.
pub fn default_receiver(type_name: &str) -> String {
    type_name
        .chars()
        .next()
        .map(|c| c.to_lowercase().collect())
        .unwrap_or_else(|| "r".to_string())
}

pub(crate) struct ParamData {
    name: String,
    type_decl: TypeDecl,
    annotations: Vec<Annotation>,
}

impl Content for ParamData {
    fn children(&self) -> Vec<Node> {
        Vec::new()
    }

    fn duplicate(&self) -> Self {
        Self {
            name: self.name.clone(),
            type_decl: self.type_decl.clone(),
            annotations: self.annotations.clone(),
        }
    }

    fn label(&self) -> Option<String> {
        Some(self.name.clone())
    }
}

impl Param {
    pub fn new(name: impl Into<String>, type_decl: impl Into<TypeDecl>) -> Self {
        Self::from_data(ParamData {
            name: name.into(),
            type_decl: type_decl.into(),
            annotations: Vec::new(),
        })
    }

    /// A parameter without a name, typical for results.
    pub fn unnamed(type_decl: impl Into<TypeDecl>) -> Self {
        Self::new("", type_decl)
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

    pub fn annotations(&self) -> Vec<Annotation> {
        self.data().annotations.clone()
    }
}
