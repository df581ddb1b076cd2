//! Sum-type error modeling: a closed group of error cases.

use crate::error::IrError;
use crate::node::{Content, Node, attach_all, nodes};
use crate::typedecl::{Annotation, TypeDecl, Visibility};
use crate::{ErrorCase, ErrorGroup};

/// A named, typed value carried by an [`ErrorCase`].
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub type_decl: TypeDecl,
    pub doc: Option<String>,
}

impl Property {
    pub fn new(name: impl Into<String>, type_decl: impl Into<TypeDecl>) -> Self {
        Self {
            name: name.into(),
            type_decl: type_decl.into(),
            doc: None,
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

pub(crate) struct ErrorGroupData {
    name: String,
    visibility: Visibility,
    cases: Vec<ErrorCase>,
    annotations: Vec<Annotation>,
}

impl Content for ErrorGroupData {
    fn children(&self) -> Vec<Node> {
        nodes(&self.cases)
    }

    fn duplicate(&self) -> Self {
        Self {
            name: self.name.clone(),
            visibility: self.visibility,
            cases: self.cases.iter().map(ErrorCase::duplicate).collect(),
            annotations: self.annotations.clone(),
        }
    }

    fn label(&self) -> Option<String> {
        Some(self.name.clone())
    }
}

impl ErrorGroup {
    /// Create a group. By convention the name ends in `Error`, e.g.
    /// `TicketError`.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_data(ErrorGroupData {
            name: name.into(),
            visibility: Visibility::Public,
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

    /// Attach and append cases in order.
    pub fn add_cases(self, cases: impl IntoIterator<Item = ErrorCase>) -> Result<Self, IrError> {
        let cases = attach_all(self.as_node(), cases)?;
        self.data_mut().cases.extend(cases);
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

    pub fn cases(&self) -> Vec<ErrorCase> {
        self.data().cases.clone()
    }
}

pub(crate) struct ErrorCaseData {
    name: String,
    properties: Vec<Property>,
}

impl Content for ErrorCaseData {
    fn children(&self) -> Vec<Node> {
        Vec::new()
    }

    fn duplicate(&self) -> Self {
        Self {
            name: self.name.clone(),
            properties: self.properties.clone(),
        }
    }

    fn label(&self) -> Option<String> {
        Some(self.name.clone())
    }
}

impl ErrorCase {
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_data(ErrorCaseData {
            name: name.into(),
            properties: Vec::new(),
        })
    }

    /// Append properties in order. This order is the positional order of
    /// constructor arguments.
    pub fn add_properties(self, properties: impl IntoIterator<Item = Property>) -> Self {
        self.data_mut().properties.extend(properties);
        self
    }

    pub fn name(&self) -> String {
        self.data().name.clone()
    }

    pub fn properties(&self) -> Vec<Property> {
        self.data().properties.clone()
    }

    /// The group this case belongs to, once attached.
    pub fn group(&self) -> Option<ErrorGroup> {
        self.parent().and_then(|p| p.cast())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_knows_its_group() {
        let not_found = ErrorCase::new("NotFound")
            .add_properties([Property::new("id", "int64!"), Property::new("name", "string!")]);
        let group = ErrorGroup::new("TicketError")
            .add_cases([not_found.clone()])
            .unwrap();

        assert_eq!(not_found.group().unwrap(), group);
        assert_eq!(not_found.properties()[1].name, "name");
    }

    #[test]
    fn test_unattached_case_has_no_group() {
        assert!(ErrorCase::new("Orphan").group().is_none());
    }
}
