//! The minimal statement set used where cross-target fidelity matters.

use crate::error::IrError;
use crate::node::{Content, Node};
use crate::{Assign, Block, Defer, For, If, Range, Return};

/// Assignment flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    /// `=`
    Assign,
    /// `:=`, a declaration with inferred type.
    Define,
}

pub(crate) struct AssignData {
    lhs: Vec<Node>,
    op: AssignOp,
    rhs: Vec<Node>,
}

impl Content for AssignData {
    fn children(&self) -> Vec<Node> {
        self.lhs.iter().chain(self.rhs.iter()).cloned().collect()
    }

    fn duplicate(&self) -> Self {
        Self {
            lhs: self.lhs.iter().map(Node::deep_copy).collect(),
            op: self.op,
            rhs: self.rhs.iter().map(Node::deep_copy).collect(),
        }
    }
}

impl Assign {
    pub fn new<L: Into<Node>, R: Into<Node>>(
        lhs: impl IntoIterator<Item = L>,
        op: AssignOp,
        rhs: impl IntoIterator<Item = R>,
    ) -> Result<Self, IrError> {
        let lhs: Vec<Node> = lhs.into_iter().map(Into::into).collect();
        let rhs: Vec<Node> = rhs.into_iter().map(Into::into).collect();
        let this = Self::from_data(AssignData {
            lhs: lhs.clone(),
            op,
            rhs: rhs.clone(),
        });
        this.as_node().attach_each(lhs.iter().chain(rhs.iter()))?;
        Ok(this)
    }

    pub fn lhs(&self) -> Vec<Node> {
        self.data().lhs.clone()
    }

    pub fn op(&self) -> AssignOp {
        self.data().op
    }

    pub fn rhs(&self) -> Vec<Node> {
        self.data().rhs.clone()
    }
}

pub(crate) struct IfData {
    init: Option<Node>,
    cond: Node,
    body: Block,
    otherwise: Option<Block>,
}

impl Content for IfData {
    fn children(&self) -> Vec<Node> {
        let mut children: Vec<Node> = self.init.iter().cloned().collect();
        children.push(self.cond.clone());
        children.push(self.body.as_node().clone());
        if let Some(otherwise) = &self.otherwise {
            children.push(otherwise.as_node().clone());
        }
        children
    }

    fn duplicate(&self) -> Self {
        Self {
            init: self.init.as_ref().map(Node::deep_copy),
            cond: self.cond.deep_copy(),
            body: self.body.duplicate(),
            otherwise: self.otherwise.as_ref().map(Block::duplicate),
        }
    }
}

impl If {
    /// `if cond { body }`
    pub fn new(cond: impl Into<Node>, body: Block) -> Result<Self, IrError> {
        let cond = cond.into();
        let this = Self::from_data(IfData {
            init: None,
            cond: cond.clone(),
            body: body.clone(),
            otherwise: None,
        });
        this.as_node().attach_each([&cond, body.as_node()])?;
        Ok(this)
    }

    /// An init statement evaluated before the condition.
    pub fn with_init(self, init: impl Into<Node>) -> Result<Self, IrError> {
        let init = init.into();
        self.as_node().attach(&init)?;
        self.data_mut().init = Some(init);
        Ok(self)
    }

    /// The else branch.
    pub fn with_else(self, otherwise: Block) -> Result<Self, IrError> {
        self.as_node().attach(otherwise.as_node())?;
        self.data_mut().otherwise = Some(otherwise);
        Ok(self)
    }

    pub fn init(&self) -> Option<Node> {
        self.data().init.clone()
    }

    pub fn cond(&self) -> Node {
        self.data().cond.clone()
    }

    pub fn body(&self) -> Block {
        self.data().body.clone()
    }

    pub fn otherwise(&self) -> Option<Block> {
        self.data().otherwise.clone()
    }
}

pub(crate) struct ForData {
    init: Option<Node>,
    cond: Option<Node>,
    post: Option<Node>,
    body: Block,
}

impl Content for ForData {
    fn children(&self) -> Vec<Node> {
        let mut children: Vec<Node> = [&self.init, &self.cond, &self.post]
            .into_iter()
            .flatten()
            .cloned()
            .collect();
        children.push(self.body.as_node().clone());
        children
    }

    fn duplicate(&self) -> Self {
        Self {
            init: self.init.as_ref().map(Node::deep_copy),
            cond: self.cond.as_ref().map(Node::deep_copy),
            post: self.post.as_ref().map(Node::deep_copy),
            body: self.body.duplicate(),
        }
    }
}

impl For {
    /// An endless loop; add clauses with the `with_*` methods.
    pub fn new(body: Block) -> Result<Self, IrError> {
        let this = Self::from_data(ForData {
            init: None,
            cond: None,
            post: None,
            body: body.clone(),
        });
        this.as_node().attach(body.as_node())?;
        Ok(this)
    }

    pub fn with_init(self, init: impl Into<Node>) -> Result<Self, IrError> {
        let init = init.into();
        self.as_node().attach(&init)?;
        self.data_mut().init = Some(init);
        Ok(self)
    }

    pub fn with_cond(self, cond: impl Into<Node>) -> Result<Self, IrError> {
        let cond = cond.into();
        self.as_node().attach(&cond)?;
        self.data_mut().cond = Some(cond);
        Ok(self)
    }

    pub fn with_post(self, post: impl Into<Node>) -> Result<Self, IrError> {
        let post = post.into();
        self.as_node().attach(&post)?;
        self.data_mut().post = Some(post);
        Ok(self)
    }

    pub fn init(&self) -> Option<Node> {
        self.data().init.clone()
    }

    pub fn cond(&self) -> Option<Node> {
        self.data().cond.clone()
    }

    pub fn post(&self) -> Option<Node> {
        self.data().post.clone()
    }

    pub fn body(&self) -> Block {
        self.data().body.clone()
    }
}

pub(crate) struct RangeData {
    key: Option<String>,
    value: Option<String>,
    expr: Node,
    body: Block,
}

impl Content for RangeData {
    fn children(&self) -> Vec<Node> {
        vec![self.expr.clone(), self.body.as_node().clone()]
    }

    fn duplicate(&self) -> Self {
        Self {
            key: self.key.clone(),
            value: self.value.clone(),
            expr: self.expr.deep_copy(),
            body: self.body.duplicate(),
        }
    }
}

impl Range {
    /// Iterate `expr`, binding the key and value variables when named.
    pub fn new(
        key: Option<&str>,
        value: Option<&str>,
        expr: impl Into<Node>,
        body: Block,
    ) -> Result<Self, IrError> {
        let expr = expr.into();
        let this = Self::from_data(RangeData {
            key: key.map(str::to_string),
            value: value.map(str::to_string),
            expr: expr.clone(),
            body: body.clone(),
        });
        this.as_node().attach_each([&expr, body.as_node()])?;
        Ok(this)
    }

    pub fn key(&self) -> Option<String> {
        self.data().key.clone()
    }

    pub fn value(&self) -> Option<String> {
        self.data().value.clone()
    }

    pub fn expr(&self) -> Node {
        self.data().expr.clone()
    }

    pub fn body(&self) -> Block {
        self.data().body.clone()
    }
}

pub(crate) struct DeferData {
    call: Node,
}

impl Content for DeferData {
    fn children(&self) -> Vec<Node> {
        vec![self.call.clone()]
    }

    fn duplicate(&self) -> Self {
        Self {
            call: self.call.deep_copy(),
        }
    }
}

impl Defer {
    pub fn new(call: impl Into<Node>) -> Result<Self, IrError> {
        let call = call.into();
        let this = Self::from_data(DeferData { call: call.clone() });
        this.as_node().attach(&call)?;
        Ok(this)
    }

    pub fn call(&self) -> Node {
        self.data().call.clone()
    }
}

pub(crate) struct ReturnData {
    results: Vec<Node>,
}

impl Content for ReturnData {
    fn children(&self) -> Vec<Node> {
        self.results.clone()
    }

    fn duplicate(&self) -> Self {
        Self {
            results: self.results.iter().map(Node::deep_copy).collect(),
        }
    }
}

impl Return {
    pub fn new<T: Into<Node>>(results: impl IntoIterator<Item = T>) -> Result<Self, IrError> {
        let results: Vec<Node> = results.into_iter().map(Into::into).collect();
        let this = Self::from_data(ReturnData {
            results: results.clone(),
        });
        this.as_node().attach_each(&results)?;
        Ok(this)
    }

    /// A bare `return`.
    pub fn empty() -> Self {
        Self::from_data(ReturnData {
            results: Vec::new(),
        })
    }

    pub fn results(&self) -> Vec<Node> {
        self.data().results.clone()
    }
}
