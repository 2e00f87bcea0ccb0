// CstBuilder - arena construction for suppliers and tests

use super::types::{Cst, CstChild, CstElement, CstNode, NodeId, Span, Token};

/// Incrementally builds a [`Cst`]
///
/// Nodes are allocated first and wired together afterwards, which is what lets the
/// lowering pass build bottom-up and what lets tests construct malformed shapes
/// (shared children, dangling ids, cycles).
#[derive(Debug, Default)]
pub struct CstBuilder {
    nodes: Vec<CstNode>,
}

impl CstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an empty node
    pub fn node(&mut self, name: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(CstNode::new(name));
        id
    }

    pub fn set_location(&mut self, id: NodeId, span: Span) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.location = Some(span);
        }
    }

    /// Append a child production under `key`
    ///
    /// `child` is not validated; a dangling or cyclic reference is stored as given.
    pub fn push_node(&mut self, parent: NodeId, key: &str, child: NodeId) -> &mut Self {
        if let Some(node) = self.nodes.get_mut(parent.0) {
            node.children.push(CstChild {
                key: key.to_string(),
                element: CstElement::Node(child),
            });
        }
        self
    }

    /// Append a token keyed by its own token type
    pub fn push_token(&mut self, parent: NodeId, token: Token) -> &mut Self {
        if let Some(node) = self.nodes.get_mut(parent.0) {
            node.children.push(CstChild {
                key: token.token_type.clone(),
                element: CstElement::Token(token),
            });
        }
        self
    }

    /// Shorthand for `push_token(parent, Token::new(token_type, image))`
    pub fn token(&mut self, parent: NodeId, token_type: &str, image: &str) -> &mut Self {
        self.push_token(parent, Token::new(token_type, image))
    }

    /// Allocate `name` and attach it to `parent` under the same key
    pub fn child(&mut self, parent: NodeId, name: &str) -> NodeId {
        let id = self.node(name);
        self.push_node(parent, name, id);
        id
    }

    pub fn finish(self, root: NodeId) -> Cst {
        Cst {
            nodes: self.nodes,
            root: Some(root),
        }
    }
}
