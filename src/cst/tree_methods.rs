// Tree navigation over the CST arena
//
// All navigation is total: dangling ids resolve to nothing, and every recursive walk
// keeps a visited set so a cyclic tree is walked once and terminates.

use std::collections::HashSet;
use std::ops::ControlFlow;

use super::types::{Cst, CstChild, CstElement, CstNode, NodeId, Token};

/// Borrowed handle to a node in a [`Cst`]
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    cst: &'a Cst,
    id: NodeId,
}

/// Borrowed child element
#[derive(Debug, Clone, Copy)]
pub enum ElementRef<'a> {
    Node(NodeRef<'a>),
    Token(&'a Token),
}

/// Event emitted by [`NodeRef::walk`]
#[derive(Debug, Clone, Copy)]
pub enum Visit<'a> {
    /// A node is entered (emitted once per node id)
    Enter(NodeRef<'a>),
    /// A token together with the node that directly holds it
    Token {
        token: &'a Token,
        parent: NodeRef<'a>,
    },
}

impl<'a> NodeRef<'a> {
    pub fn new(cst: &'a Cst, id: NodeId) -> Self {
        Self { cst, id }
    }

    /// Handle to the tree's root, if the tree declares one
    pub fn root(cst: &'a Cst) -> Option<Self> {
        cst.root_id().map(|id| Self::new(cst, id))
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn node(&self) -> Option<&'a CstNode> {
        self.cst.node(self.id)
    }

    /// False for dangling ids
    pub fn exists(&self) -> bool {
        self.node().is_some()
    }

    /// Production name; empty for dangling ids
    pub fn name(&self) -> &'a str {
        self.node().map(|n| n.name.as_str()).unwrap_or("")
    }

    pub fn is(&self, name: &str) -> bool {
        self.name() == name
    }

    fn raw_children(&self) -> &'a [CstChild] {
        self.node().map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Direct children with their keys, in document order
    pub fn elements(&self) -> impl Iterator<Item = (&'a str, ElementRef<'a>)> + 'a {
        let cst = self.cst;
        self.raw_children().iter().map(move |child| {
            let element = match &child.element {
                CstElement::Node(id) => ElementRef::Node(NodeRef::new(cst, *id)),
                CstElement::Token(token) => ElementRef::Token(token),
            };
            (child.key.as_str(), element)
        })
    }

    pub fn has_child(&self, key: &str) -> bool {
        self.raw_children().iter().any(|c| c.key == key)
    }

    /// Child productions under `key` that resolve to a node
    pub fn child_nodes(&self, key: &'a str) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        self.elements().filter_map(move |(k, e)| match e {
            ElementRef::Node(n) if k == key && n.exists() => Some(n),
            _ => None,
        })
    }

    /// First child production under `key`
    pub fn child_node(&self, key: &'a str) -> Option<NodeRef<'a>> {
        self.child_nodes(key).next()
    }

    /// Tokens directly under `key`
    pub fn tokens(&self, key: &'a str) -> impl Iterator<Item = &'a Token> + 'a {
        self.elements().filter_map(move |(k, e)| match e {
            ElementRef::Token(t) if k == key => Some(t),
            _ => None,
        })
    }

    pub fn token(&self, key: &'a str) -> Option<&'a Token> {
        self.tokens(key).next()
    }

    /// Follow the first child through each key in turn
    pub fn path(&self, keys: &[&'a str]) -> Option<NodeRef<'a>> {
        let mut current = *self;
        for key in keys {
            current = current.child_node(key)?;
        }
        Some(current)
    }

    /// Depth-first, document-order walk of this sub-tree
    ///
    /// Each node id is entered at most once, so shared or cyclic children are skipped
    /// on their second appearance. The callback may stop the walk early.
    pub fn walk<F>(&self, mut callback: F)
    where
        F: FnMut(Visit<'a>) -> ControlFlow<()>,
    {
        let Some(root) = self.node() else {
            return;
        };
        let mut visited: HashSet<NodeId> = HashSet::new();
        visited.insert(self.id);
        if callback(Visit::Enter(*self)).is_break() {
            return;
        }

        let mut frames: Vec<(NodeRef<'a>, &'a [CstChild], usize)> =
            vec![(*self, root.children.as_slice(), 0)];

        while let Some(frame) = frames.last_mut() {
            let (parent, children, index) = (frame.0, frame.1, frame.2);
            if index >= children.len() {
                frames.pop();
                continue;
            }
            frame.2 += 1;

            match &children[index].element {
                CstElement::Token(token) => {
                    if callback(Visit::Token { token, parent }).is_break() {
                        return;
                    }
                }
                CstElement::Node(id) => {
                    if !visited.insert(*id) {
                        continue;
                    }
                    let Some(node) = self.cst.node(*id) else {
                        continue;
                    };
                    let child = NodeRef::new(self.cst, *id);
                    if callback(Visit::Enter(child)).is_break() {
                        return;
                    }
                    frames.push((child, node.children.as_slice(), 0));
                }
            }
        }
    }

    /// All tokens of this sub-tree in document order
    pub fn collect_tokens(&self) -> Vec<&'a Token> {
        let mut tokens = Vec::new();
        self.walk(|visit| {
            if let Visit::Token { token, .. } = visit {
                tokens.push(token);
            }
            ControlFlow::Continue(())
        });
        tokens
    }

    /// First token (document order) satisfying `predicate`
    pub fn find_token<P>(&self, mut predicate: P) -> Option<&'a Token>
    where
        P: FnMut(&Token) -> bool,
    {
        let mut found = None;
        self.walk(|visit| match visit {
            Visit::Token { token, .. } if predicate(token) => {
                found = Some(token);
                ControlFlow::Break(())
            }
            _ => ControlFlow::Continue(()),
        });
        found
    }

    /// Source-like text of this sub-tree, tokens separated by single spaces
    pub fn text(&self) -> String {
        self.collect_tokens()
            .iter()
            .map(|t| t.image.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
