// CST data structures
//
// The tree is an arena: nodes refer to their children by `NodeId`, so a tree handed to
// us by a supplier may contain dangling ids or even cycles. Every consumer must treat
// lookups as fallible.

use serde::{Deserialize, Serialize};

/// Index of a node inside a [`Cst`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// 0-based row/column pair as reported by the parser
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub row: u32,
    pub column: u32,
}

impl Point {
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

/// Source span covered by a node or token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: Point,
    pub end: Point,
    pub start_byte: usize,
    pub end_byte: usize,
}

/// A terminal of the grammar
///
/// `token_type` follows the Java grammar's token vocabulary (`Identifier`, `StringLiteral`,
/// `Public`, `Implements`, `Semicolon`, `Star`, ...). `image` is the exact source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub token_type: String,
    pub image: String,
    pub span: Option<Span>,
}

impl Token {
    pub fn new(token_type: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            token_type: token_type.into(),
            image: image.into(),
            span: None,
        }
    }

    /// Attach a single-line position to a hand-built token
    pub fn at(mut self, row: u32, column: u32) -> Self {
        let width = self.image.chars().count() as u32;
        self.span = Some(Span {
            start: Point::new(row, column),
            end: Point::new(row, column + width),
            start_byte: 0,
            end_byte: 0,
        });
        self
    }

    pub fn is(&self, token_type: &str) -> bool {
        self.token_type == token_type
    }
}

/// Either a child production or a terminal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CstElement {
    Node(NodeId),
    Token(Token),
}

/// A keyed child entry; children keep document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CstChild {
    pub key: String,
    pub element: CstElement,
}

/// A grammar production instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CstNode {
    pub name: String,
    pub children: Vec<CstChild>,
    pub location: Option<Span>,
}

impl CstNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            location: None,
        }
    }
}

/// A concrete syntax tree for one source unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cst {
    pub(crate) nodes: Vec<CstNode>,
    pub(crate) root: Option<NodeId>,
}

impl Cst {
    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&CstNode> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
