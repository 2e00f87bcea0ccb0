// Concrete syntax tree model
//
// - types.rs: arena, nodes, tokens, spans
// - builder.rs: CstBuilder for suppliers and hand-built trees
// - tree_methods.rs: NodeRef navigation and cycle-safe walks
// - lowering.rs: tree-sitter-java -> grammar-shaped CST
// - supplier.rs: TreeSupplier seam and the tree-sitter implementation

pub mod builder;
pub mod lowering;
pub mod supplier;
pub mod tree_methods;
pub mod types;

pub use builder::CstBuilder;
pub use supplier::{TreeSitterJavaSupplier, TreeSupplier};
pub use tree_methods::{ElementRef, NodeRef, Visit};
pub use types::{Cst, CstChild, CstElement, CstNode, NodeId, Point, Span, Token};
