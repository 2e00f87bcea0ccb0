// Tree supplier seam
//
// The extractors never parse; they consume a CST handed to them. `None` means the
// grammar parse failed and only the lexical extractors run.

use tracing::{debug, warn};

use crate::errors::ExtractionError;

use super::lowering::lower_program;
use super::types::Cst;

/// Produces a CST for one source unit
pub trait TreeSupplier: Send + Sync {
    fn supply(&self, source: &str) -> Option<Cst>;
}

/// Parses Java with tree-sitter and lowers the result into the grammar-shaped CST
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeSitterJavaSupplier;

impl TreeSitterJavaSupplier {
    pub fn new() -> Self {
        Self
    }
}

impl TreeSupplier for TreeSitterJavaSupplier {
    fn supply(&self, source: &str) -> Option<Cst> {
        // Parser is !Sync, so each call gets its own
        let mut parser = match crate::language::java_parser() {
            Ok(parser) => parser,
            Err(e) => {
                let error = ExtractionError::tree_navigation("Java parser setup failed")
                    .with_construct("program")
                    .with_source(e);
                warn!(error = ?error, "no syntax tree; falling back to text-only extraction");
                return None;
            }
        };

        let tree = parser.parse(source, None)?;
        let root = tree.root_node();
        if root.has_error() {
            debug!("Java source parsed with syntax errors; lowering partial tree");
        }
        Some(lower_program(root, source))
    }
}
