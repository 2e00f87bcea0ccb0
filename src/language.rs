//! Language Support - tree-sitter configuration for Java
//!
//! This module is the single place the tree-sitter grammar is wired up. Everything
//! downstream works on the lowered CST and never touches tree-sitter directly.

use anyhow::Result;
use tree_sitter::Parser;

/// Get the tree-sitter language for Java
pub fn java_language() -> tree_sitter::Language {
    tree_sitter_java::LANGUAGE.into()
}

/// Create a parser configured for Java
///
/// `Parser` is not `Sync`; callers create one per parse instead of sharing it.
pub fn java_parser() -> Result<Parser> {
    let mut parser = Parser::new();
    parser
        .set_language(&java_language())
        .map_err(|e| anyhow::anyhow!("Failed to set parser language for java: {}", e))?;
    Ok(parser)
}

/// Detect whether a file extension belongs to a Java source unit
pub fn is_java_extension(extension: &str) -> bool {
    matches!(extension, "java")
}
