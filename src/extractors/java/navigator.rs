/// Package, import and type-declaration discovery from the compilation unit
use crate::cst::NodeRef;
use crate::errors::{recover, ExtractionError, Result};
use crate::extractors::java::JavaExtractor;

use super::shapes::ImportShape;

/// `ordinaryCompilationUnit` for either root shape
fn compilation_unit(root: NodeRef<'_>) -> Result<NodeRef<'_>> {
    match root.name() {
        "compilationUnit" => Ok(root.child_node("ordinaryCompilationUnit").unwrap_or(root)),
        "ordinaryCompilationUnit" => Ok(root),
        other => Err(ExtractionError::tree_navigation(format!(
            "expected a compilation unit, found '{}'",
            other
        ))
        .with_construct("compilationUnit")),
    }
}

pub(super) fn extract_package_name(
    extractor: &JavaExtractor,
    root: Option<NodeRef<'_>>,
) -> Option<String> {
    let snippet = extractor.base().node_snippet(root);
    recover("extract_package_name", &snippet, || {
        let Some(root) = root else {
            return Ok(None);
        };
        let unit = compilation_unit(root)?;
        let Some(package) = unit.child_node("packageDeclaration") else {
            return Ok(None);
        };
        let parts: Vec<&str> = package
            .tokens("Identifier")
            .map(|t| t.image.as_str())
            .collect();
        if parts.is_empty() {
            return Ok(None);
        }
        Ok(Some(parts.join(".")))
    })
}

pub(super) fn extract_imports(extractor: &JavaExtractor, root: Option<NodeRef<'_>>) -> Vec<String> {
    let snippet = extractor.base().node_snippet(root);
    recover("extract_imports", &snippet, || {
        let Some(root) = root else {
            return Ok(Vec::new());
        };
        let unit = compilation_unit(root)?;
        Ok(unit
            .child_nodes("importDeclaration")
            .filter_map(import_path)
            .collect())
    })
}

fn import_path(import: NodeRef<'_>) -> Option<String> {
    let path = match ImportShape::of(import) {
        ImportShape::Structured {
            identifiers,
            wildcard,
        } => {
            let mut path = identifiers
                .iter()
                .map(|t| t.image.as_str())
                .collect::<Vec<_>>()
                .join(".");
            if wildcard {
                path.push_str(".*");
            }
            path
        }
        ImportShape::Unstructured(node) => {
            let mut path = String::new();
            for token in node.collect_tokens() {
                match token.token_type.as_str() {
                    "Import" | "Static" | "Semicolon" => {}
                    "Star" => {
                        if !path.is_empty() && !path.ends_with('.') {
                            path.push('.');
                        }
                        path.push('*');
                    }
                    _ => path.push_str(&token.image),
                }
            }
            path
        }
    };
    (!path.is_empty()).then_some(path)
}

/// `classDeclaration` nodes under the unit's type declarations
pub(super) fn extract_class_declarations<'a>(
    extractor: &JavaExtractor,
    root: Option<NodeRef<'a>>,
) -> Vec<NodeRef<'a>> {
    let snippet = extractor.base().node_snippet(root);
    recover("extract_class_declarations", &snippet, || {
        let Some(root) = root else {
            return Ok(Vec::new());
        };
        let unit = compilation_unit(root)?;
        Ok(unit
            .child_nodes("typeDeclaration")
            .filter_map(|t| t.child_node("classDeclaration"))
            .collect())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::{Cst, CstBuilder, NodeId};

    fn unit_with_imports() -> Cst {
        let mut b = CstBuilder::new();
        let root = b.node("compilationUnit");
        let unit = b.child(root, "ordinaryCompilationUnit");

        let package = b.child(unit, "packageDeclaration");
        b.token(package, "Package", "package");
        for (i, part) in ["com", "acme", "orders"].iter().enumerate() {
            if i > 0 {
                b.token(package, "Dot", ".");
            }
            b.token(package, "Identifier", part);
        }
        b.token(package, "Semicolon", ";");

        let import = b.child(unit, "importDeclaration");
        b.token(import, "Import", "import");
        let name = b.child(import, "packageOrTypeName");
        for (i, part) in ["org", "springframework", "stereotype", "Service"]
            .iter()
            .enumerate()
        {
            if i > 0 {
                b.token(name, "Dot", ".");
            }
            b.token(name, "Identifier", part);
        }
        b.token(import, "Semicolon", ";");

        // wildcard import with no packageOrTypeName, exercising the token fallback
        let import = b.child(unit, "importDeclaration");
        b.token(import, "Import", "import")
            .token(import, "Identifier", "java")
            .token(import, "Dot", ".")
            .token(import, "Identifier", "util")
            .token(import, "Star", "*")
            .token(import, "Semicolon", ";");

        let type_decl = b.child(unit, "typeDeclaration");
        b.child(type_decl, "classDeclaration");
        let type_decl = b.child(unit, "typeDeclaration");
        b.child(type_decl, "interfaceDeclaration");
        b.finish(root)
    }

    #[test]
    fn test_package_and_imports() {
        let extractor = JavaExtractor::default();
        let cst = unit_with_imports();
        let root = NodeRef::root(&cst);
        assert_eq!(
            extractor.extract_package_name(root).as_deref(),
            Some("com.acme.orders")
        );
        assert_eq!(
            extractor.extract_imports(root),
            vec!["org.springframework.stereotype.Service", "java.util.*"]
        );
    }

    #[test]
    fn test_only_class_declarations_are_returned() {
        let extractor = JavaExtractor::default();
        let cst = unit_with_imports();
        let classes = extractor.extract_class_declarations(NodeRef::root(&cst));
        assert_eq!(classes.len(), 1);
        assert!(classes[0].is("classDeclaration"));
    }

    #[test]
    fn test_missing_and_foreign_roots() {
        let extractor = JavaExtractor::default();
        assert_eq!(extractor.extract_package_name(None), None);
        assert!(extractor.extract_imports(None).is_empty());
        assert!(extractor.extract_class_declarations(None).is_empty());

        let mut b = CstBuilder::new();
        let root = b.node("classBody");
        b.push_node(root, "classBody", root);
        let cst = b.finish(root);
        assert!(extractor.extract_imports(NodeRef::root(&cst)).is_empty());

        let dangling = NodeRef::new(&cst, NodeId(99));
        assert!(extractor.extract_class_declarations(Some(dangling)).is_empty());
    }

    #[test]
    fn test_self_referential_unit_terminates() {
        let mut b = CstBuilder::new();
        let unit = b.node("ordinaryCompilationUnit");
        b.push_node(unit, "ordinaryCompilationUnit", unit);
        let import = b.child(unit, "importDeclaration");
        b.push_node(import, "importDeclaration", import);
        b.token(import, "Identifier", "a");
        let cst = b.finish(unit);

        let extractor = JavaExtractor::default();
        assert_eq!(extractor.extract_imports(NodeRef::root(&cst)), vec!["a"]);
        assert_eq!(extractor.extract_package_name(NodeRef::root(&cst)), None);
    }
}
