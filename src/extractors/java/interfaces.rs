/// Implemented-interface recovery
///
/// The structural path reads `superinterfaces -> interfaceTypeList`. Without it, the
/// fallback finds the `implements` keyword and collects every capitalized identifier
/// under the node holding it. That fallback is deliberately loose and can over-collect
/// on unusual nesting.
use std::collections::HashSet;
use std::ops::ControlFlow;

use crate::cst::{NodeRef, Visit};

use super::helpers::{is_reserved_word, INTERFACE_NAME};
use super::shapes::InterfaceShape;

pub(super) fn extract_interfaces(class_decl: NodeRef<'_>) -> Vec<String> {
    match InterfaceShape::of(class_decl) {
        InterfaceShape::Structured(types) => {
            let mut names: Vec<String> = Vec::new();
            for interface_type in types {
                let class_type = interface_type.child_node("classType").unwrap_or(interface_type);
                if let Some(last) = class_type.tokens("Identifier").last() {
                    if !names.contains(&last.image) {
                        names.push(last.image.clone());
                    }
                }
            }
            names
        }
        InterfaceShape::Unstructured(node) => scan_implements(node),
    }
}

fn scan_implements(class_decl: NodeRef<'_>) -> Vec<String> {
    let mut container = None;
    class_decl.walk(|visit| match visit {
        Visit::Token { token, parent } if token.is("Implements") => {
            container = Some(parent);
            ControlFlow::Break(())
        }
        _ => ControlFlow::Continue(()),
    });
    let Some(container) = container else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    container
        .collect_tokens()
        .into_iter()
        .filter(|t| t.is("Identifier"))
        .map(|t| t.image.as_str())
        .filter(|name| !is_reserved_word(name) && INTERFACE_NAME.is_match(name))
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::CstBuilder;

    #[test]
    fn test_structural_interfaces_take_last_identifier() {
        let mut b = CstBuilder::new();
        let class = b.node("classDeclaration");
        let normal = b.child(class, "normalClassDeclaration");
        let supers = b.child(normal, "superinterfaces");
        b.token(supers, "Implements", "implements");
        let list = b.child(supers, "interfaceTypeList");
        for parts in [vec!["OrderApi"], vec!["java", "io", "Serializable"]] {
            let interface_type = b.child(list, "interfaceType");
            let class_type = b.child(interface_type, "classType");
            for part in parts {
                b.token(class_type, "Identifier", part);
            }
        }
        let cst = b.finish(class);

        assert_eq!(
            extract_interfaces(NodeRef::root(&cst).unwrap()),
            vec!["OrderApi", "Serializable"]
        );
    }

    #[test]
    fn test_generic_arguments_are_not_interfaces() {
        let mut b = CstBuilder::new();
        let class = b.node("classDeclaration");
        let supers = b.child(class, "superinterfaces");
        let list = b.child(supers, "interfaceTypeList");
        let interface_type = b.child(list, "interfaceType");
        let class_type = b.child(interface_type, "classType");
        b.token(class_type, "Identifier", "Comparable");
        let args = b.child(class_type, "typeArguments");
        b.token(args, "Identifier", "Order");
        let cst = b.finish(class);

        assert_eq!(extract_interfaces(NodeRef::root(&cst).unwrap()), vec!["Comparable"]);
    }

    #[test]
    fn test_fallback_scans_the_implements_container() {
        let mut b = CstBuilder::new();
        let class = b.node("classDeclaration");
        let broken = b.child(class, "error");
        b.token(broken, "Class", "class")
            .token(broken, "Identifier", "OrderService")
            .token(broken, "Implements", "implements")
            .token(broken, "Identifier", "OrderApi")
            .token(broken, "Comma", ",")
            .token(broken, "Identifier", "auditable")
            .token(broken, "Comma", ",")
            .token(broken, "Identifier", "OrderApi");
        let cst = b.finish(class);

        // permissive: the class name itself is collected too
        assert_eq!(
            extract_interfaces(NodeRef::root(&cst).unwrap()),
            vec!["OrderService", "OrderApi"]
        );
    }

    #[test]
    fn test_no_implements_clause() {
        let mut b = CstBuilder::new();
        let class = b.node("classDeclaration");
        b.push_node(class, "classDeclaration", class);
        let cst = b.finish(class);
        assert!(extract_interfaces(NodeRef::root(&cst).unwrap()).is_empty());
    }
}
