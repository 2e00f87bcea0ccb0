/// Field extraction
///
/// Pass 1 follows the class body's declared members. Pass 2 walks the whole class
/// declaration once for anything shaped like a field that pass 1 did not reach. Both
/// passes feed one name-keyed map, so the first occurrence of a name wins.
use std::collections::HashSet;
use std::ops::ControlFlow;

use indexmap::IndexMap;
use tracing::debug;

use crate::cst::{ElementRef, NodeId, NodeRef, Token, Visit};
use crate::errors::{recover, ExtractionError, Result};
use crate::extractors::base::{FieldInfo, Visibility};
use crate::extractors::java::JavaExtractor;

use super::annotations;
use super::helpers::{is_primitive_keyword, is_type_like_name, render_type_tokens};
use super::shapes::{is_field_shaped, FieldMemberShape, FieldTypeShape};
use super::vocabulary::AnnotationTarget;

/// State of one `extract_fields` call; never outlives it
#[derive(Default)]
struct FieldWalkContext {
    processed: HashSet<NodeId>,
    fields: IndexMap<String, FieldInfo>,
}

pub(super) fn extract_fields(
    extractor: &JavaExtractor,
    class_decl: Option<NodeRef<'_>>,
    lines: &[&str],
) -> Vec<FieldInfo> {
    let snippet = extractor.base().node_snippet(class_decl);
    recover("extract_fields", &snippet, || {
        try_extract_fields(extractor, class_decl, lines)
    })
}

fn try_extract_fields(
    extractor: &JavaExtractor,
    class_decl: Option<NodeRef<'_>>,
    lines: &[&str],
) -> Result<Vec<FieldInfo>> {
    let Some(class_decl) = class_decl else {
        return Ok(Vec::new());
    };
    if !class_decl.exists() {
        return Err(ExtractionError::field_extraction(format!(
            "class declaration {:?} does not resolve to a node",
            class_decl.id()
        ))
        .with_construct("classDeclaration"));
    }

    let mut context = FieldWalkContext::default();

    let body = class_decl
        .path(&["normalClassDeclaration", "classBody"])
        .or_else(|| class_decl.child_node("classBody"));
    if let Some(body) = body {
        for body_decl in body.child_nodes("classBodyDeclaration") {
            if let Some(field) = FieldMemberShape::of(body_decl).field() {
                process_field(extractor, field, lines, &mut context);
            }
        }
    }
    let structural = context.fields.len();

    class_decl.walk(|visit| {
        if let Visit::Enter(node) = visit {
            if !context.processed.contains(&node.id()) && is_field_shaped(node) {
                process_field(extractor, node, lines, &mut context);
            }
        }
        ControlFlow::Continue(())
    });

    if context.fields.len() > structural {
        debug!(
            recovered = context.fields.len() - structural,
            "fields recovered outside the class body path"
        );
    }

    Ok(context.fields.into_values().collect())
}

fn process_field(
    extractor: &JavaExtractor,
    node: NodeRef<'_>,
    lines: &[&str],
    context: &mut FieldWalkContext,
) {
    if !context.processed.insert(node.id()) {
        return;
    }
    if let Some(field) = parse_field_declaration(extractor, Some(node), lines) {
        context.fields.entry(field.name.clone()).or_insert(field);
    }
}

/// One `FieldInfo` for the first declarator; `None` without a type or a name
pub(super) fn parse_field_declaration(
    extractor: &JavaExtractor,
    node: Option<NodeRef<'_>>,
    lines: &[&str],
) -> Option<FieldInfo> {
    let snippet = extractor.base().node_snippet(node);
    recover("parse_field_declaration", &snippet, || {
        try_parse_field(extractor, node, lines)
    })
}

fn try_parse_field(
    extractor: &JavaExtractor,
    node: Option<NodeRef<'_>>,
    lines: &[&str],
) -> Result<Option<FieldInfo>> {
    let Some(node) = node else {
        return Ok(None);
    };
    if !node.exists() {
        return Err(ExtractionError::field_extraction(format!(
            "field declaration {:?} does not resolve to a node",
            node.id()
        ))
        .with_construct("fieldDeclaration"));
    }

    let Some(field_type) = resolve_field_type(node) else {
        return Ok(None);
    };
    let Some(name) = node
        .path(&["variableDeclaratorList", "variableDeclarator", "variableDeclaratorId"])
        .and_then(|id| id.token("Identifier"))
        .map(|t| t.image.clone())
    else {
        return Ok(None);
    };

    let mut field = FieldInfo {
        name,
        field_type,
        position: extractor.base().positions.calculate_position(node, lines),
        range: extractor.base().positions.calculate_range(node, lines),
        annotations: Vec::new(),
        visibility: None,
        is_final: false,
        is_static: false,
    };
    apply_modifiers(extractor, node, lines, &mut field);
    Ok(Some(field))
}

fn apply_modifiers(
    extractor: &JavaExtractor,
    node: NodeRef<'_>,
    lines: &[&str],
    field: &mut FieldInfo,
) {
    for modifier in node.child_nodes("fieldModifier") {
        for (_, element) in modifier.elements() {
            match element {
                ElementRef::Token(token) => match token.token_type.as_str() {
                    "Public" => field.visibility = Some(Visibility::Public),
                    "Private" => field.visibility = Some(Visibility::Private),
                    "Protected" => field.visibility = Some(Visibility::Protected),
                    "Final" => field.is_final = true,
                    "Static" => field.is_static = true,
                    _ => {}
                },
                ElementRef::Node(child) if child.is("annotation") => {
                    if let Some(annotation) = annotations::parse_annotation(
                        extractor,
                        Some(child),
                        lines,
                        AnnotationTarget::Field,
                    ) {
                        field.annotations.push(annotation);
                    }
                }
                ElementRef::Node(_) => {}
            }
        }
    }
}

fn resolve_field_type(node: NodeRef<'_>) -> Option<String> {
    let resolved = match FieldTypeShape::of(node) {
        FieldTypeShape::Reference(reference) => {
            let rendered = render_type_tokens(&reference.collect_tokens());
            (!rendered.is_empty()).then_some(rendered)
        }
        FieldTypeShape::Primitive(primitive) => primitive_type(primitive),
        FieldTypeShape::Unrecognized => None,
    };
    resolved.or_else(|| fallback_type(node))
}

fn primitive_type(wrapper: NodeRef<'_>) -> Option<String> {
    let primitive = wrapper.child_node("unannPrimitiveType")?;
    let keyword = match primitive.child_node("numericType") {
        Some(numeric) => numeric
            .child_node("integralType")
            .or_else(|| numeric.child_node("floatingPointType"))
            .and_then(|family| family.find_token(|t| is_primitive_keyword(&t.image))),
        None => primitive.token("Boolean"),
    }?;

    let dims = wrapper
        .child_node("dims")
        .map(|d| d.tokens("LSquare").count())
        .unwrap_or(0);
    Some(format!("{}{}", keyword.image, "[]".repeat(dims)))
}

/// First primitive keyword or capitalized identifier outside modifiers and declarators
fn fallback_type(node: NodeRef<'_>) -> Option<String> {
    let is_type_token =
        |t: &Token| is_primitive_keyword(&t.image) || (t.is("Identifier") && is_type_like_name(&t.image));

    node.elements()
        .filter(|(key, _)| !matches!(*key, "fieldModifier" | "variableDeclaratorList" | "annotation"))
        .find_map(|(_, element)| match element {
            ElementRef::Token(token) if is_type_token(token) => Some(token),
            ElementRef::Token(_) => None,
            ElementRef::Node(child) => child.find_token(is_type_token),
        })
        .map(|t| t.image.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::{Cst, CstBuilder};
    use crate::extractors::base::SemanticAnnotationKind;

    /// `private static final Map<String, Integer> counts = ...;` style builder
    fn push_reference_field(
        b: &mut CstBuilder,
        parent: NodeId,
        modifiers: &[&str],
        type_images: &[(&str, &str)],
        name: &str,
    ) -> NodeId {
        let field = b.node("fieldDeclaration");
        for modifier in modifiers {
            let m = b.child(field, "fieldModifier");
            let token_type = {
                let mut chars = modifier.chars();
                chars
                    .next()
                    .map(|c| c.to_uppercase().collect::<String>() + chars.as_str())
                    .unwrap_or_default()
            };
            b.token(m, &token_type, modifier);
        }
        let unann = b.child(field, "unannType");
        let reference = b.child(unann, "unannReferenceType");
        let class_type = b.child(reference, "unannClassOrInterfaceType");
        let class_type = b.child(class_type, "unannClassType");
        for (token_type, image) in type_images {
            b.token(class_type, token_type, image);
        }
        let list = b.child(field, "variableDeclaratorList");
        let declarator = b.child(list, "variableDeclarator");
        let id = b.child(declarator, "variableDeclaratorId");
        b.token(id, "Identifier", name);
        b.token(field, "Semicolon", ";");
        b.push_node(parent, "fieldDeclaration", field);
        field
    }

    fn push_primitive_field(b: &mut CstBuilder, parent: NodeId, keyword: &str, dims: usize, name: &str) {
        let field = b.child(parent, "fieldDeclaration");
        let unann = b.child(field, "unannType");
        let wrapper = b.child(unann, "unannPrimitiveTypeWithOptionalDimsSuffix");
        let primitive = b.child(wrapper, "unannPrimitiveType");
        if keyword == "boolean" {
            b.token(primitive, "Boolean", keyword);
        } else {
            let numeric = b.child(primitive, "numericType");
            let family = if keyword == "double" || keyword == "float" {
                b.child(numeric, "floatingPointType")
            } else {
                b.child(numeric, "integralType")
            };
            let token_type = keyword[..1].to_uppercase() + &keyword[1..];
            b.token(family, &token_type, keyword);
        }
        if dims > 0 {
            let d = b.child(wrapper, "dims");
            for _ in 0..dims {
                b.token(d, "LSquare", "[").token(d, "RSquare", "]");
            }
        }
        let list = b.child(field, "variableDeclaratorList");
        let declarator = b.child(list, "variableDeclarator");
        let id = b.child(declarator, "variableDeclaratorId");
        b.token(id, "Identifier", name);
    }

    fn class_with_body() -> (CstBuilder, NodeId, NodeId) {
        let mut b = CstBuilder::new();
        let class = b.node("classDeclaration");
        let normal = b.child(class, "normalClassDeclaration");
        let ident = b.child(normal, "typeIdentifier");
        b.token(ident, "Identifier", "OrderService");
        let body = b.child(normal, "classBody");
        (b, class, body)
    }

    fn member(b: &mut CstBuilder, body: NodeId) -> NodeId {
        let decl = b.child(body, "classBodyDeclaration");
        b.child(decl, "classMemberDeclaration")
    }

    fn names(fields: &[FieldInfo]) -> Vec<(&str, &str)> {
        fields
            .iter()
            .map(|f| (f.name.as_str(), f.field_type.as_str()))
            .collect()
    }

    #[test]
    fn test_reference_and_primitive_fields() {
        let (mut b, class, body) = class_with_body();
        let m = member(&mut b, body);
        push_reference_field(
            &mut b,
            m,
            &["private", "final"],
            &[
                ("Identifier", "Map"),
                ("Less", "<"),
                ("Identifier", "String"),
                ("Comma", ","),
                ("Identifier", "Integer"),
                ("Greater", ">"),
            ],
            "counts",
        );
        let m = member(&mut b, body);
        push_primitive_field(&mut b, m, "int", 0, "retries");
        let m = member(&mut b, body);
        push_primitive_field(&mut b, m, "double", 2, "matrix");
        let m = member(&mut b, body);
        push_primitive_field(&mut b, m, "boolean", 0, "enabled");
        let cst = b.finish(class);

        let extractor = JavaExtractor::default();
        let fields = extractor.extract_fields(NodeRef::root(&cst), &[]);
        assert_eq!(
            names(&fields),
            vec![
                ("counts", "Map<String, Integer>"),
                ("retries", "int"),
                ("matrix", "double[][]"),
                ("enabled", "boolean"),
            ]
        );
        assert_eq!(fields[0].visibility, Some(Visibility::Private));
        assert!(fields[0].is_final);
        assert!(!fields[0].is_static);
        assert_eq!(fields[1].visibility, None, "no modifier means package-private");
    }

    #[test]
    fn test_last_visibility_modifier_wins() {
        let (mut b, class, body) = class_with_body();
        let m = member(&mut b, body);
        push_reference_field(
            &mut b,
            m,
            &["public", "static", "private"],
            &[("Identifier", "Clock")],
            "clock",
        );
        let cst = b.finish(class);

        let extractor = JavaExtractor::default();
        let fields = extractor.extract_fields(NodeRef::root(&cst), &[]);
        assert_eq!(fields.len(), 1);
        assert_eq!(
            fields[0].visibility,
            Some(Visibility::Private),
            "visibility tokens are applied in order"
        );
        assert!(fields[0].is_static);
        assert!(!fields[0].is_final);
    }

    #[test]
    fn test_multiple_declarators_keep_only_the_first() {
        let (mut b, class, body) = class_with_body();
        let m = member(&mut b, body);
        let field = b.child(m, "fieldDeclaration");
        let unann = b.child(field, "unannType");
        let wrapper = b.child(unann, "unannPrimitiveTypeWithOptionalDimsSuffix");
        let primitive = b.child(wrapper, "unannPrimitiveType");
        let numeric = b.child(primitive, "numericType");
        let integral = b.child(numeric, "integralType");
        b.token(integral, "Int", "int");
        let list = b.child(field, "variableDeclaratorList");
        let first = b.child(list, "variableDeclarator");
        let id = b.child(first, "variableDeclaratorId");
        b.token(id, "Identifier", "first");
        b.token(list, "Comma", ",");
        let second = b.child(list, "variableDeclarator");
        let id = b.child(second, "variableDeclaratorId");
        b.token(id, "Identifier", "second");
        b.token(field, "Semicolon", ";");
        let cst = b.finish(class);

        let extractor = JavaExtractor::default();
        let fields = extractor.extract_fields(NodeRef::root(&cst), &[]);
        assert_eq!(
            names(&fields),
            vec![("first", "int")],
            "one FieldInfo per declaration, named after its first declarator"
        );
    }

    #[test]
    fn test_field_annotations_are_parsed_with_field_target() {
        let (mut b, class, body) = class_with_body();
        let m = member(&mut b, body);
        let field = b.child(m, "fieldDeclaration");
        let modifier = b.child(field, "fieldModifier");
        let annotation = b.child(modifier, "annotation");
        let type_name = b.child(annotation, "typeName");
        b.token(type_name, "Identifier", "Value");
        let value = b.child(annotation, "elementValue");
        b.token(value, "StringLiteral", "\"${timeout}\"");
        let modifier = b.child(field, "fieldModifier");
        b.token(modifier, "Private", "private");
        let unann = b.child(field, "unannType");
        let reference = b.child(unann, "unannReferenceType");
        b.token(reference, "Identifier", "String");
        let list = b.child(field, "variableDeclaratorList");
        let declarator = b.child(list, "variableDeclarator");
        let id = b.child(declarator, "variableDeclaratorId");
        b.token(id, "Identifier", "timeout");
        let cst = b.finish(class);

        let extractor = JavaExtractor::default();
        let fields = extractor.extract_fields(NodeRef::root(&cst), &[]);
        assert_eq!(names(&fields), vec![("timeout", "String")]);
        assert_eq!(fields[0].annotations.len(), 1);
        assert_eq!(fields[0].annotations[0].kind, SemanticAnnotationKind::Value);
        assert_eq!(fields[0].annotations[0].value(), Some("${timeout}"));
        assert!(fields[0].has_annotation(SemanticAnnotationKind::Value));
    }

    #[test]
    fn test_pass_two_recovers_fields_and_deduplicates() {
        let (mut b, class, body) = class_with_body();
        let m = member(&mut b, body);
        let shared = push_reference_field(&mut b, m, &[], &[("Identifier", "Repo")], "repo");
        // the same node reachable from an unexpected wrapper
        let odd = b.child(body, "unexpectedWrapper");
        b.push_node(odd, "fieldDeclaration", shared);
        // a distinct declaration with the same name, only reachable by the walk
        let stray = b.child(body, "strayMember");
        push_reference_field(&mut b, stray, &[], &[("Identifier", "Other")], "repo");
        // and a new field only the walk can find
        let hidden = b.child(body, "error");
        push_primitive_field(&mut b, hidden, "long", 0, "version");
        let cst = b.finish(class);

        let extractor = JavaExtractor::default();
        let fields = extractor.extract_fields(NodeRef::root(&cst), &[]);
        assert_eq!(
            names(&fields),
            vec![("repo", "Repo"), ("version", "long")],
            "first occurrence of a name wins"
        );
    }

    #[test]
    fn test_extract_fields_is_idempotent() {
        let (mut b, class, body) = class_with_body();
        for name in ["a", "b", "c"] {
            let m = member(&mut b, body);
            push_reference_field(&mut b, m, &["protected"], &[("Identifier", "Dep")], name);
        }
        let cst = b.finish(class);

        let extractor = JavaExtractor::default();
        let first = extractor.extract_fields(NodeRef::root(&cst), &[]);
        let second = extractor.extract_fields(NodeRef::root(&cst), &[]);
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_parse_field_declaration_requires_type_and_name() {
        let mut b = CstBuilder::new();
        let field = b.node("fieldDeclaration");
        let list = b.child(field, "variableDeclaratorList");
        let declarator = b.child(list, "variableDeclarator");
        let id = b.child(declarator, "variableDeclaratorId");
        b.token(id, "Identifier", "orphan");
        let cst = b.finish(field);
        let extractor = JavaExtractor::default();
        assert!(extractor.parse_field_declaration(NodeRef::root(&cst), &[]).is_none());

        let mut b = CstBuilder::new();
        let root = b.node("classBodyDeclaration");
        push_primitive_field(&mut b, root, "int", 0, "x");
        let cst: Cst = b.finish(root);
        let field = NodeRef::root(&cst).unwrap().child_node("fieldDeclaration");
        let parsed = extractor.parse_field_declaration(field, &[]).unwrap();
        assert_eq!((parsed.name.as_str(), parsed.field_type.as_str()), ("x", "int"));
    }

    #[test]
    fn test_fallback_type_from_tokens() {
        let mut b = CstBuilder::new();
        let field = b.node("fieldDeclaration");
        let unann = b.child(field, "unannType");
        let odd = b.child(unann, "somethingNew");
        b.token(odd, "Identifier", "java").token(odd, "Identifier", "Clock");
        let list = b.child(field, "variableDeclaratorList");
        let declarator = b.child(list, "variableDeclarator");
        let id = b.child(declarator, "variableDeclaratorId");
        b.token(id, "Identifier", "clock");
        let cst = b.finish(field);

        let extractor = JavaExtractor::default();
        let parsed = extractor
            .parse_field_declaration(NodeRef::root(&cst), &[])
            .unwrap();
        assert_eq!(parsed.field_type, "Clock");
    }

    #[test]
    fn test_cyclic_and_dangling_class_trees() {
        let (mut b, class, body) = class_with_body();
        b.push_node(body, "classDeclaration", class);
        let m = member(&mut b, body);
        b.push_node(m, "fieldDeclaration", NodeId(500));
        let m = member(&mut b, body);
        push_primitive_field(&mut b, m, "int", 0, "count");
        let cst = b.finish(class);

        let extractor = JavaExtractor::default();
        let fields = extractor.extract_fields(NodeRef::root(&cst), &[]);
        assert_eq!(names(&fields), vec![("count", "int")]);
        assert!(extractor
            .extract_fields(Some(NodeRef::new(&cst, NodeId(500))), &[])
            .is_empty());
        assert!(extractor.extract_fields(None, &[]).is_empty());
    }
}
