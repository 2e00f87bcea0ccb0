/// Recognized-vs-unrecognized views over the productions we consume
///
/// Each extractor that has a structural strategy and a fallback strategy asks the
/// matching shape which one applies, instead of probing optional children ad hoc.
use crate::cst::{NodeRef, Token};

/// `importDeclaration`
#[derive(Debug, Clone)]
pub(crate) enum ImportShape<'a> {
    Structured {
        identifiers: Vec<&'a Token>,
        wildcard: bool,
    },
    Unstructured(NodeRef<'a>),
}

impl<'a> ImportShape<'a> {
    pub(crate) fn of(import: NodeRef<'a>) -> Self {
        if let Some(name) = import.child_node("packageOrTypeName") {
            let identifiers: Vec<&Token> = name.tokens("Identifier").collect();
            if !identifiers.is_empty() {
                let wildcard = import.has_child("Star") || name.has_child("Star");
                return ImportShape::Structured {
                    identifiers,
                    wildcard,
                };
            }
        }
        ImportShape::Unstructured(import)
    }
}

/// The type part of a field declaration
#[derive(Debug, Clone, Copy)]
pub(crate) enum FieldTypeShape<'a> {
    /// `unannReferenceType`
    Reference(NodeRef<'a>),
    /// `unannPrimitiveTypeWithOptionalDimsSuffix`
    Primitive(NodeRef<'a>),
    Unrecognized,
}

impl<'a> FieldTypeShape<'a> {
    pub(crate) fn of(field: NodeRef<'a>) -> Self {
        let Some(unann) = field.child_node("unannType") else {
            return FieldTypeShape::Unrecognized;
        };
        if let Some(reference) = unann.child_node("unannReferenceType") {
            return FieldTypeShape::Reference(reference);
        }
        if let Some(primitive) = unann.child_node("unannPrimitiveTypeWithOptionalDimsSuffix") {
            return FieldTypeShape::Primitive(primitive);
        }
        FieldTypeShape::Unrecognized
    }
}

/// Implemented interfaces of a class declaration
#[derive(Debug, Clone)]
pub(crate) enum InterfaceShape<'a> {
    /// `interfaceType` nodes from `superinterfaces -> interfaceTypeList`
    Structured(Vec<NodeRef<'a>>),
    /// No usable list; the whole declaration is handed to the fallback scan
    Unstructured(NodeRef<'a>),
}

impl<'a> InterfaceShape<'a> {
    pub(crate) fn of(class_decl: NodeRef<'a>) -> Self {
        let superinterfaces = class_decl
            .path(&["normalClassDeclaration", "superinterfaces"])
            .or_else(|| class_decl.child_node("superinterfaces"));
        let types: Vec<NodeRef<'a>> = superinterfaces
            .and_then(|s| s.child_node("interfaceTypeList"))
            .map(|list| list.child_nodes("interfaceType").collect())
            .unwrap_or_default();
        if types.is_empty() {
            InterfaceShape::Unstructured(class_decl)
        } else {
            InterfaceShape::Structured(types)
        }
    }
}

/// Argument shape of an `annotation`
#[derive(Debug, Clone)]
pub(crate) enum AnnotationArgsShape<'a> {
    /// `@Name("literal")`
    SingleString(&'a Token),
    /// `@Name(key = value, ...)`
    Pairs(Vec<NodeRef<'a>>),
    Unrecognized(NodeRef<'a>),
}

impl<'a> AnnotationArgsShape<'a> {
    pub(crate) fn of(annotation: NodeRef<'a>) -> Self {
        if let Some(value) = annotation.child_node("elementValue") {
            let tokens = value.collect_tokens();
            if let [only] = tokens.as_slice() {
                if only.is("StringLiteral") {
                    return AnnotationArgsShape::SingleString(only);
                }
            }
        }
        if let Some(list) = annotation.child_node("elementValuePairList") {
            let pairs: Vec<NodeRef<'a>> = list.child_nodes("elementValuePair").collect();
            if !pairs.is_empty() {
                return AnnotationArgsShape::Pairs(pairs);
            }
        }
        AnnotationArgsShape::Unrecognized(annotation)
    }
}

/// Where a `classBodyDeclaration` keeps its field, if it is one
#[derive(Debug, Clone, Copy)]
pub(crate) enum FieldMemberShape<'a> {
    /// `classMemberDeclaration -> fieldDeclaration`
    Member(NodeRef<'a>),
    /// `fieldDeclaration` directly on the body declaration
    Direct(NodeRef<'a>),
    NotAField,
}

impl<'a> FieldMemberShape<'a> {
    pub(crate) fn of(body_decl: NodeRef<'a>) -> Self {
        if let Some(field) = body_decl.path(&["classMemberDeclaration", "fieldDeclaration"]) {
            return FieldMemberShape::Member(field);
        }
        match body_decl.child_node("fieldDeclaration") {
            Some(field) => FieldMemberShape::Direct(field),
            None => FieldMemberShape::NotAField,
        }
    }

    pub(crate) fn field(&self) -> Option<NodeRef<'a>> {
        match self {
            FieldMemberShape::Member(field) | FieldMemberShape::Direct(field) => Some(*field),
            FieldMemberShape::NotAField => None,
        }
    }
}

/// True for any node shaped like a field declaration
pub(crate) fn is_field_shaped(node: NodeRef<'_>) -> bool {
    node.child_node("unannType").is_some() && node.child_node("variableDeclaratorList").is_some()
}
