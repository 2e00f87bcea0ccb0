// Lowering of tree-sitter-java trees into the grammar-shaped CST
//
// The productions the extractors consume (package, imports, class declarations,
// class bodies, fields, annotations, superinterfaces) are lowered into their
// grammar shapes. Everything else is lowered generically: the tree-sitter kind is
// camel-cased into a production name and leaves become tokens, which keeps the
// recursive fallbacks working on constructs we never model explicitly.

use tree_sitter::Node;

use super::builder::CstBuilder;
use super::types::{Cst, NodeId, Point, Span, Token};

/// Lower a tree-sitter `program` node
pub fn lower_program(root: Node, source: &str) -> Cst {
    let mut lowering = Lowering {
        source: source.as_bytes(),
        builder: CstBuilder::new(),
    };
    let root_id = lowering.program(root);
    lowering.builder.finish(root_id)
}

struct Lowering<'s> {
    source: &'s [u8],
    builder: CstBuilder,
}

fn is_skipped(node: &Node) -> bool {
    node.is_extra() || node.kind().ends_with("comment")
}

fn children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|c| !is_skipped(c))
        .collect()
}

/// Nodes that become a single token even though tree-sitter gives them children
fn is_token_like(node: &Node) -> bool {
    node.child_count() == 0
        || matches!(
            node.kind(),
            "string_literal" | "text_block" | "character_literal" | "asterisk"
        )
}

fn span_of(node: &Node) -> Span {
    let start = node.start_position();
    let end = node.end_position();
    Span {
        start: Point::new(start.row as u32, start.column as u32),
        end: Point::new(end.row as u32, end.column as u32),
        start_byte: node.start_byte(),
        end_byte: node.end_byte(),
    }
}

/// Camel-case a tree-sitter kind: `field_declaration` -> `fieldDeclaration`
pub(crate) fn production_name(kind: &str) -> String {
    if kind == "ERROR" {
        return "error".to_string();
    }
    let mut out = String::with_capacity(kind.len());
    let mut upper_next = false;
    for (i, ch) in kind.chars().enumerate() {
        if ch == '_' || ch == '-' {
            upper_next = true;
        } else if upper_next && i > 0 {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else if i == 0 {
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Grammar token type for a tree-sitter leaf
pub(crate) fn token_type(kind: &str) -> String {
    let mapped = match kind {
        "identifier" | "type_identifier" => "Identifier",
        "string_literal" | "text_block" => "StringLiteral",
        "character_literal" => "CharLiteral",
        "decimal_integer_literal"
        | "hex_integer_literal"
        | "octal_integer_literal"
        | "binary_integer_literal" => "IntegerLiteral",
        "decimal_floating_point_literal" | "hex_floating_point_literal" => "FloatLiteral",
        "null_literal" => "Null",
        "asterisk" => "Star",
        "void_type" => "Void",
        "boolean_type" => "Boolean",
        ";" => "Semicolon",
        "." => "Dot",
        "," => "Comma",
        "(" => "LBrace",
        ")" => "RBrace",
        "{" => "LCurly",
        "}" => "RCurly",
        "[" => "LSquare",
        "]" => "RSquare",
        "<" => "Less",
        ">" => "Greater",
        "@" => "At",
        "=" => "Equals",
        "*" => "Star",
        "?" => "Question",
        ":" => "Colon",
        "::" => "ColonColon",
        "..." => "DotDotDot",
        "->" => "Arrow",
        "&" => "And",
        _ => "",
    };
    if !mapped.is_empty() {
        return mapped.to_string();
    }
    if kind.chars().all(|c| c.is_ascii_alphabetic() || c == '-') && !kind.is_empty() {
        // Keywords: `public` -> `Public`, `non-sealed` -> `NonSealed`
        let camel = production_name(kind);
        let mut chars = camel.chars();
        return match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
    }
    "Punctuation".to_string()
}

impl<'s> Lowering<'s> {
    fn text(&self, node: &Node) -> String {
        let (start, end) = (node.start_byte(), node.end_byte());
        if start <= end && end <= self.source.len() {
            String::from_utf8_lossy(&self.source[start..end]).to_string()
        } else {
            String::new()
        }
    }

    fn leaf(&self, node: &Node) -> Token {
        Token {
            token_type: token_type(node.kind()),
            image: self.text(node),
            span: Some(span_of(node)),
        }
    }

    fn keyword_token(&self, node: &Node) -> Token {
        let image = self.text(node);
        Token {
            token_type: token_type(&image),
            image,
            span: Some(span_of(node)),
        }
    }

    fn located(&mut self, name: &str, node: &Node) -> NodeId {
        let id = self.builder.node(name);
        self.builder.set_location(id, span_of(node));
        id
    }

    fn program(&mut self, node: Node) -> NodeId {
        let unit = self.located("compilationUnit", &node);
        let ordinary = self.located("ordinaryCompilationUnit", &node);
        self.builder
            .push_node(unit, "ordinaryCompilationUnit", ordinary);

        for child in children(node) {
            match child.kind() {
                "package_declaration" => {
                    let id = self.package(child);
                    self.builder.push_node(ordinary, "packageDeclaration", id);
                }
                "import_declaration" => {
                    let id = self.import(child);
                    self.builder.push_node(ordinary, "importDeclaration", id);
                }
                "class_declaration"
                | "interface_declaration"
                | "enum_declaration"
                | "record_declaration"
                | "annotation_type_declaration" => {
                    let type_decl = self.located("typeDeclaration", &child);
                    let (key, id) = self.type_declaration(child);
                    self.builder.push_node(type_decl, &key, id);
                    self.builder
                        .push_node(ordinary, "typeDeclaration", type_decl);
                }
                _ => self.push_any(ordinary, child),
            }
        }
        unit
    }

    /// Lower a type declaration and return the key it belongs under
    fn type_declaration(&mut self, node: Node) -> (String, NodeId) {
        match node.kind() {
            "class_declaration" => ("classDeclaration".to_string(), self.class(node)),
            "interface_declaration" | "annotation_type_declaration" => {
                ("interfaceDeclaration".to_string(), self.generic(node))
            }
            other => (production_name(other), self.generic(node)),
        }
    }

    /// Append `child` under `parent`, as a token or as a generic production
    fn push_any(&mut self, parent: NodeId, child: Node) {
        if is_token_like(&child) {
            let token = self.leaf(&child);
            self.builder.push_token(parent, token);
            return;
        }
        match child.kind() {
            "annotation" | "marker_annotation" => {
                let id = self.annotation(child);
                self.builder.push_node(parent, "annotation", id);
            }
            "class_declaration" => {
                let id = self.class(child);
                self.builder.push_node(parent, "classDeclaration", id);
            }
            "field_declaration" => {
                let id = self.field(child);
                self.builder.push_node(parent, "fieldDeclaration", id);
            }
            kind => {
                let name = production_name(kind);
                let id = self.generic(child);
                self.builder.push_node(parent, &name, id);
            }
        }
    }

    fn generic(&mut self, node: Node) -> NodeId {
        let id = self.located(&production_name(node.kind()), &node);
        for child in children(node) {
            self.push_any(id, child);
        }
        id
    }

    /// Flatten `identifier` / `scoped_identifier` into `Identifier` and `Dot` tokens
    fn qualified_name_into(&mut self, parent: NodeId, node: Node) {
        if is_token_like(&node) {
            let token = self.leaf(&node);
            self.builder.push_token(parent, token);
            return;
        }
        for child in children(node) {
            self.qualified_name_into(parent, child);
        }
    }

    fn package(&mut self, node: Node) -> NodeId {
        let id = self.located("packageDeclaration", &node);
        for child in children(node) {
            match child.kind() {
                "identifier" | "scoped_identifier" => self.qualified_name_into(id, child),
                _ => self.push_any(id, child),
            }
        }
        id
    }

    fn import(&mut self, node: Node) -> NodeId {
        let id = self.located("importDeclaration", &node);
        for child in children(node) {
            match child.kind() {
                "identifier" | "scoped_identifier" => {
                    let name = self.located("packageOrTypeName", &child);
                    self.qualified_name_into(name, child);
                    self.builder.push_node(id, "packageOrTypeName", name);
                }
                _ => self.push_any(id, child),
            }
        }
        id
    }

    fn class(&mut self, node: Node) -> NodeId {
        let id = self.located("classDeclaration", &node);
        let normal = self.located("normalClassDeclaration", &node);

        for child in children(node) {
            match child.kind() {
                "modifiers" => {
                    for modifier in children(child) {
                        let class_modifier = self.located("classModifier", &modifier);
                        self.modifier_into(class_modifier, modifier);
                        self.builder.push_node(id, "classModifier", class_modifier);
                    }
                }
                "identifier" => {
                    let type_identifier = self.located("typeIdentifier", &child);
                    let token = self.leaf(&child);
                    self.builder.push_token(type_identifier, token);
                    self.builder
                        .push_node(normal, "typeIdentifier", type_identifier);
                }
                "superclass" => {
                    let superclass = self.located("superclass", &child);
                    for part in children(child) {
                        if is_token_like(&part) && !part.is_named() {
                            let token = self.keyword_token(&part);
                            self.builder.push_token(superclass, token);
                        } else {
                            let class_type = self.class_type(part);
                            self.builder.push_node(superclass, "classType", class_type);
                        }
                    }
                    self.builder.push_node(normal, "superclass", superclass);
                }
                "super_interfaces" => {
                    let interfaces = self.superinterfaces(child);
                    self.builder
                        .push_node(normal, "superinterfaces", interfaces);
                }
                "class_body" => {
                    let body = self.class_body(child);
                    self.builder.push_node(normal, "classBody", body);
                }
                "class" => {
                    let token = self.keyword_token(&child);
                    self.builder.push_token(normal, token);
                }
                _ => self.push_any(normal, child),
            }
        }

        self.builder
            .push_node(id, "normalClassDeclaration", normal);
        id
    }

    /// Lower one entry of a `modifiers` node: an annotation or a keyword token
    fn modifier_into(&mut self, parent: NodeId, modifier: Node) {
        match modifier.kind() {
            "annotation" | "marker_annotation" => {
                let annotation = self.annotation(modifier);
                self.builder.push_node(parent, "annotation", annotation);
            }
            _ if is_token_like(&modifier) => {
                let token = self.keyword_token(&modifier);
                self.builder.push_token(parent, token);
            }
            _ => self.push_any(parent, modifier),
        }
    }

    fn superinterfaces(&mut self, node: Node) -> NodeId {
        let id = self.located("superinterfaces", &node);
        for child in children(node) {
            if child.kind() == "type_list" {
                let list = self.located("interfaceTypeList", &child);
                for item in children(child) {
                    if is_token_like(&item) && !item.is_named() {
                        let token = self.leaf(&item);
                        self.builder.push_token(list, token);
                        continue;
                    }
                    let interface_type = self.located("interfaceType", &item);
                    let class_type = self.class_type(item);
                    self.builder
                        .push_node(interface_type, "classType", class_type);
                    self.builder
                        .push_node(list, "interfaceType", interface_type);
                }
                self.builder.push_node(id, "interfaceTypeList", list);
            } else {
                let token = self.keyword_token(&child);
                self.builder.push_token(id, token);
            }
        }
        id
    }

    fn class_type(&mut self, node: Node) -> NodeId {
        let id = self.located("classType", &node);
        self.class_type_into(id, node);
        id
    }

    /// Flatten a (possibly scoped, possibly generic) class type reference
    fn class_type_into(&mut self, parent: NodeId, node: Node) {
        match node.kind() {
            "type_identifier" | "identifier" | "." => {
                let token = self.leaf(&node);
                self.builder.push_token(parent, token);
            }
            "scoped_type_identifier" | "generic_type" => {
                for child in children(node) {
                    self.class_type_into(parent, child);
                }
            }
            "type_arguments" => {
                let id = self.generic(node);
                self.builder.push_node(parent, "typeArguments", id);
            }
            _ => self.push_any(parent, node),
        }
    }

    fn class_body(&mut self, node: Node) -> NodeId {
        let id = self.located("classBody", &node);
        for child in children(node) {
            match child.kind() {
                "{" | "}" => {
                    let token = self.leaf(&child);
                    self.builder.push_token(id, token);
                }
                "field_declaration"
                | "method_declaration"
                | "class_declaration"
                | "interface_declaration"
                | "enum_declaration"
                | "record_declaration"
                | ";" => {
                    let body_decl = self.located("classBodyDeclaration", &child);
                    let member = self.located("classMemberDeclaration", &child);
                    match child.kind() {
                        "field_declaration" => {
                            let field = self.field(child);
                            self.builder.push_node(member, "fieldDeclaration", field);
                        }
                        "method_declaration" => {
                            let method = self.generic(child);
                            self.builder.push_node(member, "methodDeclaration", method);
                        }
                        "class_declaration" => {
                            let class = self.class(child);
                            self.builder.push_node(member, "classDeclaration", class);
                        }
                        _ => self.push_any(member, child),
                    }
                    self.builder
                        .push_node(body_decl, "classMemberDeclaration", member);
                    self.builder
                        .push_node(id, "classBodyDeclaration", body_decl);
                }
                "constructor_declaration" => {
                    let body_decl = self.located("classBodyDeclaration", &child);
                    let ctor = self.generic(child);
                    self.builder
                        .push_node(body_decl, "constructorDeclaration", ctor);
                    self.builder
                        .push_node(id, "classBodyDeclaration", body_decl);
                }
                _ => {
                    let body_decl = self.located("classBodyDeclaration", &child);
                    self.push_any(body_decl, child);
                    self.builder
                        .push_node(id, "classBodyDeclaration", body_decl);
                }
            }
        }
        id
    }

    fn field(&mut self, node: Node) -> NodeId {
        let id = self.located("fieldDeclaration", &node);
        let mut declarators: Option<NodeId> = None;

        for child in children(node) {
            match child.kind() {
                "modifiers" => {
                    for modifier in children(child) {
                        let field_modifier = self.located("fieldModifier", &modifier);
                        self.modifier_into(field_modifier, modifier);
                        self.builder.push_node(id, "fieldModifier", field_modifier);
                    }
                }
                "variable_declarator" => {
                    let list = match declarators {
                        Some(list) => list,
                        None => {
                            let list = self.located("variableDeclaratorList", &child);
                            self.builder.push_node(id, "variableDeclaratorList", list);
                            declarators = Some(list);
                            list
                        }
                    };
                    let declarator = self.variable_declarator(child);
                    self.builder
                        .push_node(list, "variableDeclarator", declarator);
                }
                "," => {
                    let token = self.leaf(&child);
                    match declarators {
                        Some(list) => self.builder.push_token(list, token),
                        None => self.builder.push_token(id, token),
                    };
                }
                ";" => {
                    let token = self.leaf(&child);
                    self.builder.push_token(id, token);
                }
                _ if child.is_named() => {
                    let unann = self.unann_type(child);
                    self.builder.push_node(id, "unannType", unann);
                }
                _ => self.push_any(id, child),
            }
        }
        id
    }

    fn variable_declarator(&mut self, node: Node) -> NodeId {
        let id = self.located("variableDeclarator", &node);
        let mut seen_equals = false;
        for child in children(node) {
            match child.kind() {
                "identifier" if !seen_equals => {
                    let declarator_id = self.located("variableDeclaratorId", &child);
                    let token = self.leaf(&child);
                    self.builder.push_token(declarator_id, token);
                    self.builder
                        .push_node(id, "variableDeclaratorId", declarator_id);
                }
                "=" => {
                    seen_equals = true;
                    let token = self.leaf(&child);
                    self.builder.push_token(id, token);
                }
                _ if seen_equals => {
                    let initializer = self.located("variableInitializer", &child);
                    self.push_any(initializer, child);
                    self.builder
                        .push_node(id, "variableInitializer", initializer);
                }
                _ => self.push_any(id, child),
            }
        }
        id
    }

    fn unann_type(&mut self, node: Node) -> NodeId {
        let id = self.located("unannType", &node);
        match node.kind() {
            "integral_type" | "floating_point_type" | "boolean_type" => {
                let wrapper = self.primitive(node, None);
                self.builder
                    .push_node(id, "unannPrimitiveTypeWithOptionalDimsSuffix", wrapper);
            }
            "type_identifier" | "scoped_type_identifier" | "generic_type" => {
                let reference = self.reference_type(node, None);
                self.builder
                    .push_node(id, "unannReferenceType", reference);
            }
            "array_type" => {
                let element = node.child_by_field_name("element");
                let dimensions = node.child_by_field_name("dimensions");
                match element {
                    Some(element)
                        if matches!(
                            element.kind(),
                            "integral_type" | "floating_point_type" | "boolean_type"
                        ) =>
                    {
                        let wrapper = self.primitive(element, dimensions);
                        self.builder.push_node(
                            id,
                            "unannPrimitiveTypeWithOptionalDimsSuffix",
                            wrapper,
                        );
                    }
                    Some(element) => {
                        let reference = self.reference_type(element, dimensions);
                        self.builder
                            .push_node(id, "unannReferenceType", reference);
                    }
                    None => self.push_any(id, node),
                }
            }
            _ => self.push_any(id, node),
        }
        id
    }

    fn dims(&mut self, dimensions: Node) -> NodeId {
        let id = self.located("dims", &dimensions);
        for child in children(dimensions) {
            self.push_any(id, child);
        }
        id
    }

    fn primitive(&mut self, node: Node, dimensions: Option<Node>) -> NodeId {
        let wrapper = self.located("unannPrimitiveTypeWithOptionalDimsSuffix", &node);
        let primitive = self.located("unannPrimitiveType", &node);
        let keyword = self.keyword_token(&node);

        match node.kind() {
            "boolean_type" => {
                self.builder.push_token(primitive, keyword);
            }
            kind => {
                let numeric = self.located("numericType", &node);
                let family = if kind == "integral_type" {
                    "integralType"
                } else {
                    "floatingPointType"
                };
                let family_id = self.located(family, &node);
                self.builder.push_token(family_id, keyword);
                self.builder.push_node(numeric, family, family_id);
                self.builder.push_node(primitive, "numericType", numeric);
            }
        }

        self.builder
            .push_node(wrapper, "unannPrimitiveType", primitive);
        if let Some(dimensions) = dimensions {
            let dims = self.dims(dimensions);
            self.builder.push_node(wrapper, "dims", dims);
        }
        wrapper
    }

    fn reference_type(&mut self, node: Node, dimensions: Option<Node>) -> NodeId {
        let reference = self.located("unannReferenceType", &node);
        let class_or_interface = self.located("unannClassOrInterfaceType", &node);
        let class_type = self.located("unannClassType", &node);
        self.class_type_into(class_type, node);
        self.builder
            .push_node(class_or_interface, "unannClassType", class_type);
        self.builder
            .push_node(reference, "unannClassOrInterfaceType", class_or_interface);
        if let Some(dimensions) = dimensions {
            let dims = self.dims(dimensions);
            self.builder.push_node(reference, "dims", dims);
        }
        reference
    }

    fn annotation(&mut self, node: Node) -> NodeId {
        let id = self.located("annotation", &node);
        for child in children(node) {
            match child.kind() {
                "identifier" | "scoped_identifier" => {
                    let type_name = self.located("typeName", &child);
                    self.qualified_name_into(type_name, child);
                    self.builder.push_node(id, "typeName", type_name);
                }
                "annotation_argument_list" => self.annotation_arguments(id, child),
                _ => self.push_any(id, child),
            }
        }
        id
    }

    fn annotation_arguments(&mut self, annotation: NodeId, node: Node) {
        let mut pairs: Option<NodeId> = None;
        for child in children(node) {
            match child.kind() {
                "element_value_pair" => {
                    let list = match pairs {
                        Some(list) => list,
                        None => {
                            let list = self.located("elementValuePairList", &child);
                            self.builder
                                .push_node(annotation, "elementValuePairList", list);
                            pairs = Some(list);
                            list
                        }
                    };
                    let pair = self.element_value_pair(child);
                    self.builder.push_node(list, "elementValuePair", pair);
                }
                "(" | ")" => {
                    let token = self.leaf(&child);
                    self.builder.push_token(annotation, token);
                }
                "," => {
                    let token = self.leaf(&child);
                    self.builder.push_token(pairs.unwrap_or(annotation), token);
                }
                _ => {
                    let value = self.element_value(child);
                    self.builder.push_node(annotation, "elementValue", value);
                }
            }
        }
    }

    fn element_value_pair(&mut self, node: Node) -> NodeId {
        let id = self.located("elementValuePair", &node);
        let mut seen_equals = false;
        for child in children(node) {
            match child.kind() {
                "identifier" if !seen_equals => {
                    let token = self.leaf(&child);
                    self.builder.push_token(id, token);
                }
                "=" => {
                    seen_equals = true;
                    let token = self.leaf(&child);
                    self.builder.push_token(id, token);
                }
                _ => {
                    let value = self.element_value(child);
                    self.builder.push_node(id, "elementValue", value);
                }
            }
        }
        id
    }

    fn element_value(&mut self, node: Node) -> NodeId {
        let id = self.located("elementValue", &node);
        self.push_any(id, node);
        id
    }
}
