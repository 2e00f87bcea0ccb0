/// Annotation argument decoding
///
/// Priority: a lone string literal binds to `value`; a pair list maps each key to the
/// first string literal in its value; anything else binds the first string literal of
/// the whole annotation to `value`. Non-string values are not decoded.
use indexmap::IndexMap;

use crate::cst::{NodeRef, Token};

use super::shapes::AnnotationArgsShape;

pub(crate) fn decode_parameters(annotation: NodeRef<'_>) -> IndexMap<String, String> {
    let mut parameters = IndexMap::new();

    match AnnotationArgsShape::of(annotation) {
        AnnotationArgsShape::SingleString(literal) => {
            parameters.insert("value".to_string(), unquote(&literal.image));
        }
        AnnotationArgsShape::Pairs(pairs) => {
            for pair in pairs {
                let Some(key) = pair.token("Identifier") else {
                    continue;
                };
                if let Some(literal) = first_string_literal(pair) {
                    parameters.insert(key.image.clone(), unquote(&literal.image));
                }
            }
        }
        AnnotationArgsShape::Unrecognized(node) => {
            if let Some(literal) = first_string_literal(node) {
                parameters.insert("value".to_string(), unquote(&literal.image));
            }
        }
    }

    parameters
}

fn first_string_literal(node: NodeRef<'_>) -> Option<&Token> {
    node.find_token(|t| t.is("StringLiteral"))
}

/// Strip the quotes of a string literal or text block
pub(crate) fn unquote(literal: &str) -> String {
    let literal = literal.trim();
    if let Some(inner) = literal
        .strip_prefix("\"\"\"")
        .and_then(|s| s.strip_suffix("\"\"\""))
    {
        return inner.trim_start_matches(['\r', '\n']).to_string();
    }
    literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(literal)
        .to_string()
}
