/// Helper functions for Java extraction
/// Type rendering, keyword tables and naming conventions
use once_cell::sync::Lazy;
use regex::Regex;

use crate::cst::Token;

pub(crate) const INTEGRAL_TYPES: &[&str] = &["int", "byte", "short", "long", "char"];
pub(crate) const FLOATING_TYPES: &[&str] = &["float", "double"];

pub(crate) fn is_primitive_keyword(word: &str) -> bool {
    word == "boolean" || INTEGRAL_TYPES.contains(&word) || FLOATING_TYPES.contains(&word)
}

/// Reserved words and literals, never a type name
pub(crate) const JAVA_RESERVED_WORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
    "const", "continue", "default", "do", "double", "else", "enum", "extends", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this",
    "throw", "throws", "transient", "try", "void", "volatile", "while", "true", "false",
    "null", "var", "record", "sealed", "permits", "non-sealed", "yield",
];

pub(crate) fn is_reserved_word(word: &str) -> bool {
    JAVA_RESERVED_WORDS.contains(&word)
}

pub(crate) static INTERFACE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z0-9_]*$").unwrap());

/// Capitalized identifier, the usual spelling of a type name
pub(crate) fn is_type_like_name(word: &str) -> bool {
    INTERFACE_NAME.is_match(word) && !is_reserved_word(word)
}

pub(crate) const VISIBILITY_KEYWORDS: &[&str] = &["public", "private", "protected"];

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn needs_space(prev: &str, next: &str) -> bool {
    let prev_word = prev.chars().next_back().map_or(false, is_word_char);
    let next_word = next.chars().next().map_or(false, is_word_char);
    prev == ","
        || prev == "&"
        || next == "&"
        || (prev_word && next_word)
        || (prev == "?" && next_word)
}

/// Render type tokens back to source-like text: `Map<String, List<Long>>`, `int[]`
pub(crate) fn render_type_tokens(tokens: &[&Token]) -> String {
    let mut out = String::new();
    let mut prev: Option<&str> = None;
    for token in tokens {
        let image = token.image.as_str();
        if let Some(prev) = prev {
            if needs_space(prev, image) {
                out.push(' ');
            }
        }
        out.push_str(image);
        prev = Some(image);
    }
    out
}
