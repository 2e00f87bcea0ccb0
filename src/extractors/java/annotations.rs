/// Annotation recognition
///
/// Two paths: annotation nodes from the tree, and a lexical backward scan over raw
/// lines for constructs reconstructed from text (constructors, setters, bean methods).
use crate::cst::NodeRef;
use crate::errors::{recover, ExtractionError, Result};
use crate::extractors::base::{AnnotationInfo, SemanticAnnotationKind};
use crate::extractors::java::JavaExtractor;
use crate::extractors::lexical::{mask_string_literals, split_leading_annotations};

use super::annotation_params::decode_parameters;
use super::helpers::VISIBILITY_KEYWORDS;
use super::vocabulary::AnnotationTarget;

/// Decode an `annotation` node; `None` for names outside the vocabulary
pub(super) fn parse_annotation(
    extractor: &JavaExtractor,
    node: Option<NodeRef<'_>>,
    lines: &[&str],
    target: AnnotationTarget,
) -> Option<AnnotationInfo> {
    let snippet = extractor.base().node_snippet(node);
    recover("parse_annotation", &snippet, || {
        try_parse_annotation(extractor, node, lines, target)
    })
}

fn try_parse_annotation(
    extractor: &JavaExtractor,
    node: Option<NodeRef<'_>>,
    lines: &[&str],
    target: AnnotationTarget,
) -> Result<Option<AnnotationInfo>> {
    let Some(node) = node.filter(|n| n.is("annotation")) else {
        return Ok(None);
    };

    let type_name = node.child_node("typeName").ok_or_else(|| {
        ExtractionError::annotation_parsing("annotation has no typeName").with_construct("annotation")
    })?;
    let identifiers: Vec<&str> = type_name
        .tokens("Identifier")
        .map(|t| t.image.as_str())
        .collect();
    let Some(simple_name) = identifiers.last().copied() else {
        return Ok(None);
    };

    let vocabulary = &extractor.base().vocabulary;
    let kind = if identifiers.len() > 1 {
        vocabulary
            .resolve(&identifiers.join("."), target)
            .or_else(|| vocabulary.resolve(simple_name, target))
    } else {
        vocabulary.resolve(simple_name, target)
    };
    let Some(kind) = kind else {
        return Ok(None);
    };

    let position = extractor.base().positions.calculate_position(node, lines);
    Ok(Some(AnnotationInfo {
        name: simple_name.to_string(),
        kind,
        line: position.line,
        column: position.column,
        parameters: decode_parameters(node),
    }))
}

/// How a physical line participates in the backward annotation scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind {
    Blank,
    Comment,
    /// Only annotations on the line
    Annotation,
    /// Boundary: `{`, `}`, `;` or a visibility keyword
    Code,
    Other,
}

pub(crate) fn classify_line(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with('*') {
        return LineKind::Comment;
    }

    let (annotations, rest) = split_leading_annotations(trimmed);
    if !annotations.is_empty() {
        if rest.is_empty() || !is_code(rest) {
            return LineKind::Annotation;
        }
        return LineKind::Code;
    }
    if is_code(trimmed) {
        LineKind::Code
    } else {
        LineKind::Other
    }
}

fn is_code(text: &str) -> bool {
    let masked = mask_string_literals(text);
    let code = masked.split("//").next().unwrap_or("");
    code.contains(['{', '}', ';'])
        || code
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .any(|word| VISIBILITY_KEYWORDS.contains(&word))
}

/// Whether `line` itself starts with an annotation of `kind`
pub(crate) fn line_has_annotation(
    extractor: &JavaExtractor,
    line: &str,
    kind: SemanticAnnotationKind,
) -> bool {
    let Some(pattern) = extractor.base().vocabulary.line_pattern(kind) else {
        return false;
    };
    let (annotations, _) = split_leading_annotations(line.trim());
    annotations
        .iter()
        .any(|a| pattern.is_match(&format!("@{}", a.name)))
}

/// Backward scan from `from_line` (inclusive) for an annotation of `kind`
pub(super) fn detect_annotation_in_lines(
    extractor: &JavaExtractor,
    lines: &[&str],
    from_line: usize,
    kind: SemanticAnnotationKind,
    max_lookback: usize,
) -> bool {
    if lines.is_empty() {
        return false;
    }
    let start = from_line.min(lines.len() - 1);

    for index in (0..=start).rev().take(max_lookback) {
        let line = lines[index];
        match classify_line(line) {
            LineKind::Annotation => {
                if line_has_annotation(extractor, line, kind) {
                    return true;
                }
            }
            LineKind::Code => return false,
            LineKind::Blank | LineKind::Comment | LineKind::Other => {}
        }
    }
    false
}

/// Recognized annotations written above and inline on the declaration at `method_line`
///
/// Source order, each tagged with its own line, column 0 and no parameters.
pub(super) fn extract_method_annotations_from_lines(
    extractor: &JavaExtractor,
    lines: &[&str],
    method_line: usize,
    target: AnnotationTarget,
) -> Vec<AnnotationInfo> {
    let Some(declaration) = lines.get(method_line) else {
        return Vec::new();
    };
    let lookback = extractor.base().config.annotation_lookback;
    let mut above = Vec::new();

    for index in (0..method_line).rev().take(lookback) {
        let line = lines[index];
        match classify_line(line) {
            LineKind::Annotation => {
                let mut on_line = recognized_on_line(extractor, line, index, target);
                on_line.reverse();
                above.extend(on_line);
            }
            LineKind::Code => break,
            LineKind::Blank | LineKind::Comment | LineKind::Other => {}
        }
    }
    above.reverse();

    above.extend(recognized_on_line(extractor, declaration, method_line, target));
    above
}

fn recognized_on_line(
    extractor: &JavaExtractor,
    line: &str,
    index: usize,
    target: AnnotationTarget,
) -> Vec<AnnotationInfo> {
    let (annotations, _) = split_leading_annotations(line.trim());
    annotations
        .iter()
        .filter_map(|a| {
            let kind = extractor.base().vocabulary.resolve(&a.name, target)?;
            Some(AnnotationInfo {
                name: a.simple_name().to_string(),
                kind,
                line: index as u32,
                column: 0,
                parameters: Default::default(),
            })
        })
        .collect()
}
