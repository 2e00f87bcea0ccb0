// Multi-line declaration reassembly
//
// Constructors, setters and bean methods are recovered from raw text. A declaration
// may span several physical lines, so lines are joined until the parameter list has
// closed and a body `{` or a terminating `;` shows up outside string literals.
// Trailing `//` comments are dropped before joining.

use super::scanner::{matching_paren, strip_line_comment, LexicalScanner};
use crate::extractors::base::{Position, Range};

pub const DEFAULT_MAX_DECLARATION_LINES: usize = 64;

/// Reassemble the declaration starting at `start`
///
/// Returns the normalized declaration text and the index of the line that completed
/// it, or `None` when the declaration does not complete within the default bound.
pub fn reassemble_declaration(lines: &[&str], start: usize) -> Option<(String, usize)> {
    reassemble_declaration_bounded(lines, start, DEFAULT_MAX_DECLARATION_LINES)
}

pub fn reassemble_declaration_bounded(
    lines: &[&str],
    start: usize,
    max_lines: usize,
) -> Option<(String, usize)> {
    let mut scanner = LexicalScanner::new();
    let mut joined: Vec<&str> = Vec::new();

    for (index, line) in lines.iter().enumerate().skip(start).take(max_lines.max(1)) {
        joined.push(strip_line_comment(line).trim());
        let summary = scanner.feed_line(line);
        let closed = scanner.is_closed() && scanner.depth() == 0;
        if closed && (summary.has_body_open || summary.has_terminator) {
            return Some((normalize_whitespace(&joined.join(" ")), index));
        }
    }

    None
}

/// Position of the first non-blank character of `start`, and the range up to the end of `end`
pub fn declaration_span(lines: &[&str], start: usize, end: usize) -> (Position, Range) {
    let indent = |line: &str| (line.len() - line.trim_start().len()) as u32;
    let start_position = lines
        .get(start)
        .map(|line| Position::new(start as u32, indent(line)))
        .unwrap_or_default();
    let end_position = lines
        .get(end)
        .map(|line| Position::new(end as u32, line.trim_end().len() as u32))
        .unwrap_or(start_position);
    (start_position, Range::new(start_position, end_position.max(start_position)))
}

/// Collapse every whitespace run to a single space
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text between the `(` following `name` and its matching `)`
pub fn parameter_list<'a>(declaration: &'a str, name: &str) -> Option<&'a str> {
    if name.is_empty() {
        let open = declaration.find('(')?;
        let close = matching_paren(declaration, open)?;
        return Some(&declaration[open + 1..close]);
    }

    for (index, _) in declaration.match_indices(name) {
        let boundary = declaration[..index]
            .chars()
            .next_back()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '_' || c == '$'));
        if !boundary {
            continue;
        }
        let after = &declaration[index + name.len()..];
        let trimmed = after.trim_start();
        if !trimmed.starts_with('(') {
            continue;
        }
        let open = index + name.len() + (after.len() - trimmed.len());
        let close = matching_paren(declaration, open)?;
        return Some(&declaration[open + 1..close]);
    }

    None
}
