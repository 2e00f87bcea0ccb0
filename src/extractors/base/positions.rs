// Position calculation seam
//
// Extractors only decide *when* a position is computed; how it is computed belongs to
// the calculator. Both operations are total and fall back to line 0, column 0.

use crate::cst::{NodeRef, Span, Token};

use super::types::{Position, Range};

pub trait PositionCalculator: Send + Sync {
    fn calculate_position(&self, node: NodeRef<'_>, lines: &[&str]) -> Position;
    fn calculate_range(&self, node: NodeRef<'_>, lines: &[&str]) -> Range;
}

/// Derives positions from node locations, or from the first/last token's span
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenPositionCalculator;

impl TokenPositionCalculator {
    fn span_bounds(node: NodeRef<'_>) -> Option<(Position, Position)> {
        if let Some(location) = node.node().and_then(|n| n.location) {
            return Some(Self::bounds(&location));
        }
        let tokens = node.collect_tokens();
        let first = tokens.iter().find_map(|t: &&Token| t.span)?;
        let last = tokens.iter().rev().find_map(|t| t.span).unwrap_or(first);
        Some((Self::bounds(&first).0, Self::bounds(&last).1))
    }

    fn bounds(span: &Span) -> (Position, Position) {
        (
            Position::new(span.start.row, span.start.column),
            Position::new(span.end.row, span.end.column),
        )
    }

    /// Reject positions outside the source the caller handed us
    fn within(position: Position, lines: &[&str]) -> bool {
        lines.is_empty() || (position.line as usize) < lines.len()
    }
}

impl PositionCalculator for TokenPositionCalculator {
    fn calculate_position(&self, node: NodeRef<'_>, lines: &[&str]) -> Position {
        match Self::span_bounds(node) {
            Some((start, _)) if Self::within(start, lines) => start,
            _ => Position::default(),
        }
    }

    fn calculate_range(&self, node: NodeRef<'_>, lines: &[&str]) -> Range {
        match Self::span_bounds(node) {
            Some((start, end)) if Self::within(start, lines) => {
                let end = if end < start { start } else { end };
                Range::new(start, end)
            }
            _ => Range::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::{CstBuilder, NodeId};

    #[test]
    fn test_position_from_tokens() {
        let mut b = CstBuilder::new();
        let root = b.node("annotation");
        b.push_token(root, Token::new("At", "@").at(4, 2));
        let name = b.child(root, "typeName");
        b.push_token(name, Token::new("Identifier", "Service").at(4, 3));
        let cst = b.finish(root);

        let calc = TokenPositionCalculator;
        let node = NodeRef::root(&cst).unwrap();
        let lines = vec![""; 10];
        assert_eq!(calc.calculate_position(node, &lines), Position::new(4, 2));
        let range = calc.calculate_range(node, &lines);
        assert_eq!(range.start, Position::new(4, 2));
        assert_eq!(range.end, Position::new(4, 10));
    }

    #[test]
    fn test_fallback_for_unlocated_and_dangling_nodes() {
        let mut b = CstBuilder::new();
        let root = b.node("annotation");
        b.token(root, "At", "@");
        let cst = b.finish(root);

        let calc = TokenPositionCalculator;
        let lines = vec!["@"];
        assert_eq!(
            calc.calculate_position(NodeRef::root(&cst).unwrap(), &lines),
            Position::default()
        );
        assert_eq!(
            calc.calculate_range(NodeRef::new(&cst, NodeId(9)), &lines),
            Range::default()
        );
    }

    #[test]
    fn test_out_of_bounds_position_falls_back() {
        let mut b = CstBuilder::new();
        let root = b.node("annotation");
        b.push_token(root, Token::new("At", "@").at(40, 0));
        let cst = b.finish(root);

        let lines = vec!["only one line"];
        assert_eq!(
            TokenPositionCalculator.calculate_position(NodeRef::root(&cst).unwrap(), &lines),
            Position::default()
        );
    }
}
