// String-literal aware character scanning
//
// One state machine serves every lexical extractor: quote state (outside, single,
// double) times parenthesis depth. A backslash inside a literal escapes the next
// character, so an escaped quote never toggles the quote state.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuoteState {
    #[default]
    Outside,
    SingleQuoted,
    DoubleQuoted,
}

/// What one physical line contributed to a scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineSummary {
    /// A parenthesis group closed on this line and depth is zero at its end
    pub closed_on_line: bool,
    /// `{` seen outside string literals
    pub has_body_open: bool,
    /// `;` seen outside string literals
    pub has_terminator: bool,
}

#[derive(Debug, Clone, Default)]
pub struct LexicalScanner {
    quote: QuoteState,
    escaped: bool,
    depth: u32,
    seen_open: bool,
    closed: bool,
}

impl LexicalScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one character; returns it back when it is outside any string literal
    pub fn step(&mut self, ch: char) -> Option<char> {
        match self.quote {
            QuoteState::Outside => {
                match ch {
                    '"' => self.quote = QuoteState::DoubleQuoted,
                    '\'' => self.quote = QuoteState::SingleQuoted,
                    '(' => {
                        self.depth += 1;
                        self.seen_open = true;
                    }
                    ')' => {
                        if self.depth > 0 {
                            self.depth -= 1;
                            if self.depth == 0 && self.seen_open {
                                self.closed = true;
                            }
                        }
                    }
                    _ => {}
                }
                match ch {
                    '"' | '\'' => None,
                    _ => Some(ch),
                }
            }
            QuoteState::SingleQuoted | QuoteState::DoubleQuoted => {
                if self.escaped {
                    self.escaped = false;
                } else if ch == '\\' {
                    self.escaped = true;
                } else if (ch == '"' && self.quote == QuoteState::DoubleQuoted)
                    || (ch == '\'' && self.quote == QuoteState::SingleQuoted)
                {
                    self.quote = QuoteState::Outside;
                }
                None
            }
        }
    }

    /// Feed a physical line, then reset quote state (literals do not span lines)
    ///
    /// A trailing `//` comment is not scanned.
    pub fn feed_line(&mut self, line: &str) -> LineSummary {
        let mut summary = LineSummary::default();
        let mut closed_here = false;
        for ch in strip_line_comment(line).chars() {
            let was_open = self.depth > 0;
            match self.step(ch) {
                Some('{') => summary.has_body_open = true,
                Some(';') => summary.has_terminator = true,
                Some(')') if was_open && self.depth == 0 => closed_here = true,
                _ => {}
            }
        }
        summary.closed_on_line = closed_here && self.depth == 0;
        self.end_line();
        summary
    }

    pub fn end_line(&mut self) {
        self.quote = QuoteState::Outside;
        self.escaped = false;
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// True once an opened parenthesis group has been closed again
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn in_string(&self) -> bool {
        self.quote != QuoteState::Outside
    }
}

/// `line` without a trailing `//` comment; `//` inside string literals is kept
pub fn strip_line_comment(line: &str) -> &str {
    let mut scanner = LexicalScanner::new();
    let mut prev_slash = false;
    for (idx, ch) in line.char_indices() {
        if scanner.step(ch) == Some('/') {
            if prev_slash {
                return &line[..idx - 1];
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
    }
    line
}

/// Byte index of the `)` matching the `(` at `open_idx`, skipping string literals
pub fn matching_paren(text: &str, open_idx: usize) -> Option<usize> {
    if text.as_bytes().get(open_idx) != Some(&b'(') {
        return None;
    }
    let mut scanner = LexicalScanner::new();
    for (offset, ch) in text[open_idx..].char_indices() {
        if scanner.step(ch) == Some(')') && scanner.depth() == 0 {
            return Some(open_idx + offset);
        }
    }
    None
}

/// Blank out string literal contents, keeping the quotes and the byte length
pub fn mask_string_literals(line: &str) -> String {
    let mut scanner = LexicalScanner::new();
    let mut out = String::with_capacity(line.len());
    for ch in line.chars() {
        let was_in_string = scanner.in_string();
        scanner.step(ch);
        if was_in_string && scanner.in_string() {
            out.extend(std::iter::repeat(' ').take(ch.len_utf8()));
        } else {
            out.push(ch);
        }
    }
    out
}

/// An annotation written at the start of a piece of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadingAnnotation {
    /// Name as written, possibly dotted
    pub name: String,
    /// Byte column of the `@`
    pub column: usize,
    /// Raw argument text between the parentheses, if any
    pub arguments: Option<String>,
}

impl LeadingAnnotation {
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

static ANNOTATION_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@\s*([A-Za-z_$][\w$]*(?:\s*\.\s*[A-Za-z_$][\w$]*)*)").unwrap()
});

/// Split leading `@Name(...)` annotations off `text`
///
/// Unbalanced arguments (continued on a following line) consume the rest of the text.
pub fn split_leading_annotations(text: &str) -> (Vec<LeadingAnnotation>, &str) {
    let mut found = Vec::new();
    let mut rest = text.trim_start();

    while rest.starts_with('@') {
        let Some(caps) = ANNOTATION_NAME.captures(rest) else {
            break;
        };
        let name: String = caps[1].chars().filter(|c| !c.is_whitespace()).collect();
        if name == "interface" {
            break;
        }
        let column = text.len() - rest.len();
        let mut after = &rest[caps[0].len()..];

        let mut arguments = None;
        let trimmed = after.trim_start();
        if trimmed.starts_with('(') {
            let open = after.len() - trimmed.len();
            match matching_paren(after, open) {
                Some(close) => {
                    arguments = Some(after[open + 1..close].to_string());
                    after = &after[close + 1..];
                }
                None => {
                    arguments = Some(after[open + 1..].to_string());
                    after = "";
                }
            }
        }

        found.push(LeadingAnnotation {
            name,
            column,
            arguments,
        });
        rest = after.trim_start();
    }

    (found, rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parens_inside_strings_are_ignored() {
        let mut scanner = LexicalScanner::new();
        let summary = scanner.feed_line(r#"public Foo(@Value("(x;{") String s) {"#);
        assert!(summary.closed_on_line);
        assert!(summary.has_body_open);
        assert!(!summary.has_terminator);
        assert_eq!(scanner.depth(), 0);
    }

    #[test]
    fn test_escaped_quote_does_not_toggle() {
        let mut scanner = LexicalScanner::new();
        let summary = scanner.feed_line(r#"call("a\")b", c);"#);
        assert!(summary.closed_on_line);
        assert!(summary.has_terminator);
    }

    #[test]
    fn test_depth_carries_across_lines() {
        let mut scanner = LexicalScanner::new();
        let first = scanner.feed_line("public Foo(Repo repo,");
        assert!(!first.closed_on_line);
        assert_eq!(scanner.depth(), 1);
        let second = scanner.feed_line("           Service service) {");
        assert!(second.closed_on_line);
        assert!(scanner.is_closed());
    }

    #[test]
    fn test_group_closed_mid_line_is_not_closed_on_line() {
        let mut scanner = LexicalScanner::new();
        let summary = scanner.feed_line(r#"@SuppressWarnings({"unchecked"}) public Foo(Map m,"#);
        assert!(!summary.closed_on_line, "depth is 1 at end of line");
        assert!(summary.has_body_open, "annotation array brace is outside strings");
        assert_eq!(scanner.depth(), 1);
    }

    #[test]
    fn test_line_comments_are_not_scanned() {
        assert_eq!(strip_line_comment("public Foo(A a, // (primary"), "public Foo(A a, ");
        assert_eq!(
            strip_line_comment(r#"@Value("http://host") String url) {"#),
            r#"@Value("http://host") String url) {"#
        );
        assert_eq!(strip_line_comment("a / b"), "a / b");

        let mut scanner = LexicalScanner::new();
        scanner.feed_line("public Foo(A a, // (primary");
        assert_eq!(scanner.depth(), 1);
        let summary = scanner.feed_line("           B b) { // done)");
        assert!(summary.closed_on_line);
        assert_eq!(scanner.depth(), 0);
    }

    #[test]
    fn test_matching_paren_skips_literals() {
        let text = r#"(a, ")", b) rest"#;
        assert_eq!(matching_paren(text, 0), Some(10));
        assert_eq!(matching_paren("(unclosed", 0), None);
        assert_eq!(matching_paren("x()", 0), None);
    }

    #[test]
    fn test_mask_string_literals_keeps_length() {
        let line = r#"@Qualifier("a;b") x;"#;
        let masked = mask_string_literals(line);
        assert_eq!(masked.len(), line.len());
        assert_eq!(masked, r#"@Qualifier("   ") x;"#);
    }

    #[test]
    fn test_split_leading_annotations() {
        let (annotations, rest) =
            split_leading_annotations(r#"@Qualifier("primary") @NonNull final Repo repo"#);
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].name, "Qualifier");
        assert_eq!(annotations[0].arguments.as_deref(), Some(r#""primary""#));
        assert_eq!(annotations[1].name, "NonNull");
        assert_eq!(annotations[1].arguments, None);
        assert_eq!(rest, "final Repo repo");
    }

    #[test]
    fn test_split_qualified_and_unbalanced_annotations() {
        let (annotations, rest) = split_leading_annotations(
            "@org.springframework.beans.factory.annotation.Autowired(required =",
        );
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].simple_name(), "Autowired");
        assert_eq!(rest, "");

        let (annotations, rest) = split_leading_annotations("@interface Marker {");
        assert!(annotations.is_empty());
        assert_eq!(rest, "@interface Marker {");
    }
}
