/// Lexical detection of method declaration heads
///
/// A head is `[visibility] [modifiers] [<T>] ReturnType name(`, possibly with the `(`
/// on one of the following lines. Leading annotations and string contents are ignored.
use once_cell::sync::Lazy;
use regex::Regex;

use crate::extractors::lexical::{mask_string_literals, split_leading_annotations};

use super::annotations::{classify_line, LineKind};

const HEAD_TAIL: &str = r"((?:(?:static|final|synchronized|abstract|native|default|strictfp)\s+)*)(?:<[^()]*>\s*)?([A-Za-z_$][\w$.]*(?:\s*<[^()]*>)?(?:\s*\[\s*\])*)\s+([A-Za-z_$][\w$]*)\s*(\(|$)";

static VISIBLE_HEAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^(public|private|protected)\s+{}", HEAD_TAIL)).unwrap()
});

static ANY_HEAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^(?:(public|private|protected)\s+)?{}", HEAD_TAIL)).unwrap()
});

/// Words that can sit where a return type would, but never start a method
const NOT_A_RETURN_TYPE: &[&str] = &[
    "class", "interface", "enum", "record", "new", "return", "throw", "else", "case",
    "package", "import", "extends", "implements", "assert", "yield",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MethodHead {
    pub name: String,
    pub return_type: String,
    pub line: usize,
}

/// Method head starting on `lines[index]`
///
/// With `require_visibility` only `public`/`private`/`protected` heads qualify. A head
/// whose `(` is not on its own line qualifies when the next non-blank line within
/// `paren_lookahead` lines starts with `(`.
pub(crate) fn method_head(
    lines: &[&str],
    index: usize,
    paren_lookahead: usize,
    require_visibility: bool,
) -> Option<MethodHead> {
    let line = lines.get(index)?;
    if matches!(classify_line(line), LineKind::Comment | LineKind::Blank) {
        return None;
    }
    let masked = mask_string_literals(line);
    let (_, rest) = split_leading_annotations(&masked);

    let pattern: &Regex = if require_visibility {
        &VISIBLE_HEAD
    } else {
        &ANY_HEAD
    };
    let caps = pattern.captures(rest.trim_end())?;
    let return_type = caps.get(3)?.as_str().trim();
    let name = caps.get(4)?.as_str();
    if NOT_A_RETURN_TYPE.contains(&return_type) || NOT_A_RETURN_TYPE.contains(&name) {
        return None;
    }

    let paren_on_line = caps.get(5).map_or(false, |m| m.as_str() == "(");
    if !paren_on_line && !paren_follows(lines, index, paren_lookahead) {
        return None;
    }

    Some(MethodHead {
        name: name.to_string(),
        return_type: return_type.to_string(),
        line: index,
    })
}

fn paren_follows(lines: &[&str], index: usize, lookahead: usize) -> bool {
    lines
        .iter()
        .skip(index + 1)
        .take(lookahead)
        .map(|l| l.trim())
        .find(|l| !l.is_empty())
        .map_or(false, |l| l.starts_with('('))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_heads() {
        let lines = vec![
            "    @Autowired public void setRepo(Repo repo) {",
            "    public static <T> List<T> wrap(T item) {",
            "    private Map<String, Integer>[] counts(int x);",
        ];
        let head = method_head(&lines, 0, 2, true).unwrap();
        assert_eq!((head.return_type.as_str(), head.name.as_str()), ("void", "setRepo"));
        let head = method_head(&lines, 1, 2, true).unwrap();
        assert_eq!((head.return_type.as_str(), head.name.as_str()), ("List<T>", "wrap"));
        let head = method_head(&lines, 2, 2, true).unwrap();
        assert_eq!(head.return_type, "Map<String, Integer>[]");
    }

    #[test]
    fn test_split_heads_and_lookahead() {
        let lines = vec!["    public void setRepo", "", "        (Repo repo) {"];
        assert!(method_head(&lines, 0, 2, true).is_some());
        assert!(method_head(&lines, 0, 1, true).is_none(), "paren is two lines down");
    }

    #[test]
    fn test_non_methods_are_rejected() {
        let lines = vec![
            "public class OrderService {",
            "    public OrderService(Repo repo) {",
            "    private final Repo repo;",
            "        return build(x);",
            "    // public void setRepo(Repo repo) {",
            "    String label = format(\"public void setX(\");",
        ];
        for index in 0..lines.len() {
            assert!(
                method_head(&lines, index, 2, true).is_none(),
                "line {} must not be a method head",
                index
            );
        }
        assert!(method_head(&lines, 3, 2, false).is_none());
    }

    #[test]
    fn test_visibility_is_optional_when_allowed() {
        let lines = vec!["    DataSource dataSource(Environment env) {"];
        assert!(method_head(&lines, 0, 2, true).is_none());
        let head = method_head(&lines, 0, 2, false).unwrap();
        assert_eq!(head.name, "dataSource");
        assert_eq!(head.return_type, "DataSource");
    }
}
