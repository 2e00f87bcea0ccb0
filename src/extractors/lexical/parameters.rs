// Parameter list splitting

use super::scanner::split_leading_annotations;
use crate::extractors::base::ParameterInfo;

/// Split on commas outside generic angle brackets
///
/// Only `<`/`>` are tracked. Pieces are trimmed and empty pieces dropped.
pub fn split_top_level_commas(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut current = String::new();

    for ch in text.chars() {
        match ch {
            '<' => depth += 1,
            '>' => depth = (depth - 1).max(0),
            ',' if depth == 0 => {
                parts.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(ch);
    }
    parts.push(current);

    parts
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Parse `[@Annotation(...)]* [final] Type name`
pub fn parse_parameter(text: &str) -> Option<ParameterInfo> {
    let mut rest = text.trim();
    loop {
        let (annotations, after) = split_leading_annotations(rest);
        let after = after.trim_start();
        if let Some(stripped) = after.strip_prefix("final") {
            if stripped.starts_with(char::is_whitespace) {
                rest = stripped.trim_start();
                continue;
            }
        }
        let progressed = !annotations.is_empty();
        rest = after;
        if !progressed {
            break;
        }
    }

    let tokens: Vec<&str> = rest.split_whitespace().collect();
    if tokens.len() < 2 {
        return None;
    }
    let (name, type_tokens) = tokens.split_last()?;
    if name.contains('<') || name.contains('>') {
        return None;
    }

    Some(ParameterInfo::new(type_tokens.join(" "), *name))
}

/// Split and parse a whole parameter list, dropping unparseable entries
pub fn parse_parameter_list(text: &str) -> Vec<ParameterInfo> {
    split_top_level_commas(text)
        .iter()
        .filter_map(|p| parse_parameter(p))
        .collect()
}
