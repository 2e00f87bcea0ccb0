/// Constructor detection from raw source lines
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::extractors::base::{ConstructorInfo, SemanticAnnotationKind};
use crate::extractors::java::JavaExtractor;
use crate::extractors::lexical::{
    declaration_span, mask_string_literals, parameter_list, parse_parameter_list,
    reassemble_declaration_bounded,
};

use super::annotations::{self, classify_line, LineKind};

static PUBLIC_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\bpublic\s+(?:(?:abstract|final|static|sealed|non-sealed|strictfp)\s+)*class\s+([A-Za-z_$][\w$]*)",
    )
    .unwrap()
});

/// Name of the first `public class` in the source
pub fn extract_public_class_name(source_text: &str) -> Option<String> {
    source_text.lines().find_map(|line| {
        if classify_line(line) == LineKind::Comment {
            return None;
        }
        let masked = mask_string_literals(line);
        PUBLIC_CLASS
            .captures(&masked)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}

pub(super) fn extract_constructors(extractor: &JavaExtractor, source_text: &str) -> Vec<ConstructorInfo> {
    let Some(class_name) = extract_public_class_name(source_text) else {
        return Vec::new();
    };
    let escaped = regex::escape(&class_name);
    let (Ok(same_line), Ok(split_line)) = (
        Regex::new(&format!(r"\bpublic\s+{}\s*\(", escaped)),
        Regex::new(&format!(r"\bpublic\s+{}\s*$", escaped)),
    ) else {
        return Vec::new();
    };

    let config = &extractor.base().config;
    let lines: Vec<&str> = source_text.lines().collect();
    let mut constructors = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        let line = lines[index];
        if classify_line(line) == LineKind::Comment {
            index += 1;
            continue;
        }
        let masked = mask_string_literals(line);
        let matched = same_line.is_match(&masked)
            || (split_line.is_match(masked.trim_end())
                && lines
                    .get(index + 1)
                    .map_or(false, |next| next.trim_start().starts_with('(')));
        if !matched {
            index += 1;
            continue;
        }

        let Some((declaration, end)) =
            reassemble_declaration_bounded(&lines, index, config.max_declaration_lines)
        else {
            debug!(line = index, class = %class_name, "constructor declaration did not complete");
            index += 1;
            continue;
        };

        let parameters = parameter_list(&declaration, &class_name)
            .map(parse_parameter_list)
            .unwrap_or_default();
        let has_autowired_annotation =
            annotations::line_has_annotation(extractor, line, SemanticAnnotationKind::Autowired)
                || (index > 0
                    && annotations::detect_annotation_in_lines(
                        extractor,
                        &lines,
                        index - 1,
                        SemanticAnnotationKind::Autowired,
                        config.annotation_lookback,
                    ));
        let (position, range) = declaration_span(&lines, index, end);

        constructors.push(ConstructorInfo {
            parameters,
            has_autowired_annotation,
            position,
            range,
        });
        index = end + 1;
    }

    constructors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::Position;

    #[test]
    fn test_public_class_name() {
        let source = "// public class Commented {}\n@Service\npublic final class OrderService implements Api {\n}";
        assert_eq!(extract_public_class_name(source).as_deref(), Some("OrderService"));
        assert_eq!(extract_public_class_name("class Hidden {}"), None);
    }

    #[test]
    fn test_constructor_with_qualified_parameter() {
        let source = r#"public class OrderService {
    public OrderService(Repo r, @Qualifier("x") Service s) { }
}"#;
        let extractor = JavaExtractor::default();
        let constructors = extractor.extract_constructors(source);
        assert_eq!(constructors.len(), 1);
        let params: Vec<(&str, &str)> = constructors[0]
            .parameters
            .iter()
            .map(|p| (p.param_type.as_str(), p.name.as_str()))
            .collect();
        assert_eq!(params, vec![("Repo", "r"), ("Service", "s")]);
        assert!(!constructors[0].has_autowired_annotation);
        assert_eq!(constructors[0].position, Position::new(1, 4));
    }

    #[test]
    fn test_multi_line_autowired_constructor() {
        let source = r#"package com.acme;

@Service
public class OrderService {
    private final Repo repo;

    @Autowired
    public OrderService(Repo repo,
                        Map<String, Handler> handlers,
                        @Value("${retries:3}") int retries) {
        this.repo = repo;
    }

    public OrderService() {
        this(null, null, 0);
    }
}"#;
        let extractor = JavaExtractor::default();
        let constructors = extractor.extract_constructors(source);
        assert_eq!(constructors.len(), 2);

        let first = &constructors[0];
        assert!(first.has_autowired_annotation);
        let types: Vec<&str> = first.parameters.iter().map(|p| p.param_type.as_str()).collect();
        assert_eq!(types, vec!["Repo", "Map<String, Handler>", "int"]);
        assert_eq!(first.range.start.line, 7);
        assert_eq!(first.range.end.line, 9);

        let second = &constructors[1];
        assert!(!second.has_autowired_annotation, "the annotation belongs to the first constructor");
        assert!(second.parameters.is_empty());
    }

    #[test]
    fn test_split_line_and_inline_annotation() {
        let source = "public class Wiring {\n    @Autowired public Wiring\n        (Clock clock) {\n    }\n}";
        let extractor = JavaExtractor::default();
        let constructors = extractor.extract_constructors(source);
        assert_eq!(constructors.len(), 1);
        assert!(constructors[0].has_autowired_annotation);
        assert_eq!(constructors[0].parameters[0].name, "clock");
    }

    #[test]
    fn test_constructor_after_annotation_group_and_with_line_comments() {
        let source = r#"public class Foo {
    @SuppressWarnings({"unchecked"}) public Foo(Map m,
                                       Bar b) {
    }
    public Foo(A a, // (primary
               B b) {
    }
}"#;
        let extractor = JavaExtractor::default();
        let constructors = extractor.extract_constructors(source);
        assert_eq!(constructors.len(), 2);
        let params = |index: usize| -> Vec<(String, String)> {
            constructors[index]
                .parameters
                .iter()
                .map(|p| (p.param_type.clone(), p.name.clone()))
                .collect()
        };
        assert_eq!(
            params(0),
            vec![("Map".to_string(), "m".to_string()), ("Bar".to_string(), "b".to_string())],
            "annotation parens before the parameter list must not end the declaration"
        );
        assert_eq!(
            params(1),
            vec![("A".to_string(), "a".to_string()), ("B".to_string(), "b".to_string())],
            "comment text must not reach the parameter list"
        );
        assert_eq!(constructors[0].range.end.line, 2);
    }

    #[test]
    fn test_no_public_class_means_no_constructors() {
        let extractor = JavaExtractor::default();
        assert!(extractor
            .extract_constructors("class Foo {\n    public Foo(Bar b) {}\n}")
            .is_empty());
        assert!(extractor.extract_constructors("").is_empty());
    }
}
