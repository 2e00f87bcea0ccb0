/// `@Autowired` setter detection from raw source lines
use crate::extractors::base::{SemanticAnnotationKind, SetterInfo};
use crate::extractors::java::JavaExtractor;
use crate::extractors::lexical::{
    declaration_span, parameter_list, parse_parameter_list, reassemble_declaration_bounded,
};

use super::annotations;
use super::method_heads::method_head;
use super::vocabulary::AnnotationTarget;

/// `setXxx` with at least one parameter
pub fn is_setter_name(name: &str, parameter_count: usize) -> bool {
    name.starts_with("set") && name.len() > 3 && parameter_count >= 1
}

pub(super) fn extract_setters(extractor: &JavaExtractor, source_text: &str) -> Vec<SetterInfo> {
    let config = &extractor.base().config;
    let lines: Vec<&str> = source_text.lines().collect();
    let mut setters = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        let Some(head) = method_head(&lines, index, config.setter_paren_lookahead, true) else {
            index += 1;
            continue;
        };
        let autowired = annotations::line_has_annotation(
            extractor,
            lines[index],
            SemanticAnnotationKind::Autowired,
        ) || (index > 0
            && annotations::detect_annotation_in_lines(
                extractor,
                &lines,
                index - 1,
                SemanticAnnotationKind::Autowired,
                config.annotation_lookback,
            ));
        if !autowired {
            index += 1;
            continue;
        }

        let Some((declaration, end)) =
            reassemble_declaration_bounded(&lines, index, config.max_declaration_lines)
        else {
            index += 1;
            continue;
        };
        let parameters = parameter_list(&declaration, &head.name)
            .map(parse_parameter_list)
            .unwrap_or_default();
        if !is_setter_name(&head.name, parameters.len()) {
            index = end + 1;
            continue;
        }

        let (position, range) = declaration_span(&lines, index, end);
        setters.push(SetterInfo {
            annotations: annotations::extract_method_annotations_from_lines(
                extractor,
                &lines,
                index,
                AnnotationTarget::Method,
            ),
            name: head.name,
            parameters,
            has_autowired_annotation: true,
            position,
            range,
        });
        index = end + 1;
    }

    setters
}
