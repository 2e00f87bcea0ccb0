/// `@Bean` factory method detection from raw source lines
///
/// Parameters of a bean method are resolved by the container, which makes them
/// injection points just like constructor parameters.
use crate::extractors::base::{BeanMethodInfo, SemanticAnnotationKind};
use crate::extractors::java::JavaExtractor;
use crate::extractors::lexical::{
    declaration_span, parameter_list, parse_parameter_list, reassemble_declaration_bounded,
};

use super::annotations;
use super::method_heads::method_head;
use super::vocabulary::AnnotationTarget;

pub(super) fn extract_bean_methods(extractor: &JavaExtractor, source_text: &str) -> Vec<BeanMethodInfo> {
    let config = &extractor.base().config;
    let lines: Vec<&str> = source_text.lines().collect();
    let mut beans = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        let Some(head) = method_head(&lines, index, config.setter_paren_lookahead, false) else {
            index += 1;
            continue;
        };
        let is_bean =
            annotations::line_has_annotation(extractor, lines[index], SemanticAnnotationKind::Bean)
                || (index > 0
                    && annotations::detect_annotation_in_lines(
                        extractor,
                        &lines,
                        index - 1,
                        SemanticAnnotationKind::Bean,
                        config.annotation_lookback,
                    ));
        if !is_bean {
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
        let (position, range) = declaration_span(&lines, index, end);

        beans.push(BeanMethodInfo {
            annotations: annotations::extract_method_annotations_from_lines(
                extractor,
                &lines,
                index,
                AnnotationTarget::Method,
            ),
            name: head.name,
            return_type: head.return_type,
            parameters,
            position,
            range,
        });
        index = end + 1;
    }

    beans
}
