/// Class extraction
use tracing::debug;

use crate::cst::{Cst, NodeRef};
use crate::errors::{recover, ExtractionError, Result};
use crate::extractors::base::{AnnotationInfo, ClassInfo, FileId};
use crate::extractors::java::JavaExtractor;

use super::vocabulary::AnnotationTarget;
use super::{annotations, fields, interfaces, navigator};

/// One `ClassInfo` per top-level class declaration; declarations without a name are skipped
pub(super) fn extract_classes(
    extractor: &JavaExtractor,
    tree: Option<&Cst>,
    file_id: &FileId,
    source_text: &str,
) -> Vec<ClassInfo> {
    let Some(root) = tree.and_then(NodeRef::root) else {
        return Vec::new();
    };
    let lines: Vec<&str> = source_text.lines().collect();

    let package_name = navigator::extract_package_name(extractor, Some(root));
    let imports = navigator::extract_imports(extractor, Some(root));
    let declarations = navigator::extract_class_declarations(extractor, Some(root));

    let mut classes = Vec::with_capacity(declarations.len());
    for declaration in declarations {
        let snippet = extractor.base().node_snippet(Some(declaration));
        let class: Option<ClassInfo> = recover("extract_class", &snippet, || {
            build_class(
                extractor,
                declaration,
                &lines,
                file_id,
                package_name.as_deref(),
                &imports,
            )
            .map(Some)
        });
        classes.extend(class);
    }

    debug!(file = %file_id, classes = classes.len(), "class extraction finished");
    classes
}

fn build_class(
    extractor: &JavaExtractor,
    declaration: NodeRef<'_>,
    lines: &[&str],
    file_id: &FileId,
    package_name: Option<&str>,
    imports: &[String],
) -> Result<ClassInfo> {
    let name = declaration
        .path(&["normalClassDeclaration", "typeIdentifier"])
        .and_then(|t| t.token("Identifier"))
        .map(|t| t.image.clone())
        .ok_or_else(|| {
            ExtractionError::class_extraction("class declaration has no typeIdentifier")
                .with_construct("classDeclaration")
        })?;

    let interfaces = interfaces::extract_interfaces(declaration);

    Ok(ClassInfo {
        fully_qualified_name: ClassInfo::qualify(package_name, &name),
        name,
        package_name: package_name.map(str::to_string),
        file_id: file_id.clone(),
        position: extractor.base().positions.calculate_position(declaration, lines),
        range: extractor.base().positions.calculate_range(declaration, lines),
        annotations: class_annotations(extractor, declaration, lines),
        fields: fields::extract_fields(extractor, Some(declaration), lines),
        imports: imports.to_vec(),
        interfaces: (!interfaces.is_empty()).then_some(interfaces),
    })
}

fn class_annotations(
    extractor: &JavaExtractor,
    declaration: NodeRef<'_>,
    lines: &[&str],
) -> Vec<AnnotationInfo> {
    declaration
        .child_nodes("classModifier")
        .flat_map(|modifier| modifier.child_nodes("annotation"))
        .filter_map(|annotation| {
            annotations::parse_annotation(extractor, Some(annotation), lines, AnnotationTarget::Type)
        })
        .collect()
}
