/// Java structural extraction for dependency-injection analysis
///
/// This module is organized into focused sub-modules:
/// - vocabulary: Spring/Lombok annotation names and their semantic kinds
/// - shapes: structural-vs-fallback views over grammar productions
/// - helpers: type rendering, keyword tables, naming conventions
/// - annotation_params: annotation argument decoding
/// - annotations: annotation nodes and the lexical backward scan
/// - navigator: package, imports and class declarations
/// - fields: two-pass field extraction
/// - interfaces: implemented interfaces
/// - classes: ClassInfo assembly
/// - method_heads: lexical method head detection
/// - constructors, setters, bean_methods: injection evidence from raw text
mod annotation_params;
mod annotations;
mod bean_methods;
mod classes;
mod constructors;
mod fields;
mod helpers;
mod interfaces;
mod method_heads;
mod navigator;
mod setters;
mod shapes;
pub mod vocabulary;

use std::sync::Arc;

use crate::config::ExtractorConfig;
use crate::cst::{Cst, NodeRef};
use crate::extractors::base::{
    AnnotationInfo, BaseExtractor, BeanMethodInfo, ClassInfo, ConstructorInfo, FieldInfo, FileId,
    PositionCalculator, SemanticAnnotationKind, SetterInfo, SourceUnitResults,
};

pub use constructors::extract_public_class_name;
pub use setters::is_setter_name;
pub use vocabulary::{AnnotationTarget, AnnotationVocabulary, TargetScope, VocabularyEntry};

/// Java extractor for Spring/Lombok structure and injection evidence
///
/// Holds no per-call state; one instance can serve many source units concurrently.
#[derive(Debug, Clone, Default)]
pub struct JavaExtractor {
    base: BaseExtractor,
}

impl JavaExtractor {
    pub fn new(
        config: ExtractorConfig,
        vocabulary: Arc<AnnotationVocabulary>,
        positions: Arc<dyn PositionCalculator>,
    ) -> Self {
        Self {
            base: BaseExtractor::new(config, vocabulary, positions),
        }
    }

    pub fn with_config(config: ExtractorConfig) -> Self {
        Self {
            base: BaseExtractor::with_config(config),
        }
    }

    /// Run both extraction paths for one source unit
    pub fn extract_all(&self, tree: Option<&Cst>, file_id: &FileId, source_text: &str) -> SourceUnitResults {
        SourceUnitResults {
            file_id: file_id.clone(),
            classes: self.extract_classes(tree, file_id, source_text),
            constructors: self.extract_constructors(source_text),
            setters: self.extract_setters(source_text),
            bean_methods: self.extract_bean_methods(source_text),
        }
    }

    // ========================================================================
    // Tree-based extraction
    // ========================================================================

    pub fn extract_classes(&self, tree: Option<&Cst>, file_id: &FileId, source_text: &str) -> Vec<ClassInfo> {
        classes::extract_classes(self, tree, file_id, source_text)
    }

    pub fn extract_package_name(&self, root: Option<NodeRef<'_>>) -> Option<String> {
        navigator::extract_package_name(self, root)
    }

    pub fn extract_imports(&self, root: Option<NodeRef<'_>>) -> Vec<String> {
        navigator::extract_imports(self, root)
    }

    pub fn extract_class_declarations<'a>(&self, root: Option<NodeRef<'a>>) -> Vec<NodeRef<'a>> {
        navigator::extract_class_declarations(self, root)
    }

    pub fn extract_fields(&self, class_decl: Option<NodeRef<'_>>, lines: &[&str]) -> Vec<FieldInfo> {
        fields::extract_fields(self, class_decl, lines)
    }

    pub fn parse_field_declaration(&self, node: Option<NodeRef<'_>>, lines: &[&str]) -> Option<FieldInfo> {
        fields::parse_field_declaration(self, node, lines)
    }

    /// Implemented interface names of a class declaration
    pub fn extract_interfaces(&self, class_decl: Option<NodeRef<'_>>) -> Vec<String> {
        class_decl
            .map(interfaces::extract_interfaces)
            .unwrap_or_default()
    }

    pub fn parse_annotation(
        &self,
        node: Option<NodeRef<'_>>,
        lines: &[&str],
        target: AnnotationTarget,
    ) -> Option<AnnotationInfo> {
        annotations::parse_annotation(self, node, lines, target)
    }

    // ========================================================================
    // Lexical extraction
    // ========================================================================

    pub fn detect_annotation_in_lines(
        &self,
        lines: &[&str],
        from_line: usize,
        kind: SemanticAnnotationKind,
        max_lookback: usize,
    ) -> bool {
        annotations::detect_annotation_in_lines(self, lines, from_line, kind, max_lookback)
    }

    pub fn extract_method_annotations_from_lines(
        &self,
        lines: &[&str],
        method_line: usize,
        target: AnnotationTarget,
    ) -> Vec<AnnotationInfo> {
        annotations::extract_method_annotations_from_lines(self, lines, method_line, target)
    }

    pub fn extract_constructors(&self, source_text: &str) -> Vec<ConstructorInfo> {
        constructors::extract_constructors(self, source_text)
    }

    pub fn extract_setters(&self, source_text: &str) -> Vec<SetterInfo> {
        setters::extract_setters(self, source_text)
    }

    pub fn extract_bean_methods(&self, source_text: &str) -> Vec<BeanMethodInfo> {
        bean_methods::extract_bean_methods(self, source_text)
    }

    // ========================================================================
    // Accessors for sub-modules
    // ========================================================================

    pub(crate) fn base(&self) -> &BaseExtractor {
        &self.base
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.base.config
    }

    pub fn vocabulary(&self) -> &AnnotationVocabulary {
        &self.base.vocabulary
    }
}
