// Annotation vocabulary
//
// An explicit, immutable table from annotation names to semantic kinds. The parser is
// handed one at construction, so tests can swap in a reduced table. Simple names may
// collide (`Value` is both Spring and Lombok); the entry's scope decides which one a
// given annotation target resolves to.

use regex::Regex;

use crate::extractors::base::SemanticAnnotationKind;

/// Where an annotation is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationTarget {
    Type,
    Field,
    Method,
    Constructor,
    Parameter,
}

impl AnnotationTarget {
    pub fn is_type_level(&self) -> bool {
        matches!(self, AnnotationTarget::Type)
    }
}

/// Targets on which an entry applies when its simple name is ambiguous
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetScope {
    Any,
    TypeLevel,
    MemberLevel,
}

impl TargetScope {
    fn accepts(&self, target: AnnotationTarget) -> bool {
        match self {
            TargetScope::Any => true,
            TargetScope::TypeLevel => target.is_type_level(),
            TargetScope::MemberLevel => !target.is_type_level(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyEntry {
    pub simple_name: String,
    pub qualified_name: String,
    pub kind: SemanticAnnotationKind,
    pub scope: TargetScope,
}

impl VocabularyEntry {
    pub fn new(qualified_name: &str, kind: SemanticAnnotationKind, scope: TargetScope) -> Self {
        let simple_name = qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(qualified_name)
            .to_string();
        Self {
            simple_name,
            qualified_name: qualified_name.to_string(),
            kind,
            scope,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnnotationVocabulary {
    entries: Vec<VocabularyEntry>,
    /// Line-start patterns per kind, matching `@Simple` or `@fully.qualified.Name`
    line_patterns: Vec<(SemanticAnnotationKind, Regex)>,
}

impl Default for AnnotationVocabulary {
    fn default() -> Self {
        Self::spring_and_lombok()
    }
}

impl AnnotationVocabulary {
    pub fn new(entries: Vec<VocabularyEntry>) -> Self {
        let mut line_patterns: Vec<(SemanticAnnotationKind, Regex)> = Vec::new();
        for entry in &entries {
            if line_patterns.iter().any(|(kind, _)| *kind == entry.kind) {
                continue;
            }
            let alternatives: Vec<String> = entries
                .iter()
                .filter(|e| e.kind == entry.kind)
                .flat_map(|e| [regex::escape(&e.qualified_name), regex::escape(&e.simple_name)])
                .collect();
            let pattern = format!(r"^@(?:{})\b", alternatives.join("|"));
            if let Ok(regex) = Regex::new(&pattern) {
                line_patterns.push((entry.kind, regex));
            }
        }
        Self {
            entries,
            line_patterns,
        }
    }

    /// Spring stereotypes and injection markers plus the Lombok markers
    pub fn spring_and_lombok() -> Self {
        use SemanticAnnotationKind as K;
        use TargetScope::{Any, MemberLevel, TypeLevel};

        Self::new(vec![
            VocabularyEntry::new("org.springframework.stereotype.Component", K::Component, Any),
            VocabularyEntry::new("org.springframework.stereotype.Service", K::Service, Any),
            VocabularyEntry::new("org.springframework.stereotype.Repository", K::Repository, Any),
            VocabularyEntry::new("org.springframework.stereotype.Controller", K::Controller, Any),
            VocabularyEntry::new(
                "org.springframework.web.bind.annotation.RestController",
                K::RestController,
                Any,
            ),
            VocabularyEntry::new(
                "org.springframework.context.annotation.Configuration",
                K::Configuration,
                Any,
            ),
            VocabularyEntry::new("org.springframework.context.annotation.Bean", K::Bean, Any),
            VocabularyEntry::new(
                "org.springframework.beans.factory.annotation.Autowired",
                K::Autowired,
                Any,
            ),
            VocabularyEntry::new(
                "org.springframework.beans.factory.annotation.Qualifier",
                K::Qualifier,
                Any,
            ),
            VocabularyEntry::new(
                "org.springframework.beans.factory.annotation.Value",
                K::Value,
                MemberLevel,
            ),
            VocabularyEntry::new("lombok.RequiredArgsConstructor", K::RequiredArgsCtor, Any),
            VocabularyEntry::new("lombok.AllArgsConstructor", K::AllArgsCtor, Any),
            VocabularyEntry::new("lombok.NoArgsConstructor", K::NoArgsCtor, Any),
            VocabularyEntry::new("lombok.Data", K::Data, Any),
            VocabularyEntry::new("lombok.Value", K::LombokValue, TypeLevel),
            VocabularyEntry::new("lombok.extern.slf4j.Slf4j", K::Slf4j, Any),
            VocabularyEntry::new("lombok.NonNull", K::NonNull, Any),
        ])
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    /// Resolve an annotation name written at `target`
    ///
    /// Dotted names must match a qualified name exactly. Simple names prefer the entry
    /// whose scope accepts the target, then fall back to the first entry of that name.
    pub fn resolve(&self, name: &str, target: AnnotationTarget) -> Option<SemanticAnnotationKind> {
        let name = name.trim().trim_start_matches('@');
        if name.contains('.') {
            return self
                .entries
                .iter()
                .find(|e| e.qualified_name == name)
                .map(|e| e.kind);
        }

        let mut candidates = self.entries.iter().filter(|e| e.simple_name == name);
        let first = candidates.clone().next()?;
        candidates
            .find(|e| e.scope.accepts(target))
            .or(Some(first))
            .map(|e| e.kind)
    }

    pub fn contains(&self, name: &str) -> bool {
        let name = name.trim().trim_start_matches('@');
        self.entries
            .iter()
            .any(|e| e.simple_name == name || e.qualified_name == name)
    }

    /// Regex matching `@Name` for `kind` anchored at the start of a trimmed line
    pub fn line_pattern(&self, kind: SemanticAnnotationKind) -> Option<&Regex> {
        self.line_patterns
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, regex)| regex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SemanticAnnotationKind as K;

    #[test]
    fn test_value_is_disambiguated_by_target() {
        let vocab = AnnotationVocabulary::default();
        assert_eq!(vocab.resolve("Value", AnnotationTarget::Type), Some(K::LombokValue));
        assert_eq!(vocab.resolve("Value", AnnotationTarget::Field), Some(K::Value));
        assert_eq!(vocab.resolve("Value", AnnotationTarget::Parameter), Some(K::Value));
    }

    #[test]
    fn test_qualified_names_are_unambiguous() {
        let vocab = AnnotationVocabulary::default();
        assert_eq!(
            vocab.resolve("lombok.Value", AnnotationTarget::Field),
            Some(K::LombokValue)
        );
        assert_eq!(
            vocab.resolve(
                "org.springframework.beans.factory.annotation.Value",
                AnnotationTarget::Type
            ),
            Some(K::Value)
        );
        assert_eq!(vocab.resolve("com.acme.Service", AnnotationTarget::Type), None);
    }

    #[test]
    fn test_unknown_names_resolve_to_none() {
        let vocab = AnnotationVocabulary::default();
        assert_eq!(vocab.resolve("Override", AnnotationTarget::Method), None);
        assert_eq!(vocab.resolve("", AnnotationTarget::Type), None);
        assert!(vocab.contains("@Autowired"));
        assert!(!vocab.contains("Transactional"));
    }

    #[test]
    fn test_line_pattern_matches_short_and_qualified_forms() {
        let vocab = AnnotationVocabulary::default();
        let pattern = vocab.line_pattern(K::Autowired).unwrap();
        assert!(pattern.is_match("@Autowired"));
        assert!(pattern.is_match("@Autowired(required = false)"));
        assert!(pattern.is_match("@org.springframework.beans.factory.annotation.Autowired"));
        assert!(!pattern.is_match("@AutowiredLater"));
        assert!(!pattern.is_match("// @Autowired"));
    }

    #[test]
    fn test_custom_vocabulary_is_isolated() {
        let vocab = AnnotationVocabulary::new(vec![VocabularyEntry::new(
            "com.acme.Inject",
            K::Autowired,
            TargetScope::Any,
        )]);
        assert_eq!(vocab.resolve("Inject", AnnotationTarget::Field), Some(K::Autowired));
        assert_eq!(vocab.resolve("Autowired", AnnotationTarget::Field), None);
        assert!(vocab.line_pattern(K::Service).is_none());
    }
}
