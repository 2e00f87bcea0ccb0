// BaseExtractor - shared collaborators for every Java extractor
//
// Holds the configuration, the annotation vocabulary and the position calculator.
// Cloning is cheap (Arc), and nothing in here is mutated after construction, so one
// instance can serve concurrent extraction calls.

use std::sync::Arc;

use crate::config::ExtractorConfig;
use crate::cst::NodeRef;
use crate::errors::truncate_snippet;
use crate::extractors::java::vocabulary::AnnotationVocabulary;

use super::positions::{PositionCalculator, TokenPositionCalculator};

#[derive(Clone)]
pub struct BaseExtractor {
    pub config: ExtractorConfig,
    pub vocabulary: Arc<AnnotationVocabulary>,
    pub positions: Arc<dyn PositionCalculator>,
}

impl std::fmt::Debug for BaseExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaseExtractor")
            .field("config", &self.config)
            .field("vocabulary_entries", &self.vocabulary.entries().len())
            .finish()
    }
}

impl Default for BaseExtractor {
    fn default() -> Self {
        Self::new(
            ExtractorConfig::default(),
            Arc::new(AnnotationVocabulary::default()),
            Arc::new(TokenPositionCalculator),
        )
    }
}

impl BaseExtractor {
    pub fn new(
        config: ExtractorConfig,
        vocabulary: Arc<AnnotationVocabulary>,
        positions: Arc<dyn PositionCalculator>,
    ) -> Self {
        Self {
            config,
            vocabulary,
            positions,
        }
    }

    pub fn with_config(config: ExtractorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Truncated text for log context
    pub fn snippet(&self, text: &str) -> String {
        truncate_snippet(text, self.config.log_snippet_chars)
    }

    /// Truncated token text of a node for log context
    pub fn node_snippet(&self, node: Option<NodeRef<'_>>) -> String {
        node.map(|n| self.snippet(&n.text())).unwrap_or_default()
    }
}
