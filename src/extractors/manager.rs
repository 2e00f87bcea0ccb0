//! ExtractorManager - Public API for Spring/Lombok structure extraction
//!
//! Supplies the CST for a source unit, runs the tree-based and the lexical extraction
//! paths, and hands back one `SourceUnitResults` per unit. Nothing is cached between
//! calls, so a single manager can be shared across threads.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::ExtractorConfig;
use crate::cst::{TreeSitterJavaSupplier, TreeSupplier};
use crate::extractors::base::{FileId, PositionCalculator, SourceUnitResults, TokenPositionCalculator};
use crate::extractors::java::{AnnotationVocabulary, JavaExtractor};

/// Manager for Java structure extraction
pub struct ExtractorManager {
    supplier: Arc<dyn TreeSupplier>,
    java: JavaExtractor,
}

impl Default for ExtractorManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ExtractorManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorManager")
            .field("java", &self.java)
            .finish_non_exhaustive()
    }
}

impl ExtractorManager {
    pub fn new() -> Self {
        Self::with_config(ExtractorConfig::default())
    }

    pub fn with_config(config: ExtractorConfig) -> Self {
        Self::with_collaborators(
            config,
            Arc::new(TreeSitterJavaSupplier),
            Arc::new(TokenPositionCalculator),
            Arc::new(AnnotationVocabulary::default()),
        )
    }

    /// Swap in a different tree supplier, position calculator or vocabulary
    pub fn with_collaborators(
        config: ExtractorConfig,
        supplier: Arc<dyn TreeSupplier>,
        positions: Arc<dyn PositionCalculator>,
        vocabulary: Arc<AnnotationVocabulary>,
    ) -> Self {
        Self {
            supplier,
            java: JavaExtractor::new(config, vocabulary, positions),
        }
    }

    pub fn java(&self) -> &JavaExtractor {
        &self.java
    }

    pub fn config(&self) -> &ExtractorConfig {
        self.java.config()
    }

    /// Annotation names this manager recognizes, simple and qualified
    pub fn supported_annotations(&self) -> Vec<(String, String)> {
        self.java
            .vocabulary()
            .entries()
            .iter()
            .map(|e| (e.qualified_name.clone(), e.kind.as_str().to_string()))
            .collect()
    }

    /// Extract everything from one source unit
    ///
    /// Without a tree (parse failure) only the lexical extractors run. Units above
    /// `max_source_bytes` are skipped and yield empty results.
    pub fn extract_source(&self, file_id: &FileId, content: &str) -> SourceUnitResults {
        if let Some(limit) = self.config().max_source_bytes {
            if content.len() > limit {
                warn!(
                    file = %file_id,
                    bytes = content.len(),
                    limit,
                    "source unit exceeds max_source_bytes, skipping"
                );
                return SourceUnitResults::empty(file_id.clone());
            }
        }

        let tree = self.supplier.supply(content);
        if tree.is_none() {
            debug!(file = %file_id, "no syntax tree, running lexical extraction only");
        }

        let results = self.java.extract_all(tree.as_ref(), file_id, content);
        debug!(
            file = %file_id,
            classes = results.classes.len(),
            constructors = results.constructors.len(),
            setters = results.setters.len(),
            bean_methods = results.bean_methods.len(),
            "extracted source unit"
        );
        results
    }

    /// Extract many units in parallel; results keep the input order
    pub fn extract_batch(&self, units: &[(FileId, String)]) -> Vec<SourceUnitResults> {
        units
            .par_iter()
            .map(|(file_id, content)| self.extract_source(file_id, content))
            .collect()
    }
}
