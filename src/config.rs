//! Extractor configuration

use serde::{Deserialize, Serialize};

/// Tunables for the extraction engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Lines scanned backwards when looking for an annotation above a declaration
    pub annotation_lookback: usize,
    /// Lines after a visibility/name pair in which the opening parenthesis may appear
    pub setter_paren_lookahead: usize,
    /// Upper bound on physical lines joined into one declaration
    pub max_declaration_lines: usize,
    /// Source units larger than this are skipped entirely
    pub max_source_bytes: Option<usize>,
    /// Maximum characters of surrounding text attached to a logged error
    pub log_snippet_chars: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            annotation_lookback: 5,
            setter_paren_lookahead: 2,
            max_declaration_lines: 64,
            max_source_bytes: None,
            log_snippet_chars: 80,
        }
    }
}

impl ExtractorConfig {
    /// Parse a JSON object of overrides; missing keys keep their defaults
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| anyhow::anyhow!("Invalid extractor configuration: {}", e))
    }
}
