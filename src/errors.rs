//! Error types for extraction
//!
//! None of these ever reach a caller of the public extraction API: every operation is
//! run through [`recover`], which logs the error and substitutes the operation's
//! "nothing found" result.

use std::error::Error as StdError;
use std::panic::{catch_unwind, AssertUnwindSafe};

use thiserror::Error;
use tracing::warn;

/// Main error type for extraction operations
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Package, import or type-declaration lookup failed
    #[error("tree navigation error: {message}{}", construct_suffix(.construct))]
    TreeNavigation {
        message: String,
        construct: Option<String>,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// An annotation node could not be decoded
    #[error("annotation parsing error: {message}{}", construct_suffix(.construct))]
    AnnotationParsing {
        message: String,
        construct: Option<String>,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// A class declaration could not be turned into a ClassInfo
    #[error("class extraction error: {message}{}", construct_suffix(.construct))]
    ClassExtraction {
        message: String,
        construct: Option<String>,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// A field declaration could not be turned into a FieldInfo
    #[error("field extraction error: {message}{}", construct_suffix(.construct))]
    FieldExtraction {
        message: String,
        construct: Option<String>,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

fn construct_suffix(construct: &Option<String>) -> String {
    construct
        .as_deref()
        .map(|c| format!(" (in {})", c))
        .unwrap_or_default()
}

impl ExtractionError {
    pub fn tree_navigation(message: impl Into<String>) -> Self {
        ExtractionError::TreeNavigation {
            message: message.into(),
            construct: None,
            source: None,
        }
    }

    pub fn annotation_parsing(message: impl Into<String>) -> Self {
        ExtractionError::AnnotationParsing {
            message: message.into(),
            construct: None,
            source: None,
        }
    }

    pub fn class_extraction(message: impl Into<String>) -> Self {
        ExtractionError::ClassExtraction {
            message: message.into(),
            construct: None,
            source: None,
        }
    }

    pub fn field_extraction(message: impl Into<String>) -> Self {
        ExtractionError::FieldExtraction {
            message: message.into(),
            construct: None,
            source: None,
        }
    }

    /// Name the construct being processed when the error happened
    pub fn with_construct(mut self, name: impl Into<String>) -> Self {
        let slot = match &mut self {
            ExtractionError::TreeNavigation { construct, .. }
            | ExtractionError::AnnotationParsing { construct, .. }
            | ExtractionError::ClassExtraction { construct, .. }
            | ExtractionError::FieldExtraction { construct, .. } => construct,
        };
        *slot = Some(name.into());
        self
    }

    /// Wrap a lower-level cause
    pub fn with_source(mut self, cause: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        let slot = match &mut self {
            ExtractionError::TreeNavigation { source, .. }
            | ExtractionError::AnnotationParsing { source, .. }
            | ExtractionError::ClassExtraction { source, .. }
            | ExtractionError::FieldExtraction { source, .. } => source,
        };
        *slot = Some(cause.into());
        self
    }

    pub fn construct(&self) -> Option<&str> {
        match self {
            ExtractionError::TreeNavigation { construct, .. }
            | ExtractionError::AnnotationParsing { construct, .. }
            | ExtractionError::ClassExtraction { construct, .. }
            | ExtractionError::FieldExtraction { construct, .. } => construct.as_deref(),
        }
    }
}

/// Result type alias for extraction internals
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Safely truncate a string to a maximum number of characters (not bytes)
pub fn truncate_snippet(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        collapsed.chars().take(max_chars).collect::<String>() + "..."
    }
}

/// Run an extraction step, converting errors and panics into the default result
///
/// `snippet` is the surrounding source text, already truncated by the caller.
pub fn recover<T, F>(operation: &str, snippet: &str, f: F) -> T
where
    T: Default,
    F: FnOnce() -> Result<T>,
{
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => value,
        Ok(Err(e)) => {
            warn!(
                operation,
                construct = e.construct().unwrap_or("-"),
                snippet,
                "{}",
                e
            );
            T::default()
        }
        Err(_) => {
            warn!(operation, snippet, "panic while extracting; returning empty result");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_construct() {
        let err = ExtractionError::class_extraction("missing typeIdentifier")
            .with_construct("classDeclaration");
        assert_eq!(
            err.to_string(),
            "class extraction error: missing typeIdentifier (in classDeclaration)"
        );
        assert_eq!(err.construct(), Some("classDeclaration"));
    }

    #[test]
    fn test_error_wraps_source() {
        let cause = std::io::Error::new(std::io::ErrorKind::Other, "low level");
        let err = ExtractionError::field_extraction("bad field").with_source(cause);
        assert!(StdError::source(&err).is_some());
    }

    #[test]
    fn test_error_wraps_parser_setup_failure() {
        let setup = anyhow::anyhow!("Failed to set parser language for java: version mismatch");
        let err = ExtractionError::tree_navigation("Java parser setup failed")
            .with_construct("program")
            .with_source(setup);
        let cause = StdError::source(&err).expect("setup error is kept as the source");
        assert!(cause.to_string().contains("version mismatch"));
        assert_eq!(err.construct(), Some("program"));
    }

    #[test]
    fn test_recover_converts_errors_to_default() {
        let fields: Vec<String> = recover("extract_fields", "class A {}", || {
            Err(ExtractionError::field_extraction("boom"))
        });
        assert!(fields.is_empty());
    }

    #[test]
    fn test_recover_catches_panics() {
        let found: Option<String> = recover("parse_annotation", "@Service", || {
            panic!("unexpected shape");
        });
        assert!(found.is_none());
    }

    #[test]
    fn test_recover_passes_values_through() {
        let value: bool = recover("detect", "", || Ok(true));
        assert!(value);
    }

    #[test]
    fn test_truncate_snippet_collapses_and_truncates() {
        assert_eq!(truncate_snippet("public   class\n A", 80), "public class A");
        assert_eq!(truncate_snippet("abcdef", 3), "abc...");
    }
}
