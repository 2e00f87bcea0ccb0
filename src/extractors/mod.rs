//! Java Structure Extractors Module
//!
//! Turns a Java CST plus its source text into the structural facts a dependency
//! injection analysis needs.
//!
//! # Architecture
//!
//! - `base` - result types, BaseExtractor and the position seam
//! - `lexical` - line scanner, declaration reassembly and parameter splitting
//! - `java` - tree-based and text-based Java extractors
//! - `manager.rs` - ExtractorManager public API

pub mod base;
pub mod java;
pub mod lexical;
pub mod manager;

// Re-export the public API
pub use base::{
    AnnotationInfo, BeanMethodInfo, ClassInfo, ConstructorInfo, FieldInfo, FileId,
    ParameterInfo, Position, Range, SemanticAnnotationKind, SetterInfo, SourceUnitResults,
    Visibility,
};
pub use java::JavaExtractor;
pub use manager::ExtractorManager;
