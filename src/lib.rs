// SpringLens Core - Java CST extraction for Spring and Lombok dependency injection
//
// Parses Java with tree-sitter, lowers the tree into a grammar-shaped CST and pulls out
// classes, fields, annotations, constructors, setters and @Bean methods. The Python
// extension module is built with the `python` feature.

pub mod config;
pub mod cst;
pub mod errors;
pub mod extractors;
pub mod language;

#[cfg(feature = "python")]
mod bindings;

pub use config::ExtractorConfig;
pub use errors::{ExtractionError, Result};
pub use extractors::{
    AnnotationInfo, BeanMethodInfo, ClassInfo, ConstructorInfo, ExtractorManager, FieldInfo,
    FileId, JavaExtractor, ParameterInfo, Position, Range, SemanticAnnotationKind, SetterInfo,
    SourceUnitResults, Visibility,
};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// SpringLens Core Python module
///
/// Provides Spring/Lombok structure extraction for Java source units.
#[cfg(feature = "python")]
#[pymodule]
fn springlens_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    // Add Python functions
    m.add_function(wrap_pyfunction!(bindings::extract_file, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::extract_files_batch, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::supported_annotations, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::is_java_file, m)?)?;

    // Add Python classes
    m.add_class::<bindings::PySourceUnitResults>()?;

    Ok(())
}
