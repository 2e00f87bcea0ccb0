// PyO3 Bindings Module
//
// Python bindings for the extraction engine. Results cross the boundary as a
// `SourceUnitResults` wrapper that exposes counts, names and a JSON rendering.

mod api;
mod source_unit_results;

// Re-export for lib.rs
pub use api::{extract_file, extract_files_batch, is_java_file, supported_annotations};
pub use source_unit_results::PySourceUnitResults;
