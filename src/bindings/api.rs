// API Functions - PyO3-exposed functions for Python

use super::PySourceUnitResults;
use crate::config::ExtractorConfig;
use crate::extractors::{ExtractorManager, FileId};
use crate::language::is_java_extension;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::path::Path;

fn manager_for(config_json: Option<&str>) -> PyResult<ExtractorManager> {
    match config_json {
        Some(json) => {
            let config = ExtractorConfig::from_json_str(json)
                .map_err(|e| PyValueError::new_err(e.to_string()))?;
            Ok(ExtractorManager::with_config(config))
        }
        None => Ok(ExtractorManager::new()),
    }
}

/// Extract Spring/Lombok structure from one Java source unit
///
/// Args:
///     content (str): Java source text
///     file_path (str): Identifier attached to the results
///     config (str | None): JSON object overriding extractor settings
///
/// Returns:
///     SourceUnitResults: classes, constructors, setters and bean methods
///
/// Raises:
///     ValueError: If the configuration JSON is invalid
#[pyfunction]
#[pyo3(signature = (content, file_path, config=None))]
pub fn extract_file(
    content: &str,
    file_path: &str,
    config: Option<&str>,
) -> PyResult<PySourceUnitResults> {
    let manager = manager_for(config)?;
    let results = manager.extract_source(&FileId::new(file_path), content);
    Ok(PySourceUnitResults::from_results(results))
}

/// Extract many source units in parallel
///
/// Releases the GIL while rayon processes the batch. A unit that fails to parse
/// still yields results from the lexical extractors; order follows the input.
///
/// Args:
///     files (list[tuple[str, str]]): (content, file_path) pairs
///     config (str | None): JSON object overriding extractor settings
///
/// Returns:
///     list[SourceUnitResults]: one entry per input, same order
#[pyfunction]
#[pyo3(signature = (files, config=None))]
pub fn extract_files_batch(
    py: Python<'_>,
    files: Vec<(String, String)>,
    config: Option<&str>,
) -> PyResult<Vec<PySourceUnitResults>> {
    let manager = manager_for(config)?;
    let units: Vec<(FileId, String)> = files
        .into_iter()
        .map(|(content, file_path)| (FileId::new(file_path), content))
        .collect();

    // Release GIL for parallel processing
    let results = py.detach(move || manager.extract_batch(&units));

    Ok(results
        .into_iter()
        .map(PySourceUnitResults::from_results)
        .collect())
}

/// Annotations the engine recognizes
///
/// Returns:
///     list[tuple[str, str]]: (qualified name, semantic kind) pairs
#[pyfunction]
pub fn supported_annotations() -> Vec<(String, String)> {
    ExtractorManager::new().supported_annotations()
}

/// Whether a path names a Java source unit
#[pyfunction]
#[pyo3(signature = (file_path))]
pub fn is_java_file(file_path: &str) -> bool {
    Path::new(file_path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(is_java_extension)
        .unwrap_or(false)
}
