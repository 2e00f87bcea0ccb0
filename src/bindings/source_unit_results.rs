// PySourceUnitResults - PyO3 wrapper for SourceUnitResults

use crate::extractors::SourceUnitResults;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Python-accessible SourceUnitResults wrapper
///
/// Holds the classes, constructors, setters and bean methods found in one file.
#[pyclass(name = "SourceUnitResults")]
pub struct PySourceUnitResults {
    inner: SourceUnitResults,
}

impl PySourceUnitResults {
    pub fn from_results(results: SourceUnitResults) -> Self {
        PySourceUnitResults { inner: results }
    }
}

#[pymethods]
impl PySourceUnitResults {
    #[getter]
    fn file_id(&self) -> String {
        self.inner.file_id.as_str().to_string()
    }

    /// Fully qualified names of the extracted classes, in source order
    #[getter]
    fn class_names(&self) -> Vec<String> {
        self.inner
            .classes
            .iter()
            .map(|c| c.fully_qualified_name.clone())
            .collect()
    }

    #[getter]
    fn constructor_count(&self) -> usize {
        self.inner.constructors.len()
    }

    #[getter]
    fn setter_names(&self) -> Vec<String> {
        self.inner.setters.iter().map(|s| s.name.clone()).collect()
    }

    #[getter]
    fn bean_method_names(&self) -> Vec<String> {
        self.inner
            .bean_methods
            .iter()
            .map(|b| b.name.clone())
            .collect()
    }

    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Full results as a JSON document
    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner)
            .map_err(|e| PyValueError::new_err(format!("Serialization failed: {}", e)))
    }

    fn __repr__(&self) -> String {
        format!(
            "SourceUnitResults(file_id={:?}, classes={}, constructors={}, setters={}, bean_methods={})",
            self.inner.file_id.as_str(),
            self.inner.classes.len(),
            self.inner.constructors.len(),
            self.inner.setters.len(),
            self.inner.bean_methods.len()
        )
    }
}
