//! Python bindings (feature `python`).

use crate::config::{DictionaryNormalizer, NormalizerConfig};
use crate::error::{LoadError, NormalizeError};
use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

fn load_err(e: LoadError) -> PyErr {
    match e {
        LoadError::Read { .. } | LoadError::DirectoryNotFound { .. } => {
            PyIOError::new_err(e.to_string())
        }
        _ => PyValueError::new_err(e.to_string()),
    }
}

fn normalize_err(e: NormalizeError) -> PyErr {
    PyRuntimeError::new_err(e.to_string())
}

/// Normalizer over the dictionaries in `dict_dir`.
#[pyclass(name = "Normalizer")]
struct PyNormalizer {
    inner: DictionaryNormalizer,
}

#[pymethods]
impl PyNormalizer {
    #[new]
    #[pyo3(signature = (dict_dir, config=None))]
    fn new(dict_dir: PathBuf, config: Option<PathBuf>) -> PyResult<Self> {
        let mut cfg = match config {
            Some(path) => NormalizerConfig::load(&path).map_err(load_err)?,
            None => NormalizerConfig::default(),
        };
        cfg.dictionary_dir = dict_dir;
        let inner = cfg.build().map_err(load_err)?;
        Ok(Self { inner })
    }

    fn normalize(&self, text: &str) -> PyResult<String> {
        self.inner.normalize(text).map_err(normalize_err)
    }

    /// Raises on the first document that fails.
    fn normalize_batch(&self, texts: Vec<String>) -> PyResult<Vec<String>> {
        self.inner
            .normalize_batch(&texts)
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .map_err(normalize_err)
    }

    /// Normalize a file line by line, reading and writing entirely in Rust.
    /// Returns the number of lines written.
    fn normalize_file(&self, input_path: String, output_path: String) -> PyResult<usize> {
        let content = fs::read_to_string(&input_path)
            .map_err(|e| PyIOError::new_err(format!("Failed to read {}: {}", input_path, e)))?;

        let lines: Vec<&str> = content.lines().collect();
        let normalized = self
            .inner
            .normalize_batch(&lines)
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .map_err(normalize_err)?;

        let out_path = Path::new(&output_path);
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| PyIOError::new_err(format!("Failed to create directory: {}", e)))?;
        }

        let mut body = normalized.join("\n");
        if !body.is_empty() {
            body.push('\n');
        }
        fs::write(out_path, body)
            .map_err(|e| PyIOError::new_err(format!("Failed to write {}: {}", output_path, e)))?;

        Ok(normalized.len())
    }
}

#[pymodule]
fn lexnorm(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyNormalizer>()?;
    Ok(())
}
