//! PyO3 wrapper for the detection pipeline.
//!
//! The boundary is intentionally narrow: rows go in as a JSON array,
//! the result document comes back as a JSON string. The Python host
//! owns CSV parsing, HTTP, and persistence (§5 Non-goals); this module
//! only runs the analysis.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::config::PipelineConfig;
use crate::models::RawTransactionRow;
use crate::pipeline::run_detection_pipeline;

/// Run the detection pipeline over a JSON-encoded row batch.
///
/// # Arguments
///
/// * `rows_json` - A JSON array of row objects, each with
///   `sender`/`sender_id`, `receiver`/`receiver_id`, `amount`, and
///   `timestamp` fields (any missing field is `null`).
///
/// # Returns
///
/// The result document (`DetectionResult`), JSON-encoded.
///
/// # Errors
///
/// Raises `ValueError` if `rows_json` doesn't parse, or `RuntimeError`
/// if the pipeline itself fails (e.g. a required column is absent from
/// every row).
///
/// # Example (from Python)
///
/// ```python
/// from money_muling_detection_core_rs import run_detection
/// import json
///
/// rows = [{"sender": "A", "receiver": "B", "amount": 100.0, "timestamp": "2025-01-01T00:00:00Z"}]
/// result = json.loads(run_detection(json.dumps(rows)))
/// print(result["summary"])
/// ```
#[pyfunction]
pub fn run_detection(rows_json: &str) -> PyResult<String> {
    let rows: Vec<RawTransactionRow> = serde_json::from_str(rows_json)
        .map_err(|e| PyValueError::new_err(format!("failed to parse row batch: {e}")))?;

    let config = PipelineConfig::default();
    let result = run_detection_pipeline(&rows, &config)
        .map_err(|e| PyRuntimeError::new_err(format!("detection pipeline failed: {e}")))?;

    serde_json::to_string(&result)
        .map_err(|e| PyRuntimeError::new_err(format!("failed to encode result: {e}")))
}

/// Registers this module's bindings on the crate's `#[pymodule]`.
pub fn register(module: &Bound<'_, PyModule>) -> PyResult<()> {
    module.add_function(wrap_pyfunction!(run_detection, module)?)?;
    Ok(())
}
