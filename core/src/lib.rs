//! Money-muling detection engine — core analysis pipeline.
//!
//! # Architecture
//!
//! - **graph**: directed transaction graph construction and export
//! - **features**: cycle/shell/temporal/centrality/community signal extraction
//! - **scoring**: additive/subtractive risk scoring with suppression
//! - **rings**: deterministic fraud-ring assembly and deduplication
//! - **explain**: reason-token to human-readable sentence generation
//! - **pipeline**: top-level orchestration, the crate's single entry point
//! - **rng**: deterministic random number generation
//!
//! # Critical invariants
//!
//! 1. Every algorithm that affects output order iterates in account-id
//!    order, never hash order — a run is reproducible bit-for-bit.
//! 2. The core performs no I/O: CSV parsing, HTTP, and persistence are
//!    the caller's responsibility.
//! 3. Zero usable input rows is a valid, empty result — never an error.

pub mod config;
pub mod error;
pub mod explain;
pub mod features;
pub mod ffi;
pub mod graph;
pub mod models;
pub mod pipeline;
pub mod rings;
pub mod rng;
pub mod scoring;

pub use config::{DetectionThresholds, PipelineConfig, ScoringWeights};
pub use error::{GraphBuildError, PipelineError};
pub use models::{DetectionResult, RawTransactionRow, TransactionRecord};
pub use pipeline::run_detection_pipeline;
pub use rng::RngManager;

#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn money_muling_detection_core_rs(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    ffi::python::register(m)
}
