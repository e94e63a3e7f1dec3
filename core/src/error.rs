//! Error taxonomy for the detection pipeline.
//!
//! Every component returns a typed `Result`; nothing in this crate uses
//! exceptions-as-control-flow. `EmptyInputResult` from the design notes is
//! deliberately not a variant here — zero usable rows is a valid, empty
//! [`crate::models::DetectionResult`], not an error.

use thiserror::Error;

/// Raised while aggregating a transaction record stream into a graph.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphBuildError {
    /// The record stream is missing one of the required columns, under
    /// either the primary (`sender`/`receiver`) or legacy
    /// (`sender_id`/`receiver_id`) naming convention.
    #[error("record stream missing required column(s): {missing:?}")]
    SchemaError { missing: Vec<String> },
}

/// Top-level error surfaced by [`crate::pipeline::run_detection_pipeline`].
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    GraphBuild(#[from] GraphBuildError),

    /// An invariant the pipeline relies on (e.g. a feature map missing a
    /// node the graph says exists) was violated. Surfacing this instead of
    /// panicking keeps the FFI boundary safe.
    #[error("internal invariant violated: {0}")]
    Internal(String),
}
