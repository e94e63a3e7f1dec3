//! Transaction record types: the raw row shape accepted at the external
//! interface, and the cleaned, immutable record the rest of the pipeline
//! operates on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row as handed to the core by the (out-of-scope) CSV/upload host.
///
/// Accepts either the primary (`sender`/`receiver`) or legacy
/// (`sender_id`/`receiver_id`) column naming convention — both are plain
/// fields rather than serde aliases so the graph builder can tell whether
/// *either* spelling was populated anywhere in the batch, which is how it
/// distinguishes "column absent" (→ [`crate::error::GraphBuildError::SchemaError`])
/// from "value blank on this row" (→ row dropped, §4.1).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawTransactionRow {
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub receiver: Option<String>,
    #[serde(default)]
    pub receiver_id: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// A cleaned, immutable transaction record. Self-loops and blank IDs have
/// already been filtered out by the time this type is constructed.
///
/// `timestamp` is `None` when the batch never populated the column at all
/// (§4.2's 72h window features then fall back to the degree-based rule).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    pub transaction_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub amount: f64,
    pub timestamp: Option<DateTime<Utc>>,
}
