//! The single externally observable artifact of the core (§6).

use serde::Serialize;

use super::ring::FraudRing;

/// One entry of `suspicious_accounts` in the result document.
#[derive(Debug, Clone, Serialize)]
pub struct SuspiciousAccount {
    pub account_id: String,
    pub suspicion_score: f64,
    pub detected_patterns: Vec<String>,
    pub explanation: String,
    pub ring_id: String,
}

/// High-level run statistics.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_accounts_analyzed: usize,
    pub suspicious_accounts_flagged: usize,
    pub fraud_rings_detected: usize,
    pub processing_time_seconds: f64,
}

/// A node in the frontend-friendly graph export, annotated post-scoring
/// with the fields the §4.6 contract requires.
#[derive(Debug, Clone, Serialize)]
pub struct GraphJsonNode {
    pub id: String,
    pub in_degree: usize,
    pub out_degree: usize,
    pub suspicion_score: f64,
    pub is_suspicious: bool,
    pub ring_id: String,
    pub detected_patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphJsonLink {
    pub source: String,
    pub target: String,
    pub transaction_count: u64,
    pub total_amount: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphJson {
    pub nodes: Vec<GraphJsonNode>,
    pub links: Vec<GraphJsonLink>,
}

/// The full pipeline output.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionResult {
    pub suspicious_accounts: Vec<SuspiciousAccount>,
    pub fraud_rings: Vec<FraudRing>,
    pub summary: Summary,
    pub graph_json: GraphJson,
}

impl DetectionResult {
    /// The valid, empty document for zero usable input rows (§7,
    /// `EmptyInputResult` — not an error).
    pub fn empty(processing_time_seconds: f64) -> Self {
        Self {
            suspicious_accounts: Vec::new(),
            fraud_rings: Vec::new(),
            summary: Summary {
                total_accounts_analyzed: 0,
                suspicious_accounts_flagged: 0,
                fraud_rings_detected: 0,
                processing_time_seconds,
            },
            graph_json: GraphJson {
                nodes: Vec::new(),
                links: Vec::new(),
            },
        }
    }
}

/// Lightweight graph-level statistics, supplemented from the Python
/// original's `get_graph_stats` (SPEC_FULL.md §10.6). Not part of the
/// mandatory result document; exposed for the CLI demo harness.
#[derive(Debug, Clone, Serialize)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub total_volume: f64,
    pub avg_tx_amount: f64,
    pub density: f64,
    pub is_weakly_connected: bool,
    pub num_weakly_connected_components: usize,
}
