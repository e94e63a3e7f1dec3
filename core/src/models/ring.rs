//! Fraud ring assembly output.

use serde::Serialize;

/// The detection pattern that produced a ring. Community rings are only
/// emitted when [`crate::config::PipelineConfig::enable_community_rings`]
/// is set (default: on, per the spec's stricter §4.4 rule).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    Cycle,
    ShellChain,
    Community,
}

impl PatternType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternType::Cycle => "cycle",
            PatternType::ShellChain => "shell_chain",
            PatternType::Community => "community",
        }
    }
}

/// A deduplicated group of accounts exhibiting one detected pattern.
#[derive(Debug, Clone, Serialize)]
pub struct FraudRing {
    pub ring_id: String,
    pub member_accounts: Vec<String>,
    pub pattern_type: PatternType,
    pub risk_score: f64,
    pub total_amount: f64,
}

/// Format the `n`th ring id as `RING_001`, `RING_002`, … (1-indexed).
pub fn format_ring_id(sequence_number: usize) -> String {
    format!("RING_{sequence_number:03}")
}
