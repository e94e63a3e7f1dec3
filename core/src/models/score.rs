//! Per-account scoring output.

use serde::Serialize;

/// Risk tier assigned after clamping and suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "LOW",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
            RiskTier::Critical => "CRITICAL",
        }
    }
}

/// The scorer's per-account row; consumed by the ring assembler and the
/// pipeline orchestrator to build the external result document.
#[derive(Debug, Clone, Serialize)]
pub struct AccountScore {
    pub account_id: String,
    pub risk_score: f64,
    pub risk_tier: RiskTier,
    pub reasons: Vec<String>,
    pub pagerank: f64,
    pub betweenness: f64,
    pub in_degree: usize,
    pub out_degree: usize,
    pub is_payroll: bool,
    pub is_merchant: bool,
    pub is_gateway: bool,
    pub ring_id: Option<String>,
}

impl AccountScore {
    pub fn is_suppressed(&self) -> bool {
        self.is_payroll || self.is_merchant || self.is_gateway
    }
}
