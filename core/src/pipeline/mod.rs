//! Top-level orchestration (§4.6): graph build -> feature extraction ->
//! scoring -> ring assembly -> explanation, assembled into the single
//! externally observable [`DetectionResult`].

use std::time::Instant;

use tracing::info;

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::explain::build_explanation;
use crate::features::extract_features;
use crate::graph::{self, graph_to_json};
use crate::models::{
    DetectionResult, GraphJson, RawTransactionRow, Summary, SuspiciousAccount,
};
use crate::rings::assemble_rings;
use crate::scoring::score_accounts;

/// Runs the full pipeline over one batch of raw rows.
pub fn run_detection_pipeline(
    rows: &[RawTransactionRow],
    config: &PipelineConfig,
) -> Result<DetectionResult, PipelineError> {
    let start = Instant::now();

    if rows.is_empty() {
        return Ok(DetectionResult::empty(round3(start.elapsed().as_secs_f64())));
    }

    let (graph, records) = graph::build(rows)?;
    if graph.node_count() == 0 {
        return Ok(DetectionResult::empty(round3(start.elapsed().as_secs_f64())));
    }

    let features = extract_features(&graph, &records, &config.thresholds);
    let mut scores = score_accounts(&graph, &features, &config.weights, &config.thresholds);
    let fraud_rings = assemble_rings(&graph, &features, &mut scores, config);

    let mut suspicious_accounts: Vec<SuspiciousAccount> = scores
        .values()
        .filter(|s| s.risk_score >= config.weights.suspicious_threshold && !s.is_suppressed())
        .map(|s| SuspiciousAccount {
            account_id: s.account_id.clone(),
            suspicion_score: s.risk_score,
            detected_patterns: s.reasons.clone(),
            explanation: build_explanation(s),
            ring_id: s.ring_id.clone().unwrap_or_else(|| "NONE".to_string()),
        })
        .collect();
    suspicious_accounts.sort_by(|a, b| {
        b.suspicion_score
            .partial_cmp(&a.suspicion_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.account_id.cmp(&b.account_id))
    });

    let graph_json = annotate_graph_json(graph_to_json(&graph), &scores, config);

    let summary = Summary {
        total_accounts_analyzed: graph.node_count(),
        suspicious_accounts_flagged: suspicious_accounts.len(),
        fraud_rings_detected: fraud_rings.len(),
        processing_time_seconds: round3(start.elapsed().as_secs_f64()),
    };

    info!(
        accounts = summary.total_accounts_analyzed,
        flagged = summary.suspicious_accounts_flagged,
        rings = summary.fraud_rings_detected,
        "detection pipeline run complete"
    );

    Ok(DetectionResult {
        suspicious_accounts,
        fraud_rings,
        summary,
        graph_json,
    })
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

fn annotate_graph_json(
    mut graph_json: GraphJson,
    scores: &std::collections::HashMap<String, crate::models::AccountScore>,
    config: &PipelineConfig,
) -> GraphJson {
    for node in &mut graph_json.nodes {
        if let Some(score) = scores.get(&node.id) {
            node.suspicion_score = score.risk_score;
            node.is_suspicious =
                score.risk_score >= config.weights.suspicious_threshold && !score.is_suppressed();
            node.ring_id = score.ring_id.clone().unwrap_or_else(|| "NONE".to_string());
            node.detected_patterns = score.reasons.clone();
        }
    }
    graph_json
}
