//! Additive/subtractive risk scoring (§4.3).

mod suppression;

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::config::{DetectionThresholds, ScoringWeights};
use crate::features::FeatureBundle;
use crate::graph::TransactionGraph;
use crate::models::{AccountScore, RiskTier};

use suppression::{is_gateway, is_merchant, is_payroll, SuppressionInputs};

/// Per-node distinct cycle lengths, derived from the raw cycle list (the
/// feature bundle's metadata only keeps the minimum length per node).
fn cycle_lengths_by_node(features: &FeatureBundle) -> HashMap<String, BTreeSet<usize>> {
    let mut lengths: HashMap<String, BTreeSet<usize>> = HashMap::new();
    for cycle in &features.cycles.cycles {
        for node in cycle {
            lengths.entry(node.clone()).or_default().insert(cycle.len());
        }
    }
    lengths
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += v;
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Scores every node in the graph, returning one [`AccountScore`] per
/// account id.
pub fn score_accounts(
    graph: &TransactionGraph,
    features: &FeatureBundle,
    weights: &ScoringWeights,
    thresholds: &DetectionThresholds,
) -> HashMap<String, AccountScore> {
    let cycle_lengths = cycle_lengths_by_node(features);

    let mean_pagerank = mean(features.pagerank.values().copied());
    let mean_betweenness = mean(features.betweenness.values().copied());

    let mut community_sizes: HashMap<u32, usize> = HashMap::new();
    for &community in features.community.values() {
        *community_sizes.entry(community).or_insert(0) += 1;
    }

    let mut scores = HashMap::new();

    for id in graph.node_ids() {
        let in_degree = features.degrees.in_degree.get(id).copied().unwrap_or(0);
        let out_degree = features.degrees.out_degree.get(id).copied().unwrap_or(0);
        let cycle_meta = features.cycles.metadata.get(id);
        let in_cycle = cycle_meta.is_some();
        let is_shell_node = features.shell_data.shell_nodes.contains(id);
        let forwarding_ratio = features.forwarding_ratio.get(id).copied().unwrap_or(0.0);
        let temporal = features.temporal.get(id);
        let pagerank = features.pagerank.get(id).copied().unwrap_or(0.0);
        let betweenness = features.betweenness.get(id).copied().unwrap_or(0.0);

        let mut score = 0.0f64;
        let mut has_primary = false;
        let mut reasons: Vec<String> = Vec::new();
        let mut push_reason = |reasons: &mut Vec<String>, token: &str| {
            if !reasons.iter().any(|r| r == token) {
                reasons.push(token.to_string());
            }
        };

        // --- Primary, additive signals ---
        if let Some(meta) = cycle_meta {
            has_primary = true;
            if meta.cycle_count >= 2 || meta.max_cycle_amount > thresholds.low_amount_cycle_threshold {
                score += weights.cycle_high_amount;
            } else {
                score += weights.cycle_low_amount;
            }
            push_reason(&mut reasons, "Account is part of a transaction cycle");
            if let Some(lengths) = cycle_lengths.get(id) {
                for length in lengths {
                    push_reason(&mut reasons, &format!("cycle_length_{length}"));
                }
            }
        }

        let fan_in = temporal.map(|t| t.is_smurfing_fan_in(thresholds)).unwrap_or(false);
        let fan_out = temporal.map(|t| t.is_smurfing_fan_out(thresholds)).unwrap_or(false);
        if fan_in || fan_out {
            has_primary = true;
            score += weights.smurfing;
            if fan_in {
                push_reason(&mut reasons, "smurfing_fan_in_72h");
            }
            if fan_out {
                push_reason(&mut reasons, "smurfing_fan_out_72h");
            }
        }

        if is_shell_node {
            has_primary = true;
            score += weights.shell_membership;
            push_reason(&mut reasons, "shell_account");
        }

        let velocity = temporal.map(|t| t.velocity_tx_per_day).unwrap_or(0.0);
        if velocity > thresholds.high_velocity_tx_per_day {
            has_primary = true;
            score += weights.high_velocity;
            push_reason(&mut reasons, "high_velocity");
        }

        // --- Supporting, additive signals (only once a primary fired) ---
        if has_primary {
            if mean_pagerank > 0.0 && pagerank > 2.0 * mean_pagerank {
                score += weights.supporting_pagerank;
                push_reason(&mut reasons, "High PageRank (central in transaction network)");
            }
            if mean_betweenness > 0.0 && betweenness > 2.0 * mean_betweenness {
                score += weights.supporting_betweenness;
                push_reason(&mut reasons, "High betweenness centrality (intermediary account)");
            }
            if let Some(&community) = features.community.get(id) {
                if community_sizes.get(&community).copied().unwrap_or(0) > 1 {
                    score += weights.supporting_community;
                    push_reason(&mut reasons, "Part of suspicious transaction community");
                }
            }
        }

        // --- Subtractive suppressors ---
        let suppression_inputs = SuppressionInputs {
            graph,
            account_id: id,
            in_degree,
            out_degree,
            in_cycle,
            is_shell_node,
            forwarding_ratio,
        };

        let mut payroll = false;
        let mut merchant = false;
        let mut gateway = false;

        if is_payroll(&suppression_inputs, thresholds) {
            payroll = true;
            score -= weights.payroll_penalty;
            push_reason(&mut reasons, "likely_payroll");
        } else if is_merchant(&suppression_inputs, thresholds) {
            merchant = true;
            score -= weights.merchant_penalty;
            push_reason(&mut reasons, "likely_merchant");
        } else if is_gateway(&suppression_inputs, thresholds) {
            gateway = true;
            score -= weights.gateway_penalty;
            push_reason(&mut reasons, "likely_gateway");
        }

        if out_degree <= thresholds.low_activity_max_out_degree && !has_primary {
            score -= weights.low_activity_penalty; // silent: no reason token
        }

        if let Some(meta) = cycle_meta {
            if meta.max_cycle_amount < thresholds.low_amount_cycle_threshold
                && meta.cycle_count <= thresholds.low_amount_cycle_max_count
            {
                score -= weights.low_amount_cycle_penalty;
                push_reason(&mut reasons, "low_amount_cycle");
            }
        }

        let clamped = score.clamp(0.0, 100.0);
        let rounded = (clamped * 10.0).round() / 10.0;

        let mut tier = tier_for(rounded, weights);
        if (payroll || merchant || gateway) && rounded < weights.suspicious_threshold {
            tier = RiskTier::Low;
        }

        scores.insert(
            id.to_string(),
            AccountScore {
                account_id: id.to_string(),
                risk_score: rounded,
                risk_tier: tier,
                reasons,
                pagerank,
                betweenness,
                in_degree,
                out_degree,
                is_payroll: payroll,
                is_merchant: merchant,
                is_gateway: gateway,
                ring_id: None,
            },
        );
    }

    debug!(accounts = scores.len(), "scored all accounts");
    scores
}

fn tier_for(score: f64, weights: &ScoringWeights) -> RiskTier {
    if score >= weights.tier_critical {
        RiskTier::Critical
    } else if score >= weights.tier_high {
        RiskTier::High
    } else if score >= weights.tier_medium {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}
