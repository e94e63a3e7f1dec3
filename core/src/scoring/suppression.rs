//! False-positive suppressors (§4.3): payroll, merchant, and gateway
//! accounts look structurally similar to fraud hubs but move money for
//! legitimate, repeatable reasons. Each check only fires once the
//! account is already cleared of cycle/shell membership.

use crate::config::DetectionThresholds;
use crate::graph::TransactionGraph;

pub struct SuppressionInputs<'a> {
    pub graph: &'a TransactionGraph,
    pub account_id: &'a str,
    pub in_degree: usize,
    pub out_degree: usize,
    pub in_cycle: bool,
    pub is_shell_node: bool,
    pub forwarding_ratio: f64,
}

/// A high out-degree hub where funds do not loop back: `out_degree >= 10`,
/// not a cycle/shell member, low forwarding ratio, and no sampled
/// successor pays back into this account.
pub fn is_payroll(inputs: &SuppressionInputs, thresholds: &DetectionThresholds) -> bool {
    if inputs.out_degree < thresholds.payroll_min_out_degree
        || inputs.in_cycle
        || inputs.is_shell_node
        || inputs.forwarding_ratio >= thresholds.payroll_max_forwarding_ratio
    {
        return false;
    }

    let source = match inputs.graph.index(inputs.account_id) {
        Some(idx) => idx,
        None => return false,
    };
    let successors = inputs.graph.out_neighbors_sorted(source);
    !successors
        .iter()
        .take(thresholds.payroll_return_path_sample)
        .any(|&s| inputs.graph.has_edge(s, source))
}

/// A collection hub: many senders, at most one outgoing edge, not a
/// cycle/shell member.
pub fn is_merchant(inputs: &SuppressionInputs, thresholds: &DetectionThresholds) -> bool {
    inputs.in_degree >= thresholds.merchant_min_in_degree
        && inputs.out_degree <= thresholds.merchant_max_out_degree
        && !inputs.in_cycle
        && !inputs.is_shell_node
}

/// A high-volume pass-through processor: large in- and out-degree, not a
/// cycle member.
pub fn is_gateway(inputs: &SuppressionInputs, thresholds: &DetectionThresholds) -> bool {
    inputs.in_degree >= thresholds.gateway_min_in_degree
        && inputs.out_degree >= thresholds.gateway_min_out_degree
        && !inputs.in_cycle
}
