//! Forwarding ratio (§4.2): fraction of an account's direct successors
//! that themselves have outgoing activity, i.e. pass funds along rather
//! than absorb them.

use std::collections::HashMap;

use crate::graph::TransactionGraph;

pub fn compute_forwarding_ratios(graph: &TransactionGraph) -> HashMap<String, f64> {
    graph
        .node_indices()
        .map(|idx| {
            let successors = graph.out_neighbors_sorted(idx);
            let ratio = if successors.is_empty() {
                0.0
            } else {
                let forwarding = successors
                    .iter()
                    .filter(|&&s| graph.out_degree(s) > 0)
                    .count();
                forwarding as f64 / successors.len() as f64
            };
            (graph.id(idx).to_string(), ratio)
        })
        .collect()
}
