//! Graph export helpers: the frontend-friendly JSON shape (§4.1) and the
//! lightweight summary statistics supplemented from the Python original's
//! `get_graph_stats` (SPEC_FULL.md §10.6).

use petgraph::algo::connected_components;

use crate::models::{GraphJson, GraphJsonLink, GraphJsonNode, GraphStats};

use super::TransactionGraph;

/// Export nodes/links in insertion order, rounding `total_amount` to 2 dp.
pub fn graph_to_json(graph: &TransactionGraph) -> GraphJson {
    let nodes = graph
        .node_indices()
        .map(|idx| GraphJsonNode {
            id: graph.id(idx).to_string(),
            in_degree: graph.in_degree(idx),
            out_degree: graph.out_degree(idx),
            // Filled in later by the pipeline once scores are known.
            suspicion_score: 0.0,
            is_suspicious: false,
            ring_id: "NONE".to_string(),
            detected_patterns: Vec::new(),
        })
        .collect();

    let links = graph
        .edges()
        .map(|(source, target, data)| GraphJsonLink {
            source: source.to_string(),
            target: target.to_string(),
            transaction_count: data.transaction_count,
            total_amount: round2(data.total_amount),
        })
        .collect();

    GraphJson { nodes, links }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Graph-level statistics for the CLI demo harness's run summary.
pub fn graph_stats(graph: &TransactionGraph) -> GraphStats {
    let total_nodes = graph.node_count();
    let total_edges = graph.edge_count();
    let total_volume: f64 = graph.edges().map(|(_, _, d)| d.total_amount).sum();
    let avg_tx_amount = if total_edges > 0 {
        round2(total_volume / total_edges as f64)
    } else {
        0.0
    };

    let max_possible_edges = if total_nodes > 1 {
        (total_nodes * (total_nodes - 1)) as f64
    } else {
        0.0
    };
    let density = if max_possible_edges > 0.0 {
        total_edges as f64 / max_possible_edges
    } else {
        0.0
    };

    // `connected_components` unions edge endpoints regardless of direction,
    // which is exactly weak connectivity for a directed graph.
    let components = if total_nodes > 0 {
        connected_components(graph.inner())
    } else {
        0
    };

    GraphStats {
        total_nodes,
        total_edges,
        total_volume: round2(total_volume),
        avg_tx_amount,
        density: (density * 1_000_000.0).round() / 1_000_000.0,
        is_weakly_connected: total_nodes > 0 && components == 1,
        num_weakly_connected_components: components,
    }
}
