//! Community detection over the undirected projection (§4.2, §9).
//!
//! Louvain modularity optimisation is the usual choice here, but its
//! merge order is only deterministic if every tie-break is pinned down
//! (node order, community order, pass order). Synchronous label
//! propagation gives the same "dense cluster -> shared id" result with a
//! single, easy-to-pin tie-break (lowest neighboring label wins), so it's
//! used here instead — see the Open Question note in the design ledger.

use std::collections::HashMap;

use petgraph::graph::NodeIndex;

use crate::graph::TransactionGraph;

const MAX_ITERATIONS: usize = 100;

/// Undirected adjacency (account id -> neighboring account ids, from
/// either direction, deduplicated) used as the propagation substrate.
fn undirected_adjacency(graph: &TransactionGraph) -> HashMap<NodeIndex, Vec<NodeIndex>> {
    let mut adjacency: HashMap<NodeIndex, Vec<NodeIndex>> = HashMap::new();
    for idx in graph.node_indices() {
        let mut neighbors: Vec<NodeIndex> = graph
            .out_neighbors_sorted(idx)
            .into_iter()
            .chain(graph.in_neighbors_sorted(idx))
            .collect();
        neighbors.sort_unstable_by_key(|&n| graph.id(n));
        neighbors.dedup();
        adjacency.insert(idx, neighbors);
    }
    adjacency
}

/// Assigns every node an integer community id via synchronous label
/// propagation: each node adopts the most common label among its
/// neighbors, breaking ties by the smallest label id, and breaking
/// "most common" ties the same way. Nodes are visited in account-id
/// order each pass for determinism.
pub fn detect_communities(graph: &TransactionGraph) -> HashMap<String, u32> {
    let n = graph.node_count();
    if n == 0 {
        return HashMap::new();
    }

    let adjacency = undirected_adjacency(graph);
    let sorted_ids = graph.node_ids_sorted();

    // Seed labels from insertion order in the sorted-id sequence so the
    // initial assignment alone is reproducible.
    let mut label: HashMap<NodeIndex, u32> = sorted_ids
        .iter()
        .enumerate()
        .map(|(i, &id)| (graph.index(id).unwrap(), i as u32))
        .collect();

    for _ in 0..MAX_ITERATIONS {
        let mut changed = false;
        for &id in &sorted_ids {
            let idx = graph.index(id).unwrap();
            let neighbors = &adjacency[&idx];
            if neighbors.is_empty() {
                continue;
            }
            let mut counts: HashMap<u32, usize> = HashMap::new();
            for &neighbor in neighbors {
                *counts.entry(label[&neighbor]).or_insert(0) += 1;
            }
            let best = counts
                .into_iter()
                .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
                .map(|(lbl, _)| lbl)
                .unwrap();
            if best != label[&idx] {
                label.insert(idx, best);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    // Renumber labels densely (0..k) in order of first appearance over the
    // sorted-id sweep, so ids don't depend on petgraph's internal indices.
    let mut renumber: HashMap<u32, u32> = HashMap::new();
    let mut next_id = 0u32;
    let mut result = HashMap::new();
    for &id in &sorted_ids {
        let idx = graph.index(id).unwrap();
        let raw = label[&idx];
        let community = *renumber.entry(raw).or_insert_with(|| {
            let assigned = next_id;
            next_id += 1;
            assigned
        });
        result.insert(id.to_string(), community);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawTransactionRow;

    fn row(sender: &str, receiver: &str) -> RawTransactionRow {
        RawTransactionRow {
            transaction_id: None,
            sender: Some(sender.to_string()),
            sender_id: None,
            receiver: Some(receiver.to_string()),
            receiver_id: None,
            amount: Some(10.0),
            timestamp: Some("2025-01-01T00:00:00Z".parse().unwrap()),
        }
    }

    #[test]
    fn two_disjoint_triangles_form_two_communities() {
        let rows = vec![
            row("A", "B"),
            row("B", "C"),
            row("C", "A"),
            row("X", "Y"),
            row("Y", "Z"),
            row("Z", "X"),
        ];
        let (graph, _) = crate::graph::build(&rows).unwrap();
        let communities = detect_communities(&graph);
        assert_eq!(communities["A"], communities["B"]);
        assert_eq!(communities["B"], communities["C"]);
        assert_eq!(communities["X"], communities["Y"]);
        assert_eq!(communities["Y"], communities["Z"]);
        assert_ne!(communities["A"], communities["X"]);
    }

    #[test]
    fn deterministic_across_runs() {
        let rows = vec![row("A", "B"), row("B", "C"), row("C", "D"), row("D", "A")];
        let (graph, _) = crate::graph::build(&rows).unwrap();
        let first = detect_communities(&graph);
        let second = detect_communities(&graph);
        assert_eq!(first, second);
    }
}
