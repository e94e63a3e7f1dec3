//! Amount-weighted PageRank and betweenness centrality (§4.2).
//!
//! Both measures treat a high-`total_amount` edge as a "cheaper", more
//! heavily used channel: PageRank distributes each node's rank in
//! proportion to outgoing edge amount, and betweenness runs Dijkstra with
//! edge cost `1 / total_amount` so large-value routes dominate the
//! shortest-path counts. Betweenness falls back to pivot sampling above
//! `betweenness_exact_node_limit` nodes, using the same deterministic
//! [`RngManager`](crate::rng::RngManager) the teacher's simulator uses for
//! reproducible sampling, seeded per [`DetectionThresholds::betweenness_seed`].

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use petgraph::graph::NodeIndex;

use crate::config::DetectionThresholds;
use crate::graph::TransactionGraph;
use crate::rng::RngManager;

const PAGERANK_DAMPING: f64 = 0.85;
const PAGERANK_MAX_ITER: usize = 100;
const PAGERANK_TOLERANCE: f64 = 1e-8;
const DIST_EPSILON: f64 = 1e-9;

/// Amount-weighted PageRank, power-iterated to convergence (or the
/// iteration cap, whichever comes first).
pub fn pagerank(graph: &TransactionGraph) -> HashMap<String, f64> {
    let n = graph.node_count();
    if n == 0 {
        return HashMap::new();
    }
    let ids = graph.node_ids_sorted();
    let index_of: HashMap<&str, usize> = ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();

    // Row-normalised transition weights per node, plus each node's total
    // outgoing weight (0.0 marks a dangling node).
    let mut out_weight_sum = vec![0.0f64; n];
    let mut transitions: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
    for (i, &id) in ids.iter().enumerate() {
        let idx = graph.index(id).expect("sorted id resolves");
        for neighbor in graph.out_neighbors_sorted(idx) {
            let weight = graph.edge(idx, neighbor).map(|e| e.total_amount).unwrap_or(0.0);
            out_weight_sum[i] += weight;
            transitions[i].push((index_of[graph.id(neighbor)], weight));
        }
    }

    let mut rank = vec![1.0 / n as f64; n];
    for _ in 0..PAGERANK_MAX_ITER {
        let mut next = vec![(1.0 - PAGERANK_DAMPING) / n as f64; n];

        let dangling_mass: f64 = (0..n)
            .filter(|&i| out_weight_sum[i] <= 0.0)
            .map(|i| rank[i])
            .sum();
        let dangling_share = PAGERANK_DAMPING * dangling_mass / n as f64;
        for slot in next.iter_mut() {
            *slot += dangling_share;
        }

        for (i, edges) in transitions.iter().enumerate() {
            if out_weight_sum[i] <= 0.0 {
                continue;
            }
            for &(j, weight) in edges {
                next[j] += PAGERANK_DAMPING * rank[i] * (weight / out_weight_sum[i]);
            }
        }

        let delta: f64 = next.iter().zip(&rank).map(|(a, b)| (a - b).abs()).sum();
        rank = next;
        if delta < PAGERANK_TOLERANCE {
            break;
        }
    }

    ids.into_iter().enumerate().map(|(i, id)| (id.to_string(), rank[i])).collect()
}

#[derive(Clone, Copy, PartialEq)]
struct HeapEntry {
    dist: f64,
    node: NodeIndex,
}

impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so `BinaryHeap` (a max-heap) pops the smallest distance.
        other.dist.partial_cmp(&self.dist).unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn edge_cost(graph: &TransactionGraph, from: NodeIndex, to: NodeIndex) -> f64 {
    let amount = graph.edge(from, to).map(|e| e.total_amount).unwrap_or(0.0);
    1.0 / amount.max(0.01)
}

/// One pivot's contribution to betweenness via weighted (Dijkstra) Brandes
/// accumulation.
fn accumulate_from_pivot(
    graph: &TransactionGraph,
    pivot: NodeIndex,
    totals: &mut HashMap<NodeIndex, f64>,
) {
    let mut dist: HashMap<NodeIndex, f64> = HashMap::new();
    let mut sigma: HashMap<NodeIndex, f64> = HashMap::new();
    let mut preds: HashMap<NodeIndex, Vec<NodeIndex>> = HashMap::new();
    let mut order: Vec<NodeIndex> = Vec::new();
    let mut heap = BinaryHeap::new();

    dist.insert(pivot, 0.0);
    sigma.insert(pivot, 1.0);
    heap.push(HeapEntry { dist: 0.0, node: pivot });

    while let Some(HeapEntry { dist: d, node: u }) = heap.pop() {
        if d > dist[&u] + DIST_EPSILON {
            continue; // stale heap entry
        }
        order.push(u);
        for v in graph.out_neighbors_sorted(u) {
            let alt = d + edge_cost(graph, u, v);
            match dist.get(&v) {
                None => {
                    dist.insert(v, alt);
                    sigma.insert(v, sigma[&u]);
                    preds.insert(v, vec![u]);
                    heap.push(HeapEntry { dist: alt, node: v });
                }
                Some(&existing) if alt < existing - DIST_EPSILON => {
                    dist.insert(v, alt);
                    sigma.insert(v, sigma[&u]);
                    preds.insert(v, vec![u]);
                    heap.push(HeapEntry { dist: alt, node: v });
                }
                Some(&existing) if (alt - existing).abs() <= DIST_EPSILON => {
                    *sigma.get_mut(&v).unwrap() += sigma[&u];
                    preds.entry(v).or_default().push(u);
                }
                _ => {}
            }
        }
    }

    let mut delta: HashMap<NodeIndex, f64> = HashMap::new();
    for &w in order.iter().rev() {
        let dw = delta.get(&w).copied().unwrap_or(0.0);
        if let Some(ps) = preds.get(&w) {
            for &v in ps {
                let share = (sigma[&v] / sigma[&w]) * (1.0 + dw);
                *delta.entry(v).or_insert(0.0) += share;
            }
        }
        if w != pivot {
            *totals.entry(w).or_insert(0.0) += dw;
        }
    }
}

/// Amount-weighted betweenness, exact below `betweenness_exact_node_limit`
/// nodes and pivot-sampled (deterministic seed) above it.
pub fn betweenness(graph: &TransactionGraph, thresholds: &DetectionThresholds) -> HashMap<String, f64> {
    let n = graph.node_count();
    let mut totals: HashMap<NodeIndex, f64> = HashMap::new();
    for idx in graph.node_indices() {
        totals.insert(idx, 0.0);
    }
    if n < 3 {
        return graph.node_ids().map(|id| (id.to_string(), 0.0)).collect();
    }

    let sorted_ids = graph.node_ids_sorted();
    let exact = n <= thresholds.betweenness_exact_node_limit;
    let pivots: Vec<NodeIndex> = if exact {
        sorted_ids.iter().map(|id| graph.index(id).unwrap()).collect()
    } else {
        let k = thresholds.betweenness_sample_pivots.min(n);
        let mut rng = RngManager::new(thresholds.betweenness_seed);
        let mut chosen = std::collections::HashSet::new();
        while chosen.len() < k {
            chosen.insert(rng.range(0, n));
        }
        chosen.into_iter().map(|i| graph.index(sorted_ids[i]).unwrap()).collect()
    };

    for &pivot in &pivots {
        accumulate_from_pivot(graph, pivot, &mut totals);
    }

    let scale = if exact { 1.0 } else { n as f64 / pivots.len() as f64 };
    let norm = if n > 2 { ((n - 1) * (n - 2)) as f64 } else { 1.0 };

    totals
        .into_iter()
        .map(|(idx, raw)| (graph.id(idx).to_string(), (raw * scale) / norm))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawTransactionRow;

    fn row(sender: &str, receiver: &str, amount: f64) -> RawTransactionRow {
        RawTransactionRow {
            transaction_id: None,
            sender: Some(sender.to_string()),
            sender_id: None,
            receiver: Some(receiver.to_string()),
            receiver_id: None,
            amount: Some(amount),
            timestamp: Some("2025-01-01T00:00:00Z".parse().unwrap()),
        }
    }

    #[test]
    fn pagerank_sums_to_roughly_one() {
        let rows = vec![
            row("A", "B", 100.0),
            row("B", "C", 100.0),
            row("C", "A", 100.0),
        ];
        let (graph, _) = crate::graph::build(&rows).unwrap();
        let ranks = pagerank(&graph);
        let total: f64 = ranks.values().sum();
        assert!((total - 1.0).abs() < 1e-4, "total = {total}");
    }

    #[test]
    fn betweenness_peaks_at_bridge_node() {
        // A -> B -> C: B sits on every A-to-C shortest path.
        let rows = vec![row("A", "B", 100.0), row("B", "C", 100.0)];
        let (graph, _) = crate::graph::build(&rows).unwrap();
        let scores = betweenness(&graph, &DetectionThresholds::default());
        assert!(scores["B"] > scores["A"]);
        assert!(scores["B"] > scores["C"]);
    }
}
