//! Bounded simple directed cycle enumeration (§4.2) and per-node cycle
//! metadata.
//!
//! A naive but deterministic DFS is explicitly acceptable given the length
//! bound of 5 (design notes, §9). Each cycle is rooted at the
//! lexicographically smallest account id it contains — the classic
//! "only extend past the start vertex" trick Johnson's algorithm also
//! relies on — so every simple cycle is produced exactly once, and the
//! enumeration order is fully determined by account id, not input row
//! order or hash iteration.

use std::collections::{HashMap, HashSet};

use petgraph::graph::NodeIndex;
use tracing::warn;

use crate::config::DetectionThresholds;
use crate::graph::TransactionGraph;

/// Per-node aggregate over the cycles it participates in.
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleMetadata {
    pub cycle_count: u32,
    pub max_cycle_amount: f64,
    pub min_cycle_length: usize,
}

pub struct CycleFeatures {
    /// Cycles in discovery order, each a sequence of account ids.
    pub cycles: Vec<Vec<String>>,
    /// Union of cycle membership, first-seen order.
    pub nodes_in_cycles: Vec<String>,
    pub metadata: HashMap<String, CycleMetadata>,
}

struct Search<'g> {
    graph: &'g TransactionGraph,
    start: NodeIndex,
    path: Vec<NodeIndex>,
    on_path: HashSet<NodeIndex>,
    max_length: usize,
    min_length: usize,
    cap: usize,
    out: Vec<Vec<NodeIndex>>,
}

impl<'g> Search<'g> {
    fn dfs(&mut self) {
        if self.out.len() >= self.cap {
            return;
        }
        let current = *self.path.last().expect("path is never empty during dfs");
        for neighbor in self.graph.out_neighbors_sorted(current) {
            if self.out.len() >= self.cap {
                return;
            }
            if neighbor == self.start {
                if self.path.len() >= self.min_length {
                    self.out.push(self.path.clone());
                }
                continue;
            }
            // Only extend to nodes that sort after `start`: this guarantees
            // `start` is the minimum-id node of every cycle found here, so
            // no cycle is ever (re)discovered from a different root.
            if self.graph.id(neighbor) <= self.graph.id(self.start) {
                continue;
            }
            if self.on_path.contains(&neighbor) {
                continue;
            }
            if self.path.len() >= self.max_length {
                continue;
            }
            self.path.push(neighbor);
            self.on_path.insert(neighbor);
            self.dfs();
            self.on_path.remove(&neighbor);
            self.path.pop();
        }
    }
}

/// Enumerate simple directed cycles with the configured length bound and
/// collection cap, plus per-node metadata over the collected cycles.
pub fn detect_cycles(graph: &TransactionGraph, thresholds: &DetectionThresholds) -> CycleFeatures {
    let mut all: Vec<Vec<NodeIndex>> = Vec::new();

    for start_id in graph.node_ids_sorted() {
        if all.len() >= thresholds.cycle_cap {
            break;
        }
        let start = graph.index(start_id).expect("sorted id must resolve");
        let mut search = Search {
            graph,
            start,
            path: vec![start],
            on_path: HashSet::from([start]),
            max_length: thresholds.cycle_max_length,
            min_length: thresholds.cycle_min_length,
            cap: thresholds.cycle_cap,
            out: Vec::new(),
        };
        search.dfs();
        all.extend(search.out);
    }

    if all.len() >= thresholds.cycle_cap {
        warn!(cap = thresholds.cycle_cap, "cycle cap reached; stopping enumeration early");
        all.truncate(thresholds.cycle_cap);
    }

    let cycles: Vec<Vec<String>> = all
        .iter()
        .map(|cycle| cycle.iter().map(|&idx| graph.id(idx).to_string()).collect())
        .collect();

    let mut seen = HashSet::new();
    let mut nodes_in_cycles = Vec::new();
    for cycle in &cycles {
        for node in cycle {
            if seen.insert(node.clone()) {
                nodes_in_cycles.push(node.clone());
            }
        }
    }

    let metadata = compute_metadata(graph, &cycles);

    CycleFeatures {
        cycles,
        nodes_in_cycles,
        metadata,
    }
}

fn compute_metadata(graph: &TransactionGraph, cycles: &[Vec<String>]) -> HashMap<String, CycleMetadata> {
    let mut metadata: HashMap<String, CycleMetadata> = HashMap::new();

    for cycle in cycles {
        let amount = cycle_amount(graph, cycle);
        let length = cycle.len();
        for node in cycle {
            let entry = metadata.entry(node.clone()).or_insert(CycleMetadata {
                cycle_count: 0,
                max_cycle_amount: 0.0,
                min_cycle_length: usize::MAX,
            });
            entry.cycle_count += 1;
            entry.max_cycle_amount = entry.max_cycle_amount.max(amount);
            entry.min_cycle_length = entry.min_cycle_length.min(length);
        }
    }

    metadata
}

/// Sum of edge `total_amount` around the loop (including the closing edge).
fn cycle_amount(graph: &TransactionGraph, cycle: &[String]) -> f64 {
    let mut total = 0.0;
    for i in 0..cycle.len() {
        let from = graph.index(&cycle[i]).expect("cycle node must exist");
        let to = graph
            .index(&cycle[(i + 1) % cycle.len()])
            .expect("cycle node must exist");
        if let Some(edge) = graph.edge(from, to) {
            total += edge.total_amount;
        }
    }
    total
}
