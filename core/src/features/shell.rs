//! Shell-candidate detection and layered shell-chain tracing (§4.2).
//!
//! A shell candidate is a low-degree pass-through account (in ∈ [1,∞),
//! out ∈ [1,∞), total degree in {2,3}). A shell *chain* threads one or
//! more shell candidates between two non-candidate endpoints, with at
//! least 3 hops end to end.

use std::collections::{HashMap, HashSet};

use crate::config::DetectionThresholds;
use crate::features::degree::DegreeFeatures;
use crate::graph::TransactionGraph;

pub struct ShellData {
    pub shell_chains: Vec<Vec<String>>,
    pub shell_nodes: HashSet<String>,
    pub nodes_in_chains: HashSet<String>,
}

/// Degree-only shell candidacy check: `2 <= in+out <= 3 && in >= 1 && out >= 1`.
pub fn detect_shell_candidates(
    degrees: &DegreeFeatures,
    thresholds: &DetectionThresholds,
) -> HashSet<String> {
    degrees
        .in_degree
        .iter()
        .filter(|(id, &in_deg)| {
            let out_deg = degrees.out_degree.get(*id).copied().unwrap_or(0);
            let sum = in_deg + out_deg;
            in_deg >= 1
                && out_deg >= 1
                && sum >= thresholds.shell_min_degree_sum
                && sum <= thresholds.shell_max_degree_sum
        })
        .map(|(id, _)| id.clone())
        .collect()
}

struct ChainSearch<'a> {
    graph: &'a TransactionGraph,
    candidates: &'a HashSet<String>,
    max_depth: usize,
    min_hops: usize,
    chains: Vec<Vec<String>>,
    seen: HashSet<Vec<String>>,
}

impl<'a> ChainSearch<'a> {
    fn extend(&mut self, path: &mut Vec<String>, shell_hop_count: usize) {
        let current = self
            .graph
            .index(path.last().expect("path never empty"))
            .expect("path node must exist in graph");

        for neighbor in self.graph.out_neighbors_sorted(current) {
            let neighbor_id = self.graph.id(neighbor).to_string();
            if path.contains(&neighbor_id) {
                continue; // avoid cycles within a chain
            }

            if self.candidates.contains(&neighbor_id) {
                if shell_hop_count >= self.max_depth {
                    continue; // recursion-depth bound reached
                }
                path.push(neighbor_id);
                self.extend(path, shell_hop_count + 1);
                path.pop();
            } else {
                // Terminal (non-candidate) endpoint closes the chain.
                let hops = path.len(); // edges from u0 through this terminal
                if hops >= self.min_hops {
                    let mut full = path.clone();
                    full.push(neighbor_id);
                    if self.seen.insert(full.clone()) {
                        self.chains.push(full);
                    }
                }
            }
        }
    }
}

/// Trace shell chains rooted at every non-candidate node.
pub fn detect_shell_chains(
    graph: &TransactionGraph,
    candidates: &HashSet<String>,
    thresholds: &DetectionThresholds,
) -> ShellData {
    let mut search = ChainSearch {
        graph,
        candidates,
        max_depth: thresholds.shell_chain_max_depth,
        min_hops: thresholds.shell_chain_min_hops,
        chains: Vec::new(),
        seen: HashSet::new(),
    };

    for root_id in graph.node_ids_sorted() {
        if candidates.contains(root_id) {
            continue; // u0 must not itself be a shell candidate
        }
        let mut path = vec![root_id.to_string()];
        search.extend(&mut path, 0);
    }

    let mut shell_nodes = HashSet::new();
    let mut nodes_in_chains = HashSet::new();
    for chain in &search.chains {
        for node in chain {
            nodes_in_chains.insert(node.clone());
        }
        for interior in &chain[1..chain.len() - 1] {
            shell_nodes.insert(interior.clone());
        }
    }

    ShellData {
        shell_chains: search.chains,
        shell_nodes,
        nodes_in_chains,
    }
}

/// Convenience map kept alongside [`ShellData`] for O(1) membership checks
/// during scoring.
pub fn shell_membership_map(data: &ShellData, graph: &TransactionGraph) -> HashMap<String, bool> {
    graph
        .node_ids()
        .map(|id| (id.to_string(), data.shell_nodes.contains(id)))
        .collect()
}
