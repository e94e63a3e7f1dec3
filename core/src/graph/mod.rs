//! Directed transaction graph: construction, accessors, and export.
//!
//! Grounded on `settlement/lsm/graph.rs`'s `AggregatedGraph` in the teacher
//! repo — a stable-indexed, deterministic adjacency structure over
//! summarised edges — rebuilt here on top of `petgraph::DiGraph`, the same
//! crate `monad-arb-mvp` uses for its on-chain swap graph.

mod builder;
mod export;

pub use builder::build;
pub use export::{graph_stats, graph_to_json};

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

/// Summarised edge data for one ordered account pair (§3).
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeData {
    pub transaction_count: u64,
    pub total_amount: f64,
    /// Most-recent transaction amount on this edge.
    pub amount: f64,
    /// Most-recent transaction timestamp on this edge, `None` if the batch
    /// never populated the column.
    pub timestamp: Option<DateTime<Utc>>,
}

/// A directed, summarised transaction graph: at most one edge per ordered
/// account pair (§3 invariant).
#[derive(Debug, Clone, Default)]
pub struct TransactionGraph {
    graph: DiGraph<String, EdgeData>,
    id_to_index: HashMap<String, NodeIndex>,
}

impl TransactionGraph {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node indices in insertion order (stable for the life of the graph —
    /// nodes are never removed after construction).
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Account ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_indices().map(move |i| self.id(i))
    }

    /// Account ids sorted lexicographically — the iteration order used by
    /// every algorithm in `features/` that must be reproducible regardless
    /// of input row order (§5).
    pub fn node_ids_sorted(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.node_ids().collect();
        ids.sort_unstable();
        ids
    }

    pub fn id(&self, index: NodeIndex) -> &str {
        self.graph.node_weight(index).expect("node index must be valid")
    }

    pub fn index(&self, id: &str) -> Option<NodeIndex> {
        self.id_to_index.get(id).copied()
    }

    fn get_or_insert_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(id.to_string());
        self.id_to_index.insert(id.to_string(), idx);
        idx
    }

    pub fn in_degree(&self, index: NodeIndex) -> usize {
        self.graph.edges_directed(index, Direction::Incoming).count()
    }

    pub fn out_degree(&self, index: NodeIndex) -> usize {
        self.graph.edges_directed(index, Direction::Outgoing).count()
    }

    /// Out-neighbor indices, sorted by account id for determinism.
    pub fn out_neighbors_sorted(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut neighbors: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(index, Direction::Outgoing)
            .collect();
        neighbors.sort_unstable_by_key(|&n| self.id(n));
        neighbors
    }

    /// In-neighbor indices, sorted by account id for determinism.
    pub fn in_neighbors_sorted(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut neighbors: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(index, Direction::Incoming)
            .collect();
        neighbors.sort_unstable_by_key(|&n| self.id(n));
        neighbors
    }

    pub fn edge(&self, from: NodeIndex, to: NodeIndex) -> Option<&EdgeData> {
        self.graph
            .find_edge(from, to)
            .and_then(|e| self.graph.edge_weight(e))
    }

    pub fn has_edge(&self, from: NodeIndex, to: NodeIndex) -> bool {
        self.graph.find_edge(from, to).is_some()
    }

    /// All edges as `(source_id, target_id, data)`, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &EdgeData)> + '_ {
        self.graph.edge_indices().map(move |e| {
            let (from, to) = self.graph.edge_endpoints(e).expect("edge index valid");
            (self.id(from), self.id(to), self.graph.edge_weight(e).expect("edge weight"))
        })
    }

    /// The underlying petgraph handle, for algorithms (e.g. Tarjan SCC)
    /// that operate directly on it.
    pub fn inner(&self) -> &DiGraph<String, EdgeData> {
        &self.graph
    }

    pub(crate) fn inner_mut(&mut self) -> &mut DiGraph<String, EdgeData> {
        &mut self.graph
    }
}
