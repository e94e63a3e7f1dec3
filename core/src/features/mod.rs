//! Feature extraction (§4.2): every per-account signal the scorer
//! consumes, derived from the graph and the raw record stream.

pub mod centrality;
pub mod community;
pub mod cycles;
pub mod degree;
pub mod forwarding;
pub mod shell;
pub mod temporal;

use std::collections::{HashMap, HashSet};

use crate::config::DetectionThresholds;
use crate::graph::TransactionGraph;
use crate::models::TransactionRecord;

pub use centrality::{betweenness, pagerank};
pub use community::detect_communities;
pub use cycles::{detect_cycles, CycleFeatures};
pub use degree::{compute_degrees, detect_fan_in, detect_fan_out, DegreeFeatures};
pub use forwarding::compute_forwarding_ratios;
pub use shell::{detect_shell_candidates, detect_shell_chains, ShellData};
pub use temporal::{compute_temporal_features, detect_high_velocity, detect_smurfing, TemporalFeatures};

/// Every derived signal, keyed by account id, covering every node in the
/// graph (accounts with no signal for a given dimension carry that
/// dimension's zero/empty value rather than being absent from the map).
pub struct FeatureBundle {
    pub degrees: DegreeFeatures,
    pub fan_in: HashSet<String>,
    pub fan_out: HashSet<String>,

    pub cycles: CycleFeatures,

    pub shell_candidates: HashSet<String>,
    pub shell_data: ShellData,

    pub temporal: HashMap<String, TemporalFeatures>,
    pub smurfing: HashSet<String>,
    pub high_velocity: HashSet<String>,

    pub forwarding_ratio: HashMap<String, f64>,

    pub pagerank: HashMap<String, f64>,
    pub betweenness: HashMap<String, f64>,

    pub community: HashMap<String, u32>,
}

/// Runs every feature extractor over the graph/record pair and assembles
/// the bundle the scorer needs.
pub fn extract_features(
    graph: &TransactionGraph,
    records: &[TransactionRecord],
    thresholds: &DetectionThresholds,
) -> FeatureBundle {
    let degrees = compute_degrees(graph);
    let fan_in = detect_fan_in(&degrees, thresholds);
    let fan_out = detect_fan_out(&degrees, thresholds);

    let cycles = detect_cycles(graph, thresholds);

    let shell_candidates = detect_shell_candidates(&degrees, thresholds);
    let shell_data = detect_shell_chains(graph, &shell_candidates, thresholds);

    let account_ids = graph.node_ids().map(str::to_string).collect::<Vec<_>>();
    let temporal = compute_temporal_features(records, account_ids.into_iter(), thresholds, &fan_in, &fan_out);
    let smurfing = detect_smurfing(&temporal, thresholds);
    let high_velocity = detect_high_velocity(&temporal, thresholds);

    let forwarding_ratio = compute_forwarding_ratios(graph);

    let pagerank = pagerank(graph);
    let betweenness = betweenness(graph, thresholds);

    let community = detect_communities(graph);

    FeatureBundle {
        degrees,
        fan_in,
        fan_out,
        cycles,
        shell_candidates,
        shell_data,
        temporal,
        smurfing,
        high_velocity,
        forwarding_ratio,
        pagerank,
        betweenness,
        community,
    }
}
