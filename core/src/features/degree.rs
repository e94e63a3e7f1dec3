//! Degree features and degree-based fan-in/fan-out detection (§4.2).

use std::collections::{HashMap, HashSet};

use crate::config::DetectionThresholds;
use crate::graph::TransactionGraph;

pub struct DegreeFeatures {
    pub in_degree: HashMap<String, usize>,
    pub out_degree: HashMap<String, usize>,
}

pub fn compute_degrees(graph: &TransactionGraph) -> DegreeFeatures {
    let mut in_degree = HashMap::new();
    let mut out_degree = HashMap::new();
    for idx in graph.node_indices() {
        let id = graph.id(idx).to_string();
        in_degree.insert(id.clone(), graph.in_degree(idx));
        out_degree.insert(id, graph.out_degree(idx));
    }
    DegreeFeatures { in_degree, out_degree }
}

/// A fan-in collector: many senders (`in_degree >= min_in`), almost no
/// outflow (`out_degree <= max_out`).
pub fn detect_fan_in(degrees: &DegreeFeatures, thresholds: &DetectionThresholds) -> HashSet<String> {
    degrees
        .in_degree
        .iter()
        .filter(|(id, &in_deg)| {
            in_deg >= thresholds.fan_in_min_in_degree
                && degrees.out_degree.get(*id).copied().unwrap_or(0) <= thresholds.fan_in_max_out_degree
        })
        .map(|(id, _)| id.clone())
        .collect()
}

/// A fan-out distributor: many receivers (`out_degree >= min_out`), almost
/// no inflow (`in_degree <= max_in`).
pub fn detect_fan_out(degrees: &DegreeFeatures, thresholds: &DetectionThresholds) -> HashSet<String> {
    degrees
        .out_degree
        .iter()
        .filter(|(id, &out_deg)| {
            out_deg >= thresholds.fan_out_min_out_degree
                && degrees.in_degree.get(*id).copied().unwrap_or(0) <= thresholds.fan_out_max_in_degree
        })
        .map(|(id, _)| id.clone())
        .collect()
}
