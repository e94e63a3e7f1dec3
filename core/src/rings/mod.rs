//! Deterministic ring assembly with cross-pattern deduplication (§4.4).

use std::collections::{HashMap, HashSet};

use crate::config::PipelineConfig;
use crate::features::FeatureBundle;
use crate::graph::TransactionGraph;
use crate::models::{format_ring_id, AccountScore, FraudRing, PatternType};

fn is_subset_or_superset(candidate: &HashSet<String>, existing: &HashSet<String>) -> bool {
    candidate.is_subset(existing) || existing.is_subset(candidate)
}

fn total_amount_within(graph: &TransactionGraph, members: &HashSet<String>) -> f64 {
    graph
        .edges()
        .filter(|(source, target, _)| members.contains(*source) && members.contains(*target))
        .map(|(_, _, data)| data.total_amount)
        .sum()
}

fn mean_suspicion(members: &[String], scores: &HashMap<String, AccountScore>) -> f64 {
    if members.is_empty() {
        return 0.0;
    }
    let sum: f64 = members
        .iter()
        .filter_map(|m| scores.get(m))
        .map(|s| s.risk_score)
        .sum();
    sum / members.len() as f64
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

struct Assembler<'a> {
    graph: &'a TransactionGraph,
    scores: &'a mut HashMap<String, AccountScore>,
    rings: Vec<FraudRing>,
    seen_sets: Vec<HashSet<String>>,
    next_sequence: usize,
}

impl<'a> Assembler<'a> {
    fn next_ring_id(&mut self) -> String {
        self.next_sequence += 1;
        format_ring_id(self.next_sequence)
    }

    fn dedup_guard(&self, members: &HashSet<String>) -> bool {
        self.seen_sets.iter().any(|existing| is_subset_or_superset(members, existing))
    }

    fn add_ring(&mut self, members: Vec<String>, pattern_type: PatternType) {
        let member_set: HashSet<String> = members.iter().cloned().collect();
        let ring_id = self.next_ring_id();
        let risk_score = round2(mean_suspicion(&members, self.scores));
        let total_amount = round2(total_amount_within(self.graph, &member_set));

        for member in &members {
            if let Some(score) = self.scores.get_mut(member) {
                if score.ring_id.is_none() {
                    score.ring_id = Some(ring_id.clone());
                }
            }
        }

        self.seen_sets.push(member_set);
        self.rings.push(FraudRing {
            ring_id,
            member_accounts: members,
            pattern_type,
            risk_score,
            total_amount,
        });
    }
}

fn push_reason_once(score: &mut AccountScore, token: &str) {
    if !score.reasons.iter().any(|r| r == token) {
        score.reasons.push(token.to_string());
    }
}

pub fn assemble_rings(
    graph: &TransactionGraph,
    features: &FeatureBundle,
    scores: &mut HashMap<String, AccountScore>,
    config: &PipelineConfig,
) -> Vec<FraudRing> {
    let mut assembler = Assembler {
        graph,
        scores,
        rings: Vec::new(),
        seen_sets: Vec::new(),
        next_sequence: 0,
    };

    // 1. Cycle rings, one per enumerated cycle, in enumeration order.
    for cycle in &features.cycles.cycles {
        let length = cycle.len();
        for member in cycle {
            if let Some(score) = assembler.scores.get_mut(member) {
                push_reason_once(score, &format!("cycle_length_{length}"));
            }
        }
        assembler.add_ring(cycle.clone(), PatternType::Cycle);
    }

    // 2. Shell-chain rings, skipping subset/superset duplicates of any
    // ring assembled so far.
    for chain in &features.shell_data.shell_chains {
        let member_set: HashSet<String> = chain.iter().cloned().collect();
        if assembler.dedup_guard(&member_set) {
            continue;
        }
        assembler.add_ring(chain.clone(), PatternType::ShellChain);
    }

    // 3. Community rings, ascending community-id order, size/score
    // gated, skipping subset/superset duplicates.
    if config.enable_community_rings {
        let mut members_by_community: HashMap<u32, Vec<String>> = HashMap::new();
        for id in graph.node_ids_sorted() {
            if let Some(&community) = features.community.get(id) {
                members_by_community.entry(community).or_default().push(id.to_string());
            }
        }
        let mut community_ids: Vec<u32> = members_by_community.keys().copied().collect();
        community_ids.sort_unstable();

        for community_id in community_ids {
            let members = &members_by_community[&community_id];
            if members.len() < config.community_ring_min_size {
                continue;
            }
            if mean_suspicion(members, assembler.scores) < config.community_ring_min_mean_score {
                continue;
            }
            let member_set: HashSet<String> = members.iter().cloned().collect();
            if assembler.dedup_guard(&member_set) {
                continue;
            }

            for member in members {
                if let Some(score) = assembler.scores.get_mut(member) {
                    push_reason_once(score, "community_member");
                }
            }
            assembler.add_ring(members.clone(), PatternType::Community);
        }
    }

    assembler.rings
}
