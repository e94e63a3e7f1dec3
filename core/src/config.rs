//! Tunable thresholds and scoring weights.
//!
//! Every numeric constant named in the spec lives here instead of being
//! inlined at its use site, mirroring how the teacher groups simulation
//! knobs into `OrchestratorConfig`/`PolicyConfig`. The core never reads
//! these from the environment or a file itself — the caller builds a
//! config (or takes the `Default`) and passes it in.

/// Degree, window, and recursion thresholds used by the feature extractor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionThresholds {
    pub fan_in_min_in_degree: usize,
    pub fan_in_max_out_degree: usize,
    pub fan_out_min_out_degree: usize,
    pub fan_out_max_in_degree: usize,

    pub cycle_min_length: usize,
    pub cycle_max_length: usize,
    pub cycle_cap: usize,

    pub shell_min_degree_sum: usize,
    pub shell_max_degree_sum: usize,
    pub shell_chain_min_hops: usize,
    pub shell_chain_max_depth: usize,

    pub smurfing_window_hours: i64,
    pub smurfing_min_distinct_counterparties: usize,

    pub betweenness_exact_node_limit: usize,
    pub betweenness_sample_pivots: usize,
    pub betweenness_seed: u64,

    pub payroll_min_out_degree: usize,
    pub payroll_max_forwarding_ratio: f64,
    pub payroll_return_path_sample: usize,

    pub merchant_min_in_degree: usize,
    pub merchant_max_out_degree: usize,

    pub gateway_min_in_degree: usize,
    pub gateway_min_out_degree: usize,

    pub low_activity_max_out_degree: usize,

    pub low_amount_cycle_threshold: f64,
    pub low_amount_cycle_max_count: u32,

    pub high_velocity_tx_per_day: f64,
}

impl Default for DetectionThresholds {
    fn default() -> Self {
        Self {
            fan_in_min_in_degree: 10,
            fan_in_max_out_degree: 2,
            fan_out_min_out_degree: 10,
            fan_out_max_in_degree: 2,

            cycle_min_length: 3,
            cycle_max_length: 5,
            cycle_cap: 500,

            shell_min_degree_sum: 2,
            shell_max_degree_sum: 3,
            shell_chain_min_hops: 3,
            shell_chain_max_depth: 8,

            smurfing_window_hours: 72,
            smurfing_min_distinct_counterparties: 10,

            betweenness_exact_node_limit: 5_000,
            betweenness_sample_pivots: 200,
            betweenness_seed: 42,

            payroll_min_out_degree: 10,
            payroll_max_forwarding_ratio: 0.20,
            payroll_return_path_sample: 20,

            merchant_min_in_degree: 10,
            merchant_max_out_degree: 1,

            gateway_min_in_degree: 50,
            gateway_min_out_degree: 50,

            low_activity_max_out_degree: 2,

            low_amount_cycle_threshold: 1000.0,
            low_amount_cycle_max_count: 1,

            high_velocity_tx_per_day: 10.0,
        }
    }
}

/// Additive/subtractive point values applied by the scorer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub cycle_high_amount: f64,
    pub cycle_low_amount: f64,
    pub smurfing: f64,
    pub shell_membership: f64,
    pub high_velocity: f64,

    pub supporting_pagerank: f64,
    pub supporting_betweenness: f64,
    pub supporting_community: f64,

    pub payroll_penalty: f64,
    pub merchant_penalty: f64,
    pub gateway_penalty: f64,
    pub low_activity_penalty: f64,
    pub low_amount_cycle_penalty: f64,

    pub tier_critical: f64,
    pub tier_high: f64,
    pub tier_medium: f64,

    pub suspicious_threshold: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            cycle_high_amount: 40.0,
            cycle_low_amount: 10.0,
            smurfing: 25.0,
            shell_membership: 30.0,
            high_velocity: 20.0,

            supporting_pagerank: 5.0,
            supporting_betweenness: 5.0,
            supporting_community: 10.0,

            payroll_penalty: 30.0,
            merchant_penalty: 40.0,
            gateway_penalty: 40.0,
            low_activity_penalty: 20.0,
            low_amount_cycle_penalty: 15.0,

            tier_critical: 80.0,
            tier_high: 60.0,
            tier_medium: 40.0,

            suspicious_threshold: 40.0,
        }
    }
}

/// Top-level knobs for one pipeline invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    pub thresholds: DetectionThresholds,
    pub weights: ScoringWeights,
    /// Whether community-pattern rings are assembled at all (§4.4 / §9
    /// open question — default matches the spec's stricter rule: enabled).
    pub enable_community_rings: bool,
    pub community_ring_min_size: usize,
    pub community_ring_min_mean_score: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            thresholds: DetectionThresholds::default(),
            weights: ScoringWeights::default(),
            enable_community_rings: true,
            community_ring_min_size: 3,
            community_ring_min_mean_score: 40.0,
        }
    }
}
