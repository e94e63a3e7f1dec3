use money_muling_detection_core_rs::config::{DetectionThresholds, PipelineConfig, ScoringWeights};
use money_muling_detection_core_rs::features::extract_features;
use money_muling_detection_core_rs::graph::build;
use money_muling_detection_core_rs::models::{PatternType, RawTransactionRow};
use money_muling_detection_core_rs::rings::assemble_rings;
use money_muling_detection_core_rs::scoring::score_accounts;

fn row(sender: &str, receiver: &str, amount: f64, ts: &str) -> RawTransactionRow {
    RawTransactionRow {
        transaction_id: None,
        sender: Some(sender.to_string()),
        sender_id: None,
        receiver: Some(receiver.to_string()),
        receiver_id: None,
        amount: Some(amount),
        timestamp: Some(ts.parse().unwrap()),
    }
}

#[test]
fn scenario_1_single_cycle_ring() {
    let rows = vec![
        row("A", "B", 5000.0, "2025-01-01T00:00:00Z"),
        row("B", "C", 5000.0, "2025-01-01T01:00:00Z"),
        row("C", "A", 5000.0, "2025-01-01T02:00:00Z"),
    ];
    let (graph, records) = build(&rows).unwrap();
    let thresholds = DetectionThresholds::default();
    let weights = ScoringWeights::default();
    let features = extract_features(&graph, &records, &thresholds);
    let mut scores = score_accounts(&graph, &features, &weights, &thresholds);
    let config = PipelineConfig::default();
    let rings = assemble_rings(&graph, &features, &mut scores, &config);

    let cycle_rings: Vec<_> = rings.iter().filter(|r| r.pattern_type == PatternType::Cycle).collect();
    assert_eq!(cycle_rings.len(), 1);
    assert_eq!(cycle_rings[0].ring_id, "RING_001");
    let mut members = cycle_rings[0].member_accounts.clone();
    members.sort();
    assert_eq!(members, vec!["A".to_string(), "B".to_string(), "C".to_string()]);

    for id in ["A", "B", "C"] {
        assert_eq!(scores[id].ring_id.as_deref(), Some("RING_001"));
    }
}

#[test]
fn scenario_7_shell_chain_ring() {
    let rows = vec![
        row("A", "B", 100.0, "2025-01-01T00:00:00Z"),
        row("B", "C", 100.0, "2025-01-01T01:00:00Z"),
        row("C", "D", 100.0, "2025-01-01T02:00:00Z"),
        row("A", "E", 10.0, "2025-01-01T00:00:00Z"),
        row("A", "F", 10.0, "2025-01-01T00:00:00Z"),
    ];
    let (graph, records) = build(&rows).unwrap();
    let thresholds = DetectionThresholds::default();
    let weights = ScoringWeights::default();
    let features = extract_features(&graph, &records, &thresholds);
    let mut scores = score_accounts(&graph, &features, &weights, &thresholds);
    let config = PipelineConfig::default();
    let rings = assemble_rings(&graph, &features, &mut scores, &config);

    let shell_rings: Vec<_> = rings.iter().filter(|r| r.pattern_type == PatternType::ShellChain).collect();
    assert_eq!(shell_rings.len(), 1);
    assert!(shell_rings[0].member_accounts.contains(&"B".to_string()));
    assert!(shell_rings[0].member_accounts.contains(&"C".to_string()));
}

#[test]
fn ring_ids_are_sequential_and_unique() {
    let rows = vec![
        row("A", "B", 5000.0, "2025-01-01T00:00:00Z"),
        row("B", "C", 5000.0, "2025-01-01T01:00:00Z"),
        row("C", "A", 5000.0, "2025-01-01T02:00:00Z"),
        row("X", "Y", 5000.0, "2025-01-02T00:00:00Z"),
        row("Y", "Z", 5000.0, "2025-01-02T01:00:00Z"),
        row("Z", "X", 5000.0, "2025-01-02T02:00:00Z"),
    ];
    let (graph, records) = build(&rows).unwrap();
    let thresholds = DetectionThresholds::default();
    let weights = ScoringWeights::default();
    let features = extract_features(&graph, &records, &thresholds);
    let mut scores = score_accounts(&graph, &features, &weights, &thresholds);
    let config = PipelineConfig::default();
    let rings = assemble_rings(&graph, &features, &mut scores, &config);

    let mut ids: Vec<&str> = rings.iter().map(|r| r.ring_id.as_str()).collect();
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(ids.len(), unique.len());

    ids.sort();
    for (i, id) in ids.iter().enumerate() {
        assert_eq!(*id, format!("RING_{:03}", i + 1));
    }
}
