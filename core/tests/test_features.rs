use money_muling_detection_core_rs::config::DetectionThresholds;
use money_muling_detection_core_rs::features::extract_features;
use money_muling_detection_core_rs::graph::build;
use money_muling_detection_core_rs::models::RawTransactionRow;

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
fn scenario_7_shell_chain_detected() {
    let rows = vec![
        row("A", "B", 100.0, "2025-01-01T00:00:00Z"),
        row("B", "C", 100.0, "2025-01-01T01:00:00Z"),
        row("C", "D", 100.0, "2025-01-01T02:00:00Z"),
        row("A", "E", 10.0, "2025-01-01T00:00:00Z"),
        row("A", "F", 10.0, "2025-01-01T00:00:00Z"),
    ];
    let (graph, records) = build(&rows).unwrap();
    let features = extract_features(&graph, &records, &DetectionThresholds::default());

    assert!(features.shell_candidates.contains("B"));
    assert!(features.shell_candidates.contains("C"));
    assert!(!features.shell_candidates.contains("A"));
    assert_eq!(features.shell_data.shell_chains.len(), 1);
    assert!(features.shell_data.shell_nodes.contains("B"));
    assert!(features.shell_data.shell_nodes.contains("C"));
}

#[test]
fn scenario_6_velocity_burst_detected() {
    let mut rows = Vec::new();
    for i in 0..12 {
        rows.push(row(
            "SENDER",
            &format!("R{i}"),
            50.0,
            &format!("2025-01-01T{:02}:00:00Z", i),
        ));
    }
    let (graph, records) = build(&rows).unwrap();
    let thresholds = DetectionThresholds::default();
    let features = extract_features(&graph, &records, &thresholds);

    let sender_velocity = features.temporal["SENDER"].velocity_tx_per_day;
    assert!(sender_velocity > 10.0, "velocity was {sender_velocity}");
    assert!(features.high_velocity.contains("SENDER"));
}

#[test]
fn fan_in_smurfing_detected_within_72h() {
    let mut rows = Vec::new();
    for i in 0..12 {
        rows.push(row(
            &format!("S{i}"),
            "HUB",
            25.0,
            &format!("2025-01-01T{:02}:00:00Z", i),
        ));
    }
    let (graph, records) = build(&rows).unwrap();
    let thresholds = DetectionThresholds::default();
    let features = extract_features(&graph, &records, &thresholds);

    assert!(features.smurfing.contains("HUB"));
}

#[test]
fn smurfing_falls_back_to_degree_rule_when_batch_has_no_timestamps() {
    let mut rows = Vec::new();
    for i in 0..12 {
        rows.push(RawTransactionRow {
            transaction_id: None,
            sender: Some(format!("S{i}")),
            sender_id: None,
            receiver: Some("HUB".to_string()),
            receiver_id: None,
            amount: Some(25.0),
            timestamp: None,
        });
    }
    let (graph, records) = build(&rows).unwrap();
    let thresholds = DetectionThresholds::default();
    let features = extract_features(&graph, &records, &thresholds);

    assert_eq!(features.temporal["HUB"].max_distinct_senders_72h, thresholds.smurfing_min_distinct_counterparties);
    assert!(features.smurfing.contains("HUB"));
    assert_eq!(features.temporal["HUB"].velocity_tx_per_day, 0.0);
    assert!(!features.high_velocity.contains("HUB"));
}

#[test]
fn cycle_metadata_covers_every_participant() {
    let rows = vec![
        row("A", "B", 5000.0, "2025-01-01T00:00:00Z"),
        row("B", "C", 5000.0, "2025-01-01T01:00:00Z"),
        row("C", "A", 5000.0, "2025-01-01T02:00:00Z"),
    ];
    let (graph, records) = build(&rows).unwrap();
    let features = extract_features(&graph, &records, &DetectionThresholds::default());

    assert_eq!(features.cycles.cycles.len(), 1);
    for id in ["A", "B", "C"] {
        let meta = features.cycles.metadata.get(id).unwrap();
        assert_eq!(meta.cycle_count, 1);
        assert_eq!(meta.max_cycle_amount, 15000.0);
        assert_eq!(meta.min_cycle_length, 3);
    }
}

#[test]
fn forwarding_ratio_and_degrees_cover_every_node() {
    let rows = vec![row("A", "B", 10.0, "2025-01-01T00:00:00Z"), row("B", "C", 10.0, "2025-01-01T01:00:00Z")];
    let (graph, records) = build(&rows).unwrap();
    let features = extract_features(&graph, &records, &DetectionThresholds::default());

    for id in ["A", "B", "C"] {
        assert!(features.forwarding_ratio.contains_key(id));
        assert!(features.degrees.in_degree.contains_key(id));
        assert!(features.degrees.out_degree.contains_key(id));
        assert!(features.pagerank.contains_key(id));
        assert!(features.betweenness.contains_key(id));
        assert!(features.community.contains_key(id));
    }
}

#[test]
fn communities_group_disjoint_triangles() {
    let rows = vec![
        row("A", "B", 10.0, "2025-01-01T00:00:00Z"),
        row("B", "C", 10.0, "2025-01-01T00:00:00Z"),
        row("C", "A", 10.0, "2025-01-01T00:00:00Z"),
        row("X", "Y", 10.0, "2025-01-01T00:00:00Z"),
        row("Y", "Z", 10.0, "2025-01-01T00:00:00Z"),
        row("Z", "X", 10.0, "2025-01-01T00:00:00Z"),
    ];
    let (graph, records) = build(&rows).unwrap();
    let features = extract_features(&graph, &records, &DetectionThresholds::default());

    assert_eq!(features.community["A"], features.community["B"]);
    assert_ne!(features.community["A"], features.community["X"]);
}
