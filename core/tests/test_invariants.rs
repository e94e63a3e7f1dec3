use std::collections::{HashMap, HashSet};

use proptest::prelude::*;

use money_muling_detection_core_rs::config::PipelineConfig;
use money_muling_detection_core_rs::models::RawTransactionRow;
use money_muling_detection_core_rs::run_detection_pipeline;

fn row(sender: &str, receiver: &str, amount: f64, hour: i64) -> RawTransactionRow {
    RawTransactionRow {
        transaction_id: None,
        sender: Some(sender.to_string()),
        sender_id: None,
        receiver: Some(receiver.to_string()),
        receiver_id: None,
        amount: Some(amount),
        timestamp: Some(
            (chrono::DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z").unwrap()
                + chrono::Duration::hours(hour))
            .with_timezone(&chrono::Utc),
        ),
    }
}

fn accounts() -> Vec<&'static str> {
    vec!["A", "B", "C", "D", "E", "F", "G", "H"]
}

fn arb_rows() -> impl Strategy<Value = Vec<RawTransactionRow>> {
    let accounts = accounts();
    prop::collection::vec(
        (
            0..accounts.len(),
            0..accounts.len(),
            1.0..10_000.0f64,
            0i64..200,
        ),
        0..40,
    )
    .prop_map(move |pairs| {
        pairs
            .into_iter()
            .filter(|(s, r, _, _)| s != r)
            .map(|(s, r, amount, hour)| row(accounts[s], accounts[r], amount, hour))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn scores_stay_within_0_and_100(rows in arb_rows()) {
        let result = run_detection_pipeline(&rows, &PipelineConfig::default()).unwrap();
        for account in &result.suspicious_accounts {
            prop_assert!(account.suspicion_score >= 0.0 && account.suspicion_score <= 100.0);
        }
        for node in &result.graph_json.nodes {
            prop_assert!(node.suspicion_score >= 0.0 && node.suspicion_score <= 100.0);
        }
    }

    #[test]
    fn ring_ids_are_well_formed_unique_and_sequential(rows in arb_rows()) {
        let result = run_detection_pipeline(&rows, &PipelineConfig::default()).unwrap();
        let mut ids: Vec<String> = result.fraud_rings.iter().map(|r| r.ring_id.clone()).collect();
        let unique: HashSet<&String> = ids.iter().collect();
        prop_assert_eq!(unique.len(), ids.len());

        ids.sort();
        for (i, id) in ids.iter().enumerate() {
            prop_assert_eq!(id.as_str(), format!("RING_{:03}", i + 1).as_str());
        }
    }

    #[test]
    fn ring_id_is_none_or_appears_exactly_once(rows in arb_rows()) {
        let result = run_detection_pipeline(&rows, &PipelineConfig::default()).unwrap();
        let mut ring_member_count: HashMap<&str, usize> = HashMap::new();
        for ring in &result.fraud_rings {
            *ring_member_count.entry(ring.ring_id.as_str()).or_insert(0) += 1;
        }
        for account in &result.suspicious_accounts {
            if account.ring_id == "NONE" {
                continue;
            }
            prop_assert_eq!(ring_member_count.get(account.ring_id.as_str()).copied().unwrap_or(0), 1);
        }
    }

    #[test]
    fn suspicious_accounts_sorted_by_score_desc_then_id(rows in arb_rows()) {
        let result = run_detection_pipeline(&rows, &PipelineConfig::default()).unwrap();
        for pair in result.suspicious_accounts.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(
                a.suspicion_score > b.suspicion_score
                    || (a.suspicion_score == b.suspicion_score && a.account_id < b.account_id)
            );
        }
    }

    #[test]
    fn pipeline_is_byte_identical_across_runs(rows in arb_rows()) {
        let config = PipelineConfig::default();
        let first = run_detection_pipeline(&rows, &config).unwrap();
        let second = run_detection_pipeline(&rows, &config).unwrap();
        prop_assert_eq!(
            serde_json::to_string(&first.suspicious_accounts).unwrap(),
            serde_json::to_string(&second.suspicious_accounts).unwrap()
        );
        prop_assert_eq!(
            serde_json::to_string(&first.fraud_rings).unwrap(),
            serde_json::to_string(&second.fraud_rings).unwrap()
        );
    }
}
