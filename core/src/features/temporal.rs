//! Time-windowed smurfing detection and per-account velocity (§4.2).
//!
//! Both signals are computed from the raw [`TransactionRecord`] stream
//! rather than the summarised graph, since the summarised edges have
//! already collapsed per-transaction timestamps into a single "most
//! recent" value. Smurfing is tracked separately for incoming (distinct
//! senders) and outgoing (distinct receivers) traffic, since either
//! direction triggers the flag independently.
//!
//! If the batch never populates `timestamp` at all, the windowed sweep
//! has nothing to work with: smurfing degrades to the degree-based
//! `fan_in`/`fan_out` sets (already computed in [`crate::features::degree`])
//! at the same threshold, and velocity — which has no non-temporal
//! analogue — is simply unavailable.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::config::DetectionThresholds;
use crate::models::TransactionRecord;

#[derive(Debug, Clone, Copy, Default)]
pub struct TemporalFeatures {
    pub max_distinct_senders_72h: usize,
    pub max_distinct_receivers_72h: usize,
    pub velocity_tx_per_day: f64,
    pub total_events: usize,
}

impl TemporalFeatures {
    pub fn is_smurfing_fan_in(&self, thresholds: &DetectionThresholds) -> bool {
        self.max_distinct_senders_72h >= thresholds.smurfing_min_distinct_counterparties
    }

    pub fn is_smurfing_fan_out(&self, thresholds: &DetectionThresholds) -> bool {
        self.max_distinct_receivers_72h >= thresholds.smurfing_min_distinct_counterparties
    }
}

struct Event {
    timestamp: DateTime<Utc>,
    counterparty: String,
}

/// Per-account incoming and outgoing event logs, each sorted by timestamp.
struct EventLogs {
    incoming: HashMap<String, Vec<Event>>,
    outgoing: HashMap<String, Vec<Event>>,
    all: HashMap<String, Vec<DateTime<Utc>>>,
}

fn build_event_logs(records: &[TransactionRecord]) -> EventLogs {
    let mut incoming: HashMap<String, Vec<Event>> = HashMap::new();
    let mut outgoing: HashMap<String, Vec<Event>> = HashMap::new();
    let mut all: HashMap<String, Vec<DateTime<Utc>>> = HashMap::new();

    for record in records {
        let Some(timestamp) = record.timestamp else {
            continue;
        };
        outgoing.entry(record.sender_id.clone()).or_default().push(Event {
            timestamp,
            counterparty: record.receiver_id.clone(),
        });
        incoming.entry(record.receiver_id.clone()).or_default().push(Event {
            timestamp,
            counterparty: record.sender_id.clone(),
        });
        all.entry(record.sender_id.clone()).or_default().push(timestamp);
        all.entry(record.receiver_id.clone()).or_default().push(timestamp);
    }

    for events in incoming.values_mut() {
        events.sort_by_key(|e| e.timestamp);
    }
    for events in outgoing.values_mut() {
        events.sort_by_key(|e| e.timestamp);
    }
    for timestamps in all.values_mut() {
        timestamps.sort();
    }

    EventLogs { incoming, outgoing, all }
}

/// Widest count of distinct counterparties seen in any window of
/// `window_hours` via a two-pointer sweep over the sorted event log.
fn max_distinct_in_window(events: &[Event], window_hours: i64) -> usize {
    if events.is_empty() {
        return 0;
    }
    let window = chrono::Duration::hours(window_hours);
    let mut best = 0;
    let mut left = 0usize;
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for right in 0..events.len() {
        *counts.entry(events[right].counterparty.as_str()).or_insert(0) += 1;
        while events[right].timestamp - events[left].timestamp > window {
            let c = events[left].counterparty.as_str();
            if let Some(n) = counts.get_mut(c) {
                *n -= 1;
                if *n == 0 {
                    counts.remove(c);
                }
            }
            left += 1;
        }
        best = best.max(counts.len());
    }
    best
}

fn velocity(timestamps: &[DateTime<Utc>]) -> f64 {
    if timestamps.len() < 2 {
        return timestamps.len() as f64;
    }
    let span = *timestamps.last().unwrap() - *timestamps.first().unwrap();
    let days = (span.num_seconds() as f64 / 86_400.0).max(0.01);
    timestamps.len() as f64 / days
}

/// Computes per-account temporal features.
///
/// `fan_in`/`fan_out` are the already-computed degree-based hub sets
/// (§4.2): when the batch has no timestamps at all, smurfing is decided
/// from those sets instead of the (empty) sliding window, at the same
/// `smurfing_min_distinct_counterparties` threshold. Velocity has no
/// fallback and simply reads as zero in that case.
pub fn compute_temporal_features(
    records: &[TransactionRecord],
    account_ids: impl Iterator<Item = String>,
    thresholds: &DetectionThresholds,
    fan_in: &HashSet<String>,
    fan_out: &HashSet<String>,
) -> HashMap<String, TemporalFeatures> {
    let logs = build_event_logs(records);
    let timestamps_available = records.iter().any(|r| r.timestamp.is_some());
    let empty_events: Vec<Event> = Vec::new();
    let empty_timestamps: Vec<DateTime<Utc>> = Vec::new();

    account_ids
        .map(|id| {
            let timestamps = logs.all.get(&id).unwrap_or(&empty_timestamps);

            let (max_distinct_senders_72h, max_distinct_receivers_72h) = if timestamps_available {
                let incoming = logs.incoming.get(&id).unwrap_or(&empty_events);
                let outgoing = logs.outgoing.get(&id).unwrap_or(&empty_events);
                (
                    max_distinct_in_window(incoming, thresholds.smurfing_window_hours),
                    max_distinct_in_window(outgoing, thresholds.smurfing_window_hours),
                )
            } else {
                let senders = if fan_in.contains(&id) {
                    thresholds.smurfing_min_distinct_counterparties
                } else {
                    0
                };
                let receivers = if fan_out.contains(&id) {
                    thresholds.smurfing_min_distinct_counterparties
                } else {
                    0
                };
                (senders, receivers)
            };

            let features = TemporalFeatures {
                max_distinct_senders_72h,
                max_distinct_receivers_72h,
                velocity_tx_per_day: velocity(timestamps),
                total_events: timestamps.len(),
            };
            (id, features)
        })
        .collect()
}

pub fn detect_smurfing(
    features: &HashMap<String, TemporalFeatures>,
    thresholds: &DetectionThresholds,
) -> HashSet<String> {
    features
        .iter()
        .filter(|(_, f)| f.is_smurfing_fan_in(thresholds) || f.is_smurfing_fan_out(thresholds))
        .map(|(id, _)| id.clone())
        .collect()
}

pub fn detect_high_velocity(
    features: &HashMap<String, TemporalFeatures>,
    thresholds: &DetectionThresholds,
) -> HashSet<String> {
    features
        .iter()
        .filter(|(_, f)| f.velocity_tx_per_day > thresholds.high_velocity_tx_per_day)
        .map(|(id, _)| id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sender: &str, receiver: &str, ts: &str) -> TransactionRecord {
        TransactionRecord {
            transaction_id: format!("{sender}-{receiver}-{ts}"),
            sender_id: sender.to_string(),
            receiver_id: receiver.to_string(),
            amount: 50.0,
            timestamp: Some(ts.parse().unwrap()),
        }
    }

    fn no_fallback() -> (HashSet<String>, HashSet<String>) {
        (HashSet::new(), HashSet::new())
    }

    #[test]
    fn flags_fan_in_smurfing_within_window() {
        let mut records = Vec::new();
        for i in 0..12 {
            records.push(record(
                &format!("S{i}"),
                "HUB",
                &format!("2025-01-01T{:02}:00:00Z", i),
            ));
        }
        let thresholds = DetectionThresholds::default();
        let account_ids = vec!["HUB".to_string()];
        let (fan_in, fan_out) = no_fallback();
        let features = compute_temporal_features(&records, account_ids.into_iter(), &thresholds, &fan_in, &fan_out);
        let hub = &features["HUB"];
        assert_eq!(hub.max_distinct_senders_72h, 12);
        assert!(hub.is_smurfing_fan_in(&thresholds));
        let smurfs = detect_smurfing(&features, &thresholds);
        assert!(smurfs.contains("HUB"));
    }

    #[test]
    fn window_excludes_events_outside_72h() {
        let records = vec![
            record("A", "HUB", "2025-01-01T00:00:00Z"),
            record("B", "HUB", "2025-01-05T00:00:00Z"), // 4 days later, out of window
        ];
        let thresholds = DetectionThresholds::default();
        let (fan_in, fan_out) = no_fallback();
        let features = compute_temporal_features(
            &records,
            vec!["HUB".to_string()].into_iter(),
            &thresholds,
            &fan_in,
            &fan_out,
        );
        assert_eq!(features["HUB"].max_distinct_senders_72h, 1);
    }

    #[test]
    fn single_event_velocity_is_raw_count() {
        let records = vec![record("A", "B", "2025-01-01T00:00:00Z")];
        let (fan_in, fan_out) = no_fallback();
        let features = compute_temporal_features(
            &records,
            vec!["A".to_string()].into_iter(),
            &DetectionThresholds::default(),
            &fan_in,
            &fan_out,
        );
        assert_eq!(features["A"].velocity_tx_per_day, 1.0);
    }

    #[test]
    fn falls_back_to_degree_based_rule_when_timestamps_are_absent() {
        let records = vec![TransactionRecord {
            transaction_id: "TX000001".to_string(),
            sender_id: "S0".to_string(),
            receiver_id: "HUB".to_string(),
            amount: 50.0,
            timestamp: None,
        }];
        let thresholds = DetectionThresholds::default();
        let mut fan_in = HashSet::new();
        fan_in.insert("HUB".to_string());
        let fan_out = HashSet::new();

        let features = compute_temporal_features(
            &records,
            vec!["HUB".to_string()].into_iter(),
            &thresholds,
            &fan_in,
            &fan_out,
        );
        let hub = &features["HUB"];
        assert_eq!(hub.max_distinct_senders_72h, thresholds.smurfing_min_distinct_counterparties);
        assert!(hub.is_smurfing_fan_in(&thresholds));
        assert!(!hub.is_smurfing_fan_out(&thresholds));
        assert_eq!(hub.velocity_tx_per_day, 0.0);
    }
}
