//! GraphBuilder (§4.1): aggregate a raw record stream into a
//! [`TransactionGraph`], dropping invalid rows and self-loops, summarising
//! one edge per ordered account pair.

use tracing::{debug, info, warn};

use crate::error::GraphBuildError;
use crate::models::{RawTransactionRow, TransactionRecord};

use super::{EdgeData, TransactionGraph};

/// Resolve the sender/receiver/amount column presence across the whole
/// batch.
///
/// A column counts as "present" if at least one row supplied a value under
/// either its primary or legacy spelling (see [`RawTransactionRow`]'s
/// doc comment for why this is the Rust analogue of `pandas`' column-set
/// check). `timestamp` is deliberately not required here: a batch that
/// never populates it is still valid input, it just loses the windowed
/// 72h smurfing/velocity signals (§4.2's degree-based fallback).
fn resolve_missing_columns(rows: &[RawTransactionRow]) -> Vec<String> {
    let mut missing = Vec::new();
    let has_sender = rows
        .iter()
        .any(|r| r.sender.is_some() || r.sender_id.is_some());
    let has_receiver = rows
        .iter()
        .any(|r| r.receiver.is_some() || r.receiver_id.is_some());
    let has_amount = rows.iter().any(|r| r.amount.is_some());

    if !has_sender {
        missing.push("sender/sender_id".to_string());
    }
    if !has_receiver {
        missing.push("receiver/receiver_id".to_string());
    }
    if !has_amount {
        missing.push("amount".to_string());
    }
    missing
}

/// Clean one raw row into a [`TransactionRecord`], or `None` if it must be
/// dropped (blank id, non-parseable amount, or self-loop).
fn clean_row(row: &RawTransactionRow, fallback_id: &str) -> Option<TransactionRecord> {
    let sender = row
        .sender
        .as_deref()
        .or(row.sender_id.as_deref())
        .unwrap_or("")
        .trim()
        .to_string();
    let receiver = row
        .receiver
        .as_deref()
        .or(row.receiver_id.as_deref())
        .unwrap_or("")
        .trim()
        .to_string();

    if sender.is_empty() || receiver.is_empty() {
        return None;
    }
    if sender == receiver {
        return None;
    }

    let amount = row.amount?;
    if !amount.is_finite() {
        return None;
    }

    let timestamp = row.timestamp;

    Some(TransactionRecord {
        transaction_id: row
            .transaction_id
            .clone()
            .unwrap_or_else(|| fallback_id.to_string()),
        sender_id: sender,
        receiver_id: receiver,
        amount,
        timestamp,
    })
}

/// Build a directed, summarised transaction graph from a raw record batch.
///
/// Returns the cleaned, retained records alongside the graph: the feature
/// extractor (§4.2) needs the per-transaction timeline the graph itself
/// does not retain (only the most-recent amount/timestamp per edge).
pub fn build(
    rows: &[RawTransactionRow],
) -> Result<(TransactionGraph, Vec<TransactionRecord>), GraphBuildError> {
    if rows.is_empty() {
        info!("empty record batch — returning empty graph");
        return Ok((TransactionGraph::empty(), Vec::new()));
    }

    let missing = resolve_missing_columns(rows);
    if !missing.is_empty() {
        warn!(?missing, "record batch missing required columns");
        return Err(GraphBuildError::SchemaError { missing });
    }

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        if let Some(record) = clean_row(row, &format!("TX{:06}", i + 1)) {
            records.push(record);
        }
    }
    debug!(
        retained = records.len(),
        dropped = rows.len() - records.len(),
        "cleaned raw record batch"
    );

    let mut graph = TransactionGraph::empty();

    // Single aggregation pass, grouped by ordered pair. Iterating records in
    // their original order and always overwriting `amount`/`timestamp`
    // gives "most recent wins, ties broken by input order" for free.
    for record in &records {
        let from = graph.get_or_insert_node(&record.sender_id);
        let to = graph.get_or_insert_node(&record.receiver_id);

        if let Some(edge_idx) = graph.inner().find_edge(from, to) {
            let edge = graph
                .inner_mut()
                .edge_weight_mut(edge_idx)
                .expect("edge index must be valid");
            edge.transaction_count += 1;
            edge.total_amount += record.amount;
            edge.amount = record.amount;
            edge.timestamp = record.timestamp;
        } else {
            graph.inner_mut().add_edge(
                from,
                to,
                EdgeData {
                    transaction_count: 1,
                    total_amount: record.amount,
                    amount: record.amount,
                    timestamp: record.timestamp,
                },
            );
        }
    }

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built transaction graph"
    );

    Ok((graph, records))
}
