//! Explanation generation (§4.5): a pure mapping from reason tokens to a
//! human-readable sentence, plus the per-account context sentences the
//! pipeline appends.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::models::AccountScore;

/// Canonical token -> sentence, plus a handful of legacy synonyms kept
/// for compatibility with older reason vocabularies.
static REASON_SENTENCES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (
            "Account is part of a transaction cycle",
            "Account is part of a transaction cycle, indicating funds may be looping back to their origin.",
        ),
        ("smurfing_fan_in_72h", "This account received funds from an unusually high number of distinct senders within a 72-hour window."),
        ("smurfing_fan_out_72h", "This account sent funds to an unusually high number of distinct receivers within a 72-hour window."),
        ("shell_account", "This account shows the low-degree pass-through pattern typical of a shell account."),
        ("high_velocity", "This account has an unusually high transaction velocity."),
        (
            "High PageRank (central in transaction network)",
            "High PageRank (central in transaction network): this account sits at the center of the transaction graph.",
        ),
        (
            "High betweenness centrality (intermediary account)",
            "High betweenness centrality (intermediary account): this account frequently sits on the path between other accounts.",
        ),
        (
            "Part of suspicious transaction community",
            "Part of suspicious transaction community: this account belongs to a densely connected cluster of flagged accounts.",
        ),
        ("likely_payroll", "This account's pattern is consistent with legitimate payroll disbursement."),
        ("likely_merchant", "This account's pattern is consistent with a legitimate merchant collecting payments."),
        ("likely_gateway", "This account's pattern is consistent with a legitimate payment gateway."),
        ("low_amount_cycle", "This account participates in a low-value transaction cycle."),
        ("community_member", "This account is a member of a flagged transaction community."),
        // Legacy synonyms.
        ("cycle_member", "Account is part of a transaction cycle, indicating funds may be looping back to their origin."),
        ("fan_in", "This account received funds from an unusually high number of distinct senders."),
        ("fan_out", "This account sent funds to an unusually high number of distinct receivers."),
    ])
});

fn sentence_for(token: &str) -> String {
    if let Some(&sentence) = REASON_SENTENCES.get(token) {
        return sentence.to_string();
    }
    if let Some(length) = token.strip_prefix("cycle_length_") {
        return format!("Account participates in a cycle of length {length}.");
    }
    format!("This account was flagged for: {token}.")
}

/// Turns a reason-token list into one explanation string, one sentence
/// per distinct reason in first-occurrence order.
pub fn explain_reasons(reasons: &[String]) -> String {
    let mut seen = std::collections::HashSet::new();
    let mut sentences = Vec::new();
    for reason in reasons {
        let sentence = sentence_for(reason);
        if seen.insert(sentence.clone()) {
            sentences.push(sentence);
        }
    }
    sentences.join(" ")
}

/// Builds the final per-account explanation: the reason-token sentences
/// plus ring membership, connectivity, and (above 0.01) numeric
/// centrality context.
pub fn build_explanation(score: &AccountScore) -> String {
    let mut parts = vec![explain_reasons(&score.reasons)];

    if let Some(ring_id) = &score.ring_id {
        parts.push(format!("This account is a member of fraud ring {ring_id}."));
    }

    let total_degree = score.in_degree + score.out_degree;
    parts.push(format!(
        "It has {} incoming and {} outgoing connections (total degree: {}).",
        score.in_degree, score.out_degree, total_degree
    ));

    if score.pagerank > 0.01 {
        parts.push(format!("PageRank score: {:.4}.", score.pagerank));
    }
    if score.betweenness > 0.01 {
        parts.push(format!("Betweenness centrality score: {:.4}.", score.betweenness));
    }

    parts.into_iter().filter(|p| !p.is_empty()).collect::<Vec<_>>().join(" ")
}
