//! Domain models for the money-muling detection pipeline.

pub mod record;
pub mod result;
pub mod ring;
pub mod score;

pub use record::{RawTransactionRow, TransactionRecord};
pub use result::{
    DetectionResult, GraphJson, GraphJsonLink, GraphJsonNode, GraphStats, Summary,
    SuspiciousAccount,
};
pub use ring::{format_ring_id, FraudRing, PatternType};
pub use score::{AccountScore, RiskTier};
