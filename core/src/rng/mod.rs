//! Deterministic random number generation
//!
//! Uses xorshift64* for the one place the pipeline needs randomness:
//! pivot selection in the approximate betweenness pass (§4.2, seed 42).
//! Every other component is fully determined by input order.

mod xorshift;

pub use xorshift::RngManager;
