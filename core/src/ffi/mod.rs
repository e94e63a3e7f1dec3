//! PyO3 boundary to the out-of-scope Python/HTTP host (§5/§7): the core
//! never does its own I/O, so the only thing crossing this boundary is a
//! row batch in and a result document out.

#[cfg(feature = "pyo3")]
pub mod python;
