//! Deterministic risk rules.
//!
//! - [`table`] — canonical ingredient name → (risk, source, notes), embedded
//!   from `data/risk_rules.json` and read-only after first use.
//! - [`aggregate`] — reduces per-ingredient risks to one overall risk.
//! - [`metadata`] — rules version and provenance snapshot.

pub mod aggregate;
pub mod metadata;
pub mod table;
