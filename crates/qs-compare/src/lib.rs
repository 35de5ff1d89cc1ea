//! Comparison framework for quark-potential simulation runs.
//!
//! Provides relative error metrics over predicted-vs-reference value
//! series and side-by-side comparison reporting for two training
//! sessions.

pub mod metrics;
pub mod report;
