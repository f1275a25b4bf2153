//! Usage-based cost accounting for Concierge.
//!
//! Maps per-call token usage to a monetary cost given fixed
//! per-million-token rates. The rates come from configuration, never
//! from literals baked into the algorithm.

pub mod pricing;

pub use pricing::{ModelRates, round_micros};
