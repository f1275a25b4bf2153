//! Per-million-token pricing.
//!
//! Prices are in USD per 1 million tokens, one input rate and one output
//! rate. Costs are rounded to 6 decimal places so accumulating many
//! small per-iteration values cannot drift.

use concierge_core::UsageRecord;
use serde::{Deserialize, Serialize};

/// Round a USD amount to 6 decimal places.
///
/// Shared by the rate calculation and the agent loop's running total so
/// both bookkeeping paths agree to the micro-dollar.
pub fn round_micros(amount: f64) -> f64 {
    (amount * 1_000_000.0).round() / 1_000_000.0
}

/// Per-million-token rates for the configured model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelRates {
    /// Price per 1M input tokens in USD.
    pub input_per_million: f64,
    /// Price per 1M output tokens in USD.
    pub output_per_million: f64,
}

impl ModelRates {
    pub fn new(input_per_million: f64, output_per_million: f64) -> Self {
        Self {
            input_per_million,
            output_per_million,
        }
    }

    /// Compute the cost of one model call, rounded to 6 decimals.
    ///
    /// Pure and total: zero usage costs zero, there is no failure mode.
    pub fn cost(&self, usage: UsageRecord) -> f64 {
        let raw = usage.input_tokens as f64 / 1_000_000.0 * self.input_per_million
            + usage.output_tokens as f64 / 1_000_000.0 * self.output_per_million;
        round_micros(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(input_tokens: u64, output_tokens: u64) -> UsageRecord {
        UsageRecord {
            input_tokens,
            output_tokens,
        }
    }

    #[test]
    fn one_million_input_tokens_costs_the_input_rate() {
        let rates = ModelRates::new(1.25, 10.0);
        let c = rates.cost(usage(1_000_000, 0));
        assert!((c - 1.25).abs() < 1e-12);
    }

    #[test]
    fn one_million_output_tokens_costs_the_output_rate() {
        let rates = ModelRates::new(1.25, 10.0);
        let c = rates.cost(usage(0, 1_000_000));
        assert!((c - 10.0).abs() < 1e-12);
    }

    #[test]
    fn mixed_usage() {
        let rates = ModelRates::new(1.25, 10.0);
        // 500k in → 0.625, 500k out → 5.0
        let c = rates.cost(usage(500_000, 500_000));
        assert!((c - 5.625).abs() < 1e-12);
    }

    #[test]
    fn zero_usage_costs_nothing() {
        let rates = ModelRates::new(1.25, 10.0);
        assert_eq!(rates.cost(usage(0, 0)), 0.0);
    }

    #[test]
    fn rounds_to_six_decimals() {
        let rates = ModelRates::new(1.25, 10.0);
        // 1 input token = 0.00000125 → rounds to 0.000001
        let c = rates.cost(usage(1, 0));
        assert!((c - 0.000001).abs() < 1e-12);
    }

    #[test]
    fn accumulation_matches_sum_of_rounded_parts() {
        let rates = ModelRates::new(1.25, 10.0);
        let parts = [
            usage(120_000, 4_000),
            usage(135_000, 9_500),
            usage(150_000, 42_000),
        ];

        let mut total = 0.0;
        for u in parts {
            total = round_micros(total + rates.cost(u));
        }

        let expected: f64 = parts.iter().map(|u| rates.cost(*u)).sum();
        assert!((total - round_micros(expected)).abs() < 1e-12);
    }

    #[test]
    fn round_micros_is_idempotent() {
        let x = round_micros(0.123_456_789);
        assert_eq!(x, round_micros(x));
        assert!((x - 0.123_457).abs() < 1e-12);
    }
}
