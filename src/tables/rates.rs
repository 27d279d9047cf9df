//! Investment and reserve discount rates by policy term
//!
//! Investment rates are annual percentages keyed by policy term in years.
//! The reserve discount rate is derived from the investment rate by a
//! fixed spread, applied uniformly across the table. Rate lookups are the
//! one place a quote hard-fails: pricing on the wrong discount rate is
//! worse than no price at all.

use std::collections::HashMap;

use crate::error::{PricingError, Result};

/// Spread (annual percentage points) deducted from the investment rate
/// to obtain the reserve discount rate
pub const RESERVE_RATE_SPREAD: f64 = 1.0;

/// Annual rate pair for one policy term, both in percent
#[derive(Debug, Clone, Copy)]
pub struct RatePoint {
    pub investment_rate: f64,
    pub reserve_rate: f64,
}

/// Term-indexed rate table
#[derive(Debug, Clone)]
pub struct RateTable {
    points: HashMap<u32, RatePoint>,
}

impl RateTable {
    /// Build from investment rates (annual percent by term), deriving the
    /// reserve rate for every term by subtracting the spread.
    pub fn from_investment_rates(investment_by_term: HashMap<u32, f64>) -> Self {
        let points = investment_by_term
            .into_iter()
            .map(|(term, inv)| {
                (
                    term,
                    RatePoint {
                        investment_rate: inv,
                        reserve_rate: inv - RESERVE_RATE_SPREAD,
                    },
                )
            })
            .collect();
        Self { points }
    }

    /// Rates for a policy term; errors when the term has no entry
    pub fn for_term(&self, term_years: u32) -> Result<RatePoint> {
        self.points
            .get(&term_years)
            .copied()
            .ok_or(PricingError::RateNotFound { period: term_years })
    }

    /// Default pricing rates: annual investment percent by term
    pub fn default_pricing() -> Self {
        let mut rates = HashMap::new();
        rates.insert(5, 5.10);
        rates.insert(6, 5.20);
        rates.insert(7, 5.30);
        rates.insert(8, 5.40);
        rates.insert(9, 5.50);
        rates.insert(10, 5.60);
        rates.insert(11, 5.65);
        rates.insert(12, 5.70);
        rates.insert(13, 5.75);
        rates.insert(14, 5.80);
        rates.insert(15, 5.85);
        rates.insert(16, 5.90);
        rates.insert(17, 5.95);
        rates.insert(18, 6.00);
        rates.insert(19, 6.05);
        rates.insert(20, 6.10);
        rates.insert(25, 6.20);
        rates.insert(30, 6.30);
        Self::from_investment_rates(rates)
    }
}
