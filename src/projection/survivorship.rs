//! Monthly survivorship projection
//!
//! Rolls a normalized cohort of 1.0 lives forward month by month through
//! deaths and lapses. Mortality comes from the per-mille annual table,
//! converted to a monthly equivalent and scaled by the product's mortality
//! adjustment percentage. Lapse rates come from the monthly lapse
//! constructor, which forces full run-off in the final month.

use crate::params::StoredParameters;
use crate::quote::QuoteRequest;
use crate::tables::Tables;

/// One projected policy month
#[derive(Debug, Clone, Copy)]
pub struct CohortRow {
    pub month: u32,
    pub policy_year: u32,
    pub current_age: u32,
    pub alive_start: f64,
    pub died: f64,
    pub alive_after_deaths: f64,
    pub lapsed: f64,
    pub alive_end: f64,
    /// Annual mortality, per mille
    pub annual_mortality_rate: f64,
    /// Monthly-equivalent mortality, per mille
    pub monthly_mortality_rate: f64,
    /// Monthly mortality after the product adjustment, per mille
    pub adjusted_mortality_rate: f64,
    /// Monthly lapse, decimal
    pub lapse_rate: f64,
}

/// Full cohort projection for one quote
#[derive(Debug, Clone)]
pub struct CohortProjection {
    pub rows: Vec<CohortRow>,
}

impl CohortProjection {
    /// Project the cohort over `policy_term_years * 12` months
    pub fn project(request: &QuoteRequest, stored: &StoredParameters, tables: &Tables) -> Self {
        let months = request.projection_months();
        let max_covered_age = request.age + request.policy_term_years - 1;
        let lapse_rates = tables.lapse.monthly_rates(request.policy_term_years);

        let mut rows = Vec::with_capacity(months as usize);
        let mut alive_start = 1.0;

        for m in 1..=months {
            let policy_year = (m - 1) / 12 + 1;
            let current_age = request.age + policy_year - 1;

            let annual_mortality_rate = if current_age > max_covered_age {
                0.0
            } else {
                tables
                    .mortality
                    .rate(current_age, request.sex, request.smoker)
                    .unwrap_or(0.0)
            };
            let monthly_mortality_rate =
                (1.0 - (1.0 - annual_mortality_rate / 1000.0).powf(1.0 / 12.0)) * 1000.0;
            let adjusted_mortality_rate =
                monthly_mortality_rate * (stored.mortality_adjustment_pct / 100.0);

            let died = alive_start * adjusted_mortality_rate / 1000.0;
            let alive_after_deaths = alive_start - died;

            let lapse_rate = lapse_rates[(m - 1) as usize];
            let lapsed = alive_after_deaths * lapse_rate;
            let alive_end = alive_after_deaths - lapsed;

            rows.push(CohortRow {
                month: m,
                policy_year,
                current_age,
                alive_start,
                died,
                alive_after_deaths,
                lapsed,
                alive_end,
                annual_mortality_rate,
                monthly_mortality_rate,
                adjusted_mortality_rate,
                lapse_rate,
            });

            alive_start = alive_end;
        }

        Self { rows }
    }

    pub fn months(&self) -> usize {
        self.rows.len()
    }

    pub fn alive_start(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.alive_start).collect()
    }

    pub fn died(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.died).collect()
    }

    pub fn lapsed(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.lapsed).collect()
    }
}
