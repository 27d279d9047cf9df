//! Redemption (surrender) values
//!
//! The guaranteed surrender value is a percentage of accumulated premiums,
//! driven by the annual return-percentage schedule and special-cased at
//! the schedule boundary and the final projection month, where the
//! caller-supplied percentage override applies. The optimizer feeds trial
//! percentages through that override.

use crate::params::ComputedParameters;
use crate::projection::CohortProjection;
use crate::quote::QuoteRequest;
use crate::tables::RedemptionSchedule;

use serde::Serialize;

/// Modal premium considered paid each month of the term
pub fn premiums_paid(request: &QuoteRequest, computed: &ComputedParameters) -> Vec<f64> {
    let months = request.projection_months() as usize;
    vec![request.premium * computed.payment_factor; months]
}

/// Monthly return percentage (decimal), held flat across each policy
/// year; 1.0 at the exact final month of the horizon
pub fn monthly_return_pcts(request: &QuoteRequest, schedule: &RedemptionSchedule) -> Vec<f64> {
    let months = request.projection_months();
    let term = request.policy_term_years;

    (1..=months)
        .map(|m| {
            if m == months {
                1.0
            } else {
                let policy_year = (m - 1) / 12 + 1;
                schedule.pct_for(policy_year, term) / 100.0
            }
        })
        .collect()
}

/// Per-policy redemption value at each month for a given override
/// percentage (e.g. 120.0 for 120%)
pub fn redemption_values(
    premiums_paid: &[f64],
    monthly_return_pcts: &[f64],
    override_pct: f64,
) -> Vec<f64> {
    let months = premiums_paid.len();
    let mut cumulative = 0.0;
    let mut values = Vec::with_capacity(months);

    for m in 0..months {
        cumulative += premiums_paid[m];
        let pct = monthly_return_pcts[m];

        let value = if m + 1 == months {
            // Final month: the override governs the maturity payout
            cumulative * 0.01 * override_pct
        } else if monthly_return_pcts[m + 1] == 0.0 {
            // Last month before the schedule goes dark: override applies
            cumulative * pct * override_pct
        } else {
            cumulative * pct
        };
        values.push(value);
    }
    values
}

/// Redemption value weighted by the lapsing cohort; the amount actually
/// charged into the liability flow
pub fn lapse_weighted(redemption: &[f64], projection: &CohortProjection) -> Vec<f64> {
    redemption
        .iter()
        .zip(&projection.rows)
        .map(|(&value, row)| value * row.lapsed)
        .collect()
}

/// One row of the product-facing redemption schedule
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleRow {
    pub policy_year: u32,
    /// Annual return percentage from the schedule
    pub return_pct: f64,
    /// Guaranteed surrender value at the end of the year
    pub surrender_value: f64,
}

/// Annual schedule table included in the quote response
pub fn schedule_table(
    request: &QuoteRequest,
    computed: &ComputedParameters,
    schedule: &RedemptionSchedule,
    override_pct: f64,
) -> Vec<ScheduleRow> {
    let paid = premiums_paid(request, computed);
    let pcts = monthly_return_pcts(request, schedule);
    let values = redemption_values(&paid, &pcts, override_pct);

    (1..=request.policy_term_years)
        .map(|year| {
            let last_month_idx = (year * 12 - 1) as usize;
            ScheduleRow {
                policy_year: year,
                return_pct: schedule.pct_for(year, request.policy_term_years),
                surrender_value: values[last_month_idx],
            }
        })
        .collect()
}
