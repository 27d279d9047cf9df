//! Premium, claim, commission, and acquisition cash flows
//!
//! Sign conventions matter here: claims and commissions are produced as
//! negative outflows, maintenance / acquisition / redemption series are
//! produced as positive magnitudes. The liability flow flips redemption,
//! maintenance, acquisition, and commission on the way in, so the reserve
//! side sees benefit and expense outflows as positive amounts net of the
//! premium inflow. The shareholder-flow composer re-normalizes signs
//! separately when assembling pre-tax profit.

use crate::params::{ComputedParameters, StoredParameters};
use crate::projection::CohortProjection;
use crate::quote::QuoteRequest;

/// 1.0 in months where a premium falls due, 0.0 elsewhere
pub fn payment_indicator(month: u32, frequency_months: u32) -> f64 {
    if (month - 1) % frequency_months == 0 {
        1.0
    } else {
        0.0
    }
}

/// Premium collected each month, weighted by the living cohort
pub fn recurring_premiums(
    request: &QuoteRequest,
    computed: &ComputedParameters,
    projection: &CohortProjection,
) -> Vec<f64> {
    let frequency_months = request.frequency.months();
    let payment_horizon = request.premium_payment_years * 12;

    projection
        .rows
        .iter()
        .map(|row| {
            if row.month > payment_horizon {
                0.0
            } else {
                payment_indicator(row.month, frequency_months)
                    * request.premium
                    * row.alive_start
                    * computed.payment_factor
            }
        })
        .collect()
}

/// Death benefit outflow, negative
pub fn claims(stored: &StoredParameters, projection: &CohortProjection) -> Vec<f64> {
    projection
        .rows
        .iter()
        .map(|row| -stored.insured_sum * row.died)
        .collect()
}

/// Commission on collected premium net of the assistance component, negative
pub fn commissions(
    request: &QuoteRequest,
    stored: &StoredParameters,
    projection: &CohortProjection,
    recurring_premiums: &[f64],
) -> Vec<f64> {
    let frequency_months = request.frequency.months();

    projection
        .rows
        .iter()
        .zip(recurring_premiums)
        .map(|(row, &premium)| {
            let assistance_adjustment = if stored.has_assistance {
                payment_indicator(row.month, frequency_months)
                    * frequency_months as f64
                    * stored.assistance_cost
                    * row.alive_start
            } else {
                0.0
            };
            -(premium - assistance_adjustment) * stored.commission_rate
        })
        .collect()
}

/// Acquisition expense, charged once in month 1
pub fn acquisition_expenses(stored: &StoredParameters, months: usize) -> Vec<f64> {
    let mut series = vec![0.0; months];
    if months > 0 {
        series[0] = stored.acquisition_expense;
    }
    series
}

/// Net liability-side cash flow
///
/// Takes the series with their as-produced signs (claims and commission
/// negative, the rest positive) and composes the reserve-side flow:
/// redemption, maintenance, acquisition, and commission flip sign before
/// the outflow total is negated and the premium inflow subtracted. The
/// result is positive when benefits and expenses dominate, which is what
/// the prospective reserve recursion discounts.
pub fn liability_flow(
    claims: &[f64],
    lapse_weighted_redemption: &[f64],
    maintenance: &[f64],
    commissions: &[f64],
    acquisition: &[f64],
    recurring_premiums: &[f64],
) -> Vec<f64> {
    claims
        .iter()
        .zip(lapse_weighted_redemption)
        .zip(maintenance)
        .zip(commissions)
        .zip(acquisition)
        .zip(recurring_premiums)
        .map(|(((((&c, &r), &m), &co), &a), &p)| -(c - r - m - co - a) - p)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::{PaymentFrequency, Product, Sex, SmokerStatus};
    use crate::tables::Tables;
    use approx::assert_relative_eq;

    fn request(frequency: PaymentFrequency) -> QuoteRequest {
        QuoteRequest {
            product: Product::Rumbo,
            age: 35,
            sex: Sex::Male,
            smoker: SmokerStatus::NonSmoker,
            frequency,
            policy_term_years: 20,
            premium_payment_years: 10,
            premium: 10_000.0,
            redemption_percentage: None,
        }
    }

    fn setup(
        frequency: PaymentFrequency,
    ) -> (QuoteRequest, StoredParameters, ComputedParameters, CohortProjection) {
        let req = request(frequency);
        let stored = StoredParameters::default_rumbo();
        let tables = Tables::default_pricing();
        let computed = ComputedParameters::derive(&req, &stored, &tables).unwrap();
        let projection = CohortProjection::project(&req, &stored, &tables);
        (req, stored, computed, projection)
    }

    #[test]
    fn test_payment_indicator_quarterly() {
        assert_relative_eq!(payment_indicator(1, 3), 1.0);
        assert_relative_eq!(payment_indicator(2, 3), 0.0);
        assert_relative_eq!(payment_indicator(3, 3), 0.0);
        assert_relative_eq!(payment_indicator(4, 3), 1.0);
    }

    #[test]
    fn test_first_premium_is_full_modal_amount() {
        let (req, _, computed, projection) = setup(PaymentFrequency::Annual);
        let premiums = recurring_premiums(&req, &computed, &projection);
        assert_relative_eq!(premiums[0], req.premium * computed.payment_factor);
    }

    #[test]
    fn test_annual_frequency_pays_once_a_year() {
        let (req, _, computed, projection) = setup(PaymentFrequency::Annual);
        let premiums = recurring_premiums(&req, &computed, &projection);
        assert!(premiums[0] > 0.0);
        for m in 1..12 {
            assert_relative_eq!(premiums[m], 0.0);
        }
        assert!(premiums[12] > 0.0);
    }

    #[test]
    fn test_no_premiums_after_payment_period() {
        let (req, _, computed, projection) = setup(PaymentFrequency::Monthly);
        let premiums = recurring_premiums(&req, &computed, &projection);
        for m in 120..240 {
            assert_relative_eq!(premiums[m], 0.0);
        }
        assert!(premiums[119] > 0.0);
    }

    #[test]
    fn test_claims_are_negative() {
        let (_, stored, _, projection) = setup(PaymentFrequency::Annual);
        let series = claims(&stored, &projection);
        assert_relative_eq!(series[0], -stored.insured_sum * projection.rows[0].died);
        assert!(series.iter().all(|&c| c <= 0.0));
    }

    #[test]
    fn test_commission_proportional_to_premium() {
        let (req, stored, computed, projection) = setup(PaymentFrequency::Annual);
        let premiums = recurring_premiums(&req, &computed, &projection);
        let series = commissions(&req, &stored, &projection, &premiums);
        assert_relative_eq!(series[0], -premiums[0] * stored.commission_rate);
        assert_relative_eq!(series[1], 0.0);
    }

    #[test]
    fn test_assistance_reduces_commissionable_premium() {
        let (req, mut stored, computed, projection) = setup(PaymentFrequency::Annual);
        stored.has_assistance = true;
        stored.assistance_cost = 5.0;
        let premiums = recurring_premiums(&req, &computed, &projection);
        let series = commissions(&req, &stored, &projection, &premiums);

        let adjustment = 12.0 * 5.0 * projection.rows[0].alive_start;
        assert_relative_eq!(series[0], -(premiums[0] - adjustment) * stored.commission_rate);
    }

    #[test]
    fn test_acquisition_only_month_one() {
        let stored = StoredParameters::default_rumbo();
        let series = acquisition_expenses(&stored, 240);
        assert_relative_eq!(series[0], stored.acquisition_expense);
        assert!(series[1..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_liability_flow_sign_convention() {
        let claims = [-100.0, 0.0];
        let redemption = [0.0, 50.0];
        let maintenance = [10.0, 10.0];
        let commission = [-20.0, 0.0];
        let acquisition = [250.0, 0.0];
        let premiums = [1000.0, 0.0];

        let flow = liability_flow(
            &claims,
            &redemption,
            &maintenance,
            &commission,
            &acquisition,
            &premiums,
        );
        // Month 1: claims, maintenance, and acquisition are outflows,
        // commission offsets, premium is the inflow
        assert_relative_eq!(flow[0], 100.0 + 10.0 - 20.0 + 250.0 - 1000.0);
        // Month 2: pure benefit outflow, no premium
        assert_relative_eq!(flow[1], 50.0 + 10.0);
    }

    #[test]
    fn test_liability_flow_outflows_are_positive() {
        // A maturity-style month: large redemption, nothing else
        let claims = [0.0];
        let redemption = [1_000_000.0];
        let maintenance = [0.0];
        let commission = [0.0];
        let acquisition = [0.0];
        let premiums = [0.0];

        let flow = liability_flow(
            &claims,
            &redemption,
            &maintenance,
            &commission,
            &acquisition,
            &premiums,
        );
        assert_relative_eq!(flow[0], 1_000_000.0);
    }
}
