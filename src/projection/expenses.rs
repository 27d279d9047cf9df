//! Maintenance expense projection
//!
//! Chained monthly series: a premium-proportional component, a flat
//! per-policy component in the product currency (plus assistance), and an
//! inflation factor that only accrues in months with nonzero expense.

use crate::params::{ComputedParameters, StoredParameters};
use crate::projection::CohortProjection;

/// Maintenance expense series with its intermediate components
#[derive(Debug, Clone)]
pub struct MaintenanceExpenses {
    /// Premium-proportional component
    pub per_premium: Vec<f64>,
    /// Flat component weighted by the living cohort
    pub fixed: Vec<f64>,
    /// Compound inflation factor, 0 in months with no expense
    pub inflation_factor: Vec<f64>,
    /// Total maintenance expense
    pub total: Vec<f64>,
}

impl MaintenanceExpenses {
    pub fn project(
        stored: &StoredParameters,
        computed: &ComputedParameters,
        projection: &CohortProjection,
        recurring_premiums: &[f64],
    ) -> Self {
        let fixed_base = stored.monthly_fixed_cost();
        let months = projection.months();

        let mut per_premium = Vec::with_capacity(months);
        let mut fixed = Vec::with_capacity(months);
        let mut inflation_factor = Vec::with_capacity(months);
        let mut total = Vec::with_capacity(months);

        for (row, &premium) in projection.rows.iter().zip(recurring_premiums) {
            let per = premium * computed.maintenance_load;
            let flat = fixed_base * row.alive_start;
            let factor = if per + flat == 0.0 {
                0.0
            } else {
                (1.0 + computed.inflation_monthly).powi(row.month as i32 - 1)
            };

            per_premium.push(per);
            fixed.push(flat);
            inflation_factor.push(factor);
            total.push((per + flat) * factor);
        }

        Self {
            per_premium,
            fixed,
            inflation_factor,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::cashflows::recurring_premiums;
    use crate::quote::{PaymentFrequency, Product, QuoteRequest, Sex, SmokerStatus};
    use crate::tables::Tables;
    use approx::assert_relative_eq;

    fn setup() -> (StoredParameters, ComputedParameters, CohortProjection, Vec<f64>) {
        let req = QuoteRequest {
            product: Product::Rumbo,
            age: 35,
            sex: Sex::Male,
            smoker: SmokerStatus::NonSmoker,
            frequency: PaymentFrequency::Annual,
            policy_term_years: 20,
            premium_payment_years: 10,
            premium: 10_000.0,
            redemption_percentage: None,
        };
        let stored = StoredParameters::default_rumbo();
        let tables = Tables::default_pricing();
        let computed = ComputedParameters::derive(&req, &stored, &tables).unwrap();
        let projection = CohortProjection::project(&req, &stored, &tables);
        let premiums = recurring_premiums(&req, &computed, &projection);
        (stored, computed, projection, premiums)
    }

    #[test]
    fn test_first_month_has_no_inflation() {
        let (stored, computed, projection, premiums) = setup();
        let expenses = MaintenanceExpenses::project(&stored, &computed, &projection, &premiums);

        assert_relative_eq!(expenses.inflation_factor[0], 1.0);
        assert_relative_eq!(
            expenses.total[0],
            premiums[0] * computed.maintenance_load + stored.monthly_fixed_cost()
        );
    }

    #[test]
    fn test_inflation_compounds_monthly() {
        let (stored, computed, projection, premiums) = setup();
        let expenses = MaintenanceExpenses::project(&stored, &computed, &projection, &premiums);

        // Month 13 has expense (fixed component is always nonzero while
        // lives remain), so its factor is (1+i)^12
        assert_relative_eq!(
            expenses.inflation_factor[12],
            (1.0 + computed.inflation_monthly).powi(12),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_zero_expense_months_have_zero_factor() {
        let (mut stored, computed, projection, premiums) = setup();
        stored.maintenance_cost_soles = 0.0;
        let computed_zero_fixed = computed;
        let expenses =
            MaintenanceExpenses::project(&stored, &computed_zero_fixed, &projection, &premiums);

        // Annual frequency: month 2 collects no premium and the flat cost
        // is zero, so the factor short-circuits
        assert_relative_eq!(expenses.inflation_factor[1], 0.0);
        assert_relative_eq!(expenses.total[1], 0.0);
    }

    #[test]
    fn test_fixed_component_tracks_cohort() {
        let (stored, computed, projection, premiums) = setup();
        let expenses = MaintenanceExpenses::project(&stored, &computed, &projection, &premiums);

        for (row, &flat) in projection.rows.iter().zip(&expenses.fixed) {
            assert_relative_eq!(flat, stored.monthly_fixed_cost() * row.alive_start);
        }
    }
}
