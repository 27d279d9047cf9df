//! Percentage-to-NPV evaluator
//!
//! Everything that does not depend on the trial redemption percentage is
//! computed once at construction; `evaluate` then runs only the
//! percentage-dependent tail of the pipeline. Each call is pure and
//! side-effect-free, which is what lets the root-finder re-evaluate freely.

use crate::params::{ComputedParameters, StoredParameters};
use crate::projection::{
    acquisition_expenses, claims, commissions, liability_flow, recurring_premiums,
    CohortProjection, MaintenanceExpenses,
};
use crate::quote::QuoteRequest;
use crate::reserves::{
    lapse_weighted, moce, monthly_return_pcts, premiums_paid, redemption_values,
    reserve_balance, variance_with_unwind, SolvencyMargin,
};
use crate::tables::Tables;

/// All monthly series produced for one trial percentage
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub redemption: Vec<f64>,
    pub lapse_weighted_redemption: Vec<f64>,
    pub liability_flow: Vec<f64>,
    pub reserve_balance: Vec<f64>,
    pub moce: Vec<f64>,
    /// One element longer than the month count (terminal unwind)
    pub variance_reserve: Vec<f64>,
    /// One element longer than the month count (terminal unwind)
    pub variance_moce: Vec<f64>,
    pub solvency: SolvencyMargin,
    pub pre_tax_profit: Vec<f64>,
    pub tax: Vec<f64>,
    pub shareholder_flow: Vec<f64>,
    pub npv: f64,
}

/// Pure `percentage -> npv` evaluator for one pricing request
pub struct NpvEvaluator {
    stored: StoredParameters,
    computed: ComputedParameters,
    projection: CohortProjection,
    recurring_premiums: Vec<f64>,
    claims: Vec<f64>,
    commissions: Vec<f64>,
    acquisition: Vec<f64>,
    maintenance: Vec<f64>,
    premiums_paid: Vec<f64>,
    monthly_return_pcts: Vec<f64>,
}

impl NpvEvaluator {
    pub fn new(
        request: &QuoteRequest,
        stored: &StoredParameters,
        computed: &ComputedParameters,
        tables: &Tables,
    ) -> Self {
        let projection = CohortProjection::project(request, stored, tables);
        let premiums = recurring_premiums(request, computed, &projection);
        let claims = claims(stored, &projection);
        let commissions = commissions(request, stored, &projection, &premiums);
        let acquisition = acquisition_expenses(stored, projection.months());
        let maintenance =
            MaintenanceExpenses::project(stored, computed, &projection, &premiums).total;
        let premiums_paid = premiums_paid(request, computed);
        let monthly_return_pcts = monthly_return_pcts(request, &tables.redemption);

        Self {
            stored: stored.clone(),
            computed: computed.clone(),
            projection,
            recurring_premiums: premiums,
            claims,
            commissions,
            acquisition,
            maintenance,
            premiums_paid,
            monthly_return_pcts,
        }
    }

    pub fn projection(&self) -> &CohortProjection {
        &self.projection
    }

    pub fn recurring_premiums(&self) -> &[f64] {
        &self.recurring_premiums
    }

    /// NPV of the shareholder flow at a trial redemption percentage
    pub fn evaluate(&self, percentage: f64) -> f64 {
        self.evaluate_full(percentage).npv
    }

    /// Full series breakdown at a trial redemption percentage
    pub fn evaluate_full(&self, percentage: f64) -> Evaluation {
        let n = self.projection.months();

        let redemption =
            redemption_values(&self.premiums_paid, &self.monthly_return_pcts, percentage);
        let rescates = lapse_weighted(&redemption, &self.projection);

        let liability = liability_flow(
            &self.claims,
            &rescates,
            &self.maintenance,
            &self.commissions,
            &self.acquisition,
            &self.recurring_premiums,
        );

        let alive_start = self.projection.alive_start();
        let reserve = reserve_balance(
            &liability,
            &redemption,
            &alive_start,
            self.computed.reserve_rate_monthly,
        );
        let moce_series = moce(
            &reserve,
            self.stored.reserve_margin_rate,
            self.computed.moce_monthly,
            self.computed.reserve_rate_monthly,
        );

        let variance_reserve = variance_with_unwind(&reserve);
        let variance_moce = variance_with_unwind(&moce_series);
        let solvency = SolvencyMargin::compute(&reserve, &moce_series, &self.computed);

        // Maintenance, acquisition, and redemption series carry positive
        // magnitudes; they enter the profit as outflows here.
        let mut pre_tax_profit = Vec::with_capacity(n);
        for m in 0..n {
            let reserve_variation = variance_reserve[m] + variance_moce[m];
            pre_tax_profit.push(
                self.recurring_premiums[m]
                    + self.commissions[m]
                    - self.acquisition[m]
                    - self.maintenance[m]
                    + self.claims[m]
                    - rescates[m]
                    + reserve_variation,
            );
        }

        let tax: Vec<f64> = pre_tax_profit
            .iter()
            .map(|&profit| {
                if profit > 0.0 {
                    -profit * self.stored.tax_rate
                } else {
                    0.0
                }
            })
            .collect();

        let mut shareholder_flow = Vec::with_capacity(n);
        for m in 0..n {
            shareholder_flow.push(
                pre_tax_profit[m]
                    + solvency.variance[m]
                    + tax[m]
                    + solvency.total_investment_income[m],
            );
        }

        // Month 1 is undiscounted (t = 0 convention)
        let rate = self.computed.cost_of_capital_monthly;
        let npv = shareholder_flow
            .iter()
            .enumerate()
            .map(|(m, &flow)| flow / (1.0 + rate).powi(m as i32))
            .sum();

        Evaluation {
            redemption,
            lapse_weighted_redemption: rescates,
            liability_flow: liability,
            reserve_balance: reserve,
            moce: moce_series,
            variance_reserve,
            variance_moce,
            solvency,
            pre_tax_profit,
            tax,
            shareholder_flow,
            npv,
        }
    }
}
