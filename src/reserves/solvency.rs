//! Solvency margin and investment income on held balances

use crate::params::ComputedParameters;
use crate::reserves::balance::variance_with_unwind;

/// Solvency margin series plus the investment income earned on the
/// reserve and on the margin itself
#[derive(Debug, Clone)]
pub struct SolvencyMargin {
    /// Reserve balance plus MOCE
    pub end_of_year_reserve: Vec<f64>,
    pub margin: Vec<f64>,
    /// Variance of the margin, with terminal unwind (one element longer)
    pub variance: Vec<f64>,
    pub income_on_reserve: Vec<f64>,
    pub income_on_margin: Vec<f64>,
    pub total_investment_income: Vec<f64>,
}

impl SolvencyMargin {
    pub fn compute(
        reserve_balance: &[f64],
        moce: &[f64],
        computed: &ComputedParameters,
    ) -> Self {
        let end_of_year_reserve: Vec<f64> = reserve_balance
            .iter()
            .zip(moce)
            .map(|(&r, &m)| r + m)
            .collect();
        let margin: Vec<f64> = end_of_year_reserve
            .iter()
            .map(|&e| e * computed.reserve_base)
            .collect();
        let variance = variance_with_unwind(&margin);

        let rate = computed.investment_rate_monthly;
        let income_on_reserve: Vec<f64> =
            end_of_year_reserve.iter().map(|&e| e * rate).collect();
        let income_on_margin: Vec<f64> = margin.iter().map(|&m| m * rate).collect();
        let total_investment_income: Vec<f64> = income_on_reserve
            .iter()
            .zip(&income_on_margin)
            .map(|(&r, &m)| r + m)
            .collect();

        Self {
            end_of_year_reserve,
            margin,
            variance,
            income_on_reserve,
            income_on_margin,
            total_investment_income,
        }
    }
}
