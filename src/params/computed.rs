//! Derived pricing parameters
//!
//! Pure function of the quote request, stored parameters, and tables.
//! Everything downstream reads rates from here instead of re-deriving
//! them, so the monthlyization conventions live in exactly one place.

use serde::Serialize;

use crate::error::{PricingError, Result};
use crate::params::StoredParameters;
use crate::quote::QuoteRequest;
use crate::tables::Tables;

/// Exponent used to convert annual rates to monthly equivalents
const MONTHLY_EXPONENT: f64 = 1.0 / 12.0;

/// Read-only derived parameters for one pricing run
#[derive(Debug, Clone, Serialize)]
pub struct ComputedParameters {
    /// Acquisition expense per unit premium
    pub acquisition_load: f64,
    /// Maintenance expense per unit premium
    pub maintenance_load: f64,
    /// Monthly cost-of-capital rate derived from the MOCE rate
    pub moce_monthly: f64,
    /// Monthly inflation rate
    pub inflation_monthly: f64,
    /// Solvency margin rate grossed up by the guarantee fund and
    /// adjustment factor
    pub reserve_base: f64,
    /// Annual reserve discount rate, percent
    pub reserve_rate_annual: f64,
    /// Monthly reserve discount rate, decimal
    pub reserve_rate_monthly: f64,
    /// Annual investment rate, decimal
    pub investment_rate: f64,
    /// Monthly investment rate, decimal
    pub investment_rate_monthly: f64,
    /// Monthly cost-of-capital rate derived from TIR
    pub cost_of_capital_monthly: f64,
    /// Premium splitting factor for the selected payment frequency
    pub payment_factor: f64,
    /// Premium after the modal rounding step
    pub premium_for_rounding: f64,
    /// Premium per unit of insured sum at the selected frequency
    pub frequency_selected_rate: f64,
}

impl ComputedParameters {
    pub fn derive(
        request: &QuoteRequest,
        stored: &StoredParameters,
        tables: &Tables,
    ) -> Result<Self> {
        if request.premium <= 0.0 {
            return Err(PricingError::NonPositivePremium(request.premium));
        }

        let acquisition_load = stored.acquisition_expense / request.premium;
        let maintenance_load = stored.maintenance_expense / request.premium;

        let moce_monthly = (1.0 + stored.moce_rate).powf(MONTHLY_EXPONENT) - 1.0;
        let inflation_monthly = (1.0 + stored.annual_inflation).powf(MONTHLY_EXPONENT) - 1.0;

        let reserve_base = stored.solvency_margin_rate
            * (1.0 + stored.guarantee_fund_rate)
            * stored.adjustment_factor;

        // Reserve discounting keys off the policy term, investment income
        // off the premium payment period. Both lookups hard-fail.
        let reserve_point = tables.rates.for_term(request.policy_term_years)?;
        let reserve_rate_annual = reserve_point.reserve_rate;
        let reserve_rate_monthly =
            (1.0 + reserve_rate_annual / 100.0).powf(MONTHLY_EXPONENT) - 1.0;

        let investment_point = tables.rates.for_term(request.premium_payment_years)?;
        let investment_rate = investment_point.investment_rate / 100.0;
        let investment_rate_monthly = (1.0 + investment_rate).powf(MONTHLY_EXPONENT) - 1.0;

        let cost_of_capital_monthly = (1.0 + stored.tir).powf(MONTHLY_EXPONENT) - 1.0;

        let payment_factor = tables.payment_factors.factor(request.frequency);
        // Identity today; kept as the seam where currency rounding of the
        // modal premium would apply.
        let premium_for_rounding = request.premium / payment_factor * payment_factor;
        let frequency_selected_rate = premium_for_rounding / stored.insured_sum;

        Ok(Self {
            acquisition_load,
            maintenance_load,
            moce_monthly,
            inflation_monthly,
            reserve_base,
            reserve_rate_annual,
            reserve_rate_monthly,
            investment_rate,
            investment_rate_monthly,
            cost_of_capital_monthly,
            payment_factor,
            premium_for_rounding,
            frequency_selected_rate,
        })
    }
}
