//! Quote assembly
//!
//! Wires the whole pipeline together for one request: derive parameters,
//! search (or accept) the redemption percentage, solve the yield, and
//! assemble the product-facing response.

use serde::Serialize;

use log::info;

use crate::error::Result;
use crate::params::{ComputedParameters, StoredParameters};
use crate::pricing::bisection::{BisectionSolver, SolverConfig, SolverOutcome, SolverPhase};
use crate::pricing::evaluator::NpvEvaluator;
use crate::pricing::trea::trea;
use crate::quote::{Product, QuoteRequest};
use crate::reserves::{schedule_table, ScheduleRow};
use crate::tables::Tables;

/// Product-specific quote payload
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "product")]
pub enum QuoteDetail {
    #[serde(rename = "RUMBO")]
    Rumbo(RumboQuote),
    #[serde(rename = "ENDOSOS")]
    Endosos(EndososQuote),
}

#[derive(Debug, Clone, Serialize)]
pub struct RumboQuote {
    /// Break-even (or caller-fixed) redemption percentage
    pub redemption_percentage: f64,
    /// Shareholder NPV at that percentage
    pub npv: f64,
    /// Engine evaluations spent finding the percentage
    pub evaluations: u32,
    pub converged: bool,
    /// Effective annual yield to the policyholder
    pub trea: f64,
    pub total_contribution: f64,
    pub total_redemption: f64,
    pub total_gain: f64,
    pub redemption_schedule: Vec<ScheduleRow>,
}

/// ENDOSOS pricing is premium-driven and not yet wired to the monthly
/// pipeline; the quote carries the premium through unchanged.
#[derive(Debug, Clone, Serialize)]
pub struct EndososQuote {
    pub premium: f64,
}

/// Full quote response
#[derive(Debug, Clone, Serialize)]
pub struct QuoteResult {
    pub stored_parameters: StoredParameters,
    pub computed_parameters: ComputedParameters,
    #[serde(flatten)]
    pub detail: QuoteDetail,
}

/// Stateless pricing engine over a shared read-only table set
pub struct QuoteEngine {
    tables: Tables,
    stored: StoredParameters,
    solver_config: SolverConfig,
}

impl QuoteEngine {
    pub fn new(tables: Tables, stored: StoredParameters) -> Self {
        Self {
            tables,
            stored,
            solver_config: SolverConfig::default(),
        }
    }

    pub fn with_solver_config(mut self, config: SolverConfig) -> Self {
        self.solver_config = config;
        self
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    pub fn price(&self, request: &QuoteRequest) -> Result<QuoteResult> {
        request.validate()?;
        let computed = ComputedParameters::derive(request, &self.stored, &self.tables)?;

        let detail = match request.product {
            Product::Rumbo => QuoteDetail::Rumbo(self.price_rumbo(request, &computed)?),
            Product::Endosos => QuoteDetail::Endosos(EndososQuote {
                premium: request.premium,
            }),
        };

        Ok(QuoteResult {
            stored_parameters: self.stored.clone(),
            computed_parameters: computed,
            detail,
        })
    }

    fn price_rumbo(
        &self,
        request: &QuoteRequest,
        computed: &ComputedParameters,
    ) -> Result<RumboQuote> {
        let evaluator = NpvEvaluator::new(request, &self.stored, computed, &self.tables);

        let outcome = match request.redemption_percentage {
            Some(pct) => SolverOutcome {
                percentage: pct,
                npv: evaluator.evaluate(pct),
                evaluations: 1,
                converged: true,
                phase: SolverPhase::Converged,
            },
            None => BisectionSolver::new(self.solver_config).solve(&evaluator),
        };
        info!(
            "redemption search: pct={:.6} npv={:.6e} evaluations={} converged={}",
            outcome.percentage, outcome.npv, outcome.evaluations, outcome.converged
        );

        let pct = outcome.percentage;
        let yield_annual = trea(request.premium, request.premium_payment_years, pct)?;

        let frequency_months = request.frequency.months();
        let total_contribution =
            request.premium_payment_years as f64 * request.premium * 12.0;
        let total_redemption = computed.frequency_selected_rate
            * self.stored.insured_sum
            * 12.0
            / frequency_months as f64
            * request.premium_payment_years as f64
            * (pct / 100.0);
        let total_gain = total_redemption - total_contribution;

        let redemption_schedule =
            schedule_table(request, computed, &self.tables.redemption, pct);

        Ok(RumboQuote {
            redemption_percentage: pct,
            npv: outcome.npv,
            evaluations: outcome.evaluations,
            converged: outcome.converged,
            trea: yield_annual,
            total_contribution,
            total_redemption,
            total_gain,
            redemption_schedule,
        })
    }
}
