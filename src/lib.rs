//! RUMBO pricing engine - monthly projection and break-even solver for
//! deferred-annuity quotes
//!
//! This library provides:
//! - Monthly cohort survivorship projection (mortality, lapse)
//! - Premium, expense, claim, and commission cash-flow composition
//! - Prospective reserve balance with surrender floor, MOCE, solvency margin
//! - Shareholder-flow NPV and a bisection search for the break-even
//!   redemption percentage
//! - Policyholder effective annual yield (TREA)

pub mod error;
pub mod params;
pub mod pricing;
pub mod projection;
pub mod quote;
pub mod reserves;
pub mod tables;

// Re-export commonly used types
pub use error::{PricingError, Result};
pub use params::{ComputedParameters, StoredParameters};
pub use pricing::{BisectionSolver, NpvEvaluator, QuoteEngine, QuoteResult, SolverConfig};
pub use projection::CohortProjection;
pub use quote::{PaymentFrequency, Product, QuoteRequest, Sex, SmokerStatus};
pub use tables::Tables;
