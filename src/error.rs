//! Typed errors for the pricing core
//!
//! Two failure policies coexist deliberately (see DESIGN.md):
//! - interest-rate lookups hard-fail with `RateNotFound`
//! - missing stored product parameters soft-default upstream and never reach here

use thiserror::Error;

/// Errors surfaced by the pricing engine
#[derive(Debug, Error)]
pub enum PricingError {
    /// Interest-rate table has no entry for the requested period key
    #[error("rate not found for period {period}")]
    RateNotFound { period: u32 },

    /// Premium must be a positive amount for load derivation
    #[error("premium must be positive, got {0}")]
    NonPositivePremium(f64),

    /// Premium payment period cannot exceed the policy term
    #[error("premium payment period of {payment_years}y exceeds policy term of {term_years}y")]
    PaymentExceedsTerm { payment_years: u32, term_years: u32 },

    /// Request parameters do not match the requested product
    #[error("parameters do not match product {product}: {detail}")]
    ProductMismatch { product: String, detail: String },

    /// Newton-Raphson yield solve hit the iteration cap
    #[error("yield solve did not converge after {iterations} iterations")]
    YieldNotConverged { iterations: u32 },

    /// Newton-Raphson yield solve hit a zero derivative
    #[error("zero derivative in yield solve at monthly rate {rate}")]
    YieldZeroDerivative { rate: f64 },

    /// I/O failure while loading table files
    #[error("table i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON in a table file
    #[error("malformed table file: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, PricingError>;
