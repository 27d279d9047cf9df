//! Pricing layer: NPV evaluation, the break-even percentage search, the
//! policyholder yield solve, and quote assembly

pub mod bisection;
pub mod evaluator;
pub mod quote;
pub mod trea;

pub use bisection::{BisectionSolver, SolverConfig, SolverOutcome, SolverPhase};
pub use evaluator::{Evaluation, NpvEvaluator};
pub use quote::{EndososQuote, QuoteDetail, QuoteEngine, QuoteResult, RumboQuote};
pub use trea::{solve_monthly_rate, trea};
