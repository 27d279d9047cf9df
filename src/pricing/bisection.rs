//! Break-even redemption percentage search
//!
//! Brackets the sign change of the shareholder NPV over the redemption
//! percentage, then bisects. Non-convergence is not an error: the caller
//! gets the best available bound with `converged = false` and must check
//! the flag when strict convergence matters.

use log::debug;

use crate::pricing::evaluator::NpvEvaluator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverPhase {
    Initializing,
    Bracketing,
    Bisecting,
    Converged,
    NoSignChange,
}

#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub max_upper_bound: f64,
    pub bracket_step: f64,
    pub tolerance: f64,
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            lower_bound: 100.0,
            upper_bound: 130.0,
            max_upper_bound: 200.0,
            bracket_step: 10.0,
            tolerance: 1e-6,
            max_iterations: 50,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SolverOutcome {
    pub percentage: f64,
    pub npv: f64,
    /// Total engine evaluations spent, counting the two initial bounds
    pub evaluations: u32,
    pub converged: bool,
    pub phase: SolverPhase,
}

pub struct BisectionSolver {
    config: SolverConfig,
}

impl BisectionSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Find the percentage that zeroes the shareholder NPV
    pub fn solve(&self, evaluator: &NpvEvaluator) -> SolverOutcome {
        let cfg = &self.config;

        debug!(
            "{:?}: bounds [{:.2}, {:.2}]",
            SolverPhase::Initializing,
            cfg.lower_bound,
            cfg.upper_bound
        );
        let mut lower = cfg.lower_bound;
        let mut upper = cfg.upper_bound;
        let mut f_lower = evaluator.evaluate(lower);
        let mut f_upper = evaluator.evaluate(upper);
        let mut evaluations = 2u32;

        if f_lower.abs() < cfg.tolerance {
            return SolverOutcome {
                percentage: lower,
                npv: f_lower,
                evaluations,
                converged: true,
                phase: SolverPhase::Converged,
            };
        }
        if f_upper.abs() < cfg.tolerance {
            return SolverOutcome {
                percentage: upper,
                npv: f_upper,
                evaluations,
                converged: true,
                phase: SolverPhase::Converged,
            };
        }

        while f_lower * f_upper > 0.0 && upper < cfg.max_upper_bound {
            upper += cfg.bracket_step;
            f_upper = evaluator.evaluate(upper);
            evaluations += 1;
            debug!(
                "{:?}: upper={:.2} npv={:.6e}",
                SolverPhase::Bracketing,
                upper,
                f_upper
            );
        }

        if f_lower * f_upper > 0.0 {
            // No sign change anywhere in the admissible range; report the
            // bound closest to zero
            let (percentage, npv) = if f_lower.abs() <= f_upper.abs() {
                (lower, f_lower)
            } else {
                (upper, f_upper)
            };
            debug!("no sign change in [{:.2}, {:.2}]", lower, upper);
            return SolverOutcome {
                percentage,
                npv,
                evaluations,
                converged: false,
                phase: SolverPhase::NoSignChange,
            };
        }

        let mut steps = 0;
        while steps < cfg.max_iterations {
            steps += 1;
            let mid = (lower + upper) / 2.0;
            let f_mid = evaluator.evaluate(mid);
            evaluations += 1;
            debug!(
                "{:?} step {}: mid={:.6} npv={:.6e}",
                SolverPhase::Bisecting,
                steps,
                mid,
                f_mid
            );

            if f_mid.abs() < cfg.tolerance {
                return SolverOutcome {
                    percentage: mid,
                    npv: f_mid,
                    evaluations,
                    converged: true,
                    phase: SolverPhase::Converged,
                };
            }
            if f_lower * f_mid < 0.0 {
                upper = mid;
                f_upper = f_mid;
            } else {
                lower = mid;
                f_lower = f_mid;
            }
            if (upper - lower).abs() < cfg.tolerance {
                break;
            }
        }

        let (percentage, npv) = if f_lower.abs() <= f_upper.abs() {
            (lower, f_lower)
        } else {
            (upper, f_upper)
        };
        SolverOutcome {
            percentage,
            npv,
            evaluations,
            converged: steps < cfg.max_iterations,
            phase: if steps < cfg.max_iterations {
                SolverPhase::Converged
            } else {
                SolverPhase::Bisecting
            },
        }
    }
}
