//! Effective annual yield to the policyholder (TREA)
//!
//! Solves the annuity-due rate equation for the monthly rate that links
//! the paid premiums to the redemption payout, then annualizes. Unlike
//! the percentage optimizer there is no meaningful fallback yield, so
//! non-convergence is a hard error.

use crate::error::{PricingError, Result};

const DERIVATIVE_STEP: f64 = 1e-6;
const TOLERANCE: f64 = 1e-7;
const MAX_ITERATIONS: u32 = 100;
const INITIAL_GUESS: f64 = 0.01;

/// Annuity-due balance at monthly rate `r`: payments of `pmt` for `nper`
/// periods plus `pv` today and `fv` at the end. Degenerates to the
/// undiscounted sum at r = 0.
fn annuity_balance(r: f64, nper: f64, pmt: f64, pv: f64, fv: f64) -> f64 {
    if r.abs() < 1e-12 {
        pmt * nper + pv + fv
    } else {
        pmt * (1.0 + r) * (1.0 - (1.0 + r).powf(-nper)) / r + pv + fv / (1.0 + r).powf(nper)
    }
}

/// Monthly internal rate for the annuity equation, by Newton-Raphson
/// with a central-difference derivative
pub fn solve_monthly_rate(nper: f64, pmt: f64, pv: f64, fv: f64) -> Result<f64> {
    let mut rate = INITIAL_GUESS;

    for _ in 0..MAX_ITERATIONS {
        let value = annuity_balance(rate, nper, pmt, pv, fv);
        if value.abs() < TOLERANCE {
            return Ok(rate);
        }

        let ahead = annuity_balance(rate + DERIVATIVE_STEP, nper, pmt, pv, fv);
        let behind = annuity_balance(rate - DERIVATIVE_STEP, nper, pmt, pv, fv);
        let derivative = (ahead - behind) / (2.0 * DERIVATIVE_STEP);
        if derivative == 0.0 {
            return Err(PricingError::YieldZeroDerivative { rate });
        }

        rate -= value / derivative;
    }

    Err(PricingError::YieldNotConverged {
        iterations: MAX_ITERATIONS,
    })
}

/// Effective annual yield for a payment plan ending in a redemption
/// payout of `redemption_pct` percent of contributions
pub fn trea(premium: f64, payment_years: u32, redemption_pct: f64) -> Result<f64> {
    let nper = (payment_years * 12) as f64;
    let fv = -(premium * nper * redemption_pct / 100.0);
    let monthly = solve_monthly_rate(nper, premium, 0.0, fv)?;
    Ok((1.0 + monthly).powi(12) - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_rate_limit() {
        // At exactly 100% redemption the contributions come back whole,
        // so the solved rate is ~0
        let balance = annuity_balance(0.0, 120.0, 100.0, 0.0, -12_000.0);
        assert_relative_eq!(balance, 0.0);
    }

    #[test]
    fn test_par_redemption_yields_near_zero() {
        let yield_annual = trea(10_000.0, 10, 100.0).unwrap();
        assert_relative_eq!(yield_annual, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_premium_redemption_yields_positive() {
        let yield_annual = trea(10_000.0, 10, 130.0).unwrap();
        assert!(yield_annual > 0.0);
        // 30% extra over 10 years is a modest annual yield
        assert!(yield_annual < 0.10);
    }

    #[test]
    fn test_richer_payout_means_higher_yield() {
        let low = trea(10_000.0, 10, 110.0).unwrap();
        let high = trea(10_000.0, 10, 140.0).unwrap();
        assert!(high > low);
    }

    #[test]
    fn test_solved_rate_satisfies_equation() {
        let nper = 120.0;
        let pmt = 500.0;
        let fv = -(500.0 * 120.0 * 1.25);
        let rate = solve_monthly_rate(nper, pmt, 0.0, fv).unwrap();
        let residual = annuity_balance(rate, nper, pmt, 0.0, fv);
        assert!(residual.abs() < TOLERANCE);
    }
}
