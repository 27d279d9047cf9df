//! Guaranteed redemption percentage schedule
//!
//! The schedule gives, for each (policy year, policy term) pair, the
//! percentage of accumulated premiums returned on surrender. Percentages
//! grade from zero in the early years up to 100% and stay there through
//! maturity. Missing cells read as 0 (no surrender value). Monthly
//! interpolation happens in the reserve module; this table only carries
//! the annual anchor points.

use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct RedemptionSchedule {
    /// Redemption percent (0-100+) by (policy year, policy term in years)
    by_year_term: HashMap<(u32, u32), f64>,
}

impl RedemptionSchedule {
    pub fn new(by_year_term: HashMap<(u32, u32), f64>) -> Self {
        Self { by_year_term }
    }

    /// Redemption percent at the end of a policy year for a term; 0 when
    /// the cell is undefined
    pub fn pct_for(&self, policy_year: u32, term_years: u32) -> f64 {
        self.by_year_term
            .get(&(policy_year, term_years))
            .copied()
            .unwrap_or(0.0)
    }

    /// Default schedule: no surrender value in the first two years, then
    /// linear grading to 100% at the end of each term. Generated for
    /// terms 5-40, independent of any individual request.
    pub fn default_pricing() -> Self {
        let mut by_year_term = HashMap::new();
        for term in 5..=40u32 {
            let grade_years = term.saturating_sub(2).max(1);
            for year in 1..=term {
                let pct = if year <= 2 {
                    0.0
                } else if year >= term {
                    100.0
                } else {
                    100.0 * (year - 2) as f64 / grade_years as f64
                };
                by_year_term.insert((year, term), pct);
            }
        }
        Self { by_year_term }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_no_value_in_early_years() {
        let schedule = RedemptionSchedule::default_pricing();
        assert_relative_eq!(schedule.pct_for(1, 20), 0.0);
        assert_relative_eq!(schedule.pct_for(2, 20), 0.0);
    }

    #[test]
    fn test_full_value_at_each_term_end() {
        let schedule = RedemptionSchedule::default_pricing();
        assert_relative_eq!(schedule.pct_for(12, 12), 100.0);
        assert_relative_eq!(schedule.pct_for(20, 20), 100.0);
        assert_relative_eq!(schedule.pct_for(40, 40), 100.0);
        assert!(schedule.pct_for(19, 20) < 100.0);
    }

    #[test]
    fn test_grading_is_monotone() {
        let schedule = RedemptionSchedule::default_pricing();
        for year in 3..20 {
            assert!(schedule.pct_for(year, 20) <= schedule.pct_for(year + 1, 20));
        }
    }

    #[test]
    fn test_undefined_cell_is_zero() {
        let schedule = RedemptionSchedule::new(HashMap::new());
        assert_relative_eq!(schedule.pct_for(5, 20), 0.0);
    }
}
