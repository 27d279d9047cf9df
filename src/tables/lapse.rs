//! Policy lapse (surrender) rates
//!
//! Lapse rates are stored as annual percentages keyed by policy year,
//! with optional per-term overrides for specific (year, term) pairs and
//! per-month overrides for specific (year, month) pairs. The final month
//! of a projection always lapses the full remaining cohort.

use std::collections::HashMap;

/// Annual lapse percentage used for policy years with no table entry
const DEFAULT_ANNUAL_LAPSE_PCT: f64 = 10.0;

/// Annual lapse percentages by policy year, plus override layers
#[derive(Debug, Clone)]
pub struct LapseTable {
    /// Annual percentage by policy year (1-based)
    pub(crate) annual_by_year: HashMap<u32, f64>,
    /// Overrides for (policy year, policy term in years)
    term_overrides: HashMap<(u32, u32), f64>,
    /// Monthly-rate overrides for (policy year, month within year 1..=12),
    /// already expressed as monthly decimals
    monthly_overrides: HashMap<(u32, u32), f64>,
}

impl LapseTable {
    pub fn new(annual_by_year: HashMap<u32, f64>) -> Self {
        Self {
            annual_by_year,
            term_overrides: HashMap::new(),
            monthly_overrides: HashMap::new(),
        }
    }

    pub fn with_overrides(
        annual_by_year: HashMap<u32, f64>,
        term_overrides: HashMap<(u32, u32), f64>,
        monthly_overrides: HashMap<(u32, u32), f64>,
    ) -> Self {
        Self {
            annual_by_year,
            term_overrides,
            monthly_overrides,
        }
    }

    /// Annual lapse percentage for a policy year under a given term
    pub fn annual_pct(&self, policy_year: u32, term_years: u32) -> f64 {
        if let Some(&pct) = self.term_overrides.get(&(policy_year, term_years)) {
            return pct;
        }
        self.annual_by_year
            .get(&policy_year)
            .copied()
            .unwrap_or(DEFAULT_ANNUAL_LAPSE_PCT)
    }

    /// Monthly lapse decimals for every projection month of a term.
    ///
    /// The annual percentage is converted with the compound-equivalent
    /// formula `1 - (1 - annual/100)^(1/12)`, then (year, month) overrides
    /// are applied. The last projection month is forced to 1.0 so the
    /// surviving cohort exits at maturity.
    pub fn monthly_rates(&self, term_years: u32) -> Vec<f64> {
        let months = (term_years * 12) as usize;
        let mut rates = Vec::with_capacity(months);
        for m in 1..=months {
            let year = ((m - 1) / 12 + 1) as u32;
            let month_in_year = ((m - 1) % 12 + 1) as u32;

            let rate = if let Some(&r) = self.monthly_overrides.get(&(year, month_in_year)) {
                r
            } else {
                let annual = self.annual_pct(year, term_years);
                1.0 - (1.0 - annual / 100.0).powf(1.0 / 12.0)
            };
            rates.push(rate);
        }
        if let Some(last) = rates.last_mut() {
            *last = 1.0;
        }
        rates
    }

    /// Default pricing table, calibrated to observed lapse experience
    pub fn default_pricing() -> Self {
        let mut annual = HashMap::new();
        annual.insert(1, 8.019_40);
        annual.insert(2, 4.339_01);
        annual.insert(3, 4.027_13);
        annual.insert(4, 2.075_97);
        annual.insert(5, 1.206_59);
        annual.insert(6, 1.483_85);
        annual.insert(7, 1.529_37);
        annual.insert(8, 1.635_49);
        annual.insert(9, 1.028_71);
        annual.insert(10, 1.039_40);
        annual.insert(11, 1.404_49);
        annual.insert(12, 1.882_82);
        for year in 13..=24 {
            annual.insert(year, 0.97);
        }
        for year in 25..=71 {
            annual.insert(year, 0.87);
        }
        annual.insert(72, 100.0);
        Self::new(annual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_annual_to_monthly_conversion() {
        let table = LapseTable::default_pricing();
        let rates = table.monthly_rates(10);

        let expected = 1.0 - (1.0 - 8.019_40_f64 / 100.0).powf(1.0 / 12.0);
        assert_relative_eq!(rates[0], expected, epsilon = 1e-12);
    }

    #[test]
    fn test_final_month_is_full_lapse() {
        let table = LapseTable::default_pricing();
        let rates = table.monthly_rates(5);
        assert_eq!(rates.len(), 60);
        assert_relative_eq!(rates[59], 1.0);
    }

    #[test]
    fn test_missing_year_uses_default() {
        let table = LapseTable::new(HashMap::new());
        assert_relative_eq!(table.annual_pct(3, 20), DEFAULT_ANNUAL_LAPSE_PCT);
    }

    #[test]
    fn test_term_override_wins() {
        let mut term_overrides = HashMap::new();
        term_overrides.insert((1, 20), 12.5);
        let table = LapseTable::with_overrides(
            LapseTable::default_pricing().annual_by_year,
            term_overrides,
            HashMap::new(),
        );
        assert_relative_eq!(table.annual_pct(1, 20), 12.5);
        assert_relative_eq!(table.annual_pct(1, 15), 8.019_40);
    }

    #[test]
    fn test_monthly_override_wins() {
        let mut monthly_overrides = HashMap::new();
        monthly_overrides.insert((2, 6), 0.004);
        let table = LapseTable::with_overrides(
            LapseTable::default_pricing().annual_by_year,
            HashMap::new(),
            monthly_overrides,
        );
        let rates = table.monthly_rates(5);
        // Year 2, month 6 is projection month 18
        assert_relative_eq!(rates[17], 0.004);
    }
}
