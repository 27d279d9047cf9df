//! Mortality table keyed by age, sex, and smoker status
//!
//! Rates are stored as per-mille annual rates (a value of 0.789 means
//! 0.789 deaths per 1000 lives per year), matching the source rate files.
//! The monthly-equivalent conversion lives in the survivorship projector.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::quote::{Sex, SmokerStatus};

/// Smoker loading applied to the embedded default table.
/// Configured tables carry explicit smoker rates instead.
const DEFAULT_SMOKER_LOADING: f64 = 1.75;

/// Annual per-mille mortality rates for one age
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MortalityEntry {
    pub male_nonsmoker: f64,
    pub male_smoker: f64,
    pub female_nonsmoker: f64,
    pub female_smoker: f64,
}

impl MortalityEntry {
    fn rate(&self, sex: Sex, smoker: SmokerStatus) -> f64 {
        match (sex, smoker) {
            (Sex::Male, SmokerStatus::NonSmoker) => self.male_nonsmoker,
            (Sex::Male, SmokerStatus::Smoker) => self.male_smoker,
            (Sex::Female, SmokerStatus::NonSmoker) => self.female_nonsmoker,
            (Sex::Female, SmokerStatus::Smoker) => self.female_smoker,
        }
    }
}

/// Age-indexed mortality table
#[derive(Debug, Clone)]
pub struct MortalityTable {
    entries: HashMap<u32, MortalityEntry>,
}

impl MortalityTable {
    pub fn from_entries(entries: HashMap<u32, MortalityEntry>) -> Self {
        Self { entries }
    }

    /// Annual per-mille rate for (age, sex, smoker); `None` when the age
    /// is not in the table. The survivorship projector treats a missing
    /// age as zero mortality rather than failing the quote.
    pub fn rate(&self, age: u32, sex: Sex, smoker: SmokerStatus) -> Option<f64> {
        self.entries.get(&age).map(|e| e.rate(sex, smoker))
    }

    /// Highest age present in the table
    pub fn max_age(&self) -> Option<u32> {
        self.entries.keys().copied().max()
    }

    /// Default pricing table: IAM-2012-shaped base rates expressed per mille,
    /// smoker rates derived with a flat loading.
    pub fn default_pricing() -> Self {
        let mut entries = HashMap::new();
        for (i, &(female, male)) in Self::base_rates_per_mille().iter().enumerate() {
            entries.insert(
                i as u32,
                MortalityEntry {
                    male_nonsmoker: male,
                    male_smoker: male * DEFAULT_SMOKER_LOADING,
                    female_nonsmoker: female,
                    female_smoker: female * DEFAULT_SMOKER_LOADING,
                },
            );
        }
        Self { entries }
    }

    /// Base annual rates per mille, (female, male), index = age
    fn base_rates_per_mille() -> Vec<(f64, f64)> {
        vec![
            // Age 0-9
            (1.801, 1.783), (0.45, 0.446), (0.287, 0.306),
            (0.199, 0.254), (0.152, 0.193), (0.139, 0.186),
            (0.13, 0.184), (0.122, 0.177), (0.105, 0.159),
            (0.098, 0.143),
            // Age 10-19
            (0.094, 0.126), (0.096, 0.123), (0.105, 0.147),
            (0.12, 0.188), (0.146, 0.236), (0.174, 0.282),
            (0.199, 0.325), (0.22, 0.364), (0.234, 0.399),
            (0.245, 0.43),
            // Age 20-29
            (0.253, 0.459), (0.26, 0.492), (0.266, 0.526),
            (0.272, 0.569), (0.275, 0.616), (0.277, 0.669),
            (0.284, 0.728), (0.29, 0.764), (0.3, 0.789),
            (0.313, 0.808),
            // Age 30-39
            (0.333, 0.824), (0.357, 0.834), (0.375, 0.838),
            (0.39, 0.828), (0.405, 0.808), (0.424, 0.789),
            (0.447, 0.783), (0.476, 0.8), (0.514, 0.837),
            (0.56, 0.889),
            // Age 40-49
            (0.613, 0.955), (0.667, 1.029), (0.723, 1.11),
            (0.774, 1.188), (0.823, 1.268), (0.866, 1.355),
            (0.917, 1.464), (0.983, 1.615), (1.072, 1.808),
            (1.168, 2.032),
            // Age 50-59
            (1.29, 2.285), (1.453, 2.557), (1.622, 2.828),
            (1.792, 3.088), (1.972, 3.345), (2.166, 3.616),
            (2.393, 3.922), (2.666, 4.272), (3.0, 4.681),
            (3.393, 5.146),
            // Age 60-69
            (3.844, 5.662), (4.352, 6.237), (4.899, 6.854),
            (5.482, 7.51), (6.118, 8.22), (6.829, 9.007),
            (7.279, 9.497), (7.821, 10.085), (8.475, 10.787),
            (9.234, 11.625),
            // Age 70-79
            (10.083, 12.619), (11.011, 13.798), (12.03, 15.195),
            (13.154, 16.834), (14.415, 18.733), (15.869, 20.905),
            (17.555, 23.367), (19.5, 26.155), (21.758, 29.306),
            (24.412, 32.858),
            // Age 80-89
            (27.579, 36.927), (31.501, 41.703), (36.122, 46.957),
            (41.477, 52.713), (47.589, 59.148), (54.441, 66.505),
            (61.972, 75.015), (70.155, 84.823), (78.963, 95.987),
            (88.336, 108.482),
            // Age 90-99
            (98.197, 122.214), (108.323, 136.799), (119.188, 152.409),
            (131.334, 169.078), (145.521, 186.882), (162.722, 205.844),
            (182.12, 219.247), (199.661, 238.612), (217.946, 258.341),
            (236.834, 278.219),
            // Age 100-110
            (256.357, 298.452), (283.802, 323.61), (304.716, 344.191),
            (325.819, 364.633), (346.936, 384.783), (367.898, 400.0),
            (387.607, 400.0), (400.0, 400.0), (400.0, 400.0), (400.0, 400.0),
            (400.0, 400.0),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rate_lookup() {
        let table = MortalityTable::default_pricing();

        let male_35 = table.rate(35, Sex::Male, SmokerStatus::NonSmoker).unwrap();
        assert_relative_eq!(male_35, 0.789);

        let female_35 = table.rate(35, Sex::Female, SmokerStatus::NonSmoker).unwrap();
        assert_relative_eq!(female_35, 0.424);
    }

    #[test]
    fn test_smoker_loading() {
        let table = MortalityTable::default_pricing();

        let nonsmoker = table.rate(50, Sex::Male, SmokerStatus::NonSmoker).unwrap();
        let smoker = table.rate(50, Sex::Male, SmokerStatus::Smoker).unwrap();
        assert_relative_eq!(smoker, nonsmoker * DEFAULT_SMOKER_LOADING);
    }

    #[test]
    fn test_missing_age_is_none() {
        let table = MortalityTable::default_pricing();
        assert!(table.rate(200, Sex::Male, SmokerStatus::NonSmoker).is_none());
    }

    #[test]
    fn test_rates_increase_at_older_ages() {
        let table = MortalityTable::default_pricing();
        let at_40 = table.rate(40, Sex::Male, SmokerStatus::NonSmoker).unwrap();
        let at_70 = table.rate(70, Sex::Male, SmokerStatus::NonSmoker).unwrap();
        assert!(at_70 > at_40);
    }
}
