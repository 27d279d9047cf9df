//! Per-product stored parameters
//!
//! Product configuration is stored as a loose key/value document and read
//! into a typed struct once per quote. Missing entries fall back to small
//! positive placeholders (0.01), `false`, or SOLES as applicable. This
//! soft-default policy tolerates partially configured products during
//! tuning; only the rate table hard-fails on a missing entry.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Soft default for any missing numeric parameter
const NUMERIC_DEFAULT: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Soles,
    Dollars,
}

/// Product constants, immutable for the duration of a pricing run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredParameters {
    /// Acquisition expense, absolute amount charged in month 1
    pub acquisition_expense: f64,
    /// Maintenance expense, absolute amount per premium
    pub maintenance_expense: f64,
    /// Cost-of-capital rate (annual decimal)
    pub tir: f64,
    /// MOCE rate (annual decimal)
    pub moce_rate: f64,
    /// Annual inflation (decimal)
    pub annual_inflation: f64,
    /// Solvency margin rate (decimal)
    pub solvency_margin_rate: f64,
    /// Guarantee fund rate (decimal)
    pub guarantee_fund_rate: f64,
    /// Reserve adjustment factor (decimal multiplier)
    pub adjustment_factor: f64,
    /// Mortality adjustment as a percent multiplier (150 = x1.5)
    pub mortality_adjustment_pct: f64,
    /// Reserve margin rate applied to the reserve balance for MOCE
    pub reserve_margin_rate: f64,
    pub currency: Currency,
    /// Flat monthly maintenance cost when the product is in soles
    pub maintenance_cost_soles: f64,
    /// Flat monthly maintenance cost when the product is in dollars
    pub maintenance_cost_dollars: f64,
    pub has_assistance: bool,
    /// Monthly assistance cost, applied when assistance is enabled
    pub assistance_cost: f64,
    pub commission_rate: f64,
    pub tax_rate: f64,
    pub insured_sum: f64,
}

fn get_f64(map: &HashMap<String, Value>, key: &str) -> f64 {
    map.get(key)
        .and_then(Value::as_f64)
        .unwrap_or(NUMERIC_DEFAULT)
}

fn get_bool(map: &HashMap<String, Value>, key: &str) -> bool {
    map.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn get_currency(map: &HashMap<String, Value>, key: &str) -> Currency {
    match map.get(key).and_then(Value::as_str) {
        Some("DOLLARS") => Currency::Dollars,
        _ => Currency::Soles,
    }
}

impl StoredParameters {
    /// Read from a key/value document, soft-defaulting every missing field
    pub fn from_map(map: &HashMap<String, Value>) -> Self {
        Self {
            acquisition_expense: get_f64(map, "acquisition_expense"),
            maintenance_expense: get_f64(map, "maintenance_expense"),
            tir: get_f64(map, "tir"),
            moce_rate: get_f64(map, "moce_rate"),
            annual_inflation: get_f64(map, "annual_inflation"),
            solvency_margin_rate: get_f64(map, "solvency_margin_rate"),
            guarantee_fund_rate: get_f64(map, "guarantee_fund_rate"),
            adjustment_factor: get_f64(map, "adjustment_factor"),
            mortality_adjustment_pct: get_f64(map, "mortality_adjustment_pct"),
            reserve_margin_rate: get_f64(map, "reserve_margin_rate"),
            currency: get_currency(map, "currency"),
            maintenance_cost_soles: get_f64(map, "maintenance_cost_soles"),
            maintenance_cost_dollars: get_f64(map, "maintenance_cost_dollars"),
            has_assistance: get_bool(map, "has_assistance"),
            assistance_cost: get_f64(map, "assistance_cost"),
            commission_rate: get_f64(map, "commission_rate"),
            tax_rate: get_f64(map, "tax_rate"),
            insured_sum: get_f64(map, "insured_sum"),
        }
    }

    /// Default RUMBO product configuration
    pub fn default_rumbo() -> Self {
        Self {
            acquisition_expense: 250.0,
            maintenance_expense: 120.0,
            tir: 0.12,
            moce_rate: 0.06,
            annual_inflation: 0.025,
            solvency_margin_rate: 0.07,
            guarantee_fund_rate: 0.35,
            adjustment_factor: 1.0,
            mortality_adjustment_pct: 100.0,
            reserve_margin_rate: 0.05,
            currency: Currency::Soles,
            maintenance_cost_soles: 4.5,
            maintenance_cost_dollars: 1.5,
            has_assistance: false,
            assistance_cost: 0.0,
            commission_rate: 0.05,
            tax_rate: 0.295,
            insured_sum: 200_000.0,
        }
    }

    /// Flat monthly maintenance cost for the configured currency,
    /// plus the assistance cost when assistance is enabled
    pub fn monthly_fixed_cost(&self) -> f64 {
        let base = match self.currency {
            Currency::Soles => self.maintenance_cost_soles,
            Currency::Dollars => self.maintenance_cost_dollars,
        };
        base + if self.has_assistance {
            self.assistance_cost
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_missing_fields_soft_default() {
        let params = StoredParameters::from_map(&HashMap::new());
        assert_relative_eq!(params.tir, NUMERIC_DEFAULT);
        assert!(!params.has_assistance);
        assert_eq!(params.currency, Currency::Soles);
    }

    #[test]
    fn test_configured_fields_read() {
        let mut map = HashMap::new();
        map.insert("tir".to_string(), Value::from(0.11));
        map.insert("currency".to_string(), Value::from("DOLLARS"));
        map.insert("has_assistance".to_string(), Value::from(true));
        map.insert("assistance_cost".to_string(), Value::from(3.0));
        map.insert("maintenance_cost_dollars".to_string(), Value::from(2.0));

        let params = StoredParameters::from_map(&map);
        assert_relative_eq!(params.tir, 0.11);
        assert_eq!(params.currency, Currency::Dollars);
        assert_relative_eq!(params.monthly_fixed_cost(), 5.0);
    }

    #[test]
    fn test_fixed_cost_without_assistance() {
        let params = StoredParameters::default_rumbo();
        assert_relative_eq!(params.monthly_fixed_cost(), params.maintenance_cost_soles);
    }
}
