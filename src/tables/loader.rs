//! JSON-based table loader
//!
//! Loads pricing tables from a single JSON document. Every section is
//! optional; omitted sections fall back to the embedded pricing defaults,
//! so a partial file can override just one table.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::quote::PaymentFrequency;
use crate::tables::lapse::LapseTable;
use crate::tables::mortality::{MortalityEntry, MortalityTable};
use crate::tables::payment::PaymentFactorTable;
use crate::tables::rates::RateTable;
use crate::tables::redemption::RedemptionSchedule;
use crate::tables::Tables;

/// Default path to the pricing tables document
pub const DEFAULT_TABLES_PATH: &str = "data/pricing_tables.json";

#[derive(Debug, Deserialize)]
struct TablesFile {
    #[serde(default)]
    mortality: Option<HashMap<u32, MortalityEntry>>,
    #[serde(default)]
    lapse: Option<LapseFile>,
    #[serde(default)]
    investment_rates: Option<HashMap<u32, f64>>,
    #[serde(default)]
    payment_factors: Option<HashMap<PaymentFrequency, f64>>,
    #[serde(default)]
    redemption: Option<Vec<RedemptionCell>>,
}

#[derive(Debug, Deserialize)]
struct RedemptionCell {
    year: u32,
    term_years: u32,
    pct: f64,
}

#[derive(Debug, Deserialize)]
struct LapseFile {
    annual_by_year: HashMap<u32, f64>,
    #[serde(default)]
    term_overrides: Vec<LapseTermOverride>,
    #[serde(default)]
    monthly_overrides: Vec<LapseMonthlyOverride>,
}

#[derive(Debug, Deserialize)]
struct LapseTermOverride {
    year: u32,
    term_years: u32,
    annual_pct: f64,
}

#[derive(Debug, Deserialize)]
struct LapseMonthlyOverride {
    year: u32,
    month: u32,
    monthly_rate: f64,
}

impl LapseFile {
    fn into_table(self) -> LapseTable {
        let term_overrides = self
            .term_overrides
            .into_iter()
            .map(|o| ((o.year, o.term_years), o.annual_pct))
            .collect();
        let monthly_overrides = self
            .monthly_overrides
            .into_iter()
            .map(|o| ((o.year, o.month), o.monthly_rate))
            .collect();
        LapseTable::with_overrides(self.annual_by_year, term_overrides, monthly_overrides)
    }
}

/// Load tables from a JSON file, filling omitted sections with the
/// embedded defaults.
pub fn load_tables(path: &Path) -> Result<Tables> {
    let file = File::open(path)?;
    let parsed: TablesFile = serde_json::from_reader(BufReader::new(file))?;

    Ok(Tables {
        mortality: parsed
            .mortality
            .map(MortalityTable::from_entries)
            .unwrap_or_else(MortalityTable::default_pricing),
        lapse: parsed
            .lapse
            .map(LapseFile::into_table)
            .unwrap_or_else(LapseTable::default_pricing),
        rates: parsed
            .investment_rates
            .map(RateTable::from_investment_rates)
            .unwrap_or_else(RateTable::default_pricing),
        payment_factors: parsed
            .payment_factors
            .map(PaymentFactorTable::new)
            .unwrap_or_else(PaymentFactorTable::default_pricing),
        redemption: parsed
            .redemption
            .map(|cells| {
                RedemptionSchedule::new(
                    cells
                        .into_iter()
                        .map(|c| ((c.year, c.term_years), c.pct))
                        .collect(),
                )
            })
            .unwrap_or_else(RedemptionSchedule::default_pricing),
    })
}
