//! Pricing tables
//!
//! Mortality, lapse, investment/reserve rates, payment splitting factors,
//! and the guaranteed redemption schedule. Each table ships with embedded
//! pricing defaults and can be overridden from a JSON document.

pub mod lapse;
pub mod loader;
pub mod mortality;
pub mod payment;
pub mod rates;
pub mod redemption;

use std::path::Path;

use crate::error::Result;

pub use lapse::LapseTable;
pub use mortality::{MortalityEntry, MortalityTable};
pub use payment::PaymentFactorTable;
pub use rates::{RatePoint, RateTable, RESERVE_RATE_SPREAD};
pub use redemption::RedemptionSchedule;

/// The full table set a quote needs
#[derive(Debug, Clone)]
pub struct Tables {
    pub mortality: MortalityTable,
    pub lapse: LapseTable,
    pub rates: RateTable,
    pub payment_factors: PaymentFactorTable,
    pub redemption: RedemptionSchedule,
}

impl Tables {
    /// Embedded pricing defaults
    pub fn default_pricing() -> Self {
        Self {
            mortality: MortalityTable::default_pricing(),
            lapse: LapseTable::default_pricing(),
            rates: RateTable::default_pricing(),
            payment_factors: PaymentFactorTable::default_pricing(),
            redemption: RedemptionSchedule::default_pricing(),
        }
    }

    /// Load from a JSON file, using embedded defaults for omitted sections
    pub fn from_json_path(path: &Path) -> Result<Self> {
        loader::load_tables(path)
    }
}
