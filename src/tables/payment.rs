//! Per-frequency payment splitting factors
//!
//! The splitting factor converts an annualized premium into the amount
//! collected at each payment date. Missing entries fall back to 1.0, so
//! an unconfigured frequency behaves as annual collection.

use std::collections::HashMap;

use crate::quote::PaymentFrequency;

#[derive(Debug, Clone)]
pub struct PaymentFactorTable {
    factors: HashMap<PaymentFrequency, f64>,
}

impl PaymentFactorTable {
    pub fn new(factors: HashMap<PaymentFrequency, f64>) -> Self {
        Self { factors }
    }

    /// Splitting factor for a frequency, defaulting to 1.0
    pub fn factor(&self, frequency: PaymentFrequency) -> f64 {
        self.factors.get(&frequency).copied().unwrap_or(1.0)
    }

    /// Default pricing factors, loaded for modal collection
    pub fn default_pricing() -> Self {
        let mut factors = HashMap::new();
        factors.insert(PaymentFrequency::Annual, 1.0);
        factors.insert(PaymentFrequency::SemiAnnual, 0.52);
        factors.insert(PaymentFrequency::Quarterly, 0.265);
        factors.insert(PaymentFrequency::Monthly, 0.09);
        Self::new(factors)
    }
}
