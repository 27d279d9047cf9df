//! Quote request types and eager input validation

use serde::{Deserialize, Serialize};

use crate::error::{PricingError, Result};

/// Sex of the insured, as keyed in the mortality table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

/// Smoker status of the insured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmokerStatus {
    Smoker,
    NonSmoker,
}

impl SmokerStatus {
    pub fn from_flag(smoker: bool) -> Self {
        if smoker {
            SmokerStatus::Smoker
        } else {
            SmokerStatus::NonSmoker
        }
    }
}

/// Premium payment frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentFrequency {
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

impl PaymentFrequency {
    /// Number of months between premium due dates
    pub fn months(&self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 1,
            PaymentFrequency::Quarterly => 3,
            PaymentFrequency::SemiAnnual => 6,
            PaymentFrequency::Annual => 12,
        }
    }

}

/// Product being quoted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Product {
    Rumbo,
    Endosos,
}

/// A single pricing request
///
/// Created fresh per quote; the engine never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub product: Product,
    pub age: u32,
    pub sex: Sex,
    pub smoker: SmokerStatus,
    pub frequency: PaymentFrequency,
    pub policy_term_years: u32,
    pub premium_payment_years: u32,
    /// Periodic premium; required positive for RUMBO
    #[serde(default)]
    pub premium: f64,
    /// Caller-supplied redemption percentage (e.g. 120.0 for 120%).
    /// When absent the optimizer searches for the break-even value.
    #[serde(default)]
    pub redemption_percentage: Option<f64>,
}

impl QuoteRequest {
    /// Projection horizon in months
    pub fn projection_months(&self) -> u32 {
        self.policy_term_years * 12
    }

    /// Eager validation: the numeric core must never see a request that
    /// violates these invariants.
    pub fn validate(&self) -> Result<()> {
        if self.premium_payment_years > self.policy_term_years {
            return Err(PricingError::PaymentExceedsTerm {
                payment_years: self.premium_payment_years,
                term_years: self.policy_term_years,
            });
        }
        if self.product == Product::Rumbo && self.premium <= 0.0 {
            return Err(PricingError::ProductMismatch {
                product: "RUMBO".to_string(),
                detail: "a positive premium is required".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rumbo_request() -> QuoteRequest {
        QuoteRequest {
            product: Product::Rumbo,
            age: 35,
            sex: Sex::Male,
            smoker: SmokerStatus::NonSmoker,
            frequency: PaymentFrequency::Annual,
            policy_term_years: 20,
            premium_payment_years: 10,
            premium: 10_000.0,
            redemption_percentage: None,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(rumbo_request().validate().is_ok());
    }

    #[test]
    fn test_payment_exceeds_term_rejected() {
        let mut req = rumbo_request();
        req.premium_payment_years = 25;
        assert!(matches!(
            req.validate(),
            Err(PricingError::PaymentExceedsTerm { .. })
        ));
    }

    #[test]
    fn test_rumbo_requires_premium() {
        let mut req = rumbo_request();
        req.premium = 0.0;
        assert!(matches!(
            req.validate(),
            Err(PricingError::ProductMismatch { .. })
        ));
    }

    #[test]
    fn test_frequency_months() {
        assert_eq!(PaymentFrequency::Monthly.months(), 1);
        assert_eq!(PaymentFrequency::Quarterly.months(), 3);
        assert_eq!(PaymentFrequency::SemiAnnual.months(), 6);
        assert_eq!(PaymentFrequency::Annual.months(), 12);
    }
}
