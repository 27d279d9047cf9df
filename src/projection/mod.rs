//! Monthly projection pipeline: survivorship, expenses, and cash flows

pub mod cashflows;
pub mod expenses;
pub mod survivorship;

pub use cashflows::{
    acquisition_expenses, claims, commissions, liability_flow, payment_indicator,
    recurring_premiums,
};
pub use expenses::MaintenanceExpenses;
pub use survivorship::{CohortProjection, CohortRow};
