//! Reserve engine
//!
//! Redemption values, the prospective reserve balance with its surrender
//! floor, MOCE, variance series, and the solvency margin.

pub mod balance;
pub mod redemption;
pub mod solvency;

pub use balance::{moce, present_value, reserve_balance, variance_with_unwind};
pub use redemption::{
    lapse_weighted, monthly_return_pcts, premiums_paid, redemption_values, schedule_table,
    ScheduleRow,
};
pub use solvency::SolvencyMargin;
