//! Product parameters
//!
//! Stored (configured per product) and computed (derived per quote).

pub mod computed;
pub mod stored;

pub use computed::ComputedParameters;
pub use stored::{Currency, StoredParameters};
