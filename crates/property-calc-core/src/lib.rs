pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "emi")]
pub mod emi;

#[cfg(feature = "eligibility")]
pub mod eligibility;

#[cfg(feature = "area")]
pub mod area;

pub use error::PropertyCalcError;
pub use types::*;

/// Standard result type for all property-calc operations
pub type PropertyCalcResult<T> = Result<T, PropertyCalcError>;
