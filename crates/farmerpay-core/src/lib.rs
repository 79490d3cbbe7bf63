pub mod error;
pub mod limits;
pub mod returns;
pub mod types;

#[cfg(feature = "bank")]
pub mod bank;

#[cfg(feature = "platform")]
pub mod platform;

#[cfg(feature = "projection")]
pub mod projection;

#[cfg(feature = "sensitivity")]
pub mod sensitivity;

#[cfg(all(feature = "bank", feature = "platform"))]
pub mod ecosystem;

pub use error::FarmerPayError;
pub use types::*;

/// Standard result type for all FarmerPay operations
pub type FarmerPayResult<T> = Result<T, FarmerPayError>;
