pub mod comparison;
pub mod financials;
pub mod profile;
