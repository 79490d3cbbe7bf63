pub mod analysis;
pub mod cost;
pub mod financials;
pub mod partnership;
pub mod pricing;
