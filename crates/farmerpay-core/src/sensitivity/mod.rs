pub mod fee;
pub mod npa;
pub mod scale;
pub mod scenario;
pub mod sweep;
