pub mod affordability;
pub mod emi;
#[cfg(feature = "schedule")]
pub mod schedule;
