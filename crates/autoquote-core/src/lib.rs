pub mod error;
pub mod format;
pub mod loan;
pub mod pricing;
pub mod quote;
pub mod time_value;
pub mod types;

#[cfg(feature = "listing")]
pub mod listing;

pub use error::AutoQuoteError;
pub use loan::emi::compute_emi;
pub use pricing::on_road::compute_on_road_price;
pub use types::*;

/// Standard result type for all autoquote operations
pub type AutoQuoteResult<T> = Result<T, AutoQuoteError>;
