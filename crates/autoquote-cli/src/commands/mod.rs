pub mod loan;
pub mod pricing;
pub mod quote;

use autoquote_core::types::{Currency, PricingPolicy};

/// Options every command sees
pub struct Settings {
    pub policy: PricingPolicy,
    pub currency: Currency,
}
