use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::AutoQuoteError;
use crate::quote::{build_quote, CarLoanQuote, LoanForm};
use crate::types::*;
use crate::AutoQuoteResult;

/// A marketplace car listing; only the price feeds the quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub price: Money,
}

/// Source of listing prices, usually the marketplace API.
pub trait PriceLookup {
    fn listing(&self, id: &str) -> AutoQuoteResult<Listing>;
}

/// Listings held in memory, e.g. loaded from an API response dump.
#[derive(Debug, Clone, Default)]
pub struct ListingCatalog {
    by_id: HashMap<String, Listing>,
}

impl ListingCatalog {
    /// Later duplicates of an id replace earlier ones.
    pub fn new(listings: Vec<Listing>) -> AutoQuoteResult<Self> {
        let mut by_id = HashMap::with_capacity(listings.len());
        for listing in listings {
            if listing.price < Decimal::ZERO {
                return Err(AutoQuoteError::invalid(
                    "price",
                    format!("Listing '{}' has a negative price", listing.id),
                ));
            }
            by_id.insert(listing.id.clone(), listing);
        }
        Ok(ListingCatalog { by_id })
    }

    pub fn from_json(json: &str) -> AutoQuoteResult<Self> {
        let listings: Vec<Listing> = serde_json::from_str(json)?;
        Self::new(listings)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl PriceLookup for ListingCatalog {
    fn listing(&self, id: &str) -> AutoQuoteResult<Listing> {
        self.by_id
            .get(id)
            .cloned()
            .ok_or_else(|| AutoQuoteError::ListingNotFound(id.to_string()))
    }
}

/// Quote a listed car: its price seeds the form's ex-showroom price.
pub fn quote_for_listing(
    lookup: &impl PriceLookup,
    id: &str,
    form: &LoanForm,
    policy: &PricingPolicy,
) -> AutoQuoteResult<ComputationOutput<CarLoanQuote>> {
    let listing = lookup.listing(id)?;
    tracing::debug!(listing = %listing.id, price = %listing.price, "quoting listing");

    let seeded = LoanForm {
        ex_showroom_price: listing.price,
        ..form.clone()
    };
    build_quote(&seeded, policy)
}
