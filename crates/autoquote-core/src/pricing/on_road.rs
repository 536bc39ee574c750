use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AutoQuoteError;
use crate::types::*;
use crate::AutoQuoteResult;

/// Ex-showroom price plus statutory fees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnRoadPriceBreakdown {
    pub ex_showroom_price: Money,
    pub registration_fee: Money,
    pub insurance_fee: Money,
    pub on_road_price: Money,
}

/// On-road price with the standard 10% registration and 1% insurance fees.
pub fn compute_on_road_price(ex_showroom_price: Money) -> AutoQuoteResult<OnRoadPriceBreakdown> {
    compute_on_road_price_with(ex_showroom_price, &PricingPolicy::default())
}

/// On-road price using the fee rates of `policy`.
pub fn compute_on_road_price_with(
    ex_showroom_price: Money,
    policy: &PricingPolicy,
) -> AutoQuoteResult<OnRoadPriceBreakdown> {
    if ex_showroom_price < Decimal::ZERO {
        return Err(AutoQuoteError::invalid(
            "ex_showroom_price",
            "Price must not be negative",
        ));
    }
    for (field, rate) in [
        ("registration_fee_rate", policy.registration_fee_rate),
        ("insurance_fee_rate", policy.insurance_fee_rate),
    ] {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(AutoQuoteError::invalid(field, "Fee rate must be between 0 and 1"));
        }
    }

    let registration_fee = ex_showroom_price * policy.registration_fee_rate;
    let insurance_fee = ex_showroom_price * policy.insurance_fee_rate;

    Ok(OnRoadPriceBreakdown {
        ex_showroom_price,
        registration_fee,
        insurance_fee,
        on_road_price: ex_showroom_price + registration_fee + insurance_fee,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_on_road_reference_price() {
        let result = compute_on_road_price(dec!(1000000)).unwrap();
        assert_eq!(
            result,
            OnRoadPriceBreakdown {
                ex_showroom_price: dec!(1000000),
                registration_fee: dec!(100000),
                insurance_fee: dec!(10000),
                on_road_price: dec!(1110000),
            }
        );
    }

    #[test]
    fn test_on_road_rejects_negative_price() {
        assert!(compute_on_road_price(dec!(-0.01)).is_err());
    }

    #[test]
    fn test_on_road_custom_policy() {
        let policy = PricingPolicy {
            registration_fee_rate: dec!(0.08),
            insurance_fee_rate: dec!(0.02),
            ..PricingPolicy::default()
        };
        let result = compute_on_road_price_with(dec!(500000), &policy).unwrap();
        assert_eq!(result.on_road_price, dec!(550000));
    }

    #[test]
    fn test_on_road_rejects_fee_rate_above_one() {
        let policy = PricingPolicy {
            insurance_fee_rate: dec!(1.5),
            ..PricingPolicy::default()
        };
        assert!(compute_on_road_price_with(dec!(500000), &policy).is_err());
    }
}
