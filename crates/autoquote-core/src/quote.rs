//! Buyer-facing car loan quote.
//!
//! Raw calculator-form input is clamped into range here before it reaches the
//! strict numeric routines, which reject anything out of range.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::loan::emi::compute_emi;
use crate::pricing::on_road::{compute_on_road_price_with, OnRoadPriceBreakdown};
use crate::types::*;
use crate::AutoQuoteResult;

/// Loan calculator form, as entered
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanForm {
    /// Not needed when the price comes from a listing
    #[serde(default)]
    pub ex_showroom_price: Money,
    /// Defaults to the full on-road price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_amount: Option<Money>,
    pub annual_rate_percent: Percent,
    /// Defaults to the shortest offered term
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_years: Option<i64>,
}

/// Form values after clamping, ready for the calculator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedForm {
    pub on_road: OnRoadPriceBreakdown,
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub term_years: u32,
    pub adjustments: Vec<String>,
}

/// Full quote shown next to a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarLoanQuote {
    pub ex_showroom_price: Money,
    pub registration_fee: Money,
    pub insurance_fee: Money,
    pub on_road_price: Money,
    pub loan_amount: Money,
    pub down_payment: Money,
    pub annual_rate_percent: Percent,
    pub term_years: u32,
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
}

/// Clamp raw form input into the ranges the calculator accepts.
///
/// Only the ex-showroom price is rejected when negative; every other field is
/// pulled into range and the change is noted in `adjustments`.
pub fn normalize(form: &LoanForm, policy: &PricingPolicy) -> AutoQuoteResult<NormalizedForm> {
    let on_road = compute_on_road_price_with(form.ex_showroom_price, policy)?;
    let ceiling = on_road.on_road_price;
    let mut adjustments = Vec::new();

    let principal = match form.loan_amount {
        None => ceiling,
        Some(amount) if amount < Decimal::ZERO => {
            adjustments.push(format!("Loan amount {amount} raised to 0"));
            Decimal::ZERO
        }
        Some(amount) if amount > ceiling => {
            adjustments.push(format!(
                "Loan amount {amount} capped at the on-road price {ceiling}"
            ));
            ceiling
        }
        Some(amount) => amount,
    };

    let annual_rate_percent = if form.annual_rate_percent < Decimal::ZERO {
        adjustments.push(format!(
            "Interest rate {}% raised to 0%",
            form.annual_rate_percent
        ));
        Decimal::ZERO
    } else {
        form.annual_rate_percent
    };

    let min = i64::from(policy.min_term_years.max(1));
    let max = i64::from(policy.max_term_years.max(policy.min_term_years.max(1)));
    let term_years = match form.term_years {
        None => min,
        Some(t) if t < min => {
            adjustments.push(format!("Term of {t} years raised to {min}"));
            min
        }
        Some(t) if t > max => {
            adjustments.push(format!("Term of {t} years capped at {max}"));
            max
        }
        Some(t) => t,
    };

    Ok(NormalizedForm {
        on_road,
        principal,
        annual_rate_percent,
        // Bounded by policy limits, which are u32.
        term_years: term_years as u32,
        adjustments,
    })
}

/// Price the car, clamp the form, and compute the EMI in one pass.
pub fn build_quote(
    form: &LoanForm,
    policy: &PricingPolicy,
) -> AutoQuoteResult<ComputationOutput<CarLoanQuote>> {
    let start = Instant::now();

    let normalized = normalize(form, policy)?;
    let emi = compute_emi(
        normalized.principal,
        normalized.annual_rate_percent,
        normalized.term_years,
    )?;

    tracing::debug!(
        on_road_price = %normalized.on_road.on_road_price,
        principal = %normalized.principal,
        adjustments = normalized.adjustments.len(),
        "built car loan quote"
    );

    let on_road = &normalized.on_road;
    let quote = CarLoanQuote {
        ex_showroom_price: on_road.ex_showroom_price,
        registration_fee: on_road.registration_fee,
        insurance_fee: on_road.insurance_fee,
        on_road_price: on_road.on_road_price,
        loan_amount: normalized.principal,
        down_payment: on_road.on_road_price - normalized.principal,
        annual_rate_percent: normalized.annual_rate_percent,
        term_years: normalized.term_years,
        monthly_payment: emi.monthly_payment,
        total_payment: emi.total_payment,
        total_interest: emi.total_interest,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "On-road price with EMI financing",
        &serde_json::json!({
            "registration_fee_rate": policy.registration_fee_rate.to_string(),
            "insurance_fee_rate": policy.insurance_fee_rate.to_string(),
            "term_range_years": [policy.min_term_years, policy.max_term_years],
        }),
        normalized.adjustments,
        elapsed,
        quote,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn form(price: Decimal, loan: Option<Decimal>, rate: Decimal, years: Option<i64>) -> LoanForm {
        LoanForm {
            ex_showroom_price: price,
            loan_amount: loan,
            annual_rate_percent: rate,
            term_years: years,
        }
    }

    #[test]
    fn test_loan_defaults_to_on_road_price() {
        let n = normalize(&form(dec!(1000000), None, dec!(8), None), &PricingPolicy::default())
            .unwrap();
        assert_eq!(n.principal, dec!(1110000));
        assert_eq!(n.term_years, 1);
        assert!(n.adjustments.is_empty());
    }

    #[test]
    fn test_loan_capped_at_on_road_price() {
        let n = normalize(
            &form(dec!(1000000), Some(dec!(2000000)), dec!(8), Some(5)),
            &PricingPolicy::default(),
        )
        .unwrap();
        assert_eq!(n.principal, dec!(1110000));
        assert_eq!(n.adjustments.len(), 1);
    }

    #[test]
    fn test_negative_inputs_clamped() {
        let n = normalize(
            &form(dec!(500000), Some(dec!(-10)), dec!(-2), Some(-3)),
            &PricingPolicy::default(),
        )
        .unwrap();
        assert_eq!(n.principal, Decimal::ZERO);
        assert_eq!(n.annual_rate_percent, Decimal::ZERO);
        assert_eq!(n.term_years, 1);
        assert_eq!(n.adjustments.len(), 3);
    }

    #[test]
    fn test_term_capped_at_policy_maximum() {
        let n = normalize(
            &form(dec!(500000), None, dec!(9), Some(25)),
            &PricingPolicy::default(),
        )
        .unwrap();
        assert_eq!(n.term_years, 10);
    }

    #[test]
    fn test_negative_price_rejected() {
        assert!(normalize(&form(dec!(-1), None, dec!(8), None), &PricingPolicy::default()).is_err());
    }

    #[test]
    fn test_quote_down_payment() {
        let out = build_quote(
            &form(dec!(1000000), Some(dec!(800000)), dec!(9), Some(5)),
            &PricingPolicy::default(),
        )
        .unwrap();
        let q = out.result;
        assert_eq!(q.down_payment, dec!(310000));
        assert_eq!(q.term_years, 5);
        assert!((q.monthly_payment - dec!(16606.68)).abs() < dec!(0.01));
        assert!(out.warnings.is_empty());
    }
}
