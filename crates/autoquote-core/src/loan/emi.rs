use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::AutoQuoteError;
use crate::time_value::annuity_payment;
use crate::types::*;
use crate::AutoQuoteResult;

pub const MONTHS_PER_YEAR: u32 = 12;

/// Input for an EMI quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanQuoteInput {
    /// Amount actually borrowed
    pub principal: Money,
    /// Nominal annual rate as a percentage (8 = 8% p.a.)
    pub annual_rate_percent: Percent,
    pub term_years: u32,
}

/// Installment and totals for an amortising car loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiBreakdown {
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    pub number_of_payments: u32,
    pub monthly_rate: Rate,
}

/// Periodic rate for a percent-per-annum quote: `annual / 100 / 12`.
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / dec!(100) / Decimal::from(MONTHS_PER_YEAR)
}

/// Narrow a term entered as a signed integer, rejecting anything below one year.
pub fn validate_term_years(term_years: i64) -> AutoQuoteResult<u32> {
    if term_years < 1 {
        return Err(AutoQuoteError::invalid(
            "term_years",
            "Loan term must be at least 1 year",
        ));
    }
    u32::try_from(term_years)
        .map_err(|_| AutoQuoteError::invalid("term_years", "Loan term is too long"))
}

fn number_of_payments(term_years: u32) -> AutoQuoteResult<u32> {
    if term_years < 1 {
        return Err(AutoQuoteError::invalid(
            "term_years",
            "Loan term must be at least 1 year",
        ));
    }
    term_years.checked_mul(MONTHS_PER_YEAR).ok_or_else(|| {
        AutoQuoteError::invalid("term_years", "Loan term is too long")
    })
}

/// Equated monthly installment for a loan of `principal` at `annual_rate_percent`
/// over `term_years`.
///
/// Nothing is rounded here; round only when displaying. A zero rate repays the
/// principal in equal parts with no interest.
pub fn compute_emi(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: u32,
) -> AutoQuoteResult<EmiBreakdown> {
    if principal < Decimal::ZERO {
        return Err(AutoQuoteError::invalid(
            "principal",
            "Loan amount must not be negative",
        ));
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(AutoQuoteError::invalid(
            "annual_rate_percent",
            "Interest rate must not be negative",
        ));
    }
    let payments = number_of_payments(term_years)?;
    let rate = monthly_rate(annual_rate_percent);

    tracing::debug!(
        %principal,
        %annual_rate_percent,
        term_years,
        "computing emi"
    );

    let monthly_payment = annuity_payment(rate, payments, principal)?;

    let (total_payment, total_interest) = if rate.is_zero() {
        (principal, Decimal::ZERO)
    } else {
        let total = monthly_payment * Decimal::from(payments);
        (total, total - principal)
    };

    Ok(EmiBreakdown {
        monthly_payment,
        total_payment,
        total_interest,
        number_of_payments: payments,
        monthly_rate: rate,
    })
}

/// EMI wrapped in the standard output envelope, with warnings for terms the
/// quoting form would not offer.
pub fn calculate_loan_quote(
    input: &LoanQuoteInput,
    policy: &PricingPolicy,
) -> AutoQuoteResult<ComputationOutput<EmiBreakdown>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let breakdown = compute_emi(input.principal, input.annual_rate_percent, input.term_years)?;

    if input.term_years < policy.min_term_years || input.term_years > policy.max_term_years {
        warnings.push(format!(
            "Term of {} years is outside the offered range of {}-{} years",
            input.term_years, policy.min_term_years, policy.max_term_years
        ));
    }
    if input.annual_rate_percent.is_zero() && !input.principal.is_zero() {
        warnings.push("Zero interest rate: principal repaid in equal installments".into());
    }
    if breakdown.total_interest > input.principal && !input.principal.is_zero() {
        warnings.push(format!(
            "Total interest {} exceeds the amount borrowed",
            breakdown.total_interest.round_dp(2)
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Equated Monthly Installment (level-payment amortisation)",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate_percent": input.annual_rate_percent.to_string(),
            "term_years": input.term_years,
            "compounding": "monthly",
        }),
        warnings,
        elapsed,
        breakdown,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Decimal, expected: Decimal, tolerance: Decimal) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} ± {tolerance}, got {actual}"
        );
    }

    #[test]
    fn test_emi_reference_quote() {
        let result = compute_emi(dec!(500000), dec!(8), 3).unwrap();
        assert_close(result.monthly_payment, dec!(15668.18), dec!(0.01));
        assert_eq!(result.number_of_payments, 36);
        assert_eq!(
            result.total_interest,
            result.total_payment - dec!(500000)
        );
    }

    #[test]
    fn test_emi_zero_principal() {
        let result = compute_emi(Decimal::ZERO, dec!(8), 3).unwrap();
        assert_eq!(result.monthly_payment, Decimal::ZERO);
        assert_eq!(result.total_payment, Decimal::ZERO);
        assert_eq!(result.total_interest, Decimal::ZERO);
    }

    #[test]
    fn test_emi_zero_rate() {
        let result = compute_emi(dec!(120000), Decimal::ZERO, 2).unwrap();
        assert_eq!(result.monthly_payment, dec!(5000));
        assert_eq!(result.total_payment, dec!(120000));
        assert_eq!(result.total_interest, Decimal::ZERO);
    }

    #[test]
    fn test_emi_rejects_invalid_input() {
        for (p, r, t) in [
            (dec!(-1), dec!(8), 3),
            (dec!(100000), dec!(-1), 3),
            (dec!(100000), dec!(8), 0),
        ] {
            assert!(matches!(
                compute_emi(p, r, t),
                Err(AutoQuoteError::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn test_signed_term_validation() {
        assert_eq!(validate_term_years(5).unwrap(), 5);
        for bad in [-1, 0, i64::from(u32::MAX) + 1] {
            assert!(matches!(
                validate_term_years(bad),
                Err(AutoQuoteError::InvalidInput { field, .. }) if field == "term_years"
            ));
        }
    }

    #[test]
    fn test_quote_warns_outside_offered_term() {
        let input = LoanQuoteInput {
            principal: dec!(300000),
            annual_rate_percent: dec!(9),
            term_years: 15,
        };
        let output = calculate_loan_quote(&input, &PricingPolicy::default()).unwrap();
        assert!(output
            .warnings
            .iter()
            .any(|w| w.contains("outside the offered range")));
    }
}
