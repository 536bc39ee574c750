use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::emi::{compute_emi, monthly_rate, MONTHS_PER_YEAR};
use crate::error::AutoQuoteError;
use crate::time_value::present_value_of_annuity;
use crate::types::*;
use crate::AutoQuoteResult;

/// Largest loan a buyer can service at a given monthly budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Affordability {
    pub max_principal: Money,
    pub monthly_payment: Money,
    pub total_interest: Money,
}

/// Largest principal whose EMI does not exceed `target_monthly_payment`.
pub fn max_loan_for_emi(
    target_monthly_payment: Money,
    annual_rate_percent: Percent,
    term_years: u32,
) -> AutoQuoteResult<Affordability> {
    if target_monthly_payment < Decimal::ZERO {
        return Err(AutoQuoteError::invalid(
            "target_monthly_payment",
            "Monthly budget must not be negative",
        ));
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(AutoQuoteError::invalid(
            "annual_rate_percent",
            "Interest rate must not be negative",
        ));
    }
    if term_years < 1 {
        return Err(AutoQuoteError::invalid(
            "term_years",
            "Loan term must be at least 1 year",
        ));
    }

    let months = term_years.saturating_mul(MONTHS_PER_YEAR);
    let pv = present_value_of_annuity(
        monthly_rate(annual_rate_percent),
        months,
        target_monthly_payment,
    )?;
    // Truncated, not rounded: the EMI on the result must stay within budget.
    let max_principal = pv.trunc_with_scale(2);

    let emi = compute_emi(max_principal, annual_rate_percent, term_years)?;
    Ok(Affordability {
        max_principal,
        monthly_payment: emi.monthly_payment,
        total_interest: emi.total_interest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_budget_never_exceeded() {
        let result = max_loan_for_emi(dec!(15000), dec!(9), 5).unwrap();
        assert!((result.max_principal - dec!(722600.60)).abs() < dec!(0.01));
        assert!(result.monthly_payment <= dec!(15000));
    }

    #[test]
    fn test_zero_rate_budget() {
        let result = max_loan_for_emi(dec!(5000), Decimal::ZERO, 2).unwrap();
        assert_eq!(result.max_principal, dec!(120000));
        assert_eq!(result.total_interest, Decimal::ZERO);
    }

    #[test]
    fn test_rejects_negative_budget() {
        assert!(max_loan_for_emi(dec!(-1), dec!(8), 3).is_err());
    }
}
