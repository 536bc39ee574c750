use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::emi::{compute_emi, LoanQuoteInput};
use crate::error::AutoQuoteError;
use crate::types::*;
use crate::AutoQuoteResult;

/// Longest loan a month-by-month schedule is built for.
pub const MAX_SCHEDULE_YEARS: u32 = 100;

/// One month of a repayment schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub opening_balance: Money,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub closing_balance: Money,
}

/// Month-by-month repayment of a car loan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub monthly_payment: Money,
    pub rows: Vec<AmortizationRow>,
    pub total_interest: Money,
    pub total_principal: Money,
}

/// Build the monthly amortisation schedule for a loan.
///
/// The last month clears whatever balance remains, so the schedule always
/// closes at exactly zero.
pub fn build_schedule(
    input: &LoanQuoteInput,
) -> AutoQuoteResult<ComputationOutput<AmortizationSchedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.term_years > MAX_SCHEDULE_YEARS {
        return Err(AutoQuoteError::invalid(
            "term_years",
            format!("Schedules are limited to {MAX_SCHEDULE_YEARS} years"),
        ));
    }

    let emi = compute_emi(input.principal, input.annual_rate_percent, input.term_years)?;
    let rate = emi.monthly_rate;
    let months = emi.number_of_payments;

    let mut rows = Vec::with_capacity(months as usize);
    let mut balance = input.principal;
    let mut total_interest = Decimal::ZERO;
    let mut total_principal = Decimal::ZERO;

    for month in 1..=months {
        let opening = balance;
        let interest = opening * rate;

        let (payment, principal) = if month == months {
            (opening + interest, opening)
        } else {
            let principal = (emi.monthly_payment - interest).min(opening);
            (principal + interest, principal)
        };

        balance = opening - principal;
        total_interest += interest;
        total_principal += principal;

        rows.push(AmortizationRow {
            month,
            opening_balance: opening,
            payment,
            interest,
            principal,
            closing_balance: balance,
        });
    }

    if let Some(last) = rows.last() {
        let drift = (last.payment - emi.monthly_payment).abs();
        if drift > Decimal::new(1, 2) {
            warnings.push(format!(
                "Final installment differs from the EMI by {}",
                drift.round_dp(2)
            ));
        }
    }

    let output = AmortizationSchedule {
        monthly_payment: emi.monthly_payment,
        rows,
        total_interest,
        total_principal,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Monthly amortisation schedule",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate_percent": input.annual_rate_percent.to_string(),
            "term_years": input.term_years,
        }),
        warnings,
        elapsed,
        output,
    ))
}
