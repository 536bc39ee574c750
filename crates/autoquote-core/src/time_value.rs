use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::AutoQuoteError;
use crate::types::{Money, Rate};
use crate::AutoQuoteResult;

fn validate_annuity(period_rate: Rate, periods: u32) -> AutoQuoteResult<()> {
    if periods == 0 {
        return Err(AutoQuoteError::invalid(
            "periods",
            "Number of periods must be > 0",
        ));
    }
    if period_rate < Decimal::ZERO {
        return Err(AutoQuoteError::invalid(
            "period_rate",
            "Periodic rate must not be negative",
        ));
    }
    Ok(())
}

/// Discount factor (1 + r)^-n.
///
/// The base never exceeds one, so the power can only shrink; a vanishing
/// factor underflows to zero rather than overflowing.
pub fn discount_factor(period_rate: Rate, periods: u32) -> AutoQuoteResult<Decimal> {
    let base = Decimal::ONE
        .checked_div(Decimal::ONE + period_rate)
        .ok_or_else(|| AutoQuoteError::DivisionByZero {
            context: "discount factor base".into(),
        })?;
    Ok(base
        .checked_powi(i64::from(periods))
        .unwrap_or(Decimal::ZERO))
}

/// Level payment that fully amortises `principal` over `periods`.
///
/// `principal * r / (1 - (1 + r)^-n)`, or `principal / n` when the rate is zero.
pub fn annuity_payment(period_rate: Rate, periods: u32, principal: Money) -> AutoQuoteResult<Money> {
    validate_annuity(period_rate, periods)?;
    if principal < Decimal::ZERO {
        return Err(AutoQuoteError::invalid(
            "principal",
            "Principal must not be negative",
        ));
    }

    if principal.is_zero() {
        return Ok(Decimal::ZERO);
    }
    if period_rate.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    let denominator = Decimal::ONE - discount_factor(period_rate, periods)?;
    if denominator.is_zero() {
        return Err(AutoQuoteError::DivisionByZero {
            context: "annuity payment denominator".into(),
        });
    }

    principal
        .checked_mul(period_rate)
        .and_then(|x| x.checked_div(denominator))
        .ok_or_else(|| {
            AutoQuoteError::FinancialImpossibility("annuity payment overflowed".into())
        })
}

/// Present value of `periods` level payments, i.e. the loan a payment can service.
pub fn present_value_of_annuity(
    period_rate: Rate,
    periods: u32,
    payment: Money,
) -> AutoQuoteResult<Money> {
    validate_annuity(period_rate, periods)?;
    if payment < Decimal::ZERO {
        return Err(AutoQuoteError::invalid(
            "payment",
            "Payment must not be negative",
        ));
    }

    if period_rate.is_zero() {
        return payment.checked_mul(Decimal::from(periods)).ok_or_else(|| {
            AutoQuoteError::FinancialImpossibility("annuity present value overflowed".into())
        });
    }

    let annuity_factor = (Decimal::ONE - discount_factor(period_rate, periods)?) / period_rate;
    payment.checked_mul(annuity_factor).ok_or_else(|| {
        AutoQuoteError::FinancialImpossibility("annuity present value overflowed".into())
    })
}
