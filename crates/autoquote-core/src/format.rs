//! Display formatting for money. Rounding happens here and nowhere earlier.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::{Currency, Grouping, Money};

/// Round half away from zero to `dp` decimal places.
pub fn round_money(amount: Money, dp: u32) -> Money {
    amount.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

fn group_digits(digits: &str, grouping: Grouping) -> String {
    let len = digits.len();
    if len <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(len - 3);
    let head_group = match grouping {
        Grouping::Indian => 2,
        Grouping::Western => 3,
    };

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(head_group);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);
    groups.join(",")
}

/// `format_currency(123456, INR)` gives `₹1,23,456`; negatives read `-₹1,200`.
pub fn format_currency(amount: Money, currency: &Currency) -> String {
    let dp = currency.display_decimals();
    let rounded = round_money(amount, dp);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };

    let text = format!("{:.*}", dp as usize, rounded.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut out = format!(
        "{sign}{}{}",
        currency.symbol(),
        group_digits(int_part, currency.grouping())
    );
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}
