use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Currency, Money};

/// Format an amount with its currency symbol and thousands separators.
///
/// Whole amounts drop the fractional part (`$24,000`); anything else is
/// shown to the cent (`$1,234.50`).
pub fn format_amount(amount: Money, currency: &Currency) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let abs = rounded.abs();
    let whole = abs.trunc();
    let cents = ((abs - whole) * dec!(100)).round().to_u32().unwrap_or(0);

    let digits = group_thousands(&whole.normalize().to_string());
    if cents == 0 {
        format!("{sign}{}{digits}", currency.symbol())
    } else {
        format!("{sign}{}{digits}.{cents:02}", currency.symbol())
    }
}

/// Format a ratio in [0, 1] as a percentage with two decimals (`40.44%`).
pub fn format_percentage(ratio: Decimal) -> String {
    let pct = (ratio * dec!(100)).round_dp(2);
    format!("{pct:.2}%")
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
