//! Base-unit scaling and display formatting for balances.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Fractional digits of one display unit; one unit is 10^8 base units.
pub const BALANCE_DECIMALS: u32 = 8;

/// Converts an integer amount of base units to display units without rounding.
pub fn from_base_units(raw: u64) -> Decimal {
    Decimal::from_i128_with_scale(i128::from(raw), BALANCE_DECIMALS)
}

/// Nearest `f64`, for the REAL balance column. Display always goes through [`format_balance`].
pub fn to_storage_value(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or_default()
}

/// Renders `amount` with exactly 8 fractional digits and `,` between thousands,
/// e.g. `1234567.5` → `1,234,567.50000000`.
pub fn format_balance(amount: Decimal) -> String {
    let mut amount = amount.round_dp(BALANCE_DECIMALS);
    amount.rescale(BALANCE_DECIMALS);

    let text = amount.abs().to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut out = String::with_capacity(text.len() + int_part.len() / 3 + 1);
    if amount.is_sign_negative() && !amount.is_zero() {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push('.');
    out.push_str(frac_part);
    out
}
